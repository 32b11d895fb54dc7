mod error;
pub use error::Error;

pub mod catalog;
pub use catalog::{Column, ColumnSet};

pub mod hierarchy;
pub use hierarchy::Hierarchy;

pub mod name;

pub mod bucket;

pub mod options;
pub use options::NamingOptions;

pub mod view;
pub use view::{Decomposer, Decomposition, View};

pub mod join;
pub use join::JoinSpec;

/// A Result type alias that uses nestview's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
