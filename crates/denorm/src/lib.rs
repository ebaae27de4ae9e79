mod error;
pub use error::Error;

mod group;
pub use group::TableGroup;

pub mod schema;

mod values;
pub use values::{Value, ValueSets};

/// A Result type alias that uses denorm's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
