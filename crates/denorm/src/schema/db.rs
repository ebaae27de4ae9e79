mod column;
pub use column::Column;

mod migration;
pub use migration::SchemaState;

mod table;
pub use table::Table;

mod ty;
pub use ty::Type;
