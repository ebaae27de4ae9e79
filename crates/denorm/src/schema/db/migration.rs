use super::Table;
use crate::Result;

/// A view of a live database schema that can produce the statements
/// migrating it to a target table.
///
/// Implementations own the "from" side (an introspected snapshot, an empty
/// database, a fixture). They receive the computed target description and
/// their result is propagated unchanged.
pub trait SchemaState {
    /// Ordered DDL statements migrating the live schema to `table`.
    fn migrate_to(&self, table: &Table) -> Result<Vec<String>>;
}
