use super::Column;

/// Target description of one denormalized table, handed to a
/// [`SchemaState`](super::SchemaState) to derive migration statements.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Table name
    pub name: String,

    /// Columns in traversal order
    pub columns: Vec<Column>,

    /// Qualified names of the primary-key columns
    pub primary_key: Vec<String>,

    /// Qualified name of the column designated for time partitioning
    pub event_time_column: Option<String>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}
