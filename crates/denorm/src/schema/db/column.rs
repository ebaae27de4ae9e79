use super::Type;

/// One flattened scalar field of a denormalized table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Qualified column name, path-prefixed by traversal position.
    /// Unique within one table schema.
    pub name: String,

    /// Storage type of the column
    pub ty: Type,

    /// Entity type the flattened field belongs to
    pub entity: String,

    /// Field name on the owning entity
    pub field: String,

    /// Whether the column may hold NULL
    pub nullable: bool,

    /// Name of the owning entity's association that points back at the
    /// entity itself, when one exists. Links the column to the to-many
    /// relation that produced it.
    pub inverse_of: Option<String>,
}
