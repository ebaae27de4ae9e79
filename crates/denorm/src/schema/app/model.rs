use super::{Field, Primitive};

/// Metadata descriptor for one entity type participating in
/// denormalization.
///
/// Descriptors are plain values supplied at group construction, keyed by
/// the same entity type identifiers the structure schema uses.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    /// Short type name; the table-name segment fallback
    pub name: String,

    /// Explicit table-name segment override
    pub table_name: Option<String>,

    /// Declared fields, in declaration order
    pub fields: Vec<Field>,

    /// Scalar field names never emitted as columns
    pub exclude: Vec<String>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            fields: vec![],
            exclude: vec![],
        }
    }

    /// Override the table-name segment this entity contributes.
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Append a declared field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Exclude a scalar field from column generation.
    pub fn exclude(mut self, field: impl Into<String>) -> Self {
        self.exclude.push(field.into());
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Scalar fields in declaration order.
    pub fn primitives(&self) -> impl Iterator<Item = (&Field, &Primitive)> {
        self.fields
            .iter()
            .filter_map(|field| field.ty.as_primitive().map(|primitive| (field, primitive)))
    }

    /// Association fields in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.is_relation())
    }

    /// The table-name segment this entity contributes, lowercased.
    pub(crate) fn segment(&self) -> String {
        self.table_name
            .as_deref()
            .unwrap_or(&self.name)
            .to_lowercase()
    }

    /// Name of the first declared association pointing back at this entity
    /// itself, given the identifier the entity is registered under.
    pub(crate) fn self_association(&self, entity: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.ty.relation_target() == Some(entity))
            .map(|field| field.name.as_str())
    }

    pub(crate) fn is_excluded(&self, field: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == field)
    }
}
