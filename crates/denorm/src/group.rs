use crate::schema::app::Model;
use crate::schema::builder::{self, Built};
use crate::schema::db::{Column, SchemaState, Table};
use crate::schema::relations;
use crate::values::{Value, ValueSets};
use crate::Result;

use indexmap::IndexMap;
use std::fmt;
use std::sync::OnceLock;

/// A group of entity types flattened into one denormalized table.
///
/// Construction captures the structure schema (which entity embeds which,
/// under which property), the metadata descriptor of every participating
/// entity, and the raw one-to-many relation map; the relation index is
/// derived immediately. The table name, columns, primary key and event-time
/// column are computed on first access and memoized for the group's
/// lifetime. Value sets are accumulated afterwards, one group per
/// denormalization unit of work.
#[derive(Debug)]
pub struct TableGroup {
    structure: IndexMap<String, IndexMap<String, String>>,
    models: IndexMap<String, Model>,
    one_to_many: IndexMap<String, IndexMap<String, String>>,
    built: OnceLock<Built>,
    values: ValueSets,
}

impl TableGroup {
    pub fn new(
        structure: IndexMap<String, IndexMap<String, String>>,
        models: IndexMap<String, Model>,
        one_to_many: IndexMap<String, IndexMap<String, String>>,
    ) -> Self {
        let one_to_many = relations::one_to_many_index(&structure, &one_to_many);

        Self {
            structure,
            models,
            one_to_many,
            built: OnceLock::new(),
            values: ValueSets::new(),
        }
    }

    fn built(&self) -> &Built {
        self.built
            .get_or_init(|| builder::build(&self.structure, &self.models))
    }

    /// The denormalized table name: the lowercased segment of every visited
    /// entity, joined with `_`.
    pub fn table_name(&self) -> &str {
        &self.built().table_name
    }

    /// Flattened columns keyed by qualified name, in traversal order.
    pub fn columns(&self) -> &IndexMap<String, Column> {
        &self.built().columns
    }

    /// Qualified names of the primary-key columns.
    pub fn primary_key(&self) -> &[String] {
        &self.built().primary_key
    }

    /// Qualified name of the column designated for time partitioning.
    pub fn event_time_column(&self) -> Option<&str> {
        self.built().event_time_column.as_deref()
    }

    /// True if `entity` participates in this group, as a structure-schema
    /// key or as any relation target within it.
    pub fn contains_entity(&self, entity: &str) -> bool {
        self.structure.contains_key(entity)
            || self
                .structure
                .values()
                .any(|targets| targets.values().any(|target| target == entity))
    }

    /// The column flattened from `entity`'s field `field`, if any.
    pub fn find_column(&self, entity: &str, field: &str) -> Option<&Column> {
        self.columns()
            .values()
            .find(|column| column.entity == entity && column.field == field)
    }

    /// Qualified name of the column flattened from `entity`'s field
    /// `field`, if any.
    pub fn column_name(&self, entity: &str, field: &str) -> Option<&str> {
        self.find_column(entity, field)
            .map(|column| column.name.as_str())
    }

    /// The structure schema this group was built from.
    pub fn structure(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.structure
    }

    /// The one-to-many relation index: source entity type → (property →
    /// target entity type).
    pub fn one_to_many(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.one_to_many
    }

    /// True if a to-many relation from `source` to `target` survived
    /// relation-index construction.
    pub fn has_one_to_many(&self, source: &str, target: &str) -> bool {
        self.one_to_many
            .get(source)
            .is_some_and(|targets| targets.values().any(|candidate| candidate == target))
    }

    /// Record a concrete value for `column`. A value for a column name that
    /// already holds one opens the next occurrence set.
    pub fn add_value(&mut self, column: &Column, value: impl Into<Value>) -> &mut Self {
        self.values.push(column.name.clone(), value);
        self
    }

    /// Accumulated value sets in ascending occurrence order.
    pub fn value_sets(&self) -> &[IndexMap<String, Value>] {
        self.values.sets()
    }

    /// The target table description handed to a [`SchemaState`].
    pub fn to_table(&self) -> Table {
        let built = self.built();

        Table {
            name: built.table_name.clone(),
            columns: built.columns.values().cloned().collect(),
            primary_key: built.primary_key.clone(),
            event_time_column: built.event_time_column.clone(),
        }
    }

    /// Migration statements moving `state` to this group's table, exactly
    /// as the collaborator produced them.
    pub fn migration_sql(&self, state: &dyn SchemaState) -> Result<Vec<String>> {
        state.migrate_to(&self.to_table())
    }
}

impl fmt::Display for TableGroup {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::app::Field;
    use crate::schema::db::Type;
    use pretty_assertions::assert_eq;

    fn structure(
        entries: &[(&str, &[(&str, &str)])],
    ) -> IndexMap<String, IndexMap<String, String>> {
        entries
            .iter()
            .map(|(entity, children)| {
                (
                    entity.to_string(),
                    children
                        .iter()
                        .map(|(property, target)| (property.to_string(), target.to_string()))
                        .collect(),
                )
            })
            .collect()
    }

    fn order_group() -> TableGroup {
        let models: IndexMap<String, Model> = [
            Model::new("Order")
                .field(Field::primitive("id", Type::Integer(8)).primary_key())
                .field(Field::primitive("placed_at", Type::DateTime(0)))
                .field(Field::has_many("items", "Item")),
            Model::new("Item")
                .field(Field::primitive("id", Type::Integer(8)).primary_key())
                .field(Field::primitive("sku", Type::Text)),
        ]
        .into_iter()
        .map(|model| (model.name.clone(), model))
        .collect();

        TableGroup::new(
            structure(&[("Order", &[("items", "Item")]), ("Item", &[])]),
            models,
            structure(&[("Order", &[("items", "Item")])]),
        )
    }

    #[test]
    fn repeated_accessor_calls_return_identical_results() {
        let group = order_group();

        let first_name = group.table_name().to_string();
        let first_columns: Vec<String> = group.columns().keys().cloned().collect();

        assert_eq!(group.table_name(), first_name);
        let second_columns: Vec<String> = group.columns().keys().cloned().collect();
        assert_eq!(second_columns, first_columns);
    }

    #[test]
    fn schema_is_derived_from_the_whole_group() {
        let group = order_group();

        assert_eq!(group.table_name(), "order_item");
        assert_eq!(group.primary_key(), ["order.id"]);
        assert_eq!(group.event_time_column(), Some("order.placed_at"));

        let names: Vec<_> = group.columns().keys().collect();
        assert_eq!(
            names,
            ["order.id", "order.placed_at", "order.items.item.id", "order.items.item.sku"]
        );
    }

    #[test]
    fn contains_entity_covers_keys_and_targets() {
        let group = order_group();

        assert!(group.contains_entity("Order"));
        assert!(group.contains_entity("Item"));
        assert!(!group.contains_entity("Customer"));
    }

    #[test]
    fn find_column_matches_on_entity_and_field() {
        let group = order_group();

        let column = group.find_column("Item", "sku").unwrap();
        assert_eq!(column.name, "order.items.item.sku");
        assert_eq!(column.ty, Type::Text);

        assert_eq!(group.column_name("Order", "id"), Some("order.id"));
        assert!(group.find_column("Item", "missing").is_none());
        assert!(group.find_column("Customer", "id").is_none());
    }

    #[test]
    fn relation_index_answers_membership_queries() {
        let group = order_group();

        assert!(group.has_one_to_many("Order", "Item"));
        assert!(!group.has_one_to_many("Item", "Order"));
        assert_eq!(group.one_to_many()["Order"]["items"], "Item");
    }

    #[test]
    fn values_accumulate_per_occurrence() {
        let mut group = order_group();
        let sku = group.find_column("Item", "sku").unwrap().clone();
        let id = group.find_column("Order", "id").unwrap().clone();

        group
            .add_value(&id, 7)
            .add_value(&sku, "widget")
            .add_value(&sku, "gadget");

        let sets = group.value_sets();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0]["order.id"], Value::I64(7));
        assert_eq!(sets[0]["order.items.item.sku"], Value::from("widget"));
        assert_eq!(sets[1]["order.items.item.sku"], Value::from("gadget"));
    }

    #[test]
    fn display_renders_the_table_name() {
        let group = order_group();
        assert_eq!(group.to_string(), "order_item");
    }

    #[test]
    fn migration_delegates_to_the_schema_state() {
        struct Recording;

        impl SchemaState for Recording {
            fn migrate_to(&self, table: &Table) -> Result<Vec<String>> {
                Ok(vec![format!(
                    "CREATE {} ({} columns)",
                    table.name,
                    table.columns.len()
                )])
            }
        }

        let group = order_group();
        let statements = group.migration_sql(&Recording).unwrap();
        assert_eq!(statements, ["CREATE order_item (4 columns)"]);
    }

    #[test]
    fn empty_structure_yields_an_empty_schema() {
        let group = TableGroup::new(IndexMap::new(), IndexMap::new(), IndexMap::new());

        assert_eq!(group.table_name(), "");
        assert!(group.columns().is_empty());
        assert!(group.primary_key().is_empty());
    }
}
