use crate::schema::app::Model;
use crate::schema::db::Column;

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Joins the table-name segments of visited entities.
pub(crate) const TABLE_DELIMITER: &str = "_";

/// Joins the path components of a qualified column name.
pub(crate) const COLUMN_DELIMITER: &str = ".";

/// Everything one traversal of the structure schema produces.
#[derive(Debug, Default)]
pub(crate) struct Built {
    pub(crate) table_name: String,

    /// Columns keyed by qualified name, in traversal order
    pub(crate) columns: IndexMap<String, Column>,

    /// Qualified names of the primary-key columns
    pub(crate) primary_key: Vec<String>,

    /// Qualified name of the first temporal column encountered
    pub(crate) event_time_column: Option<String>,
}

/// Tracks state for one full traversal of the structure schema.
struct BuildTable<'a> {
    structure: &'a IndexMap<String, IndexMap<String, String>>,
    models: &'a IndexMap<String, Model>,

    /// Recurrence guard: properties already entered per target entity type.
    /// Lives for exactly one traversal.
    visited: HashMap<&'a str, HashSet<&'a str>>,

    /// Table-name segments in visit order
    segments: Vec<String>,

    columns: IndexMap<String, Column>,

    primary_key: Vec<String>,

    /// Set once the first entity has contributed identifier columns;
    /// suppresses identifier detection for every entity visited later.
    primary_key_latched: bool,

    event_time_column: Option<String>,
}

/// Walk the structure schema depth-first from its first declared entity,
/// producing the table name, the ordered column set, the primary-key column
/// list and the time-partition column in one pass.
pub(crate) fn build(
    structure: &IndexMap<String, IndexMap<String, String>>,
    models: &IndexMap<String, Model>,
) -> Built {
    let mut build = BuildTable {
        structure,
        models,
        visited: HashMap::new(),
        segments: vec![],
        columns: IndexMap::new(),
        primary_key: vec![],
        primary_key_latched: false,
        event_time_column: None,
    };

    if let Some(root) = structure.keys().next() {
        build.visit(root, &[], None);
    }

    Built {
        table_name: build.segments.join(TABLE_DELIMITER),
        columns: build.columns,
        primary_key: build.primary_key,
        event_time_column: build.event_time_column,
    }
}

impl<'a> BuildTable<'a> {
    /// Visit `entity`, reached under the ancestor segments `prefix` via
    /// `property` (absent only at the root).
    fn visit(&mut self, entity: &'a str, prefix: &[String], property: Option<&'a str>) {
        // An entity without a descriptor is not a denormalizable leaf; the
        // branch contributes nothing.
        let Some(model) = self.models.get(entity) else {
            return;
        };

        let segment = model.segment();
        self.add_columns(entity, model, prefix, property, &segment);
        self.segments.push(segment.clone());

        let Some(children) = self.structure.get(entity) else {
            return;
        };

        let mut child_prefix = prefix.to_vec();
        child_prefix.push(segment);

        for (child_property, target) in children {
            if !self.enter(target, child_property) {
                continue;
            }

            // An immediate self-reference would re-emit this entity's
            // columns under a bogus prefix; the guard entry alone breaks
            // the loop.
            if target == entity {
                continue;
            }

            self.visit(target, &child_prefix, Some(child_property));
        }
    }

    /// Mark `(target, property)` as entered. Returns false if the pair was
    /// already entered during this traversal.
    fn enter(&mut self, target: &'a str, property: &'a str) -> bool {
        self.visited.entry(target).or_default().insert(property)
    }

    /// Emit one column per non-excluded scalar field of `model`, in
    /// declaration order.
    fn add_columns(
        &mut self,
        entity: &str,
        model: &Model,
        prefix: &[String],
        property: Option<&str>,
        segment: &str,
    ) {
        let mut path: Vec<&str> = prefix.iter().map(String::as_str).collect();
        if let Some(property) = property {
            path.push(property);
        }
        path.push(segment);

        let inverse_of = model.self_association(entity);
        let mut contributed_identifier = false;

        for (field, primitive) in model.primitives() {
            if model.is_excluded(&field.name) {
                continue;
            }

            let mut name = path.join(COLUMN_DELIMITER);
            name.push_str(COLUMN_DELIMITER);
            name.push_str(&field.name);

            if field.primary_key && !self.primary_key_latched {
                self.primary_key.push(name.clone());
                contributed_identifier = true;
            }

            if self.event_time_column.is_none() && primitive.ty.is_temporal() {
                self.event_time_column = Some(name.clone());
            }

            self.columns.insert(
                name.clone(),
                Column {
                    name,
                    ty: primitive.ty.clone(),
                    entity: entity.to_string(),
                    field: field.name.clone(),
                    nullable: field.nullable,
                    inverse_of: inverse_of.map(String::from),
                },
            );
        }

        if contributed_identifier {
            self.primary_key_latched = true;
        }
    }
}
