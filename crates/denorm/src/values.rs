use indexmap::IndexMap;
use std::collections::HashMap;

/// A concrete cell value recorded against a flattened column.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point number
    F64(f64),

    /// String value
    String(String),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::I64(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Collects concrete column values grouped into occurrence-indexed sets.
///
/// Adding a value for a column name that already holds one opens the next
/// occurrence set, so one table schema can carry several denormalized rows
/// sharing the same column layout, one per child of a to-many relation.
#[derive(Debug, Default, Clone)]
pub struct ValueSets {
    /// Last occurrence index handed out per column name
    occurrences: HashMap<String, usize>,

    /// Value sets in ascending occurrence order
    sets: Vec<IndexMap<String, Value>>,
}

impl ValueSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `column`, allocating the next occurrence slot when
    /// the column already holds a value.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let occurrence = self.occurrences.get(&column).map_or(0, |last| last + 1);
        self.occurrences.insert(column.clone(), occurrence);

        if self.sets.len() <= occurrence {
            self.sets.resize_with(occurrence + 1, IndexMap::new);
        }
        self.sets[occurrence].insert(column, value.into());
    }

    /// Accumulated value sets, ascending by occurrence. Column order within
    /// one set is insertion order.
    pub fn sets(&self) -> &[IndexMap<String, Value>] {
        &self.sets
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
