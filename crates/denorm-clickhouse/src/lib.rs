use denorm::schema::db::{Column, SchemaState, Table, Type};
use denorm::{Error, Result};

use indexmap::IndexMap;

/// A snapshot of a live ClickHouse database: table name → column names.
///
/// `migrate_to` emits one `CREATE TABLE` for a table missing from the
/// snapshot, or one `ALTER TABLE … ADD COLUMN` per column missing from an
/// existing table. Nothing is ever dropped or retyped.
#[derive(Debug, Default, Clone)]
pub struct ClickHouseState {
    tables: IndexMap<String, Vec<String>>,
}

impl ClickHouseState {
    /// A snapshot with no tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record an existing table and its column names.
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.tables
            .insert(name.into(), columns.into_iter().map(Into::into).collect());
        self
    }
}

impl SchemaState for ClickHouseState {
    fn migrate_to(&self, table: &Table) -> Result<Vec<String>> {
        for name in &table.primary_key {
            if table.column(name).is_none() {
                return Err(Error::migration(format!(
                    "primary key column `{name}` is not part of table `{}`",
                    table.name
                )));
            }
        }

        match self.tables.get(&table.name) {
            None => Ok(vec![create_table(table)]),
            Some(existing) => Ok(add_columns(table, existing)),
        }
    }
}

fn create_table(table: &Table) -> String {
    let columns = table
        .columns
        .iter()
        .map(|column| format!("    `{}` {}", column.name, column_type(column)))
        .collect::<Vec<_>>()
        .join(",\n");

    let mut sql = format!("CREATE TABLE {} (\n{columns}\n)", table.name);
    sql.push_str("\nENGINE = MergeTree");

    if let Some(column) = &table.event_time_column {
        sql.push_str(&format!("\nPARTITION BY toYYYYMM(`{column}`)"));
    }

    if table.primary_key.is_empty() {
        sql.push_str("\nORDER BY tuple()");
    } else {
        let keys = table
            .primary_key
            .iter()
            .map(|key| format!("`{key}`"))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!("\nPRIMARY KEY ({keys})"));
    }

    sql
}

fn add_columns(table: &Table, existing: &[String]) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|column| !existing.iter().any(|name| name == &column.name))
        .map(|column| {
            format!(
                "ALTER TABLE {} ADD COLUMN `{}` {}",
                table.name,
                column.name,
                column_type(column)
            )
        })
        .collect()
}

fn column_type(column: &Column) -> String {
    let ty = type_name(&column.ty);
    if column.nullable {
        format!("Nullable({ty})")
    } else {
        ty
    }
}

fn type_name(ty: &Type) -> String {
    match ty {
        Type::Boolean => "Bool".to_string(),
        Type::Integer(bytes) => format!("Int{}", u16::from(*bytes) * 8),
        Type::UnsignedInteger(bytes) => format!("UInt{}", u16::from(*bytes) * 8),
        Type::Float(bytes) if *bytes <= 4 => "Float32".to_string(),
        Type::Float(_) => "Float64".to_string(),
        Type::Text | Type::VarChar(_) => "String".to_string(),
        Type::Uuid => "UUID".to_string(),
        Type::Numeric(Some((precision, scale))) => format!("Decimal({precision}, {scale})"),
        Type::Numeric(None) => "Decimal(38, 10)".to_string(),
        Type::Date => "Date32".to_string(),
        Type::DateTime(0) => "DateTime".to_string(),
        Type::DateTime(precision) => format!("DateTime64({precision})"),
        Type::Timestamp(precision) => format!("DateTime64({precision}, 'UTC')"),
        Type::Custom(name) => name.clone(),
    }
}
