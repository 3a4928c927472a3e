// 📐 Shape Layer - Column declarations shared by validation and persistence
// Every table the pipeline emits describes itself as typed columns + cell values

use std::borrow::Cow;

// ============================================================================
// COLUMN TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Record identifier (kept verbatim from the source file)
    Id,
    /// Free text, subject to the field-length cap
    Text,
    /// Calendar date, ISO `YYYY-MM-DD`
    Date,
    /// Wall-clock timestamp, `YYYY-MM-DD HH:MM:SS`
    Timestamp,
    /// Floating point number
    Real,
}

impl ColumnType {
    /// True for every column stored as text (these are the ones length-checked)
    pub fn is_text(&self) -> bool {
        !matches!(self, ColumnType::Real)
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Real => "REAL",
            _ => "TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Column {
            name: name.to_string(),
            ty,
        }
    }
}

// ============================================================================
// CELL VALUES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    Text(Cow<'a, str>),
    Real(f64),
}

impl<'a> Value<'a> {
    pub fn text(value: &'a str) -> Self {
        Value::Text(Cow::Borrowed(value))
    }

    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map(Value::text).unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text form used for CSV cells and key grouping (null renders empty)
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.to_string(),
            Value::Real(n) => n.to_string(),
        }
    }

    /// Length in characters, only meaningful for text cells
    pub fn text_len(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

// ============================================================================
// ROW TRAIT
// ============================================================================

/// A record that can be laid out as a table row
pub trait Row {
    fn columns() -> Vec<Column>;

    /// Cell values, in the same order as `columns()`
    fn values(&self) -> Vec<Value<'_>>;
}

/// Column layout of `left ⟕ right` on `key`
///
/// Left columns come first, then every right column except the join key.
/// A right column whose name is already taken on the left gets `suffix` appended.
pub fn join_columns(left: &[Column], right: &[Column], key: &str, suffix: &str) -> Vec<Column> {
    let mut columns = left.to_vec();

    for col in right.iter().filter(|c| c.name != key) {
        let name = if left.iter().any(|l| l.name == col.name) {
            format!("{}{}", col.name, suffix)
        } else {
            col.name.clone()
        };
        columns.push(Column { name, ty: col.ty });
    }

    columns
}

// ============================================================================
// TESTS
// ============================================================================
