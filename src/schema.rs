// 📐 Table Descriptors - the explicit column mapping consumed by the loader
// Each entity pairs its struct with one static TableSchema

use chrono::NaiveDate;
use rusqlite::types::Value;

/// Date layout used both for parsing source cells and for storage
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// COLUMN TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Whole number, stored as INTEGER
    Integer,
    /// Fixed-point amount, stored as REAL under NUMERIC affinity
    Decimal { precision: u8, scale: u8 },
    /// Text with a declared (not enforced) maximum length
    Varchar(u16),
    /// Calendar date, stored as ISO text
    Date,
}

impl ColumnType {
    /// Declared SQL type, as it appears in CREATE TABLE
    pub fn sql_type(&self) -> String {
        match self {
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Decimal { precision, scale } => format!("DECIMAL({}, {})", precision, scale),
            ColumnType::Varchar(len) => format!("VARCHAR({})", len),
            ColumnType::Date => "DATE".to_string(),
        }
    }

    /// Convert one raw CSV cell into a SQLite value.
    ///
    /// Empty cells are NULL for every type. Cells that parse as the column
    /// type are normalised; anything else is kept as the raw text, the same
    /// way SQLite affinity stores a value it cannot convert.
    pub fn coerce(&self, raw: &str) -> Value {
        let cell = raw.trim();
        if cell.is_empty() {
            return Value::Null;
        }

        let parsed = match self {
            ColumnType::Integer => parse_integer(cell)
                .map(Value::Integer)
                .or_else(|| parse_finite(cell).map(Value::Real)),
            ColumnType::Decimal { .. } => parse_finite(cell).map(Value::Real),
            ColumnType::Varchar(_) => None,
            ColumnType::Date => NaiveDate::parse_from_str(cell, DATE_FORMAT)
                .ok()
                .map(|d| Value::Text(d.format(DATE_FORMAT).to_string())),
        };

        parsed.unwrap_or_else(|| Value::Text(raw.to_string()))
    }
}

fn parse_finite(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integers exported through a float column come back as "3.0"; accept those
fn parse_integer(cell: &str) -> Option<i64> {
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }

    let v = parse_finite(cell)?;
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

// ============================================================================
// COLUMN / TABLE DESCRIPTORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
}

impl Column {
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Column {
            name,
            ty,
            primary_key: false,
        }
    }

    /// INTEGER PRIMARY KEY column (SQLite rowid alias)
    pub const fn key(name: &'static str) -> Self {
        Column {
            name,
            ty: ColumnType::Integer,
            primary_key: true,
        }
    }

    pub fn definition(&self) -> String {
        if self.primary_key {
            format!("{} INTEGER PRIMARY KEY", quote_ident(self.name))
        } else {
            format!("{} {}", quote_ident(self.name), self.ty.sql_type())
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn primary_key(&self) -> Option<&Column> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Look a column up by name, ignoring ASCII case
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn create_table_sql(&self) -> String {
        let defs: Vec<String> = self.columns.iter().map(Column::definition).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            quote_ident(self.name),
            defs.join(",\n    ")
        )
    }
}

/// Double-quote an SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE: TableSchema = TableSchema {
        name: "Sample",
        columns: &[
            Column::key("SampleID"),
            Column::new("Label", ColumnType::Varchar(20)),
            Column::new("Amount", ColumnType::Decimal { precision: 10, scale: 2 }),
            Column::new("Opened", ColumnType::Date),
        ],
    };

    #[test]
    fn test_create_table_sql() {
        let sql = SAMPLE.create_table_sql();

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"Sample\""));
        assert!(sql.contains("\"SampleID\" INTEGER PRIMARY KEY"));
        assert!(sql.contains("\"Amount\" DECIMAL(10, 2)"));
        assert!(sql.contains("\"Opened\" DATE"));
    }

    #[test]
    fn test_column_lookup_ignores_case() {
        assert_eq!(SAMPLE.column("label").map(|c| c.name), Some("Label"));
        assert_eq!(SAMPLE.column(" SAMPLEID ").map(|c| c.name), Some("SampleID"));
        assert!(SAMPLE.column("Missing").is_none());
        assert_eq!(SAMPLE.primary_key().map(|c| c.name), Some("SampleID"));
    }

    #[test]
    fn test_coerce_parsed_cells() {
        assert_eq!(ColumnType::Integer.coerce("42"), Value::Integer(42));
        assert_eq!(ColumnType::Integer.coerce("3.0"), Value::Integer(3));
        assert_eq!(ColumnType::Integer.coerce("3.5"), Value::Real(3.5));
        assert_eq!(ColumnType::Integer.coerce(""), Value::Null);

        let dec = ColumnType::Decimal { precision: 5, scale: 2 };
        assert_eq!(dec.coerce(" 12.50 "), Value::Real(12.5));

        assert_eq!(
            ColumnType::Date.coerce("1990-01-01"),
            Value::Text("1990-01-01".to_string())
        );
        assert_eq!(
            ColumnType::Varchar(10).coerce("Alice"),
            Value::Text("Alice".to_string())
        );
        assert_eq!(ColumnType::Varchar(10).coerce("   "), Value::Null);
    }

    #[test]
    fn test_coerce_keeps_unparsable_text() {
        let dec = ColumnType::Decimal { precision: 5, scale: 2 };

        assert_eq!(
            ColumnType::Date.coerce("01/31/1990"),
            Value::Text("01/31/1990".to_string())
        );
        assert_eq!(ColumnType::Integer.coerce("N/A"), Value::Text("N/A".to_string()));
        assert_eq!(dec.coerce("NaN"), Value::Text("NaN".to_string()));
    }
}
