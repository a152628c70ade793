//! Declarative field-to-column mapping for records stored by [`RecordMapper`].
//!
//! A record type lists its fields once, in the same order as the table's
//! columns. Each [`Field`] pairs the column name with an accessor used when
//! inserting and a setter used when reading a row back. Columns are matched
//! by position, never by name, so the declaration order is the contract.
//!
//! [`RecordMapper`]: super::RecordMapper

use sqlx::Row;
use sqlx::postgres::PgRow;

use super::mapper::StoreError;

/// A value bound to a positional SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Reads column `index` of a row into the record.
pub type Setter<R> = fn(&mut R, &PgRow, usize) -> Result<(), sqlx::Error>;

/// Reads the field's current value for binding.
pub type Getter<R> = fn(&R) -> BindValue;

/// One column of a record's table.
pub struct Field<R> {
    pub name: &'static str,
    /// Assigned by the store on insert; skipped by `INSERT` statements.
    pub identity: bool,
    pub get: Getter<R>,
    pub set: Setter<R>,
}

impl<R> Field<R> {
    pub const fn new(name: &'static str, get: Getter<R>, set: Setter<R>) -> Self {
        Self {
            name,
            identity: false,
            get,
            set,
        }
    }

    pub const fn identity(name: &'static str, get: Getter<R>, set: Setter<R>) -> Self {
        Self {
            name,
            identity: true,
            get,
            set,
        }
    }
}

/// A struct-shaped record that maps onto a single table row.
pub trait Record: Default + Send + Unpin + 'static {
    /// Fields in column declaration order.
    fn fields() -> &'static [Field<Self>];

    /// Builds a record from a row, binding columns to fields by position.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShapeMismatch`] if the row and record differ in
    /// column count, or the decode error of the first field whose column
    /// type does not match.
    fn from_row(row: &PgRow) -> Result<Self, StoreError> {
        let fields = Self::fields();

        if row.len() != fields.len() {
            return Err(StoreError::ShapeMismatch {
                expected: fields.len(),
                found: row.len(),
            });
        }

        let mut record = Self::default();
        for (index, field) in fields.iter().enumerate() {
            (field.set)(&mut record, row, index)?;
        }

        Ok(record)
    }

    /// Column names and values for an `INSERT`, identity fields excluded.
    fn insert_values(&self) -> Vec<(&'static str, BindValue)> {
        Self::fields()
            .iter()
            .filter(|f| !f.identity)
            .map(|f| (f.name, (f.get)(self)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Sample {
        id: i64,
        label: String,
        enabled: bool,
    }

    fn get_id(r: &Sample) -> BindValue {
        r.id.into()
    }
    fn set_id(r: &mut Sample, row: &PgRow, i: usize) -> Result<(), sqlx::Error> {
        r.id = row.try_get(i)?;
        Ok(())
    }
    fn get_label(r: &Sample) -> BindValue {
        r.label.clone().into()
    }
    fn set_label(r: &mut Sample, row: &PgRow, i: usize) -> Result<(), sqlx::Error> {
        r.label = row.try_get(i)?;
        Ok(())
    }
    fn get_enabled(r: &Sample) -> BindValue {
        r.enabled.into()
    }
    fn set_enabled(r: &mut Sample, row: &PgRow, i: usize) -> Result<(), sqlx::Error> {
        r.enabled = row.try_get(i)?;
        Ok(())
    }

    static SAMPLE_FIELDS: [Field<Sample>; 3] = [
        Field::identity("id", get_id, set_id),
        Field::new("label", get_label, set_label),
        Field::new("enabled", get_enabled, set_enabled),
    ];

    impl Record for Sample {
        fn fields() -> &'static [Field<Self>] {
            &SAMPLE_FIELDS
        }
    }

    #[test]
    fn test_insert_values_skip_identity() {
        let sample = Sample {
            id: 9,
            label: "hello".to_string(),
            enabled: true,
        };

        assert_eq!(
            sample.insert_values(),
            vec![
                ("label", BindValue::Text("hello".to_string())),
                ("enabled", BindValue::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let names: Vec<_> = Sample::fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["id", "label", "enabled"]);
        assert!(Sample::fields()[0].identity);
    }

    #[test]
    fn test_bind_value_conversions() {
        assert_eq!(BindValue::from(5i64), BindValue::Int(5));
        assert_eq!(BindValue::from("x"), BindValue::Text("x".to_string()));
        assert_eq!(BindValue::from(false), BindValue::Bool(false));
    }
}
