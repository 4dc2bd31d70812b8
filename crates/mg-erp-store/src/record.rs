//! Name-keyed result rows.
//!
//! A [`Record`] owns the values of one result row together with the column
//! names of its statement, so consumers can read fields symbolically after the
//! connection is gone.

use std::sync::Arc;

use rusqlite::types::{FromSql, FromSqlError, Value, ValueRef};
use rusqlite::Row;
use serde::{Serialize, Serializer};

use crate::error::{Result, StoreError};

/// One result row, addressable by column name or position.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn from_row(columns: &Arc<[String]>, row: &Row<'_>) -> rusqlite::Result<Self> {
        let values = (0..columns.len())
            .map(|idx| row.get::<_, Value>(idx))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Self {
            columns: Arc::clone(columns),
            values,
        })
    }

    /// Column names, in select order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value of a column, if the column exists.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.index_of(name).map(|idx| &self.values[idx])
    }

    /// Read and convert a column by name.
    pub fn get<T: FromSql>(&self, name: &str) -> Result<T> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| StoreError::Database(rusqlite::Error::InvalidColumnName(name.into())))?;
        self.convert(idx, name)
    }

    /// Read and convert a column by position.
    pub fn get_index<T: FromSql>(&self, idx: usize) -> Result<T> {
        let name = self
            .columns
            .get(idx)
            .ok_or(StoreError::Database(rusqlite::Error::InvalidColumnIndex(idx)))?;
        self.convert(idx, name)
    }

    /// Render the row as a JSON object keyed by column name.
    ///
    /// Blobs are hex-encoded; non-finite reals become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .columns
            .iter()
            .zip(&self.values)
            .map(|(name, value)| (name.clone(), value_to_json(value)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn convert<T: FromSql>(&self, idx: usize, name: &str) -> Result<T> {
        let value = ValueRef::from(&self.values[idx]);
        T::column_result(value).map_err(|err| {
            let err = match err {
                FromSqlError::InvalidType => {
                    rusqlite::Error::InvalidColumnType(idx, name.to_string(), value.data_type())
                }
                FromSqlError::OutOfRange(v) => rusqlite::Error::IntegralValueOutOfRange(idx, v),
                other => rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    value.data_type(),
                    Box::new(other),
                ),
            };
            StoreError::Database(err)
        })
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Blob(b) => serde_json::Value::String(hex::encode(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use serde_json::json;

    fn select(sql: &str) -> Vec<Record> {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn.prepare(sql).unwrap();
        let columns: Arc<[String]> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = stmt
            .query_map([], |row| Record::from_row(&columns, row))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap();
        rows
    }

    #[test]
    fn test_get_by_name() {
        let rows = select("SELECT 'Console XYZ' AS nome, 2500.0 AS preco, NULL AS sku");
        let row = &rows[0];
        assert_eq!(row.get::<String>("nome").unwrap(), "Console XYZ");
        assert_eq!(row.get::<f64>("preco").unwrap(), 2500.0);
        assert_eq!(row.get::<Option<String>>("sku").unwrap(), None);
        assert_eq!(row.columns(), ["nome", "preco", "sku"]);
    }

    #[test]
    fn test_get_by_index_matches_name() {
        let rows = select("SELECT 7 AS id, 'x' AS nome");
        assert_eq!(rows[0].get_index::<i64>(0).unwrap(), 7);
        assert_eq!(rows[0].get_index::<String>(1).unwrap(), "x");
    }

    #[test]
    fn test_unknown_column() {
        let rows = select("SELECT 1 AS id");
        let err = rows[0].get::<i64>("nope").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Database(rusqlite::Error::InvalidColumnName(_))
        ));
    }

    #[test]
    fn test_wrong_type() {
        let rows = select("SELECT 'abc' AS id");
        assert!(rows[0].get::<i64>("id").is_err());
    }

    #[test]
    fn test_to_json() {
        let rows = select("SELECT 1 AS id, 'Slim' AS modelo, x'beef' AS raw, NULL AS cor");
        assert_eq!(
            rows[0].to_json(),
            json!({ "id": 1, "modelo": "Slim", "raw": "beef", "cor": null })
        );
        assert_eq!(serde_json::to_value(&rows[0]).unwrap(), rows[0].to_json());
    }
}
