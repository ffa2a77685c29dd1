// File: crates/lumen-core/src/record.rs
// Summary: Dynamically typed records and datasets with typed accessors.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// One scalar cell of a parsed row or feature property set.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl Value {
    /// Dynamic typing for raw text cells: numbers, `true`/`false`, empty as null.
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Value::Null;
        }
        match s {
            "true" | "TRUE" | "True" => return Value::Bool(true),
            "false" | "FALSE" | "False" => return Value::Bool(false),
            _ => {}
        }
        match s.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Null => "null",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Loose equality used for joins and filters: numbers compare numerically,
    /// everything else by its display text.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => (a - b).abs() < 1e-9,
            (Value::Null, _) | (_, Value::Null) => false,
            (a, b) => a.to_string() == b.to_string(),
        }
    }

    /// Text shown in info overlays: numbers with three decimals.
    pub fn display_fixed3(&self) -> String {
        match self {
            Value::Number(n) => format!("{n:.3}"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

/// Column name to value, in source column order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn try_get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn get(&self, column: &str) -> Result<&Value> {
        self.fields.get(column).ok_or_else(|| Error::MissingColumn { column: column.to_string() })
    }

    pub fn get_number(&self, column: &str) -> Result<f64> {
        match self.get(column)? {
            Value::Number(n) => Ok(*n),
            other => Err(Error::TypeMismatch {
                column: column.to_string(),
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    /// Text view of a cell; numbers and booleans are rendered, null is rejected.
    pub fn get_string(&self, column: &str) -> Result<String> {
        match self.get(column)? {
            Value::Null => Err(Error::TypeMismatch {
                column: column.to_string(),
                expected: "text",
                found: "null",
            }),
            other => Ok(other.to_string()),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// Ordered sequence of records; transformations return new datasets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Numeric column as a vector; fails on the first missing or non-numeric cell.
    pub fn numbers(&self, column: &str) -> Result<Vec<f64>> {
        self.records.iter().map(|r| r.get_number(column)).collect()
    }

    /// Stable ascending sort by a numeric column.
    pub fn sorted_by(&self, column: &str) -> Result<Dataset> {
        let mut keyed = self
            .records
            .iter()
            .map(|r| r.get_number(column).map(|k| (k, r.clone())))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Dataset::new(keyed.into_iter().map(|(_, r)| r).collect()))
    }

    pub fn filter<F: FnMut(&Record) -> bool>(&self, mut keep: F) -> Dataset {
        Dataset::new(self.records.iter().filter(|r| keep(r)).cloned().collect())
    }

    /// Derive a new column from each record.
    pub fn with_column<F>(&self, column: &str, mut derive: F) -> Result<Dataset>
    where
        F: FnMut(&Record) -> Result<Value>,
    {
        let mut out = Vec::with_capacity(self.records.len());
        for r in &self.records {
            let v = derive(r)?;
            let mut r = r.clone();
            r.insert(column, v);
            out.push(r);
        }
        Ok(Dataset::new(out))
    }

    /// First record whose `column` loosely equals `key`.
    pub fn find(&self, column: &str, key: &Value) -> Option<&Record> {
        self.records.iter().find(|r| r.try_get(column).is_some_and(|v| v.matches(key)))
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
