//! Table model fed to the config builder: typed columns plus an optional index.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeSet;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// `NaN` marks a missing value and encodes as `null`.
    Float(f64),
    Text(String),
    /// Always UTC; encodes as epoch milliseconds.
    Datetime(DateTime<Utc>),
}

impl Scalar {
    /// Timestamp given as nanoseconds since the Unix epoch.
    pub fn from_timestamp_nanos(nanos: i64) -> Self {
        Scalar::Datetime(DateTime::<Utc>::from_timestamp_nanos(nanos))
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// A bare date is midnight UTC.
impl From<NaiveDate> for Scalar {
    fn from(v: NaiveDate) -> Self {
        Scalar::Datetime(date_to_utc(v))
    }
}

/// A naive timestamp is read as UTC.
impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self {
        Scalar::Datetime(v.and_utc())
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(v: DateTime<Utc>) -> Self {
        Scalar::Datetime(v)
    }
}

impl From<DateTime<FixedOffset>> for Scalar {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Scalar::Datetime(v.with_timezone(&Utc))
    }
}

pub(crate) fn date_to_utc(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Bool,
    Int,
    Float,
    Datetime,
    Text,
}

impl Dtype {
    /// Numeric columns (bool, int, float) are the ones that become series.
    pub fn is_numeric(self) -> bool {
        matches!(self, Dtype::Bool | Dtype::Int | Dtype::Float)
    }
}

/// Homogeneous column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int(Vec<i64>),
    Float(Vec<f64>),
    Datetime(Vec<DateTime<Utc>>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Datetime(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> Dtype {
        match self {
            ColumnData::Bool(_) => Dtype::Bool,
            ColumnData::Int(_) => Dtype::Int,
            ColumnData::Float(_) => Dtype::Float,
            ColumnData::Datetime(_) => Dtype::Datetime,
            ColumnData::Text(_) => Dtype::Text,
        }
    }

    /// Cell at row `i`, or `None` past the end.
    pub fn get(&self, i: usize) -> Option<Scalar> {
        match self {
            ColumnData::Bool(v) => v.get(i).copied().map(Scalar::Bool),
            ColumnData::Int(v) => v.get(i).copied().map(Scalar::Int),
            ColumnData::Float(v) => v.get(i).copied().map(Scalar::Float),
            ColumnData::Datetime(v) => v.get(i).copied().map(Scalar::Datetime),
            ColumnData::Text(v) => v.get(i).cloned().map(Scalar::Text),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Scalar> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        ColumnData::Datetime(dates.into_iter().map(date_to_utc).collect())
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(v: Vec<bool>) -> Self {
        ColumnData::Bool(v)
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(v: Vec<i64>) -> Self {
        ColumnData::Int(v)
    }
}

impl From<Vec<i32>> for ColumnData {
    fn from(v: Vec<i32>) -> Self {
        ColumnData::Int(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Float(v)
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Text(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Text(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<NaiveDate>> for ColumnData {
    fn from(v: Vec<NaiveDate>) -> Self {
        ColumnData::from_dates(v)
    }
}

impl From<Vec<NaiveDateTime>> for ColumnData {
    fn from(v: Vec<NaiveDateTime>) -> Self {
        ColumnData::Datetime(v.into_iter().map(|t| t.and_utc()).collect())
    }
}

impl From<Vec<DateTime<Utc>>> for ColumnData {
    fn from(v: Vec<DateTime<Utc>>) -> Self {
        ColumnData::Datetime(v)
    }
}

/// One named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Row labels; the default x source.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub name: Option<String>,
    pub data: ColumnData,
}

impl Index {
    pub fn new(data: impl Into<ColumnData>) -> Self {
        Self {
            name: None,
            data: data.into(),
        }
    }

    /// A named index also titles the x axis.
    pub fn named(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: Some(name.into()),
            data: data.into(),
        }
    }
}

/// Ordered, immutable collection of equally long columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: Option<Index>,
}

impl Table {
    /// Validates that there is at least one column, no column is empty,
    /// all lengths agree and names are unique.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let first = columns
            .first()
            .ok_or_else(|| Error::Shape("table has no columns".into()))?;
        let n = first.data.len();
        if n == 0 {
            return Err(Error::Shape(format!("column `{}` is empty", first.name)));
        }
        let mut seen = BTreeSet::new();
        for c in &columns {
            if c.data.len() != n {
                return Err(Error::Shape(format!(
                    "column `{}` has {} rows, expected {}",
                    c.name,
                    c.data.len(),
                    n
                )));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(Error::Shape(format!("duplicate column `{}`", c.name)));
            }
        }
        Ok(Self {
            columns,
            index: None,
        })
    }

    pub fn with_index(mut self, index: Index) -> Result<Self> {
        if index.data.len() != self.n_rows() {
            return Err(Error::Shape(format!(
                "index has {} rows, expected {}",
                index.data.len(),
                self.n_rows()
            )));
        }
        self.index = Some(index);
        Ok(self)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", vec![1i64, 2]),
            Column::new("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn table_rejects_duplicates_and_empty() {
        assert!(Table::new(vec![]).is_err());
        assert!(Table::new(vec![Column::new("a", Vec::<i64>::new())]).is_err());
        let dup = Table::new(vec![
            Column::new("a", vec![1i64]),
            Column::new("a", vec![2i64]),
        ]);
        assert!(matches!(dup, Err(Error::Shape(_))));
    }

    #[test]
    fn index_length_must_match() {
        let t = Table::new(vec![Column::new("a", vec![1i64, 2, 3])]).unwrap();
        assert!(t.clone().with_index(Index::new(vec![1i64, 2])).is_err());
        let t = t.with_index(Index::named("k", vec!["x", "y", "z"])).unwrap();
        assert_eq!(t.index().unwrap().name.as_deref(), Some("k"));
        assert_eq!(t.n_rows(), 3);
    }

    #[test]
    fn naive_date_is_midnight_utc() {
        let d = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        match Scalar::from(d) {
            Scalar::Datetime(t) => assert_eq!(t.timestamp(), 1_420_070_400),
            other => panic!("unexpected {other:?}"),
        }
    }
}
