//! Load tables from CSV and save/load built configs as JSON.
//!
//! Column types are inferred from the cell text, first match wins:
//! integer, float (empty cells become `NaN`), boolean, date/time, text.

use crate::error::{Error, Result};
use crate::models::{Column, ColumnData, Index, Table, date_to_utc};
use crate::params;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::ReaderBuilder;
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a CSV file with a header row. `index_col` moves that column to the table index.
pub fn load_csv<P: AsRef<Path>>(path: P, index_col: Option<&str>) -> Result<Table> {
    let f = File::open(path)?;
    read_csv(f, index_col)
}

/// Same as [`load_csv`] for any reader.
pub fn read_csv<R: Read>(reader: R, index_col: Option<&str>) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (i, col) in cells.iter_mut().enumerate() {
            col.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let mut index = None;
    let mut columns = Vec::with_capacity(headers.len());
    for (name, raw) in headers.into_iter().zip(cells) {
        let data = infer_column(raw);
        debug!("column `{name}` inferred as {:?}", data.dtype());
        if index_col == Some(name.as_str()) {
            index = Some(Index::named(name, data));
        } else {
            columns.push(Column::new(name, data));
        }
    }
    if let Some(wanted) = index_col
        && index.is_none()
    {
        return Err(Error::UnknownColumn(wanted.to_string()));
    }

    let table = Table::new(columns)?;
    match index {
        Some(idx) => table.with_index(idx),
        None => Ok(table),
    }
}

fn infer_column(raw: Vec<String>) -> ColumnData {
    if let Some(v) = parse_all(&raw, |s| s.parse::<i64>().ok()) {
        return ColumnData::Int(v);
    }
    if let Some(v) = parse_all(&raw, |s| {
        if s.is_empty() {
            Some(f64::NAN)
        } else {
            s.parse::<f64>().ok()
        }
    }) {
        return ColumnData::Float(v);
    }
    if let Some(v) = parse_all(&raw, parse_bool) {
        return ColumnData::Bool(v);
    }
    if let Some(v) = parse_all(&raw, parse_datetime) {
        return ColumnData::Datetime(v);
    }
    ColumnData::Text(raw)
}

fn parse_all<T>(raw: &[String], f: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    raw.iter().map(|s| f(s.as_str())).collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// RFC 3339, common naive timestamp layouts (read as UTC), or a bare date.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date_to_utc(d));
        }
    }
    None
}

/// Save a config as indented JSON.
pub fn save_json<P: AsRef<Path>>(config: &Value, path: P, indent: usize) -> Result<()> {
    let mut f = File::create(path)?;
    let s = params::to_pretty_string(config, indent)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load a previously saved config.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(f)?)
}
