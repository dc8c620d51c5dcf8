//! Helpers for inspecting and hand-editing a built config.
//!
//! Series data can be large; [`series_data_filter`] swaps every
//! `series[i].data` for a placeholder so the rest of the config is easy to
//! read and tweak, and [`reinject`] puts the data back afterwards.
//!
//! Series are matched by position. Reordering or dropping series between
//! strip and reinject pairs data with the wrong series.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Stand-in for stripped series data.
pub const DATA_PLACEHOLDER: &str = "[...]";

/// Deep copy of `config` with each series' `data` replaced by [`DATA_PLACEHOLDER`].
pub fn series_data_filter(config: &Value) -> Value {
    let mut out = config.clone();
    if let Some(series) = out.get_mut("series").and_then(Value::as_array_mut) {
        for s in series {
            if let Some(obj) = s.as_object_mut() {
                obj.insert("data".into(), Value::from(DATA_PLACEHOLDER));
            }
        }
    }
    out
}

/// Restore series data from `original` into a copy of `edited`.
pub fn reinject(original: &Value, edited: &Value) -> Result<Value> {
    let mut out = edited.clone();
    reinject_in_place(original, &mut out)?;
    Ok(out)
}

/// Restore series data from `original` directly into `edited`.
///
/// Nothing is written unless `edited` has at least as many series as `original`.
pub fn reinject_in_place(original: &Value, edited: &mut Value) -> Result<()> {
    let Some(source) = original.get("series").and_then(Value::as_array) else {
        return Ok(());
    };
    let found = edited
        .get("series")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if found < source.len() {
        return Err(Error::SeriesMismatch {
            expected: source.len(),
            found,
        });
    }
    let Some(target) = edited.get_mut("series").and_then(Value::as_array_mut) else {
        return Ok(());
    };
    if let Some(i) = target.iter().take(source.len()).position(|s| !s.is_object()) {
        return Err(Error::Path(format!("series.{i}")));
    }
    for (dst, src) in target.iter_mut().zip(source) {
        if let Some(obj) = dst.as_object_mut() {
            let data = src.get("data").cloned().unwrap_or(Value::Null);
            obj.insert("data".into(), data);
        }
    }
    Ok(())
}

/// Indented JSON text.
pub fn to_pretty_string(config: &Value, indent: usize) -> Result<String> {
    let pad = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(pad.as_bytes());
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    config.serialize(&mut ser)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Print indented JSON to stdout.
pub fn pretty_json(config: &Value, indent: usize) -> Result<()> {
    println!("{}", to_pretty_string(config, indent)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_string_honours_indent() {
        let v = json!({"a": [1]});
        assert_eq!(to_pretty_string(&v, 2).unwrap(), "{\n  \"a\": [\n    1\n  ]\n}");
        assert_eq!(to_pretty_string(&v, 4).unwrap(), "{\n    \"a\": [\n        1\n    ]\n}");
    }

    #[test]
    fn filter_without_series_is_plain_copy() {
        let v = json!({"chart": {"renderTo": "c"}});
        assert_eq!(series_data_filter(&v), v);
    }
}
