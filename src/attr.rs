//! Dotted-path access to a config, for interactive editing.
//!
//! ```
//! use highframe::attr::AttrView;
//! use serde_json::json;
//!
//! let mut view = AttrView::from(json!({"xAxis": {}, "series": [{"name": "a"}]}));
//! view.set("xAxis.type", "datetime")?;
//! view.set("series.0.name", "renamed")?;
//! assert_eq!(view.get("series.0.name"), Some(&json!("renamed")));
//! let plain = view.into_inner();
//! assert_eq!(plain["xAxis"]["type"], "datetime");
//! # Ok::<(), highframe::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;

/// A config with `a.b.0.c` style accessors. Array elements are addressed by
/// their numeric position. Converting back with [`AttrView::into_inner`] is lossless.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrView {
    inner: Value,
}

/// Wrap a mapping.
pub fn wrap(config: Value) -> AttrView {
    AttrView::from(config)
}

/// Unwrap back to a plain mapping.
pub fn unwrap(view: AttrView) -> Value {
    view.into_inner()
}

/// Stripped (see [`params::series_data_filter`]) and wrapped copy of `config`.
pub fn highcharts_param(config: &Value) -> AttrView {
    AttrView::from(params::series_data_filter(config))
}

impl AttrView {
    pub fn get(&self, path: &str) -> Option<&Value> {
        segments(path).try_fold(&self.inner, |node, seg| match node {
            Value::Object(map) => map.get(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        segments(path).try_fold(&mut self.inner, |node, seg| match node {
            Value::Object(map) => map.get_mut(seg),
            Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        })
    }

    /// Set the value at `path`, creating missing intermediate objects.
    /// Returns the previous value, if any.
    ///
    /// Fails when the path runs through a scalar or past the end of an array.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<Option<Value>> {
        let segs: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = segs.split_last() else {
            return Ok(Some(std::mem::replace(&mut self.inner, value.into())));
        };
        let mut node = &mut self.inner;
        for seg in parents {
            node = match node {
                Value::Object(map) => map
                    .entry(*seg)
                    .or_insert_with(|| Value::Object(Map::new())),
                Value::Array(items) => seg
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(|| Error::Path(path.to_string()))?,
                _ => return Err(Error::Path(path.to_string())),
            };
        }
        match node {
            Value::Object(map) => Ok(map.insert((*last).to_string(), value.into())),
            Value::Array(items) => {
                let slot = last
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| items.get_mut(i))
                    .ok_or_else(|| Error::Path(path.to_string()))?;
                Ok(Some(std::mem::replace(slot, value.into())))
            }
            _ => Err(Error::Path(path.to_string())),
        }
    }

    /// Remove a key from an object. Array elements cannot be removed, which
    /// keeps series positions stable for [`AttrView::reinject`].
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let (parent, key) = match path.rsplit_once('.') {
            Some((p, k)) => (self.get_mut(p)?, k),
            None => (&mut self.inner, path),
        };
        parent.as_object_mut()?.remove(key)
    }

    /// Copy of this view with series data restored from `original`.
    pub fn reinject(&self, original: &Value) -> Result<AttrView> {
        params::reinject(original, &self.inner).map(AttrView::from)
    }

    /// Restore series data from `original` into this view.
    pub fn reinject_in_place(&mut self, original: &Value) -> Result<()> {
        params::reinject_in_place(original, &mut self.inner)
    }

    pub fn as_value(&self) -> &Value {
        &self.inner
    }

    pub fn into_inner(self) -> Value {
        self.inner
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

impl From<Value> for AttrView {
    fn from(inner: Value) -> Self {
        Self { inner }
    }
}

impl From<AttrView> for Value {
    fn from(view: AttrView) -> Self {
        view.inner
    }
}

impl Deref for AttrView {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.inner
    }
}

impl fmt::Display for AttrView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
