//! Table + options -> Highcharts config.
//!
//! The config is a `serde_json::Value` object with the keys Highcharts reads
//! verbatim: `chart`, `xAxis`, `yAxis` (always a list), `series`, and the
//! optional `title`, `legend`, `tooltip`.
//!
//! ### Example
//! ```
//! use highframe::{Column, Options, Table, Kind};
//!
//! let table = Table::new(vec![
//!     Column::new("a", vec![1i64, 2, 3]),
//!     Column::new("b", vec![2.0, 4.0, 6.0]),
//! ])?;
//! let cfg = highframe::build(&table, &Options::new().render_to("chart").kind(Kind::Bar))?;
//! assert_eq!(cfg["chart"]["type"], "column");
//! assert_eq!(cfg["series"].as_array().unwrap().len(), 2);
//! # Ok::<(), highframe::Error>(())
//! ```

use crate::encode::{self, number};
use crate::error::{Error, Result};
use crate::models::{Column, ColumnData, Table};
use crate::options::{DashStyle, OutputType, Options};
use log::{debug, warn};
use serde_json::{Map, Value, json};
use std::borrow::Cow;

/// Result of [`serialize`], shaped by [`Options::output_type`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Dict(Value),
    Text(String),
    JavaScript(String),
}

impl Output {
    pub fn as_dict(&self) -> Option<&Value> {
        match self {
            Output::Dict(v) => Some(v),
            _ => None,
        }
    }

    /// Text form; a dict is rendered as compact JSON.
    pub fn into_string(self) -> Result<String> {
        match self {
            Output::Dict(v) => encode::json_encode(&v),
            Output::Text(s) | Output::JavaScript(s) => Ok(s),
        }
    }
}

/// Build the config and render it as requested by `options.output_type`.
pub fn serialize(table: &Table, options: &Options) -> Result<Output> {
    let config = build(table, options)?;
    Ok(match options.output_type {
        OutputType::Dict => Output::Dict(config),
        OutputType::Text => Output::Text(encode::json_encode(&config)?),
        OutputType::JavaScript => {
            Output::JavaScript(encode::to_javascript(&config, options.chart_type)?)
        }
    })
}

/// Build the config mapping. Fails before producing anything if an option
/// references a column that does not exist.
pub fn build(table: &Table, options: &Options) -> Result<Value> {
    let frame = Frame::resolve(table, options)?;

    let mut output = Map::new();
    output.insert("chart".into(), chart(options));
    if let Some(title) = &options.title {
        output.insert("title".into(), json!({ "text": title }));
    }
    if let Some(enabled) = options.legend {
        output.insert("legend".into(), json!({ "enabled": enabled }));
    }
    if let Some(tooltip) = &options.tooltip {
        output.insert("tooltip".into(), tooltip.clone());
    }
    output.insert("xAxis".into(), x_axis(&frame, options));
    output.insert("yAxis".into(), y_axes(options));
    output.insert("series".into(), Value::Array(series(&frame, options)));
    Ok(Value::Object(output))
}

/// Where x values come from.
enum XSource<'a> {
    /// Row positions `0..n`.
    Positions,
    Values {
        name: Option<&'a str>,
        data: &'a ColumnData,
    },
}

impl XSource<'_> {
    fn at(&self, i: usize) -> Value {
        match self {
            XSource::Positions => Value::from(i),
            XSource::Values { data, .. } => data.get(i).map_or(Value::Null, |s| Value::from(&s)),
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            XSource::Positions => None,
            XSource::Values { name, .. } => *name,
        }
    }

    fn data(&self) -> Option<&ColumnData> {
        match self {
            XSource::Positions => None,
            XSource::Values { data, .. } => Some(*data),
        }
    }
}

/// Table view after applying `x`, `use_index`, `y` and `sort_columns`.
struct Frame<'a> {
    x: XSource<'a>,
    columns: Vec<Cow<'a, Column>>,
}

impl<'a> Frame<'a> {
    fn resolve(table: &'a Table, options: &Options) -> Result<Self> {
        for name in options.style.keys() {
            if table.column(name).is_none() {
                return Err(Error::UnknownColumn(name.clone()));
            }
        }
        for name in &options.secondary_y {
            if table.column(name).is_none() {
                warn!("secondary_y column `{name}` not found in table");
            }
        }

        let mut columns: Vec<Cow<'a, Column>> =
            table.columns().iter().map(Cow::Borrowed).collect();

        let mut x = match &options.x {
            Some(name) => {
                let col = table
                    .column(name)
                    .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
                columns.retain(|c| &c.name != name);
                debug!("using column `{name}` as x source");
                XSource::Values {
                    name: Some(col.name.as_str()),
                    data: &col.data,
                }
            }
            None => match table.index() {
                Some(idx) => XSource::Values {
                    name: idx.name.as_deref(),
                    data: &idx.data,
                },
                None => XSource::Positions,
            },
        };

        if !options.use_index {
            if let XSource::Values { name, data } = x {
                let name = name.unwrap_or("index");
                columns.insert(0, Cow::Owned(Column::new(name, data.clone())));
            }
            x = XSource::Positions;
        }

        if let Some(wanted) = &options.y {
            let mut picked = Vec::with_capacity(wanted.len());
            for name in wanted {
                let col = columns
                    .iter()
                    .find(|c| &c.name == name)
                    .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
                picked.push(col.clone());
            }
            columns = picked;
        }

        if options.sort_columns {
            columns.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(Self { x, columns })
    }
}

fn chart(options: &Options) -> Value {
    let mut chart = Map::new();
    if let Some(id) = &options.render_to {
        chart.insert("renderTo".into(), Value::from(id.as_str()));
    }
    if let Some((w, h)) = options.figsize {
        chart.insert("width".into(), number(w));
        chart.insert("height".into(), number(h));
    }
    if let Some(kind) = options.kind {
        chart.insert("type".into(), Value::from(kind.highcharts_type()));
    }
    if options.polar {
        chart.insert("polar".into(), Value::Bool(true));
    }
    if let Some(zoom) = options.zoom {
        chart.insert("zoomType".into(), Value::from(zoom.as_str()));
    }
    Value::Object(chart)
}

fn x_axis(frame: &Frame<'_>, options: &Options) -> Value {
    let mut axis = Map::new();
    if let Some(name) = frame.x.name() {
        axis.insert("title".into(), json!({ "text": name }));
    }
    match frame.x.data() {
        Some(ColumnData::Datetime(_)) => {
            axis.insert("type".into(), Value::from("datetime"));
        }
        Some(ColumnData::Text(labels)) => {
            let mut labels = labels.clone();
            if options.sort_columns {
                labels.sort();
            }
            axis.insert("categories".into(), Value::from(labels));
        }
        _ => {}
    }
    apply_axis_options(
        &mut axis,
        options,
        options.loglog || options.logx,
        options.xlim,
        options.xticks.as_deref(),
    );
    Value::Object(axis)
}

fn y_axes(options: &Options) -> Value {
    let mut axis = Map::new();
    apply_axis_options(
        &mut axis,
        options,
        options.loglog || options.logy,
        options.ylim,
        options.yticks.as_deref(),
    );
    let mut axes = vec![Value::Object(axis.clone())];
    if !options.secondary_y.is_empty() {
        axis.insert("opposite".into(), Value::Bool(true));
        axes.push(Value::Object(axis));
    }
    Value::Array(axes)
}

/// Fields shared by x and y axes: gridlines, log scale, bounds, labels, ticks.
fn apply_axis_options(
    axis: &mut Map<String, Value>,
    options: &Options,
    log_scale: bool,
    lim: Option<(f64, f64)>,
    ticks: Option<&[f64]>,
) {
    if options.grid {
        axis.insert("gridLineWidth".into(), Value::from(1));
        axis.insert("gridLineDashStyle".into(), Value::from("Dot"));
    }
    if log_scale {
        axis.insert("type".into(), Value::from("logarithmic"));
    }
    if let Some((min, max)) = lim {
        axis.insert("min".into(), number(min));
        axis.insert("max".into(), number(max));
    }
    if let Some(rot) = options.rot {
        axis.insert("labels".into(), json!({ "rotation": number(rot) }));
    }
    if let Some(size) = options.fontsize {
        let labels = axis
            .entry("labels")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(labels) = labels {
            labels.insert("style".into(), json!({ "fontSize": number(size) }));
        }
    }
    if let Some(ticks) = ticks {
        axis.insert(
            "tickPositions".into(),
            Value::Array(ticks.iter().copied().map(number).collect()),
        );
    }
}

fn series(frame: &Frame<'_>, options: &Options) -> Vec<Value> {
    let stacking = options.stacking();
    let mut out = Vec::with_capacity(frame.columns.len());
    for col in &frame.columns {
        if !col.data.dtype().is_numeric() {
            debug!(
                "skipping non-numeric column `{}` ({:?})",
                col.name,
                col.data.dtype()
            );
            continue;
        }
        let secondary = options.secondary_y.iter().any(|s| s == &col.name);
        let name = if secondary && options.mark_right {
            format!("{} (right)", col.name)
        } else {
            col.name.clone()
        };
        let data: Vec<Value> = col
            .data
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let y = Value::from(&y);
                if options.polar {
                    y
                } else {
                    Value::Array(vec![frame.x.at(i), y])
                }
            })
            .collect();

        let mut s = Map::new();
        s.insert("name".into(), Value::from(name));
        s.insert("yAxis".into(), Value::from(u8::from(secondary)));
        s.insert("data".into(), Value::Array(data));
        if stacking {
            s.insert("stacking".into(), Value::from("normal"));
        }
        if !options.style.is_empty() {
            let dash = options
                .style
                .get(&col.name)
                .copied()
                .unwrap_or(DashStyle::Solid);
            s.insert("dashStyle".into(), Value::from(dash.highcharts_name()));
        }
        out.push(Value::Object(s));
    }
    debug!("built {} series", out.len());
    out
}
