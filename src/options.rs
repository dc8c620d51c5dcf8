//! Plotting options and the closed vocabularies they accept.
//!
//! Enumerated options are plain enums; the string entry point for each is
//! `FromStr`, which fails with [`Error::InvalidOption`] on tokens outside the
//! domain. `Options` also deserializes from JSON through the same parsers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Plot kind, pandas-style vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Kind {
    Line,
    /// Vertical bars.
    Bar,
    /// Horizontal bars.
    Barh,
    Area,
    Scatter,
    Pie,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Line => "line",
            Kind::Bar => "bar",
            Kind::Barh => "barh",
            Kind::Area => "area",
            Kind::Scatter => "scatter",
            Kind::Pie => "pie",
        }
    }

    /// Highcharts `chart.type` token.
    pub fn highcharts_type(self) -> &'static str {
        match self {
            Kind::Bar => "column",
            Kind::Barh => "bar",
            other => other.as_str(),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "line" => Ok(Kind::Line),
            "bar" => Ok(Kind::Bar),
            "barh" => Ok(Kind::Barh),
            "area" => Ok(Kind::Area),
            "scatter" => Ok(Kind::Scatter),
            "pie" => Ok(Kind::Pie),
            other => Err(Error::invalid("kind", other)),
        }
    }
}

/// Zoom axes (`chart.zoomType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Zoom {
    X,
    Y,
    XY,
}

impl Zoom {
    pub fn as_str(self) -> &'static str {
        match self {
            Zoom::X => "x",
            Zoom::Y => "y",
            Zoom::XY => "xy",
        }
    }
}

impl FromStr for Zoom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x" => Ok(Zoom::X),
            "y" => Ok(Zoom::Y),
            "xy" => Ok(Zoom::XY),
            other => Err(Error::invalid("zoom", other)),
        }
    }
}

/// Line dash style, parsed from matplotlib-like tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DashStyle {
    /// `-`
    Solid,
    /// `--`
    Dash,
    /// `-.`
    DashDot,
    /// `:`
    Dot,
}

impl DashStyle {
    /// Matplotlib-like token.
    pub fn as_str(self) -> &'static str {
        match self {
            DashStyle::Solid => "-",
            DashStyle::Dash => "--",
            DashStyle::DashDot => "-.",
            DashStyle::Dot => ":",
        }
    }

    /// Highcharts `dashStyle` name.
    pub fn highcharts_name(self) -> &'static str {
        match self {
            DashStyle::Solid => "Solid",
            DashStyle::Dash => "Dash",
            DashStyle::DashDot => "DashDot",
            DashStyle::Dot => "Dot",
        }
    }
}

impl FromStr for DashStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(DashStyle::Solid),
            "--" => Ok(DashStyle::Dash),
            "-." => Ok(DashStyle::DashDot),
            ":" => Ok(DashStyle::Dot),
            other => Err(Error::invalid("style", other)),
        }
    }
}

/// Shape of what [`crate::serialize`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputType {
    /// The nested mapping itself; spelled `json` or `dict`.
    Dict,
    /// Compact JSON text.
    Text,
    /// `new Highcharts.Chart({...});`
    #[default]
    JavaScript,
}

impl OutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputType::Dict => "json",
            OutputType::Text => "text",
            OutputType::JavaScript => "javascript",
        }
    }
}

impl FromStr for OutputType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" | "dict" => Ok(OutputType::Dict),
            "text" => Ok(OutputType::Text),
            "javascript" | "js" => Ok(OutputType::JavaScript),
            other => Err(Error::invalid("output_type", other)),
        }
    }
}

/// Highcharts constructor used for JavaScript output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Default,
    Stock,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Default => "default",
            ChartType::Stock => "stock",
        }
    }

    pub fn constructor(self) -> &'static str {
        match self {
            ChartType::Default => "Highcharts.Chart",
            ChartType::Stock => "Highcharts.StockChart",
        }
    }
}

impl FromStr for ChartType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(ChartType::Default),
            "stock" => Ok(ChartType::Stock),
            other => Err(Error::invalid("chart_type", other)),
        }
    }
}

macro_rules! string_conversions {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> String {
                v.to_string()
            }
        }
    )*};
}

string_conversions!(Kind, Zoom, DashStyle, OutputType, ChartType);

/// Recognized plotting options. Unset fields leave the matching config keys out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Container element id (`chart.renderTo`).
    pub render_to: Option<String>,
    pub output_type: OutputType,
    pub chart_type: ChartType,
    pub kind: Option<Kind>,
    pub zoom: Option<Zoom>,
    /// Columns plotted against a second, opposite y axis.
    #[serde(deserialize_with = "de_names_from_string_or_list")]
    pub secondary_y: Vec<String>,
    /// Suffix secondary series names with ` (right)`.
    pub mark_right: bool,
    /// Label rotation in degrees for every axis.
    pub rot: Option<f64>,
    pub loglog: bool,
    pub logx: bool,
    pub logy: bool,
    /// Column used as x source instead of the index.
    pub x: Option<String>,
    /// Columns to plot, in this order.
    pub y: Option<Vec<String>>,
    /// When false the index is plotted as a column and x becomes row positions.
    pub use_index: bool,
    pub style: BTreeMap<String, DashStyle>,
    /// `None` means the kind's default (area stacks, bars don't).
    pub stacked: Option<bool>,
    pub grid: bool,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub fontsize: Option<f64>,
    pub xticks: Option<Vec<f64>>,
    pub yticks: Option<Vec<f64>>,
    pub title: Option<String>,
    pub legend: Option<bool>,
    /// Copied verbatim into `tooltip`.
    pub tooltip: Option<Value>,
    /// `(width, height)` in pixels.
    pub figsize: Option<(f64, f64)>,
    pub polar: bool,
    pub sort_columns: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            render_to: None,
            output_type: OutputType::default(),
            chart_type: ChartType::default(),
            kind: None,
            zoom: None,
            secondary_y: Vec::new(),
            mark_right: true,
            rot: None,
            loglog: false,
            logx: false,
            logy: false,
            x: None,
            y: None,
            use_index: true,
            style: BTreeMap::new(),
            stacked: None,
            grid: false,
            xlim: None,
            ylim: None,
            fontsize: None,
            xticks: None,
            yticks: None,
            title: None,
            legend: None,
            tooltip: None,
            figsize: None,
            polar: false,
            sort_columns: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON options document. Enumerated values outside their domain
    /// fail with [`Error::InvalidOption`]; malformed JSON or unknown keys
    /// fail with [`Error::Json`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(s)?;
        check_tokens(&raw)?;
        Ok(serde_json::from_value(raw)?)
    }

    pub fn render_to(mut self, id: impl Into<String>) -> Self {
        self.render_to = Some(id.into());
        self
    }

    pub fn output_type(mut self, t: OutputType) -> Self {
        self.output_type = t;
        self
    }

    pub fn chart_type(mut self, t: ChartType) -> Self {
        self.chart_type = t;
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn zoom(mut self, zoom: Zoom) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn secondary_y(mut self, column: impl Into<String>) -> Self {
        self.secondary_y.push(column.into());
        self
    }

    pub fn rot(mut self, degrees: f64) -> Self {
        self.rot = Some(degrees);
        self
    }

    pub fn loglog(mut self, on: bool) -> Self {
        self.loglog = on;
        self
    }

    pub fn x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    pub fn y<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn style(mut self, column: impl Into<String>, dash: DashStyle) -> Self {
        self.style.insert(column.into(), dash);
        self
    }

    pub fn stacked(mut self, on: bool) -> Self {
        self.stacked = Some(on);
        self
    }

    pub fn grid(mut self, on: bool) -> Self {
        self.grid = on;
        self
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn fontsize(mut self, size: f64) -> Self {
        self.fontsize = Some(size);
        self
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(text.into());
        self
    }

    /// Whether series get `stacking: "normal"`.
    pub fn stacking(&self) -> bool {
        match self.kind {
            Some(Kind::Area) => self.stacked.unwrap_or(true),
            Some(Kind::Bar | Kind::Barh) => self.stacked.unwrap_or(false),
            _ => false,
        }
    }
}

/// Run every enumerated field of a raw options document through its parser.
fn check_tokens(raw: &Value) -> Result<()> {
    fn token<'v>(option: &'static str, v: &'v Value) -> Result<Option<&'v str>> {
        match v {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(Error::invalid(option, other.to_string())),
        }
    }

    let field = |key: &'static str| raw.get(key).map_or(Ok(None), |v| token(key, v));
    if let Some(s) = field("kind")? {
        s.parse::<Kind>()?;
    }
    if let Some(s) = field("zoom")? {
        s.parse::<Zoom>()?;
    }
    if let Some(s) = field("output_type")? {
        s.parse::<OutputType>()?;
    }
    if let Some(s) = field("chart_type")? {
        s.parse::<ChartType>()?;
    }
    if let Some(styles) = raw.get("style").and_then(Value::as_object) {
        for v in styles.values() {
            match token("style", v)? {
                Some(s) => {
                    s.parse::<DashStyle>()?;
                }
                None => return Err(Error::invalid("style", "null")),
            }
        }
    }
    Ok(())
}

/// Serde helper: accept either a single column name or a list of names.
fn de_names_from_string_or_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    struct NamesVisitor;

    impl<'de> Visitor<'de> for NamesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a column name or a list of column names")
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![s.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut names = Vec::new();
            while let Some(name) = seq.next_element::<String>()? {
                names.push(name);
            }
            Ok(names)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(NamesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_stacks_by_default_bars_do_not() {
        assert!(Options::new().kind(Kind::Area).stacking());
        assert!(!Options::new().kind(Kind::Area).stacked(false).stacking());
        assert!(!Options::new().kind(Kind::Bar).stacking());
        assert!(Options::new().kind(Kind::Barh).stacked(true).stacking());
        assert!(!Options::new().stacked(true).stacking());
    }

    #[test]
    fn secondary_y_accepts_string_or_list() {
        let o = Options::from_json_str(r#"{"secondary_y":"a"}"#).unwrap();
        assert_eq!(o.secondary_y, vec!["a".to_string()]);
        let o = Options::from_json_str(r#"{"secondary_y":["a","b"]}"#).unwrap();
        assert_eq!(o.secondary_y.len(), 2);
    }
}
