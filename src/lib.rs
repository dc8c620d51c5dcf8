//! highframe
//!
//! Turn a table of named columns into a Highcharts configuration object.
//!
//! ### Features
//! - One series per numeric column, paired with the index, a chosen `x`
//!   column, or row positions
//! - pandas-style plotting options (`kind`, `zoom`, `secondary_y`, `rot`,
//!   `loglog`, `style`, `stacked`, `grid`, `xlim`/`ylim`, `fontsize`, ...)
//! - Output as a JSON mapping, JSON text, or a `new Highcharts.Chart(...)` call
//! - Strip/reinject series data and dotted-path editing for hand tweaks
//!
//! ### Example
//! ```
//! use chrono::NaiveDate;
//! use highframe::{Column, Options, Table, OutputType};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2015, 1, d).unwrap();
//! let table = Table::new(vec![
//!     Column::new("a", vec![1i64, 2]),
//!     Column::new("t", vec![day(1), day(2)]),
//! ])?;
//! let opts = Options::new().render_to("chart").x("t").output_type(OutputType::Dict);
//! let cfg = highframe::build(&table, &opts)?;
//! assert_eq!(cfg["xAxis"]["type"], "datetime");
//! assert_eq!(cfg["series"][0]["data"][0][0], 1420070400000i64);
//!
//! let view = highframe::attr::highcharts_param(&cfg);
//! assert_eq!(view.get("series.0.data"), Some(&serde_json::json!("[...]")));
//! # Ok::<(), highframe::Error>(())
//! ```

pub mod attr;
pub mod encode;
pub mod error;
pub mod models;
pub mod options;
pub mod params;
pub mod serialize;
pub mod storage;

pub use attr::AttrView;
pub use encode::json_encode;
pub use error::{Error, Result};
pub use models::{Column, ColumnData, Dtype, Index, Scalar, Table};
pub use options::{ChartType, DashStyle, Kind, Options, OutputType, Zoom};
pub use params::{pretty_json, reinject, reinject_in_place, series_data_filter};
pub use serialize::{Output, build, serialize};
