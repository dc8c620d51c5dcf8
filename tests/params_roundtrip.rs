use chrono::NaiveDate;
use highframe::attr::{self, AttrView};
use highframe::params::{self, DATA_PLACEHOLDER};
use highframe::{Column, Error, Index, Options, Table};
use serde_json::{Value, json};

fn config() -> Value {
    let days: Vec<NaiveDate> = (15..20)
        .map(|d| NaiveDate::from_ymd_opt(2014, 3, d).unwrap())
        .collect();
    let table = Table::new(vec![
        Column::new("A", (0..5).map(|i| (i as f64 / 2.0).sin()).collect::<Vec<_>>()),
        Column::new("Q", (0..5).map(|i| 2.0 + (i as f64 / 1.5).cos()).collect::<Vec<_>>()),
    ])
    .unwrap()
    .with_index(Index::new(days))
    .unwrap();
    highframe::build(&table, &Options::new().render_to("content")).unwrap()
}

#[test]
fn strip_replaces_data_and_leaves_input_alone() {
    let cfg = config();
    let before = cfg.clone();
    let stripped = params::series_data_filter(&cfg);
    assert_eq!(cfg, before);
    for s in stripped["series"].as_array().unwrap() {
        assert_eq!(s["data"], DATA_PLACEHOLDER);
    }
    assert_eq!(stripped["chart"], cfg["chart"]);
}

#[test]
fn strip_then_reinject_restores_every_series() {
    let cfg = config();
    let stripped = params::series_data_filter(&cfg);
    let restored = params::reinject(&cfg, &stripped).unwrap();
    assert_eq!(restored, cfg);
    // the copy variant leaves the edited object stripped
    assert_eq!(stripped["series"][0]["data"], DATA_PLACEHOLDER);
}

#[test]
fn reinject_keeps_other_edits() {
    let cfg = config();
    let mut js = attr::highcharts_param(&cfg);
    js.set("series.0.name", "New lineplot name").unwrap();
    js.set("xAxis.type", "linear").unwrap();

    let js2 = js.reinject(&cfg).unwrap();
    assert_eq!(js2.get("series.0.name"), Some(&json!("New lineplot name")));
    assert_eq!(js2.get("xAxis.type"), Some(&json!("linear")));
    assert_eq!(js2["series"][0]["data"], cfg["series"][0]["data"]);
    assert_eq!(js2["series"][1]["data"], cfg["series"][1]["data"]);
    // untouched because reinject worked on a copy
    assert_eq!(js.get("series.1.data"), Some(&json!(DATA_PLACEHOLDER)));

    js.reinject_in_place(&cfg).unwrap();
    assert_eq!(js, js2);
}

#[test]
fn reinject_rejects_missing_series_without_writing() {
    let cfg = config();
    let mut edited = params::series_data_filter(&cfg);
    edited["series"].as_array_mut().unwrap().pop();
    let snapshot = edited.clone();
    let err = params::reinject_in_place(&cfg, &mut edited).unwrap_err();
    assert!(matches!(err, Error::SeriesMismatch { expected: 2, found: 1 }));
    assert_eq!(edited, snapshot);
}

#[test]
fn wrap_unwrap_is_lossless() {
    let cfg = config();
    assert_eq!(attr::unwrap(attr::wrap(cfg.clone())), cfg);
    let view: AttrView = cfg.clone().into();
    assert_eq!(Value::from(view), cfg);
}

#[test]
fn pretty_output_parses_back() {
    let cfg = config();
    let text = params::to_pretty_string(&cfg, 2).unwrap();
    assert!(text.contains("\n  \"chart\""));
    let back: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(back["chart"], cfg["chart"]);
    assert_eq!(back["series"][1]["name"], "Q");
    assert_eq!(back["series"][0]["data"][4][0], cfg["series"][0]["data"][4][0]);
    params::pretty_json(&params::series_data_filter(&cfg), 2).unwrap();
}
