use chrono::NaiveDate;
use highframe::{
    Column, DashStyle, Error, Index, Kind, Options, Output, OutputType, Table, Zoom,
};
use serde_json::{Value, json};

fn sample() -> Table {
    let day = |d| NaiveDate::from_ymd_opt(2015, 1, d).unwrap();
    Table::new(vec![
        Column::new("a", vec![1i64, 2]),
        Column::new("b", vec![2i64, 4]),
        Column::new("c", vec![3i64, 6]),
        Column::new("t", vec![day(1), day(2)]),
    ])
    .unwrap()
}

fn dict(opts: Options) -> Value {
    let opts = opts.render_to("chart").output_type(OutputType::Dict);
    match highframe::serialize(&sample(), &opts).unwrap() {
        Output::Dict(v) => v,
        other => panic!("expected dict, got {other:?}"),
    }
}

#[test]
fn output_type_selects_shape() {
    let js = highframe::serialize(&sample(), &Options::new().render_to("chart")).unwrap();
    let text = js.into_string().unwrap();
    assert!(text.starts_with("new Highcharts.Chart({"));
    assert!(text.ends_with("});"));

    let text_out = highframe::serialize(
        &sample(),
        &Options::new().render_to("chart").output_type(OutputType::Text),
    )
    .unwrap();
    let Output::Text(s) = text_out else {
        panic!("expected json text")
    };
    let parsed: Value = serde_json::from_str(&s).unwrap();
    assert_eq!(parsed["chart"]["renderTo"], "chart");

    let obj = dict(Options::new());
    assert!(obj.is_object());
    assert_eq!(obj["chart"]["renderTo"], "chart");
}

#[test]
fn json_output_type_is_the_mapping() {
    let opts = Options::from_json_str(r#"{"render_to": "chart", "output_type": "json"}"#).unwrap();
    assert_eq!(opts.output_type, OutputType::Dict);
    match highframe::serialize(&sample(), &opts).unwrap() {
        Output::Dict(v) => assert_eq!(v["chart"]["renderTo"], "chart"),
        other => panic!("expected dict, got {other:?}"),
    }
    assert_eq!("dict".parse::<OutputType>().unwrap(), OutputType::Dict);
}

#[test]
fn zoom_sets_zoom_type() {
    let obj = dict(Options::new().zoom(Zoom::XY));
    assert_eq!(obj["chart"]["zoomType"], "xy");
    assert!(matches!(
        "z".parse::<Zoom>(),
        Err(Error::InvalidOption { option: "zoom", .. })
    ));
}

#[test]
fn kind_maps_to_highcharts_vocabulary() {
    assert_eq!(dict(Options::new().kind(Kind::Bar))["chart"]["type"], "column");
    assert_eq!(dict(Options::new().kind(Kind::Barh))["chart"]["type"], "bar");
    assert_eq!(dict(Options::new().kind(Kind::Area))["chart"]["type"], "area");
    assert_eq!(dict(Options::new().kind(Kind::Line))["chart"]["type"], "line");
    assert!(dict(Options::new())["chart"].get("type").is_none());

    let err = "z".parse::<Kind>().unwrap_err();
    assert_eq!(err.to_string(), "invalid value \"z\" for option `kind`");
}

#[test]
fn secondary_y_adds_opposite_axis() {
    let obj = dict(Options::new().secondary_y("a"));
    let axes = obj["yAxis"].as_array().unwrap();
    assert_eq!(axes.len(), 2);
    assert_eq!(axes[1]["opposite"], true);
    assert!(axes[0].get("opposite").is_none());

    let series = obj["series"].as_array().unwrap();
    assert_eq!(series[0]["name"], "a (right)");
    assert_eq!(series[0]["yAxis"], 1);
    assert_eq!(series[1]["yAxis"], 0);

    assert_eq!(dict(Options::new())["yAxis"].as_array().unwrap().len(), 1);
}

#[test]
fn mark_right_can_be_disabled() {
    let mut opts = Options::new().secondary_y("b");
    opts.mark_right = false;
    let obj = dict(opts);
    assert_eq!(obj["series"][1]["name"], "b");
    assert_eq!(obj["series"][1]["yAxis"], 1);
}

#[test]
fn rotation_and_log_scale() {
    let obj = dict(Options::new().rot(45.0).loglog(true));
    assert_eq!(obj["xAxis"]["labels"], json!({"rotation": 45}));
    assert_eq!(obj["yAxis"][0]["labels"], json!({"rotation": 45}));
    assert_eq!(obj["xAxis"]["type"], "logarithmic");
    assert_eq!(obj["yAxis"][0]["type"], "logarithmic");
}

#[test]
fn per_axis_log_flags() {
    let mut opts = Options::new();
    opts.logy = true;
    let obj = dict(opts);
    assert!(obj["xAxis"].get("type").is_none());
    assert_eq!(obj["yAxis"][0]["type"], "logarithmic");
}

#[test]
fn datetime_x_column() {
    let obj = dict(Options::new().x("t"));
    assert_eq!(obj["xAxis"]["type"], "datetime");
    assert_eq!(obj["xAxis"]["title"], json!({"text": "t"}));
    let series = obj["series"].as_array().unwrap();
    assert_eq!(series.len(), 3, "x column is not plotted");
    assert_eq!(
        series[0]["data"],
        json!([[1420070400000i64, 1], [1420156800000i64, 2]])
    );
}

#[test]
fn style_sets_dash_for_every_series() {
    let obj = dict(Options::new().x("t").style("a", DashStyle::Dot));
    for series in obj["series"].as_array().unwrap() {
        let expected = if series["name"] == "a" { "Dot" } else { "Solid" };
        assert_eq!(series["dashStyle"], expected);
    }
    assert!(matches!(
        "u".parse::<DashStyle>(),
        Err(Error::InvalidOption { option: "style", .. })
    ));
}

#[test]
fn stacked_area() {
    let obj = dict(Options::new().kind(Kind::Area).stacked(true));
    assert_eq!(obj["series"][0]["stacking"], "normal");
    let obj = dict(Options::new().kind(Kind::Line).stacked(true));
    assert!(obj["series"][0].get("stacking").is_none());
}

#[test]
fn grid_lines() {
    let obj = dict(Options::new().grid(true));
    for axis in [&obj["xAxis"], &obj["yAxis"][0]] {
        assert_eq!(axis["gridLineDashStyle"], "Dot");
        assert_eq!(axis["gridLineWidth"], 1);
    }
}

#[test]
fn axis_limits() {
    let obj = dict(Options::new().xlim(0.0, 1.0).ylim(0.0, 1.0).secondary_y("c"));
    assert_eq!(obj["xAxis"]["min"], 0);
    assert_eq!(obj["xAxis"]["max"], 1);
    for axis in obj["yAxis"].as_array().unwrap() {
        assert_eq!(axis["min"], 0);
        assert_eq!(axis["max"], 1);
    }
}

#[test]
fn font_size_goes_into_label_style() {
    let obj = dict(Options::new().fontsize(12.0).rot(30.0));
    assert_eq!(obj["xAxis"]["labels"]["style"]["fontSize"], 12);
    assert_eq!(obj["xAxis"]["labels"]["rotation"], 30);
    assert_eq!(obj["yAxis"][0]["labels"]["style"]["fontSize"], 12);
}

#[test]
fn series_follow_column_order() {
    let obj = dict(Options::new().x("t"));
    let names: Vec<&str> = obj["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["a", "b", "c"]);

    let obj = dict(Options::new().y(["c", "a"]));
    assert_eq!(obj["series"][0]["name"], "c");
    assert_eq!(obj["series"][1]["name"], "a");
}

#[test]
fn unknown_columns_fail_before_output() {
    let err = highframe::build(&sample(), &Options::new().x("nope")).unwrap_err();
    assert!(matches!(err, Error::UnknownColumn(ref c) if c == "nope"));
    let err = highframe::build(&sample(), &Options::new().y(["a", "zz"])).unwrap_err();
    assert!(matches!(err, Error::UnknownColumn(_)));
    let opts = Options::new().style("zz", DashStyle::Dash);
    let err = highframe::build(&sample(), &opts).unwrap_err();
    assert!(matches!(err, Error::UnknownColumn(_)));
}

#[test]
fn categorical_index_becomes_categories() {
    let table = Table::new(vec![Column::new("v", vec![1.5, 2.5, 0.5])])
        .unwrap()
        .with_index(Index::named("fruit", vec!["pear", "apple", "fig"]))
        .unwrap();
    let obj = highframe::build(&table, &Options::new()).unwrap();
    assert_eq!(obj["xAxis"]["categories"], json!(["pear", "apple", "fig"]));
    assert_eq!(obj["xAxis"]["title"]["text"], "fruit");
    assert_eq!(obj["series"][0]["data"][1], json!(["apple", 2.5]));

    let mut opts = Options::new();
    opts.sort_columns = true;
    let obj = highframe::build(&table, &opts).unwrap();
    assert_eq!(obj["xAxis"]["categories"], json!(["apple", "fig", "pear"]));
}

#[test]
fn extra_chart_options() {
    let mut opts = Options::new().title("My Data");
    opts.legend = Some(false);
    opts.figsize = Some((800.0, 400.0));
    opts.polar = true;
    opts.tooltip = Some(json!({"shared": true}));
    opts.xticks = Some(vec![0.0, 1.0]);
    let obj = dict(opts);
    assert_eq!(obj["title"]["text"], "My Data");
    assert_eq!(obj["legend"]["enabled"], false);
    assert_eq!(obj["chart"]["width"], 800);
    assert_eq!(obj["chart"]["height"], 400);
    assert_eq!(obj["chart"]["polar"], true);
    assert_eq!(obj["tooltip"], json!({"shared": true}));
    assert_eq!(obj["xAxis"]["tickPositions"], json!([0, 1]));
    assert_eq!(obj["series"][0]["data"], json!([1, 2]), "polar data are bare values");
}

#[test]
fn stock_chart_constructor() {
    let opts = Options::new().chart_type(highframe::ChartType::Stock);
    let text = highframe::serialize(&sample(), &opts)
        .unwrap()
        .into_string()
        .unwrap();
    assert!(text.starts_with("new Highcharts.StockChart("));
}

#[test]
fn input_table_is_untouched() {
    let table = sample();
    let before = table.clone();
    highframe::build(&table, &Options::new().x("t").y(["b"])).unwrap();
    assert_eq!(table, before);
}
