use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use highframe::{ChartType, DashStyle, Kind, Options, Output, OutputType, Zoom};
use highframe::{params, storage};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "highframe",
    version,
    about = "Turn CSV tables into Highcharts configuration objects"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chart config from a CSV file.
    Convert(ConvertArgs),
    /// Put series data from a full config back into a stripped, hand-edited one.
    Inject(InjectArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// CSV file with a header row.
    input: PathBuf,
    /// Column to use as the table index.
    #[arg(long)]
    index: Option<String>,
    /// JSON options file; flags below override its values.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Container element id (chart.renderTo).
    #[arg(long)]
    render_to: Option<String>,
    /// Plot kind: line, bar, barh, area, scatter, pie.
    #[arg(long)]
    kind: Option<Kind>,
    /// Zoom axes: x, y, xy.
    #[arg(long)]
    zoom: Option<Zoom>,
    /// Columns for the secondary y axis, separated by comma or semicolon.
    #[arg(long)]
    secondary_y: Option<String>,
    /// Label rotation in degrees.
    #[arg(long)]
    rot: Option<f64>,
    #[arg(long, default_value_t = false)]
    loglog: bool,
    #[arg(long, default_value_t = false)]
    logx: bool,
    #[arg(long, default_value_t = false)]
    logy: bool,
    /// Column to use as x source instead of the index.
    #[arg(long)]
    x: Option<String>,
    /// Columns to plot, separated by comma or semicolon.
    #[arg(long)]
    y: Option<String>,
    /// Plot the index as a column and use row positions for x.
    #[arg(long, default_value_t = false)]
    no_index: bool,
    /// Dash styles as COLUMN=TOKEN pairs, e.g. `a=:,b=--`.
    #[arg(long)]
    style: Option<String>,
    /// Stack series (area stacks by default).
    #[arg(long)]
    stacked: Option<bool>,
    #[arg(long, default_value_t = false)]
    grid: bool,
    /// x bounds as MIN:MAX.
    #[arg(long)]
    xlim: Option<String>,
    /// y bounds as MIN:MAX.
    #[arg(long)]
    ylim: Option<String>,
    #[arg(long)]
    fontsize: Option<f64>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, default_value_t = false)]
    sort_columns: bool,
    /// json or dict (pretty JSON), text (compact JSON), or javascript.
    #[arg(long)]
    output_type: Option<OutputType>,
    /// default or stock.
    #[arg(long)]
    chart_type: Option<ChartType>,
    /// Replace series data with a placeholder for easier reading.
    #[arg(long, default_value_t = false)]
    strip: bool,
    /// Indentation for pretty JSON.
    #[arg(long, default_value_t = 2)]
    indent: usize,
    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InjectArgs {
    /// Full config as produced by `convert --output-type dict`.
    #[arg(long)]
    original: PathBuf,
    /// Stripped config, possibly edited.
    #[arg(long)]
    edited: PathBuf,
    #[arg(long, default_value_t = 2)]
    indent: usize,
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_bounds(s: &str) -> Result<(f64, f64)> {
    let (a, b) = s
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("invalid bounds {s:?}, expected MIN:MAX"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

fn parse_styles(s: &str) -> Result<Vec<(String, DashStyle)>> {
    s.split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|pair| -> Result<(String, DashStyle)> {
            let (col, token) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("invalid style {pair:?}, expected COLUMN=TOKEN"))?;
            Ok((col.trim().to_string(), token.trim().parse()?))
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Inject(args) => cmd_inject(args),
    }
}

fn options_from_args(args: &ConvertArgs) -> Result<Options> {
    let mut opts = match &args.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading options {}", path.display()))?;
            Options::from_json_str(&text)
                .with_context(|| format!("parsing options {}", path.display()))?
        }
        None => Options::default(),
    };
    if let Some(v) = &args.render_to {
        opts.render_to = Some(v.clone());
    }
    if args.kind.is_some() {
        opts.kind = args.kind;
    }
    if args.zoom.is_some() {
        opts.zoom = args.zoom;
    }
    if let Some(v) = &args.secondary_y {
        opts.secondary_y = parse_list(v);
    }
    if args.rot.is_some() {
        opts.rot = args.rot;
    }
    opts.loglog |= args.loglog;
    opts.logx |= args.logx;
    opts.logy |= args.logy;
    if let Some(v) = &args.x {
        opts.x = Some(v.clone());
    }
    if let Some(v) = &args.y {
        opts.y = Some(parse_list(v));
    }
    if args.no_index {
        opts.use_index = false;
    }
    if let Some(v) = &args.style {
        opts.style.extend(parse_styles(v)?);
    }
    if args.stacked.is_some() {
        opts.stacked = args.stacked;
    }
    opts.grid |= args.grid;
    if let Some(v) = &args.xlim {
        opts.xlim = Some(parse_bounds(v)?);
    }
    if let Some(v) = &args.ylim {
        opts.ylim = Some(parse_bounds(v)?);
    }
    if args.fontsize.is_some() {
        opts.fontsize = args.fontsize;
    }
    if let Some(v) = &args.title {
        opts.title = Some(v.clone());
    }
    opts.sort_columns |= args.sort_columns;
    if let Some(v) = args.output_type {
        opts.output_type = v;
    }
    if let Some(v) = args.chart_type {
        opts.chart_type = v;
    }
    Ok(opts)
}

fn cmd_convert(args: ConvertArgs) -> Result<()> {
    let opts = options_from_args(&args)?;
    let table = storage::load_csv(&args.input, args.index.as_deref())
        .with_context(|| format!("loading {}", args.input.display()))?;

    let text = if args.strip {
        let config = highframe::build(&table, &opts)?;
        params::to_pretty_string(&params::series_data_filter(&config), args.indent)?
    } else {
        match highframe::serialize(&table, &opts)? {
            Output::Dict(config) => params::to_pretty_string(&config, args.indent)?,
            other => other.into_string()?,
        }
    };
    emit(&text, args.out.as_ref())
}

fn cmd_inject(args: InjectArgs) -> Result<()> {
    let original = storage::load_json(&args.original)
        .with_context(|| format!("loading {}", args.original.display()))?;
    let edited = storage::load_json(&args.edited)
        .with_context(|| format!("loading {}", args.edited.display()))?;
    let merged = params::reinject(&original, &edited)?;
    emit(&params::to_pretty_string(&merged, args.indent)?, args.out.as_ref())
}

fn emit(text: &str, out: Option<&PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Wrote config to {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
