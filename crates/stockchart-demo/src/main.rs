// File: crates/stockchart-demo/src/main.rs
// Summary: Demo CLI: loads performance or revenue CSV data (or generates a sample series)
//          and renders a PNG chart, printing a text summary when rendering fails.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use clap::{Parser, ValueEnum};
use stockchart_core::theme;
use stockchart_core::{
    render_performance_chart, render_revenue_chart_with, ChartConfig, ChartKind, FontCandidate, GlyphSource,
    PerformancePoint, RevenuePoint,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Line,
    Bar,
    Revenue,
}

#[derive(Debug, Parser)]
#[command(name = "stockchart-demo", about = "Render stock performance and revenue charts to PNG")]
struct Args {
    /// Chart to draw.
    #[arg(long, value_enum, default_value_t = Kind::Line)]
    kind: Kind,
    /// CSV input; a sample series is generated when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output PNG path (defaults to target/out/chart_<kind>.png).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Font candidate (file path or family name); repeatable.
    #[arg(long = "font", env = "STOCKCHART_FONTS", value_delimiter = ',')]
    fonts: Vec<String>,
    /// Extra directory searched for font families.
    #[arg(long)]
    font_dir: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    /// Display name used in the revenue header.
    #[arg(long, default_value = "DEMO")]
    name: String,
    #[arg(long)]
    no_grid: bool,
    #[arg(long)]
    no_legend: bool,
    #[arg(long, default_value = "light")]
    theme: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = build_config(&args);

    let glyphs = GlyphSource::resolve(&config.font_candidates);
    if glyphs.is_fallback() {
        warn!("no usable font found; text is drawn with the built-in bitmap face and CJK glyphs render as boxes");
    }

    let out = args.out.clone().unwrap_or_else(|| out_name(args.kind));
    match args.kind {
        Kind::Line | Kind::Bar => {
            let data = match &args.input {
                Some(path) => load_performance_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
                None => sample_performance(24),
            };
            info!(points = data.len(), "loaded performance series");
            match render_performance_chart(&data, &config) {
                Ok(bytes) => write_png(&out, &bytes)?,
                Err(err) => {
                    error!(%err, "performance chart failed");
                    println!("{}", performance_summary(&data));
                    return Err(err).context("rendering performance chart");
                }
            }
        }
        Kind::Revenue => {
            let data = match &args.input {
                Some(path) => load_revenue_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
                None => sample_revenue(13),
            };
            info!(points = data.len(), "loaded revenue series");
            match render_revenue_chart_with(&data, &args.name, &config) {
                Ok(bytes) => write_png(&out, &bytes)?,
                Err(err) => {
                    error!(%err, "revenue chart failed");
                    println!("{}", revenue_summary(&args.name, &data));
                    return Err(err).context("rendering revenue chart");
                }
            }
        }
    }
    Ok(())
}

fn build_config(args: &Args) -> ChartConfig {
    let mut config = match args.kind {
        Kind::Line => ChartConfig::performance(),
        Kind::Bar => ChartConfig::performance().with_kind(ChartKind::Bar),
        Kind::Revenue => ChartConfig::revenue(),
    };
    if !args.fonts.is_empty() {
        config.font_candidates = args.fonts.iter().map(|f| FontCandidate::from(f.as_str())).collect();
    }
    if let Some(dir) = &args.font_dir {
        config.font_candidates.push(FontCandidate::Directory(dir.clone()));
    }
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    config.show_grid = !args.no_grid;
    if args.no_legend {
        config.show_legend = false;
    }
    config.theme = theme::find(&args.theme);
    config
}

fn write_png(out: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))?;
    info!(path = %out.display(), bytes = bytes.len(), "wrote chart");
    Ok(())
}

fn out_name(kind: Kind) -> PathBuf {
    let suffix = match kind {
        Kind::Line => "line",
        Kind::Bar => "bar",
        Kind::Revenue => "revenue",
    };
    PathBuf::from("target/out").join(format!("chart_{suffix}.png"))
}

/// Column lookup over lower-cased headers, accepting a few aliases per column.
fn header_index(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

fn read_headers(rdr: &mut csv::Reader<std::fs::File>) -> Result<Vec<String>> {
    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");
    Ok(headers)
}

/// Load `period[,label],performance` rows. Percent strings are passed through untouched
/// so bad values surface as render errors.
fn load_performance_csv(path: &Path) -> Result<Vec<PerformancePoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = read_headers(&mut rdr)?;
    let i_period = header_index(&headers, &["period", "date", "month"]).context("missing period column")?;
    let i_label = header_index(&headers, &["label", "period_label"]);
    let i_perf = header_index(&headers, &["performance", "performance_percent", "return", "perf"])
        .context("missing performance column")?;

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let period = rec.get(i_period).unwrap_or_default().trim().to_string();
        let label = i_label.and_then(|i| rec.get(i)).map(|s| s.trim().to_string()).unwrap_or_else(|| period.clone());
        let perf = rec.get(i_perf).unwrap_or_default().trim().to_string();
        out.push(PerformancePoint::new(period, label, perf));
    }
    Ok(out)
}

/// Load `period,revenue,yoy[,price]` rows; revenue is in thousands of NT$.
fn load_revenue_csv(path: &Path) -> Result<Vec<RevenuePoint>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = read_headers(&mut rdr)?;
    let i_period = header_index(&headers, &["period", "date", "month"]).context("missing period column")?;
    let i_revenue = header_index(&headers, &["revenue", "monthly_revenue"]).context("missing revenue column")?;
    let i_yoy = header_index(&headers, &["yoy", "yoy_growth", "yoy_growth_percent"]).context("missing yoy column")?;
    let i_price = header_index(&headers, &["price", "close", "stock_price"]);

    let (mut periods, mut revenues, mut yoys, mut prices) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or_default().trim().trim_end_matches('%');
        periods.push(field(i_period).to_string());
        revenues.push(field(i_revenue).replace(',', "").parse::<i64>().with_context(|| format!("row {row}: bad revenue"))?);
        yoys.push(field(i_yoy).parse::<f64>().with_context(|| format!("row {row}: bad yoy"))?);
        prices.push(i_price.and_then(|i| field(i).parse::<f64>().ok()).unwrap_or(0.0));
    }
    Ok(RevenuePoint::series_from_columns(&periods, &revenues, &yoys, &prices))
}

/// The last `n` calendar months ending with the current one, oldest first.
fn recent_months(n: usize) -> Vec<NaiveDate> {
    let today = Local::now().date_naive();
    let this_month = today.with_day0(0).unwrap_or(today);
    (0..n)
        .rev()
        .filter_map(|back| this_month.checked_sub_months(Months::new(back as u32)))
        .collect()
}

fn sample_performance(n: usize) -> Vec<PerformancePoint> {
    recent_months(n)
        .into_iter()
        .enumerate()
        .map(|(i, month)| {
            let t = i as f64;
            let v = (t * 0.45).sin() * 6.0 + t * 0.4 - 2.0;
            let period = month.format("%Y/%m").to_string();
            PerformancePoint::new(period.clone(), period, format!("{v:+.2}%"))
        })
        .collect()
}

fn sample_revenue(n: usize) -> Vec<RevenuePoint> {
    let months = recent_months(n);
    let periods: Vec<String> = months.iter().map(|m| m.format("%Y/%m").to_string()).collect();
    let revenues: Vec<i64> = (0..periods.len()).map(|i| 20_000_000 + ((i as i64 * 7) % 5) * 1_500_000).collect();
    let yoys: Vec<f64> = (0..periods.len()).map(|i| (i as f64 * 0.8).cos() * 18.0 + 5.0).collect();
    let prices: Vec<f64> = (0..periods.len()).map(|i| 550.0 + i as f64 * 4.5).collect();
    RevenuePoint::series_from_columns(&periods, &revenues, &yoys, &prices)
}

fn performance_summary(data: &[PerformancePoint]) -> String {
    let mut lines = vec!["累計績效".to_string()];
    lines.extend(data.iter().map(|p| format!("{}: {}", p.period_label, p.performance_percent)));
    lines.join("\n")
}

fn revenue_summary(name: &str, data: &[RevenuePoint]) -> String {
    let mut lines = vec![format!("{name} 月營收")];
    lines.extend(data.iter().map(|p| {
        format!(
            "{}: {:.0}億 (YoY {:.2}%)",
            p.period_label,
            p.monthly_revenue as f64 / 100_000.0,
            p.yoy_growth_percent
        )
    }));
    lines.join("\n")
}
