// File: crates/stockchart-core/src/chart.rs
// Summary: Chart configuration and the headless rendering pipeline for performance
//          (line / bar) and revenue combo charts, producing PNG bytes.

use std::sync::Arc;

use tracing::debug;

use crate::axis::{AxisRenderer, ValueFormat, GRID_DIVISIONS};
use crate::canvas::{PixelCanvas, Rgba};
use crate::encode::encode_png;
use crate::error::{ChartError, ChartResult};
use crate::grid::{label_indices, COMBO_LABEL_THRESHOLD, MAX_X_LABELS, SINGLE_AXIS_LABEL_THRESHOLD};
use crate::scale::{compute_domain, compute_revenue_domain, IndexScale, ValueScale, PERFORMANCE_FLAT_MARGIN, YOY_FLAT_MARGIN};
use crate::series::{performance_values, revenue_values, PerformancePoint, RevenuePoint, THOUSANDS_PER_HUNDRED_MILLION};
use crate::text::{FontCandidate, GlyphSource};
use crate::theme::Theme;
use crate::types::{Insets, RectI32, MAX_DIMENSION, PERFORMANCE_HEIGHT, PERFORMANCE_WIDTH, REVENUE_HEIGHT, REVENUE_WIDTH};

const TITLE_PX: f32 = 18.0;
const LABEL_PX: f32 = 14.0;
const COMBO_LABEL_PX: f32 = 16.0;
const VALUE_PX: f32 = 12.0;
const PERFORMANCE_LINE_PX: i32 = 3;
const YOY_LINE_PX: i32 = 4;
const EXTREME_MARKER_R: i32 = 4;
const YOY_MARKER_R: i32 = 5;
const LEGEND_SWATCH: i32 = 15;

/// Which chart the composer draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Combo,
}

/// Every piece of fixed text the composer prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captions {
    pub x_axis: String,
    pub performance_axis: String,
    /// Row caption next to the per-label performance values.
    pub performance_row: String,
    pub performance_legend: String,
    pub highest: String,
    pub lowest: String,
    pub revenue_axis: String,
    pub yoy_axis: String,
    pub revenue_legend: String,
    pub yoy_legend: String,
    /// Word used in the header block line `{period} 營收: N億`.
    pub revenue_header: String,
    /// Appended to the display name when a revenue chart has no explicit title.
    pub revenue_title_suffix: String,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            x_axis: "Time".into(),
            performance_axis: "Performance (%)".into(),
            performance_row: "累計績效".into(),
            performance_legend: "績效".into(),
            highest: "最高".into(),
            lowest: "最低".into(),
            revenue_axis: "營收 (億)".into(),
            yoy_axis: "YoY (%)".into(),
            revenue_legend: "營收".into(),
            yoy_legend: "YoY".into(),
            revenue_header: "營收".into(),
            revenue_title_suffix: "月營收".into(),
        }
    }
}

/// Rendering parameters. Read-only during a render.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub show_grid: bool,
    pub show_legend: bool,
    pub kind: ChartKind,
    /// Ordered font candidates; an empty list renders with the built-in face.
    pub font_candidates: Vec<FontCandidate>,
    pub theme: Theme,
    pub captions: Captions,
    /// Circle and label the highest and lowest points of a line chart.
    pub mark_extremes: bool,
}

impl ChartConfig {
    /// 1200×600 line chart.
    pub fn performance() -> Self {
        Self {
            title: String::new(),
            width: PERFORMANCE_WIDTH,
            height: PERFORMANCE_HEIGHT,
            show_grid: true,
            show_legend: false,
            kind: ChartKind::Line,
            font_candidates: default_font_candidates(),
            theme: Theme::light(),
            captions: Captions::default(),
            mark_extremes: true,
        }
    }

    /// 1400×700 combo chart with a legend.
    pub fn revenue() -> Self {
        Self {
            width: REVENUE_WIDTH,
            height: REVENUE_HEIGHT,
            show_legend: true,
            kind: ChartKind::Combo,
            ..Self::performance()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fonts(mut self, candidates: Vec<FontCandidate>) -> Self {
        self.font_candidates = candidates;
        self
    }

    /// Reject canvases that are empty or too large to allocate sensibly.
    pub fn validate(&self) -> ChartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ChartError::invalid_config(format!("canvas must be non-empty, got {}x{}", self.width, self.height)));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ChartError::invalid_config(format!(
                "canvas {}x{} exceeds the {MAX_DIMENSION}px limit",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::performance()
    }
}

/// Font candidates tried when the caller does not supply any: a local CJK file,
/// then common CJK families from the system font database.
pub fn default_font_candidates() -> Vec<FontCandidate> {
    vec![
        FontCandidate::File("fonts/NotoSansTC-Regular.ttf".into()),
        FontCandidate::Family("Noto Sans CJK TC".into()),
        FontCandidate::Family("Noto Sans TC".into()),
        FontCandidate::Family("PingFang TC".into()),
        FontCandidate::Family("Microsoft JhengHei".into()),
    ]
}

/// Render a cumulative-performance chart (line or bar per `config.kind`) to PNG bytes.
#[tracing::instrument(skip(data, config), fields(points = data.len(), kind = ?config.kind))]
pub fn render_performance_chart(data: &[PerformancePoint], config: &ChartConfig) -> ChartResult<Vec<u8>> {
    let canvas = compose_performance(data, config)?;
    encode_png(&canvas)
}

/// Render a revenue combo chart with the default 1400×700 configuration.
pub fn render_revenue_chart(data: &[RevenuePoint], display_name: &str) -> ChartResult<Vec<u8>> {
    render_revenue_chart_with(data, display_name, &ChartConfig::revenue())
}

/// Render a revenue combo chart with an explicit configuration.
#[tracing::instrument(skip(data, config), fields(points = data.len()))]
pub fn render_revenue_chart_with(data: &[RevenuePoint], display_name: &str, config: &ChartConfig) -> ChartResult<Vec<u8>> {
    let canvas = compose_revenue(data, display_name, config)?;
    encode_png(&canvas)
}

/// Draw a performance chart onto a fresh canvas without encoding it.
pub fn compose_performance(data: &[PerformancePoint], config: &ChartConfig) -> ChartResult<PixelCanvas> {
    config.validate()?;
    if config.kind == ChartKind::Combo {
        return Err(ChartError::invalid_config("performance data cannot be drawn as a combo chart"));
    }
    let values = performance_values(data)?;
    let domain = compute_domain(&values, PERFORMANCE_FLAT_MARGIN);
    debug!(min = domain.min, max = domain.max, "performance domain");

    let mut c = Composer::new(config, config.theme.background, &Insets::single_axis());
    let plot = c.plot;
    let n = values.len();
    let xs = match config.kind {
        ChartKind::Bar => IndexScale::centered(n, plot.left, plot.width()),
        _ => IndexScale::edge_to_edge(n, plot.left, plot.width()),
    };
    let ys = ValueScale::new(domain, plot.top, plot.height());
    let theme = config.theme;

    c.draw_title(&config.title);

    let labels: Vec<&str> = data.iter().map(|p| p.period_label.as_str()).collect();
    let indices = label_indices(n, SINGLE_AXIS_LABEL_THRESHOLD, MAX_X_LABELS);
    let glyphs = Arc::clone(&c.glyphs);
    let axes = axis_renderer(&glyphs, plot, config, LABEL_PX, theme.grid);
    axes.draw_left_scale(&mut c.canvas, &ys, ValueFormat::Percent { decimals: 1 });
    let baseline = axes.draw_x_labels(&mut c.canvas, &xs, &labels, &indices);
    for &i in &indices {
        let v = values[i];
        let text = ValueFormat::Percent { decimals: 2 }.format(v);
        glyphs.draw_text_centered(&mut c.canvas, &text, xs.to_px(i), baseline + 20, VALUE_PX, theme.signed(v));
    }
    glyphs.draw_text(&mut c.canvas, &config.captions.performance_row, plot.right + 50, baseline + 20, VALUE_PX, theme.text);

    if domain.straddles_zero() {
        let zero = ys.to_px(0.0);
        c.canvas.draw_dashed_line(plot.left, zero, plot.right, zero, theme.zero_line);
    }

    match config.kind {
        ChartKind::Bar => {
            let bar_w = (xs.slot_px() * 4 / 5).max(1);
            let base = ys.baseline_px();
            for (i, &v) in values.iter().enumerate() {
                let x = xs.to_px(i) - bar_w / 2;
                let y = ys.to_px(v).clamp(plot.top, plot.bottom);
                let (top, h) = if y <= base { (y, base - y) } else { (base, y - base) };
                c.canvas.fill_rect(x, top, bar_w, h.max(1), theme.signed(v));
            }
        }
        _ => {
            let points: Vec<(i32, i32)> = values.iter().enumerate().map(|(i, &v)| (xs.to_px(i), ys.to_px(v))).collect();
            for pair in points.windows(2) {
                let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                c.canvas.draw_thick_line(x1, y1, x2, y2, PERFORMANCE_LINE_PX, theme.line_stroke);
            }
            if let [(x, y)] = points.as_slice() {
                c.canvas.fill_circle(*x, *y, PERFORMANCE_LINE_PX, theme.line_stroke);
            }
            if config.mark_extremes {
                c.mark_extremes(&values, &points);
            }
        }
    }

    axes.draw_frame(&mut c.canvas, false);
    axes.draw_captions(&mut c.canvas, &config.captions.x_axis, &config.captions.performance_axis, None);

    if config.show_legend {
        let ly = plot.bottom + 70;
        let lx = plot.left;
        match config.kind {
            ChartKind::Bar => c.canvas.fill_rect(lx, ly - LEGEND_SWATCH + 3, LEGEND_SWATCH, LEGEND_SWATCH, theme.gain),
            _ => c.canvas.draw_thick_line(lx, ly - 5, lx + 30, ly - 5, PERFORMANCE_LINE_PX, theme.line_stroke),
        }
        glyphs.draw_text(&mut c.canvas, &config.captions.performance_legend, lx + 40, ly, LABEL_PX, theme.text);
    }

    Ok(c.finish())
}

/// Draw a revenue combo chart onto a fresh canvas without encoding it.
pub fn compose_revenue(data: &[RevenuePoint], display_name: &str, config: &ChartConfig) -> ChartResult<PixelCanvas> {
    config.validate()?;
    let (revenue, yoy) = revenue_values(data)?;
    let rev_domain = compute_revenue_domain(&revenue);
    let yoy_domain = compute_domain(&yoy, YOY_FLAT_MARGIN);
    debug!(rev_max = rev_domain.max, yoy_min = yoy_domain.min, yoy_max = yoy_domain.max, "combo domains");

    let theme = config.theme;
    let captions = &config.captions;
    let mut c = Composer::new(config, theme.combo_background, &Insets::combo());
    let plot = c.plot;
    let n = revenue.len();
    let xs = IndexScale::centered(n, plot.left, plot.width());
    let left = ValueScale::new(rev_domain, plot.top, plot.height());
    let right = ValueScale::new(yoy_domain, plot.top, plot.height());

    let title = if config.title.is_empty() {
        format!("{display_name} {}", captions.revenue_title_suffix)
    } else {
        config.title.clone()
    };
    c.draw_title(&title);
    c.draw_revenue_header(data, display_name);

    let labels: Vec<&str> = data.iter().map(|p| p.period_label.as_str()).collect();
    let indices = label_indices(n, COMBO_LABEL_THRESHOLD, MAX_X_LABELS);
    let glyphs = Arc::clone(&c.glyphs);
    let axes = axis_renderer(&glyphs, plot, config, COMBO_LABEL_PX, theme.combo_grid);
    axes.draw_left_scale(&mut c.canvas, &left, ValueFormat::HundredMillion);
    axes.draw_right_scale(&mut c.canvas, &right, ValueFormat::Percent { decimals: 0 });
    axes.draw_x_labels(&mut c.canvas, &xs, &labels, &indices);

    // bars, with annotations kept inside the plot
    let bar_w = (xs.slot_px() * 3 / 5).max(1);
    let base = left.baseline_px();
    let annotation_floor = plot.top + 15;
    for (i, &v) in revenue.iter().enumerate() {
        let x = xs.to_px(i);
        let y = left.to_px(v).clamp(plot.top, plot.bottom);
        let (top, h) = if y <= base { (y, base - y) } else { (base, y - base) };
        c.canvas.fill_rect(x - bar_w / 2, top, bar_w, h, theme.bar_fill);
        if v > 0.0 {
            let text = format!("{:.0}", v / THOUSANDS_PER_HUNDRED_MILLION);
            glyphs.draw_text_centered(&mut c.canvas, &text, x, (y - 5).max(annotation_floor), LABEL_PX, theme.text);
        }
    }

    if yoy_domain.straddles_zero() {
        let zero = right.to_px(0.0);
        c.canvas.draw_dashed_line(plot.left, zero, plot.right, zero, theme.zero_line);
    }

    // YoY line over the bars, markers over the line
    let points: Vec<(i32, i32)> = yoy.iter().enumerate().map(|(i, &v)| (xs.to_px(i), right.to_px(v))).collect();
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        c.canvas.draw_thick_line(x1, y1, x2, y2, YOY_LINE_PX, theme.highlight);
    }
    for (&(x, y), &v) in points.iter().zip(&yoy) {
        c.canvas.fill_circle(x, y, YOY_MARKER_R, theme.highlight);
        let text = format!("{v:.1}%");
        let baseline = if y - 15 < annotation_floor { y + 25 } else { y - 15 };
        glyphs.draw_text_centered(&mut c.canvas, &text, x, baseline, COMBO_LABEL_PX, theme.highlight);
    }

    axes.draw_frame(&mut c.canvas, true);
    axes.draw_captions(&mut c.canvas, &captions.x_axis, &captions.revenue_axis, Some(&captions.yoy_axis));

    if config.show_legend {
        let ly = plot.bottom + 50;
        let lx = plot.left;
        c.canvas.fill_rect(lx, ly, LEGEND_SWATCH, LEGEND_SWATCH, theme.bar_fill);
        glyphs.draw_text(&mut c.canvas, &captions.revenue_legend, lx + 25, ly + 12, COMBO_LABEL_PX, theme.text);
        c.canvas.draw_thick_line(lx + 85, ly + 7, lx + 115, ly + 7, YOY_LINE_PX, theme.highlight);
        c.canvas.fill_circle(lx + 100, ly + 7, YOY_MARKER_R, theme.highlight);
        glyphs.draw_text(&mut c.canvas, &captions.yoy_legend, lx + 125, ly + 12, COMBO_LABEL_PX, theme.text);
    }

    Ok(c.finish())
}

// ---- composer ---------------------------------------------------------------

/// Canvas plus the layout state shared by one render.
struct Composer<'a> {
    canvas: PixelCanvas,
    glyphs: Arc<GlyphSource>,
    config: &'a ChartConfig,
    plot: RectI32,
}

impl<'a> Composer<'a> {
    fn new(config: &'a ChartConfig, background: Rgba, insets: &Insets) -> Self {
        let glyphs = GlyphSource::resolve(&config.font_candidates);
        if glyphs.is_fallback() && !config.font_candidates.is_empty() {
            debug!("no font candidate could be loaded; using the built-in bitmap face");
        }
        Self {
            canvas: PixelCanvas::new(config.width, config.height, background),
            glyphs,
            config,
            plot: RectI32::plot_area(config.width, config.height, insets),
        }
    }

    /// Title centered horizontally at 8% of the canvas height.
    fn draw_title(&mut self, title: &str) {
        if title.is_empty() {
            return;
        }
        let y = (self.config.height as i64 * 8 / 100) as i32;
        let cx = (self.config.width / 2) as i32;
        self.glyphs.draw_text_centered(&mut self.canvas, title, cx, y, TITLE_PX, self.config.theme.title);
    }

    /// Name, latest revenue and latest YoY stacked in the top-right corner.
    fn draw_revenue_header(&mut self, data: &[RevenuePoint], display_name: &str) {
        let Some(last) = data.last() else { return };
        let theme = self.config.theme;
        let x = self.config.width as i32 - 300;
        let revenue = format!(
            "{} {}: {:.0}億",
            last.period_label,
            self.config.captions.revenue_header,
            last.latest_revenue as f64 / THOUSANDS_PER_HUNDRED_MILLION
        );
        let yoy = format!("YoY: {:.2}%", last.latest_yoy);
        self.glyphs.draw_text(&mut self.canvas, display_name, x, 30, COMBO_LABEL_PX, theme.title);
        self.glyphs.draw_text(&mut self.canvas, &revenue, x, 60, COMBO_LABEL_PX, theme.text);
        self.glyphs.draw_text(&mut self.canvas, &yoy, x, 90, COMBO_LABEL_PX, theme.highlight);
    }

    /// Circle the highest and lowest points and label them with their values.
    fn mark_extremes(&mut self, values: &[f64], points: &[(i32, i32)]) {
        let Some((hi, lo)) = extreme_indices(values) else { return };
        let theme = self.config.theme;
        let captions = &self.config.captions;
        let (x, y) = points[hi];
        self.canvas.fill_circle(x, y, EXTREME_MARKER_R, theme.gain);
        let text = format!("{}: {:.2}%", captions.highest, values[hi]);
        self.glyphs.draw_text(&mut self.canvas, &text, x - 30, y - 15, VALUE_PX, theme.gain);
        if lo != hi {
            let (x, y) = points[lo];
            self.canvas.fill_circle(x, y, EXTREME_MARKER_R, theme.loss);
            let text = format!("{}: {:.2}%", captions.lowest, values[lo]);
            self.glyphs.draw_text(&mut self.canvas, &text, x - 30, y + 25, VALUE_PX, theme.loss);
        }
    }

    fn finish(self) -> PixelCanvas {
        self.canvas
    }
}

/// Axis renderer bound to one render's glyph source and plot. Axis lines are drawn after
/// the series so data never paints over them.
fn axis_renderer<'g>(glyphs: &'g GlyphSource, plot: RectI32, config: &ChartConfig, label_px: f32, grid_color: Rgba) -> AxisRenderer<'g> {
    AxisRenderer {
        glyphs,
        plot,
        divisions: GRID_DIVISIONS,
        show_grid: config.show_grid,
        axis_color: config.theme.axis_line,
        grid_color,
        text_color: config.theme.text,
        label_px,
    }
}

/// Indices of the first maximum and first minimum.
fn extreme_indices(values: &[f64]) -> Option<(usize, usize)> {
    if values.is_empty() {
        return None;
    }
    let mut hi = 0;
    let mut lo = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[hi] {
            hi = i;
        }
        if v < values[lo] {
            lo = i;
        }
    }
    Some((hi, lo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_extremes_win_ties() {
        assert_eq!(extreme_indices(&[1.0, 3.0, 3.0, -2.0, -2.0]), Some((1, 3)));
        assert_eq!(extreme_indices(&[]), None);
    }

    #[test]
    fn config_rejects_empty_and_oversized_canvases() {
        assert!(ChartConfig::performance().validate().is_ok());
        let empty = ChartConfig::performance().with_size(0, 600);
        assert!(matches!(empty.validate(), Err(ChartError::InvalidConfig(_))));
        let huge = ChartConfig::revenue().with_size(MAX_DIMENSION + 1, 10);
        assert!(matches!(huge.validate(), Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn combo_kind_is_rejected_for_performance_data() {
        let data = vec![PerformancePoint::new("a", "a", "1%")];
        let cfg = ChartConfig::performance().with_kind(ChartKind::Combo).with_fonts(Vec::new());
        assert!(matches!(compose_performance(&data, &cfg), Err(ChartError::InvalidConfig(_))));
    }
}
