// File: crates/stockchart-core/src/axis.rs
// Summary: Axis lines, gridlines, tick labels and captions for one or two value scales
//          plus the categorical x axis.

use crate::canvas::{PixelCanvas, Rgba};
use crate::scale::{IndexScale, ValueScale};
use crate::series::THOUSANDS_PER_HUNDRED_MILLION;
use crate::text::GlyphSource;
use crate::types::RectI32;

/// Default number of horizontal grid divisions.
pub const GRID_DIVISIONS: usize = 5;

/// How tick values are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueFormat {
    /// `12.3%` with the given number of decimals.
    Percent { decimals: usize },
    /// Thousands of NT$ shown as whole 億 (`123億`).
    HundredMillion,
}

impl ValueFormat {
    pub fn format(&self, v: f64) -> String {
        match *self {
            ValueFormat::Percent { decimals } => format!("{v:.decimals$}%"),
            ValueFormat::HundredMillion => format!("{:.0}億", v / THOUSANDS_PER_HUNDRED_MILLION),
        }
    }
}

/// Draws axes and their decorations around a plot rectangle.
pub struct AxisRenderer<'a> {
    pub glyphs: &'a GlyphSource,
    pub plot: RectI32,
    pub divisions: usize,
    pub show_grid: bool,
    pub axis_color: Rgba,
    pub grid_color: Rgba,
    pub text_color: Rgba,
    pub label_px: f32,
}

impl<'a> AxisRenderer<'a> {
    /// Left y axis and x axis; `dual` adds the right y axis.
    pub fn draw_frame(&self, canvas: &mut PixelCanvas, dual: bool) {
        let p = self.plot;
        canvas.draw_line(p.left, p.top, p.left, p.bottom, self.axis_color);
        canvas.draw_line(p.left, p.bottom, p.right, p.bottom, self.axis_color);
        if dual {
            canvas.draw_line(p.right, p.top, p.right, p.bottom, self.axis_color);
        }
    }

    /// Interior horizontal gridlines (when enabled) and tick labels right-aligned to the left axis.
    pub fn draw_left_scale(&self, canvas: &mut PixelCanvas, scale: &ValueScale, format: ValueFormat) {
        let p = self.plot;
        for i in 0..=self.divisions {
            let y = scale.tick_px(i, self.divisions);
            if self.show_grid && i > 0 && i < self.divisions {
                canvas.draw_line(p.left, y, p.right, y, self.grid_color);
            }
            let label = format.format(scale.tick_value(i, self.divisions));
            self.glyphs.draw_text_right(canvas, &label, p.left - 10, y + 5, self.label_px, self.text_color);
        }
    }

    /// Tick labels left-aligned just right of the right axis; gridlines come from the left scale.
    pub fn draw_right_scale(&self, canvas: &mut PixelCanvas, scale: &ValueScale, format: ValueFormat) {
        for i in 0..=self.divisions {
            let y = scale.tick_px(i, self.divisions);
            let label = format.format(scale.tick_value(i, self.divisions));
            self.glyphs.draw_text(canvas, &label, self.plot.right + 10, y + 5, self.label_px, self.text_color);
        }
    }

    /// Period labels centered under their points, with vertical gridlines at interior labels.
    /// Returns the baseline used so callers can stack annotations underneath.
    pub fn draw_x_labels(&self, canvas: &mut PixelCanvas, xs: &IndexScale, labels: &[&str], indices: &[usize]) -> i32 {
        let p = self.plot;
        let baseline = p.bottom + 25;
        let last = labels.len().saturating_sub(1);
        for &i in indices {
            let Some(label) = labels.get(i) else { continue };
            let x = xs.to_px(i);
            if self.show_grid && i > 0 && i < last {
                canvas.draw_line(x, p.top, x, p.bottom, self.grid_color);
            }
            self.glyphs.draw_text_centered(canvas, label, x, baseline, self.label_px, self.text_color);
        }
        baseline
    }

    /// Axis captions: x at the right end of the x axis, y captions above each y axis.
    pub fn draw_captions(&self, canvas: &mut PixelCanvas, x_caption: &str, left_caption: &str, right_caption: Option<&str>) {
        let p = self.plot;
        let px = self.label_px;
        let right_room = if right_caption.is_some() { 80 } else { 50 };
        self.glyphs.draw_text(canvas, x_caption, p.right + right_room, p.bottom + 25, px, self.text_color);
        self.glyphs.draw_text(canvas, left_caption, p.left - 50, p.top - 10, px, self.text_color);
        if let Some(caption) = right_caption {
            self.glyphs.draw_text(canvas, caption, p.right + 50, p.top - 10, px, self.text_color);
        }
    }
}
