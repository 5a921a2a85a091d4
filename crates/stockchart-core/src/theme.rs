// File: crates/stockchart-core/src/theme.rs
// Summary: Chart color palettes (light default matching the bot's images, plus dark).

use crate::canvas::Rgba;

/// Colors used by the composer. Gains are red and losses green (Taiwan market convention).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub combo_background: Rgba,
    pub title: Rgba,
    pub text: Rgba,
    pub axis_line: Rgba,
    pub grid: Rgba,
    pub combo_grid: Rgba,
    pub zero_line: Rgba,
    pub line_stroke: Rgba,
    pub bar_fill: Rgba,
    pub gain: Rgba,
    pub loss: Rgba,
    pub highlight: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            combo_background: Rgba::rgb(245, 245, 245),
            title: Rgba::rgb(15, 15, 15),
            text: Rgba::rgb(0, 0, 0),
            axis_line: Rgba::rgb(15, 15, 15),
            grid: Rgba::rgb(200, 200, 200),
            combo_grid: Rgba::rgba(180, 200, 180, 180),
            zero_line: Rgba::rgb(100, 100, 100),
            line_stroke: Rgba::rgb(180, 100, 100),
            bar_fill: Rgba::rgb(100, 150, 120),
            gain: Rgba::rgb(180, 100, 100),
            loss: Rgba::rgb(100, 150, 120),
            highlight: Rgba::rgb(180, 30, 40),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            combo_background: Rgba::rgb(24, 24, 28),
            title: Rgba::rgb(235, 235, 245),
            text: Rgba::rgb(210, 210, 220),
            axis_line: Rgba::rgb(180, 180, 190),
            grid: Rgba::rgb(40, 40, 45),
            combo_grid: Rgba::rgba(60, 80, 60, 180),
            zero_line: Rgba::rgb(150, 150, 160),
            line_stroke: Rgba::rgb(220, 80, 80),
            bar_fill: Rgba::rgb(40, 200, 120),
            gain: Rgba::rgb(220, 80, 80),
            loss: Rgba::rgb(40, 200, 120),
            highlight: Rgba::rgb(255, 110, 110),
        }
    }

    /// Color for a signed value: gain for `>= 0`, loss otherwise.
    pub fn signed(&self, value: f64) -> Rgba {
        if value < 0.0 { self.loss } else { self.gain }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
