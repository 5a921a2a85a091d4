// File: crates/stockchart-core/src/types.rs
// Summary: Shared types and constants (canvas sizes, paddings, plot rectangle).

/// Default performance chart width in pixels.
pub const PERFORMANCE_WIDTH: u32 = 1200;
/// Default performance chart height in pixels.
pub const PERFORMANCE_HEIGHT: u32 = 600;
/// Default revenue (combo) chart width in pixels.
pub const REVENUE_WIDTH: u32 = 1400;
/// Default revenue (combo) chart height in pixels.
pub const REVENUE_HEIGHT: u32 = 700;
/// Largest accepted canvas edge.
pub const MAX_DIMENSION: u32 = 8192;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Margins for single-axis charts: wide right side for the trailing axis captions.
    pub const fn single_axis() -> Self { Self::new(120, 180, 100, 100) }

    /// Margins for the combo chart: room for the right axis labels and the header block.
    pub const fn combo() -> Self { Self::new(120, 220, 120, 130) }
}

impl Default for Insets {
    fn default() -> Self {
        Self::single_axis()
    }
}

/// Integer pixel rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }

    /// Plot area left after removing `insets` from a `width`×`height` canvas.
    /// Never yields a negative extent; a canvas smaller than its insets gets a 1px plot.
    pub fn plot_area(width: u32, height: u32, insets: &Insets) -> Self {
        let w = (width as i64 - insets.hsum() as i64).max(1) as i32;
        let h = (height as i64 - insets.vsum() as i64).max(1) as i32;
        Self::from_ltwh(insets.left as i32, insets.top as i32, w, h)
    }
}
