// File: crates/stockchart-core/src/scale.rs
// Summary: Padded value domains and the value→pixel / index→pixel transforms.

/// Fraction of the data range added as padding on each side of a domain.
pub const DOMAIN_PADDING: f64 = 0.1;
/// Absolute padding for flat performance series.
pub const PERFORMANCE_FLAT_MARGIN: f64 = 1.0;
/// Absolute padding for flat YoY series.
pub const YOY_FLAT_MARGIN: f64 = 10.0;

/// Numeric value range a scale maps from. `max > min` for every domain built here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self { Self { min, max } }
    pub fn span(&self) -> f64 { self.max - self.min }
    /// True when zero lies strictly inside the domain.
    pub fn straddles_zero(&self) -> bool { self.min < 0.0 && self.max > 0.0 }

    /// Position of `value` in the domain: 0 at `min`, 1 at `max`.
    /// Domains wider than `f64::MAX` are measured at half scale so the ratio stays finite.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span.is_finite() {
            return if span > 0.0 { (value - self.min) / span } else { 0.0 };
        }
        (value * 0.5 - self.min * 0.5) / (self.max * 0.5 - self.min * 0.5)
    }

    /// Value at fraction `t` measured down from `max` (0 = `max`, 1 = `min`).
    pub fn lerp_down(&self, t: f64) -> f64 {
        self.max * (1.0 - t) + self.min * t
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut it = values.iter().copied();
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// True min/max padded by 10% of the range on both sides.
/// A flat series is padded by `flat_margin` instead; empty input yields `[0, 1]`.
pub fn compute_domain(values: &[f64], flat_margin: f64) -> Domain {
    let Some((lo, hi)) = min_max(values) else { return Domain::new(0.0, 1.0) };
    let mut margin = (hi - lo) * DOMAIN_PADDING;
    if margin.is_infinite() {
        // range wider than f64 can represent
        margin = hi * DOMAIN_PADDING - lo * DOMAIN_PADDING;
    }
    if margin <= 0.0 || !margin.is_finite() {
        margin = if flat_margin > 0.0 { flat_margin } else { 1.0 };
    }
    let (mut min, mut max) = ((lo - margin).max(f64::MIN), (hi + margin).min(f64::MAX));
    if max <= min {
        // flat margin lost to rounding at this magnitude
        let m = lo.abs().max(hi.abs()) * DOMAIN_PADDING;
        (min, max) = ((lo - m).max(f64::MIN), (hi + m).min(f64::MAX));
    }
    Domain::new(min, max)
}

/// Revenue domain: bars grow from a true zero baseline.
///
/// The lower bound is 0 for non-negative data. Negative data extends below zero by the
/// same padding. The upper bound is padded by 10% of `(max - lower)`; a degenerate
/// result (all zeros) becomes `[lower, lower + 1]`.
pub fn compute_revenue_domain(values: &[f64]) -> Domain {
    let Some((lo, hi)) = min_max(values) else { return Domain::new(0.0, 1.0) };
    let base = lo.min(0.0);
    let pad = (hi.max(0.0) - base) * DOMAIN_PADDING;
    let min = if lo < 0.0 { lo - pad } else { 0.0 };
    let max = hi.max(0.0) + pad;
    if max - min > 0.0 && (max - min).is_finite() {
        Domain::new(min, max)
    } else {
        Domain::new(min, min + 1.0)
    }
}

/// Map `value` into a `pixel_height` tall span starting at `pixel_top`; larger values sit higher.
///
/// `domain.min` maps to `pixel_top + pixel_height` and `domain.max` to `pixel_top` exactly.
/// Values outside the domain land outside the span; the float→int cast saturates.
pub fn value_to_pixel_y(value: f64, domain: Domain, pixel_top: i32, pixel_height: i32) -> i32 {
    let frac = domain.fraction(value);
    let offset = (frac * pixel_height as f64).round();
    (pixel_top as f64 + pixel_height as f64 - offset) as i32
}

/// Spread `n` categorical points evenly over `[pixel_left, pixel_left + pixel_width]`.
/// `n <= 1` maps to `pixel_left`.
pub fn index_to_pixel_x(i: usize, n: usize, pixel_left: i32, pixel_width: i32) -> i32 {
    if n <= 1 {
        return pixel_left;
    }
    let offset = pixel_width as i64 * i as i64 / (n as i64 - 1);
    (pixel_left as i64 + offset).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Vertical value scale over a plot's pixel rows.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub domain: Domain,
    pub top_px: i32,
    pub height_px: i32,
}

impl ValueScale {
    pub fn new(domain: Domain, top_px: i32, height_px: i32) -> Self {
        Self { domain, top_px, height_px }
    }
    #[inline]
    pub fn to_px(&self, v: f64) -> i32 {
        value_to_pixel_y(v, self.domain, self.top_px, self.height_px)
    }
    /// Pixel row of value 0, clamped into the plot so bars never start off-plot.
    pub fn baseline_px(&self) -> i32 {
        self.to_px(0.0).clamp(self.top_px, self.top_px + self.height_px)
    }
    /// Domain value at gridline `i` of `divisions` (0 = top).
    pub fn tick_value(&self, i: usize, divisions: usize) -> f64 {
        let d = divisions.max(1) as f64;
        self.domain.lerp_down(i as f64 / d)
    }
    /// Pixel row of gridline `i` of `divisions` (0 = top).
    pub fn tick_px(&self, i: usize, divisions: usize) -> i32 {
        let d = divisions.max(1) as i64;
        (self.top_px as i64 + self.height_px as i64 * i as i64 / d) as i32
    }
}

/// Horizontal categorical scale: `n` evenly spaced slots over a pixel span.
#[derive(Clone, Copy, Debug)]
pub struct IndexScale {
    pub n: usize,
    pub left_px: i32,
    pub width_px: i32,
    slot: i32,
}

impl IndexScale {
    /// Points run edge to edge (line charts).
    pub fn edge_to_edge(n: usize, left_px: i32, width_px: i32) -> Self {
        let slot = if n <= 1 { width_px } else { width_px / (n as i32 - 1) };
        Self { n, left_px, width_px, slot: slot.max(1) }
    }

    /// Points sit at slot centers so bars of `slot_px()` width stay inside the span.
    pub fn centered(n: usize, left_px: i32, width_px: i32) -> Self {
        let slot = width_px / n.max(1) as i32;
        Self { n, left_px: left_px + slot / 2, width_px: width_px - slot, slot: slot.max(1) }
    }

    #[inline]
    pub fn to_px(&self, i: usize) -> i32 {
        index_to_pixel_x(i, self.n, self.left_px, self.width_px)
    }

    /// Horizontal room per point.
    pub fn slot_px(&self) -> i32 {
        self.slot
    }
}
