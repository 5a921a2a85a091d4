// File: crates/stockchart-core/src/lib.rs
// Summary: Core library entry point; exports the canvas, glyph source, scales, axes and
//          the performance / revenue chart renderers.

pub mod axis;
pub mod builtin_font;
pub mod canvas;
pub mod chart;
pub mod encode;
pub mod error;
pub mod grid;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::{AxisRenderer, ValueFormat};
pub use canvas::{PixelCanvas, Rgba};
pub use chart::{
    compose_performance, compose_revenue, render_performance_chart, render_revenue_chart,
    render_revenue_chart_with, Captions, ChartConfig, ChartKind,
};
pub use encode::{decode_png, encode_png};
pub use error::{ChartError, ChartResult};
pub use scale::{compute_domain, compute_revenue_domain, index_to_pixel_x, value_to_pixel_y, Domain, IndexScale, ValueScale};
pub use series::{parse_percent, PerformancePoint, RevenuePoint};
pub use text::{FontCandidate, GlyphSource};
pub use theme::Theme;
