// File: crates/stockchart-core/tests/chart_behavior.rs
// Purpose: Observable composer behavior: zero line, bars, annotations, domains, error reporting.

use stockchart_core::scale::PERFORMANCE_FLAT_MARGIN;
use stockchart_core::types::{Insets, RectI32};
use stockchart_core::{
    compose_performance, compose_revenue, compute_domain, compute_revenue_domain, render_performance_chart,
    render_revenue_chart_with, value_to_pixel_y, ChartConfig, ChartError, ChartKind, Domain, PerformancePoint,
    RevenuePoint, Theme,
};

fn perf(values: &[&str]) -> Vec<PerformancePoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let period = format!("2025/{:02}", i + 1);
            PerformancePoint::new(period.clone(), period, *v)
        })
        .collect()
}

fn builtin_performance() -> ChartConfig {
    ChartConfig::performance().with_fonts(Vec::new())
}

#[test]
fn zero_line_is_dashed_when_domain_straddles_zero() {
    let data = perf(&["+3.00%", "-1.50%"]);
    let cfg = builtin_performance();
    let bytes = render_performance_chart(&data, &cfg).expect("render");
    assert!(!bytes.is_empty());

    let canvas = compose_performance(&data, &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::single_axis());
    let domain = compute_domain(&[3.0, -1.5], PERFORMANCE_FLAT_MARGIN);
    assert!(domain.straddles_zero());
    let zero = value_to_pixel_y(0.0, domain, plot.top, plot.height());

    let theme = Theme::light();
    // 5 on, 5 off from the left edge of the plot
    assert_eq!(canvas.pixel(plot.left + 2, zero), Some(theme.zero_line));
    assert_eq!(canvas.pixel(plot.left + 7, zero), Some(theme.background));
    assert_eq!(canvas.pixel(plot.left + 12, zero), Some(theme.zero_line));
}

#[test]
fn no_zero_line_for_positive_series() {
    let cfg = builtin_performance();
    let canvas = compose_performance(&perf(&["1%", "2%", "3%"]), &cfg).expect("compose");
    let zero_line = Theme::light().zero_line;
    let mut found = false;
    for y in 0..cfg.height as i32 {
        for x in 0..cfg.width as i32 {
            found |= canvas.pixel(x, y) == Some(zero_line);
        }
    }
    assert!(!found, "zero line drawn for an all-positive series");
}

#[test]
fn all_zero_revenue_renders_with_unit_domain() {
    let periods: Vec<String> = (1..=4).map(|m| format!("2025/{m:02}")).collect();
    let data = RevenuePoint::series_from_columns(&periods, &[0, 0, 0, 0], &[1.0, -2.0, 3.0, 0.5], &[10.0; 4]);
    assert_eq!(compute_revenue_domain(&[0.0; 4]), Domain::new(0.0, 1.0));
    let cfg = ChartConfig::revenue().with_fonts(Vec::new());
    let canvas = compose_revenue(&data, "ZERO", &cfg).expect("compose");
    assert_eq!((canvas.width(), canvas.height()), (1400, 700));
}

#[test]
fn revenue_bars_rise_from_the_plot_bottom() {
    let periods: Vec<String> = (1..=3).map(|m| format!("{m:02}")).collect();
    let data = RevenuePoint::series_from_columns(&periods, &[100_000, 200_000, 300_000], &[0.0, 0.0, 0.0], &[1.0; 3]);
    let cfg = ChartConfig::revenue().with_fonts(Vec::new()).with_size(700, 500);
    let canvas = compose_revenue(&data, "BARS", &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::combo());
    let slot = plot.width() / 3;
    let x = plot.left + slot / 2;
    assert_eq!(canvas.pixel(x, plot.bottom - 2), Some(Theme::light().bar_fill));
}

#[test]
fn empty_series_are_rejected() {
    let err = render_performance_chart(&[], &builtin_performance()).unwrap_err();
    assert_eq!(err, ChartError::EmptySeries);
    let err = render_revenue_chart_with(&[], "x", &ChartConfig::revenue().with_fonts(Vec::new())).unwrap_err();
    assert_eq!(err, ChartError::EmptySeries);
}

#[test]
fn unparseable_percent_is_invalid_data() {
    let err = render_performance_chart(&perf(&["+1%", "abc%"]), &builtin_performance()).unwrap_err();
    assert_eq!(err, ChartError::InvalidData { index: 1, value: "abc%".into() });
}

#[test]
fn non_finite_yoy_is_invalid_data() {
    let mut data = RevenuePoint::series_from_columns(&["01".to_string(), "02".to_string()], &[1, 2], &[1.0, 2.0], &[]);
    data[1].yoy_growth_percent = f64::INFINITY;
    let err = render_revenue_chart_with(&data, "x", &ChartConfig::revenue().with_fonts(Vec::new())).unwrap_err();
    assert!(matches!(err, ChartError::InvalidData { index: 1, .. }));
}

#[test]
fn invalid_configs_are_reported() {
    let data = perf(&["1%"]);
    let combo = builtin_performance().with_kind(ChartKind::Combo);
    assert!(matches!(render_performance_chart(&data, &combo), Err(ChartError::InvalidConfig(_))));
    let empty = builtin_performance().with_size(0, 0);
    assert!(matches!(render_performance_chart(&data, &empty), Err(ChartError::InvalidConfig(_))));
}

fn count_in_row(canvas: &stockchart_core::PixelCanvas, y: i32, xs: std::ops::Range<i32>, color: stockchart_core::Rgba) -> usize {
    xs.filter(|&x| canvas.pixel(x, y) == Some(color)).count()
}

fn any_in(canvas: &stockchart_core::PixelCanvas, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>, color: stockchart_core::Rgba) -> bool {
    ys.clone().any(|y| xs.clone().any(|x| canvas.pixel(x, y) == Some(color)))
}

fn revenue_series(revenues: &[i64], yoys: &[f64]) -> Vec<RevenuePoint> {
    let periods: Vec<String> = (1..=revenues.len()).map(|m| format!("{m:02}")).collect();
    RevenuePoint::series_from_columns(&periods, revenues, yoys, &[])
}

fn small_revenue() -> ChartConfig {
    ChartConfig::revenue().with_fonts(Vec::new()).with_size(700, 500)
}

#[test]
fn performance_bars_grow_up_in_gain_and_down_in_loss() {
    let cfg = builtin_performance().with_kind(ChartKind::Bar);
    let canvas = compose_performance(&perf(&["+4%", "-2%"]), &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::single_axis());
    let domain = compute_domain(&[4.0, -2.0], PERFORMANCE_FLAT_MARGIN);
    let y = |v: f64| value_to_pixel_y(v, domain, plot.top, plot.height());
    let (zero, up, down) = (y(0.0), y(4.0), y(-2.0));
    let theme = Theme::light();

    // two slots of 450px, bars centered in each
    let (x0, x1) = (plot.left + 225, plot.left + 675);
    let gain_row = (zero + up) / 2;
    let loss_row = (zero + down) / 2;
    assert_eq!(canvas.pixel(x0, gain_row), Some(theme.gain));
    assert_ne!(canvas.pixel(x0, (zero + down) / 2), Some(theme.gain));
    assert_eq!(canvas.pixel(x1, loss_row), Some(theme.loss));
    assert_ne!(canvas.pixel(x1, gain_row), Some(theme.loss));

    // 80% of the slot
    assert_eq!(count_in_row(&canvas, gain_row, plot.left..plot.right, theme.gain), 360);
    assert_eq!(count_in_row(&canvas, loss_row, plot.left..plot.right, theme.loss), 360);
}

#[test]
fn combo_bars_fill_sixty_percent_of_each_slot() {
    let data = revenue_series(&[100_000, 200_000, 300_000], &[0.0, 0.0, 0.0]);
    let cfg = small_revenue();
    let canvas = compose_revenue(&data, "BARS", &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::combo());
    let slot = plot.width() / 3;
    let per_bar = (slot * 3 / 5) as usize;
    let bar_fill = Theme::light().bar_fill;
    assert_eq!(count_in_row(&canvas, plot.bottom - 2, plot.left + 1..plot.right, bar_fill), 3 * per_bar);
}

#[test]
fn yoy_annotation_flips_below_a_point_near_the_top() {
    let data = revenue_series(&[100_000, 100_000], &[0.0, 100.0]);
    let cfg = small_revenue();
    let canvas = compose_revenue(&data, "FLIP", &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::combo());
    let highlight = Theme::light().highlight;

    // the 100% point sits at the top of the plot, right of its marker the label is the only highlight ink
    let domain = compute_domain(&[0.0, 100.0], 10.0);
    let top_point = value_to_pixel_y(100.0, domain, plot.top, plot.height());
    let x = plot.left + plot.width() * 3 / 4;
    let label_xs = x + 7..x + 40;
    assert!(top_point - 15 < plot.top + 15);
    assert!(any_in(&canvas, label_xs.clone(), top_point + 10..top_point + 25, highlight), "label not drawn below the point");
    assert!(!any_in(&canvas, label_xs, plot.top - 15..top_point - 8, highlight), "label drawn above the point");
}

#[test]
fn revenue_header_prints_latest_yoy_in_highlight() {
    let data = revenue_series(&[100_000, 120_000], &[5.0, 12.5]);
    let cfg = small_revenue();
    let canvas = compose_revenue(&data, "HEAD", &cfg).expect("compose");
    let theme = Theme::light();
    let x = cfg.width as i32 - 300;
    // name at baseline 30, revenue line at 60, YoY line at 90
    assert!(any_in(&canvas, x..x + 160, 76..91, theme.highlight));
    assert!(!any_in(&canvas, x..x + 160, 46..61, theme.highlight));
    assert!(any_in(&canvas, x..x + 160, 46..61, theme.text));
    assert!(any_in(&canvas, x..x + 60, 16..31, theme.title));
}

#[test]
fn yoy_zero_line_only_when_growth_changes_sign() {
    let cfg = small_revenue();
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::combo());
    let theme = Theme::light();

    let canvas = compose_revenue(&revenue_series(&[100_000, 100_000], &[-20.0, 100.0]), "ZERO", &cfg).expect("compose");
    let zero = value_to_pixel_y(0.0, compute_domain(&[-20.0, 100.0], 10.0), plot.top, plot.height());
    assert_eq!(canvas.pixel(plot.left + 2, zero), Some(theme.zero_line));
    assert_eq!(canvas.pixel(plot.left + 7, zero), Some(theme.combo_background));

    let canvas = compose_revenue(&revenue_series(&[100_000, 100_000], &[20.0, 30.0]), "UP", &cfg).expect("compose");
    assert!(!any_in(&canvas, 0..cfg.width as i32, 0..cfg.height as i32, theme.zero_line));
}

#[test]
fn full_range_percentages_still_render() {
    let cfg = builtin_performance();
    let data = perf(&["+1e308%", "-1e308%"]);
    assert!(render_performance_chart(&data, &cfg).is_ok());
    let canvas = compose_performance(&data, &cfg).expect("compose");
    let plot = RectI32::plot_area(cfg.width, cfg.height, &Insets::single_axis());
    let domain = compute_domain(&[1e308, -1e308], PERFORMANCE_FLAT_MARGIN);
    let (hi, lo) = (
        value_to_pixel_y(1e308, domain, plot.top, plot.height()),
        value_to_pixel_y(-1e308, domain, plot.top, plot.height()),
    );
    assert!(hi < lo, "series collapsed to one row");
    let (mx, my) = ((plot.left + plot.right) / 2, (hi + lo) / 2);
    assert!(any_in(&canvas, mx - 5..mx + 6, my - 5..my + 6, Theme::light().line_stroke));
}
