// File: crates/stockchart-core/tests/properties.rs
// Purpose: Property tests for the canvas primitives and coordinate transforms.

use proptest::prelude::*;
use stockchart_core::{index_to_pixel_x, value_to_pixel_y, Domain, PixelCanvas, Rgba};

const BG: Rgba = Rgba([255, 255, 255, 255]);
const INK: Rgba = Rgba([10, 20, 30, 255]);

fn lit(canvas: &PixelCanvas) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            if canvas.pixel(x, y) == Some(INK) {
                out.push((x, y));
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn out_of_bounds_writes_never_mutate(x in -5000i32..5000, y in -5000i32..5000) {
        let mut canvas = PixelCanvas::new(32, 24, BG);
        let before = canvas.as_raw().to_vec();
        canvas.set_pixel(x, y, INK);
        let inside = (0..32).contains(&x) && (0..24).contains(&y);
        if inside {
            prop_assert_eq!(canvas.pixel(x, y), Some(INK));
        } else {
            prop_assert_eq!(canvas.as_raw(), &before[..]);
        }
    }

    #[test]
    fn lines_are_connected_in_every_direction(x1 in 0i32..48, y1 in 0i32..48, x2 in 0i32..48, y2 in 0i32..48) {
        let mut canvas = PixelCanvas::new(48, 48, BG);
        canvas.draw_line(x1, y1, x2, y2, INK);
        let pixels = lit(&canvas);
        let steps = (x2 - x1).abs().max((y2 - y1).abs());
        prop_assert_eq!(pixels.len() as i32, steps + 1);
        prop_assert_eq!(canvas.pixel(x1, y1), Some(INK));
        prop_assert_eq!(canvas.pixel(x2, y2), Some(INK));
        // every lit pixel other than the endpoints has a lit 8-neighbour on each side of the walk
        for &(x, y) in &pixels {
            let neighbours = pixels
                .iter()
                .filter(|&&(nx, ny)| (nx, ny) != (x, y) && (nx - x).abs() <= 1 && (ny - y).abs() <= 1)
                .count();
            if steps > 0 {
                prop_assert!(neighbours >= 1);
            }
        }
    }

    #[test]
    fn value_domain_endpoints_hit_plot_edges(
        min in -1.0e6f64..1.0e6,
        delta in 1.0e-3f64..1.0e6,
        top in -500i32..500,
        height in 1i32..4000,
    ) {
        let domain = Domain::new(min, min + delta);
        prop_assert_eq!(value_to_pixel_y(domain.min, domain, top, height), top + height);
        prop_assert_eq!(value_to_pixel_y(domain.max, domain, top, height), top);
    }

    #[test]
    fn index_endpoints_hit_plot_edges(n in 2usize..500, left in -500i32..500, width in 0i32..4000) {
        prop_assert_eq!(index_to_pixel_x(0, n, left, width), left);
        prop_assert_eq!(index_to_pixel_x(n - 1, n, left, width), left + width);
    }
}
