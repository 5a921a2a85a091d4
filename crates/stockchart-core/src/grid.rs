// File: crates/stockchart-core/src/grid.rs
// Summary: X-axis label thinning for crowded series.

/// Series longer than this get thinned x labels on single-axis charts.
pub const SINGLE_AXIS_LABEL_THRESHOLD: usize = 15;
/// Series longer than this get thinned x labels on combo charts.
pub const COMBO_LABEL_THRESHOLD: usize = 12;
/// Upper bound on drawn x labels once thinning kicks in.
pub const MAX_X_LABELS: usize = 10;

/// Indices of the x labels to draw for an `n`-point series.
///
/// Up to `threshold` points every label is drawn. Beyond that a stride keeps the count at
/// or below `max_labels`: multiples of the stride are drawn and the last index always is.
/// When the last index falls closer than half a stride to the previous label, that
/// previous label gives way (the first label is never dropped).
pub fn label_indices(n: usize, threshold: usize, max_labels: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    if n <= threshold || n <= max_labels.max(2) {
        return (0..n).collect();
    }
    let stride = label_stride(n, max_labels);
    let last = n - 1;
    let mut out: Vec<usize> = (0..n).step_by(stride).collect();
    if out.last() != Some(&last) {
        if let Some(&prev) = out.last() {
            if prev != 0 && (last - prev) * 2 < stride {
                out.pop();
            }
        }
        out.push(last);
    }
    out
}

/// Stride used by `label_indices` above the threshold.
pub fn label_stride(n: usize, max_labels: usize) -> usize {
    let slots = max_labels.max(2) - 1;
    (n.saturating_sub(1)).div_ceil(slots).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_spreads_sixty_points() {
        assert_eq!(label_stride(60, 10), 7);
        let idx = label_indices(60, SINGLE_AXIS_LABEL_THRESHOLD, MAX_X_LABELS);
        assert_eq!(idx, vec![0, 7, 14, 21, 28, 35, 42, 49, 59]);
    }

    #[test]
    fn crowded_last_label_replaces_previous() {
        // stride 7: 56 sits 3 steps before 59, under half a stride
        let idx = label_indices(60, SINGLE_AXIS_LABEL_THRESHOLD, MAX_X_LABELS);
        assert!(!idx.contains(&56));
        assert_eq!(idx.last(), Some(&59));
    }

    #[test]
    fn last_label_kept_beside_previous_at_half_stride() {
        // stride 2 for 18 points: 16 and 17 are exactly half a stride apart
        let idx = label_indices(18, SINGLE_AXIS_LABEL_THRESHOLD, MAX_X_LABELS);
        assert_eq!(idx.len(), MAX_X_LABELS);
        assert!(idx.contains(&16) && idx.contains(&17));
    }

    #[test]
    fn empty_series_has_no_labels() {
        assert!(label_indices(0, 15, 10).is_empty());
        assert_eq!(label_indices(1, 15, 10), vec![0]);
    }
}
