//! Slice and dice partitioning.
//!
//! Both walk the items in order and give each a band proportional to its
//! share of the total, spanning the full extent of the other axis.

use crate::geometry::Rect;

/// Stack items as horizontal rows, splitting the height.
///
/// Returns `None` if the total value is not positive.
pub fn slice(values: &[f64], area: Rect) -> Option<Vec<Rect>> {
    let x0 = f64::from(area.x);
    let x1 = f64::from(area.max_x());
    bands(values, area.y, area.height).map(|bands| {
        bands
            .into_iter()
            .map(|(y0, y1)| Rect::from_corners(x0, y0, x1, y1))
            .collect()
    })
}

/// Place items side by side as columns, splitting the width.
///
/// Returns `None` if the total value is not positive.
pub fn dice(values: &[f64], area: Rect) -> Option<Vec<Rect>> {
    let y0 = f64::from(area.y);
    let y1 = f64::from(area.max_y());
    bands(values, area.x, area.width).map(|bands| {
        bands
            .into_iter()
            .map(|(x0, x1)| Rect::from_corners(x0, y0, x1, y1))
            .collect()
    })
}

/// Split `[start, start + length)` into consecutive bands by value share.
/// Band edges come from cumulative sums so the last band ends exactly at the
/// far edge.
fn bands(values: &[f64], start: f32, length: f32) -> Option<Vec<(f64, f64)>> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if !(total > 0.0) {
        return None;
    }

    let start = f64::from(start);
    let length = f64::from(length.max(0.0));
    let mut acc = 0.0;

    Some(
        values
            .iter()
            .map(|v| {
                let lo = start + length * acc / total;
                acc += v.max(0.0);
                let hi = start + length * acc / total;
                (lo, hi)
            })
            .collect(),
    )
}
