//! Squarified treemap partitioning (Bruls, Huizing, van Wijk).
//!
//! Items are packed in descending value order. Rows are built greedily along
//! the shorter side of the remaining rectangle; an item joins the current row
//! as long as it does not worsen the row's worst aspect ratio.

use crate::geometry::Rect;

/// Partition `area` into one cell per value, with cell area proportional to
/// value. Cells are returned in input order.
///
/// Returns `None` if the total value is not positive or `area` is empty.
pub fn squarify(values: &[f64], area: Rect) -> Option<Vec<Rect>> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if !(total > 0.0) || area.is_empty() {
        return None;
    }

    // Stable sort: equal values keep their input order.
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].max(0.0).total_cmp(&values[a].max(0.0)));

    // Normalize sizes to the area they must cover.
    let scale = f64::from(area.width) * f64::from(area.height) / total;
    let sizes: Vec<f64> = order.iter().map(|&i| values[i].max(0.0) * scale).collect();

    let mut cells = vec![Rect::ZERO; values.len()];
    let mut x = f64::from(area.x);
    let mut y = f64::from(area.y);
    let mut w = f64::from(area.width);
    let mut h = f64::from(area.height);
    let mut start = 0;

    while start < sizes.len() {
        let remaining: f64 = sizes[start..].iter().sum();
        if remaining <= 0.0 || w <= 0.0 || h <= 0.0 {
            // Only zero-valued items are left: give them empty cells at the
            // edge of whatever space remains.
            for &i in &order[start..] {
                cells[i] = Rect::new(x as f32, y as f32, 0.0, 0.0);
            }
            break;
        }

        let side = w.min(h);
        let mut end = start + 1;
        let mut row_sum = sizes[start];
        let mut best = worst_aspect(&sizes[start..end], row_sum, side);

        while end < sizes.len() {
            let candidate_sum = row_sum + sizes[end];
            let ratio = worst_aspect(&sizes[start..=end], candidate_sum, side);
            if ratio > best {
                break;
            }
            row_sum = candidate_sum;
            best = ratio;
            end += 1;
        }

        let last_row = end == sizes.len();
        let fraction = row_sum / remaining;

        if w >= h {
            // Row is a column on the left; items stack along the height.
            let row_w = if last_row { w } else { w * fraction };
            let mut acc = 0.0;
            for k in start..end {
                let y0 = y + h * acc / row_sum;
                acc += sizes[k];
                let y1 = y + h * acc / row_sum;
                cells[order[k]] = Rect::from_corners(x, y0, x + row_w, y1);
            }
            x += row_w;
            w -= row_w;
        } else {
            // Row is a strip along the top; items sit side by side.
            let row_h = if last_row { h } else { h * fraction };
            let mut acc = 0.0;
            for k in start..end {
                let x0 = x + w * acc / row_sum;
                acc += sizes[k];
                let x1 = x + w * acc / row_sum;
                cells[order[k]] = Rect::from_corners(x0, y, x1, y + row_h);
            }
            y += row_h;
            h -= row_h;
        }

        start = end;
    }

    Some(cells)
}

/// Worst aspect ratio of a row of `row` sizes (already scaled to area)
/// laid along a side of length `side`.
///
/// The row's thickness is `row_sum / side`; each item's length along the side
/// is `size / thickness`. Zero-sized items do not count.
fn worst_aspect(row: &[f64], row_sum: f64, side: f64) -> f64 {
    if row_sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let thickness = row_sum / side;

    row.iter()
        .filter(|&&s| s > 0.0)
        .map(|&s| {
            let length = s / thickness;
            (length / thickness).max(thickness / length)
        })
        .fold(0.0, f64::max)
}
