//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or a piped report
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - purchases: `P` markers joined by `-`
//! - sales: `S` markers joined by `~`
//! - `*` where both markers land on the same cell

use crate::domain::MonthlyRecord;

/// Render purchases and sales of `records` as a fixed-size plot.
pub fn render_ascii_plot(records: &[MonthlyRecord], width: usize, height: usize) -> String {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return "Plot: no months selected\n".to_string();
    };

    let width = width.max(10);
    let height = height.max(5);

    let purchase: Vec<f64> = records.iter().map(|r| r.purchase_amount as f64).collect();
    let sales: Vec<f64> = records.iter().map(|r| r.sales_amount as f64).collect();

    let (y_min, y_max) = y_range(&purchase, &sales);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first so markers overlay them.
    let purchase_cells = to_cells(&purchase, y_min, y_max, width, height);
    let sales_cells = to_cells(&sales, y_min, y_max, width, height);
    draw_polyline(&mut grid, &purchase_cells, '-');
    draw_polyline(&mut grid, &sales_cells, '~');

    for &(x, y) in &purchase_cells {
        grid[y][x] = 'P';
    }
    for &(x, y) in &sales_cells {
        grid[y][x] = if grid[y][x] == 'P' { '*' } else { 'S' };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: months=[{} .. {}] ({}) | y=[{y_min:.0}, {y_max:.0}]\n",
        first.label,
        last.label,
        records.len()
    ));
    out.push_str("Legend: P/- purchase  S/~ sales\n");

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str(&x_axis(&first.short_label, &last.short_label, records.len(), width));
    out.push('\n');

    out
}

fn x_axis(first: &str, last: &str, n: usize, width: usize) -> String {
    if n < 2 {
        return first.to_string();
    }
    let used = first.chars().count() + last.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{first}{}{last}", " ".repeat(gap))
}

fn y_range(a: &[f64], b: &[f64]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &y in a.iter().chain(b) {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return (0.0, 1.0);
    }
    if max_y <= min_y {
        // Flat series: open up a band around the single value.
        let half = (min_y.abs() * 0.05).max(1.0);
        return (min_y - half, max_y + half);
    }
    (min_y, max_y)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn to_cells(values: &[f64], y_min: f64, y_max: f64, width: usize, height: usize) -> Vec<(usize, usize)> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (map_x(i, n, width), map_y(v, y_min, y_max, height)))
        .collect()
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], cells: &[(usize, usize)], ch: char) {
    for w in cells.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        draw_line(grid, x0, y0, x1, y1, ch);
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, month: u32, purchase: u64, sales: u64) -> MonthlyRecord {
        MonthlyRecord {
            label: label.to_string(),
            short_label: label.to_string(),
            year: 2024,
            month,
            purchase_amount: purchase,
            sales_amount: sales,
            inventory_level: 600,
            supplier_count: 6,
        }
    }

    #[test]
    fn plot_golden_snapshot_crossing_lines() {
        let records = vec![record("M1", 1, 100, 200), record("M2", 2, 200, 100)];

        let txt = render_ascii_plot(&records, 10, 5);
        let expected = concat!(
            "Plot: months=[M1 .. M2] (2) | y=[95, 205]\n",
            "Legend: P/- purchase  S/~ sales\n",
            "S~      -P\n",
            "  ~~  --  \n",
            "    --    \n",
            "  --  ~~  \n",
            "P-      ~S\n",
            "M1      M2\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_month_with_equal_values_overlaps() {
        let records = vec![record("Mart", 3, 500, 500)];
        let txt = render_ascii_plot(&records, 10, 5);
        let lines: Vec<&str> = txt.lines().collect();

        // header + legend + 5 rows + axis
        assert_eq!(lines.len(), 8);
        assert!(lines[2..7].iter().any(|l| l.starts_with('*')));
        assert_eq!(lines[7], "Mart");
    }

    #[test]
    fn empty_selection_renders_placeholder() {
        assert_eq!(render_ascii_plot(&[], 40, 10), "Plot: no months selected\n");
    }
}
