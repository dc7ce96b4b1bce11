//! Plotters-powered purchase/sales chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Purchase series color (blue).
pub const PURCHASE_RGB: (u8, u8, u8) = (80, 150, 255);
/// Sales series color (red).
pub const SALES_RGB: (u8, u8, u8) = (255, 80, 80);

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct SupplyPlottersChart<'a> {
    /// `(month index, amount)` for purchases.
    pub purchase: &'a [(f64, f64)],
    /// `(month index, amount)` for sales.
    pub sales: &'a [(f64, f64)],
    /// Short month labels, indexed like the series.
    pub labels: &'a [String],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub y_label: String,
    pub fmt_y: fn(f64) -> String,
    /// Month index marked with a vertical guide line.
    pub cursor: Option<f64>,
}

impl<'a> SupplyPlottersChart<'a> {
    fn label_at(&self, x: f64) -> String {
        let rounded = x.round();
        if (x - rounded).abs() > 0.25 || rounded < 0.0 {
            return String::new();
        }
        self.labels
            .get(rounded as usize)
            .cloned()
            .unwrap_or_default()
    }
}

impl<'a> Widget for SupplyPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let x_ticks = self.labels.len().clamp(1, 8);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .y_desc(&self.y_label)
                .x_labels(x_ticks)
                .y_labels(5)
                .x_label_formatter(&|v| self.label_at(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .light_line_style(&RGBColor(60, 60, 60))
                .bold_line_style(&RGBColor(90, 90, 90))
                .draw()?;

            if let Some(x) = self.cursor {
                chart.draw_series(LineSeries::new([(x, y0), (x, y1)], &RGBColor(160, 160, 160)))?;
            }

            let purchase_color = RGBColor(PURCHASE_RGB.0, PURCHASE_RGB.1, PURCHASE_RGB.2);
            let sales_color = RGBColor(SALES_RGB.0, SALES_RGB.1, SALES_RGB.2);

            chart.draw_series(LineSeries::new(self.purchase.iter().copied(), &purchase_color))?;
            chart.draw_series(LineSeries::new(self.sales.iter().copied(), &sales_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a `Pixel`
            // gives a clean dot per month instead.
            chart.draw_series(
                self.purchase
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), purchase_color)),
            )?;
            chart.draw_series(
                self.sales
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), sales_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_only_at_whole_month_positions() {
        let labels = vec!["Yanvar".to_string(), "Fevral".to_string()];
        let chart = SupplyPlottersChart {
            purchase: &[],
            sales: &[],
            labels: &labels,
            x_bounds: [-0.5, 1.5],
            y_bounds: [0.0, 1.0],
            y_label: String::new(),
            fmt_y: crate::report::fmt_thousands,
            cursor: None,
        };
        assert_eq!(chart.label_at(0.0), "Yanvar");
        assert_eq!(chart.label_at(1.05), "Fevral");
        assert_eq!(chart.label_at(0.5), "");
        assert_eq!(chart.label_at(-0.5), "");
        assert_eq!(chart.label_at(7.0), "");
    }
}
