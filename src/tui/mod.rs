//! Ratatui-based terminal UI.
//!
//! The TUI shows the range selectors, the four summary cards, the
//! purchase/sales chart and the last month of the selection. Every key press
//! changes only the session's range or the chart cursor; the records never
//! change.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::session::{DashboardSession, RangeBound};
use crate::domain::{DateRange, MonthlyRecord};
use crate::error::AppError;
use crate::report::{CardKind, RangeView, SummaryCard};

mod plotters_chart;

use plotters_chart::{PURCHASE_RGB, SALES_RGB, SupplyPlottersChart};

/// Months moved by PageUp/PageDown.
const PAGE_MONTHS: isize = 12;

/// Start the TUI on an already-built session.
pub fn run(session: DashboardSession, currency: String) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(session, currency);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    session: DashboardSession,
    currency: String,
    selected: RangeBound,
    status: String,
    snapshot_dir: PathBuf,
    /// Month under the chart cursor, as an index into the current selection.
    cursor: Option<usize>,
}

impl App {
    fn new(session: DashboardSession, currency: String) -> Self {
        let status = match session.seed() {
            Some(seed) => format!("seed: {seed}"),
            None => "loaded dataset".to_string(),
        };
        Self {
            session,
            currency,
            selected: RangeBound::Start,
            status,
            snapshot_dir: PathBuf::from("snapshots"),
            cursor: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply a key press. Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.selected = match self.selected {
                    RangeBound::Start => RangeBound::End,
                    RangeBound::End => RangeBound::Start,
                };
            }
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            KeyCode::PageUp => self.step(-PAGE_MONTHS),
            KeyCode::PageDown => self.step(PAGE_MONTHS),
            KeyCode::Home => {
                self.session.jump_bound(self.selected, false);
                self.after_range_change();
            }
            KeyCode::End => {
                self.session.jump_bound(self.selected, true);
                self.after_range_change();
            }
            KeyCode::Char('s') => {
                self.session.swap_bounds();
                self.after_range_change();
            }
            KeyCode::Char('a') => {
                if let Some(full) = DateRange::full(self.session.records()) {
                    self.session.set_start(full.start);
                    self.session.set_end(full.end);
                    self.after_range_change();
                }
            }
            KeyCode::Char(',') => self.move_cursor(-1),
            KeyCode::Char('.') => self.move_cursor(1),
            KeyCode::Char('c') => self.cursor = None,
            KeyCode::Char('d') => {
                match crate::snapshot::write_snapshot_bundle(&self.snapshot_dir, &self.session, &self.currency) {
                    Ok(path) => {
                        self.status = format!("Wrote snapshot: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Snapshot failed: {err}");
                    }
                }
            }
            _ => {}
        }

        false
    }

    fn step(&mut self, delta: isize) {
        self.session.step_bound(self.selected, delta);
        self.after_range_change();
    }

    /// Move the chart cursor within the selection. The first press lands on
    /// the first (`.`) or last (`,`) month.
    fn move_cursor(&mut self, delta: isize) {
        let len = self.session.view().filtered.len();
        if len == 0 {
            self.cursor = None;
            return;
        }
        self.cursor = Some(match self.cursor {
            None if delta < 0 => len - 1,
            None => 0,
            Some(i) => i.saturating_add_signed(delta).min(len - 1),
        });
    }

    fn cursor_record<'v>(&self, view: &RangeView<'v>) -> Option<&'v MonthlyRecord> {
        self.cursor.and_then(|i| view.filtered.get(i))
    }

    fn after_range_change(&mut self) {
        let view = self.session.view();
        let len = view.filtered.len();
        self.cursor = self.cursor.filter(|_| len > 0).map(|i| i.min(len.saturating_sub(1)));
        self.status = match crate::report::range_note(view.resolution) {
            Some(note) => note.to_string(),
            None => format!("{} month(s) selected", view.filtered.len()),
        };
        tracing::debug!(
            start = %self.session.range().start,
            end = %self.session.range().end,
            months = view.filtered.len(),
            "range changed"
        );
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(size);

        let view = self.session.view();

        self.draw_header(frame, chunks[0]);
        self.draw_selectors(frame, chunks[1]);
        draw_cards(
            frame,
            chunks[2],
            &crate::report::summary_cards(&view.totals, &self.currency),
        );
        self.draw_chart(frame, chunks[3], &view);
        let recent = view.recent_activity();
        draw_cards(
            frame,
            chunks[4],
            &crate::report::recent_cards(recent.as_ref(), &self.currency),
        );
        self.draw_footer(frame, chunks[5]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                crate::report::TITLE,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                crate::report::SUBTITLE,
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_selectors(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let range = self.session.range();
        let selector = |name: &'static str, label: &str, bound: RangeBound| {
            let style = if self.selected == bound {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default().fg(Color::White)
            };
            vec![
                Span::styled(name, Style::default().fg(Color::Gray)),
                Span::styled(format!(" {label} "), style),
            ]
        };

        let mut spans = selector("Başlanğıc:", &range.start, RangeBound::Start);
        spans.push(Span::raw("   "));
        spans.extend(selector("Son:", &range.end, RangeBound::End));

        let p = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title("Tarix Aralığı Seçimi")
                .borders(Borders::ALL),
        );
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &RangeView<'_>) {
        let mut block = Block::default()
            .title(Line::from(vec![
                Span::raw("Alış və Satış Dinamikası ("),
                Span::styled("Alış", Style::default().fg(rgb(PURCHASE_RGB))),
                Span::raw(", "),
                Span::styled("Satış", Style::default().fg(rgb(SALES_RGB))),
                Span::raw(")"),
            ]))
            .borders(Borders::ALL);
        if let Some(record) = self.cursor_record(view) {
            block = block.title_bottom(Span::styled(
                format!(" {} ", crate::report::month_tooltip(record, &self.currency)),
                Style::default().fg(Color::White),
            ));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if view.filtered.is_empty() {
            let msg = Paragraph::new("No months in the selected range.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let series = chart_series(view.filtered);
        let (chart_rect, insets) = chart_layout(inner);
        let widget = SupplyPlottersChart {
            purchase: &series.purchase,
            sales: &series.sales,
            labels: &series.labels,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            y_label: format!("Məbləğ ({})", self.currency),
            fmt_y: crate::report::fmt_thousands,
            cursor: self.cursor.filter(|&i| i < view.filtered.len()).map(|i| i as f64),
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &series);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab select  ←/→ month  PgUp/PgDn year  Home/End  s swap  a all  ,/. cursor  d snapshot  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn card_color(kind: CardKind) -> Color {
    match kind {
        CardKind::Purchase => rgb(PURCHASE_RGB),
        CardKind::Sales => rgb(SALES_RGB),
        CardKind::Profit => Color::Green,
        CardKind::Inventory => Color::Cyan,
    }
}

fn draw_cards(frame: &mut ratatui::Frame<'_>, area: Rect, cards: &[SummaryCard]) {
    if cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, rect) in cards.iter().zip(cols.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                card.value.clone(),
                Style::default()
                    .fg(card_color(card.kind))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.caption.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .block(Block::default().title(card.title).borders(Borders::ALL));
        frame.render_widget(p, *rect);
    }
}

/// Series and bounds for the chart, x being the month index within the selection.
#[derive(Debug, Clone, PartialEq)]
struct ChartSeries {
    purchase: Vec<(f64, f64)>,
    sales: Vec<(f64, f64)>,
    labels: Vec<String>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(records: &[MonthlyRecord]) -> ChartSeries {
    let purchase: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.purchase_amount as f64))
        .collect();
    let sales: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, r.sales_amount as f64))
        .collect();
    let labels = records.iter().map(|r| r.short_label.clone()).collect();

    // Half a month of slack on each side keeps end points off the axes.
    let x_bounds = [-0.5, records.len().max(1) as f64 - 0.5];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in purchase.iter().chain(&sales) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        y_min = 0.0;
        y_max = 1.0;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1000.0);
    let y_bounds = [(y_min - pad).max(0.0), y_max + pad];

    ChartSeries {
        purchase,
        sales,
        labels,
        x_bounds,
        y_bounds,
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10 || inner.height <= insets.top + insets.bottom + 5 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

/// Month indices that get an x tick: at most `max_ticks`, always first and last.
fn tick_indices(n: usize, max_ticks: usize) -> Vec<usize> {
    if n == 0 || max_ticks == 0 {
        return Vec::new();
    }
    if n <= max_ticks {
        return (0..n).collect();
    }
    let steps = max_ticks.max(2) - 1;
    let mut out: Vec<usize> = (0..=steps)
        .map(|k| ((k * (n - 1)) as f64 / steps as f64).round() as usize)
        .collect();
    out.dedup();
    out
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    series: &ChartSeries,
) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = series.x_bounds;
    let [y0, y1] = series.y_bounds;

    // Leave roughly a label's width between ticks.
    let max_x_ticks = (chart.width / 10).max(2) as usize;
    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        for idx in tick_indices(series.labels.len(), max_x_ticks) {
            let u = (idx as f64 - x0) / (x1 - x0);
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = &series.labels[idx];
            let label_len = label.chars().count() as u16;
            let start = x.saturating_sub(label_len / 2).max(inner.x);
            let width = label_len.min((inner.x + inner.width).saturating_sub(start));
            frame.render_widget(
                Paragraph::new(label.as_str()).style(style),
                Rect {
                    x: start,
                    y,
                    width,
                    height: 1,
                },
            );
        }
    }

    let ticks = 5usize;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y0 + u * (y1 - y0);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = crate::report::fmt_thousands(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label_len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }
}
