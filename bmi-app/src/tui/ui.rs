//! UI rendering for the TUI.

use bmi_model::BmiRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use super::app::{App, Focus, Message, Severity};
use crate::presenter::{format_number, Trend};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Draws the entire UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Form
            Constraint::Length(1), // Result
            Constraint::Min(0),    // History
            Constraint::Length(3), // Status
        ])
        .split(f.size());

    draw_form(f, chunks[0], app);
    draw_result(f, chunks[1], app);
    draw_history(f, chunks[2], app.session().history());
    draw_status(f, chunks[3]);

    if let Some(trend) = app.trend() {
        draw_trend(f, centered_rect(90, 80, f.size()), trend);
    }
    if let Some(message) = app.message() {
        draw_message(f, centered_rect(60, 25, f.size()), message);
    }
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
    let form = app.form();
    let fields = [
        (Focus::Username, "Username:    ", &form.username),
        (Focus::Weight, "Weight (kg): ", &form.weight),
        (Focus::Height, "Height (m):  ", &form.height),
    ];

    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(focus, label, value)| {
            let style = if app.focus() == focus {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if app.focus() == focus { "_" } else { "" };
            Line::from(vec![
                Span::raw(label),
                Span::styled(format!("{}{}", value, cursor), style),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("BMI Calculator"),
    );

    f.render_widget(paragraph, area);
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let paragraph = Paragraph::new(app.session().result().unwrap_or_default())
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_history(f: &mut Frame, area: Rect, history: &[BmiRecord]) {
    let header = Row::new(vec!["Weight (kg)", "Height (m)", "BMI", "Category", "Date"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    // newest rows are kept visible when the table overflows
    let visible = area.height.saturating_sub(3) as usize;
    let rows: Vec<Row> = history
        .iter()
        .skip(history.len().saturating_sub(visible))
        .map(|record| {
            Row::new(vec![
                format_number(record.weight),
                format_number(record.height),
                format_number(record.bmi),
                record.category.to_string(),
                record.date.format(DATE_FORMAT).to_string(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Min(19),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("BMI History"));

    f.render_widget(table, area);
}

fn draw_status(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(
        "Enter: calculate | Ctrl-T/F2: show trend | Ctrl-R: reload | Tab: next field | Esc: quit",
    )
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::White))
    .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

fn draw_trend(f: &mut Frame, area: Rect, trend: &Trend) {
    // x is the measurement index, dates are shown as labels
    let data: Vec<(f64, f64)> = trend
        .points
        .iter()
        .enumerate()
        .map(|(i, (_, bmi))| (i as f64, *bmi))
        .collect();

    let (min_bmi, max_bmi) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, bmi)| {
            (lo.min(*bmi), hi.max(*bmi))
        });
    let y_bounds = [(min_bmi - 1.0).floor(), (max_bmi + 1.0).ceil()];
    let x_bounds = [0.0, (data.len().saturating_sub(1) as f64).max(1.0)];

    let x_labels = date_labels(trend);
    let y_labels = vec![
        Span::raw(format!("{:.1}", y_bounds[0])),
        Span::raw(format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0)),
        Span::raw(format!("{:.1}", y_bounds[1])),
    ];

    let dataset = Dataset::default()
        .name("BMI")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Blue))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} (Esc to close)", trend.title)),
        )
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("BMI")
                .bounds(y_bounds)
                .labels(y_labels),
        );

    f.render_widget(Clear, area);
    f.render_widget(chart, area);
}

fn date_labels(trend: &Trend) -> Vec<Span<'static>> {
    let label = |i: usize| Span::raw(trend.points[i].0.format("%Y-%m-%d").to_string());
    match trend.points.len() {
        0 => vec![],
        1 => vec![label(0)],
        2 => vec![label(0), label(1)],
        n => vec![label(0), label(n / 2), label(n - 1)],
    }
}

fn draw_message(f: &mut Frame, area: Rect, message: &Message) {
    let color = match message.severity {
        Severity::Error => Color::Red,
        Severity::Info => Color::Cyan,
    };

    let paragraph = Paragraph::new(vec![
        Line::from(message.text.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(message.title.as_str())
            .border_style(Style::default().fg(color)),
    )
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
