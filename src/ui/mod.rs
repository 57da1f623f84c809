//! Single-screen rendering for the weather widget.

pub mod theme;

pub use theme::{condition_assets, ConditionAssets, Theme};

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Focus};
use crate::monitor::Classification;

/// Render the whole widget.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // search input
        Constraint::Length(3), // threshold inputs
        Constraint::Min(9),    // weather card
        Constraint::Length(4), // status region
        Constraint::Length(1), // key hints
    ])
    .split(area);

    render_search_bar(frame, app, chunks[0]);
    render_thresholds(frame, app, chunks[1]);
    render_weather_card(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_hints(frame, app, chunks[4]);
}

fn input_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let border_style = if focused {
        app.theme.focused
    } else {
        Style::default().fg(app.theme.border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style)
        .title(title)
}

fn input_text(value: &str, focused: bool) -> String {
    if focused {
        format!("{value}█")
    } else {
        value.to_string()
    }
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.view.loading {
        " Search city (fetching…) "
    } else {
        " Search city "
    };
    let focused = app.focus == Focus::City;
    let paragraph = Paragraph::new(input_text(&app.city_input, focused))
        .block(input_block(app, title, focused));
    frame.render_widget(paragraph, area);
}

fn render_thresholds(frame: &mut Frame, app: &App, area: Rect) {
    let halves =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let min_focused = app.focus == Focus::MinThreshold;
    let min = Paragraph::new(input_text(&app.min_input, min_focused)).block(input_block(
        app,
        " Min threshold (°C) ",
        min_focused,
    ));
    frame.render_widget(min, halves[0]);

    let max_focused = app.focus == Focus::MaxThreshold;
    let max = Paragraph::new(input_text(&app.max_input, max_focused)).block(input_block(
        app,
        " Max threshold (°C) ",
        max_focused,
    ));
    frame.render_widget(max, halves[1]);
}

fn render_weather_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(reading) = &app.view.reading else {
        let hint = if app.view.loading {
            "Fetching weather…"
        } else {
            "Search for a city to see current weather."
        };
        let placeholder = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        frame.render_widget(placeholder, area);
        return;
    };

    let assets = condition_assets(reading.condition);
    let card_style = Style::default().bg(assets.background).fg(Color::Black);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            reading.format_temperature(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(app.view.city.clone()),
        Line::from(format!("{} {}", assets.symbol, reading.description)),
        Line::from(""),
        Line::from(format!("Humidity    {}", reading.format_humidity())),
        Line::from(format!("Wind speed  {}", reading.format_wind())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Observed {}", reading.observed_at.format("%H:%M:%S UTC")),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(card_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type),
        );
    frame.render_widget(card, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(app.theme.warning),
        )));
    }

    if let Some(error) = &app.view.error {
        for part in error.split('\n') {
            lines.push(Line::from(Span::styled(
                part.to_string(),
                Style::default().fg(app.theme.error),
            )));
        }
    }

    if let Some(message) = app.view.threshold_message() {
        let color = match app.view.classification {
            Classification::BelowMin | Classification::AboveMax => app.theme.warning,
            Classification::WithinRange => app.theme.ok,
            Classification::NotConfigured => app.theme.border,
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(color),
        )));
    }

    lines.push(Line::from(Span::styled(
        app.view.permission.message(),
        app.theme.label,
    )));

    let status = Paragraph::new(lines);
    frame.render_widget(status, area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = Paragraph::new(Span::styled(
        "Tab: switch field   Enter: search   Esc: quit",
        app.theme.label,
    ));
    frame.render_widget(hints, area);
}
