mod create;
mod preview;
mod quiz;
mod result;
mod share;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::View;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, chunks[0], app);

    match app.view {
        View::Create => create::render(frame, chunks[1], app),
        View::Preview => preview::render(frame, chunks[1], app),
        View::Take => match app.runner() {
            Some(runner) if runner.is_finished() => result::render(frame, chunks[1], app, runner),
            Some(runner) => quiz::render(frame, chunks[1], app, runner),
            None => {}
        },
    }

    render_status(frame, chunks[2], app);

    if let Some(dialog) = app.share() {
        share::render(frame, area, dialog);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let tab = |label: &'static str, view: View| {
        if app.view == view {
            Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![
        Span::styled(" QUIZLINK ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
    ];

    if app.view == View::Take {
        spans.push(tab(" Quiz ", View::Take));
    } else {
        spans.push(tab(" F2 Create ", View::Create));
        spans.push(Span::raw(" "));
        spans.push(tab(" F3 Review ", View::Preview));
    }

    spans.push(Span::styled(
        format!("   {} questions", app.collection().len()),
        Style::default().fg(Color::DarkGray),
    ));

    if !app.title().is_empty() {
        spans.push(Span::styled(
            format!("  ·  {}", app.title()),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = app.status() else {
        return;
    };
    let widget = Paragraph::new(status)
        .alignment(Alignment::Center)
        .fg(Color::Yellow);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

