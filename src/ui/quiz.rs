use ratatui::{
    prelude::*,
    widgets::{Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::runner::QuizRunner;

use super::{render_controls, OPTION_LABELS};

pub fn render(frame: &mut Frame, area: Rect, app: &App, runner: &QuizRunner) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], runner);
    render_title(frame, chunks[1], app.title());
    render_question_text(frame, chunks[2], &runner.current_question().text);
    render_options(frame, chunks[3], runner);
    render_controls(frame, chunks[4], controls_text(runner));
}

fn render_progress(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let ratio = runner.current_question_number() as f64 / runner.total_questions() as f64;
    let widget = Gauge::default()
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!(
            "{}/{}",
            runner.current_question_number(),
            runner.total_questions()
        ))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black));
    frame.render_widget(widget, area);
}

fn render_title(frame: &mut Frame, area: Rect, title: &str) {
    let text = if title.is_empty() { "Quiz" } else { title };
    let widget = Paragraph::new(text).fg(Color::Yellow);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let question = runner.current_question();
    let answer = runner.current_answer();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_highlighted = index == runner.highlighted();
        let is_answer = answer == Some(index);

        let style = if is_answer {
            Style::default().fg(Color::Cyan).bold()
        } else if is_highlighted {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_highlighted { ">" } else { " " };
        let radio = if is_answer { "(•)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", cursor, radio), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn controls_text(runner: &QuizRunner) -> &'static str {
    if runner.can_finish() {
        "j/k move  ·  enter select  ·  h previous  ·  f finish  ·  esc exit"
    } else if runner.can_advance() {
        "j/k move  ·  enter select  ·  h previous  ·  l next  ·  esc exit"
    } else {
        "j/k move  ·  enter select  ·  h previous  ·  answer to continue  ·  esc exit"
    }
}
