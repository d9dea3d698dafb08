use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::authoring::ManualField;
use crate::models::NUM_OPTIONS;

use super::{render_controls, OPTION_LABELS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);
    let columns = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .spacing(1)
        .split(rows[0]);

    render_manual_form(frame, columns[0], app);
    render_generator_form(frame, columns[1], app);
    render_controls(
        frame,
        rows[1],
        "tab next field  ·  ctrl+k mark correct  ·  enter submit  ·  ←/→ change  ·  F4 share  ·  esc quit",
    );
}

fn input_line<'a>(label: String, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
    }
    Line::from(spans)
}

fn render_manual_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.manual();
    let mut lines = vec![
        input_line(
            "Question: ".to_string(),
            &form.text,
            app.focus == Focus::Manual(ManualField::Text),
        ),
        Line::from(""),
    ];

    for index in 0..NUM_OPTIONS {
        let is_correct = form.correct_index == index;
        let marker = if is_correct {
            Span::styled(" (•) ", Style::default().fg(Color::Green).bold())
        } else {
            Span::styled(" ( ) ", Style::default().fg(Color::DarkGray))
        };

        let mut line = input_line(
            format!("{}. ", OPTION_LABELS[index]),
            &form.options[index],
            app.focus == Focus::Manual(ManualField::Option(index)),
        );
        line.spans.insert(0, marker);
        lines.push(line);
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Add a question ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}

fn render_generator_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.generator();
    let choice_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let mut lines = vec![
        input_line("Topic: ".to_string(), &form.topic, app.focus == Focus::Topic),
        Line::from(""),
        Line::from(vec![
            Span::styled("Questions: ", choice_style(app.focus == Focus::Count)),
            Span::styled(format!("< {} >", form.count), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Difficulty: ", choice_style(app.focus == Focus::Difficulty)),
            Span::styled(
                format!("< {} >", form.difficulty),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
    ];

    if form.is_loading() {
        lines.push(Line::from(Span::styled(
            "Generating...",
            Style::default().fg(Color::Yellow).bold(),
        )));
    } else if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        )));
    } else if form.can_generate() {
        lines.push(Line::from(Span::styled(
            "Press enter to generate",
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Enter a topic to generate questions",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Generate with AI ")
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}
