use ratatui::{
    prelude::*,
    widgets::{Block, Padding, Paragraph, Wrap},
};

use crate::app::App;

use super::{render_controls, OPTION_LABELS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(area);

    if app.collection().is_empty() {
        render_empty(frame, chunks[0]);
        render_controls(frame, chunks[1], "F2 back to create  ·  esc quit");
        return;
    }

    render_question_list(frame, chunks[0], app);

    let controls = if app.is_confirming_clear() {
        "Delete all questions?  y confirm  ·  n cancel"
    } else {
        "j/k move  ·  d delete  ·  C clear all  ·  s share  ·  enter start quiz  ·  esc quit"
    };
    render_controls(frame, chunks[1], controls);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(vec![
        Line::from(""),
        Line::from("No questions yet".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_question_list(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;

    for (index, question) in app.collection().iter().enumerate() {
        let is_selected = index == app.selected();
        if is_selected {
            selected_line = lines.len();
        }

        let marker = if is_selected { ">" } else { " " };
        let text_style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::White).bold()
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} {:2}. ", marker, index + 1), text_style),
            Span::styled(question.text.as_str(), text_style),
        ]));

        for (opt_index, option) in question.options.iter().enumerate() {
            let style = if question.is_correct(opt_index) {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("       {}. ", OPTION_LABELS[opt_index]), style),
                Span::styled(option.as_str(), style),
            ]));
        }
        lines.push(Line::from(""));
    }

    // Keep the selected question in view.
    let scroll = selected_line.saturating_sub(area.height.saturating_sub(6) as usize);

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}
