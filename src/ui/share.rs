use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::share::ShareDialog;

const POPUP_WIDTH_PERCENT: u16 = 70;
const POPUP_HEIGHT: u16 = 16;

pub fn render(frame: &mut Frame, area: Rect, dialog: &ShareDialog) {
    let popup = centered_rect(area, POPUP_WIDTH_PERCENT, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Share quiz ")
        .borders(Borders::ALL)
        .border_style(Color::Cyan)
        .padding(Padding::uniform(1));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let slug = Paragraph::new(Line::from(vec![
        Span::styled("Label: ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(dialog.slug(), Style::default().fg(Color::White)),
        Span::styled("_", Style::default().fg(Color::Yellow)),
    ]));
    frame.render_widget(slug, chunks[0]);

    let hint = Paragraph::new("Add a short name so the link is easy to recognise.")
        .fg(Color::DarkGray);
    frame.render_widget(hint, chunks[1]);

    let link = Paragraph::new(dialog.link())
        .wrap(Wrap { trim: false })
        .fg(Color::Yellow);
    frame.render_widget(link, chunks[3]);

    let controls = if dialog.is_copied() {
        Paragraph::new("Copied! The link is printed when you quit.  ·  esc close")
            .fg(Color::Green)
            .bold()
    } else {
        Paragraph::new("enter copy link  ·  esc close").fg(Color::DarkGray)
    };
    frame.render_widget(controls.alignment(Alignment::Center), chunks[4]);
}

fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let side = (100 - width_percent) / 2;
    Layout::horizontal([
        Constraint::Percentage(side),
        Constraint::Percentage(width_percent),
        Constraint::Percentage(side),
    ])
    .split(vertical[1])[1]
}
