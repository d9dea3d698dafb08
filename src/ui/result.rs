use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::runner::{Grade, QuizRunner, Score};

use super::{render_controls, OPTION_LABELS};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App, runner: &QuizRunner) {
    let Some(score) = runner.score() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], score);
    render_question_breakdown(frame, chunks[2], runner, app.result_scroll());
    render_controls(frame, chunks[3], "j/k scroll  ·  r retry  ·  esc back to review");
}

fn get_grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => Color::Green,
        Grade::VeryGood => Color::Cyan,
        Grade::Good => Color::Yellow,
        Grade::TryAgain => Color::Red,
    }
}

fn summary_icon(grade: Grade) -> &'static str {
    if grade.is_pass() { "★" } else { "↻" }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: Score) {
    let grade = score.grade();
    let grade_color = get_grade_color(grade);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", summary_icon(grade), grade.label()),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score.percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            format!("{} of {} answers correct", score.correct, score.total),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, runner: &QuizRunner, scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, item) in runner.review().iter().enumerate() {
        let is_correct = item.is_correct();
        let (symbol, color) = if is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(&item.question.text),
                Style::default().fg(Color::Gray),
            ),
        ]));

        for (opt_index, option) in item.question.options.iter().enumerate() {
            let style = if item.question.is_correct(opt_index) {
                Style::default().fg(Color::Green).bold()
            } else if item.answer == Some(opt_index) && !is_correct {
                Style::default().fg(Color::Red).crossed_out()
            } else {
                continue;
            };
            lines.push(Line::from(vec![
                Span::styled(format!("      {}. ", OPTION_LABELS[opt_index]), style),
                Span::styled(option.as_str(), style),
            ]));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_question_counts_chars() {
        let long = "ق".repeat(60);
        let truncated = truncate_question(&long);
        assert_eq!(truncated.chars().count(), QUESTION_PREVIEW_LENGTH + 3);
        assert_eq!(truncate_question("short"), "short");
    }

    #[test]
    fn test_summary_icon_switches_at_half() {
        assert_eq!(summary_icon(Score::new(1, 2).grade()), "★");
        assert_eq!(summary_icon(Score::new(2, 5).grade()), "↻");
    }
}
