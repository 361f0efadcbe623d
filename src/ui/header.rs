use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::summary_lines;
use crate::system::snapshot::TickReport;

/// The four `top` summary rows. Before the first tick there is nothing to
/// show but a placeholder.
pub fn render(frame: &mut Frame, area: Rect, report: Option<&TickReport>, clock: &str) {
    let Some(report) = report else {
        let waiting = Line::from(Span::styled(
            "Sampling...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(waiting), area);
        return;
    };

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = summary_lines(report, clock)
        .into_iter()
        .map(|line| {
            Line::from(vec![
                Span::styled(line.label, label_style),
                Span::raw(line.body),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
