use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const PILL_KEY_FG: Color = Color::Black;
const PILL_KEY_BG: Color = Color::Cyan;
const PILL_DESC_FG: Color = Color::Gray;
const STATUSBAR_BG: Color = Color::Reset;

pub fn render(frame: &mut Frame, area: Rect, source_name: &str) {
    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit"));
    spans.extend(pill_spans("Ctrl+C", "Quit"));
    spans.push(Span::styled(
        format!("  source: {source_name}"),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(STATUSBAR_BG)),
        area,
    );
}

fn pill_spans<'a>(key: &'a str, desc: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(PILL_KEY_FG)
                .bg(PILL_KEY_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {desc}"), Style::default().fg(PILL_DESC_FG)),
    ]
}
