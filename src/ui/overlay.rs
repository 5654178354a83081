use super::centered_rect;
use crate::view::{CastView, DetailView};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub const CLOSE_LABEL: &str = "[x]";

/// Area covered by the detail overlay.
pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(70, 80, area)
}

/// Click target of the close control on the overlay's top border.
pub fn close_rect(overlay: Rect) -> Rect {
    let width = CLOSE_LABEL.len() as u16;
    Rect::new(
        overlay.right().saturating_sub(width + 2),
        overlay.y,
        width.min(overlay.width),
        1,
    )
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

pub fn render(detail: &DetailView, frame: &mut Frame) {
    let area = overlay_rect(frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {} ", detail.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(" Esc/x close  ←/→ previous/next ").style(Style::default().fg(Color::DarkGray)),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Span::styled(CLOSE_LABEL, Style::default().fg(Color::Red))),
        close_rect(area),
    );

    // Poster(1) + description(min) + cast(12)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(12),
        ])
        .split(inner);

    let poster = if detail.poster.is_empty() {
        Span::styled("none", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            detail.poster.clone(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        )
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Poster: ", Style::default().fg(Color::DarkGray)),
            poster,
        ])),
        chunks[0],
    );

    let description = Paragraph::new(detail.description.clone())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Overview "),
        );
    frame.render_widget(description, chunks[1]);

    let cast_lines: Vec<Line> = match &detail.cast {
        CastView::Members(members) => members
            .iter()
            .map(|member| {
                Line::from(vec![
                    Span::styled(
                        format!(" • {:<28}", member.name),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(member.image.clone(), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect(),
        CastView::Missing(placeholder) => vec![Line::from(Span::styled(
            format!(" {placeholder}"),
            Style::default().fg(Color::DarkGray),
        ))],
    };
    let cast = Paragraph::new(cast_lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Cast "),
    );
    frame.render_widget(cast, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CastMemberView;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(detail: &DetailView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(detail, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_overlay_lists_cast() {
        let detail = DetailView {
            poster: "https://img/dune.jpg".to_string(),
            title: "Dune".to_string(),
            description: "Spice must flow.".to_string(),
            cast: CastView::Members(
                (0..10)
                    .map(|i| CastMemberView {
                        name: format!("Actor {i}"),
                        image: String::new(),
                    })
                    .collect(),
            ),
        };
        let text = screen(&detail);
        assert!(text.contains("Dune"));
        assert!(text.contains("Spice must flow."));
        assert!(text.contains("Actor 0"));
        assert!(text.contains("Actor 9"));
        assert!(text.contains(CLOSE_LABEL));
    }

    #[test]
    fn test_close_rect_on_top_border() {
        let overlay = Rect::new(10, 5, 60, 20);
        let close = close_rect(overlay);
        assert_eq!(close.y, 5);
        assert!(contains(overlay, close.x, close.y));
        assert!(close.right() < overlay.right());
    }
}
