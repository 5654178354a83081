use super::centered_rect;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Global", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    ?         ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("    Ctrl+C    ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit from anywhere"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Gallery", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    q         ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit application"),
        ]),
        Line::from(vec![
            Span::styled("    ←↑↓→/hjkl ", Style::default().fg(Color::Yellow)),
            Span::raw("Move between cards"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Open movie detail"),
        ]),
        Line::from(vec![
            Span::styled("    Click     ", Style::default().fg(Color::Yellow)),
            Span::raw("Open the clicked card"),
        ]),
        Line::from(vec![
            Span::styled("    /         ", Style::default().fg(Color::Yellow)),
            Span::raw("Search titles on this page (live)"),
        ]),
        Line::from(vec![
            Span::styled("    n/PgDn    ", Style::default().fg(Color::Yellow)),
            Span::raw("Next page"),
        ]),
        Line::from(vec![
            Span::styled("    p/PgUp    ", Style::default().fg(Color::Yellow)),
            Span::raw("Previous page"),
        ]),
        Line::from(vec![
            Span::styled("    r         ", Style::default().fg(Color::Yellow)),
            Span::raw("Reload the last requested page"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Search", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Submit and return to the gallery"),
        ]),
        Line::from(vec![
            Span::styled("    Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Return to the gallery, keep the search"),
        ]),
        Line::from(vec![
            Span::styled("    Backspace ", Style::default().fg(Color::Yellow)),
            Span::raw("Delete last character"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Detail", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("    Esc/x/q   ", Style::default().fg(Color::Yellow)),
            Span::raw("Close the detail (q does not quit here)"),
        ]),
        Line::from(vec![
            Span::styled("    Click     ", Style::default().fg(Color::Yellow)),
            Span::raw("Close when clicking outside it"),
        ]),
        Line::from(vec![
            Span::styled("    ←/→       ", Style::default().fg(Color::Yellow)),
            Span::raw("Show previous/next movie"),
        ]),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help: Keybindings ")
                .title_bottom(Line::from(" Press ? or Esc to close ").style(Style::default().fg(Color::DarkGray))),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
