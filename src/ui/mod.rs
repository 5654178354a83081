pub mod grid;
mod help;
pub mod overlay;

use crate::api::MovieSource;
use crate::app::{App, InputMode};
use crate::view::{Body, GalleryView, PaginationView};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub const PREV_LABEL: &str = " ◀ Prev ";
pub const NEXT_LABEL: &str = " Next ▶ ";

/// Screen regions, top to bottom.
pub struct Areas {
    pub header: Rect,
    pub search: Rect,
    pub grid: Rect,
    pub pager: Rect,
    pub status: Rect,
}

/// Layout: header(3) + search(3) + grid(min) + pager(1) + status(1)
pub fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        search: chunks[1],
        grid: chunks[2],
        pager: chunks[3],
        status: chunks[4],
    }
}

pub fn grid_area(area: Rect) -> Rect {
    layout(area).grid
}

/// Click targets of the previous/next controls inside the pager row.
pub fn pager_controls(pager: Rect) -> (Rect, Rect) {
    let prev_width = (PREV_LABEL.width() as u16).min(pager.width);
    let next_width = (NEXT_LABEL.width() as u16).min(pager.width);
    let prev = Rect::new(pager.x, pager.y, prev_width, pager.height);
    let next = Rect::new(
        pager.x + pager.width.saturating_sub(next_width),
        pager.y,
        next_width,
        pager.height,
    );
    (prev, next)
}

/// Top-level render. Everything is redrawn from the view description.
pub fn render<S: MovieSource>(app: &App<S>, frame: &mut Frame) {
    let view = app.view();
    let areas = layout(frame.area());

    render_header(&view, frame, areas.header);
    render_search(app, frame, areas.search);

    match &view.body {
        Body::Cards(cards) => grid::render(cards, app.selected, frame, areas.grid),
        Body::Pending => render_message(" ", Color::DarkGray, frame, areas.grid),
        Body::Message(msg) => render_message(msg, Color::DarkGray, frame, areas.grid),
        Body::Error { headline, reason } => render_error(headline, reason, frame, areas.grid),
    }

    render_pager(&view.pagination, frame, areas.pager);
    render_status(app, frame, areas.status);

    if let Some(detail) = &view.overlay {
        overlay::render(detail, frame);
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

fn render_header(view: &GalleryView, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " Movie Gallery",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if !view.pagination.label.is_empty() {
        spans.push(Span::styled(
            format!("   [{}]", view.pagination.label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if view.busy {
        spans.push(Span::styled(
            "   ⏳ Loading…",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_search<S: MovieSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let label = if app.input_mode == InputMode::Editing {
        " 🔍 Title (Enter to submit, Esc to stop): "
    } else {
        " 🔍 Title (/): "
    };
    let search = Paragraph::new(format!("{}{}", label, app.page.search_term))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Search "),
        );
    frame.render_widget(search, area);

    if app.input_mode == InputMode::Editing {
        let offset = label.width() + app.page.search_term.width();
        let cursor_x = area.x + 1 + offset as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_message(text: &str, color: Color, frame: &mut Frame, area: Rect) {
    let message = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(message, area);
}

fn render_error(headline: &str, reason: &str, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            headline.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(reason.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    let error = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error "),
        );
    frame.render_widget(error, area);
}

fn render_pager(pagination: &PaginationView, frame: &mut Frame, area: Rect) {
    let control = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };

    // Label first; the controls are drawn over its edges.
    frame.render_widget(
        Paragraph::new(pagination.label.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        area,
    );
    let (prev, next) = pager_controls(area);
    frame.render_widget(
        Paragraph::new(control(PREV_LABEL, pagination.prev_enabled)),
        prev,
    );
    frame.render_widget(
        Paragraph::new(control(NEXT_LABEL, pagination.next_enabled)),
        next,
    );
}

fn render_status<S: MovieSource>(app: &App<S>, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←↑↓→"),
        Span::raw(" Select  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("/"),
        Span::raw(" Search  "),
        key("n/p"),
        Span::raw(" Page  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
