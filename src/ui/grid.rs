use crate::view::CardView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 6;

/// How many cards fit across and down the grid area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    pub fn for_area(area: Rect) -> Self {
        Self {
            columns: (area.width / CARD_WIDTH).max(1) as usize,
            rows: (area.height / CARD_HEIGHT).max(1) as usize,
        }
    }

    /// First row shown so that `selected` stays on screen.
    pub fn first_row(&self, selected: usize) -> usize {
        let row = selected / self.columns;
        (row + 1).saturating_sub(self.rows)
    }
}

/// Screen rectangles of the cards currently on screen, keyed by index into
/// the visible set.
pub fn card_rects(area: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let geometry = GridGeometry::for_area(area);
    let start = geometry.first_row(selected) * geometry.columns;
    let end = (start + geometry.rows * geometry.columns).min(count);

    (start..end)
        .filter_map(|index| {
            let slot = index - start;
            let col = (slot % geometry.columns) as u16;
            let row = (slot / geometry.columns) as u16;
            let rect = Rect::new(
                area.x + col * CARD_WIDTH,
                area.y + row * CARD_HEIGHT,
                CARD_WIDTH.min(area.width),
                CARD_HEIGHT.min(area.height),
            );
            (rect.bottom() <= area.bottom()).then_some((index, rect))
        })
        .collect()
}

/// Index of the card under the terminal cell (`column`, `row`), if any.
pub fn card_at(area: Rect, count: usize, selected: usize, column: u16, row: u16) -> Option<usize> {
    card_rects(area, count, selected)
        .into_iter()
        .find(|(_, rect)| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        })
        .map(|(index, _)| index)
}

pub fn render(cards: &[CardView], selected: usize, frame: &mut Frame, area: Rect) {
    for (index, rect) in card_rects(area, cards.len(), selected) {
        let card = &cards[index];
        let is_selected = index == selected;

        let border_style = if is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let poster = match &card.poster {
            Some(url) => Span::styled(file_name(url), Style::default().fg(Color::Blue)),
            None => Span::styled("no poster", Style::default().fg(Color::DarkGray)),
        };

        let lines = vec![
            Line::from(Span::styled(
                card.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(poster),
        ];

        let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(widget, rect);
    }
}

/// Last path segment of a poster URL, which is all that fits on a card.
fn file_name(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_fits_cards() {
        let geometry = GridGeometry::for_area(Rect::new(0, 0, 80, 20));
        assert_eq!(geometry.columns, 3);
        assert_eq!(geometry.rows, 3);

        let tiny = GridGeometry::for_area(Rect::new(0, 0, 10, 2));
        assert_eq!(tiny.columns, 1);
        assert_eq!(tiny.rows, 1);
    }

    #[test]
    fn test_card_rects_follow_order() {
        let area = Rect::new(0, 6, 80, 20);
        let rects = card_rects(area, 4, 0);
        let indices: Vec<usize> = rects.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(rects[1].1.x, CARD_WIDTH);
        assert_eq!(rects[3].1.y, 6 + CARD_HEIGHT);
    }

    #[test]
    fn test_grid_scrolls_to_selection() {
        let area = Rect::new(0, 0, 80, 12);
        // 3 columns, 2 rows; selecting index 7 (row 2) scrolls one row.
        let rects = card_rects(area, 12, 7);
        assert_eq!(rects.first().map(|(i, _)| *i), Some(3));
        assert!(rects.iter().any(|(i, _)| *i == 7));
    }

    #[test]
    fn test_card_at_hit_testing() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(card_at(area, 5, 0, 1, 1), Some(0));
        assert_eq!(card_at(area, 5, 0, CARD_WIDTH + 2, CARD_HEIGHT + 1), Some(4));
        assert_eq!(card_at(area, 5, 0, 79, 1), None);
        assert_eq!(card_at(area, 2, 0, 1, CARD_HEIGHT + 1), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("https://img.example/t/p/w500/abc.jpg"), "abc.jpg");
        assert_eq!(file_name("abc.jpg"), "abc.jpg");
    }
}
