//! Project list widget stacking one card per selected project.

use super::carousel::CarouselState;
use super::project_card::{card_height, ProjectCardWidget};
use crate::domain::CardProps;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Blank rows between two cards
pub const CARD_GAP: u16 = 1;

/// Height of the list block for `count` cards of `width` columns.
///
/// The block never grows past `available` and never shrinks below the
/// reserved `min_layout_height`, so it keeps its size while content loads.
pub fn list_height(count: usize, width: u16, min_layout_height: Option<u64>, available: u16) -> u16 {
    let inner_width = width.saturating_sub(2);
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    let cards = count.saturating_mul(u32::from(card_height(inner_width)));
    let gaps = count.saturating_sub(1).saturating_mul(u32::from(CARD_GAP));
    let natural = u64::from(cards.saturating_add(gaps).saturating_add(2));
    let wanted = natural.max(min_layout_height.unwrap_or(0));
    wanted.min(u64::from(available)) as u16
}

/// How many cards fit in `height` rows (at least one)
pub fn visible_cards(height: u16, card_height: u16) -> usize {
    let slot = card_height.saturating_add(CARD_GAP).max(1);
    usize::from((height.saturating_add(CARD_GAP) / slot).max(1))
}

/// First card to draw so that `selected` stays on screen
pub fn first_visible(selected: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

/// Widget rendering the selected projects as a column of cards
pub struct ProjectListWidget<'a> {
    cards: &'a [CardProps],
    carousel: &'a CarouselState,
    selected_index: usize,
    min_layout_height: Option<u64>,
    title: String,
}

impl<'a> ProjectListWidget<'a> {
    /// Create a new project list widget
    pub fn new(cards: &'a [CardProps], carousel: &'a CarouselState, selected_index: usize) -> Self {
        Self {
            cards,
            carousel,
            selected_index,
            min_layout_height: None,
            title: " Projects ".to_string(),
        }
    }

    /// Reserve a minimum height for the list block
    pub fn min_layout_height(mut self, height: Option<u64>) -> Self {
        self.min_layout_height = height;
        self
    }

    /// Set the block title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Widget for ProjectListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = list_height(
            self.cards.len(),
            area.width,
            self.min_layout_height,
            area.height,
        );
        let list_area = Rect { height, ..area };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(self.title.as_str());
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        if self.cards.is_empty() {
            Paragraph::new("No projects to show.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let card_rows = card_height(inner.width);
        let visible = visible_cards(inner.height, card_rows);
        let first = first_visible(self.selected_index, visible);

        let mut y = inner.y;
        for (idx, card) in self.cards.iter().enumerate().skip(first) {
            let bottom = inner.y + inner.height;
            if y >= bottom {
                break;
            }
            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: card_rows.min(bottom - y),
            };

            let slide = self.carousel.position(&card.slug, card.images.len());
            ProjectCardWidget::new(card)
                .slide(slide)
                .selected(idx == self.selected_index)
                .render(card_area, buf);

            y = y.saturating_add(card_rows + CARD_GAP);
        }
    }
}
