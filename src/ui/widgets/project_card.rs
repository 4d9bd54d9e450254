//! Project card widget with layout-stable slots.
//!
//! Every optional slot keeps its footprint whether or not it has content:
//! the media box keeps its aspect ratio, text slots keep their rows and the
//! call-to-action links keep their minimum widths. The card's outer size
//! depends on its width only.

use super::carousel::{CarouselWidget, MediaPlaceholder};
use crate::domain::{CardProps, CASE_STUDY_LABEL, EXTERNAL_LINK_LABEL};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::path::Path;

/// Rows the title is clamped to
pub const TITLE_ROWS: u16 = 2;
/// Rows reserved for the avatar group
pub const AVATAR_ROWS: u16 = 1;
/// Rows the description is clamped to
pub const DESCRIPTION_ROWS: u16 = 3;
/// Rows of the call-to-action row
pub const CTA_ROWS: u16 = 1;
/// Minimum width of the case-study link
pub const CASE_STUDY_MIN_WIDTH: u16 = 18;
/// Minimum width of the external link
pub const EXTERNAL_LINK_MIN_WIDTH: u16 = 16;
/// Columns between the two links
pub const CTA_GAP: u16 = 3;

const MIN_MEDIA_ROWS: u16 = 4;
const MAX_MEDIA_ROWS: u16 = 14;
/// Border rows plus the spacer rows around the title
const CHROME_ROWS: u16 = 2 + 2;

/// Rows of a 16:9 media box `width` columns wide.
///
/// Terminal cells are roughly twice as tall as they are wide.
pub fn media_rows(width: u16) -> u16 {
    let rows = u32::from(width) * 9 / 32;
    (rows.min(u32::from(MAX_MEDIA_ROWS)) as u16).max(MIN_MEDIA_ROWS)
}

/// Outer height of a card `width` columns wide
pub fn card_height(width: u16) -> u16 {
    let inner_width = width.saturating_sub(2);
    CHROME_ROWS + media_rows(inner_width) + TITLE_ROWS + AVATAR_ROWS + DESCRIPTION_ROWS + CTA_ROWS
}

/// Where each slot of a card goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub outer: Rect,
    pub media: Rect,
    pub title: Rect,
    pub avatars: Rect,
    pub description: Rect,
    pub case_study: Rect,
    pub external_link: Rect,
}

impl CardLayout {
    /// Lay out a card whose top-left corner is at (`x`, `y`) and which is
    /// `width` columns wide. Only the width affects the result.
    pub fn compute(x: u16, y: u16, width: u16) -> Self {
        let outer = Rect::new(x, y, width, card_height(width));
        let inner = Block::default().borders(Borders::ALL).inner(outer);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(media_rows(inner.width)), // Media
                Constraint::Length(1),                       // Spacer
                Constraint::Length(TITLE_ROWS),              // Title
                Constraint::Length(1),                       // Spacer
                Constraint::Length(AVATAR_ROWS),             // Avatars
                Constraint::Length(DESCRIPTION_ROWS),        // Description
                Constraint::Length(CTA_ROWS),                // Links
            ])
            .split(inner);

        let pad = |r: Rect| Rect {
            x: r.x + 1,
            width: r.width.saturating_sub(2),
            ..r
        };

        let links = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CASE_STUDY_MIN_WIDTH),
                Constraint::Length(CTA_GAP),
                Constraint::Length(EXTERNAL_LINK_MIN_WIDTH),
                Constraint::Min(0),
            ])
            .split(pad(rows[6]));

        Self {
            outer,
            media: rows[0],
            title: pad(rows[2]),
            avatars: pad(rows[4]),
            description: pad(rows[5]),
            case_study: links[0],
            external_link: links[2],
        }
    }
}

/// Widget rendering one project card
pub struct ProjectCardWidget<'a> {
    props: &'a CardProps,
    slide: usize,
    selected: bool,
}

impl<'a> ProjectCardWidget<'a> {
    /// Create a new project card widget
    pub fn new(props: &'a CardProps) -> Self {
        Self {
            props,
            slide: 0,
            selected: false,
        }
    }

    /// Set the carousel slide to show
    pub fn slide(mut self, slide: usize) -> Self {
        self.slide = slide;
        self
    }

    /// Highlight the card as the current selection
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// One-letter label for an avatar reference
fn avatar_initial(src: &str) -> char {
    Path::new(src)
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| stem.rsplit(['-', '_']).find(|part| !part.is_empty()))
        .and_then(|part| part.chars().find(|c| c.is_alphanumeric()))
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('•')
}

/// Overlapping avatar group, earlier avatars stacked on top.
///
/// Each avatar is `(X)` and overlaps its neighbour by one cell, so the
/// group reads `(A)B)C)`.
pub fn avatar_group(avatars: &[String]) -> String {
    let mut cells: Vec<char> = Vec::with_capacity(avatars.len() * 2 + 1);
    // Draw back to front so earlier avatars end up on top
    for (idx, avatar) in avatars.iter().enumerate().rev() {
        let at = idx * 2;
        let glyph = ['(', avatar_initial(avatar), ')'];
        if cells.len() < at + 3 {
            cells.resize(at + 3, ' ');
        }
        cells[at..at + 3].copy_from_slice(&glyph);
    }
    cells.into_iter().collect()
}

impl Widget for ProjectCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Lay out at full size, then clip every slot to what is visible
        let layout = CardLayout::compute(area.x, area.y, area.width);
        let clip = |r: Rect| r.intersection(area);
        let slots = self.props.slots();

        let border_style = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let outer = clip(layout.outer);
        if layout.outer.height <= area.height {
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .render(outer, buf);
        } else {
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::TOP)
                .border_style(border_style)
                .render(outer, buf);
        }

        // Media slot
        let media = clip(layout.media);
        if slots.media {
            CarouselWidget::new(&self.props.images, &self.props.title, self.slide)
                .render(media, buf);
        } else {
            MediaPlaceholder.render(media, buf);
        }

        // Title slot (always present)
        let title_style = if self.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Paragraph::new(self.props.title.as_str())
            .style(title_style)
            .wrap(Wrap { trim: true })
            .render(clip(layout.title), buf);

        // Avatars slot
        if slots.avatars {
            Paragraph::new(avatar_group(&self.props.avatars))
                .style(Style::default().fg(Color::Magenta))
                .render(clip(layout.avatars), buf);
        }

        // Description slot
        if let Some(description) = self.props.description.as_deref().filter(|_| slots.description)
        {
            Paragraph::new(description.trim())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(clip(layout.description), buf);
        }

        // Call-to-action slots
        let link_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED);
        if slots.case_study {
            Paragraph::new(Line::from(vec![
                Span::styled(CASE_STUDY_LABEL, link_style),
                Span::styled(" →", Style::default().fg(Color::Cyan)),
            ]))
            .render(clip(layout.case_study), buf);
        }
        if slots.external_link {
            Paragraph::new(Line::from(vec![
                Span::styled(EXTERNAL_LINK_LABEL, link_style),
                Span::styled(" ↗", Style::default().fg(Color::Cyan)),
            ]))
            .render(clip(layout.external_link), buf);
        }
    }
}
