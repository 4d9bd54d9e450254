//! Case-study reader for a project's long-form content.

use crate::domain::ProjectRecord;
use crate::ui::markdown::MarkdownRenderer;
use crate::ui::widgets::project_card::avatar_group;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

/// Build the full document for `record`: a metadata header followed by the body
pub fn case_study_lines(record: &ProjectRecord, renderer: &MarkdownRenderer) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        record.title.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    let muted = Style::default().fg(Color::DarkGray);
    if let Some(published) = record.published_at {
        lines.push(Line::from(Span::styled(
            published.format("%B %-d, %Y").to_string(),
            muted,
        )));
    }
    if let Some(summary) = record.summary.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        lines.push(Line::from(Span::styled(
            summary.to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    let team = record.team.as_deref().unwrap_or_default();
    if !team.is_empty() {
        let avatars = record.avatars();
        let names = team
            .iter()
            .map(|m| {
                if m.role.trim().is_empty() {
                    m.name.clone()
                } else {
                    format!("{} ({})", m.name, m.role)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled(avatar_group(&avatars), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(names, muted),
        ]));
    }

    if let Some(link) = record.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("↗ ", Style::default().fg(Color::Cyan)),
            Span::styled(
                link.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    lines.push(Line::default());

    match record.content.as_deref() {
        Some(body) => lines.extend(renderer.render(body)),
        None => lines.push(Line::from(Span::styled("No case study written yet.", muted))),
    }

    lines
}

/// Scrollable view over a rendered case study
pub struct CaseStudyWidget<'a> {
    lines: &'a [Line<'static>],
    title: String,
    scroll_offset: usize,
}

impl<'a> CaseStudyWidget<'a> {
    /// Create a new case-study widget
    pub fn new(lines: &'a [Line<'static>], title: &str) -> Self {
        Self {
            lines,
            title: title.to_string(),
            scroll_offset: 0,
        }
    }

    /// Set the scroll offset
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }
}

impl Widget for CaseStudyWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total_lines = self.lines.len();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible_height = inner.height as usize;
        let scroll = self
            .scroll_offset
            .min(total_lines.saturating_sub(visible_height));

        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .skip(scroll)
            .take(visible_height)
            .cloned()
            .collect();

        // Leave the last column to the scrollbar
        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        Paragraph::new(visible_lines)
            .wrap(Wrap { trim: false })
            .render(text_area, buf);

        if total_lines > visible_height && area.width > 0 {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(total_lines)
                .position(scroll)
                .viewport_content_length(visible_height);

            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };

            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

/// Scroll position of the case-study reader
#[derive(Debug, Default)]
pub struct ReaderState {
    scroll_offset: usize,
    total_lines: usize,
    visible_height: usize,
}

impl ReaderState {
    /// Create a new reader state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total lines
    pub fn set_total_lines(&mut self, lines: usize) {
        self.total_lines = lines;
        self.clamp();
    }

    /// Set the visible height
    pub fn set_visible_height(&mut self, height: usize) {
        self.visible_height = height;
        self.clamp();
    }

    /// Get current scroll offset
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    fn clamp(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Scroll up by amount
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by amount
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = (self.scroll_offset + amount).min(self.max_scroll());
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    /// Page up
    pub fn page_up(&mut self) {
        self.scroll_up(self.visible_height.saturating_sub(2).max(1));
    }

    /// Page down
    pub fn page_down(&mut self) {
        self.scroll_down(self.visible_height.saturating_sub(2).max(1));
    }
}
