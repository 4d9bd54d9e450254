//! Image carousel shown in a card's media slot.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};
use std::collections::HashMap;
use std::path::Path;

/// Background of the media box, with or without images
const MEDIA_BACKGROUND: Color = Color::Indexed(236);

/// Current slide per project slug
#[derive(Debug, Default, Clone)]
pub struct CarouselState {
    positions: HashMap<String, usize>,
}

impl CarouselState {
    /// Create a new carousel state
    pub fn new() -> Self {
        Self::default()
    }

    /// Slide shown for `slug`, kept within `len`
    pub fn position(&self, slug: &str, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.positions.get(slug).copied().unwrap_or(0) % len
    }

    /// Advance to the next slide, wrapping around
    pub fn next(&mut self, slug: &str, len: usize) {
        if len == 0 {
            return;
        }
        let next = (self.position(slug, len) + 1) % len;
        self.positions.insert(slug.to_string(), next);
    }

    /// Go back one slide, wrapping around
    pub fn previous(&mut self, slug: &str, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.position(slug, len);
        let previous = if current == 0 { len - 1 } else { current - 1 };
        self.positions.insert(slug.to_string(), previous);
    }

    /// Forget every position (after a reload)
    pub fn reset(&mut self) {
        self.positions.clear();
    }
}

/// Carousel over a project's image references
pub struct CarouselWidget<'a> {
    images: &'a [String],
    alt: &'a str,
    position: usize,
}

impl<'a> CarouselWidget<'a> {
    /// Create a new carousel widget
    pub fn new(images: &'a [String], alt: &'a str, position: usize) -> Self {
        Self {
            images,
            alt,
            position,
        }
    }

    /// Slide indicator, e.g. `‹ ●○○ 1/3 ›`
    fn indicator(&self) -> String {
        let len = self.images.len();
        if len <= 1 {
            return String::new();
        }
        let dots: String = (0..len)
            .map(|i| if i == self.position { '●' } else { '○' })
            .collect();
        format!("‹ {} {}/{} ›", dots, self.position + 1, len)
    }
}

/// File name of an image reference
fn image_name(image: &str) -> &str {
    Path::new(image)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(image)
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(MEDIA_BACKGROUND));
        if area.height == 0 || self.images.is_empty() {
            return;
        }

        let image = &self.images[self.position.min(self.images.len() - 1)];

        let lines = vec![
            Line::from(Span::styled(
                format!("▣ {}", image_name(image)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.alt.to_string(),
                Style::default().fg(Color::Gray),
            )),
        ];

        let middle = area.y + area.height.saturating_sub(lines.len() as u16) / 2;
        let caption_area = Rect {
            x: area.x,
            y: middle,
            width: area.width,
            height: (area.y + area.height).saturating_sub(middle).min(2),
        };
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(caption_area, buf);

        let indicator = self.indicator();
        if !indicator.is_empty() && area.height >= 4 {
            let indicator_area = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            Paragraph::new(indicator)
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center)
                .render(indicator_area, buf);
        }
    }
}

/// Empty media box shown when a project has no images
pub struct MediaPlaceholder;

impl Widget for MediaPlaceholder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(MEDIA_BACKGROUND));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_state_wraps() {
        let mut state = CarouselState::new();
        assert_eq!(state.position("orbit", 3), 0);

        state.next("orbit", 3);
        state.next("orbit", 3);
        assert_eq!(state.position("orbit", 3), 2);

        state.next("orbit", 3);
        assert_eq!(state.position("orbit", 3), 0);

        state.previous("orbit", 3);
        assert_eq!(state.position("orbit", 3), 2);

        // Other slugs are independent
        assert_eq!(state.position("atlas", 3), 0);
    }

    #[test]
    fn test_carousel_state_without_images() {
        let mut state = CarouselState::new();
        state.next("bare", 0);
        state.previous("bare", 0);
        assert_eq!(state.position("bare", 0), 0);
    }

    #[test]
    fn test_position_clamped_when_images_shrink() {
        let mut state = CarouselState::new();
        state.previous("orbit", 5);
        assert_eq!(state.position("orbit", 5), 4);
        assert_eq!(state.position("orbit", 2), 0);
    }

    #[test]
    fn test_indicator() {
        let images = vec!["/a.jpg".to_string(), "/b.jpg".to_string(), "/c.jpg".to_string()];
        let widget = CarouselWidget::new(&images, "Orbit", 1);
        assert_eq!(widget.indicator(), "‹ ○●○ 2/3 ›");

        let single = vec!["/a.jpg".to_string()];
        assert_eq!(CarouselWidget::new(&single, "Orbit", 0).indicator(), "");
    }

    #[test]
    fn test_image_name() {
        assert_eq!(image_name("/images/projects/orbit/cover-01.jpg"), "cover-01.jpg");
        assert_eq!(image_name("cover.png"), "cover.png");
    }
}
