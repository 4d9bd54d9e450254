//! Main layout rendering for the TUI.

use crate::app::{App, AppView};
use crate::ui::widgets::case_study::CaseStudyWidget;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::project_list::ProjectListWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 3;

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match &app.view {
        AppView::Overview => draw_overview(frame, app, area),
        AppView::CaseStudy(slug) => draw_case_study(frame, app, area, slug),
        AppView::Help => draw_help(frame, app, area),
    }

    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    } else if let Some(ref msg) = app.status_message {
        draw_status_message(frame, msg, area);
    }
}

/// Rows available to case-study text inside `area`
pub fn reader_height(area: Rect) -> usize {
    area.height
        .saturating_sub(HEADER_ROWS + FOOTER_ROWS)
        .saturating_sub(2) as usize
}

/// Header, content and footer areas
fn frame_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_ROWS),
            Constraint::Min(0),
            Constraint::Length(FOOTER_ROWS),
        ])
        .split(area)
}

fn draw_footer(frame: &mut Frame, text: &str, area: Rect) {
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// Draw the project list
fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = frame_chunks(area);

    let mut header_text = format!("folio · {}", app.site.root_path.display());
    if app.page_count > 1 {
        header_text.push_str(&format!("  (page {}/{})", app.page + 1, app.page_count));
    }
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let title = format!(" Projects ({}) ", app.cards.len());
    let list = ProjectListWidget::new(&app.cards, &app.carousel, app.selected_index)
        .min_layout_height(app.min_layout_height)
        .title(title);
    frame.render_widget(list, chunks[1]);

    let footer_text = if app.page_count > 1 {
        " j/k: Select | h/l: Images | Enter: Case study | o: Open link | n/p: Page | r: Reload | ?: Help | q: Quit "
    } else {
        " j/k: Select | h/l: Images | Enter: Case study | o: Open link | r: Reload | ?: Help | q: Quit "
    };
    draw_footer(frame, footer_text, chunks[2]);
}

/// Draw the case-study reader
fn draw_case_study(frame: &mut Frame, app: &App, area: Rect, slug: &str) {
    let chunks = frame_chunks(area);

    let title = app.current_project().map_or(slug, |p| p.title.as_str());
    let header = Paragraph::new(format!("Case study · {}", title))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let reader = CaseStudyWidget::new(&app.document, slug)
        .scroll_offset(app.reader_state.scroll_offset());
    frame.render_widget(reader, chunks[1]);

    draw_footer(
        frame,
        " q/Esc: Back | j/k: Scroll | PgUp/PgDn: Page | g/G: Top/Bottom | o: Open link ",
        chunks[2],
    );
}

/// Draw help view showing all keybindings
fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    // The widget records its dimensions; the app keeps its own copy in sync
    let mut help_state = app.help_view_state.clone();
    frame.render_widget(HelpWidget::new(&mut help_state), area);
}

/// Draw a status message at the bottom of the screen
fn draw_status_message(frame: &mut Frame, message: &str, area: Rect) {
    let msg_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width: area
            .width
            .saturating_sub(4)
            .min(message.chars().count() as u16 + 4),
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, msg_area);

    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(status, msg_area);
}

/// Draw error overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(error_widget, popup_area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FolioConfig;
    use crate::domain::{ProjectRecord, Site};
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn app() -> App {
        let mut orbit = ProjectRecord::new("orbit", "Orbit").published("2024-05-01");
        orbit.summary = Some("A habit tracker".to_string());
        orbit.content = Some("## Overview\n\nBuilt in a weekend.".to_string());
        let site = Site::new(PathBuf::from("/tmp/site"), FolioConfig::default());
        let mut app = App::with_source(site, Box::new(vec![orbit]));
        app.init().unwrap();
        app
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_reader_height() {
        assert_eq!(reader_height(Rect::new(0, 0, 80, 30)), 22);
        assert_eq!(reader_height(Rect::new(0, 0, 80, 5)), 0);
    }

    #[test]
    fn test_draw_overview() {
        let text = screen(&app());
        assert!(text.contains("Projects (1)"));
        assert!(text.contains("Orbit"));
        assert!(text.contains("A habit tracker"));
    }

    #[test]
    fn test_draw_case_study() {
        let mut app = app();
        app.open_case_study();
        let text = screen(&app);
        assert!(text.contains("Case study · Orbit"));
        assert!(text.contains("Built in a weekend."));
    }

    #[test]
    fn test_draw_error_overlay() {
        let mut app = app();
        app.error_message = Some("Failed to load projects".to_string());
        assert!(screen(&app).contains("Failed to load projects"));
    }
}
