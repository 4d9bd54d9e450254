//! Application state and main event loop.

use crate::config::FolioConfig;
use crate::domain::{
    count_visible, select, slug_from_href, CardProps, DisplayRange, ProjectRecord, Site,
};
use crate::error::{AppError, Result};
use crate::services::{ContentSource, LinkLauncher, MarkdownContentSource};
use crate::ui::input::{Action, InputHandler};
use crate::ui::layout;
use crate::ui::markdown::MarkdownRenderer;
use crate::ui::widgets::carousel::CarouselState;
use crate::ui::widgets::case_study::{case_study_lines, ReaderState};
use crate::ui::widgets::help::{HelpViewState, HelpWidget};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Application view state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppView {
    /// Card list of the selected projects
    #[default]
    Overview,
    /// Reading one project's case study
    CaseStudy(String),
    /// Keybinding reference
    Help,
}

/// Main application state
pub struct App {
    /// Site being browsed
    pub site: Site,
    /// Every loaded project, in load order
    pub projects: Vec<ProjectRecord>,
    /// Cards for the current page, in display order
    pub cards: Vec<CardProps>,
    /// Reserved list height while the list is short
    pub min_layout_height: Option<u64>,
    /// Current page (0-based) when pagination is on
    pub page: usize,
    /// Number of pages (1 when pagination is off)
    pub page_count: usize,
    /// Index of the selected card
    pub selected_index: usize,
    /// Slide shown per project
    pub carousel: CarouselState,
    /// Current view
    pub view: AppView,
    /// Rendered case study for the CaseStudy view
    pub document: Vec<Line<'static>>,
    /// Case-study scroll state
    pub reader_state: ReaderState,
    /// Help view scroll state
    pub help_view_state: HelpViewState,
    /// Error message to display
    pub error_message: Option<String>,
    /// Transient status line
    pub status_message: Option<String>,
    /// Should quit
    pub should_quit: bool,
    /// View to return to when help closes
    help_return: AppView,
    content_source: Box<dyn ContentSource>,
    launcher: LinkLauncher,
    input_handler: InputHandler,
    renderer: Option<MarkdownRenderer>,
}

impl App {
    /// Create a new application instance for the site at `site_root`
    pub fn new(site_root: PathBuf) -> Result<Self> {
        let config = FolioConfig::load(Some(&site_root))?;
        let site = Site::new(site_root, config);
        let source = MarkdownContentSource::new(site.content_directory.clone());
        Ok(Self::with_source(site, Box::new(source)))
    }

    /// Create an application reading projects from `content_source`
    pub fn with_source(site: Site, content_source: Box<dyn ContentSource>) -> Self {
        let launcher = LinkLauncher::new(site.config.ui.browser_command.clone());
        let input_handler = InputHandler::new(site.config.ui.vim_navigation);

        Self {
            site,
            projects: Vec::new(),
            cards: Vec::new(),
            min_layout_height: None,
            page: 0,
            page_count: 1,
            selected_index: 0,
            carousel: CarouselState::new(),
            view: AppView::Overview,
            document: Vec::new(),
            reader_state: ReaderState::new(),
            help_view_state: HelpViewState::new(),
            error_message: None,
            status_message: None,
            should_quit: false,
            help_return: AppView::Overview,
            content_source,
            launcher,
            input_handler,
            renderer: None,
        }
    }

    /// Initialize the application (load initial data)
    pub fn init(&mut self) -> Result<()> {
        if !self.site.has_content_directory() {
            tracing::warn!(
                "Content directory {:?} does not exist",
                self.site.content_directory
            );
        }
        self.refresh_projects();
        Ok(())
    }

    /// Reload every project from the content source
    pub fn refresh_projects(&mut self) {
        match self.content_source.load_projects() {
            Ok(projects) => {
                tracing::debug!("Loaded {} projects", projects.len());
                self.projects = projects;
                self.carousel.reset();
                self.recompute();

                // Keep reading the same case study if it still exists
                if let AppView::CaseStudy(slug) = self.view.clone() {
                    if self.render_case_study(&slug).is_none() {
                        self.view = AppView::Overview;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load projects: {}", e);
                self.error_message = Some(format!("Failed to load projects: {}", e));
            }
        }
    }

    /// Rebuild the visible cards from the loaded projects
    pub fn recompute(&mut self) {
        let list = &self.site.config.list;
        let mut options = list.to_selection();

        match list.page_size {
            Some(size) if size > 0 => {
                let visible = count_visible(&self.projects, &options.exclude);
                self.page_count = visible.div_ceil(size).max(1);
                self.page = self.page.min(self.page_count - 1);
                options = options.with_range(DisplayRange::page(self.page, size));
            }
            _ => {
                self.page = 0;
                self.page_count = 1;
            }
        }

        let selection = select(&self.projects, &options);
        let route_prefix = &self.site.config.content.route_prefix;
        self.cards = selection
            .projects
            .iter()
            .map(|record| CardProps::from_record(record, route_prefix))
            .collect();
        self.min_layout_height = selection.min_layout_height;

        if self.selected_index >= self.cards.len() {
            self.selected_index = self.cards.len().saturating_sub(1);
        }
    }

    /// Currently selected card
    pub fn selected_card(&self) -> Option<&CardProps> {
        self.cards.get(self.selected_index)
    }

    /// Project shown by the CaseStudy view
    pub fn current_project(&self) -> Option<&ProjectRecord> {
        match &self.view {
            AppView::CaseStudy(slug) => self.projects.iter().find(|p| &p.slug == slug),
            _ => None,
        }
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < self.cards.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Show the selected card's next image
    pub fn next_slide(&mut self) {
        if let Some(card) = self.cards.get(self.selected_index) {
            self.carousel.next(&card.slug, card.images.len());
        }
    }

    /// Show the selected card's previous image
    pub fn previous_slide(&mut self) {
        if let Some(card) = self.cards.get(self.selected_index) {
            self.carousel.previous(&card.slug, card.images.len());
        }
    }

    /// Go to the next page, if any
    pub fn next_page(&mut self) {
        if self.page + 1 < self.page_count {
            self.page += 1;
            self.selected_index = 0;
            self.recompute();
        }
    }

    /// Go to the previous page, if any
    pub fn previous_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected_index = 0;
            self.recompute();
        }
    }

    /// Open the selected card's case study
    pub fn open_case_study(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        if !card.slots().case_study {
            self.status_message = Some(format!("{} has no case study", card.title));
            return;
        }

        let slug = slug_from_href(&self.site.config.content.route_prefix, &card.href)
            .unwrap_or(card.slug.as_str())
            .to_string();

        match self.render_case_study(&slug) {
            Some(()) => {
                self.reader_state.scroll_to_top();
                self.view = AppView::CaseStudy(slug);
            }
            None => {
                self.error_message = Some(format!("No project found for {}", slug));
            }
        }
    }

    /// Render the case study for `slug` into the document buffer
    fn render_case_study(&mut self, slug: &str) -> Option<()> {
        let record = self.projects.iter().find(|p| p.slug == slug)?;
        let renderer = self.renderer.get_or_insert_with(MarkdownRenderer::new);
        self.document = case_study_lines(record, renderer);
        self.reader_state.set_total_lines(self.document.len());
        Some(())
    }

    /// Close the case study and return to the list
    pub fn close_case_study(&mut self) {
        self.view = AppView::Overview;
        self.document.clear();
    }

    /// Open the external link of the project in focus
    pub fn open_external_link(&mut self) {
        let link = match &self.view {
            AppView::CaseStudy(_) => self
                .current_project()
                .and_then(|p| p.link.as_deref())
                .map(str::trim)
                .filter(|l| !l.is_empty()),
            _ => self.selected_card().and_then(CardProps::external_link),
        };
        let Some(link) = link.map(str::to_string) else {
            self.status_message = Some("This project has no external link".to_string());
            return;
        };

        match self.launcher.open(&link) {
            Ok(()) => self.status_message = Some(format!("Opened {}", link)),
            Err(e) => self.error_message = Some(format!("Failed to open link: {}", e)),
        }
    }

    /// Open help view
    pub fn open_help(&mut self) {
        if self.view != AppView::Help {
            self.help_return = std::mem::replace(&mut self.view, AppView::Help);
            self.help_view_state.scroll_offset = 0;
        }
    }

    /// Close help view
    pub fn close_help(&mut self) {
        self.view = std::mem::take(&mut self.help_return);
    }

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear messages on any key press
        self.error_message = None;
        self.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        let Some(action) = self.input_handler.handle_key(key) else {
            return false;
        };

        match self.view {
            AppView::Overview => self.handle_overview_action(action),
            AppView::CaseStudy(_) => {
                self.handle_case_study_action(action);
                false
            }
            AppView::Help => {
                self.handle_help_action(action);
                false
            }
        }
    }

    /// Handle actions in the project list
    fn handle_overview_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.select_previous(),
            Action::MoveDown => self.select_next(),
            Action::MoveLeft => self.previous_slide(),
            Action::MoveRight => self.next_slide(),
            Action::Home => self.selected_index = 0,
            Action::End => self.selected_index = self.cards.len().saturating_sub(1),
            Action::Select => self.open_case_study(),
            Action::OpenLink => self.open_external_link(),
            Action::NextPage | Action::PageDown => self.next_page(),
            Action::PrevPage | Action::PageUp => self.previous_page(),
            Action::Refresh => self.refresh_projects(),
            Action::Help => self.open_help(),
            Action::Back | Action::Quit => return true,
        }
        false
    }

    /// Handle actions in the case-study reader
    fn handle_case_study_action(&mut self, action: Action) {
        match action {
            Action::MoveUp => self.reader_state.scroll_up(1),
            Action::MoveDown => self.reader_state.scroll_down(1),
            Action::PageUp | Action::PrevPage => self.reader_state.page_up(),
            Action::PageDown | Action::NextPage | Action::Select => self.reader_state.page_down(),
            Action::Home => self.reader_state.scroll_to_top(),
            Action::End => self.reader_state.scroll_to_bottom(),
            Action::OpenLink => self.open_external_link(),
            Action::Refresh => self.refresh_projects(),
            Action::Help => self.open_help(),
            Action::Back | Action::Quit => self.close_case_study(),
            Action::MoveLeft | Action::MoveRight => {}
        }
    }

    /// Handle actions in help view
    fn handle_help_action(&mut self, action: Action) {
        match action {
            Action::Back | Action::Quit | Action::Help => self.close_help(),
            Action::MoveUp => self.help_view_state.scroll_up(1),
            Action::MoveDown => self.help_view_state.scroll_down(1),
            Action::PageUp => self.help_view_state.page_up(),
            Action::PageDown => self.help_view_state.page_down(),
            _ => {}
        }
    }

    /// Keep scroll state in step with the terminal size
    fn sync_viewport(&mut self, area: Rect) {
        self.reader_state
            .set_visible_height(layout::reader_height(area));
        self.help_view_state.total_lines = HelpWidget::line_count();
        self.help_view_state.visible_height = area.height.saturating_sub(2) as usize;
    }

    /// Run the main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.site.config.ui.refresh_rate_ms);
        let mut last_tick = Instant::now();

        // Initial load
        self.init()?;

        loop {
            let size = terminal
                .size()
                .map_err(|e| AppError::Terminal(e.to_string()))?;
            self.sync_viewport(Rect::new(0, 0, size.width, size.height));

            terminal.draw(|f| layout::draw(f, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());

            if event::poll(timeout).map_err(|e| AppError::Terminal(e.to_string()))? {
                match event::read().map_err(|e| AppError::Terminal(e.to_string()))? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            self.should_quit = true;
                        }
                    }
                    Event::Resize(width, height) => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                    }
                    Event::FocusGained | Event::FocusLost => {}
                    Event::Mouse(_) | Event::Paste(_) => {}
                }
            }

            if self.should_quit {
                break;
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}
