//! Markdown to styled terminal lines, with highlighted code blocks.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use ratatui::prelude::*;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const CODE_THEME: &str = "base16-ocean.dark";
const RULE_WIDTH: usize = 40;

/// Converts case-study markdown into ratatui lines
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with syntect's bundled syntaxes and themes
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme = ThemeSet::load_defaults()
            .themes
            .remove(CODE_THEME)
            .unwrap_or_default();
        Self { syntax_set, theme }
    }

    /// Render `markdown` into owned lines
    pub fn render(&self, markdown: &str) -> Vec<Line<'static>> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_TABLES);

        let mut out = LineBuilder::default();
        let mut code: Option<(String, String)> = None;
        let mut links: Vec<String> = Vec::new();

        for event in Parser::new_ext(markdown, options) {
            if let Some((_, ref mut buffer)) = code {
                match event {
                    Event::Text(text) => {
                        buffer.push_str(&text);
                        continue;
                    }
                    Event::End(Tag::CodeBlock(_)) => {}
                    _ => continue,
                }
            }

            match event {
                Event::Start(Tag::Heading(level, ..)) => {
                    out.flush();
                    out.push_style(heading_style(level));
                }
                Event::End(Tag::Heading(..)) => {
                    out.pop_style();
                    out.flush();
                    out.blank();
                }
                Event::Start(Tag::Paragraph) => {}
                Event::End(Tag::Paragraph) => {
                    out.flush();
                    if out.lists.is_empty() {
                        out.blank();
                    }
                }
                Event::Start(Tag::BlockQuote) => {
                    out.flush();
                    out.quote_depth += 1;
                    out.push_style(
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    );
                }
                Event::End(Tag::BlockQuote) => {
                    out.flush();
                    out.quote_depth = out.quote_depth.saturating_sub(1);
                    out.pop_style();
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    out.flush();
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang.to_string(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(Tag::CodeBlock(_)) => {
                    if let Some((lang, buffer)) = code.take() {
                        for line in self.highlight_code(&lang, &buffer) {
                            out.lines.push(line);
                        }
                    }
                    out.blank();
                }
                Event::Start(Tag::List(start)) => {
                    out.flush();
                    out.lists.push(start);
                }
                Event::End(Tag::List(_)) => {
                    out.flush();
                    out.lists.pop();
                    if out.lists.is_empty() {
                        out.blank();
                    }
                }
                Event::Start(Tag::Item) => {
                    out.flush();
                    let depth = out.lists.len().saturating_sub(1);
                    let marker = match out.lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}. ", n);
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    out.spans.push(Span::raw("  ".repeat(depth)));
                    out.spans
                        .push(Span::styled(marker, Style::default().fg(Color::Yellow)));
                }
                Event::End(Tag::Item) => out.flush(),
                Event::Start(Tag::Emphasis) => out.push_modifier(Modifier::ITALIC),
                Event::Start(Tag::Strong) => out.push_modifier(Modifier::BOLD),
                Event::Start(Tag::Strikethrough) => out.push_modifier(Modifier::CROSSED_OUT),
                Event::End(Tag::Emphasis) | Event::End(Tag::Strong) | Event::End(Tag::Strikethrough) => {
                    out.pop_style()
                }
                Event::Start(Tag::Link(_, dest, _)) => {
                    links.push(dest.to_string());
                    out.push_style(
                        out.style()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    );
                }
                Event::End(Tag::Link(..)) => {
                    out.pop_style();
                    if let Some(dest) = links.pop() {
                        out.spans.push(Span::styled(
                            format!(" ({})", dest),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                }
                Event::Start(Tag::Image(_, dest, _)) => {
                    out.spans.push(Span::styled(
                        format!("[image {}] ", dest),
                        Style::default().fg(Color::Magenta),
                    ));
                    out.push_style(Style::default().fg(Color::DarkGray));
                }
                Event::End(Tag::Image(..)) => out.pop_style(),
                Event::Text(text) => {
                    let style = out.style();
                    out.spans.push(Span::styled(text.to_string(), style));
                }
                Event::Code(text) => {
                    out.spans.push(Span::styled(
                        text.to_string(),
                        Style::default().fg(Color::Green).bg(Color::Indexed(236)),
                    ));
                }
                Event::SoftBreak => out.spans.push(Span::raw(" ")),
                Event::HardBreak => out.flush(),
                Event::Rule => {
                    out.flush();
                    out.lines.push(Line::from(Span::styled(
                        "─".repeat(RULE_WIDTH),
                        Style::default().fg(Color::DarkGray),
                    )));
                    out.blank();
                }
                Event::TaskListMarker(checked) => {
                    let (mark, color) = if checked {
                        ("[x] ", Color::Green)
                    } else {
                        ("[ ] ", Color::DarkGray)
                    };
                    out.spans.push(Span::styled(mark, Style::default().fg(color)));
                }
                Event::End(Tag::TableCell) => out.spans.push(Span::raw("  ")),
                Event::End(Tag::TableHead) | Event::End(Tag::TableRow) => out.flush(),
                Event::End(Tag::Table(_)) => {
                    out.flush();
                    out.blank();
                }
                _ => {}
            }
        }

        out.finish()
    }

    /// Highlight a fenced code block; unknown languages render as plain text
    fn highlight_code(&self, lang: &str, code: &str) -> Vec<Line<'static>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(ranges.into_iter().filter_map(|(style, text)| {
                        let text = text.trim_end_matches(['\n', '\r']);
                        if text.is_empty() {
                            return None;
                        }
                        let fg = style.foreground;
                        Some(Span::styled(
                            text.to_string(),
                            Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                        ))
                    }));
                    Line::from(spans)
                }
                Err(e) => {
                    tracing::debug!("Highlighting failed for {:?}: {}", lang, e);
                    Line::from(format!("  {}", line.trim_end_matches(['\n', '\r'])))
                }
            })
            .collect()
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let color = match level {
        HeadingLevel::H1 => Color::Cyan,
        HeadingLevel::H2 => Color::Blue,
        HeadingLevel::H3 => Color::LightBlue,
        _ => Color::LightCyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Accumulates spans into lines while tracking nesting
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    quote_depth: usize,
}

impl LineBuilder {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, style: Style) {
        self.styles.push(style);
    }

    fn push_modifier(&mut self, modifier: Modifier) {
        let style = self.style().add_modifier(modifier);
        self.styles.push(style);
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    /// Blank separator line, never doubled
    fn blank(&mut self) {
        let last_is_blank = self.lines.last().is_some_and(|l| l.spans.is_empty());
        if !self.lines.is_empty() && !last_is_blank {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}
