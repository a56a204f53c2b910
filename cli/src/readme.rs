//! README preview.
//!
//! `README.md` at the repository root is parsed with pulldown-cmark and
//! flattened into plain terminal text: underlined headings, `-` bullets,
//! indented code blocks and links written as `text <url>`.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use crate::error::Result;

/// File name looked up at the repository root.
pub const README_FILE: &str = "README.md";

/// Text shown when there is nothing to preview.
pub const NO_README: &str = "No README.md found.";

/// Reads `README.md` under `repo`, if present.
pub fn load(repo: &Path) -> Result<Option<String>> {
    let path = repo.join(README_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?))
}

/// Renders markdown as terminal text.
#[must_use]
pub fn render(markdown: &str) -> String {
    let mut renderer = Renderer::default();
    for event in Parser::new(markdown) {
        renderer.event(event);
    }
    let mut out = renderer.out.trim_end().to_string();
    out.push('\n');
    out
}

#[derive(Default)]
struct Renderer {
    out: String,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    links: Vec<String>,
    heading: Option<(HeadingLevel, usize)>,
    in_code_block: bool,
    quote_depth: usize,
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.out.push('`');
                self.out.push_str(&code);
                self.out.push('`');
            }
            Event::Html(html) | Event::InlineHtml(html) => self.out.push_str(&html),
            Event::SoftBreak => self.out.push(' '),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.blank_line();
                self.out.push_str("----");
                self.blank_line();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.blank_line();
                self.heading = Some((level, self.out.len()));
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.blank_line();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.line_start();
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "- ".to_string(),
                };
                self.out.push_str(&marker);
            }
            Tag::CodeBlock(_) => {
                self.blank_line();
                self.in_code_block = true;
            }
            Tag::BlockQuote(_) => {
                self.blank_line();
                self.quote_depth += 1;
                self.out.push_str(&"> ".repeat(self.quote_depth));
            }
            Tag::Emphasis => self.out.push('*'),
            Tag::Strong => self.out.push_str("**"),
            Tag::Link { dest_url, .. } => self.links.push(dest_url.to_string()),
            Tag::Image { dest_url, .. } => {
                self.out.push_str("[image: ");
                self.links.push(dest_url.to_string());
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_line();
                } else {
                    self.line_start();
                }
            }
            TagEnd::Heading(_) => {
                if let Some((level, start)) = self.heading.take() {
                    let width = self.out[start..].chars().count();
                    let rule = if level == HeadingLevel::H1 { "=" } else { "-" };
                    self.out.push('\n');
                    self.out.push_str(&rule.repeat(width));
                }
                self.blank_line();
            }
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.line_start(),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::Emphasis => self.out.push('*'),
            TagEnd::Strong => self.out.push_str("**"),
            TagEnd::Link => {
                if let Some(url) = self.links.pop() {
                    self.out.push_str(&format!(" <{url}>"));
                }
            }
            TagEnd::Image => {
                if let Some(url) = self.links.pop() {
                    self.out.push_str(&format!(" <{url}>]"));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_code_block {
            for line in text.lines() {
                self.out.push_str("    ");
                self.out.push_str(line);
                self.out.push('\n');
            }
        } else {
            self.out.push_str(text);
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        if self.quote_depth > 0 {
            self.out.push_str(&"> ".repeat(self.quote_depth));
        }
    }

    /// Ends the current line unless already at a line start.
    fn line_start(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Leaves exactly one empty line before the next block.
    fn blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        self.line_start();
        if !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}
