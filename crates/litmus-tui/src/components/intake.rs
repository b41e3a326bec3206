//! Analyze tab: a single path field with filesystem completion.
//! Enter submits the file, Tab completes, Up/Down move the highlight.

use std::path::PathBuf;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

const MAX_CANDIDATES: usize = 8;

/// One completion candidate under the directory being typed.
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    label: String,
    is_dir: bool,
}

pub struct IntakeComponent {
    pub path_input: String,
    /// Byte offset of the cursor within `path_input`.
    pub cursor: usize,
    /// True while a submission is in flight; blocks typing and resubmits.
    pub submitting: bool,

    candidates: Vec<Candidate>,
    highlight: Option<usize>,
}

impl IntakeComponent {
    pub fn new() -> Self {
        let mut this = Self {
            path_input: "~/".to_string(),
            cursor: 2,
            submitting: false,
            candidates: Vec::new(),
            highlight: None,
        };
        this.recomplete();
        this
    }

    pub fn wants_input(&self) -> bool {
        !self.submitting
    }

    /// Pre-fill the path (from CLI args).
    pub fn set_path(&mut self, path: String) {
        self.cursor = path.len();
        self.path_input = path;
        self.recomplete();
    }

    fn insert_char(&mut self, c: char) {
        self.cursor = self.cursor.min(self.path_input.len());
        self.path_input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        self.cursor = self.cursor.min(self.path_input.len());
        if let Some((idx, _)) = self.path_input[..self.cursor].char_indices().next_back() {
            self.path_input.remove(idx);
            self.cursor = idx;
        }
    }

    /// Ctrl+W: drop the path component before the cursor, slashes included.
    fn delete_component(&mut self) {
        self.cursor = self.cursor.min(self.path_input.len());
        let head = &self.path_input[..self.cursor];
        let trimmed = head.trim_end_matches('/');
        let start = trimmed.rfind('/').map(|i| i + 1).unwrap_or(0);
        self.path_input.drain(start..self.cursor);
        self.cursor = start;
    }

    fn insert_str(&mut self, s: &str) {
        self.cursor = self.cursor.min(self.path_input.len());
        self.path_input.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    fn expand_tilde(input: &str) -> String {
        match (input.strip_prefix('~'), dirs::home_dir()) {
            (Some(rest), Some(home)) => format!("{}{rest}", home.display()),
            _ => input.to_string(),
        }
    }

    /// Recompute completion candidates for the current input.
    fn recomplete(&mut self) {
        self.highlight = None;
        self.candidates = complete(&Self::expand_tilde(&self.path_input));
    }

    /// Replace the input with the highlighted candidate (or the first).
    fn take_candidate(&mut self) {
        let idx = self.highlight.unwrap_or(0);
        let Some(candidate) = self.candidates.get(idx) else {
            return;
        };
        self.path_input = candidate.path.to_string_lossy().to_string();
        if candidate.is_dir {
            self.path_input.push('/');
        }
        self.cursor = self.path_input.len();
        self.recomplete();
    }

    fn move_highlight(&mut self, down: bool) {
        if self.candidates.is_empty() {
            return;
        }
        self.highlight = match (self.highlight, down) {
            (None, true) => Some(0),
            (Some(i), true) => Some((i + 1).min(self.candidates.len() - 1)),
            (None, false) | (Some(0), false) => None,
            (Some(i), false) => Some(i - 1),
        };
    }

    /// Hand the (tilde-expanded) path to the App. The path may be empty;
    /// validation and the resulting message live there, not here.
    fn submit(&mut self) -> Option<Action> {
        if self.submitting {
            return None;
        }
        self.candidates.clear();
        self.highlight = None;
        Some(Action::SubmitFile {
            path: Self::expand_tilde(self.path_input.trim()),
        })
    }
}

/// List completion candidates for a partially typed path: entries of the
/// directory part whose names start with the file part. Hidden entries
/// only show up once a leading dot is typed. Directories sort first.
fn complete(input: &str) -> Vec<Candidate> {
    if input.is_empty() {
        return Vec::new();
    }

    let (dir, prefix) = if input.ends_with('/') {
        (PathBuf::from(input), String::new())
    } else {
        match input.rsplit_once('/') {
            Some((dir, name)) => (PathBuf::from(format!("{dir}/")), name.to_string()),
            None => (PathBuf::from("."), input.to_string()),
        }
    };

    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let prefix_lower = prefix.to_lowercase();

    let mut found: Vec<Candidate> = entries
        .flatten()
        .filter_map(|entry| {
            let label = entry.file_name().to_string_lossy().to_string();
            if label.starts_with('.') && !prefix.starts_with('.') {
                return None;
            }
            if !label.to_lowercase().starts_with(&prefix_lower) {
                return None;
            }
            let path = entry.path();
            let is_dir = path.is_dir();
            Some(Candidate {
                path,
                label,
                is_dir,
            })
        })
        .collect();

    found.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.label.cmp(&b.label))
    });
    found.truncate(MAX_CANDIDATES);
    found
}

impl Component for IntakeComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CharInput(c) => {
                self.insert_char(*c);
                self.recomplete();
            }
            Action::BackspaceInput => {
                self.backspace();
                self.recomplete();
            }
            Action::DeleteWord => {
                self.delete_component();
                self.recomplete();
            }
            Action::PasteInput => {
                if let Ok(out) = std::process::Command::new("pbpaste").output() {
                    if let Ok(text) = String::from_utf8(out.stdout) {
                        if let Some(line) = text.lines().next().filter(|l| !l.is_empty()) {
                            self.insert_str(line);
                            self.recomplete();
                        }
                    }
                }
            }
            Action::PasteBulk(text) => {
                // Paths are single-line; take the first line of the paste.
                if let Some(line) = text.lines().next().filter(|l| !l.is_empty()) {
                    self.insert_str(line);
                    self.recomplete();
                }
            }

            Action::AcceptSuggestion => self.take_candidate(),
            Action::ScrollDown => self.move_highlight(true),
            Action::ScrollUp => self.move_highlight(false),

            Action::SubmitForm | Action::Confirm => {
                if self.highlight.is_some() {
                    self.take_candidate();
                } else {
                    return self.submit();
                }
            }

            Action::AnalysisStarted { .. } => self.submitting = true,
            Action::AnalysisComplete { .. } | Action::AnalysisFailed { .. } => {
                self.submitting = false
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let dropdown_height = if self.candidates.is_empty() {
            0
        } else {
            self.candidates.len() as u16 + 2
        };

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(dropdown_height),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

        let focused = self.wants_input();
        let field_block = Block::default()
            .title(" Source File ")
            .title_style(if focused {
                Theme::key_hint()
            } else {
                Theme::muted()
            })
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Theme::accent())
            } else {
                Theme::border()
            });
        frame.render_widget(self.field_line(focused).block(field_block), rows[0]);

        if !self.candidates.is_empty() {
            let items: Vec<ListItem> = self
                .candidates
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let style = if self.highlight == Some(i) {
                        Style::default()
                            .fg(Theme::bg())
                            .bg(Theme::accent())
                            .add_modifier(Modifier::BOLD)
                    } else if c.is_dir {
                        Style::default().fg(Theme::accent())
                    } else {
                        Theme::normal()
                    };
                    let suffix = if c.is_dir { "/" } else { "" };
                    ListItem::new(Span::styled(format!(" {}{suffix}", c.label), style))
                })
                .collect();
            let dropdown = Block::default()
                .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                .border_style(Theme::border());
            frame.render_widget(List::new(items).block(dropdown), rows[1]);
        }

        let hint = if self.submitting {
            Line::from(Span::styled("Analyzing...", Theme::muted()))
        } else {
            Line::from(vec![
                Span::styled("Enter", Theme::key_hint()),
                Span::styled(" submit   ", Theme::dim()),
                Span::styled("Tab", Theme::key_hint()),
                Span::styled(" complete   ", Theme::dim()),
                Span::styled("↑/↓", Theme::key_hint()),
                Span::styled(" pick", Theme::dim()),
            ])
        };
        frame.render_widget(Paragraph::new(hint), rows[2]);
    }
}

impl IntakeComponent {
    /// The field text with a block cursor when focused.
    fn field_line(&self, focused: bool) -> Paragraph<'_> {
        if !focused {
            return Paragraph::new(Span::styled(self.path_input.as_str(), Theme::normal()));
        }

        let pos = self.cursor.min(self.path_input.len());
        let before = &self.path_input[..pos];
        let mut tail = self.path_input[pos..].chars();
        let under_cursor = tail.next().map(String::from).unwrap_or_else(|| " ".into());
        let after: String = tail.collect();

        Paragraph::new(Line::from(vec![
            Span::styled(before, Theme::normal()),
            Span::styled(
                under_cursor,
                Style::default().fg(Theme::bg()).bg(Theme::accent()),
            ),
            Span::styled(after, Theme::normal()),
        ]))
    }
}
