//! One-line status strip: tab badge, latest message, key hints.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::{Action, Tab};
use crate::components::Component;
use crate::theme::Theme;

const KEY_HINTS: &str = "q·?·1-2";

pub struct StatusBarComponent {
    pub message: String,
    pub current_tab: Tab,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            message: "Welcome to litmus. Pick a file to analyze.".to_string(),
            current_tab: Tab::Analyze,
        }
    }

    fn badge(&self) -> &'static str {
        match self.current_tab {
            Tab::Analyze => " Analyze ",
            Tab::Report => " Report ",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SetStatus(msg) => self.message = msg.clone(),
            Action::ClearStatus => self.message.clear(),
            Action::GoToTab(tab) => self.current_tab = *tab,
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let badge = self.badge();
        let cols = Layout::horizontal([
            Constraint::Length(badge.len() as u16),
            Constraint::Min(0),
            Constraint::Length(KEY_HINTS.chars().count() as u16 + 2),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(badge, Theme::muted())),
            cols[0],
        );

        // Ratatui truncates the paragraph to its column for us.
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {}", self.message),
                Theme::dim(),
            ))),
            cols[1],
        );

        frame.render_widget(
            Paragraph::new(Span::styled(KEY_HINTS, Theme::key_hint()))
                .alignment(Alignment::Right),
            cols[2],
        );
    }
}
