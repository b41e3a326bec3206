//! Keybinding overlay, toggled with `?`.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

/// A dialog rect centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn binding(keys: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<20}"), Theme::selected()),
        Span::styled(what.to_string(), Theme::normal()),
    ])
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => self.visible = !self.visible,
            Action::Tick => {}
            // While open, the next keypress dismisses it.
            _ if self.visible => self.visible = false,
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = centered(area, 54, 15);
        frame.render_widget(Clear, dialog);

        let lines = vec![
            Line::from(""),
            binding("q / Ctrl+C", "Quit"),
            binding("?", "Toggle this help"),
            binding("1 / 2", "Jump to tab"),
            binding("Left / Right", "Previous / next tab"),
            binding("Up / Down / j / k", "Scroll / select"),
            Line::from(""),
            Line::from(Span::styled("  While picking a file:", Theme::header())),
            binding("Enter", "Submit for analysis"),
            binding("Tab", "Accept path completion"),
            binding("Ctrl+W", "Delete path component"),
            binding("Esc", "Jump to the report"),
        ];

        let body = Paragraph::new(lines).block(
            Block::default()
                .title(" Keybindings ")
                .title_style(Theme::title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Theme::accent())),
        );
        frame.render_widget(body, dialog);
    }
}
