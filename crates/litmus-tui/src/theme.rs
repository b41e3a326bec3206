//! Palette and styles. The three verdict tones land on the
//! success/warning/error colors.

use litmus_core::report::Tone;
use ratatui::style::{Color, Modifier, Style};

const FG: Color = Color::Rgb(205, 205, 200);
const FG_DIM: Color = Color::Rgb(105, 105, 100);
const FG_MUTED: Color = Color::Rgb(145, 145, 140);
const BORDER: Color = Color::Rgb(62, 62, 58);

const ACCENT: Color = Color::Rgb(120, 175, 250);
const GREEN: Color = Color::Rgb(90, 200, 125);
const AMBER: Color = Color::Rgb(232, 178, 75);
const RED: Color = Color::Rgb(238, 85, 78);

pub struct Theme;

impl Theme {
    pub fn bg() -> Color {
        Color::Reset
    }

    pub fn accent() -> Color {
        ACCENT
    }

    pub fn success() -> Color {
        GREEN
    }

    pub fn warning() -> Color {
        AMBER
    }

    pub fn error() -> Color {
        RED
    }

    /// Affirmative green, cautionary amber, negative red.
    pub fn tone_color(tone: Tone) -> Color {
        match tone {
            Tone::Affirmative => GREEN,
            Tone::Cautionary => AMBER,
            Tone::Negative => RED,
        }
    }

    pub fn title() -> Style {
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::new().fg(FG).add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::new().fg(FG)
    }

    pub fn dim() -> Style {
        Style::new().fg(FG_DIM)
    }

    pub fn muted() -> Style {
        Style::new().fg(FG_MUTED)
    }

    pub fn border() -> Style {
        Style::new().fg(BORDER)
    }

    pub fn key_hint() -> Style {
        Style::new().fg(ACCENT)
    }

    pub fn tab_active() -> Style {
        Style::new()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive() -> Style {
        Style::new().fg(FG_DIM)
    }
}
