//! Turns crossterm input into Actions.
//!
//! Two keymaps exist: the normal one (global shortcuts) and the editing
//! one (keys feed the path field). Which applies is decided per keypress
//! from an atomic flag the App keeps up to date, since the reader runs
//! on its own task.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::{Action, InputMode, Tab};

const MODE_NORMAL: u8 = 0;
const MODE_EDITING: u8 = 1;

/// App-writable, reader-readable input mode.
pub type InputModeFlag = Arc<AtomicU8>;

pub fn new_input_mode_flag() -> InputModeFlag {
    Arc::new(AtomicU8::new(MODE_NORMAL))
}

pub fn set_input_mode(flag: &InputModeFlag, mode: InputMode) {
    flag.store(
        match mode {
            InputMode::Normal => MODE_NORMAL,
            InputMode::Editing => MODE_EDITING,
        },
        Ordering::Relaxed,
    );
}

fn current_mode(flag: &InputModeFlag) -> InputMode {
    if flag.load(Ordering::Relaxed) == MODE_EDITING {
        InputMode::Editing
    } else {
        InputMode::Normal
    }
}

pub struct EventHandler {
    tx: mpsc::UnboundedSender<Action>,
    tick_rate: Duration,
    mode_flag: InputModeFlag,
}

impl EventHandler {
    pub fn new(
        tx: mpsc::UnboundedSender<Action>,
        tick_rate: Duration,
        mode_flag: InputModeFlag,
    ) -> Self {
        Self {
            tx,
            tick_rate,
            mode_flag,
        }
    }

    /// Read loop; spawn on its own task. Exits when the App drops the
    /// receiving end.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.tick_rate);

        loop {
            let action = tokio::select! {
                _ = ticker.tick() => Some(Action::Tick),
                event = poll_terminal() => {
                    event.and_then(|e| self.translate(e))
                }
            };

            if let Some(action) = action {
                if self.tx.send(action).is_err() {
                    return;
                }
            }
        }
    }

    fn translate(&self, event: Event) -> Option<Action> {
        match event {
            Event::Key(key) => {
                // Ctrl+C quits from either mode.
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    return Some(Action::Quit);
                }
                match current_mode(&self.mode_flag) {
                    InputMode::Editing => editing_key(key),
                    InputMode::Normal => normal_key(key),
                }
            }
            Event::Paste(text) => Some(Action::PasteBulk(text)),
            Event::Resize(_, _) => Some(Action::Tick),
            _ => None,
        }
    }
}

/// Blocking crossterm poll, off the async runtime.
async fn poll_terminal() -> Option<Event> {
    tokio::task::spawn_blocking(|| {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            event::read().ok()
        } else {
            None
        }
    })
    .await
    .ok()
    .flatten()
}

/// Keymap while the path field has focus. Nearly everything is text
/// input; Esc jumps to the report, Tab completes, Enter submits.
fn editing_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') => Some(Action::DeleteWord),
            KeyCode::Char('v') => Some(Action::PasteInput),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::SubmitForm),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::GoToTab(Tab::Report)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::AcceptSuggestion),
        KeyCode::Enter => Some(Action::SubmitForm),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Backspace => Some(Action::BackspaceInput),
        KeyCode::Char(c) => Some(Action::CharInput(c)),
        _ => None,
    }
}

/// Global shortcuts.
fn normal_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('1') => Some(Action::GoToTab(Tab::Analyze)),
        KeyCode::Char('2') => Some(Action::GoToTab(Tab::Report)),
        KeyCode::Right | KeyCode::Tab => Some(Action::NextTab),
        KeyCode::Left | KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}
