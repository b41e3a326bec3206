//! Action enum, the central message bus for the TUI.
//! All user interactions and async results flow through here.

use litmus_core::report::ReportView;

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Switch to a specific tab.
    GoToTab(Tab),
    /// Move to the next tab.
    NextTab,
    /// Move to the previous tab.
    PrevTab,

    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Display a status message in the status bar.
    SetStatus(String),
    /// Clear the status message.
    ClearStatus,
    /// A tick event for animations and polling.
    Tick,

    // ── Submission lifecycle ────────────────────────────────
    /// User submitted a file path for analysis.
    SubmitFile { path: String },
    /// A submission left validation and its request is in flight.
    AnalysisStarted { seq: u64 },
    /// The analysis completed and the display region must be replaced.
    AnalysisComplete { seq: u64, view: Box<ReportView> },
    /// The analysis ended in a validation, service, or transport error.
    AnalysisFailed { seq: u64, error: String },

    // ── Text input ───────────────────────────────────────────
    /// A character was typed (only sent when in input mode).
    CharInput(char),
    /// Backspace pressed (only sent when in input mode).
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Accept the highlighted path suggestion (Tab in input mode).
    AcceptSuggestion,
    /// Submit the form (Enter / Ctrl+S in editing mode).
    SubmitForm,
    /// Paste text from clipboard (Ctrl+V in editing mode).
    PasteInput,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Scrolling / Selection ───────────────────────────────
    ScrollUp,
    ScrollDown,
    Confirm,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the path field instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are global shortcuts.
    Normal,
    /// Keys go to the path field.
    Editing,
}

/// The two page tabs. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Analyze,
    Report,
}

impl Tab {
    /// Get all tabs in order.
    pub fn all() -> &'static [Tab] {
        &[Tab::Analyze, Tab::Report]
    }

    /// Get the display label for the tab bar.
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Analyze => "1.Analyze",
            Tab::Report => "2.Report",
        }
    }

    /// Get the next tab, if any.
    pub fn next(&self) -> Option<Tab> {
        match self {
            Tab::Analyze => Some(Tab::Report),
            Tab::Report => None,
        }
    }

    /// Get the previous tab, if any.
    pub fn prev(&self) -> Option<Tab> {
        match self {
            Tab::Analyze => None,
            Tab::Report => Some(Tab::Analyze),
        }
    }

    /// Numeric index (0-based).
    pub fn index(&self) -> usize {
        match self {
            Tab::Analyze => 0,
            Tab::Report => 1,
        }
    }
}
