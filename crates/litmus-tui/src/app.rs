//! Top-level TUI state: tab routing, the action loop, and the async
//! submission plumbing.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Terminal;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use litmus_core::report::build_report;
use litmus_core::LitmusConfig;
use litmus_service::{AnalysisClient, EmbeddedService};

use crate::action::{Action, InputMode, Tab};
use crate::components::help::HelpComponent;
use crate::components::intake::IntakeComponent;
use crate::components::report_view::ReportViewComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

pub struct App {
    current_tab: Tab,
    should_quit: bool,
    /// Shared with the EventHandler so it picks the right keymap.
    input_mode_flag: InputModeFlag,
    config: LitmusConfig,

    // ── Analysis service ─────────────────────────────────────
    /// In-process service, when running embedded.
    service: Option<EmbeddedService>,
    /// HTTP client for analysis calls (shared across async tasks).
    client: Option<Arc<AnalysisClient>>,
    /// Receiver for the background embedded-service startup result.
    service_startup_rx: Option<
        tokio::sync::oneshot::Receiver<Result<(EmbeddedService, Arc<AnalysisClient>), String>>,
    >,

    /// Monotonic submission counter. Completions carrying an older
    /// sequence than the latest submission are stale and dropped.
    submission_seq: u64,

    // Components
    intake: IntakeComponent,
    report: ReportViewComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(config: LitmusConfig) -> Self {
        Self {
            current_tab: Tab::Analyze,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            config,
            service: None,
            client: None,
            service_startup_rx: None,
            submission_seq: 0,
            intake: IntakeComponent::new(),
            report: ReportViewComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Pre-fill the file path from CLI args.
    pub fn set_initial_file(&mut self, path: String) {
        self.intake.set_path(path);
    }

    /// Run the TUI until the user quits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut terminal = setup_terminal()?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let events = EventHandler::new(
            tx.clone(),
            Duration::from_millis(100),
            self.input_mode_flag.clone(),
        );
        tokio::spawn(async move { events.run().await });

        // Service startup happens behind the first frame.
        self.start_service_async(tx.clone());

        // The Analyze tab opens with the path field focused.
        self.sync_input_mode();

        loop {
            terminal.draw(|frame| self.render(frame))?;

            self.poll_service_startup();

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);
                if self.should_quit {
                    break;
                }
            }
        }

        if let Some(ref mut service) = self.service {
            service.shutdown().await;
        }

        restore_terminal(terminal)
    }

    /// Connect to the configured service, or spawn the embedded one in
    /// the background so the TUI renders immediately.
    fn start_service_async(&mut self, tx: mpsc::UnboundedSender<Action>) {
        let timeout = Duration::from_secs(self.config.service.timeout_secs);

        if !self.config.service.embedded {
            let base_url = self.config.service.base_url.clone();
            info!(url = %base_url, "Using external analysis service");
            self.client = Some(Arc::new(AnalysisClient::new(base_url, timeout)));
            return;
        }

        let analyzer = self.config.analyzer.clone();
        let _ = tx.send(Action::SetStatus(
            "Starting analysis service...".to_string(),
        ));

        // Use a oneshot to send the service + client back to the main task.
        let (result_tx, result_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            match EmbeddedService::start(analyzer, 0).await {
                Ok(service) => {
                    let client =
                        Arc::new(AnalysisClient::new(service.base_url().to_string(), timeout));
                    let _ = result_tx.send(Ok((service, client)));
                    let _ = tx.send(Action::SetStatus("Analysis service ready".to_string()));
                }
                Err(e) => {
                    error!("Failed to start embedded service: {}", e);
                    let _ = result_tx.send(Err(format!("{}", e)));
                    let _ = tx.send(Action::SetStatus(format!("Service failed: {}", e)));
                }
            }
        });

        self.service_startup_rx = Some(result_rx);
    }

    /// Collect the embedded-service handle once its startup finishes.
    /// Non-blocking; called every frame until the receiver resolves.
    fn poll_service_startup(&mut self) {
        let Some(rx) = self.service_startup_rx.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok((service, client))) => {
                info!(url = %service.base_url(), "Embedded service is up");
                self.service = Some(service);
                self.client = Some(client);
                self.service_startup_rx = None;
            }
            Ok(Err(e)) => {
                warn!("Embedded service startup failed: {}", e);
                self.service_startup_rx = None;
            }
            Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {}
            Err(tokio::sync::oneshot::error::TryRecvError::Closed) => {
                warn!("Service startup task went away without reporting");
                self.service_startup_rx = None;
            }
        }
    }

    fn sync_input_mode(&self) {
        event::set_input_mode(&self.input_mode_flag, self.current_input_mode());
    }

    /// Which keymap applies given the tab, form focus, and overlay.
    fn current_input_mode(&self) -> InputMode {
        // If help is visible, stay in normal mode so any key closes it.
        if self.help.visible {
            return InputMode::Normal;
        }

        match self.current_tab {
            Tab::Analyze if self.intake.wants_input() => InputMode::Editing,
            _ => InputMode::Normal,
        }
    }

    fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.status_bar.current_tab = tab;
    }

    /// Route one action: global concerns here, the rest to components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::GoToTab(tab) => {
                self.set_tab(*tab);
            }
            Action::NextTab => {
                if let Some(next) = self.current_tab.next() {
                    self.set_tab(next);
                }
            }
            Action::PrevTab => {
                if let Some(prev) = self.current_tab.prev() {
                    self.set_tab(prev);
                }
            }
            Action::SubmitFile { path } => {
                self.spawn_analysis(path.clone(), tx);
            }
            // Stale completions lose the race: a newer submission exists,
            // so they must not touch the display region.
            Action::AnalysisComplete { seq, .. } | Action::AnalysisFailed { seq, .. }
                if *seq != self.submission_seq =>
            {
                debug!(seq, latest = self.submission_seq, "Dropping stale completion");
                return;
            }
            _ => {}
        }

        // Submission lifecycle reaches both tabs regardless of which is
        // active; everything else goes to the active tab's component.
        let result = match action {
            Action::AnalysisStarted { .. }
            | Action::AnalysisComplete { .. }
            | Action::AnalysisFailed { .. } => {
                self.intake.handle_action(action);
                self.report.handle_action(action)
            }
            _ => match self.current_tab {
                Tab::Analyze => self.intake.handle_action(action),
                Tab::Report => self.report.handle_action(action),
            },
        };

        // Always forward to the overlay and status bar.
        self.help.handle_action(action);
        self.status_bar.handle_action(action);

        // Every completion replaces the display region; bring it into view.
        if matches!(
            action,
            Action::AnalysisComplete { .. } | Action::AnalysisFailed { .. }
        ) {
            self.set_tab(Tab::Report);
        }

        // The tab or focus may have moved; republish the keymap.
        self.sync_input_mode();

        if let Some(chained) = result {
            self.handle_action(&chained, tx);
        }
    }

    /// Validate and spawn one analysis submission.
    ///
    /// An empty path never reaches the network: the validation message is
    /// rendered as the report. Each submission bumps the sequence counter
    /// used to drop stale completions.
    fn spawn_analysis(&mut self, path: String, tx: &mpsc::UnboundedSender<Action>) {
        self.submission_seq += 1;
        let seq = self.submission_seq;

        if path.is_empty() {
            let _ = tx.send(Action::AnalysisFailed {
                seq,
                error: "Please select a file first.".to_string(),
            });
            return;
        }

        let Some(client) = self.client.clone() else {
            let _ = tx.send(Action::AnalysisFailed {
                seq,
                error: "Analysis service is not running yet.".to_string(),
            });
            return;
        };

        let _ = tx.send(Action::AnalysisStarted { seq });
        let _ = tx.send(Action::SetStatus(format!("Analyzing {path}...")));

        let out_of = self.config.analyzer.out_of;
        let tx = tx.clone();
        tokio::spawn(async move {
            match client.analyze_file(Path::new(&path)).await {
                Ok(report) => {
                    info!(verdict = %report.verdict, score = report.score, "Analysis complete");
                    let view = build_report(&report, out_of);
                    let verdict = report.verdict;
                    let _ = tx.send(Action::AnalysisComplete {
                        seq,
                        view: Box::new(view),
                    });
                    let _ = tx.send(Action::SetStatus(format!("Verdict: {verdict}")));
                }
                Err(e) => {
                    warn!("Analysis failed: {}", e);
                    let _ = tx.send(Action::AnalysisFailed {
                        seq,
                        error: format!("{}", e),
                    });
                    let _ = tx.send(Action::SetStatus(format!("Analysis failed: {e}")));
                }
            }
        });
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let rows = Layout::vertical([
            Constraint::Length(2), // tab bar
            Constraint::Min(10),   // active tab
            Constraint::Length(1), // status strip
        ])
        .split(area);

        self.render_tabs(frame, rows[0]);

        match self.current_tab {
            Tab::Analyze => self.intake.render(frame, rows[1]),
            Tab::Report => self.report.render(frame, rows[1]),
        }

        self.status_bar.render(frame, rows[2]);

        // Help draws over everything when visible.
        self.help.render(frame, area);
    }

    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|tab| {
                let style = if *tab == self.current_tab {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(tab.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.current_tab.index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> anyhow::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(mut terminal: Term) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}
