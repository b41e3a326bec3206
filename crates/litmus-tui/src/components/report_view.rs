//! Report tab: the display region.
//!
//! Holds at most one report view; every completed submission replaces it
//! wholesale. While a submission is in flight an "Analyzing..."
//! placeholder is shown instead.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use litmus_core::report::{ReportSection, ReportView};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct ReportViewComponent {
    /// The most recent report, replaced entirely on each completion.
    pub view: Option<ReportView>,
    /// Whether a submission is in flight.
    pub analyzing: bool,
    /// Vertical scroll offset.
    scroll: u16,
}

impl ReportViewComponent {
    pub fn new() -> Self {
        Self {
            view: None,
            analyzing: false,
            scroll: 0,
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let Some(view) = &self.view else {
            return vec![Line::from(Span::styled(
                "No report yet. Submit a file in the Analyze tab.",
                Theme::dim(),
            ))];
        };

        let mut lines = Vec::new();
        for section in &view.sections {
            match section {
                ReportSection::Headline { verdict, tone } => {
                    lines.push(Line::from(vec![
                        Span::styled("Verdict: ", Theme::header()),
                        Span::styled(
                            verdict.clone(),
                            Style::default()
                                .fg(Theme::tone_color(*tone))
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
                ReportSection::Explanation(text) => {
                    lines.push(Line::from(Span::styled(
                        text.clone(),
                        Theme::muted().add_modifier(Modifier::ITALIC),
                    )));
                }
                ReportSection::Score { value, out_of } => {
                    lines.push(Line::from(vec![
                        Span::styled("Overall Score: ", Theme::header()),
                        Span::styled(format!("{value}/{out_of}"), Theme::normal()),
                    ]));
                }
                ReportSection::Strengths(points) => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Strengths of Your Code",
                        Style::default()
                            .fg(Theme::success())
                            .add_modifier(Modifier::BOLD),
                    )));
                    for point in points {
                        lines.push(Line::from(Span::styled(
                            format!("  • {point}"),
                            Theme::normal(),
                        )));
                    }
                }
                ReportSection::Improvements(points) => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Areas for Improvement",
                        Style::default()
                            .fg(Theme::error())
                            .add_modifier(Modifier::BOLD),
                    )));
                    for point in points {
                        lines.push(Line::from(Span::styled(
                            format!("  • {point}"),
                            Theme::normal(),
                        )));
                    }
                }
                ReportSection::Metrics {
                    complexity,
                    maintainability,
                    comments,
                } => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Detailed Metrics Analysis",
                        Style::default()
                            .fg(Theme::accent())
                            .add_modifier(Modifier::BOLD),
                    )));
                    for (label, text) in [
                        ("Complexity", complexity),
                        ("Maintainability", maintainability),
                        ("Comments", comments),
                    ] {
                        lines.push(Line::from(vec![
                            Span::styled(format!("  {label}: "), Theme::header()),
                            Span::styled(text.clone(), Theme::normal()),
                        ]));
                    }
                }
                ReportSection::Summary(entries) => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        "Quick Summary",
                        Style::default()
                            .fg(Theme::warning())
                            .add_modifier(Modifier::BOLD),
                    )));
                    for entry in entries {
                        lines.push(Line::from(Span::styled(
                            format!("  • {entry}"),
                            Theme::normal(),
                        )));
                    }
                }
                ReportSection::Failure(message) => {
                    lines.push(Line::from(Span::styled(
                        format!("Error: {message}"),
                        Style::default()
                            .fg(Theme::error())
                            .add_modifier(Modifier::BOLD),
                    )));
                }
            }
        }
        lines
    }
}

impl Component for ReportViewComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::AnalysisStarted { .. } => {
                self.analyzing = true;
                None
            }
            Action::AnalysisComplete { view, .. } => {
                self.analyzing = false;
                self.scroll = 0;
                self.view = Some(*view.clone());
                None
            }
            Action::AnalysisFailed { error, .. } => {
                self.analyzing = false;
                self.scroll = 0;
                self.view = Some(litmus_core::error_report(error.clone()));
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.analyzing {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "Analyzing...",
                Theme::muted().add_modifier(Modifier::ITALIC),
            )))
            .centered();
            frame.render_widget(placeholder, area);
            return;
        }

        let paragraph = Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}
