//! The analysis report and its display mapping.
//!
//! `AnalysisReport` mirrors the service's JSON response. `build_report`
//! turns one into an ordered list of typed sections; rendering (terminal,
//! plain text) happens elsewhere and consumes the sections as-is.

use serde::{Deserialize, Serialize};

/// Verdict and feedback returned by the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Categorical outcome label. Open set; "Basic" and "Neutral" are
    /// the two values the display rule distinguishes.
    pub verdict: String,

    /// One-line justification for the verdict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict_explanation: Option<String>,

    /// Overall quality score. Displayed against the configured denominator.
    pub score: i64,

    /// Plain feedback lines, always shown in order.
    pub feedback: Vec<String>,

    /// Optional structured breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_feedback: Option<DetailedFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedFeedback {
    #[serde(default)]
    pub good_points: Vec<String>,

    #[serde(default)]
    pub areas_for_improvement: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_explanation: Option<MetricsExplanation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsExplanation {
    pub complexity: String,
    pub maintainability: String,
    pub comments: String,
}

/// Affect of the verdict headline, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Affirmative,
    Cautionary,
    Negative,
}

impl Tone {
    /// Three-way rule: "Basic" is the good outcome, "Neutral" the middle
    /// one, and any other verdict reads as negative.
    pub fn for_verdict(verdict: &str) -> Tone {
        match verdict {
            "Basic" => Tone::Affirmative,
            "Neutral" => Tone::Cautionary,
            _ => Tone::Negative,
        }
    }
}

/// One displayable block of the report, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSection {
    Headline { verdict: String, tone: Tone },
    Explanation(String),
    Score { value: i64, out_of: u32 },
    Strengths(Vec<String>),
    Improvements(Vec<String>),
    Metrics {
        complexity: String,
        maintainability: String,
        comments: String,
    },
    Summary(Vec<String>),
    /// Terminal error display. A failure view contains only this section.
    Failure(String),
}

/// Ordered sections ready for rendering. Replaces the previous view
/// entirely on every submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportView {
    pub sections: Vec<ReportSection>,
}

impl ReportView {
    pub fn is_failure(&self) -> bool {
        matches!(self.sections.first(), Some(ReportSection::Failure(_)))
    }

    /// Plain-text rendering, one consumer of the view-model (the terminal
    /// UI is another). Section order is already display order.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            match section {
                ReportSection::Headline { verdict, .. } => {
                    out.push_str(&format!("Verdict: {verdict}\n"));
                }
                ReportSection::Explanation(text) => {
                    out.push_str(&format!("{text}\n"));
                }
                ReportSection::Score { value, out_of } => {
                    out.push_str(&format!("Overall Score: {value}/{out_of}\n"));
                }
                ReportSection::Strengths(points) => {
                    out.push_str("\nStrengths of Your Code\n");
                    for point in points {
                        out.push_str(&format!("  - {point}\n"));
                    }
                }
                ReportSection::Improvements(points) => {
                    out.push_str("\nAreas for Improvement\n");
                    for point in points {
                        out.push_str(&format!("  - {point}\n"));
                    }
                }
                ReportSection::Metrics {
                    complexity,
                    maintainability,
                    comments,
                } => {
                    out.push_str("\nDetailed Metrics Analysis\n");
                    out.push_str(&format!("  Complexity: {complexity}\n"));
                    out.push_str(&format!("  Maintainability: {maintainability}\n"));
                    out.push_str(&format!("  Comments: {comments}\n"));
                }
                ReportSection::Summary(lines) => {
                    out.push_str("\nQuick Summary\n");
                    for line in lines {
                        out.push_str(&format!("  - {line}\n"));
                    }
                }
                ReportSection::Failure(message) => {
                    out.push_str(&format!("Error: {message}\n"));
                }
            }
        }
        out
    }
}

/// Map a successful response to its display sections.
///
/// Empty optional blocks are omitted entirely rather than rendered empty;
/// the feedback summary is always present and keeps the response order.
pub fn build_report(report: &AnalysisReport, out_of: u32) -> ReportView {
    let mut sections = Vec::new();

    sections.push(ReportSection::Headline {
        verdict: report.verdict.clone(),
        tone: Tone::for_verdict(&report.verdict),
    });

    if let Some(explanation) = &report.verdict_explanation {
        if !explanation.is_empty() {
            sections.push(ReportSection::Explanation(explanation.clone()));
        }
    }

    sections.push(ReportSection::Score {
        value: report.score,
        out_of,
    });

    if let Some(detail) = &report.detailed_feedback {
        if !detail.good_points.is_empty() {
            sections.push(ReportSection::Strengths(detail.good_points.clone()));
        }
        if !detail.areas_for_improvement.is_empty() {
            sections.push(ReportSection::Improvements(
                detail.areas_for_improvement.clone(),
            ));
        }
        if let Some(metrics) = &detail.metrics_explanation {
            sections.push(ReportSection::Metrics {
                complexity: metrics.complexity.clone(),
                maintainability: metrics.maintainability.clone(),
                comments: metrics.comments.clone(),
            });
        }
    }

    sections.push(ReportSection::Summary(report.feedback.clone()));

    ReportView { sections }
}

/// A view holding nothing but the error line.
pub fn error_report(message: impl Into<String>) -> ReportView {
    ReportView {
        sections: vec![ReportSection::Failure(message.into())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(verdict: &str) -> AnalysisReport {
        AnalysisReport {
            verdict: verdict.to_string(),
            verdict_explanation: None,
            score: 0,
            feedback: vec!["line one".into(), "line two".into()],
            detailed_feedback: None,
        }
    }

    #[test]
    fn tone_three_way_rule() {
        assert_eq!(Tone::for_verdict("Basic"), Tone::Affirmative);
        assert_eq!(Tone::for_verdict("Neutral"), Tone::Cautionary);
        assert_eq!(Tone::for_verdict("Acidic"), Tone::Negative);
        assert_eq!(Tone::for_verdict("anything else"), Tone::Negative);
    }

    #[test]
    fn absent_detailed_feedback_renders_headline_score_summary_only() {
        let view = build_report(&minimal("Neutral"), 3);
        assert_eq!(view.sections.len(), 3);
        assert!(matches!(view.sections[0], ReportSection::Headline { .. }));
        assert!(matches!(
            view.sections[1],
            ReportSection::Score { value: 0, out_of: 3 }
        ));
        assert!(matches!(view.sections[2], ReportSection::Summary(_)));
    }

    #[test]
    fn feedback_order_is_preserved() {
        let mut report = minimal("Basic");
        report.feedback = vec!["a".into(), "b".into(), "c".into()];
        let view = build_report(&report, 3);
        let Some(ReportSection::Summary(lines)) = view.sections.last() else {
            panic!("missing summary");
        };
        assert_eq!(lines, &["a", "b", "c"]);
    }

    #[test]
    fn empty_good_points_omit_strengths_block() {
        let mut report = minimal("Basic");
        report.detailed_feedback = Some(DetailedFeedback {
            good_points: vec![],
            areas_for_improvement: vec!["tidy up".into()],
            metrics_explanation: None,
        });
        let view = build_report(&report, 3);
        assert!(!view
            .sections
            .iter()
            .any(|s| matches!(s, ReportSection::Strengths(_))));
        assert!(view
            .sections
            .iter()
            .any(|s| matches!(s, ReportSection::Improvements(_))));
    }

    #[test]
    fn empty_explanation_is_dropped() {
        let mut report = minimal("Basic");
        report.verdict_explanation = Some(String::new());
        let view = build_report(&report, 3);
        assert!(!view
            .sections
            .iter()
            .any(|s| matches!(s, ReportSection::Explanation(_))));
    }

    #[test]
    fn full_basic_response_renders_expected_blocks() {
        // Mirrors the documented scenario: a.py scored 3/3 with one
        // strength, no improvements, full metrics, one summary line.
        let json = r#"{
            "verdict": "Basic",
            "score": 3,
            "feedback": ["Clean style"],
            "detailed_feedback": {
                "good_points": ["Readable"],
                "areas_for_improvement": [],
                "metrics_explanation": {
                    "complexity": "low",
                    "maintainability": "high",
                    "comments": "adequate"
                }
            }
        }"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        let view = build_report(&report, 3);

        assert_eq!(
            view.sections[0],
            ReportSection::Headline {
                verdict: "Basic".into(),
                tone: Tone::Affirmative
            }
        );
        assert_eq!(view.sections[1], ReportSection::Score { value: 3, out_of: 3 });
        assert_eq!(
            view.sections[2],
            ReportSection::Strengths(vec!["Readable".into()])
        );
        assert!(!view
            .sections
            .iter()
            .any(|s| matches!(s, ReportSection::Improvements(_))));
        assert_eq!(
            view.sections[3],
            ReportSection::Metrics {
                complexity: "low".into(),
                maintainability: "high".into(),
                comments: "adequate".into(),
            }
        );
        assert_eq!(
            view.sections[4],
            ReportSection::Summary(vec!["Clean style".into()])
        );
        assert_eq!(view.sections.len(), 5);
    }

    #[test]
    fn error_report_is_a_lone_failure_section() {
        let view = error_report("unsupported file type");
        assert!(view.is_failure());
        assert_eq!(
            view.sections,
            vec![ReportSection::Failure("unsupported file type".into())]
        );
    }

    #[test]
    fn plain_text_failure_is_exactly_one_error_line() {
        let text = error_report("unsupported file type").to_plain_text();
        assert_eq!(text, "Error: unsupported file type\n");
    }

    #[test]
    fn minimal_json_deserializes_with_defaults() {
        let json = r#"{"verdict":"Neutral","score":0,"feedback":[]}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert!(report.verdict_explanation.is_none());
        assert!(report.detailed_feedback.is_none());

        let json = r#"{"verdict":"Acidic","score":-1,"feedback":[],"detailed_feedback":{}}"#;
        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        let detail = report.detailed_feedback.unwrap();
        assert!(detail.good_points.is_empty());
        assert!(detail.metrics_explanation.is_none());
    }
}
