//! Code-quality analyzer: complexity, maintainability, and comment
//! coverage, folded into a verdict and a score.
//!
//! Three passes each adjust the score by -1/0/+1 and contribute a
//! feedback line, a strength or improvement entry, and a metrics
//! explanation. The verdict is derived from the final score.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::AnalyzerConfig;
use crate::report::{AnalysisReport, DetailedFeedback, MetricsExplanation};

pub const VERDICT_BASIC: &str = "Basic";
pub const VERDICT_NEUTRAL: &str = "Neutral";
pub const VERDICT_ACIDIC: &str = "Acidic";

static FUNCTION_RE: OnceLock<Regex> = OnceLock::new();
static DECISION_RE: OnceLock<Regex> = OnceLock::new();
static COMMENT_RE: OnceLock<Regex> = OnceLock::new();
static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn function_re() -> &'static Regex {
    FUNCTION_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:pub\s+)?(?:async\s+)?(?:def|fn|func|function)\s+\w+").unwrap()
    })
}

fn decision_re() -> &'static Regex {
    DECISION_RE.get_or_init(|| {
        Regex::new(r"\b(?:if|elif|for|while|case|when|catch|except|and|or)\b|&&|\|\|").unwrap()
    })
}

fn comment_re() -> &'static Regex {
    COMMENT_RE.get_or_init(|| Regex::new(r"#|//").unwrap())
}

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*|\d+|[^\sA-Za-z0-9_]").unwrap())
}

/// Accumulator threaded through the metric passes.
#[derive(Default)]
struct Findings {
    score: i64,
    feedback: Vec<String>,
    good_points: Vec<String>,
    areas_for_improvement: Vec<String>,
    complexity: String,
    maintainability: String,
    comments: String,
}

/// Analyze source text and produce the full report.
pub fn analyze_code(code: &str, cfg: &AnalyzerConfig) -> AnalysisReport {
    if code.trim().is_empty() {
        return empty_code_report();
    }

    let mut findings = Findings::default();
    assess_complexity(code, cfg, &mut findings);
    assess_maintainability(code, cfg, &mut findings);
    assess_comments(code, cfg, &mut findings);

    if findings.areas_for_improvement.is_empty() {
        findings.areas_for_improvement.push(
            "Your code quality is excellent! Consider code reviews and continuous learning to maintain high standards.".to_string(),
        );
    }
    if findings.good_points.is_empty() {
        findings.good_points.push(
            "Every codebase has potential - focus on the improvement areas to enhance quality."
                .to_string(),
        );
    }

    let (verdict, verdict_explanation) = verdict_for_score(findings.score);

    AnalysisReport {
        verdict: verdict.to_string(),
        verdict_explanation: Some(verdict_explanation.to_string()),
        score: findings.score,
        feedback: findings.feedback,
        detailed_feedback: Some(DetailedFeedback {
            good_points: findings.good_points,
            areas_for_improvement: findings.areas_for_improvement,
            metrics_explanation: Some(MetricsExplanation {
                complexity: findings.complexity,
                maintainability: findings.maintainability,
                comments: findings.comments,
            }),
        }),
    }
}

fn empty_code_report() -> AnalysisReport {
    AnalysisReport {
        verdict: VERDICT_ACIDIC.to_string(),
        verdict_explanation: Some("Code file is empty or contains only whitespace.".to_string()),
        score: -3,
        feedback: vec!["Empty or whitespace-only code provided.".to_string()],
        detailed_feedback: Some(DetailedFeedback {
            good_points: vec![],
            areas_for_improvement: vec![
                "Code file is empty or contains only whitespace.".to_string()
            ],
            metrics_explanation: Some(MetricsExplanation {
                complexity: "Cannot analyze empty code.".to_string(),
                maintainability: "Cannot analyze empty code.".to_string(),
                comments: "No code or comments found.".to_string(),
            }),
        }),
    }
}

/// Average decision points per function, cyclomatic-style: each function
/// starts at 1 and every branch/boolean operator adds one. No functions
/// means nothing to penalize.
fn assess_complexity(code: &str, cfg: &AnalyzerConfig, f: &mut Findings) {
    let function_count = function_re().find_iter(code).count();
    let decision_count = decision_re().find_iter(code).count();

    let avg = if function_count > 0 {
        1.0 + decision_count as f64 / function_count as f64
    } else {
        0.0
    };

    if avg > cfg.complexity_high {
        f.score -= 1;
        f.feedback
            .push("High cyclomatic complexity detected.".to_string());
        f.areas_for_improvement.push(format!(
            "Reduce function complexity (average: {avg:.1}, ideal: <{})",
            cfg.complexity_moderate
        ));
        f.complexity = format!(
            "HIGH RISK - average complexity is {avg:.1} across {function_count} functions \
             (target: <{}). Functions this branchy are hard to test and maintain; break \
             them into smaller, single-purpose functions.",
            cfg.complexity_moderate
        );
    } else if avg > cfg.complexity_moderate {
        f.feedback.push("Moderate complexity detected.".to_string());
        f.areas_for_improvement.push(format!(
            "Consider simplifying some functions (average complexity: {avg:.1})"
        ));
        f.complexity = format!(
            "MODERATE - average complexity is {avg:.1} (target: <{}). Acceptable, but \
             simpler functions read and test better.",
            cfg.complexity_moderate
        );
    } else {
        f.score += 1;
        f.feedback
            .push("Functions are clean and simple.".to_string());
        f.good_points.push(format!(
            "Excellent function complexity! Average: {avg:.1} (target: <{})",
            cfg.complexity_moderate
        ));
        f.complexity = format!(
            "EXCELLENT - average complexity is {avg:.1} (target: <{}). Easy to \
             understand, test, and maintain. Functions analyzed: {function_count}.",
            cfg.complexity_moderate
        );
    }
}

/// Maintainability index on the usual 0-100 scale, from a Halstead-volume
/// approximation, decision density, and line count.
fn assess_maintainability(code: &str, cfg: &AnalyzerConfig, f: &mut Findings) {
    let mi = maintainability_index(code);

    if mi < cfg.maintainability_poor {
        f.score -= 1;
        f.feedback.push("Low maintainability index.".to_string());
        f.areas_for_improvement.push(format!(
            "Improve code maintainability (current: {mi:.1}, target: >{})",
            cfg.maintainability_good
        ));
        f.maintainability = format!(
            "POOR - maintainability index {mi:.1}/100 (target: >{}). Scores this low \
             point at oversized functions, unclear names, or missing comments.",
            cfg.maintainability_good
        );
    } else if mi < cfg.maintainability_good {
        f.feedback.push("Average maintainability.".to_string());
        f.areas_for_improvement.push(format!(
            "Good maintainability, but room for improvement (current: {mi:.1}, target: >{})",
            cfg.maintainability_good
        ));
        f.maintainability = format!(
            "AVERAGE - maintainability index {mi:.1}/100 (target: >{}). Reasonable, \
             but clearer structure or naming would lift it.",
            cfg.maintainability_good
        );
    } else {
        f.score += 1;
        f.feedback.push("Excellent maintainability.".to_string());
        f.good_points
            .push(format!("High maintainability score: {mi:.1}/100"));
        f.maintainability = format!(
            "EXCELLENT - maintainability index {mi:.1}/100 (target: >{}). \
             Well-structured, readable code.",
            cfg.maintainability_good
        );
    }
}

/// Comment markers per non-empty line.
fn assess_comments(code: &str, cfg: &AnalyzerConfig, f: &mut Findings) {
    let comment_count = comment_re().find_iter(code).count();
    let non_empty_lines = code.lines().filter(|l| !l.trim().is_empty()).count();
    let ratio = if non_empty_lines > 0 {
        comment_count as f64 / non_empty_lines as f64
    } else {
        0.0
    };
    let pct = ratio * 100.0;
    let low_pct = cfg.comment_ratio_low * 100.0;
    let high_pct = cfg.comment_ratio_high * 100.0;

    if ratio < cfg.comment_ratio_low {
        f.score -= 1;
        f.feedback.push("Insufficient comments.".to_string());
        f.areas_for_improvement.push(format!(
            "Add more comments ({comment_count} comments for {non_empty_lines} lines = \
             {pct:.1}%, target: >{low_pct:.0}%)"
        ));
        f.comments = format!(
            "NEEDS MORE - comment coverage {pct:.1}% ({comment_count} comments over \
             {non_empty_lines} code lines, target: >{low_pct:.0}%). Comment the complex \
             logic, function purposes, and important decisions."
        );
    } else if ratio < cfg.comment_ratio_high {
        f.score += 1;
        f.feedback.push("Good comment coverage.".to_string());
        f.good_points.push(format!(
            "Well-commented code: {pct:.1}% coverage ({comment_count} comments)"
        ));
        f.comments = format!(
            "DECENT - comment coverage {pct:.1}% ({comment_count} comments over \
             {non_empty_lines} code lines, target: >{low_pct:.0}%). Well documented."
        );
    } else {
        f.score += 1;
        f.feedback.push("Excellent comment coverage.".to_string());
        f.good_points.push(format!(
            "Exceptionally well-commented code: {pct:.1}% coverage ({comment_count} comments)"
        ));
        f.comments = format!(
            "EXCELLENT - comment coverage {pct:.1}% ({comment_count} comments over \
             {non_empty_lines} code lines, target: >{high_pct:.0}%). Exceptionally \
             well documented."
        );
    }
}

/// Classic maintainability index, normalized to 0-100:
/// (171 - 5.2*ln(volume) - 0.23*complexity - 16.2*ln(loc)) * 100 / 171.
fn maintainability_index(code: &str) -> f64 {
    let loc = code.lines().filter(|l| !l.trim().is_empty()).count().max(1) as f64;

    let tokens: Vec<&str> = token_re().find_iter(code).map(|m| m.as_str()).collect();
    let total = tokens.len().max(1) as f64;
    let distinct = {
        let mut set: std::collections::HashSet<&str> = std::collections::HashSet::new();
        set.extend(tokens.iter().copied());
        set.len().max(2) as f64
    };
    let volume = total * distinct.log2();

    let decisions = decision_re().find_iter(code).count() as f64;

    let raw = 171.0 - 5.2 * volume.max(1.0).ln() - 0.23 * (decisions + 1.0) - 16.2 * loc.ln();
    (raw * 100.0 / 171.0).clamp(0.0, 100.0)
}

/// Verdict label and explanation for a final score.
pub fn verdict_for_score(score: i64) -> (&'static str, &'static str) {
    match score {
        i64::MIN..=-2 => (VERDICT_ACIDIC, "Significant improvements needed"),
        -1 => (VERDICT_ACIDIC, "Below average quality"),
        0 => (VERDICT_NEUTRAL, "Average code quality"),
        1 => (VERDICT_BASIC, "Good code quality"),
        2 => (VERDICT_BASIC, "High code quality"),
        _ => (VERDICT_BASIC, "Excellent code quality"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    #[test]
    fn empty_code_is_acidic_with_min_score() {
        for code in ["", "   \n\t\n  "] {
            let report = analyze_code(code, &cfg());
            assert_eq!(report.verdict, VERDICT_ACIDIC);
            assert_eq!(report.score, -3);
            assert_eq!(
                report.feedback,
                vec!["Empty or whitespace-only code provided.".to_string()]
            );
            let detail = report.detailed_feedback.unwrap();
            assert!(detail.good_points.is_empty());
            assert!(detail.metrics_explanation.is_some());
        }
    }

    #[test]
    fn verdict_score_boundaries() {
        assert_eq!(verdict_for_score(-3).0, VERDICT_ACIDIC);
        assert_eq!(verdict_for_score(-2), (VERDICT_ACIDIC, "Significant improvements needed"));
        assert_eq!(verdict_for_score(-1), (VERDICT_ACIDIC, "Below average quality"));
        assert_eq!(verdict_for_score(0), (VERDICT_NEUTRAL, "Average code quality"));
        assert_eq!(verdict_for_score(1), (VERDICT_BASIC, "Good code quality"));
        assert_eq!(verdict_for_score(2), (VERDICT_BASIC, "High code quality"));
        assert_eq!(verdict_for_score(3), (VERDICT_BASIC, "Excellent code quality"));
    }

    #[test]
    fn clean_commented_code_scores_basic() {
        let code = "\
# Compute the nth Fibonacci number iteratively.
# Uses constant space.
def fibonacci(n):
    # Seed values
    prev = 0
    curr = 1
    for _ in range(n):
        prev, curr = curr, prev + curr
    # Result for position n
    return prev
";
        let report = analyze_code(code, &cfg());
        assert_eq!(report.verdict, VERDICT_BASIC);
        assert!(report.score >= 1, "score was {}", report.score);
        let detail = report.detailed_feedback.unwrap();
        assert!(!detail.good_points.is_empty());
        // Fallback line appears when nothing needed improvement.
        assert!(!detail.areas_for_improvement.is_empty());
    }

    #[test]
    fn uncommented_code_loses_the_comment_point() {
        let code = "\
def a(x):
    return x + 1

def b(x):
    return x * 2
";
        let report = analyze_code(code, &cfg());
        assert!(report
            .feedback
            .iter()
            .any(|l| l == "Insufficient comments."));
    }

    #[test]
    fn branch_heavy_single_function_reads_as_complex() {
        let mut code = String::from("def tangled(x):\n");
        for i in 0..12 {
            code.push_str(&format!("    if x > {i}:\n        x -= {i}\n"));
        }
        code.push_str("    return x\n");
        let report = analyze_code(&code, &cfg());
        assert!(report
            .feedback
            .iter()
            .any(|l| l == "High cyclomatic complexity detected."));
    }

    #[test]
    fn report_always_carries_detailed_feedback() {
        let report = analyze_code("x = 1\n", &cfg());
        let detail = report.detailed_feedback.expect("detail present");
        assert!(!detail.good_points.is_empty() || !detail.areas_for_improvement.is_empty());
        assert!(detail.metrics_explanation.is_some());
    }
}
