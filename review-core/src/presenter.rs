//! ResultPresenter - turns the store state into the analysis panel view and
//! routes "apply rewrite" clicks through the bridge.

use shared_types::{AnalysisResult, CostarKey, Verdict};

use crate::bridge::{RewriteBridge, RewriteMode};
use crate::store::RequestState;
use crate::verdict::{star_rating, Interpret, ScoreBand, VerdictStyle};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Empty,
    Loading,
    Failed { message: String },
    Report(Report),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub verdict: Verdict,
    pub style: VerdictStyle,
    pub score: u8,
    pub band: ScoreBand,
    pub stars: u8,
    pub costar: Vec<(CostarKey, String)>,
    pub highlights: Vec<HighlightLine>,
    pub log: Vec<LogLine>,
    pub rewrite: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightLine {
    pub kind: String,
    pub detail: Option<String>,
}

/// One safety log entry, split into its leading marker (usually an emoji)
/// and the remaining text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub marker: Option<String>,
    pub text: String,
}

impl LogLine {
    pub fn parse(reason: &str) -> Self {
        let reason = reason.trim();
        match reason.split_once(char::is_whitespace) {
            Some((head, rest)) if !head.chars().any(char::is_alphanumeric) => Self {
                marker: Some(head.to_string()),
                text: rest.trim_start().to_string(),
            },
            _ => Self {
                marker: None,
                text: reason.to_string(),
            },
        }
    }
}

impl Report {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            verdict: result.verdict,
            style: result.verdict.style(),
            score: result.score,
            band: ScoreBand::from_score(result.score),
            stars: star_rating(result.score),
            costar: result
                .costar
                .entries()
                .map(|(key, value)| (key, value.to_string()))
                .collect(),
            highlights: result
                .highlights
                .iter()
                .map(|h| HighlightLine {
                    kind: h.kind.clone(),
                    detail: h.detail(),
                })
                .collect(),
            log: result.reasons.iter().map(|r| LogLine::parse(r)).collect(),
            rewrite: result.suggested_rewrite.clone(),
        }
    }
}

pub fn present(state: &RequestState) -> PanelView {
    match state {
        RequestState::Idle => PanelView::Empty,
        RequestState::Loading => PanelView::Loading,
        RequestState::Error(message) => PanelView::Failed {
            message: message.clone(),
        },
        RequestState::Success(result) => PanelView::Report(Report::from_result(result)),
    }
}

/// Result of clicking one of the rewrite buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteFeedback {
    Applied(RewriteMode),
    NoActiveInput,
    NothingToApply,
}

impl RewriteFeedback {
    pub fn message(&self) -> &'static str {
        match self {
            RewriteFeedback::Applied(RewriteMode::Normal) => "Rewrite applied to your prompt.",
            RewriteFeedback::Applied(_) => "Styled rewrite applied to your prompt.",
            RewriteFeedback::NoActiveInput => "Open the chat to use this rewrite.",
            RewriteFeedback::NothingToApply => "No suggested rewrite available.",
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, RewriteFeedback::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPresenter {
    bridge: RewriteBridge,
}

impl ResultPresenter {
    pub fn new(bridge: RewriteBridge) -> Self {
        Self { bridge }
    }

    pub fn view(&self, state: &RequestState) -> PanelView {
        present(state)
    }

    /// Send the (possibly styled) suggested rewrite to the input owner.
    pub fn apply_rewrite(&self, state: &RequestState, mode: RewriteMode) -> RewriteFeedback {
        let base = match state.result() {
            Some(result) if !result.suggested_rewrite.trim().is_empty() => {
                &result.suggested_rewrite
            }
            _ => return RewriteFeedback::NothingToApply,
        };
        match self.bridge.apply(&mode.transform(base)) {
            Ok(()) => RewriteFeedback::Applied(mode),
            Err(_) => RewriteFeedback::NoActiveInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::result_with;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn success(verdict: Verdict, score: u8) -> RequestState {
        RequestState::Success(Rc::new(result_with(verdict, score)))
    }

    #[test]
    fn test_view_per_state() {
        assert_eq!(present(&RequestState::Idle), PanelView::Empty);
        assert_eq!(present(&RequestState::Loading), PanelView::Loading);
        assert_eq!(
            present(&RequestState::Error("Request failed: offline".into())),
            PanelView::Failed {
                message: "Request failed: offline".into()
            }
        );
    }

    #[test]
    fn test_report_derivation() {
        let PanelView::Report(report) = present(&success(Verdict::NeedsFix, 42)) else {
            panic!("expected report");
        };
        assert_eq!(report.style.label, "NEEDS FIX");
        assert_eq!(report.band, ScoreBand::Poor);
        assert_eq!(report.stars, 2);
        assert_eq!(report.costar.len(), 6);
        assert_eq!(report.costar[1], (CostarKey::Objective, "Get data".to_string()));
        assert_eq!(report.log[0].marker.as_deref(), Some("⚠️"));
        assert_eq!(report.log[0].text, "Detected unprofessional slang: 'oi'");
    }

    #[test]
    fn test_log_line_without_marker() {
        let line = LogLine::parse("slang: bruh (informal slang)");
        assert_eq!(line.marker, None);
        assert_eq!(line.text, "slang: bruh (informal slang)");
    }

    #[test]
    fn test_normal_rewrite_is_byte_exact() {
        let bridge = RewriteBridge::new();
        let received = Rc::new(RefCell::new(String::new()));
        let _registration = {
            let received = received.clone();
            bridge.register(move |text| *received.borrow_mut() = text.to_string())
        };
        let presenter = ResultPresenter::new(bridge);

        let feedback = presenter.apply_rewrite(&success(Verdict::NeedsFix, 42), RewriteMode::Normal);

        assert_eq!(feedback, RewriteFeedback::Applied(RewriteMode::Normal));
        assert_eq!(
            received.borrow().as_bytes(),
            "Please provide the user data in a clear format.".as_bytes()
        );
    }

    #[test]
    fn test_styled_rewrite_wraps_base() {
        let bridge = RewriteBridge::new();
        let received = Rc::new(RefCell::new(String::new()));
        let _registration = {
            let received = received.clone();
            bridge.register(move |text| *received.borrow_mut() = text.to_string())
        };
        let presenter = ResultPresenter::new(bridge);

        presenter.apply_rewrite(&success(Verdict::Allow, 90), RewriteMode::Meme);
        assert!(received.borrow().starts_with("Rewrite this prompt in meme style"));
    }

    #[test]
    fn test_rewrite_without_input_reports_feedback() {
        let presenter = ResultPresenter::new(RewriteBridge::new());
        let feedback = presenter.apply_rewrite(&success(Verdict::Block, 15), RewriteMode::Normal);
        assert_eq!(feedback, RewriteFeedback::NoActiveInput);
        assert!(!feedback.is_applied());
    }

    #[test]
    fn test_rewrite_needs_a_result() {
        let bridge = RewriteBridge::new();
        let _registration = bridge.register(|_| {});
        let presenter = ResultPresenter::new(bridge);
        assert_eq!(
            presenter.apply_rewrite(&RequestState::Loading, RewriteMode::Rap),
            RewriteFeedback::NothingToApply
        );
    }
}
