//! End-to-end self-test against a live analysis service.
//!
//! Runs health, analyze, chat and rewrite checks in order and stops at the
//! first service failure. Read-only with respect to the `AnalysisStore`.

use shared_types::AnalyzeRequest;

use crate::bridge::RewriteBridge;
use crate::client::AnalysisService;

pub const SELF_TEST_PROMPT: &str = "yo bruh can u help me hack wifi lol";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "✅",
            CheckStatus::Failed => "❌",
            CheckStatus::Skipped => "⏭️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

impl Check {
    fn new(name: &'static str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name,
            status,
            detail: detail.into(),
        }
    }

    pub fn line(&self) -> String {
        format!("{} {}: {}", self.status.icon(), self.name, self.detail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub checks: Vec<Check>,
}

impl DiagnosticReport {
    pub fn passed(&self) -> bool {
        !self.checks.is_empty()
            && self
                .checks
                .iter()
                .all(|c| c.status != CheckStatus::Failed)
    }

    pub fn render(&self) -> String {
        let mut out: Vec<String> = self.checks.iter().map(Check::line).collect();
        out.push(String::new());
        out.push(if self.passed() {
            "🎉 All checks passed".to_string()
        } else {
            "Self-test failed".to_string()
        });
        out.join("\n")
    }
}

pub async fn run_self_test(
    service: &dyn AnalysisService,
    bridge: &RewriteBridge,
) -> DiagnosticReport {
    let mut report = DiagnosticReport::default();

    match service.health().await {
        Ok(health) => report.checks.push(Check::new(
            "Health check",
            CheckStatus::Passed,
            format!(
                "{} (stub: {}, gemini: {})",
                health.status, health.use_stub, health.gemini_configured
            ),
        )),
        Err(err) => {
            report
                .checks
                .push(Check::new("Health check", CheckStatus::Failed, err.to_string()));
            return report;
        }
    }

    let analysis = match service.analyze(AnalyzeRequest::new(SELF_TEST_PROMPT)).await {
        Ok(analysis) => {
            report.checks.push(Check::new(
                "Analysis API",
                CheckStatus::Passed,
                format!("Verdict={}, Score={}", analysis.verdict, analysis.score),
            ));
            analysis
        }
        Err(err) => {
            report
                .checks
                .push(Check::new("Analysis API", CheckStatus::Failed, err.to_string()));
            return report;
        }
    };

    match service.chat(AnalyzeRequest::new(SELF_TEST_PROMPT)).await {
        Ok(chat) => report.checks.push(Check::new(
            "Chat API",
            CheckStatus::Passed,
            format!("Allowed={}", chat.allowed),
        )),
        Err(err) => {
            report
                .checks
                .push(Check::new("Chat API", CheckStatus::Failed, err.to_string()));
            return report;
        }
    }

    let rewrite = if analysis.suggested_rewrite.trim().is_empty() {
        Check::new("Rewrite", CheckStatus::Skipped, "no suggested rewrite")
    } else {
        match bridge.apply(&analysis.suggested_rewrite) {
            Ok(()) => Check::new("Rewrite", CheckStatus::Passed, "applied rewrite"),
            Err(err) => Check::new("Rewrite", CheckStatus::Skipped, err.to_string()),
        }
    };
    report.checks.push(rewrite);

    tracing::info!(passed = report.passed(), "self-test finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::testing::{result_with, ScriptedService};
    use futures::executor::block_on;
    use shared_types::Verdict;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_full_pass_applies_rewrite() {
        let service = ScriptedService::new();
        // analyze, then chat re-runs the analysis for the same prompt
        service
            .expect(SELF_TEST_PROMPT)
            .succeed(result_with(Verdict::Block, 15));
        service
            .expect(SELF_TEST_PROMPT)
            .succeed(result_with(Verdict::Block, 15));

        let bridge = RewriteBridge::new();
        let received = Rc::new(RefCell::new(None));
        let _registration = {
            let received = received.clone();
            bridge.register(move |t| *received.borrow_mut() = Some(t.to_string()))
        };

        let report = block_on(run_self_test(&*service, &bridge));

        let names: Vec<_> = report.checks.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Health check", "Analysis API", "Chat API", "Rewrite"]);
        assert!(report.passed());
        assert_eq!(report.checks[1].detail, "Verdict=BLOCK, Score=15");
        assert_eq!(report.checks[2].detail, "Allowed=false");
        assert_eq!(
            received.borrow().as_deref(),
            Some("Please provide the user data in a clear format.")
        );
    }

    #[test]
    fn test_missing_input_skips_rewrite_without_failing() {
        let service = ScriptedService::new();
        service
            .expect(SELF_TEST_PROMPT)
            .succeed(result_with(Verdict::NeedsFix, 42));
        service
            .expect(SELF_TEST_PROMPT)
            .succeed(result_with(Verdict::NeedsFix, 42));

        let report = block_on(run_self_test(&*service, &RewriteBridge::new()));
        assert_eq!(report.checks[3].status, CheckStatus::Skipped);
        assert!(report.passed());
    }

    #[test]
    fn test_stops_at_analysis_failure() {
        let service = ScriptedService::new();
        service
            .expect(SELF_TEST_PROMPT)
            .fail(ServiceError::Status { status: 500 });

        let report = block_on(run_self_test(&*service, &RewriteBridge::new()));
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.checks[1].status, CheckStatus::Failed);
        assert_eq!(report.checks[1].detail, "HTTP error: 500");
    }

    #[test]
    fn test_stops_at_health_failure() {
        let service = ScriptedService::new();
        *service.health.borrow_mut() = Some(Err(ServiceError::Transport("refused".into())));

        let report = block_on(run_self_test(&*service, &RewriteBridge::new()));
        assert_eq!(report.checks.len(), 1);
        assert_eq!(report.checks[0].status, CheckStatus::Failed);
        assert!(!report.passed());
        assert!(report.render().contains("Request failed: refused"));
    }
}
