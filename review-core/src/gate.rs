//! RecommendationGate - decides when example prompts are offered.

use crate::chat::ChatInputController;
use crate::store::RequestState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedPrompt {
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
    pub category: &'static str,
    pub icon: &'static str,
}

pub const RECOMMENDED_PROMPTS: [RecommendedPrompt; 6] = [
    RecommendedPrompt {
        id: "creative-writing",
        title: "Creative Writing",
        prompt: "Write a creative short story about a robot learning human emotions",
        category: "Creative",
        icon: "🎨",
    },
    RecommendedPrompt {
        id: "educational-content",
        title: "Educational Content",
        prompt: "Explain quantum physics concepts in simple terms for high school students",
        category: "Education",
        icon: "📖",
    },
    RecommendedPrompt {
        id: "code-review",
        title: "Code Review",
        prompt: "Review this Python code for best practices and suggest improvements",
        category: "Programming",
        icon: "💻",
    },
    RecommendedPrompt {
        id: "business-analysis",
        title: "Business Analysis",
        prompt: "Analyze the pros and cons of remote work for tech companies",
        category: "Business",
        icon: "🧠",
    },
    RecommendedPrompt {
        id: "learning-guide",
        title: "Learning Guide",
        prompt: "Create a step-by-step learning plan for mastering machine learning",
        category: "Education",
        icon: "💡",
    },
    RecommendedPrompt {
        id: "professional-communication",
        title: "Professional Communication",
        prompt: "Help me write a professional email to propose a new project to my manager",
        category: "Communication",
        icon: "💬",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView {
    Hidden,
    /// Nothing analyzed yet
    Welcome,
    /// The latest prompt was blocked
    AfterBlock,
}

impl GateView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, GateView::Hidden)
    }

    pub fn heading(&self) -> Option<&'static str> {
        match self {
            GateView::Hidden => None,
            GateView::Welcome => Some("Recommended Prompts:"),
            GateView::AfterBlock => Some("Try these appropriate prompts instead:"),
        }
    }

    pub fn warning(&self) -> Option<&'static str> {
        match self {
            GateView::AfterBlock => Some(
                "⚠️ Your previous prompt contained inappropriate content. Please use professional, educational, or creative prompts instead.",
            ),
            _ => None,
        }
    }
}

/// Stateless: the decision depends only on the store state passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendationGate;

impl RecommendationGate {
    pub fn view(&self, state: &RequestState) -> GateView {
        match state {
            RequestState::Idle => GateView::Welcome,
            RequestState::Success(result) if result.verdict.is_block() => GateView::AfterBlock,
            RequestState::Success(_) | RequestState::Loading | RequestState::Error(_) => {
                GateView::Hidden
            }
        }
    }

    pub fn prompts(&self) -> &'static [RecommendedPrompt] {
        &RECOMMENDED_PROMPTS
    }

    /// Put the recommendation into the input box. Does not analyze it.
    pub fn select(&self, recommendation: &RecommendedPrompt, input: &ChatInputController) {
        input.set_text(recommendation.prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnalysisStore;
    use crate::testing::{result_with, ScriptedService};
    use shared_types::Verdict;
    use std::rc::Rc;

    #[test]
    fn test_visible_exactly_in_idle_and_block() {
        let gate = RecommendationGate;
        let success = |v| RequestState::Success(Rc::new(result_with(v, 50)));

        assert_eq!(gate.view(&RequestState::Idle), GateView::Welcome);
        assert_eq!(gate.view(&success(Verdict::Block)), GateView::AfterBlock);
        assert_eq!(gate.view(&RequestState::Loading), GateView::Hidden);
        assert_eq!(gate.view(&RequestState::Error("x".into())), GateView::Hidden);
        assert_eq!(gate.view(&success(Verdict::Allow)), GateView::Hidden);
        assert_eq!(gate.view(&success(Verdict::NeedsFix)), GateView::Hidden);
    }

    #[test]
    fn test_headings_follow_view() {
        assert_eq!(GateView::Welcome.heading(), Some("Recommended Prompts:"));
        assert!(GateView::Welcome.warning().is_none());
        assert!(GateView::AfterBlock.warning().is_some());
        assert_eq!(GateView::Hidden.heading(), None);
    }

    #[test]
    fn test_select_fills_input_without_analysis() {
        let service = ScriptedService::new();
        let store = AnalysisStore::new(service.clone());
        let input = ChatInputController::new(store.clone(), Default::default());
        let gate = RecommendationGate;

        gate.select(&gate.prompts()[1], &input);

        assert_eq!(
            input.text(),
            "Explain quantum physics concepts in simple terms for high school students"
        );
        assert_eq!(store.current_state(), RequestState::Idle);
        assert_eq!(service.calls(), 0);
    }
}
