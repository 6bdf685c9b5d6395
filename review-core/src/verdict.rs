//! Single place where verdicts, scores and highlight categories are turned
//! into presentation decisions. Every consumer goes through here so they
//! cannot disagree about what a verdict means.

use shared_types::{
    AnalysisResult, Highlight, Verdict, HIGHLIGHT_EXPLICIT, HIGHLIGHT_HARMFUL, HIGHLIGHT_INJECTION,
};

/// Color family shared by verdicts and score bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Caution,
    Danger,
}

impl Tone {
    pub fn color(&self) -> &'static str {
        match self {
            Tone::Positive => "#4ade80",
            Tone::Caution => "#fbbf24",
            Tone::Danger => "#f87171",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Tone::Positive => "rgba(34, 197, 94, 0.2)",
            Tone::Caution => "rgba(245, 158, 11, 0.2)",
            Tone::Danger => "rgba(239, 68, 68, 0.2)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictStyle {
    pub icon: &'static str,
    pub label: &'static str,
    pub summary: &'static str,
    pub tone: Tone,
}

pub trait Interpret {
    fn style(&self) -> VerdictStyle;
}

impl Interpret for Verdict {
    fn style(&self) -> VerdictStyle {
        match self {
            Verdict::Allow => VerdictStyle {
                icon: "✅",
                label: "ALLOW",
                summary: "Prompt is safe to use",
                tone: Tone::Positive,
            },
            Verdict::NeedsFix => VerdictStyle {
                icon: "⚠️",
                label: "NEEDS FIX",
                summary: "Prompt has moderate issues",
                tone: Tone::Caution,
            },
            Verdict::Block => VerdictStyle {
                icon: "🚫",
                label: "BLOCK",
                summary: "Prompt contains critical issues",
                tone: Tone::Danger,
            },
        }
    }
}

/// Presentation banding of the 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Good,
            60..=79 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ScoreBand::Good => Tone::Positive,
            ScoreBand::Fair => Tone::Caution,
            ScoreBand::Poor => Tone::Danger,
        }
    }
}

/// Filled stars out of five.
pub fn star_rating(score: u8) -> u8 {
    score.min(100) / 20
}

/// Why a prompt was blocked, in notification priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BlockCategory {
    Explicit,
    Harmful,
    Injection,
    Inappropriate,
}

impl BlockCategory {
    /// First category in priority order that any highlight carries.
    pub fn from_highlights(highlights: &[Highlight]) -> Self {
        [
            (HIGHLIGHT_EXPLICIT, BlockCategory::Explicit),
            (HIGHLIGHT_HARMFUL, BlockCategory::Harmful),
            (HIGHLIGHT_INJECTION, BlockCategory::Injection),
        ]
        .into_iter()
        .find(|(kind, _)| highlights.iter().any(|h| h.is(kind)))
        .map(|(_, category)| category)
        .unwrap_or(BlockCategory::Inappropriate)
    }

    fn sentence(&self) -> &'static str {
        match self {
            BlockCategory::Explicit => "It contained explicit or sexual content.",
            BlockCategory::Harmful => "It contained harmful or violent content.",
            BlockCategory::Injection => "It appeared to be a system manipulation attempt.",
            BlockCategory::Inappropriate => "It contained inappropriate language.",
        }
    }

    pub fn notice(&self) -> String {
        format!(
            "⚠️ Your prompt was blocked. {} Please use professional, educational, or creative prompts instead.",
            self.sentence()
        )
    }
}

/// Assistant transcript line summarizing a published result.
pub fn assistant_summary(result: &AnalysisResult) -> String {
    let style = result.verdict.style();
    let follow_up = match result.verdict {
        Verdict::Allow => "Your prompt looks good to send.",
        Verdict::NeedsFix => "I've highlighted the issues and suggested a cleaner version in the analysis panel.",
        Verdict::Block => "I can't help with that prompt. A safer alternative is in the analysis panel.",
    };
    format!(
        "{} {} · Score: {}. {}",
        style.icon, style.label, result.score, follow_up
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_verdict_has_distinct_style() {
        let labels: Vec<_> = Verdict::ALL.iter().map(|v| v.style().label).collect();
        assert_eq!(labels, vec!["ALLOW", "NEEDS FIX", "BLOCK"]);
        assert_eq!(Verdict::Block.style().tone, Tone::Danger);
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_star_rating() {
        assert_eq!(star_rating(42), 2);
        assert_eq!(star_rating(100), 5);
        assert_eq!(star_rating(19), 0);
    }

    #[test]
    fn test_block_category_priority() {
        let all = vec![
            Highlight::new("injection"),
            Highlight::new("harmful"),
            Highlight::new("explicit"),
        ];
        assert_eq!(BlockCategory::from_highlights(&all), BlockCategory::Explicit);

        let two = vec![Highlight::new("injection"), Highlight::new("harmful")];
        assert_eq!(BlockCategory::from_highlights(&two), BlockCategory::Harmful);

        let slang = vec![Highlight::new("slang")];
        assert_eq!(
            BlockCategory::from_highlights(&slang),
            BlockCategory::Inappropriate
        );
        assert_eq!(BlockCategory::from_highlights(&[]), BlockCategory::Inappropriate);
    }

    #[test]
    fn test_harmful_notice_wording() {
        let notice = BlockCategory::Harmful.notice();
        assert!(notice.starts_with("⚠️ Your prompt was blocked."));
        assert!(notice.contains("harmful or violent content"));
    }
}
