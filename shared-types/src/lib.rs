//! Shared types between the review front-end and the analysis service
//!
//! These types are used by both:
//! - the platform-neutral orchestration layer (`review-core`)
//! - Dioxus components (WASM)
//!
//! Serializable with serde for JSON over HTTP. Field names follow the
//! analysis service wire format exactly.

use serde::{Deserialize, Serialize};

// ============================================================================
// Verdict
// ============================================================================

/// Closed three-way classification of a submitted prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Allow,
    NeedsFix,
    Block,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Allow, Verdict::NeedsFix, Verdict::Block];

    /// Wire spelling (`ALLOW`, `NEEDS_FIX`, `BLOCK`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::NeedsFix => "NEEDS_FIX",
            Verdict::Block => "BLOCK",
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// COSTAR rubric
// ============================================================================

/// The six fixed COSTAR categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostarKey {
    Context,
    Objective,
    Style,
    Tone,
    Audience,
    Response,
}

impl CostarKey {
    pub const ALL: [CostarKey; 6] = [
        CostarKey::Context,
        CostarKey::Objective,
        CostarKey::Style,
        CostarKey::Tone,
        CostarKey::Audience,
        CostarKey::Response,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostarKey::Context => "Context",
            CostarKey::Objective => "Objective",
            CostarKey::Style => "Style",
            CostarKey::Tone => "Tone",
            CostarKey::Audience => "Audience",
            CostarKey::Response => "Response",
        }
    }
}

/// COSTAR breakdown. The service emits capitalized keys; lowercase keys are
/// accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Costar {
    #[serde(rename = "Context", alias = "context", default)]
    pub context: String,
    #[serde(rename = "Objective", alias = "objective", default)]
    pub objective: String,
    #[serde(rename = "Style", alias = "style", default)]
    pub style: String,
    #[serde(rename = "Tone", alias = "tone", default)]
    pub tone: String,
    #[serde(rename = "Audience", alias = "audience", default)]
    pub audience: String,
    #[serde(rename = "Response", alias = "response", default)]
    pub response: String,
}

impl Costar {
    pub fn get(&self, key: CostarKey) -> &str {
        match key {
            CostarKey::Context => &self.context,
            CostarKey::Objective => &self.objective,
            CostarKey::Style => &self.style,
            CostarKey::Tone => &self.tone,
            CostarKey::Audience => &self.audience,
            CostarKey::Response => &self.response,
        }
    }

    /// Entries in the fixed rubric order
    pub fn entries(&self) -> impl Iterator<Item = (CostarKey, &str)> + '_ {
        CostarKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

// ============================================================================
// Highlights
// ============================================================================

pub const HIGHLIGHT_EXPLICIT: &str = "explicit";
pub const HIGHLIGHT_HARMFUL: &str = "harmful";
pub const HIGHLIGHT_INJECTION: &str = "injection";

/// A flagged span in the submitted prompt.
///
/// The service populates different optional fields depending on the detector
/// that fired, so no more than the `type` tag can be relied upon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Highlight {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<serde_json::Value>,
}

impl Highlight {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    /// Best available human-readable detail, if any field besides the tag is set
    pub fn detail(&self) -> Option<String> {
        match (&self.token, &self.reason, &self.matched) {
            (Some(token), Some(reason), _) => Some(format!("{token} ({reason})")),
            (Some(token), None, _) => Some(token.clone()),
            (None, Some(reason), _) => Some(reason.clone()),
            (None, None, Some(matched)) => Some(render_match(matched)),
            (None, None, None) => None,
        }
    }
}

fn render_match(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(obj) => obj
            .get("match")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

// ============================================================================
// Analysis result
// ============================================================================

/// Verdict payload produced by the analysis service. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    pub score: u8,
    #[serde(default)]
    pub costar: Costar,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub suggested_rewrite: String,
    #[serde(default)]
    pub reasons: Vec<String>,
}

impl AnalysisResult {
    pub fn has_highlight(&self, kind: &str) -> bool {
        self.highlights.iter().any(|h| h.is(kind))
    }
}

// ============================================================================
// Requests / responses
// ============================================================================

/// Reviewer persona sent along with each request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Persona {
    #[default]
    Professor,
    Guardian,
    Shield,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Professor, Persona::Guardian, Persona::Shield];

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Professor => "Prompt Professor",
            Persona::Guardian => "Brand Guardian",
            Persona::Shield => "Prompt Shield",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Persona::Professor => "🎓",
            Persona::Guardian => "🏢",
            Persona::Shield => "🛡️",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            Persona::Professor => "Guiding you to better prompts",
            Persona::Guardian => "Protecting brand voice and tone",
            Persona::Shield => "Advanced security and safety",
        }
    }
}

/// Body of `POST /api/analyze` and `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalyzeRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Map<String, serde_json::Value>>,
}

impl AnalyzeRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }
}

pub type ChatRequest = AnalyzeRequest;

/// Response of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub allowed: bool,
    pub analysis: AnalysisResult,
    #[serde(default)]
    pub llm_response: Option<String>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub use_stub: bool,
    pub gemini_configured: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_PAYLOAD: &str = r#"{
        "verdict": "BLOCK",
        "score": 15,
        "costar": {
            "Context": "Network",
            "Objective": "None",
            "Style": "None",
            "Tone": "None",
            "Audience": "General",
            "Response": "Text"
        },
        "highlights": [
            {"type": "slang", "token": "bruh", "reason": "informal slang"},
            {"type": "injection", "match": {"pattern": "jailbreak", "match": "jailbreak"}},
            {"type": "harmful"}
        ],
        "suggested_rewrite": "Please provide information about best practices for online safety and security.",
        "reasons": ["slang: bruh (informal slang)"]
    }"#;

    #[test]
    fn test_analysis_result_parses_service_payload() {
        let result: AnalysisResult = serde_json::from_str(BLOCK_PAYLOAD).unwrap();
        assert_eq!(result.verdict, Verdict::Block);
        assert_eq!(result.score, 15);
        assert_eq!(result.costar.context, "Network");
        assert_eq!(result.highlights.len(), 3);
        assert!(result.has_highlight(HIGHLIGHT_HARMFUL));
        assert!(!result.has_highlight(HIGHLIGHT_EXPLICIT));
    }

    #[test]
    fn test_costar_accepts_lowercase_keys() {
        let costar: Costar = serde_json::from_str(
            r#"{"context":"AI","objective":"Explain","style":"Formal","tone":"Calm","audience":"Students","response":"Summary"}"#,
        )
        .unwrap();
        let labels: Vec<_> = costar.entries().map(|(k, v)| (k.label(), v)).collect();
        assert_eq!(labels[0], ("Context", "AI"));
        assert_eq!(labels[5], ("Response", "Summary"));
    }

    #[test]
    fn test_verdict_wire_spelling() {
        assert_eq!(serde_json::to_string(&Verdict::NeedsFix).unwrap(), "\"NEEDS_FIX\"");
        let parsed: Verdict = serde_json::from_str("\"ALLOW\"").unwrap();
        assert_eq!(parsed, Verdict::Allow);
        assert!(serde_json::from_str::<Verdict>("\"MAYBE\"").is_err());
    }

    #[test]
    fn test_highlight_detail_uses_whichever_field_is_present() {
        let token_only = Highlight {
            token: Some("wtf".into()),
            ..Highlight::new("slang")
        };
        assert_eq!(token_only.detail().as_deref(), Some("wtf"));

        let matched = Highlight {
            matched: Some(serde_json::json!("kannada_unicode_present")),
            ..Highlight::new("mixed_language")
        };
        assert_eq!(matched.detail().as_deref(), Some("kannada_unicode_present"));

        assert_eq!(Highlight::new("harmful").detail(), None);
    }

    #[test]
    fn test_analyze_request_omits_absent_fields() {
        let json = serde_json::to_value(AnalyzeRequest::new("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"prompt": "hello"}));

        let json =
            serde_json::to_value(AnalyzeRequest::new("hello").with_persona(Persona::Shield))
                .unwrap();
        assert_eq!(json["persona"], "Shield");
    }

    #[test]
    fn test_chat_response_without_llm_response() {
        let body = format!(r#"{{"allowed": false, "analysis": {BLOCK_PAYLOAD}}}"#);
        let response: ChatResponse = serde_json::from_str(&body).unwrap();
        assert!(!response.allowed);
        assert!(response.llm_response.is_none());
    }
}
