//! Keyword intent classification for the career agent.
//!
//! Routing is an ordered table of (keywords, intent) pairs; the first row
//! with a matching keyword wins and `Fallback` catches everything else.

use serde::Serialize;

/// The four skills a message can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AnalyzeProfile,
    StudyTrail,
    SuggestResources,
    Fallback,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::AnalyzeProfile => "analyze_profile",
            Intent::StudyTrail => "study_trail",
            Intent::SuggestResources => "suggest_resources",
            Intent::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy)]
pub struct IntentRoute {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl IntentRoute {
    fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|keyword| haystack.contains(keyword))
    }
}

/// Priority order: analyze > trail > resources > fallback.
pub const ROUTES: [IntentRoute; 4] = [
    IntentRoute {
        intent: Intent::AnalyzeProfile,
        keywords: &["analisar", "análise", "perfil"],
    },
    IntentRoute {
        intent: Intent::StudyTrail,
        keywords: &["trilha", "estudos", "plano", "roadmap"],
    },
    IntentRoute {
        intent: Intent::SuggestResources,
        keywords: &["recursos", "cursos", "certificação", "sugerir"],
    },
    IntentRoute {
        intent: Intent::Fallback,
        keywords: &["exemplo", "template", "demo", "ajuda", "help", "comandos"],
    },
];

/// What the fallback skill answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReply {
    Example,
    Help,
    Default,
}

const EXAMPLE_KEYWORDS: &[&str] = &["exemplo", "template", "demo"];
const HELP_KEYWORDS: &[&str] = &["ajuda", "help", "comandos"];

/// Classifies free text against [`ROUTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentRouter;

impl IntentRouter {
    pub fn classify(&self, text: &str) -> Intent {
        let haystack = text.to_lowercase();
        ROUTES
            .iter()
            .find(|route| route.matches(&haystack))
            .map(|route| route.intent)
            .unwrap_or(Intent::Fallback)
    }

    pub fn fallback_reply(&self, text: &str) -> FallbackReply {
        let haystack = text.to_lowercase();
        if EXAMPLE_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            FallbackReply::Example
        } else if HELP_KEYWORDS.iter().any(|k| haystack.contains(k)) {
            FallbackReply::Help
        } else {
            FallbackReply::Default
        }
    }
}

/// The JSON object embedded in a message, if any: first `{` through last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
