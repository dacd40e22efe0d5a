//! Visual style registry and the style resolution state machine.
//!
//! ```text
//! NoStyleChosen -> Classifying -> AutoResolved -----------> Resolved
//!                             \-> AwaitingUserChoice -----> Resolved
//! (pre-selected or custom style) ------------------------> Resolved
//! ```
//!
//! The machine holds no I/O. The caller runs the classifier and suggester
//! calls and feeds their outcomes back in.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub const DEFAULT_STYLE_ID: &str = "general";
pub const CUSTOM_STYLE_ID: &str = "custom";

/// Classifier confidence must exceed this to skip asking the user.
pub const CLASSIFIER_CONFIDENCE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StyleSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const STYLES: &[StyleSpec] = &[
    StyleSpec {
        id: DEFAULT_STYLE_ID,
        name: "General / Universal",
        description: "Versatile style suitable for most subjects, balancing detail and creativity.",
    },
    StyleSpec {
        id: "photography",
        name: "Photography",
        description: "Real-world photography: cinematic, documentary, portrait, macro and street.",
    },
    StyleSpec {
        id: "anime",
        name: "Anime & Illustration",
        description: "Japanese anime, manga, cartoons and cel-shaded styles.",
    },
    StyleSpec {
        id: "digital-art",
        name: "Digital Art",
        description: "Concept art, 3D renders, cyberpunk, pixel art and other modern digital media.",
    },
    StyleSpec {
        id: "traditional-art",
        name: "Traditional Art",
        description: "Oil, watercolor, sketch, ink and art-historical painting styles.",
    },
];

pub fn find_style(id: &str) -> Option<&'static StyleSpec> {
    STYLES.iter().find(|s| s.id == id)
}

// ---------------------------------------------------------------------------
// Classifier / suggester payloads
// ---------------------------------------------------------------------------

/// Classifier verdict: `{ "style": string | null, "confidence": number }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl Classification {
    /// Style id when the verdict clears the confidence threshold.
    pub fn confident_style(&self) -> Option<&str> {
        self.style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|_| self.confidence > CLASSIFIER_CONFIDENCE_THRESHOLD)
    }
}

/// One selectable style, either suggested by the model or from the presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOption {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&StyleSpec> for StyleOption {
    fn from(spec: &StyleSpec) -> Self {
        Self {
            id: spec.id.to_string(),
            name: spec.name.to_string(),
            description: spec.description.to_string(),
        }
    }
}

pub fn custom_option() -> StyleOption {
    StyleOption {
        id: CUSTOM_STYLE_ID.to_string(),
        name: "Custom Style".to_string(),
        description: "Describe your own visual direction in a few words.".to_string(),
    }
}

/// Suggestions first, then registry presets not already offered, then the
/// custom option.
pub fn merge_options(suggestions: Vec<StyleOption>) -> Vec<StyleOption> {
    let mut options: Vec<StyleOption> = Vec::with_capacity(suggestions.len() + STYLES.len() + 1);
    let candidates = suggestions
        .into_iter()
        .chain(STYLES.iter().map(StyleOption::from));

    for option in candidates {
        let id = option.id.trim();
        if id.is_empty() || id == CUSTOM_STYLE_ID || options.iter().any(|o| o.id == id) {
            continue;
        }
        options.push(option);
    }
    options.push(custom_option());
    options
}

// ---------------------------------------------------------------------------
// Resolved style
// ---------------------------------------------------------------------------

/// Final routing decision: a registered style id plus an optional textual
/// hint carried into the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    pub style_id: String,
    pub hint: Option<String>,
}

impl ResolvedStyle {
    pub fn general() -> Self {
        Self {
            style_id: DEFAULT_STYLE_ID.to_string(),
            hint: None,
        }
    }

    /// Registered ids route as-is. Anything else routes to `general` and is
    /// kept as a hint so the intent survives.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        match find_style(id) {
            Some(spec) => Self {
                style_id: spec.id.to_string(),
                hint: None,
            },
            None if id.is_empty() || id == CUSTOM_STYLE_ID => Self::general(),
            None => Self {
                style_id: DEFAULT_STYLE_ID.to_string(),
                hint: Some(id.to_string()),
            },
        }
    }

    pub fn custom(text: &str) -> Self {
        let text = text.trim();
        Self {
            style_id: DEFAULT_STYLE_ID.to_string(),
            hint: (!text.is_empty()).then(|| text.to_string()),
        }
    }

    /// Append the hint to the user input as a bracketed style note.
    pub fn apply_hint(&self, input: &str) -> String {
        match &self.hint {
            Some(hint) => format!("{} [Style: {hint}]", input.trim_end()),
            None => input.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// What the caller asked for up front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StyleRequest {
    pub preselected: Option<String>,
    pub custom_style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StyleState {
    NoStyleChosen,
    Classifying,
    AutoResolved { style_id: String, confidence: f64 },
    AwaitingUserChoice { options: Vec<StyleOption> },
    Resolved(ResolvedStyle),
}

impl StyleState {
    /// Initial state. A non-empty custom style or a pre-selected id skips
    /// classification entirely.
    pub fn start(request: &StyleRequest) -> Self {
        let custom = request
            .custom_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let preselected = request
            .preselected
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (preselected, custom) {
            (Some(CUSTOM_STYLE_ID), Some(text)) | (None, Some(text)) => {
                StyleState::Resolved(ResolvedStyle::custom(text))
            }
            (Some(CUSTOM_STYLE_ID), None) => StyleState::NoStyleChosen,
            (Some(id), _) => StyleState::Resolved(ResolvedStyle::from_id(id)),
            (None, None) => StyleState::NoStyleChosen,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleState::NoStyleChosen => "no_style_chosen",
            StyleState::Classifying => "classifying",
            StyleState::AutoResolved { .. } => "auto_resolved",
            StyleState::AwaitingUserChoice { .. } => "awaiting_user_choice",
            StyleState::Resolved(_) => "resolved",
        }
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            state: self.name(),
            action,
        }
    }

    pub fn begin_classification(self) -> Result<Self, CoreError> {
        match self {
            StyleState::NoStyleChosen => Ok(StyleState::Classifying),
            other => Err(other.invalid("begin classification")),
        }
    }

    /// Confident verdict auto-resolves; anything else asks the user,
    /// starting from the preset options.
    pub fn on_classification(self, verdict: &Classification) -> Result<Self, CoreError> {
        match self {
            StyleState::Classifying => Ok(match verdict.confident_style() {
                Some(id) => StyleState::AutoResolved {
                    style_id: id.to_string(),
                    confidence: verdict.confidence,
                },
                None => StyleState::AwaitingUserChoice {
                    options: merge_options(Vec::new()),
                },
            }),
            other => Err(other.invalid("accept a classification")),
        }
    }

    /// The classifier call itself failed: fall back to the default style.
    pub fn on_classification_failed(self) -> Result<Self, CoreError> {
        match self {
            StyleState::Classifying => Ok(StyleState::Resolved(ResolvedStyle::general())),
            other => Err(other.invalid("record a classification failure")),
        }
    }

    pub fn with_suggestions(self, suggestions: Vec<StyleOption>) -> Result<Self, CoreError> {
        match self {
            StyleState::AwaitingUserChoice { .. } => Ok(StyleState::AwaitingUserChoice {
                options: merge_options(suggestions),
            }),
            other => Err(other.invalid("attach suggestions")),
        }
    }

    /// `AutoResolved -> Resolved`.
    pub fn proceed(self) -> Result<Self, CoreError> {
        match self {
            StyleState::AutoResolved { style_id, .. } => {
                Ok(StyleState::Resolved(ResolvedStyle::from_id(&style_id)))
            }
            other => Err(other.invalid("proceed")),
        }
    }

    /// Human pick from the offered options. Choosing `custom` requires text.
    pub fn choose(self, id: &str, custom_text: Option<&str>) -> Result<Self, CoreError> {
        match self {
            StyleState::AwaitingUserChoice { .. } if id.trim() == CUSTOM_STYLE_ID => {
                let text = custom_text.map(str::trim).unwrap_or_default();
                if text.is_empty() {
                    return Err(CoreError::Validation(
                        "Custom style text must not be empty".to_string(),
                    ));
                }
                Ok(StyleState::Resolved(ResolvedStyle::custom(text)))
            }
            StyleState::AwaitingUserChoice { .. } => {
                Ok(StyleState::Resolved(ResolvedStyle::from_id(id)))
            }
            other => Err(other.invalid("choose a style")),
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedStyle> {
        match self {
            StyleState::Resolved(style) => Some(style),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn verdict(style: Option<&str>, confidence: f64) -> Classification {
        Classification {
            style: style.map(str::to_string),
            confidence,
        }
    }

    fn request(preselected: Option<&str>, custom: Option<&str>) -> StyleRequest {
        StyleRequest {
            preselected: preselected.map(str::to_string),
            custom_style: custom.map(str::to_string),
        }
    }

    // -- start --

    #[test]
    fn nothing_chosen_starts_unresolved() {
        assert_eq!(StyleState::start(&request(None, None)), StyleState::NoStyleChosen);
        assert_eq!(
            StyleState::start(&request(Some("  "), Some(""))),
            StyleState::NoStyleChosen
        );
    }

    #[test]
    fn preselected_style_bypasses_classification() {
        let state = StyleState::start(&request(Some("anime"), None));
        assert_eq!(state.resolved(), Some(&ResolvedStyle::from_id("anime")));
    }

    #[test]
    fn custom_style_resolves_to_general_with_hint() {
        let state = StyleState::start(&request(Some("custom"), Some(" vaporwave collage ")));
        let style = state.resolved().unwrap();
        assert_eq!(style.style_id, "general");
        assert_eq!(style.hint.as_deref(), Some("vaporwave collage"));
    }

    #[test]
    fn custom_selection_without_text_needs_classification() {
        assert_eq!(
            StyleState::start(&request(Some("custom"), None)),
            StyleState::NoStyleChosen
        );
    }

    // -- classification --

    #[test]
    fn confident_verdict_auto_resolves() {
        let state = StyleState::NoStyleChosen
            .begin_classification()
            .unwrap()
            .on_classification(&verdict(Some("photography"), 0.9))
            .unwrap();
        assert_matches!(state, StyleState::AutoResolved { ref style_id, .. } if style_id == "photography");
        let resolved = state.proceed().unwrap();
        assert_eq!(resolved.resolved().unwrap().style_id, "photography");
    }

    #[test]
    fn threshold_is_exclusive() {
        let state = StyleState::Classifying
            .on_classification(&verdict(Some("anime"), CLASSIFIER_CONFIDENCE_THRESHOLD))
            .unwrap();
        assert_matches!(state, StyleState::AwaitingUserChoice { .. });
    }

    #[test]
    fn null_style_awaits_user_choice_with_presets() {
        let state = StyleState::Classifying
            .on_classification(&verdict(None, 0.95))
            .unwrap();
        let StyleState::AwaitingUserChoice { options } = state else {
            panic!("expected awaiting user choice");
        };
        assert_eq!(options.len(), STYLES.len() + 1);
        assert_eq!(options.last().unwrap().id, CUSTOM_STYLE_ID);
    }

    #[test]
    fn classifier_failure_falls_back_to_general() {
        let state = StyleState::Classifying.on_classification_failed().unwrap();
        assert_eq!(state.resolved(), Some(&ResolvedStyle::general()));
    }

    #[test]
    fn hallucinated_id_is_coerced_and_kept_as_hint() {
        let state = StyleState::Classifying
            .on_classification(&verdict(Some("neo-brutalism"), 0.99))
            .unwrap()
            .proceed()
            .unwrap();
        let style = state.resolved().unwrap();
        assert_eq!(style.style_id, "general");
        assert_eq!(style.hint.as_deref(), Some("neo-brutalism"));
    }

    // -- suggestions and choice --

    #[test]
    fn suggestions_come_first_and_presets_are_deduplicated() {
        let suggestions = vec![
            StyleOption {
                id: "cinematic-noir".into(),
                name: "Cinematic Noir".into(),
                description: "High contrast".into(),
            },
            StyleOption {
                id: "anime".into(),
                name: "Anime".into(),
                description: String::new(),
            },
            StyleOption {
                id: "custom".into(),
                name: "Sneaky".into(),
                description: String::new(),
            },
        ];
        let merged = merge_options(suggestions);
        let ids: Vec<&str> = merged.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "cinematic-noir",
                "anime",
                "general",
                "photography",
                "digital-art",
                "traditional-art",
                "custom"
            ]
        );
    }

    #[test]
    fn choosing_an_option_resolves() {
        let state = StyleState::AwaitingUserChoice { options: vec![] }
            .choose("traditional-art", None)
            .unwrap();
        assert_eq!(state.resolved().unwrap().style_id, "traditional-art");
    }

    #[test]
    fn choosing_custom_requires_text() {
        let awaiting = StyleState::AwaitingUserChoice { options: vec![] };
        let err = awaiting.clone().choose("custom", Some("  ")).unwrap_err();
        assert_matches!(err, CoreError::Validation(_));

        let state = awaiting.choose("custom", Some("paper cutout")).unwrap();
        assert_eq!(
            state.resolved().unwrap().hint.as_deref(),
            Some("paper cutout")
        );
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        let err = StyleState::Resolved(ResolvedStyle::general())
            .begin_classification()
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition {
                state: "resolved",
                ..
            }
        );
        assert!(StyleState::NoStyleChosen.proceed().is_err());
        assert!(StyleState::Classifying.choose("anime", None).is_err());
        assert!(StyleState::NoStyleChosen.with_suggestions(vec![]).is_err());
    }

    // -- hints --

    #[test]
    fn apply_hint_appends_bracketed_style() {
        let style = ResolvedStyle::custom("ukiyo-e print");
        assert_eq!(
            style.apply_hint("a fox in the snow\n"),
            "a fox in the snow [Style: ukiyo-e print]"
        );
        assert_eq!(ResolvedStyle::general().apply_hint("a fox"), "a fox");
    }
}
