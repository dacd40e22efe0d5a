use serde::{Deserialize, Serialize};

/// Output language for generated prompt text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Chinese,
    #[default]
    English,
}

impl Language {
    /// Lenient parse: only `chinese` selects Chinese.
    pub fn from_id(id: &str) -> Self {
        if id.trim().eq_ignore_ascii_case("chinese") {
            Language::Chinese
        } else {
            Language::English
        }
    }

    /// Separator inserted between two parts when the left one does not
    /// already end in punctuation.
    pub fn separator(self) -> &'static str {
        match self {
            Language::Chinese => "，",
            Language::English => ", ",
        }
    }

    /// Human-readable label substituted for `{{TARGET_LANGUAGE}}`.
    pub fn target_label(self) -> &'static str {
        match self {
            Language::Chinese => "Simplified Chinese (简体中文)",
            Language::English => "English",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Chinese => "chinese",
            Language::English => "english",
        }
    }
}
