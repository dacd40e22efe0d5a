//! Target image-generation platforms and their output dialects.
//!
//! The mapping goes from platform id to formatting strategy through the
//! [`PLATFORMS`] table. Adding a platform means adding a row; ids missing
//! from the table format as plain natural language.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How the assembled base prompt is rendered for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStrategy {
    /// Single line with trailing `--flag value` parameters (Midjourney).
    Flags,
    /// Labeled positive / negative / parameter blocks (Stable Diffusion).
    DualBlock,
    /// Conversational text with no flags or negative section.
    NaturalLanguage,
}

impl FormatStrategy {
    /// Whether camera and quality keywords belong in the base prompt.
    pub fn accepts_technical(self) -> bool {
        matches!(self, FormatStrategy::Flags | FormatStrategy::DualBlock)
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

pub const PLATFORM_MIDJOURNEY: &str = "midjourney";
pub const PLATFORM_SD: &str = "sd";
pub const PLATFORM_FLUX: &str = "flux";
pub const PLATFORM_DALLE: &str = "dalle";
pub const PLATFORM_JIMENG: &str = "jimeng";
pub const PLATFORM_NANOBANANA: &str = "nanobanana";
pub const PLATFORM_KLING: &str = "kling";

/// Identifier of a target platform.
///
/// Parsing never fails: unknown ids are kept verbatim in [`Platform::Other`]
/// and format as natural language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    #[default]
    Midjourney,
    StableDiffusion,
    Flux,
    Dalle,
    Jimeng,
    NanoBanana,
    Kling,
    Other(String),
}

impl Platform {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            PLATFORM_MIDJOURNEY => Platform::Midjourney,
            PLATFORM_SD => Platform::StableDiffusion,
            PLATFORM_FLUX => Platform::Flux,
            PLATFORM_DALLE => Platform::Dalle,
            PLATFORM_JIMENG => Platform::Jimeng,
            PLATFORM_NANOBANANA => Platform::NanoBanana,
            PLATFORM_KLING => Platform::Kling,
            _ => Platform::Other(id.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Platform::Midjourney => PLATFORM_MIDJOURNEY,
            Platform::StableDiffusion => PLATFORM_SD,
            Platform::Flux => PLATFORM_FLUX,
            Platform::Dalle => PLATFORM_DALLE,
            Platform::Jimeng => PLATFORM_JIMENG,
            Platform::NanoBanana => PLATFORM_NANOBANANA,
            Platform::Kling => PLATFORM_KLING,
            Platform::Other(id) => id,
        }
    }

    /// Look up the formatting strategy in [`PLATFORMS`].
    pub fn strategy(&self) -> FormatStrategy {
        find_platform(self.id())
            .map(|spec| spec.strategy)
            .unwrap_or(FormatStrategy::NaturalLanguage)
    }
}

impl From<String> for Platform {
    fn from(id: String) -> Self {
        Platform::from_id(&id)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.id().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One row of the platform configuration table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlatformSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub strategy: FormatStrategy,
}

pub const PLATFORMS: &[PlatformSpec] = &[
    PlatformSpec {
        id: PLATFORM_MIDJOURNEY,
        name: "Midjourney",
        strategy: FormatStrategy::Flags,
    },
    PlatformSpec {
        id: PLATFORM_SD,
        name: "Stable Diffusion",
        strategy: FormatStrategy::DualBlock,
    },
    PlatformSpec {
        id: PLATFORM_FLUX,
        name: "Flux",
        strategy: FormatStrategy::NaturalLanguage,
    },
    PlatformSpec {
        id: PLATFORM_DALLE,
        name: "DALL·E 3",
        strategy: FormatStrategy::NaturalLanguage,
    },
    PlatformSpec {
        id: PLATFORM_JIMENG,
        name: "Jimeng",
        strategy: FormatStrategy::NaturalLanguage,
    },
    PlatformSpec {
        id: PLATFORM_NANOBANANA,
        name: "Nano Banana",
        strategy: FormatStrategy::NaturalLanguage,
    },
    PlatformSpec {
        id: PLATFORM_KLING,
        name: "Kling",
        strategy: FormatStrategy::NaturalLanguage,
    },
];

pub fn find_platform(id: &str) -> Option<&'static PlatformSpec> {
    PLATFORMS.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_parse_to_variants() {
        assert_eq!(Platform::from_id("midjourney"), Platform::Midjourney);
        assert_eq!(Platform::from_id("SD"), Platform::StableDiffusion);
        assert_eq!(Platform::from_id(" kling "), Platform::Kling);
    }

    #[test]
    fn unknown_id_is_kept_and_formats_as_natural_language() {
        let platform = Platform::from_id("ideogram");
        assert_eq!(platform, Platform::Other("ideogram".into()));
        assert_eq!(platform.strategy(), FormatStrategy::NaturalLanguage);
        assert_eq!(platform.id(), "ideogram");
    }

    #[test]
    fn only_midjourney_and_sd_accept_technical_fields() {
        for spec in PLATFORMS {
            let expected = matches!(spec.id, PLATFORM_MIDJOURNEY | PLATFORM_SD);
            assert_eq!(spec.strategy.accepts_technical(), expected, "{}", spec.id);
        }
    }

    #[test]
    fn every_variant_resolves_through_the_table() {
        for spec in PLATFORMS {
            let platform = Platform::from_id(spec.id);
            assert!(!matches!(platform, Platform::Other(_)), "{}", spec.id);
            assert_eq!(platform.strategy(), spec.strategy);
        }
    }

    #[test]
    fn serde_uses_the_string_id() {
        let platform: Platform = serde_json::from_str("\"sd\"").unwrap();
        assert_eq!(platform, Platform::StableDiffusion);
        assert_eq!(
            serde_json::to_string(&Platform::NanoBanana).unwrap(),
            "\"nanobanana\""
        );
    }
}
