//! System instruction library for the completion service.
//!
//! Instructions form a nested table: style -> version -> mode -> language.
//! [`resolve_instruction`] walks it with a fallback at every level, so any
//! combination of keys yields an instruction.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::style::DEFAULT_STYLE_ID;
use crate::types::Language;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Placeholder replaced with the human-readable output language.
pub const TARGET_LANGUAGE_PLACEHOLDER: &str = "TARGET_LANGUAGE";

/// Matches `{{NAME}}` tokens in instruction texts.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Z_]+)\s*\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

const BASE_HEADER_EN: &str = "You are an expert AI Image Prompt Optimizer.";
const BASE_HEADER_CN: &str = "你是一位专家级 AI 图像提示词优化师。";

const UNIFIED_QUICK_EN: &str = include_str!("texts/unified_quick_en.md");
const UNIFIED_QUICK_CN: &str = include_str!("texts/unified_quick_cn.md");
const CLASSIC_QUICK_EN: &str = include_str!("texts/classic_quick_en.md");
const OPTIMIZE_EN: &str = include_str!("texts/optimize_en.md");
const OPTIMIZE_CN: &str = include_str!("texts/optimize_cn.md");
const TRANSLATE_EN: &str = include_str!("texts/translate_en.md");
const TRANSLATE_CN: &str = include_str!("texts/translate_cn.md");
const CLASSIFIER: &str = include_str!("texts/classifier.md");
const SUGGESTER: &str = include_str!("texts/suggester.md");

pub const UNIFIED_VERSION_ID: &str = "unified";
pub const CLASSIC_VERSION_ID: &str = "classic";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the completion call is asked to do with the user's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Quick,
    Optimize,
    Translate,
}

impl GenerationMode {
    /// Unknown ids fall back to [`GenerationMode::Quick`].
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "optimize" => GenerationMode::Optimize,
            "translate" => GenerationMode::Translate,
            _ => GenerationMode::Quick,
        }
    }
}

/// English and Chinese renditions of one instruction. An empty Chinese
/// text falls back to English.
#[derive(Debug, Clone)]
pub struct LocalizedText {
    pub en: String,
    pub cn: String,
}

impl LocalizedText {
    fn new(en: &str, cn: &str) -> Self {
        Self {
            en: en.to_string(),
            cn: cn.to_string(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Chinese if !self.cn.is_empty() => &self.cn,
            _ => &self.en,
        }
    }

    /// Swap the generic opening line for a style-specific one.
    fn with_header(&self, en_header: &str, cn_header: &str) -> Self {
        Self {
            en: self.en.replacen(BASE_HEADER_EN, en_header, 1),
            cn: self.cn.replacen(BASE_HEADER_CN, cn_header, 1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModeTexts {
    pub quick: LocalizedText,
    pub optimize: LocalizedText,
    pub translate: LocalizedText,
}

impl ModeTexts {
    pub fn get(&self, mode: GenerationMode) -> &LocalizedText {
        match mode {
            GenerationMode::Quick => &self.quick,
            GenerationMode::Optimize => &self.optimize,
            GenerationMode::Translate => &self.translate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstructionVersion {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub texts: ModeTexts,
}

#[derive(Debug, Clone)]
pub struct StyleInstructions {
    pub style_id: &'static str,
    pub default_version: &'static str,
    pub versions: Vec<InstructionVersion>,
}

impl StyleInstructions {
    /// Requested version, else the style default, else the first entry.
    pub fn version(&self, id: Option<&str>) -> &InstructionVersion {
        id.and_then(|id| self.versions.iter().find(|v| v.id == id))
            .or_else(|| self.versions.iter().find(|v| v.id == self.default_version))
            .unwrap_or(&self.versions[0])
    }
}

/// Listing entry for a version, without the instruction bodies.
#[derive(Debug, Clone, Serialize)]
pub struct VersionSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub is_default: bool,
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

static LIBRARY: LazyLock<Vec<StyleInstructions>> = LazyLock::new(build_library);

fn general_unified() -> ModeTexts {
    ModeTexts {
        quick: LocalizedText::new(UNIFIED_QUICK_EN, UNIFIED_QUICK_CN),
        optimize: LocalizedText::new(OPTIMIZE_EN, OPTIMIZE_CN),
        translate: LocalizedText::new(TRANSLATE_EN, TRANSLATE_CN),
    }
}

/// A style version derived from the general one by replacing the opening
/// line of the quick and optimize instructions.
fn styled(
    base: &ModeTexts,
    quick: (&str, &str),
    optimize: (&str, &str),
) -> ModeTexts {
    ModeTexts {
        quick: base.quick.with_header(quick.0, quick.1),
        optimize: base.optimize.with_header(optimize.0, optimize.1),
        translate: base.translate.clone(),
    }
}

fn build_library() -> Vec<StyleInstructions> {
    let general = general_unified();

    let classic = ModeTexts {
        quick: LocalizedText::new(CLASSIC_QUICK_EN, ""),
        optimize: general.optimize.clone(),
        translate: general.translate.clone(),
    };

    let photography = styled(
        &general,
        (
            "You are an expert **Photography Director** and AI Image Prompt Optimizer.\n\n\
             **Critical focus for photography**: describe light the way a camera records it \
             (exposure, depth of field, film stock, grain). Keep the image believable; avoid \
             illustration and 3D render terms.",
            "你是一位专家级 **摄影指导** 兼 AI 图像提示词优化师。\n\n\
             **摄影的关键重点**：按相机记录光线的方式描述（曝光、景深、胶片、颗粒），\
             保持画面真实可信，避免插画与 3D 渲染术语。",
        ),
        (
            "You are an expert **Photography** AI Image Prompt Optimizer.",
            "你是一位专家级 **摄影** AI 图像提示词优化师。",
        ),
    );

    let anime = styled(
        &general,
        (
            "You are an expert **Anime & Illustration Director**.\n\n\
             **Critical focus for anime**: line quality (weight, color, lineless), shading \
             (cel shading, soft gradients, flat color) and studio aesthetics. Do NOT use \
             realism terms such as \"photorealistic\" or \"8k photography\".",
            "你是一位专家级 **动漫与插画导演**。\n\n\
             **动漫的关键重点**：线条质量（粗细、颜色、无线稿）、阴影（赛璐璐、柔和渐变、\
             扁平色彩）以及工作室美学。不要使用“照片级真实”“8k摄影”等写实术语。",
        ),
        (
            "You are an expert **Anime & Manga** AI Image Prompt Optimizer.",
            "你是一位专家级 **动漫与漫画** AI 图像提示词优化师。",
        ),
    );

    let digital_art = styled(
        &general,
        (
            "You are an expert **Digital Art & Concept Design Director**.\n\n\
             **Critical focus for digital art**: rendering approach (3D render, matte painting, \
             pixel art, low poly), material shaders and stylized lighting. Name the digital \
             medium explicitly.",
            "你是一位专家级 **数字艺术与概念设计导演**。\n\n\
             **数字艺术的关键重点**：渲染方式（3D 渲染、数字绘景、像素艺术、低多边形）、\
             材质着色与风格化光照，并明确写出数字媒介。",
        ),
        (
            "You are an expert **Digital Art** AI Image Prompt Optimizer.",
            "你是一位专家级 **数字艺术** AI 图像提示词优化师。",
        ),
    );

    let traditional_art = styled(
        &general,
        (
            "You are an expert **Fine Art Curator & Painter**.\n\n\
             **Critical focus for traditional art**: physical medium (oil, watercolor, ink, \
             charcoal), brushwork, paper or canvas texture and art-historical movement. \
             Avoid photographic and digital terms.",
            "你是一位专家级 **艺术策展人兼画家**。\n\n\
             **传统艺术的关键重点**：物理媒介（油画、水彩、水墨、炭笔）、笔触、纸张或画布\
             纹理以及艺术史流派，避免摄影与数字术语。",
        ),
        (
            "You are an expert **Traditional Art** AI Image Prompt Optimizer.",
            "你是一位专家级 **传统艺术** AI 图像提示词优化师。",
        ),
    );

    let single = |style_id: &'static str, name: &'static str, texts: ModeTexts| {
        StyleInstructions {
            style_id,
            default_version: UNIFIED_VERSION_ID,
            versions: vec![InstructionVersion {
                id: UNIFIED_VERSION_ID,
                name,
                description: "Single analysis pass with precise sensory adjectives.",
                texts,
            }],
        }
    };

    vec![
        StyleInstructions {
            style_id: DEFAULT_STYLE_ID,
            default_version: UNIFIED_VERSION_ID,
            versions: vec![
                InstructionVersion {
                    id: UNIFIED_VERSION_ID,
                    name: "Unified",
                    description: "Single analysis pass with precise sensory adjectives.",
                    texts: general,
                },
                InstructionVersion {
                    id: CLASSIC_VERSION_ID,
                    name: "Classic",
                    description: "Two-step decomposition producing the action/color/mood schema.",
                    texts: classic,
                },
            ],
        },
        single("photography", "Photography", photography),
        single("anime", "Anime", anime),
        single("digital-art", "Digital Art", digital_art),
        single("traditional-art", "Traditional Art", traditional_art),
    ]
}

pub fn library() -> &'static [StyleInstructions] {
    &LIBRARY
}

/// Unknown style ids resolve to the general style.
pub fn style_instructions(style_id: &str) -> &'static StyleInstructions {
    let library = library();
    library
        .iter()
        .find(|s| s.style_id == style_id)
        .or_else(|| library.iter().find(|s| s.style_id == DEFAULT_STYLE_ID))
        .unwrap_or(&library[0])
}

pub fn versions_for(style_id: &str) -> Vec<VersionSummary> {
    let style = style_instructions(style_id);
    style
        .versions
        .iter()
        .map(|v| VersionSummary {
            id: v.id,
            name: v.name,
            description: v.description,
            is_default: v.id == style.default_version,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Resolution and rendering
// ---------------------------------------------------------------------------

/// Look up the raw instruction text, falling back at each missing key.
pub fn resolve_instruction(
    style_id: &str,
    version: Option<&str>,
    mode: GenerationMode,
    language: Language,
) -> &'static str {
    style_instructions(style_id)
        .version(version)
        .texts
        .get(mode)
        .get(language)
}

/// Substitute known placeholders. Unknown placeholders are left as-is.
pub fn render_instruction(template: &str, language: Language) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures<'_>| match &caps[1] {
            TARGET_LANGUAGE_PLACEHOLDER => language.target_label().to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Resolved and rendered system instruction.
pub fn instruction_for(
    style_id: &str,
    version: Option<&str>,
    mode: GenerationMode,
    language: Language,
) -> String {
    render_instruction(
        resolve_instruction(style_id, version, mode, language),
        language,
    )
}

pub fn classifier_instruction() -> &'static str {
    CLASSIFIER
}

pub fn suggester_instruction(language: Language) -> String {
    render_instruction(SUGGESTER, language)
}

/// Sorted, de-duplicated placeholder names found in `template`.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::STYLES;

    #[test]
    fn every_registered_style_has_instructions() {
        for spec in STYLES {
            assert_eq!(style_instructions(spec.id).style_id, spec.id);
        }
    }

    #[test]
    fn unknown_style_falls_back_to_general() {
        assert_eq!(style_instructions("neo-brutalism").style_id, DEFAULT_STYLE_ID);
    }

    #[test]
    fn unknown_version_falls_back_to_default() {
        let text = resolve_instruction("general", Some("v99"), GenerationMode::Quick, Language::English);
        assert!(text.contains("spatialRelationship"));
    }

    #[test]
    fn classic_version_uses_v1_schema() {
        let text = resolve_instruction(
            "general",
            Some(CLASSIC_VERSION_ID),
            GenerationMode::Quick,
            Language::English,
        );
        assert!(text.contains("\"action\""));
        assert!(!text.contains("spatialRelationship"));
    }

    #[test]
    fn missing_chinese_text_falls_back_to_english() {
        let text = resolve_instruction(
            "general",
            Some(CLASSIC_VERSION_ID),
            GenerationMode::Quick,
            Language::Chinese,
        );
        assert!(text.starts_with(BASE_HEADER_EN));
    }

    #[test]
    fn chinese_text_is_selected_when_present() {
        let text = resolve_instruction("general", None, GenerationMode::Quick, Language::Chinese);
        assert!(text.starts_with(BASE_HEADER_CN));
    }

    #[test]
    fn style_variants_replace_the_header() {
        let anime = resolve_instruction("anime", None, GenerationMode::Quick, Language::English);
        assert!(anime.starts_with("You are an expert **Anime & Illustration Director**."));
        assert!(!anime.contains(BASE_HEADER_EN));

        let anime_cn = resolve_instruction("anime", None, GenerationMode::Optimize, Language::Chinese);
        assert!(anime_cn.starts_with("你是一位专家级 **动漫与漫画**"));
    }

    #[test]
    fn translate_is_shared_across_styles() {
        assert_eq!(
            resolve_instruction("photography", None, GenerationMode::Translate, Language::English),
            resolve_instruction("general", None, GenerationMode::Translate, Language::English)
        );
    }

    #[test]
    fn rendering_substitutes_target_language() {
        let rendered = instruction_for("general", None, GenerationMode::Quick, Language::Chinese);
        assert!(!rendered.contains("{{TARGET_LANGUAGE}}"));
        assert!(rendered.contains("Simplified Chinese (简体中文)"));
    }

    #[test]
    fn rendering_keeps_unknown_placeholders() {
        let out = render_instruction("{{ TARGET_LANGUAGE }} and {{OTHER}}", Language::English);
        assert_eq!(out, "English and {{OTHER}}");
    }

    #[test]
    fn all_instruction_texts_only_use_known_placeholders() {
        for style in library() {
            for version in &style.versions {
                for mode in [
                    GenerationMode::Quick,
                    GenerationMode::Optimize,
                    GenerationMode::Translate,
                ] {
                    for language in [Language::English, Language::Chinese] {
                        let text = version.texts.get(mode).get(language);
                        for name in extract_placeholders(text) {
                            assert_eq!(name, TARGET_LANGUAGE_PLACEHOLDER, "{}", style.style_id);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn suggester_is_rendered() {
        let text = suggester_instruction(Language::English);
        assert!(text.contains("strictly in English"));
        assert!(extract_placeholders(&text).is_empty());
    }

    #[test]
    fn mode_ids_fall_back_to_quick() {
        assert_eq!(GenerationMode::from_id("optimize"), GenerationMode::Optimize);
        assert_eq!(GenerationMode::from_id("TRANSLATE"), GenerationMode::Translate);
        assert_eq!(GenerationMode::from_id("remix"), GenerationMode::Quick);
    }

    #[test]
    fn versions_listing_marks_default() {
        let versions = versions_for("general");
        assert_eq!(versions.len(), 2);
        assert!(versions.iter().any(|v| v.id == UNIFIED_VERSION_ID && v.is_default));
        assert!(versions.iter().any(|v| v.id == CLASSIC_VERSION_ID && !v.is_default));
    }
}
