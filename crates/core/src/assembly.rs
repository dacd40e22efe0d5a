//! Prompt assembly engine.
//!
//! Turns a [`PromptStructure`] into the final prompt text for a platform:
//! select fields in a fixed order, drop empty and placeholder values, join
//! them without doubling punctuation, then apply the platform's dialect.
//! Every function here is pure and total.

use serde::{Deserialize, Serialize};

use crate::platform::{FormatStrategy, Platform};
use crate::sanitize::is_placeholder;
use crate::structure::{PromptField, PromptStructure};
use crate::types::Language;

// ---------------------------------------------------------------------------
// Field groups
// ---------------------------------------------------------------------------

/// Core narrative fields, environment first.
pub const CORE_FIELDS: [PromptField; 5] = [
    PromptField::Environment,
    PromptField::Subject,
    PromptField::SpatialRelationship,
    PromptField::Style,
    PromptField::Theme,
];

pub const MODIFIER_FIELDS: [PromptField; 8] = [
    PromptField::Lighting,
    PromptField::ArtisticReference,
    PromptField::ColorMood,
    PromptField::Composition,
    PromptField::VisualLayers,
    PromptField::Details,
    PromptField::Effects,
    PromptField::Typography,
];

/// Only emitted for platforms whose strategy accepts technical keywords.
pub const TECHNICAL_FIELDS: [PromptField; 2] = [PromptField::Camera, PromptField::Quality];

/// Characters after which the next part is joined with a bare space.
const TERMINAL_PUNCTUATION: &[char] = &[
    ',', '.', ';', ':', '!', '?', '，', '。', '；', '：', '！', '？', '、',
];

pub const SD_POSITIVE_HEADER: &str = "Positive Prompt:";
pub const SD_NEGATIVE_HEADER: &str = "Negative Prompt:";
pub const SD_PARAMETERS_HEADER: &str = "Parameters:";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Stable Diffusion block layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SdLayout {
    /// Omit any section whose content is empty.
    #[default]
    Conditional,
    /// Always print the positive and negative headers, even when empty.
    AlwaysHeaders,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub sd_layout: SdLayout,
}

// ---------------------------------------------------------------------------
// Cleansing and joining
// ---------------------------------------------------------------------------

/// A value is clean when it has non-whitespace content that is not a
/// filler placeholder such as `none` or `无`.
pub fn is_clean(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !is_placeholder(trimmed)
}

/// Trimmed value when clean, `None` otherwise.
pub fn clean(value: &str) -> Option<&str> {
    is_clean(value).then(|| value.trim())
}

fn ends_with_terminal_punctuation(text: &str) -> bool {
    text.chars()
        .last()
        .is_some_and(|c| TERMINAL_PUNCTUATION.contains(&c))
}

/// Concatenate parts, inserting the language separator only where the
/// accumulated text does not already end in punctuation.
pub fn smart_join<'a, I>(parts: I, language: Language) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (idx, part) in parts.into_iter().enumerate() {
        if idx > 0 {
            out.truncate(out.trim_end().len());
            if ends_with_terminal_punctuation(&out) {
                out.push(' ');
            } else {
                out.push_str(language.separator());
            }
        }
        out.push_str(part);
    }
    out
}

fn join_group(structure: &PromptStructure, fields: &[PromptField], language: Language) -> String {
    smart_join(
        fields.iter().filter_map(|f| clean(structure.field(*f))),
        language,
    )
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Platform-agnostic text: core, modifier and (when accepted) technical
/// groups, each smart-joined, then joined together skipping empty groups.
pub fn build_base_prompt(
    structure: &PromptStructure,
    platform: &Platform,
    language: Language,
) -> String {
    let core = join_group(structure, &CORE_FIELDS, language);
    let modifiers = join_group(structure, &MODIFIER_FIELDS, language);
    let technical = if platform.strategy().accepts_technical() {
        join_group(structure, &TECHNICAL_FIELDS, language)
    } else {
        String::new()
    };

    let groups = [core, modifiers, technical];
    smart_join(
        groups.iter().map(String::as_str).filter(|g| !g.is_empty()),
        language,
    )
}

/// Assemble the final prompt using default options.
pub fn assemble(structure: &PromptStructure, platform: &Platform, language: Language) -> String {
    assemble_with(structure, platform, language, AssemblyOptions::default())
}

pub fn assemble_with(
    structure: &PromptStructure,
    platform: &Platform,
    language: Language,
    options: AssemblyOptions,
) -> String {
    let base = build_base_prompt(structure, platform, language);
    match platform.strategy() {
        FormatStrategy::Flags => format_flags(&base, structure),
        FormatStrategy::DualBlock => format_dual_block(&base, structure, options.sd_layout),
        FormatStrategy::NaturalLanguage => base,
    }
}

/// `base --ar <ratio> <model> --no <negative>`, in that order.
fn format_flags(base: &str, structure: &PromptStructure) -> String {
    let mut pieces: Vec<String> = Vec::with_capacity(4);
    if !base.is_empty() {
        pieces.push(base.to_string());
    }
    if let Some(ratio) = clean(&structure.technical.aspect_ratio) {
        pieces.push(format!("--ar {ratio}"));
    }
    if let Some(model) = clean(&structure.technical.model) {
        pieces.push(model.to_string());
    }
    if let Some(negative) = clean(&structure.negative) {
        pieces.push(format!("--no {}", negative.replace(',', " ")));
    }
    pieces.join(" ")
}

fn format_dual_block(base: &str, structure: &PromptStructure, layout: SdLayout) -> String {
    let negative = clean(&structure.negative);
    let ratio = clean(&structure.technical.aspect_ratio);
    let model = clean(&structure.technical.model);

    let mut sections: Vec<Vec<String>> = Vec::with_capacity(3);

    let always = layout == SdLayout::AlwaysHeaders;
    if always || !base.is_empty() {
        sections.push(vec![SD_POSITIVE_HEADER.to_string(), base.to_string()]);
    }
    if always || negative.is_some() {
        sections.push(vec![
            SD_NEGATIVE_HEADER.to_string(),
            negative.unwrap_or_default().to_string(),
        ]);
    }
    if ratio.is_some() || model.is_some() {
        let mut params = vec![SD_PARAMETERS_HEADER.to_string()];
        if let Some(ratio) = ratio {
            params.push(format!("Aspect Ratio: {ratio}"));
        }
        if let Some(model) = model {
            params.push(format!("Model: {model}"));
        }
        sections.push(params);
    }

    sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
