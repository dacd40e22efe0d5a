//! Prompt structure model and schema versioning.
//!
//! [`PromptStructure`] is the canonical (V3) schema. The earlier V1 schema,
//! with separate `action`, `color` and `mood` fields, is still accepted and
//! upgraded on the way in via [`VersionedStructure`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assembly::{self, is_clean, smart_join};
use crate::error::CoreError;
use crate::platform::Platform;
use crate::types::Language;

// ---------------------------------------------------------------------------
// Canonical schema (V3)
// ---------------------------------------------------------------------------

/// One complete, structured image prompt.
///
/// Every field defaults to the empty string, so partially populated JSON
/// deserializes cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromptStructure {
    pub subject: String,
    pub environment: String,
    /// Physical interaction or distance between elements.
    pub spatial_relationship: String,
    pub style: String,
    pub theme: String,
    pub modifiers: Modifiers,
    pub technical: Technical,
    pub negative: String,
    /// Raw user text that produced this structure.
    pub original_input: String,
    /// Last assembled output. A cache, never read by the engine.
    pub enriched_prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modifiers {
    pub lighting: String,
    pub color_mood: String,
    pub composition: String,
    pub visual_layers: String,
    pub details: String,
    pub effects: String,
    pub typography: String,
    pub artistic_reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Technical {
    pub camera: String,
    pub quality: String,
    /// e.g. `16:9`.
    pub aspect_ratio: String,
    /// Literal model flag, e.g. `--v 6.0`.
    pub model: String,
}

impl PromptStructure {
    pub fn field(&self, field: PromptField) -> &str {
        match field {
            PromptField::Subject => &self.subject,
            PromptField::Environment => &self.environment,
            PromptField::SpatialRelationship => &self.spatial_relationship,
            PromptField::Style => &self.style,
            PromptField::Theme => &self.theme,
            PromptField::Lighting => &self.modifiers.lighting,
            PromptField::ArtisticReference => &self.modifiers.artistic_reference,
            PromptField::ColorMood => &self.modifiers.color_mood,
            PromptField::Composition => &self.modifiers.composition,
            PromptField::VisualLayers => &self.modifiers.visual_layers,
            PromptField::Details => &self.modifiers.details,
            PromptField::Effects => &self.modifiers.effects,
            PromptField::Typography => &self.modifiers.typography,
            PromptField::Camera => &self.technical.camera,
            PromptField::Quality => &self.technical.quality,
            PromptField::AspectRatio => &self.technical.aspect_ratio,
            PromptField::Model => &self.technical.model,
            PromptField::Negative => &self.negative,
        }
    }

    fn field_mut(&mut self, field: PromptField) -> &mut String {
        match field {
            PromptField::Subject => &mut self.subject,
            PromptField::Environment => &mut self.environment,
            PromptField::SpatialRelationship => &mut self.spatial_relationship,
            PromptField::Style => &mut self.style,
            PromptField::Theme => &mut self.theme,
            PromptField::Lighting => &mut self.modifiers.lighting,
            PromptField::ArtisticReference => &mut self.modifiers.artistic_reference,
            PromptField::ColorMood => &mut self.modifiers.color_mood,
            PromptField::Composition => &mut self.modifiers.composition,
            PromptField::VisualLayers => &mut self.modifiers.visual_layers,
            PromptField::Details => &mut self.modifiers.details,
            PromptField::Effects => &mut self.modifiers.effects,
            PromptField::Typography => &mut self.modifiers.typography,
            PromptField::Camera => &mut self.technical.camera,
            PromptField::Quality => &mut self.technical.quality,
            PromptField::AspectRatio => &mut self.technical.aspect_ratio,
            PromptField::Model => &mut self.technical.model,
            PromptField::Negative => &mut self.negative,
        }
    }

    /// Overwrite a single field, leaving the rest untouched.
    pub fn set_field(&mut self, field: PromptField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Return a copy with `enriched_prompt` filled from the assembly engine.
    pub fn with_enriched_prompt(&self, platform: &Platform, language: Language) -> Self {
        let mut next = self.clone();
        next.enriched_prompt = assembly::assemble(self, platform, language);
        next
    }

    /// True when no assemblable field holds clean content.
    pub fn is_blank(&self) -> bool {
        PromptField::ALL.iter().all(|f| !is_clean(self.field(*f)))
    }
}

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// Addressable leaf of a [`PromptStructure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptField {
    Subject,
    Environment,
    SpatialRelationship,
    Style,
    Theme,
    Lighting,
    ArtisticReference,
    ColorMood,
    Composition,
    VisualLayers,
    Details,
    Effects,
    Typography,
    Camera,
    Quality,
    AspectRatio,
    Model,
    Negative,
}

impl PromptField {
    pub const ALL: [PromptField; 18] = [
        PromptField::Subject,
        PromptField::Environment,
        PromptField::SpatialRelationship,
        PromptField::Style,
        PromptField::Theme,
        PromptField::Lighting,
        PromptField::ArtisticReference,
        PromptField::ColorMood,
        PromptField::Composition,
        PromptField::VisualLayers,
        PromptField::Details,
        PromptField::Effects,
        PromptField::Typography,
        PromptField::Camera,
        PromptField::Quality,
        PromptField::AspectRatio,
        PromptField::Model,
        PromptField::Negative,
    ];

    /// Dotted camelCase path as it appears in JSON.
    pub fn key(self) -> &'static str {
        match self {
            PromptField::Subject => "subject",
            PromptField::Environment => "environment",
            PromptField::SpatialRelationship => "spatialRelationship",
            PromptField::Style => "style",
            PromptField::Theme => "theme",
            PromptField::Lighting => "modifiers.lighting",
            PromptField::ArtisticReference => "modifiers.artisticReference",
            PromptField::ColorMood => "modifiers.colorMood",
            PromptField::Composition => "modifiers.composition",
            PromptField::VisualLayers => "modifiers.visualLayers",
            PromptField::Details => "modifiers.details",
            PromptField::Effects => "modifiers.effects",
            PromptField::Typography => "modifiers.typography",
            PromptField::Camera => "technical.camera",
            PromptField::Quality => "technical.quality",
            PromptField::AspectRatio => "technical.aspectRatio",
            PromptField::Model => "technical.model",
            PromptField::Negative => "negative",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }
}

// ---------------------------------------------------------------------------
// Legacy schema (V1)
// ---------------------------------------------------------------------------

/// The first-generation schema: `action` instead of `spatialRelationship`,
/// and separate `color` / `mood` modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyPromptStructure {
    pub subject: String,
    /// What the subject is doing.
    pub action: String,
    pub environment: String,
    pub theme: String,
    pub style: String,
    pub modifiers: LegacyModifiers,
    pub technical: Technical,
    pub negative: String,
    pub original_input: String,
    pub enriched_prompt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyModifiers {
    pub lighting: String,
    pub color: String,
    pub mood: String,
    pub composition: String,
    pub details: String,
    pub effects: String,
    pub typography: String,
}

impl LegacyPromptStructure {
    /// Map onto the canonical schema.
    ///
    /// `action` occupies the same core-group slot as `spatialRelationship`;
    /// `color` and `mood` merge into `colorMood` with the smart join, so the
    /// assembled text matches what the V1 layout produced.
    pub fn upgrade(self, language: Language) -> PromptStructure {
        let color_mood = smart_join(
            [self.modifiers.color.as_str(), self.modifiers.mood.as_str()]
                .into_iter()
                .filter(|s| is_clean(s))
                .map(str::trim),
            language,
        );

        PromptStructure {
            subject: self.subject,
            environment: self.environment,
            spatial_relationship: self.action,
            style: self.style,
            theme: self.theme,
            modifiers: Modifiers {
                lighting: self.modifiers.lighting,
                color_mood,
                composition: self.modifiers.composition,
                visual_layers: String::new(),
                details: self.modifiers.details,
                effects: self.modifiers.effects,
                typography: self.modifiers.typography,
                artistic_reference: String::new(),
            },
            technical: self.technical,
            negative: self.negative,
            original_input: self.original_input,
            enriched_prompt: self.enriched_prompt,
        }
    }
}

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    V1,
    V3,
}

impl SchemaVersion {
    /// Infer the schema from the keys present in a JSON object.
    ///
    /// Any V3-only key wins; otherwise any V1-only key selects V1; an object
    /// with neither is read as V3.
    pub fn detect(value: &Value) -> Self {
        let has = |key: &str| value.get(key).is_some();
        let has_modifier = |key: &str| {
            value
                .get("modifiers")
                .and_then(|m| m.get(key))
                .is_some()
        };

        let v3 = has("spatialRelationship")
            || has_modifier("colorMood")
            || has_modifier("visualLayers")
            || has_modifier("artisticReference");
        if v3 {
            return SchemaVersion::V3;
        }

        let v1 = has("action") || has_modifier("color") || has_modifier("mood");
        if v1 {
            SchemaVersion::V1
        } else {
            SchemaVersion::V3
        }
    }
}

/// A decoded structure tagged with the schema it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedStructure {
    V1(LegacyPromptStructure),
    V3(PromptStructure),
}

impl VersionedStructure {
    pub fn version(&self) -> SchemaVersion {
        match self {
            VersionedStructure::V1(_) => SchemaVersion::V1,
            VersionedStructure::V3(_) => SchemaVersion::V3,
        }
    }

    pub fn into_canonical(self, language: Language) -> PromptStructure {
        match self {
            VersionedStructure::V1(legacy) => legacy.upgrade(language),
            VersionedStructure::V3(current) => current,
        }
    }

    /// Decode a JSON object in whichever schema it uses.
    ///
    /// `null` leaves are dropped first so they read as absent fields, and
    /// so is a `modifiers` / `technical` group that is not an object.
    pub fn from_value(mut value: Value) -> Result<Self, CoreError> {
        if !value.is_object() {
            return Err(CoreError::Validation(
                "Prompt structure must be a JSON object".to_string(),
            ));
        }
        drop_nulls(&mut value);
        drop_non_object_groups(&mut value);

        let decoded = match SchemaVersion::detect(&value) {
            SchemaVersion::V1 => serde_json::from_value(value).map(VersionedStructure::V1),
            SchemaVersion::V3 => serde_json::from_value(value).map(VersionedStructure::V3),
        };
        decoded.map_err(|e| CoreError::Validation(format!("Malformed prompt structure: {e}")))
    }
}

/// Decode any supported schema and return the canonical structure.
pub fn parse_structure(value: Value, language: Language) -> Result<PromptStructure, CoreError> {
    VersionedStructure::from_value(value).map(|v| v.into_canonical(language))
}

/// Keys holding nested field groups in both schema versions.
const FIELD_GROUPS: [&str; 2] = ["modifiers", "technical"];

fn drop_non_object_groups(value: &mut Value) {
    if let Value::Object(map) = value {
        for key in FIELD_GROUPS {
            if map.get(key).is_some_and(|group| !group.is_object()) {
                map.remove(key);
            }
        }
    }
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
