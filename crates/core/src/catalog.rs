//! Built-in template catalog: pre-filled structures with a recommended
//! platform, grouped by category.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::structure::{PromptField, PromptField as F, PromptStructure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Character,
    Scene,
    Product,
    Art,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 4] = [
        TemplateCategory::Character,
        TemplateCategory::Scene,
        TemplateCategory::Product,
        TemplateCategory::Art,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateCategory::Character => "character",
            TemplateCategory::Scene => "scene",
            TemplateCategory::Product => "product",
            TemplateCategory::Art => "art",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(id.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: TemplateCategory,
    pub structure: PromptStructure,
    pub recommended_platform: Platform,
}

// ---------------------------------------------------------------------------
// Catalog data
// ---------------------------------------------------------------------------

struct TemplateSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: TemplateCategory,
    platform: &'static str,
    fields: &'static [(PromptField, &'static str)],
}

const SEEDS: &[TemplateSeed] = &[
    // Character
    TemplateSeed {
        id: "char-movie-portrait",
        name: "Cinematic Hero Portrait",
        description: "Close-up of a lead character under dramatic film lighting.",
        category: TemplateCategory::Character,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a weathered explorer staring into the distance, resolute eyes"),
            (F::SpatialRelationship, "centered in frame, background falling out of focus"),
            (F::Environment, "blurred blizzard behind the figure"),
            (F::Theme, "courage and survival"),
            (F::Style, "cinematic portrait photography"),
            (F::Lighting, "Rembrandt lighting, dramatic shadows"),
            (F::Composition, "close-up, shallow depth of field"),
            (F::Details, "sharp skin texture, stubble, snowflakes on the eyelashes"),
            (F::Effects, "film grain, soft glow"),
            (F::ColorMood, "cold desaturated palette, steel blue and dark grey"),
            (F::Camera, "85mm f/1.2 lens"),
            (F::Quality, "8k, masterpiece, raw photo"),
            (F::AspectRatio, "9:16"),
            (F::Model, "--v 6.0"),
            (F::Negative, "cartoon, 3d, painting, smooth skin, makeup"),
        ],
    },
    TemplateSeed {
        id: "char-anime-tachie",
        name: "Anime Character Standing Art",
        description: "Polished full-body character art in a game illustration style.",
        category: TemplateCategory::Character,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a cat-eared hacker girl floating mid-air, typing on a holographic keyboard"),
            (F::SpatialRelationship, "hovering at the center, ringed by holographic panels"),
            (F::Environment, "simple geometric tech backdrop"),
            (F::Theme, "future technology"),
            (F::Style, "anime impasto illustration"),
            (F::Lighting, "rim light, neon glow"),
            (F::Composition, "full body, dynamic pose"),
            (F::Details, "translucent cybernetic limbs, holographic data streams"),
            (F::Effects, "flowing data light trails"),
            (F::ColorMood, "neon palette, magenta and cyan"),
            (F::Quality, "best quality, illustration, detailed"),
            (F::AspectRatio, "9:16"),
            (F::Model, "--niji 6"),
            (F::Negative, "lowres, bad anatomy, bad hands, text"),
        ],
    },
    TemplateSeed {
        id: "char-concept-sheet",
        name: "Character Concept Sheet",
        description: "Front, side and back views of one character for design reference.",
        category: TemplateCategory::Character,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a fantasy knight shown from the front, side and back"),
            (F::SpatialRelationship, "three views side by side at equal spacing"),
            (F::Environment, "plain neutral background"),
            (F::Theme, "character sheet"),
            (F::Style, "concept art"),
            (F::Lighting, "flat lighting without distracting shadows"),
            (F::Composition, "three views, full body"),
            (F::Details, "armor detailing, weapon breakdown"),
            (F::Typography, "design callout annotations"),
            (F::ColorMood, "clear local colors, silver and royal blue"),
            (F::Quality, "design sheet, reference"),
            (F::Negative, "dramatic lighting, heavy shadows, perspective distortion"),
        ],
    },
    TemplateSeed {
        id: "char-retro-photo",
        name: "Retro Film Portrait",
        description: "Nineties street portrait with an analog film look.",
        category: TemplateCategory::Character,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a curly-haired young man in a denim jacket holding a soda"),
            (F::SpatialRelationship, "leaning against the door of an old car"),
            (F::Environment, "American street in the nineties at sunset"),
            (F::Theme, "nostalgic youth"),
            (F::Style, "vintage film photography"),
            (F::Lighting, "warm sunset, light leaks"),
            (F::Composition, "medium shot"),
            (F::Details, "visible grain, faded tones"),
            (F::Effects, "film scratches, halation"),
            (F::ColorMood, "Kodak Portra tones, warm yellow and vintage red"),
            (F::Camera, "35mm film camera"),
            (F::Quality, "analog aesthetic"),
            (F::Negative, "digital, hd, sharp, modern"),
        ],
    },
    TemplateSeed {
        id: "char-fantasy-race",
        name: "Fantasy Race Close-Up",
        description: "A fantasy creature with unusual skin texture and features.",
        category: TemplateCategory::Character,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a forest elf archer listening warily"),
            (F::SpatialRelationship, "half hidden, blending into the forest behind"),
            (F::Environment, "glowing enchanted forest"),
            (F::Theme, "nature and magic"),
            (F::Style, "hyperreal CG render"),
            (F::Lighting, "bioluminescence, point lights"),
            (F::Composition, "extreme close-up"),
            (F::Details, "pointed ears, leaf-patterned skin, glowing pupils"),
            (F::Effects, "drifting spores"),
            (F::ColorMood, "forest green and bioluminescent blue"),
            (F::Quality, "unreal engine 5, 8k"),
            (F::AspectRatio, "1:1"),
            (F::Negative, "human skin, plain"),
        ],
    },
    // Scene
    TemplateSeed {
        id: "scene-epic-movie",
        name: "Epic Film Opening",
        description: "Vast widescreen establishing shot.",
        category: TemplateCategory::Scene,
        platform: "midjourney",
        fields: &[
            (F::Subject, "ancient colossal ruins standing in the desert"),
            (F::SpatialRelationship, "ruins in the far distance, tiny against the dunes"),
            (F::Environment, "endless desert with a giant planet on the horizon"),
            (F::Theme, "smallness and grandeur"),
            (F::Style, "IMAX cinematography"),
            (F::Lighting, "golden hour, long shadows"),
            (F::Composition, "ultra wide angle, extreme widescreen"),
            (F::Details, "a tiny expedition party for scale"),
            (F::Effects, "sandstorm, heat haze"),
            (F::Typography, "film title \"DUNE\""),
            (F::ColorMood, "orange and teal, sand and sky"),
            (F::Quality, "movie still, blockbuster"),
            (F::AspectRatio, "21:9"),
            (F::Negative, "blur, messy, low resolution"),
        ],
    },
    TemplateSeed {
        id: "scene-healing-landscape",
        name: "Calm Healing Landscape",
        description: "Fresh, soothing countryside scenery.",
        category: TemplateCategory::Scene,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a small wooden cabin standing quietly on a hillside"),
            (F::SpatialRelationship, "cabin in the middle ground, folded into the landscape"),
            (F::Environment, "wildflower hillside, distant snow peaks, blue sky with white clouds"),
            (F::Theme, "calm and healing"),
            (F::Style, "Ghibli background art"),
            (F::Lighting, "bright clear daylight"),
            (F::Composition, "panorama"),
            (F::Details, "swaying grass, birds in flight"),
            (F::Effects, "light breeze, cloud shadows"),
            (F::ColorMood, "fresh green and sky blue"),
            (F::Quality, "high quality, detailed"),
            (F::AspectRatio, "16:9"),
            (F::Model, "--niji 6"),
            (F::Negative, "dark, gloomy, scary"),
        ],
    },
    TemplateSeed {
        id: "scene-cyberpunk-city",
        name: "Cyberpunk City at Night",
        description: "High-contrast futuristic city full of neon.",
        category: TemplateCategory::Scene,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a rainy future street with flying cars"),
            (F::SpatialRelationship, "vehicles weaving between towers, leading the eye upward"),
            (F::Environment, "skyscrapers piercing the clouds, holographic billboards"),
            (F::Theme, "high tech, low life"),
            (F::Style, "cyberpunk concept art"),
            (F::Lighting, "mixed neon light, reflections"),
            (F::Composition, "low angle shot stressing building height"),
            (F::Details, "wet reflective pavement, steam"),
            (F::Effects, "rain streaks, glitch art"),
            (F::Typography, "neon signs in Chinese characters"),
            (F::ColorMood, "cyberpunk palette, violet and laser red"),
            (F::Quality, "ray tracing, octane render"),
            (F::Negative, "sunny, clean, nature"),
        ],
    },
    TemplateSeed {
        id: "scene-fantasy-world",
        name: "Fantasy World Exploration",
        description: "An imaginative otherworldly vista.",
        category: TemplateCategory::Scene,
        platform: "midjourney",
        fields: &[
            (F::Subject, "floating sky islands with waterfalls spilling from their edges"),
            (F::SpatialRelationship, "islands scattered at different heights above the clouds"),
            (F::Environment, "above a sea of clouds, a giant rainbow"),
            (F::Theme, "exploring the unknown"),
            (F::Style, "fantasy illustration"),
            (F::Lighting, "dreamy soft light"),
            (F::Composition, "aerial view"),
            (F::Details, "dragons in flight, ancient temples"),
            (F::Effects, "drifting mist, magic dust"),
            (F::ColorMood, "pastel pink and blue clouds"),
            (F::Quality, "masterpiece, best quality"),
            (F::AspectRatio, "16:9"),
            (F::Negative, "realistic, gritty"),
        ],
    },
    TemplateSeed {
        id: "scene-interior-design",
        name: "Interior Design Render",
        description: "Modern minimal interior for decoration reference.",
        category: TemplateCategory::Scene,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a modern minimalist living room"),
            (F::SpatialRelationship, "floor-to-ceiling windows connect the room to the forest outside"),
            (F::Environment, "full-height windows looking out onto a forest"),
            (F::Theme, "comfort and taste"),
            (F::Style, "architectural visualization"),
            (F::Lighting, "soft diffused daylight"),
            (F::Composition, "one-point perspective"),
            (F::Details, "designer furniture, marble veining"),
            (F::Effects, "minimal"),
            (F::ColorMood, "beige and natural wood, warm neutrals"),
            (F::Quality, "photorealistic, 8k, interior design"),
            (F::Negative, "messy, dark, cluttered"),
        ],
    },
    // Product
    TemplateSeed {
        id: "product-poster",
        name: "Brand Marketing Poster",
        description: "Commercial poster with strong visual impact.",
        category: TemplateCategory::Product,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a new running shoe floating mid-air, coming apart or assembling"),
            (F::SpatialRelationship, "parts spread out in an exploded view"),
            (F::Environment, "dynamic geometric background"),
            (F::Theme, "speed and innovation"),
            (F::Style, "commercial advertisement"),
            (F::Lighting, "high-key photography, edge light"),
            (F::Composition, "centered, space left for copy"),
            (F::Details, "flying laces, material detail"),
            (F::Effects, "speed lines, burst effect"),
            (F::Typography, "reserved headline area"),
            (F::ColorMood, "brand colors, energetic orange and black"),
            (F::Quality, "high end"),
            (F::AspectRatio, "3:4"),
            (F::Negative, "text, watermark, low quality"),
        ],
    },
    TemplateSeed {
        id: "product-concept",
        name: "Product Concept Render",
        description: "Industrial design concept rendering.",
        category: TemplateCategory::Product,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a transparent future smartphone shown front and back"),
            (F::SpatialRelationship, "floating, front and back mirrored side by side"),
            (F::Environment, "dark minimal background"),
            (F::Theme, "minimal futurism"),
            (F::Style, "industrial design render"),
            (F::Lighting, "studio lighting, reflected light"),
            (F::Composition, "45-degree product angle"),
            (F::Details, "internal chip layout faintly visible"),
            (F::Effects, "caustics, gloss"),
            (F::ColorMood, "glass and metal, silver and clear"),
            (F::Quality, "keyshot, blender, octane"),
            (F::Negative, "rough, sketch"),
        ],
    },
    TemplateSeed {
        id: "product-book-cover",
        name: "Minimalist Book Cover",
        description: "Abstract, contemplative book cover.",
        category: TemplateCategory::Product,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a single lonely geometric shape, circle or square, floating in a void"),
            (F::SpatialRelationship, "the shape suspended in an absolute void"),
            (F::Environment, "large areas of empty space"),
            (F::Theme, "philosophy and reflection"),
            (F::Style, "minimalist graphic design"),
            (F::Lighting, "flat light"),
            (F::Composition, "minimal composition, negative space"),
            (F::Details, "paper texture"),
            (F::Effects, "subtle shadow"),
            (F::Typography, "elegant serif title"),
            (F::ColorMood, "one or two colors, Klein blue and white"),
            (F::Quality, "vector style"),
            (F::AspectRatio, "2:3"),
            (F::Negative, "complex, busy, photo"),
        ],
    },
    TemplateSeed {
        id: "product-fashion",
        name: "Fashion Flat Lay",
        description: "Top-down shot of high-end clothing or accessories.",
        category: TemplateCategory::Product,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a silk pajama set with accessories, artfully arranged"),
            (F::SpatialRelationship, "items laid out in a geometric top-down arrangement"),
            (F::Environment, "marble countertop or velvet backdrop"),
            (F::Theme, "luxury living"),
            (F::Style, "fashion flat lay"),
            (F::Lighting, "softbox, shadowless"),
            (F::Composition, "top down view"),
            (F::Details, "fabric folds, metallic sheen"),
            (F::ColorMood, "soft greys, champagne and pearl"),
            (F::Camera, "50mm"),
            (F::Quality, "high fashion, detailed"),
            (F::Negative, "mannequin, body"),
        ],
    },
    TemplateSeed {
        id: "product-3c",
        name: "Electronics on White",
        description: "Clean white-background product shot for online stores.",
        category: TemplateCategory::Product,
        platform: "midjourney",
        fields: &[
            (F::Subject, "noise-cancelling wireless headphones, floating"),
            (F::SpatialRelationship, "centered and floating, faint reflection below"),
            (F::Environment, "pure white background"),
            (F::Theme, "e-commerce hero image"),
            (F::Style, "e-commerce product photography"),
            (F::Lighting, "clean lighting that brings out materials"),
            (F::Composition, "centered, product fully in frame"),
            (F::Details, "highlights, material texture"),
            (F::Effects, "spotless"),
            (F::ColorMood, "white and the product's own colors, black and white"),
            (F::Quality, "studio shot, 4k"),
            (F::AspectRatio, "1:1"),
            (F::Negative, "shadows, grey background, reflection"),
        ],
    },
    // Art
    TemplateSeed {
        id: "art-ink",
        name: "Modern Ink Wash",
        description: "Traditional ink painting with a contemporary eye.",
        category: TemplateCategory::Art,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a small boat drifting through misty southern rain"),
            (F::SpatialRelationship, "the lone boat small within the empty space"),
            (F::Environment, "layered distant mountains, blank river water"),
            (F::Theme, "zen and nature"),
            (F::Style, "Chinese ink wash painting"),
            (F::Lighting, "scattered perspective, no single light source"),
            (F::Composition, "negative space, flowing rhythm"),
            (F::Details, "ink bleeding, brush strokes"),
            (F::Effects, "rice paper texture"),
            (F::Typography, "calligraphy seal inscription"),
            (F::ColorMood, "black, white and grey with cinnabar accents"),
            (F::Quality, "best quality, traditional art"),
            (F::Model, "--niji 6"),
            (F::Negative, "photo, realistic, 3d"),
        ],
    },
    TemplateSeed {
        id: "art-retro-scifi",
        name: "Retro Sci-Fi Pulp Cover",
        description: "Seventies and eighties science fiction paperback style.",
        category: TemplateCategory::Art,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a retro astronaut exploring an alien world"),
            (F::SpatialRelationship, "small figure in the foreground looking up at giant alien plants"),
            (F::Environment, "giant alien flora under twin moons"),
            (F::Theme, "golden age science fiction"),
            (F::Style, "retro sci-fi illustration"),
            (F::Lighting, "vivid saturated color"),
            (F::Composition, "edge-to-edge composition"),
            (F::Details, "airbrush texture"),
            (F::Effects, "aged paper texture"),
            (F::ColorMood, "retro orange and teal"),
            (F::Quality, "detailed"),
            (F::Negative, "modern, 3d render, cg"),
        ],
    },
    TemplateSeed {
        id: "art-ghibli",
        name: "Ghibli-Style Room",
        description: "Fresh hand-drawn animation in the Miyazaki manner.",
        category: TemplateCategory::Art,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a small room full of magical tools, sunlight on the desk"),
            (F::SpatialRelationship, "crowded, cozy interior full of lived-in clutter"),
            (F::Environment, "warm untidy magic workshop"),
            (F::Theme, "fairy tale and daily life"),
            (F::Style, "Studio Ghibli style"),
            (F::Lighting, "beautiful natural light"),
            (F::Composition, "lived-in detail throughout"),
            (F::Details, "delicate hand-drawn linework"),
            (F::Effects, "watercolor strokes"),
            (F::ColorMood, "rich watercolor palette"),
            (F::Quality, "best quality, anime style"),
            (F::Model, "--niji 6"),
            (F::Negative, "photorealistic, dark"),
        ],
    },
    TemplateSeed {
        id: "art-pixel",
        name: "Lo-Fi Pixel Art",
        description: "8-bit or 16-bit pixel artwork.",
        category: TemplateCategory::Art,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a cyberpunk arcade with flickering screens"),
            (F::SpatialRelationship, "street buildings laid out isometrically"),
            (F::Environment, "dim street corner"),
            (F::Theme, "retro gaming"),
            (F::Style, "pixel art"),
            (F::Lighting, "pixelated light and shadow"),
            (F::Composition, "isometric view"),
            (F::Details, "blocky forms"),
            (F::Effects, "dithering"),
            (F::Typography, "pixel font"),
            (F::ColorMood, "limited palette, neon pixels"),
            (F::Quality, "8-bit, 16-bit"),
            (F::Negative, "smooth, blur, vector, high res"),
        ],
    },
    TemplateSeed {
        id: "art-dark-sculpture",
        name: "Dark Myth Sculpture",
        description: "Tense dark-fantasy sculpture photographed as stone.",
        category: TemplateCategory::Art,
        platform: "midjourney",
        fields: &[
            (F::Subject, "a fallen angel statue struggling in agony"),
            (F::SpatialRelationship, "statue standing alone at the center of a dark void"),
            (F::Environment, "empty darkness"),
            (F::Theme, "suffering and redemption"),
            (F::Style, "dark fantasy, sculpture photography"),
            (F::Lighting, "top light, strong chiaroscuro"),
            (F::Composition, "solemn, symmetrical"),
            (F::Details, "marble veining, broken wings"),
            (F::Effects, "smoke"),
            (F::ColorMood, "monochrome from black to white, obsidian and marble"),
            (F::Camera, "telephoto"),
            (F::Quality, "zbrush style, 3d scan"),
            (F::Negative, "color, happy, anime"),
        ],
    },
];

fn build(seed: &TemplateSeed) -> Template {
    let mut structure = PromptStructure::default();
    for (field, value) in seed.fields {
        structure.set_field(*field, *value);
    }
    Template {
        id: seed.id,
        name: seed.name,
        description: seed.description,
        category: seed.category,
        structure,
        recommended_platform: Platform::from_id(seed.platform),
    }
}

pub static TEMPLATES: LazyLock<Vec<Template>> =
    LazyLock::new(|| SEEDS.iter().map(build).collect());

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

pub fn all_templates() -> &'static [Template] {
    &TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static Template> {
    all_templates().iter().find(|t| t.id == id)
}

pub fn templates_in_category(category: TemplateCategory) -> Vec<&'static Template> {
    all_templates()
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::assembly::assemble;
    use crate::types::Language;

    #[test]
    fn every_category_has_a_template() {
        for category in TemplateCategory::ALL {
            assert!(
                !templates_in_category(category).is_empty(),
                "no template for {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn catalog_has_five_templates_per_category() {
        assert_eq!(all_templates().len(), 20);
        for category in TemplateCategory::ALL {
            assert_eq!(templates_in_category(category).len(), 5, "{}", category.as_str());
        }
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<&str> = all_templates().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all_templates().len());
    }

    #[test]
    fn lookup_by_id() {
        let template = find_template("art-ink").unwrap();
        assert_eq!(template.category, TemplateCategory::Art);
        assert_eq!(template.recommended_platform, Platform::Midjourney);
        assert_eq!(template.structure.technical.model, "--niji 6");
        assert!(find_template("missing").is_none());
    }

    #[test]
    fn templates_assemble_for_their_platform() {
        for template in all_templates() {
            assert!(!template.structure.is_blank(), "{}", template.id);
            let prompt = assemble(
                &template.structure,
                &template.recommended_platform,
                Language::English,
            );
            assert!(prompt.contains(&template.structure.subject), "{}", template.id);
        }
    }

    #[test]
    fn category_parsing_is_case_insensitive() {
        assert_eq!(TemplateCategory::from_id("Scene"), Some(TemplateCategory::Scene));
        assert_eq!(TemplateCategory::from_id("vehicles"), None);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(find_template("product-book-cover").unwrap()).unwrap();
        assert_eq!(json["recommendedPlatform"], "midjourney");
        assert_eq!(json["category"], "product");
        assert_eq!(json["structure"]["modifiers"]["typography"], "elegant serif title");
        assert_eq!(json["structure"]["technical"]["aspectRatio"], "2:3");
    }
}
