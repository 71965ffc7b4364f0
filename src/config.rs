//! Hat archetypes, parameter ranges, configuration validation and the
//! `#RRGGBB` color codec.
//!
//! Every configuration coming from the outside (UI glue, the persisted JSON
//! store) passes through [`validate`], which fills missing fields with the
//! archetype's defaults and clamps numeric ranges. Validation never fails;
//! an unknown archetype name resolves to [`HatType::Fedora`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The five hat archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HatType {
    Fedora,
    Bowler,
    Baseball,
    Beanie,
    Tophat,
}

impl HatType {
    pub const ALL: [HatType; 5] = [
        HatType::Fedora,
        HatType::Bowler,
        HatType::Baseball,
        HatType::Beanie,
        HatType::Tophat,
    ];

    /// The wire/JSON name of this archetype.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HatType::Fedora => "fedora",
            HatType::Bowler => "bowler",
            HatType::Baseball => "baseball",
            HatType::Beanie => "beanie",
            HatType::Tophat => "tophat",
        }
    }

    /// Resolves an archetype by name. Unknown names fall back to `Fedora`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bowler" => HatType::Bowler,
            "baseball" => HatType::Baseball,
            "beanie" => HatType::Beanie,
            "tophat" => HatType::Tophat,
            _ => HatType::Fedora,
        }
    }

    /// Parameter ranges for this archetype.
    #[must_use]
    pub fn params(self) -> &'static HatParams {
        &PARAMS[self as usize]
    }
}

/// A clamped parameter range with its default value.
#[derive(Debug, Clone, Copy)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl ParamRange {
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Per-archetype display label and parameter ranges.
#[derive(Debug, Clone, Copy)]
pub struct HatParams {
    pub label: &'static str,
    pub crown_height: ParamRange,
    pub brim_size: ParamRange,
}

const fn range(min: f32, max: f32, default: f32) -> ParamRange {
    ParamRange { min, max, default }
}

// Indexed by HatType discriminant.
static PARAMS: [HatParams; 5] = [
    HatParams {
        label: "Fedora",
        crown_height: range(0.5, 1.5, 1.0),
        brim_size: range(0.8, 2.0, 1.2),
    },
    HatParams {
        label: "Bowler",
        crown_height: range(0.6, 1.2, 0.8),
        brim_size: range(0.5, 1.2, 0.8),
    },
    HatParams {
        label: "Baseball Cap",
        crown_height: range(0.5, 1.0, 0.7),
        brim_size: range(0.8, 1.5, 1.0),
    },
    HatParams {
        label: "Beanie",
        crown_height: range(0.8, 1.8, 1.2),
        brim_size: range(0.0, 0.3, 0.1),
    },
    HatParams {
        label: "Top Hat",
        crown_height: range(1.5, 2.5, 2.0),
        brim_size: range(0.8, 1.5, 1.0),
    },
];

/// Color presets offered by the UI glue.
pub const COLOR_PRESETS: [&str; 6] = [
    "#8B4513", // Saddle Brown
    "#000000", // Black
    "#654321", // Dark Brown
    "#2F4F4F", // Dark Slate Gray
    "#800000", // Maroon
    "#191970", // Midnight Blue
];

const DEFAULT_COLOR: &str = "#8B4513";

/// A validated hat configuration.
///
/// Created and replaced wholesale on every user edit; immutable once handed
/// to the geometry generator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HatConfig {
    #[serde(rename = "type")]
    pub hat_type: HatType,
    pub color: String,
    #[serde(rename = "crownHeight")]
    pub crown_height: f32,
    #[serde(rename = "brimSize")]
    pub brim_size: f32,
}

impl Default for HatConfig {
    fn default() -> Self {
        Self {
            hat_type: HatType::Fedora,
            color: DEFAULT_COLOR.to_string(),
            crown_height: 1.0,
            brim_size: 1.0,
        }
    }
}

impl HatConfig {
    /// The base color as normalized RGB floats.
    #[must_use]
    pub fn rgb(&self) -> Vec3 {
        // The color field is normalized by validate(), but a hand-built
        // config may carry anything.
        hex_to_rgb(&self.color).unwrap_or(Vec3::new(0.5, 0.3, 0.1))
    }

    pub fn to_json(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and validates a persisted configuration. Only malformed JSON
    /// fails; out-of-range or unknown values are clamped and defaulted.
    pub fn from_json(json: &str) -> crate::errors::Result<Self> {
        let raw: RawHatConfig = serde_json::from_str(json)
            .map_err(|e| crate::errors::MillinerError::InvalidConfig(e.to_string()))?;
        Ok(validate(&raw))
    }
}

/// An unvalidated configuration as received from the UI or the store.
/// Absent fields take archetype defaults during [`validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHatConfig {
    #[serde(rename = "type", default)]
    pub hat_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(rename = "crownHeight", default)]
    pub crown_height: Option<f32>,
    #[serde(rename = "brimSize", default)]
    pub brim_size: Option<f32>,
}

impl From<&HatConfig> for RawHatConfig {
    fn from(config: &HatConfig) -> Self {
        Self {
            hat_type: Some(config.hat_type.name().to_string()),
            color: Some(config.color.clone()),
            crown_height: Some(config.crown_height),
            brim_size: Some(config.brim_size),
        }
    }
}

/// Validates a raw configuration: resolves the archetype (unknown names fall
/// back to fedora), fills missing fields with the archetype defaults, clamps
/// numerics into the archetype ranges, and normalizes the color to an
/// uppercase `#RRGGBB` string (unparseable colors take the default).
#[must_use]
pub fn validate(raw: &RawHatConfig) -> HatConfig {
    let hat_type = raw
        .hat_type
        .as_deref()
        .map_or(HatType::Fedora, HatType::from_name);
    let params = hat_type.params();

    let color = raw
        .color
        .as_deref()
        .and_then(hex_to_rgb)
        .map_or_else(|| DEFAULT_COLOR.to_string(), rgb_to_hex);

    HatConfig {
        hat_type,
        color,
        crown_height: params
            .crown_height
            .clamp(raw.crown_height.unwrap_or(params.crown_height.default)),
        brim_size: params
            .brim_size
            .clamp(raw.brim_size.unwrap_or(params.brim_size.default)),
    }
}

/// Parses `#RRGGBB` (leading `#` optional, case-insensitive) into normalized
/// RGB floats. Returns `None` for anything else.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Vec3::new(
        f32::from(channel(0)?) / 255.0,
        f32::from(channel(2)?) / 255.0,
        f32::from(channel(4)?) / 255.0,
    ))
}

/// Formats normalized RGB floats as an uppercase `#RRGGBB` string.
/// Round-trips exactly with [`hex_to_rgb`] for 8-bit channel values.
#[must_use]
pub fn rgb_to_hex(rgb: Vec3) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02X}{:02X}{:02X}",
        channel(rgb.x),
        channel(rgb.y),
        channel(rgb.z)
    )
}
