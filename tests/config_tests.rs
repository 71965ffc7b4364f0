//! Configuration and Color Codec Tests
//!
//! Tests for:
//! - validate(): archetype fallback, default filling, range clamping
//! - Hex color round-tripping
//! - Persisted JSON shape (original field names)

use milliner::config::{
    COLOR_PRESETS, HatConfig, HatType, RawHatConfig, hex_to_rgb, rgb_to_hex, validate,
};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn unknown_type_and_wild_numbers_clamp_into_fedora_ranges() {
    let raw = RawHatConfig {
        hat_type: Some("unknown".to_string()),
        color: None,
        crown_height: Some(999.0),
        brim_size: Some(-5.0),
    };
    let config = validate(&raw);
    assert_eq!(config.hat_type, HatType::Fedora);
    assert!(approx(config.crown_height, 1.5), "crown clamps to fedora max");
    assert!(approx(config.brim_size, 0.8), "brim clamps to fedora min");
    assert_eq!(config.color, "#8B4513");
}

#[test]
fn missing_fields_take_archetype_defaults() {
    let config = validate(&RawHatConfig::default());
    assert_eq!(config.hat_type, HatType::Fedora);
    assert!(approx(config.crown_height, 1.0));
    assert!(approx(config.brim_size, 1.2));
    assert_eq!(config.color, "#8B4513");
}

#[test]
fn explicit_zero_brim_survives_for_beanie() {
    // Zero is a legal beanie minimum, not a missing value.
    let raw = RawHatConfig {
        hat_type: Some("beanie".to_string()),
        brim_size: Some(0.0),
        ..RawHatConfig::default()
    };
    let config = validate(&raw);
    assert_eq!(config.hat_type, HatType::Beanie);
    assert!(approx(config.brim_size, 0.0));
}

#[test]
fn switching_archetype_reclamps_into_new_range() {
    let raw = RawHatConfig {
        hat_type: Some("tophat".to_string()),
        crown_height: Some(0.5), // below the tophat minimum of 1.5
        ..RawHatConfig::default()
    };
    let config = validate(&raw);
    assert_eq!(config.hat_type, HatType::Tophat);
    assert!(approx(config.crown_height, 1.5));
}

#[test]
fn unparseable_color_takes_default() {
    let raw = RawHatConfig {
        color: Some("not-a-color".to_string()),
        ..RawHatConfig::default()
    };
    assert_eq!(validate(&raw).color, "#8B4513");
}

#[test]
fn lowercase_color_normalizes_to_uppercase() {
    let raw = RawHatConfig {
        color: Some("#8b4513".to_string()),
        ..RawHatConfig::default()
    };
    assert_eq!(validate(&raw).color, "#8B4513");
}

// ============================================================================
// Color Codec
// ============================================================================

#[test]
fn color_round_trip() {
    assert_eq!(rgb_to_hex(hex_to_rgb("#8B4513").unwrap()), "#8B4513");
}

#[test]
fn all_presets_round_trip() {
    for preset in COLOR_PRESETS {
        assert_eq!(rgb_to_hex(hex_to_rgb(preset).unwrap()), preset);
    }
}

#[test]
fn hex_parses_known_channels() {
    let rgb = hex_to_rgb("#FF8000").unwrap();
    assert!(approx(rgb.x, 1.0));
    assert!(approx(rgb.y, 128.0 / 255.0));
    assert!(approx(rgb.z, 0.0));
}

#[test]
fn invalid_hex_is_rejected() {
    assert!(hex_to_rgb("").is_none());
    assert!(hex_to_rgb("#FFF").is_none());
    assert!(hex_to_rgb("#GGGGGG").is_none());
    assert!(hex_to_rgb("#8B45131").is_none());
}

#[test]
fn bare_hex_without_hash_parses() {
    assert!(hex_to_rgb("8B4513").is_some());
}

// ============================================================================
// Persisted JSON Shape
// ============================================================================

#[test]
fn serialized_config_uses_original_field_names() {
    let config = HatConfig::default();
    let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(value["type"], "fedora");
    assert_eq!(value["color"], "#8B4513");
    assert!(value["crownHeight"].is_number());
    assert!(value["brimSize"].is_number());
}

#[test]
fn json_round_trip_preserves_config() {
    let config = validate(&RawHatConfig {
        hat_type: Some("bowler".to_string()),
        color: Some("#2F4F4F".to_string()),
        crown_height: Some(1.0),
        brim_size: Some(0.6),
    });
    let restored = HatConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn from_json_fills_missing_fields() {
    let config = HatConfig::from_json(r#"{"type": "tophat"}"#).unwrap();
    assert_eq!(config.hat_type, HatType::Tophat);
    assert!(approx(config.crown_height, 2.0));
    assert!(approx(config.brim_size, 1.0));
}

#[test]
fn from_json_clamps_out_of_range_values() {
    let config =
        HatConfig::from_json(r#"{"type": "beanie", "crownHeight": 99.0, "brimSize": 99.0}"#)
            .unwrap();
    assert!(approx(config.crown_height, 1.8));
    assert!(approx(config.brim_size, 0.3));
}

#[test]
fn malformed_json_fails_as_invalid_config() {
    let err = HatConfig::from_json("{oops").unwrap_err();
    assert!(matches!(err, milliner::MillinerError::InvalidConfig(_)));
}
