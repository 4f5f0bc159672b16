//! The shipped piece catalog must load and agree with its own JSON.

use grid_sandbox::core::{Palette, COLOR_PALETTE};

const CATALOG: &str = include_str!("../piece_config.json");

#[test]
fn test_shipped_catalog_loads_enabled_entries_in_order() {
    let palette = Palette::from_json(CATALOG).unwrap();

    let json: serde_json::Value = serde_json::from_str(CATALOG).unwrap();
    let entries = json["pieces"].as_array().unwrap();
    let enabled: Vec<&str> = entries
        .iter()
        .filter(|e| e["enabled"].as_bool().unwrap_or(true))
        .map(|e| e["id"].as_str().unwrap())
        .collect();

    assert_eq!(enabled.len(), 10);
    let kinds: Vec<&str> = palette.templates().iter().map(|t| t.kind.as_str()).collect();
    assert_eq!(kinds, enabled);
}

#[test]
fn test_shipped_catalog_patterns_match_json() {
    let palette = Palette::from_json(CATALOG).unwrap();
    let json: serde_json::Value = serde_json::from_str(CATALOG).unwrap();

    for template in palette.templates() {
        let entry = json["pieces"]
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["id"] == template.kind.as_str())
            .unwrap();
        let rows: Vec<Vec<u8>> = serde_json::from_value(entry["pattern"].clone()).unwrap();
        assert_eq!(template.pattern.to_rows(), rows, "pattern of {}", template.kind);
    }
}

#[test]
fn test_colors_follow_catalog_position() {
    let palette = Palette::from_json(CATALOG).unwrap();
    let v3 = palette.templates().iter().find(|t| t.kind == "V3").unwrap();
    assert_eq!(v3.color, COLOR_PALETTE[9]);
    assert_eq!(palette.get(0).unwrap().color, COLOR_PALETTE[0]);
}

#[test]
fn test_disabled_entries_can_be_enabled() {
    let json: serde_json::Value = serde_json::from_str(CATALOG).unwrap();
    let mut json = json;
    for entry in json["pieces"].as_array_mut().unwrap() {
        entry["enabled"] = serde_json::Value::Bool(true);
    }
    let palette = Palette::from_json(&json.to_string()).unwrap();
    assert_eq!(palette.len(), 13);

    let x = palette.templates().iter().find(|t| t.kind == "X").unwrap();
    assert_eq!(x.color, grid_sandbox::types::Rgb::new(0xff, 0x69, 0xb4));
}
