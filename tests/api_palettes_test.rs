//! Integration tests for the palettes endpoint.

mod common;

use common::{assert_ok, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_palettes_lists_configured_palettes() {
    let app = TestApp::new();

    let response = app.get("/api/palettes").await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["default_palette"], "square");

    let palettes = json["palettes"].as_array().unwrap();
    let ids: Vec<&str> = palettes.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["all", "round", "square"]);

    let all = &palettes[0];
    assert_eq!(all["colors"], 227);
    assert_eq!(all["label"], "All colors");
    assert_eq!(palettes[1]["preview_style"], "round");
    assert_eq!(palettes[2]["preview_style"], "square");
}

#[tokio::test]
async fn test_palettes_lists_sizes_and_bounds() {
    let app = TestApp::new();

    let json: serde_json::Value = app.get("/api/palettes").await.json();

    let sizes: Vec<u64> = json["sizes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["size"].as_u64().unwrap())
        .collect();
    assert_eq!(sizes, vec![16, 32, 48, 64, 96, 128]);

    let standard: Vec<u64> = json["sizes"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["standard"] == true)
        .map(|s| s["size"].as_u64().unwrap())
        .collect();
    assert_eq!(standard, vec![32, 48]);
    assert_eq!(json["sizes"][0]["label"], "16×16");

    assert_eq!(json["preview_cell"]["default"], 10);
    assert_eq!(json["preview_cell"]["min"], 5);
    assert_eq!(json["preview_cell"]["max"], 20);
    assert_eq!(json["instructions_cell"]["default"], 24);
    assert_eq!(json["instructions_cell"]["min"], 8);
    assert_eq!(json["instructions_cell"]["max"], 32);
}

#[tokio::test]
async fn test_palette_from_external_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.yaml"),
        r#"
default_palette: mono
palettes:
  mono:
    file: mono.yaml
    label: Black and white
"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("mono.yaml"),
        r##"
- ["Black", "#05131D", 5, 19, 29]
- ["White", "#FFFFFF", 255, 255, 255]
"##,
    )
    .unwrap();

    let loader = brickmosaic::assets::AssetLoader::new(
        Some(dir.path().to_path_buf()),
        None,
        Some(dir.path().join("config.yaml")),
    );
    let state =
        brickmosaic::server::create_app_state(std::sync::Arc::new(loader)).unwrap();
    let store = state.service.store();
    assert_eq!(store.default_id(), "mono");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("mono").unwrap().palette.len(), 2);
}
