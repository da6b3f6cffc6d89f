use egui::TextStyle;
use lovesync_core::config::{AppConfig, StorageConfig, UiConfig};
use lovesync_core::{Backend, Repository, ViewKind};

fn temp_dir(prefix: &str) -> std::path::PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "{}_{}",
        prefix,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

#[test]
fn missing_config_writes_defaults() {
    let dir = temp_dir("lovesync_config_missing");
    let path = dir.join("config.json");

    let config = AppConfig::load_or_init(&path);
    assert!(!config.storage.persist);
    assert!(config.geolocation.endpoint.is_none());
    assert!(path.exists());

    let reread = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(reread.ui.font_size, config.ui.font_size);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn partial_config_keeps_defaults_for_missing_fields() {
    let dir = temp_dir("lovesync_config_partial");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(
        &path,
        r#"{ "geolocation": { "endpoint": "https://ipapi.co/json" }, "ui": { "font_size": 16.0 } }"#,
    )
    .unwrap();

    let config = AppConfig::load_or_init(&path);
    assert_eq!(config.geolocation.endpoint.as_deref(), Some("https://ipapi.co/json"));
    assert_eq!(config.geolocation.request_timeout_seconds, 10);
    assert_eq!(config.ui.font_size, 16.0);
    assert_eq!(config.ui.content_max_width, 760.0);
    assert_eq!(config.theme.heart_color, [239, 68, 68]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = temp_dir("lovesync_config_broken");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let config = AppConfig::load_or_init(&path);
    assert!(!config.storage.persist);
    // rewritten with valid defaults
    assert!(AppConfig::load_from_file(&path).is_ok());
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn storage_config_picks_the_backend() {
    let backend = StorageConfig::default().open_backend().await.unwrap();
    assert!(matches!(backend, Backend::Mock(_)));

    let dir = temp_dir("lovesync_config_store");
    let storage = StorageConfig {
        persist: true,
        data_dir: Some(dir.clone()),
    };
    assert_eq!(storage.resolved_data_dir(), dir);
    let backend = storage.open_backend().await.unwrap();
    assert!(matches!(backend, Backend::Json(_)));
    assert!(dir.join("affirmations.json").exists());
    assert_eq!(backend.load_all(ViewKind::Affirmations).await.unwrap().len(), 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn font_size_sets_body_and_scales_other_styles() {
    let stock = egui::Style::default().text_styles;
    let stock_body = stock[&TextStyle::Body].size;

    let ui = UiConfig {
        font_size: stock_body * 2.0,
        ..UiConfig::default()
    };
    let styles = ui.text_styles();
    assert_eq!(styles.len(), stock.len());
    assert!((styles[&TextStyle::Body].size - stock_body * 2.0).abs() < 1e-4);
    for (style, font) in &stock {
        let scaled = &styles[style];
        assert!((scaled.size - font.size * 2.0).abs() < 1e-4, "{style:?}");
        assert_eq!(scaled.family, font.family);
    }

    // default config: body text follows font_size
    let default_styles = UiConfig::default().text_styles();
    assert!((default_styles[&TextStyle::Body].size - 14.0).abs() < 1e-4);
    assert!(default_styles[&TextStyle::Heading].size > stock[&TextStyle::Heading].size);
}

#[test]
fn invalid_font_size_keeps_stock_styles() {
    let stock = egui::Style::default().text_styles;
    for font_size in [0.0, -3.0, f32::NAN] {
        let ui = UiConfig {
            font_size,
            ..UiConfig::default()
        };
        assert_eq!(ui.text_styles(), stock);
    }
}
