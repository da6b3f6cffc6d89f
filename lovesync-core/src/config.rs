use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ConfigError, GeoError, StoreError};
use crate::geo::{FixedGeolocator, HttpGeolocator, Locator};
use crate::store::{Backend, JsonStore, MockRepository};

const APP_DIR: &str = "lovesync";
// taille Body du style egui par défaut
const EGUI_BODY_SIZE: f32 = 12.5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
    pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background_color: [u8; 3],
    pub panel_color: [u8; 3],
    pub accent_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
    pub border_color: [u8; 3],
    pub heart_color: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub font_size: f32,
    pub window_size: [f32; 2],
    pub content_max_width: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Keep items in JSON files instead of the in-memory sample data.
    pub persist: bool,
    /// Overrides `<data_dir>/lovesync`.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// JSON lookup endpoint. Without it the fallback coordinates are used.
    pub endpoint: Option<String>,
    pub request_timeout_seconds: u64,
    pub fallback_latitude: f64,
    pub fallback_longitude: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            // warm blush palette
            background_color: [253, 246, 244],
            panel_color: [255, 255, 255],
            accent_color: [225, 82, 120],
            text_color: [51, 37, 43],
            secondary_text_color: [128, 110, 118],
            border_color: [238, 221, 226],
            heart_color: [239, 68, 68],
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            window_size: [960.0, 800.0],
            content_max_width: 760.0,
        }
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            request_timeout_seconds: 10,
            fallback_latitude: 40.7829,
            fallback_longitude: -73.9654,
        }
    }
}

impl AppConfig {
    /// Récupère le chemin du fichier de configuration
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        let app_config_dir = config_dir.join(APP_DIR);
        std::fs::create_dir_all(&app_config_dir)?;
        Ok(app_config_dir.join("config.json"))
    }

    /// Loads the user config, falling back to (and writing) defaults.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_or_init(&path),
            Err(e) => {
                warn!(error = %e, "no config location, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_or_init(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to load config, using defaults");
                let default_config = Self::default();
                if let Err(save_err) = default_config.save_to(path) {
                    warn!(error = %save_err, "failed to write default config");
                }
                default_config
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl UiConfig {
    /// egui's stock text styles, scaled so that `Body` is `font_size`.
    /// Always starts from the stock sizes, so applying it every frame is stable.
    pub fn text_styles(&self) -> BTreeMap<egui::TextStyle, egui::FontId> {
        let stock = egui::Style::default().text_styles;
        let body = stock
            .get(&egui::TextStyle::Body)
            .map_or(EGUI_BODY_SIZE, |font| font.size);
        let scale = if self.font_size.is_finite() && self.font_size > 0.0 {
            self.font_size / body
        } else {
            1.0
        };
        stock
            .into_iter()
            .map(|(style, font)| (style, egui::FontId::new(font.size * scale, font.family)))
            .collect()
    }
}

impl StorageConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_default()
                .join(APP_DIR)
        })
    }

    /// Builds the repository this config asks for.
    pub async fn open_backend(&self) -> Result<Backend, StoreError> {
        if !self.persist {
            return Ok(Backend::Mock(MockRepository::seeded()));
        }
        let dir = self.resolved_data_dir();
        info!(dir = %dir.display(), "using JSON store");
        let store = JsonStore::open(&dir).await?;
        store.seed_missing().await?;
        Ok(Backend::Json(store))
    }
}

impl GeolocationConfig {
    pub fn build_locator(&self, client: Client) -> Result<Locator, GeoError> {
        match &self.endpoint {
            Some(endpoint) => Ok(Locator::Http(HttpGeolocator::new(
                client,
                endpoint,
                Duration::from_secs(self.request_timeout_seconds),
            )?)),
            None => Ok(Locator::Fixed(FixedGeolocator::new(
                self.fallback_latitude,
                self.fallback_longitude,
            ))),
        }
    }
}

fn rgb(c: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

// Utilitaires pour convertir les couleurs
impl ThemeConfig {
    pub fn background_color32(&self) -> egui::Color32 {
        rgb(self.background_color)
    }

    pub fn panel_color32(&self) -> egui::Color32 {
        rgb(self.panel_color)
    }

    pub fn accent_color32(&self) -> egui::Color32 {
        rgb(self.accent_color)
    }

    pub fn text_color32(&self) -> egui::Color32 {
        rgb(self.text_color)
    }

    pub fn secondary_text_color32(&self) -> egui::Color32 {
        rgb(self.secondary_text_color)
    }

    pub fn border_color32(&self) -> egui::Color32 {
        rgb(self.border_color)
    }

    pub fn heart_color32(&self) -> egui::Color32 {
        rgb(self.heart_color)
    }
}
