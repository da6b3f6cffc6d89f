mod app;
mod pages;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use lovesync_core::config::AppConfig;
use lovesync_core::{Backend, Locator, MockRepository};
use tokio::runtime::Runtime;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::{AppInit, LoveSyncApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let config = AppConfig::load();
    let backend = load_backend(&runtime, &config);
    let locator = build_locator(&config);
    let [width, height] = config.ui.window_size;

    let init = AppInit {
        runtime,
        backend,
        locator,
        config,
    };

    eframe::run_native(
        "LoveSync",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([width, height])
                .with_min_inner_size([420.0, 500.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            install_emoji_friendly_fonts(&cc.egui_ctx);
            Box::new(LoveSyncApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_backend(runtime: &Arc<Runtime>, config: &AppConfig) -> Backend {
    match runtime.block_on(config.storage.open_backend()) {
        Ok(backend) => backend,
        Err(e) => {
            warn!(error = %e, "failed to open storage, falling back to sample data");
            Backend::Mock(MockRepository::seeded())
        }
    }
}

fn build_locator(config: &AppConfig) -> Locator {
    let fallback = Locator::Fixed(lovesync_core::FixedGeolocator::new(
        config.geolocation.fallback_latitude,
        config.geolocation.fallback_longitude,
    ));
    let client = match reqwest_client() {
        Some(client) => client,
        None => return fallback,
    };
    config.geolocation.build_locator(client).unwrap_or_else(|e| {
        warn!(error = %e, "invalid geolocation endpoint, using fallback coordinates");
        fallback
    })
}

fn reqwest_client() -> Option<reqwest::Client> {
    reqwest::ClientBuilder::new()
        .user_agent("LoveSync/0.1")
        .build()
        .map_err(|e| warn!(error = %e, "failed to build HTTP client"))
        .ok()
}

fn install_emoji_friendly_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Polices candidates (Linux) pour les cœurs et pictogrammes
    let candidates = [
        "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
        "/usr/share/fonts/truetype/noto/NotoEmoji-Regular.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansSymbols2-Regular.otf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ];

    let mut added = 0usize;
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let name = format!("embedded-{added}");
        fonts.font_data.insert(name.clone(), egui::FontData::from_owned(bytes));
        // en dernier: sert de repli seulement
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push(name.clone());
        }
        added += 1;
    }

    if added > 0 {
        ctx.set_fonts(fonts);
    }
}
