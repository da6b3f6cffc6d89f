use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use eframe::egui::{self, Color32, Rounding, Stroke};
use lovesync_core::config::AppConfig;
use lovesync_core::views::ShareRequest;
use lovesync_core::{
    Backend, FeedItem, GeoError, Geolocator, Locator, MountedView, Page, Position, Repository,
    Router, Session, ViewKind,
};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::pages::{self, Effects, PageCtx};

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub backend: Backend,
    pub locator: Locator,
    pub config: AppConfig,
}

#[derive(Default)]
struct SignInForm {
    user_name: String,
    partner_name: String,
}

pub struct LoveSyncApp {
    runtime: Arc<Runtime>,
    backend: Backend,
    locator: Locator,
    config: AppConfig,
    // None tant que personne n'est connecté
    router: Option<Router>,
    sign_in: SignInForm,
    geo_tx: mpsc::Sender<(ShareRequest, Result<Position, GeoError>)>,
    geo_rx: mpsc::Receiver<(ShareRequest, Result<Position, GeoError>)>,
    last_tick: Option<Instant>,
    menu_open: bool,
}

impl LoveSyncApp {
    pub fn new(init: AppInit) -> Self {
        let (geo_tx, geo_rx) = mpsc::channel(4);
        Self {
            runtime: init.runtime,
            backend: init.backend,
            locator: init.locator,
            config: init.config,
            router: None,
            sign_in: SignInForm::default(),
            geo_tx,
            geo_rx,
            last_tick: None,
            menu_open: false,
        }
    }

    fn setup_theme(&self, ctx: &egui::Context) {
        let theme = &self.config.theme;
        let mut style = (*ctx.style()).clone();

        let accent = theme.accent_color32();
        let border = Stroke::new(1.0, theme.border_color32());
        let text = theme.text_color32();

        style.visuals.dark_mode = false;
        style.visuals.panel_fill = theme.background_color32();
        style.visuals.window_fill = theme.panel_color32();
        style.visuals.extreme_bg_color = theme.panel_color32();
        style.visuals.faint_bg_color = theme.background_color32();
        style.visuals.override_text_color = Some(text);

        style.visuals.widgets.noninteractive.bg_fill = theme.panel_color32();
        style.visuals.widgets.noninteractive.bg_stroke = border;
        style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text);

        style.visuals.widgets.inactive.bg_fill = theme.panel_color32();
        style.visuals.widgets.inactive.weak_bg_fill = theme.panel_color32();
        style.visuals.widgets.inactive.bg_stroke = border;

        style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent);
        style.visuals.widgets.active.bg_fill = accent;
        style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

        style.visuals.selection.bg_fill = accent.linear_multiply(0.35);
        style.visuals.selection.stroke = Stroke::new(1.0, accent);

        let rounding = Rounding::same(8.0);
        style.visuals.widgets.noninteractive.rounding = rounding;
        style.visuals.widgets.inactive.rounding = rounding;
        style.visuals.widgets.hovered.rounding = rounding;
        style.visuals.widgets.active.rounding = rounding;

        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        style.text_styles = self.config.ui.text_styles();

        ctx.set_style(style);
    }

    fn navigate(&mut self, page: Page) {
        let Some(router) = self.router.as_mut() else {
            return;
        };
        self.runtime.block_on(router.navigate(page, &self.backend));
        self.last_tick = None;
        self.menu_open = false;
    }

    fn persist(&self, kind: ViewKind, item: &FeedItem) {
        if let Err(e) = self.runtime.block_on(self.backend.save(kind, item)) {
            warn!(error = %e, kind = kind.key(), id = %item.id, "failed to save item");
        }
    }

    fn request_location(&self, request: ShareRequest) {
        let locator = self.locator.clone();
        let tx = self.geo_tx.clone();
        self.runtime.spawn(async move {
            let result = locator.current_position().await;
            if tx.send((request, result)).await.is_err() {
                warn!("location receiver dropped");
            }
        });
    }

    // Résultats de géolocalisation reçus depuis la tâche Tokio
    fn drain_location_results(&mut self) {
        while let Ok((request, result)) = self.geo_rx.try_recv() {
            let shared = match self.router.as_mut().map(Router::parts_mut) {
                Some((session, MountedView::Location(location))) => {
                    location.complete_share(request, result, &session.user_name, Utc::now())
                }
                _ => {
                    debug!("location result arrived after leaving the page, dropping");
                    None
                }
            };
            if let Some(item) = shared {
                self.persist(ViewKind::Locations, &item);
            }
        }
    }

    // Avance le minuteur d'écoute à partir de l'horloge des frames
    fn tick_listening(&mut self, ctx: &egui::Context) {
        let Some(MountedView::Checkins(checkins)) = self.router.as_mut().map(Router::view_mut) else {
            self.last_tick = None;
            return;
        };
        if !checkins.timer().is_listening() {
            self.last_tick = None;
            return;
        }
        let now = Instant::now();
        let last = *self.last_tick.get_or_insert(now);
        let whole = now.duration_since(last).as_secs();
        if whole > 0 {
            checkins.tick(whole);
            self.last_tick = Some(last + Duration::from_secs(whole));
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn draw_sign_in(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.label(
                    egui::RichText::new("❤")
                        .size(48.0)
                        .color(self.config.theme.accent_color32()),
                );
                ui.heading(egui::RichText::new("LoveSync").strong().size(28.0));
                ui.label(egui::RichText::new("Your private space for two").weak());
                ui.add_space(20.0);

                ui.set_max_width(320.0);
                ui.label("Your name");
                ui.text_edit_singleline(&mut self.sign_in.user_name);
                ui.label("Your partner's name");
                ui.text_edit_singleline(&mut self.sign_in.partner_name);
                ui.add_space(10.0);

                let session = Session::new(&self.sign_in.user_name, &self.sign_in.partner_name);
                if ui
                    .add_enabled(session.is_some(), egui::Button::new("Enter"))
                    .clicked()
                {
                    if let Some(session) = session {
                        info!(user = %session.user_name, "session started");
                        self.router = Some(Router::new(session));
                    }
                }
            });
        });
    }

    fn draw_top_bar(&mut self, ctx: &egui::Context) {
        let Some(current) = self.router.as_ref().map(Router::current) else {
            return;
        };
        let mut target = None;
        let mut sign_out = false;
        let compact = ctx.screen_rect().width() < 760.0;

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("❤ LoveSync")
                        .strong()
                        .size(20.0)
                        .color(self.config.theme.accent_color32()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("⏏").on_hover_text("Sign out").clicked() {
                        sign_out = true;
                    }
                    if compact {
                        ui.toggle_value(&mut self.menu_open, "☰");
                    } else {
                        for page in Page::ALL.iter().rev() {
                            if ui.selectable_label(current == *page, page.label()).clicked() {
                                target = Some(*page);
                            }
                        }
                    }
                });
            });
            if compact && self.menu_open {
                ui.separator();
                egui::Grid::new("mobile_nav").num_columns(2).show(ui, |ui| {
                    for (i, page) in Page::ALL.iter().enumerate() {
                        if ui.selectable_label(current == *page, page.label()).clicked() {
                            target = Some(*page);
                        }
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
            }
            ui.add_space(4.0);
        });

        if sign_out {
            info!("session ended");
            self.router = None;
            self.last_tick = None;
            self.menu_open = false;
            return;
        }
        if let Some(page) = target {
            self.navigate(page);
        }
    }

    fn draw_main_content(&mut self, ctx: &egui::Context) {
        let Some(router) = self.router.as_mut() else {
            return;
        };
        let mut fx = Effects::default();
        let (session, view) = router.parts_mut();
        let cx = PageCtx {
            session,
            theme: &self.config.theme,
            now: Utc::now(),
        };
        let max_width = self.config.ui.content_max_width;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    match view {
                        MountedView::Home => pages::draw_home(ui, &cx, &mut fx),
                        MountedView::Memories(gallery) => {
                            pages::draw_memories(ctx, ui, gallery, &cx, &mut fx)
                        }
                        MountedView::Letters(letters) => pages::draw_letters(ui, letters, &cx, &mut fx),
                        MountedView::Checkins(checkins) => {
                            pages::draw_checkins(ui, checkins, &cx, &mut fx)
                        }
                        MountedView::Affirmations(feed) => {
                            pages::draw_affirmations(ui, feed, &cx, &mut fx)
                        }
                        MountedView::Location(location) => {
                            pages::draw_location(ui, location, &cx, &mut fx)
                        }
                        MountedView::Settings => pages::draw_settings(ui),
                    }
                });
        });

        for (kind, item) in &fx.saves {
            self.persist(*kind, item);
        }
        if let Some(request) = fx.share_location {
            self.request_location(request);
        }
        if let Some(page) = fx.navigate {
            self.navigate(page);
        }
    }
}

impl eframe::App for LoveSyncApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.setup_theme(ctx);

        if self.router.is_none() {
            self.draw_sign_in(ctx);
            return;
        }

        self.drain_location_results();
        self.tick_listening(ctx);

        self.draw_top_bar(ctx);
        self.draw_main_content(ctx);

        if self
            .router
            .as_ref()
            .is_some_and(|r| matches!(r.view(), MountedView::Location(l) if l.is_sharing()))
        {
            // attendre la réponse de géolocalisation
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
