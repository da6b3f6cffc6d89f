use chrono::{DateTime, Local, NaiveDate, Utc};
use eframe::egui::{self, Color32, RichText};
use lovesync_core::config::ThemeConfig;
use lovesync_core::expand::needs_toggle;
use lovesync_core::models::{parse_timestamp, AttachmentKind, MediaKind, PromptCategory};
use lovesync_core::views::{
    prompt_for_day, AffirmationsFeed, CheckinMode, DailyCheckins, LocationSharing, LoveLetters,
    MemoriesGallery, MemoryDraft, ShareRequest,
};
use lovesync_core::{map_url, Details, FeedItem, Page, Position, Session, ViewKind};

/// What a page asked for while being drawn; applied by the app once the frame's UI is done.
#[derive(Default)]
pub struct Effects {
    pub saves: Vec<(ViewKind, FeedItem)>,
    pub navigate: Option<Page>,
    pub share_location: Option<ShareRequest>,
}

impl Effects {
    fn save(&mut self, kind: ViewKind, item: Option<FeedItem>) {
        if let Some(item) = item {
            self.saves.push((kind, item));
        }
    }
}

pub struct PageCtx<'a> {
    pub session: &'a Session,
    pub theme: &'a ThemeConfig,
    pub now: DateTime<Utc>,
}

fn when(created_at: &str) -> String {
    // dates sans heure (check-ins, souvenirs)
    if NaiveDate::parse_from_str(created_at, "%Y-%m-%d").is_ok() {
        return parse_timestamp(created_at)
            .map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| created_at.to_owned());
    }
    parse_timestamp(created_at)
        .map(|dt| dt.with_timezone(&Local).format("%d/%m/%Y at %H:%M").to_string())
        .unwrap_or_else(|| created_at.to_owned())
}

fn page_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).strong().size(22.0));
    ui.label(RichText::new(subtitle).weak().size(13.0));
    ui.add_space(6.0);
}

fn new_badge(ui: &mut egui::Ui, theme: &ThemeConfig, text: &str) {
    ui.label(
        RichText::new(text)
            .color(Color32::WHITE)
            .background_color(theme.accent_color32())
            .size(12.0),
    );
}

fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let inner = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner;
    ui.add_space(6.0);
    inner
}

fn empty_state(ui: &mut egui::Ui, icon: &str, title: &str, hint: &str) -> bool {
    let mut clicked = false;
    card(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(RichText::new(icon).size(36.0));
            ui.label(RichText::new(title).strong().size(16.0));
            ui.label(RichText::new(hint).weak());
            ui.add_space(6.0);
            clicked = ui.button("Get started").clicked();
            ui.add_space(30.0);
        });
    });
    clicked
}

pub fn draw_home(ui: &mut egui::Ui, cx: &PageCtx<'_>, fx: &mut Effects) {
    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        ui.label(RichText::new("❤").size(48.0).color(cx.theme.accent_color32()));
        ui.heading(RichText::new("Welcome to LoveSync").strong().size(26.0));
        ui.label(
            RichText::new(format!(
                "Your private space with {} to connect, share memories, and strengthen your bond together.",
                cx.session.partner_name
            ))
            .weak(),
        );
        ui.add_space(16.0);
    });

    const CARDS: [(Page, &str, &str); 4] = [
        (Page::Memories, "📷 Memories", "Share photos and videos of your beautiful moments together."),
        (Page::Letters, "💌 Love Letters", "Write heartfelt messages to express your deepest feelings."),
        (Page::Affirmations, "👥 Love Feed", "Share daily affirmations and appreciation for each other."),
        (Page::Location, "📍 Location", "Share your whereabouts and stay connected throughout the day."),
    ];

    egui::Grid::new("home_cards")
        .num_columns(2)
        .spacing(egui::vec2(12.0, 12.0))
        .show(ui, |ui| {
            for (i, (page, title, desc)) in CARDS.iter().enumerate() {
                let response = egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(12.0))
                    .show(ui, |ui| {
                        ui.set_width(280.0);
                        ui.set_min_height(70.0);
                        ui.label(RichText::new(*title).strong().size(16.0));
                        ui.label(RichText::new(*desc).weak());
                        ui.button("Open").clicked()
                    });
                if response.inner {
                    fx.navigate = Some(*page);
                }
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });
}

pub fn draw_settings(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(RichText::new("Settings coming soon!").size(16.0));
    });
}

pub fn draw_affirmations(
    ui: &mut egui::Ui,
    feed: &mut AffirmationsFeed,
    cx: &PageCtx<'_>,
    fx: &mut Effects,
) {
    let unread = feed.unread_count();
    ui.horizontal(|ui| {
        ui.heading(RichText::new("Love Feed").strong().size(22.0));
        if unread > 0 {
            new_badge(ui, cx.theme, &format!("{unread} new"));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("➕ New Affirmation").clicked() {
                feed.start_compose();
            }
            if unread > 0 && ui.small_button("Mark all read").clicked() {
                for item in feed.mark_all_read() {
                    fx.saves.push((ViewKind::Affirmations, item));
                }
            }
        });
    });
    ui.label(RichText::new("Share affirmations and appreciation").weak().size(13.0));
    ui.add_space(6.0);

    if feed.composer.is_composing() {
        let mut submit = false;
        let mut cancel = false;
        let can_submit = feed.composer.can_submit();
        card(ui, |ui| {
            ui.label(RichText::new("❤ Share Your Love").strong().size(16.0));
            if let Some(draft) = feed.composer.draft_mut() {
                ui.add(
                    egui::TextEdit::multiline(draft)
                        .hint_text("Write something beautiful about your partner... Express your gratitude, share what you love about them, or send encouragement for their day.")
                        .desired_rows(5)
                        .desired_width(f32::INFINITY),
                );
            }
            ui.horizontal(|ui| {
                submit = ui.add_enabled(can_submit, egui::Button::new("Share Love")).clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });
        if submit {
            fx.save(ViewKind::Affirmations, feed.submit(&cx.session.user_name, cx.now));
        } else if cancel {
            feed.cancel_compose();
        }
    }

    if feed.items().is_empty() {
        if empty_state(ui, "❤", "No affirmations yet", "Start spreading love with your first affirmation") {
            feed.start_compose();
        }
        return;
    }

    let items: Vec<FeedItem> = feed.items().iter().cloned().collect();
    for item in items {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&item.author).strong());
                ui.label(RichText::new(when(&item.created_at)).weak().size(12.0));
                if !item.read {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        new_badge(ui, cx.theme, "New");
                    });
                }
            });
            let body = ui.add(
                egui::Label::new(RichText::new(&item.content).size(14.0))
                    .wrap(true)
                    .sense(egui::Sense::click()),
            );
            if body.clicked() {
                fx.save(ViewKind::Affirmations, feed.open(&item.id));
            }
            ui.horizontal(|ui| {
                let mut label = String::from(if item.hearted { "♥" } else { "♡" });
                if item.hearts_count > 0 {
                    label.push_str(&format!(" {}", item.hearts_count));
                }
                label.push_str(if item.hearted { " Loved" } else { " Love" });
                let text = if item.hearted {
                    RichText::new(label).color(cx.theme.heart_color32())
                } else {
                    RichText::new(label)
                };
                if ui.small_button(text).clicked() {
                    fx.save(ViewKind::Affirmations, feed.toggle_heart(&item.id));
                }
            });
        });
    }
}

pub fn draw_letters(ui: &mut egui::Ui, letters: &mut LoveLetters, cx: &PageCtx<'_>, fx: &mut Effects) {
    if letters.composer.is_composing() {
        let mut send = false;
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Write a Love Letter").strong().size(22.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    letters.composer.cancel();
                }
            });
        });
        let can_send = letters.composer.can_submit();
        if let Some(draft) = letters.composer.draft_mut() {
            card(ui, |ui| {
                ui.label(
                    RichText::new(format!("✒ To {}", cx.session.partner_name))
                        .strong()
                        .size(16.0),
                );
                ui.add(
                    egui::TextEdit::multiline(draft)
                        .hint_text("Pour your heart out... Write about your feelings, memories, dreams for the future together...")
                        .desired_rows(14)
                        .desired_width(f32::INFINITY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    send = ui.add_enabled(can_send, egui::Button::new("Send Letter")).clicked();
                });
            });
        }
        if send {
            fx.save(
                ViewKind::Letters,
                letters.submit(&cx.session.user_name, &cx.session.partner_name, cx.now),
            );
        }
        return;
    }

    ui.horizontal(|ui| {
        ui.vertical(|ui| page_header(ui, "Love Letters", "Heartfelt messages between you and your partner"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✒ Write Letter").clicked() {
                letters.composer.start();
            }
        });
    });

    if letters.items().is_empty() {
        if empty_state(ui, "✒", "No letters yet", "Start expressing your love with your first letter") {
            letters.composer.start();
        }
        return;
    }

    let items: Vec<FeedItem> = letters.items().iter().cloned().collect();
    for item in items {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("From {}", item.author)).strong());
                ui.label(RichText::new(format!("📅 {}", when(&item.created_at))).weak().size(12.0));
                if !item.read {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        new_badge(ui, cx.theme, "New");
                    });
                }
            });
            let body = ui.add(
                egui::Label::new(RichText::new(letters.display(&item).into_owned()).size(14.0))
                    .wrap(true)
                    .sense(egui::Sense::click()),
            );
            if body.clicked() {
                fx.save(ViewKind::Letters, letters.open(&item.id));
            }
            if needs_toggle(&item.content) {
                let label = if letters.is_expanded(&item.id) { "Show Less ⏶" } else { "Read More ⏷" };
                if ui.small_button(label).clicked() {
                    letters.toggle_expanded(&item.id);
                }
            }
            if let Details::Letter { attachments, .. } = &item.details {
                if !attachments.is_empty() {
                    ui.separator();
                    ui.label(RichText::new("Attachments").strong().size(13.0));
                    ui.horizontal_wrapped(|ui| {
                        for attachment in attachments {
                            let icon = match attachment.kind {
                                AttachmentKind::Image => "🖼",
                                AttachmentKind::Voice => "🎤",
                            };
                            ui.label(format!("{icon} {}", attachment.name))
                                .on_hover_text(&attachment.url);
                        }
                    });
                }
            }
        });
    }
}

pub fn draw_memories(
    ctx: &egui::Context,
    ui: &mut egui::Ui,
    gallery: &mut MemoriesGallery,
    cx: &PageCtx<'_>,
    fx: &mut Effects,
) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| page_header(ui, "Our Memories", "Photos and videos of your moments together"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⬆ Upload").clicked() {
                gallery.composer.start_with(MemoryDraft::default());
            }
            if ui.selectable_label(gallery.loved_only(), "♥ Loved Only").clicked() {
                gallery.toggle_loved_only();
            }
        });
    });

    if gallery.composer.is_composing() {
        let mut add = false;
        let mut cancel = false;
        let can_add = gallery.composer.can_submit();
        card(ui, |ui| {
            ui.label(RichText::new("Add a memory").strong().size(16.0));
            if let Some((path, draft)) = gallery.composer.fields_mut() {
                ui.add(egui::TextEdit::singleline(path).hint_text("Photo or video path / URL"));
                ui.add(egui::TextEdit::singleline(&mut draft.caption).hint_text("Caption (optional)"));
                ui.add(egui::TextEdit::singleline(&mut draft.location).hint_text("Where was it? (optional)"));
            }
            ui.horizontal(|ui| {
                add = ui.add_enabled(can_add, egui::Button::new("Add")).clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });
        if add {
            fx.save(ViewKind::Memories, gallery.submit(&cx.session.user_name, cx.now));
        } else if cancel {
            gallery.composer.cancel();
        }
    }

    let visible = gallery.visible();
    if visible.is_empty() {
        let hint = if gallery.loved_only() {
            "No loved memories yet"
        } else {
            "Upload your first photo or video"
        };
        if empty_state(ui, "📷", "No memories here", hint) {
            gallery.composer.start_with(MemoryDraft::default());
        }
    }

    egui::Grid::new("memories_grid")
        .num_columns(3)
        .spacing(egui::vec2(10.0, 10.0))
        .show(ui, |ui| {
            for (i, memory) in visible.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(200.0);
                    ui.vertical(|ui| {
                        let (icon, url) = match &memory.details {
                            Details::Memory { media: MediaKind::Video, url, .. } => ("▶", url.as_str()),
                            Details::Memory { url, .. } => ("🖼", url.as_str()),
                            _ => ("🖼", ""),
                        };
                        let thumb = ui
                            .add_sized(
                                egui::vec2(200.0, 110.0),
                                egui::Button::new(RichText::new(icon).size(32.0)),
                            )
                            .on_hover_text(url);
                        if thumb.clicked() {
                            gallery.select(&memory.id);
                        }
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(when(&memory.created_at)).weak().size(12.0));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if heart_button(ui, cx.theme, memory.loved) {
                                    fx.save(ViewKind::Memories, gallery.toggle_love(&memory.id));
                                }
                            });
                        });
                    });
                });
                if i % 3 == 2 {
                    ui.end_row();
                }
            }
        });

    draw_lightbox(ctx, gallery, cx, fx);
}

fn heart_button(ui: &mut egui::Ui, theme: &ThemeConfig, loved: bool) -> bool {
    let text = if loved {
        RichText::new("♥").color(theme.heart_color32())
    } else {
        RichText::new("♡")
    };
    ui.small_button(text).clicked()
}

fn draw_lightbox(ctx: &egui::Context, gallery: &mut MemoriesGallery, cx: &PageCtx<'_>, fx: &mut Effects) {
    let Some(memory) = gallery.selected().cloned() else {
        return;
    };
    let mut open = true;
    let mut toggle = false;
    egui::Window::new(if memory.content.is_empty() { "Memory" } else { memory.content.as_str() })
        .id(egui::Id::new("memory_lightbox"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            if let Details::Memory { media, url, location, .. } = &memory.details {
                let kind = match media {
                    MediaKind::Photo => "Photo",
                    MediaKind::Video => "Video",
                };
                ui.label(RichText::new(format!("{kind}: {url}")).monospace().size(12.0));
                ui.horizontal(|ui| {
                    ui.label(format!("📅 {}", when(&memory.created_at)));
                    if let Some(location) = location {
                        ui.separator();
                        ui.label(format!("📍 {location}"));
                    }
                });
            }
            toggle = heart_button(ui, cx.theme, memory.loved);
        });
    if toggle {
        fx.save(ViewKind::Memories, gallery.toggle_love(&memory.id));
    }
    if !open {
        gallery.close();
    }
}

fn category_color(category: PromptCategory) -> Color32 {
    match category {
        PromptCategory::Feelings => Color32::from_rgb(190, 24, 93),
        PromptCategory::Gratitude => Color32::from_rgb(22, 101, 52),
        PromptCategory::Dreams => Color32::from_rgb(107, 33, 168),
        PromptCategory::Memories => Color32::from_rgb(30, 64, 175),
    }
}

pub fn draw_checkins(ui: &mut egui::Ui, checkins: &mut DailyCheckins, cx: &PageCtx<'_>, fx: &mut Effects) {
    page_header(ui, "Daily Check-ins", "Connect deeper with daily prompts and active listening");
    ui.horizontal(|ui| {
        ui.selectable_value(&mut checkins.mode, CheckinMode::Checkin, "❤ Daily Check-in");
        ui.selectable_value(&mut checkins.mode, CheckinMode::Listening, "🎤 Active Listening");
    });
    ui.add_space(6.0);

    match checkins.mode {
        CheckinMode::Checkin => draw_daily_checkin(ui, checkins, cx, fx),
        CheckinMode::Listening => draw_listening(ui, checkins, cx, fx),
    }
}

fn draw_daily_checkin(ui: &mut egui::Ui, checkins: &mut DailyCheckins, cx: &PageCtx<'_>, fx: &mut Effects) {
    let today = prompt_for_day(cx.now.with_timezone(&Local).date_naive());

    if let Some(prompt) = checkins.responder.context().cloned() {
        let mut share = false;
        let mut cancel = false;
        let can_share = checkins.responder.can_submit();
        card(ui, |ui| {
            ui.label(RichText::new("Share Your Heart").strong().size(16.0));
            ui.label(RichText::new(prompt.prompt).italics());
            if let Some(draft) = checkins.responder.draft_mut() {
                ui.add(
                    egui::TextEdit::multiline(draft)
                        .hint_text("Share your thoughts and feelings...")
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
            }
            ui.horizontal(|ui| {
                share = ui.add_enabled(can_share, egui::Button::new("Share")).clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });
        if share {
            fx.save(ViewKind::Checkins, checkins.submit_response(&cx.session.user_name, cx.now));
        } else if cancel {
            checkins.responder.cancel();
        }
    } else {
        card(ui, |ui| {
            ui.label(RichText::new("📅 Today's Prompt").strong().size(16.0));
            ui.label(
                RichText::new(today.category.label())
                    .color(Color32::WHITE)
                    .background_color(category_color(today.category))
                    .size(12.0),
            );
            ui.label(RichText::new(today.prompt).size(15.0));
            if ui.button("Respond to This").clicked() {
                checkins.respond(today);
            }
        });
    }

    ui.label(RichText::new("Recent Check-ins").strong().size(16.0));
    for item in checkins.checkins().iter() {
        card(ui, |ui| {
            if let Details::Checkin { prompt, .. } = &item.details {
                ui.label(RichText::new(prompt).weak().italics());
            }
            ui.label(&item.content);
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("— {}", item.author)).size(12.0));
                ui.label(RichText::new(when(&item.created_at)).weak().size(12.0));
            });
        });
    }
}

fn draw_listening(ui: &mut egui::Ui, checkins: &mut DailyCheckins, cx: &PageCtx<'_>, fx: &mut Effects) {
    card(ui, |ui| {
        ui.label(RichText::new("🎤 Active Listening Mode").strong().size(16.0));
        ui.label(
            RichText::new("Give your partner your full attention. Let them speak without interruption.")
                .weak(),
        );
        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            if checkins.timer().is_listening() {
                ui.label(RichText::new(checkins.timer().display()).monospace().size(32.0));
                if ui.button("End Session").clicked() {
                    checkins.end_listening();
                }
            } else if !checkins.summary.is_composing() {
                ui.label(RichText::new("Start a listening session for your partner to share openly").weak());
                if ui.button("Start Listening").clicked() {
                    checkins.start_listening();
                }
            }
        });
    });

    if let Some(elapsed) = checkins.summary.context().copied() {
        let mut save = false;
        let mut discard = false;
        let can_save = checkins.summary.can_submit();
        card(ui, |ui| {
            ui.label(
                RichText::new(format!(
                    "What did {} share? ({}:{:02})",
                    cx.session.partner_name,
                    elapsed / 60,
                    elapsed % 60
                ))
                .strong(),
            );
            if let Some(draft) = checkins.summary.draft_mut() {
                ui.add(
                    egui::TextEdit::multiline(draft)
                        .hint_text("A few words to remember this conversation...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                );
            }
            ui.horizontal(|ui| {
                save = ui.add_enabled(can_save, egui::Button::new("Save Session")).clicked();
                discard = ui.button("Discard").clicked();
            });
        });
        if save {
            fx.save(
                ViewKind::ListeningSessions,
                checkins.submit_summary(&cx.session.partner_name, cx.now),
            );
        } else if discard {
            checkins.summary.cancel();
        }
    }

    ui.label(RichText::new("Recent Sessions").strong().size(16.0));
    for item in checkins.sessions().iter() {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} shared", item.author)).strong());
                if let Details::Listening { duration_minutes } = item.details {
                    ui.label(RichText::new(format!("🕑 {duration_minutes} min")).weak().size(12.0));
                }
                ui.label(RichText::new(when(&item.created_at)).weak().size(12.0));
            });
            ui.label(&item.content);
        });
    }
}

pub fn draw_location(ui: &mut egui::Ui, location: &mut LocationSharing, cx: &PageCtx<'_>, fx: &mut Effects) {
    page_header(ui, "Location Sharing", "Share your whereabouts with your partner");

    card(ui, |ui| {
        ui.label(RichText::new("📤 Share Your Location").strong().size(16.0));
        ui.add(
            egui::TextEdit::singleline(&mut location.status_draft)
                .hint_text("Add a status (optional)...")
                .desired_width(f32::INFINITY),
        );
        let label = if location.is_sharing() {
            "Getting location..."
        } else {
            "📍 Share Location"
        };
        if ui
            .add_enabled(!location.is_sharing(), egui::Button::new(label))
            .clicked()
        {
            fx.share_location = location.begin_share();
        }
    });

    ui.label(RichText::new("Recent Locations").strong().size(16.0));
    for item in location.items().iter() {
        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&item.author).strong());
                    if let Details::Location { address, .. } = &item.details {
                        ui.label(RichText::new(address).weak().size(12.0));
                    }
                    ui.label(&item.content);
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if let Details::Location { latitude, longitude, .. } = item.details {
                        if ui.small_button("🗺 Map").clicked() {
                            open_map(Position { latitude, longitude });
                        }
                    }
                    ui.label(RichText::new(format!("🕑 {}", when(&item.created_at))).weak().size(12.0));
                });
            });
        });
    }
}

fn open_map(position: Position) {
    match map_url(position) {
        Ok(url) => {
            if let Err(e) = webbrowser::open(url.as_str()) {
                tracing::warn!(error = %e, "failed to open map link");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to build map link"),
    }
}
