use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui::{
    self, Align, FontFamily, FontId, Layout, PointerButton, Sense, Stroke, UiBuilder,
    ViewportCommand,
};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::fetcher::{self, HttpSource, RefreshBatch};
use crate::fonts;
use crate::settings::Settings;
use crate::settings_panel::{self, SettingsEditor};
use crate::storage::{self, Paths};
use crate::style::{TickerStyle, OVERLAY_COLOR, OVERLAY_SIZE, OVERLAY_TEXT};
use crate::ticker::{self, Ticker};
use crate::tray::{self, TrayCommand};

/// Trailing space after every headline so consecutive ones don't touch.
const HEADLINE_GAP: &str = "     ";

pub struct TickerApp {
    config: Config,
    paths: Paths,
    ticker: Ticker,
    style: TickerStyle,
    // Fonts registered this frame only exist from the next one.
    pending_style: Option<TickerStyle>,
    refresh_tx: Option<Sender<RefreshBatch>>,
    refresh_rx: Receiver<RefreshBatch>,
    commands_tx: Sender<TrayCommand>,
    commands_rx: Receiver<TrayCommand>,
    editor: Option<SettingsEditor>,
    context_menu_open: bool,
    hidden: bool,
    quitting: bool,
    initialized: bool,
    last_tick: Instant,
    tray: Option<tray_icon::TrayIcon>,
}

impl TickerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, paths: Paths) -> Self {
        let settings = storage::load_settings(&paths.settings_file());
        info!("Applying saved settings on startup");
        let family = fonts::install(&cc.egui_ctx, &paths.fonts_dir(), &settings.font_name);
        let style = TickerStyle::resolve(&settings, family);

        let (refresh_tx, refresh_rx) = unbounded();
        let (commands_tx, commands_rx) = unbounded();

        Self {
            ticker: Ticker::new(config.window_width, config.scroll_step, config.fade_duration()),
            config,
            paths,
            style,
            pending_style: None,
            refresh_tx: Some(refresh_tx),
            refresh_rx,
            commands_tx,
            commands_rx,
            editor: None,
            context_menu_open: false,
            hidden: false,
            quitting: false,
            initialized: false,
            last_tick: Instant::now(),
            tray: None,
        }
    }

    /// Start the refresher thread and the tray now that the real Context exists.
    fn start_background(&mut self, ctx: &egui::Context) {
        if let Some(tx) = self.refresh_tx.take() {
            match HttpSource::new(&self.config) {
                Ok(source) => {
                    fetcher::start_background_refresh(
                        source,
                        self.paths.feeds_file(),
                        self.config.refresh_interval(),
                        tx,
                        ctx.clone(),
                    );
                }
                Err(e) => error!("Could not create HTTP client, feeds disabled: {e}"),
            }
        }

        let icon = tray::load_icon(&self.paths.icon_file());
        match tray::build_tray(icon, self.commands_tx.clone(), ctx.clone()) {
            Ok(tray) => self.tray = Some(tray),
            Err(e) => warn!("Running without a tray icon: {e}"),
        }
    }

    fn drain_refreshes(&mut self) {
        // Only the newest batch matters.
        let Some(batch) = self.refresh_rx.try_iter().last() else {
            return;
        };
        self.ticker.set_headlines(batch.headlines, self.config.window_width);

        if let Some(tray) = &self.tray {
            let tooltip = format!("{} (updated {})", tray::TOOLTIP, batch.fetched_at.format("%H:%M"));
            if let Err(e) = tray.set_tooltip(Some(tooltip)) {
                warn!("Could not update tray tooltip: {e}");
            }
        }
    }

    fn drain_commands(&mut self, ctx: &egui::Context) {
        let commands: Vec<TrayCommand> = self.commands_rx.try_iter().collect();
        for command in commands {
            self.run_command(ctx, command);
        }
    }

    fn run_command(&mut self, ctx: &egui::Context, command: TrayCommand) {
        match command {
            TrayCommand::ShowTicker => self.show_ticker(ctx),
            TrayCommand::OpenSettings | TrayCommand::OpenCurrentLink
                if self.hidden && cfg!(windows) =>
            {
                // The tray thread had to show the window natively to reach us.
                self.show_ticker(ctx);
                self.run_command(ctx, command);
            }
            TrayCommand::OpenSettings => self.open_settings(ctx),
            TrayCommand::OpenCurrentLink => self.open_current_link(),
            TrayCommand::Exit => {
                info!("Exiting");
                self.quitting = true;
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
        }
    }

    fn show_ticker(&mut self, ctx: &egui::Context) {
        self.hidden = false;
        self.last_tick = Instant::now();
        ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(ViewportCommand::Focus);
    }

    fn open_current_link(&self) {
        let headline = self.ticker.current();
        match headline.open() {
            Ok(true) => info!("Opened {}", headline.link),
            Ok(false) => {}
            Err(e) => error!("Failed to open {}: {e}", headline.link),
        }
    }

    fn open_settings(&mut self, ctx: &egui::Context) {
        if self.editor.is_some() {
            ctx.send_viewport_cmd_to(settings_viewport_id(), ViewportCommand::Focus);
            return;
        }
        let fonts_dir = self.paths.fonts_dir();
        storage::ensure_dir(&fonts_dir);
        let settings = storage::load_settings(&self.paths.settings_file());
        self.editor = Some(SettingsEditor::new(&settings, fonts::list_fonts(&fonts_dir)));
    }

    /// Persist and apply. A failed save still applies the settings live.
    fn save_settings(&mut self, ctx: &egui::Context, settings: Settings) {
        info!("Saving settings");
        if let Err(e) = storage::save_settings(&self.paths.settings_file(), &settings) {
            error!("Error saving settings: {e}");
        }
        self.apply_settings(ctx, &settings);
    }

    fn apply_settings(&mut self, ctx: &egui::Context, settings: &Settings) {
        let family = fonts::install(ctx, &self.paths.fonts_dir(), &settings.font_name);
        info!("Applying font {:?}, size {}", family, settings.font_size);
        self.pending_style = Some(TickerStyle::resolve(settings, family));
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        let mut saved = None;
        let mut closed = false;
        ctx.show_viewport_immediate(
            settings_viewport_id(),
            egui::ViewportBuilder::default()
                .with_title(settings_panel::TITLE)
                .with_inner_size([400.0, 440.0]),
            |ctx, _class| {
                let frame = egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::BLACK);
                egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                    ui.visuals_mut().override_text_color = Some(OVERLAY_COLOR);
                    if editor.ui(ui) {
                        saved = Some(editor.to_settings());
                    }
                });
                if ctx.input(|i| i.viewport().close_requested()) {
                    closed = true;
                }
            },
        );

        if let Some(settings) = saved {
            self.editor = None;
            self.save_settings(ctx, settings);
        } else if closed {
            self.editor = None;
        }
    }

    /// Close button of the window manager hides to the tray when there is one.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.quitting || self.tray.is_none() {
            return;
        }
        ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        crate::platform::hide_window_native();
        ctx.send_viewport_cmd(ViewportCommand::Visible(false));
        self.hidden = true;
        self.context_menu_open = false;
    }

    fn headline_galley(&self, ctx: &egui::Context, opacity: f32) -> Arc<egui::Galley> {
        let text = format!("{}{HEADLINE_GAP}", self.ticker.current().text);
        let color = self.style.text_color.gamma_multiply(opacity);
        ctx.fonts(|f| f.layout_no_wrap(text, self.style.font.clone(), color))
    }

    /// Replay the scroll ticks due since the last frame.
    fn advance_scroll(&mut self, ctx: &egui::Context, view_width: f32) {
        let (steps, last_tick) =
            ticker::ticks_due(self.last_tick, Instant::now(), self.config.scroll_interval());
        self.last_tick = last_tick;
        if steps == 0 {
            return;
        }

        let mut width = self.headline_galley(ctx, 1.0).size().x;
        for _ in 0..steps {
            if self.ticker.step(width, view_width) {
                debug!("Headline {}/{}", self.ticker.index() + 1, self.ticker.headline_count());
                width = self.headline_galley(ctx, 1.0).size().x;
            }
        }
    }

    fn context_menu_ui(&mut self, ui: &mut egui::Ui, rect: egui::Rect) -> Option<TrayCommand> {
        let mut chosen = None;
        ui.scope_builder(
            UiBuilder::new()
                .max_rect(rect.shrink(6.0))
                .layout(Layout::left_to_right(Align::Center)),
            |ui| {
                if ui.button("Open Current Link").clicked() {
                    chosen = Some(TrayCommand::OpenCurrentLink);
                }
                if ui.button("Open Settings").clicked() {
                    chosen = Some(TrayCommand::OpenSettings);
                }
                if ui.button("Exit").clicked() {
                    chosen = Some(TrayCommand::Exit);
                }
                if ui.button("✕").clicked() {
                    self.context_menu_open = false;
                }
            },
        );
        chosen
    }

    fn ticker_ui(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::default()
            .fill(self.style.background)
            .stroke(self.style.border.unwrap_or(Stroke::NONE))
            .corner_radius(self.style.corner_radius);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let rect = ui.max_rect();
            let response = ui.interact(rect, ui.id().with("ticker_strip"), Sense::click_and_drag());

            if response.drag_started_by(PointerButton::Primary) {
                ctx.send_viewport_cmd(ViewportCommand::StartDrag);
            }
            if response.secondary_clicked() {
                self.context_menu_open = true;
            } else if response.clicked() || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.context_menu_open = false;
            }

            if self.context_menu_open {
                if let Some(command) = self.context_menu_ui(ui, rect) {
                    self.context_menu_open = false;
                    self.run_command(ctx, command);
                }
                return;
            }

            self.advance_scroll(ctx, rect.width());

            let galley = self.headline_galley(ctx, self.ticker.opacity(Instant::now()));
            let pos = egui::pos2(
                rect.left() + self.ticker.x_pos(),
                rect.center().y - galley.size().y / 2.0,
            );
            let painter = ui.painter_at(rect);
            painter.galley(pos, galley, self.style.text_color);

            if self.style.show_overlay {
                painter.text(
                    rect.left_top() + egui::vec2(10.0, 5.0),
                    egui::Align2::LEFT_TOP,
                    OVERLAY_TEXT,
                    FontId::new(OVERLAY_SIZE, FontFamily::Monospace),
                    OVERLAY_COLOR,
                );
            }
        });
    }
}

fn settings_viewport_id() -> egui::ViewportId {
    egui::ViewportId::from_hash_of("ticky_settings")
}

impl eframe::App for TickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initialized {
            self.initialized = true;
            self.start_background(ctx);
        }
        if let Some(style) = self.pending_style.take() {
            self.style = style;
        }

        self.drain_refreshes();
        self.drain_commands(ctx);
        self.handle_close_request(ctx);
        self.show_settings_window(ctx);

        if self.hidden {
            // Tray and refresher threads wake us up.
            return;
        }

        self.ticker_ui(ctx);
        ctx.request_repaint_after(self.config.scroll_interval());
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Outside the rounded frame the window stays see-through.
        egui::Rgba::TRANSPARENT.to_array()
    }
}
