use egui::{Color32, Sense, TextureHandle, TextureOptions};
use glam::Vec2;
use tracing::{debug, info};
use trailstamp_core::{EngineConfig, GridSpotlight, SpringFollower, TiltGroup, TrailEngine};
use trailstamp_platform::{PointerEvent, Result};

mod host;
mod paint;

use crate::host::{to_rect, PanelSurface, RepaintScheduler};

const SLOT_WIDTH: f32 = 190.0;
const SLOT_HEIGHT: f32 = 250.0;
/// Longest frame fed to the animations, so a stalled window does not skip
/// whole stamps.
const MAX_FRAME_DT: f32 = 0.1;

const SERVICES: [&str; 3] = ["Closet Audit", "Personal Shopping", "Event Styling"];
const GALLERY: [&str; 6] = ["Boss Lady", "Street Luxe", "Ethereal", "Noir", "Gilded", "Muse"];

/// Open the Trailstamp window and run until it is closed.
pub fn run_ui(config: EngineConfig) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Trailstamp")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Trailstamp",
        native_options,
        Box::new(move |creation_context| {
            let app = TrailstampApp::new(&creation_context.egui_ctx, config);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| format!("eframe failed: {err}").into())
}

pub struct TrailstampApp {
    config: EngineConfig,
    context: egui::Context,
    textures: Vec<Option<TextureHandle>>,
    trail: Option<TrailEngine<PanelSurface, RepaintScheduler>>,
    mount_attempted: bool,
    last_pointer: Option<egui::Pos2>,
    services: TiltGroup<usize>,
    gallery: TiltGroup<usize>,
    grid: GridSpotlight,
    grid_measured: bool,
    grid_hovered: bool,
    follower: SpringFollower,
}

impl TrailstampApp {
    pub fn new(context: &egui::Context, config: EngineConfig) -> Self {
        let textures = config
            .images
            .iter()
            .map(|source| load_texture(context, source))
            .collect();
        Self {
            services: TiltGroup::new(config.tilt.service_card.clone()),
            gallery: TiltGroup::new(config.tilt.gallery_tile.clone()),
            grid: GridSpotlight::new(config.grid.clone()),
            grid_measured: false,
            grid_hovered: false,
            follower: SpringFollower::new(config.follower.clone()),
            config,
            context: context.clone(),
            textures,
            trail: None,
            mount_attempted: false,
            last_pointer: None,
        }
    }

    fn slot_sizes(&self) -> Vec<(f32, f32)> {
        self.textures
            .iter()
            .map(|texture| match texture {
                Some(texture) => {
                    let [w, h] = texture.size();
                    (SLOT_WIDTH, SLOT_WIDTH * h as f32 / w.max(1) as f32)
                }
                None => (SLOT_WIDTH, SLOT_HEIGHT),
            })
            .collect()
    }

    fn trail_ui(&mut self, ui: &mut egui::Ui, dt: f32) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let panel = to_rect(response.rect);

        if !self.mount_attempted {
            self.mount_attempted = true;
            let surface = PanelSurface::new(panel, self.slot_sizes());
            let scheduler = RepaintScheduler::new(self.context.clone());
            self.trail = TrailEngine::mount(
                Some(surface),
                &self.config.images,
                self.config.trail.clone(),
                scheduler,
            );
            if self.trail.is_some() {
                info!("Trail mounted on {}x{} panel", panel.width, panel.height);
            }
        }
        let Some(engine) = self.trail.as_mut() else {
            return;
        };

        if engine.surface_mut().set_rect(panel) {
            engine.on_resize();
        }
        if let Some(pointer) = response.hover_pos().filter(|_| engine.surface().is_listening()) {
            if self.last_pointer != Some(pointer) {
                self.last_pointer = Some(pointer);
                engine.on_pointer(&PointerEvent::mouse(pointer.x, pointer.y));
            }
        }
        if engine.scheduler_mut().take_due().is_some() {
            engine.on_frame(dt);
        }

        for instance in engine.instances() {
            let index = instance.slot as usize;
            let texture = self.textures.get(index).and_then(Option::as_ref);
            let label = engine.slots()[index].source_ref();
            paint::paint_slot(&painter, response.rect.min, &instance, texture, label);
        }
    }

    fn cards_ui(&mut self, ui: &mut egui::Ui, dt: f32) {
        ui.heading("Services");
        for (index, title) in SERVICES.iter().enumerate() {
            let (rect, response) = ui.allocate_exact_size(egui::vec2(280.0, 120.0), Sense::hover());
            let card = to_rect(rect);
            match response.hover_pos() {
                Some(p) => {
                    self.services.on_pointer_move(index, &card, p.x, p.y);
                }
                None if self.services.is_hovered(index) => {
                    self.services.on_pointer_leave(index);
                }
                None => {}
            }
            paint::paint_tilted_card(
                ui.painter(),
                &card,
                &self.services.tilt_for(index),
                self.services.preset(),
                self.services.is_hovered(index),
                Color32::from_rgb(0x1c, 0x1a, 0x17),
                title,
            );
            ui.add_space(8.0);
        }

        ui.separator();
        ui.heading("Gallery");
        let grid_rect = ui.available_rect_before_wrap();
        let grid = to_rect(grid_rect);
        let tile = egui::vec2(132.0, 132.0);
        ui.horizontal_wrapped(|ui| {
            for (index, title) in GALLERY.iter().enumerate() {
                let (rect, response) = ui.allocate_exact_size(tile, Sense::hover());
                let card = to_rect(rect);
                match response.hover_pos() {
                    Some(p) => {
                        self.gallery.on_pointer_move(index, &card, p.x, p.y);
                    }
                    None if self.gallery.is_hovered(index) => {
                        self.gallery.on_pointer_leave(index);
                    }
                    None => {}
                }
                paint::paint_tilted_card(
                    ui.painter(),
                    &card,
                    &self.gallery.tilt_for(index),
                    self.gallery.preset(),
                    self.gallery.is_hovered(index),
                    paint::placeholder_color(index),
                    title,
                );
            }
        });

        if !self.grid_measured {
            self.grid.measure(&grid);
            self.grid_measured = true;
        }
        let pointer = ui.ctx().input(|i| i.pointer.hover_pos());
        match pointer.filter(|p| grid_rect.contains(*p)) {
            Some(p) => {
                self.grid_hovered = true;
                self.grid.on_pointer_move(&grid, p.x, p.y);
            }
            None if self.grid_hovered => {
                self.grid_hovered = false;
                self.grid.on_pointer_leave();
            }
            None => {}
        }
        self.grid.advance(dt);
        paint::paint_grid_spotlight(
            ui.painter(),
            grid_rect,
            self.grid.position(),
            self.grid.radius(),
            self.grid.fade_opacity(),
        );
    }

    fn follower_ui(&mut self, context: &egui::Context, dt: f32) {
        if let Some(p) = context.input(|i| i.pointer.latest_pos()) {
            self.follower.on_pointer(&PointerEvent::mouse(p.x, p.y));
        }
        let hovering = self.services.hovered().is_some() || self.gallery.hovered().is_some();
        self.follower.set_hovering(hovering);
        let position: Vec2 = self.follower.step(dt);
        if !self.follower.is_visible() {
            return;
        }
        let painter = context.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("trailstamp-follower"),
        ));
        paint::paint_follower(&painter, position, self.follower.is_hovering());
    }
}

impl eframe::App for TrailstampApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = context.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_DT);

        egui::SidePanel::right("trailstamp-cards")
            .resizable(false)
            .exact_width(300.0)
            .show(context, |ui| self.cards_ui(ui, dt));
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::from_rgb(0xf8, 0xf4, 0xf0)))
            .show(context, |ui| self.trail_ui(ui, dt));
        self.follower_ui(context, dt);

        if self.grid.is_animating() || !self.follower.is_settled() {
            context.request_repaint();
        }
    }
}

fn load_texture(context: &egui::Context, source: &str) -> Option<TextureHandle> {
    match image::open(source) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            debug!("loaded trail image {source} ({}x{})", size[0], size[1]);
            Some(context.load_texture(source, color_image, TextureOptions::LINEAR))
        }
        Err(err) => {
            debug!("trail image {source} unavailable ({err}); using placeholder");
            None
        }
    }
}
