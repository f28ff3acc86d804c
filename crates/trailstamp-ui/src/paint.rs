//! Drawing of trail slots, tilted cards and the follower dot.

use egui::{Color32, FontId, Mesh, Painter, Pos2, Shape, TextureHandle};
use glam::Vec2;
use trailstamp_core::{SlotInstance, Tilt, TiltPreset};
use trailstamp_platform::Rect;

const PALETTE: [Color32; 4] = [
    Color32::from_rgb(0xd4, 0xaf, 0x37),
    Color32::from_rgb(0xe0, 0x11, 0x5f),
    Color32::from_rgb(0xf4, 0xd0, 0x3f),
    Color32::from_rgb(0x2a, 0x2a, 0x2a),
];

pub fn placeholder_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

fn pos(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn egui_rect(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        Pos2::new(rect.left, rect.top),
        egui::vec2(rect.width, rect.height),
    )
}

/// Draws one trail slot. `origin` is the panel's top-left corner.
pub fn paint_slot(
    painter: &Painter,
    origin: Pos2,
    instance: &SlotInstance,
    texture: Option<&TextureHandle>,
    label: &str,
) {
    let [width, height] = instance.size;
    let [x, y] = instance.offset;
    let center = origin + egui::vec2(x + width / 2.0, y + height / 2.0);
    let outer = egui::Rect::from_center_size(
        center,
        egui::vec2(width, height) * instance.scale.max(0.0),
    );
    if outer.area() <= 0.0 || instance.opacity <= 0.0 {
        return;
    }
    let inner = egui::Rect::from_center_size(center, outer.size() * instance.inner_scale);
    let clipped = painter.with_clip_rect(outer.intersect(painter.clip_rect()));
    let alpha = instance.opacity.clamp(0.0, 1.0);

    match texture {
        Some(texture) => {
            let uv = egui::Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            clipped.image(texture.id(), inner, uv, Color32::WHITE.gamma_multiply(alpha));
        }
        None => {
            let fill = placeholder_color(instance.slot as usize).gamma_multiply(alpha);
            clipped.rect_filled(inner, 0.0, fill);
            clipped.text(
                center,
                egui::Align2::CENTER_CENTER,
                label,
                FontId::proportional(14.0 * instance.inner_scale),
                Color32::WHITE.gamma_multiply(alpha),
            );
        }
    }

    // Brightness above 100% is approximated by washing the slot with white.
    if instance.brightness > 1.0 {
        let wash = (instance.brightness - 1.0) / instance.brightness * alpha;
        clipped.rect_filled(outer, 0.0, Color32::from_white_alpha((wash * 255.0) as u8));
    }
}

/// Draws a card as a projected quad with its spotlight.
pub fn paint_tilted_card(
    painter: &Painter,
    card: &Rect,
    tilt: &Tilt,
    preset: &TiltPreset,
    hovered: bool,
    fill: Color32,
    title: &str,
) {
    let lift = if hovered { preset.lift } else { 0.0 };
    let corners = tilt.project_corners(card, preset.perspective, lift);

    let mut mesh = Mesh::default();
    for corner in corners {
        mesh.colored_vertex(pos(corner), fill);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(Shape::mesh(mesh));

    if hovered {
        let clipped = painter.with_clip_rect(egui_rect(card).intersect(painter.clip_rect()));
        let spot = tilt.spotlight_point(card);
        let radius = card.width.max(card.height) * 0.6;
        for (step, alpha) in [(1.0, 10_u8), (0.66, 18), (0.33, 28)] {
            clipped.circle_filled(pos(spot), radius * step, Color32::from_white_alpha(alpha));
        }
    }

    let (cx, cy) = card.center();
    painter.text(
        Pos2::new(cx, cy),
        egui::Align2::CENTER_CENTER,
        title,
        FontId::proportional(16.0),
        Color32::WHITE,
    );
}

/// Grid spotlight glow plus the dimming overlay that hides under the pointer.
pub fn paint_grid_spotlight(painter: &Painter, grid: egui::Rect, center: Vec2, radius: f32, fade: f32) {
    let clipped = painter.with_clip_rect(grid.intersect(painter.clip_rect()));
    let spot = grid.min + egui::vec2(center.x, center.y);
    clipped.circle_filled(spot, radius * 0.5, Color32::from_rgba_unmultiplied(212, 175, 55, 24));
    if fade > 0.0 {
        clipped.rect_filled(grid, 0.0, Color32::from_black_alpha((fade * 110.0) as u8));
    }
}

pub fn paint_follower(painter: &Painter, position: Vec2, hovering: bool) {
    let ring = if hovering { 22.0 } else { 14.0 };
    painter.circle_filled(pos(position), 3.0, Color32::from_rgb(0xd4, 0xaf, 0x37));
    painter.circle_stroke(
        pos(position),
        ring,
        egui::Stroke::new(1.5, Color32::from_rgb(0xd4, 0xaf, 0x37)),
    );
}
