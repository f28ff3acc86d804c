//! Pointer-reactive 3D tilt and spotlight for cards.
//!
//! Every pointer move yields the target transform directly; nothing is
//! smoothed here. Smoothness comes from the rate of pointer events.

use std::fmt::Debug;

use glam::{Mat3, Vec2, Vec3};
use trailstamp_platform::Rect;

use crate::config::TiltPreset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Degrees around the horizontal axis.
    pub rotate_x: f32,
    /// Degrees around the vertical axis.
    pub rotate_y: f32,
    /// Spotlight center, percent of card width.
    pub spotlight_x: f32,
    /// Spotlight center, percent of card height.
    pub spotlight_y: f32,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        spotlight_x: 50.0,
        spotlight_y: 50.0,
    };

    /// Tilt for a pointer at client `(client_x, client_y)` over `card`.
    pub fn at(preset: &TiltPreset, card: &Rect, client_x: f32, client_y: f32) -> Self {
        let local_x = client_x - card.left;
        let local_y = client_y - card.top;
        let center_x = card.width / 2.0;
        let center_y = card.height / 2.0;

        let rotate_x = (local_y - center_y) / preset.divisor;
        let rotate_y = (center_x - local_x) / preset.divisor;
        Self {
            rotate_x,
            rotate_y,
            spotlight_x: 50.0 + rotate_y * preset.spotlight_gain,
            spotlight_y: 50.0 + rotate_x * preset.spotlight_gain,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// CSS `transform` value. Only a hovered card is lifted.
    pub fn css_transform(&self, preset: &TiltPreset, hovered: bool) -> String {
        let lift = if hovered { preset.lift } else { 0.0 };
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
            preset.perspective, self.rotate_x, self.rotate_y, lift
        )
    }

    /// CSS `background` value for the shine layer.
    pub fn spotlight_gradient(&self) -> String {
        format!(
            "radial-gradient(circle at {}% {}%, rgba(255,255,255,0.15) 0%, transparent 60%)",
            self.spotlight_x, self.spotlight_y
        )
    }

    /// Spotlight center in client coordinates.
    pub fn spotlight_point(&self, card: &Rect) -> Vec2 {
        Vec2::new(
            card.left + card.width * self.spotlight_x / 100.0,
            card.top + card.height * self.spotlight_y / 100.0,
        )
    }

    /// Screen-space corners of `card` under this tilt, for hosts that draw
    /// the card as a quad. Order: top-left, top-right, bottom-right,
    /// bottom-left. `lift` is the `translateZ` distance.
    pub fn project_corners(&self, card: &Rect, perspective: f32, lift: f32) -> [Vec2; 4] {
        let rotation = Mat3::from_rotation_x(self.rotate_x.to_radians())
            * Mat3::from_rotation_y(self.rotate_y.to_radians());
        let (cx, cy) = card.center();
        let half = Vec2::new(card.width / 2.0, card.height / 2.0);

        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| {
            let p = rotation * Vec3::new(corner.x, corner.y, lift);
            let depth = (perspective - p.z).max(1.0);
            let k = perspective / depth;
            Vec2::new(cx + p.x * k, cy + p.y * k)
        })
    }
}

impl Default for Tilt {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A group of cards sharing one "currently hovered" identity. Entering a
/// card implicitly neutralizes whichever card was hovered before.
#[derive(Debug, Clone)]
pub struct TiltGroup<Id> {
    preset: TiltPreset,
    hovered: Option<Id>,
    tilt: Tilt,
    pointer_offset: Vec2,
}

impl<Id: Copy + PartialEq + Debug> TiltGroup<Id> {
    pub fn new(preset: TiltPreset) -> Self {
        Self {
            preset,
            hovered: None,
            tilt: Tilt::NEUTRAL,
            pointer_offset: Vec2::ZERO,
        }
    }

    pub fn preset(&self) -> &TiltPreset {
        &self.preset
    }

    pub fn on_pointer_move(&mut self, card: Id, rect: &Rect, client_x: f32, client_y: f32) -> Tilt {
        let (cx, cy) = rect.center();
        self.hovered = Some(card);
        self.tilt = Tilt::at(&self.preset, rect, client_x, client_y);
        self.pointer_offset = Vec2::new(client_x - cx, client_y - cy);
        self.tilt
    }

    /// Always neutral. Clears the hovered identity if it is still `card`; a
    /// late leave from a card the pointer already moved off is harmless.
    pub fn on_pointer_leave(&mut self, card: Id) -> Tilt {
        if self.hovered == Some(card) {
            self.hovered = None;
            self.tilt = Tilt::NEUTRAL;
            self.pointer_offset = Vec2::ZERO;
        }
        Tilt::NEUTRAL
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    pub fn is_hovered(&self, card: Id) -> bool {
        self.hovered == Some(card)
    }

    /// Pointer offset from the hovered card's center.
    pub fn pointer_offset(&self) -> Vec2 {
        self.pointer_offset
    }

    pub fn tilt_for(&self, card: Id) -> Tilt {
        if self.is_hovered(card) {
            self.tilt
        } else {
            Tilt::NEUTRAL
        }
    }

    pub fn css_transform_for(&self, card: Id) -> String {
        self.tilt_for(card)
            .css_transform(&self.preset, self.is_hovered(card))
    }
}
