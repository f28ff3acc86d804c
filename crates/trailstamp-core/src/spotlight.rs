//! Grid-wide spotlight that drifts after the pointer, with a fade overlay
//! that hides while the pointer is over the grid.

use glam::Vec2;
use trailstamp_platform::Rect;

use crate::config::GridSpotlightPreset;
use crate::easing::Ease;
use crate::geometry::{rect_size, to_local};
use crate::tween::Retarget;

#[derive(Debug, Clone)]
pub struct GridSpotlight {
    preset: GridSpotlightPreset,
    position: Retarget<Vec2>,
    fade: Retarget<f32>,
}

impl GridSpotlight {
    pub fn new(preset: GridSpotlightPreset) -> Self {
        Self {
            preset,
            position: Retarget::settled(Vec2::ZERO),
            fade: Retarget::settled(1.0),
        }
    }

    /// Places the spotlight at the center of the grid, without animating.
    pub fn measure(&mut self, grid: &Rect) {
        self.position.set(rect_size(grid) * 0.5);
    }

    pub fn on_pointer_move(&mut self, grid: &Rect, client_x: f32, client_y: f32) {
        let local = to_local(Vec2::new(client_x, client_y), grid);
        // Hosts that poll the pointer repeat samples; keep the running tween.
        if self.position.target() == local && self.fade.target() == 0.0 {
            return;
        }
        self.position
            .retarget(local, self.preset.damping, self.preset.ease);
        self.fade.retarget(0.0, self.preset.fade_in, Ease::Power1);
    }

    pub fn on_pointer_leave(&mut self) {
        self.fade.retarget(1.0, self.preset.fade_out, Ease::Power1);
    }

    pub fn advance(&mut self, dt: f32) {
        self.position.advance(dt);
        self.fade.advance(dt);
    }

    pub fn is_animating(&self) -> bool {
        !self.position.is_finished() || !self.fade.is_finished()
    }

    /// Grid-local spotlight center.
    pub fn position(&self) -> Vec2 {
        self.position.value()
    }

    pub fn fade_opacity(&self) -> f32 {
        self.fade.value()
    }

    pub fn radius(&self) -> f32 {
        self.preset.radius
    }

    /// `--x` / `--y` custom properties for the grid element.
    pub fn css_vars(&self) -> [(&'static str, String); 2] {
        let p = self.position();
        [("--x", format!("{}px", p.x)), ("--y", format!("{}px", p.y))]
    }
}

/// `--mouse-x` / `--mouse-y` custom properties for a single card.
pub fn card_mouse_vars(card: &Rect, client_x: f32, client_y: f32) -> [(&'static str, String); 2] {
    let local = to_local(Vec2::new(client_x, client_y), card);
    [
        ("--mouse-x", format!("{}px", local.x)),
        ("--mouse-y", format!("{}px", local.y)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Rect {
        Rect::new(100.0, 50.0, 600.0, 400.0)
    }

    #[test]
    fn starts_centered_with_overlay_shown() {
        let mut spotlight = GridSpotlight::new(GridSpotlightPreset::default());
        spotlight.measure(&grid());
        assert_eq!(spotlight.position(), Vec2::new(300.0, 200.0));
        assert_eq!(spotlight.fade_opacity(), 1.0);
        assert!(!spotlight.is_animating());
    }

    #[test]
    fn drifts_toward_pointer_and_hides_overlay() {
        let mut spotlight = GridSpotlight::new(GridSpotlightPreset::default());
        spotlight.measure(&grid());
        spotlight.on_pointer_move(&grid(), 200.0, 150.0);

        spotlight.advance(0.1);
        let mid = spotlight.position();
        assert!(mid.x < 300.0 && mid.x > 100.0);
        assert!(spotlight.fade_opacity() < 1.0);

        spotlight.advance(0.5);
        assert_eq!(spotlight.position(), Vec2::new(100.0, 100.0));
        assert_eq!(spotlight.fade_opacity(), 0.0);
        assert_eq!(spotlight.css_vars()[0], ("--x", "100px".to_string()));
    }

    #[test]
    fn new_move_overwrites_running_tween() {
        let mut spotlight = GridSpotlight::new(GridSpotlightPreset::default());
        spotlight.measure(&grid());
        spotlight.on_pointer_move(&grid(), 700.0, 250.0);
        spotlight.advance(0.1);
        let before = spotlight.position();
        spotlight.on_pointer_move(&grid(), 100.0, 250.0);
        assert_eq!(spotlight.position(), before);
        spotlight.advance(1.0);
        assert_eq!(spotlight.position(), Vec2::new(0.0, 200.0));
    }

    #[test]
    fn repeated_sample_keeps_running_tween() {
        let mut spotlight = GridSpotlight::new(GridSpotlightPreset::default());
        spotlight.measure(&grid());
        spotlight.on_pointer_move(&grid(), 200.0, 150.0);
        spotlight.advance(0.2);
        spotlight.on_pointer_move(&grid(), 200.0, 150.0);
        spotlight.advance(0.3);
        assert!(!spotlight.is_animating());
        assert_eq!(spotlight.position(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn leave_restores_overlay_slowly() {
        let mut spotlight = GridSpotlight::new(GridSpotlightPreset::default());
        spotlight.on_pointer_move(&grid(), 200.0, 150.0);
        spotlight.advance(1.0);
        spotlight.on_pointer_leave();
        spotlight.advance(0.3);
        let partial = spotlight.fade_opacity();
        assert!(partial > 0.0 && partial < 1.0);
        spotlight.advance(0.4);
        assert_eq!(spotlight.fade_opacity(), 1.0);
    }

    #[test]
    fn card_vars_are_card_local() {
        let card = Rect::new(40.0, 60.0, 100.0, 100.0);
        let [x, y] = card_mouse_vars(&card, 45.0, 90.0);
        assert_eq!(x, ("--mouse-x", "5px".to_string()));
        assert_eq!(y, ("--mouse-y", "30px".to_string()));
    }
}
