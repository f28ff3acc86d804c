//! Spring-driven cursor follower (the dot/ring that trails the pointer).

use glam::Vec2;
use trailstamp_platform::PointerEvent;

use crate::config::SpringConfig;

/// Largest integration step; longer frames are split.
const MAX_SUBSTEP: f32 = 1.0 / 240.0;

#[derive(Debug, Clone)]
pub struct SpringFollower {
    config: SpringConfig,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    visible: bool,
    hovering: bool,
}

impl SpringFollower {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            visible: false,
            hovering: false,
        }
    }

    /// Retargets on every sample. The first sample snaps into place and
    /// makes the follower visible, so it never flies in from the origin.
    pub fn on_pointer(&mut self, event: &PointerEvent) {
        let Some((x, y)) = event.client_point() else {
            return;
        };
        let point = Vec2::new(x, y);
        if !point.is_finite() {
            return;
        }
        self.target = point;
        if !self.visible {
            self.position = point;
            self.velocity = Vec2::ZERO;
            self.visible = true;
        }
    }

    /// Set by the host while the pointer is over something interactive.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn step(&mut self, dt: f32) -> Vec2 {
        if !self.visible || dt <= 0.0 {
            return self.position;
        }
        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        for _ in 0..steps {
            let force = -stiffness * (self.position - self.target) - damping * self.velocity;
            self.velocity += force / mass * h;
            self.position += self.velocity * h;
        }
        self.position
    }

    pub fn is_settled(&self) -> bool {
        let eps = self.config.rest_epsilon;
        self.position.distance(self.target) < eps && self.velocity.length() < eps
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }
}
