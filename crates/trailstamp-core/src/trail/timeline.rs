use glam::Vec2;

use crate::config::TrailPreset;
use crate::trail::slot::{SlotStyle, VisualState};
use crate::tween::Tween;

/// Entry and exit tracks of one stamp, sharing a single clock.
///
/// Exit is scheduled from the start of the stamp, not from the end of
/// entry, so the two phases may overlap.
#[derive(Debug, Clone)]
pub struct StampTimeline {
    elapsed: f32,
    completed: bool,
    offset: Tween<Vec2>,
    scale_in: Tween<f32>,
    scale_out: Tween<f32>,
    opacity: Tween<f32>,
    inner_scale: Tween<f32>,
    brightness: Tween<f32>,
    entry_end: f32,
    exit_start: f32,
    end: f32,
}

impl StampTimeline {
    /// `origin` and `target` are top-left offsets, already centered on the
    /// smoothed and raw pointer respectively.
    pub fn new(preset: &TrailPreset, origin: Vec2, target: Vec2) -> Self {
        let entry = &preset.entry;
        let exit = &preset.exit;

        let scale_in = Tween::new(entry.scale_from, 1.0, entry.duration, entry.ease);
        // Exit animates from whatever scale entry reached by then.
        let scale_out = Tween::new(scale_in.sample(exit.delay), exit.scale_to, exit.duration, exit.ease)
            .delayed(exit.delay);
        let opacity = Tween::new(1.0, 0.0, exit.duration, exit.ease).delayed(exit.delay);

        Self {
            elapsed: 0.0,
            completed: false,
            offset: Tween::new(origin, target, entry.duration, entry.ease),
            scale_in,
            scale_out,
            opacity,
            inner_scale: Tween::new(entry.inner_scale_from, 1.0, entry.duration, entry.ease),
            brightness: Tween::new(entry.brightness_from, 1.0, entry.duration, entry.ease),
            entry_end: entry.duration,
            exit_start: exit.delay,
            end: entry.duration.max(exit.delay + exit.duration),
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.end
    }

    pub fn is_finished(&self) -> bool {
        self.completed
    }

    /// Advances the clock; returns `true` on the call that finishes it.
    ///
    /// A zero-length stamp finishes on its first advance, never at start.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.completed {
            return false;
        }
        self.elapsed += dt.max(0.0);
        self.completed = self.elapsed >= self.end;
        self.completed
    }

    pub fn phase(&self) -> VisualState {
        if self.completed {
            VisualState::Idle
        } else if self.elapsed >= self.exit_start {
            VisualState::Exiting
        } else if self.elapsed < self.entry_end {
            VisualState::Entering
        } else {
            VisualState::Settled
        }
    }

    pub fn sample(&self) -> SlotStyle {
        let t = self.elapsed;
        let scale = if t < self.exit_start {
            self.scale_in.sample(t)
        } else {
            self.scale_out.sample(t)
        };
        SlotStyle {
            offset: self.offset.sample(t),
            scale,
            opacity: self.opacity.sample(t),
            inner_scale: self.inner_scale.sample(t),
            brightness: self.brightness.sample(t),
        }
    }

    /// Offset the entry phase settles on.
    pub fn target(&self) -> Vec2 {
        self.offset.to
    }

    pub fn origin(&self) -> Vec2 {
        self.offset.from
    }
}
