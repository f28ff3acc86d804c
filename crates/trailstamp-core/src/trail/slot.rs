use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::trail::timeline::StampTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Idle,
    Entering,
    Settled,
    Exiting,
}

/// What the host applies to a slot element: translate + scale + opacity on
/// the outer box, scale + brightness on the inner image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    pub offset: Vec2,
    pub scale: f32,
    pub opacity: f32,
    pub inner_scale: f32,
    pub brightness: f32,
}

impl SlotStyle {
    /// Invisible and untransformed.
    pub const DEFAULT: SlotStyle = SlotStyle {
        offset: Vec2::ZERO,
        scale: 1.0,
        opacity: 0.0,
        inner_scale: 1.0,
        brightness: 1.0,
    };
}

impl Default for SlotStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One slot of the trail pool. Slots are built at mount and only recycled.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    source_ref: String,
    size: Vec2,
    z_index: u32,
    style: SlotStyle,
    timeline: Option<StampTimeline>,
}

impl ImageSlot {
    pub(crate) fn new(source_ref: String, size: Vec2) -> Self {
        Self {
            source_ref,
            size,
            z_index: 0,
            style: SlotStyle::DEFAULT,
            timeline: None,
        }
    }

    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }

    /// Last measured width/height.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn style(&self) -> SlotStyle {
        self.style
    }

    pub fn visual_state(&self) -> VisualState {
        self.timeline
            .as_ref()
            .map_or(VisualState::Idle, StampTimeline::phase)
    }

    pub fn is_active(&self) -> bool {
        self.visual_state() != VisualState::Idle
    }

    pub fn timeline(&self) -> Option<&StampTimeline> {
        self.timeline.as_ref()
    }

    /// Starts a new stamp. Any stamp still running on this slot is dropped
    /// first; returns `true` when that happened.
    pub(crate) fn start(&mut self, timeline: StampTimeline, z_index: u32) -> bool {
        let cancelled = self.timeline.take().is_some();
        self.z_index = z_index;
        self.style = timeline.sample();
        self.timeline = Some(timeline);
        cancelled
    }

    /// Returns `true` when the running stamp completed during this step.
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        let finished = timeline.advance(dt);
        self.style = timeline.sample();
        if finished {
            self.timeline = None;
        }
        finished
    }

    /// Re-measures and drops any stamp in flight. Returns `true` if one was
    /// abandoned.
    pub(crate) fn remeasure(&mut self, size: Vec2) -> bool {
        self.size = size;
        self.style = SlotStyle::DEFAULT;
        self.timeline.take().is_some()
    }

    pub fn instance(&self, slot: u32) -> SlotInstance {
        SlotInstance {
            offset: self.style.offset.to_array(),
            size: self.size.to_array(),
            scale: self.style.scale,
            opacity: self.style.opacity,
            inner_scale: self.style.inner_scale,
            brightness: self.style.brightness,
            slot,
            z_index: self.z_index,
        }
    }
}

/// Flat per-slot draw record, laid out for direct upload as an instance
/// buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SlotInstance {
    pub offset: [f32; 2],
    pub size: [f32; 2],
    pub scale: f32,
    pub opacity: f32,
    pub inner_scale: f32,
    pub brightness: f32,
    pub slot: u32,
    pub z_index: u32,
}
