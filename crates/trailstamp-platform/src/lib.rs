//! Host abstraction traits so `trailstamp-core` stays renderer-agnostic.
//!
//! A host (browser shim, egui window, headless replay) owns the real
//! container and display refresh; the engines only see it through these
//! traits.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Axis-aligned box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Pointer input as delivered by the host, in client coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    MouseMove { client_x: f32, client_y: f32 },
    /// Every active contact point; only the first one is ever read.
    TouchMove { touches: Vec<(f32, f32)> },
}

impl PointerEvent {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        PointerEvent::MouseMove { client_x, client_y }
    }

    /// The single client point this event stands for, if any.
    pub fn client_point(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::MouseMove { client_x, client_y } => Some((*client_x, *client_y)),
            PointerEvent::TouchMove { touches } => touches.first().copied(),
        }
    }
}

/// Token for one scheduled display-refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Display refresh source. One request yields at most one frame.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The element an effect is mounted on.
pub trait Surface {
    /// Current bounding box of the container, in client coordinates.
    fn bounding_rect(&self) -> Rect;
    /// Rendered width/height of the slot at `index`.
    fn measure_slot(&self, index: usize) -> (f32, f32);
    /// Start delivering pointer and resize events for this surface.
    fn attach_listeners(&mut self) -> Result<()>;
    /// Stop delivering events. Must tolerate being called when detached.
    fn detach_listeners(&mut self) -> Result<()>;
}
