//! egui implementations of the platform traits.

use tracing::debug;
use trailstamp_platform::{FrameHandle, FrameScheduler, Rect, Result, Surface};

/// Turns frame requests into egui repaints. A frame is due on the next
/// `update` after it was requested.
pub struct RepaintScheduler {
    context: egui::Context,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl RepaintScheduler {
    pub fn new(context: egui::Context) -> Self {
        Self {
            context,
            next_id: 0,
            pending: None,
        }
    }

    /// Consumes the outstanding request, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.context.request_repaint();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // egui cannot take a repaint back; dropping the token is enough.
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// The central panel area the trail lives in.
pub struct PanelSurface {
    rect: Rect,
    slot_sizes: Vec<(f32, f32)>,
    listening: bool,
}

impl PanelSurface {
    pub fn new(rect: Rect, slot_sizes: Vec<(f32, f32)>) -> Self {
        Self {
            rect,
            slot_sizes,
            listening: false,
        }
    }

    /// Moves the panel; returns `true` if its size changed.
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        let resized = rect.width != self.rect.width || rect.height != self.rect.height;
        self.rect = rect;
        resized
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}

impl Surface for PanelSurface {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn measure_slot(&self, index: usize) -> (f32, f32) {
        self.slot_sizes.get(index).copied().unwrap_or((0.0, 0.0))
    }

    fn attach_listeners(&mut self) -> Result<()> {
        debug!("panel surface: listening");
        self.listening = true;
        Ok(())
    }

    fn detach_listeners(&mut self) -> Result<()> {
        debug!("panel surface: detached");
        self.listening = false;
        Ok(())
    }
}

pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}
