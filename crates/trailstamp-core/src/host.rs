//! In-process host pieces: a frame scheduler driven by hand and a surface of
//! fixed size. Used by headless replay and by tests.

use trailstamp_platform::{FrameHandle, FrameScheduler, Rect, Result, Surface};

/// Frame scheduler whose frames fire only when the caller says so.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and neither delivered nor cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }

    /// Removes the oldest pending request, as a display refresh would.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

/// Container with a fixed bounding box whose slots all measure the same.
#[derive(Debug, Clone)]
pub struct FixedSurface {
    pub rect: Rect,
    pub slot_size: (f32, f32),
    attached: bool,
    attach_count: u32,
}

impl FixedSurface {
    pub fn new(rect: Rect, slot_size: (f32, f32)) -> Self {
        Self {
            rect,
            slot_size,
            attached: false,
            attach_count: 0,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach_count(&self) -> u32 {
        self.attach_count
    }
}

impl Surface for FixedSurface {
    fn bounding_rect(&self) -> Rect {
        self.rect
    }

    fn measure_slot(&self, _index: usize) -> (f32, f32) {
        self.slot_size
    }

    fn attach_listeners(&mut self) -> Result<()> {
        self.attached = true;
        self.attach_count += 1;
        Ok(())
    }

    fn detach_listeners(&mut self) -> Result<()> {
        self.attached = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_only_counts_pending_frames() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        assert_ne!(first, second);
        assert_eq!(scheduler.fire(), Some(first));

        scheduler.cancel_frame(first);
        assert_eq!(scheduler.cancelled_count(), 0);
        scheduler.cancel_frame(second);
        assert_eq!(scheduler.cancelled_count(), 1);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.fire(), None);
    }
}
