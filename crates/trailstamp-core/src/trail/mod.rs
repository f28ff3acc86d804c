//! Pointer-driven image trail.
//!
//! A fixed pool of image slots is cycled in order. Each time the raw pointer
//! has travelled further than the threshold since the previous stamp, the
//! next slot is stamped at the pointer: it pops in from the smoothed pointer
//! position, settles on the raw one, then shrinks and fades out.
//!
//! The engine never runs on its own. The host delivers pointer events,
//! resize notifications and the frames the engine asks for through
//! [`FrameScheduler`]. Exactly one frame request is outstanding while the
//! loop runs, and [`TrailEngine::unmount`] cancels it.

mod slot;
mod timeline;

pub use slot::{ImageSlot, SlotInstance, SlotStyle, VisualState};
pub use timeline::StampTimeline;

use glam::Vec2;
use tracing::{debug, info, trace, warn};
use trailstamp_platform::{FrameHandle, FrameScheduler, PointerEvent, Surface};

use crate::config::TrailPreset;
use crate::geometry::{centered_offset, distance, lerp_vec, to_local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Listening, but no pointer sample seen yet; no frames requested.
    AwaitingPointer,
    Running,
    Unmounted,
}

/// The three pointer samples the loop works with, container-local.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSamples {
    pub current: Vec2,
    pub last_stamp: Vec2,
    pub smoothed: Vec2,
}

/// Record of one stamp, as returned from [`TrailEngine::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stamp {
    pub slot: usize,
    pub z_index: u32,
    /// Top-left offset the entry starts from (smoothed pointer, centered).
    pub origin: Vec2,
    /// Top-left offset the entry settles on (raw pointer, centered).
    pub target: Vec2,
    /// Whether a stamp still running on this slot had to be cut short.
    pub interrupted: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrailStats {
    pub frames: u64,
    pub stamps: u64,
    pub interrupted: u64,
    pub stack_resets: u64,
}

pub struct TrailEngine<S: Surface, F: FrameScheduler> {
    surface: S,
    scheduler: F,
    preset: TrailPreset,
    slots: Vec<ImageSlot>,
    next_slot: usize,
    stack_counter: u32,
    active_count: usize,
    pointer: PointerSamples,
    lifecycle: Lifecycle,
    pending_frame: Option<FrameHandle>,
    stats: TrailStats,
}

impl<S: Surface, F: FrameScheduler> TrailEngine<S, F> {
    /// Builds one slot per image reference and starts listening on
    /// `container`.
    ///
    /// Returns `None` when there is nothing to animate: no container, no
    /// images, or a container that refuses listeners.
    pub fn mount(
        container: Option<S>,
        image_refs: &[String],
        preset: TrailPreset,
        scheduler: F,
    ) -> Option<Self> {
        let Some(mut surface) = container else {
            debug!("trail mount skipped: no container");
            return None;
        };
        if image_refs.is_empty() {
            debug!("trail mount skipped: no images");
            return None;
        }
        if let Err(err) = surface.attach_listeners() {
            warn!("trail mount skipped: could not attach listeners: {err}");
            return None;
        }

        let slots = image_refs
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let (width, height) = surface.measure_slot(index);
                ImageSlot::new(source.clone(), Vec2::new(width, height))
            })
            .collect::<Vec<_>>();

        info!(
            "Trail mounted => {} slots, preset {:?}, threshold {}px",
            slots.len(),
            preset.name,
            preset.threshold
        );
        Some(Self {
            surface,
            scheduler,
            stack_counter: preset.stack_base,
            preset,
            slots,
            next_slot: 0,
            active_count: 0,
            pointer: PointerSamples::default(),
            lifecycle: Lifecycle::AwaitingPointer,
            pending_frame: None,
            stats: TrailStats::default(),
        })
    }

    /// Mouse or touch movement over the container.
    pub fn on_pointer(&mut self, event: &PointerEvent) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        let Some((x, y)) = event.client_point() else {
            return;
        };
        if !x.is_finite() || !y.is_finite() {
            warn!("ignoring non-finite pointer sample ({x}, {y})");
            return;
        }
        let rect = self.surface.bounding_rect();
        let local = to_local(Vec2::new(x, y), &rect);
        self.pointer.current = local;

        if self.lifecycle == Lifecycle::AwaitingPointer {
            self.pointer.last_stamp = local;
            self.pointer.smoothed = local;
            self.pending_frame = Some(self.scheduler.request_frame());
            self.lifecycle = Lifecycle::Running;
            info!("Trail loop started at ({:.1}, {:.1})", local.x, local.y);
        }
    }

    /// One display refresh, `dt` seconds after the previous one.
    ///
    /// Frames that arrive while nothing is pending (after unmount, or a
    /// duplicate delivery) are ignored.
    pub fn on_frame(&mut self, dt: f32) -> Option<Stamp> {
        if self.pending_frame.take().is_none() {
            trace!("trail frame ignored: none pending");
            return None;
        }
        self.stats.frames += 1;

        for slot in &mut self.slots {
            if slot.advance(dt) {
                self.active_count -= 1;
            }
        }

        let travelled = distance(self.pointer.current, self.pointer.last_stamp);
        self.pointer.smoothed = lerp_vec(
            self.pointer.smoothed,
            self.pointer.current,
            self.preset.smoothing,
        );

        let stamp = if travelled > self.preset.threshold {
            let stamp = self.stamp_next();
            self.pointer.last_stamp = self.pointer.current;
            Some(stamp)
        } else {
            None
        };

        if self.active_count == 0 && self.stack_counter != self.preset.stack_base {
            trace!("trail idle; stacking order {} -> {}", self.stack_counter, self.preset.stack_base);
            self.stack_counter = self.preset.stack_base;
            self.stats.stack_resets += 1;
        }

        self.pending_frame = Some(self.scheduler.request_frame());
        stamp
    }

    fn stamp_next(&mut self) -> Stamp {
        let index = self.next_slot;
        self.next_slot = (index + 1) % self.slots.len();
        self.stack_counter += 1;
        let z_index = self.stack_counter;

        let slot = &mut self.slots[index];
        let origin = centered_offset(self.pointer.smoothed, slot.size());
        let target = centered_offset(self.pointer.current, slot.size());
        let timeline = StampTimeline::new(&self.preset, origin, target);
        let interrupted = slot.start(timeline, z_index);

        if interrupted {
            self.stats.interrupted += 1;
        } else {
            self.active_count += 1;
        }
        self.stats.stamps += 1;
        debug!(
            "stamp slot {index} z {z_index} at ({:.1}, {:.1}){}",
            target.x,
            target.y,
            if interrupted { " (interrupted previous)" } else { "" }
        );
        Stamp {
            slot: index,
            z_index,
            origin,
            target,
            interrupted,
        }
    }

    /// The container changed size: every slot re-measures and snaps back to
    /// its invisible default. Stamps in flight are abandoned.
    pub fn on_resize(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        let mut abandoned = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let (width, height) = self.surface.measure_slot(index);
            if slot.remeasure(Vec2::new(width, height)) {
                abandoned += 1;
            }
        }
        self.active_count -= abandoned;
        debug!("trail resized; {abandoned} stamps abandoned");
    }

    /// Detaches listeners and cancels the outstanding frame. Safe to call
    /// any number of times; dropping the engine calls it too.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if let Err(err) = self.surface.detach_listeners() {
            warn!("failed to detach trail listeners: {err}");
        }
        self.lifecycle = Lifecycle::Unmounted;
        info!(
            "Trail unmounted after {} frames, {} stamps",
            self.stats.frames, self.stats.stamps
        );
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    /// Slots with something on screen, back to front.
    pub fn instances(&self) -> Vec<SlotInstance> {
        let mut instances = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_active() || slot.style().opacity > 0.0)
            .map(|(index, slot)| slot.instance(index as u32))
            .collect::<Vec<_>>();
        instances.sort_by_key(|instance| instance.z_index);
        instances
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_idle(&self) -> bool {
        self.active_count == 0
    }

    pub fn stack_counter(&self) -> u32 {
        self.stack_counter
    }

    pub fn pointer(&self) -> PointerSamples {
        self.pointer
    }

    pub fn preset(&self) -> &TrailPreset {
        &self.preset
    }

    pub fn stats(&self) -> TrailStats {
        self.stats
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S: Surface, F: FrameScheduler> Drop for TrailEngine<S, F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedSurface, ManualScheduler};
    use trailstamp_platform::Rect;

    const FRAME: f32 = 1.0 / 60.0;

    fn images(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("img-{i}")).collect()
    }

    fn engine(pool: usize) -> TrailEngine<FixedSurface, ManualScheduler> {
        let surface = FixedSurface::new(Rect::from_size(800.0, 600.0), (100.0, 140.0));
        TrailEngine::mount(
            Some(surface),
            &images(pool),
            TrailPreset::default(),
            ManualScheduler::new(),
        )
        .unwrap()
    }

    /// Moves the pointer and runs one frame.
    fn step(engine: &mut TrailEngine<FixedSurface, ManualScheduler>, x: f32, y: f32) -> Option<Stamp> {
        engine.on_pointer(&PointerEvent::mouse(x, y));
        engine.scheduler_mut().fire();
        engine.on_frame(FRAME)
    }

    #[test]
    fn mount_without_container_or_images_is_a_no_op() {
        let none: Option<TrailEngine<FixedSurface, ManualScheduler>> =
            TrailEngine::mount(None, &images(3), TrailPreset::default(), ManualScheduler::new());
        assert!(none.is_none());

        let surface = FixedSurface::new(Rect::from_size(10.0, 10.0), (1.0, 1.0));
        let empty = TrailEngine::mount(Some(surface), &[], TrailPreset::default(), ManualScheduler::new());
        assert!(empty.is_none());
    }

    #[test]
    fn mount_measures_slots_and_waits_for_pointer() {
        let engine = engine(3);
        assert_eq!(engine.slots().len(), 3);
        assert_eq!(engine.slots()[1].source_ref(), "img-1");
        assert_eq!(engine.slots()[0].size(), Vec2::new(100.0, 140.0));
        assert!(engine.surface().is_attached());
        assert_eq!(engine.lifecycle(), Lifecycle::AwaitingPointer);
        assert_eq!(engine.scheduler().pending_count(), 0);
    }

    #[test]
    fn first_pointer_seeds_samples_and_starts_loop() {
        let mut engine = engine(3);
        engine.on_pointer(&PointerEvent::mouse(200.0, 150.0));
        let samples = engine.pointer();
        assert_eq!(samples.current, Vec2::new(200.0, 150.0));
        assert_eq!(samples.last_stamp, samples.current);
        assert_eq!(samples.smoothed, samples.current);
        assert_eq!(engine.lifecycle(), Lifecycle::Running);
        assert_eq!(engine.scheduler().pending_count(), 1);

        // Later samples never request extra frames.
        engine.on_pointer(&PointerEvent::mouse(210.0, 150.0));
        assert_eq!(engine.scheduler().pending_count(), 1);
    }

    #[test]
    fn pointer_is_made_container_local() {
        let surface = FixedSurface::new(Rect::new(50.0, 30.0, 400.0, 300.0), (10.0, 10.0));
        let mut engine =
            TrailEngine::mount(Some(surface), &images(1), TrailPreset::default(), ManualScheduler::new())
                .unwrap();
        engine.on_pointer(&PointerEvent::TouchMove {
            touches: vec![(60.0, 40.0), (0.0, 0.0)],
        });
        assert_eq!(engine.pointer().current, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn scenario_path_stamps_slots_in_order() {
        let mut engine = engine(3);
        assert_eq!(step(&mut engine, 0.0, 0.0), None);
        assert_eq!(step(&mut engine, 10.0, 0.0), None);

        let first = step(&mut engine, 70.0, 0.0).unwrap();
        assert_eq!(first.slot, 0);
        assert_eq!(engine.pointer().last_stamp, Vec2::new(70.0, 0.0));

        let second = step(&mut engine, 140.0, 0.0).unwrap();
        assert_eq!(second.slot, 1);
        assert_eq!(engine.stats().stamps, 2);
    }

    #[test]
    fn movement_within_threshold_never_stamps() {
        let mut engine = engine(3);
        step(&mut engine, 300.0, 300.0);
        // Wander around the first point without ever leaving the threshold.
        for i in 0..500 {
            let angle = i as f32 * 0.37;
            let x = 300.0 + angle.cos() * 59.0;
            let y = 300.0 + angle.sin() * 59.0;
            assert_eq!(step(&mut engine, x, y), None, "sample {i}");
        }
        assert_eq!(engine.stats().stamps, 0);
    }

    #[test]
    fn slots_are_recycled_cyclically() {
        let mut engine = engine(3);
        step(&mut engine, 0.0, 0.0);
        let mut chosen = Vec::new();
        for k in 1..=8 {
            let stamp = step(&mut engine, k as f32 * 61.0, 0.0).unwrap();
            chosen.push(stamp.slot);
        }
        assert_eq!(chosen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
        assert_eq!(engine.slots().len(), 3);
    }

    #[test]
    fn restamping_a_running_slot_interrupts_it() {
        let mut engine = engine(1);
        step(&mut engine, 0.0, 0.0);
        let first = step(&mut engine, 100.0, 0.0).unwrap();
        assert!(!first.interrupted);
        let second = step(&mut engine, 200.0, 0.0).unwrap();
        assert!(second.interrupted);
        assert_eq!(engine.active_count(), 1);
        assert_eq!(engine.slots()[0].visual_state(), VisualState::Entering);
        assert_eq!(engine.stats().interrupted, 1);
    }

    #[test]
    fn stacking_grows_while_active_and_resets_when_idle() {
        let mut engine = engine(4);
        step(&mut engine, 0.0, 0.0);
        let base = engine.preset().stack_base;

        let mut previous = base;
        for k in 1..=4 {
            let stamp = step(&mut engine, k as f32 * 80.0, 0.0).unwrap();
            assert!(stamp.z_index > previous);
            previous = stamp.z_index;
        }
        assert_eq!(previous, base + 4);
        assert!(!engine.is_idle());

        // Hold still until every stamp has played out.
        for _ in 0..90 {
            step(&mut engine, 320.0, 0.0);
        }
        assert!(engine.is_idle());
        assert_eq!(engine.stack_counter(), base);
        assert!(engine.slots().iter().all(|s| s.visual_state() == VisualState::Idle));

        let next = step(&mut engine, 400.0, 0.0).unwrap();
        assert_eq!(next.z_index, base + 1);
    }

    #[test]
    fn zero_length_stamps_release_their_slot_and_reset_stacking() {
        let mut preset = TrailPreset::default();
        preset.entry.duration = 0.0;
        preset.exit.delay = 0.0;
        preset.exit.duration = 0.0;
        let surface = FixedSurface::new(Rect::from_size(800.0, 600.0), (100.0, 140.0));
        let mut engine =
            TrailEngine::mount(Some(surface), &images(3), preset, ManualScheduler::new()).unwrap();
        step(&mut engine, 0.0, 0.0);
        let base = engine.preset().stack_base;

        let stamp = step(&mut engine, 100.0, 0.0).unwrap();
        assert_eq!(stamp.slot, 0);
        assert_eq!(engine.active_count(), 1);
        assert!(engine.slots()[0].is_active());

        step(&mut engine, 100.0, 0.0);
        assert_eq!(engine.active_count(), 0);
        assert_eq!(engine.stack_counter(), base);
        assert!(!engine.slots()[0].is_active());
        assert_eq!(engine.slots()[0].visual_state(), VisualState::Idle);
        assert!(engine.instances().is_empty());
    }

    #[test]
    fn stamp_settles_centered_on_pointer() {
        let mut engine = engine(2);
        step(&mut engine, 0.0, 0.0);
        let stamp = step(&mut engine, 250.0, 180.0).unwrap();
        assert_eq!(stamp.target, Vec2::new(250.0 - 50.0, 180.0 - 70.0));

        for _ in 0..27 {
            step(&mut engine, 250.0, 180.0);
        }
        let slot = &engine.slots()[stamp.slot];
        assert_eq!(slot.visual_state(), VisualState::Settled);
        assert_eq!(slot.style().offset, stamp.target);
        assert_eq!(slot.style().scale, 1.0);
    }

    #[test]
    fn entry_starts_from_smoothed_pointer() {
        let mut engine = engine(2);
        step(&mut engine, 0.0, 0.0);
        let stamp = step(&mut engine, 100.0, 0.0).unwrap();
        // One frame of smoothing at 0.1 from the origin.
        assert!((stamp.origin.x - (10.0 - 50.0)).abs() < 1e-4);
        assert_eq!(stamp.target.x, 50.0);
    }

    #[test]
    fn resize_remeasures_and_abandons_stamps() {
        let mut engine = engine(2);
        step(&mut engine, 0.0, 0.0);
        step(&mut engine, 100.0, 0.0).unwrap();
        assert_eq!(engine.active_count(), 1);

        engine.surface_mut().slot_size = (60.0, 80.0);
        engine.on_resize();
        assert!(engine.is_idle());
        assert!(engine
            .slots()
            .iter()
            .all(|slot| slot.size() == Vec2::new(60.0, 80.0) && slot.style() == SlotStyle::DEFAULT));
        assert!(engine.instances().is_empty());
    }

    #[test]
    fn instances_are_sorted_back_to_front() {
        let mut engine = engine(3);
        step(&mut engine, 0.0, 0.0);
        step(&mut engine, 100.0, 0.0);
        step(&mut engine, 200.0, 0.0);
        let instances = engine.instances();
        assert_eq!(instances.len(), 2);
        assert!(instances[0].z_index < instances[1].z_index);
        assert_eq!(instances[1].slot, 1);
    }

    #[test]
    fn unmount_cancels_frame_and_is_idempotent() {
        let mut engine = engine(3);
        step(&mut engine, 0.0, 0.0);
        assert_eq!(engine.scheduler().pending_count(), 1);

        engine.unmount();
        engine.unmount();
        assert_eq!(engine.lifecycle(), Lifecycle::Unmounted);
        assert_eq!(engine.scheduler().pending_count(), 0);
        assert_eq!(engine.scheduler().cancelled_count(), 1);
        assert!(!engine.surface().is_attached());

        // Stale frames and late pointer events do nothing.
        assert_eq!(engine.on_frame(FRAME), None);
        engine.on_pointer(&PointerEvent::mouse(500.0, 500.0));
        assert_eq!(engine.scheduler().pending_count(), 0);
        assert!(!engine.has_pending_frame());
    }

    #[test]
    fn unmount_before_any_pointer_leaves_nothing_scheduled() {
        let mut engine = engine(3);
        engine.unmount();
        assert_eq!(engine.scheduler().pending_count(), 0);
        assert_eq!(engine.scheduler().cancelled_count(), 0);
        assert_eq!(engine.on_frame(FRAME), None);
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        let mut engine = engine(3);
        engine.on_pointer(&PointerEvent::mouse(f32::NAN, 4.0));
        assert_eq!(engine.lifecycle(), Lifecycle::AwaitingPointer);
    }
}
