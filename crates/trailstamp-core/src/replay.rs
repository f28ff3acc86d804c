//! Headless replay of a recorded pointer path through the trail engine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use trailstamp_platform::{PointerEvent, Rect};

use crate::config::EngineConfig;
use crate::error::ReplayError;
use crate::host::{FixedSurface, ManualScheduler};
use crate::trail::TrailEngine;

/// Upper bound on frames run after the last sample (ten minutes at 60 Hz).
const MAX_TAIL_FRAMES: u64 = 36_000;

fn default_frame_dt() -> f32 {
    1.0 / 60.0
}

fn default_container() -> Rect {
    Rect::from_size(1280.0, 800.0)
}

fn default_slot_size() -> (f32, f32) {
    (190.0, 250.0)
}

/// A pointer recording: one event per display frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointerPath {
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f32,
    #[serde(default = "default_container")]
    pub container: Rect,
    #[serde(default = "default_slot_size")]
    pub slot_size: (f32, f32),
    /// Extra seconds of frames to run after the last sample.
    #[serde(default)]
    pub tail_seconds: f32,
    pub samples: Vec<PointerEvent>,
}

impl PointerPath {
    pub fn new(samples: Vec<PointerEvent>) -> Self {
        Self {
            frame_dt: default_frame_dt(),
            container: default_container(),
            slot_size: default_slot_size(),
            tail_seconds: 0.0,
            samples,
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StampRecord {
    pub frame: u64,
    pub slot: usize,
    pub z_index: u32,
    pub target: [f32; 2],
    pub interrupted: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    pub mounted: bool,
    pub frames: u64,
    pub stamps: Vec<StampRecord>,
    pub stack_resets: u64,
    pub active_at_end: usize,
}

impl ReplayReport {
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Drives a trail engine over `path`, delivering one frame after each
/// sample and then `tail_seconds` of frames with the pointer at rest.
pub fn replay(config: &EngineConfig, path: &PointerPath) -> Result<ReplayReport, ReplayError> {
    config.validate()?;
    if !(path.frame_dt > 0.0 && path.frame_dt.is_finite()) {
        return Err(ReplayError::FrameDt(path.frame_dt));
    }

    let tail = (f64::from(path.tail_seconds.max(0.0)) / f64::from(path.frame_dt)).ceil();
    if !(tail <= MAX_TAIL_FRAMES as f64) {
        return Err(ReplayError::TailTooLong {
            seconds: path.tail_seconds,
            frame_dt: path.frame_dt,
            max: MAX_TAIL_FRAMES,
        });
    }
    let tail_frames = tail as u64;

    let surface = FixedSurface::new(path.container, path.slot_size);
    let Some(mut engine) = TrailEngine::mount(
        Some(surface),
        &config.images,
        config.trail.clone(),
        ManualScheduler::new(),
    ) else {
        info!("Replay: nothing mounted");
        return Ok(ReplayReport::default());
    };

    let mut report = ReplayReport {
        mounted: true,
        ..ReplayReport::default()
    };
    for sample in &path.samples {
        engine.on_pointer(sample);
        run_frame(&mut engine, &mut report, path.frame_dt);
    }
    for _ in 0..tail_frames {
        run_frame(&mut engine, &mut report, path.frame_dt);
    }

    let stats = engine.stats();
    report.frames = stats.frames;
    report.stack_resets = stats.stack_resets;
    report.active_at_end = engine.active_count();
    engine.unmount();

    info!(
        "Replay finished => {} frames, {} stamps, {} still active",
        report.frames,
        report.stamps.len(),
        report.active_at_end
    );
    Ok(report)
}

fn run_frame(
    engine: &mut TrailEngine<FixedSurface, ManualScheduler>,
    report: &mut ReplayReport,
    dt: f32,
) {
    if engine.scheduler_mut().fire().is_none() {
        return;
    }
    if let Some(stamp) = engine.on_frame(dt) {
        report.stamps.push(StampRecord {
            frame: engine.stats().frames,
            slot: stamp.slot,
            z_index: stamp.z_index,
            target: stamp.target.to_array(),
            interrupted: stamp.interrupted,
        });
    }
}
