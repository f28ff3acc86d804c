//! Trailstamp core engine: renderer-agnostic logic for the pointer image
//! trail, card tilt/spotlight, cursor follower and presets.

pub mod config;
pub mod easing;
pub mod error;
pub mod follower;
pub mod geometry;
pub mod host;
pub mod replay;
pub mod spotlight;
pub mod tilt;
pub mod trail;
pub mod tween;

pub use config::{
    EngineConfig, EntryTween, ExitTween, GridSpotlightPreset, SpringConfig, TiltPreset,
    TiltPresets, TrailPreset,
};
pub use easing::Ease;
pub use error::{ConfigError, ReplayError};
pub use follower::SpringFollower;
pub use replay::{replay, PointerPath, ReplayReport, StampRecord};
pub use spotlight::GridSpotlight;
pub use tilt::{Tilt, TiltGroup};
pub use trail::{
    ImageSlot, Lifecycle, SlotInstance, SlotStyle, Stamp, TrailEngine, TrailStats, VisualState,
};
