use std::path::PathBuf;

use trailstamp_core::{replay, EngineConfig, PointerPath};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../demos")
        .join(name)
}

#[test]
fn editorial_config_loads() {
    let config = EngineConfig::load(demo("editorial.toml")).unwrap();
    assert_eq!(config.trail.name, "Editorial");
    assert_eq!(config.images.len(), 6);
    assert_eq!(config.tilt.service_card.divisor, 10.0);
}

#[test]
fn scenario_replays_two_stamps_then_settles() {
    let config = EngineConfig::load(demo("editorial.toml")).unwrap();
    let path = PointerPath::load(demo("scenario.json")).unwrap();
    let report = replay(&config, &path).unwrap();

    let slots: Vec<usize> = report.stamps.iter().map(|s| s.slot).collect();
    assert_eq!(slots, vec![0, 1]);
    assert_eq!(report.stamps[1].z_index, report.stamps[0].z_index + 1);
    assert_eq!(report.active_at_end, 0);
}
