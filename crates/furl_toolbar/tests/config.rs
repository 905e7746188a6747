//! furl.toml loading and building

use std::fs;

use furl_toolbar::{
    Easing, FixedStepClock, NestedScrollConnection, NestedScrollSource, Offset, ScrollStrategy,
    SnapStrategy, ToolbarConfig, ToolbarError, ToolbarState, Velocity,
};

#[test]
fn test_toml_round_trip() {
    let config = ToolbarConfig::new(ScrollStrategy::EnterAlwaysCollapsed, 48, 160)
        .with_initial_height(100)
        .with_snap(SnapStrategy::new(0.4, 250).unwrap().with_easing(Easing::EaseInOut));

    let text = config.to_toml().unwrap();
    assert!(text.contains("strategy = \"enter-always-collapsed\""), "{}", text);
    assert!(text.contains("min-height = 48"), "{}", text);

    let parsed = ToolbarConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_default_config_round_trips() {
    let config = ToolbarConfig::default();
    let parsed = ToolbarConfig::from_toml_str(&config.to_toml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join(format!("furl-config-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("furl.toml");
    fs::write(
        &path,
        "strategy = \"exit-until-collapsed\"\nmin-height = 40\nmax-height = 80\n",
    )
    .unwrap();

    let config = ToolbarConfig::load(&path).unwrap();
    assert_eq!(config.strategy, ScrollStrategy::ExitUntilCollapsed);

    let missing = ToolbarConfig::load(&dir.join("missing.toml"));
    assert!(matches!(missing, Err(ToolbarError::Io(_))));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_built_coordinator_flings_and_snaps() {
    let config = ToolbarConfig::new(ScrollStrategy::ExitUntilCollapsed, 50, 80)
        .with_snap(SnapStrategy::default());
    let mut c = config.build_with(FixedStepClock::from_fps).unwrap();

    // Collapse most of the way with a drag
    c.on_pre_scroll(Offset::vertical(-18.0), NestedScrollSource::Drag);
    assert_eq!(c.toolbar().height(), 62);

    // A slow release: no fling, the snap settles to the nearer bound
    pollster::block_on(c.on_pre_fling(Velocity::ZERO));
    pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::ZERO));
    assert_eq!(c.toolbar().height(), 50);

    // Leftover expanding velocity from the content opens it fully
    let consumed =
        pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::vertical(3000.0)));
    assert_eq!(c.toolbar().height(), 80);
    assert!(consumed.y > 0.0 && consumed.y < 3000.0);
}
