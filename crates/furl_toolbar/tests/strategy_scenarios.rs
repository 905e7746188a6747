//! Scroll distribution scenarios across the three strategies

use furl_toolbar::{
    ConfiguredCoordinator, FixedStepClock, NestedScrollConnection, NestedScrollSource, Offset,
    ScrollStrategy, ToolbarConfig, ToolbarState,
};

fn build(strategy: ScrollStrategy, min: i32, max: i32) -> ConfiguredCoordinator<FixedStepClock> {
    ToolbarConfig::new(strategy, min, max)
        .build_with(FixedStepClock::from_fps)
        .unwrap()
}

/// One drag event through the full pre-scroll / content / post-scroll pass,
/// against content that has nothing to scroll
fn drag_at_top(c: &mut ConfiguredCoordinator<FixedStepClock>, dy: f32) -> f32 {
    let pre = c.on_pre_scroll(Offset::vertical(dy), NestedScrollSource::Drag);
    let left = Offset::vertical(dy) - pre;
    let post = c.on_post_scroll(Offset::ZERO, left, NestedScrollSource::Drag);
    pre.y + post.y
}

#[test]
fn test_enter_always_scenario() {
    let mut c = build(ScrollStrategy::EnterAlways, 50, 80);

    let consumed = c.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag);

    assert_eq!(consumed.y, -50.0);
    assert_eq!(c.toolbar().height(), 50);
    assert_eq!(c.offset(), -20);
}

#[test]
fn test_enter_always_collapsed_scenario() {
    let mut c = build(ScrollStrategy::EnterAlwaysCollapsed, 50, 80);
    c.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag);
    assert_eq!(c.offset(), -20);

    let consumed = c.on_pre_scroll(Offset::vertical(15.0), NestedScrollSource::Drag);
    assert_eq!(consumed.y, 15.0);
    assert_eq!(c.offset(), -5);
    assert_eq!(c.toolbar().height(), 50);

    // Content had nothing to scroll
    let consumed = c.on_post_scroll(
        Offset::ZERO,
        Offset::vertical(10.0),
        NestedScrollSource::Drag,
    );
    assert_eq!(consumed.y, 10.0);
    assert_eq!(c.toolbar().height(), 60);
}

#[test]
fn test_exit_until_collapsed_scenario() {
    let mut c = build(ScrollStrategy::ExitUntilCollapsed, 40, 80);

    let consumed = c.on_pre_scroll(Offset::vertical(-40.0), NestedScrollSource::Drag);

    assert_eq!(consumed.y, -40.0);
    assert_eq!(c.toolbar().height(), 40);
    assert_eq!(c.offset(), 0);
}

#[test]
fn test_consumption_never_exceeds_delta() {
    let deltas = [-7.5, -30.0, 12.25, -0.4, 55.0, -90.0, 3.3, 0.0, 41.0, -18.6];

    for strategy in ScrollStrategy::ALL {
        let mut c = build(strategy, 56, 120);
        for dy in deltas {
            let consumed = c
                .on_pre_scroll(Offset::vertical(dy), NestedScrollSource::Drag)
                .y;
            assert!(
                consumed.abs() <= dy.abs() + 1e-4,
                "{}: consumed {} of {}",
                strategy,
                consumed,
                dy
            );
            assert!(consumed * dy >= 0.0, "{}: sign flipped on {}", strategy, dy);
        }
    }
}

#[test]
fn test_round_trip_restores_state() {
    for strategy in ScrollStrategy::ALL {
        let mut c = build(strategy, 50, 80);

        let collapsed = drag_at_top(&mut c, -45.0);
        let expanded = drag_at_top(&mut c, -collapsed);

        assert_eq!(collapsed + expanded, 0.0, "{}", strategy);
        assert_eq!(c.toolbar().height(), 80, "{}", strategy);
        assert_eq!(c.offset(), 0, "{}", strategy);
    }
}

#[test]
fn test_quarter_pixel_round_trip_restores_state() {
    for strategy in ScrollStrategy::ALL {
        let mut c = build(strategy, 50, 80);

        let mut total = 0.0;
        for _ in 0..180 {
            total += drag_at_top(&mut c, -0.25);
        }
        for _ in 0..180 {
            total += drag_at_top(&mut c, 0.25);
        }

        assert_eq!(total, 0.0, "{}", strategy);
        assert_eq!(c.toolbar().height(), 80, "{}", strategy);
        assert_eq!(c.offset(), 0, "{}", strategy);
    }
}

#[test]
fn test_offset_stays_within_header_height() {
    let deltas = [-33.3, -12.7, 8.1, -60.0, 25.5, -4.4, 90.0, -120.0, 0.6, 17.0];

    for strategy in [ScrollStrategy::EnterAlways, ScrollStrategy::EnterAlwaysCollapsed] {
        let mut c = build(strategy, 56, 96);
        for (i, dy) in deltas.iter().cycle().take(200).enumerate() {
            drag_at_top(&mut c, *dy);
            let height = c.toolbar().height();
            assert!(
                (-height..=0).contains(&c.offset()),
                "{}: offset {} with height {} at step {}",
                strategy,
                c.offset(),
                height,
                i
            );
        }
    }
}

#[test]
fn test_enter_always_moves_one_dimension_at_a_time() {
    let mut c = build(ScrollStrategy::EnterAlways, 56, 96);
    let deltas = [-25.0, -30.0, 10.0, 14.0, 22.0, -70.0, 5.5, 60.0];

    for dy in deltas {
        c.on_pre_scroll(Offset::vertical(dy), NestedScrollSource::Drag);
        let height = c.toolbar().height();
        assert!(
            c.offset() == 0 || height == 56,
            "offset {} with height {}",
            c.offset(),
            height
        );
    }
}
