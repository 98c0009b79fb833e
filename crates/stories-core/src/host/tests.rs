use super::*;
use crate::{
    input::{GestureEvent, InputProvider, MockInput, SwipeDirection},
    pages::StaticPages,
    surface::Size,
};

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 800.0;
const PAGES: [&str; 3] = ["first", "second", "third"];

#[derive(Clone, Debug, PartialEq)]
enum SurfaceOp {
    Mount(&'static str),
    Unmount(Option<&'static str>),
    RaiseBar,
    Offset(f32),
    Detach,
}

#[derive(Debug, Default)]
struct RecordingSurface {
    mounted: Option<&'static str>,
    ops: std::vec::Vec<SurfaceOp>,
    /// Number of upcoming `unmount` calls that fail.
    failing_unmounts: u8,
    /// Zero-based `mount` call that fails.
    failing_mount: Option<usize>,
    mount_calls: usize,
    failing_detaches: u8,
    detached: bool,
}

impl RecordingSurface {
    fn mounts(&self) -> std::vec::Vec<&'static str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Mount(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    fn last_offset(&self) -> Option<f32> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::Offset(offset) => Some(*offset),
            _ => None,
        })
    }
}

impl DisplaySurface for RecordingSurface {
    type Page = &'static str;
    type Error = ();

    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }

    fn mount(&mut self, page: Self::Page) -> Result<(), Self::Error> {
        let call = self.mount_calls;
        self.mount_calls += 1;
        if self.failing_mount == Some(call) {
            return Err(());
        }
        assert!(self.mounted.is_none(), "mounted over {:?}", self.mounted);
        self.mounted = Some(page);
        self.ops.push(SurfaceOp::Mount(page));
        Ok(())
    }

    fn unmount(&mut self) -> Result<Option<Self::Page>, Self::Error> {
        if self.failing_unmounts > 0 {
            self.failing_unmounts -= 1;
            return Err(());
        }
        let released = self.mounted.take();
        self.ops.push(SurfaceOp::Unmount(released));
        Ok(released)
    }

    fn raise_progress_bar(&mut self) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::RaiseBar);
        Ok(())
    }

    fn set_offset_y(&mut self, offset_y: f32) -> Result<(), Self::Error> {
        self.ops.push(SurfaceOp::Offset(offset_y));
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        if self.failing_detaches > 0 {
            self.failing_detaches -= 1;
            return Err(());
        }
        assert!(!self.detached, "detached twice");
        self.detached = true;
        self.ops.push(SurfaceOp::Detach);
        Ok(())
    }
}

struct ScriptedInput<'a> {
    events: &'a [GestureEvent],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    const fn new(events: &'a [GestureEvent]) -> Self {
        Self { events, cursor: 0 }
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<GestureEvent>, Self::Error> {
        let Some(event) = self.events.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(event))
    }
}

type TestHost = PageHost<StaticPages<'static, &'static str>, RecordingSurface, MockInput>;

fn config() -> CarouselConfig {
    CarouselConfig::default().with_segment_duration_ms(1_000)
}

fn present(config: CarouselConfig) -> TestHost {
    present_on(RecordingSurface::default(), config)
}

fn present_on(surface: RecordingSurface, config: CarouselConfig) -> TestHost {
    PageHost::present(StaticPages::new(&PAGES), surface, MockInput::new(), config, 0).unwrap()
}

fn tap(x: f32) -> GestureEvent {
    GestureEvent::Tap { x, y: HEIGHT / 2.0 }
}

fn release(translation_y: f32, velocity_y: f32) -> GestureEvent {
    GestureEvent::PanEnded {
        translation_y,
        velocity_y,
    }
}

#[test]
fn present_mounts_first_page_under_the_bar() {
    let host = present(config());

    assert_eq!(host.mounted_index(), Some(0));
    assert_eq!(
        host.surface().ops,
        [SurfaceOp::Mount("first"), SurfaceOp::RaiseBar]
    );
    assert_eq!(host.progress().state(), PlaybackState::Running);
    assert_eq!(host.progress().count(), 3);
}

#[test]
fn present_rejects_empty_catalog() {
    let empty: [&'static str; 0] = [];
    let result = PageHost::present(
        StaticPages::new(&empty),
        RecordingSurface::default(),
        MockInput::new(),
        config(),
        0,
    );
    assert!(matches!(result, Err(HostError::EmptyCatalog)));
}

#[test]
fn page_durations_come_from_the_catalog() {
    let host = PageHost::present(
        StaticPages::new(&PAGES).with_durations(&[2_500]),
        RecordingSurface::default(),
        MockInput::new(),
        config(),
        0,
    )
    .unwrap();

    assert_eq!(host.progress().duration_ms(0), Some(2_500));
    assert_eq!(host.progress().duration_ms(1), Some(1_000));
}

#[test]
fn show_page_releases_previous_page_before_mounting() {
    let mut host = present(config());

    host.show_page(2).unwrap();

    assert_eq!(
        host.surface().ops[2..],
        [
            SurfaceOp::Unmount(Some("first")),
            SurfaceOp::Mount("third"),
            SurfaceOp::RaiseBar,
        ]
    );
    assert_eq!(host.mounted_index(), Some(2));
}

#[test]
fn show_page_out_of_range_is_an_error() {
    let mut host = present(config());
    let ops_before = host.surface().ops.len();

    let err = host.show_page(3).unwrap_err();

    assert_eq!(err, HostError::PageOutOfRange { index: 3, count: 3 });
    assert_eq!(host.surface().ops.len(), ops_before);
    assert_eq!(host.mounted_index(), Some(0));
}

/// Claims three pages but has nothing for index 1.
struct GappyPages;

impl PageCatalog for GappyPages {
    type Page = &'static str;

    fn page_count(&self) -> u16 {
        3
    }

    fn make_page(&mut self, index: u16) -> Option<Self::Page> {
        match index {
            1 => None,
            _ => PAGES.get(index as usize).copied(),
        }
    }
}

#[test]
fn missing_page_leaves_current_page_mounted() {
    let mut host =
        PageHost::present(GappyPages, RecordingSurface::default(), MockInput::new(), config(), 0)
            .unwrap();
    let ops_before = host.surface().ops.len();

    assert_eq!(host.show_page(1), Err(HostError::MissingPage { index: 1 }));
    assert_eq!(host.mounted_index(), Some(0));
    assert_eq!(host.surface().mounted, Some("first"));
    assert_eq!(host.surface().ops.len(), ops_before);

    host.show_page(2).unwrap();
    assert_eq!(host.surface().mounts(), ["first", "third"]);
}

#[test]
fn failed_unmount_keeps_the_old_page_recorded() {
    let surface = RecordingSurface {
        failing_unmounts: 1,
        ..RecordingSurface::default()
    };
    let mut host = present_on(surface, config());

    assert_eq!(host.show_page(1), Err(HostError::Surface(())));
    assert_eq!(host.mounted_index(), Some(0));
    assert_eq!(host.surface().mounted, Some("first"));

    host.show_page(2).unwrap();
    assert_eq!(host.mounted_index(), Some(2));
    assert_eq!(host.surface().mounted, Some("third"));
    assert_eq!(
        host.surface().ops[2..],
        [
            SurfaceOp::Unmount(Some("first")),
            SurfaceOp::Mount("third"),
            SurfaceOp::RaiseBar,
        ]
    );
}

#[test]
fn failed_mount_leaves_nothing_mounted() {
    let surface = RecordingSurface {
        failing_mount: Some(1),
        ..RecordingSurface::default()
    };
    let mut host = present_on(surface, config());

    assert_eq!(host.show_page(1), Err(HostError::Surface(())));
    assert_eq!(host.mounted_index(), None);
    assert_eq!(host.surface().mounted, None);

    host.show_page(2).unwrap();
    assert_eq!(host.mounted_index(), Some(2));
    assert_eq!(
        host.surface().ops[2..],
        [
            SurfaceOp::Unmount(Some("first")),
            SurfaceOp::Mount("third"),
            SurfaceOp::RaiseBar,
        ]
    );
}

#[test]
fn surface_errors_surface_through_tick_and_gestures() {
    let surface = RecordingSurface {
        failing_unmounts: 2,
        ..RecordingSurface::default()
    };
    let mut host = present_on(surface, config());

    assert_eq!(host.tick(1_000), Err(HostError::Surface(())));
    assert_eq!(host.handle_gesture(tap(WIDTH), 1_100), Err(HostError::Surface(())));
    assert_eq!(host.mounted_index(), Some(0));
    assert_eq!(host.surface().mounted, Some("first"));
}

#[test]
fn timer_expiry_swaps_pages() {
    let mut host = present(config());

    assert_eq!(host.tick(500).unwrap(), TickResult::RenderRequested);
    assert_eq!(host.mounted_index(), Some(0));

    host.tick(1_000).unwrap();
    assert_eq!(host.mounted_index(), Some(1));
    assert_eq!(host.surface().mounts(), ["first", "second"]);
}

#[test]
fn tap_at_left_edge_rewinds_and_right_edge_skips() {
    assert_eq!(tap_zone(0.0, WIDTH), TapZone::Back);
    assert_eq!(tap_zone(WIDTH / 2.0 - 0.5, WIDTH), TapZone::Back);
    assert_eq!(tap_zone(WIDTH / 2.0, WIDTH), TapZone::Forward);
    assert_eq!(tap_zone(WIDTH, WIDTH), TapZone::Forward);

    let mut host = present(config());
    host.handle_gesture(tap(WIDTH), 100).unwrap();
    assert_eq!(host.progress().index(), 1);
    assert_eq!(host.mounted_index(), Some(1));

    host.handle_gesture(tap(0.0), 900).unwrap();
    assert_eq!(host.progress().index(), 0);
    assert_eq!(host.surface().mounts(), ["first", "second", "first"]);
}

#[test]
fn tap_near_segment_start_restarts_without_swapping() {
    let mut host = present(config());
    host.handle_gesture(tap(WIDTH), 100).unwrap();

    host.handle_gesture(tap(0.0), 300).unwrap();

    assert_eq!(host.progress().index(), 1);
    assert_eq!(host.progress().elapsed_ms(300), 0);
    assert_eq!(host.surface().mounts(), ["first", "second"]);
}

#[test]
fn finishing_keeps_last_page_up() {
    let mut host = present(config());
    for _ in 0..3 {
        host.handle_gesture(tap(WIDTH), 10).unwrap();
    }

    assert!(host.progress().is_finished());
    assert!(!host.is_dismissed());
    assert_eq!(host.mounted_index(), Some(2));
    assert_ne!(host.tick(60_000).unwrap(), TickResult::Dismissed);
    assert_eq!(host.progress().index(), 2);
}

#[test]
fn finishing_dismisses_when_configured() {
    let mut host = present(config().with_dismiss_on_finish(true));

    assert_eq!(host.tick(3_000).unwrap(), TickResult::Dismissed);
    assert!(host.is_dismissed());
}

#[test]
fn pan_tracks_downward_drag_only() {
    let mut host = present(config());

    host.handle_gesture(
        GestureEvent::PanChanged {
            translation_y: -40.0,
            velocity_y: -10.0,
        },
        10,
    )
    .unwrap();
    assert_eq!(host.surface().last_offset(), Some(0.0));

    host.handle_gesture(
        GestureEvent::PanChanged {
            translation_y: 120.0,
            velocity_y: 300.0,
        },
        20,
    )
    .unwrap();
    assert_eq!(host.surface().last_offset(), Some(120.0));
    assert_eq!(
        host.drag(),
        Some(DragState {
            translation_y: 120.0,
            velocity_y: 300.0,
        })
    );
}

#[test]
fn release_thresholds() {
    let config = CarouselConfig::default();

    assert_eq!(
        release_outcome(HEIGHT / 2.0 + 1.0, 0.0, HEIGHT, &config),
        ReleaseOutcome::Dismiss
    );
    assert_eq!(
        release_outcome(HEIGHT / 2.0 - 1.0, 0.0, HEIGHT, &config),
        ReleaseOutcome::Restore
    );
    assert_eq!(
        release_outcome(0.0, 1_001.0, HEIGHT, &config),
        ReleaseOutcome::Dismiss
    );
    assert_eq!(
        release_outcome(0.0, 1_000.0, HEIGHT, &config),
        ReleaseOutcome::Restore
    );
    assert_eq!(
        release_outcome(-HEIGHT, 0.0, HEIGHT, &config),
        ReleaseOutcome::Restore
    );
}

#[test]
fn long_drag_release_slides_out_then_dismisses() {
    let mut host = present(config());
    host.handle_gesture(release(HEIGHT / 2.0 + 1.0, 0.0), 100).unwrap();
    assert!(host.is_settling());

    assert_eq!(host.tick(250).unwrap(), TickResult::RenderRequested);
    assert!(host.offset_y() > HEIGHT / 2.0 && host.offset_y() < HEIGHT);

    assert_eq!(host.tick(400).unwrap(), TickResult::Dismissed);
    assert_eq!(host.tick(450).unwrap(), TickResult::NoRender);

    let ops = &host.surface().ops;
    let tail = &ops[ops.len() - 3..];
    assert_eq!(
        tail,
        [
            SurfaceOp::Offset(HEIGHT),
            SurfaceOp::Unmount(Some("first")),
            SurfaceOp::Detach,
        ]
    );
}

#[test]
fn fling_release_dismisses_from_rest() {
    let mut host = present(config());
    host.handle_gesture(release(0.0, 1_001.0), 100).unwrap();
    assert_eq!(host.tick(400).unwrap(), TickResult::Dismissed);
}

#[test]
fn short_drag_release_snaps_back() {
    let mut host = present(config());
    host.handle_gesture(
        GestureEvent::PanChanged {
            translation_y: HEIGHT / 2.0 - 1.0,
            velocity_y: 0.0,
        },
        50,
    )
    .unwrap();
    host.handle_gesture(release(HEIGHT / 2.0 - 1.0, 0.0), 100).unwrap();

    host.tick(400).unwrap();

    assert!(!host.is_dismissed());
    assert!(!host.is_settling());
    assert_eq!(host.offset_y(), 0.0);
    assert_eq!(host.surface().last_offset(), Some(0.0));
}

#[test]
fn cancelled_pan_settles_back_to_rest() {
    let mut host = present(config());
    host.handle_gesture(GestureEvent::PanCancelled, 10).unwrap();
    assert!(!host.is_settling());

    host.handle_gesture(
        GestureEvent::PanChanged {
            translation_y: 600.0,
            velocity_y: 2_000.0,
        },
        50,
    )
    .unwrap();
    host.handle_gesture(GestureEvent::PanCancelled, 100).unwrap();
    assert!(host.is_settling());
    assert!(host.drag().is_none());

    assert_eq!(host.tick(400).unwrap(), TickResult::RenderRequested);

    assert!(!host.is_settling());
    assert!(!host.is_dismissed());
    assert_eq!(host.offset_y(), 0.0);
    assert_eq!(host.surface().last_offset(), Some(0.0));
    assert_eq!(host.mounted_index(), Some(0));
}

#[test]
fn gestures_are_ignored_while_settling() {
    let mut host = present(config());
    host.handle_gesture(release(10.0, 0.0), 100).unwrap();

    host.handle_gesture(tap(WIDTH), 150).unwrap();
    host.handle_gesture(GestureEvent::Swipe(SwipeDirection::Down), 160).unwrap();

    assert_eq!(host.progress().index(), 0);
    assert!(!host.is_dismissed());
}

#[test]
fn swipe_down_tears_down_immediately() {
    let mut host = present(config());

    host.handle_gesture(GestureEvent::Swipe(SwipeDirection::Up), 10).unwrap();
    assert!(!host.is_dismissed());

    host.handle_gesture(GestureEvent::Swipe(SwipeDirection::Down), 20).unwrap();

    assert!(host.is_dismissed());
    assert_eq!(host.mounted_index(), None);
    assert_eq!(host.progress().state(), PlaybackState::Idle);
    assert_eq!(host.surface().ops.last(), Some(&SurfaceOp::Detach));

    assert_eq!(host.tick(30).unwrap(), TickResult::Dismissed);
    assert_eq!(host.tick(10_000).unwrap(), TickResult::NoRender);
    assert_eq!(host.progress().index(), 0);
}

#[test]
fn teardown_detaches_even_when_unmount_fails() {
    let surface = RecordingSurface {
        failing_unmounts: 1,
        ..RecordingSurface::default()
    };
    let mut host = present_on(surface, config());

    assert_eq!(host.dismiss(), Err(HostError::Surface(())));
    assert!(host.is_dismissed());
    assert!(host.surface().detached);
    assert_eq!(host.mounted_index(), Some(0));

    host.dismiss().unwrap();
    assert_eq!(host.mounted_index(), None);
    assert_eq!(host.surface().mounted, None);

    let ops_before = host.surface().ops.len();
    host.dismiss().unwrap();
    assert_eq!(host.surface().ops.len(), ops_before);
    assert_eq!(host.tick(10).unwrap(), TickResult::Dismissed);
}

#[test]
fn failed_detach_is_retried() {
    let surface = RecordingSurface {
        failing_detaches: 1,
        ..RecordingSurface::default()
    };
    let mut host = present_on(surface, config());

    assert_eq!(host.dismiss(), Err(HostError::Surface(())));
    assert_eq!(host.mounted_index(), None);
    assert!(!host.surface().detached);

    host.dismiss().unwrap();
    assert!(host.surface().detached);
    assert_eq!(host.surface().ops.last(), Some(&SurfaceOp::Detach));
}

#[test]
fn dismissed_host_ignores_everything() {
    let mut host = present(config());
    host.dismiss().unwrap();
    let ops_before = host.surface().ops.len();

    host.handle_gesture(tap(WIDTH), 10).unwrap();
    host.show_page(1).unwrap();
    host.resume(20);
    host.dismiss().unwrap();

    assert_eq!(host.surface().ops.len(), ops_before);
    assert_eq!(host.progress().index(), 0);

    let mut drawn = false;
    host.with_screen(30, |_| drawn = true);
    assert!(!drawn);
}

#[test]
fn polled_gestures_drive_the_host() {
    let events = [
        tap(WIDTH),
        tap(WIDTH),
        GestureEvent::Swipe(SwipeDirection::Down),
        tap(0.0),
    ];
    let mut host = PageHost::present(
        StaticPages::new(&PAGES),
        RecordingSurface::default(),
        ScriptedInput::new(&events),
        config(),
        0,
    )
    .unwrap();

    assert_eq!(host.tick(100).unwrap(), TickResult::Dismissed);
    assert_eq!(host.progress().index(), 2);
    assert_eq!(host.surface().mounts(), ["first", "second", "third"]);
}

#[test]
fn pause_holds_the_page() {
    let mut host = present(config());
    host.pause(400);

    assert_eq!(host.tick(5_000).unwrap(), TickResult::RenderRequested);
    assert_eq!(host.tick(5_100).unwrap(), TickResult::NoRender);
    assert_eq!(host.mounted_index(), Some(0));

    host.resume(6_000);
    host.tick(6_599).unwrap();
    assert_eq!(host.mounted_index(), Some(0));
    host.tick(6_600).unwrap();
    assert_eq!(host.mounted_index(), Some(1));
}

#[test]
fn screen_reports_fills_and_drag() {
    let mut host = present(config());
    host.handle_gesture(tap(WIDTH), 0).unwrap();
    host.handle_gesture(
        GestureEvent::PanChanged {
            translation_y: 200.0,
            velocity_y: 0.0,
        },
        250,
    )
    .unwrap();

    let mut seen = None;
    host.with_screen(250, |screen| {
        seen = Some((
            screen.page_index,
            screen.bar.fills.to_vec(),
            screen.offset_y,
            screen.alpha,
        ));
    });

    assert_eq!(seen, Some((1, vec![100, 25, 0], 200.0, 0.75)));
}
