use std::{cell::Cell, rc::Rc};

use env_logger::Env;
use log::info;
use stories_core::{
    config::CarouselConfig,
    host::{PageHost, TickResult},
    input::GestureEvent,
    pages::StaticPages,
    surface::Size,
};

use console::{ConsoleSurface, StoryCard, describe};
use script::TimedScript;

#[path = "main/console.rs"]
mod console;
#[path = "main/script.rs"]
mod script;

const SURFACE_SIZE: Size = Size::new(390.0, 844.0);
const FRAME_MS: u64 = 16;
const BAR_LOG_INTERVAL_MS: u64 = 500;
const RUN_LIMIT_MS: u64 = 30_000;
const BACKGROUNDED_AT_MS: u64 = 6_000;
const FOREGROUNDED_AT_MS: u64 = 7_000;

const STORIES: [StoryCard; 4] = [
    StoryCard {
        title: "Homelander",
        caption: "Leader of the Seven",
    },
    StoryCard {
        title: "Starlight",
        caption: "Newest recruit",
    },
    StoryCard {
        title: "A-Train",
        caption: "Fastest man alive",
    },
    StoryCard {
        title: "Queen Maeve",
        caption: "Veteran member",
    },
];
const STORY_DURATIONS_MS: [u32; 4] = [3_000, 3_000, 4_000, 3_000];

static SCRIPT: [(u64, GestureEvent); 8] = [
    (1_200, GestureEvent::Tap { x: 300.0, y: 400.0 }),
    (2_000, GestureEvent::Tap { x: 40.0, y: 400.0 }),
    (5_200, GestureEvent::Tap { x: 40.0, y: 400.0 }),
    (
        7_500,
        GestureEvent::PanChanged {
            translation_y: 120.0,
            velocity_y: 400.0,
        },
    ),
    (
        7_600,
        GestureEvent::PanChanged {
            translation_y: 260.0,
            velocity_y: 300.0,
        },
    ),
    (
        7_700,
        GestureEvent::PanEnded {
            translation_y: 260.0,
            velocity_y: 200.0,
        },
    ),
    (
        17_000,
        GestureEvent::PanChanged {
            translation_y: 80.0,
            velocity_y: 900.0,
        },
    ),
    (
        17_050,
        GestureEvent::PanEnded {
            translation_y: 140.0,
            velocity_y: 1_400.0,
        },
    ),
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let clock = Rc::new(Cell::new(0u64));
    let pages = StaticPages::new(&STORIES).with_durations(&STORY_DURATIONS_MS);
    let input = TimedScript::new(&SCRIPT, Rc::clone(&clock));

    let mut host = PageHost::present(
        pages,
        ConsoleSurface::new(SURFACE_SIZE),
        input,
        CarouselConfig::default(),
        clock.get(),
    )?;

    let mut last_bar_slot = None;
    let mut backgrounded = false;
    let mut foregrounded = false;
    loop {
        let now_ms = clock.get();

        if !backgrounded && now_ms >= BACKGROUNDED_AT_MS {
            backgrounded = true;
            info!("embedder: app backgrounded");
            host.pause(now_ms);
        }
        if !foregrounded && now_ms >= FOREGROUNDED_AT_MS {
            foregrounded = true;
            info!("embedder: app foregrounded");
            host.resume(now_ms);
        }

        match host.tick(now_ms)? {
            TickResult::Dismissed => {
                info!("embedder: carousel closed at {} ms", now_ms);
                break;
            }
            TickResult::RenderRequested => {
                let slot = now_ms / BAR_LOG_INTERVAL_MS;
                if last_bar_slot != Some(slot) || host.is_settling() {
                    last_bar_slot = Some(slot);
                    host.with_screen(now_ms, |screen| info!("{}", describe(&screen)));
                }
            }
            TickResult::NoRender => {}
        }

        if now_ms >= RUN_LIMIT_MS {
            info!("embedder: time limit reached, closing");
            host.dismiss()?;
            break;
        }
        clock.set(now_ms + FRAME_MS);
    }

    Ok(())
}
