// What you SEE:
// • A borderless, see-through, always-on-top cat sitting at its desk.
// • Any key held anywhere on the desktop: the keyboard paw slaps down.
// • Moving the mouse anywhere: the little mouse slides over the mousepad and
//   the right paw reaches for it (never farther than its reach).
// • D toggles debug shapes (mat outline, anchors, reach). ESC quits.

mod animation;
mod config;
mod draw;
mod error;
mod geometry;
mod input;
mod scene;
mod session;
mod sprites;
mod types;

use animation::AnimationState;
use config::Config;
use draw::Drawer;
use error::Error;
use input::InputState;
use session::{FpsCounter, RunState, Session};
use sprites::SpriteSet;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::{FrameBuffer, Point};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bongo_cat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(Config::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<(), Error> {
    info!("Bongo Cat v{} starting", env!("CARGO_PKG_VERSION"));

    /* --- Artwork ---
       Visual: nothing yet; a missing background stops us right here. */
    let sprites = SpriteSet::load(&config.assets_dir)?;

    /* --- Global input ---
       Visual: paws react even while another window has focus. */
    let display = input::query_display_size(config.fallback_display);
    let input_state = Arc::new(InputState::new(Point::new(display.width / 2.0, display.height / 2.0)));
    let _hook = input::spawn_hook(Arc::clone(&input_state));

    /* --- Overlay window --- */
    let mut drawer = Drawer::new(&config.title, config.window_width, config.window_height, config.target_fps)?;
    let mut screen = FrameBuffer::new(config.window_width, config.window_height);

    let mut animation = AnimationState::new(&config, display);
    let mut session = Session::new(config.debug_overlay);
    let (display_width, display_height) = (display.width, display.height);
    info!("overlay running on a {}x{} display; press ESC to quit", display_width, display_height);

    let result = main_loop(&mut drawer, &mut screen, &sprites, &config, &input_state, &mut animation, &mut session);

    // listeners go quiet before the window and sprites are dropped
    input_state.shutdown();
    info!(state = ?session.state(), paw = ?animation.posture(), "bye");
    result
}

/* ------------------------------ Main loop ------------------------------ */
fn main_loop(
    drawer: &mut Drawer,
    screen: &mut FrameBuffer,
    sprites: &SpriteSet,
    config: &Config,
    input_state: &InputState,
    animation: &mut AnimationState,
    session: &mut Session,
) -> Result<(), Error> {
    let mut fps = FpsCounter::new(Instant::now());

    loop {
        /* 1) Window events: close / ESC / debug toggle. */
        if session.handle(drawer.poll_events()) == RunState::Terminated {
            return Ok(());
        }

        /* 2) Latest input -> paw posture + positions. */
        let pose = animation.update(&input_state.snapshot());

        /* 3) Composite and present (present also paces us to the target FPS). */
        scene::compose(screen, sprites, &pose, config, session.debug_overlay());
        drawer.present(screen)?;

        if let Some(rate) = fps.tick(Instant::now()) {
            debug!("FPS: {rate:.1}");
        }
    }
}
