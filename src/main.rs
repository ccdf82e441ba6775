use macroquad::prelude::*;
use macroquad::Window;

mod clock;
mod curve;
mod error;
mod settings;
mod shapes;
mod simulation;

use error::Error;
use settings::Settings;
use simulation::{Simulation, TickInput};

fn window_conf(settings: &Settings) -> Conf {
    Conf {
        window_title: settings.window_title.clone(),
        window_width: settings.screen_width as i32,
        window_height: settings.screen_height as i32,
        fullscreen: settings.fullscreen,
        window_resizable: false,
        sample_count: 4,
        icon: None,
        ..Default::default()
    }
}

fn poll_input() -> TickInput {
    TickInput {
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
        escape: is_key_down(KeyCode::Escape),
    }
}

async fn load_font(path: &str) -> Result<Font, Error> {
    load_ttf_font(path).await.map_err(|e| Error::AssetLoad {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

async fn run(settings: Settings) {
    // Route window close through the simulation instead of quitting outright
    prevent_quit();

    let font = match load_font(&settings.font_path).await {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{e}; the win message falls back to the built-in font");
            None
        }
    };

    let seed = settings.seed.unwrap_or_else(|| fastrand::u64(..));
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut sim = Simulation::init(&settings, &mut rng);

    log::info!(
        "Started {}x{} with {} petals (seed {seed})",
        settings.screen_width,
        settings.screen_height,
        sim.petals.len()
    );

    loop {
        // Only set for the frame the close arrives on
        if is_quit_requested() {
            sim.request_close();
        }

        sim.run_frame(get_frame_time(), poll_input);

        if sim.is_closed() {
            break;
        }

        sim.render(font.as_ref());

        next_frame().await
    }
}

fn main() {
    env_logger::init();

    let settings = Settings::from_args();
    Window::from_config(window_conf(&settings), run(settings));
}
