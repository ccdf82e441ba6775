use std::rc::Rc;

use crate::{
    clock::FrameClock,
    curve::Outline,
    settings::{consts::*, Settings},
    shapes::{Bounded, Petal, Player},
};

use itertools::Itertools;
use macroquad::{color::*, math::vec2, shapes::*, text::*, window::*};
use ultraviolet::Vec2;

/// Keyboard state sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub escape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Running,
    /// Every petal is gone; the message stays up for `remaining` seconds
    Won { remaining: f32 },
    Closed,
}

pub struct Simulation {
    pub player: Player,
    pub petals: Vec<Petal>,
    pub clock: FrameClock,
    pub phase: Phase,
    bounds: Vec2,
    win_message: String,
    win_hold_secs: f32,
}

/// Every tenth petal, counting from the first, falls one unit faster.
pub fn petal_speed(index: usize) -> f32 {
    if index % 10 == 0 {
        PETAL_BASE_SPEED + 1.0
    } else {
        PETAL_BASE_SPEED
    }
}

/// Shifts a running colour by one random step: red down by up to four,
/// green and blue up by at most one. Draws are continuous and truncated.
fn drift_color(rng: &mut fastrand::Rng, rgb: [u8; 3]) -> [u8; 3] {
    let dr = (rng.f64() * DRIFT_RED) as u8;
    let dg = (rng.f64() * DRIFT_GREEN) as u8;
    let db = (rng.f64() * DRIFT_BLUE) as u8;

    [
        rgb[0].saturating_sub(dr),
        rgb[1].saturating_add(dg),
        rgb[2].saturating_add(db),
    ]
}

fn uniform(rng: &mut fastrand::Rng, lo: f64, hi: f64) -> f64 {
    lo + rng.f64() * (hi - lo)
}

fn scatter_petals(
    rng: &mut fastrand::Rng,
    outline: Rc<Outline>,
    count: usize,
    width: f32,
    height: f32,
) -> Vec<Petal> {
    let mut rgb = [255, 0, 0];

    (0..count)
        .map(|_| {
            let x = uniform(rng, 1.0, width as f64) as f32;
            let y = uniform(rng, 1.0, height as f64) as f32;
            let scale = uniform(rng, PETAL_SCALE_MIN, PETAL_SCALE_MAX).trunc() as f32;

            rgb = drift_color(rng, rgb);

            Petal {
                outline: outline.clone(),
                color: Color::from_rgba(rgb[0], rgb[1], rgb[2], 255),
                scale,
                pos: Vec2::new(x, y),
            }
        })
        .collect()
}

fn to_screen(v: Vec2) -> macroquad::math::Vec2 {
    vec2(v.x, v.y)
}

impl Simulation {
    pub fn init(settings: &Settings, rng: &mut fastrand::Rng) -> Self {
        let outline = Rc::new(Outline::heart(settings.curve_pieces));
        let petals = scatter_petals(
            rng,
            outline,
            settings.petal_count,
            settings.screen_width,
            settings.screen_height,
        );

        let bounds = Vec2::new(settings.screen_width, settings.screen_height);

        Self {
            player: Player::new(bounds * 0.5, RED),
            petals,
            clock: FrameClock::default(),
            phase: if settings.petal_count == 0 {
                Phase::Won {
                    remaining: settings.win_hold_secs,
                }
            } else {
                Phase::Running
            },
            bounds,
            win_message: settings.win_message.clone(),
            win_hold_secs: settings.win_hold_secs,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Window close. Takes effect at once, whether or not a tick is due this
    /// frame; ignored while the win message is held.
    pub fn request_close(&mut self) {
        if self.phase == Phase::Running {
            log::info!("Window close requested");
            self.phase = Phase::Closed;
        }
    }

    /// Runs the catch-up loop for one rendered frame, sampling input once per
    /// tick. Returns how many ticks ran.
    pub fn run_frame(&mut self, frame_time: f32, mut poll: impl FnMut() -> TickInput) -> u32 {
        self.clock.begin_frame(frame_time);

        if let Phase::Won { remaining } = self.phase {
            self.hold(remaining - frame_time);
            return 0;
        }

        while self.phase == Phase::Running && self.clock.tick_due() {
            self.tick(&poll());
            self.clock.consume_tick();
        }

        if self.clock.lagging() {
            log::debug!(
                "Catch-up capped at {MAX_TICKS_PER_FRAME} ticks after a {:.3}s frame, {:.3}s behind",
                self.clock.frame_time,
                self.clock.accumulator
            );
        }

        self.clock.ticks_this_frame()
    }

    fn hold(&mut self, remaining: f32) {
        self.phase = if remaining > 0.0 {
            Phase::Won { remaining }
        } else {
            log::info!("Closing after win message");
            Phase::Closed
        };
    }

    /// Advances the game by one fixed step.
    pub fn tick(&mut self, input: &TickInput) {
        if self.phase != Phase::Running {
            return;
        }

        let mut step = Vec2::zero();
        if input.up {
            step.y -= PLAYER_STEP;
        }
        if input.down {
            step.y += PLAYER_STEP;
        }
        if input.left {
            step.x -= PLAYER_STEP;
        }
        if input.right {
            step.x += PLAYER_STEP;
        }
        self.player.translate(step);

        if input.escape {
            log::info!("Escape pressed");
            self.phase = Phase::Closed;
            return;
        }

        let player_bounds = self.player.bounds();
        let floor = self.bounds.y;
        let mut index = 0;

        self.petals.retain_mut(|petal| {
            petal.fall(petal_speed(index), floor);
            index += 1;

            let hit = petal.bounds().intersects(&player_bounds);
            if hit {
                log::debug!("Collected petal at ({:.0}, {:.0})", petal.pos.x, petal.pos.y);
            }
            !hit
        });

        if self.petals.is_empty() {
            log::info!("All petals cleared");
            self.phase = Phase::Won {
                remaining: self.win_hold_secs,
            };
        }

        self.player.rotate(PLAYER_SPIN);
    }

    pub fn render(&self, font: Option<&Font>) {
        clear_background(BLACK);

        let [a, b, c, d] = self.player.corners().map(to_screen);
        draw_triangle(a, b, c, self.player.color);
        draw_triangle(a, c, d, self.player.color);

        for petal in self.petals.iter() {
            let center = to_screen(petal.fan_center());

            for (p, q) in petal.points().map(to_screen).circular_tuple_windows() {
                draw_triangle(center, p, q, petal.color);
            }
        }

        if let Phase::Won { .. } = self.phase {
            self.draw_win_message(font);
        }
    }

    fn draw_win_message(&self, font: Option<&Font>) {
        let size = measure_text(&self.win_message, font, WIN_FONT_SIZE, 1.0);
        let x = (self.bounds.x - size.width) * 0.5;
        let y = (self.bounds.y - size.height) * 0.5 + size.offset_y;

        draw_text_ex(
            &self.win_message,
            x,
            y,
            TextParams {
                font,
                font_size: WIN_FONT_SIZE,
                color: RED,
                ..Default::default()
            },
        );
    }
}
