use crate::settings::consts::{MAX_TICKS_PER_FRAME, TICK_DT};

/// Fixed-timestep accumulator with a bounded catch-up loop.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    /// Time not yet consumed by ticks
    pub accumulator: f32,
    /// Duration of the last rendered frame
    pub frame_time: f32,
    ticks_this_frame: u32,
}

impl FrameClock {
    pub fn begin_frame(&mut self, frame_time: f32) {
        self.frame_time = frame_time;
        self.accumulator += frame_time;
        self.ticks_this_frame = 0;
    }

    /// Whether another tick is due this frame
    pub fn tick_due(&self) -> bool {
        self.accumulator >= TICK_DT && self.ticks_this_frame < MAX_TICKS_PER_FRAME
    }

    pub fn consume_tick(&mut self) {
        self.accumulator -= TICK_DT;
        self.ticks_this_frame += 1;
    }

    pub fn ticks_this_frame(&self) -> u32 {
        self.ticks_this_frame
    }

    /// True when the cap, not the accumulator, ended the frame's ticks
    pub fn lagging(&self) -> bool {
        self.ticks_this_frame == MAX_TICKS_PER_FRAME && self.accumulator >= TICK_DT
    }
}
