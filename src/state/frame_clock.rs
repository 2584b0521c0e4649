//! Fixed-tick clock driven by animation-frame timestamps.

/// What one frame learned from the clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTiming {
    /// Whole ticks elapsed since the previous frame.
    pub ticks: u32,
    /// Frames counted over the last full second; only set on the frame that closes the second.
    pub fps: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_ms: f64,
    max_ticks: u32,
    last_ms: Option<f64>,
    carry_ms: f64,
    window_start_ms: f64,
    frames: u32,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let ticks_per_second = ticks_per_second.max(1);
        Self {
            tick_ms: 1000.0 / ticks_per_second as f64,
            // A backgrounded tab can stall for minutes; never catch up more than a second.
            max_ticks: ticks_per_second,
            last_ms: None,
            carry_ms: 0.0,
            window_start_ms: 0.0,
            frames: 0,
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameTiming {
        let Some(last) = self.last_ms.replace(now_ms) else {
            self.window_start_ms = now_ms;
            return FrameTiming::default();
        };
        let elapsed = (now_ms - last).max(0.0) + self.carry_ms;
        let whole = (elapsed / self.tick_ms).floor();
        self.carry_ms = elapsed - whole * self.tick_ms;
        let mut ticks = whole as u32;
        if ticks > self.max_ticks {
            ticks = self.max_ticks;
            self.carry_ms = 0.0;
        }

        self.frames += 1;
        let mut fps = None;
        if now_ms - self.window_start_ms >= 1000.0 {
            let seconds = (now_ms - self.window_start_ms) / 1000.0;
            fps = Some((self.frames as f64 / seconds).round() as u32);
            self.frames = 0;
            self.window_start_ms = now_ms;
        }
        FrameTiming { ticks, fps }
    }
}
