//! Eased camera that follows the tower height.

/// Ease-in-out quadratic on `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Vertical camera glide towards a target height.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    from: f64,
    to: f64,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Camera {
    pub fn new(y: f64) -> Self {
        Self {
            from: y,
            to: y,
            elapsed_ms: 0,
            duration_ms: 0,
        }
    }

    /// Start gliding from the current height to `target`.
    pub fn retarget(&mut self, target: f64, duration_ms: u32) {
        self.from = self.look_at();
        self.to = target;
        self.elapsed_ms = 0;
        self.duration_ms = duration_ms;
    }

    pub fn advance(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
    }

    /// Height the camera looks at.
    pub fn look_at(&self) -> f64 {
        if self.settled() {
            return self.to;
        }
        let t = self.elapsed_ms as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn settled(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}
