use std::time::{Duration, Instant};

/// Cooperative frame gate derived from a target rate.
///
/// `try_frame` admits a frame only when at least `1 / target_fps` seconds
/// have passed since the last admitted one, and reports the actual elapsed
/// time as `dt`. The gate is advisory: it never aborts work, it only skips
/// scheduling it early.
#[derive(Debug)]
pub struct FrameGate {
    min_interval: Duration,
    last: Option<Instant>,
}

impl FrameGate {
    pub fn new(target_fps: u32) -> Self {
        let fps = target_fps.max(1);
        Self {
            min_interval: Duration::from_secs_f64(1.0 / fps as f64),
            last: None,
        }
    }

    /// Ask for a frame now. The first call always admits with `dt == 0`.
    pub fn try_frame(&mut self) -> Option<f32> {
        self.try_frame_at(Instant::now())
    }

    /// Clock-injected variant used by tests.
    pub fn try_frame_at(&mut self, now: Instant) -> Option<f32> {
        match self.last {
            None => {
                self.last = Some(now);
                Some(0.0)
            }
            Some(last) => {
                let elapsed = now.saturating_duration_since(last);
                if elapsed < self.min_interval {
                    return None;
                }
                self.last = Some(now);
                Some(elapsed.as_secs_f32())
            }
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Rolling frame-time statistics over the last `capacity` frames.
#[derive(Debug)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    capacity: usize,
    next: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: vec![Duration::ZERO; capacity],
            capacity,
            next: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.samples[self.next] = dt;
        self.next = (self.next + 1) % self.capacity;
        if self.next == 0 {
            self.filled = true;
        }
    }

    pub fn count(&self) -> usize {
        if self.filled { self.capacity } else { self.next }
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.samples[..count].iter().sum();
        total / count as u32
    }

    pub fn max(&self) -> Duration {
        self.samples[..self.count()]
            .iter()
            .copied()
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples[..self.count()]
            .iter()
            .copied()
            .min()
            .unwrap_or(Duration::ZERO)
    }
}
