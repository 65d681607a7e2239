#![allow(dead_code)]

use std::thread;
use std::time::{Duration, Instant};

#[derive(Copy, Clone)]
pub struct Timer {
    last_time: Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer { last_time: Instant::now() }
    }

    /// Marks a new tick time and returns the time elapsed in seconds since
    /// the last call to tick().
    pub fn tick(&mut self) -> f32 {
        let n = Instant::now();
        let dt = n.duration_since(self.last_time);
        self.last_time = n;
        dt.as_secs_f32()
    }

    /// Returns the time elapsed in seconds since the last call to tick().
    pub fn elapsed(&self) -> f32 {
        Instant::now().duration_since(self.last_time).as_secs_f32()
    }

    /// Sleeps the current thread until n seconds after the last tick.
    pub fn sleep_until(&self, n: f32) {
        let dt = Instant::now().duration_since(self.last_time);
        let target = Duration::from_secs_f32(n);
        if dt < target {
            thread::sleep(target - dt);
        }
    }
}

impl Default for Timer {
    fn default() -> Timer {
        Timer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_is_nonnegative() {
        let mut t = Timer::new();
        let dt = t.tick();
        assert!(dt >= 0.0);
    }
}
