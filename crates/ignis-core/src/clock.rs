// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A monotonic elapsed-time tracker driven by the platform's absolute time.

/// Tracks the time elapsed since [`Clock::start`].
///
/// The clock never reads time itself; every call receives the current
/// absolute time (in seconds) from the platform layer. This keeps it
/// deterministic under a scripted time source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    start_time: Option<f64>,
    elapsed: f64,
}

impl Clock {
    /// Creates a stopped clock with zero elapsed time.
    /// ## Returns
    /// A new instance of the Clock struct.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the clock at `now` and resets the elapsed time.
    /// ## Arguments
    /// * `now` - The current absolute time in seconds.
    #[inline]
    pub fn start(&mut self, now: f64) {
        self.start_time = Some(now);
        self.elapsed = 0.0;
    }

    /// Recomputes the elapsed time from `now`.
    ///
    /// Has no effect on a stopped clock.
    /// ## Arguments
    /// * `now` - The current absolute time in seconds.
    #[inline]
    pub fn update(&mut self, now: f64) {
        if let Some(start) = self.start_time {
            self.elapsed = now - start;
        }
    }

    /// Stops the clock. The last elapsed value is kept.
    #[inline]
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    /// Seconds between `start` and the latest `update`.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Returns `true` between `start` and `stop`.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A new clock is stopped and reports nothing elapsed.
    #[test]
    fn clock_starts_stopped() {
        let clock = Clock::new();
        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), 0.0);
    }

    /// Updates measure the distance from the start time.
    #[test]
    fn update_measures_from_start() {
        let mut clock = Clock::new();
        clock.start(10.0);
        clock.update(12.5);
        assert!((clock.elapsed() - 2.5).abs() < f64::EPSILON);
    }

    /// A stopped clock ignores updates and keeps its last reading.
    #[test]
    fn stopped_clock_ignores_updates() {
        let mut clock = Clock::new();
        clock.update(100.0);
        assert_eq!(clock.elapsed(), 0.0, "Update before start must be a no-op");

        clock.start(1.0);
        clock.update(3.0);
        clock.stop();
        clock.update(50.0);
        clock.update(60.0);
        assert!((clock.elapsed() - 2.0).abs() < f64::EPSILON);
        assert!(!clock.is_running());
    }

    /// Restarting resets the elapsed time.
    #[test]
    fn restart_resets_elapsed() {
        let mut clock = Clock::new();
        clock.start(0.0);
        clock.update(5.0);
        clock.start(7.0);
        assert_eq!(clock.elapsed(), 0.0);
        clock.update(8.0);
        assert!((clock.elapsed() - 1.0).abs() < f64::EPSILON);
    }
}
