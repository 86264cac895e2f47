//! Playback control over replay frames.

use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 5.0;

/// Frame cursor advanced by wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    frame_count: usize,
    /// Fractional frame position
    position: f64,
    /// Frames per second
    speed: f64,
    playing: bool,
}

impl Playback {
    pub fn new(frame_count: usize, start_paused: bool) -> Self {
        Self {
            frame_count,
            position: 0.0,
            speed: 1.0,
            playing: !start_paused,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn current_frame(&self) -> usize {
        (self.position.floor() as usize).min(self.last_frame())
    }

    fn last_frame(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets frames per second, clamped to `[MIN_SPEED, MAX_SPEED]`.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = if speed.is_nan() {
            1.0
        } else {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        };
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.current_frame() == self.last_frame()
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Resumes; a finished playback restarts from the first frame.
    pub fn play(&mut self) {
        if self.is_finished() {
            self.position = 0.0;
        }
        self.playing = true;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn seek(&mut self, frame: usize) {
        self.position = frame.min(self.last_frame()) as f64;
    }

    /// Moves forward by `speed * elapsed_secs` frames and returns the current frame.
    ///
    /// Reaching the last frame holds it and pauses.
    pub fn advance(&mut self, elapsed_secs: f64) -> usize {
        if !self.playing || elapsed_secs <= 0.0 {
            return self.current_frame();
        }
        if self.frame_count <= 1 {
            self.playing = false;
            return self.current_frame();
        }

        self.position += self.speed * elapsed_secs;
        let last = self.last_frame() as f64;
        if self.position >= last {
            self.position = last;
            self.playing = false;
        }
        self.current_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_clamped() {
        let mut playback = Playback::new(10, false);
        playback.set_speed(50.0);
        assert_eq!(playback.speed(), MAX_SPEED);
        playback.set_speed(0.0);
        assert_eq!(playback.speed(), MIN_SPEED);
        playback.set_speed(2.5);
        assert_eq!(playback.speed(), 2.5);
    }

    #[test]
    fn test_advance_by_speed() {
        let mut playback = Playback::new(10, false);
        playback.set_speed(2.0);
        assert_eq!(playback.advance(1.0), 2);
        assert_eq!(playback.advance(0.75), 3);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_holds_last_frame() {
        let mut playback = Playback::new(5, false);
        playback.set_speed(5.0);
        assert_eq!(playback.advance(10.0), 4);
        assert!(!playback.is_playing());
        assert!(playback.is_finished());
        assert_eq!(playback.advance(1.0), 4);
    }

    #[test]
    fn test_paused_does_not_move() {
        let mut playback = Playback::new(5, true);
        assert_eq!(playback.advance(3.0), 0);
        playback.toggle();
        assert_eq!(playback.advance(1.0), 1);
        playback.pause();
        assert_eq!(playback.advance(1.0), 1);
    }

    #[test]
    fn test_play_after_finish_restarts() {
        let mut playback = Playback::new(3, false);
        playback.advance(100.0);
        playback.play();
        assert_eq!(playback.current_frame(), 0);
        assert!(playback.is_playing());
    }

    #[test]
    fn test_single_and_empty_frames() {
        let mut single = Playback::new(1, false);
        assert_eq!(single.advance(5.0), 0);
        assert!(!single.is_playing());
        let mut empty = Playback::new(0, false);
        assert_eq!(empty.advance(5.0), 0);
        empty.seek(3);
        assert_eq!(empty.current_frame(), 0);
    }
}
