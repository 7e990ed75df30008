
use std::sync::Arc;
use std::time::Instant;

use log::trace;

use super::{DecodedFrame, FrameStore};



#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Time-driven cursor over a decoded [`FrameStore`].
///
/// The host calls [`render`](PlaybackEngine::render) once per display tick with a
/// monotonic timestamp and draws the returned RGBA bitmap. Clones share the store
/// and own an independent cursor.
#[derive(Clone, Debug)]
pub struct PlaybackEngine {
    direction: Direction,
    end: usize,
    last_advance: Instant,
    position: usize,
    running: bool,
    start: usize,
    store: Arc<FrameStore>,
}


impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}


impl PlaybackEngine {
    pub fn new(store: FrameStore) -> Self {
        Self::with_store(Arc::new(store), Instant::now())
    }

    /// Starts playing `store` from frame 0 with `now` as the timing baseline.
    pub fn with_store(store: Arc<FrameStore>, now: Instant) -> Self {
        let end = store.len() - 1;
        PlaybackEngine {
            direction: Direction::Forward,
            end,
            last_advance: now,
            position: 0,
            running: true,
            start: 0,
            store,
        }
    }

    /// Advances at most one frame if the current one has been shown longer than its
    /// duration, then returns the bitmap to display.
    pub fn render(&mut self, now: Instant) -> &[u8] {
        if self.running {
            let elapsed = now.saturating_duration_since(self.last_advance).as_secs_f64();
            if self.current().duration < elapsed {
                self.advance();
                self.last_advance = now;
            }
        }
        &self.current().bitmap
    }

    /// Steps one frame in the active direction, wrapping inside the bounds window.
    pub fn advance(&mut self) {
        let (start, end) = (self.start, self.end);
        let outside = self.position < start || end < self.position;
        self.position = match self.direction {
            Direction::Forward if outside || end <= self.position => start,
            Direction::Forward => self.position + 1,
            Direction::Reverse if outside || self.position <= start => end,
            Direction::Reverse => self.position - 1,
        };
        trace!("advance: {} ({:?})", self.position, self.direction);
    }

    pub fn seek(&mut self, index: isize) {
        self.position = self.clamp(index);
    }

    /// Sets the window playback cycles in. An inverted range collapses onto `start`.
    pub fn set_bounds(&mut self, start: isize, end: isize) {
        let start = self.clamp(start);
        let end = self.clamp(end).max(start);
        self.start = start;
        self.end = end;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.flip();
    }

    pub fn rewind(&mut self) {
        self.seek(0);
    }

    pub fn fast_forward(&mut self) {
        let last = self.store.len() as isize - 1;
        self.seek(last);
    }

    /// Back to frame 0, forward, with `now` as the timing baseline. Bounds and
    /// play state are kept.
    pub fn reset(&mut self, now: Instant) {
        self.position = 0;
        self.last_advance = now;
        self.direction = Direction::Forward;
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn current(&self) -> &DecodedFrame {
        self.store.frame(self.position)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn height(&self) -> u32 {
        self.store.height()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn size(&self) -> (u32, u32) {
        self.store.size()
    }

    pub fn store(&self) -> &Arc<FrameStore> {
        &self.store
    }

    pub fn width(&self) -> u32 {
        self.store.width()
    }

    fn clamp(&self, index: isize) -> usize {
        if index < 0 {
            0
        } else {
            (index as usize).min(self.store.len() - 1)
        }
    }
}
