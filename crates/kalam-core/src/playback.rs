//! "Play all" recitation state.
//!
//! A single linear index over the verses of a view. The player loop calls
//! [`Playback::item_finished`] when a clip ends, which advances to the next
//! verse or stops after the last one. [`Playback::stop`] can be called at
//! any time; the caller is responsible for halting the clip in flight.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackState {
    Stopped,
    Running { index: usize },
}

#[derive(Debug, Clone)]
pub struct Playback {
    len: usize,
    state: PlaybackState,
}

impl Playback {
    /// Playback over `len` verses, initially stopped.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: PlaybackState::Stopped,
        }
    }

    /// Index of the verse currently playing, if any.
    pub fn current(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Running { index } => Some(index),
            PlaybackState::Stopped => None,
        }
    }

    /// Start (or restart) from verse `index`. Out-of-range indices leave
    /// playback stopped.
    pub fn start(&mut self, index: usize) -> Option<usize> {
        self.state = if index < self.len {
            PlaybackState::Running { index }
        } else {
            PlaybackState::Stopped
        };
        self.current()
    }

    /// The current clip ended. Returns the next index to play.
    pub fn item_finished(&mut self) -> Option<usize> {
        if let PlaybackState::Running { index } = self.state {
            self.state = if index + 1 < self.len {
                PlaybackState::Running { index: index + 1 }
            } else {
                PlaybackState::Stopped
            };
        }
        self.current()
    }

    /// The current clip failed to start; playback silently stops.
    pub fn failed(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_through_then_stops() {
        let mut p = Playback::new(3);
        assert_eq!(p.start(0), Some(0));
        assert_eq!(p.item_finished(), Some(1));
        assert_eq!(p.item_finished(), Some(2));
        assert_eq!(p.item_finished(), None);
        assert_eq!(p.current(), None);
    }

    #[test]
    fn stop_ends_running_playback() {
        let mut p = Playback::new(5);
        p.start(2);
        assert_eq!(p.current(), Some(2));
        p.stop();
        assert_eq!(p.current(), None);
    }

    #[test]
    fn finished_while_stopped_is_ignored() {
        let mut p = Playback::new(2);
        assert_eq!(p.item_finished(), None);
        p.start(0);
        p.stop();
        assert_eq!(p.item_finished(), None);
    }

    #[test]
    fn failure_and_bad_start() {
        let mut p = Playback::new(2);
        p.start(1);
        p.failed();
        assert_eq!(p.current(), None);
        assert_eq!(p.start(7), None);
        assert_eq!(Playback::new(0).start(0), None);
    }
}
