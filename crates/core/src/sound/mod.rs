//! Per-tool sound selection and playback tracking.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::SoundOrder;
use crate::content::SoundRef;
use crate::hal::{AudioOut, Playback};

/// Selects which sound a tool plays next and tracks the resulting playback
/// handles so the overlap policy and tool resets can stop them.
pub struct SoundScheduler {
    sounds: Vec<SoundRef>,
    order: SoundOrder,
    replay_interval: f64,
    overlap: bool,
    index: usize,
    playbacks: Vec<Box<dyn Playback>>,
    next_replay: f64,
    rng: SmallRng,
}

impl SoundScheduler {
    pub fn new(sounds: Vec<SoundRef>, order: SoundOrder, replay_interval: f64, overlap: bool) -> Self {
        Self {
            sounds,
            order,
            replay_interval,
            overlap,
            index: 0,
            playbacks: Vec::new(),
            next_replay: 0.0,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn has_sounds(&self) -> bool {
        !self.sounds.is_empty()
    }

    /// Number of playback handles currently tracked.
    pub fn active_playbacks(&self) -> usize {
        self.playbacks.len()
    }

    /// Picks the next sound per the configured order. Sequential advances the
    /// index before selecting; random ignores the index entirely.
    fn select_next(&mut self) -> Option<SoundRef> {
        if self.sounds.is_empty() {
            return None;
        }
        let sound = match self.order {
            SoundOrder::Sequential => {
                self.index = (self.index + 1) % self.sounds.len();
                &self.sounds[self.index]
            }
            SoundOrder::Random => {
                let pick = self.rng.gen_range(0..self.sounds.len());
                &self.sounds[pick]
            }
        };
        Some(sound.clone())
    }

    /// Selects and starts the next sound, honouring the overlap policy, and
    /// stamps the next auto-replay time.
    pub fn play(&mut self, now: f64, audio: &mut dyn AudioOut) {
        let Some(sound) = self.select_next() else {
            return;
        };
        if !self.overlap {
            self.stop_all();
        }
        self.playbacks.push(audio.play(&sound));
        self.next_replay = now + self.replay_interval;
    }

    /// True when the idle-hold auto-replay path should fire. A zero interval
    /// disables it entirely.
    pub fn replay_due(&self, now: f64) -> bool {
        self.replay_interval != 0.0 && now > self.next_replay && !self.sounds.is_empty()
    }

    /// Drops handles whose playback has completed. Called at least once per
    /// tick so the tracked set stays bounded.
    pub fn reap(&mut self) {
        self.playbacks.retain(|p| p.is_playing());
    }

    /// Stops and clears every tracked playback.
    pub fn stop_all(&mut self) {
        for playback in &mut self.playbacks {
            playback.stop();
        }
        self.playbacks.clear();
    }

    /// Returns the sequential index to the start and quiesces playback.
    /// Used on tool switches, for both the outgoing and incoming tool.
    pub fn reset(&mut self) {
        self.index = 0;
        self.stop_all();
    }
}

impl std::fmt::Debug for SoundScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundScheduler")
            .field("sounds", &self.sounds.len())
            .field("order", &self.order)
            .field("index", &self.index)
            .field("playbacks", &self.playbacks.len())
            .finish()
    }
}
