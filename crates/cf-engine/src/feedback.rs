//! Presentation feedback cues
//!
//! The engine describes what just happened as [`Cue`] values and hands them to
//! an injected [`FeedbackSink`]. Sound, haptics and overlays live behind that
//! trait. Mute state belongs to the sink.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// How special a reveal is, for picking a reveal sound or effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealRarity {
    Common,
    Rare,
    Legendary,
}

impl RevealRarity {
    /// Classify a committed flip
    pub fn classify(edge_hit: bool, matched: bool, multiplier: u32, new_streak: u64) -> Self {
        if edge_hit || (matched && multiplier >= 4) {
            Self::Legendary
        } else if multiplier == 2 || new_streak > 10 {
            Self::Rare
        } else {
            Self::Common
        }
    }
}

/// One presentation event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cue {
    FlipStarted,
    MultiplierShown(u32),
    Reveal(RevealRarity),
    StreakStep(u64),
    StreakBreak,
    Milestone(u64),
    NewHighScore(u64),
    EdgeHit,
    AchievementUnlocked {
        id: String,
        title: String,
        icon: String,
    },
    CashChanged {
        delta: i64,
        balance: u64,
    },
}

/// Receives cues from the engine
pub trait FeedbackSink: Send {
    fn cue(&mut self, cue: &Cue);

    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;
}

/// Boxed feedback sink
pub type BoxedFeedbackSink = Box<dyn FeedbackSink>;

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback {
    muted: bool,
}

impl NullFeedback {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackSink for NullFeedback {
    fn cue(&mut self, _cue: &Cue) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Collects cues into a shared buffer
///
/// Clones share the buffer, so a caller can keep one handle and give the
/// other to the engine. Cues arriving while muted are dropped.
#[derive(Debug, Default, Clone)]
pub struct CueRecorder {
    cues: Arc<Mutex<Vec<Cue>>>,
    muted: bool,
}

impl CueRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far
    pub fn take(&self) -> Vec<Cue> {
        std::mem::take(&mut *self.cues.lock())
    }

    /// Copy of the recorded cues
    pub fn snapshot(&self) -> Vec<Cue> {
        self.cues.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.cues.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.lock().is_empty()
    }
}

impl FeedbackSink for CueRecorder {
    fn cue(&mut self, cue: &Cue) {
        if self.muted {
            return;
        }
        self.cues.lock().push(cue.clone());
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_rarity() {
        assert_eq!(RevealRarity::classify(true, false, 1, 0), RevealRarity::Legendary);
        assert_eq!(RevealRarity::classify(false, true, 4, 8), RevealRarity::Legendary);
        // A broken streak with x4 is not legendary
        assert_eq!(RevealRarity::classify(false, false, 4, 0), RevealRarity::Common);
        assert_eq!(RevealRarity::classify(false, true, 2, 2), RevealRarity::Rare);
        assert_eq!(RevealRarity::classify(false, true, 1, 11), RevealRarity::Rare);
        assert_eq!(RevealRarity::classify(false, true, 1, 10), RevealRarity::Common);
    }

    #[test]
    fn test_recorder_shares_buffer() {
        let recorder = CueRecorder::new();
        let mut sink: BoxedFeedbackSink = Box::new(recorder.clone());

        sink.cue(&Cue::FlipStarted);
        sink.cue(&Cue::StreakStep(1));
        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.take(), vec![Cue::FlipStarted, Cue::StreakStep(1)]);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_muted_recorder_drops_cues() {
        let recorder = CueRecorder::new();
        let mut sink = recorder.clone();
        sink.set_muted(true);
        assert!(sink.is_muted());

        sink.cue(&Cue::EdgeHit);
        assert!(recorder.is_empty());
    }
}
