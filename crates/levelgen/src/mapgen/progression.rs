//! Wave progression rules that pick a layout strategy.

use serde::{Deserialize, Serialize};

use crate::config::TierPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LayoutTier {
    Intro,
    Standard,
    Complex,
    Endgame,
    Boss,
}

impl LayoutTier {
    pub fn for_wave(wave: u32, policy: &TierPolicy) -> Self {
        assert!(wave > 0, "wave numbers start at 1");
        if is_boss_wave(wave, policy) {
            Self::Boss
        } else if wave < policy.standard_from {
            Self::Intro
        } else if wave < policy.complex_from {
            Self::Standard
        } else if wave < policy.endgame_from {
            Self::Complex
        } else {
            Self::Endgame
        }
    }

    /// Rank used to check that later waves never get simpler layouts.
    /// Boss layouts sit outside the ladder.
    pub fn complexity_rank(self) -> Option<u8> {
        match self {
            Self::Intro => Some(0),
            Self::Standard => Some(1),
            Self::Complex => Some(2),
            Self::Endgame => Some(3),
            Self::Boss => None,
        }
    }
}

pub fn is_boss_wave(wave: u32, policy: &TierPolicy) -> bool {
    wave % policy.boss_every == 0
}
