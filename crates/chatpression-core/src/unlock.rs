//! Unlock gate for the detailed report.
//!
//! The gate starts `Locked` and moves to `Unlocked` exactly once, either when
//! a completed [`RewardCountdown`] is claimed or when the session carries the
//! flag from an earlier unlock. There is no transition back.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Ticks (one second each by default) a reward countdown runs.
pub const REWARD_DURATION_TICKS: u32 = 15;

/// Value stored under the session unlock key once unlocked.
pub const UNLOCKED_FLAG: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnlockState {
    #[default]
    Locked,
    Unlocked,
}

/// What caused the gate to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockTrigger {
    RewardClaimed,
    PriorSession,
}

/// Sections of the analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ReportSection {
    PersonalityType,
    IndicatorChart,
    Strengths,
    Weaknesses,
    Improvements,
    PersonalAnalysis,
    IndicatorDetails,
    Tips,
}

impl ReportSection {
    /// Returns true when the section is hidden until unlock.
    pub fn is_gated(self) -> bool {
        !matches!(self, ReportSection::PersonalityType | ReportSection::IndicatorChart)
    }
}

/// Progress of a countdown after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    Running { remaining: u32 },
    Complete,
}

/// Result of claiming the reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The gate moved from locked to unlocked.
    Unlocked,
    /// The gate was already open; nothing changed.
    AlreadyUnlocked,
    /// The countdown has not finished.
    NotReady { remaining: u32 },
}

/// Reward countdown as a plain value; the timer driving it lives elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardCountdown {
    duration: u32,
    remaining: u32,
}

impl RewardCountdown {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    /// Advances one tick. Ticking a complete countdown is a no-op.
    pub fn tick(&mut self) -> CountdownStatus {
        self.remaining = self.remaining.saturating_sub(1);
        self.status()
    }

    pub fn status(&self) -> CountdownStatus {
        if self.remaining == 0 {
            CountdownStatus::Complete
        } else {
            CountdownStatus::Running {
                remaining: self.remaining,
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Elapsed share of the countdown in percent.
    pub fn progress_percent(&self) -> u8 {
        if self.duration == 0 {
            return 100;
        }
        let elapsed = self.duration - self.remaining;
        (elapsed * 100 / self.duration) as u8
    }

    /// Button label shown while the countdown runs.
    pub fn label(&self) -> String {
        if self.is_complete() {
            "결과 확인하기".to_string()
        } else {
            format!("{}초 후 건너뛰기", self.remaining)
        }
    }
}

impl Default for RewardCountdown {
    fn default() -> Self {
        Self::new(REWARD_DURATION_TICKS)
    }
}

/// Session-scoped lock on the detailed report sections.
#[derive(Debug, Clone, Default)]
pub struct UnlockGate {
    state: UnlockState,
}

impl UnlockGate {
    /// Creates a locked gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the gate from the stored session flag.
    ///
    /// Only the exact value `"true"` counts as unlocked.
    pub fn restore(flag: Option<&str>) -> Self {
        let mut gate = Self::new();
        if flag == Some(UNLOCKED_FLAG) {
            gate.unlock(UnlockTrigger::PriorSession);
        }
        gate
    }

    pub fn state(&self) -> UnlockState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == UnlockState::Unlocked
    }

    /// Claims the reward of a countdown.
    pub fn claim(&mut self, countdown: &RewardCountdown) -> ClaimOutcome {
        if self.is_unlocked() {
            return ClaimOutcome::AlreadyUnlocked;
        }
        if !countdown.is_complete() {
            return ClaimOutcome::NotReady {
                remaining: countdown.remaining(),
            };
        }
        self.unlock(UnlockTrigger::RewardClaimed);
        ClaimOutcome::Unlocked
    }

    /// Returns true when the section may be shown in the current state.
    pub fn can_view(&self, section: ReportSection) -> bool {
        !section.is_gated() || self.is_unlocked()
    }

    fn unlock(&mut self, trigger: UnlockTrigger) {
        tracing::info!(?trigger, "Analysis report unlocked");
        self.state = UnlockState::Unlocked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn finished_countdown() -> RewardCountdown {
        let mut countdown = RewardCountdown::new(3);
        while countdown.tick() != CountdownStatus::Complete {}
        countdown
    }

    #[test]
    fn test_countdown_ticks_down() {
        let mut countdown = RewardCountdown::default();
        assert_eq!(countdown.remaining(), REWARD_DURATION_TICKS);
        assert_eq!(countdown.label(), "15초 후 건너뛰기");
        assert_eq!(countdown.tick(), CountdownStatus::Running { remaining: 14 });
        for _ in 0..14 {
            countdown.tick();
        }
        assert!(countdown.is_complete());
        assert_eq!(countdown.progress_percent(), 100);
        assert_eq!(countdown.label(), "결과 확인하기");
        assert_eq!(countdown.tick(), CountdownStatus::Complete);
    }

    #[test]
    fn test_progress_percent() {
        let mut countdown = RewardCountdown::new(4);
        assert_eq!(countdown.progress_percent(), 0);
        countdown.tick();
        assert_eq!(countdown.progress_percent(), 25);
        assert_eq!(RewardCountdown::new(0).progress_percent(), 100);
    }

    #[test]
    fn test_claim_before_complete_is_rejected() {
        let mut gate = UnlockGate::new();
        let mut countdown = RewardCountdown::new(3);
        countdown.tick();
        assert_eq!(gate.claim(&countdown), ClaimOutcome::NotReady { remaining: 2 });
        assert_eq!(gate.state(), UnlockState::Locked);
    }

    #[test]
    fn test_claim_after_complete_unlocks_once() {
        let mut gate = UnlockGate::new();
        let countdown = finished_countdown();
        assert_eq!(gate.claim(&countdown), ClaimOutcome::Unlocked);
        assert_eq!(gate.claim(&countdown), ClaimOutcome::AlreadyUnlocked);
        // A fresh, unfinished countdown never re-locks the gate.
        assert_eq!(
            gate.claim(&RewardCountdown::default()),
            ClaimOutcome::AlreadyUnlocked
        );
        assert!(gate.is_unlocked());
    }

    #[test]
    fn test_restore_from_flag() {
        assert!(UnlockGate::restore(Some("true")).is_unlocked());
        assert!(!UnlockGate::restore(Some("false")).is_unlocked());
        assert!(!UnlockGate::restore(Some("TRUE")).is_unlocked());
        assert!(!UnlockGate::restore(None).is_unlocked());
    }

    #[test]
    fn test_section_visibility() {
        let locked = UnlockGate::new();
        let unlocked = UnlockGate::restore(Some("true"));
        for section in ReportSection::iter() {
            assert!(unlocked.can_view(section));
            assert_eq!(locked.can_view(section), !section.is_gated());
        }
        assert!(locked.can_view(ReportSection::PersonalityType));
        assert!(locked.can_view(ReportSection::IndicatorChart));
        assert!(!locked.can_view(ReportSection::Tips));
    }
}
