//! Unlock use case.
//!
//! Drives the reward countdown on a tokio interval and persists the unlock
//! flag once the user claims a finished countdown.

use anyhow::{Context, Result};
use chatpression_core::config::UnlockConfig;
use chatpression_core::storage::{ANALYSIS_UNLOCKED_KEY, SessionStorage};
use chatpression_core::unlock::{ClaimOutcome, RewardCountdown, UNLOCKED_FLAG, UnlockGate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// A running countdown. Dropping the handle abandons the countdown.
pub struct CountdownHandle {
    progress: watch::Receiver<RewardCountdown>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    /// Latest countdown state.
    pub fn current(&self) -> RewardCountdown {
        *self.progress.borrow()
    }

    /// A receiver notified on every tick.
    pub fn subscribe(&self) -> watch::Receiver<RewardCountdown> {
        self.progress.clone()
    }

    /// Waits until the countdown completes or is cancelled, returning the
    /// last state seen.
    pub async fn finished(&self) -> RewardCountdown {
        let mut progress = self.progress.clone();
        // A closed channel means the ticker task has exited.
        let _ = progress.wait_for(|countdown| countdown.is_complete()).await;
        *progress.borrow()
    }

    /// Stops the ticker. The countdown keeps its last state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct UnlockUseCase {
    storage: Arc<dyn SessionStorage>,
    reward_ticks: u32,
    tick: Duration,
}

impl UnlockUseCase {
    pub fn new(storage: Arc<dyn SessionStorage>, config: &UnlockConfig) -> Self {
        Self {
            storage,
            reward_ticks: config.reward_ticks,
            tick: Duration::from_millis(config.tick_millis),
        }
    }

    /// Starts a countdown on the current runtime.
    pub fn start_countdown(&self) -> CountdownHandle {
        let countdown = RewardCountdown::new(self.reward_ticks);
        let (tx, rx) = watch::channel(countdown);
        let cancel = CancellationToken::new();

        let token = cancel.clone();
        let period = self.tick;
        let task = tokio::spawn(async move {
            let mut countdown = countdown;
            if countdown.is_complete() {
                return;
            }

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of an interval completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(remaining = countdown.remaining(), "Reward countdown abandoned");
                        return;
                    }
                    _ = ticker.tick() => {
                        countdown.tick();
                        tx.send_replace(countdown);
                        if countdown.is_complete() {
                            tracing::debug!("Reward countdown complete");
                            return;
                        }
                    }
                }
            }
        });

        CountdownHandle {
            progress: rx,
            cancel,
            task: Some(task),
        }
    }

    /// Claims the reward of `handle` for `gate`.
    ///
    /// The flag is written to session storage before the gate opens; when
    /// the write fails the gate stays locked and the countdown keeps its
    /// state so the claim can be retried. A countdown still running leaves
    /// everything unchanged.
    pub async fn claim(
        &self,
        gate: &mut UnlockGate,
        handle: &CountdownHandle,
    ) -> Result<ClaimOutcome> {
        let countdown = handle.current();
        if gate.is_unlocked() {
            return Ok(ClaimOutcome::AlreadyUnlocked);
        }
        if !countdown.is_complete() {
            return Ok(ClaimOutcome::NotReady {
                remaining: countdown.remaining(),
            });
        }

        self.storage
            .set(ANALYSIS_UNLOCKED_KEY, UNLOCKED_FLAG)
            .await
            .context("Failed to persist unlock flag")?;
        handle.cancel();
        Ok(gate.claim(&countdown))
    }

    /// Reads the stored flag into a gate.
    pub async fn restore_gate(&self) -> Result<UnlockGate> {
        let flag = self
            .storage
            .get(ANALYSIS_UNLOCKED_KEY)
            .await
            .context("Failed to read unlock flag")?;
        Ok(UnlockGate::restore(flag.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatpression_core::unlock::UnlockState;
    use chatpression_core::{ChatpressionError, Result as CoreResult};
    use chatpression_infrastructure::MemorySessionStorage;

    /// Reads succeed with nothing stored; every write fails.
    struct ReadOnlyStorage;

    #[async_trait]
    impl SessionStorage for ReadOnlyStorage {
        async fn get(&self, _key: &str) -> CoreResult<Option<String>> {
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &str) -> CoreResult<()> {
            Err(ChatpressionError::storage("read-only session"))
        }

        async fn remove(&self, _key: &str) -> CoreResult<()> {
            Err(ChatpressionError::storage("read-only session"))
        }

        async fn clear(&self) -> CoreResult<()> {
            Err(ChatpressionError::storage("read-only session"))
        }
    }

    fn usecase(storage: Arc<MemorySessionStorage>, ticks: u32) -> UnlockUseCase {
        UnlockUseCase::new(
            storage,
            &UnlockConfig {
                reward_ticks: ticks,
                tick_millis: 1000,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_runs_to_completion() {
        let storage = Arc::new(MemorySessionStorage::new());
        let usecase = usecase(storage, 3);
        let handle = usecase.start_countdown();
        assert_eq!(handle.current().remaining(), 3);

        let last = handle.finished().await;
        assert!(last.is_complete());
        assert_eq!(last.label(), "결과 확인하기");
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_before_completion_is_not_ready() {
        let storage = Arc::new(MemorySessionStorage::new());
        let usecase = usecase(storage.clone(), 15);
        let handle = usecase.start_countdown();
        let mut gate = UnlockGate::new();

        let outcome = usecase.claim(&mut gate, &handle).await.unwrap();
        assert!(matches!(outcome, ClaimOutcome::NotReady { .. }));
        assert_eq!(gate.state(), UnlockState::Locked);
        assert_eq!(storage.get(ANALYSIS_UNLOCKED_KEY).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_claim_after_completion_persists_flag() {
        let storage = Arc::new(MemorySessionStorage::new());
        let usecase = usecase(storage.clone(), 2);
        let handle = usecase.start_countdown();
        handle.finished().await;

        let mut gate = UnlockGate::new();
        let outcome = usecase.claim(&mut gate, &handle).await.unwrap();
        assert_eq!(outcome, ClaimOutcome::Unlocked);
        assert!(gate.is_unlocked());
        assert!(handle.is_cancelled());
        assert_eq!(
            storage.get(ANALYSIS_UNLOCKED_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        // A second claim changes nothing.
        let again = usecase.claim(&mut gate, &handle).await.unwrap();
        assert_eq!(again, ClaimOutcome::AlreadyUnlocked);
        assert!(usecase.restore_gate().await.unwrap().is_unlocked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_persist_keeps_gate_locked() {
        let usecase = UnlockUseCase::new(
            Arc::new(ReadOnlyStorage),
            &UnlockConfig {
                reward_ticks: 1,
                tick_millis: 1000,
            },
        );
        let handle = usecase.start_countdown();
        handle.finished().await;

        let mut gate = UnlockGate::new();
        assert!(usecase.claim(&mut gate, &handle).await.is_err());
        assert_eq!(gate.state(), UnlockState::Locked);
        assert!(!handle.is_cancelled());
        assert!(handle.current().is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_countdown_stops_ticking() {
        let storage = Arc::new(MemorySessionStorage::new());
        let usecase = usecase(storage.clone(), 5);
        let handle = usecase.start_countdown();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.cancel();
        let last = handle.finished().await;
        assert!(!last.is_complete());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(handle.current(), last);
        assert_eq!(storage.get(ANALYSIS_UNLOCKED_KEY).await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_countdown_is_immediately_claimable() {
        let storage = Arc::new(MemorySessionStorage::new());
        let usecase = usecase(storage, 0);
        let handle = usecase.start_countdown();
        let mut gate = UnlockGate::new();
        assert_eq!(
            usecase.claim(&mut gate, &handle).await.unwrap(),
            ClaimOutcome::Unlocked
        );
    }
}
