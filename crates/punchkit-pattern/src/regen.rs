//! Debounced pattern regeneration.
//!
//! Parameter churn schedules many passes but only the last one inside
//! each quiet period runs, and a pass that finishes after the model moved
//! on is discarded by its generation stamp. Stale results can therefore
//! never clobber fresher ones, no matter how the tasks interleave.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use punchkit_core::constants::REGEN_DEBOUNCE_MS;
use punchkit_core::{Hole, Result};

use crate::state::PatternController;

/// Schedules debounced regeneration passes against a shared controller.
pub struct RegenScheduler {
    controller: Arc<PatternController>,
    debounce: Duration,
    latest: Arc<AtomicU64>,
}

impl RegenScheduler {
    /// Creates a scheduler with the standard 300ms quiet period.
    pub fn new(controller: Arc<PatternController>) -> Self {
        Self::with_debounce(controller, Duration::from_millis(REGEN_DEBOUNCE_MS))
    }

    /// Creates a scheduler with a custom quiet period.
    pub fn with_debounce(controller: Arc<PatternController>, debounce: Duration) -> Self {
        Self {
            controller,
            debounce,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Schedules a regeneration pass to run after the quiet period.
    ///
    /// `produce` computes the new hole set, typically by sampling an
    /// image. The handle resolves to true when the holes were applied. A
    /// pass resolves to false when a newer schedule supersedes it during
    /// the quiet period, when `produce` fails, or when the model changed
    /// while the pass was producing.
    pub fn schedule<F>(&self, produce: F) -> JoinHandle<bool>
    where
        F: FnOnce() -> Result<Vec<Hole>> + Send + 'static,
    {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.latest);
        let controller = Arc::clone(&self.controller);
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != seq {
                debug!("Regeneration pass {} superseded during quiet period", seq);
                return false;
            }

            let stamp = controller.generation();
            let holes = match produce() {
                Ok(holes) => holes,
                Err(e) => {
                    warn!("Regeneration pass {} failed: {}", seq, e);
                    return false;
                }
            };

            let applied = controller.apply_sampled_holes(stamp, holes);
            if !applied {
                debug!("Regeneration pass {} discarded as stale", seq);
            }
            applied
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchkit_core::{Error, GridDivisionConfig, Panel};

    fn quick_scheduler(controller: &Arc<PatternController>) -> RegenScheduler {
        RegenScheduler::with_debounce(Arc::clone(controller), Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_pass_applies_after_quiet_period() {
        let controller = Arc::new(PatternController::new());
        controller.set_panel(Panel::new(100.0, 100.0, 1.0)).unwrap();
        let scheduler = quick_scheduler(&controller);

        let handle = scheduler.schedule(|| Ok(vec![Hole::new(10.0, 10.0, 3.0)]));

        assert!(handle.await.unwrap());
        assert_eq!(controller.snapshot().holes.len(), 1);
    }

    #[tokio::test]
    async fn test_newer_schedule_supersedes_pending_pass() {
        let controller = Arc::new(PatternController::new());
        controller.set_panel(Panel::new(100.0, 100.0, 1.0)).unwrap();
        let scheduler =
            RegenScheduler::with_debounce(Arc::clone(&controller), Duration::from_millis(50));

        let first = scheduler.schedule(|| Ok(vec![Hole::new(1.0, 1.0, 3.0)]));
        let second = scheduler.schedule(|| Ok(vec![Hole::new(2.0, 2.0, 3.0)]));

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());

        let state = controller.snapshot();
        assert_eq!(state.holes.len(), 1);
        assert_eq!(state.holes[0].x, 2.0);
    }

    #[tokio::test]
    async fn test_mutation_during_pass_discards_result() {
        let controller = Arc::new(PatternController::new());
        controller.set_panel(Panel::new(100.0, 100.0, 1.0)).unwrap();
        let scheduler = quick_scheduler(&controller);

        // The pass mutates the model while producing, so its own stamp is
        // stale by the time it tries to apply.
        let inside = Arc::clone(&controller);
        let handle = scheduler.schedule(move || {
            inside.set_grid_config(GridDivisionConfig::default());
            Ok(vec![Hole::new(1.0, 1.0, 3.0)])
        });

        assert!(!handle.await.unwrap());
        assert!(controller.snapshot().holes.is_empty());
    }

    #[tokio::test]
    async fn test_failed_pass_leaves_model_untouched() {
        let controller = Arc::new(PatternController::new());
        controller.set_panel(Panel::new(100.0, 100.0, 1.0)).unwrap();
        controller.set_holes(vec![Hole::new(5.0, 5.0, 3.0)]);
        let scheduler = quick_scheduler(&controller);

        let handle = scheduler.schedule(|| Err(Error::other("sampling failed")));

        assert!(!handle.await.unwrap());
        assert_eq!(controller.snapshot().holes.len(), 1);
    }
}
