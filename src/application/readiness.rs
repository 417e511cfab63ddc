// Render-readiness controller - Debounced two-phase chart remount
use crate::domain::proposal::Status;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ChartTearingDown,
    Ready,
}

/// Single source of truth for what the chart layer may show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    /// Status filter the flags and generation belong to.
    pub selected: Status,
    pub mounted: bool,
    pub is_loading: bool,
    pub is_chart_ready: bool,
    /// Bumped on mount and on every status change; doubles as the chart's
    /// remount key.
    pub generation: u64,
    /// Bumped whenever fetched data arrives or is replaced.
    pub data_revision: u64,
}

impl Readiness {
    pub fn phase(&self) -> Phase {
        if !self.mounted {
            Phase::Idle
        } else if self.is_loading {
            Phase::Loading
        } else if !self.is_chart_ready {
            Phase::ChartTearingDown
        } else {
            Phase::Ready
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessTimings {
    /// Time the chart stays unmounted after a status change.
    pub remount_delay: Duration,
    /// Time the loading indicator stays up after mount or a status change.
    pub loading_delay: Duration,
}

impl Default for ReadinessTimings {
    fn default() -> Self {
        Self {
            remount_delay: Duration::from_millis(100),
            loading_delay: Duration::from_millis(1000),
        }
    }
}

/// Coordinates the loading indicator and the forced chart remount.
///
/// Each status change supersedes the previous one: its pending timers are
/// aborted and any timer that still fires with a stale generation is ignored,
/// so flag updates can never arrive out of order.
pub struct ReadinessController {
    state: Arc<watch::Sender<Readiness>>,
    timings: ReadinessTimings,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ReadinessController {
    pub fn new(timings: ReadinessTimings) -> Self {
        let (state, _) = watch::channel(Readiness::default());
        Self {
            state: Arc::new(state),
            timings,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Readiness {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.state.subscribe()
    }

    /// First paint: the chart counts as ready immediately and only the
    /// loading indicator is timed.
    pub fn mount(&self) -> u64 {
        let mut pending = self.lock_pending();
        if self.state.borrow().mounted {
            tracing::debug!("Readiness controller already mounted");
            return self.state.borrow().generation;
        }
        cancel_all(&mut pending);

        let generation = self.advance(|s| {
            s.mounted = true;
            s.is_loading = true;
            s.is_chart_ready = true;
        });
        pending.push(self.schedule(self.timings.loading_delay, generation, |s| {
            s.is_loading = false
        }));

        tracing::debug!("Mounted chart (generation {})", generation);
        generation
    }

    /// Re-run the teardown and loading cycle for the current status.
    pub fn restart(&self) -> u64 {
        let mut pending = self.lock_pending();
        self.restart_locked(&mut pending, |_| {})
    }

    /// Switch the status filter. The new status and its generation are
    /// published in one update, so no snapshot pairs a status with another
    /// status's remount key. Returns `None` when `status` is already selected.
    pub fn select(&self, status: Status) -> Option<u64> {
        let mut pending = self.lock_pending();
        if self.state.borrow().selected == status {
            return None;
        }
        Some(self.restart_locked(&mut pending, |s| s.selected = status))
    }

    /// Status changed: tear the chart down, show the loading indicator and
    /// schedule both to clear. Callers hold the pending-timer lock.
    fn restart_locked(
        &self,
        pending: &mut Vec<JoinHandle<()>>,
        apply: impl FnOnce(&mut Readiness),
    ) -> u64 {
        let superseded = cancel_all(pending);

        let generation = self.advance(|s| {
            apply(s);
            s.mounted = true;
            s.is_loading = true;
            s.is_chart_ready = false;
        });
        pending.push(self.schedule(self.timings.remount_delay, generation, |s| {
            s.is_chart_ready = true
        }));
        pending.push(self.schedule(self.timings.loading_delay, generation, |s| {
            s.is_loading = false
        }));

        tracing::debug!(
            "Restarted readiness (generation {}, {} pending timers cancelled)",
            generation,
            superseded
        );
        generation
    }

    /// Record that fetched data arrived or was replaced.
    pub fn note_data_arrival(&self) {
        self.state.send_modify(|s| s.data_revision += 1);
    }

    fn advance(&self, apply: impl FnOnce(&mut Readiness)) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            apply(s);
        });
        generation
    }

    fn schedule(
        &self,
        delay: Duration,
        generation: u64,
        apply: fn(&mut Readiness),
    ) -> JoinHandle<()> {
        let state = self.state.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state.send_if_modified(|s| {
                if s.generation != generation {
                    return false;
                }
                apply(s);
                true
            });
        })
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for ReadinessController {
    fn drop(&mut self) {
        cancel_all(&mut self.lock_pending());
    }
}

fn cancel_all(pending: &mut Vec<JoinHandle<()>>) -> usize {
    let mut cancelled = 0;
    for handle in pending.drain(..) {
        if !handle.is_finished() {
            cancelled += 1;
        }
        handle.abort();
    }
    cancelled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_idle() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        assert_eq!(controller.snapshot().phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_shows_loading_then_ready() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();

        let snapshot = controller.snapshot();
        assert!(snapshot.is_loading);
        assert!(snapshot.is_chart_ready);
        assert_eq!(snapshot.phase(), Phase::Loading);

        tokio::time::sleep(ms(1001)).await;
        assert_eq!(controller.snapshot().phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_twice_keeps_generation() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        let first = controller.mount();
        assert_eq!(controller.mount(), first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_tears_down_then_remounts() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();
        tokio::time::sleep(ms(1500)).await;

        let generation = controller.restart();
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase(), Phase::Loading);
        assert!(!snapshot.is_chart_ready);
        assert_eq!(snapshot.generation, generation);

        tokio::time::sleep(ms(150)).await;
        assert!(controller.snapshot().is_chart_ready);
        assert_eq!(controller.snapshot().phase(), Phase::Loading);

        tokio::time::sleep(ms(900)).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase(), Phase::Ready);
        assert!(!snapshot.is_loading);
        assert!(snapshot.is_chart_ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_publishes_status_with_its_generation() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        let mut rx = controller.subscribe();
        controller.mount();
        tokio::time::sleep(ms(1500)).await;
        rx.borrow_and_update();

        assert_eq!(controller.select(Status::Draft), None);
        assert!(!rx.has_changed().unwrap());

        let generation = controller.select(Status::Final).unwrap();
        let snapshot = *rx.borrow_and_update();
        assert_eq!(snapshot.selected, Status::Final);
        assert_eq!(snapshot.generation, generation);
        assert_eq!(snapshot.phase(), Phase::Loading);
        assert!(!snapshot.is_chart_ready);

        tokio::time::sleep(ms(1001)).await;
        assert_eq!(controller.snapshot().phase(), Phase::Ready);
        assert_eq!(controller.snapshot().selected, Status::Final);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_keeps_selected_status() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();
        controller.select(Status::Review);

        controller.restart();
        assert_eq!(controller.snapshot().selected, Status::Review);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timers_never_fire() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();

        controller.restart();
        tokio::time::sleep(ms(60)).await;
        controller.restart();

        // The first change's remount timer was due at 100ms.
        tokio::time::sleep(ms(60)).await;
        assert!(!controller.snapshot().is_chart_ready);

        // The first change's loading timer was due at 1000ms.
        tokio::time::sleep(ms(910)).await;
        assert!(controller.snapshot().is_loading);

        tokio::time::sleep(ms(100)).await;
        assert_eq!(controller.snapshot().phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_toggling_settles_on_last_generation() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();

        let mut last = 0;
        for _ in 0..10 {
            last = controller.restart();
            tokio::time::sleep(ms(5)).await;
        }

        tokio::time::sleep(ms(2000)).await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.generation, last);
        assert_eq!(snapshot.phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_outlasting_loading() {
        let controller = ReadinessController::new(ReadinessTimings {
            remount_delay: ms(500),
            loading_delay: ms(100),
        });
        controller.mount();
        controller.restart();

        tokio::time::sleep(ms(200)).await;
        assert_eq!(controller.snapshot().phase(), Phase::ChartTearingDown);

        tokio::time::sleep(ms(400)).await;
        assert_eq!(controller.snapshot().phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_changes() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        let mut rx = controller.subscribe();
        controller.mount();

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_data_arrival_bumps_revision_only() {
        let controller = ReadinessController::new(ReadinessTimings::default());
        controller.mount();
        let before = controller.snapshot();

        controller.note_data_arrival();
        let after = controller.snapshot();
        assert_eq!(after.data_revision, before.data_revision + 1);
        assert_eq!(after.generation, before.generation);
        assert_eq!(after.is_loading, before.is_loading);
    }
}
