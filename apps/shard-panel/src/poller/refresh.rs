//! Refresh scheduling and snapshot replacement
//!
//! Every request is tagged with a sequence number when it is issued.
//! Snapshots are published through a `watch` channel and replaced whole, so
//! subscribers only ever see complete snapshots.

use super::source::MetaSource;
use crate::error::PanelError;
use crate::metrics::PanelMetrics;
use crate::snapshot::{ListKind, Snapshot};

use serde::Serialize;
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Longest interval a periodic schedule accepts
pub const MAX_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// How responses that complete out of issue order are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyOrder {
    /// Last completed wins; a slow older response can overwrite newer data
    Completion,
    /// Last issued wins; responses older than the applied snapshot are discarded
    #[default]
    Sequenced,
}

impl FromStr for ApplyOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "completion" => Ok(ApplyOrder::Completion),
            "sequenced" => Ok(ApplyOrder::Sequenced),
            other => Err(other.to_string()),
        }
    }
}

/// When the poller issues refreshes on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSchedule {
    /// Only explicit `refresh()` calls
    Manual,
    /// One refresh at start, none after
    OnLoad,
    /// A refresh every `interval`, optionally one at start as well
    Periodic { interval: Duration, immediate: bool },
}

impl RefreshSchedule {
    /// Reject periodic intervals the timer cannot run
    pub fn validate(&self) -> Result<(), PanelError> {
        match *self {
            RefreshSchedule::Periodic { interval, .. } if interval.is_zero() => Err(
                PanelError::InvalidSchedule("periodic interval must be positive".to_string()),
            ),
            RefreshSchedule::Periodic { interval, .. } if interval > MAX_REFRESH_INTERVAL => {
                Err(PanelError::InvalidSchedule(format!(
                    "periodic interval {interval:?} exceeds {MAX_REFRESH_INTERVAL:?}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Result of a single refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The response replaced the snapshot
    Applied { seq: u64 },
    /// A newer response was already applied; this one was discarded
    Stale { seq: u64, current: u64 },
    /// The request failed; the snapshot is unchanged
    Failed { seq: u64, error_type: &'static str },
    /// No view is subscribed any more; the response was not applied
    Dropped { seq: u64 },
}

/// Point-in-time refresh counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshStatus {
    pub issued: u64,
    pub applied: u64,
    pub failed: u64,
    pub stale: u64,
    pub dropped: u64,
    pub consecutive_failures: u64,
    pub last_applied_seq: u64,
}

impl RefreshStatus {
    /// True once any snapshot has been applied
    pub fn is_ready(&self) -> bool {
        self.applied > 0
    }
}

#[derive(Debug, Default)]
struct RefreshCounters {
    applied: AtomicU64,
    failed: AtomicU64,
    stale: AtomicU64,
    dropped: AtomicU64,
    consecutive_failures: AtomicU64,
}

struct PollerInner<S> {
    source: S,
    order: ApplyOrder,
    tx: watch::Sender<Arc<Snapshot>>,
    next_seq: AtomicU64,
    counters: RefreshCounters,
    metrics: PanelMetrics,
}

/// Running periodic timer
struct Timer {
    /// Cleared by `stop()`; the timer issues ticks only while holding it set
    running: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

/// Polls a [`MetaSource`] and publishes the latest snapshot
///
/// Responses are applied only while at least one subscription from
/// [`Poller::subscribe`] is alive. Once every view is dropped, late
/// responses are counted as dropped and never written.
pub struct Poller<S> {
    inner: Arc<PollerInner<S>>,
    timer: Mutex<Option<Timer>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: MetaSource> Poller<S> {
    pub fn new(source: S, order: ApplyOrder, metrics: PanelMetrics) -> Self {
        let (tx, _) = watch::channel(Arc::new(Snapshot::initial()));

        Self {
            inner: Arc::new(PollerInner {
                source,
                order,
                tx,
                next_seq: AtomicU64::new(0),
                counters: RefreshCounters::default(),
                metrics,
            }),
            timer: Mutex::new(None),
        }
    }

    /// Subscribe to snapshot replacements
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.tx.subscribe()
    }

    /// The currently applied snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.tx.borrow())
    }

    pub fn apply_order(&self) -> ApplyOrder {
        self.inner.order
    }

    pub fn status(&self) -> RefreshStatus {
        self.inner.status()
    }

    /// Issue one refresh
    ///
    /// The sequence number is taken when this is called, not when the
    /// returned future first runs. Failures are logged and reported in the
    /// outcome; they never leave the snapshot half-replaced.
    pub fn refresh(&self) -> impl Future<Output = RefreshOutcome> + Send + 'static {
        PollerInner::issue(Arc::clone(&self.inner))
    }

    /// Begin refreshing on `schedule`, replacing any running timer
    ///
    /// An invalid schedule is rejected before the running timer is touched.
    pub fn start(&self, schedule: RefreshSchedule) -> Result<(), PanelError> {
        schedule.validate()?;
        self.stop();

        match schedule {
            RefreshSchedule::Manual => {
                info!(source = self.inner.source.describe(), "Poller in manual refresh mode");
            }
            RefreshSchedule::OnLoad => {
                info!(source = self.inner.source.describe(), "Poller refreshing once on load");
                tokio::spawn(self.refresh());
            }
            RefreshSchedule::Periodic { interval, immediate } => {
                info!(
                    source = self.inner.source.describe(),
                    ?interval,
                    immediate,
                    "Poller started"
                );

                let running = Arc::new(Mutex::new(true));
                let task = tokio::spawn(run_timer(
                    Arc::clone(&self.inner),
                    Arc::clone(&running),
                    interval,
                    immediate,
                ));

                *lock(&self.timer) = Some(Timer { running, task });
            }
        }

        Ok(())
    }

    /// Cancel the timer
    ///
    /// No tick issues a request after this returns. Requests already in
    /// flight are not aborted.
    pub fn stop(&self) {
        if let Some(timer) = lock(&self.timer).take() {
            *lock(&timer.running) = false;
            timer.task.abort();
            info!(source = self.inner.source.describe(), "Poller stopped");
        }
    }

    /// True while a periodic timer task is alive
    pub fn is_running(&self) -> bool {
        lock(&self.timer)
            .as_ref()
            .is_some_and(|timer| !timer.task.is_finished())
    }
}

impl<S> Drop for Poller<S> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.timer).take() {
            *lock(&timer.running) = false;
            timer.task.abort();
        }
    }
}

async fn run_timer<S: MetaSource>(
    inner: Arc<PollerInner<S>>,
    running: Arc<Mutex<bool>>,
    interval: Duration,
    immediate: bool,
) {
    let now = Instant::now();
    let first = if immediate {
        now
    } else {
        match now.checked_add(interval) {
            Some(first) => first,
            None => {
                error!(?interval, "Refresh interval overflows the clock, timer not started");
                *lock(&running) = false;
                return;
            }
        }
    };
    let mut ticker = tokio::time::interval_at(first, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !issue_tick(&inner, &running) {
            break;
        }
    }
}

/// Issue one scheduled refresh unless the timer was stopped
fn issue_tick<S: MetaSource>(inner: &Arc<PollerInner<S>>, running: &Mutex<bool>) -> bool {
    let running = lock(running);
    if !*running {
        return false;
    }
    tokio::spawn(PollerInner::issue(Arc::clone(inner)));
    true
}

impl<S: MetaSource> PollerInner<S> {
    fn issue(inner: Arc<Self>) -> impl Future<Output = RefreshOutcome> + Send + 'static {
        let seq = inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, "Refresh issued");
        async move { inner.run(seq).await }
    }

    async fn run(&self, seq: u64) -> RefreshOutcome {
        let started = Instant::now();
        let result = self.source.fetch().await;
        self.metrics.record_refresh_duration(started.elapsed());

        match result {
            Ok(meta) => self.apply(Snapshot::from_meta(meta, seq)),
            Err(e) => {
                let error_type = e.error_type_label();
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                let consecutive = self
                    .counters
                    .consecutive_failures
                    .fetch_add(1, Ordering::Relaxed)
                    + 1;
                self.metrics.record_failure(error_type);
                warn!(
                    seq,
                    source = self.source.describe(),
                    error = %e,
                    error_type,
                    consecutive,
                    "Shard metadata refresh failed, keeping last snapshot"
                );
                RefreshOutcome::Failed { seq, error_type }
            }
        }
    }

    fn apply(&self, snapshot: Snapshot) -> RefreshOutcome {
        let seq = snapshot.seq();

        let order = self.order;
        let mut current_seq = 0;
        let mut closed = false;
        // checked under the write lock so the decision and the write are one step
        let replaced = self.tx.send_if_modified(|current| {
            current_seq = current.seq();
            if self.tx.is_closed() {
                closed = true;
                return false;
            }
            if order == ApplyOrder::Sequenced && seq < current_seq {
                return false;
            }
            *current = Arc::new(snapshot);
            true
        });

        if closed {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            self.metrics.record_dropped();
            debug!(seq, "Panel view closed, dropping response");
            return RefreshOutcome::Dropped { seq };
        }

        if !replaced {
            self.counters.stale.fetch_add(1, Ordering::Relaxed);
            self.metrics.record_stale();
            debug!(seq, current = current_seq, "Discarding stale shard metadata");
            return RefreshOutcome::Stale {
                seq,
                current: current_seq,
            };
        }

        self.counters.applied.fetch_add(1, Ordering::Relaxed);
        self.counters.consecutive_failures.store(0, Ordering::Relaxed);
        self.metrics.record_applied();

        let applied = self.tx.borrow();
        for kind in ListKind::ALL {
            self.metrics.set_list_items(kind, applied.list(kind).len());
        }
        debug!(
            seq,
            replaced_seq = current_seq,
            shard = applied.shard(),
            files = applied.list(ListKind::Files).len(),
            fingerprints = applied.list(ListKind::Fingerprints).len(),
            "Shard metadata applied"
        );

        RefreshOutcome::Applied { seq }
    }

    fn status(&self) -> RefreshStatus {
        RefreshStatus {
            issued: self.next_seq.load(Ordering::SeqCst),
            applied: self.counters.applied.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            stale: self.counters.stale.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            consecutive_failures: self.counters.consecutive_failures.load(Ordering::Relaxed),
            last_applied_seq: self.tx.borrow().seq(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;
    use crate::snapshot::ShardMeta;
    use serde_json::json;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type Reply = Result<ShardMeta, PanelError>;

    /// Source whose responses are handed out by the test, in fetch order
    #[derive(Default)]
    struct ScriptedSource {
        pending: Mutex<VecDeque<oneshot::Sender<Reply>>>,
        fetches: AtomicU64,
    }

    impl ScriptedSource {
        fn pending(&self) -> usize {
            lock(&self.pending).len()
        }

        /// Answer the oldest outstanding fetch
        fn answer_oldest(&self, reply: Reply) {
            let tx = lock(&self.pending).pop_front().expect("no fetch outstanding");
            let _ = tx.send(reply);
        }

        /// Answer the newest outstanding fetch
        fn answer_newest(&self, reply: Reply) {
            let tx = lock(&self.pending).pop_back().expect("no fetch outstanding");
            let _ = tx.send(reply);
        }
    }

    impl MetaSource for ScriptedSource {
        fn fetch(&self) -> impl Future<Output = Reply> + Send {
            let (tx, rx) = oneshot::channel();
            lock(&self.pending).push_back(tx);
            self.fetches.fetch_add(1, Ordering::SeqCst);
            async move {
                rx.await.unwrap_or_else(|_| {
                    Err(PanelError::Config("scripted reply dropped".to_string()))
                })
            }
        }

        fn describe(&self) -> &str {
            "scripted"
        }
    }

    fn meta(shard: &str, files: usize) -> Reply {
        Ok(ShardMeta {
            shard: shard.to_string(),
            files: (1..=files).map(|i| json!(format!("f{i}"))).collect(),
            fingerprints: Vec::new(),
        })
    }

    fn network_error() -> Reply {
        Err(PanelError::Transport {
            url: "scripted".to_string(),
            source: Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }

    fn poller(order: ApplyOrder) -> (Poller<Arc<ScriptedSource>>, Arc<ScriptedSource>) {
        let source = Arc::new(ScriptedSource::default());
        let poller = Poller::new(Arc::clone(&source), order, PanelMetrics::detached());
        (poller, source)
    }

    async fn wait_for_fetches(source: &ScriptedSource, n: usize) {
        while source.pending() < n {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_successful_refresh_replaces_snapshot() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let rx = poller.subscribe();

        let refresh = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        source.answer_oldest(meta("shard-07", 25));

        assert_eq!(refresh.await.unwrap(), RefreshOutcome::Applied { seq: 1 });
        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.shard(), "shard-07");
        assert_eq!(snapshot.list(ListKind::Files).len(), 25);
        assert!(poller.status().is_ready());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        let first = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        source.answer_oldest(meta("shard-07", 3));
        first.await.unwrap();
        let before = poller.snapshot();

        let second = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        source.answer_oldest(network_error());

        assert_eq!(
            second.await.unwrap(),
            RefreshOutcome::Failed {
                seq: 2,
                error_type: "transport"
            }
        );
        let after = poller.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(poller.status().consecutive_failures, 1);
        assert_eq!(poller.status().failed, 1);
    }

    #[tokio::test]
    async fn test_success_resets_consecutive_failures() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        for _ in 0..3 {
            let refresh = tokio::spawn(poller.refresh());
            wait_for_fetches(&source, 1).await;
            source.answer_oldest(network_error());
            refresh.await.unwrap();
        }
        assert_eq!(poller.status().consecutive_failures, 3);
        assert!(!poller.status().is_ready());

        let refresh = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        source.answer_oldest(meta("shard-07", 1));
        refresh.await.unwrap();
        assert_eq!(poller.status().consecutive_failures, 0);
    }

    #[tokio::test]
    async fn test_sequence_is_taken_at_issue_time() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        let first = poller.refresh();
        let second = poller.refresh();
        // poll the second-issued future first
        let second = tokio::spawn(second);
        wait_for_fetches(&source, 1).await;
        let first = tokio::spawn(first);
        wait_for_fetches(&source, 2).await;

        source.answer_oldest(meta("from-second", 1));
        assert_eq!(second.await.unwrap(), RefreshOutcome::Applied { seq: 2 });
        source.answer_oldest(meta("from-first", 1));
        assert_eq!(
            first.await.unwrap(),
            RefreshOutcome::Stale { seq: 1, current: 2 }
        );
        assert_eq!(poller.snapshot().shard(), "from-second");
    }

    #[tokio::test]
    async fn test_completion_order_lets_late_response_win() {
        let (poller, source) = poller(ApplyOrder::Completion);
        let _rx = poller.subscribe();

        let first = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        let second = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 2).await;

        source.answer_newest(meta("newer", 2));
        assert_eq!(second.await.unwrap(), RefreshOutcome::Applied { seq: 2 });
        source.answer_oldest(meta("older", 1));
        assert_eq!(first.await.unwrap(), RefreshOutcome::Applied { seq: 1 });

        assert_eq!(poller.snapshot().shard(), "older");
        assert_eq!(poller.snapshot().seq(), 1);
    }

    #[tokio::test]
    async fn test_response_after_teardown_is_dropped() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let rx = poller.subscribe();

        let refresh = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        drop(rx);
        source.answer_oldest(meta("shard-07", 5));

        assert_eq!(refresh.await.unwrap(), RefreshOutcome::Dropped { seq: 1 });
        assert_eq!(poller.snapshot().shard(), crate::snapshot::UNKNOWN_SHARD);
        assert_eq!(poller.status().dropped, 1);
        assert_eq!(poller.status().stale, 0);
        assert_eq!(poller.status().applied, 0);
    }

    #[tokio::test]
    async fn test_dropped_response_never_reaches_a_later_view() {
        let (poller, source) = poller(ApplyOrder::Completion);
        let rx = poller.subscribe();

        let refresh = tokio::spawn(poller.refresh());
        wait_for_fetches(&source, 1).await;
        drop(rx);
        source.answer_oldest(meta("shard-07", 5));
        assert_eq!(refresh.await.unwrap(), RefreshOutcome::Dropped { seq: 1 });

        let rx = poller.subscribe();
        assert!(!rx.has_changed().unwrap());
        assert_eq!(rx.borrow().seq(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_schedule_ticks_until_stopped() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller
            .start(RefreshSchedule::Periodic {
                interval: Duration::from_millis(1000),
                immediate: false,
            })
            .unwrap();
        assert!(poller.is_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);

        poller.stop();
        assert!(!poller.is_running());
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
        assert_eq!(poller.status().issued, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_schedule_fetches_at_start() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller
            .start(RefreshSchedule::Periodic {
                interval: Duration::from_millis(1000),
                immediate: true,
            })
            .unwrap();
        wait_for_fetches(&source, 1).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_on_load_fetches_once() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller.start(RefreshSchedule::OnLoad).unwrap();
        assert!(!poller.is_running());
        wait_for_fetches(&source, 1).await;
        source.answer_oldest(meta("shard-07", 1));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(poller.snapshot().shard(), "shard-07");
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_schedule_never_fetches_on_its_own() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller.start(RefreshSchedule::Manual).unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_rejected() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        let err = poller
            .start(RefreshSchedule::Periodic {
                interval: Duration::ZERO,
                immediate: true,
            })
            .unwrap_err();
        assert_eq!(err.error_type_label(), "invalid_schedule");
        assert!(!poller.is_running());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(poller.status().issued, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_interval_is_rejected_and_keeps_running_timer() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller
            .start(RefreshSchedule::Periodic {
                interval: Duration::from_millis(1000),
                immediate: false,
            })
            .unwrap();

        for interval in [
            MAX_REFRESH_INTERVAL + Duration::from_millis(1),
            Duration::from_millis(u64::MAX),
            Duration::MAX,
        ] {
            let err = poller
                .start(RefreshSchedule::Periodic {
                    interval,
                    immediate: false,
                })
                .unwrap_err();
            assert_eq!(err.error_type_label(), "invalid_schedule", "{interval:?}");
        }
        assert!(poller.is_running());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_longest_interval_starts_without_overflow() {
        let (poller, source) = poller(ApplyOrder::Sequenced);
        let _rx = poller.subscribe();

        poller
            .start(RefreshSchedule::Periodic {
                interval: MAX_REFRESH_INTERVAL,
                immediate: false,
            })
            .unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(poller.is_running());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
        poller.stop();
    }

    #[test]
    fn test_schedule_validation() {
        assert!(RefreshSchedule::Manual.validate().is_ok());
        assert!(RefreshSchedule::OnLoad.validate().is_ok());
        assert!(RefreshSchedule::Periodic {
            interval: Duration::from_millis(1),
            immediate: false,
        }
        .validate()
        .is_ok());
        assert!(RefreshSchedule::Periodic {
            interval: Duration::ZERO,
            immediate: false,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_apply_order_names() {
        assert_eq!("completion".parse(), Ok(ApplyOrder::Completion));
        assert_eq!("sequenced".parse(), Ok(ApplyOrder::Sequenced));
        assert!("latest".parse::<ApplyOrder>().is_err());
        assert_eq!(ApplyOrder::default(), ApplyOrder::Sequenced);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&RefreshOutcome::Stale { seq: 1, current: 2 }).unwrap();
        assert_eq!(json, r#"{"outcome":"stale","seq":1,"current":2}"#);
    }
}
