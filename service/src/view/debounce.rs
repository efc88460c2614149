//! [`Debouncer`] of rapidly changing text input.

use std::time::Duration;

use tokio::{sync::mpsc, task, time};

/// Default quiet period the input must stay unchanged for to settle.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Value emitted by a [`Debouncer`] once its input settles.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settled {
    /// Number of the [`Debouncer::observe()`] call this value comes from.
    generation: u64,

    /// Settled value.
    value: String,
}

impl Settled {
    /// Returns the settled value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Delays propagation of a value until it stays unchanged for a quiet
/// period.
///
/// The timer is a local task owned by this [`Debouncer`], so it has to be
/// used inside a [`task::LocalSet`]. Each emission is delivered as a
/// [`Settled`] event into the owner's queue and must be passed back through
/// [`Debouncer::accept()`], which rejects anything emitted before the latest
/// [`Debouncer::observe()`] call or after cancellation.
#[derive(Debug)]
pub struct Debouncer<E> {
    /// Quiet period the value must stay unchanged for.
    quiet_period: Duration,

    /// Number of [`Debouncer::observe()`] calls so far.
    generation: u64,

    /// Timer of the pending emission, if any.
    pending: Option<task::JoinHandle<()>>,

    /// Queue to emit [`Settled`] values into.
    sender: mpsc::UnboundedSender<E>,
}

impl<E> Debouncer<E> {
    /// Cancels the pending emission (if any).
    ///
    /// A [`Settled`] value already sitting in the queue will be rejected by
    /// [`Debouncer::accept()`].
    pub fn cancel(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }

    /// Indicates whether an emission is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accepts the provided [`Settled`] value, if it is the outcome of the
    /// latest pending [`Debouncer::observe()`] call.
    pub fn accept(&mut self, settled: Settled) -> Option<String> {
        if !self.is_pending() || settled.generation != self.generation {
            return None;
        }
        self.pending = None;
        Some(settled.value)
    }
}

impl<E> Debouncer<E>
where
    E: From<Settled> + 'static,
{
    /// Creates a new [`Debouncer`] emitting into the provided `sender`.
    #[must_use]
    pub fn new(
        quiet_period: Duration,
        sender: mpsc::UnboundedSender<E>,
    ) -> Self {
        Self {
            quiet_period,
            generation: 0,
            pending: None,
            sender,
        }
    }

    /// Observes a new `value`, restarting the quiet period.
    ///
    /// Must be called inside a [`task::LocalSet`].
    pub fn observe(&mut self, value: impl Into<String>) {
        self.cancel();
        self.generation += 1;

        let settled = Settled {
            generation: self.generation,
            value: value.into(),
        };
        let sender = self.sender.clone();
        let period = self.quiet_period;
        self.pending = Some(task::spawn_local(async move {
            time::sleep(period).await;
            _ = sender.send(settled.into());
        }));
    }
}

impl<E> Drop for Debouncer<E> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use tokio::{
        sync::mpsc,
        task::LocalSet,
        time::{self, Instant},
    };

    use super::{Debouncer, Settled, DEFAULT_QUIET_PERIOD as QUIET};

    fn debouncer() -> (Debouncer<Settled>, mpsc::UnboundedReceiver<Settled>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Debouncer::new(QUIET, tx), rx)
    }

    async fn nothing_arrives(rx: &mut mpsc::UnboundedReceiver<Settled>) {
        assert!(
            time::timeout(QUIET * 10, rx.recv()).await.is_err(),
            "unexpected emission",
        );
    }

    #[tokio::test(start_paused = true)]
    async fn settles_only_last_value_once() {
        LocalSet::new()
            .run_until(async {
                let (mut debouncer, mut rx) = debouncer();

                for value in ["a", "ab", "abc"] {
                    debouncer.observe(value);
                    time::sleep(QUIET - Duration::from_millis(1)).await;
                }
                debouncer.observe("abcd");
                let observed_at = Instant::now();

                let settled = rx.recv().await.unwrap();
                let elapsed = observed_at.elapsed();
                assert!(elapsed >= QUIET, "settled early: {elapsed:?}");
                assert!(
                    elapsed < QUIET + Duration::from_millis(2),
                    "settled late: {elapsed:?}",
                );
                assert_eq!(settled.value(), "abcd");
                assert_eq!(debouncer.accept(settled), Some("abcd".into()));
                assert!(!debouncer.is_pending());

                nothing_arrives(&mut rx).await;
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn emits_nothing_without_input() {
        LocalSet::new()
            .run_until(async {
                let (_debouncer, mut rx) = debouncer();

                nothing_arrives(&mut rx).await;
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn settles_each_stable_value() {
        LocalSet::new()
            .run_until(async {
                let (mut debouncer, mut rx) = debouncer();

                debouncer.observe("first");
                let settled = rx.recv().await.unwrap();
                assert_eq!(debouncer.accept(settled), Some("first".into()));

                debouncer.observe("second");
                let settled = rx.recv().await.unwrap();
                assert_eq!(debouncer.accept(settled), Some("second".into()));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn rejects_queued_superseded_value() {
        LocalSet::new()
            .run_until(async {
                let (mut debouncer, mut rx) = debouncer();

                debouncer.observe("stale");
                time::sleep(QUIET + Duration::from_millis(100)).await;
                debouncer.observe("fresh");

                let stale = rx.recv().await.unwrap();
                assert_eq!(stale.value(), "stale");
                assert_eq!(debouncer.accept(stale), None);

                let fresh = rx.recv().await.unwrap();
                assert_eq!(debouncer.accept(fresh), Some("fresh".into()));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        LocalSet::new()
            .run_until(async {
                let (mut debouncer, mut rx) = debouncer();

                debouncer.observe("value");
                time::sleep(QUIET / 2).await;
                debouncer.cancel();
                assert!(!debouncer.is_pending());

                nothing_arrives(&mut rx).await;
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn drop_discards_pending_value() {
        LocalSet::new()
            .run_until(async {
                let (mut debouncer, mut rx) = debouncer();

                debouncer.observe("value");
                drop(debouncer);

                assert_eq!(rx.recv().await, None);
            })
            .await;
    }
}
