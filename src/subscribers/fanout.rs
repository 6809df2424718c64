//! # Subscriber delivery for one animator.
//!
//! Subscribers never run on the animation task. When an animator is started with
//! subscribers, a [`Fanout`] task reads the animator's bus and hands each event
//! to one worker per subscriber:
//!
//! ```text
//! AnimatorActor ──► Bus ──► fanout task ──┬─► [queue] ─► worker ─► on_event()
//!                                         └─► [queue] ─► worker ─► on_event()
//! ```
//!
//! - A full queue drops the event for that subscriber only and reports
//!   `SubscriberOverflow` on the bus.
//! - A panic inside `on_event` is reported as `SubscriberPanicked`; the worker
//!   keeps serving later events.
//! - [`Fanout::finish`] hands over everything the loop already published
//!   (so `AnimatorStopped` is never lost), then closes the queues and waits for
//!   the workers to empty them.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{
    broadcast::{
        self,
        error::{RecvError, TryRecvError},
    },
    mpsc,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    error::panic_message,
    events::{Bus, Event},
    subscribers::Subscribe,
};

/// Background task forwarding animator events to subscribers.
pub(crate) struct Fanout {
    task: Option<JoinHandle<()>>,
    done: CancellationToken,
}

impl Fanout {
    /// Subscribes to `bus` and spawns the forwarding task.
    ///
    /// Returns `None` without spawning anything when `subscribers` is empty.
    /// Must be called within a Tokio runtime, before the animation loop starts
    /// publishing.
    pub(crate) fn spawn(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) -> Option<Self> {
        if subscribers.is_empty() {
            return None;
        }
        let rx = bus.subscribe();
        let done = CancellationToken::new();
        let task = tokio::spawn(forward(rx, subscribers, bus.clone(), done.clone()));
        Some(Self {
            task: Some(task),
            done,
        })
    }

    /// Drains the bus into the workers and waits until they are idle.
    ///
    /// Call after the animation loop has exited. Safe to call again if a previous
    /// call was dropped before it completed.
    pub(crate) async fn finish(&mut self) {
        self.done.cancel();
        if let Some(task) = self.task.as_mut() {
            let _ = task.await;
            self.task = None;
        }
    }

    /// Lets the task drain and stop on its own, without waiting for it.
    pub(crate) fn detach(&self) {
        self.done.cancel();
    }
}

/// Sending half of one subscriber's queue.
struct Worker {
    name: &'static str,
    queue: mpsc::Sender<Arc<Event>>,
}

impl Worker {
    fn spawn(sub: Arc<dyn Subscribe>, bus: Bus) -> (Self, JoinHandle<()>) {
        let name = sub.name();
        let (queue, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));

        let join = tokio::spawn(async move {
            while let Some(ev) = rx.recv().await {
                let handled = AssertUnwindSafe(sub.on_event(&ev)).catch_unwind().await;
                if let Err(payload) = handled {
                    bus.publish(Event::subscriber_panicked(name, panic_message(&*payload)));
                }
            }
        });
        (Self { name, queue }, join)
    }

    /// Queues `ev` without waiting; reports a drop unless `ev` is itself a drop report.
    fn offer(&self, ev: &Arc<Event>, bus: &Bus) {
        let reason = match self.queue.try_send(Arc::clone(ev)) {
            Ok(()) => return,
            Err(mpsc::error::TrySendError::Full(_)) => "full",
            Err(mpsc::error::TrySendError::Closed(_)) => "closed",
        };
        if !ev.is_subscriber_overflow() {
            bus.publish(Event::subscriber_overflow(self.name, reason));
        }
    }
}

async fn forward(
    mut rx: broadcast::Receiver<Event>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    bus: Bus,
    done: CancellationToken,
) {
    let (workers, joins): (Vec<Worker>, Vec<JoinHandle<()>>) = subscribers
        .into_iter()
        .map(|sub| Worker::spawn(sub, bus.clone()))
        .unzip();

    let dispatch = |ev: Event| {
        let ev = Arc::new(ev);
        for worker in &workers {
            worker.offer(&ev, &bus);
        }
    };

    loop {
        tokio::select! {
            biased;
            msg = rx.recv() => match msg {
                Ok(ev) => dispatch(ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
            _ = done.cancelled() => {
                loop {
                    match rx.try_recv() {
                        Ok(ev) => dispatch(ev),
                        Err(TryRecvError::Lagged(_)) => continue,
                        Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                    }
                }
                break;
            }
        }
    }

    // Closing the queues lets every worker finish what it already holds.
    drop(dispatch);
    drop(workers);
    for join in joins {
        let _ = join.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicker;

    #[async_trait]
    impl Subscribe for Panicker {
        async fn on_event(&self, _event: &Event) {
            panic!("subscriber exploded");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[tokio::test]
    async fn test_no_subscribers_spawns_nothing() {
        assert!(Fanout::spawn(&Bus::new(4), Vec::new()).is_none());
    }

    #[tokio::test]
    async fn test_finish_delivers_everything_published_before_it() {
        let bus = Bus::new(16);
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![a.clone(), b.clone()];
        let mut fanout = Fanout::spawn(&bus, subs).unwrap();

        bus.publish(Event::new(EventKind::AnimatorStarted));
        bus.publish(Event::new(EventKind::FrameDelivered));
        bus.publish(Event::new(EventKind::AnimatorStopped));
        fanout.finish().await;

        let expected = vec![
            EventKind::AnimatorStarted,
            EventKind::FrameDelivered,
            EventKind::AnimatorStopped,
        ];
        assert_eq!(*a.seen.lock().unwrap(), expected);
        assert_eq!(*b.seen.lock().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_finish_is_repeatable() {
        let bus = Bus::new(16);
        let rec = Arc::new(Recorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![rec.clone()];
        let mut fanout = Fanout::spawn(&bus, subs).unwrap();

        bus.publish(Event::new(EventKind::AnimatorStopped));
        fanout.finish().await;
        fanout.finish().await;
        assert_eq!(*rec.seen.lock().unwrap(), vec![EventKind::AnimatorStopped]);
    }

    #[tokio::test]
    async fn test_panic_is_isolated_and_reported() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let rec = Arc::new(Recorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Panicker), rec.clone()];
        let mut fanout = Fanout::spawn(&bus, subs).unwrap();

        bus.publish(Event::new(EventKind::AnimatorStopped));
        fanout.finish().await;

        assert_eq!(*rec.seen.lock().unwrap(), vec![EventKind::AnimatorStopped]);
        let mut panicked = None;
        while let Ok(ev) = rx.try_recv() {
            if ev.kind == EventKind::SubscriberPanicked {
                panicked = Some(ev);
            }
        }
        let ev = panicked.unwrap();
        assert_eq!(ev.animator.as_deref(), Some("panicker"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber exploded"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_full_queue_reports_overflow() {
        struct Tiny;

        #[async_trait]
        impl Subscribe for Tiny {
            async fn on_event(&self, _event: &Event) {}
            fn name(&self) -> &'static str {
                "tiny"
            }
            fn queue_capacity(&self) -> usize {
                1
            }
        }

        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Tiny)];
        let mut fanout = Fanout::spawn(&bus, subs).unwrap();

        // Nothing else runs before `finish`, so the drain sees both frames at
        // once while the worker has not taken the first one yet.
        bus.publish(Event::new(EventKind::FrameDelivered));
        bus.publish(Event::new(EventKind::FrameDelivered));
        fanout.finish().await;

        let mut overflow = None;
        while let Ok(ev) = rx.try_recv() {
            if ev.is_subscriber_overflow() {
                overflow = Some(ev);
            }
        }
        assert_eq!(
            overflow.unwrap().reason.as_deref(),
            Some("subscriber=tiny reason=full")
        );
    }
}
