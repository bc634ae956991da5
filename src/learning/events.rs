// src/learning/events.rs — Best-effort notifications to subscribers

use serde::Serialize;
use tokio::sync::broadcast;

/// Events other parts of the system (or external subscribers) may react to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    FeedbackCollected {
        lesson_id: String,
        success_score: f64,
    },
    PatternsDetected {
        lesson_id: String,
        candidates: usize,
        accepted: usize,
    },
}

impl Event {
    pub fn name(&self) -> &str {
        match self {
            Self::FeedbackCollected { .. } => "feedback_collected",
            Self::PatternsDetected { .. } => "patterns_detected",
        }
    }
}

/// Fire-and-forget event emission over a broadcast channel.
///
/// Emitting never fails from the caller's perspective: a submit that already
/// persisted must not be rolled back because a subscriber is slow or absent.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Event>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    pub fn notify(&self, event: Event) {
        tracing::debug!(event = event.name(), "emitting event");
        if self.tx.send(event).is_err() {
            // No subscribers; normal in CLI one-shot use.
            tracing::trace!("event dropped, no active subscribers");
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_without_subscribers_does_not_panic() {
        let notifier = Notifier::default();
        notifier.notify(Event::FeedbackCollected {
            lesson_id: "l-1".into(),
            success_score: 3.4,
        });
    }

    #[test]
    fn test_subscriber_receives_event() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        notifier.notify(Event::PatternsDetected {
            lesson_id: "l-1".into(),
            candidates: 4,
            accepted: 1,
        });

        let event = rx.try_recv().unwrap();
        assert_eq!(event.name(), "patterns_detected");
    }
}
