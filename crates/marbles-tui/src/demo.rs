//! Demo producer and batching operator.
//!
//! Both run as tokio tasks and only talk to the UI context through
//! channels: the producer emits a counter at a fixed rate, the batcher
//! groups it by count or time span.

use std::fmt;
use std::time::Duration;

use marbles_engine::Notification;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Notification carried from the producer.
pub type SourceNote = Notification<u64, String>;

/// Notification carried from the batcher.
pub type BatchNote = Notification<Batch, String>;

/// Settings for the demo producer.
#[derive(Debug, Clone)]
pub struct ProducerOptions {
    /// Time between values.
    pub period: Duration,
    /// Complete after this many values (never, if `None`).
    pub count: Option<u64>,
    /// Fail after this many values instead of completing.
    pub fail_after: Option<u64>,
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
            count: None,
            fail_after: None,
        }
    }
}

/// Spawn the counter producer, broadcasting to every target.
///
/// The first value arrives one period after spawning.
pub fn spawn_producer(
    options: ProducerOptions,
    targets: Vec<mpsc::UnboundedSender<SourceNote>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + options.period, options.period);
        let mut next = 0u64;
        loop {
            interval.tick().await;
            if options.fail_after == Some(next) {
                broadcast(&targets, &Notification::Error(format!("failed after {next} values")));
                break;
            }
            if options.count == Some(next) {
                broadcast(&targets, &Notification::Completed);
                break;
            }
            if !broadcast(&targets, &Notification::Value(next)) {
                break;
            }
            next += 1;
        }
    })
}

/// Send to every target. Returns `false` once all receivers are gone.
fn broadcast(targets: &[mpsc::UnboundedSender<SourceNote>], note: &SourceNote) -> bool {
    let mut delivered = false;
    for target in targets {
        delivered |= target.send(note.clone()).is_ok();
    }
    delivered
}

/// A group of values emitted together by the batcher.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch(pub Vec<u64>);

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

/// Count side of the batching operator.
#[derive(Debug)]
pub struct Batcher {
    max_count: usize,
    pending: Vec<u64>,
}

impl Batcher {
    pub fn new(max_count: usize) -> Self {
        Self {
            max_count: max_count.max(1),
            pending: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Add a value, returning a full batch once `max_count` is reached.
    pub fn push(&mut self, value: u64) -> Option<Batch> {
        self.pending.push(value);
        if self.pending.len() >= self.max_count {
            Some(self.take())
        } else {
            None
        }
    }

    /// Take whatever is pending, possibly nothing.
    pub fn take(&mut self) -> Batch {
        Batch(std::mem::take(&mut self.pending))
    }
}

/// Spawn the batching operator between `input` and `output`.
///
/// A batch is emitted when `max_count` values have arrived or `span` has
/// passed since the last emission, whichever comes first. Spans with no
/// values emit an empty batch.
pub fn spawn_batcher(
    max_count: usize,
    span: Duration,
    mut input: mpsc::UnboundedReceiver<SourceNote>,
    output: mpsc::UnboundedSender<BatchNote>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut batcher = Batcher::new(max_count);
        let mut deadline = Instant::now() + span;
        loop {
            tokio::select! {
                note = input.recv() => match note {
                    Some(Notification::Value(value)) => {
                        if let Some(batch) = batcher.push(value) {
                            if output.send(Notification::Value(batch)).is_err() {
                                break;
                            }
                            deadline = Instant::now() + span;
                        }
                    }
                    Some(Notification::Completed) | None => {
                        if !batcher.is_empty() {
                            let _ = output.send(Notification::Value(batcher.take()));
                        }
                        let _ = output.send(Notification::Completed);
                        break;
                    }
                    Some(Notification::Error(error)) => {
                        let _ = output.send(Notification::Error(error));
                        break;
                    }
                },
                () = tokio::time::sleep_until(deadline) => {
                    if output.send(Notification::Value(batcher.take())).is_err() {
                        break;
                    }
                    deadline = Instant::now() + span;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(item) = rx.recv().await {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_batch_display() {
        assert_eq!(Batch(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Batch::default().to_string(), "[]");
    }

    #[test]
    fn test_batcher_count() {
        let mut batcher = Batcher::new(2);
        assert_eq!(batcher.push(1), None);
        assert_eq!(batcher.push(2), Some(Batch(vec![1, 2])));
        assert!(batcher.is_empty());
        batcher.push(3);
        assert_eq!(batcher.take(), Batch(vec![3]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_completes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let options = ProducerOptions {
            period: Duration::from_millis(100),
            count: Some(3),
            fail_after: None,
        };
        spawn_producer(options, vec![tx]);

        let notes = collect(&mut rx).await;
        assert_eq!(
            notes,
            vec![
                Notification::Value(0),
                Notification::Value(1),
                Notification::Value(2),
                Notification::Completed,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_fails() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let options = ProducerOptions {
            period: Duration::from_millis(100),
            count: Some(10),
            fail_after: Some(1),
        };
        spawn_producer(options, vec![tx]);

        let notes = collect(&mut rx).await;
        assert_eq!(notes.len(), 2);
        assert!(matches!(notes[1], Notification::Error(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_producer_broadcasts() {
        let (a_tx, mut a_rx) = mpsc::unbounded_channel();
        let (b_tx, mut b_rx) = mpsc::unbounded_channel();
        let options = ProducerOptions {
            period: Duration::from_millis(10),
            count: Some(2),
            fail_after: None,
        };
        spawn_producer(options, vec![a_tx, b_tx]);

        assert_eq!(collect(&mut a_rx).await, collect(&mut b_rx).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_batcher_flushes_on_count_and_completion() {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        spawn_batcher(2, Duration::from_secs(60), in_rx, out_tx);

        for v in 0..3 {
            in_tx.send(Notification::Value(v)).unwrap();
        }
        in_tx.send(Notification::Completed).unwrap();

        let notes = collect(&mut out_rx).await;
        assert_eq!(
            notes,
            vec![
                Notification::Value(Batch(vec![0, 1])),
                Notification::Value(Batch(vec![2])),
                Notification::Completed,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_batcher_flushes_on_span() {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        spawn_batcher(10, Duration::from_millis(300), in_rx, out_tx);

        in_tx.send(Notification::Value(5)).unwrap();
        let first = out_rx.recv().await.unwrap();
        assert_eq!(first, Notification::Value(Batch(vec![5])));

        // Nothing arrived during the next span.
        let second = out_rx.recv().await.unwrap();
        assert_eq!(second, Notification::Value(Batch::default()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_batcher_passes_errors() {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel();
        spawn_batcher(10, Duration::from_secs(60), in_rx, out_tx);

        in_tx.send(Notification::Value(1)).unwrap();
        in_tx.send(Notification::Error("boom".into())).unwrap();

        let notes = collect(&mut out_rx).await;
        assert_eq!(notes, vec![Notification::Error("boom".to_string())]);
    }
}
