use crate::scorer::Score;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Sink for candidate keys found by the workers.
///
/// Implementations are shared by every worker thread.
pub trait ResultReporter: Send + Sync {
    /// Cheap pre-check so callers can skip building descriptors.
    fn should_push(&self, score: Score) -> bool;

    /// Offers a candidate. Returns `false` when it was not retained.
    fn push(&self, score: Score, key_descriptor: &str, plaintext: &str, comment: &str) -> bool;

    fn is_shutdown_requested(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestEntry {
    pub score: Score,
    pub key: String,
    pub plaintext: String,
    pub comment: String,
}

/// Keeps the `capacity` best distinct keys, highest score first.
pub struct BestList {
    capacity: usize,
    entries: Mutex<Vec<BestEntry>>,
    threshold: AtomicI64,
    shutdown: AtomicBool,
}

impl BestList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Vec::with_capacity(capacity + 1)),
            threshold: AtomicI64::new(Score::MIN),
            shutdown: AtomicBool::new(false),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<BestEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn best(&self) -> Option<BestEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .first()
            .cloned()
    }
}

impl ResultReporter for BestList {
    fn should_push(&self, score: Score) -> bool {
        score > self.threshold.load(Ordering::Relaxed)
    }

    fn push(&self, score: Score, key_descriptor: &str, plaintext: &str, comment: &str) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(i) = entries.iter().position(|e| e.key == key_descriptor) {
            if entries[i].score >= score {
                return false;
            }
            entries.remove(i);
        }
        if entries.len() >= self.capacity && entries.last().is_some_and(|e| e.score >= score) {
            return false;
        }

        let at = entries.partition_point(|e| e.score >= score);
        entries.insert(
            at,
            BestEntry {
                score,
                key: key_descriptor.to_string(),
                plaintext: plaintext.to_string(),
                comment: comment.to_string(),
            },
        );
        entries.truncate(self.capacity);

        if entries.len() >= self.capacity {
            if let Some(last) = entries.last() {
                self.threshold.store(last.score, Ordering::Relaxed);
            }
        }

        if at == 0 {
            let preview: String = plaintext.chars().take(60).collect();
            info!("⭐ New best {} [{}] {}", score, comment, preview);
        }
        true
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}
