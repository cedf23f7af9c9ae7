use crate::models::Note;
use dashmap::DashMap;
use tokio::time::{Duration, Instant};

/// How long a cached read is served without going back to the server.
pub const STALE_TIME: Duration = Duration::from_secs(5 * 60);
/// How long an unused entry is kept before it is dropped.
pub const GC_TIME: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    NoteList,
    Note(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cached {
    List(Vec<Note>),
    Note(Note),
}

#[derive(Debug)]
struct Entry {
    value: Cached,
    fetched_at: Instant,
    last_used: Instant,
    invalidated: bool,
}

/// Read cache shared by every clone of a client.
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<CacheKey, Entry>,
    stale_time: Duration,
    gc_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(STALE_TIME, GC_TIME)
    }
}

impl QueryCache {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            stale_time,
            gc_time,
        }
    }

    /// The cached value for `key` if it is still fresh.
    ///
    /// Stale entries stay in place (they count as used) until they are
    /// replaced by `store` or collected.
    pub fn fresh(&self, key: CacheKey) -> Option<Cached> {
        self.collect_garbage();

        let now = Instant::now();
        let mut entry = self.entries.get_mut(&key)?;
        entry.last_used = now;

        let age = now.duration_since(entry.fetched_at);
        if entry.invalidated || age >= self.stale_time {
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn store(&self, key: CacheKey, value: Cached) {
        let now = Instant::now();
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: now,
                last_used: now,
                invalidated: false,
            },
        );
    }

    /// Mark an entry stale so the next read refetches it.
    pub fn invalidate(&self, key: CacheKey) {
        if let Some(mut entry) = self.entries.get_mut(&key) {
            entry.invalidated = true;
        }
    }

    pub fn remove(&self, key: CacheKey) {
        self.entries.remove(&key);
    }

    /// Drop every entry that has not been used for `gc_time`.
    pub fn collect_garbage(&self) {
        let now = Instant::now();
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_used) < self.gc_time);
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
