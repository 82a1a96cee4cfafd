//! Short-TTL cache for free-interval queries.
//!
//! An optional decorator over the read-only availability listing. It is
//! never consulted on the conflict-check path: staleness here can only make
//! a listing momentarily out of date, never admit an overlapping booking.
//! Every successful write to a room invalidates that room's entries.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::booking::RoomId;
use crate::interval::TimeSlot;

struct CacheEntry {
    computed_at: Instant,
    slots: Vec<TimeSlot>,
}

/// TTL-bounded cache of computed free intervals, keyed by room and day.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chrono::NaiveDate;
/// use salle::{AvailabilityCache, RoomId};
///
/// let mut cache = AvailabilityCache::new(Duration::from_secs(30));
/// let room = RoomId::try_from(1).unwrap();
/// let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
///
/// assert!(cache.lookup(room, day).is_none());
/// cache.store(room, day, vec![]);
/// assert!(cache.lookup(room, day).is_some());
///
/// cache.invalidate_room(room);
/// assert!(cache.lookup(room, day).is_none());
/// ```
pub struct AvailabilityCache {
    ttl: Duration,
    entries: HashMap<(RoomId, NaiveDate), CacheEntry>,
}

impl AvailabilityCache {
    /// Creates a cache whose entries live at most `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached intervals for a room's day, if still fresh.
    #[must_use]
    pub fn lookup(&self, room: RoomId, day: NaiveDate) -> Option<Vec<TimeSlot>> {
        self.entries.get(&(room, day)).and_then(|entry| {
            if entry.computed_at.elapsed() < self.ttl {
                Some(entry.slots.clone())
            } else {
                None
            }
        })
    }

    /// Stores freshly computed intervals for a room's day.
    pub fn store(&mut self, room: RoomId, day: NaiveDate, slots: Vec<TimeSlot>) {
        self.entries.insert(
            (room, day),
            CacheEntry {
                computed_at: Instant::now(),
                slots,
            },
        );
    }

    /// Drops every entry for the given room.
    ///
    /// Called after each successful write to the room's schedule.
    pub fn invalidate_room(&mut self, room: RoomId) {
        self.entries.retain(|(cached_room, _), _| *cached_room != room);
    }

    /// Drops entries whose TTL has elapsed.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.computed_at.elapsed() < ttl);
    }

    /// Returns the number of live entries (including expired ones not yet
    /// purged).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
