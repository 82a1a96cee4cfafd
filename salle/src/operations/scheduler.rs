//! The scheduler: shared state and helpers for the lifecycle operations.

use chrono::Utc;

use crate::access::{AccessPolicy, BookingAction, Identity};
use crate::booking::{BookingId, RoomId, UserId};
use crate::cache::AvailabilityCache;
use crate::error::{Error, Result};
use crate::interval::TimeSlot;
use crate::logging::Logger;
use crate::notify::Notifier;
use crate::store::{BookingStore, RoomCatalog, RoomDetails};

/// The booking lifecycle manager.
///
/// A `Scheduler` borrows a store, an authorization gate, and a notifier for
/// the duration of a request. It owns no booking state itself; every
/// operation goes through the store's transactional boundary.
///
/// The optional availability cache decorates only the free-interval read
/// path and is invalidated by every successful write.
pub struct Scheduler<'a, S> {
    pub(super) store: &'a mut S,
    pub(super) policy: &'a dyn AccessPolicy,
    pub(super) notifier: &'a dyn Notifier,
    pub(super) logger: Logger,
    pub(super) cache: Option<AvailabilityCache>,
}

impl<'a, S> Scheduler<'a, S>
where
    S: BookingStore + RoomCatalog,
{
    /// Creates a scheduler over the given collaborators.
    ///
    /// The logger defaults to normal verbosity and no availability cache is
    /// installed.
    pub fn new(store: &'a mut S, policy: &'a dyn AccessPolicy, notifier: &'a dyn Notifier) -> Self {
        Self {
            store,
            policy,
            notifier,
            logger: Logger::default(),
            cache: None,
        }
    }

    /// Replaces the scheduler's logger.
    #[must_use]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Installs an availability cache over the free-interval read path.
    #[must_use]
    pub fn with_cache(mut self, cache: AvailabilityCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Rejects windows whose start is not strictly in the future.
    ///
    /// Read-only availability queries never call this; inspecting past
    /// ranges is allowed there.
    pub(super) fn ensure_future_start(slot: &TimeSlot) -> Result<()> {
        let now = Utc::now().naive_utc();
        if slot.start() <= now {
            return Err(Error::PastStart {
                start: slot.start(),
            });
        }
        Ok(())
    }

    /// Rejects references to rooms the catalog does not know.
    pub(super) fn ensure_room_exists(&self, room: RoomId) -> Result<()> {
        if !self.store.room_exists(room)? {
            return Err(Error::RoomNotFound { room });
        }
        Ok(())
    }

    /// Enforces owner-or-privileged access to an existing booking.
    ///
    /// Privilege is delegated to the policy gate; the scheduler itself only
    /// knows the ownership rule.
    pub(super) fn authorize_manage(
        &self,
        actor: &Identity,
        owner: UserId,
        verb: &str,
        booking: BookingId,
    ) -> Result<()> {
        if actor.user == owner || self.policy.allows(actor, BookingAction::ManageAny) {
            return Ok(());
        }
        Err(Error::Forbidden {
            details: format!("user {} may not {verb} booking {booking}", actor.user),
        })
    }

    /// Drops cached availability for a room after a successful write.
    pub(super) fn invalidate_cache(&mut self, room: RoomId) {
        if let Some(cache) = &mut self.cache {
            cache.invalidate_room(room);
            log::debug!("invalidated availability cache for room {room}");
        }
    }

    /// Resolves room display details for a notification, best-effort.
    ///
    /// A catalog failure here must not fail the booking, so it is logged
    /// and treated as "no details".
    pub(super) fn room_details_for_notice(&self, room: RoomId) -> Option<RoomDetails> {
        match self.store.room_details(room) {
            Ok(details) => details,
            Err(err) => {
                self.logger
                    .warn(&format!("could not resolve details for room {room}: {err}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{MockAccessPolicy, Role, RolePolicy};
    use crate::database::test_util::{open_test_database, seed_room};
    use crate::notify::NoopNotifier;

    fn identity(user: i64, role: Role) -> Identity {
        Identity::new(UserId::try_from(user).unwrap(), role)
    }

    #[test]
    fn test_ensure_future_start_rejects_past() {
        let past = Utc::now().naive_utc() - chrono::Duration::hours(1);
        let slot = TimeSlot::from_naive(past, past + chrono::Duration::hours(2)).unwrap();

        type Db = crate::database::Database;
        let result = Scheduler::<Db>::ensure_future_start(&slot);
        assert!(matches!(result, Err(Error::PastStart { .. })));
    }

    #[test]
    fn test_ensure_future_start_accepts_future() {
        let start = Utc::now().naive_utc() + chrono::Duration::hours(1);
        let slot = TimeSlot::from_naive(start, start + chrono::Duration::hours(1)).unwrap();

        type Db = crate::database::Database;
        assert!(Scheduler::<Db>::ensure_future_start(&slot).is_ok());
    }

    #[test]
    fn test_ensure_room_exists() {
        let mut db = open_test_database();
        let room = seed_room(&mut db, "Boardroom");
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        assert!(scheduler.ensure_room_exists(room).is_ok());

        let missing = RoomId::try_from(999).unwrap();
        let err = scheduler.ensure_room_exists(missing).unwrap_err();
        assert!(matches!(err, Error::RoomNotFound { .. }));
    }

    #[test]
    fn test_authorize_manage_owner_bypasses_policy() {
        let mut db = open_test_database();
        // A policy that denies everything; ownership must still win
        let mut policy = MockAccessPolicy::new();
        policy.expect_allows().return_const(false);
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let owner = UserId::try_from(8).unwrap();
        let actor = Identity::new(owner, Role::Regular);
        assert!(scheduler
            .authorize_manage(&actor, owner, "update", BookingId::new(1))
            .is_ok());
    }

    #[test]
    fn test_authorize_manage_defers_privilege_to_gate() {
        let mut db = open_test_database();
        let mut policy = MockAccessPolicy::new();
        policy
            .expect_allows()
            .withf(|_, action| *action == BookingAction::ManageAny)
            .return_const(true);
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let actor = identity(1, Role::Regular);
        let owner = UserId::try_from(2).unwrap();
        assert!(scheduler
            .authorize_manage(&actor, owner, "cancel", BookingId::new(1))
            .is_ok());
    }

    #[test]
    fn test_authorize_manage_rejects_stranger() {
        let mut db = open_test_database();
        let policy = RolePolicy;
        let notifier = NoopNotifier;
        let scheduler = Scheduler::new(&mut db, &policy, &notifier);

        let actor = identity(1, Role::Regular);
        let owner = UserId::try_from(2).unwrap();
        let err = scheduler
            .authorize_manage(&actor, owner, "update", BookingId::new(7))
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(err.to_string().contains("booking 7"));
    }
}
