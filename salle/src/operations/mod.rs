//! Booking lifecycle operations.
//!
//! This module provides the [`Scheduler`], the engine's lifecycle manager.
//! Every operation is a synchronous validate → conflict-check → commit
//! sequence; the conflict check and the commit share one storage
//! transaction, so concurrent invocations against the same room cannot both
//! succeed with overlapping windows.
//!
//! # Examples
//!
//! ```no_run
//! use salle::database::{Database, DatabaseConfig};
//! use salle::operations::{CreateBooking, Scheduler};
//! use salle::{Identity, NoopNotifier, Role, RolePolicy, Timestamp, UserId};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/salle.db")).unwrap();
//! let room = db.add_room("Boardroom", None).unwrap();
//!
//! let policy = RolePolicy;
//! let notifier = NoopNotifier;
//! let mut scheduler = Scheduler::new(&mut db, &policy, &notifier);
//!
//! let actor = Identity::new(UserId::try_from(8).unwrap(), Role::Regular);
//! let request = CreateBooking::new(
//!     actor,
//!     room,
//!     Timestamp::parse("2027-03-01T10:00:00").unwrap(),
//!     Timestamp::parse("2027-03-01T11:00:00").unwrap(),
//! );
//! let booking = scheduler.create_booking(&request).unwrap();
//! println!("booked as {}", booking.id());
//! ```

mod cancel;
mod create;
mod queries;
mod scheduler;
mod update;

pub use create::CreateBooking;
pub use scheduler::Scheduler;
pub use update::UpdateBooking;
