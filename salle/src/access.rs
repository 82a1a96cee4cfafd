//! Identity and authorization types.
//!
//! The engine never inspects roles directly. Every operation receives a
//! typed [`Identity`] produced by the external auth layer, and privilege
//! questions go through the single-method [`AccessPolicy`] gate. The
//! [`RolePolicy`] shipped here encodes the default role matrix; deployments
//! with their own authorization service implement the trait against it.

use serde::{Deserialize, Serialize};

use crate::booking::UserId;

/// Role carried by an authenticated identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// An ordinary interactive user.
    Regular,
    /// A system administrator.
    Admin,
    /// A facility manager.
    FacilityManager,
    /// A content moderator.
    Moderator,
    /// A read-mostly auditor.
    Auditor,
    /// A non-interactive machine account.
    ServiceAccount,
}

impl Role {
    /// Parses a role from its wire name.
    ///
    /// # Errors
    ///
    /// Returns the input back if it names no known role.
    ///
    /// # Examples
    ///
    /// ```
    /// use salle::Role;
    ///
    /// assert_eq!(Role::parse("facility_manager").unwrap(), Role::FacilityManager);
    /// assert!(Role::parse("superuser").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "regular" => Ok(Self::Regular),
            "admin" => Ok(Self::Admin),
            "facility_manager" => Ok(Self::FacilityManager),
            "moderator" => Ok(Self::Moderator),
            "auditor" => Ok(Self::Auditor),
            "service_account" => Ok(Self::ServiceAccount),
            _ => Err(format!("unknown role: {s}")),
        }
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Admin => "admin",
            Self::FacilityManager => "facility_manager",
            Self::Moderator => "moderator",
            Self::Auditor => "auditor",
            Self::ServiceAccount => "service_account",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated identity descriptor, produced by the external auth layer.
///
/// The engine takes identities by value and never re-derives them from
/// tokens or payloads itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The authenticated user.
    pub user: UserId,
    /// The role claimed by the auth layer.
    pub role: Role,
}

impl Identity {
    /// Creates an identity descriptor.
    #[must_use]
    pub const fn new(user: UserId, role: Role) -> Self {
        Self { user, role }
    }
}

/// Actions the engine asks the policy gate about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingAction {
    /// Create a booking on one's own behalf.
    Create,
    /// List every booking in the system.
    ViewAll,
    /// Update or cancel a booking owned by someone else.
    ManageAny,
}

/// Authorization gate consulted by the scheduler.
///
/// One method, one answer. The scheduler combines `ManageAny` with its own
/// ownership check to enforce owner-or-privileged semantics; it never
/// inspects roles directly.
#[cfg_attr(test, mockall::automock)]
pub trait AccessPolicy {
    /// Returns whether the identity may perform the action.
    fn allows(&self, identity: &Identity, action: BookingAction) -> bool;
}

/// The default role matrix.
///
/// - `Create`: any human role; service accounts are excluded.
/// - `ViewAll`: admin, facility manager, auditor.
/// - `ManageAny`: admin only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl AccessPolicy for RolePolicy {
    fn allows(&self, identity: &Identity, action: BookingAction) -> bool {
        match action {
            BookingAction::Create => !matches!(identity.role, Role::ServiceAccount),
            BookingAction::ViewAll => matches!(
                identity.role,
                Role::Admin | Role::FacilityManager | Role::Auditor
            ),
            BookingAction::ManageAny => matches!(identity.role, Role::Admin),
        }
    }
}
