//! Actor identity and roles.
//!
//! Authentication itself is a caller concern; only the role crosses the
//! engine boundary, to decide who may post into locked periods and who may
//! lock or unlock them.

use serde::{Deserialize, Serialize};
use tally_shared::types::UserId;

/// Roles a user can hold within a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Full access, can transfer ownership.
    Owner,
    /// Full access except ownership transfer.
    Admin,
    /// Can post entries, lock and unlock periods.
    Accountant,
    /// Can record day-to-day entries.
    Clerk,
    /// Read-only access.
    Viewer,
}

impl ActorRole {
    /// Returns true if this role may post into a locked period.
    #[must_use]
    pub const fn can_override_period_lock(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin | Self::Accountant)
    }

    /// Returns true if this role may lock or unlock periods.
    #[must_use]
    pub const fn can_manage_periods(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin | Self::Accountant)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Admin => write!(f, "admin"),
            Self::Accountant => write!(f, "accountant"),
            Self::Clerk => write!(f, "clerk"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's identifier, recorded on everything they post.
    pub user_id: UserId,
    /// The user's role within the tenant.
    pub role: ActorRole,
}

impl Actor {
    /// Creates an actor from its parts.
    #[must_use]
    pub const fn new(user_id: UserId, role: ActorRole) -> Self {
        Self { user_id, role }
    }
}
