//! Type-safe identifier wrappers.
//!
//! Reference catalog rows and players are keyed by `PostgreSQL` `INTEGER`
//! primary keys, so their identifiers wrap an [`i32`]. Keeping each key in
//! its own newtype stops a species id from being bound where an ability id
//! is expected.
//!
//! [`SessionId`] is the exception: it is generated app-side as a UUID v7 and
//! only exists to correlate the log lines of one quiz session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around an `i32` database key.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i32);

        impl $name {
            /// Return the inner database key.
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of a species row in the reference catalog.
    SpeciesId
}

define_id! {
    /// Identifier of an elemental type (Fire, Water, ...).
    TypeId
}

define_id! {
    /// Identifier of an ability.
    AbilityId
}

define_id! {
    /// Identifier of an egg group.
    EggGroupId
}

define_id! {
    /// Identifier of an authenticated player.
    UserId
}

define_id! {
    /// Identifier of a registered quiz mode in the `game_modes` catalog.
    ModeId
}

/// Identifier of one quiz session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
