//! Strongly typed identifier wrappers.
//!
//! Agent ids are dense (`0..agent_count`) and index directly into the agent
//! pool's arrays.  Property ids are handed out sequentially by the entity
//! store and are never reused, so they are `u64`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// A sales agent.  Index into `AgentPool` arrays.
    pub struct AgentId(u32);
}

typed_id! {
    /// A listed property.  Assigned monotonically, never reused.
    pub struct PropertyId(u64);
}

impl PropertyId {
    /// The id that follows `self` in the store's sequence.
    #[inline]
    pub fn next(self) -> PropertyId {
        PropertyId(self.0 + 1)
    }
}
