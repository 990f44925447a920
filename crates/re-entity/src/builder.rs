//! Fluent builder for [`EntityStore`].
//!
//! ```rust
//! use re_entity::EntityStoreBuilder;
//!
//! let store = EntityStoreBuilder::new(80)
//!     .initial_properties(9_537)
//!     .verification_cap(3)
//!     .build();
//!
//! assert_eq!(store.agents.len(), 80);
//! assert_eq!(store.active_count(), 9_537);
//! assert_eq!(store.idle_count(), 9_537);
//! ```

use crate::{AgentPool, EntityStore};

pub struct EntityStoreBuilder {
    agent_count:        usize,
    initial_properties: u64,
    verification_cap:   usize,
}

impl EntityStoreBuilder {
    pub fn new(agent_count: usize) -> Self {
        Self {
            agent_count,
            initial_properties: 0,
            verification_cap:   3,
        }
    }

    /// Properties created idle at t = 0 with ids `0..n`.
    pub fn initial_properties(mut self, n: u64) -> Self {
        self.initial_properties = n;
        self
    }

    /// Maximum properties one agent may track through verification.
    pub fn verification_cap(mut self, cap: usize) -> Self {
        self.verification_cap = cap;
        self
    }

    pub fn build(self) -> EntityStore {
        let agents = AgentPool::new(self.agent_count, self.verification_cap);
        let mut store = EntityStore::new(agents);
        store.seed_initial(self.initial_properties);
        store
    }
}
