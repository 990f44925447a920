//! `AgentPool` — Structure-of-Arrays storage for the sales agents.
//!
//! Every `Vec` has exactly `count` elements and `AgentId` is the index into
//! all of them.  The pool size is fixed for the whole run.
//!
//! # Available-agent index
//!
//! `find_available` must return the available agent with the fewest
//! completed tasks, ties to the lowest id.  The pool keeps a
//! `BTreeSet<(completed_tasks, AgentId)>` of available agents, so the answer
//! is the set's first element and every block/unblock is O(log A).

use std::collections::BTreeSet;

use re_core::{AgentId, PropertyId, SimTime};

use crate::{AgentState, EntityError, EntityResult};

pub struct AgentPool {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    state:           Vec<AgentState>,
    blocked_minutes: Vec<f64>,
    completed_tasks: Vec<u64>,
    pending:         Vec<BTreeSet<PropertyId>>,

    available:        BTreeSet<(u64, AgentId)>,
    verification_cap: usize,
}

impl AgentPool {
    pub fn new(count: usize, verification_cap: usize) -> Self {
        let available = (0..count as u32).map(|i| (0, AgentId(i))).collect();
        Self {
            count,
            state: vec![AgentState::Available; count],
            blocked_minutes: vec![0.0; count],
            completed_tasks: vec![0; count],
            pending: vec![BTreeSet::new(); count],
            available,
            verification_cap,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = AgentId> {
        (0..self.count as u32).map(AgentId)
    }

    pub fn verification_cap(&self) -> usize {
        self.verification_cap
    }

    // ── Blocking ──────────────────────────────────────────────────────────

    /// Available agent with the fewest completed tasks, lowest id on ties.
    pub fn find_available(&self) -> Option<AgentId> {
        self.available.first().map(|&(_, agent)| agent)
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    #[inline]
    pub fn state(&self, agent: AgentId) -> AgentState {
        self.state[agent.index()]
    }

    #[inline]
    pub fn is_available(&self, agent: AgentId) -> bool {
        self.state[agent.index()].is_available()
    }

    /// Start a blocking task on `property`.
    ///
    /// Returns `false` and changes nothing if the agent is already blocked.
    pub fn block(&mut self, agent: AgentId, property: PropertyId, now: SimTime) -> bool {
        let i = agent.index();
        if !self.state[i].is_available() {
            return false;
        }
        self.available.remove(&(self.completed_tasks[i], agent));
        self.state[i] = AgentState::Blocked { property, since: now };
        true
    }

    /// Finish the current blocking task.
    ///
    /// Adds the blocked span to the agent's total, counts one completed task,
    /// and returns the span.  `None` if the agent was not blocked.
    pub fn unblock(&mut self, agent: AgentId, now: SimTime) -> Option<f64> {
        let i = agent.index();
        let AgentState::Blocked { since, .. } = self.state[i] else {
            return None;
        };
        let span = now.since(since).max(0.0);
        self.blocked_minutes[i] += span;
        self.completed_tasks[i] += 1;
        self.state[i] = AgentState::Available;
        self.available.insert((self.completed_tasks[i], agent));
        Some(span)
    }

    /// Release every blocked agent at `now`.  Returns how many were released.
    pub fn force_release_all(&mut self, now: SimTime) -> usize {
        let blocked: Vec<AgentId> = self.ids().filter(|&a| !self.is_available(a)).collect();
        for &agent in &blocked {
            self.unblock(agent, now);
        }
        blocked.len()
    }

    // ── Verification tracking ─────────────────────────────────────────────

    pub fn pending_verifications(&self, agent: AgentId) -> &BTreeSet<PropertyId> {
        &self.pending[agent.index()]
    }

    pub fn has_verification_capacity(&self, agent: AgentId) -> bool {
        self.pending[agent.index()].len() < self.verification_cap
    }

    /// Start tracking `property` through verification.
    pub fn add_pending(&mut self, agent: AgentId, property: PropertyId) -> EntityResult<()> {
        if !self.has_verification_capacity(agent) {
            return Err(EntityError::VerificationFull { agent, cap: self.verification_cap });
        }
        self.pending[agent.index()].insert(property);
        Ok(())
    }

    /// Stop tracking `property`.  Returns `false` if it was not tracked.
    pub fn remove_pending(&mut self, agent: AgentId, property: PropertyId) -> bool {
        self.pending[agent.index()].remove(&property)
    }

    // ── Statistics ────────────────────────────────────────────────────────

    pub fn blocked_minutes(&self, agent: AgentId) -> f64 {
        self.blocked_minutes[agent.index()]
    }

    pub fn completed_tasks(&self, agent: AgentId) -> u64 {
        self.completed_tasks[agent.index()]
    }

    /// Blocked time over `base_minutes`.  Zero for a zero base.
    pub fn utilization(&self, agent: AgentId, base_minutes: f64) -> f64 {
        if base_minutes <= 0.0 {
            return 0.0;
        }
        self.blocked_minutes(agent) / base_minutes
    }
}
