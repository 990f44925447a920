//! `EntityStore` — the three property pools, the idle index, and the agents.
//!
//! # Pools
//!
//! Every property lives in exactly one of three maps:
//!
//! | Pool     | Stages                                   |
//! |----------|------------------------------------------|
//! | `active` | everything except `Sold` and `Lost`      |
//! | `sold`   | `Sold`                                   |
//! | `lost`   | `Lost`                                   |
//!
//! Moving a property between pools goes through [`EntityStore::mark_sold`]
//! or [`EntityStore::mark_lost`]; nothing else removes from `active`.
//!
//! # Idle index
//!
//! Arrivals pick a uniformly random idle property.  Scanning the active pool
//! for idle entries would be O(P) per arrival, so the store keeps the idle
//! ids in a `Vec` with a position map.  Removal is `swap_remove`, which keeps
//! the order a pure function of the event sequence.

use re_core::{AgentId, PropertyId, SimRng, SimTime};

use crate::{AgentPool, EntityError, EntityResult, Property, PropertyStage};

#[cfg(feature = "fx-hash")]
type IdMap<V> = rustc_hash::FxHashMap<PropertyId, V>;
#[cfg(not(feature = "fx-hash"))]
type IdMap<V> = std::collections::BTreeMap<PropertyId, V>;

pub struct EntityStore {
    pub agents: AgentPool,

    active: IdMap<Property>,
    sold:   IdMap<Property>,
    lost:   IdMap<Property>,

    idle:     Vec<PropertyId>,
    idle_pos: IdMap<usize>,

    next_id:           PropertyId,
    initial_active:    u64,
    replacements_made: u64,
}

impl EntityStore {
    /// Empty store around `agents`.  See [`crate::EntityStoreBuilder`].
    pub(crate) fn new(agents: AgentPool) -> Self {
        Self {
            agents,
            active: IdMap::default(),
            sold: IdMap::default(),
            lost: IdMap::default(),
            idle: Vec::new(),
            idle_pos: IdMap::default(),
            next_id: PropertyId(0),
            initial_active: 0,
            replacements_made: 0,
        }
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create an idle property at `now`.  Ids are never reused.
    pub fn create_property(&mut self, now: SimTime) -> PropertyId {
        let id = self.next_id;
        self.next_id = id.next();
        self.active.insert(id, Property::new(id, now));
        self.push_idle(id);
        id
    }

    pub(crate) fn seed_initial(&mut self, count: u64) {
        for _ in 0..count {
            self.create_property(SimTime::ZERO);
        }
        self.initial_active = count;
    }

    /// Create a replacement for a closed sale.
    pub fn create_replacement(&mut self, now: SimTime) -> PropertyId {
        self.replacements_made += 1;
        self.create_property(now)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn property(&self, id: PropertyId) -> Option<&Property> {
        self.active.get(&id)
    }

    pub fn property_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        self.active.get_mut(&id)
    }

    /// Active property or `UnknownProperty`.
    pub fn active_mut(&mut self, id: PropertyId) -> EntityResult<&mut Property> {
        self.active.get_mut(&id).ok_or(EntityError::UnknownProperty(id))
    }

    pub fn sold_property(&self, id: PropertyId) -> Option<&Property> {
        self.sold.get(&id)
    }

    pub fn lost_property(&self, id: PropertyId) -> Option<&Property> {
        self.lost.get(&id)
    }

    /// Uniformly random idle property, or `None` if every active property is
    /// mid-funnel.
    pub fn pick_idle(&self, rng: &mut SimRng) -> Option<PropertyId> {
        rng.pick_index(self.idle.len()).map(|i| self.idle[i])
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Move an active property to `to` and keep the idle index in step.
    ///
    /// `Sold` and `Lost` are rejected here; use [`mark_sold`](Self::mark_sold)
    /// and [`mark_lost`](Self::mark_lost).
    pub fn transition(&mut self, id: PropertyId, to: PropertyStage) -> EntityResult<()> {
        let property = self.active.get_mut(&id).ok_or(EntityError::UnknownProperty(id))?;
        let from = property.stage;
        if to.is_terminal() {
            return Err(EntityError::IllegalTransition { property: id, from, to });
        }
        property.transition(to)?;
        if from == PropertyStage::Idle {
            self.remove_idle(id);
        }
        if to == PropertyStage::Idle {
            self.push_idle(id);
        }
        Ok(())
    }

    /// Send a property back to idle and clear its sale state.
    pub fn return_to_idle(&mut self, id: PropertyId) -> EntityResult<()> {
        self.transition(id, PropertyStage::Idle)?;
        if let Some(p) = self.active.get_mut(&id) {
            p.reset_sale_state();
        }
        Ok(())
    }

    /// Close a notarized sale.  The property leaves the active pool.
    pub fn mark_sold(&mut self, id: PropertyId, now: SimTime) -> EntityResult<&Property> {
        self.close(id, PropertyStage::Sold, now)
    }

    /// Retire a property for good.  The property leaves the active pool.
    pub fn mark_lost(&mut self, id: PropertyId, now: SimTime) -> EntityResult<&Property> {
        self.close(id, PropertyStage::Lost, now)
    }

    fn close(&mut self, id: PropertyId, to: PropertyStage, now: SimTime) -> EntityResult<&Property> {
        let property = self.active.get_mut(&id).ok_or(EntityError::UnknownProperty(id))?;
        property.transition(to)?;
        property.closed_at = Some(now);
        property.in_sale = false;
        let mut property = self.active.remove(&id).ok_or(EntityError::UnknownProperty(id))?;
        let pool = if to == PropertyStage::Sold {
            &mut self.sold
        } else {
            property.reset_sale_state();
            &mut self.lost
        };
        Ok(pool.entry(id).or_insert(property))
    }

    // ── Agent helpers ─────────────────────────────────────────────────────

    /// Release `agent` if it is blocked on `property`.  Returns the blocked
    /// span released, `None` if the agent was free or busy elsewhere.
    pub fn release_if_owner(
        &mut self,
        agent: AgentId,
        property: PropertyId,
        now: SimTime,
    ) -> Option<f64> {
        if self.agents.state(agent).property() != Some(property) {
            return None;
        }
        self.agents.unblock(agent, now)
    }

    // ── Counts and iteration ──────────────────────────────────────────────

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    pub fn sold_count(&self) -> usize {
        self.sold.len()
    }

    pub fn lost_count(&self) -> usize {
        self.lost.len()
    }

    pub fn initial_active(&self) -> u64 {
        self.initial_active
    }

    pub fn replacements_made(&self) -> u64 {
        self.replacements_made
    }

    /// Highest id assigned so far plus one.
    pub fn next_id(&self) -> PropertyId {
        self.next_id
    }

    pub fn active(&self) -> impl Iterator<Item = &Property> {
        self.active.values()
    }

    pub fn sold(&self) -> impl Iterator<Item = &Property> {
        self.sold.values()
    }

    pub fn lost(&self) -> impl Iterator<Item = &Property> {
        self.lost.values()
    }

    /// Active properties in `stage`.
    pub fn count_in_stage(&self, stage: PropertyStage) -> usize {
        self.active.values().filter(|p| p.stage == stage).count()
    }

    // ── Idle index ────────────────────────────────────────────────────────

    fn push_idle(&mut self, id: PropertyId) {
        if self.idle_pos.contains_key(&id) {
            return;
        }
        self.idle_pos.insert(id, self.idle.len());
        self.idle.push(id);
    }

    fn remove_idle(&mut self, id: PropertyId) {
        let Some(pos) = self.idle_pos.remove(&id) else {
            return;
        };
        self.idle.swap_remove(pos);
        if let Some(&moved) = self.idle.get(pos) {
            self.idle_pos.insert(moved, pos);
        }
    }
}
