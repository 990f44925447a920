//! `re-entity` — property and agent records for the pipeline simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`stage`]     | `PropertyStage`, `AgentState` and their transition tables      |
//! | [`property`]  | `Property` record                                              |
//! | [`agents`]    | `AgentPool` (SoA agent state + available-agent index)          |
//! | [`store`]     | `EntityStore` (active / sold / lost pools, idle index)         |
//! | [`builder`]   | `EntityStoreBuilder` (fluent construction)                     |
//! | [`error`]     | `EntityError`, `EntityResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                          |
//! |-----------|-----------------------------------------------------------------|
//! | `fx-hash` | Property pools use `FxHashMap` instead of `BTreeMap`.           |

pub mod agents;
pub mod builder;
pub mod error;
pub mod property;
pub mod stage;
pub mod store;

#[cfg(test)]
mod tests;

pub use agents::AgentPool;
pub use builder::EntityStoreBuilder;
pub use error::{EntityError, EntityResult};
pub use property::Property;
pub use stage::{AgentState, PropertyStage};
pub use store::EntityStore;
