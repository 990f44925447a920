use re_core::{AgentId, PropertyId};
use re_entity::EntityError;
use re_queue::QueueError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    /// A handler tried to schedule into the past.  Fatal.
    #[error("scheduling error: {0}")]
    Schedule(#[from] QueueError),

    /// A handler broke a state-machine rule.  Fatal.
    #[error("entity error: {0}")]
    Entity(#[from] EntityError),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failure of a single stage handler.
///
/// `StaleReference` is recovered by the driver; the other variants become
/// the matching [`SimError`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("{event}: {property} is gone or no longer handled by {agent}")]
    StaleReference {
        event:    &'static str,
        property: PropertyId,
        agent:    AgentId,
    },

    #[error(transparent)]
    Schedule(#[from] QueueError),

    #[error(transparent)]
    Entity(#[from] EntityError),
}

pub type HandlerResult<T> = Result<T, HandlerError>;
