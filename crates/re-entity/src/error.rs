use re_core::{AgentId, PropertyId};
use thiserror::Error;

use crate::PropertyStage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The property is not in the active pool (sold, lost, or never created).
    #[error("{0} is not an active property")]
    UnknownProperty(PropertyId),

    #[error("{property}: illegal stage transition {from:?} -> {to:?}")]
    IllegalTransition {
        property: PropertyId,
        from:     PropertyStage,
        to:       PropertyStage,
    },

    #[error("{agent} already tracks {cap} pending verifications")]
    VerificationFull { agent: AgentId, cap: usize },
}

pub type EntityResult<T> = Result<T, EntityError>;
