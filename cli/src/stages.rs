//! Stage resolution at the command boundary
//!
//! The store keeps stages as open text. This is the only place a stage can
//! be rejected, and only when the `known` policy is configured. Free stage
//! text is never rewritten: `corte` and `CORTE` are different stages.

use prodtrack_store::{KNOWN_STAGES, STAGE_CORTE, STAGE_COSTURA_ENTRADA, STAGE_COSTURA_SAIDA};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagePolicy {
    /// Any text is a stage
    #[default]
    Open,
    /// Only the codes of the fixed production screens
    Known,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StageError {
    #[error("unknown stage {0:?}; expected one of {known}", known = KNOWN_STAGES.join(", "))]
    Unknown(String),
}

/// Fixed production screens, each bound to one stage code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Corte,
    CosturaEntrada,
    CosturaSaida,
}

impl Screen {
    pub fn stage(self) -> &'static str {
        match self {
            Self::Corte => STAGE_CORTE,
            Self::CosturaEntrada => STAGE_COSTURA_ENTRADA,
            Self::CosturaSaida => STAGE_COSTURA_SAIDA,
        }
    }
}

/// Resolve the stage a free-form production command writes or reads.
pub fn resolve_stage(input: &str, policy: StagePolicy) -> Result<String, StageError> {
    match policy {
        StagePolicy::Open => Ok(input.to_string()),
        StagePolicy::Known if KNOWN_STAGES.contains(&input) => Ok(input.to_string()),
        StagePolicy::Known => Err(StageError::Unknown(input.to_string())),
    }
}
