use serde::{Deserialize, Serialize};

use apidiff_permission::{DEFAULT_MAX_VARIABLES, MAX_VARIABLES_LIMIT};

use crate::error::{EngineError, EngineResult};

/// Configuration for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of distinct identifiers a pair of permission
    /// expressions may mention before the comparison is reported as
    /// unparsable instead of enumerated.
    pub max_permission_variables: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_permission_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl EngineConfig {
    /// Reject values the engine would otherwise have to clamp.
    pub fn validate(&self) -> EngineResult<()> {
        if self.max_permission_variables > MAX_VARIABLES_LIMIT {
            return Err(EngineError::Config(format!(
                "max_permission_variables = {} exceeds the limit of {MAX_VARIABLES_LIMIT}",
                self.max_permission_variables
            )));
        }
        Ok(())
    }
}
