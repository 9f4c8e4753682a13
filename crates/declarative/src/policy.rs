//! Strictness policy for canonicalization violations

use crate::types::StrictnessLevel;
use serde::{Deserialize, Serialize};

/// What to do about a (possible) violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Carry on without saying anything
    Suppress,
    /// Emit a warning and carry on
    Warn,
    /// Stop reconciling the resource
    Fail,
}

impl Decision {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

/// Decide the outcome for a resource.
///
/// | violated | off      | warning  | error    |
/// |----------|----------|----------|----------|
/// | false    | suppress | suppress | suppress |
/// | true     | suppress | warn     | fail     |
pub fn decide(violated: bool, level: StrictnessLevel) -> Decision {
    match (violated, level) {
        (false, _) | (true, StrictnessLevel::Off) => Decision::Suppress,
        (true, StrictnessLevel::Warning) => Decision::Warn,
        (true, StrictnessLevel::Error) => Decision::Fail,
    }
}
