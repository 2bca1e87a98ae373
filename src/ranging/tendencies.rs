use crate::Probability;
use serde::Deserialize;
use serde::Serialize;

/// Observed frequencies for one opponent, used to shape their prior range.
/// VPIP: how often they voluntarily put chips in preflop. PFR: how often
/// they raise preflop. Defaults approximate a typical low-stakes regular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tendencies {
    pub vpip: Probability,
    pub pfr: Probability,
}

impl Default for Tendencies {
    fn default() -> Self {
        Self {
            vpip: 0.25,
            pfr: 0.18,
        }
    }
}

impl Tendencies {
    /// a maniac plays everything; the prior stays near uniform
    pub fn loose() -> Self {
        Self {
            vpip: 0.60,
            pfr: 0.40,
        }
    }
    /// a rock plays almost nothing
    pub fn tight() -> Self {
        Self {
            vpip: 0.12,
            pfr: 0.09,
        }
    }
}
