//! Penalty breakdown value object
//!
//! The additive decomposition of a schedule's total penalty. Every component
//! is non-negative and the named components sum to `total_penalty` exactly.

use serde::{Deserialize, Serialize};

/// Additive decomposition of the total penalty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PenaltyBreakdown {
    pub total_penalty: f64,
    pub deadline_penalties: f64,
    pub dependency_penalties: f64,
    pub resource_penalties: f64,
    pub compatibility_penalties: f64,
    pub slack_penalties: f64,
    pub blackout_penalties: f64,
    pub soft_block_penalties: f64,
    pub single_conference_penalties: f64,
    pub lead_time_penalties: f64,
}

impl PenaltyBreakdown {
    /// Finalizes the breakdown by setting `total_penalty` to the component sum.
    pub fn finalize(mut self) -> Self {
        self.total_penalty = self.components().iter().map(|(_, amount)| amount).sum();
        self
    }

    /// Named components in table order.
    pub fn components(&self) -> [(&'static str, f64); 9] {
        [
            ("deadline", self.deadline_penalties),
            ("dependency", self.dependency_penalties),
            ("resource", self.resource_penalties),
            ("compatibility", self.compatibility_penalties),
            ("slack", self.slack_penalties),
            ("blackout", self.blackout_penalties),
            ("soft_block", self.soft_block_penalties),
            ("single_conference", self.single_conference_penalties),
            ("lead_time", self.lead_time_penalties),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_sums_components() {
        let breakdown = PenaltyBreakdown {
            deadline_penalties: 100.0,
            dependency_penalties: 50.0,
            slack_penalties: 25.0,
            ..Default::default()
        }
        .finalize();
        assert_eq!(breakdown.total_penalty, 175.0);
    }

    #[test]
    fn test_components_cover_all_fields() {
        let breakdown = PenaltyBreakdown {
            deadline_penalties: 1.0,
            dependency_penalties: 2.0,
            resource_penalties: 3.0,
            compatibility_penalties: 4.0,
            slack_penalties: 5.0,
            blackout_penalties: 6.0,
            soft_block_penalties: 7.0,
            single_conference_penalties: 8.0,
            lead_time_penalties: 9.0,
            ..Default::default()
        }
        .finalize();
        let sum: f64 = breakdown.components().iter().map(|(_, v)| v).sum();
        assert_eq!(sum, breakdown.total_penalty);
        assert_eq!(breakdown.total_penalty, 45.0);
    }
}
