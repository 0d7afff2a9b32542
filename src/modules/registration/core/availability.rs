use serde::{Deserialize, Serialize};

/// Seats left at or below which a group is flagged as limited.
pub const LIMITED_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, async_graphql::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Limited,
    Full,
}

impl Availability {
    pub fn from_counts(registered: u32, capacity: u32) -> Self {
        if registered >= capacity {
            Availability::Full
        } else if registered >= capacity.saturating_sub(LIMITED_THRESHOLD) {
            Availability::Limited
        } else {
            Availability::Available
        }
    }
}
