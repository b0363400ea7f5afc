//! Night routes: the solver's unit of output.

use crate::blocks::ServiceBlock;

/// One shift: service blocks in visiting order.
///
/// Order is significant; it defines the deadhead chain.  Built by the solver
/// one insertion at a time and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NightRoute {
    pub blocks: Vec<ServiceBlock>,
}

impl NightRoute {
    pub fn new(blocks: Vec<ServiceBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Σ `service_distance_mi` over the night's blocks.
    pub fn service_miles(&self) -> f64 {
        self.blocks.iter().map(|b| b.service_distance_mi).sum()
    }
}
