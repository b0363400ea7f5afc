//! Distance/duration pairs returned by routing queries and cost estimates.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A `(distance, duration)` pair: miles and hours.
///
/// Pure value with no identity.  Supports addition, summation, and scaling
/// by a repeat count (loopback passes).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceTime {
    pub distance_mi: f64,
    pub duration_h:  f64,
}

impl DistanceTime {
    pub const ZERO: DistanceTime = DistanceTime { distance_mi: 0.0, duration_h: 0.0 };

    /// Marker for an unreachable pair.  Any night containing it exceeds every
    /// finite hour budget.
    pub const UNREACHABLE: DistanceTime = DistanceTime {
        distance_mi: f64::INFINITY,
        duration_h:  f64::INFINITY,
    };

    #[inline]
    pub fn new(distance_mi: f64, duration_h: f64) -> Self {
        Self { distance_mi, duration_h }
    }

    /// Duration in seconds, for presentation.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.duration_h * 3_600.0
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.distance_mi.is_finite() && self.duration_h.is_finite()
    }
}

impl Add for DistanceTime {
    type Output = DistanceTime;
    #[inline]
    fn add(self, rhs: DistanceTime) -> DistanceTime {
        DistanceTime {
            distance_mi: self.distance_mi + rhs.distance_mi,
            duration_h:  self.duration_h + rhs.duration_h,
        }
    }
}

impl AddAssign for DistanceTime {
    #[inline]
    fn add_assign(&mut self, rhs: DistanceTime) {
        self.distance_mi += rhs.distance_mi;
        self.duration_h += rhs.duration_h;
    }
}

impl Mul<f64> for DistanceTime {
    type Output = DistanceTime;
    #[inline]
    fn mul(self, k: f64) -> DistanceTime {
        DistanceTime {
            distance_mi: self.distance_mi * k,
            duration_h:  self.duration_h * k,
        }
    }
}

impl Sum for DistanceTime {
    fn sum<I: Iterator<Item = DistanceTime>>(iter: I) -> DistanceTime {
        iter.fold(DistanceTime::ZERO, Add::add)
    }
}

impl std::fmt::Display for DistanceTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} mi / {:.3} h", self.distance_mi, self.duration_h)
    }
}
