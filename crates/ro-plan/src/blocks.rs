//! Directional service blocks derived from road segments.
//!
//! A two-way segment with `L` lanes becomes up to two blocks: direction `A`
//! (as digitised, first → last point) carrying `ceil(L/2)` passes and
//! direction `B` (reversed) carrying `floor(L/2)`.  A one-way segment becomes
//! a single `A` block carrying all `L` passes.  Directions left with zero
//! passes produce no block.

use std::fmt;

use ro_core::{normalize_deg, GeoPoint, LaneSplitStrategy, RoadSegment};

/// Travel direction of a block relative to the segment's digitised order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// First point → last point.
    A,
    /// Last point → first point.
    B,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::A => "A",
            Direction::B => "B",
        })
    }
}

/// One directional unit of required measurement travel.
///
/// Immutable once built; never split or merged.  `passes_required` is
/// always > 0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceBlock {
    pub roadway_id:           String,
    pub direction:            Direction,
    /// Initial bearing in degrees, `[0, 360)`.
    pub azimuth_deg:          f64,
    pub passes_required:      u32,
    pub speed_limit_mph:      f64,
    pub start:                GeoPoint,
    pub end:                  GeoPoint,
    /// Segment length × `passes_required`, in miles.
    pub service_distance_mi:  f64,
}

impl ServiceBlock {
    /// `"R1:A"`-style label used in logs and itineraries.
    pub fn label(&self) -> String {
        format!("{}:{}", self.roadway_id, self.direction)
    }
}

/// Lane counts for directions `(A, B)` under the balanced split.
#[inline]
pub fn split_lanes_balanced(total_lanes: u32) -> (u32, u32) {
    (total_lanes.div_ceil(2), total_lanes / 2)
}

/// Lane counts for directions `(A, B)` of `segment`.
pub fn split_lanes(segment: &RoadSegment, strategy: LaneSplitStrategy) -> (u32, u32) {
    if segment.oneway {
        return (segment.total_lanes, 0);
    }
    match strategy {
        LaneSplitStrategy::Balanced => split_lanes_balanced(segment.total_lanes),
    }
}

/// Blocks for one segment, `A` before `B`, zero-pass directions dropped.
pub fn blocks_for_segment(segment: &RoadSegment, strategy: LaneSplitStrategy) -> Vec<ServiceBlock> {
    let length_mi = segment.length_mi();
    let (start, end) = (segment.start(), segment.end());
    let azimuth_a = start.bearing_deg(end);
    let (lanes_a, lanes_b) = split_lanes(segment, strategy);

    let make = |direction, azimuth_deg, passes: u32, start, end| ServiceBlock {
        roadway_id: segment.roadway_id.clone(),
        direction,
        azimuth_deg,
        passes_required: passes,
        speed_limit_mph: segment.speed_limit_mph,
        start,
        end,
        service_distance_mi: length_mi * f64::from(passes),
    };

    let mut blocks = Vec::with_capacity(2);
    if lanes_a > 0 {
        blocks.push(make(Direction::A, azimuth_a, lanes_a, start, end));
    }
    if lanes_b > 0 {
        blocks.push(make(Direction::B, normalize_deg(azimuth_a + 180.0), lanes_b, end, start));
    }
    blocks
}

/// Derive every service block for `segments`, in segment order then `A`
/// before `B`.
pub fn build_service_blocks(segments: &[RoadSegment], strategy: LaneSplitStrategy) -> Vec<ServiceBlock> {
    segments
        .iter()
        .flat_map(|s| blocks_for_segment(s, strategy))
        .collect()
}
