//! Raw roadway elements handed to the planner by the ingest layer.

use crate::geo::{polyline_length_mi, GeoPoint};
use crate::{CoreError, CoreResult};

/// One raw roadway element with its centerline geometry.
///
/// Read-only to the planner.  Construct via [`RoadSegment::new`], which
/// enforces the invariants the planner relies on; the centerline is private
/// so it cannot drop below two points afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SegmentRecord"))]
pub struct RoadSegment {
    pub roadway_id:      String,
    /// Begin mile post, if the source carries one.
    pub bmp:             Option<f64>,
    /// End mile post, if the source carries one.
    pub emp:             Option<f64>,
    pub total_lanes:     u32,
    pub speed_limit_mph: f64,
    pub oneway:          bool,
    /// Ordered centerline, at least two points.
    coords:              Vec<GeoPoint>,
}

impl RoadSegment {
    /// Validate and build a segment.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidSegment`] for an empty id, zero lanes, a
    /// non-positive or non-finite speed, or fewer than two coordinates.
    pub fn new(
        roadway_id:      impl Into<String>,
        total_lanes:     u32,
        speed_limit_mph: f64,
        oneway:          bool,
        coords:          Vec<GeoPoint>,
    ) -> CoreResult<Self> {
        let roadway_id = roadway_id.into();
        let invalid = |reason: String| CoreError::InvalidSegment {
            roadway_id: roadway_id.clone(),
            reason,
        };

        if roadway_id.trim().is_empty() {
            return Err(invalid("roadway id is empty".into()));
        }
        if total_lanes == 0 {
            return Err(invalid("total_lanes must be > 0".into()));
        }
        if !(speed_limit_mph.is_finite() && speed_limit_mph > 0.0) {
            return Err(invalid(format!("speed_limit must be > 0, got {speed_limit_mph}")));
        }
        if coords.len() < 2 {
            return Err(invalid(format!("need >= 2 coordinates, got {}", coords.len())));
        }

        Ok(Self {
            roadway_id,
            bmp: None,
            emp: None,
            total_lanes,
            speed_limit_mph,
            oneway,
            coords,
        })
    }

    /// Attach begin/end mile posts.
    pub fn with_mile_posts(mut self, bmp: Option<f64>, emp: Option<f64>) -> Self {
        self.bmp = bmp;
        self.emp = emp;
        self
    }

    /// Ordered centerline, at least two points.
    #[inline]
    pub fn coords(&self) -> &[GeoPoint] {
        &self.coords
    }

    #[inline]
    pub fn start(&self) -> GeoPoint {
        self.coords[0]
    }

    #[inline]
    pub fn end(&self) -> GeoPoint {
        self.coords[self.coords.len() - 1]
    }

    /// Centerline length in miles.
    pub fn length_mi(&self) -> f64 {
        polyline_length_mi(&self.coords)
    }
}

/// Unvalidated wire form; deserialization goes through [`RoadSegment::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SegmentRecord {
    roadway_id:      String,
    #[serde(default)]
    bmp:             Option<f64>,
    #[serde(default)]
    emp:             Option<f64>,
    total_lanes:     u32,
    speed_limit_mph: f64,
    oneway:          bool,
    coords:          Vec<GeoPoint>,
}

#[cfg(feature = "serde")]
impl TryFrom<SegmentRecord> for RoadSegment {
    type Error = CoreError;

    fn try_from(r: SegmentRecord) -> CoreResult<Self> {
        Ok(RoadSegment::new(r.roadway_id, r.total_lanes, r.speed_limit_mph, r.oneway, r.coords)?
            .with_mile_posts(r.bmp, r.emp))
    }
}
