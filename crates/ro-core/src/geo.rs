//! Geographic coordinate type and spherical-geometry utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.
//!
//! All distances are in **miles**.

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MI: f64 = 3_958.761_3;

/// Miles per degree of latitude (and of longitude at the equator).
pub const MILES_PER_DEGREE: f64 = 69.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in miles.
    pub fn distance_mi(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();

        let h = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        2.0 * EARTH_RADIUS_MI * h.sqrt().asin()
    }

    /// Initial bearing from `self` towards `other`, in degrees `[0, 360)`.
    ///
    /// 0 = north, 90 = east.  Coincident points yield 0.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

        normalize_deg(y.atan2(x).to_degrees())
    }

    /// Bit-exact key for hashing.  `-0.0` and `0.0` map to different keys.
    #[inline]
    pub fn key(self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Length of a polyline: the sum of great-circle distances between
/// consecutive points.  Fewer than two points yield `0.0`.
pub fn polyline_length_mi(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| w[0].distance_mi(w[1])).sum()
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lat/lon rectangle.  Used to clip the drivable road graph to
/// the area a solve can actually visit.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub south: f64,
    pub west:  f64,
    pub north: f64,
    pub east:  f64,
}

impl BoundingBox {
    /// Smallest box covering every point, or `None` for an empty iterator.
    pub fn covering<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox {
            south: first.lat,
            west:  first.lon,
            north: first.lat,
            east:  first.lon,
        };
        for p in iter {
            bbox.south = bbox.south.min(p.lat);
            bbox.north = bbox.north.max(p.lat);
            bbox.west  = bbox.west.min(p.lon);
            bbox.east  = bbox.east.max(p.lon);
        }
        Some(bbox)
    }

    /// Grow the box by `miles` on every side.
    ///
    /// Latitude pads by `miles / 69`; longitude pads by the same amount
    /// divided by the cosine of `ref_lat` (floored so the poles do not blow
    /// up).  Callers pass the mean latitude of the points the box was built
    /// from, which need not be the box's middle.
    pub fn expand_miles(self, miles: f64, ref_lat: f64) -> Self {
        let d_lat = miles / MILES_PER_DEGREE;
        let d_lon = miles / (MILES_PER_DEGREE * ref_lat.to_radians().cos().abs().max(1e-6));
        BoundingBox {
            south: self.south - d_lat,
            west:  self.west - d_lon,
            north: self.north + d_lat,
            east:  self.east + d_lon,
        }
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lon >= self.west && p.lon <= self.east
    }
}
