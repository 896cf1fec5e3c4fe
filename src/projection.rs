//! Polar sky-chart projection.
//!
//! The chart puts the zenith at the center and the horizon on the rim. The
//! angle is the compass azimuth: zero at north, increasing clockwise, so the
//! polar axis runs opposite to the usual counter-clockwise convention.

use crate::error::{Result, SkyError};
use crate::visibility::VisibleStar;

/// Radius of the chart rim, i.e. the zenith distance of the horizon.
pub const HORIZON_RADIUS: f64 = 90.0;

/// A star placed on the polar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// Radians, zero at north, increasing clockwise.
    pub theta: f64,
    /// Zenith distance in degrees, `[0, 90]`.
    pub radius: f64,
    /// Marker area in square points, always `>= 1`.
    pub marker_size: f64,
}

/// Marker area for a star of the given magnitude.
///
/// Linear in magnitude, `20 * (5 - m)`, and never below 1 so faint stars stay
/// visible. Stars brighter than magnitude 0 are not capped.
pub fn marker_size(magnitude: f64) -> f64 {
    (20.0 * (5.0 - magnitude)).max(1.0)
}

/// Place a visible star on the chart.
///
/// Fails with [`SkyError::ProjectionError`] on non-finite values, altitudes
/// outside `[0, 90]` or azimuths outside `[0, 360)`.
pub fn project(star: &VisibleStar) -> Result<PlotPoint> {
    if !star.altitude.is_finite() || !(0.0..=90.0).contains(&star.altitude) {
        return Err(SkyError::projection(format!(
            "star {}: altitude {} outside [0, 90]",
            star.id, star.altitude
        )));
    }
    if !star.azimuth.is_finite() || !(0.0..360.0).contains(&star.azimuth) {
        return Err(SkyError::projection(format!(
            "star {}: azimuth {} outside [0, 360)",
            star.id, star.azimuth
        )));
    }
    if !star.magnitude.is_finite() {
        return Err(SkyError::projection(format!(
            "star {}: non-finite magnitude",
            star.id
        )));
    }

    Ok(PlotPoint {
        theta: star.azimuth.to_radians(),
        radius: HORIZON_RADIUS - star.altitude,
        marker_size: marker_size(star.magnitude),
    })
}

/// Project every star, failing on the first invalid one.
pub fn project_all(stars: &[VisibleStar]) -> Result<Vec<PlotPoint>> {
    stars.iter().map(project).collect()
}

impl PlotPoint {
    /// Cartesian position on a north-up chart with east to the right,
    /// in the same units as `radius`.
    pub fn to_xy(&self) -> (f64, f64) {
        let (sin_t, cos_t) = self.theta.sin_cos();
        (self.radius * sin_t, self.radius * cos_t)
    }
}
