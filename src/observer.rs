//! Observer-relative coordinates.
//!
//! An [`ObserverFrame`] binds a location and an instant and converts fixed
//! celestial coordinates (RA/Dec) into horizontal coordinates
//! (azimuth/altitude). Sidereal time and the spherical trigonometry come from
//! the `astro` crate (Meeus, *Astronomical Algorithms*). Catalog positions
//! are precessed from the J2000.0 equinox to the date of observation;
//! refraction, nutation and aberration are not applied.

use std::f64::consts::PI;

use astro::{
    angle::limit_to_two_PI,
    coords::az_frm_eq,
    precess::precess_eq_coords,
    time::{julian_day, mn_sidr, CalType, Date},
};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use tracing::debug;

use crate::error::{Result, SkyError};
use crate::star::CatalogEntry;

/// Earliest UTC year the sidereal time model is trusted for.
pub const MIN_SUPPORTED_YEAR: i32 = 1800;
/// Latest UTC year the sidereal time model is trusted for.
pub const MAX_SUPPORTED_YEAR: i32 = 2200;

// Sidereal days per solar day
const SIDEREAL_RATE: f64 = 1.00273790935;
const J2000_JD: f64 = 2451545.0;
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Where and when the sky is observed.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationContext {
    /// Geodetic latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// The observation instant, in the observer's own offset.
    pub timestamp: DateTime<FixedOffset>,
    /// Display name for captions, e.g. a city.
    pub name: Option<String>,
}

impl ObservationContext {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The display name, or the coordinates when unnamed.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("({:.4}, {:.4})", self.latitude, self.longitude),
        }
    }
}

/// Observer-relative position, both angles in degrees.
///
/// Azimuth is measured from north through east and lies in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoordinate {
    pub azimuth: f64,
    pub altitude: f64,
}

/// Celestial-to-horizontal transform for one location and instant.
///
/// Construction resolves the instant to sidereal time once; the frame is a
/// plain value afterwards and `transform` is a pure function of its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverFrame {
    lat_rad: f64,
    long_rad: f64,
    gmst_rad: f64,
    /// Julian day of the observation instant, for precession.
    jd: f64,
    /// Observation instant as a decimal (Julian) year, for proper motion.
    epoch_year: f64,
}

impl ObserverFrame {
    /// Bind a frame to an observation context.
    ///
    /// Fails with [`SkyError::TransformError`] for out-of-range coordinates or
    /// for instants outside [`MIN_SUPPORTED_YEAR`]..=[`MAX_SUPPORTED_YEAR`].
    pub fn new(ctx: &ObservationContext) -> Result<Self> {
        if !ctx.latitude.is_finite() || !(-90.0..=90.0).contains(&ctx.latitude) {
            return Err(SkyError::transform(format!(
                "latitude {} outside [-90, 90]",
                ctx.latitude
            )));
        }
        if !ctx.longitude.is_finite() || !(-180.0..=180.0).contains(&ctx.longitude) {
            return Err(SkyError::transform(format!(
                "longitude {} outside [-180, 180]",
                ctx.longitude
            )));
        }

        let utc = ctx.timestamp.with_timezone(&Utc);
        if !(MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&utc.year()) {
            return Err(SkyError::transform(format!(
                "{} is outside the supported years {MIN_SUPPORTED_YEAR}-{MAX_SUPPORTED_YEAR}",
                ctx.timestamp
            )));
        }

        let (jd, gmst_rad) = greenwich_mean_sidereal_time(&utc);
        let frame = Self {
            lat_rad: ctx.latitude.to_radians(),
            long_rad: ctx.longitude.to_radians(),
            gmst_rad,
            jd,
            epoch_year: 2000.0 + (jd - J2000_JD) / DAYS_PER_JULIAN_YEAR,
        };
        debug!(
            "Observer frame at lat {:.4}, lon {:.4}: JD {:.5}, GMST {:.4} h",
            ctx.latitude,
            ctx.longitude,
            jd,
            gmst_rad.to_degrees() / 15.0
        );
        Ok(frame)
    }

    /// Local mean sidereal time in radians, `[0, 2π)`.
    pub fn local_sidereal_time(&self) -> f64 {
        limit_to_two_PI(self.gmst_rad + self.long_rad)
    }

    /// Julian day of the observation instant.
    pub fn julian_day(&self) -> f64 {
        self.jd
    }

    /// Horizontal coordinates of a catalog entry as seen from this frame.
    ///
    /// The entry is moved along its proper motion to the observation epoch,
    /// then precessed from J2000.0 to the equinox of date.
    pub fn transform(&self, entry: &CatalogEntry) -> Result<HorizontalCoordinate> {
        let (ra, dec) = entry.position_at(self.epoch_year);
        if !ra.is_finite() || !dec.is_finite() {
            return Err(SkyError::transform(format!(
                "entry {} has non-finite coordinates",
                entry.id
            )));
        }
        let (ra, dec) = precess_eq_coords(ra, dec, J2000_JD, self.jd);

        // Local hour angle, longitude east-positive
        let hour_angle = self.gmst_rad + self.long_rad - ra;

        // Rounding can push the sine just past 1 for stars at the zenith
        let sin_alt = (self.lat_rad.sin() * dec.sin()
            + self.lat_rad.cos() * dec.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0);
        let altitude = sin_alt.asin().to_degrees();
        // Meeus measures azimuth westward from south
        let meeus_az = az_frm_eq(hour_angle, dec, self.lat_rad);
        let azimuth = wrap_degrees(limit_to_two_PI(meeus_az + PI).to_degrees());

        if !altitude.is_finite() || !azimuth.is_finite() {
            return Err(SkyError::transform(format!(
                "entry {} has no horizontal position",
                entry.id
            )));
        }
        Ok(HorizontalCoordinate { azimuth, altitude })
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
fn wrap_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Returns (Julian day of the instant, GMST in radians).
fn greenwich_mean_sidereal_time(utc: &DateTime<Utc>) -> (f64, f64) {
    let date = utc.date_naive();
    let midnight = Date {
        year: date.year() as i16,
        month: date.month() as u8,
        decimal_day: date.day() as f64,
        cal_type: CalType::Gregorian,
    };
    let jd0 = julian_day(&midnight);

    let seconds = utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 * 1e-9;
    let utc_hours = seconds / 3600.0;
    let gmst_hours = mn_sidr(jd0).to_degrees() / 15.0 + utc_hours * SIDEREAL_RATE;

    (
        jd0 + seconds / 86400.0,
        limit_to_two_PI((gmst_hours * 15.0).to_radians()),
    )
}
