/// A catalog star at its fixed celestial position.
///
/// RA and Dec are in radians at the catalog epoch. The magnitude is a
/// visual magnitude (lower is brighter); its exact band is catalog-dependent.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: u64,
    pub ra_rad: f64,
    pub dec_rad: f64,
    pub magnitude: f64,
    /// Proper motion, if the catalog provides it.
    pub proper_motion: Option<ProperMotion>,
}

/// Proper motion of a catalog entry and the epoch its position refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProperMotion {
    /// μα·cos(δ) in milliarcseconds per year.
    pub pm_ra_mas_yr: f64,
    /// μδ in milliarcseconds per year.
    pub pm_dec_mas_yr: f64,
    /// Epoch of the catalog position, as a decimal year (e.g. 1991.25).
    pub epoch_year: f64,
}

/// Hipparcos reference epoch (J1991.25).
pub const HIPPARCOS_EPOCH_YEAR: f64 = 1991.25;

/// Epoch J2000.0 as a decimal year.
pub const J2000_EPOCH_YEAR: f64 = 2000.0;

// Convert milliarcseconds/year to radians/year
const MAS_PER_YR_TO_RAD_PER_YR: f64 = std::f64::consts::PI / (180.0 * 3600.0 * 1000.0);

impl CatalogEntry {
    /// Entry without proper motion, with coordinates given in degrees.
    pub fn from_degrees(id: u64, ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            id,
            ra_rad: ra_deg.to_radians(),
            dec_rad: dec_deg.to_radians(),
            magnitude,
            proper_motion: None,
        }
    }

    /// Attach proper motion to this entry.
    pub fn with_proper_motion(mut self, proper_motion: ProperMotion) -> Self {
        self.proper_motion = Some(proper_motion);
        self
    }

    /// Position (ra, dec) in radians propagated to `year`.
    ///
    /// Entries without proper motion return their catalog position.
    /// Proper motion near the celestial poles (|dec| > ~87°) is ignored because
    /// the cos(dec) divisor becomes numerically unstable.
    pub fn position_at(&self, year: f64) -> (f64, f64) {
        let Some(pm) = self.proper_motion else {
            return (self.ra_rad, self.dec_rad);
        };

        let cos_dec = self.dec_rad.cos();
        if cos_dec.abs() <= 0.05 {
            return (self.ra_rad, self.dec_rad);
        }

        let dt_years = year - pm.epoch_year;
        // pm_ra is mu_alpha*cos(delta), so divide by cos(dec)
        let mu_ra = pm.pm_ra_mas_yr * MAS_PER_YR_TO_RAD_PER_YR / cos_dec;
        let mu_dec = pm.pm_dec_mas_yr * MAS_PER_YR_TO_RAD_PER_YR;

        (
            self.ra_rad + mu_ra * dt_years,
            self.dec_rad + mu_dec * dt_years,
        )
    }
}
