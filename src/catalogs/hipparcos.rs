//! Parsers for the two Hipparcos catalog releases.
//!
//! * `hip_main.dat`: the ESA 1997 release (CDS I/239), one
//!   `|`-delimited record per star with positions in degrees.
//!   <https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat>
//! * `hip2.dat`: the 2007 new reduction (CDS I/311), fixed-width records
//!   with positions in radians and Hp magnitudes.
//!   <http://cdsarc.u-strasbg.fr/ftp/I/311/hip2.dat.gz>
//!
//! Both releases reference positions to epoch J1991.25.

use crate::error::{Result, SkyError};
use crate::star::{CatalogEntry, ProperMotion, HIPPARCOS_EPOCH_YEAR};

/// A star from the Hipparcos new reduction (hip2.dat).
#[derive(Debug, Clone, PartialEq)]
pub struct HipparcosStar {
    pub hip: u32,
    pub ra_rad: f64,
    pub dec_rad: f64,
    pub pm_ra: f64,
    pub pm_dec: f64,
    pub hpmag: f32,
    pub b_v: f32,
}

impl HipparcosStar {
    /// Convert Hipparcos Hp magnitude and Johnson B−V colour
    /// to Johnson V using the standard 4th-order polynomial.
    ///
    /// Reference: ESA SP-1200, Volume 1, Table 1.3.5 (magnitude transformations).
    ///
    /// Valid for roughly -0.2 < (B−V) < 1.8.
    pub fn hp_to_v(&self) -> f32 {
        let b = self.b_v;
        let delta = 0.304 * b - 0.202 * b * b + 0.107 * b * b * b - 0.045 * b * b * b * b;
        self.hpmag - delta
    }

    pub fn to_entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.hip as u64,
            ra_rad: self.ra_rad,
            dec_rad: self.dec_rad,
            magnitude: self.hp_to_v() as f64,
            proper_motion: Some(ProperMotion {
                pm_ra_mas_yr: self.pm_ra,
                pm_dec_mas_yr: self.pm_dec,
                epoch_year: HIPPARCOS_EPOCH_YEAR,
            }),
        }
    }
}

fn field<T: std::str::FromStr>(
    record: &str,
    range: std::ops::Range<usize>,
    line: usize,
) -> Result<T> {
    let text = record
        .get(range.clone())
        .ok_or_else(|| SkyError::catalog(format!("line {line}: record truncated")))?
        .trim();
    text.parse().map_err(|_| {
        SkyError::catalog(format!(
            "line {line}: cannot parse {text:?} in columns {}..{}",
            range.start, range.end
        ))
    })
}

/// Parse a single hip2.dat record.
fn parse_hip2_record(record: &str, line: usize) -> Result<HipparcosStar> {
    if record.len() < 171 {
        return Err(SkyError::catalog(format!(
            "line {line}: expected at least 171 characters, found {}",
            record.len()
        )));
    }

    Ok(HipparcosStar {
        hip: field(record, 0..6, line)?,
        ra_rad: field(record, 15..28, line)?,
        dec_rad: field(record, 29..42, line)?,
        pm_ra: field(record, 51..59, line)?,
        pm_dec: field(record, 60..68, line)?,
        hpmag: field(record, 129..136, line)?,
        b_v: field(record, 152..158, line)?,
    })
}

/// Load the Hipparcos new reduction from an in-memory string.
pub fn load_hip2_catalog(data: &str) -> Result<Vec<HipparcosStar>> {
    data.lines()
        .enumerate()
        .filter(|(_, record)| !record.trim().is_empty())
        .map(|(idx, record)| parse_hip2_record(record, idx + 1))
        .collect()
}

// Field indices of the `|`-separated hip_main.dat record.
const MAIN_HIP: usize = 1;
const MAIN_VMAG: usize = 5;
const MAIN_RA_DEG: usize = 8;
const MAIN_DEC_DEG: usize = 9;
const MAIN_PM_RA: usize = 12;
const MAIN_PM_DEC: usize = 13;

fn optional_field(fields: &[&str], idx: usize, line: usize) -> Result<Option<f64>> {
    let text = fields[idx].trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| {
        SkyError::catalog(format!("line {line}: cannot parse {text:?} in field H{idx}"))
    })
}

/// Parse a single hip_main.dat record.
///
/// Returns `Ok(None)` for the handful of entries without astrometry or a
/// V magnitude; they cannot be placed on the sky.
fn parse_main_record(record: &str, line: usize) -> Result<Option<CatalogEntry>> {
    let fields: Vec<&str> = record.split('|').collect();
    if fields.len() <= MAIN_PM_DEC {
        return Err(SkyError::catalog(format!(
            "line {line}: expected at least {} fields, found {}",
            MAIN_PM_DEC + 1,
            fields.len()
        )));
    }

    let hip: u64 = fields[MAIN_HIP].trim().parse().map_err(|_| {
        SkyError::catalog(format!(
            "line {line}: invalid HIP number {:?}",
            fields[MAIN_HIP].trim()
        ))
    })?;

    let (Some(ra_deg), Some(dec_deg), Some(vmag)) = (
        optional_field(&fields, MAIN_RA_DEG, line)?,
        optional_field(&fields, MAIN_DEC_DEG, line)?,
        optional_field(&fields, MAIN_VMAG, line)?,
    ) else {
        return Ok(None);
    };

    let pm_ra = optional_field(&fields, MAIN_PM_RA, line)?;
    let pm_dec = optional_field(&fields, MAIN_PM_DEC, line)?;

    let mut entry = CatalogEntry::from_degrees(hip, ra_deg, dec_deg, vmag);
    if let (Some(pm_ra_mas_yr), Some(pm_dec_mas_yr)) = (pm_ra, pm_dec) {
        entry = entry.with_proper_motion(ProperMotion {
            pm_ra_mas_yr,
            pm_dec_mas_yr,
            epoch_year: HIPPARCOS_EPOCH_YEAR,
        });
    }
    Ok(Some(entry))
}

/// Load the 1997 Hipparcos main catalog from an in-memory string.
pub fn load_hip_main_catalog(data: &str) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    for (idx, record) in data.lines().enumerate() {
        if record.trim().is_empty() {
            continue;
        }
        if let Some(entry) = parse_main_record(record, idx + 1)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}
