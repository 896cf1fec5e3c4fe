//! Plain CSV star lists.
//!
//! One header row followed by `id,ra_deg,dec_deg,magnitude` records, with
//! optional `pm_ra_mas_yr,pm_dec_mas_yr` columns. Positions are taken to be
//! at epoch J2000.0. Lines starting with `#` are ignored.

use crate::error::{Result, SkyError};
use crate::star::{CatalogEntry, ProperMotion, J2000_EPOCH_YEAR};

fn parse_column<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    row: u64,
) -> Result<T> {
    let text = record
        .get(idx)
        .ok_or_else(|| SkyError::catalog(format!("row {row}: missing column {idx}")))?;
    text.parse()
        .map_err(|_| SkyError::catalog(format!("row {row}: cannot parse {text:?} in column {idx}")))
}

fn parse_record(record: &csv::StringRecord) -> Result<CatalogEntry> {
    let row = record.position().map(|p| p.line()).unwrap_or(0);
    let id: u64 = parse_column(record, 0, row)?;
    let ra_deg: f64 = parse_column(record, 1, row)?;
    let dec_deg: f64 = parse_column(record, 2, row)?;
    let magnitude: f64 = parse_column(record, 3, row)?;

    let mut entry = CatalogEntry::from_degrees(id, ra_deg, dec_deg, magnitude);
    match record.len() {
        4 => {}
        6 => {
            entry = entry.with_proper_motion(ProperMotion {
                pm_ra_mas_yr: parse_column(record, 4, row)?,
                pm_dec_mas_yr: parse_column(record, 5, row)?,
                epoch_year: J2000_EPOCH_YEAR,
            });
        }
        n => {
            return Err(SkyError::catalog(format!(
                "row {row}: expected 4 or 6 columns, found {n}"
            )))
        }
    }
    Ok(entry)
}

/// Load a CSV star list from an in-memory string.
pub fn load_csv_catalog(data: &str) -> Result<Vec<CatalogEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    rdr.records()
        .map(|result| {
            let record = result.map_err(|e| SkyError::catalog(format!("malformed CSV: {e}")))?;
            parse_record(&record)
        })
        .collect()
}
