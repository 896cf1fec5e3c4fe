//! Horizon and brightness filtering.

use tracing::debug;

use crate::error::Result;
use crate::observer::{HorizontalCoordinate, ObserverFrame};
use crate::star::CatalogEntry;

/// Faintest magnitude shown unless configured otherwise.
pub const DEFAULT_MAGNITUDE_THRESHOLD: f64 = 4.0;

/// A catalog star that is above the horizon and bright enough to plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleStar {
    /// Catalog identifier of the source entry.
    pub id: u64,
    /// Degrees from north through east, `[0, 360)`.
    pub azimuth: f64,
    /// Degrees above the horizon, always `> 0`.
    pub altitude: f64,
    pub magnitude: f64,
}

/// The visibility rule: strictly above the horizon and no fainter than
/// `magnitude_threshold`.
///
/// An altitude of exactly zero is below the cutoff. No refraction margin is
/// applied.
pub fn is_visible(coord: &HorizontalCoordinate, magnitude: f64, magnitude_threshold: f64) -> bool {
    coord.altitude > 0.0 && magnitude <= magnitude_threshold
}

/// Select the entries visible from `frame`.
///
/// Entries fainter than the threshold are never transformed. Any transform
/// failure aborts the whole selection. Output order is not significant.
pub fn filter_visible(
    entries: &[CatalogEntry],
    frame: &ObserverFrame,
    magnitude_threshold: f64,
) -> Result<Vec<VisibleStar>> {
    let mut visible = Vec::new();
    let mut num_bright = 0usize;

    for entry in entries {
        let bright_enough = entry.magnitude <= magnitude_threshold;
        if !bright_enough {
            continue;
        }
        num_bright += 1;

        let coord = frame.transform(entry)?;
        if is_visible(&coord, entry.magnitude, magnitude_threshold) {
            visible.push(VisibleStar {
                id: entry.id,
                azimuth: coord.azimuth,
                altitude: coord.altitude,
                magnitude: entry.magnitude,
            });
        }
    }

    debug!(
        "{} of {} entries brighter than magnitude {:.1}, {} above the horizon",
        num_bright,
        entries.len(),
        magnitude_threshold,
        visible.len()
    );
    Ok(visible)
}
