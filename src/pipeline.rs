//! One-shot sky map generation.
//!
//! Every run starts from scratch: load the catalog, bind an observer frame,
//! filter, project, render. Nothing is cached between runs and any stage
//! failure aborts the run without a partial map.

use chrono::{DateTime, FixedOffset};
use image::RgbImage;
use tracing::{error, info};

use crate::catalogs::CatalogSource;
use crate::error::Result;
use crate::observer::{ObservationContext, ObserverFrame};
use crate::projection::{project_all, PlotPoint};
use crate::render::{render, RenderConfig};
use crate::visibility::{filter_visible, VisibleStar, DEFAULT_MAGNITUDE_THRESHOLD};

/// Parameters for a sky map run.
#[derive(Debug, Clone)]
pub struct SkyMapConfig {
    /// Faintest magnitude to plot. Default 4.0.
    pub magnitude_threshold: f64,
    /// Chart appearance.
    pub render: RenderConfig,
}

impl Default for SkyMapConfig {
    fn default() -> Self {
        Self {
            magnitude_threshold: DEFAULT_MAGNITUDE_THRESHOLD,
            render: RenderConfig::default(),
        }
    }
}

/// Result of a sky map run.
#[derive(Debug, Clone)]
pub struct SkyMap {
    pub image: RgbImage,
    /// Human-readable caption, e.g. `"Seoul sky at 2024-01-15 21:00"`.
    pub caption: String,
    pub stars: Vec<VisibleStar>,
    pub points: Vec<PlotPoint>,
}

/// Caption for a map of `location` at `timestamp`, in the timestamp's own
/// offset.
pub fn caption(location: &str, timestamp: &DateTime<FixedOffset>) -> String {
    format!("{location} sky at {}", timestamp.format("%Y-%m-%d %H:%M"))
}

/// Compute the stars above the horizon for `ctx` without rendering.
pub fn visible_stars(
    source: &dyn CatalogSource,
    ctx: &ObservationContext,
    magnitude_threshold: f64,
) -> Result<Vec<VisibleStar>> {
    let entries = source.load()?;
    let frame = ObserverFrame::new(ctx)?;
    filter_visible(&entries, &frame, magnitude_threshold)
}

/// Run the full pipeline for one location and instant.
///
/// The caption names the context's display name, or its coordinates when it
/// has none.
pub fn generate_sky_map(
    source: &dyn CatalogSource,
    ctx: &ObservationContext,
    config: &SkyMapConfig,
) -> Result<SkyMap> {
    let location = ctx.label();
    let entries = source.load()?;
    info!("Catalog has {} entries", entries.len());

    let frame = ObserverFrame::new(ctx)?;
    let stars = filter_visible(&entries, &frame, config.magnitude_threshold)?;
    info!(
        "{} stars brighter than magnitude {:.1} above the horizon at {}",
        stars.len(),
        config.magnitude_threshold,
        location
    );

    let points = project_all(&stars).inspect_err(|e| error!("Projection failed: {e}"))?;
    let image = render(&points, &config.render)?;

    Ok(SkyMap {
        image,
        caption: caption(&location, &ctx.timestamp),
        stars,
        points,
    })
}
