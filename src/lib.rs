//! # nightsky
//!
//! Which stars are above the horizon right now, and where?
//!
//! Given an observer location and a timezone-aware instant, `nightsky` loads a
//! star catalog, converts every entry's fixed celestial coordinates into
//! observer-relative horizontal coordinates, keeps the stars that are above
//! the horizon and bright enough, and draws them on a polar sky chart.
//!
//! ## Pipeline
//!
//! 1. **Catalog**: a [`CatalogSource`] supplies [`CatalogEntry`] records
//!    (Hipparcos `hip_main.dat` / `hip2.dat`, or a plain CSV list), from
//!    memory, disk or HTTP
//! 2. **Observer frame**: an [`ObserverFrame`] resolves the instant to
//!    sidereal time and turns RA/Dec into azimuth/altitude
//! 3. **Visibility**: [`filter_visible`] keeps entries with altitude `> 0`
//!    and magnitude `<=` the threshold (default 4.0)
//! 4. **Projection**: [`project`] maps each [`VisibleStar`] to a polar
//!    [`PlotPoint`]: zenith at the center, horizon at the rim, north up,
//!    azimuth clockwise, marker area `max(20 * (5 - mag), 1)`
//! 5. **Render**: [`render`] draws the points on a dark chart and returns an
//!    [`image::RgbImage`]
//!
//! The whole pipeline is synchronous and re-run from scratch for every
//! selection; nothing is cached between runs.
//!
//! ## Example
//!
//! ```no_run
//! use chrono::{FixedOffset, TimeZone};
//! use nightsky::{find_city, generate_sky_map, ObservationContext, SkyMapConfig, UrlCatalog};
//!
//! let seoul = find_city("Seoul").unwrap();
//! let when = FixedOffset::east_opt(9 * 3600)
//!     .unwrap()
//!     .with_ymd_and_hms(2024, 1, 15, 21, 0, 0)
//!     .unwrap();
//! let ctx = ObservationContext::new(seoul.latitude, seoul.longitude, when).with_name(seoul.name);
//!
//! let map = generate_sky_map(&UrlCatalog::hipparcos(), &ctx, &SkyMapConfig::default()).unwrap();
//! println!("{}: {} stars", map.caption, map.stars.len());
//! map.image.save("seoul.png").unwrap();
//! ```

pub mod catalogs;
pub mod cities;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod star;
pub mod visibility;

pub use catalogs::{
    CatalogFormat, CatalogSource, FileCatalog, MemoryCatalog, UrlCatalog, HIPPARCOS_MAIN_URL,
};
pub use cities::{find_city, Location, CITIES};
pub use error::SkyError;
pub use observer::{HorizontalCoordinate, ObservationContext, ObserverFrame};
pub use pipeline::{caption, generate_sky_map, visible_stars, SkyMap, SkyMapConfig};
pub use projection::{marker_size, project, project_all, PlotPoint};
pub use render::{render, RenderConfig};
pub use star::{CatalogEntry, ProperMotion};
pub use visibility::{filter_visible, is_visible, VisibleStar, DEFAULT_MAGNITUDE_THRESHOLD};
