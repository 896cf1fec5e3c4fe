//! Render the night sky over a city.
//!
//! Usage:
//! ```
//! cargo run --bin skymap -- --city Tokyo --time 2024-01-15T21:00:00+09:00
//! ```
//!
//! See --help for detailed options.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use nightsky::{
    find_city, generate_sky_map, CatalogFormat, CatalogSource, FileCatalog, ObservationContext,
    RenderConfig, SkyMapConfig, UrlCatalog, CITIES, DEFAULT_MAGNITUDE_THRESHOLD,
    HIPPARCOS_MAIN_URL,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the sky map renderer
#[derive(Parser, Debug)]
#[command(
    name = "skymap",
    about = "Plots the stars above the horizon for a city and time",
    long_about = None
)]
struct Args {
    /// Preset city name (see --list-cities)
    #[arg(short, long, default_value = "Seoul")]
    city: String,

    /// Observer latitude in degrees; overrides --city together with --lon
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Observation time (RFC 3339). Defaults to now, in UTC+09:00
    #[arg(short, long)]
    time: Option<String>,

    /// Catalog file path or http(s) URL
    #[arg(long, default_value = HIPPARCOS_MAIN_URL)]
    catalog: String,

    /// Catalog format: hip_main, hip2 or csv
    #[arg(long, default_value = "hip_main")]
    format: String,

    /// Faintest magnitude to plot
    #[arg(short, long, default_value_t = DEFAULT_MAGNITUDE_THRESHOLD)]
    magnitude: f64,

    /// Output PNG path
    #[arg(short, long, default_value = "skymap.png")]
    output: String,

    /// Image width and height in pixels
    #[arg(long, default_value_t = 800)]
    size: u32,

    /// List the preset cities and exit
    #[arg(long)]
    list_cities: bool,
}

fn observation_time(arg: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match arg {
        Some(text) => DateTime::parse_from_rfc3339(text)
            .with_context(|| format!("Invalid --time {text:?}, expected RFC 3339")),
        None => {
            let offset = FixedOffset::east_opt(9 * 3600).context("invalid UTC offset")?;
            Ok(Utc::now().with_timezone(&offset))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.list_cities {
        for city in CITIES {
            println!("{:<10} {:>9.4} {:>9.4}", city.name, city.latitude, city.longitude);
        }
        return Ok(());
    }

    let timestamp = observation_time(args.time.as_deref())?;
    let ctx = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => ObservationContext::new(lat, lon, timestamp),
        _ => match find_city(&args.city) {
            Some(city) => ObservationContext::new(city.latitude, city.longitude, timestamp)
                .with_name(city.name),
            None => bail!("Unknown city {:?}; try --list-cities", args.city),
        },
    };

    let format: CatalogFormat = args.format.parse()?;
    let source: Box<dyn CatalogSource> =
        if args.catalog.starts_with("http://") || args.catalog.starts_with("https://") {
            Box::new(UrlCatalog::new(&args.catalog, format))
        } else {
            Box::new(FileCatalog::new(&args.catalog, format))
        };

    let config = SkyMapConfig {
        magnitude_threshold: args.magnitude,
        render: RenderConfig {
            width: args.size,
            height: args.size,
            ..Default::default()
        },
    };

    let map = generate_sky_map(source.as_ref(), &ctx, &config)?;
    map.image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;
    info!("Saved {} stars to {}", map.stars.len(), args.output);

    println!("{}", map.caption);
    Ok(())
}
