//! Integration tests: run the whole pipeline against a small bright-star
//! catalog and check the visibility, projection and rendering properties
//! end to end.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, FixedOffset, TimeZone};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use nightsky::{
    filter_visible, find_city, generate_sky_map, project, visible_stars, CatalogEntry,
    CatalogFormat, CatalogSource, FileCatalog, MemoryCatalog, ObservationContext, ObserverFrame,
    RenderConfig, SkyError, SkyMapConfig, UrlCatalog,
};

const BRIGHT_STARS: &str = "tests/data/bright_stars.csv";
const SIRIUS: u64 = 32349;
const CANOPUS: u64 = 30438;
const POLARIS: u64 = 11767;

fn bright_stars() -> FileCatalog {
    FileCatalog::new(BRIGHT_STARS, CatalogFormat::Csv)
}

/// Seoul on a winter evening.
fn seoul_evening() -> ObservationContext {
    let seoul = find_city("Seoul").expect("Seoul preset");
    let ts = kst(2024, 1, 15, 21, 0);
    ObservationContext::new(seoul.latitude, seoul.longitude, ts).with_name(seoul.name)
}

fn kst(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
}

fn small_config(magnitude_threshold: f64) -> SkyMapConfig {
    SkyMapConfig {
        magnitude_threshold,
        render: RenderConfig {
            width: 300,
            height: 300,
            margin: 10,
            ..Default::default()
        },
    }
}

#[test]
fn seoul_winter_evening() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let ctx = seoul_evening();
    let map = generate_sky_map(&bright_stars(), &ctx, &small_config(4.0))
        .expect("Failed to generate sky map");

    assert_eq!(map.caption, "Seoul sky at 2024-01-15 21:00");
    assert!(!map.stars.is_empty());
    assert_eq!(map.stars.len(), map.points.len());
    assert_eq!(map.image.dimensions(), (300, 300));

    for star in &map.stars {
        assert!(star.altitude > 0.0, "{star:?}");
        assert!(star.magnitude <= 4.0, "{star:?}");
    }

    let ids: HashSet<u64> = map.stars.iter().map(|s| s.id).collect();
    assert!(ids.contains(&SIRIUS), "Sirius should be up over Seoul");
    assert!(ids.contains(&POLARIS), "Polaris is always up over Seoul");
    // Canopus culminates just below the horizon at Seoul's latitude
    assert!(!ids.contains(&CANOPUS));

    // The brightest visible star gets the largest marker
    let (brightest_idx, brightest) = map
        .stars
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.magnitude.total_cmp(&b.1.magnitude))
        .unwrap();
    assert_eq!(brightest.id, SIRIUS);
    let max_size = map
        .points
        .iter()
        .map(|p| p.marker_size)
        .fold(f64::MIN, f64::max);
    assert_eq!(map.points[brightest_idx].marker_size, max_size);
}

#[test]
fn filter_agrees_with_transform_for_random_catalog() {
    let mut rng = StdRng::seed_from_u64(42);
    let entries: Vec<CatalogEntry> = (0..2000)
        .map(|id| {
            let ra = rng.random::<f64>() * 360.0;
            // uniform in sin(dec)
            let dec = (rng.random::<f64>() * 2.0 - 1.0).asin().to_degrees();
            let mag = rng.random::<f64>() * 9.0 - 1.5;
            CatalogEntry::from_degrees(id, ra, dec, mag)
        })
        .collect();

    for (lat, lon, ts) in [
        (37.5665, 126.9780, kst(2024, 1, 15, 21, 0)),
        (-33.87, 151.21, kst(2030, 7, 1, 3, 30)),
        (64.15, -21.94, kst(1999, 12, 31, 23, 59)),
        (0.0, 0.0, kst(2000, 1, 1, 12, 0)),
    ] {
        let frame = ObserverFrame::new(&ObservationContext::new(lat, lon, ts)).unwrap();
        for threshold in [0.0, 4.0, 6.5] {
            let visible = filter_visible(&entries, &frame, threshold).unwrap();
            let ids: HashSet<u64> = visible.iter().map(|s| s.id).collect();
            assert_eq!(ids.len(), visible.len());

            for entry in &entries {
                let alt = frame.transform(entry).unwrap().altitude;
                let expected = alt > 0.0 && entry.magnitude <= threshold;
                assert_eq!(ids.contains(&entry.id), expected, "entry {entry:?} alt {alt}");
            }

            for star in &visible {
                let point = project(star).unwrap();
                assert_eq!(point.radius, 90.0 - star.altitude);
                assert!((0.0..=90.0).contains(&point.radius));
                assert!(point.marker_size >= 1.0);
            }
        }
    }
}

#[test]
fn pipeline_is_deterministic() {
    let ctx = seoul_evening();
    let a = generate_sky_map(&bright_stars(), &ctx, &small_config(4.0)).unwrap();
    let b = generate_sky_map(&bright_stars(), &ctx, &small_config(4.0)).unwrap();
    assert_eq!(a.stars, b.stars);
    assert_eq!(a.points, b.points);
    assert_eq!(a.image.as_raw(), b.image.as_raw());
}

#[test]
fn stricter_threshold_is_a_subset() {
    let ctx = seoul_evening();
    let source = bright_stars();
    let bright: HashSet<u64> = visible_stars(&source, &ctx, 0.0)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    let all: HashSet<u64> = visible_stars(&source, &ctx, 4.0)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();

    assert!(bright.is_subset(&all));
    assert!(bright.len() < all.len());
}

#[test]
fn sky_changes_with_time() {
    let seoul = find_city("Seoul").unwrap();
    let source = bright_stars();
    let evening = ObservationContext::new(seoul.latitude, seoul.longitude, kst(2024, 1, 15, 21, 0));
    let morning = ObservationContext::new(seoul.latitude, seoul.longitude, kst(2024, 1, 16, 5, 0));

    let evening_ids: HashSet<u64> = visible_stars(&source, &evening, 4.0)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    let morning_ids: HashSet<u64> = visible_stars(&source, &morning, 4.0)
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();

    assert_ne!(evening_ids, morning_ids);
    // Circumpolar stars stay up all night
    assert!(evening_ids.contains(&POLARIS) && morning_ids.contains(&POLARIS));
}

#[test]
fn empty_catalog_renders_empty_chart() {
    let map = generate_sky_map(&MemoryCatalog::default(), &seoul_evening(), &small_config(4.0))
        .unwrap();
    assert!(map.stars.is_empty());
    assert!(map.points.is_empty());
    assert_eq!(map.image.dimensions(), (300, 300));
}

#[test]
fn failures_abort_the_run() {
    let ctx = seoul_evening();

    let missing = FileCatalog::new("tests/data/no_such_catalog.csv", CatalogFormat::Csv);
    let err = generate_sky_map(&missing, &ctx, &small_config(4.0)).unwrap_err();
    assert!(matches!(err, SkyError::CatalogUnavailable(_)));
    assert!(err.to_string().starts_with("cannot load star data"));

    let far_future = ObservationContext::new(ctx.latitude, ctx.longitude, kst(2500, 1, 1, 0, 0));
    let err = generate_sky_map(&bright_stars(), &far_future, &small_config(4.0)).unwrap_err();
    assert!(matches!(err, SkyError::TransformError(_)));
}

#[test]
fn catalog_is_reloaded_every_run() {
    struct CountingSource(std::cell::Cell<usize>);

    impl CatalogSource for CountingSource {
        fn load(&self) -> Result<Vec<CatalogEntry>, SkyError> {
            self.0.set(self.0.get() + 1);
            Ok(vec![CatalogEntry::from_degrees(1, 0.0, 89.0, 2.0)])
        }
    }

    let source = CountingSource(std::cell::Cell::new(0));
    let ctx = seoul_evening();
    for _ in 0..3 {
        let map = generate_sky_map(&source, &ctx, &small_config(4.0)).unwrap();
        assert_eq!(map.stars.len(), 1);
    }
    assert_eq!(source.0.get(), 3);
}

/// Full Hipparcos main catalog, from `data/hip_main.dat` when present and
/// from CDS otherwise.
fn full_hipparcos() -> MemoryCatalog {
    let local = Path::new("data/hip_main.dat");
    let entries = if local.exists() {
        FileCatalog::new(local, CatalogFormat::HipparcosMain).load()
    } else {
        UrlCatalog::hipparcos().load()
    };
    MemoryCatalog::new(entries.expect("Failed to load Hipparcos"))
}

#[test]
#[ignore]
fn seoul_from_full_hipparcos() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let source = full_hipparcos();
    let entries = source.load().unwrap();
    assert!(entries.len() > 117_000);
    assert!(entries.iter().any(|e| e.id == POLARIS));

    let map = generate_sky_map(&source, &seoul_evening(), &SkyMapConfig::default())
        .expect("Failed to generate sky map");
    println!("{}: {} stars", map.caption, map.stars.len());
    assert!(map.stars.len() > 50 && map.stars.len() < 600);
    assert!(map.stars.iter().any(|s| s.id == SIRIUS));
}
