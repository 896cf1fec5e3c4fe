//! Star catalog sources.
//!
//! A [`CatalogSource`] hands the pipeline the full list of [`CatalogEntry`]
//! records, wherever they come from: memory, a local file, or an HTTP
//! endpoint. Sources make no ordering guarantee and the pipeline never
//! mutates what they return.

pub mod csv_catalog;
pub mod hipparcos;

use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Result, SkyError};
use crate::star::CatalogEntry;

/// The 1997 Hipparcos main catalog as served by CDS.
pub const HIPPARCOS_MAIN_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

/// Anything that can supply a star catalog.
pub trait CatalogSource {
    /// Load every catalog entry.
    ///
    /// Fails with [`SkyError::CatalogUnavailable`] when the data cannot be
    /// fetched or contains a malformed record.
    fn load(&self) -> Result<Vec<CatalogEntry>>;
}

/// On-disk / on-the-wire layout of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `hip_main.dat`, the ESA 1997 Hipparcos release.
    HipparcosMain,
    /// `hip2.dat`, the 2007 Hipparcos new reduction.
    Hipparcos2,
    /// Header + `id,ra_deg,dec_deg,magnitude[,pm_ra,pm_dec]` rows.
    Csv,
}

impl CatalogFormat {
    /// Parse catalog text in this format.
    pub fn parse(self, data: &str) -> Result<Vec<CatalogEntry>> {
        match self {
            CatalogFormat::HipparcosMain => hipparcos::load_hip_main_catalog(data),
            CatalogFormat::Hipparcos2 => Ok(hipparcos::load_hip2_catalog(data)?
                .iter()
                .map(|star| star.to_entry())
                .collect()),
            CatalogFormat::Csv => csv_catalog::load_csv_catalog(data),
        }
    }
}

impl std::str::FromStr for CatalogFormat {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hip_main" | "hipparcos" => Ok(CatalogFormat::HipparcosMain),
            "hip2" => Ok(CatalogFormat::Hipparcos2),
            "csv" => Ok(CatalogFormat::Csv),
            other => Err(SkyError::catalog(format!("unknown catalog format {other:?}"))),
        }
    }
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    entries: Vec<CatalogEntry>,
}

impl MemoryCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl CatalogSource for MemoryCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.entries.clone())
    }
}

/// A catalog read from a local file on every load.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    pub path: PathBuf,
    pub format: CatalogFormat,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>, format: CatalogFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        info!("Loading {:?} catalog from {}", self.format, self.path.display());
        let data = std::fs::read_to_string(&self.path)
            .map_err(|e| SkyError::catalog(format!("{}: {e}", self.path.display())))?;
        let entries = self.format.parse(&data)?;
        info!("Loaded {} catalog entries", entries.len());
        Ok(entries)
    }
}

/// A catalog fetched over HTTP on every load.
#[derive(Debug, Clone)]
pub struct UrlCatalog {
    pub url: String,
    pub format: CatalogFormat,
}

impl UrlCatalog {
    pub fn new(url: impl Into<String>, format: CatalogFormat) -> Self {
        Self {
            url: url.into(),
            format,
        }
    }

    /// The Hipparcos main catalog from CDS.
    pub fn hipparcos() -> Self {
        Self::new(HIPPARCOS_MAIN_URL, CatalogFormat::HipparcosMain)
    }
}

impl CatalogSource for UrlCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        info!("Downloading {:?} catalog from {}", self.format, self.url);
        let resp = ureq::get(&self.url)
            .call()
            .map_err(|e| SkyError::catalog(format!("{}: {e}", self.url)))?;

        // The full Hipparcos catalog is larger than the default body limit,
        // so read it through the unbounded reader.
        let mut data = String::new();
        resp.into_body()
            .into_reader()
            .read_to_string(&mut data)
            .map_err(|e| SkyError::catalog(format!("{}: {e}", self.url)))?;
        debug!("Downloaded {} bytes", data.len());

        let entries = self.format.parse(&data)?;
        info!("Loaded {} catalog entries", entries.len());
        Ok(entries)
    }
}
