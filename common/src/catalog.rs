//! # Endpoint Catalog
//!
//! The fixed, ordered list of endpoints a batch run probes.
//!
//! Catalog order matters: it is the order results are reported in and the
//! order ties are broken in when picking the fastest and slowest endpoint.
//! A [`Catalog`] is built once at startup and handed around by reference.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CatalogError;
use crate::geo::Coordinates;

/// A named probe target with a known location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    /// Hostname or IP literal the probes are sent to.
    pub address: String,
    pub coordinates: Coordinates,
}

impl Endpoint {
    pub fn new(id: impl Into<String>, address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    endpoints: Vec<Endpoint>,
}

impl Catalog {
    /// Validates and wraps an ordered endpoint list.
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, CatalogError> {
        if endpoints.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(endpoints.len());
        for endpoint in &endpoints {
            if !seen.insert(endpoint.id.as_str()) {
                return Err(CatalogError::DuplicateId(endpoint.id.clone()));
            }
            if endpoint.address.trim().is_empty() {
                return Err(CatalogError::EmptyAddress(endpoint.id.clone()));
            }
        }

        Ok(Self { endpoints })
    }

    /// Loads a catalog from a JSON array of endpoints.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &[u8]) -> Result<Self, CatalogError> {
        let endpoints: Vec<Endpoint> = serde_json::from_slice(data)?;
        debug!("Parsed {} catalog entries", endpoints.len());
        Self::new(endpoints)
    }

    /// The 20 public AWS regions, probed through their EC2 API hostnames.
    pub fn aws_regions() -> Self {
        let endpoints = AWS_REGIONS
            .iter()
            .map(|&(region, lat, lon)| {
                Endpoint::new(
                    region,
                    format!("ec2.{region}.amazonaws.com"),
                    Coordinates::new(lat, lon),
                )
            })
            .collect();
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|endpoint| endpoint.id == id)
    }

    pub fn coordinates_of(&self, id: &str) -> Option<Coordinates> {
        self.get(id).map(|endpoint| endpoint.coordinates)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::aws_regions()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

const AWS_REGIONS: [(&str, f64, f64); 20] = [
    ("us-east-1", 39.833333, -98.585522),
    ("us-east-2", 39.833333, -75.5),
    ("us-west-1", 37.833333, -119.5),
    ("us-west-2", 45.5, -122.5),
    ("af-south-1", -30.0, 26.0),
    ("ap-east-1", 22.3193039, 114.1693611),
    ("ap-south-1", 19.0760, 72.8777),
    ("ap-northeast-1", 35.6895, 139.6917),
    ("ap-northeast-2", 37.5665, 126.9780),
    ("ap-northeast-3", 35.6895, 139.6917),
    ("ap-southeast-1", 1.3521, 103.8198),
    ("ap-southeast-2", -33.8688, 151.2093),
    ("ca-central-1", 45.4215, -75.6919),
    ("eu-central-1", 50.1109, 8.6821),
    ("eu-west-1", 51.5074, -0.1278),
    ("eu-west-2", 53.3498, -2.5879),
    ("eu-west-3", 48.8566, 2.3522),
    ("eu-north-1", 59.3293, 18.0686),
    ("me-south-1", 25.276987, 55.296249),
    ("sa-east-1", -23.5505, -46.6333),
];

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
