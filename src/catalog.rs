//! Read-only place catalog: resolves candidate ids to display data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Display data for a place. The engine only ever reads `name` (for tie-breaks).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlaceView {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PlaceView {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Placeholder for ids the catalog does not know: the id doubles as the name.
    pub fn unknown(id: &str) -> Self {
        Self::new(id, id)
    }
}

/// Lookup of places by id.
pub trait PlaceCatalog: Send + Sync {
    fn resolve(&self, id: &str) -> Option<PlaceView>;

    /// Name used for display and tie-breaking; falls back to the id itself.
    fn display_name(&self, id: &str) -> String {
        self.resolve(id).map(|p| p.name).unwrap_or_else(|| id.to_string())
    }
}

/// Errors loading a catalog.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Two rows share the same id.
    DuplicateId(String),
    /// A row has an empty id or name.
    MissingField { row: usize, field: &'static str },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "Could not read catalog: {}", e),
            CatalogError::Csv(e) => write!(f, "Invalid catalog CSV: {}", e),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate place id in catalog: {}", id),
            CatalogError::MissingField { row, field } => {
                write!(f, "Catalog row {} is missing {}", row, field)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(e: csv::Error) -> Self {
        CatalogError::Csv(e)
    }
}

/// One CSV row: `id,name,category,address,tags` with `;`-separated tags.
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    tags: Option<String>,
}

impl PlaceRecord {
    fn into_view(self, row: usize) -> Result<PlaceView, CatalogError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(CatalogError::MissingField { row, field: "id" });
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::MissingField { row, field: "name" });
        }
        let tags = self
            .tags
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Ok(PlaceView {
            id,
            name,
            category: non_empty(self.category),
            address: non_empty(self.address),
            tags,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Catalog held in memory, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    places: HashMap<String, PlaceView>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_places(places: Vec<PlaceView>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for place in places {
            catalog.insert(place)?;
        }
        Ok(catalog)
    }

    /// Parse CSV with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut catalog = Self::new();
        for (idx, record) in rdr.deserialize::<PlaceRecord>().enumerate() {
            // header is row 1
            let place = record?.into_view(idx + 2)?;
            catalog.insert(place)?;
        }
        Ok(catalog)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn insert(&mut self, place: PlaceView) -> Result<(), CatalogError> {
        if self.places.contains_key(&place.id) {
            return Err(CatalogError::DuplicateId(place.id));
        }
        self.places.insert(place.id.clone(), place);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl PlaceCatalog for InMemoryCatalog {
    fn resolve(&self, id: &str) -> Option<PlaceView> {
        self.places.get(id).cloned()
    }
}
