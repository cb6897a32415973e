use crate::producer::types::ManaProducer;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Producer not found: {0}")]
    ProducerNotFound(String),
    #[error("Invalid producer data: {0}")]
    InvalidProducer(String),
}

/// Catalog of known mana producers, keyed by lowercase name
pub struct ProducerCatalog {
    producers: HashMap<String, ManaProducer>,
}

impl ProducerCatalog {
    /// Load producers from a JSON file
    pub fn from_file(path: &str) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse a JSON array of producers
    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let entries: Vec<ManaProducer> = serde_json::from_str(content)?;

        let mut producers = HashMap::new();
        for producer in entries {
            let key = producer.name.to_lowercase();
            if key.trim().is_empty() {
                return Err(CatalogError::InvalidProducer(
                    "producer with empty name".to_string(),
                ));
            }
            if producers.contains_key(&key) {
                return Err(CatalogError::InvalidProducer(format!(
                    "duplicate producer: {}",
                    producer.name
                )));
            }
            producers.insert(key, producer);
        }

        Ok(ProducerCatalog { producers })
    }

    /// Look up a producer by name, ignoring case
    pub fn get(&self, name: &str) -> Result<ManaProducer, CatalogError> {
        self.producers
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::ProducerNotFound(name.to_string()))
    }

    /// Resolve a list of names into producers, preserving order and duplicates
    pub fn resolve(&self, names: &[String]) -> Result<Vec<ManaProducer>, CatalogError> {
        names.iter().map(|name| self.get(name)).collect()
    }

    /// All producers sorted by cost, then name
    pub fn producers(&self) -> Vec<&ManaProducer> {
        let mut all: Vec<_> = self.producers.values().collect();
        all.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.name.cmp(&b.name)));
        all
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}
