use crate::producer::{CatalogError, ManaProducer, ProducerCatalog, ProducerId};
use crate::simulation::hand::OPENING_HAND_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DECK_SIZE: u32 = 100;
pub const DEFAULT_MAX_TURNS: u32 = 7;
pub const DEFAULT_MAX_MANA: u32 = 7;
/// Hard cap on mana buckets per table row
pub const MANA_BUCKET_LIMIT: u64 = 4096;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("Deck has {cards} categorized cards but only {deck_size} slots")]
    TooManyCards { cards: u32, deck_size: u32 },
    #[error("Library of {library} cards cannot cover a {hand}-card hand plus {turns} draws")]
    LibraryTooSmall { library: u32, hand: u32, turns: u32 },
    #[error("Too many producers: {0}")]
    TooManyProducers(usize),
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}

/// Deck file as written on disk; producers are catalog names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckFile {
    #[serde(default)]
    pub commanders: u32,
    pub lands: u32,
    #[serde(default)]
    pub producers: Vec<String>,
    #[serde(default)]
    pub deck_size: Option<u32>,
    #[serde(default)]
    pub max_turns: Option<u32>,
    #[serde(default)]
    pub max_mana: Option<u32>,
}

impl DeckFile {
    pub fn resolve(&self, catalog: &ProducerCatalog) -> Result<DeckConfig, ConfigError> {
        let producers = catalog.resolve(&self.producers)?;
        Ok(DeckConfig::new(self.commanders, self.lands, producers)
            .with_deck_size(self.deck_size.unwrap_or(DEFAULT_DECK_SIZE))
            .with_limits(
                self.max_turns.unwrap_or(DEFAULT_MAX_TURNS),
                self.max_mana.unwrap_or(DEFAULT_MAX_MANA),
            ))
    }
}

/// Everything a curve computation needs: deck composition and table limits
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    pub deck_size: u32,
    pub commanders: u32,
    pub lands: u32,
    pub producers: Vec<ManaProducer>,
    /// Last turn recorded in the table
    pub max_turns: u32,
    /// Highest mana bucket; larger values are clamped into it
    pub max_mana: u32,
}

impl DeckConfig {
    pub fn new(commanders: u32, lands: u32, producers: Vec<ManaProducer>) -> Self {
        DeckConfig {
            deck_size: DEFAULT_DECK_SIZE,
            commanders,
            lands,
            producers,
            max_turns: DEFAULT_MAX_TURNS,
            max_mana: DEFAULT_MAX_MANA,
        }
    }

    pub fn with_limits(mut self, max_turns: u32, max_mana: u32) -> Self {
        self.max_turns = max_turns;
        self.max_mana = max_mana;
        self
    }

    pub fn with_deck_size(mut self, deck_size: u32) -> Self {
        self.deck_size = deck_size;
        self
    }

    /// Cards that start in the library (everything but commanders)
    pub fn library_size(&self) -> u32 {
        self.deck_size.saturating_sub(self.commanders)
    }

    /// Cards that are neither lands, producers nor commanders
    pub fn other_cards(&self) -> u32 {
        self.library_size()
            .saturating_sub(self.lands)
            .saturating_sub(self.producers.len() as u32)
    }

    /// Largest accepted `max_mana`: every card a land in play plus the full
    /// payoff of every producer, never more than `MANA_BUCKET_LIMIT`
    pub fn mana_ceiling(&self) -> u64 {
        let payoffs: u64 = self.producers.iter().map(|p| p.payoff as u64).sum();
        (self.deck_size as u64 + payoffs).min(MANA_BUCKET_LIMIT)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.producers.len() > ProducerId::MAX as usize {
            return Err(ConfigError::TooManyProducers(self.producers.len()));
        }

        let cards = self.commanders as u64 + self.lands as u64 + self.producers.len() as u64;
        if cards > self.deck_size as u64 {
            return Err(ConfigError::TooManyCards {
                cards: cards.min(u32::MAX as u64) as u32,
                deck_size: self.deck_size,
            });
        }

        if self.max_turns == 0 {
            return Err(ConfigError::InvalidLimit(
                "max turns must be at least 1".to_string(),
            ));
        }

        if self.max_mana as u64 > self.mana_ceiling() {
            return Err(ConfigError::InvalidLimit(format!(
                "max mana {} exceeds the limit of {} for this deck",
                self.max_mana,
                self.mana_ceiling()
            )));
        }

        let needed = OPENING_HAND_SIZE as u64 + self.max_turns as u64;
        if (self.library_size() as u64) < needed {
            return Err(ConfigError::LibraryTooSmall {
                library: self.library_size(),
                hand: OPENING_HAND_SIZE,
                turns: self.max_turns,
            });
        }

        Ok(())
    }
}

/// Read a JSON deck file and resolve its producers through the catalog
pub fn parse_deck_file(path: &str, catalog: &ProducerCatalog) -> Result<DeckConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let file: DeckFile = serde_json::from_str(&content)?;
    let config = file.resolve(catalog)?;
    config.validate()?;
    Ok(config)
}
