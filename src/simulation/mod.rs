pub mod deck;
pub mod engine;
pub mod hand;
pub mod report;
pub mod sampler;
pub mod sweep;

pub use deck::{parse_deck_file, ConfigError, DeckConfig, DeckFile};
pub use engine::{calculate_curve, CurveTable};
pub use hand::{starting_hands, OpeningHand, OPENING_HAND_SIZE};
pub use sampler::sample_curve;
pub use sweep::{sweep_lands, SweepPoint};
