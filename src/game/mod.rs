pub mod draw;
pub mod play;
pub mod state;

pub use draw::{draw_outcomes, DrawnCard};
pub use play::{baseline_mana, play_turn};
pub use state::{Phase, ProducerZone, State};
