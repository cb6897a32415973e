//! Monte-Carlo replay of the play policy on shuffled libraries.
//!
//! Used to cross-check the exact enumeration: the same transitions are
//! driven by physically shuffled decks instead of branch probabilities.

use crate::game::{play_turn, DrawnCard, ProducerZone, State};
use crate::producer::ProducerId;
use crate::rng::GameRng;
use crate::simulation::deck::{ConfigError, DeckConfig};
use crate::simulation::engine::CurveTable;
use crate::simulation::hand::{OpeningHand, OPENING_HAND_SIZE};
use log::debug;
use rayon::prelude::*;

/// Library contents before shuffling (commanders excluded)
pub fn build_library(config: &DeckConfig) -> Vec<DrawnCard> {
    let mut library = Vec::with_capacity(config.library_size() as usize);
    library.extend((0..config.lands).map(|_| DrawnCard::Land));
    library.extend((0..config.producers.len()).map(|id| DrawnCard::Producer(id as ProducerId)));
    library.extend((0..config.other_cards()).map(|_| DrawnCard::Other));
    library
}

/// Opening hand from the top seven cards. Producers are held in id order,
/// the same order the exact enumeration uses.
fn deal_opening_hand(cards: &[DrawnCard]) -> OpeningHand {
    let mut lands = 0;
    let mut others = 0;
    let mut producers = ProducerZone::new();
    for card in cards {
        match card {
            DrawnCard::Land => lands += 1,
            DrawnCard::Producer(id) => producers.push(*id),
            DrawnCard::Other => others += 1,
        }
    }
    producers.sort_unstable();
    OpeningHand {
        lands,
        producers,
        others,
        probability: 1.0,
    }
}

/// Play one shuffled game and return the reported mana for turns 1..=max_turns
pub fn sample_game(config: &DeckConfig, rng: &mut GameRng) -> Vec<i64> {
    let mut library = build_library(config);
    rng.shuffle(&mut library);

    let hand_size = OPENING_HAND_SIZE as usize;
    let hand = deal_opening_hand(&library[..hand_size]);
    let mut state = State::opening(config, &hand);

    let mut mana_by_turn = Vec::with_capacity(config.max_turns as usize);
    for card in library[hand_size..].iter().take(config.max_turns as usize) {
        let drawn = state.after_draw(*card);
        let (played, mana) = play_turn(&drawn, &config.producers);
        mana_by_turn.push(mana);
        state = played;
    }
    mana_by_turn
}

/// Estimate the curve table from `num_games` shuffled games.
///
/// Games run in parallel, each on its own stream derived from `seed`, so the
/// estimate is reproducible for a given seed.
pub fn sample_curve(
    config: &DeckConfig,
    num_games: usize,
    seed: u64,
) -> Result<CurveTable, ConfigError> {
    config.validate()?;
    if num_games == 0 {
        return Err(ConfigError::InvalidLimit(
            "number of games must be at least 1".to_string(),
        ));
    }

    let empty = || CurveTable::new(config.max_turns, config.max_mana);
    let mut table = (0..num_games)
        .into_par_iter()
        .fold(empty, |mut table, i| {
            let mut rng = GameRng::for_game(seed, i as u64);
            for (turn, mana) in sample_game(config, &mut rng).into_iter().enumerate() {
                table.add(turn as u32 + 1, mana, 1.0);
            }
            table
        })
        .reduce(empty, |mut a, b| {
            a.merge(&b);
            a
        });
    table.scale(1.0 / num_games as f64);

    debug!("sampled {} games with seed {}", num_games, seed);
    Ok(table)
}
