use crate::game::{draw_outcomes, play_turn, State};
use crate::probability::LogFactorials;
use crate::simulation::deck::{ConfigError, DeckConfig};
use crate::simulation::hand::starting_hands;
use log::debug;
use serde::{Deserialize, Serialize};

/// Probability mass per (turn, mana) cell.
///
/// Row 0 is never written; turns start at 1. Mana above `max_mana` lands in
/// the last column, negative mana in the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveTable {
    max_turns: u32,
    max_mana: u32,
    cells: Vec<Vec<f64>>,
}

impl CurveTable {
    pub fn new(max_turns: u32, max_mana: u32) -> Self {
        CurveTable {
            max_turns,
            max_mana,
            cells: vec![vec![0.0; max_mana as usize + 1]; max_turns as usize + 1],
        }
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    fn bucket(&self, mana: i64) -> usize {
        mana.clamp(0, self.max_mana as i64) as usize
    }

    pub fn add(&mut self, turn: u32, mana: i64, probability: f64) {
        let bucket = self.bucket(mana);
        self.cells[turn as usize][bucket] += probability;
    }

    pub fn get(&self, turn: u32, mana: u32) -> f64 {
        self.cells[turn as usize][mana as usize]
    }

    pub fn row(&self, turn: u32) -> &[f64] {
        &self.cells[turn as usize]
    }

    pub fn row_sum(&self, turn: u32) -> f64 {
        self.row(turn).iter().sum()
    }

    /// Mean mana on `turn`, counting the last bucket at its face value
    pub fn expected_mana(&self, turn: u32) -> f64 {
        self.row(turn)
            .iter()
            .enumerate()
            .map(|(mana, p)| mana as f64 * p)
            .sum()
    }

    /// Chance of having at least `mana` available on `turn`
    pub fn probability_at_least(&self, turn: u32, mana: u32) -> f64 {
        self.row(turn).iter().skip(mana as usize).sum()
    }

    /// Add another table of the same shape cell by cell
    pub fn merge(&mut self, other: &CurveTable) {
        for (row, other_row) in self.cells.iter_mut().zip(&other.cells) {
            for (cell, value) in row.iter_mut().zip(other_row) {
                *cell += value;
            }
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for cell in self.cells.iter_mut().flatten() {
            *cell *= factor;
        }
    }

    /// Largest absolute cell difference between two tables
    pub fn max_abs_diff(&self, other: &CurveTable) -> f64 {
        self.cells
            .iter()
            .flatten()
            .zip(other.cells.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

/// Walk the draw tree under `root` depth-first, adding each play's path
/// probability into `table`. Returns the number of turns played.
fn accumulate_subtree(
    root: &State,
    probability: f64,
    config: &DeckConfig,
    table: &mut CurveTable,
) -> u64 {
    let mut stack: Vec<(State, f64)> = draw_outcomes(root)
        .into_iter()
        .map(|(state, p)| (state, probability * p))
        .collect();
    let mut visited = 0;

    while let Some((state, p)) = stack.pop() {
        debug_assert!(state.is_consistent(config.lands, config.producers.len()));
        visited += 1;
        let (state, mana) = play_turn(&state, &config.producers);
        table.add(state.turn, mana, p);

        if state.turn >= config.max_turns {
            continue;
        }
        for (child, q) in draw_outcomes(&state) {
            stack.push((child, p * q));
        }
    }

    visited
}

/// Exact mana distribution for every turn up to `config.max_turns`.
///
/// Every opening hand and every draw sequence after it is enumerated and
/// weighted by its probability.
pub fn calculate_curve(config: &DeckConfig) -> Result<CurveTable, ConfigError> {
    config.validate()?;

    let lf = LogFactorials::new(config.deck_size as usize);
    let mut table = CurveTable::new(config.max_turns, config.max_mana);
    let mut hands = 0;
    let mut visited = 0;

    for hand in starting_hands(config, &lf) {
        let opening = State::opening(config, &hand);
        visited += accumulate_subtree(&opening, hand.probability, config, &mut table);
        hands += 1;
    }

    debug!(
        "enumerated {} opening hands, {} turn nodes ({} lands, {} producers)",
        hands,
        visited,
        config.lands,
        config.producers.len()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::ManaProducer;

    #[test]
    fn test_table_shape() {
        let table = CurveTable::new(7, 5);
        assert_eq!(table.row(0).len(), 6);
        assert_eq!(table.row(7).len(), 6);
    }

    #[test]
    fn test_clamping() {
        let mut table = CurveTable::new(2, 3);
        table.add(1, 10, 0.25);
        table.add(1, 3, 0.25);
        table.add(1, -2, 0.5);
        assert_eq!(table.get(1, 3), 0.5);
        assert_eq!(table.get(1, 0), 0.5);
        assert_eq!(table.row_sum(1), 1.0);
    }

    #[test]
    fn test_expected_and_at_least() {
        let mut table = CurveTable::new(1, 3);
        table.add(1, 1, 0.5);
        table.add(1, 3, 0.5);
        assert!((table.expected_mana(1) - 2.0).abs() < 1e-12);
        assert!((table.probability_at_least(1, 2) - 0.5).abs() < 1e-12);
        assert!((table.probability_at_least(1, 0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_merge_and_scale() {
        let mut a = CurveTable::new(1, 2);
        let mut b = CurveTable::new(1, 2);
        a.add(1, 1, 1.0);
        b.add(1, 2, 1.0);
        a.merge(&b);
        a.scale(0.5);
        assert_eq!(a.row(1), &[0.0, 0.5, 0.5]);
        assert_eq!(a.max_abs_diff(&b), 0.5);
    }

    #[test]
    fn test_rows_sum_to_one() {
        let producers = vec![
            ManaProducer::new("Sol Ring", 1, 2, 0),
            ManaProducer::new("Orzhov Signet", 2, 2, 1),
        ];
        let config = DeckConfig::new(1, 36, producers).with_limits(4, 30);
        let table = calculate_curve(&config).unwrap();
        assert_eq!(table.row_sum(0), 0.0);
        for turn in 1..=4 {
            let sum = table.row_sum(turn);
            assert!((sum - 1.0).abs() < 1e-9, "turn {} sums to {}", turn, sum);
        }
    }

    #[test]
    fn test_first_turn_lands_only() {
        // Turn 1 has one land in play iff any of the first 8 cards is a land
        let config = DeckConfig::new(0, 36, vec![]).with_limits(1, 7);
        let table = calculate_curve(&config).unwrap();
        let lf = LogFactorials::new(100);
        let no_land = lf.hypergeometric_pmf(100, 36, 8, 0);

        assert!((table.get(1, 0) - no_land).abs() < 1e-12);
        assert!((table.get(1, 1) - (1.0 - no_land)).abs() < 1e-12);
        for mana in 2..=7 {
            assert_eq!(table.get(1, mana), 0.0);
        }
    }

    #[test]
    fn test_small_max_mana_keeps_all_mass() {
        let config = DeckConfig::new(1, 40, vec![]).with_limits(5, 2);
        let table = calculate_curve(&config).unwrap();
        for turn in 1..=5 {
            assert!((table.row_sum(turn) - 1.0).abs() < 1e-9);
        }
        // By turn 5 most games have more than 2 lands; all of it sits in the last bucket
        assert!(table.get(5, 2) > table.get(5, 1));
    }

    #[test]
    fn test_every_node_accounts_for_every_card() {
        let producers = vec![
            ManaProducer::new("Sol Ring", 1, 2, 0),
            ManaProducer::new("Mind Stone", 2, 1, 0),
            ManaProducer::new("Mind Stone", 2, 1, 0),
        ];
        let config = DeckConfig::new(1, 36, producers).with_limits(3, 7);
        let lf = LogFactorials::new(config.deck_size as usize);

        for hand in starting_hands(&config, &lf) {
            let mut stack = vec![State::opening(&config, &hand)];
            while let Some(state) = stack.pop() {
                assert!(state.is_consistent(36, 3));
                if state.turn >= config.max_turns {
                    continue;
                }
                for (drawn, _) in draw_outcomes(&state) {
                    assert!(drawn.is_consistent(36, 3));
                    let (played, _) = play_turn(&drawn, &config.producers);
                    stack.push(played);
                }
            }
        }
    }

    #[test]
    fn test_invalid_config_fails_before_simulating() {
        let config = DeckConfig::new(10, 95, vec![]);
        assert!(matches!(
            calculate_curve(&config),
            Err(ConfigError::TooManyCards { .. })
        ));
    }
}
