use crate::game::ProducerZone;
use crate::probability::LogFactorials;
use crate::producer::ProducerId;
use crate::simulation::deck::DeckConfig;

pub const OPENING_HAND_SIZE: u32 = 7;

/// One distinguishable opening hand and the chance of being dealt it
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningHand {
    pub lands: u32,
    /// Specific producer copies in hand, ascending by id
    pub producers: ProducerZone,
    pub others: u32,
    pub probability: f64,
}

/// k-combinations of `0..n` in lexicographic order
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = ProducerZone;

    fn next(&mut self) -> Option<ProducerZone> {
        if self.done {
            return None;
        }

        if self.started {
            let k = self.indices.len();
            let mut i = k;
            loop {
                if i == 0 {
                    self.done = true;
                    return None;
                }
                i -= 1;
                if self.indices[i] < self.n - k + i {
                    break;
                }
            }
            self.indices[i] += 1;
            for j in i + 1..k {
                self.indices[j] = self.indices[j - 1] + 1;
            }
        }
        self.started = true;

        Some(self.indices.iter().map(|&i| i as ProducerId).collect())
    }
}

/// Lazily enumerate every opening hand by land count and producer subset.
///
/// A specific hand with `l` lands, a given set of producers and `o` other
/// cards can be dealt in `C(lands, l) * C(other, o)` ways out of
/// `C(library, 7)`, since each producer copy is a distinct card.
/// Hands that need more other cards than the deck holds are skipped.
pub fn starting_hands<'a>(
    config: &'a DeckConfig,
    lf: &'a LogFactorials,
) -> impl Iterator<Item = OpeningHand> + 'a {
    let hand_size = OPENING_HAND_SIZE as usize;
    let lands = config.lands as usize;
    let num_producers = config.producers.len();
    let other_pool = config.other_cards() as usize;
    debug_assert!(lf.max_n() >= config.library_size() as usize);
    let ln_hands = lf.ln_choose(config.library_size() as usize, hand_size);

    (0..=lands.min(hand_size)).flat_map(move |l| {
        (0..=num_producers.min(hand_size - l)).flat_map(move |p| {
            let others = hand_size - l - p;
            let probability = match (
                lf.ln_choose(lands, l),
                lf.ln_choose(other_pool, others),
                ln_hands,
            ) {
                (Some(ln_lands), Some(ln_others), Some(ln_total)) => {
                    Some((ln_lands + ln_others - ln_total).exp())
                }
                _ => None,
            };

            probability.into_iter().flat_map(move |probability| {
                Combinations::new(num_producers, p).map(move |producers| OpeningHand {
                    lands: l as u32,
                    producers,
                    others: others as u32,
                    probability,
                })
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::ManaProducer;

    fn rocks(n: usize) -> Vec<ManaProducer> {
        (0..n)
            .map(|i| ManaProducer::new(&format!("Rock {}", i), 2, 1, 0))
            .collect()
    }

    #[test]
    fn test_combinations() {
        let all: Vec<Vec<ProducerId>> = Combinations::new(4, 2).map(|c| c.to_vec()).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(Combinations::new(3, 0).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(7, 3).count(), 35);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(1, 36, rocks(7));
        let total: f64 = starting_hands(&config, &lf).map(|h| h.probability).sum();
        assert!((total - 1.0).abs() < 1e-9, "sum = {}", total);
    }

    #[test]
    fn test_hand_sizes() {
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(0, 36, rocks(3));
        for hand in starting_hands(&config, &lf) {
            assert_eq!(hand.lands + hand.producers.len() as u32 + hand.others, 7);
        }
    }

    #[test]
    fn test_no_producers_matches_hypergeometric() {
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(1, 36, vec![]);
        let hands: Vec<_> = starting_hands(&config, &lf).collect();
        assert_eq!(hands.len(), 8);
        for hand in &hands {
            assert!(hand.producers.is_empty());
            let expected = lf.hypergeometric_pmf(99, 36, 7, hand.lands as usize);
            assert!((hand.probability - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_lands() {
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(0, 0, vec![]);
        let hands: Vec<_> = starting_hands(&config, &lf).collect();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].others, 7);
        assert!((hands[0].probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_lands_hand_included() {
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(0, 36, vec![]);
        assert!(starting_hands(&config, &lf).any(|h| h.lands == 7));
    }

    #[test]
    fn test_infeasible_hands_skipped() {
        // 60 lands + 38 rocks leaves 2 other cards in a 100-card deck
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(0, 60, rocks(38));
        let hands: Vec<_> = starting_hands(&config, &lf).take(2000).collect();
        assert!(hands.iter().all(|h| h.others <= 2));
    }

    #[test]
    fn test_specific_producer_probability() {
        // Rock 0 plus 6 of the 97 other cards
        let lf = LogFactorials::new(100);
        let config = DeckConfig::new(0, 0, rocks(3));
        let hand = starting_hands(&config, &lf)
            .find(|h| h.producers.as_slice() == [0])
            .unwrap();
        let expected = (lf.ln_choose(97, 6).unwrap() - lf.ln_choose(100, 7).unwrap()).exp();
        assert!((hand.probability - expected).abs() < 1e-15);
        assert_eq!(hand.others, 6);
    }
}
