use crate::producer::ProducerId;
use crate::simulation::deck::DeckConfig;
use crate::simulation::hand::OpeningHand;
use smallvec::SmallVec;

/// Producer ids in one zone, in the order the cards arrived there
pub type ProducerZone = SmallVec<[ProducerId; 8]>;

/// Where the turn stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A card was drawn, plays have not been made yet
    Main,
    /// Plays for this turn are resolved
    End,
}

/// Composition of deck, hand and battlefield at one node of the draw tree.
///
/// Transitions never modify a `State`; they return a new one. Each branch
/// owns its own zones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub deck_size: u32,
    pub commanders: u32,
    pub turn: u32,
    pub phase: Phase,

    pub lands_in_play: u32,
    pub lands_in_hand: u32,
    pub lands_in_library: u32,

    pub producers_in_play: ProducerZone,
    pub producers_in_hand: ProducerZone,
    pub producers_in_library: ProducerZone,

    pub other_in_hand: u32,
}

impl State {
    /// State after the opening hand is dealt, before the first draw
    pub fn opening(config: &DeckConfig, hand: &OpeningHand) -> Self {
        let producers_in_library = (0..config.producers.len())
            .map(|id| id as ProducerId)
            .filter(|id| !hand.producers.contains(id))
            .collect();

        State {
            deck_size: config.deck_size,
            commanders: config.commanders,
            turn: 0,
            phase: Phase::End,
            lands_in_play: 0,
            lands_in_hand: hand.lands,
            lands_in_library: config.lands - hand.lands,
            producers_in_play: ProducerZone::new(),
            producers_in_hand: hand.producers.clone(),
            producers_in_library,
            other_in_hand: hand.others,
        }
    }

    pub fn cards_in_hand(&self) -> u32 {
        self.lands_in_hand + self.producers_in_hand.len() as u32 + self.other_in_hand
    }

    pub fn cards_in_play(&self) -> u32 {
        self.lands_in_play + self.producers_in_play.len() as u32
    }

    /// Cards left to draw. Derived from everything outside the library.
    pub fn cards_in_library(&self) -> u32 {
        self.deck_size
            .saturating_sub(self.commanders)
            .saturating_sub(self.cards_in_play())
            .saturating_sub(self.cards_in_hand())
    }

    /// Cards in library that are neither lands nor producers
    pub fn other_in_library(&self) -> u32 {
        self.cards_in_library()
            .saturating_sub(self.lands_in_library)
            .saturating_sub(self.producers_in_library.len() as u32)
    }

    /// Every card of the deck is accounted for in exactly one zone
    pub fn is_consistent(&self, total_lands: u32, total_producers: usize) -> bool {
        let lands = self.lands_in_play + self.lands_in_hand + self.lands_in_library;
        let producers = self.producers_in_play.len()
            + self.producers_in_hand.len()
            + self.producers_in_library.len();
        let outside_library = self.commanders + self.cards_in_play() + self.cards_in_hand();
        let known_in_library = self.lands_in_library + self.producers_in_library.len() as u32;

        lands == total_lands
            && producers == total_producers
            && outside_library <= self.deck_size
            && known_in_library <= self.cards_in_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::ManaProducer;
    use smallvec::smallvec;

    fn config() -> DeckConfig {
        DeckConfig::new(
            1,
            36,
            vec![
                ManaProducer::new("Sol Ring", 1, 2, 0),
                ManaProducer::new("Arcane Signet", 2, 1, 0),
                ManaProducer::new("Mind Stone", 2, 1, 0),
            ],
        )
    }

    #[test]
    fn test_opening_state() {
        let config = config();
        let hand = OpeningHand {
            lands: 3,
            producers: smallvec![1],
            others: 3,
            probability: 0.1,
        };
        let state = State::opening(&config, &hand);

        assert_eq!(state.turn, 0);
        assert_eq!(state.phase, Phase::End);
        assert_eq!(state.lands_in_library, 33);
        assert_eq!(state.producers_in_library.as_slice(), &[0, 2]);
        assert_eq!(state.cards_in_hand(), 7);
        assert_eq!(state.cards_in_library(), 92);
        assert_eq!(state.other_in_library(), 92 - 33 - 2);
        assert!(state.is_consistent(36, 3));
    }

    #[test]
    fn test_library_count_tracks_play() {
        let config = config();
        let hand = OpeningHand {
            lands: 2,
            producers: smallvec![0, 2],
            others: 3,
            probability: 0.1,
        };
        let mut state = State::opening(&config, &hand);
        state.lands_in_hand -= 1;
        state.lands_in_play += 1;
        assert_eq!(state.cards_in_library(), 92);
        assert!(state.is_consistent(36, 3));

        state.lands_in_library += 1;
        assert!(!state.is_consistent(36, 3));
    }
}
