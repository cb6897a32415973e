use crate::game::state::{Phase, State};
use crate::producer::ProducerId;

/// The kind of card taken from the top of the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawnCard {
    Land,
    Producer(ProducerId),
    Other,
}

impl State {
    /// Successor state after drawing `card` at the start of the next turn.
    ///
    /// The caller guarantees the card is actually in the library.
    pub fn after_draw(&self, card: DrawnCard) -> State {
        let mut next = self.clone();
        next.turn += 1;
        next.phase = Phase::Main;

        match card {
            DrawnCard::Land => {
                next.lands_in_library -= 1;
                next.lands_in_hand += 1;
            }
            DrawnCard::Producer(id) => {
                if let Some(pos) = next.producers_in_library.iter().position(|&p| p == id) {
                    next.producers_in_library.remove(pos);
                    next.producers_in_hand.push(id);
                }
            }
            DrawnCard::Other => {
                next.other_in_hand += 1;
            }
        }

        next
    }
}

/// Every distinct outcome of drawing one card, with its probability
/// conditioned on the current library.
///
/// Outcomes that cannot happen are left out, so the probabilities sum to 1.
/// An empty library has no outcomes and ends the branch.
pub fn draw_outcomes(state: &State) -> Vec<(State, f64)> {
    let library = state.cards_in_library();
    if library == 0 {
        return Vec::new();
    }
    let library = library as f64;

    let mut outcomes = Vec::with_capacity(state.producers_in_library.len() + 2);

    if state.lands_in_library > 0 {
        outcomes.push((
            state.after_draw(DrawnCard::Land),
            state.lands_in_library as f64 / library,
        ));
    }

    for &id in &state.producers_in_library {
        outcomes.push((state.after_draw(DrawnCard::Producer(id)), 1.0 / library));
    }

    let other = state.other_in_library();
    if other > 0 {
        outcomes.push((state.after_draw(DrawnCard::Other), other as f64 / library));
    }

    outcomes
}
