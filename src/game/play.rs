use crate::game::state::{Phase, ProducerZone, State};
use crate::producer::ManaProducer;
use smallvec::SmallVec;

/// Mana the permanents already in play produce each turn
pub fn baseline_mana(state: &State, producers: &[ManaProducer]) -> i64 {
    let rocks: i64 = state
        .producers_in_play
        .iter()
        .map(|&id| producers[id as usize].net_payoff())
        .sum();
    state.lands_in_play as i64 + rocks
}

/// Pay for a producer out of `mana`, then activate it if the input cost
/// can still be covered.
fn cast_producer(mana: &mut i64, producer: &ManaProducer) {
    *mana -= producer.cost as i64;
    if *mana >= producer.input_cost as i64 {
        *mana += producer.net_payoff();
    }
}

/// Resolve the main phase with the greedy policy and report the turn's mana.
///
/// One land is played if the hand has one. Fast producers are then cast in
/// hand order whether or not they are affordable; the mana left at that
/// point is what gets reported. Remaining producers are cast in hand order
/// while their cost fits in the mana still available.
///
/// A state whose plays are already resolved comes back unchanged together
/// with the mana its permanents produce.
pub fn play_turn(state: &State, producers: &[ManaProducer]) -> (State, i64) {
    let mut mana = baseline_mana(state, producers);
    if state.phase == Phase::End {
        return (state.clone(), mana);
    }

    let mut next = state.clone();
    next.phase = Phase::End;

    if next.lands_in_hand > 0 {
        next.lands_in_hand -= 1;
        next.lands_in_play += 1;
        mana += 1;
    }

    // Positions in hand, in the order they were cast
    let mut cast: SmallVec<[usize; 8]> = SmallVec::new();

    for (pos, &id) in state.producers_in_hand.iter().enumerate() {
        let producer = &producers[id as usize];
        if producer.is_fast() {
            cast_producer(&mut mana, producer);
            cast.push(pos);
        }
    }

    let mana_on_turn = mana;

    for (pos, &id) in state.producers_in_hand.iter().enumerate() {
        if cast.contains(&pos) {
            continue;
        }
        let producer = &producers[id as usize];
        if producer.cost as i64 <= mana {
            cast_producer(&mut mana, producer);
            cast.push(pos);
        }
    }

    if !cast.is_empty() {
        next.producers_in_play
            .extend(cast.iter().map(|&pos| state.producers_in_hand[pos]));
        next.producers_in_hand = state
            .producers_in_hand
            .iter()
            .enumerate()
            .filter(|(pos, _)| !cast.contains(pos))
            .map(|(_, &id)| id)
            .collect::<ProducerZone>();
    }

    (next, mana_on_turn)
}
