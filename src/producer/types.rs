use serde::{Deserialize, Serialize};

/// A mana producer: a card that costs mana to put into play and then
/// produces mana every turn it is activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaProducer {
    pub name: String,
    /// Mana spent to put the card into play
    pub cost: u32,
    /// Mana produced per activation
    pub payoff: u32,
    /// Mana consumed per activation
    #[serde(default)]
    pub input_cost: u32,
}

impl ManaProducer {
    pub fn new(name: &str, cost: u32, payoff: u32, input_cost: u32) -> Self {
        ManaProducer {
            name: name.to_string(),
            cost,
            payoff,
            input_cost,
        }
    }

    /// Mana gained each turn once the producer is in play
    pub fn net_payoff(&self) -> i64 {
        self.payoff as i64 - self.input_cost as i64
    }

    /// Pays for itself on the turn it comes down
    pub fn is_fast(&self) -> bool {
        self.payoff as u64 > self.cost as u64 + self.input_cost as u64
    }
}

/// Index of a producer within a deck's producer list.
///
/// Two copies of the same card get different ids, so every copy in the
/// library is its own draw branch.
pub type ProducerId = u16;
