use crate::player::Player;
use crate::table::TableState;

/// What a bot does when the hero's action comes round to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotDecision {
    Check,
    /// Match the table's current bet.
    Call,
    Fold,
}

/// Decision-making seam for the non-hero seats.
///
/// The engine asks the policy once per active bot after every hero action and
/// applies the answer. `Check` and `Call` both end up matching whatever target
/// the hero set; only `Fold` changes the shape of the hand.
pub trait BotPolicy: Send + Sync {
    fn decide(&self, table: &TableState, bot: &Player) -> BotDecision;

    fn name(&self) -> &str;
}
