use crate::player::Player;

/// Moves up to `amount` chips from the player's stack into the pot.
///
/// The stack is clamped at zero: a short player commits what they have left and
/// nothing tracks the shortfall (no all-in flag, no side pots). Returns the chips
/// actually moved.
pub fn invest(player: &mut Player, amount: u32, pot: &mut u32) -> u32 {
    let chips = amount.min(player.stack);
    player.stack -= chips;
    *pot = pot.saturating_add(chips);
    chips
}

/// Even split of a pot between `winners` tied players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotSplit {
    /// Chips credited to each tied player.
    pub share: u32,
    /// Chips left over by the floor division. They are not paid to anyone.
    pub remainder: u32,
}

pub fn split_pot(pot: u32, winners: usize) -> PotSplit {
    if winners == 0 {
        return PotSplit {
            share: 0,
            remainder: pot,
        };
    }
    let n = u32::try_from(winners).unwrap_or(u32::MAX);
    PotSplit {
        share: pot / n,
        remainder: pot % n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::player::SeatProfile;

    fn player(stack: u32) -> Player {
        let profile = SeatProfile::new("p", "P", "", stack);
        Player::seat(
            &profile,
            0,
            stack,
            false,
            [
                Card::new(Rank::Two, Suit::Clubs),
                Card::new(Rank::Three, Suit::Clubs),
            ],
        )
    }

    #[test]
    fn invest_moves_requested_chips() {
        let mut p = player(1_000);
        let mut pot = 75;
        assert_eq!(invest(&mut p, 100, &mut pot), 100);
        assert_eq!(p.stack, 900);
        assert_eq!(pot, 175);
    }

    #[test]
    fn invest_clamps_to_remaining_stack() {
        let mut p = player(30);
        let mut pot = 0;
        assert_eq!(invest(&mut p, 50, &mut pot), 30);
        assert_eq!(p.stack, 0);
        assert_eq!(pot, 30);
    }

    #[test]
    fn split_drops_remainder() {
        assert_eq!(
            split_pot(301, 2),
            PotSplit {
                share: 150,
                remainder: 1
            }
        );
        assert_eq!(
            split_pot(300, 3),
            PotSplit {
                share: 100,
                remainder: 0
            }
        );
        assert_eq!(split_pot(50, 0).share, 0);
    }
}
