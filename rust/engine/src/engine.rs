use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::HandRanker;
use crate::player::{Player, Roster};
use crate::policy::{BotDecision, BotPolicy};
use crate::pot::{invest, split_pot};
use crate::rules::{hero_options, stage_bet_size, HeroAction, BIG_BLIND, SMALL_BLIND};
use crate::showdown::evaluate_winners;
use crate::table::{HeroOption, Stage, TableState, WinMethod, Winner};

/// Result of an accepted hero command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub action: HeroAction,
    /// Stage the table ended up in.
    pub stage: Stage,
    /// Log line describing the hero's move.
    pub message: String,
}

/// Drives the betting state machine of the table.
///
/// Bots answer through the [`BotPolicy`]; showdowns are scored with the
/// [`HandRanker`]. The engine holds no table state of its own.
///
/// # Examples
///
/// ```
/// use nebula_engine::deck::Deck;
/// use nebula_engine::engine::BettingEngine;
/// use nebula_engine::hand::StandardRanker;
/// use nebula_engine::player::{Player, Roster, SeatProfile};
/// use nebula_engine::policy::{BotDecision, BotPolicy};
/// use nebula_engine::rules::HeroAction;
/// use nebula_engine::table::{Stage, TableState};
///
/// struct AlwaysCall;
///
/// impl BotPolicy for AlwaysCall {
///     fn decide(&self, _table: &TableState, _bot: &Player) -> BotDecision {
///         BotDecision::Call
///     }
///     fn name(&self) -> &str {
///         "always-call"
///     }
/// }
///
/// let engine = BettingEngine::new(&AlwaysCall, &StandardRanker);
/// let roster = Roster::new(SeatProfile::new("hero", "Hero", "🂡", 10_000));
/// let mut table = engine
///     .start_new_hand(&TableState::empty(), &roster, Deck::new_with_seed(7))
///     .expect("fresh deck");
/// assert_eq!(table.pot, 75);
///
/// engine.apply_hero_action(&mut table, HeroAction::Call).expect("call");
/// assert_eq!(table.stage, Stage::Flop);
/// assert_eq!(table.board.len(), 3);
/// ```
pub struct BettingEngine<'a> {
    policy: &'a dyn BotPolicy,
    ranker: &'a dyn HandRanker,
}

impl<'a> BettingEngine<'a> {
    pub fn new(policy: &'a dyn BotPolicy, ranker: &'a dyn HandRanker) -> Self {
        Self { policy, ranker }
    }

    /// Deals a new hand from `deck`, carrying stacks over from `previous` by player id.
    pub fn start_new_hand(
        &self,
        previous: &TableState,
        roster: &Roster,
        mut deck: Deck,
    ) -> Result<TableState, GameError> {
        let mut table = TableState::empty();
        table.stage = Stage::Preflop;
        table.log.clear();

        for (seat, (profile, is_hero)) in roster.seats().enumerate() {
            let stack = previous
                .player(&profile.id)
                .map(|p| p.stack)
                .unwrap_or(profile.stack);
            let hand = [deck.draw()?, deck.draw()?];
            table
                .players
                .push(Player::seat(profile, seat, stack, is_hero, hand));
        }
        table.deck = deck;

        post_blinds(&mut table);

        table.hero_options = hero_options(Stage::Preflop);
        table
            .log
            .push(format!("New hand started. Blinds are {SMALL_BLIND}/{BIG_BLIND} chips."));
        Ok(table)
    }

    /// Applies one hero command and everything it sets off: bot responses, street
    /// advancement and, on the last street, the showdown.
    ///
    /// The table is only replaced when the whole command succeeds; on any error it
    /// is left exactly as it was.
    pub fn apply_hero_action(
        &self,
        table: &mut TableState,
        action: HeroAction,
    ) -> Result<ActionOutcome, GameError> {
        if table.stage == Stage::Idle {
            return Err(GameError::TableIdle);
        }
        let hero_idx = match table.hero_index() {
            Some(idx) if !table.players[idx].folded => idx,
            _ => return Err(GameError::InactiveHero),
        };
        if table.stage == Stage::Showdown {
            return Err(GameError::HandComplete);
        }

        let mut next = table.clone();
        let message = match action {
            HeroAction::Fold => self.perform_fold(&mut next, hero_idx),
            HeroAction::Call => self.perform_call(&mut next, hero_idx)?,
            HeroAction::Raise => self.perform_raise(&mut next, hero_idx)?,
            HeroAction::Check => self.perform_check(&mut next, hero_idx)?,
            HeroAction::Bet => self.perform_bet(&mut next, hero_idx)?,
        };
        next.last_action = Some(action);
        let stage = next.stage;
        *table = next;

        Ok(ActionOutcome {
            action,
            stage,
            message,
        })
    }

    fn perform_fold(&self, table: &mut TableState, hero_idx: usize) -> String {
        let hero = &mut table.players[hero_idx];
        hero.folded = true;
        hero.status = "Folds".into();
        let line = format!("{} folds.", hero.name);
        table.log.push(&line);
        settle_on_fold(table);
        line
    }

    fn perform_call(&self, table: &mut TableState, hero_idx: usize) -> Result<String, GameError> {
        let required = table.current_bet.saturating_sub(table.players[hero_idx].bet);
        if required == 0 {
            return self.perform_check(table, hero_idx);
        }
        let target = table.current_bet;
        let hero = &mut table.players[hero_idx];
        invest(hero, required, &mut table.pot);
        hero.bet = target;
        hero.status = format!("Calls {target}");
        let line = format!("{} calls {target}.", hero.name);
        table.log.push(&line);
        self.respond_and_advance(table, Some(target))?;
        Ok(line)
    }

    fn perform_raise(&self, table: &mut TableState, hero_idx: usize) -> Result<String, GameError> {
        let target = table.current_bet.saturating_add(table.min_raise);
        let hero = &mut table.players[hero_idx];
        let required = target.saturating_sub(hero.bet);
        invest(hero, required, &mut table.pot);
        hero.bet = target;
        hero.status = format!("Raises to {target}");
        let line = format!("{} raises to {target}.", hero.name);
        table.current_bet = target;
        table.min_raise = table.min_raise.saturating_mul(2);
        table.log.push(&line);
        self.respond_and_advance(table, Some(target))?;
        Ok(line)
    }

    fn perform_check(&self, table: &mut TableState, hero_idx: usize) -> Result<String, GameError> {
        let hero = &mut table.players[hero_idx];
        hero.status = "Checks".into();
        let line = format!("{} checks.", hero.name);
        table.log.push(&line);
        self.respond_and_advance(table, None)?;
        Ok(line)
    }

    fn perform_bet(&self, table: &mut TableState, hero_idx: usize) -> Result<String, GameError> {
        let size = stage_bet_size(table.stage);
        let hero = &mut table.players[hero_idx];
        invest(hero, size, &mut table.pot);
        hero.bet = hero.bet.saturating_add(size);
        hero.status = format!("Bets {size}");
        let line = format!("{} bets {size}.", hero.name);
        let target = hero.bet;
        table.current_bet = target;
        table.log.push(&line);
        self.respond_and_advance(table, Some(target))?;
        Ok(line)
    }

    fn respond_and_advance(
        &self,
        table: &mut TableState,
        target: Option<u32>,
    ) -> Result<(), GameError> {
        self.bots_respond(table, target);
        if table.active_players().count() == 1 {
            settle_on_fold(table);
            return Ok(());
        }
        self.advance_stage(table)
    }

    /// Lets every active bot answer the hero. `None` means a checking round with
    /// nothing to match.
    fn bots_respond(&self, table: &mut TableState, target: Option<u32>) {
        for idx in 0..table.players.len() {
            let (is_hero, folded) = {
                let p = &table.players[idx];
                (p.is_hero, p.folded)
            };
            if is_hero || folded {
                continue;
            }

            let decision = self.policy.decide(table, &table.players[idx]);
            let bot = &mut table.players[idx];
            if decision == BotDecision::Fold {
                bot.folded = true;
                bot.status = "Folds".into();
                let line = format!("{} folds.", bot.name);
                table.log.push(line);
                continue;
            }

            let Some(target) = target else {
                bot.status = "Checks".into();
                continue;
            };
            let required = target.saturating_sub(bot.bet);
            if required == 0 {
                bot.status = if target == 0 {
                    "Checks".into()
                } else {
                    format!("Calls {target}")
                };
                continue;
            }
            invest(bot, required, &mut table.pot);
            bot.bet = bot.bet.saturating_add(required);
            bot.status = format!("Calls {target}");
        }
    }

    fn advance_stage(&self, table: &mut TableState) -> Result<(), GameError> {
        table.reset_bets();
        match table.stage {
            Stage::Preflop => deal_street(table, Stage::Flop, 3, "Dealing the flop."),
            Stage::Flop => deal_street(table, Stage::Turn, 1, "Dealing the turn."),
            Stage::Turn => deal_street(table, Stage::River, 1, "Dealing the river."),
            Stage::River => self.reveal_showdown(table),
            Stage::Showdown => {
                table.hero_options = vec![HeroOption::NewHand];
                Ok(())
            }
            Stage::Idle => Ok(()),
        }
    }

    fn reveal_showdown(&self, table: &mut TableState) -> Result<(), GameError> {
        while table.board.len() < 5 {
            let card = table.deck.draw()?;
            table.board.push(card);
        }

        let results = evaluate_winners(self.ranker, &table.players, &table.board);
        if let Some(first) = results.first() {
            let split = split_pot(table.pot, results.len());
            let rank = first.hand.label.clone();
            let mut names = Vec::with_capacity(results.len());
            for entry in &results {
                let player = &mut table.players[entry.player_index];
                player.stack = player.stack.saturating_add(split.share);
                names.push(player.name.clone());
            }
            table.log.push(format!(
                "{} win {} chips with {}.",
                names.join(" & "),
                split.share,
                rank
            ));
            table.winner = Some(Winner {
                players: names,
                rank: Some(rank),
                method: WinMethod::Showdown,
                amount: split.share,
            });
        }

        table.pot = 0;
        table.stage = Stage::Showdown;
        table.hero_options = vec![HeroOption::NewHand];
        Ok(())
    }
}

fn post_blinds(table: &mut TableState) {
    for (seat, blind) in [(0, SMALL_BLIND), (1, BIG_BLIND)] {
        if let Some(player) = table.players.get_mut(seat) {
            invest(player, blind, &mut table.pot);
            player.bet = blind;
            player.status = format!("Posts {blind}");
        }
    }
    table.current_bet = BIG_BLIND;
    table.min_raise = BIG_BLIND;
}

fn deal_street(
    table: &mut TableState,
    next: Stage,
    count: usize,
    message: &str,
) -> Result<(), GameError> {
    table.deck.burn()?;
    for _ in 0..count {
        let card = table.deck.draw()?;
        table.board.push(card);
    }
    table.stage = next;
    table.min_raise = stage_bet_size(next);
    table.hero_options = hero_options(next);
    table.log.push(message);
    Ok(())
}

/// Awards the whole pot to the first remaining non-hero player, or to the hero
/// when nobody else is left, and closes the hand.
fn settle_on_fold(table: &mut TableState) {
    let winner_idx = table
        .players
        .iter()
        .position(|p| !p.folded && !p.is_hero)
        .or_else(|| table.players.iter().position(|p| !p.folded));

    if let Some(idx) = winner_idx {
        let pot = table.pot;
        let winner = &mut table.players[idx];
        winner.stack = winner.stack.saturating_add(pot);
        let name = winner.name.clone();
        table
            .log
            .push(format!("{name} wins {pot} chips by default."));
        table.winner = Some(Winner {
            players: vec![name],
            rank: None,
            method: WinMethod::Fold,
            amount: pot,
        });
    }
    table.pot = 0;
    table.stage = Stage::Showdown;
    table.hero_options = vec![HeroOption::NewHand];
}
