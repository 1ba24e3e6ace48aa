use crate::board::Position;
use crate::game::Fanorona;
use crate::pieces::Colour;
use crate::rules;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One inbound operation of the game, as issued by a bot. A full round is
/// a sequence of actions: a selection, then one or more moves, with a
/// resolution wherever a destination captured both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Select(Position),
    Move(Position),
    Resolve(Position),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Select(pos) => write!(f, "select {}", pos),
            Action::Move(pos) => write!(f, "move to {}", pos),
            Action::Resolve(pos) => write!(f, "capture {}", pos),
        }
    }
}

/// Trait that all bots must implement. Bots consume the core's query
/// surface only; they never reach into the game state themselves.
pub trait Bot: Send {
    /// Get the name of the bot
    fn name(&self) -> &str;

    /// Pick the next action for the current position. The bot has a time
    /// limit to respond; `None` concedes.
    fn choose_action(&mut self, game: &Fanorona, time_limit: Duration) -> Option<Action>;

    /// Notified when the game starts
    fn game_start(&mut self, _colour: Colour) {}

    /// Notified when an action is applied (by either player)
    fn notify_action(&mut self, _action: Action) {}

    /// Notified when the game ends
    fn game_end(&mut self) {}
}

/// Picks uniformly among the currently-legal actions.
pub struct RandomBot {
    name: String,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(name: String) -> Self {
        RandomBot {
            name,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible games.
    pub fn with_seed(name: String, seed: u64) -> Self {
        RandomBot {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&mut self, game: &Fanorona, _time_limit: Duration) -> Option<Action> {
        if let Some(ambiguity) = game.ambiguity() {
            let choices: Vec<Position> = ambiguity
                .approach_victims
                .iter()
                .chain(ambiguity.withdrawal_victims.iter())
                .copied()
                .collect();
            return choices.choose(&mut self.rng).copied().map(Action::Resolve);
        }

        if game.selected().is_some() {
            let mut captures: Vec<Position> = game
                .approach_captures()
                .iter()
                .chain(game.withdrawal_captures().iter())
                .copied()
                .collect();
            captures.sort();
            captures.dedup();
            if let Some(&dest) = captures.choose(&mut self.rng) {
                return Some(Action::Move(dest));
            }
            return game
                .legal_targets()
                .choose(&mut self.rng)
                .copied()
                .map(Action::Move);
        }

        let eligible = game.capture_eligible();
        if !eligible.is_empty() {
            return eligible.choose(&mut self.rng).copied().map(Action::Select);
        }
        let movable: Vec<Position> = game
            .piece_set()
            .positions_of(game.turn())
            .filter(|&pos| {
                !rules::legal_targets(game.board(), game.piece_set(), pos, None).is_empty()
            })
            .collect();
        movable.choose(&mut self.rng).copied().map(Action::Select)
    }
}

/// Single-ply greedy bot: always plays the capture that removes the most
/// enemy pieces, falling back to a random paika when nothing captures.
pub struct GreedyBot {
    name: String,
    rng: StdRng,
}

impl GreedyBot {
    pub fn new(name: String) -> Self {
        GreedyBot {
            name,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible games.
    pub fn with_seed(name: String, seed: u64) -> Self {
        GreedyBot {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Longest capture available to the piece at `from`, over both
    /// mechanics and every adjacent target.
    fn best_capture_of_piece(game: &Fanorona, from: Position) -> usize {
        let board = game.board();
        let pieces = game.piece_set();
        rules::legal_targets(board, pieces, from, None)
            .into_iter()
            .map(|target| {
                let approach = rules::capture_by_approach(board, pieces, from, target)
                    .map(|run| run.len())
                    .unwrap_or(0);
                let withdrawal = rules::capture_by_withdrawal(board, pieces, from, target)
                    .map(|run| run.len())
                    .unwrap_or(0);
                approach.max(withdrawal)
            })
            .max()
            .unwrap_or(0)
    }

    /// Best destination among the selected piece's capture candidates;
    /// ties are broken randomly, as between equal approach and withdrawal
    /// counts.
    fn best_destination(&mut self, game: &Fanorona) -> Option<Position> {
        let mut best: Vec<Position> = Vec::new();
        let mut best_len = 0;
        let mut candidates: Vec<Position> = game
            .approach_captures()
            .iter()
            .chain(game.withdrawal_captures().iter())
            .copied()
            .collect();
        candidates.sort();
        candidates.dedup();
        for dest in candidates {
            let approach = game
                .approach_captures_at(dest)
                .map(|run| run.len())
                .unwrap_or(0);
            let withdrawal = game
                .withdrawal_captures_at(dest)
                .map(|run| run.len())
                .unwrap_or(0);
            let len = approach.max(withdrawal);
            if len > best_len {
                best_len = len;
                best.clear();
            }
            if len == best_len {
                best.push(dest);
            }
        }
        best.choose(&mut self.rng).copied()
    }
}

impl Bot for GreedyBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_action(&mut self, game: &Fanorona, _time_limit: Duration) -> Option<Action> {
        if let Some(ambiguity) = game.ambiguity() {
            // Take whichever interpretation removes more pieces.
            let choice =
                if ambiguity.approach_victims.len() >= ambiguity.withdrawal_victims.len() {
                    ambiguity.approach_victims.first()
                } else {
                    ambiguity.withdrawal_victims.first()
                };
            return choice.copied().map(Action::Resolve);
        }

        if game.selected().is_some() {
            if let Some(dest) = self.best_destination(game) {
                return Some(Action::Move(dest));
            }
            return game
                .legal_targets()
                .choose(&mut self.rng)
                .copied()
                .map(Action::Move);
        }

        let eligible = game.capture_eligible();
        if !eligible.is_empty() {
            return eligible
                .iter()
                .copied()
                .max_by_key(|&pos| Self::best_capture_of_piece(game, pos))
                .map(Action::Select);
        }
        let movable: Vec<Position> = game
            .piece_set()
            .positions_of(game.turn())
            .filter(|&pos| {
                !rules::legal_targets(game.board(), game.piece_set(), pos, None).is_empty()
            })
            .collect();
        movable.choose(&mut self.rng).copied().map(Action::Select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn custom_game(white: &[(usize, usize)], black: &[(usize, usize)]) -> Fanorona {
        let mut game = Fanorona::standard();
        game.piece_set_mut().clear();
        for &(row, col) in white {
            game.piece_set_mut().put(at(row, col), Colour::White);
        }
        for &(row, col) in black {
            game.piece_set_mut().put(at(row, col), Colour::Black);
        }
        game
    }

    #[test]
    fn greedy_prefers_the_longer_run() {
        let mut game = custom_game(&[(3, 3)], &[(3, 5), (3, 6), (1, 3), (5, 9)]);
        game.select_piece(at(3, 3));
        assert!(game.approach_captures().contains(&at(3, 4)));
        assert!(game.approach_captures().contains(&at(2, 3)));

        let mut bot = GreedyBot::with_seed("greedy".to_string(), 7);
        let action = bot.choose_action(&game, Duration::from_secs(1));
        // Moving east captures (3,5) and (3,6); north only (1,3).
        assert_eq!(action, Some(Action::Move(at(3, 4))));
    }

    #[test]
    fn greedy_selects_the_piece_with_the_biggest_capture() {
        let game = custom_game(&[(1, 1), (5, 9)], &[(1, 3), (1, 4), (5, 7)]);
        let mut bot = GreedyBot::with_seed("greedy".to_string(), 7);
        let action = bot.choose_action(&game, Duration::from_secs(1));
        // (1,1) can take two pieces by approach; (5,9) only one.
        assert_eq!(action, Some(Action::Select(at(1, 1))));
    }

    #[test]
    fn greedy_resolves_ambiguity_towards_more_victims() {
        let mut game = custom_game(
            &[(3, 3)],
            &[(3, 5), (3, 6), (3, 2), (5, 9)],
        );
        game.piece_set_mut().put(at(3, 1), Colour::Black);
        // Keep the chain rules out of the way.
        game.select_piece(at(3, 3));
        game.commit_move(at(3, 4));
        let ambiguity = game.ambiguity().expect("both mechanics fire");
        assert_eq!(ambiguity.approach_victims.len(), 2);
        assert_eq!(ambiguity.withdrawal_victims.len(), 2);

        let mut bot = GreedyBot::with_seed("greedy".to_string(), 7);
        let action = bot.choose_action(&game, Duration::from_secs(1));
        assert_eq!(action, Some(Action::Resolve(at(3, 5))));
    }

    #[test]
    fn random_bot_is_deterministic_under_a_seed() {
        let game = Fanorona::standard();
        let mut bot_a = RandomBot::with_seed("a".to_string(), 42);
        let mut bot_b = RandomBot::with_seed("b".to_string(), 42);
        assert_eq!(
            bot_a.choose_action(&game, Duration::from_secs(1)),
            bot_b.choose_action(&game, Duration::from_secs(1))
        );
    }

    #[test]
    fn random_bot_selects_an_eligible_piece_when_captures_exist() {
        let game = Fanorona::standard();
        let eligible = game.capture_eligible();
        assert!(!eligible.is_empty());
        let mut bot = RandomBot::with_seed("r".to_string(), 1);
        match bot.choose_action(&game, Duration::from_secs(1)) {
            Some(Action::Select(pos)) => assert!(eligible.contains(&pos)),
            other => panic!("expected a selection, got {:?}", other),
        }
    }

    #[test]
    fn random_bot_moves_after_its_own_selection() {
        let mut game = custom_game(&[(2, 2)], &[(5, 9)]);
        let mut bot = RandomBot::with_seed("r".to_string(), 9);
        match bot.choose_action(&game, Duration::from_secs(1)) {
            Some(Action::Select(pos)) => game.select_piece(pos),
            other => panic!("expected a selection, got {:?}", other),
        }
        match bot.choose_action(&game, Duration::from_secs(1)) {
            Some(Action::Move(dest)) => {
                assert!(game.legal_targets().contains(&dest));
            }
            other => panic!("expected a move, got {:?}", other),
        }
    }
}
