use crate::board::GameError;
use crate::bot::{Action, Bot};
use crate::game::Fanorona;
use crate::pieces::Colour;
use std::time::{Duration, Instant};

pub struct MatchConfig {
    pub time_per_action: Duration,
    pub max_rounds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            time_per_action: Duration::from_secs(5),
            max_rounds: 200,
        }
    }
}

pub enum MatchResult {
    WhiteWins { winner_name: String, rounds: u32 },
    BlackWins { winner_name: String, rounds: u32 },
    Draw { rounds: u32 },
    Timeout { violator: String, winner: String },
    Stalled { violator: String, winner: String },
}

impl MatchResult {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchResult::WhiteWins { winner_name, .. } => Some(winner_name),
            MatchResult::BlackWins { winner_name, .. } => Some(winner_name),
            MatchResult::Timeout { winner, .. } => Some(winner),
            MatchResult::Stalled { winner, .. } => Some(winner),
            MatchResult::Draw { .. } => None,
        }
    }
}

/// Plays two bots against each other on one game. The driver is a pure
/// consumer of the core: it forwards bot actions through the inbound
/// operations and watches the outbound queries. The core silently absorbs
/// illegal actions, so the driver detects them as a lack of progress and
/// scores them against the offending bot, like an illegal move would be.
pub struct Match {
    config: MatchConfig,
    game: Fanorona,
    white_bot: Box<dyn Bot>,
    black_bot: Box<dyn Bot>,
    verbose: bool,
}

impl Match {
    pub fn new(
        white_bot: Box<dyn Bot>,
        black_bot: Box<dyn Bot>,
        config: MatchConfig,
        verbose: bool,
    ) -> Self {
        Match {
            config,
            game: Fanorona::standard(),
            white_bot,
            black_bot,
            verbose,
        }
    }

    /// A match on non-default dimensions; fails on even dimensions like
    /// the game constructor itself.
    pub fn with_board(
        white_bot: Box<dyn Bot>,
        black_bot: Box<dyn Bot>,
        config: MatchConfig,
        verbose: bool,
        rows: usize,
        cols: usize,
    ) -> Result<Self, GameError> {
        Ok(Match {
            config,
            game: Fanorona::new(rows, cols)?,
            white_bot,
            black_bot,
            verbose,
        })
    }

    pub fn game(&self) -> &Fanorona {
        &self.game
    }

    pub fn play(&mut self) -> MatchResult {
        self.white_bot.game_start(Colour::White);
        self.black_bot.game_start(Colour::Black);

        if self.verbose {
            println!("Match starting:");
            println!("  White: {}", self.white_bot.name());
            println!("  Black: {}", self.black_bot.name());
            println!("\nInitial board:");
            println!("{}", self.game.display_board());
        }

        loop {
            if let Some(winner) = self.game.winner() {
                self.white_bot.game_end();
                self.black_bot.game_end();
                let rounds = self.game.round();
                return match winner {
                    Colour::White => {
                        if self.verbose {
                            println!("\n{} wins as White!", self.white_bot.name());
                        }
                        MatchResult::WhiteWins {
                            winner_name: self.white_bot.name().to_string(),
                            rounds,
                        }
                    }
                    Colour::Black => {
                        if self.verbose {
                            println!("\n{} wins as Black!", self.black_bot.name());
                        }
                        MatchResult::BlackWins {
                            winner_name: self.black_bot.name().to_string(),
                            rounds,
                        }
                    }
                };
            }

            if self.game.round() > self.config.max_rounds {
                if self.verbose {
                    println!("\nRound limit ({}) reached", self.config.max_rounds);
                }
                self.white_bot.game_end();
                self.black_bot.game_end();
                return MatchResult::Draw {
                    rounds: self.config.max_rounds,
                };
            }

            if let Some(result) = self.play_action() {
                self.white_bot.game_end();
                self.black_bot.game_end();
                return result;
            }
        }
    }

    /// One bot action; `Some` short-circuits the match with a verdict.
    fn play_action(&mut self) -> Option<MatchResult> {
        let colour = self.game.turn();
        let bot = match colour {
            Colour::White => &mut self.white_bot,
            Colour::Black => &mut self.black_bot,
        };

        let start = Instant::now();
        let action = bot.choose_action(&self.game, self.config.time_per_action);
        let elapsed = start.elapsed();

        let (bot_name, other_name) = match colour {
            Colour::White => (self.white_bot.name(), self.black_bot.name()),
            Colour::Black => (self.black_bot.name(), self.white_bot.name()),
        };

        if elapsed > self.config.time_per_action {
            if self.verbose {
                println!(
                    "TIMEOUT: {} took {:?} (limit: {:?})",
                    bot_name, elapsed, self.config.time_per_action
                );
            }
            return Some(MatchResult::Timeout {
                violator: bot_name.to_string(),
                winner: other_name.to_string(),
            });
        }

        let Some(action) = action else {
            // No legal action available, or the bot gave up.
            if self.verbose {
                println!("{} returned no action", bot_name);
            }
            return Some(MatchResult::Draw {
                rounds: self.game.round(),
            });
        };

        if self.verbose {
            println!(
                "Round {}: {} ({}) plays: {} (took {:?})",
                self.game.round(),
                bot_name,
                colour,
                action,
                elapsed
            );
        }

        let before = self.game.snapshot();
        match action {
            Action::Select(pos) => self.game.select_piece(pos),
            Action::Move(dest) => self.game.commit_move(dest),
            Action::Resolve(square) => self.game.resolve_ambiguity(square),
        }
        if self.game.snapshot() == before {
            if self.verbose {
                println!("NO EFFECT: {} - {}", bot_name, action);
            }
            return Some(MatchResult::Stalled {
                violator: bot_name.to_string(),
                winner: other_name.to_string(),
            });
        }

        self.white_bot.notify_action(action);
        self.black_bot.notify_action(action);

        if self.verbose {
            if let Action::Move(_) | Action::Resolve(_) = action {
                println!("{}", self.game.display_board());
            }
        }

        None
    }
}
