//! The 3x3 variant: no captures, first three-in-a-row wins.

use fanorona_arena::*;
use std::time::Duration;

fn main() {
    println!("Fanorona 3x3 Demo\n");

    let white = Box::new(RandomBot::new("Random White".to_string()));
    let black = Box::new(RandomBot::new("Random Black".to_string()));

    let config = MatchConfig {
        time_per_action: Duration::from_millis(500),
        max_rounds: 100,
    };

    let mut match_game = Match::with_board(white, black, config, true, 3, 3)
        .expect("3x3 is a legal board");
    let result = match_game.play();

    println!("\n{}", "=".repeat(40));
    match &result {
        MatchResult::WhiteWins { winner_name, rounds } => {
            println!("{} aligned three after {} rounds!", winner_name, rounds);
        }
        MatchResult::BlackWins { winner_name, rounds } => {
            println!("{} aligned three after {} rounds!", winner_name, rounds);
        }
        MatchResult::Draw { rounds } => println!("Draw after {} rounds", rounds),
        MatchResult::Timeout { violator, winner } => {
            println!("{} wins! {} timed out", winner, violator);
        }
        MatchResult::Stalled { violator, winner } => {
            println!("{} wins! {} stalled", winner, violator);
        }
    }
    println!("{}", "=".repeat(40));
}
