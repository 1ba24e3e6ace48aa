use fanorona_arena::*;
use std::time::Duration;

fn main() {
    println!("Simple Fanorona Match Demo\n");

    // Create two bots
    let white = Box::new(RandomBot::new("Random Alice".to_string()));
    let black = Box::new(GreedyBot::new("Greedy Bob".to_string()));

    // Configure match with a short round cap
    let config = MatchConfig {
        time_per_action: Duration::from_millis(500),
        max_rounds: 20,
    };

    // Run the match with verbose output
    let mut match_game = Match::new(white, black, config, true);
    let result = match_game.play();

    // Print summary
    println!("\n{}", "=".repeat(60));
    match &result {
        MatchResult::WhiteWins { winner_name, rounds } => {
            println!("{} won as White after {} rounds!", winner_name, rounds);
        }
        MatchResult::BlackWins { winner_name, rounds } => {
            println!("{} won as Black after {} rounds!", winner_name, rounds);
        }
        MatchResult::Draw { rounds } => {
            println!("Draw after {} rounds", rounds);
        }
        MatchResult::Timeout { violator, winner } => {
            println!("{} wins! {} timed out", winner, violator);
        }
        MatchResult::Stalled { violator, winner } => {
            println!("{} wins! {} stalled", winner, violator);
        }
    }
    println!("{}", "=".repeat(60));
}
