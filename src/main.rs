use fanorona_arena::*;
use std::time::Duration;

fn main() {
    println!("Fanorona Arena - Bot Match System");
    println!("========================================\n");

    // Create some example bots
    let white = Box::new(GreedyBot::new("GreedyBot1".to_string()));
    let black = Box::new(RandomBot::new("RandomBot1".to_string()));

    // Configure match
    let config = MatchConfig {
        time_per_action: Duration::from_secs(2),
        max_rounds: 150,
    };

    // Play a match
    let mut match_game = Match::new(white, black, config, true);
    let result = match_game.play();

    // Display result
    println!("\n========================================");
    println!("Match Result:");
    match result {
        MatchResult::WhiteWins { winner_name, rounds } => {
            println!("  {} wins as White after {} rounds!", winner_name, rounds);
        }
        MatchResult::BlackWins { winner_name, rounds } => {
            println!("  {} wins as Black after {} rounds!", winner_name, rounds);
        }
        MatchResult::Draw { rounds } => {
            println!("  Draw after {} rounds", rounds);
        }
        MatchResult::Timeout { violator, winner } => {
            println!("  {} wins by timeout (opponent: {})", winner, violator);
        }
        MatchResult::Stalled { violator, winner } => {
            println!("  {} wins by stalled opponent ({})", winner, violator);
        }
    }
    println!("========================================");
}
