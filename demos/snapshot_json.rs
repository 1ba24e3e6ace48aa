//! Drives a few rounds with a greedy bot and dumps the resulting game
//! snapshot as JSON, the way a renderer or web client would consume it.

use fanorona_arena::*;
use std::time::Duration;

fn main() {
    let mut game = Fanorona::standard();
    let mut white = GreedyBot::with_seed("Greedy White".to_string(), 1);
    let mut black = GreedyBot::with_seed("Greedy Black".to_string(), 2);

    // Play until round 5 or a winner, whichever comes first.
    while game.winner().is_none() && game.round() < 5 {
        let bot = match game.turn() {
            Colour::White => &mut white,
            Colour::Black => &mut black,
        };
        let Some(action) = bot.choose_action(&game, Duration::from_secs(1)) else {
            break;
        };
        match action {
            Action::Select(pos) => game.select_piece(pos),
            Action::Move(dest) => game.commit_move(dest),
            Action::Resolve(square) => game.resolve_ambiguity(square),
        }
    }

    println!("{}", game.display_board());
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("snapshot serialization failed: {}", err),
    }
}
