pub mod arena;
pub mod board;
pub mod bot;
pub mod game;
pub mod pieces;
pub mod rules;

pub use arena::*;
pub use board::*;
pub use bot::*;
pub use game::*;
pub use pieces::*;
pub use rules::CaptureKind;
