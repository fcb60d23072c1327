//! Line, win and draw checks over a bare [`Board`](crate::Board).
//!
//! Nothing here touches a game, so the search can score boards it only
//! imagines.

pub mod draw;
pub mod win;

pub use draw::{evaluate, is_draw, is_full};
pub use win::{LINES, check_winner, winning_square};
