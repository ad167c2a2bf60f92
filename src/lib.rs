pub mod logger;

mod board;
mod bot_controller;
mod game_state;
mod session_rng;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    BotType, MinimaxDecision, MoveForecast, SearchResult, calculate_minimax_move, calculate_move,
    evaluate, minimax,
};
pub use game_state::{ComputerTurn, GameState};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use types::{BOARD_SIZE, FirstPlayerMode, GameStatus, Mark, Position, WinningLine};
pub use win_detector::{check_win, check_win_with_line, has_won, is_game_over};
