use crate::log;

use super::board::Board;
use super::bot_controller::{BotType, MoveForecast, calculate_minimax_move, calculate_move};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::types::{FirstPlayerMode, GameStatus, Mark, Position};
use super::win_detector::check_win;

#[derive(Debug)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<Position>,
    first_player_mode: FirstPlayerMode,
    bot_type: BotType,
}

#[derive(Clone, Debug)]
pub struct ComputerTurn {
    pub pos: Position,
    pub score: Option<i32>,
    pub forecast: Option<MoveForecast>,
}

impl GameState {
    pub fn new(settings: &GameSettings, rng: &mut SessionRng) -> Self {
        Self {
            board: Board::new(),
            current_mark: first_mark(settings.first_player, rng),
            status: GameStatus::InProgress,
            last_move: None,
            first_player_mode: settings.first_player,
            bot_type: settings.bot_type,
        }
    }

    #[cfg(test)]
    fn with_board(board: Board, current_mark: Mark, bot_type: BotType) -> Self {
        Self {
            board,
            current_mark,
            status: GameStatus::InProgress,
            last_move: None,
            first_player_mode: FirstPlayerMode::Human,
            bot_type,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::ComputerWon => Some(Mark::Computer),
            GameStatus::HumanWon => Some(Mark::Human),
            _ => None,
        }
    }

    pub fn place_mark(&mut self, mark: Mark, pos: Position) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if mark != self.current_mark {
            return Err("Not your turn".to_string());
        }

        if !self.board.set_move(pos, mark) {
            return Err(format!("Cell ({}, {}) is not available", pos.row, pos.col));
        }

        self.last_move = Some(pos);
        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn play_computer_turn(&mut self, rng: &mut SessionRng) -> Result<ComputerTurn, String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }

        if self.current_mark != Mark::Computer {
            return Err("Not the computer's turn".to_string());
        }

        let turn = match self.bot_type {
            BotType::Minimax => {
                let decision = calculate_minimax_move(&self.board, Mark::Computer)
                    .ok_or_else(|| "No moves available".to_string())?;
                log!(
                    "Computer plays ({}, {}) with score {}",
                    decision.pos.row,
                    decision.pos.col,
                    decision.score
                );
                ComputerTurn {
                    pos: decision.pos,
                    score: Some(decision.score),
                    forecast: Some(decision.forecast),
                }
            }
            BotType::Random => {
                let pos = calculate_move(self.bot_type, &self.board, Mark::Computer, rng)
                    .ok_or_else(|| "No moves available".to_string())?;
                ComputerTurn {
                    pos,
                    score: None,
                    forecast: None,
                }
            }
        };

        if let Err(e) = self.place_mark(Mark::Computer, turn.pos) {
            log!(
                "Computer failed to place mark at ({}, {}): {}",
                turn.pos.row,
                turn.pos.col,
                e
            );
            return Err(e);
        }

        Ok(turn)
    }

    pub fn restart(&mut self, rng: &mut SessionRng) {
        self.board.clear();
        self.status = GameStatus::InProgress;
        self.last_move = None;
        self.current_mark = first_mark(self.first_player_mode, rng);
    }

    fn switch_turn(&mut self) {
        if let Some(opponent) = self.current_mark.opponent() {
            self.current_mark = opponent;
        }
    }

    fn check_game_over(&mut self) {
        // A win on the final cell is a win, not a draw.
        if let Some(winner) = check_win(&self.board) {
            self.status = match winner {
                Mark::Human => GameStatus::HumanWon,
                Mark::Computer => GameStatus::ComputerWon,
                Mark::Empty => unreachable!(),
            };
            return;
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
        }
    }
}

fn first_mark(mode: FirstPlayerMode, rng: &mut SessionRng) -> Mark {
    match mode {
        FirstPlayerMode::Human => Mark::Human,
        FirstPlayerMode::Computer => Mark::Computer,
        FirstPlayerMode::Random => {
            if rng.random_bool() {
                Mark::Human
            } else {
                Mark::Computer
            }
        }
    }
}
