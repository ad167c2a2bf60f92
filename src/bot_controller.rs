use serde::{Deserialize, Serialize};

use super::board::Board;
use super::session_rng::SessionRng;
use super::types::{BOARD_SIZE, Mark, Position};
use super::win_detector::{has_won, is_game_over};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotType {
    Random,
    Minimax,
}

pub fn evaluate(board: &Board) -> i32 {
    if has_won(board, Mark::Computer) {
        1
    } else if has_won(board, Mark::Human) {
        -1
    } else {
        0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub pos: Option<Position>,
    pub score: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveForecast {
    scores: [[Option<i32>; BOARD_SIZE]; BOARD_SIZE],
}

impl MoveForecast {
    pub fn score_at(&self, pos: Position) -> Option<i32> {
        if pos.row >= BOARD_SIZE || pos.col >= BOARD_SIZE {
            return None;
        }
        self.scores[pos.row][pos.col]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.scores.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, &score)| score.map(|s| (Position::new(row, col), s)))
        })
    }

    fn record(&mut self, pos: Position, score: i32) {
        self.scores[pos.row][pos.col] = Some(score);
    }
}

#[derive(Clone, Debug)]
pub struct MinimaxDecision {
    pub pos: Position,
    pub score: i32,
    pub forecast: MoveForecast,
}

pub fn calculate_move(
    bot_type: BotType,
    board: &Board,
    mark: Mark,
    rng: &mut SessionRng,
) -> Option<Position> {
    match bot_type {
        BotType::Random => calculate_random_move(board, rng),
        BotType::Minimax => calculate_minimax_move(board, mark).map(|decision| decision.pos),
    }
}

fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = board.empty_cells();
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

pub fn calculate_minimax_move(board: &Board, mark: Mark) -> Option<MinimaxDecision> {
    let opponent = mark.opponent()?;
    if is_game_over(board) {
        return None;
    }

    let available_moves = board.empty_cells();
    let depth = available_moves.len();
    let maximizing = mark == Mark::Computer;

    let mut board = board.clone();
    let mut forecast = MoveForecast::default();
    let mut best_pos = None;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

    for pos in available_moves {
        board.place(pos, mark);
        let result = minimax(&mut board, depth - 1, opponent);
        board.take_back(pos);

        forecast.record(pos, result.score);

        // Strict comparison, so the first move in row-major order wins ties.
        if maximizing {
            if result.score > best_score {
                best_score = result.score;
                best_pos = Some(pos);
            }
        } else if result.score < best_score {
            best_score = result.score;
            best_pos = Some(pos);
        }
    }

    best_pos.map(|pos| MinimaxDecision {
        pos,
        score: best_score,
        forecast,
    })
}

pub fn minimax(board: &mut Board, depth: usize, to_move: Mark) -> SearchResult {
    let Some(opponent) = to_move.opponent() else {
        return SearchResult {
            pos: None,
            score: evaluate(board),
        };
    };

    if depth == 0 || is_game_over(board) {
        return SearchResult {
            pos: None,
            score: evaluate(board),
        };
    }

    let maximizing = to_move == Mark::Computer;
    let mut best = SearchResult {
        pos: None,
        score: if maximizing { i32::MIN } else { i32::MAX },
    };

    for pos in board.empty_cells() {
        board.place(pos, to_move);
        let result = minimax(board, depth - 1, opponent);
        // Restore before the next sibling is tried.
        board.take_back(pos);

        if maximizing {
            if result.score > best.score {
                best = SearchResult {
                    pos: Some(pos),
                    score: result.score,
                };
            }
        } else if result.score < best.score {
            best = SearchResult {
                pos: Some(pos),
                score: result.score,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    use Mark::Computer as C;
    use Mark::Empty as E;
    use Mark::Human as H;

    #[test]
    fn test_evaluate_terminal_positions() {
        let computer_won = Board::from_rows([[C, C, C], [H, H, E], [E, E, E]]);
        assert_eq!(evaluate(&computer_won), 1);

        let human_won = Board::from_rows([[H, E, C], [H, C, E], [H, E, E]]);
        assert_eq!(evaluate(&human_won), -1);

        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_evaluate_zero_on_near_full_boards_without_win() {
        #[rustfmt::skip]
        let drawn = Board::from_rows([
            [H, C, H],
            [H, C, C],
            [C, H, H],
        ]);
        assert_eq!(evaluate(&drawn), 0);

        #[rustfmt::skip]
        let one_empty = Board::from_rows([
            [H, C, H],
            [H, C, C],
            [C, H, E],
        ]);
        assert_eq!(evaluate(&one_empty), 0);
    }

    #[test]
    fn test_minimax_empty_board_is_forced_draw() {
        let mut board = Board::new();
        let result = minimax(&mut board, 9, C);

        assert_eq!(result.score, 0);
        assert!(result.pos.is_some());
    }

    #[test]
    fn test_minimax_takes_immediate_win() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [C, C, E],
            [H, H, E],
            [E, E, E],
        ]);

        let decision = calculate_minimax_move(&board, C).unwrap();
        assert_eq!(decision.pos, Position::new(0, 2));
        assert_eq!(decision.score, 1);
    }

    #[test]
    fn test_minimax_blocks_imminent_loss() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, H, E],
            [C, E, E],
            [E, E, E],
        ]);

        let decision = calculate_minimax_move(&board, C).unwrap();
        assert_eq!(decision.pos, Position::new(0, 2));
        assert_eq!(decision.score, 0);
    }

    #[test]
    fn test_minimax_as_minimizer_takes_human_win() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, H, E],
            [C, C, E],
            [E, E, E],
        ]);

        let decision = calculate_minimax_move(&board, H).unwrap();
        assert_eq!(decision.pos, Position::new(0, 2));
        assert_eq!(decision.score, -1);
    }

    #[test]
    fn test_minimax_is_idempotent() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, E, E],
            [E, C, E],
            [E, E, H],
        ]);

        let first = calculate_minimax_move(&board, C).unwrap();
        let second = calculate_minimax_move(&board, C).unwrap();

        assert_eq!(first.pos, second.pos);
        assert_eq!(first.score, second.score);
        assert_eq!(first.forecast, second.forecast);
    }

    #[test]
    fn test_minimax_restores_the_board() {
        #[rustfmt::skip]
        let mut board = Board::from_rows([
            [H, E, E],
            [E, C, E],
            [E, E, E],
        ]);
        let before = board.clone();

        let depth = board.empty_cells().len();
        minimax(&mut board, depth, H);

        assert_eq!(board, before);
    }

    #[test]
    fn test_minimax_depth_zero_returns_static_evaluation() {
        let mut board = Board::new();
        let result = minimax(&mut board, 0, C);

        assert_eq!(result.pos, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_minimax_on_finished_game_returns_no_move() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [C, C, C],
            [H, H, E],
            [E, E, E],
        ]);

        assert!(calculate_minimax_move(&board, H).is_none());

        let mut board = board;
        let result = minimax(&mut board, 4, H);
        assert_eq!(result.pos, None);
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_forecast_matches_decision() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [C, C, E],
            [H, H, E],
            [E, E, E],
        ]);

        let decision = calculate_minimax_move(&board, C).unwrap();

        assert_eq!(decision.forecast.score_at(decision.pos), Some(decision.score));
        for pos in board.empty_cells() {
            let score = decision.forecast.score_at(pos).unwrap();
            assert!(score <= decision.score);
        }
        assert_eq!(decision.forecast.iter().count(), board.empty_cells().len());
    }

    #[test]
    fn test_forecast_empty_for_occupied_and_out_of_range_cells() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, H, E],
            [C, E, E],
            [E, E, E],
        ]);

        let decision = calculate_minimax_move(&board, C).unwrap();

        assert_eq!(decision.forecast.score_at(Position::new(0, 0)), None);
        assert_eq!(decision.forecast.score_at(Position::new(5, 5)), None);
    }

    #[test]
    fn test_calculate_move_random_stays_on_empty_cells() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, C, H],
            [C, H, C],
            [E, E, E],
        ]);
        let mut rng = SessionRng::new(7);

        for _ in 0..20 {
            let pos = calculate_move(BotType::Random, &board, C, &mut rng).unwrap();
            assert_eq!(board.get(pos), Some(E));
        }
    }

    #[test]
    fn test_calculate_move_random_is_seed_deterministic() {
        let board = Board::new();

        let mut first_rng = SessionRng::new(42);
        let mut second_rng = SessionRng::new(42);
        let first = calculate_move(BotType::Random, &board, C, &mut first_rng);
        let second = calculate_move(BotType::Random, &board, C, &mut second_rng);

        assert_eq!(first, second);
    }

    #[test]
    fn test_calculate_move_none_when_board_is_full() {
        #[rustfmt::skip]
        let board = Board::from_rows([
            [H, C, H],
            [H, C, C],
            [C, H, H],
        ]);
        let mut rng = SessionRng::new(1);

        assert_eq!(calculate_move(BotType::Random, &board, C, &mut rng), None);
        assert_eq!(calculate_move(BotType::Minimax, &board, C, &mut rng), None);
    }
}
