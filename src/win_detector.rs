use super::board::Board;
use super::types::{Mark, Position, WinningLine};

// 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

pub fn has_won(board: &Board, mark: Mark) -> bool {
    if mark == Mark::Empty {
        return false;
    }
    let cells = board.rows();
    WIN_LINES
        .iter()
        .any(|line| line.iter().all(|&(row, col)| cells[row][col] == mark))
}

pub fn check_win(board: &Board) -> Option<Mark> {
    [Mark::Human, Mark::Computer]
        .into_iter()
        .find(|&mark| has_won(board, mark))
}

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.rows();
    for line in &WIN_LINES {
        let (row, col) = line[0];
        let mark = cells[row][col];
        if mark == Mark::Empty {
            continue;
        }
        if line.iter().all(|&(r, c)| cells[r][c] == mark) {
            let (end_row, end_col) = line[2];
            return Some(WinningLine::new(
                mark,
                Position::new(row, col),
                Position::new(end_row, end_col),
            ));
        }
    }
    None
}

pub fn is_game_over(board: &Board) -> bool {
    check_win(board).is_some() || board.is_full()
}
