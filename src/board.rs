use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::GameError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Player, Position, Score};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// For every square, the squares met when walking outward in each of the
/// eight directions, nearest first. A ray ends at the board edge.
static RAYS: Lazy<Vec<[Vec<u8>; 8]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|index| {
            let (row, col) = pos_to_row_col(index);
            DIRECTIONS.map(|(dr, dc)| {
                let mut ray = Vec::with_capacity(BOARD_SIZE - 1);
                let mut r = row + dr;
                let mut c = col + dc;
                while in_bounds(r, c) {
                    ray.push((r as usize * BOARD_SIZE + c as usize) as u8);
                    r += dr;
                    c += dc;
                }
                ray
            })
        })
        .collect()
});

/// Othello board represented by two disjoint bitboards (bit = `row * 8 + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        Self {
            black: bit(28) | bit(35),
            white: bit(27) | bit(36),
        }
    }

    /// A board with no discs at all.
    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    /// Builds a board from raw masks. The masks must not share a square.
    pub fn from_bitboards(black: u64, white: u64) -> Result<Self, GameError> {
        if black & white != 0 {
            return Err(GameError::InvalidBoard {
                reason: "a square is claimed by both players",
            });
        }
        Ok(Self { black, white })
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = pos.bit();
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Occupancy mask of one side.
    pub fn discs(&self, player: Player) -> u64 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn count(&self) -> Score {
        Score {
            black: self.black.count_ones() as u8,
            white: self.white.count_ones() as u8,
        }
    }

    pub fn empty_count(&self) -> u8 {
        self.count().empty()
    }

    /// Cells grouped by row, top row first.
    pub fn rows(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.cell(Position::from_index(row * BOARD_SIZE + col));
            }
        }
        rows
    }

    /// Returns legal move mask for the given side.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Mask of the discs that would flip if `player` placed at `pos`.
    /// Zero for an occupied square or a square that brackets nothing.
    pub fn flips(&self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        Self::collect_flips(pos.index(), me, opp)
    }

    /// Places one disc and flips captured discs.
    /// Returns flipped bit mask. Returns 0 and leaves the board untouched
    /// when the move is illegal.
    pub(crate) fn place(&mut self, pos: Position, player: Player) -> u64 {
        let (me, opp) = self.sides(player);

        let flips = Self::collect_flips(pos.index(), me, opp);
        if flips == 0 {
            return 0;
        }

        let next_me = me | pos.bit() | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Player::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Black => (self.black, self.white),
            Player::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }
        if ((me | opp) & bit(pos)) != 0 {
            return 0;
        }

        let mut flips = 0u64;
        for ray in &RAYS[pos] {
            let mut line = 0u64;
            for &square in ray {
                let square = bit(square as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    // A run only counts when our own disc closes it.
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses 64 squares in row-major order: `X` black, `O` white, `.` or `-`
/// empty. Whitespace is ignored so boards can be written as eight lines.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut black = 0u64;
        let mut white = 0u64;
        let mut index = 0usize;

        for ch in s.chars().filter(|ch| !ch.is_whitespace()) {
            if index >= NUM_SQUARES {
                return Err(GameError::InvalidBoard {
                    reason: "more than 64 squares",
                });
            }
            match ch {
                'X' | 'x' => black |= bit(index),
                'O' | 'o' => white |= bit(index),
                '.' | '-' => {}
                _ => {
                    return Err(GameError::InvalidBoard {
                        reason: "unexpected square character",
                    });
                }
            }
            index += 1;
        }

        if index != NUM_SQUARES {
            return Err(GameError::InvalidBoard {
                reason: "fewer than 64 squares",
            });
        }

        Ok(Self { black, white })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  A B C D E F G H")?;
        for (row, cells) in self.rows().iter().enumerate() {
            write!(f, "\n{} ", row + 1)?;
            for cell in cells {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{ch} ")?;
            }
        }
        Ok(())
    }
}

/// Expands a mask into positions in row-major order.
pub fn positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(mask.count_ones() as usize);

    while bits != 0 {
        out.push(Position::from_index(bits.trailing_zeros() as usize));
        bits &= bits - 1;
    }

    out
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn initial_board_has_two_discs_each_in_the_centre() {
        let board = Board::new();

        assert_eq!(board.cell(pos(3, 3)), Cell::White);
        assert_eq!(board.cell(pos(4, 4)), Cell::White);
        assert_eq!(board.cell(pos(3, 4)), Cell::Black);
        assert_eq!(board.cell(pos(4, 3)), Cell::Black);
        assert_eq!(board.count(), Score { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn t01_initial_black_legal_moves_are_four_expected_squares() {
        let board = Board::new();

        let expected = pos(2, 3).bit() | pos(3, 2).bit() | pos(4, 5).bit() | pos(5, 4).bit(); // d3,c4,f5,e6

        assert_eq!(board.legal_moves(Player::Black), expected);
    }

    #[test]
    fn place_flips_opponent_discs_and_updates_counts() {
        let mut board = Board::new();

        let flips = board.place(pos(2, 3), Player::Black); // d3

        assert_eq!(flips, pos(3, 3).bit()); // d4
        assert_eq!(board.count(), Score { black: 4, white: 1 });
        assert_eq!(board.empty_count(), 59);

        let rows = board.rows();
        assert_eq!(rows[2][3], Cell::Black);
        assert_eq!(rows[3][3], Cell::Black);
        assert_eq!(rows[3][4], Cell::Black);
        assert_eq!(rows[4][3], Cell::Black);
        assert_eq!(rows[4][4], Cell::White);
    }

    #[test]
    fn illegal_place_returns_zero_and_keeps_board_unchanged() {
        let mut board = Board::new();
        let before = board;

        let flips = board.place(pos(0, 0), Player::Black);

        assert_eq!(flips, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn flips_collects_runs_in_several_directions() {
        let board: Board = "
            ........
            ........
            ..X.X...
            ...OO...
            ..XO....
            ........
            ........
            ........"
            .parse()
            .unwrap();

        // Placing at (4,4) brackets (3,3) towards (2,2), (3,4) towards (2,4),
        // and (4,3) towards (4,2).
        let flips = board.flips(pos(4, 4), Player::Black);

        assert_eq!(
            positions(flips),
            vec![pos(3, 3), pos(3, 4), pos(4, 3)]
        );
    }

    #[test]
    fn run_ending_at_edge_or_empty_square_does_not_flip() {
        let board: Board = "
            ........
            ........
            ........
            ....OOOO
            ....O.O.
            ....X...
            ........
            ........"
            .parse()
            .unwrap();

        assert_eq!(board.flips(pos(3, 3), Player::Black), 0);
        assert_eq!(board.flips(pos(4, 7), Player::Black), 0);
        assert_eq!(board.legal_moves(Player::Black) & pos(4, 7).bit(), 0);
    }

    #[test]
    fn rays_do_not_wrap_across_rows() {
        // Index order would put (1,0) and (1,1) right after (0,7).
        let board: Board = "
            ........
            OX......
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();

        assert_eq!(board.flips(pos(0, 7), Player::Black), 0);
        assert_eq!(board.legal_moves(Player::Black), 0);
    }

    #[test]
    fn rays_stop_at_the_board_edge() {
        assert!(RAYS[0][0].is_empty()); // up-left from a1
        assert_eq!(RAYS[0][4].len(), 7); // right from a1
        assert_eq!(RAYS[0][7].last(), Some(&63)); // down-right from a1 ends at h8
        assert_eq!(RAYS[7][4], Vec::<u8>::new()); // right from h1
    }

    #[test]
    fn from_bitboards_rejects_overlap() {
        assert!(Board::from_bitboards(0b11, 0b10).is_err());
        assert_eq!(
            Board::from_bitboards(0b01, 0b10).unwrap().count(),
            Score { black: 1, white: 1 }
        );
    }

    #[test]
    fn parse_rejects_wrong_square_count_and_characters() {
        assert!("X".parse::<Board>().is_err());
        assert!(".".repeat(65).parse::<Board>().is_err());
        assert!(format!("{}Z", ".".repeat(63)).parse::<Board>().is_err());
        assert_eq!(".".repeat(64).parse::<Board>(), Ok(Board::empty()));
    }

    #[test]
    fn display_draws_grid_with_labels() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "  A B C D E F G H");
        assert_eq!(lines[4], "4 . . . O X . . . ");
        assert_eq!(lines[5], "5 . . . X O . . . ");
    }

    #[test]
    fn positions_are_row_major() {
        let mask = pos(5, 4).bit() | pos(2, 3).bit() | pos(3, 2).bit();

        assert_eq!(positions(mask), vec![pos(2, 3), pos(3, 2), pos(5, 4)]);
        assert!(positions(0).is_empty());
    }
}
