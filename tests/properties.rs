use othello_rules::rules::{self, apply_move, apply_pass};
use othello_rules::{Board, Cell, GameError, GameState, Position};
use proptest::prelude::*;

/// Plays a game from the starting position, choosing each move by index
/// from `picks` and passing when forced. Returns every state visited.
fn play_out(picks: &[u16]) -> Vec<GameState> {
    let mut states = vec![GameState::new()];
    for &pick in picks {
        let state = *states.last().unwrap();
        if state.is_terminal() {
            break;
        }
        let moves = state.legal_moves();
        let next = if moves.is_empty() {
            apply_pass(&state, state.current_player()).unwrap()
        } else {
            let mv = moves[pick as usize % moves.len()];
            apply_move(&state, mv, state.current_player()).unwrap().state
        };
        states.push(next);
    }
    states
}

fn all_positions() -> impl Iterator<Item = Position> {
    (0..8u8).flat_map(|row| (0..8u8).map(move |col| Position::new(row, col).unwrap()))
}

fn cell_counts(board: &Board) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    for pos in all_positions() {
        match board.cell(pos) {
            Cell::Empty => counts.0 += 1,
            Cell::Black => counts.1 += 1,
            Cell::White => counts.2 += 1,
        }
    }
    counts
}

fn picks() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(any::<u16>(), 0..70)
}

proptest! {
    #[test]
    fn cells_always_sum_to_sixty_four(picks in picks()) {
        for state in play_out(&picks) {
            let (empty, black, white) = cell_counts(state.board());
            prop_assert_eq!(empty + black + white, 64);

            let score = state.score();
            prop_assert_eq!(score.black as usize, black);
            prop_assert_eq!(score.white as usize, white);
            prop_assert_eq!(score.empty() as usize, empty);
        }
    }

    #[test]
    fn legal_moves_agree_with_apply_move(picks in picks()) {
        let states = play_out(&picks);
        let state = states.last().unwrap();
        prop_assume!(!state.is_terminal());

        let player = state.current_player();
        let legal = rules::legal_moves(state.board(), player);
        for pos in all_positions() {
            let accepted = apply_move(state, pos, player).is_ok();
            prop_assert_eq!(rules::is_legal_move(state.board(), pos, player), accepted);
            prop_assert_eq!(legal.contains(&pos), accepted, "disagreement at {}", pos);
        }
    }

    #[test]
    fn turns_alternate_and_only_placements_count(picks in picks()) {
        let states = play_out(&picks);
        for pair in states.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            prop_assert_eq!(after.current_player(), before.current_player().opponent());

            let placed = before.score().empty() != after.score().empty();
            let expected = before.move_number() + u32::from(placed);
            prop_assert_eq!(after.move_number(), expected);
        }
    }

    #[test]
    fn every_flip_is_bracketed_by_the_mover(picks in picks()) {
        let states = play_out(&picks);
        let state = states.last().unwrap();
        prop_assume!(!state.is_terminal());

        let player = state.current_player();
        for mv in state.legal_moves() {
            let placement = apply_move(state, mv, player).unwrap();
            prop_assert!(!placement.flipped.is_empty());
            for flipped in &placement.flipped {
                prop_assert_eq!(state.board().cell(*flipped), player.opponent().to_cell());
                prop_assert_eq!(placement.state.board().cell(*flipped), player.to_cell());
                // Flipped discs lie on a straight line (row, column or
                // diagonal) through the placed disc.
                let dr = flipped.row() as i32 - mv.row() as i32;
                let dc = flipped.col() as i32 - mv.col() as i32;
                prop_assert!(dr == 0 || dc == 0 || dr.abs() == dc.abs());
            }
            prop_assert_eq!(placement.state.score().empty() + 1, state.score().empty());
        }
    }

    #[test]
    fn terminal_state_refuses_all_actions(picks in prop::collection::vec(any::<u16>(), 60..120)) {
        let states = play_out(&picks);
        let state = states.last().unwrap();
        prop_assume!(state.is_terminal());

        prop_assert!(rules::is_terminal(state.board()));
        prop_assert_eq!(state.winner(), Some(rules::outcome(state.board())));
        for player in [state.current_player(), state.current_player().opponent()] {
            prop_assert_eq!(apply_pass(state, player), Err(GameError::GameOver));
            for pos in all_positions() {
                prop_assert_eq!(apply_move(state, pos, player).map(|p| p.state), Err(GameError::GameOver));
            }
        }
    }
}
