use rand::rngs::StdRng;
use rand::SeedableRng;
use sweeper::config::Config;
use sweeper::cover::CoverState;
use sweeper::engine::{evaluate, ClickOutcome, Round, RoundStatus};
use sweeper::error::GameError;
use sweeper::field::Field;
use sweeper::game::Game;

fn round_with(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Round {
    Round::from_field(Field::from_mines(rows, cols, mines).expect("field"))
}

#[test]
fn empty_row_floods_and_wins() {
    let mut r = round_with(1, 3, &[]);
    assert_eq!(r.primary_click(0, 0), Ok(ClickOutcome::Revealed));
    for c in 0..3 {
        assert_eq!(r.cover().get((0, c)), CoverState::Uncovered);
    }
    assert_eq!(r.status(), RoundStatus::Won);
}

#[test]
fn clicking_a_mine_loses_without_chording() {
    let mut r = round_with(3, 3, &[(1, 1)]);
    assert_eq!(r.primary_click(1, 1), Ok(ClickOutcome::Detonated((1, 1))));
    assert_eq!(r.status(), RoundStatus::Lost);
    for row in 0..3 {
        for col in 0..3 {
            if (row, col) != (1, 1) {
                assert_eq!(r.cover().get((row, col)), CoverState::Covered, "({},{}) opened", row, col);
            }
        }
    }
}

#[test]
fn correct_flag_lets_chord_open_neighbours() {
    let mut r = round_with(3, 3, &[(0, 0)]);
    assert_eq!(r.secondary_click(0, 0), Ok(true));
    assert_eq!(r.primary_click(0, 1), Ok(ClickOutcome::Chorded));
    for pos in [(0, 2), (1, 0), (1, 1), (1, 2)] {
        assert_eq!(r.cover().get(pos), CoverState::Uncovered, "{:?} still covered", pos);
    }
    assert_eq!(r.cover().get((0, 0)), CoverState::Flagged);
    assert_eq!(r.status(), RoundStatus::Won);
}

#[test]
fn misplaced_flag_detonates_on_chord() {
    let mut r = round_with(3, 3, &[(0, 0)]);
    r.secondary_click(0, 2).unwrap();
    assert_eq!(r.primary_click(0, 1), Ok(ClickOutcome::Detonated((0, 0))));
    assert_eq!(r.status(), RoundStatus::Lost);
}

#[test]
fn number_without_flags_reveals_only_itself() {
    let mut r = round_with(3, 3, &[(0, 0)]);
    assert_eq!(r.primary_click(1, 1), Ok(ClickOutcome::Revealed));
    let open = (0..3).flat_map(|row| (0..3).map(move |col| (row, col)))
        .filter(|&p| r.cover().get(p) == CoverState::Uncovered)
        .count();
    assert_eq!(open, 1);
    assert_eq!(r.status(), RoundStatus::InProgress);
}

#[test]
fn flagged_cell_ignores_primary_click() {
    let mut r = round_with(3, 3, &[(2, 2)]);
    r.secondary_click(0, 0).unwrap();
    assert_eq!(r.primary_click(0, 0), Ok(ClickOutcome::Ignored));
    assert_eq!(r.cover().get((0, 0)), CoverState::Flagged);
    assert_eq!(r.moves(), 0);
}

#[test]
fn flag_toggles_and_uncovered_cells_refuse_flags() {
    let mut r = round_with(3, 3, &[(2, 2)]);
    assert_eq!(r.secondary_click(1, 1), Ok(true));
    assert_eq!(r.flags(), 1);
    assert_eq!(r.mines_left(), 0);
    assert_eq!(r.secondary_click(1, 1), Ok(true));
    assert_eq!(r.cover().get((1, 1)), CoverState::Covered);
    r.primary_click(1, 1).unwrap();
    assert_eq!(r.secondary_click(1, 1), Ok(false));
    assert_eq!(r.cover().get((1, 1)), CoverState::Uncovered);
}

#[test]
fn out_of_range_clicks_are_rejected() {
    let mut r = round_with(3, 4, &[]);
    assert_eq!(r.primary_click(3, 0), Err(GameError::InvalidCoords));
    assert_eq!(r.secondary_click(0, 4), Err(GameError::InvalidCoords));
}

#[test]
fn finished_round_ignores_input() {
    let mut r = round_with(2, 2, &[(0, 0)]);
    r.primary_click(0, 0).unwrap();
    assert_eq!(r.status(), RoundStatus::Lost);
    assert_eq!(r.primary_click(1, 1), Ok(ClickOutcome::Ignored));
    assert_eq!(r.secondary_click(1, 1), Ok(false));
    assert_eq!(r.cover().get((1, 1)), CoverState::Covered);
}

#[test]
fn win_does_not_depend_on_flags() {
    let mut plain = round_with(2, 2, &[(0, 0)]);
    let mut flagged = round_with(2, 2, &[(0, 0)]);
    flagged.secondary_click(0, 0).unwrap();
    for r in [&mut plain, &mut flagged] {
        r.primary_click(0, 1).unwrap();
        r.primary_click(1, 0).unwrap();
        r.primary_click(1, 1).unwrap();
        assert_eq!(r.status(), RoundStatus::Won);
    }
}

#[test]
fn evaluate_reports_loss_before_win() {
    let field = Field::from_mines(1, 2, &[(0, 0)]).unwrap();
    let mut cover = sweeper::cover::Cover::new(1, 2);
    assert_eq!(evaluate(&cover, &field), RoundStatus::InProgress);
    cover.reveal((0, 1));
    assert_eq!(evaluate(&cover, &field), RoundStatus::Won);
    cover.reveal((0, 0));
    assert_eq!(evaluate(&cover, &field), RoundStatus::Lost);
}

#[test]
fn flagged_safe_cell_blocks_win() {
    let field = Field::from_mines(1, 2, &[(0, 0)]).unwrap();
    let mut cover = sweeper::cover::Cover::new(1, 2);
    cover.toggle_flag((0, 1));
    assert_eq!(evaluate(&cover, &field), RoundStatus::InProgress);
}

#[test]
fn render_shows_flags_and_numbers() {
    let mut r = round_with(1, 3, &[(0, 0)]);
    r.secondary_click(0, 0).unwrap();
    r.primary_click(0, 1).unwrap();
    let text = r.render(false, true);
    let last = text.lines().last().unwrap();
    assert!(last.contains('F'));
    assert!(last.contains('1'));
    assert!(r.render(true, true).lines().last().unwrap().contains('*'));
}

#[test]
fn config_rejects_bad_sizes() {
    assert_eq!(Config { rows: 0, cols: 5, mines: 0, seed: None }.validate(), Err(GameError::EmptyBoard));
    assert_eq!(Config { rows: 2, cols: 2, mines: 4, seed: None }.validate(), Err(GameError::TooManyMines));
    assert!(Config::default().validate().is_ok());
    assert!(Game::new(Config { rows: 3, cols: 3, mines: 9, seed: Some(1) }).is_err());
}

#[test]
fn oversized_boards_are_rejected_not_overflowed() {
    let huge = Config { rows: usize::MAX / 2, cols: 3, mines: 1, seed: None };
    assert_eq!(huge.validate(), Err(GameError::BoardTooLarge));
    assert!(Game::new(huge).is_err());
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(Field::generate(usize::MAX, usize::MAX, 1, &mut rng), Err(GameError::BoardTooLarge));
    assert_eq!(Field::from_mines(usize::MAX / 2, 3, &[(0, 0)]), Err(GameError::BoardTooLarge));
}

#[test]
fn seeded_games_repeat_and_reset_deals_fresh_rounds() {
    let config = Config { rows: 9, cols: 9, mines: 10, seed: Some(42) };
    let mut a = Game::new(config).expect("game");
    let b = Game::new(config).expect("game");
    assert_eq!(b.config(), &config);
    assert_eq!(a.round().field(), b.round().field());

    a.round_mut().primary_click(4, 4).unwrap();
    a.reset().unwrap();
    assert_eq!(a.round().status(), RoundStatus::InProgress);
    assert_eq!(a.round().moves(), 0);
    assert_eq!(a.round().field().mines(), 10);
}

#[test]
fn new_round_uses_requested_size() {
    let mut rng = StdRng::seed_from_u64(7);
    let r = Round::new(4, 6, 5, &mut rng).expect("round");
    assert_eq!((r.rows(), r.cols(), r.mines()), (4, 6, 5));
    assert_eq!(r.status(), RoundStatus::InProgress);
    assert_eq!(r.flags(), 0);
}
