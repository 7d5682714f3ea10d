//! Grid tests - locking, merging, clearing and settling

use tetris_2048::core::{Footprint, Grid, GridSnapshot, MAX_TILE_VALUE};

fn rows(grid: &Grid) -> Vec<Vec<u32>> {
    grid.to_rows()
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(20, 16);
    assert_eq!(grid.height(), 20);
    assert_eq!(grid.width(), 16);
    assert_eq!(grid.score(), 0);
    assert_eq!(grid.cleared_lines(), 0);
    assert!(!grid.game_over());

    for row in 0..20 {
        for col in 0..16 {
            assert!(!grid.is_occupied(row, col));
            assert_eq!(grid.get(row, col), Some(None));
        }
    }
}

#[test]
fn test_grid_out_of_bounds_never_occupied() {
    let grid = Grid::from_rows(&[vec![2, 4], vec![8, 16]]).unwrap();

    assert!(grid.is_occupied(0, 0));
    assert!(!grid.is_occupied(-1, 0));
    assert!(!grid.is_occupied(0, -1));
    assert!(!grid.is_occupied(2, 0));
    assert!(!grid.is_occupied(0, 2));

    assert!(grid.is_inside(1, 1));
    assert!(!grid.is_inside(2, 1));
    assert_eq!(grid.get(5, 5), None);
}

#[test]
fn test_grid_set_out_of_bounds() {
    let mut grid = Grid::new(4, 4);
    assert!(!grid.set(-1, 0, None));
    assert!(!grid.set(4, 0, None));
    assert!(!grid.set(0, 4, None));
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(Grid::from_rows(&[]).is_err());
    assert!(Grid::from_rows(&[vec![2, 4], vec![2]]).is_err());
    assert!(Grid::from_rows(&[vec![3, 0]]).is_err());
}

#[test]
fn test_merge_two_stacked_equal_tiles() {
    // 2x2 grid, column 0 holds 2 over 2.
    let mut grid = Grid::from_rows(&[vec![2, 0], vec![2, 0]]).unwrap();

    assert!(grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![4, 0], vec![0, 0]]);
    assert_eq!(grid.score(), 4);
}

#[test]
fn test_merge_ignores_unlisted_columns() {
    let mut grid = Grid::from_rows(&[vec![2, 8], vec![4, 8]]).unwrap();

    assert!(!grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![2, 8], vec![4, 8]]);
    assert_eq!(grid.score(), 0);
}

#[test]
fn test_merge_three_equal_merges_once() {
    let mut grid = Grid::from_rows(&[vec![8], vec![8], vec![8], vec![0]]).unwrap();

    assert!(grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![16], vec![0], vec![8], vec![0]]);
    assert_eq!(grid.score(), 16);
}

#[test]
fn test_merge_four_equal_merges_pairwise() {
    let mut grid = Grid::from_rows(&[vec![2], vec![2], vec![2], vec![2]]).unwrap();

    assert!(grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![4], vec![0], vec![4], vec![0]]);
    assert_eq!(grid.score(), 8);
}

#[test]
fn test_top_value_tiles_stay_apart() {
    let mut grid = Grid::from_rows(&[vec![MAX_TILE_VALUE], vec![MAX_TILE_VALUE]]).unwrap();

    assert!(!grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![MAX_TILE_VALUE], vec![MAX_TILE_VALUE]]);
    assert_eq!(grid.score(), 0);

    // One step below the cap still merges up to it.
    let half = MAX_TILE_VALUE / 2;
    let mut grid = Grid::from_rows(&[vec![half], vec![half]]).unwrap();
    assert!(grid.merge_columns(&[0]));
    assert_eq!(rows(&grid), vec![vec![MAX_TILE_VALUE], vec![0]]);
}

#[test]
fn test_restore_rejects_values_past_the_cap() {
    let snapshot = GridSnapshot {
        rows: vec![vec![1 << 31], vec![1 << 31]],
        score: 0,
        cleared_lines: 0,
        game_over: false,
    };
    assert!(snapshot.to_grid().is_err());
}

#[test]
fn test_lock_o_piece_without_merges() {
    let mut grid = Grid::new(4, 4);
    let footprint = Footprint::from_values(&[&[2, 4], &[4, 2]], 0, 0).unwrap();

    assert!(!grid.lock_and_resolve(footprint));
    // Top footprint row lands on board row 1.
    assert_eq!(
        rows(&grid),
        vec![vec![4, 2, 0, 0], vec![2, 4, 0, 0], vec![0; 4], vec![0; 4]]
    );
    assert_eq!(grid.score(), 0);

    let event = grid.take_last_event().unwrap();
    assert!(!event.game_over);
    assert_eq!(event.merges, 0);
    assert_eq!(event.lines_cleared, 0);
}

#[test]
fn test_lock_chains_merges_through_settling() {
    let mut grid = Grid::from_rows(&[
        vec![8, 0, 0, 0],
        vec![4, 0, 0, 0],
        vec![0; 4],
        vec![0; 4],
        vec![0; 4],
        vec![0; 4],
    ])
    .unwrap();
    let footprint = Footprint::from_values(&[&[4]], 0, 2).unwrap();

    assert!(!grid.lock_and_resolve(footprint));
    // 4+4 -> 8, then 8+8 -> 16 on the next round.
    assert_eq!(rows(&grid)[0], vec![16, 0, 0, 0]);
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(grid.score(), 24);

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.merges, 2);
    assert_eq!(event.merge_score, 24);
}

#[test]
fn test_lock_triple_leaves_one_unmerged_tile() {
    let mut grid = Grid::from_rows(&[vec![2, 0, 0, 0], vec![2, 0, 0, 0], vec![0; 4], vec![0; 4]])
        .unwrap();
    let footprint = Footprint::from_values(&[&[2]], 0, 2).unwrap();

    assert!(!grid.lock_and_resolve(footprint));
    // Bottom pair merges; the leftover 2 settles onto the 4.
    assert_eq!(rows(&grid)[0], vec![4, 0, 0, 0]);
    assert_eq!(rows(&grid)[1], vec![2, 0, 0, 0]);
    assert_eq!(grid.score(), 4);
}

#[test]
fn test_clear_full_row_scores_its_sum() {
    let mut grid = Grid::from_rows(&[
        vec![8, 0, 0, 0],
        vec![16, 0, 0, 0],
        vec![32, 0, 0, 0],
        vec![2, 4, 8, 16],
        vec![64, 0, 0, 0],
        vec![0, 128, 0, 0],
    ])
    .unwrap();

    assert_eq!(grid.clear_full_rows(), 1);
    assert_eq!(grid.score(), 30);
    assert_eq!(grid.cleared_lines(), 1);
    assert_eq!(
        rows(&grid),
        vec![
            vec![8, 0, 0, 0],
            vec![16, 0, 0, 0],
            vec![32, 0, 0, 0],
            vec![64, 0, 0, 0],
            vec![0, 128, 0, 0],
            vec![0; 4],
        ]
    );
}

#[test]
fn test_clear_cascades_adjacent_full_rows() {
    let mut grid = Grid::from_rows(&[
        vec![2, 4],
        vec![8, 16],
        vec![32, 0],
    ])
    .unwrap();

    assert_eq!(grid.clear_full_rows(), 2);
    assert_eq!(grid.score(), 30);
    assert_eq!(grid.cleared_lines(), 2);
    assert_eq!(rows(&grid), vec![vec![32, 0], vec![0, 0], vec![0, 0]]);
}

#[test]
fn test_lock_completing_row_clears_it() {
    let mut grid = Grid::from_rows(&[
        vec![2, 4, 2, 0],
        vec![0, 16, 0, 0],
        vec![0; 4],
        vec![0; 4],
    ])
    .unwrap();
    let footprint = Footprint::from_values(&[&[8]], 3, 0).unwrap();

    assert!(!grid.lock_and_resolve(footprint));
    assert_eq!(grid.score(), 16);
    assert_eq!(grid.cleared_lines(), 1);
    assert_eq!(rows(&grid)[0], vec![0, 16, 0, 0]);
    assert_eq!(grid.tile_count(), 1);

    let event = grid.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(event.clear_score, 16);
}

#[test]
fn test_settle_keeps_sideways_support() {
    let mut grid = Grid::from_rows(&[
        vec![2, 0, 0, 0],
        vec![4, 8, 0, 0],
        vec![0, 0, 0, 16],
        vec![0; 4],
    ])
    .unwrap();

    assert_eq!(grid.settle(), 1);
    // The 8 hangs off the grounded column; only the lone 16 falls.
    assert_eq!(
        rows(&grid),
        vec![
            vec![2, 0, 0, 16],
            vec![4, 8, 0, 0],
            vec![0; 4],
            vec![0; 4],
        ]
    );
    assert!(grid.is_settled());
}

#[test]
fn test_settle_drops_floating_group_per_column() {
    let mut grid = Grid::from_rows(&[
        vec![2, 0, 0, 0],
        vec![0, 0, 0, 16],
        vec![0, 4, 8, 0],
        vec![0, 0, 0, 32],
    ])
    .unwrap();

    grid.settle();
    assert_eq!(
        rows(&grid),
        vec![
            vec![2, 4, 8, 16],
            vec![0, 0, 0, 32],
            vec![0; 4],
            vec![0; 4],
        ]
    );
}

#[test]
fn test_settle_includes_top_row() {
    let mut grid = Grid::from_rows(&[vec![0, 0], vec![0, 0], vec![0, 64]]).unwrap();

    assert_eq!(grid.settle(), 1);
    assert_eq!(rows(&grid), vec![vec![0, 64], vec![0, 0], vec![0, 0]]);
}

#[test]
fn test_settle_is_idempotent() {
    let mut grid = Grid::from_rows(&[
        vec![2, 0, 4, 0],
        vec![8, 0, 0, 0],
        vec![8, 16, 0, 2],
        vec![0, 0, 4, 0],
        vec![32, 0, 0, 0],
    ])
    .unwrap();

    grid.settle();
    let once = rows(&grid);
    assert_eq!(grid.settle(), 0);
    assert_eq!(rows(&grid), once);
    assert!(grid.is_settled());
}

#[test]
fn test_lock_overflow_is_game_over() {
    let mut grid = Grid::new(4, 4);
    // Two stacked cells; the top one lands on row 4, outside the board.
    let footprint = Footprint::from_values(&[&[2], &[4]], 0, 3).unwrap();

    assert!(grid.lock_and_resolve(footprint));
    assert!(grid.game_over());
    assert_eq!(grid.get(3, 0).flatten().map(|t| t.value()), Some(4));
    assert!(grid.take_last_event().unwrap().game_over);

    // Further locks are refused.
    let before = rows(&grid);
    let footprint = Footprint::from_values(&[&[2]], 2, 0).unwrap();
    assert!(grid.lock_and_resolve(footprint));
    assert_eq!(rows(&grid), before);
}

#[test]
fn test_footprint_rejects_oversized_input() {
    let wide: &[u32] = &[2, 2, 2, 2, 2];
    assert!(Footprint::from_values(&[wide], 0, 0).is_err());
    let ragged: [&[u32]; 2] = [&[2, 2], &[2]];
    assert!(Footprint::from_values(&ragged, 0, 0).is_err());
}
