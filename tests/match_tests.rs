//! Match detection tests - connectivity rules and full-scan properties

use std::collections::HashSet;

use chuzzle_board::core::{ColorGrid, GridModel, MatchDetector, SimpleRng};
use chuzzle_board::types::{Cell, ColorSet};

fn random_grid(rows: usize, columns: usize, palette_size: u8, rng: &mut SimpleRng) -> GridModel {
    let palette = ColorSet::palette(palette_size);
    GridModel::from_fn(rows, columns, |_| rng.pick_color(palette).unwrap()).unwrap()
}

#[test]
fn test_full_scan_groups_are_disjoint_and_complete() {
    let mut rng = SimpleRng::new(31337);
    for round in 0..200 {
        let rows = 1 + rng.next_range(7) as usize;
        let columns = 1 + rng.next_range(7) as usize;
        // Small palettes make large irregular groups common.
        let palette_size = 3 + rng.next_range(3) as u8;
        let min_match = 2 + rng.next_range(3) as usize;
        let grid = random_grid(rows, columns, palette_size, &mut rng);
        let detector = MatchDetector::new(min_match);

        let groups = detector.find_all_match_groups(&grid);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.len() >= min_match, "round {}: undersized group", round);
            for &cell in &group.cells {
                assert!(seen.insert(cell), "round {}: {} in two groups", round, cell);
                assert_eq!(grid.color_at(cell), Some(group.color));
            }
        }

        let expected: HashSet<Cell> = grid
            .tiles()
            .map(|(cell, _)| cell)
            .filter(|&cell| detector.has_match_at(&grid, cell).unwrap())
            .collect();
        assert_eq!(seen, expected, "round {}:\n{}", round, grid);
    }
}

#[test]
fn test_connected_group_is_maximal_component() {
    let mut rng = SimpleRng::new(8);
    for _ in 0..100 {
        let grid = random_grid(6, 6, 3, &mut rng);
        let detector = MatchDetector::default();
        let seed = Cell::new(rng.next_range(6) as usize, rng.next_range(6) as usize);
        let group = detector.find_connected_group(&grid, seed).unwrap();

        assert!(group.contains(seed));
        for &cell in &group.cells {
            // Every member keeps the seed color, and every same-colored
            // 4-neighbor is a member too.
            assert_eq!(grid.color_at(cell), grid.color_at(seed));
            let neighbors = [
                cell.row.checked_sub(1).map(|r| Cell::new(r, cell.col)),
                Some(Cell::new(cell.row + 1, cell.col)),
                cell.col.checked_sub(1).map(|c| Cell::new(cell.row, c)),
                Some(Cell::new(cell.row, cell.col + 1)),
            ];
            for next in neighbors.into_iter().flatten() {
                if grid.color_at(next) == grid.color_at(seed) {
                    assert!(group.contains(next), "{} missing from group", next);
                }
            }
        }
    }
}

#[test]
fn test_irregular_shapes_match() {
    // Each color forms one bent group of four.
    let grid = GridModel::parse(
        "gggo\n\
         ogoo\n\
         pppo\n\
         opbb",
    )
    .unwrap();
    let groups = MatchDetector::default().find_all_match_groups(&grid);
    let sizes: Vec<(char, usize)> = groups
        .iter()
        .map(|g| (g.color.symbol(), g.len()))
        .collect();
    assert_eq!(sizes, vec![('g', 4), ('o', 4), ('p', 4)]);
}

#[test]
fn test_diagonal_and_wrap_contact_do_not_connect() {
    let grid = GridModel::parse(
        "rbr\n\
         brb\n\
         rbr",
    )
    .unwrap();
    let detector = MatchDetector::default();
    assert!(detector.find_all_match_groups(&grid).is_empty());

    // The two reds on row 0 touch only across the wrap.
    let grid = GridModel::parse("rgbr\nbgrg").unwrap();
    let group = detector.find_connected_group(&grid, Cell::new(0, 0)).unwrap();
    assert_eq!(group.cells, vec![Cell::new(0, 0)]);
}

#[test]
fn test_min_match_count_is_respected() {
    let grid = GridModel::parse("rrgb\nopyw").unwrap();
    assert!(MatchDetector::new(3).find_all_match_groups(&grid).is_empty());
    assert_eq!(MatchDetector::new(2).find_all_match_groups(&grid).len(), 1);
    assert_eq!(MatchDetector::new(1).find_all_match_groups(&grid).len(), 7);
}
