use std::collections::HashSet;

use nonograms::solver::candidates::{candidates, runs};
use nonograms::{CellState, Clue, Solver};
use proptest::prelude::*;

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn grid_clues(grid: &[Vec<bool>]) -> (Vec<Clue>, Vec<Clue>) {
    let rows = grid.iter().map(|row| runs(row)).collect();
    let cols = (0..grid[0].len())
        .map(|x| runs(&grid.iter().map(|row| row[x]).collect::<Vec<_>>()))
        .collect();
    (rows, cols)
}

proptest! {
    #[test]
    fn every_filling_matches_its_clue(
        clue in prop::collection::vec(1usize..5, 0..4),
        slack in 0usize..6,
    ) {
        let k = clue.len();
        let needed = clue.iter().sum::<usize>() + k.saturating_sub(1);
        let length = needed + slack;

        let fills: Vec<Vec<bool>> = candidates(length, &clue).collect();
        for fill in &fills {
            prop_assert_eq!(fill.len(), length);
            prop_assert_eq!(&runs(fill), &clue);
        }
        let unique: HashSet<_> = fills.iter().collect();
        prop_assert_eq!(unique.len(), fills.len());
        prop_assert_eq!(fills.len(), binomial(slack + k, k));
    }

    #[test]
    fn overlong_clues_have_no_filling(
        clue in prop::collection::vec(1usize..5, 1..4),
        short in 1usize..3,
    ) {
        let needed = clue.iter().sum::<usize>() + clue.len() - 1;
        prop_assert_eq!(candidates(needed.saturating_sub(short), &clue).count(), 0);
    }

    #[test]
    fn solver_only_decides_what_the_clues_force(
        grid in (1usize..7, 1usize..7).prop_flat_map(|(w, h)| {
            prop::collection::vec(prop::collection::vec(any::<bool>(), w), h)
        })
    ) {
        let (rows, cols) = grid_clues(&grid);
        let mut solver = Solver::new(rows, cols).unwrap();
        let result = solver.solve();
        if let Err(e) = &result {
            prop_assert!(e.is_dubious(), "{}", e);
        }
        for (row, expected) in solver.state().iter().zip(&grid) {
            for (cell, &filled) in row.iter().zip(expected) {
                prop_assert!(cell.accepts(filled));
                if result.is_ok() {
                    prop_assert_ne!(*cell, CellState::Undecided);
                }
            }
        }
    }
}
