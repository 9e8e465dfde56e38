use minesweeper::{neighbors, reveal_from, Cover, CoverState, MineField, Position, Tile};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashSet, VecDeque};

fn board() -> impl Strategy<Value = (usize, usize, usize, u64)> {
    (1usize..12, 1usize..12, any::<u64>()).prop_flat_map(|(rows, cols, seed)| {
        (Just(rows), Just(cols), 0..rows * cols, Just(seed))
    })
}

fn cell() -> impl Strategy<Value = (usize, usize, usize, usize)> {
    (1usize..20, 1usize..20).prop_flat_map(|(rows, cols)| (Just(rows), Just(cols), 0..rows, 0..cols))
}

/// Zero region connected to `origin` plus its border, computed independently.
fn expected_region(field: &MineField, origin: Position) -> HashSet<Position> {
    let (rows, cols) = field.dimensions();
    let mut region = HashSet::new();
    let mut seen = HashSet::from([origin]);
    let mut queue = VecDeque::from([origin]);
    while let Some(pos) = queue.pop_front() {
        region.insert(pos);
        if field[pos] != Tile::Clear(0) {
            continue;
        }
        for next in neighbors(pos.row, pos.col, rows, cols) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

proptest! {
    #[test]
    fn generated_fields_are_consistent((rows, cols, mines, seed) in board()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = MineField::generate(rows, cols, mines, &mut rng).unwrap();

        let placed = field.iter().filter(|(_, tile)| tile.is_mine()).count();
        prop_assert_eq!(placed, mines);

        for (pos, tile) in field.iter() {
            prop_assert!((-1..=8).contains(&tile.value()));
            if let Tile::Clear(count) = tile {
                let mined = neighbors(pos.row, pos.col, rows, cols)
                    .into_iter()
                    .filter(|&n| field.is_mine(n))
                    .count();
                prop_assert_eq!(count as usize, mined);
            }
        }
    }

    #[test]
    fn neighbors_stay_on_the_board((rows, cols, row, col) in cell()) {
        let found = neighbors(row, col, rows, cols);
        let unique: HashSet<_> = found.iter().copied().collect();
        prop_assert_eq!(unique.len(), found.len());
        prop_assert!(found.len() <= 8);
        prop_assert!(found.iter().all(|p| p.is_within(rows, cols)));
        prop_assert!(!found.contains(&Position::new(row, col)));
        if rows >= 2 && cols >= 2 {
            prop_assert!(found.len() >= 3);
        }
    }

    #[test]
    fn reveal_is_idempotent((rows, cols, mines, seed) in board(), pick in any::<prop::sample::Index>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = MineField::generate(rows, cols, mines, &mut rng).unwrap();
        let origin = Position::new(pick.index(rows * cols) / cols, pick.index(rows * cols) % cols);

        let mut once = CoverState::new(rows, cols);
        reveal_from(origin, &mut once, &field).unwrap();
        let mut twice = once.clone();
        reveal_from(origin, &mut twice, &field).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn reveal_opens_exactly_the_zero_region((rows, cols, mines, seed) in board(), pick in any::<prop::sample::Index>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = MineField::generate(rows, cols, mines, &mut rng).unwrap();
        let zeros: Vec<Position> = field
            .iter()
            .filter(|(_, tile)| *tile == Tile::Clear(0))
            .map(|(pos, _)| pos)
            .collect();
        prop_assume!(!zeros.is_empty());
        let origin = zeros[pick.index(zeros.len())];

        let mut cover = CoverState::new(rows, cols);
        cover.set(origin, Cover::Revealed).unwrap();
        reveal_from(origin, &mut cover, &field).unwrap();

        let opened: HashSet<Position> = cover
            .iter()
            .filter(|(_, c)| *c == Cover::Revealed)
            .map(|(pos, _)| pos)
            .collect();
        prop_assert_eq!(opened, expected_region(&field, origin));
        prop_assert!(!field.iter().any(|(pos, tile)| tile.is_mine() && cover[pos] == Cover::Revealed));
    }

    #[test]
    fn reveal_never_touches_flags((rows, cols, mines, seed) in board(), flags in prop::collection::vec(any::<prop::sample::Index>(), 0..6)) {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = MineField::generate(rows, cols, mines, &mut rng).unwrap();
        let mut cover = CoverState::new(rows, cols);
        let flagged: Vec<Position> = flags
            .iter()
            .map(|i| {
                let n = i.index(rows * cols);
                Position::new(n / cols, n % cols)
            })
            .collect();
        for &pos in &flagged {
            cover.set(pos, Cover::Flagged).unwrap();
        }

        for (origin, _) in field.iter() {
            reveal_from(origin, &mut cover, &field).unwrap();
        }
        for pos in flagged {
            prop_assert_eq!(cover[pos], Cover::Flagged);
        }
    }
}
