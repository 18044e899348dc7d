use std::collections::HashSet;

use snake_pilot_core::{CellCoord, Direction, GameConfig, Grid};
use snake_pilot_system_pathfinding::{find_path, PathPlanner};
use snake_pilot_world::{query, World};

fn cell(column: i32, row: i32) -> CellCoord {
    CellCoord::new(column, row)
}

fn assert_connected(cells: &[CellCoord]) {
    for pair in cells.windows(2) {
        assert!(
            Direction::between(pair[0], pair[1]).is_some(),
            "{:?} and {:?} are not 4-adjacent",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn identical_endpoints_yield_a_single_cell() {
    let grid = Grid::new(10, 10).expect("valid grid");

    let path = find_path(&grid, &HashSet::new(), cell(4, 4), cell(4, 4));

    assert_eq!(path.cells(), &[cell(4, 4)]);
    assert!(!path.is_actionable());
}

#[test]
fn open_grid_paths_match_manhattan_distance() {
    let grid = Grid::new(12, 9).expect("valid grid");
    let mut planner = PathPlanner::new();
    let pairs = [
        (cell(0, 0), cell(11, 8)),
        (cell(11, 8), cell(0, 0)),
        (cell(5, 2), cell(5, 7)),
        (cell(3, 4), cell(9, 4)),
        (cell(10, 1), cell(2, 6)),
    ];

    for (source, target) in pairs {
        let path = planner.find_path(&grid, &HashSet::new(), source, target);

        let expected = usize::try_from(source.manhattan_distance(target)).expect("fits") + 1;
        assert_eq!(path.len(), expected, "{source:?} -> {target:?}");
        assert_eq!(path.source(), Some(source));
        assert_eq!(path.target(), Some(target));
        assert_connected(path.cells());
    }
}

#[test]
fn enclosed_target_is_unreachable() {
    let grid = Grid::new(10, 10).expect("valid grid");
    let target = cell(5, 5);
    let obstacles: HashSet<_> = Direction::ALL
        .into_iter()
        .map(|direction| target.step(direction))
        .collect();

    let path = find_path(&grid, &obstacles, cell(0, 0), target);

    assert!(path.is_empty());
}

#[test]
fn target_in_a_walled_corner_is_unreachable() {
    let grid = Grid::new(6, 6).expect("valid grid");
    let obstacles: HashSet<_> = [cell(0, 1), cell(1, 1), cell(1, 0)].into_iter().collect();

    let path = find_path(&grid, &obstacles, cell(5, 5), cell(0, 0));

    assert!(path.is_empty());
}

#[test]
fn obstacles_force_a_detour() {
    let grid = Grid::new(7, 5).expect("valid grid");
    let wall: HashSet<_> = (0..4).map(|row| cell(3, row)).collect();

    let path = find_path(&grid, &wall, cell(1, 1), cell(5, 1));

    assert!(path.cells().iter().all(|step| !wall.contains(step)));
    assert!(path.cells().contains(&cell(3, 4)));
    assert_eq!(path.len(), 11);
    assert_connected(path.cells());
}

#[test]
fn source_is_passable_even_when_listed_as_an_obstacle() {
    let grid = Grid::new(5, 5).expect("valid grid");
    let obstacles: HashSet<_> = [cell(2, 2), cell(2, 1)].into_iter().collect();

    let path = find_path(&grid, &obstacles, cell(2, 2), cell(2, 4));

    assert_eq!(path.cells(), &[cell(2, 2), cell(2, 3), cell(2, 4)]);
}

#[test]
fn off_grid_endpoints_yield_an_empty_path() {
    let grid = Grid::new(5, 5).expect("valid grid");

    assert!(find_path(&grid, &HashSet::new(), cell(-1, 0), cell(2, 2)).is_empty());
    assert!(find_path(&grid, &HashSet::new(), cell(0, 0), cell(5, 2)).is_empty());
}

#[test]
fn snake_body_routes_around_itself() {
    let config = GameConfig {
        columns: 10,
        rows: 10,
        starting_body: vec![cell(3, 3), cell(3, 4), cell(3, 5), cell(2, 5), cell(1, 5)],
        ..GameConfig::default()
    };
    let world = World::new(config).expect("valid config");
    let body = query::body(&world);
    let head = body.first().expect("head");

    let path = find_path(query::grid(&world), &body.to_set(), head, cell(3, 7));

    assert_eq!(path.source(), Some(head));
    assert!(path.cells()[1..].iter().all(|step| !body.contains(*step)));
    assert_eq!(path.len(), 7);
    assert_connected(path.cells());
}

#[test]
fn repeated_searches_are_deterministic() {
    let grid = Grid::new(15, 15).expect("valid grid");
    let obstacles: HashSet<_> = (2..13).map(|row| cell(7, row)).collect();
    let mut reused = PathPlanner::new();

    let first = reused.find_path(&grid, &obstacles, cell(1, 7), cell(13, 7));
    let second = reused.find_path(&grid, &obstacles, cell(1, 7), cell(13, 7));
    let fresh = find_path(&grid, &obstacles, cell(1, 7), cell(13, 7));

    assert_eq!(first, second);
    assert_eq!(first, fresh);
    assert!(reused.explored() > 0);
}
