use wayfinder_core::{GridDimensions, ObstacleSet, Position, TerrainGrid, TerrainKind};
use wayfinder_system_pathfinding::{search, Pathfinder};

fn open_grid(rows: u32, cols: u32) -> TerrainGrid {
    TerrainGrid::filled(GridDimensions::new(rows, cols), TerrainKind::Open)
}

fn assert_walkable(grid: &TerrainGrid, path: &[Position]) {
    let view = grid.view(ObstacleSet::default(), 0);
    for pair in path.windows(2) {
        assert!(
            pair[0].delta_to(pair[1]).is_step(),
            "{:?} -> {:?} is not a single step",
            pair[0],
            pair[1]
        );
        assert!(view.is_passable(pair[1]), "{:?} is obstructed", pair[1]);
    }
}

#[test]
fn diagonal_route_across_open_grid() {
    let grid = open_grid(5, 5);
    let path = search(
        grid.view(ObstacleSet::default(), 0),
        Position::new(0, 0),
        Position::new(4, 4),
    );

    assert_eq!(
        path,
        vec![
            Position::new(0, 0),
            Position::new(1, 1),
            Position::new(2, 2),
            Position::new(3, 3),
            Position::new(4, 4),
        ]
    );
}

#[test]
fn start_equal_to_goal_yields_single_waypoint() {
    let grid = open_grid(5, 5);
    let goal = Position::new(2, 2);
    let path = search(grid.view(ObstacleSet::default(), 0), goal, goal);
    assert_eq!(path, vec![goal]);
}

#[test]
fn open_grid_paths_take_chebyshev_step_counts() {
    let grid = open_grid(6, 7);
    let view = grid.view(ObstacleSet::default(), 0);
    let mut pathfinder = Pathfinder::new();

    for start in grid.dimensions().positions() {
        for goal in grid.dimensions().positions() {
            let path = pathfinder.search(view, start, goal);
            let steps = start.x().abs_diff(goal.x()).max(start.y().abs_diff(goal.y()));

            assert_eq!(
                path.len(),
                steps as usize + 1,
                "unexpected length for {start:?} -> {goal:?}"
            );
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            assert_walkable(&grid, &path);
        }
    }
}

#[test]
fn goal_enclosed_by_obstacles_is_unreachable() {
    let grid = TerrainGrid::from_rows(&[".....", ".###.", ".#.#.", ".###.", "....."])
        .expect("valid rows");
    let path = search(
        grid.view(ObstacleSet::default(), 0),
        Position::new(0, 0),
        Position::new(2, 2),
    );
    assert!(path.is_empty());
}

#[test]
fn obstructed_or_out_of_bounds_goals_are_unreachable() {
    let grid = TerrainGrid::from_rows(&["...", ".^.", "..."]).expect("valid rows");
    let view = grid.view(ObstacleSet::default(), 0);

    assert!(search(view, Position::new(0, 0), Position::new(1, 1)).is_empty());
    assert!(search(view, Position::new(0, 0), Position::new(3, 1)).is_empty());
}

#[test]
fn goal_at_coordinate_limit_is_unreachable() {
    let grid = open_grid(3, 3);
    let view = grid.view(ObstacleSet::default(), 0);
    let mut pathfinder = Pathfinder::default();

    assert!(pathfinder
        .search(view, Position::new(0, 0), Position::new(u32::MAX, u32::MAX))
        .is_empty());
    assert!(pathfinder
        .search(view, Position::new(2, 2), Position::new(u32::MAX, 0))
        .is_empty());
    assert_eq!(
        pathfinder.search(view, Position::new(0, 0), Position::new(1, 1)),
        vec![Position::new(0, 0), Position::new(1, 1)]
    );
}

#[test]
fn obstacle_set_controls_passability() {
    let grid = TerrainGrid::from_rows(&["...", ".^.", "..."]).expect("valid rows");
    let permissive = ObstacleSet::EMPTY.with(TerrainKind::Obstacle);
    let path = search(
        grid.view(permissive, 0),
        Position::new(0, 0),
        Position::new(1, 1),
    );
    assert_eq!(path, vec![Position::new(0, 0), Position::new(1, 1)]);
}

#[test]
fn route_detours_through_gap_in_wall() {
    let grid = TerrainGrid::from_rows(&[".....", ".....", "^^^^.", ".....", "....."])
        .expect("valid rows");
    let path = search(
        grid.view(ObstacleSet::default(), 0),
        Position::new(0, 0),
        Position::new(4, 0),
    );

    assert_eq!(
        path,
        vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 2),
            Position::new(1, 3),
            Position::new(2, 4),
            Position::new(3, 3),
            Position::new(3, 2),
            Position::new(3, 1),
            Position::new(4, 0),
        ]
    );
    assert_walkable(&grid, &path);
}

#[test]
fn reused_pathfinder_matches_fresh_searches() {
    let grid = TerrainGrid::from_rows(&[
        "......",
        ".##...",
        "...#..",
        ".^.#..",
        "......",
    ])
    .expect("valid rows");
    let view = grid.view(ObstacleSet::default(), 0);
    let goal = Position::new(4, 5);
    let mut pathfinder = Pathfinder::new();

    let starts = [
        Position::new(0, 0),
        Position::new(2, 2),
        Position::new(4, 0),
        Position::new(0, 5),
        Position::new(0, 0),
    ];
    for start in starts {
        assert_eq!(pathfinder.search(view, start, goal), search(view, start, goal));
    }
}

#[test]
fn pathfinder_adapts_to_grid_size_changes() {
    let mut pathfinder = Pathfinder::new();
    let small = open_grid(2, 2);
    let large = open_grid(8, 3);

    let first = pathfinder.search(
        small.view(ObstacleSet::default(), 0),
        Position::new(0, 0),
        Position::new(1, 1),
    );
    let second = pathfinder.search(
        large.view(ObstacleSet::default(), 1),
        Position::new(7, 2),
        Position::new(0, 0),
    );

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 8);
    assert_eq!(second.last(), Some(&Position::new(0, 0)));
}
