#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for wayfinder.
//!
//! The world owns the terrain, the agent's true position, the optional goal,
//! and the tick counter. It only changes through [`apply`], and everything it
//! holds is readable through the [`query`] module.

mod terrain;

pub use terrain::{NoiseTerrain, TerrainGenerator};

use wayfinder_core::{
    Command, Event, MoveError, ObstacleSet, PlacementError, Position, TerrainGrid,
};

/// Represents the authoritative wayfinder world state.
#[derive(Debug, Default)]
pub struct World {
    terrain: TerrainGrid,
    obstacles: ObstacleSet,
    revision: u64,
    agent: Option<Position>,
    goal: Option<Position>,
    tick_index: u64,
}

impl World {
    /// Creates an empty world; terrain arrives through a configure command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn install(
        &mut self,
        terrain: TerrainGrid,
        obstacles: ObstacleSet,
        out_events: &mut Vec<Event>,
    ) {
        self.terrain = terrain;
        self.obstacles = obstacles;
        self.revision = self.revision.wrapping_add(1);
        self.agent = None;
        out_events.push(Event::WorldConfigured {
            dimensions: self.terrain.dimensions(),
            revision: self.revision,
        });

        if self.goal.take().is_some() {
            out_events.push(Event::GoalChanged { goal: None });
        }
    }

    fn placement_error(&self, position: Position) -> Option<PlacementError> {
        if !self.terrain.dimensions().contains(position) {
            return Some(PlacementError::OutOfBounds);
        }

        if !query::terrain(self).is_passable(position) {
            return Some(PlacementError::Obstructed);
        }

        None
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureWorld {
            dimensions,
            seed,
            obstacles,
        } => {
            let terrain = NoiseTerrain::new(seed).generate(dimensions);
            world.install(terrain, obstacles, out_events);
        }
        Command::LoadTerrain { terrain, obstacles } => {
            world.install(terrain, obstacles, out_events);
        }
        Command::PlaceAgent { position } => match world.placement_error(position) {
            Some(reason) => out_events.push(Event::AgentPlacementRejected { position, reason }),
            None => {
                world.agent = Some(position);
                out_events.push(Event::AgentPlaced { position });
            }
        },
        Command::SetGoal { goal } => {
            world.goal = goal;
            out_events.push(Event::GoalChanged { goal });
        }
        Command::MoveAgent { to } => match (world.agent, query::step_error(world, to)) {
            (Some(from), None) => {
                world.agent = Some(to);
                out_events.push(Event::AgentMoved { from, to });
            }
            (_, reason) => out_events.push(Event::MoveRejected {
                to,
                reason: reason.unwrap_or(MoveError::NoAgent),
            }),
        },
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use wayfinder_core::{GridDelta, GridDimensions, MoveError, Position, TerrainView};

    /// Provides a read-only view of the terrain and its obstacle set.
    #[must_use]
    pub fn terrain(world: &World) -> TerrainView<'_> {
        world.terrain.view(world.obstacles, world.revision)
    }

    /// Dimensions of the installed terrain.
    #[must_use]
    pub fn dimensions(world: &World) -> GridDimensions {
        world.terrain.dimensions()
    }

    /// True position of the agent, if one has been placed.
    #[must_use]
    pub fn agent(world: &World) -> Option<Position> {
        world.agent
    }

    /// Currently active goal, if any.
    #[must_use]
    pub fn goal(world: &World) -> Option<Position> {
        world.goal
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }

    /// Reason the agent could not step onto `to`, or `None` when it can.
    #[must_use]
    pub fn step_error(world: &World, to: Position) -> Option<MoveError> {
        let Some(from) = world.agent else {
            return Some(MoveError::NoAgent);
        };

        let view = terrain(world);
        if !view.dimensions().contains(to) {
            return Some(MoveError::OutOfBounds);
        }

        if !from.delta_to(to).is_step() {
            return Some(MoveError::NotAdjacent);
        }

        if !view.is_passable(to) {
            return Some(MoveError::Obstructed);
        }

        None
    }

    /// Picks the cell where a fresh agent should start.
    ///
    /// Walks diagonally from the grid centre, wrapping at the edges, until an
    /// open cell turns up; falls back to the first open cell in row-major order.
    #[must_use]
    pub fn spawn_point(world: &World) -> Option<Position> {
        let view = terrain(world);
        let dimensions = view.dimensions();
        let centre = dimensions.wrap(
            i64::from(dimensions.rows() / 2),
            i64::from(dimensions.cols() / 2),
        )?;

        let mut candidate = centre;
        for _ in 0..dimensions.cell_count() {
            candidate = dimensions.offset(candidate, GridDelta::new(1, 1))?;
            if view.is_passable(candidate) {
                return Some(candidate);
            }
        }

        dimensions
            .positions()
            .find(|position| view.is_passable(*position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::{GridDimensions, TerrainKind};

    fn world_with_rows(rows: &[&str]) -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadTerrain {
                terrain: TerrainGrid::from_rows(rows).expect("valid rows"),
                obstacles: ObstacleSet::default(),
            },
            &mut events,
        );
        (world, events)
    }

    #[test]
    fn configure_world_generates_terrain_of_requested_size() {
        let mut world = World::new();
        let mut events = Vec::new();
        let dimensions = GridDimensions::new(12, 8);

        apply(
            &mut world,
            Command::ConfigureWorld {
                dimensions,
                seed: 99,
                obstacles: ObstacleSet::default(),
            },
            &mut events,
        );

        assert_eq!(query::dimensions(&world), dimensions);
        assert_eq!(query::terrain(&world).cells().len(), 96);
        assert_eq!(
            events,
            vec![Event::WorldConfigured {
                dimensions,
                revision: 1,
            }]
        );
    }

    #[test]
    fn reconfiguring_bumps_revision_and_clears_agent_and_goal() {
        let (mut world, _) = world_with_rows(&["...", "...", "..."]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceAgent {
                position: Position::new(1, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SetGoal {
                goal: Some(Position::new(2, 2)),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::LoadTerrain {
                terrain: TerrainGrid::filled(GridDimensions::new(2, 2), TerrainKind::Open),
                obstacles: ObstacleSet::default(),
            },
            &mut events,
        );

        assert_eq!(query::terrain(&world).revision(), 2);
        assert_eq!(query::agent(&world), None);
        assert_eq!(query::goal(&world), None);
        assert_eq!(
            events,
            vec![
                Event::WorldConfigured {
                    dimensions: GridDimensions::new(2, 2),
                    revision: 2,
                },
                Event::GoalChanged { goal: None },
            ]
        );
    }

    #[test]
    fn placement_rejects_obstacles_and_out_of_bounds() {
        let (mut world, _) = world_with_rows(&[".#", ".."]);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PlaceAgent {
                position: Position::new(0, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::PlaceAgent {
                position: Position::new(5, 0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::AgentPlacementRejected {
                    position: Position::new(0, 1),
                    reason: PlacementError::Obstructed,
                },
                Event::AgentPlacementRejected {
                    position: Position::new(5, 0),
                    reason: PlacementError::OutOfBounds,
                },
            ]
        );
        assert_eq!(query::agent(&world), None);
    }

    #[test]
    fn goals_are_accepted_without_validation() {
        let (mut world, _) = world_with_rows(&["..", ".."]);
        let mut events = Vec::new();
        let far_away = Position::new(40, 40);

        apply(
            &mut world,
            Command::SetGoal {
                goal: Some(far_away),
            },
            &mut events,
        );

        assert_eq!(query::goal(&world), Some(far_away));
        assert_eq!(
            events,
            vec![Event::GoalChanged {
                goal: Some(far_away)
            }]
        );
    }

    #[test]
    fn move_agent_accepts_diagonal_steps() {
        let (mut world, _) = world_with_rows(&["...", "...", "..."]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceAgent {
                position: Position::new(0, 0),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut world,
            Command::MoveAgent {
                to: Position::new(1, 1),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::AgentMoved {
                from: Position::new(0, 0),
                to: Position::new(1, 1),
            }]
        );
        assert_eq!(query::agent(&world), Some(Position::new(1, 1)));
    }

    #[test]
    fn move_agent_rejects_invalid_steps() {
        let (mut world, _) = world_with_rows(&[".#.", "...", "..."]);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveAgent {
                to: Position::new(1, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::PlaceAgent {
                position: Position::new(0, 0),
            },
            &mut events,
        );
        events.clear();

        for to in [
            Position::new(0, 1),
            Position::new(2, 2),
            Position::new(0, 0),
            Position::new(3, 0),
        ] {
            apply(&mut world, Command::MoveAgent { to }, &mut events);
        }

        let reasons: Vec<MoveError> = events
            .iter()
            .filter_map(|event| match event {
                Event::MoveRejected { reason, .. } => Some(*reason),
                _ => None,
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                MoveError::Obstructed,
                MoveError::NotAdjacent,
                MoveError::NotAdjacent,
                MoveError::OutOfBounds,
            ]
        );
        assert_eq!(query::agent(&world), Some(Position::new(0, 0)));
    }

    #[test]
    fn move_without_agent_is_rejected() {
        let (mut world, _) = world_with_rows(&["..", ".."]);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveAgent {
                to: Position::new(1, 1),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::MoveRejected {
                to: Position::new(1, 1),
                reason: MoveError::NoAgent,
            }]
        );
    }

    #[test]
    fn tick_advances_counter() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        apply(&mut world, Command::Tick, &mut events);
        assert_eq!(query::tick(&world), 2);
        assert_eq!(events.last(), Some(&Event::TimeAdvanced { tick: 2 }));
    }

    #[test]
    fn spawn_point_walks_diagonally_from_centre() {
        let (world, _) = world_with_rows(&[".....", ".....", ".....", "...#.", "....."]);
        assert_eq!(query::spawn_point(&world), Some(Position::new(4, 4)));
    }

    #[test]
    fn spawn_point_falls_back_to_first_open_cell() {
        // The diagonal through the centre only visits (0, 0) and (1, 1).
        let (world, _) = world_with_rows(&["#.", "##"]);
        assert_eq!(query::spawn_point(&world), Some(Position::new(0, 1)));
    }

    #[test]
    fn spawn_point_is_none_when_everything_is_blocked() {
        let (world, _) = world_with_rows(&["#^", "^#"]);
        assert_eq!(query::spawn_point(&world), None);
    }
}
