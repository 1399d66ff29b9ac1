#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven simulation loop tying the world, the pathfinder, and the
//! belief filter together.
//!
//! Each call to [`Simulation::step`] senses, replans, moves at most one cell,
//! and propagates the belief under that move, in that order. All mutations of
//! the world go through [`wayfinder_world::apply`].

use thiserror::Error;
use tracing::debug;
use wayfinder_core::{
    BeliefView, Command, ConfigError, Event, GridDelta, GridDimensions, PlacementError, Position,
    SimulationConfig, TerrainGrid, TerrainView,
};
use wayfinder_system_localization::BeliefFilter;
use wayfinder_system_pathfinding::Pathfinder;
use wayfinder_world::{apply, query, World};

/// Reasons a simulation cannot be built.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The terrain has no passable cell to start the agent on.
    #[error("terrain has no passable cell for the agent")]
    NoOpenCell,
    /// The requested start cell was rejected by the world.
    #[error("cannot start at ({}, {}): {reason}", .position.x(), .position.y())]
    InvalidStart {
        /// Requested start cell.
        position: Position,
        /// Reason the world rejected it.
        reason: PlacementError,
    },
}

/// Where a freshly built world gets its terrain from.
enum TerrainSource {
    Generated,
    Supplied(TerrainGrid),
}

/// Explicit simulation state advanced one tick at a time.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    filter: BeliefFilter,
    pathfinder: Pathfinder,
    path: Vec<Position>,
}

impl Simulation {
    /// Generates terrain from the configured seed and places the agent at the
    /// spawn point.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        let mut events = Vec::new();
        Self::build(config, TerrainSource::Generated, None, &mut events)
    }

    /// Builds a simulation over externally supplied terrain.
    ///
    /// The grid's own dimensions replace `config.rows` and `config.cols`.
    /// Without an explicit `start` the agent is placed at the spawn point.
    pub fn with_terrain(
        mut config: SimulationConfig,
        terrain: TerrainGrid,
        start: Option<Position>,
    ) -> Result<Self, SimulationError> {
        let dimensions = terrain.dimensions();
        config.rows = dimensions.rows();
        config.cols = dimensions.cols();

        let mut events = Vec::new();
        Self::build(config, TerrainSource::Supplied(terrain), start, &mut events)
    }

    fn build(
        config: SimulationConfig,
        source: TerrainSource,
        start: Option<Position>,
        out_events: &mut Vec<Event>,
    ) -> Result<Self, SimulationError> {
        let filter = BeliefFilter::from_config(&config)?;

        let mut world = World::new();
        let command = match source {
            TerrainSource::Generated => Command::ConfigureWorld {
                dimensions: config.dimensions(),
                seed: config.seed,
                obstacles: config.obstacles,
            },
            TerrainSource::Supplied(terrain) => Command::LoadTerrain {
                terrain,
                obstacles: config.obstacles,
            },
        };
        apply(&mut world, command, out_events);

        let position = match start {
            Some(position) => position,
            None => query::spawn_point(&world).ok_or(SimulationError::NoOpenCell)?,
        };

        let first_new = out_events.len();
        apply(&mut world, Command::PlaceAgent { position }, out_events);
        let rejection = out_events[first_new..].iter().find_map(|event| match event {
            Event::AgentPlacementRejected { reason, .. } => Some(*reason),
            _ => None,
        });
        if let Some(reason) = rejection {
            return Err(SimulationError::InvalidStart { position, reason });
        }

        debug!(
            rows = config.rows,
            cols = config.cols,
            start_x = position.x(),
            start_y = position.y(),
            "simulation ready"
        );

        Ok(Self {
            config,
            world,
            filter,
            pathfinder: Pathfinder::new(),
            path: Vec::new(),
        })
    }

    /// Sets or clears the goal. Clearing it also clears the stored path.
    pub fn set_goal(&mut self, goal: Option<Position>, out_events: &mut Vec<Event>) {
        apply(&mut self.world, Command::SetGoal { goal }, out_events);
        if goal.is_none() {
            self.path.clear();
        }
    }

    /// Regenerates the world at a new size.
    ///
    /// Beliefs restart uniform, the agent is re-placed at the spawn point, the
    /// goal and path are cleared, and the tick counter restarts. On error the
    /// current state is left untouched.
    pub fn resize(
        &mut self,
        dimensions: GridDimensions,
        out_events: &mut Vec<Event>,
    ) -> Result<(), SimulationError> {
        let config = SimulationConfig {
            rows: dimensions.rows(),
            cols: dimensions.cols(),
            ..self.config.clone()
        };

        let mut events = Vec::new();
        let rebuilt = Self::build(config, TerrainSource::Generated, None, &mut events)?;
        self.config = rebuilt.config;
        self.world = rebuilt.world;
        self.filter = rebuilt.filter;
        self.path.clear();
        out_events.append(&mut events);
        Ok(())
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self, out_events: &mut Vec<Event>) {
        apply(&mut self.world, Command::Tick, out_events);
        let Some(agent) = query::agent(&self.world) else {
            return;
        };
        let terrain = query::terrain(&self.world);

        if self.filter.sense(terrain, agent).is_reset() {
            out_events.push(Event::BeliefReset);
        }

        let goal = query::goal(&self.world);
        let mut target = None;
        match goal {
            Some(goal) => {
                self.path = self.pathfinder.search(terrain, agent, goal);
                if self.path.is_empty() {
                    debug!(
                        agent_x = agent.x(),
                        agent_y = agent.y(),
                        goal_x = goal.x(),
                        goal_y = goal.y(),
                        "no path to goal"
                    );
                    out_events.push(Event::PathUnavailable { from: agent, goal });
                } else {
                    // The first waypoint is the agent's own cell.
                    let _ = self.path.remove(0);
                    if !self.path.is_empty() {
                        let next = self.path.remove(0);
                        if query::step_error(&self.world, next).is_none() {
                            target = Some(next);
                        }
                    }
                }
            }
            None => self.path.clear(),
        }

        let delta = target.map_or(GridDelta::ZERO, |next| agent.delta_to(next));
        if self.filter.shift_and_diffuse(delta).is_reset() {
            out_events.push(Event::BeliefReset);
        }

        if let Some(to) = target {
            apply(&mut self.world, Command::MoveAgent { to }, out_events);
        }

        let position = query::agent(&self.world);
        debug!(
            tick = query::tick(&self.world),
            x = position.map(|position| position.x()),
            y = position.map(|position| position.y()),
            remaining = self.path.len(),
            "tick complete"
        );

        if let (Some(goal), Some(position)) = (goal, position) {
            if goal == position {
                out_events.push(Event::GoalReached { goal });
            }
        }
    }

    /// Configuration the current world was built from.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Terrain of the current world.
    #[must_use]
    pub fn terrain(&self) -> TerrainView<'_> {
        query::terrain(&self.world)
    }

    /// Current belief distribution.
    #[must_use]
    pub fn belief(&self) -> BeliefView<'_> {
        self.filter.view()
    }

    /// Waypoints still ahead of the agent, ending at the goal.
    #[must_use]
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// The agent's true position.
    #[must_use]
    pub fn agent(&self) -> Option<Position> {
        query::agent(&self.world)
    }

    /// Goal currently pursued, if any.
    #[must_use]
    pub fn goal(&self) -> Option<Position> {
        query::goal(&self.world)
    }

    /// Number of ticks completed since the world was built.
    #[must_use]
    pub fn tick(&self) -> u64 {
        query::tick(&self.world)
    }
}
