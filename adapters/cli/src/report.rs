use std::fmt;

use wayfinder_core::Position;
use wayfinder_system_simulation::Simulation;

/// End-of-run snapshot printed by the command-line runner.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    ticks: u64,
    agent: Option<Position>,
    goal: Option<Position>,
    estimate: Option<(Position, f64)>,
    remaining_path: usize,
    goal_reached: bool,
}

impl Summary {
    pub(crate) fn capture(simulation: &Simulation, goal_reached: bool) -> Self {
        Self {
            ticks: simulation.tick(),
            agent: simulation.agent(),
            goal: simulation.goal(),
            estimate: simulation.belief().most_likely(),
            remaining_path: simulation.path().len(),
            goal_reached,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks:          {}", self.ticks)?;
        writeln!(f, "true position:  {}", OptionalPosition(self.agent))?;
        writeln!(f, "goal:           {}", OptionalPosition(self.goal))?;
        match self.estimate {
            Some((position, probability)) => writeln!(
                f,
                "most likely:    {} (p = {probability:.4})",
                OptionalPosition(Some(position))
            )?,
            None => writeln!(f, "most likely:    -")?,
        }
        writeln!(f, "path remaining: {}", self.remaining_path)?;
        write!(
            f,
            "goal reached:   {}",
            if self.goal_reached { "yes" } else { "no" }
        )
    }
}

struct OptionalPosition(Option<Position>);

impl fmt::Display for OptionalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(position) => write!(f, "({}, {})", position.x(), position.y()),
            None => write!(f, "-"),
        }
    }
}
