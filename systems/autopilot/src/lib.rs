#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Planner-driven controller that steers the snake toward the food.

use snake_pilot_core::{Controller, DecisionContext, Direction, Event, Path};
use snake_pilot_system_pathfinding::PathPlanner;
use tracing::{debug, warn};

/// Automated player that follows a cached shortest path to the food cell.
///
/// A path is planned only when none is being followed. Each decision emits
/// the direction of the next unvisited step. The cache is dropped when food
/// is eaten, when the head strays from the route, when the route runs out,
/// and when the game resets, so the following decision plans afresh.
#[derive(Debug, Default)]
pub struct Autopilot {
    planner: PathPlanner,
    route: Option<Route>,
}

#[derive(Debug)]
struct Route {
    path: Path,
    next_step: usize,
}

impl Autopilot {
    /// Creates an autopilot without a planned route.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the step the next decision will take along the planned path.
    #[must_use]
    pub fn next_step(&self) -> Option<usize> {
        self.route.as_ref().map(|route| route.next_step)
    }

    fn clear(&mut self) {
        self.route = None;
    }

    fn plan(&mut self, context: &DecisionContext<'_>) -> Option<Route> {
        let head = context.snake.head()?;
        let Some(food) = context.grid.food_cells().next() else {
            debug!("no food on the grid, no decision");
            return None;
        };

        let obstacles = context.snake.body().to_set();
        let path = self
            .planner
            .find_path(context.grid, &obstacles, head, food);
        if !path.is_actionable() {
            debug!(?head, ?food, "no usable path, no decision");
            return None;
        }

        debug!(?head, ?food, length = path.len(), "planned path to food");
        Some(Route { path, next_step: 0 })
    }

    fn follow(&mut self, context: &DecisionContext<'_>) -> Option<Direction> {
        let head = context.snake.head()?;

        if let Some(route) = &self.route {
            if route.path.cells().get(route.next_step) != Some(&head) {
                debug!(?head, "head left the planned path, replanning");
                self.clear();
            }
        }

        if self.route.is_none() {
            self.route = self.plan(context);
        }

        let route = self.route.as_mut()?;
        match route.path.step(route.next_step) {
            Some(direction) => {
                route.next_step += 1;
                Some(direction)
            }
            None => {
                warn!(steps = route.path.step_count(), "no steps left on the planned path");
                self.clear();
                None
            }
        }
    }
}

impl Controller for Autopilot {
    fn decide_next_direction(&mut self, context: &DecisionContext<'_>) -> Option<Direction> {
        if context.snake.status().is_terminal() {
            return None;
        }

        let decision = self.follow(context);
        if decision.is_some() || context.snake.heading().is_some() {
            return decision;
        }

        // Until a decision exists, keep moving the way the body points.
        let body = context.snake.body();
        let implied = Direction::between(body.get(1)?, body.get(0)?);
        debug!(?implied, "falling back to the body's orientation");
        implied
    }

    fn observe(&mut self, events: &[Event]) {
        let invalidates = events.iter().any(|event| {
            matches!(
                event,
                Event::FoodEaten { .. } | Event::GameOver { .. } | Event::WorldReset
            )
        });
        if invalidates {
            self.clear();
        }
    }

    fn planned_path(&self) -> Option<&Path> {
        self.route.as_ref().map(|route| &route.path)
    }

    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_pilot_core::{BoundedHistory, CellCoord, Grid, Marker, SnakeStatus, SnakeView};

    fn body(cells: &[(i32, i32)]) -> BoundedHistory {
        BoundedHistory::new(cells.iter().map(|&(x, y)| CellCoord::new(x, y))).expect("non-empty")
    }

    #[test]
    fn exhausted_route_is_cleared() {
        let mut grid = Grid::new(5, 5).expect("valid grid");
        let _ = grid
            .set_marker(CellCoord::new(2, 1), Marker::Food)
            .expect("on grid");
        let mut autopilot = Autopilot::new();
        let start = body(&[(2, 0)]);
        let context = DecisionContext {
            grid: &grid,
            snake: SnakeView::new(&start, Some(Direction::Down), None, SnakeStatus::Alive),
            input: &[],
        };
        assert_eq!(
            autopilot.decide_next_direction(&context),
            Some(Direction::Down)
        );

        let arrived = body(&[(2, 1)]);
        let context = DecisionContext {
            grid: &grid,
            snake: SnakeView::new(&arrived, Some(Direction::Down), None, SnakeStatus::Alive),
            input: &[],
        };

        assert_eq!(autopilot.decide_next_direction(&context), None);
        assert!(autopilot.planned_path().is_none());
    }
}
