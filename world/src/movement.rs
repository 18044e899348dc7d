//! Movement rules that advance the snake across the grid.

use snake_pilot_core::{
    BoundedHistory, CoreError, Direction, Event, Grid, Marker, SnakeStatus, SnakeView,
    TerminalReason,
};
use tracing::{debug, info};

/// Mutable snake state consumed by [`step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeState {
    body: BoundedHistory,
    heading: Option<Direction>,
    blocked: Option<Direction>,
    status: SnakeStatus,
    moves: u64,
}

impl SnakeState {
    /// Creates a snake from its body and immediately assesses it against `grid`.
    ///
    /// A body that already overlaps itself or leaves the grid starts out in
    /// the matching terminal state.
    #[must_use]
    pub fn new(body: BoundedHistory, grid: &Grid) -> Self {
        let status = assess(&body, grid);
        Self {
            body,
            heading: None,
            blocked: None,
            status,
            moves: 0,
        }
    }

    /// Body cells, head first.
    #[must_use]
    pub fn body(&self) -> &BoundedHistory {
        &self.body
    }

    /// Heading the next step will use.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Direction the snake may not reverse into.
    #[must_use]
    pub fn blocked(&self) -> Option<Direction> {
        self.blocked
    }

    /// Lifecycle state of the snake.
    #[must_use]
    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    /// Number of steps attempted so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Records the heading used by the next step. Returns whether it changed.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let changed = self.heading != Some(direction);
        self.heading = Some(direction);
        changed
    }

    /// Read-only view handed to controllers.
    #[must_use]
    pub fn view(&self) -> SnakeView<'_> {
        SnakeView::new(&self.body, self.heading, self.blocked, self.status)
    }
}

/// Classifies a body against the grid without moving it.
///
/// Leaving the grid takes precedence over overlapping.
#[must_use]
pub fn assess(body: &BoundedHistory, grid: &Grid) -> SnakeStatus {
    if body.iter().any(|cell| !grid.contains(cell)) {
        SnakeStatus::Terminated(TerminalReason::OutOfBounds)
    } else if body.has_duplicates() {
        SnakeStatus::Terminated(TerminalReason::SelfCollided)
    } else {
        SnakeStatus::Alive
    }
}

/// Advances the snake one cell along its heading.
///
/// The transition is deterministic: identical body, markers and heading
/// always produce the same result. A heading equal to the blocked direction
/// is replaced by its opposite, which keeps the snake moving the way it last
/// moved instead of reversing into its neck. Leaving the grid terminates the
/// game without touching the body. Entering food grows the capacity by one
/// and clears the marker before the new head is recorded.
///
/// Errors only surface when a core invariant has already been broken.
pub fn step(
    state: &mut SnakeState,
    grid: &mut Grid,
    out_events: &mut Vec<Event>,
) -> Result<SnakeStatus, CoreError> {
    if state.status.is_terminal() {
        return Ok(state.status);
    }

    let Some(requested) = state.heading else {
        out_events.push(Event::SnakeIdle);
        return Ok(state.status);
    };

    state.moves = state.moves.saturating_add(1);

    let direction = if state.blocked == Some(requested) {
        let applied = requested.opposite();
        state.heading = Some(applied);
        out_events.push(Event::SteeringCorrected { requested, applied });
        applied
    } else {
        requested
    };

    let head = state.body.first()?;
    let next = head.step(direction);
    debug!(moves = state.moves, ?head, ?next, "moving snake");

    if !grid.contains(next) {
        info!(moves = state.moves, "snake hit a wall");
        return Ok(terminate(state, TerminalReason::OutOfBounds, out_events));
    }

    if grid.marker_at(next)? == Marker::Food {
        state.body.increase_capacity(1)?;
        let _ = grid.set_marker(next, Marker::Empty)?;
        info!(moves = state.moves, capacity = state.body.capacity(), "eating food");
        out_events.push(Event::FoodEaten {
            cell: next,
            capacity: state.body.capacity(),
        });
    }

    let evicted = state.body.add(next);
    out_events.push(Event::SnakeAdvanced {
        from: head,
        to: next,
        evicted,
    });
    state.blocked = Some(direction.opposite());

    if state.body.has_duplicates() {
        info!(moves = state.moves, "snake ate itself");
        return Ok(terminate(state, TerminalReason::SelfCollided, out_events));
    }

    Ok(state.status)
}

fn terminate(
    state: &mut SnakeState,
    reason: TerminalReason,
    out_events: &mut Vec<Event>,
) -> SnakeStatus {
    state.status = SnakeStatus::Terminated(reason);
    out_events.push(Event::GameOver { reason });
    state.status
}
