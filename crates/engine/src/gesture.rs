//! Gesture state machine - continuous drag in, at most one shift out
//!
//! ```text
//! Idle --press--> Dragging(unlocked) --|delta| > threshold--> Dragging(locked)
//!   ^                  |                                          |
//!   |               release                                    release
//!   |                  v                                          v
//!   +------------- (NoMove) <----------------------------- Resolving
//!                                                      commit / rollback
//! ```
//!
//! The drag itself lives in a [`DragSession`] value. Its transitions are plain
//! methods that take a session and return the next one, so the lock and step
//! rules can be tested without a controller or a board.

use chuzzle_board_core::{ColorGrid, GridModel, MatchDetector};
use chuzzle_board_types::{Axis, BoardConfig, BoardError, Cell, Direction, DragDelta, Shift};
use thiserror::Error;

/// Input that arrived in a state that cannot accept it
///
/// Misuse never mutates the board or the gesture state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    #[error("a drag is already in progress")]
    AlreadyDragging,

    /// Press while a release is resolving. Release resolves before it
    /// returns, so the public API never reaches this state from outside.
    #[error("a shift is still resolving")]
    Busy,

    #[error("no drag is in progress")]
    NotDragging,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// How a released gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing moved: no direction locked, or the drag rounded to zero steps
    NoMove,
    /// The shift produced a match on its line and stays applied
    Committed(Shift),
    /// The shift produced no match and was undone
    RolledBack(Shift),
}

impl Resolution {
    /// The shift that was attempted, if any
    pub fn shift(&self) -> Option<Shift> {
        match self {
            Resolution::NoMove => None,
            Resolution::Committed(shift) | Resolution::RolledBack(shift) => Some(*shift),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Resolution::Committed(_))
    }
}

/// One active drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin: Cell,
    pub locked: Option<Direction>,
    pub accumulated: DragDelta,
    /// Steps the drag would shift if released now
    pub confirmed_steps: i32,
}

impl DragSession {
    pub fn new(origin: Cell) -> Self {
        Self {
            origin,
            locked: None,
            accumulated: DragDelta::ZERO,
            confirmed_steps: 0,
        }
    }

    /// The session after one more input sample
    pub fn feed(self, delta: DragDelta, drag_threshold: f32, cell_spacing: f32) -> Self {
        let mut next = self;
        match next.locked {
            None => {
                next.accumulated += delta;
                if next.accumulated.length() > drag_threshold {
                    next.locked = Some(lock_direction(next.accumulated));
                }
            }
            Some(direction) => match direction.axis() {
                Axis::Row => next.accumulated.x += delta.x,
                Axis::Column => next.accumulated.y += delta.y,
            },
        }
        if let Some(direction) = next.locked {
            let offset = next.accumulated.along(direction.axis());
            next.confirmed_steps = step_count(offset, cell_spacing);
        }
        next
    }

    /// The shift releasing now would attempt, before normalization
    pub fn planned_shift(&self) -> Option<Shift> {
        let direction = self.locked?;
        if self.confirmed_steps == 0 {
            return None;
        }
        let axis = direction.axis();
        let line = match axis {
            Axis::Row => self.origin.row,
            Axis::Column => self.origin.col,
        };
        Some(Shift::new(axis, line, self.confirmed_steps))
    }
}

/// Dominant axis decides row or column; ties go to the row
pub fn lock_direction(delta: DragDelta) -> Direction {
    if delta.x.abs() >= delta.y.abs() {
        if delta.x >= 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y >= 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Whole cells covered by `offset`, rounding half away from zero
///
/// Saturates to `±i32::MAX`, so the count always has a negation.
pub fn step_count(offset: f32, cell_spacing: f32) -> i32 {
    ((offset / cell_spacing).round() as i32).max(-i32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
    Resolving,
}

/// Owns the gesture state and turns releases into board shifts
#[derive(Debug, Clone)]
pub struct GestureController {
    state: GestureState,
    drag_threshold: f32,
    cell_spacing: f32,
}

impl GestureController {
    pub fn new(drag_threshold: f32, cell_spacing: f32) -> Self {
        Self {
            state: GestureState::Idle,
            drag_threshold,
            cell_spacing,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.drag_threshold, config.cell_spacing)
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Locked direction and preview step count of the active drag
    pub fn preview(&self) -> Option<(Direction, i32)> {
        let session = self.session()?;
        Some((session.locked?, session.confirmed_steps))
    }

    pub fn on_press<G: ColorGrid>(&mut self, grid: &G, cell: Cell) -> Result<(), GestureError> {
        match self.state {
            GestureState::Idle => {}
            GestureState::Dragging(_) => return Err(misuse(GestureError::AlreadyDragging)),
            GestureState::Resolving => return Err(misuse(GestureError::Busy)),
        }
        if !grid.contains(cell) {
            return Err(misuse(GestureError::Board(BoardError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: grid.rows(),
                columns: grid.columns(),
            })));
        }

        tracing::debug!(origin = %cell, "drag started");
        self.state = GestureState::Dragging(DragSession::new(cell));
        Ok(())
    }

    /// Feed one drag sample; non-finite samples are dropped
    pub fn on_drag(&mut self, delta: DragDelta) -> Result<(), GestureError> {
        let GestureState::Dragging(session) = self.state else {
            return Err(misuse(GestureError::NotDragging));
        };
        if !delta.is_finite() {
            tracing::debug!(x = delta.x, y = delta.y, "ignoring non-finite drag sample");
            return Ok(());
        }

        let next = session.feed(delta, self.drag_threshold, self.cell_spacing);
        if session.locked.is_none() {
            if let Some(direction) = next.locked {
                tracing::debug!(direction = direction.as_str(), "drag direction locked");
            }
        }
        self.state = GestureState::Dragging(next);
        Ok(())
    }

    /// End the drag: shift, then keep or undo the shift depending on
    /// whether the shifted line now touches a match
    pub fn on_release(
        &mut self,
        grid: &mut GridModel,
        detector: &MatchDetector,
    ) -> Result<Resolution, GestureError> {
        let GestureState::Dragging(session) = self.state else {
            return Err(misuse(GestureError::NotDragging));
        };

        self.state = GestureState::Resolving;
        let result = resolve(&session, grid, detector);
        self.state = GestureState::Idle;

        match &result {
            Ok(resolution) => tracing::debug!(?resolution, "drag resolved"),
            Err(err) => tracing::warn!(%err, "drag resolution failed"),
        }
        result
    }

    /// Abandon the drag without touching the board
    pub fn on_cancel(&mut self) -> Result<(), GestureError> {
        let GestureState::Dragging(_) = self.state else {
            return Err(misuse(GestureError::NotDragging));
        };
        tracing::debug!("drag cancelled");
        self.state = GestureState::Idle;
        Ok(())
    }
}

fn misuse(err: GestureError) -> GestureError {
    tracing::debug!(%err, "gesture input ignored");
    err
}

fn resolve(
    session: &DragSession,
    grid: &mut GridModel,
    detector: &MatchDetector,
) -> Result<Resolution, GestureError> {
    let Some(shift) = session.planned_shift() else {
        return Ok(Resolution::NoMove);
    };

    let moved = grid.apply(shift)?;
    if moved == 0 {
        // Whole turns of the line leave every tile where it was.
        return Ok(Resolution::NoMove);
    }

    if detector.line_has_match(&*grid, shift.axis, shift.line)? {
        return Ok(Resolution::Committed(shift));
    }

    // Undo the rotation actually performed; `moved` is below the line length.
    grid.apply(Shift::new(shift.axis, shift.line, -(moved as i32)))?;
    Ok(Resolution::RolledBack(shift))
}
