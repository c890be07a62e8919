//! The interactive session layer: puzzle instances, the single active-session slot, and the
//! command surface the input layer drives.

use thiserror::Error;

use crate::board::Board;
use crate::location::Location;
use crate::piece::Role;
use crate::power::{Transition, TransitionKind, TransitionListener};

/// Errors returned by puzzle-scoped commands. A command returning one of these has changed no
/// state at all.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum CommandError {
    /// A selection movement received a delta other than the two permitted unit values.
    #[error("invalid selection movement delta {0}, only -1 and 1 are permitted")]
    InvalidDirection(i8),
    /// A puzzle-scoped command was invoked while this instance is not the active session.
    #[error("puzzle is not the active session; start it before issuing commands")]
    NoActiveSession,
}

/// Per-puzzle behavior switches.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PuzzleSettings {
    /// This puzzle is part of a group whose completion a group manager tracks externally;
    /// listener notification and completion bookkeeping are suppressed.
    pub grouped: bool,
    /// End the interactive session the first time the puzzle completes.
    pub one_shot_completion: bool,
    /// Make rotation of [`Role::Source`] pieces a silent no-op.
    pub lock_sources: bool,
    /// Make rotation of [`Role::End`] pieces a silent no-op.
    pub lock_endings: bool,
}

/// Identifier of a puzzle registered with a [`SessionManager`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PuzzleId(usize);

/// One puzzle instance: a board plus its settings, selection, completion flag, and registered
/// transition listeners.
pub struct Puzzle {
    board: Board,
    settings: PuzzleSettings,
    selection: Location,
    completed: bool,
    listeners: Vec<Box<dyn TransitionListener>>,
}

impl Puzzle {
    /// Two-phase initialization: the builder has already constructed every piece, so one
    /// initial recompute runs here, before anything can observe the board.
    fn new(board: Board, settings: PuzzleSettings) -> Self {
        let mut puzzle = Self {
            board,
            settings,
            selection: Location(0, 0),
            completed: false,
            listeners: Vec::new(),
        };
        let transitions = puzzle.board.recompute();
        puzzle.apply(&transitions);
        puzzle
    }

    /// This puzzle's board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// This puzzle's settings.
    pub fn settings(&self) -> PuzzleSettings {
        self.settings
    }

    /// The currently selected piece's location, for the visual layer to highlight.
    pub fn selection(&self) -> Location {
        self.selection
    }

    /// Whether any ending piece has powered on while this puzzle was in non-grouped mode.
    /// Set once and never cleared.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Register a listener to be called for every ending-piece transition of this puzzle.
    pub fn add_listener(&mut self, listener: Box<dyn TransitionListener>) {
        self.listeners.push(listener);
    }

    /// Deliver `transitions` to listeners and update completion state.
    /// Returns whether a one-shot completion fired, i.e. whether the session should end.
    fn apply(&mut self, transitions: &[Transition]) -> bool {
        if self.settings.grouped {
            return false;
        }

        let mut finish_session = false;
        for transition in transitions {
            for listener in self.listeners.iter_mut() {
                listener.on_transition(*transition);
            }

            if transition.kind == TransitionKind::PoweredOn {
                self.completed = true;
                finish_session |= self.settings.one_shot_completion;
            }
        }

        finish_session
    }
}

/// Owner of every puzzle instance and of the single active-session slot.
///
/// At most one puzzle accepts interactive commands at a time; `start_puzzle` and `end_puzzle`
/// are the only mutators of that slot. Everything here is synchronous: a command either
/// completes in full, including its recompute, or is rejected up front.
#[derive(Default)]
pub struct SessionManager {
    puzzles: Vec<Puzzle>,
    active: Option<PuzzleId>,
}

impl SessionManager {
    /// Construct an empty manager with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a board as a new puzzle instance and run its initial propagation pass.
    pub fn add_puzzle(&mut self, board: Board, settings: PuzzleSettings) -> PuzzleId {
        let id = PuzzleId(self.puzzles.len());
        self.puzzles.push(Puzzle::new(board, settings));
        id
    }

    /// The puzzle registered under `id`.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different manager.
    pub fn puzzle(&self, id: PuzzleId) -> &Puzzle {
        &self.puzzles[id.0]
    }

    /// Mutable access to the puzzle registered under `id`, e.g. to attach listeners.
    ///
    /// # Panics
    /// Panics if `id` was issued by a different manager.
    pub fn puzzle_mut(&mut self, id: PuzzleId) -> &mut Puzzle {
        &mut self.puzzles[id.0]
    }

    /// The currently active puzzle, if any.
    pub fn active(&self) -> Option<PuzzleId> {
        self.active
    }

    /// Begin interaction with the puzzle registered under `id`: reset its selection to the top
    /// left corner, run a propagation pass, and occupy the active slot.
    ///
    /// A no-op returning `false` if any puzzle, including this one, is already active.
    pub fn start_puzzle(&mut self, id: PuzzleId) -> bool {
        if self.active.is_some() {
            return false;
        }

        let puzzle = &mut self.puzzles[id.0];
        puzzle.selection = Location(0, 0);
        let transitions = puzzle.board.recompute();
        let finish_session = puzzle.apply(&transitions);

        self.active = Some(id);
        // a board which is already solved on startup can complete a one-shot puzzle immediately
        if finish_session {
            self.active = None;
        }

        true
    }

    /// End interaction with the puzzle registered under `id`, clearing the active slot.
    ///
    /// A no-op returning `false` unless `id` is the active instance.
    pub fn end_puzzle(&mut self, id: PuzzleId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Move the selection of the active puzzle by `delta` columns; `1` moves right and `-1`
    /// moves left. Movement that would leave the grid is a silent no-op.
    pub fn move_selection_horizontal(&mut self, id: PuzzleId, delta: i8) -> Result<(), CommandError> {
        self.move_selection(id, (0, delta))
    }

    /// Move the selection of the active puzzle by `delta` rows; `1` moves down and `-1` moves
    /// up. Movement that would leave the grid is a silent no-op.
    pub fn move_selection_vertical(&mut self, id: PuzzleId, delta: i8) -> Result<(), CommandError> {
        self.move_selection(id, (delta, 0))
    }

    /// Rotate the selected piece of the active puzzle one quarter turn clockwise, then
    /// recompute, notify listeners, and return the resulting transitions.
    pub fn rotate_selected_right(&mut self, id: PuzzleId) -> Result<Vec<Transition>, CommandError> {
        self.rotate_selected(id, true)
    }

    /// Rotate the selected piece of the active puzzle one quarter turn counter-clockwise, then
    /// recompute, notify listeners, and return the resulting transitions.
    pub fn rotate_selected_left(&mut self, id: PuzzleId) -> Result<Vec<Transition>, CommandError> {
        self.rotate_selected(id, false)
    }

    fn ensure_active(&self, id: PuzzleId) -> Result<(), CommandError> {
        match self.active == Some(id) {
            true => Ok(()),
            false => Err(CommandError::NoActiveSession),
        }
    }

    fn move_selection(&mut self, id: PuzzleId, delta: (i8, i8)) -> Result<(), CommandError> {
        self.ensure_active(id)?;

        let unit = delta.0 + delta.1;
        if unit != -1 && unit != 1 {
            return Err(CommandError::InvalidDirection(unit));
        }

        let puzzle = &mut self.puzzles[id.0];
        let target = puzzle.selection.offset_by((delta.0 as isize, delta.1 as isize));
        if puzzle.board.piece(target).is_some() {
            puzzle.selection = target;
        }

        Ok(())
    }

    fn rotate_selected(
        &mut self,
        id: PuzzleId,
        clockwise: bool,
    ) -> Result<Vec<Transition>, CommandError> {
        self.ensure_active(id)?;

        let puzzle = &mut self.puzzles[id.0];
        let selection = puzzle.selection;

        // the selection is clamped to the grid, so a piece is always here
        let locked = puzzle.board.piece(selection).is_some_and(|piece| match piece.role() {
            Role::Source => puzzle.settings.lock_sources,
            Role::End => puzzle.settings.lock_endings,
            Role::Connector => false,
        });
        if locked {
            return Ok(Vec::new());
        }

        match clockwise {
            true => puzzle.board.rotate_right(selection),
            false => puzzle.board.rotate_left(selection),
        };

        let transitions = puzzle.board.recompute();
        if puzzle.apply(&transitions) {
            self.active = None;
        }

        Ok(transitions)
    }
}
