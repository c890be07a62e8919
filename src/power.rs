//! The propagation pass and the ending-piece transition diff.

use std::collections::VecDeque;

use itertools::Itertools;

use crate::board::Board;
use crate::location::Location;

/// The two observable edge transitions an ending piece can make between passes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransitionKind {
    /// The piece was unpowered after the previous pass and is powered now.
    PoweredOn,
    /// The piece was powered after the previous pass and is unpowered now.
    PoweredOff,
}

/// One ending-piece power change produced by a propagation pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transition {
    /// The ending piece that changed state.
    pub location: Location,
    /// Which way it changed.
    pub kind: TransitionKind,
}

/// Observer seam for ending-piece transitions.
///
/// A listener is called exactly once per changed ending piece per pass, only after the pass has
/// fully settled. Any `FnMut(Transition)` closure qualifies.
pub trait TransitionListener {
    /// Called for each ending piece whose powered state changed in a pass.
    fn on_transition(&mut self, transition: Transition);
}

impl<F: FnMut(Transition)> TransitionListener for F {
    fn on_transition(&mut self, transition: Transition) {
        self(transition)
    }
}

/// Reset every non-source piece to unpowered, then mark as powered every piece reachable from a
/// source through mutually open connectors.
///
/// This is a multi-source breadth-first search over the freshly derived connection graph: an
/// explicit worklist rather than piece-to-piece recursion, so termination is immediate from the
/// grid being finite and each piece entering the queue at most once.
pub(crate) fn propagate(board: &mut Board) {
    for piece in board.pieces.iter_mut() {
        if !piece.is_source() {
            piece.set_powered(false);
        }
    }

    let graph = board.connection_graph();

    let mut worklist: VecDeque<Location> = board.sources.iter().copied().collect();
    while let Some(location) = worklist.pop_front() {
        for neighbor_location in graph.neighbors(location) {
            if let Some(neighbor) = board.piece_mut(neighbor_location) {
                if !neighbor.is_powered() {
                    neighbor.set_powered(true);
                    worklist.push_back(neighbor_location);
                }
            }
        }
    }
}

/// Compare every ending piece's powered flag against its state after the previous pass and
/// produce exactly one [`Transition`] per change, updating the snapshot as it goes.
///
/// Must run only once [`propagate`] has settled; unchanged pieces produce nothing.
pub(crate) fn diff_endings(board: &mut Board) -> Vec<Transition> {
    let pieces = &mut board.pieces;

    board
        .endings
        .iter()
        .filter_map(|&location| {
            let piece = pieces.get_mut(location.as_index())?;
            (piece.previously_powered() != piece.is_powered()).then(|| {
                piece.set_previously_powered(piece.is_powered());
                Transition {
                    location,
                    kind: match piece.is_powered() {
                        true => TransitionKind::PoweredOn,
                        false => TransitionKind::PoweredOff,
                    },
                }
            })
        })
        .collect_vec()
}
