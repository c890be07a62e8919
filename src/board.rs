use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::location::{Dimension, Location};
use crate::piece::{Piece, Role};
use crate::power;
use crate::power::Transition;

/// A rectangular board of circuit pieces with fixed extents for its whole lifetime.
///
/// The board exclusively owns its pieces; the source and ending location lists are derived
/// views filtered once at construction, never shared across boards.
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder), which
/// guarantees every cell holds a piece.
pub struct Board {
    pub(crate) pieces: Array2<Piece>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) sources: Vec<Location>,
    pub(crate) endings: Vec<Location>,
}

impl Board {
    pub(crate) fn new(pieces: Array2<Piece>, dims: (Dimension, Dimension)) -> Self {
        let sources = pieces
            .indexed_iter()
            .filter(|(_, piece)| piece.role() == Role::Source)
            .map(|(index, _)| Location::from(index))
            .collect_vec();
        let endings = pieces
            .indexed_iter()
            .filter(|(_, piece)| piece.role() == Role::End)
            .map(|(index, _)| Location::from(index))
            .collect_vec();

        Self { pieces, dims, sources, endings }
    }

    /// Board extents, in `(rows, cols)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The piece at `location`, or [`None`] if `location` is off the grid.
    pub fn piece(&self, location: Location) -> Option<&Piece> {
        self.pieces.get(location.as_index())
    }

    pub(crate) fn piece_mut(&mut self, location: Location) -> Option<&mut Piece> {
        self.pieces.get_mut(location.as_index())
    }

    /// Locations of all [`Role::Source`] pieces.
    pub fn sources(&self) -> &[Location] {
        &self.sources
    }

    /// Locations of all [`Role::End`] pieces.
    pub fn endings(&self) -> &[Location] {
        &self.endings
    }

    /// Rotate the piece at `location` one quarter turn clockwise, in place.
    /// Returns whether a piece was rotated, i.e. whether `location` is on the grid.
    ///
    /// Rotation invalidates the powered flags; call [`recompute`](Self::recompute) before
    /// reading them again.
    pub fn rotate_right(&mut self, location: Location) -> bool {
        match self.pieces.get_mut(location.as_index()) {
            Some(piece) => {
                piece.rotate_right();
                true
            }
            None => false,
        }
    }

    /// Rotate the piece at `location` one quarter turn counter-clockwise, in place.
    /// Returns whether a piece was rotated, i.e. whether `location` is on the grid.
    pub fn rotate_left(&mut self, location: Location) -> bool {
        match self.pieces.get_mut(location.as_index()) {
            Some(piece) => {
                piece.rotate_left();
                true
            }
            None => false,
        }
    }

    /// Build the live connection graph: a vertex per cell and an edge wherever two adjacent
    /// pieces expose mutually facing open connectors.
    ///
    /// The relation depends on current rotations, so it is rebuilt on every pass and never
    /// cached. Edge weights hold the direction from the lower indexed vertex.
    pub(crate) fn connection_graph(&self) -> UnGraphMap<Location, Direction> {
        let (rows, cols) = (self.dims.0.get(), self.dims.1.get());
        let mut graph = UnGraphMap::with_capacity(
            self.pieces.len(),
            // a complete grid of this size, which connector sets can only shrink
            (cols - 1) * rows + (rows - 1) * cols,
        );

        for (index, piece) in self.pieces.indexed_iter() {
            let location = Location::from(index);
            graph.add_node(location);

            // consider edges down and to the right only, so each undirected pair is visited once
            for direction in [Direction::South, Direction::East] {
                if !piece.open_directions().contains(direction) {
                    continue;
                }

                let neighbor_location = direction.attempt_from(location);
                // boundary connectors pointing off the grid connect to nothing
                if let Some(neighbor) = self.piece(neighbor_location) {
                    if neighbor.open_directions().contains(direction.opposite()) {
                        graph.add_edge(location, neighbor_location, direction);
                    }
                }
            }
        }

        graph
    }

    /// The current mutually open connections, as undirected location pairs.
    pub fn connections(&self) -> Vec<UnorderedPair<Location>> {
        self.connection_graph()
            .all_edges()
            .map(|(a, b, _)| UnorderedPair::from((a, b)))
            .collect_vec()
    }

    /// One full recomputation of the powered set: reset every non-source piece, propagate from
    /// all sources over the current connection relation, then diff the ending pieces.
    ///
    /// Runs as a single non-interruptible unit on `&mut self`; when it returns, every powered
    /// flag reflects this pass and each changed ending piece appears exactly once in the result.
    pub fn recompute(&mut self) -> Vec<Transition> {
        power::propagate(self);
        power::diff_endings(self)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.pieces.nrows() * (self.pieces.ncols() + 1));

        for row in self.pieces.rows() {
            for piece in row {
                out.push(match (piece.role(), piece.is_powered()) {
                    (Role::Source, _) => 'S',
                    (Role::End, true) => 'E',
                    (Role::End, false) => 'e',
                    (Role::Connector, true) => '+',
                    (Role::Connector, false) => '.',
                });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
