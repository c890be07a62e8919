//! Construction-time surface: assemble a full grid of pieces, fail fast on anything malformed.

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use std::num::NonZero;
use std::ops::IndexMut;

use crate::board::Board;
use crate::location::{Dimension, Location};
use crate::piece::{ConnectorSet, Piece, Role};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A piece was placed outside the bounds specified by `dims` on the builder.
    PieceOutOfBounds,
    /// A cell never received a piece. The engine refuses to propagate over missing cells, so
    /// such a board is rejected outright instead of degrading.
    UnassignedCell(Location),
}

/// A builder for [`Board`]s.
///
/// Every cell of the declared grid must be assigned exactly one piece before
/// [`build`](Self::build) succeeds; reassigning a cell replaces the earlier piece.
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some
/// point.
#[derive(Clone)]
pub struct BoardBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    cells: Array2<Option<Piece>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(3).unwrap(), NonZero::new(3).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new builder with the specified dimensions, in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.0.get(), dims.1.get()), || None),
            invalid_reasons: Default::default(),
        }
    }

    /// Assign a piece to the cell at `location`.
    ///
    /// `rotation` is taken as clockwise quarter turns modulo 4, so any value is acceptable.
    /// May cause the builder to enter a
    /// [`PieceOutOfBounds`](BuilderInvalidReason::PieceOutOfBounds) invalid state if `location`
    /// is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn piece(
        &mut self,
        location: Location,
        role: Role,
        connectors: ConnectorSet,
        rotation: u8,
    ) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(BuilderInvalidReason::PieceOutOfBounds);
            return self;
        }

        self.cells
            .index_mut(location.as_index())
            .assign_elem(Some(Piece::new(role, connectors, rotation)));

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has
    /// arisen while placing pieces.
    ///
    /// Returns `None` if the builder is valid so far, `Some(&Vec<BuilderInvalidReason>)`
    /// otherwise. Unassigned cells are only detected by [`build`](Self::build).
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`].
    ///
    /// Fails with every accumulated [`BuilderInvalidReason`], including one
    /// [`UnassignedCell`](BuilderInvalidReason::UnassignedCell) per cell which never received a
    /// piece.
    pub fn build(&self) -> Result<Board, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let missing = self
            .cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| BuilderInvalidReason::UnassignedCell(Location::from(index)))
            .collect_vec();
        if !missing.is_empty() {
            return Err(missing);
        }

        let pieces = Array2::from_shape_fn(self.cells.raw_dim(), |index| {
            // just checked above that every cell is assigned
            self.cells[index].unwrap()
        });

        Ok(Board::new(pieces, self.dims))
    }
}
