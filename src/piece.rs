//! Pieces: a role, a set of base connectors, a rotation, and the power flags the
//! propagation pass maintains.

use strum::VariantArray;

use crate::direction::Direction;

/// The role a piece plays within its circuit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    /// Always-powered piece which seeds every propagation pass.
    Source,
    /// Ordinary wire piece.
    Connector,
    /// Piece whose powered transitions drive externally visible events.
    End,
}

/// A set of connector directions, as defined by a piece type before rotation is applied.
///
/// An empty set is valid and simply never connects; degenerate piece data degrades to this
/// rather than failing a propagation pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ConnectorSet(u8);

impl ConnectorSet {
    /// The blank piece type: no connectors.
    pub fn blank() -> Self {
        Self(0)
    }

    /// The straight piece type: two opposite connectors, North and South before rotation.
    pub fn straight() -> Self {
        Self::from_directions(&[Direction::North, Direction::South])
    }

    /// The corner piece type: two adjacent connectors, North and East before rotation.
    pub fn corner() -> Self {
        Self::from_directions(&[Direction::North, Direction::East])
    }

    /// The T piece type: three connectors, everything but North before rotation.
    pub fn tee() -> Self {
        Self::from_directions(&[Direction::East, Direction::South, Direction::West])
    }

    /// The cross piece type: all four connectors.
    pub fn cross() -> Self {
        Self::from_directions(Direction::VARIANTS)
    }

    /// Build a set from arbitrary directions. Duplicates are ignored.
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut out = Self::blank();
        for direction in directions {
            out.insert(*direction);
        }
        out
    }

    /// Whether `direction` is open in this set.
    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Open `direction` in this set.
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    /// Rotate every direction in this set clockwise by `quarter_turns` quarter turns.
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut out = Self::blank();
        for direction in self.iter() {
            out.insert(direction.rotated(quarter_turns));
        }
        out
    }

    /// Iterate over the open directions in this set.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::VARIANTS.iter().copied().filter(|dir| self.contains(*dir))
    }

    /// The number of open directions in this set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no direction is open.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn bit(direction: Direction) -> u8 {
        1 << direction as u8
    }
}

/// One cell's circuit element: an immutable role and base connector set, a user-mutable
/// rotation, and power flags owned by the propagation pass.
#[derive(Copy, Clone, Debug)]
pub struct Piece {
    role: Role,
    connectors: ConnectorSet,
    rotation: u8,
    powered: bool,
    previously_powered: bool,
}

impl Piece {
    pub(crate) fn new(role: Role, connectors: ConnectorSet, rotation: u8) -> Self {
        Self {
            role,
            connectors,
            // sources are born powered and are never reset
            powered: matches!(role, Role::Source),
            previously_powered: false,
            rotation: rotation & 3,
        }
    }

    /// This piece's role. Immutable after creation.
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's base connector set, before rotation is applied.
    pub fn connectors(&self) -> ConnectorSet {
        self.connectors
    }

    /// The current rotation as clockwise quarter turns, always in `0..4`.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Whether the most recently completed propagation pass reached this piece.
    /// Always `true` for [`Role::Source`] pieces.
    pub fn is_powered(&self) -> bool {
        self.powered
    }

    /// The set of absolute directions currently open for connection: the base connector set
    /// rotated by the current rotation. Pure and O(1).
    pub fn open_directions(&self) -> ConnectorSet {
        self.connectors.rotated(self.rotation)
    }

    pub(crate) fn is_source(&self) -> bool {
        matches!(self.role, Role::Source)
    }

    pub(crate) fn set_powered(&mut self, powered: bool) {
        self.powered = powered;
    }

    pub(crate) fn previously_powered(&self) -> bool {
        self.previously_powered
    }

    pub(crate) fn set_previously_powered(&mut self, powered: bool) {
        self.previously_powered = powered;
    }

    pub(crate) fn rotate_right(&mut self) {
        self.rotation = (self.rotation + 1) & 3;
    }

    pub(crate) fn rotate_left(&mut self) {
        self.rotation = (self.rotation + 3) & 3;
    }
}
