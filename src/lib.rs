#![warn(missing_docs)]

//! # `galvanic`
//!
//! A power-propagation engine for grid-based circuit puzzles: a rectangular board of rotatable
//! pieces must be wired from always-powered source pieces to ending pieces by turning the
//! connectors of each piece until power can flow.
//! Begin by building a board with a [`BoardBuilder`], then either drive it directly through
//! [`Board::recompute`] or register it with a [`SessionManager`] to get the interactive command
//! surface (selection movement, rotation, session lifecycle).
//!
//! The engine owns no rendering, input, or persistence concerns.
//! A visual layer reads per-piece powered flags after each recompute; an input layer issues
//! commands against the active session; ending-piece transitions reach the outside world through
//! the [`TransitionListener`](power::TransitionListener) seam.
//!
//! # Internals
//! The connection relation between adjacent pieces depends on their current rotations, so it is
//! derived fresh on every pass: the board is expressed as an undirected [`petgraph`] graph with a
//! vertex per cell and an edge wherever two neighbors expose mutually facing open connectors.
//! A propagation pass is then a multi-source breadth-first reachability search seeded from every
//! source piece, followed by an edge-transition diff over the ending pieces.
//! The result is order-independent and each piece is visited at most once, so a pass always
//! settles in O(rows * cols) before anything can observe the board.

pub use board::Board;
pub use builder::BoardBuilder;
pub use location::Location;
pub use session::SessionManager;

pub(crate) mod board;
pub mod builder;
pub mod direction;
pub(crate) mod location;
pub mod piece;
pub mod power;
pub mod session;
