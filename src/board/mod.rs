//! Board: occupancy, move legality, move enumeration and placement.

pub mod board;

pub use board::Board;
