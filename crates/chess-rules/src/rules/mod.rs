//! Chess rules - pure game logic with no presentation coupling
//!
//! Pure functions over a board value, split along the validation pipeline:
//!
//! - `movement` - pseudo-legal movement geometry for each piece kind
//! - `attack` - square attack and check detection
//! - `legality` - true legality: castling safety, pins, discovered checks
//! - `execute` - side effects of a committed move
//! - `end` - checkmate, stalemate and the draw conditions
//!
//! Everything here either reads the board or works on a private clone; the
//! one writer is the turn controller in [`crate::game`].

pub(crate) mod attack;
pub(crate) mod end;
pub(crate) mod execute;
pub(crate) mod legality;
pub(crate) mod movement;


pub use legality::LegalMove;
