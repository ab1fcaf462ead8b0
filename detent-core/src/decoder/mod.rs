//! Quadrature decoding
//!
//! Interrupt-free decoding of a two-phase rotary encoder into detent
//! clicks, with debounce and idle reset.

pub mod encoder;
pub mod quadrature;
pub mod table;

pub use encoder::RotaryEncoder;
pub use quadrature::{QuadratureDecoder, SampleOutcome};
pub use table::{PhasePair, TRANSITIONS};
