//! Encoder cluster input handling
//!
//! Push button detection, the events handed to UI code, and helpers for
//! applying steps to menus and settings.

pub mod adjust;
pub mod button;
pub mod events;

pub use adjust::{step_clamped, wrap_index};
pub use button::{PressDetector, PushButton};
pub use events::InputEvent;
