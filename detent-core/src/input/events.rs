//! Input events produced by the encoder cluster

/// Input event handed from the polling loop to UI code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder rotated one detent in the positive sense
    EncoderCw,
    /// Encoder rotated one detent in the negative sense
    EncoderCcw,
    /// Encoder push button pressed
    EncoderClick,
}

impl InputEvent {
    /// Map a consumed step (-1, 0, +1) to a rotation event
    pub fn from_step(step: i8) -> Option<Self> {
        match step.signum() {
            1 => Some(InputEvent::EncoderCw),
            -1 => Some(InputEvent::EncoderCcw),
            _ => None,
        }
    }

    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::EncoderCw | InputEvent::EncoderCcw)
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(self, InputEvent::EncoderClick)
    }

    /// Returns the rotation direction as a signed delta (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::EncoderCw => 1,
            InputEvent::EncoderCcw => -1,
            InputEvent::EncoderClick => 0,
        }
    }
}
