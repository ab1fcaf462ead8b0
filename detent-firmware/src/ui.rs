//! Settings menu driven by encoder events
//!
//! Rotation moves the cursor; a click enters edit mode on the selected
//! entry, where rotation adjusts its value until the next click.

use detent_core::input::{step_clamped, wrap_index, InputEvent};

/// Editable setting
pub struct Setting {
    pub label: &'static str,
    pub value: i32,
    pub step: i32,
    pub min: i32,
    pub max: i32,
}

/// Menu state
pub struct Menu<const N: usize> {
    settings: [Setting; N],
    cursor: usize,
    editing: bool,
}

/// What an event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum MenuChange {
    None,
    Cursor(usize),
    EditStarted(usize),
    EditFinished(usize),
    Value(usize, i32),
}

impl<const N: usize> Menu<N> {
    pub const fn new(settings: [Setting; N]) -> Self {
        Self {
            settings,
            cursor: 0,
            editing: false,
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> MenuChange {
        match (event, self.editing) {
            (InputEvent::EncoderClick, false) => {
                self.editing = true;
                MenuChange::EditStarted(self.cursor)
            }
            (InputEvent::EncoderClick, true) => {
                self.editing = false;
                MenuChange::EditFinished(self.cursor)
            }
            (_, false) => {
                let next = wrap_index(self.cursor, i32::from(event.rotation_delta()), N);
                if next == self.cursor {
                    return MenuChange::None;
                }
                self.cursor = next;
                MenuChange::Cursor(next)
            }
            (_, true) => {
                let Some(setting) = self.settings.get_mut(self.cursor) else {
                    return MenuChange::None;
                };
                let value = step_clamped(
                    setting.value,
                    i32::from(event.rotation_delta()),
                    setting.step,
                    setting.min,
                    setting.max,
                );
                if value == setting.value {
                    return MenuChange::None;
                }
                setting.value = value;
                MenuChange::Value(self.cursor, value)
            }
        }
    }

    pub fn label(&self, index: usize) -> &'static str {
        self.settings.get(index).map_or("", |s| s.label)
    }
}
