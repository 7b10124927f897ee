//! Presentation adapter for the stage flow.
//!
//! The flow controller drives a `StageView` and never touches presentation
//! details itself. `play_transition` resolves once the entering panel is
//! shown, which is when follow-up work such as moving focus may happen.

pub mod terminal;

use async_trait::async_trait;

use crate::stage::{Stage, Transition};

pub use terminal::TerminalView;

/// Input fields of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Phone,
    Email,
}

impl Field {
    /// The field the user types into while `stage` is active.
    pub fn for_stage(stage: Stage) -> Option<Field> {
        match stage {
            Stage::PhoneEntry => Some(Field::Phone),
            Stage::EmailEntry => Some(Field::Email),
            Stage::Confirmation => None,
        }
    }
}

/// Controls that trigger a service call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Check,
    Submit,
}

/// Key pressed while a field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// The commit key
    Enter,
    Char(char),
    Other,
}

#[async_trait]
pub trait StageView: Send {
    fn clear_field_error(&mut self, field: Field);

    fn show_field_error(&mut self, field: Field, message: &str);

    /// Disables `control` and shows its busy label.
    fn set_control_busy(&mut self, control: Control, label: &str);

    /// Re-enables `control` and restores its idle label.
    fn set_control_ready(&mut self, control: Control, label: &str);

    fn show_greeting(&mut self, message: &str);

    fn show_final_message(&mut self, message: &str);

    fn focus(&mut self, field: Field);

    /// Swaps the leaving panel for the entering one and resolves when the
    /// entering panel is active.
    async fn play_transition(&mut self, transition: Transition);
}
