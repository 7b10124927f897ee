//! Registration stages and the panels that present them.
//!
//! Stages only move forward: `PhoneEntry -> EmailEntry -> Confirmation`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PhoneEntry,
    EmailEntry,
    Confirmation,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::PhoneEntry, Stage::EmailEntry, Stage::Confirmation];

    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::PhoneEntry => Some(Stage::EmailEntry),
            Stage::EmailEntry => Some(Stage::Confirmation),
            Stage::Confirmation => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Stage::PhoneEntry => 0,
            Stage::EmailEntry => 1,
            Stage::Confirmation => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::PhoneEntry => "phone-entry",
            Stage::EmailEntry => "email-entry",
            Stage::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

/// A single forward step between two stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
}

/// Tracks the logical stage of the flow.
#[derive(Debug, Clone)]
pub struct StageMachine {
    current: Stage,
}

impl StageMachine {
    pub fn new() -> Self {
        Self {
            current: Stage::PhoneEntry,
        }
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    /// Advances to the next stage when the flow is at `expected`.
    ///
    /// Returns `None` without changing state otherwise, so a step repeated
    /// from a later stage never moves the flow.
    pub fn advance_from(&mut self, expected: Stage) -> Option<Transition> {
        if self.current != expected {
            return None;
        }
        let to = self.current.next()?;
        let transition = Transition {
            from: self.current,
            to,
        };
        self.current = to;
        Some(transition)
    }
}

impl Default for StageMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Presentation state of one stage panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub active: bool,
}

/// Presentation state of all three panels.
///
/// Outside a transition exactly one panel is visible and active. During a
/// transition the leaving panel is visible but inactive while it fades out.
#[derive(Debug, Clone)]
pub struct Panels {
    states: [PanelState; 3],
}

impl Panels {
    pub fn new(initial: Stage) -> Self {
        let mut states = [PanelState::default(); 3];
        states[initial.index()] = PanelState {
            visible: true,
            active: true,
        };
        Self { states }
    }

    pub fn state(&self, stage: Stage) -> PanelState {
        self.states[stage.index()]
    }

    /// The visible, active panel, if the panels are settled.
    pub fn active(&self) -> Option<Stage> {
        let mut shown = Stage::ALL
            .into_iter()
            .filter(|stage| self.state(*stage).visible);
        match (shown.next(), shown.next()) {
            (Some(stage), None) if self.state(stage).active => Some(stage),
            _ => None,
        }
    }

    /// First half of a transition: the leaving panel loses its active state.
    pub fn begin(&mut self, transition: Transition) {
        self.states[transition.from.index()].active = false;
    }

    /// Second half of a transition: hide the leaving panel, reveal and
    /// activate the entering one.
    pub fn complete(&mut self, transition: Transition) {
        self.states[transition.from.index()] = PanelState::default();
        self.states[transition.to.index()] = PanelState {
            visible: true,
            active: true,
        };
    }
}
