use async_trait::async_trait;
use std::fmt;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Control, Field, StageView};
use crate::stage::{PanelState, Panels, Stage, Transition};

/// Line-oriented rendering of the flow on a terminal.
pub struct TerminalView<W> {
    out: W,
    panels: Panels,
    settle: Duration,
    disabled: Vec<Control>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, settle: Duration) -> Self {
        Self {
            out,
            panels: Panels::new(Stage::PhoneEntry),
            settle,
            disabled: Vec::new(),
        }
    }

    pub fn panel(&self, stage: Stage) -> PanelState {
        self.panels.state(stage)
    }

    pub fn active_stage(&self) -> Option<Stage> {
        self.panels.active()
    }

    pub fn is_disabled(&self, control: Control) -> bool {
        self.disabled.contains(&control)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

#[async_trait]
impl<W: Write + Send> StageView for TerminalView<W> {
    fn clear_field_error(&mut self, _field: Field) {}

    fn show_field_error(&mut self, _field: Field, message: &str) {
        self.write_line(format_args!("  ! {}", message));
    }

    fn set_control_busy(&mut self, control: Control, label: &str) {
        if !self.disabled.contains(&control) {
            self.disabled.push(control);
        }
        self.write_line(format_args!("  {}", label));
    }

    fn set_control_ready(&mut self, control: Control, _label: &str) {
        self.disabled.retain(|c| *c != control);
    }

    fn show_greeting(&mut self, message: &str) {
        self.write_line(format_args!("{}", message));
    }

    fn show_final_message(&mut self, message: &str) {
        self.write_line(format_args!("{}", message));
    }

    fn focus(&mut self, field: Field) {
        let prompt = match field {
            Field::Phone => "phone> ",
            Field::Email => "email> ",
        };
        if let Err(e) = write!(self.out, "{}", prompt).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }

    async fn play_transition(&mut self, transition: Transition) {
        self.panels.begin(transition);
        tokio::time::sleep(self.settle).await;
        self.panels.complete(transition);
        debug!(from = %transition.from, to = %transition.to, "Panel transition settled");
        self.write_line(format_args!(""));
    }
}
