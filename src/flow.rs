//! Stage Flow Controller
//!
//! Drives the three-stage registration flow: look up a phone number, attach an
//! email address to it, confirm. The controller owns the session and the
//! logical stage; everything visible goes through the `StageView`.
//!
//! # Flow
//! 1. `check_phone` validates the phone locally and asks the service to find it
//! 2. On success the phone is stored in the session and the email stage opens
//! 3. `submit_email` validates the email and registers it against the stored phone
//! 4. On success the confirmation stage opens
//!
//! Failures never move the flow; they render an inline message and leave the
//! triggering control enabled again.

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::client::{RegistrationService, ServiceError};
use crate::config::{Config, Labels, Messages};
use crate::session::Session;
use crate::stage::{Stage, StageMachine};
use crate::validation;
use crate::view::{Control, Field, Key, StageView};

/// Why a flow step did not advance
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Phone number is empty")]
    EmptyPhone,
    #[error("Email address is empty or has no '@'")]
    InvalidEmail,
    #[error("No verified phone number in session")]
    PhoneNotVerified,
    /// Well-formed negative answer, carrying the server message if any
    #[error("Rejected by registration service: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    #[error("Registration service unavailable: {0}")]
    Service(#[from] ServiceError),
}

impl FlowError {
    /// True for failures detected before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FlowError::EmptyPhone | FlowError::InvalidEmail | FlowError::PhoneNotVerified
        )
    }
}

/// Texts the controller renders
#[derive(Debug, Clone, Default)]
pub struct FlowSettings {
    pub messages: Messages,
    pub labels: Labels,
}

impl From<&Config> for FlowSettings {
    fn from(config: &Config) -> Self {
        Self {
            messages: config.messages.clone(),
            labels: config.labels.clone(),
        }
    }
}

pub struct FlowController<S, V> {
    service: S,
    view: V,
    settings: FlowSettings,
    session: Session,
    stages: StageMachine,
}

impl<S: RegistrationService, V: StageView> FlowController<S, V> {
    pub fn new(service: S, view: V, settings: FlowSettings) -> Self {
        Self {
            service,
            view,
            settings,
            session: Session::new(),
            stages: StageMachine::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stages.current()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Puts the cursor in the phone field.
    pub fn start(&mut self) {
        info!(session = %self.session.id(), "Registration flow started");
        self.focus_active_field();
    }

    /// Focuses the input of the current stage, if it has one.
    pub fn focus_active_field(&mut self) {
        if let Some(field) = Field::for_stage(self.stages.current()) {
            self.view.focus(field);
        }
    }

    /// Commit-key handling: Enter in a field triggers that field's action.
    ///
    /// Returns `None` when the key does not trigger anything.
    pub async fn on_key(
        &mut self,
        field: Field,
        key: Key,
        value: &str,
    ) -> Option<Result<(), FlowError>> {
        if key != Key::Enter {
            return None;
        }
        let result = match field {
            Field::Phone => self.check_phone(value).await,
            Field::Email => self.submit_email(value).await,
        };
        Some(result)
    }

    /// Verifies a phone number with the registration service.
    #[instrument(skip_all, fields(session = %self.session.id()))]
    pub async fn check_phone(&mut self, raw: &str) -> Result<(), FlowError> {
        self.view.clear_field_error(Field::Phone);

        let Some(phone) = validation::phone_input(raw) else {
            self.view
                .show_field_error(Field::Phone, &self.settings.messages.empty_phone);
            return Err(FlowError::EmptyPhone);
        };

        self.view
            .set_control_busy(Control::Check, &self.settings.labels.check_busy);
        debug!("Looking up phone number");
        let result = self.service.check_user(phone).await;
        self.view
            .set_control_ready(Control::Check, &self.settings.labels.check_idle);

        match result {
            Ok(reply) if reply.found => {
                self.session.verify(phone);
                self.view
                    .show_greeting(reply.message.as_deref().unwrap_or_default());
                info!("Phone number verified");

                if let Some(transition) = self.stages.advance_from(Stage::PhoneEntry) {
                    info!(from = %transition.from, to = %transition.to, "Stage transition");
                    self.view.play_transition(transition).await;
                    self.view.focus(Field::Email);
                }
                Ok(())
            }
            Ok(reply) => {
                warn!(message = ?reply.message, "Phone number not found");
                let message = server_message(&reply.message)
                    .unwrap_or(&self.settings.messages.lookup_failed);
                self.view.show_field_error(Field::Phone, message);
                Err(FlowError::Rejected(reply.message))
            }
            Err(e) => {
                error!(error = %e, "Phone lookup failed");
                self.view
                    .show_field_error(Field::Phone, &self.settings.messages.connection_error);
                Err(FlowError::Service(e))
            }
        }
    }

    /// Registers an email address for the verified phone number.
    #[instrument(skip_all, fields(session = %self.session.id()))]
    pub async fn submit_email(&mut self, raw: &str) -> Result<(), FlowError> {
        self.view.clear_field_error(Field::Email);

        let Some(email) = validation::email_input(raw) else {
            self.view
                .show_field_error(Field::Email, &self.settings.messages.invalid_email);
            return Err(FlowError::InvalidEmail);
        };

        let Some(phone) = self.session.verified_phone().map(str::to_owned) else {
            warn!("Email submitted before phone verification");
            self.view
                .show_field_error(Field::Email, &self.settings.messages.phone_not_verified);
            return Err(FlowError::PhoneNotVerified);
        };

        self.view
            .set_control_busy(Control::Submit, &self.settings.labels.submit_busy);
        debug!("Registering email");
        let result = self.service.register_email(&phone, email).await;
        self.view
            .set_control_ready(Control::Submit, &self.settings.labels.submit_idle);

        match result {
            Ok(reply) if reply.success => {
                self.view
                    .show_final_message(reply.message.as_deref().unwrap_or_default());
                info!("Email registered");

                if let Some(transition) = self.stages.advance_from(Stage::EmailEntry) {
                    info!(from = %transition.from, to = %transition.to, "Stage transition");
                    self.view.play_transition(transition).await;
                }
                Ok(())
            }
            Ok(reply) => {
                warn!(message = ?reply.message, "Email registration rejected");
                let message = server_message(&reply.message)
                    .unwrap_or(&self.settings.messages.register_failed);
                self.view.show_field_error(Field::Email, message);
                Err(FlowError::Rejected(reply.message))
            }
            Err(e) => {
                error!(error = %e, "Email registration failed");
                self.view
                    .show_field_error(Field::Email, &self.settings.messages.connection_error);
                Err(FlowError::Service(e))
            }
        }
    }
}

/// A server message worth showing; empty messages fall back to ours.
fn server_message(message: &Option<String>) -> Option<&str> {
    message.as_deref().filter(|m| !m.is_empty())
}
