//! Registration Flow Library
//!
//! This library provides the client side of a three-stage registration flow:
//! look up a phone number with the registration service, attach an email address
//! to it, and confirm.
//!
//! # Modules
//! - `flow`: the stage flow controller
//! - `client`: registration service client (HTTP/JSON)
//! - `view`: presentation adapter and terminal rendering
//! - `stage`: forward-only stage machine and panel state
//! - `session`: the verified phone carried between stages
//! - `validation`: local input checks
//! - `config`: configuration management
//!
//! # Example
//! ```no_run
//! use registration_flow::{
//!     client::HttpRegistrationClient,
//!     config::Config,
//!     flow::{FlowController, FlowSettings},
//!     view::TerminalView,
//! };
//!
//! async fn run() {
//!     let config = Config::new().expect("Failed to load configuration");
//!     let client = HttpRegistrationClient::new(&config.service).expect("Failed to create client");
//!     let view = TerminalView::new(std::io::stdout(), config.transition_settle());
//!     let mut flow = FlowController::new(client, view, FlowSettings::from(&config));
//!     flow.start();
//!     let _ = flow.check_phone("5551234").await;
//! }
//! ```

pub mod client;
pub mod config;
pub mod flow;
pub mod session;
pub mod stage;
pub mod validation;
pub mod view;
