//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Handles commands, text and photo messages
//! - `callback_handler`: Handles category selection from the inline keyboard
//! - `dispatcher`: Delivers finished reports to the staff group
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod dispatcher;
pub mod message_handler;
pub mod ui_builder;

use crate::intake::Intake;

/// Intake wired to the Telegram group dispatcher
pub type SupportIntake = Intake<dispatcher::GroupDispatcher>;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use dispatcher::GroupDispatcher;
pub use message_handler::message_handler;
