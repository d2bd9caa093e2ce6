//! # Support Telegram Bot
//!
//! A Telegram bot that collects problem reports and suggestions (text plus up
//! to four photos) from users and relays them to a staff group chat.

pub mod bot;
pub mod config;
pub mod intake;
pub mod messages;
pub mod store;
pub mod submission;
pub mod sweeper;
