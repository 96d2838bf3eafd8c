//! Truth-or-dare client library.
//!
//! This module re-exports the core components for testing and extension.

pub mod app;
pub mod backend;
pub mod chat;
pub mod config;
pub mod credentials;
pub mod dialog_manager;
pub mod entry_list;
pub mod error;
pub mod events;
pub mod logging;
pub mod notifications;
pub mod protocol;
pub mod reconcile;
pub mod session;
pub mod socketio;
pub mod state;
pub mod ui;
pub mod validation;

#[cfg(test)]
mod integration_tests;
