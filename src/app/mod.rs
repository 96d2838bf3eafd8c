//! Application module structure for TruthDareApp
//!
//! - `core`: TruthDareApp struct, startup and session actions
//! - `events`: Backend event draining and effect application
//! - `update`: Main update loop, focus tracking and repaint scheduling
//! - `dialogs`: Dialog action handling
//! - `ui::panels`: Toolbar, lists, chat and reveal card
//! - `ui::input`: Add/send submission from the input fields

pub mod core;
pub mod dialogs;
pub mod events;
pub mod ui;
pub mod update;

pub use core::TruthDareApp;
