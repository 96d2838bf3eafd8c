//! UI rendering modules.
//!
//! - `toolbar`: Top toolbar with session controls
//! - `lists`: Dare/truth lists with per-entry controls
//! - `chat`: Chat log and composer
//! - `dialogs`: Modal dialogs and notification banners
//! - `theme`: Color schemes and styling utilities

pub mod chat;
pub mod dialogs;
pub mod lists;
pub mod theme;
pub mod toolbar;
