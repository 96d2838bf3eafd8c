//! Modal dialogs - self-contained dialog components.
//!
//! Each dialog owns its editing state and returns `DialogAction`s
//! instead of mutating external state directly.
//!
//! Dialogs are stored as `Option<Dialog>` in the `DialogManager`:
//! - `None` = dialog is closed
//! - `Some(dialog)` = dialog is open with its state

mod actions;
mod alert;
mod banners;
mod confirm;
mod edit_item;
mod login;
mod username;

pub use actions::{ConfirmKind, DialogAction};
pub use alert::AlertDialog;
pub use banners::{render_banners, render_status_toast};
pub use confirm::ConfirmDialog;
pub use edit_item::EditItemDialog;
pub use login::LoginDialog;
pub use username::UsernameDialog;
