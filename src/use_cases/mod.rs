pub mod analysis;
pub mod auth;
pub mod booking;
pub mod chat;
pub mod dashboard;
pub mod demo;
pub mod error_message;
pub mod history;
pub mod navigation;
pub mod premium;
pub mod security;
pub mod session;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use error_message::{Access, ErrorCategory, UserMessage, classify};
pub use navigation::Navigator;
pub use session::SessionStore;
pub use view::{ViewContext, ViewScope, ViewState};
