//! Bot module - Telegram transport.

pub mod actuator;
pub mod dispatcher;
mod runtime;
pub mod webhook;

pub use actuator::TelegramActuator;
pub use dispatcher::{build_dispatcher, AppState, ThrottledBot};
pub use runtime::run;
