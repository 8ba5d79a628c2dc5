pub mod banish;
pub mod config;
pub mod error;
pub mod snoop;
pub mod window_system;
pub mod x11;

#[cfg(test)]
mod testing;

pub use crate::banish::{Banisher, Outcome, Pointer};
pub use crate::config::BanishConfig;
pub use crate::error::{Error, Result};
pub use crate::snoop::snoop;
pub use crate::window_system::{InputEvent, Interest, WindowSystem};
pub use crate::x11::XConnection;
