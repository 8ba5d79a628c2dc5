// filepath: src/banish.rs
//! Cursor visibility state machine
//!
//! Hides the pointer on key release by grabbing it display-wide with a
//! blank cursor, and shows it again on motion or button release by dropping
//! the grab. New windows are subscribed as their creation is reported.

use crate::error::Result;
use crate::snoop::snoop;
use crate::window_system::{InputEvent, WindowSystem};
use log::{debug, info};
use std::convert::Infallible;
use std::fmt;

/// Proof that the pointer grab is held. Only `Banisher::hide` makes one and
/// only `Banisher::reveal` consumes it.
#[derive(Debug)]
pub struct PointerGrab {
    _held: (),
}

#[derive(Debug, Default)]
pub enum Pointer {
    #[default]
    Visible,
    Hidden(PointerGrab),
}

impl Pointer {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Pointer::Hidden(_))
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pointer::Visible => f.write_str("visible"),
            Pointer::Hidden(_) => f.write_str("hidden"),
        }
    }
}

/// What handling one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hid,
    AlreadyHidden,
    /// The server would not give us the pointer; still visible
    GrabRefused,
    Revealed,
    AlreadyVisible,
    /// Re-subscribed this many windows
    Snooped(usize),
    Ignored,
}

pub struct Banisher<'a, S: WindowSystem> {
    system: &'a S,
    pointer: Pointer,
    blank: Option<S::Cursor>,
}

impl<'a, S: WindowSystem> Banisher<'a, S> {
    pub fn new(system: &'a S) -> Self {
        Self {
            system,
            pointer: Pointer::Visible,
            blank: None,
        }
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Pull and handle events until the connection fails.
    pub fn run(&mut self) -> Result<Infallible> {
        info!("Entering event loop");
        loop {
            let event = self.system.next_event()?;
            self.handle(event)?;
        }
    }

    /// Apply a single event to the state machine.
    pub fn handle(&mut self, event: InputEvent<S::Window>) -> Result<Outcome> {
        let outcome = match &event {
            InputEvent::KeyRelease { .. } => self.hide()?,
            InputEvent::Motion { .. } | InputEvent::ButtonRelease { .. } => self.reveal()?,
            InputEvent::ChildCreated { parent, .. } => {
                Outcome::Snooped(snoop(self.system, *parent)?)
            }
            InputEvent::ButtonPress { .. } | InputEvent::Other => Outcome::Ignored,
        };

        debug!("{}", self.describe(&event, outcome));
        Ok(outcome)
    }

    /// One diagnostic line: event class, details, outcome, resulting state
    fn describe(&self, event: &InputEvent<S::Window>, outcome: Outcome) -> String {
        let detail = match event {
            InputEvent::KeyRelease { keycode } => format!(" {}", keycode),
            InputEvent::Motion { x, y } => format!(" at {},{}", x, y),
            InputEvent::ButtonPress { button } => format!(" {}", button),
            InputEvent::ButtonRelease { button, x, y } => format!(" {} at {},{}", button, x, y),
            InputEvent::ChildCreated { parent, window } => {
                format!(" {:?} under {:?}", window, parent)
            }
            InputEvent::Other => String::new(),
        };
        format!(
            "{}{}, {:?}, pointer {}",
            event.class(),
            detail,
            outcome,
            self.pointer
        )
    }

    fn hide(&mut self) -> Result<Outcome> {
        if self.pointer.is_hidden() {
            return Ok(Outcome::AlreadyHidden);
        }

        let cursor = match self.blank {
            Some(cursor) => cursor,
            None => {
                let cursor = self.system.blank_cursor()?;
                debug!("Created blank cursor {:?}", cursor);
                self.blank = Some(cursor);
                cursor
            }
        };

        if !self.system.grab_pointer(cursor)? {
            info!("Pointer grab refused, leaving cursor visible");
            return Ok(Outcome::GrabRefused);
        }

        self.pointer = Pointer::Hidden(PointerGrab { _held: () });
        Ok(Outcome::Hid)
    }

    fn reveal(&mut self) -> Result<Outcome> {
        match std::mem::take(&mut self.pointer) {
            Pointer::Visible => Ok(Outcome::AlreadyVisible),
            Pointer::Hidden(_grab) => {
                self.system.ungrab_pointer()?;
                Ok(Outcome::Revealed)
            }
        }
    }
}
