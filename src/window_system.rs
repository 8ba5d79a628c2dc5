// filepath: src/window_system.rs
//! Window-system interface
//!
//! The traits and types the subscriber and the controller are written
//! against. The X11 connection implements them in `x11.rs`.

use crate::error::Result;
use std::fmt::Debug;
use std::hash::Hash;

/// Event classes a window is asked to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Interest {
    /// Pointer motion, button-drag motion and key release
    Input,

    /// `Input` plus notification of newly created children
    Container,
}

impl Interest {
    /// Combine two registrations; the wider one wins.
    pub fn union(self, other: Interest) -> Interest {
        self.max(other)
    }

    pub fn watches_children(self) -> bool {
        self == Interest::Container
    }
}

/// An event pulled from the window system, already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent<W> {
    /// A key was released somewhere we registered interest
    KeyRelease { keycode: u8 },

    /// The pointer moved (coordinates relative to the root)
    Motion { x: i16, y: i16 },

    ButtonPress { button: u8 },

    ButtonRelease { button: u8, x: i16, y: i16 },

    /// `window` was created as a child of `parent`
    ChildCreated { parent: W, window: W },

    /// Anything else the server sends us
    Other,
}

impl<W> InputEvent<W> {
    /// Short name used in diagnostic output
    pub fn class(&self) -> &'static str {
        match self {
            InputEvent::KeyRelease { .. } => "key-release",
            InputEvent::Motion { .. } => "motion",
            InputEvent::ButtonPress { .. } => "button-press",
            InputEvent::ButtonRelease { .. } => "button-release",
            InputEvent::ChildCreated { .. } => "child-created",
            InputEvent::Other => "other",
        }
    }
}

/// A live connection to a hierarchical window system
pub trait WindowSystem {
    type Window: Copy + Eq + Hash + Debug;
    type Cursor: Copy + Debug;

    /// Children of `window`, in stacking order
    fn query_tree(&self, window: Self::Window) -> Result<Vec<Self::Window>>;

    /// Ask to be told about `interest` on `window`. Never narrows what is
    /// already registered.
    fn select_input(&self, window: Self::Window, interest: Interest) -> Result<()>;

    /// A 1x1 fully transparent cursor
    fn blank_cursor(&self) -> Result<Self::Cursor>;

    /// Capture motion and button events display-wide, showing `cursor`.
    /// Returns false if the server refused the grab.
    fn grab_pointer(&self, cursor: Self::Cursor) -> Result<bool>;

    fn ungrab_pointer(&self) -> Result<()>;

    /// Block until the next event arrives
    fn next_event(&self) -> Result<InputEvent<Self::Window>>;
}
