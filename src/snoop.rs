// filepath: src/snoop.rs
//! Recursive event subscription over the window tree
//!
//! Walks the hierarchy below a starting window and registers interest in
//! pointer and key-release events on every window found. Windows that have
//! children are also asked to report new children, so windows created later
//! can be picked up by walking again from their parent. Some toolkits only
//! announce a new window to its container, never to the window itself, so
//! the creation interest always goes on the parent.

use crate::error::Result;
use crate::window_system::{Interest, WindowSystem};
use log::{debug, trace};

/// Register interest on `start` and everything below it.
///
/// A `start` without children is left alone. Returns the number of windows
/// registered. Any tree query failure aborts the walk.
pub fn snoop<S: WindowSystem>(system: &S, start: S::Window) -> Result<usize> {
    // (window, is the walk's starting point)
    let mut pending = vec![(start, true)];
    let mut registered = 0;

    while let Some((window, is_start)) = pending.pop() {
        let children = system.query_tree(window)?;

        if children.is_empty() {
            if is_start {
                debug!("snoop: {:?} has no children, nothing to do", window);
                continue;
            }
            trace!("snoop: {:?} input", window);
            system.select_input(window, Interest::Input)?;
        } else {
            trace!("snoop: {:?} container of {}", window, children.len());
            system.select_input(window, Interest::Container)?;
        }
        registered += 1;

        // Reversed so children are visited in stacking order
        pending.extend(children.into_iter().rev().map(|child| (child, false)));
    }

    debug!("snoop: registered {} windows below {:?}", registered, start);
    Ok(registered)
}
