// filepath: src/x11.rs
//! X11 implementation of the window-system interface

use crate::error::{Error, Result};
use crate::window_system::{InputEvent, Interest, WindowSystem};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use xcb::{x, Connection, Xid};

fn event_mask(interest: Interest) -> x::EventMask {
    // KEY_PRESS makes some clients stop receiving keys, so only releases
    let input = x::EventMask::POINTER_MOTION
        | x::EventMask::BUTTON_MOTION
        | x::EventMask::BUTTON1_MOTION
        | x::EventMask::BUTTON2_MOTION
        | x::EventMask::BUTTON3_MOTION
        | x::EventMask::BUTTON4_MOTION
        | x::EventMask::BUTTON5_MOTION
        | x::EventMask::KEY_RELEASE;

    if interest.watches_children() {
        input | x::EventMask::SUBSTRUCTURE_NOTIFY
    } else {
        input
    }
}

fn display_name(requested: Option<&str>) -> String {
    requested
        .map(str::to_string)
        .or_else(|| env::var("DISPLAY").ok())
        .unwrap_or_default()
}

pub struct XConnection {
    conn: Connection,
    root: x::Window,
    // What we have selected on each live window. The server replaces a
    // client's event mask on every change, so widen from here.
    registered: RefCell<HashMap<x::Window, Interest>>,
}

impl XConnection {
    /// Connect to `display`, or `$DISPLAY` when `None`.
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, screen_num) = Connection::connect(display).map_err(|source| Error::Connect {
            display: display_name(display),
            source,
        })?;

        let root = conn
            .get_setup()
            .roots()
            .nth(screen_num as usize)
            .map(|screen| screen.root())
            .ok_or_else(|| Error::Connection(format!("no screen {}", screen_num)))?;

        info!(
            "Connected to display {:?}, root window {:#x}",
            display_name(display),
            root.resource_id()
        );

        Ok(Self {
            conn,
            root,
            registered: RefCell::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> x::Window {
        self.root
    }

    fn classify(&self, event: xcb::Event) -> InputEvent<x::Window> {
        match event {
            xcb::Event::X(x::Event::KeyRelease(ev)) => InputEvent::KeyRelease {
                keycode: ev.detail(),
            },
            xcb::Event::X(x::Event::MotionNotify(ev)) => InputEvent::Motion {
                x: ev.root_x(),
                y: ev.root_y(),
            },
            xcb::Event::X(x::Event::ButtonPress(ev)) => InputEvent::ButtonPress {
                button: ev.detail(),
            },
            xcb::Event::X(x::Event::ButtonRelease(ev)) => InputEvent::ButtonRelease {
                button: ev.detail(),
                x: ev.root_x(),
                y: ev.root_y(),
            },
            xcb::Event::X(x::Event::CreateNotify(ev)) => InputEvent::ChildCreated {
                parent: ev.parent(),
                window: ev.window(),
            },
            // Arrives through the parent's substructure interest
            xcb::Event::X(x::Event::DestroyNotify(ev)) => {
                self.registered.borrow_mut().remove(&ev.window());
                InputEvent::Other
            }
            _ => InputEvent::Other,
        }
    }
}

impl WindowSystem for XConnection {
    type Window = x::Window;
    type Cursor = x::Cursor;

    fn query_tree(&self, window: x::Window) -> Result<Vec<x::Window>> {
        let cookie = self.conn.send_request(&x::QueryTree { window });
        let reply = self
            .conn
            .wait_for_reply(cookie)
            .map_err(|e| Error::QueryTree {
                window: format!("{:#x}", window.resource_id()),
                reason: e.to_string(),
            })?;
        Ok(reply.children().to_vec())
    }

    fn select_input(&self, window: x::Window, interest: Interest) -> Result<()> {
        let mut registered = self.registered.borrow_mut();
        let interest = registered
            .get(&window)
            .map_or(interest, |previous| previous.union(interest));

        let result = self
            .conn
            .send_and_check_request(&x::ChangeWindowAttributes {
                window,
                value_list: &[x::Cw::EventMask(event_mask(interest))],
            });

        match result {
            Ok(()) => {
                registered.insert(window, interest);
            }
            // Destroyed between listing and selecting
            Err(e) => debug!(
                "select_input: {:#x} gone: {}",
                window.resource_id(),
                e
            ),
        }
        Ok(())
    }

    fn blank_cursor(&self) -> Result<x::Cursor> {
        let pixmap: x::Pixmap = self.conn.generate_id();
        let gc: x::Gcontext = self.conn.generate_id();
        let cursor: x::Cursor = self.conn.generate_id();

        let requests = || -> xcb::ProtocolResult<()> {
            self.conn.send_and_check_request(&x::CreatePixmap {
                depth: 1,
                pid: pixmap,
                drawable: x::Drawable::Window(self.root),
                width: 1,
                height: 1,
            })?;
            // Pixmap contents start undefined; clear the mask
            self.conn.send_and_check_request(&x::CreateGc {
                cid: gc,
                drawable: x::Drawable::Pixmap(pixmap),
                value_list: &[x::Gc::Foreground(0)],
            })?;
            self.conn.send_and_check_request(&x::PolyFillRectangle {
                drawable: x::Drawable::Pixmap(pixmap),
                gc,
                rectangles: &[x::Rectangle {
                    x: 0,
                    y: 0,
                    width: 1,
                    height: 1,
                }],
            })?;
            self.conn.send_and_check_request(&x::FreeGc { gc })?;
            self.conn.send_and_check_request(&x::CreateCursor {
                cid: cursor,
                source: pixmap,
                mask: pixmap,
                fore_red: 0,
                fore_green: 0,
                fore_blue: 0,
                back_red: 0,
                back_green: 0,
                back_blue: 0,
                x: 0,
                y: 0,
            })?;
            self.conn.send_and_check_request(&x::FreePixmap { pixmap })
        };

        requests().map_err(|e| Error::Pointer(format!("can't create blank cursor: {}", e)))?;
        Ok(cursor)
    }

    fn grab_pointer(&self, cursor: x::Cursor) -> Result<bool> {
        let cookie = self.conn.send_request(&x::GrabPointer {
            owner_events: false,
            grab_window: self.root,
            event_mask: x::EventMask::POINTER_MOTION
                | x::EventMask::BUTTON_PRESS
                | x::EventMask::BUTTON_RELEASE,
            pointer_mode: x::GrabMode::Async,
            keyboard_mode: x::GrabMode::Async,
            confine_to: x::Window::none(),
            cursor,
            time: x::CURRENT_TIME,
        });
        let reply = self
            .conn
            .wait_for_reply(cookie)
            .map_err(|e| Error::Pointer(format!("can't grab pointer: {}", e)))?;

        let status = reply.status();
        if status != x::GrabStatus::Success {
            debug!("grab_pointer: {:?}", status);
        }
        Ok(status == x::GrabStatus::Success)
    }

    fn ungrab_pointer(&self) -> Result<()> {
        self.conn
            .send_and_check_request(&x::UngrabPointer {
                time: x::CURRENT_TIME,
            })
            .map_err(|e| Error::Pointer(format!("can't ungrab pointer: {}", e)))
    }

    fn next_event(&self) -> Result<InputEvent<x::Window>> {
        loop {
            self.conn
                .flush()
                .map_err(|e| Error::Connection(e.to_string()))?;

            match self.conn.wait_for_event() {
                Ok(event) => return Ok(self.classify(event)),
                Err(xcb::Error::Protocol(e)) => warn!("X protocol error: {}", e),
                Err(e) => return Err(Error::Connection(e.to_string())),
            }
        }
    }
}
