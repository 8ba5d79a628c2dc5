// filepath: src/testing.rs
//! In-memory window system for unit tests

use crate::error::{Error, Result};
use crate::window_system::{InputEvent, Interest, WindowSystem};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Pointer-side requests, in the order they were made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOp {
    CreateCursor(u32),
    Grab(u32),
    Ungrab,
}

pub struct FakeWindowSystem {
    tree: RefCell<BTreeMap<u32, Vec<u32>>>,
    interests: RefCell<BTreeMap<u32, Interest>>,
    select_calls: Cell<usize>,
    failing: RefCell<HashSet<u32>>,
    events: RefCell<VecDeque<InputEvent<u32>>>,
    pointer_ops: RefCell<Vec<PointerOp>>,
    refuse_grab: Cell<bool>,
    next_cursor: Cell<u32>,
}

impl FakeWindowSystem {
    pub fn new(root: u32) -> Self {
        let mut tree = BTreeMap::new();
        tree.insert(root, Vec::new());
        Self {
            tree: RefCell::new(tree),
            interests: RefCell::new(BTreeMap::new()),
            select_calls: Cell::new(0),
            failing: RefCell::new(HashSet::new()),
            events: RefCell::new(VecDeque::new()),
            pointer_ops: RefCell::new(Vec::new()),
            refuse_grab: Cell::new(false),
            next_cursor: Cell::new(100),
        }
    }

    pub fn add_window(&self, parent: u32, window: u32) {
        let mut tree = self.tree.borrow_mut();
        tree.entry(parent).or_default().push(window);
        tree.entry(window).or_default();
    }

    pub fn fail_query(&self, window: u32) {
        self.failing.borrow_mut().insert(window);
    }

    pub fn refuse_grabs(&self, refuse: bool) {
        self.refuse_grab.set(refuse);
    }

    pub fn push_event(&self, event: InputEvent<u32>) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn interest(&self, window: u32) -> Option<Interest> {
        self.interests.borrow().get(&window).copied()
    }

    pub fn registrations(&self) -> BTreeMap<u32, Interest> {
        self.interests.borrow().clone()
    }

    pub fn select_calls(&self) -> usize {
        self.select_calls.get()
    }

    pub fn pointer_ops(&self) -> Vec<PointerOp> {
        self.pointer_ops.borrow().clone()
    }

    pub fn count(&self, op: impl Fn(&PointerOp) -> bool) -> usize {
        self.pointer_ops.borrow().iter().filter(|o| op(o)).count()
    }
}

impl WindowSystem for FakeWindowSystem {
    type Window = u32;
    type Cursor = u32;

    fn query_tree(&self, window: u32) -> Result<Vec<u32>> {
        if self.failing.borrow().contains(&window) {
            return Err(Error::QueryTree {
                window: format!("{:#x}", window),
                reason: "injected failure".to_string(),
            });
        }
        self.tree
            .borrow()
            .get(&window)
            .cloned()
            .ok_or_else(|| Error::QueryTree {
                window: format!("{:#x}", window),
                reason: "no such window".to_string(),
            })
    }

    fn select_input(&self, window: u32, interest: Interest) -> Result<()> {
        self.select_calls.set(self.select_calls.get() + 1);
        let mut interests = self.interests.borrow_mut();
        let entry = interests.entry(window).or_insert(interest);
        *entry = entry.union(interest);
        Ok(())
    }

    fn blank_cursor(&self) -> Result<u32> {
        let cursor = self.next_cursor.get();
        self.next_cursor.set(cursor + 1);
        self.pointer_ops
            .borrow_mut()
            .push(PointerOp::CreateCursor(cursor));
        Ok(cursor)
    }

    fn grab_pointer(&self, cursor: u32) -> Result<bool> {
        if self.refuse_grab.get() {
            return Ok(false);
        }
        self.pointer_ops.borrow_mut().push(PointerOp::Grab(cursor));
        Ok(true)
    }

    fn ungrab_pointer(&self) -> Result<()> {
        self.pointer_ops.borrow_mut().push(PointerOp::Ungrab);
        Ok(())
    }

    fn next_event(&self) -> Result<InputEvent<u32>> {
        self.events
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Connection("event queue closed".to_string()))
    }
}
