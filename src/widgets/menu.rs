use crate::error::Error;
use crate::nav::keys::Key;
use crate::ui::Surface;
use crate::widgets::field::{Field, FieldValue};
use crate::widgets::Widget;
use anyhow::Result;
use serde::Serialize;
use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Running,
    Committed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Request {
    Commit,
    Cancel,
}

/// Control handle a button action can hold to finish the menu.
///
/// Requests are picked up by the menu right after the key that produced
/// them. A commit request is dropped if any field is invalid at that point.
#[derive(Clone, Debug, Default)]
pub struct MenuHandle {
    pending: Rc<Cell<Option<Request>>>,
}

impl MenuHandle {
    pub fn request_commit(&self) {
        self.pending.set(Some(Request::Commit));
    }

    pub fn request_cancel(&self) {
        self.pending.set(Some(Request::Cancel));
    }

    fn take(&self) -> Option<Request> {
        self.pending.take()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MenuResult {
    pub committed: bool,
    /// One entry per field in insertion order; `None` for labels and buttons.
    pub values: Vec<Option<FieldValue>>,
}

/// Vertically scrolling list of fields with a single focus.
///
/// The visible window `[top, bottom)` always contains the focused index and
/// never spans more than `rows` fields.
#[derive(Debug)]
pub struct Menu {
    items: Vec<Field>,
    rows: usize,
    cursor: usize,
    top: usize,
    bottom: usize,
    outcome: Outcome,
    handle: MenuHandle,
}

impl Menu {
    /// A menu drawing into `rows` visible lines (at least one).
    pub fn new(rows: u16) -> Self {
        Self {
            items: Vec::new(),
            rows: usize::from(rows.max(1)),
            cursor: 0,
            top: 0,
            bottom: 0,
            outcome: Outcome::Running,
            handle: MenuHandle::default(),
        }
    }

    pub fn for_surface(surface: &dyn Surface) -> Result<Self> {
        let (rows, _) = surface.size()?;
        Ok(Self::new(rows))
    }

    pub fn push(&mut self, field: Field) {
        self.items.push(field);
        self.bottom = (self.top + self.rows).min(self.items.len());
    }

    pub fn handle(&self) -> MenuHandle {
        self.handle.clone()
    }

    /// Button that commits the menu when every field is valid.
    pub fn save_button(&self, label: impl Into<String>) -> Field {
        let handle = self.handle();
        Field::button(label, move || handle.request_commit())
    }

    pub fn cancel_button(&self, label: impl Into<String>) -> Field {
        let handle = self.handle();
        Field::button(label, move || handle.request_cancel())
    }

    pub fn fields(&self) -> &[Field] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport(&self) -> Range<usize> {
        self.top..self.bottom
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn all_valid(&self) -> bool {
        self.items.iter().all(|f| f.is_valid())
    }

    pub fn values(&self) -> Vec<Option<FieldValue>> {
        self.items.iter().map(|f| f.value()).collect()
    }

    pub fn result(&self) -> MenuResult {
        MenuResult {
            committed: self.outcome == Outcome::Committed,
            values: self.values(),
        }
    }

    /// Back to the first field with a fresh window, nothing editing, outcome running.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.top = 0;
        self.bottom = self.rows.min(self.items.len());
        self.outcome = Outcome::Running;
        self.handle.take();
        for f in &mut self.items {
            f.stop_editing();
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.clear()?;
        for (idx, field) in self
            .items
            .iter()
            .enumerate()
            .skip(self.top)
            .take(self.bottom - self.top)
        {
            let row = u16::try_from(idx - self.top).unwrap_or(u16::MAX);
            field.render(surface, row, 0, idx == self.cursor)?;
        }
        Ok(())
    }

    /// Route one key: navigation and Esc while the focused field is idle,
    /// everything to the field while it is editing. Ignored once finished.
    pub fn dispatch(&mut self, key: Key) {
        if self.outcome != Outcome::Running || self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        let editing = self.items[self.cursor].is_editing();
        trace!(?key, cursor = self.cursor, editing, "dispatch");
        if editing {
            self.items[self.cursor].on_key(key);
        } else {
            match key {
                Key::Down => self.cursor = (self.cursor + 1).min(last),
                Key::Up => self.cursor = self.cursor.saturating_sub(1),
                Key::Esc => self.handle.request_cancel(),
                other => self.items[self.cursor].on_key(other),
            }
        }
        self.apply_request();
        self.scroll_to_cursor();
    }

    fn apply_request(&mut self) {
        match self.handle.take() {
            Some(Request::Commit) => {
                if self.all_valid() {
                    self.outcome = Outcome::Committed;
                    debug!("menu committed");
                } else {
                    let invalid: Vec<&str> = self
                        .items
                        .iter()
                        .filter(|f| !f.is_valid())
                        .map(|f| f.name())
                        .collect();
                    debug!(?invalid, "save ignored");
                }
            }
            Some(Request::Cancel) => {
                self.outcome = Outcome::Cancelled;
                debug!("menu cancelled");
            }
            None => {}
        }
    }

    // Focus moves at most one row per key, so one row of scrolling suffices
    fn scroll_to_cursor(&mut self) {
        if self.cursor >= self.bottom {
            if self.bottom < self.items.len() {
                self.top += 1;
                self.bottom += 1;
                debug!(top = self.top, bottom = self.bottom, "scrolled down");
            }
        } else if self.cursor < self.top && self.top > 0 {
            self.top -= 1;
            self.bottom -= 1;
            debug!(top = self.top, bottom = self.bottom, "scrolled up");
        }
    }

    /// Run the interaction loop until a save (with every field valid) or a
    /// cancel. Focus, window and outcome are reset on entry, so a menu can be
    /// run again; `&mut self` rules out overlapping runs.
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> Result<MenuResult> {
        if self.items.is_empty() {
            return Err(Error::EmptyMenu.into());
        }
        self.reset();
        debug!(fields = self.items.len(), rows = self.rows, "menu started");
        while self.outcome == Outcome::Running {
            self.render(surface)?;
            let key = surface.read_key()?;
            self.dispatch(key);
        }
        Ok(self.result())
    }
}
