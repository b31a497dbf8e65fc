//! Selectable list: a dropdown with keyboard-driven highlighting and
//! commit-on-select.
//!
//! The control never owns the selected value. The caller passes it in,
//! receives committed values back from [`SelectList::handle`] (or through
//! the callback given to [`SelectList::dispatch`]), and reports external
//! changes with [`SelectList::sync_value`].

mod listeners;

pub use listeners::{DocumentEvent, DocumentListeners, Subscription};

use ratatui::layout::{Position, Rect};

/// Errors constructing a [`SelectList`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("select `{0}` needs at least one option")]
    NoOptions(String),
}

/// Keys the control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Enter,
    Space,
    Up,
    Down,
    Escape,
}

/// Input aimed at the control itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectEvent {
    /// The trigger was clicked.
    Activate,

    /// A key was pressed while the control had focus.
    Key(SelectKey),

    /// The pointer moved over an option.
    Hover(usize),

    /// An option was clicked.
    Click(usize),
}

#[derive(Debug)]
pub struct SelectList {
    label: String,
    options: Vec<String>,
    open: bool,
    active: usize,
    label_area: Rect,
    trigger: Rect,
    list: Rect,
    subscription: Option<Subscription>,
}

impl SelectList {
    /// Create a closed control with the active index on `value`.
    pub fn new(
        label: impl Into<String>,
        options: Vec<String>,
        value: &str,
    ) -> Result<Self, SelectError> {
        let label = label.into();
        if options.is_empty() {
            return Err(SelectError::NoOptions(label));
        }

        let mut select = Self {
            label,
            options,
            open: false,
            active: 0,
            label_area: Rect::default(),
            trigger: Rect::default(),
            list: Rect::default(),
            subscription: None,
        };
        select.sync_value(value);
        Ok(select)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Reconcile with an externally owned value.
    ///
    /// Call whenever the value changes outside the control. Unknown values
    /// put the active index on the first option.
    pub fn sync_value(&mut self, value: &str) {
        self.active = self.options.iter().position(|o| o == value).unwrap_or(0);
    }

    /// Close without committing.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Drive the state machine. Returns the committed value, if any.
    pub fn handle(&mut self, event: SelectEvent) -> Option<String> {
        match event {
            SelectEvent::Activate => {
                self.open = !self.open;
                None
            }
            SelectEvent::Key(key) => self.on_key(key),
            SelectEvent::Hover(index) => {
                if self.open && index < self.options.len() {
                    self.active = index;
                }
                None
            }
            SelectEvent::Click(index) => self.commit(index),
        }
    }

    /// Like [`handle`](Self::handle), passing any committed value to `on_change`.
    pub fn dispatch(&mut self, event: SelectEvent, on_change: impl FnOnce(&str)) {
        if let Some(value) = self.handle(event) {
            on_change(&value);
        }
    }

    fn on_key(&mut self, key: SelectKey) -> Option<String> {
        match (self.open, key) {
            (true, SelectKey::Enter) => self.commit(self.active),
            (_, SelectKey::Enter | SelectKey::Space) => {
                self.open = !self.open;
                None
            }
            (_, SelectKey::Down) => {
                self.open = true;
                self.move_down();
                None
            }
            (_, SelectKey::Up) => {
                self.open = true;
                self.move_up();
                None
            }
            (true, SelectKey::Escape) => {
                self.open = false;
                None
            }
            (false, SelectKey::Escape) => None,
        }
    }

    fn move_up(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.active + 1 < self.options.len() {
            self.active += 1;
        }
    }

    fn commit(&mut self, index: usize) -> Option<String> {
        let Some(value) = self.options.get(index).cloned() else {
            tracing::debug!(label = %self.label, index, "commit index out of range; ignored");
            return None;
        };
        tracing::debug!(label = %self.label, %value, "option committed");
        self.active = index;
        self.open = false;
        Some(value)
    }

    // ── Document listeners ──

    /// Start listening for document-level events.
    pub fn mount(&mut self, listeners: &DocumentListeners) {
        if self.subscription.is_none() {
            self.subscription = Some(listeners.subscribe());
        }
    }

    /// Stop listening for document-level events.
    pub fn unmount(&mut self) {
        self.subscription = None;
        self.open = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Id of the live subscription, if mounted.
    pub fn subscription_id(&self) -> Option<u64> {
        self.subscription.as_ref().map(Subscription::id)
    }

    /// React to a document-level event. Never commits.
    pub fn on_document(&mut self, event: DocumentEvent) {
        if !self.open || !self.is_mounted() {
            return;
        }
        match event {
            DocumentEvent::Escape => self.open = false,
            DocumentEvent::PointerDown { column, row } => {
                if !self.contains(column, row) {
                    self.open = false;
                }
            }
        }
    }

    // ── Geometry ──

    /// Record where the label, the trigger, and the (possibly hidden)
    /// list were drawn.
    pub fn set_layout(&mut self, label: Rect, trigger: Rect, list: Rect) {
        self.label_area = label;
        self.trigger = trigger;
        self.list = list;
    }

    pub fn trigger_area(&self) -> Rect {
        self.trigger
    }

    pub fn list_area(&self) -> Rect {
        self.list
    }

    /// Whether a cell falls inside the control's rendered bounds:
    /// label, trigger, and the list while it is open.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let at = Position::new(column, row);
        self.label_area.contains(at)
            || self.trigger.contains(at)
            || (self.open && self.list.contains(at))
    }

    pub fn on_trigger(&self, column: u16, row: u16) -> bool {
        self.trigger.contains(Position::new(column, row))
    }

    /// The option drawn at a cell of the open list. The list has a
    /// one-cell border, so options start one row below its top edge.
    pub fn option_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.open {
            return None;
        }
        let inner = self.list.inner(ratatui::layout::Margin::new(1, 1));
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = usize::from(row - inner.y);
        (index < self.options.len()).then_some(index)
    }
}
