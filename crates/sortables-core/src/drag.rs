#![forbid(unsafe_code)]

//! The drag-reorder state machine.
//!
//! [`DragState`] is an explicit record of everything a sortable widget
//! remembers between input events: the current [`Model`] and, while a drag is
//! in progress, a [`DragSession`] holding the rollback snapshot and the active
//! item. Each [`DragEvent`] is applied with [`DragState::apply`], which returns
//! a [`Transition`] describing the outcome.
//!
//! # State Machine
//!
//! ```text
//!          Start                      Over (cross-container: provisional move)
//!   Idle ─────────▶ Dragging ◀──────┐
//!    ▲                 │  └──────────┘
//!    │   End / Cancel  │
//!    └─────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Provisional models produced by `Over` are never reported as commits.
//! 2. `End` yields at most one [`Transition::Committed`], and only when the
//!    resulting model differs structurally from the `Start` snapshot.
//! 3. `Cancel` restores the snapshot exactly.
//! 4. No event creates or destroys items.
//!
//! # Failure Modes
//!
//! - `Over`, `End`, or `Cancel` while idle: ignored, logged at debug level.
//! - Unknown ids: the operation that needed them is skipped.
//! - `Start` while dragging: the running drag is cancelled first.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::equality::{first_difference, structurally_equal};
use crate::model::Model;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A disambiguated drag lifecycle event with resolved ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum DragEvent {
    /// An item was picked up.
    Start { item: String },
    /// The dragged item hovers over `over` (an item or a container id).
    Over { active: String, over: String },
    /// The item was released over `over`, or outside any target.
    End {
        active: String,
        #[cfg_attr(feature = "serde", serde(default))]
        over: Option<String>,
    },
    /// The drag was interrupted.
    Cancel,
}

impl DragEvent {
    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Over { .. } => "over",
            Self::End { .. } => "end",
            Self::Cancel => "cancel",
        }
    }
}

// ---------------------------------------------------------------------------
// Session and state
// ---------------------------------------------------------------------------

/// Whether a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Dragging,
}

/// Transient state for one drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    snapshot: Model,
    active_item: String,
}

impl DragSession {
    /// The model as it was when the drag started.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &Model {
        &self.snapshot
    }

    /// The item being dragged.
    #[inline]
    #[must_use]
    pub fn active_item(&self) -> &str {
        &self.active_item
    }
}

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Over/End/Cancel arrived with no drag in progress.
    NotDragging,
    /// The event names an item that is not in the model.
    UnknownItem,
    /// The event names a different active item than the running session.
    ActiveMismatch,
}

/// Outcome of applying one [`DragEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing happened.
    Ignored(IgnoreReason),
    /// A drag session began.
    Started,
    /// An `Over` was processed; `moved` tells whether the provisional model
    /// changed.
    Hovered { moved: bool },
    /// The drag finished and the arrangement matches the snapshot, or the
    /// drop landed outside every target.
    Dropped,
    /// The drag finished with a new arrangement to report to the host.
    Committed(Model),
    /// The drag was cancelled and the snapshot restored.
    Cancelled,
}

impl Transition {
    /// The committed model, if this transition carries one.
    #[must_use]
    pub fn committed(&self) -> Option<&Model> {
        match self {
            Self::Committed(model) => Some(model),
            _ => None,
        }
    }
}

/// The widget's drag-related state: the current model plus the optional
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragState {
    model: Model,
    session: Option<DragSession>,
}

impl DragState {
    /// Idle state over `model`.
    #[must_use]
    pub fn new(model: Model) -> Self {
        Self {
            model,
            session: None,
        }
    }

    /// The current, possibly provisional, model.
    #[inline]
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The running session, if any.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Dragging
        } else {
            Phase::Idle
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The item being dragged, for overlay rendering.
    #[must_use]
    pub fn active_item(&self) -> Option<&str> {
        self.session.as_ref().map(DragSession::active_item)
    }

    /// Whether `item` is the one being dragged.
    #[must_use]
    pub fn is_active(&self, item: &str) -> bool {
        self.active_item() == Some(item)
    }

    /// Replace the model wholesale, discarding any running drag without a
    /// commit. Used when the host supplies new arguments.
    pub fn reset(&mut self, model: Model) {
        if self.session.take().is_some() {
            tracing::debug!("reset during drag; session discarded");
        }
        self.model = model;
    }

    /// Consume the state, returning the current model.
    #[must_use]
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Apply one event.
    pub fn apply(&mut self, event: DragEvent) -> Transition {
        match event {
            DragEvent::Start { item } => self.start(item),
            DragEvent::Over { active, over } => self.over(&active, &over),
            DragEvent::End { active, over } => self.end(&active, over.as_deref()),
            DragEvent::Cancel => self.cancel(),
        }
    }

    /// Begin dragging `item`, snapshotting the current model.
    pub fn start(&mut self, item: impl Into<String>) -> Transition {
        let item = item.into();
        if self.model.position_of(&item).is_none() {
            tracing::debug!(item = %item, "start ignored: unknown item");
            return Transition::Ignored(IgnoreReason::UnknownItem);
        }
        if self.session.is_some() {
            tracing::debug!(item = %item, "start while dragging; cancelling previous drag");
            self.cancel();
        }
        self.session = Some(DragSession {
            snapshot: self.model.clone(),
            active_item: item,
        });
        Transition::Started
    }

    /// Hover `active` over `over`, applying a provisional cross-container
    /// move when `over` belongs to another container.
    ///
    /// Hovering within the active item's own container changes nothing; that
    /// reorder is settled by [`end`](Self::end).
    pub fn over(&mut self, active: &str, over: &str) -> Transition {
        if let Err(reason) = self.check_session("over", active) {
            return Transition::Ignored(reason);
        }
        let moved = match self.placed_across(active, over) {
            Some(next) => {
                self.model = next;
                true
            }
            None => false,
        };
        Transition::Hovered { moved }
    }

    /// Finish the drag, settling any same-container reorder and committing
    /// the result if it differs from the snapshot.
    pub fn end(&mut self, active: &str, over: Option<&str>) -> Transition {
        if let Err(reason) = self.check_session("end", active) {
            return Transition::Ignored(reason);
        }
        let Some(session) = self.session.take() else {
            return Transition::Ignored(IgnoreReason::NotDragging);
        };
        let Some(over) = over else {
            return Transition::Dropped;
        };

        match (self.model.position_of(active), self.model.locate(over)) {
            (Some((source, from)), Some(target)) if source == target => {
                let to = self.model.containers()[target]
                    .index_of(over)
                    .unwrap_or_else(|| self.model.containers()[target].len() - 1);
                self.model = self.model.move_within(source, from, to);
            }
            (Some(_), Some(_)) => {
                if let Some(next) = self.placed_across(active, over) {
                    self.model = next;
                }
            }
            _ => {
                tracing::debug!(active, over, "end target unresolved; keeping current model");
                return Transition::Dropped;
            }
        }

        if structurally_equal(&self.model, &session.snapshot) {
            Transition::Dropped
        } else {
            if let Some(diff) = first_difference(&session.snapshot, &self.model) {
                tracing::info!(item = %session.active_item, %diff, "drag committed");
            }
            Transition::Committed(self.model.clone())
        }
    }

    /// Abort the drag and restore the snapshot.
    pub fn cancel(&mut self) -> Transition {
        match self.session.take() {
            Some(session) => {
                self.model = session.snapshot;
                Transition::Cancelled
            }
            None => {
                tracing::debug!("cancel ignored: not dragging");
                Transition::Ignored(IgnoreReason::NotDragging)
            }
        }
    }

    fn check_session(&self, event: &'static str, active: &str) -> Result<(), IgnoreReason> {
        match &self.session {
            None => {
                tracing::debug!(event, active, "event ignored: not dragging");
                Err(IgnoreReason::NotDragging)
            }
            Some(session) if session.active_item != active => {
                tracing::debug!(
                    event,
                    active,
                    expected = %session.active_item,
                    "event ignored: active item mismatch"
                );
                Err(IgnoreReason::ActiveMismatch)
            }
            Some(_) => Ok(()),
        }
    }

    /// The model with `active` moved before `over`, when `over` resolves to a
    /// different container than the one currently holding `active`.
    fn placed_across(&self, active: &str, over: &str) -> Option<Model> {
        let target = self.model.locate(over)?;
        let (source, _) = self.model.position_of(active)?;
        (source != target).then(|| self.model.move_across(source, target, active, over))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
