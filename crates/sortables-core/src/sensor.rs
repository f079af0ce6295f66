#![forbid(unsafe_code)]

//! Input sensors: turn raw pointer, touch, and keyboard input into
//! [`DragEvent`]s.
//!
//! [`Sensors`] is a stateful adapter between whatever input layer hosts the
//! widget and the [`DragState`](crate::drag::DragState) machine. Hit-testing
//! stays with the host: pointer input carries the id under the pointer, if
//! any.
//!
//! # Activation
//!
//! - **Mouse**: a press on an item becomes a drag once the pointer has moved
//!   at least [`SensorConfig::mouse_distance`] from the press point. A release
//!   before that is a click and produces nothing.
//! - **Touch**: a touch becomes a drag once held for
//!   [`SensorConfig::touch_delay`] without moving further than
//!   [`SensorConfig::touch_tolerance`]. Moving further first abandons the
//!   pending drag (the gesture is a scroll). Call [`Sensors::tick`]
//!   periodically so a motionless hold still activates.
//! - **Keyboard**: Space or Enter on the focused item picks it up; arrow keys
//!   move the hover target; Space or Enter drops; Escape cancels.
//!
//! # Invariants
//!
//! 1. Emitted sequences are well-formed: `Start`, then zero or more `Over`,
//!    then exactly one `End` or `Cancel`.
//! 2. At most one drag is active across all sensors.
//! 3. Consecutive `Over` events never repeat the same target.
//!
//! # Failure Modes
//!
//! - Focus loss during a drag emits `Cancel`; a pending activation is dropped.
//! - Input for an id the model does not know never starts a drag.

use std::time::Duration;

use web_time::Instant;

use crate::drag::DragEvent;
use crate::model::Model;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Activation constraints for each sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    /// Pointer travel (px) before a mouse press becomes a drag (default: 10).
    pub mouse_distance: f32,
    /// Hold time before a touch becomes a drag (default: 250ms).
    pub touch_delay: Duration,
    /// Travel (px) allowed during the touch hold (default: 5).
    pub touch_tolerance: f32,
    /// Whether keyboard dragging is enabled (default: true).
    pub keyboard: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            mouse_distance: 10.0,
            touch_delay: Duration::from_millis(250),
            touch_tolerance: 5.0,
            keyboard: true,
        }
    }
}

/// Axis along which items flow inside a container.
///
/// Containers are laid out along the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A pointer location in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which kind of pointer produced an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Keys the keyboard sensor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

/// Raw input as delivered by the host, with hit-testing already resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Pointer pressed; `target` is the id under the pointer.
    PointerDown {
        kind: PointerKind,
        pos: Point,
        target: Option<String>,
    },
    /// Pointer moved.
    PointerMove { pos: Point, target: Option<String> },
    /// Pointer released.
    PointerUp { pos: Point, target: Option<String> },
    /// Key pressed; `focused` is the item holding keyboard focus.
    Key { key: Key, focused: Option<String> },
    /// The surface lost focus.
    FocusLost,
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct PendingPress {
    kind: PointerKind,
    origin: Point,
    since: Instant,
    item: String,
    last_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Active {
    Pointer { item: String, over: Option<String> },
    Keyboard { item: String, over: String },
}

impl Active {
    fn item(&self) -> &str {
        match self {
            Self::Pointer { item, .. } | Self::Keyboard { item, .. } => item,
        }
    }
}

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// Stateful input adapter producing drag lifecycle events.
///
/// Feed every input through [`process`](Sensors::process) together with the
/// model as it currently stands (after applying previously emitted events).
#[derive(Debug, Clone)]
pub struct Sensors {
    config: SensorConfig,
    axis: Axis,
    pending: Option<PendingPress>,
    active: Option<Active>,
}

impl Sensors {
    /// Create sensors with the given configuration and item axis.
    #[must_use]
    pub fn new(config: SensorConfig, axis: Axis) -> Self {
        Self {
            config,
            axis,
            pending: None,
            active: None,
        }
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Change the item axis used for keyboard navigation.
    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The item being dragged, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<&str> {
        self.active.as_ref().map(Active::item)
    }

    /// Forget all pending and active state without emitting anything.
    ///
    /// Call after the host replaced the model.
    pub fn reset(&mut self) {
        self.pending = None;
        self.active = None;
    }

    /// Process one input, returning the drag events it produces.
    pub fn process(&mut self, input: &Input, model: &Model, now: Instant) -> Vec<DragEvent> {
        let mut out = Vec::with_capacity(2);
        match input {
            Input::PointerDown { kind, pos, target } => {
                self.on_pointer_down(*kind, *pos, target.as_deref(), model, now);
            }
            Input::PointerMove { pos, target } => {
                self.on_pointer_move(*pos, target.as_deref(), now, &mut out);
            }
            Input::PointerUp { target, .. } => {
                self.on_pointer_up(target.as_deref(), &mut out);
            }
            Input::Key { key, focused } => {
                self.on_key(*key, focused.as_deref(), model, &mut out);
            }
            Input::FocusLost => {
                self.pending = None;
                if self.active.take().is_some() {
                    out.push(DragEvent::Cancel);
                }
            }
        }
        out
    }

    /// Activate a motionless touch hold once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec<DragEvent> {
        let mut out = Vec::new();
        let ready = self.pending.as_ref().is_some_and(|press| {
            press.kind == PointerKind::Touch
                && now.duration_since(press.since) >= self.config.touch_delay
        });
        if ready && let Some(press) = self.pending.take() {
            self.activate(press, &mut out);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Pointer handling
// ---------------------------------------------------------------------------

impl Sensors {
    fn on_pointer_down(
        &mut self,
        kind: PointerKind,
        pos: Point,
        target: Option<&str>,
        model: &Model,
        now: Instant,
    ) {
        if self.active.is_some() {
            return;
        }
        self.pending = target
            .filter(|id| model.position_of(id).is_some())
            .map(|item| PendingPress {
                kind,
                origin: pos,
                since: now,
                item: item.to_owned(),
                last_target: Some(item.to_owned()),
            });
    }

    fn on_pointer_move(
        &mut self,
        pos: Point,
        target: Option<&str>,
        now: Instant,
        out: &mut Vec<DragEvent>,
    ) {
        if let Some(press) = self.pending.as_mut() {
            press.last_target = target.map(str::to_owned);
            let travelled = press.origin.distance(pos);
            let activate = match press.kind {
                PointerKind::Mouse => travelled >= self.config.mouse_distance,
                PointerKind::Touch => {
                    if travelled > self.config.touch_tolerance {
                        tracing::trace!(travelled, "touch moved beyond tolerance; not a drag");
                        self.pending = None;
                        return;
                    }
                    now.duration_since(press.since) >= self.config.touch_delay
                }
            };
            if activate && let Some(press) = self.pending.take() {
                self.activate(press, out);
            }
            return;
        }

        if let Some(Active::Pointer { item, over }) = self.active.as_mut()
            && let Some(target) = target
            && over.as_deref() != Some(target)
        {
            *over = Some(target.to_owned());
            out.push(DragEvent::Over {
                active: item.clone(),
                over: target.to_owned(),
            });
        }
    }

    fn on_pointer_up(&mut self, target: Option<&str>, out: &mut Vec<DragEvent>) {
        self.pending = None;
        match self.active.take() {
            Some(Active::Pointer { item, .. }) => out.push(DragEvent::End {
                active: item,
                over: target.map(str::to_owned),
            }),
            other => self.active = other,
        }
    }

    fn activate(&mut self, press: PendingPress, out: &mut Vec<DragEvent>) {
        out.push(DragEvent::Start {
            item: press.item.clone(),
        });
        let over = press.last_target;
        if let Some(target) = over.as_deref()
            && target != press.item
        {
            out.push(DragEvent::Over {
                active: press.item.clone(),
                over: target.to_owned(),
            });
        }
        self.active = Some(Active::Pointer {
            item: press.item,
            over,
        });
    }
}

// ---------------------------------------------------------------------------
// Keyboard handling
// ---------------------------------------------------------------------------

/// Direction of a keyboard step relative to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    PrevItem,
    NextItem,
    PrevContainer,
    NextContainer,
}

impl Sensors {
    fn on_key(&mut self, key: Key, focused: Option<&str>, model: &Model, out: &mut Vec<DragEvent>) {
        if key == Key::Escape {
            self.pending = None;
            if self.active.take().is_some() {
                out.push(DragEvent::Cancel);
            }
            return;
        }
        if !self.config.keyboard {
            return;
        }

        match (key, self.active.as_mut()) {
            (Key::Space | Key::Enter, None) => {
                if let Some(item) = focused.filter(|id| model.position_of(id).is_some()) {
                    self.pending = None;
                    out.push(DragEvent::Start {
                        item: item.to_owned(),
                    });
                    self.active = Some(Active::Keyboard {
                        item: item.to_owned(),
                        over: item.to_owned(),
                    });
                }
            }
            (Key::Space | Key::Enter, Some(Active::Keyboard { .. })) => {
                if let Some(Active::Keyboard { item, over }) = self.active.take() {
                    out.push(DragEvent::End {
                        active: item,
                        over: Some(over),
                    });
                }
            }
            (arrow, Some(Active::Keyboard { item, over })) => {
                let Some(step) = step_for(arrow, self.axis) else {
                    return;
                };
                if let Some(next) = neighbour(model, over, step)
                    && next != *over
                {
                    *over = next.clone();
                    out.push(DragEvent::Over {
                        active: item.clone(),
                        over: next,
                    });
                }
            }
            _ => {}
        }
    }
}

fn step_for(key: Key, axis: Axis) -> Option<Step> {
    match (axis, key) {
        (Axis::Horizontal, Key::Left) | (Axis::Vertical, Key::Up) => Some(Step::PrevItem),
        (Axis::Horizontal, Key::Right) | (Axis::Vertical, Key::Down) => Some(Step::NextItem),
        (Axis::Horizontal, Key::Up) | (Axis::Vertical, Key::Left) => Some(Step::PrevContainer),
        (Axis::Horizontal, Key::Down) | (Axis::Vertical, Key::Right) => Some(Step::NextContainer),
        _ => None,
    }
}

/// The hover target one step away from `from`.
///
/// Item steps stay inside the current container. Container steps land on the
/// first item of the neighbouring container, or on the container itself when
/// it is empty.
fn neighbour(model: &Model, from: &str, step: Step) -> Option<String> {
    let c = model.locate(from)?;
    let container = model.container(c)?;
    let index = container.index_of(from);
    match step {
        Step::PrevItem => {
            let i = index?.checked_sub(1)?;
            container.items().get(i).cloned()
        }
        Step::NextItem => container.items().get(index? + 1).cloned(),
        Step::PrevContainer | Step::NextContainer => {
            let next = if step == Step::PrevContainer {
                c.checked_sub(1)?
            } else {
                c + 1
            };
            let target = model.container(next)?;
            Some(
                target
                    .items()
                    .first()
                    .cloned()
                    .unwrap_or_else(|| target.id().to_owned()),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
