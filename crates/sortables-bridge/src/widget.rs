#![forbid(unsafe_code)]

//! Widget driver.
//!
//! [`SortableWidget`] owns one drag state machine, its sensors, and the
//! injected [`HostBridge`]. Raw input goes in through
//! [`SortableWidget::handle_input`]; committed arrangements come out through
//! the bridge.
//!
//! # Invariants
//!
//! - The bridge sees a commit only for a completed drag that changed the
//!   arrangement, and at most one per drag.
//! - A reset replaces the arrangement wholesale and never commits.
//! - Frame heights are forwarded only when they differ from the last one sent.
//!
//! # Failure Modes
//!
//! - Invalid arguments at mount or reset: [`BridgeError::Config`], and on reset
//!   the widget keeps showing the previous arrangement.
//! - Bridge write failures surface from the call that triggered them. The
//!   local state has already advanced; the host simply missed the message.

use sortables_core::{DragEvent, DragState, Input, Model, SensorConfig, Sensors, Transition};
use web_time::Instant;

use crate::config::{ContainerDescription, SortableArgs};
use crate::error::Result;
use crate::host::HostBridge;
use crate::view::SortableView;

/// A mounted sortable widget.
pub struct SortableWidget<B: HostBridge> {
    bridge: B,
    args: SortableArgs,
    state: DragState,
    sensors: Sensors,
    value: Vec<ContainerDescription>,
    frame_height: Option<u32>,
}

impl<B: HostBridge> SortableWidget<B> {
    /// Fetch the configuration from `bridge` and build the widget.
    pub fn mount(mut bridge: B, config: SensorConfig) -> Result<Self> {
        let args = bridge.initial_config()?;
        let model = args.to_model()?;
        tracing::info!(
            containers = model.len(),
            items = model.item_count(),
            direction = args.direction.as_str(),
            "widget mounted"
        );
        Ok(Self {
            bridge,
            sensors: Sensors::new(config, args.direction.into()),
            state: DragState::new(model),
            value: args.items.clone(),
            args,
            frame_height: None,
        })
    }

    /// Apply one drag event, committing through the bridge when the
    /// arrangement changed.
    pub fn handle(&mut self, event: DragEvent) -> Result<Transition> {
        let transition = self.state.apply(event);
        if !self.state.is_dragging() && self.sensors.is_dragging() {
            self.sensors.reset();
        }
        if let Some(model) = transition.committed() {
            let value = self.args.describe(model);
            self.bridge.commit(&value)?;
            self.value = value;
        }
        Ok(transition)
    }

    /// Feed raw input through the sensors.
    pub fn handle_input(&mut self, input: &Input, now: Instant) -> Result<Vec<Transition>> {
        let events = self.sensors.process(input, self.state.model(), now);
        self.apply_all(events)
    }

    /// Advance time-based activation (touch hold).
    pub fn tick(&mut self, now: Instant) -> Result<Vec<Transition>> {
        let events = self.sensors.tick(now);
        self.apply_all(events)
    }

    fn apply_all(&mut self, events: Vec<DragEvent>) -> Result<Vec<Transition>> {
        events.into_iter().map(|event| self.handle(event)).collect()
    }

    /// Replace the arguments, discarding any running drag.
    ///
    /// A different `key` means a different widget on the host side, so the
    /// value starts over from the new items. With the same key the last
    /// committed value stands until the next commit.
    pub fn reset(&mut self, args: SortableArgs) -> Result<()> {
        let model = args.to_model()?;
        tracing::info!(
            containers = model.len(),
            items = model.item_count(),
            dragging = self.state.is_dragging(),
            "widget reset"
        );
        self.state.reset(model);
        self.sensors.reset();
        self.sensors.set_axis(args.direction.into());
        if args.key != self.args.key {
            self.value = args.items.clone();
        }
        self.args = args;
        Ok(())
    }

    /// Ask the bridge for new arguments and reset to them.
    pub fn reload(&mut self) -> Result<()> {
        let args = self.bridge.initial_config()?;
        self.reset(args)
    }

    /// Forward a rendered height. Returns whether a message was sent.
    pub fn report_height(&mut self, height: u32) -> Result<bool> {
        if self.frame_height == Some(height) {
            return Ok(false);
        }
        self.bridge.set_frame_height(height)?;
        self.frame_height = Some(height);
        Ok(true)
    }

    /// The arrangement as currently displayed.
    #[must_use]
    pub fn model(&self) -> &Model {
        self.state.model()
    }

    /// The drag state machine.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn args(&self) -> &SortableArgs {
        &self.args
    }

    /// The value the host sees: the inbound items until the first commit,
    /// then the last committed arrangement.
    #[must_use]
    pub fn value(&self) -> &[ContainerDescription] {
        &self.value
    }

    /// The arrangement as currently displayed, in the host's shape.
    #[must_use]
    pub fn describe(&self) -> Vec<ContainerDescription> {
        self.args.describe(self.state.model())
    }

    /// Describe the tree for a rendering layer.
    #[must_use]
    pub fn view(&self) -> SortableView {
        SortableView::build(self.state.model(), &self.args, self.state.active_item())
    }

    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn into_bridge(self) -> B {
        self.bridge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::host::RecordingBridge;

    fn start(item: &str) -> DragEvent {
        DragEvent::Start { item: item.into() }
    }

    fn end(active: &str, over: &str) -> DragEvent {
        DragEvent::End {
            active: active.into(),
            over: Some(over.into()),
        }
    }

    fn widget(containers: Vec<ContainerDescription>) -> SortableWidget<RecordingBridge> {
        SortableWidget::mount(
            RecordingBridge::new(SortableArgs::new(containers)),
            SensorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn mount_without_config_fails() {
        let err = SortableWidget::mount(RecordingBridge::default(), SensorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, BridgeError::NoConfig));
    }

    #[test]
    fn mount_rejects_duplicate_ids() {
        let args = SortableArgs::new(vec![ContainerDescription::new(None, ["a", "a"])]);
        let err = SortableWidget::mount(RecordingBridge::new(args), SensorConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn commit_reaches_bridge_in_host_shape() {
        let mut w = widget(vec![ContainerDescription::new(None, ["1", "2", "3"])]);
        w.handle(start("2")).unwrap();
        assert!(w.handle(end("2", "1")).unwrap().committed().is_some());
        let expected = [ContainerDescription::new(None, ["2", "1", "3"])];
        assert_eq!(w.bridge().commits(), [expected.to_vec()]);
        assert_eq!(w.value(), expected);
    }

    #[test]
    fn unchanged_drop_does_not_commit() {
        let mut w = widget(vec![ContainerDescription::new(Some("A"), ["1"])]);
        w.handle(start("1")).unwrap();
        assert_eq!(w.handle(end("1", "1")).unwrap(), Transition::Dropped);
        assert!(w.bridge().commits().is_empty());
        assert_eq!(w.value(), [ContainerDescription::new(Some("A"), ["1"])]);
    }

    #[test]
    fn reset_discards_drag_without_commit() {
        let mut w = widget(vec![
            ContainerDescription::new(Some("A"), ["1", "2"]),
            ContainerDescription::new(Some("B"), ["3"]),
        ]);
        w.handle(start("1")).unwrap();
        w.handle(DragEvent::Over {
            active: "1".into(),
            over: "3".into(),
        })
        .unwrap();
        w.reset(SortableArgs::new(vec![ContainerDescription::new(
            Some("C"),
            ["9"],
        )]))
        .unwrap();
        assert!(!w.state().is_dragging());
        assert_eq!(w.describe(), [ContainerDescription::new(Some("C"), ["9"])]);
        assert!(w.bridge().commits().is_empty());
    }

    #[test]
    fn invalid_reset_keeps_previous_arrangement() {
        let mut w = widget(vec![ContainerDescription::new(Some("A"), ["1"])]);
        let bad = SortableArgs::new(vec![ContainerDescription::new(Some("x"), ["x"])]);
        assert!(w.reset(bad).is_err());
        assert_eq!(w.describe(), [ContainerDescription::new(Some("A"), ["1"])]);
    }

    #[test]
    fn new_key_restarts_value() {
        let mut w = widget(vec![ContainerDescription::new(None, ["1", "2"])]);
        w.handle(start("1")).unwrap();
        w.handle(end("1", "2")).unwrap();
        let committed = [ContainerDescription::new(None, ["2", "1"])];
        assert_eq!(w.value(), committed);

        let same_key = w.args().clone();
        w.reset(same_key).unwrap();
        assert_eq!(w.value(), committed);

        let mut new_key = w.args().clone();
        new_key.key = Some(serde_json::json!("other"));
        w.reset(new_key).unwrap();
        assert_eq!(w.value(), [ContainerDescription::new(None, ["1", "2"])]);
    }

    #[test]
    fn reload_pulls_next_config() {
        let mut bridge = RecordingBridge::new(SortableArgs::new(vec![ContainerDescription::new(
            None,
            ["1"],
        )]));
        bridge.push_config(SortableArgs::new(vec![ContainerDescription::new(
            None,
            ["2"],
        )]));
        let mut w = SortableWidget::mount(bridge, SensorConfig::default()).unwrap();
        w.reload().unwrap();
        assert_eq!(w.describe(), [ContainerDescription::new(None, ["2"])]);
        assert!(matches!(w.reload(), Err(BridgeError::NoConfig)));
    }

    #[test]
    fn frame_height_is_deduplicated() {
        let mut w = widget(vec![ContainerDescription::new(None, ["1"])]);
        assert!(w.report_height(100).unwrap());
        assert!(!w.report_height(100).unwrap());
        assert!(w.report_height(140).unwrap());
        assert_eq!(w.bridge().heights(), [100, 140]);
    }

    #[test]
    fn view_marks_active_item_during_drag() {
        let mut w = widget(vec![ContainerDescription::new(None, ["1", "2"])]);
        w.handle(start("2")).unwrap();
        let view = w.view();
        assert!(view.containers[0].items[1].active);
        assert_eq!(view.overlay.map(|item| item.id).as_deref(), Some("2"));
    }
}
