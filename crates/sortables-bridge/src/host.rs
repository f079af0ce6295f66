#![forbid(unsafe_code)]

//! The injected host interface.
//!
//! The widget never calls the embedding application directly. Everything it
//! needs from the host, and everything it reports, goes through a
//! [`HostBridge`] passed in at mount.

use crate::config::{ContainerDescription, SortableArgs};
use crate::error::{BridgeError, Result};

/// Channel between the widget and the embedding application.
pub trait HostBridge {
    /// Fetch the configuration to display.
    ///
    /// Called once at mount and again whenever the widget is asked to reload;
    /// each call may return new arguments (a host-initiated reset).
    fn initial_config(&mut self) -> Result<SortableArgs>;

    /// Report a committed arrangement, in the same shape as the inbound
    /// `items`.
    fn commit(&mut self, value: &[ContainerDescription]) -> Result<()>;

    /// Report the rendered surface height in pixels.
    fn set_frame_height(&mut self, height: u32) -> Result<()>;
}

impl<B: HostBridge + ?Sized> HostBridge for &mut B {
    fn initial_config(&mut self) -> Result<SortableArgs> {
        (**self).initial_config()
    }

    fn commit(&mut self, value: &[ContainerDescription]) -> Result<()> {
        (**self).commit(value)
    }

    fn set_frame_height(&mut self, height: u32) -> Result<()> {
        (**self).set_frame_height(height)
    }
}

/// In-memory bridge that records everything the widget reports.
///
/// Useful for tests and for embedding the widget where the host simply polls
/// for results.
#[derive(Debug, Clone, Default)]
pub struct RecordingBridge {
    pending: Vec<SortableArgs>,
    commits: Vec<Vec<ContainerDescription>>,
    heights: Vec<u32>,
}

impl RecordingBridge {
    /// A bridge that will hand out `args` at mount.
    #[must_use]
    pub fn new(args: SortableArgs) -> Self {
        Self {
            pending: vec![args],
            ..Self::default()
        }
    }

    /// Queue arguments for the next [`HostBridge::initial_config`] call.
    pub fn push_config(&mut self, args: SortableArgs) {
        self.pending.push(args);
    }

    /// Every committed value, oldest first.
    #[must_use]
    pub fn commits(&self) -> &[Vec<ContainerDescription>] {
        &self.commits
    }

    /// The most recent committed value.
    #[must_use]
    pub fn last_commit(&self) -> Option<&[ContainerDescription]> {
        self.commits.last().map(Vec::as_slice)
    }

    /// Every reported frame height, oldest first.
    #[must_use]
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }
}

impl HostBridge for RecordingBridge {
    fn initial_config(&mut self) -> Result<SortableArgs> {
        if self.pending.is_empty() {
            return Err(BridgeError::NoConfig);
        }
        Ok(self.pending.remove(0))
    }

    fn commit(&mut self, value: &[ContainerDescription]) -> Result<()> {
        self.commits.push(value.to_vec());
        Ok(())
    }

    fn set_frame_height(&mut self, height: u32) -> Result<()> {
        self.heights.push(height);
        Ok(())
    }
}
