#![forbid(unsafe_code)]

//! Line-delimited JSON host channel.
//!
//! Inbound, the reader carries a stream of [`SortableArgs`] documents: the
//! first is the mount configuration, each later one is a reset. Outbound,
//! every message is one JSON object on its own line:
//!
//! ```text
//! {"type":"componentValue","value":[{"header":"A","items":["2","1"]}]}
//! {"type":"frameHeight","height":240}
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::config::{ContainerDescription, SortableArgs};
use crate::error::{BridgeError, Result};
use crate::host::HostBridge;

/// A message sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// A committed arrangement.
    ComponentValue { value: Vec<ContainerDescription> },
    /// The rendered surface height.
    FrameHeight { height: u32 },
}

/// [`HostBridge`] over a reader of JSON documents and a line-oriented writer.
pub struct JsonLinesBridge<R: Read, W: Write> {
    inbound: serde_json::StreamDeserializer<'static, serde_json::de::IoRead<R>, SortableArgs>,
    writer: W,
}

impl<R: Read, W: Write> JsonLinesBridge<R, W> {
    /// Create a bridge reading configuration from `reader` and writing
    /// messages to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            inbound: serde_json::Deserializer::from_reader(reader).into_iter(),
            writer,
        }
    }

    /// Write one outbound message followed by a newline, then flush.
    pub fn send(&mut self, message: &OutboundMessage) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the bridge, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: Read, W: Write> HostBridge for JsonLinesBridge<R, W> {
    fn initial_config(&mut self) -> Result<SortableArgs> {
        match self.inbound.next() {
            Some(args) => Ok(args?),
            None => Err(BridgeError::NoConfig),
        }
    }

    fn commit(&mut self, value: &[ContainerDescription]) -> Result<()> {
        self.send(&OutboundMessage::ComponentValue {
            value: value.to_vec(),
        })
    }

    fn set_frame_height(&mut self, height: u32) -> Result<()> {
        self.send(&OutboundMessage::FrameHeight { height })
    }
}
