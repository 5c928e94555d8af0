use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;
use crate::topology::Topology;
use crate::types::{CaptureFrame, FrameIndex};

/// Every frame of one capture, keyed by frame index. Indices need not be
/// contiguous. Built once by the loaders in [`crate::parse`], read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStore {
    frames: BTreeMap<FrameIndex, CaptureFrame>,
    topology: Topology,
}

impl FrameStore {
    pub fn new(frames: BTreeMap<FrameIndex, CaptureFrame>, topology: Topology) -> Self {
        FrameStore { frames, topology }
    }

    /// Same as [`crate::parse::load_frames_from_value`].
    pub fn from_value(root: &Value, topology: Topology) -> Result<Self> {
        crate::parse::load_frames_from_value(root, topology)
    }

    pub fn has(&self, index: FrameIndex) -> bool {
        self.frames.contains_key(&index)
    }

    pub fn get(&self, index: FrameIndex) -> Option<&CaptureFrame> {
        self.frames.get(&index)
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn first_index(&self) -> Option<FrameIndex> {
        self.frames.keys().next().copied()
    }

    pub fn last_index(&self) -> Option<FrameIndex> {
        self.frames.keys().next_back().copied()
    }

    /// Frame indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.frames.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, &CaptureFrame)> + '_ {
        self.frames.iter().map(|(&index, frame)| (index, frame))
    }
}
