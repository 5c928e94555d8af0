//! Last-rendered state of each hand.
//!
//! Captures drop joints (occlusion, partial detections). A frame only updates
//! what it carries; every other joint and bone keeps its previous value.

use crate::playback::Renderer;
use crate::topology::Topology;
use crate::types::{BoneSegment, HandSide, Position};

/// One slot per joint and per bone of a topology. `None` until first drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    pub joints: Vec<Option<Position>>,
    pub bones: Vec<Option<(Position, Position)>>,
}

impl HandPose {
    pub fn new(topology: Topology) -> Self {
        HandPose {
            joints: vec![None; topology.joint_count()],
            bones: vec![None; topology.connections().len()],
        }
    }

    pub fn apply(&mut self, topology: Topology, joints: &[Position], bones: &[BoneSegment]) {
        for (slot, &joint) in self.joints.iter_mut().zip(joints) {
            *slot = Some(joint);
        }
        for bone in bones {
            let slot = topology
                .connections()
                .iter()
                .position(|&connection| connection == bone.connection)
                .and_then(|i| self.bones.get_mut(i));
            if let Some(slot) = slot {
                *slot = Some((bone.start, bone.end));
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }
}

/// [`Renderer`] that keeps a coasting [`HandPose`] per hand, for hosts that redraw every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRenderer {
    topology: Topology,
    pub left: HandPose,
    pub right: HandPose,
}

impl PoseRenderer {
    pub fn new(topology: Topology) -> Self {
        PoseRenderer {
            topology,
            left: HandPose::new(topology),
            right: HandPose::new(topology),
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn hand(&self, side: HandSide) -> &HandPose {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }
}

impl Renderer for PoseRenderer {
    fn update_hand(&mut self, side: HandSide, joints: &[Position], bones: &[BoneSegment]) {
        let topology = self.topology;
        let pose = match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        };
        pose.apply(topology, joints, bones);
    }
}
