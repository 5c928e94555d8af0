//! Joint sets and bone connectivity of the two hand skeletons found in capture files.
//!
//! Joint ordinals index straight into a frame's joint list, so both tables
//! below are written out explicitly instead of leaning on declaration order.

use serde::{Deserialize, Serialize};

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Ordinal of a joint within its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JointId(pub usize);

impl JointId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A renderable bone between `parent` and `child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneConnection {
    pub parent: JointId,
    pub child: JointId,
}

const fn bone(parent: JointId, child: JointId) -> BoneConnection {
    BoneConnection { parent, child }
}

/// Root of every topology.
pub const ROOT: JointId = JointId(0);

/////////////////////////////////////////////////////////////////////////////////////////////////

/// 15-joint MANO-reduced hand: wrist, three segments on each long finger, two on the thumb.
pub mod mano {
    use super::{bone, BoneConnection, JointId};

    pub const WRIST: JointId = JointId(0);
    pub const INDEX1: JointId = JointId(1); // metacarpal
    pub const INDEX2: JointId = JointId(2); // proximal
    pub const INDEX3: JointId = JointId(3); // distal
    pub const MIDDLE1: JointId = JointId(4);
    pub const MIDDLE2: JointId = JointId(5);
    pub const MIDDLE3: JointId = JointId(6);
    pub const RING1: JointId = JointId(7);
    pub const RING2: JointId = JointId(8);
    pub const RING3: JointId = JointId(9);
    pub const PINKY1: JointId = JointId(10);
    pub const PINKY2: JointId = JointId(11);
    pub const PINKY3: JointId = JointId(12);
    pub const THUMB1: JointId = JointId(13); // metacarpal
    pub const THUMB2: JointId = JointId(14); // proximal/distal

    pub const JOINT_NAMES: [&str; 15] = [
        "Wrist", "Index1", "Index2", "Index3", "Middle1", "Middle2", "Middle3", "Ring1", "Ring2",
        "Ring3", "Pinky1", "Pinky2", "Pinky3", "Thumb1", "Thumb2",
    ];

    pub const CONNECTIONS: [BoneConnection; 14] = [
        // thumb
        bone(WRIST, THUMB1),
        bone(THUMB1, THUMB2),
        // index
        bone(WRIST, INDEX1),
        bone(INDEX1, INDEX2),
        bone(INDEX2, INDEX3),
        // middle
        bone(WRIST, MIDDLE1),
        bone(MIDDLE1, MIDDLE2),
        bone(MIDDLE2, MIDDLE3),
        // ring
        bone(WRIST, RING1),
        bone(RING1, RING2),
        bone(RING2, RING3),
        // pinky
        bone(WRIST, PINKY1),
        bone(PINKY1, PINKY2),
        bone(PINKY2, PINKY3),
    ];
}

/// 21-joint hand: wrist plus a four-joint chain per finger, thumb first.
pub mod full {
    use super::{bone, BoneConnection, JointId};

    pub const WRIST: JointId = JointId(0);
    pub const THUMB1: JointId = JointId(1);
    pub const THUMB2: JointId = JointId(2);
    pub const THUMB3: JointId = JointId(3);
    pub const THUMB4: JointId = JointId(4);
    pub const INDEX1: JointId = JointId(5);
    pub const INDEX2: JointId = JointId(6);
    pub const INDEX3: JointId = JointId(7);
    pub const INDEX4: JointId = JointId(8);
    pub const MIDDLE1: JointId = JointId(9);
    pub const MIDDLE2: JointId = JointId(10);
    pub const MIDDLE3: JointId = JointId(11);
    pub const MIDDLE4: JointId = JointId(12);
    pub const RING1: JointId = JointId(13);
    pub const RING2: JointId = JointId(14);
    pub const RING3: JointId = JointId(15);
    pub const RING4: JointId = JointId(16);
    pub const PINKY1: JointId = JointId(17);
    pub const PINKY2: JointId = JointId(18);
    pub const PINKY3: JointId = JointId(19);
    pub const PINKY4: JointId = JointId(20);

    pub const JOINT_NAMES: [&str; 21] = [
        "Wrist", "Thumb1", "Thumb2", "Thumb3", "Thumb4", "Index1", "Index2", "Index3", "Index4",
        "Middle1", "Middle2", "Middle3", "Middle4", "Ring1", "Ring2", "Ring3", "Ring4", "Pinky1",
        "Pinky2", "Pinky3", "Pinky4",
    ];

    pub const CONNECTIONS: [BoneConnection; 20] = [
        bone(WRIST, THUMB1),
        bone(THUMB1, THUMB2),
        bone(THUMB2, THUMB3),
        bone(THUMB3, THUMB4),
        bone(WRIST, INDEX1),
        bone(INDEX1, INDEX2),
        bone(INDEX2, INDEX3),
        bone(INDEX3, INDEX4),
        bone(WRIST, MIDDLE1),
        bone(MIDDLE1, MIDDLE2),
        bone(MIDDLE2, MIDDLE3),
        bone(MIDDLE3, MIDDLE4),
        bone(WRIST, RING1),
        bone(RING1, RING2),
        bone(RING2, RING3),
        bone(RING3, RING4),
        bone(WRIST, PINKY1),
        bone(PINKY1, PINKY2),
        bone(PINKY2, PINKY3),
        bone(PINKY3, PINKY4),
    ];
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Skeleton schema a capture source conforms to. Chosen once, at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    #[default]
    #[serde(alias = "mano", alias = "15")]
    ManoReduced,
    #[serde(alias = "21")]
    Full,
}

impl Topology {
    pub fn joint_count(&self) -> usize {
        self.joint_names().len()
    }

    pub fn connections(&self) -> &'static [BoneConnection] {
        match self {
            Topology::ManoReduced => &mano::CONNECTIONS,
            Topology::Full => &full::CONNECTIONS,
        }
    }

    pub fn joint_names(&self) -> &'static [&'static str] {
        match self {
            Topology::ManoReduced => &mano::JOINT_NAMES,
            Topology::Full => &full::JOINT_NAMES,
        }
    }

    pub fn joint_name(&self, joint: JointId) -> Option<&'static str> {
        self.joint_names().get(joint.index()).copied()
    }

    pub fn find_joint_by_name(&self, name: &str) -> Option<JointId> {
        self.joint_names()
            .iter()
            .position(|&n| n.eq_ignore_ascii_case(name))
            .map(JointId)
    }

    /// `None` for the root and for ordinals outside the topology.
    pub fn parent_of(&self, joint: JointId) -> Option<JointId> {
        self.connections()
            .iter()
            .find(|connection| connection.child == joint)
            .map(|connection| connection.parent)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
