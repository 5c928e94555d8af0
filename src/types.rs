use cgmath::Vector3;

use crate::topology::BoneConnection;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Position = Vector3<f64>;
pub type FrameIndex = u64;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Which hand a record or an update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub const BOTH: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    /// Keys a frame record may use for this hand, most common first.
    pub fn record_keys(&self) -> [&'static str; 2] {
        match self {
            HandSide::Left => ["left_hands", "left_hand"],
            HandSide::Right => ["right_hands", "right_hand"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One hand at one time index. `joints[i]` belongs to the joint with ordinal `i`
/// of the topology the frame was parsed with; the list may be shorter than the
/// topology when the capture dropped joints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    pub joints: Vec<Position>,
    /// Placement of the hand root. When present, `joints` are local to it.
    pub wrist_orientation: Option<Position>,
}

impl HandFrame {
    pub fn new(joints: Vec<Position>) -> Self {
        HandFrame {
            joints,
            wrist_orientation: None,
        }
    }

    pub fn with_wrist_orientation(joints: Vec<Position>, wrist_orientation: Position) -> Self {
        HandFrame {
            joints,
            wrist_orientation: Some(wrist_orientation),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

/// Both hands at one discrete time index. A side is `None` when the record
/// carried nothing for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureFrame {
    pub left: Option<HandFrame>,
    pub right: Option<HandFrame>,
}

impl CaptureFrame {
    pub fn hand(&self, side: HandSide) -> Option<&HandFrame> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }

    pub fn hand_mut(&mut self, side: HandSide) -> &mut Option<HandFrame> {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// A bone ready to be drawn: both endpoints are already in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneSegment {
    pub connection: BoneConnection,
    pub start: Position,
    pub end: Position,
}

/// World-space geometry of one hand for one emitted frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandGeometry {
    pub joints: Vec<Position>,
    pub bones: Vec<BoneSegment>,
}
