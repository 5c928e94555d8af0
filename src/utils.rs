use cgmath::{Decomposed, EuclideanSpace, One, Point3, Quaternion, Transform};

use crate::topology::Topology;
use crate::types::{BoneSegment, HandFrame, HandGeometry, Position};

/// Root transform of a hand placed at `wrist_orientation`.
pub(crate) fn __hand_root(wrist_orientation: Position) -> Decomposed<Position, Quaternion<f64>> {
    Decomposed {
        scale: 1.0,
        rot: Quaternion::one(),
        disp: wrist_orientation,
    }
}

/// Joint positions of `hand` in world space.
/// Joints of a hand without a wrist orientation are already in world space and pass through.
pub fn world_joints(hand: &HandFrame) -> Vec<Position> {
    match hand.wrist_orientation {
        Some(wrist) => {
            let root = __hand_root(wrist);
            hand.joints
                .iter()
                .map(|&local| root.transform_point(Point3::from_vec(local)).to_vec())
                .collect()
        }
        None => hand.joints.clone(),
    }
}

/// Bones of `topology` whose two endpoints are both present in `joints`.
pub fn bone_segments(topology: Topology, joints: &[Position]) -> Vec<BoneSegment> {
    topology
        .connections()
        .iter()
        .filter_map(|&connection| {
            let start = joints.get(connection.parent.index())?;
            let end = joints.get(connection.child.index())?;
            Some(BoneSegment {
                connection,
                start: *start,
                end: *end,
            })
        })
        .collect()
}

/// Everything a renderer needs to draw `hand`.
pub fn hand_geometry(topology: Topology, hand: &HandFrame) -> HandGeometry {
    let joints = world_joints(hand);
    let bones = bone_segments(topology, &joints);
    HandGeometry { joints, bones }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::mano;

    #[test]
    fn wrist_at_joint_origin_lands_on_the_wrist() {
        let hand = HandFrame::with_wrist_orientation(
            vec![Position::new(0.0, 0.0, 0.0)],
            Position::new(1.0, 0.0, 0.0),
        );
        assert_eq!(world_joints(&hand), vec![Position::new(1.0, 0.0, 0.0)]);
    }

    #[test]
    fn bones_keep_their_shape_under_root_translation() {
        let local = vec![Position::new(0.0, 0.0, 0.0), Position::new(0.0, 0.5, 0.25)];
        let at_origin = hand_geometry(Topology::Full, &HandFrame::new(local.clone()));
        let moved = hand_geometry(
            Topology::Full,
            &HandFrame::with_wrist_orientation(local, Position::new(3.0, -2.0, 1.0)),
        );
        assert_eq!(at_origin.bones.len(), 1);
        assert_eq!(moved.bones.len(), 1);
        let a = at_origin.bones[0].end - at_origin.bones[0].start;
        let b = moved.bones[0].end - moved.bones[0].start;
        assert_eq!(a, b);
        assert_eq!(moved.bones[0].start, Position::new(3.0, -2.0, 1.0));
    }

    #[test]
    fn absolute_joints_pass_through() {
        let joints = vec![Position::new(0.1, 0.2, 0.3), Position::new(-1.0, 4.0, 2.5)];
        assert_eq!(world_joints(&HandFrame::new(joints.clone())), joints);
    }

    #[test]
    fn bones_with_a_missing_endpoint_are_dropped() {
        // wrist + index chain only; MANO ordinals 0..=3
        let joints: Vec<Position> = (0..4).map(|i| Position::new(i as f64, 0.0, 0.0)).collect();
        let bones = bone_segments(Topology::ManoReduced, &joints);
        let connections: Vec<_> = bones.iter().map(|b| b.connection).collect();
        assert_eq!(
            connections,
            vec![
                mano::CONNECTIONS[2],
                mano::CONNECTIONS[3],
                mano::CONNECTIONS[4],
            ]
        );
        assert_eq!(bones[1].start, Position::new(1.0, 0.0, 0.0));
        assert_eq!(bones[1].end, Position::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn full_hand_yields_every_bone() {
        let joints = vec![Position::new(0.0, 0.0, 0.0); Topology::Full.joint_count()];
        assert_eq!(bone_segments(Topology::Full, &joints).len(), 20);
        assert!(bone_segments(Topology::Full, &[]).is_empty());
    }
}
