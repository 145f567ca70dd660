//! Joint limits and pose history.
//!
//! Joints belong to the interactive posing layer. The renderer treats a joint
//! node exactly like a plain transform node and never reads this state.

use arbor_math::{rotation, Axis, DMat4};

/// Allowed rotation about one axis, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointRange {
    pub min: f64,
    pub init: f64,
    pub max: f64,
}

impl JointRange {
    pub fn new(min: f64, init: f64, max: f64) -> Self {
        Self { min, init, max }
    }

    /// Clamp an angle into `[min, max]`.
    pub fn clamp(&self, angle: f64) -> f64 {
        angle.max(self.min).min(self.max)
    }
}

impl From<[f64; 3]> for JointRange {
    fn from(a: [f64; 3]) -> Self {
        JointRange::new(a[0], a[1], a[2])
    }
}

/// Joint angles about X and Y, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JointAngles {
    pub x: f64,
    pub y: f64,
}

/// Two-axis joint with undo/redo history of poses.
///
/// The top of the undo stack is the current pose. With an empty history the
/// joint sits at the `init` angles of its ranges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointNode {
    range_x: JointRange,
    range_y: JointRange,
    undo_stack: Vec<JointAngles>,
    redo_stack: Vec<JointAngles>,
}

impl JointNode {
    pub fn new(range_x: JointRange, range_y: JointRange) -> Self {
        Self {
            range_x,
            range_y,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn range_x(&self) -> JointRange {
        self.range_x
    }

    pub fn range_y(&self) -> JointRange {
        self.range_y
    }

    pub fn set_joint_x(&mut self, min: f64, init: f64, max: f64) {
        self.range_x = JointRange::new(min, init, max);
    }

    pub fn set_joint_y(&mut self, min: f64, init: f64, max: f64) {
        self.range_y = JointRange::new(min, init, max);
    }

    fn initial_angles(&self) -> JointAngles {
        JointAngles {
            x: self.range_x.clamp(self.range_x.init),
            y: self.range_y.clamp(self.range_y.init),
        }
    }

    /// The current pose.
    pub fn current_angles(&self) -> JointAngles {
        self.undo_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.initial_angles())
    }

    /// Start a new pose edit, copying the current pose. Clears redo history.
    pub fn push_pose(&mut self) {
        self.redo_stack.clear();
        let current = self.current_angles();
        self.undo_stack.push(current);
    }

    /// Rotate the current pose by the given deltas, clamped to the ranges.
    pub fn apply_rotation(&mut self, dx: f64, dy: f64) {
        if self.undo_stack.is_empty() {
            self.push_pose();
        }
        let (range_x, range_y) = (self.range_x, self.range_y);
        if let Some(angles) = self.undo_stack.last_mut() {
            angles.x = range_x.clamp(angles.x + dx);
            angles.y = range_y.clamp(angles.y + dy);
        }
    }

    /// Step back one pose. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(angles) => {
                self.redo_stack.push(angles);
                true
            }
            None => false,
        }
    }

    /// Reapply the last undone pose. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(angles) => {
                self.undo_stack.push(angles);
                true
            }
            None => false,
        }
    }

    /// Drop all history, returning the joint to its initial pose.
    pub fn clear_poses(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Rotation for the current pose: about X, then about Y.
    pub fn pose_matrix(&self) -> DMat4 {
        let angles = self.current_angles();
        rotation(Axis::X, angles.x.to_radians()) * rotation(Axis::Y, angles.y.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_math::{DVec3, Mat4Ext};

    fn elbow() -> JointNode {
        JointNode::new(JointRange::new(-90.0, 0.0, 90.0), JointRange::new(-10.0, 5.0, 10.0))
    }

    #[test]
    fn test_initial_pose_uses_init_angles() {
        let joint = elbow();
        assert_eq!(joint.current_angles(), JointAngles { x: 0.0, y: 5.0 });
    }

    #[test]
    fn test_rotation_is_clamped() {
        let mut joint = elbow();
        joint.apply_rotation(120.0, -40.0);
        assert_eq!(joint.current_angles(), JointAngles { x: 90.0, y: -10.0 });

        joint.apply_rotation(-30.0, 3.0);
        assert_eq!(joint.current_angles(), JointAngles { x: 60.0, y: -7.0 });
    }

    #[test]
    fn test_undo_redo() {
        let mut joint = elbow();
        joint.push_pose();
        joint.apply_rotation(30.0, 0.0);
        joint.push_pose();
        joint.apply_rotation(30.0, 0.0);
        assert_eq!(joint.current_angles().x, 60.0);

        assert!(joint.undo());
        assert_eq!(joint.current_angles().x, 30.0);
        assert!(joint.undo());
        assert_eq!(joint.current_angles().x, 0.0);
        assert!(!joint.undo());

        assert!(joint.redo());
        assert_eq!(joint.current_angles().x, 30.0);

        // A new edit drops the redo history
        joint.push_pose();
        assert!(!joint.redo());
    }

    #[test]
    fn test_clear_poses() {
        let mut joint = elbow();
        joint.apply_rotation(45.0, 0.0);
        joint.clear_poses();
        assert_eq!(joint.current_angles(), JointAngles { x: 0.0, y: 5.0 });
        assert!(!joint.undo());
    }

    #[test]
    fn test_pose_matrix() {
        let mut joint = JointNode::new(JointRange::new(-90.0, 0.0, 90.0), JointRange::default());
        joint.apply_rotation(90.0, 0.0);

        let v = joint.pose_matrix().apply_vector(DVec3::Y);
        assert!(v.abs_diff_eq(DVec3::Z, 1e-9));
    }
}
