use gantry_core::{GantryError, GantryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Head position in steps along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pose {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Pose {
    pub const ORIGIN: Pose = Pose { x: 0, y: 0, z: 0 };

    pub fn axis(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut i64 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Inclusive travel limits per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub min: Pose,
    pub max: Pose,
}

impl Envelope {
    pub fn contains(&self, axis: Axis, value: i64) -> bool {
        value >= self.min.axis(axis) && value <= self.max.axis(axis)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            min: Pose::ORIGIN,
            max: Pose {
                x: 100,
                y: 100,
                z: 100,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GripperState {
    Open,
    Holding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rig {
    pub pose: Pose,
    pub gripper: GripperState,
    #[serde(default)]
    pub envelope: Envelope,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_envelope(Envelope::default())
    }

    pub fn with_envelope(envelope: Envelope) -> Self {
        Self {
            pose: envelope.min,
            gripper: GripperState::Open,
            envelope,
        }
    }

    /// Move along one axis, rejecting targets outside the envelope.
    /// The pose is untouched when the move is rejected.
    pub fn translate(&mut self, axis: Axis, delta: i64) -> GantryResult<()> {
        let target = self.pose.axis(axis).saturating_add(delta);
        if !self.envelope.contains(axis, target) {
            return Err(GantryError::TravelLimit {
                axis: axis.label().to_string(),
                target,
                min: self.envelope.min.axis(axis),
                max: self.envelope.max.axis(axis),
            });
        }
        *self.pose.axis_mut(axis) = target;
        Ok(())
    }

    /// Move straight to a pose, checking every axis against the envelope.
    pub fn move_to(&mut self, pose: Pose) -> GantryResult<()> {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let target = pose.axis(axis);
            if !self.envelope.contains(axis, target) {
                return Err(GantryError::TravelLimit {
                    axis: axis.label().to_string(),
                    target,
                    min: self.envelope.min.axis(axis),
                    max: self.envelope.max.axis(axis),
                });
            }
        }
        self.pose = pose;
        Ok(())
    }

    pub fn close_gripper(&mut self) -> GantryResult<()> {
        match self.gripper {
            GripperState::Open => {
                self.gripper = GripperState::Holding;
                Ok(())
            }
            GripperState::Holding => {
                Err(GantryError::Tool("gripper is already holding".to_string()))
            }
        }
    }

    pub fn open_gripper(&mut self) -> GantryResult<()> {
        match self.gripper {
            GripperState::Holding => {
                self.gripper = GripperState::Open;
                Ok(())
            }
            GripperState::Open => Err(GantryError::Tool("gripper is already open".to_string())),
        }
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::new()
    }
}
