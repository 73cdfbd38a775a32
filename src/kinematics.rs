// Differential drive: two wheels mounted facing each other, so the left wheel
// spins in the opposite sense to the right one for straight motion.

/// Velocity and current for one wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelCommand {
    pub velocity: i64,
    pub current: u64,
}

impl WheelCommand {
    fn from_velocity(velocity: i64) -> Self {
        WheelCommand {
            velocity,
            current: current_for(velocity),
        }
    }
}

/// Commands for both wheels of the base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveCommand {
    pub left: WheelCommand,
    pub right: WheelCommand,
}

/// Converts forward/sideways velocity into per-wheel commands.
pub fn compute(forward: i32, sideways: i32) -> DriveCommand {
    let forward = i64::from(forward);
    let sideways = i64::from(sideways);
    DriveCommand {
        left: WheelCommand::from_velocity(-(forward + sideways)),
        right: WheelCommand::from_velocity(forward - sideways),
    }
}

/// Current drawn to hold `velocity`. A wheel asked to stand still is never energized.
pub fn current_for(velocity: i64) -> u64 {
    if velocity == 0 {
        return 0;
    }
    velocity.unsigned_abs()
}
