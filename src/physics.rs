//! Kinematic physics step for platformer bodies
//!
//! This is the narrow "engine" half of the movement pipeline: the player
//! controller writes intent into a `Kinematics` body (velocity changes),
//! and `step()` turns that into actual motion against the level's solid
//! rectangles. The controller then reads the `StepResult` back to decide
//! whether it is grounded, falling, or bumped its head.
//!
//! Velocities are expressed in pixels per 60 Hz tick; callers pass
//! `tick = dt * 60.0` so the feel is framerate-independent.

use crate::collision::{aabb_intersect, Aabb};

/// Tuning for the step: gravity, ground friction and the hard velocity caps.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Horizontal deceleration per tick, applied when the controller is
    /// not driving the body
    pub friction_x: f32,
    /// Hard cap on horizontal speed (the running cap)
    pub max_vel_x: f32,
    /// Hard cap on vertical speed (also the jump launch speed)
    pub max_vel_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 0.5,
            friction_x: 0.65,
            max_vel_x: 5.0,
            max_vel_y: 10.0,
        }
    }
}

/// Position, velocity and extent of a moving body.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Kinematics {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Kinematics {
            x,
            y,
            vel_x: 0.0,
            vel_y: 0.0,
            width,
            height,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// What the step ran into while moving the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepResult {
    /// Landed on (or stayed on) a solid this tick
    pub on_ground: bool,
    /// Bumped a solid while moving upward
    pub hit_ceiling: bool,
    /// Got stopped by a solid on the horizontal axis
    #[allow(dead_code)] // Reserved for wall-slide moves
    pub hit_wall: bool,
}

/// Advances a body one tick against the level solids.
///
/// The motion is resolved one axis at a time, X first. Resolving per axis
/// keeps the body from snagging on the seams between adjacent tiles and
/// makes the "which side did I hit" question unambiguous.
pub fn step(
    body: &mut Kinematics,
    config: &PhysicsConfig,
    apply_friction: bool,
    solids: &[Aabb],
    tick: f32,
) -> StepResult {
    let mut result = StepResult::default();

    // Gravity, then friction when the controller isn't driving
    body.vel_y += config.gravity * tick;

    if apply_friction && body.vel_x != 0.0 {
        let decel = config.friction_x * tick;
        if body.vel_x.abs() <= decel {
            body.vel_x = 0.0;
        } else {
            body.vel_x -= decel * body.vel_x.signum();
        }
    }

    // Hard caps (the engine-side clamp the controller relies on for the
    // running speed limit)
    body.vel_x = body.vel_x.clamp(-config.max_vel_x, config.max_vel_x);
    body.vel_y = body.vel_y.clamp(-config.max_vel_y, config.max_vel_y);

    // X axis
    body.x += body.vel_x * tick;
    let moved_right = body.vel_x > 0.0;
    for solid in solids {
        if aabb_intersect(&body.aabb(), solid) {
            if moved_right {
                body.x = solid.x - body.width;
            } else {
                body.x = solid.right();
            }
            body.vel_x = 0.0;
            result.hit_wall = true;
        }
    }

    // Y axis
    body.y += body.vel_y * tick;
    for solid in solids {
        if aabb_intersect(&body.aabb(), solid) {
            if body.vel_y > 0.0 {
                body.y = solid.y - body.height;
                body.vel_y = 0.0;
                result.on_ground = true;
            } else if body.vel_y < 0.0 {
                body.y = solid.bottom();
                body.vel_y = 0.0;
                result.hit_ceiling = true;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Vec<Aabb> {
        vec![Aabb::new(0.0, 100.0, 1000.0, 32.0)]
    }

    #[test]
    fn test_falling_body_lands_on_solid() {
        let mut body = Kinematics::new(10.0, 0.0, 20.0, 40.0);
        let config = PhysicsConfig::default();
        let solids = floor();

        let mut landed = false;
        for _ in 0..120 {
            let result = step(&mut body, &config, true, &solids, 1.0);
            if result.on_ground {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(body.y, 60.0); // floor top minus body height
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_grounded_body_stays_grounded() {
        let mut body = Kinematics::new(10.0, 60.0, 20.0, 40.0);
        let config = PhysicsConfig::default();
        let solids = floor();

        for _ in 0..10 {
            let result = step(&mut body, &config, true, &solids, 1.0);
            assert!(result.on_ground);
            assert_eq!(body.y, 60.0);
        }
    }

    #[test]
    fn test_walking_into_wall_stops_horizontal_motion() {
        let mut body = Kinematics::new(10.0, 60.0, 20.0, 40.0);
        body.vel_x = 5.0;
        let config = PhysicsConfig::default();
        let mut solids = floor();
        solids.push(Aabb::new(40.0, 0.0, 32.0, 132.0));

        let mut hit = false;
        for _ in 0..10 {
            let result = step(&mut body, &config, false, &solids, 1.0);
            if result.hit_wall {
                hit = true;
                break;
            }
            body.vel_x = 5.0; // keep pushing
        }

        assert!(hit);
        assert_eq!(body.x, 20.0); // flush against the wall
        assert_eq!(body.vel_x, 0.0);
    }

    #[test]
    fn test_rising_body_bumps_ceiling() {
        let mut body = Kinematics::new(10.0, 40.0, 20.0, 40.0);
        body.vel_y = -10.0;
        let config = PhysicsConfig::default();
        let solids = vec![Aabb::new(0.0, 0.0, 1000.0, 32.0)];

        let result = step(&mut body, &config, false, &solids, 1.0);

        assert!(result.hit_ceiling);
        assert_eq!(body.y, 32.0);
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_friction_decays_to_zero_without_overshoot() {
        let mut body = Kinematics::new(10.0, 60.0, 20.0, 40.0);
        body.vel_x = 3.0;
        let config = PhysicsConfig::default();
        let solids = floor();

        for _ in 0..20 {
            step(&mut body, &config, true, &solids, 1.0);
        }

        // Friction must never flip the sign of the velocity
        assert_eq!(body.vel_x, 0.0);
    }

    #[test]
    fn test_velocity_clamped_to_caps() {
        let mut body = Kinematics::new(10.0, 60.0, 20.0, 40.0);
        body.vel_x = 50.0;
        body.vel_y = -50.0;
        let config = PhysicsConfig::default();

        step(&mut body, &config, false, &[], 1.0);

        assert!(body.vel_x <= config.max_vel_x);
        assert!(body.vel_y >= -config.max_vel_y);
    }
}
