//! Yaw-only first-person camera.
//!
//! # Coordinate System
//!
//! Left-handed: X right, Y up, Z forward (into the screen). Positive yaw
//! turns the camera to the right, from +Z towards +X.

use crate::math::{Mat4, Vec3, Vec4};

/// Movement keys held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Camera placed in world space and turned around the Y axis.
///
/// `direction` is derived state: [`Camera::update_direction`] recomputes it
/// from `yaw`, and the engine does so every frame before building the view
/// matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    /// Rotation around the Y axis in radians.
    pub yaw: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    pub const DEFAULT_SPEED: f32 = 5.0;
    /// Yaw rate of [`Camera::apply_movement`] in radians per second.
    pub const TURN_SPEED: f32 = 1.5;

    /// A camera at `position` looking down +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: Vec3::FORWARD,
            yaw: 0.0,
            speed: Self::DEFAULT_SPEED,
        }
    }

    /// Recomputes `direction` by rotating +Z by `yaw` around the Y axis.
    pub fn update_direction(&mut self) -> Vec3 {
        let yaw = Mat4::rotation(0.0, self.yaw, 0.0);
        self.direction = (Vec4::direction(0.0, 0.0, 1.0) * yaw).to_vec3();
        self.direction
    }

    /// World-to-camera matrix looking along `direction` with +Y as up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_towards(self.position, self.direction, Vec3::UP)
    }

    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Moves along the view direction for `dt` seconds at `speed`.
    /// Negative `dt` moves backwards.
    pub fn move_forward(&mut self, dt: f32) {
        self.position = self.position + self.direction * (self.speed * dt);
    }

    /// Moves sideways for `dt` seconds at `speed`; positive is to the right.
    pub fn strafe(&mut self, dt: f32) {
        let right = Vec3::UP.cross(self.direction).normalize();
        self.position = self.position + right * (self.speed * dt);
    }

    /// Applies one frame of held keys. Turning happens first, so the moves
    /// follow the new heading. Opposite keys cancel out.
    pub fn apply_movement(&mut self, movement: Movement, dt: f32) {
        let axis = |positive: bool, negative: bool| positive as i8 - negative as i8;

        let turn = axis(movement.turn_right, movement.turn_left);
        if turn != 0 {
            self.rotate_yaw(f32::from(turn) * Self::TURN_SPEED * dt);
            self.update_direction();
        }

        let forward = axis(movement.forward, movement.backward);
        if forward != 0 {
            self.move_forward(f32::from(forward) * dt);
        }

        let sideways = axis(movement.strafe_right, movement.strafe_left);
        if sideways != 0 {
            self.strafe(f32::from(sideways) * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn zero_yaw_looks_forward() {
        let mut camera = Camera::default();
        assert_relative_eq!(camera.update_direction(), Vec3::FORWARD);
        assert_relative_eq!(camera.view_matrix(), Mat4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let mut camera = Camera::default();
        camera.rotate_yaw(FRAC_PI_2);
        camera.update_direction();
        assert_relative_eq!(camera.direction, Vec3::RIGHT, epsilon = 1e-6);
    }

    #[test]
    fn yaw_wraps_to_one_turn() {
        let mut camera = Camera::default();
        camera.rotate_yaw(-FRAC_PI_2);
        assert_relative_eq!(camera.yaw, 3.0 * FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn movement_uses_speed_and_delta_time() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.speed = 2.0;
        camera.move_forward(0.5);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 1.0));

        camera.strafe(1.0);
        assert_relative_eq!(camera.position, Vec3::new(2.0, 0.0, 1.0));
    }

    #[test]
    fn held_keys_strafe_and_turn() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.speed = 2.0;

        let strafe_right = Movement {
            strafe_right: true,
            ..Movement::default()
        };
        camera.apply_movement(strafe_right, 0.5);
        assert_relative_eq!(camera.position, Vec3::new(1.0, 0.0, 0.0));

        let strafe_left = Movement {
            strafe_left: true,
            ..Movement::default()
        };
        camera.apply_movement(strafe_left, 0.25);
        assert_relative_eq!(camera.position, Vec3::new(0.5, 0.0, 0.0));

        // A quarter turn to the right, then forward is +X.
        let turn_and_walk = Movement {
            turn_right: true,
            forward: true,
            ..Movement::default()
        };
        camera.apply_movement(turn_and_walk, FRAC_PI_2 / Camera::TURN_SPEED);
        assert_relative_eq!(camera.yaw, FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(camera.direction, Vec3::RIGHT, epsilon = 1e-6);
        let walked = 2.0 * FRAC_PI_2 / Camera::TURN_SPEED;
        assert_relative_eq!(camera.position, Vec3::new(0.5 + walked, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let all = Movement {
            forward: true,
            backward: true,
            strafe_left: true,
            strafe_right: true,
            turn_left: true,
            turn_right: true,
        };
        camera.apply_movement(all, 1.0);
        assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, -5.0));
        camera.update_direction();
        let p = Vec4::point(0.0, 0.0, 0.0) * camera.view_matrix();
        assert_relative_eq!(p, Vec4::point(0.0, 0.0, 5.0), epsilon = 1e-6);
    }
}
