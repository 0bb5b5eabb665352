use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::CameraConfig;
use crate::uniforms::FrameUniform;

/// Radians per keyboard step while an orbit key is held
pub const KEY_ROTATION_SPEED: f32 = 0.02;

const MIN_POLAR: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        Self {
            fov: config.fov,
            aspect: aspect_ratio(width, height),
            near: config.near,
            far: config.far,
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Right-handed projection with wgpu's 0..1 depth range
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn to_uniform(&self, width: u32, height: u32, time: f32) -> FrameUniform {
        FrameUniform::new(
            self.view(),
            self.projection(),
            Vec2::new(width.max(1) as f32, height.max(1) as f32),
            time,
        )
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Keys currently held for manual orbiting
#[derive(Default, Clone, Copy, Debug)]
pub struct OrbitInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub rotate_up: bool,
    pub rotate_down: bool,
}

impl OrbitInput {
    const fn to_direction(positive: bool, negative: bool) -> f32 {
        match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    const fn velocity(&self) -> (f32, f32) {
        (
            Self::to_direction(self.rotate_left, self.rotate_right),
            Self::to_direction(self.rotate_up, self.rotate_down),
        )
    }
}

/// Orbit around a target with optional auto-rotation and damping; no zoom
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub auto_rotate: bool,
    /// 1.0 is one revolution per minute
    pub auto_rotate_speed: f32,
    pub damping_factor: f32,
    pub input: OrbitInput,
    theta_delta: f32,
    phi_delta: f32,
}

impl OrbitControls {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            auto_rotate: config.auto_rotate,
            auto_rotate_speed: config.auto_rotate_speed,
            damping_factor: config.damping_factor,
            input: OrbitInput::default(),
            theta_delta: 0.0,
            phi_delta: 0.0,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.theta_delta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.phi_delta -= angle;
    }

    /// Advance the orbit by `delta` seconds and move the camera
    pub fn update(&mut self, camera: &mut PerspectiveCamera, delta: f32) {
        if self.auto_rotate {
            self.rotate_left(TAU / 60.0 * self.auto_rotate_speed * delta);
        }
        let (horizontal, vertical) = self.input.velocity();
        self.rotate_left(horizontal * KEY_ROTATION_SPEED);
        self.rotate_up(vertical * KEY_ROTATION_SPEED);

        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let damping = if self.damping_factor > 0.0 { self.damping_factor } else { 1.0 };
        theta += self.theta_delta * damping;
        phi = (phi + self.phi_delta * damping).clamp(MIN_POLAR, PI - MIN_POLAR);

        self.theta_delta *= 1.0 - damping;
        self.phi_delta *= 1.0 - damping;

        camera.position = camera.target
            + Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos()) * radius;
    }

    pub fn process_keyboard(&mut self, event: &KeyEvent) {
        let is_pressed = event.state.is_pressed();
        if let PhysicalKey::Code(keycode) = event.physical_key {
            match keycode {
                KeyCode::KeyA | KeyCode::ArrowLeft => self.input.rotate_left = is_pressed,
                KeyCode::KeyD | KeyCode::ArrowRight => self.input.rotate_right = is_pressed,
                KeyCode::KeyW | KeyCode::ArrowUp => self.input.rotate_up = is_pressed,
                KeyCode::KeyS | KeyCode::ArrowDown => self.input.rotate_down = is_pressed,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holodeck_camera() -> (PerspectiveCamera, OrbitControls) {
        let config = CameraConfig::default();
        (PerspectiveCamera::from_config(&config, 800, 600), OrbitControls::from_config(&config))
    }

    #[test]
    fn resize_updates_aspect() {
        let (mut camera, _) = holodeck_camera();
        camera.resize(1920, 1080);
        assert!((camera.aspect - 16.0 / 9.0).abs() < 1e-6);
        camera.resize(100, 0);
        assert_eq!(camera.aspect, 100.0);
    }

    #[test]
    fn orbit_keeps_distance_and_height() {
        let (mut camera, mut controls) = holodeck_camera();
        let radius = camera.position.distance(camera.target);
        let height = camera.position.y;
        for _ in 0..600 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        assert!((camera.position.distance(camera.target) - radius).abs() < 1e-3);
        assert!((camera.position.y - height).abs() < 1e-3);
    }

    #[test]
    fn auto_rotation_rate_without_damping() {
        let (mut camera, mut controls) = holodeck_camera();
        controls.damping_factor = 0.0;
        controls.auto_rotate_speed = 1.0;
        camera.position = Vec3::new(0.0, 0.0, 10.0);
        // a quarter of a minute is a quarter turn at speed 1
        for _ in 0..900 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        assert!(camera.position.distance(Vec3::new(-10.0, 0.0, 0.0)) < 0.05);
    }

    #[test]
    fn disabled_auto_rotate_holds_still() {
        let (mut camera, mut controls) = holodeck_camera();
        controls.auto_rotate = false;
        let start = camera.position;
        controls.update(&mut camera, 1.0);
        assert!(camera.position.distance(start) < 1e-5);
    }
}
