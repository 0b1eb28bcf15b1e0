use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::timer::Countdown;
use crate::tuning::{CAMERA_SMOOTHING, CAMERA_ZOOM_SMOOTHING};

/// Camera uniform uploaded to the GPU: the combined view-projection matrix.
///
/// Layout (column-major, matching WGSL `mat4x4<f32>`):
/// ```text
/// col0: [sx,  0,   0,  0]
/// col1: [0,   sy,  0,  0]
/// col2: [0,   0,   1,  0]
/// col3: [tx,  ty,  0,  1]
/// ```
/// where `sx = 2z/w`, `sy = -2z/h`, `tx = -sx*cx`, `ty = -sy*cy`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Plain orthographic projection (no camera transform).
    /// Maps pixel coords [0..w] × [0..h] directly to clip space; used for the
    /// screen-space overlay pass.
    pub fn identity_ortho(width: f32, height: f32) -> Self {
        let sx = 2.0 / width;
        let sy = -2.0 / height;
        Self {
            view_proj: [
                [sx,   0.0,  0.0, 0.0], // col0
                [0.0,  sy,   0.0, 0.0], // col1
                [0.0,  0.0,  1.0, 0.0], // col2
                [-1.0, 1.0,  0.0, 1.0], // col3
            ],
        }
    }

    /// World projection for a view whose top-left corner is `top_left` and
    /// which shows `viewport / zoom` world units.
    ///
    /// Derivation (y-down pixel space → NDC), with `c` the view center:
    /// ```text
    /// x_ndc = sx * world_x + tx    (sx = 2z/w,  tx = -sx*cx)
    /// y_ndc = sy * world_y + ty    (sy = -2z/h, ty = -sy*cy)
    /// ```
    pub fn view(top_left: Vec2, zoom: f32, viewport: Vec2) -> Self {
        let z = zoom.max(0.01);
        let c = top_left + viewport / (2.0 * z);

        let sx = 2.0 * z / viewport.x;
        let sy = -2.0 * z / viewport.y;
        let tx = -sx * c.x;
        let ty = -sy * c.y;

        Self {
            view_proj: [
                [sx,  0.0, 0.0, 0.0], // col0
                [0.0, sy,  0.0, 0.0], // col1
                [0.0, 0.0, 1.0, 0.0], // col2
                [tx,  ty,  0.0, 1.0], // col3
            ],
        }
    }
}

/// 2D follow camera: exponential smoothing toward a target, world clamping,
/// smooth zoom and a read-time screen shake.
///
/// `position` is the top-left of the visible region in world units.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    target: Vec2,
    target_zoom: f32,
    viewport: Vec2,
    world: Vec2,
    smoothing: f32,
    zoom_smoothing: f32,
    shake_timer: Countdown,
    shake_duration: f32,
    shake_intensity: f32,
}

impl Camera {
    pub fn new(viewport: Vec2, world: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
            target: Vec2::ZERO,
            target_zoom: 1.0,
            viewport,
            world,
            smoothing: CAMERA_SMOOTHING,
            zoom_smoothing: CAMERA_ZOOM_SMOOTHING,
            shake_timer: Countdown::idle(),
            shake_duration: 0.0,
            shake_intensity: 0.0,
        }
    }

    /// Move to a new world: back to the origin at zoom 1. A running shake
    /// carries over.
    pub fn reset(&mut self, world: Vec2) {
        self.world = world;
        self.position = Vec2::ZERO;
        self.target = Vec2::ZERO;
        self.zoom = 1.0;
        self.target_zoom = 1.0;
    }

    /// Aim so that `focus` ends up in the middle of the viewport.
    pub fn set_target(&mut self, focus: Vec2) {
        self.target = focus - self.viewport * 0.5;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.target_zoom = zoom;
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn world(&self) -> Vec2 {
        self.world
    }

    /// Restart the shake envelope.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.shake_intensity = intensity.max(0.0);
        self.shake_duration = duration.max(0.0);
        self.shake_timer.start(duration);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_timer.is_active()
    }

    /// Current shake radius: intensity scaled by the remaining-time ratio.
    pub fn shake_strength(&self) -> f32 {
        self.shake_intensity * self.shake_timer.fraction_of(self.shake_duration)
    }

    /// Move a fixed fraction of the remaining distance toward the targets,
    /// then keep the visible region inside the world.
    pub fn update(&mut self, dt: f32) {
        self.position += (self.target - self.position) * self.smoothing;
        self.zoom += (self.target_zoom - self.zoom) * self.zoom_smoothing;

        let visible = self.viewport / self.zoom.max(0.01);
        let max = self.world - visible;
        self.position = self.position.min(max).max(Vec2::ZERO);

        self.shake_timer.tick(dt);
    }

    /// Smoothed position plus a random jitter while shaking. The jitter is
    /// never written back.
    pub fn offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let strength = self.shake_strength();
        if strength <= 0.0 {
            return self.position;
        }
        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.r#gen::<f32>() * strength;
        self.position + Vec2::from_angle(angle) * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn view_centers_the_region() {
        let u = CameraUniform::view(Vec2::ZERO, 1.0, Vec2::new(640.0, 360.0));
        let [sx, _, _, _] = u.view_proj[0];
        let [tx, ty, _, _] = u.view_proj[3];
        // (320, 180) maps to the origin of clip space.
        assert!((sx * 320.0 + tx).abs() < 1e-5);
        assert!((u.view_proj[1][1] * 180.0 + ty).abs() < 1e-5);
    }

    #[test]
    fn offset_without_shake_is_position() {
        let mut rng = StdRng::seed_from_u64(9);
        let cam = Camera::new(Vec2::new(640.0, 360.0), Vec2::new(2000.0, 2000.0));
        assert_eq!(cam.offset(&mut rng), cam.position);
    }
}
