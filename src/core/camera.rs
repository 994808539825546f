use glam::{Mat4, Vec3, Vec4};

/// Camera orbiting a target point on a sphere
pub struct OrbitCamera {
    /// Point the camera looks at
    target: Vec3,
    /// Rotation around the world Y axis in radians
    yaw: f32,
    /// Elevation above the XZ plane in radians
    pitch: f32,
    /// Distance from the target
    distance: f32,
    /// Vertical field of view in radians
    fov: f32,
    near_plane: f32,
    far_plane: f32,
}

impl OrbitCamera {
    pub const MIN_DISTANCE: f32 = 0.5;
    pub const MAX_DISTANCE: f32 = 100.0;
    /// Pitch stays this far away from straight up/down so the view basis is well defined
    pub const PITCH_MARGIN: f32 = 0.1;

    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE),
            fov: 60.0_f32.to_radians(),
            near_plane: 0.1,
            far_plane: 100.0,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Set yaw and pitch, clamping pitch
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = Self::clamp_pitch(pitch);
    }

    /// Orbit by the given deltas in radians
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.set_angles(self.yaw + yaw_delta, self.pitch + pitch_delta);
    }

    /// Move towards (negative) or away from (positive) the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);
    }

    fn clamp_pitch(pitch: f32) -> f32 {
        let limit = std::f32::consts::FRAC_PI_2 - Self::PITCH_MARGIN;
        pitch.clamp(-limit, limit)
    }

    /// Eye position in world space
    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + offset * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect_ratio, self.near_plane, self.far_plane)
    }

    /// Unproject a pixel (origin top-left) to a world space unit ray direction
    pub fn screen_ray(&self, x: f32, y: f32, viewport_width: f32, viewport_height: f32) -> Vec3 {
        self.screen_rays(viewport_width, viewport_height).ray(x, y)
    }

    /// Ray generator for a whole viewport, with the inverse matrices computed once
    pub fn screen_rays(&self, viewport_width: f32, viewport_height: f32) -> ScreenRays {
        ScreenRays {
            inv_proj: self
                .projection_matrix(viewport_width / viewport_height)
                .inverse(),
            inv_view: self.view_matrix().inverse(),
            viewport_width,
            viewport_height,
        }
    }
}

/// Primary ray directions for one viewport
#[derive(Debug, Clone, Copy)]
pub struct ScreenRays {
    inv_proj: Mat4,
    inv_view: Mat4,
    viewport_width: f32,
    viewport_height: f32,
}

impl ScreenRays {
    pub fn ray(&self, x: f32, y: f32) -> Vec3 {
        let ndc_x = (2.0 * x) / self.viewport_width - 1.0;
        let ndc_y = 1.0 - (2.0 * y) / self.viewport_height;

        let ray_view = self.inv_proj * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let ray_view = Vec4::new(ray_view.x, ray_view.y, -1.0, 0.0);

        (self.inv_view * ray_view).truncate().normalize()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 5.0)
    }
}

impl From<crate::config::CameraConfigData> for OrbitCamera {
    fn from(data: crate::config::CameraConfigData) -> Self {
        let mut camera = Self::new(data.target, data.distance);
        camera.set_angles(data.yaw.to_radians(), data.pitch.to_radians());
        camera.set_fov(data.fov.to_radians());
        camera
    }
}

impl From<&OrbitCamera> for crate::config::CameraConfigData {
    fn from(camera: &OrbitCamera) -> Self {
        Self {
            target: camera.target,
            yaw: camera.yaw.to_degrees(),
            pitch: camera.pitch.to_degrees(),
            distance: camera.distance,
            fov: camera.fov.to_degrees(),
        }
    }
}
