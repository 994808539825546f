use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::core::lighting::LightingRig;
use crate::core::phong::SurfaceSample;
use crate::material::PhongMaterial;
use crate::scene::Transform;

/// Per-object uniform block shared by the vertex and fragment stages
///
/// Matches the shader-side layout (vec3 fields take a full 16 byte slot):
/// matrices @0/64/128/192, is_axis @256, axis_color @272, material_ambient @288,
/// material_diffuse @304, material_specular @320, material_shininess @336,
/// camera_position @352, 368 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub proj: Mat4,
    pub normal_matrix: Mat4,
    /// Non-zero for unlit axis/gizmo geometry
    pub is_axis: i32,
    pub _pad0: [i32; 3],
    pub axis_color: Vec4,
    pub material_ambient: Vec3,
    pub _pad1: f32,
    pub material_diffuse: Vec3,
    pub _pad2: f32,
    pub material_specular: Vec3,
    pub _pad3: f32,
    pub material_shininess: f32,
    pub _pad4: [f32; 3],
    /// World space eye position, used to derive the view direction
    pub camera_position: Vec3,
    pub _pad5: f32,
}

impl ObjectUniforms {
    /// Uniforms for a lit object
    pub fn lit(
        transform: &Transform,
        view: Mat4,
        proj: Mat4,
        material: &PhongMaterial,
        camera_position: Vec3,
    ) -> Self {
        Self {
            model: transform.model_matrix(),
            view,
            proj,
            normal_matrix: transform.normal_matrix(),
            axis_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            material_ambient: material.ambient,
            material_diffuse: material.diffuse,
            material_specular: material.specular,
            material_shininess: material.shininess,
            camera_position,
            ..Self::zeroed()
        }
    }

    /// Uniforms for unlit axis geometry drawn in a flat color
    pub fn axis(view: Mat4, proj: Mat4, color: Vec4) -> Self {
        Self {
            model: Mat4::IDENTITY,
            view,
            proj,
            normal_matrix: Mat4::IDENTITY,
            is_axis: 1,
            axis_color: color,
            ..Self::zeroed()
        }
    }

    pub fn material(&self) -> PhongMaterial {
        PhongMaterial::new(
            self.material_ambient,
            self.material_diffuse,
            self.material_specular,
            self.material_shininess,
        )
    }

    /// Vertex stage: object space position to clip space
    pub fn clip_position(&self, object_position: Vec3) -> Vec4 {
        self.proj * self.view * self.model * object_position.extend(1.0)
    }

    /// Vertex stage: object space position and normal to world space
    pub fn world_vertex(&self, object_position: Vec3, object_normal: Vec3) -> (Vec3, Vec3) {
        let position = self.model.transform_point3(object_position);
        let normal = self.normal_matrix.transform_vector3(object_normal);
        (position, normal)
    }
}

/// Fragment stage: light one interpolated fragment.
///
/// The interpolated normal is renormalized and the view direction points from
/// the fragment to `camera_position`. Axis geometry skips lighting entirely.
pub fn shade_fragment(
    uniforms: &ObjectUniforms,
    world_position: Vec3,
    world_normal: Vec3,
    rig: &LightingRig,
) -> Vec3 {
    if uniforms.is_axis != 0 {
        return uniforms.axis_color.truncate();
    }

    let surface = SurfaceSample::from_eye(world_position, world_normal, uniforms.camera_position);
    rig.shade(&surface, &uniforms.material())
}
