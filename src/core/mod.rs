pub mod lighting;
pub mod phong;
pub mod uniforms;
pub mod camera;

pub use lighting::{
    DirectionalLight, LightingRig, LightingUniform, LightingUpload, PointLight,
    MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS,
};
pub use phong::{
    compute_directional_light, compute_phong_lighting, compute_point_light,
    point_light_attenuation, SurfaceSample, DIRECTIONAL_SPECULAR_BOOST,
};
pub use uniforms::{shade_fragment, ObjectUniforms};
pub use camera::{OrbitCamera, ScreenRays};
