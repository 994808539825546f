use thiserror::Error;

/// Precondition violations detected by the optional validation helpers.
///
/// The shading functions never check these themselves; a light that fails
/// validation produces NaN/Inf when shaded.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LightingError {
    #[error("directional light has a zero-length direction")]
    ZeroDirection,
    #[error("point light radius must be positive, got {0}")]
    NonPositiveRadius(f32),
    #[error("light intensity must be non-negative, got {0}")]
    NegativeIntensity(f32),
    #[error("material shininess must be positive, got {0}")]
    NonPositiveShininess(f32),
    #[error("render target must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("sphere radius must be positive, got {0}")]
    NonPositiveSphereRadius(f32),
}
