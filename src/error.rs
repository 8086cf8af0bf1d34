//! Crate error type
//!
//! Only construction-time failures are errors. Missing textures or audio
//! degrade to plain rendering/silence and are logged instead.

/// Errors that can prevent a game session from existing.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The page is missing something the game needs (window, canvas).
    #[error("page setup failed: {0}")]
    Host(String),

    /// No GPU adapter compatible with the drawing surface.
    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(String),

    /// The drawing surface could not be created from the canvas.
    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// The adapter refused to hand out a device.
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The scene shader failed to parse or validate.
    #[error("shader compilation failed: {0}")]
    Shader(String),

    /// Texture bytes do not match the declared dimensions.
    #[error("texture '{name}' expects {expected} bytes of RGBA data, got {actual}")]
    TextureSize {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Tuning overrides could not be parsed.
    #[error("invalid tuning overrides: {0}")]
    Tuning(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_texture_size_message() {
        let err = GameError::TextureSize {
            name: "ground",
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "texture 'ground' expects 16 bytes of RGBA data, got 12"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_tuning_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = GameError::from(json_err);
        assert!(matches!(err, GameError::Tuning(_)));
        assert!(err.to_string().starts_with("invalid tuning overrides: "));
        assert!(err.source().is_some());
    }
}
