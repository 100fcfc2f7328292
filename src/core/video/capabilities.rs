//=========================================================================
// Accelerated Capability Flags
//
// Derives boolean/numeric capability fields from the token set the
// accelerated context reports. Matching is exact and case-sensitive
// against a fixed recognized table; unknown tokens are ignored.
//
// Re-derived on every successful accelerated mode-set, because a mode
// switch can land on a different device or driver profile.
//
//=========================================================================

use crate::platform::VideoBackend;

//=== Recognized Tokens ===================================================

#[derive(Debug, Clone, Copy)]
enum Capability {
    EdgeClamp,
    BgraUpload,
    TextureCompression,
    Anisotropy,
}

/// The fixed token table. Two distinct tokens advertise edge clamping;
/// both map to the same flag.
const RECOGNIZED_TOKENS: &[(&str, Capability)] = &[
    ("GL_EXT_texture_filter_anisotropic", Capability::Anisotropy),
    ("GL_EXT_texture_edge_clamp", Capability::EdgeClamp),
    ("GL_SGIS_texture_edge_clamp", Capability::EdgeClamp),
    ("GL_EXT_bgra", Capability::BgraUpload),
    ("GL_ARB_texture_compression", Capability::TextureCompression),
];

//=== AccelCapabilities ===================================================

/// Capability flags of the active accelerated context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelCapabilities {
    /// Texture coordinates can clamp to the edge texel.
    pub edge_clamp: bool,

    /// BGR-ordered texture uploads are accepted directly.
    pub bgra_upload: bool,

    /// Compressed texture formats are available.
    pub texture_compression: bool,

    /// Maximum anisotropic filtering level; 1.0 means unavailable.
    pub max_anisotropy: f32,
}

impl Default for AccelCapabilities {
    fn default() -> Self {
        Self {
            edge_clamp: false,
            bgra_upload: false,
            texture_compression: false,
            max_anisotropy: 1.0,
        }
    }
}

impl AccelCapabilities {
    /// Scans `tokens` against the recognized table. The anisotropy level
    /// is queried from the backend only when its token is present.
    pub fn from_tokens<V: VideoBackend>(tokens: &[String], backend: &mut V) -> Self {
        let mut caps = Self::default();

        for token in tokens {
            for (name, capability) in RECOGNIZED_TOKENS {
                if token != name {
                    continue;
                }
                match capability {
                    Capability::EdgeClamp => caps.edge_clamp = true,
                    Capability::BgraUpload => caps.bgra_upload = true,
                    Capability::TextureCompression => caps.texture_compression = true,
                    Capability::Anisotropy => {
                        caps.max_anisotropy = backend.query_max_anisotropy();
                    }
                }
            }
        }

        caps
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
