//=========================================================================
// Platform Subsystem
//
// Defines the contracts the presentation core consumes from the host
// platform, plus the concrete adapters shipped with the crate.
//
// Three independent collaborators, mirroring the three things a platform
// actually provides:
// - `VideoBackend`: display enumeration, surface creation, framebuffer
//                    locking, presentation, palette upload
// - `InputBackend`: queued event retrieval, pointer grab, cursor
//                    visibility
// - `TickSource`:   a monotonic tick counter with a fixed frequency
//
// The core never talks to a platform library directly; it talks to these
// traits. Tests substitute hand-rolled mocks, production hosts plug in
// the winit bridge (`winit_bridge`) and the `Instant`-based tick source
// (`clock`), and a renderer supplies whatever `VideoBackend` matches its
// swapchain or software surface.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod clock;
pub mod winit_bridge;

//=== Internal Dependencies ===============================================

use crate::core::input::event::PlatformEvent;
use crate::core::video::{FadeTint, FramePlace, ModeDescriptor, PaletteColor};

//=== ModeQuery ===========================================================

/// A platform's answer when asked which fullscreen resolutions it can
/// honor at a given color depth.
///
/// Mirrors the three-way response shape of display enumeration APIs:
/// the depth may be unusable outright, usable at any resolution (common
/// for windowed-friendly drivers), or restricted to an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeQuery {
    /// The depth cannot be displayed fullscreen at all.
    Unsupported,

    /// Any resolution is acceptable; the caller should substitute its
    /// own list of conventional sizes.
    AnyResolution,

    /// Only the listed `(width, height)` pairs are available.
    List(Vec<(u32, u32)>),
}

//=== SurfaceLock =========================================================

/// Result of locking a paletted software surface: where the pixels live
/// and how many bytes apart consecutive rows start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceLock {
    /// Opaque handle to the pixel storage of the locked surface.
    pub place: FramePlace,

    /// Row stride in bytes. May exceed `width * bytes_per_pixel`.
    pub pitch: usize,
}

//=== VideoBackend ========================================================

/// Display and surface operations consumed by the display session.
///
/// Methods with default bodies are optional refinements; a minimal
/// paletted backend only has to answer enumeration, surface creation,
/// lock/unlock, and presentation.
pub trait VideoBackend {
    /// Reports the fullscreen capability of the platform at `depth`.
    fn fullscreen_modes(&mut self, depth: u8) -> ModeQuery;

    /// Creates (or reconfigures) the display surface for `mode`.
    ///
    /// On error the returned string is surfaced to the caller inside
    /// [`VideoError::SurfaceCreation`](crate::core::video::VideoError);
    /// the session is unusable until a later call succeeds.
    fn create_surface(&mut self, mode: &ModeDescriptor) -> Result<(), String>;

    /// Acquires the pixel lock on the active paletted surface.
    ///
    /// Called only on the outermost lock acquisition; the session handles
    /// all reentrancy counting.
    fn lock_surface(&mut self) -> SurfaceLock;

    /// Releases the pixel lock. Called only on the final unlock.
    fn unlock_surface(&mut self);

    /// Presents the paletted back buffer. `width_hint` is the widest
    /// column the caller drew this frame; backends that blit partial
    /// rows may use it, everyone else presents the whole surface.
    fn flip(&mut self, width_hint: u32);

    /// Swaps the accelerated double buffer.
    fn swap_buffers(&mut self);

    /// Uploads a contiguous run of color-table entries starting at
    /// `start`. Returns whether the platform accepted the upload.
    fn set_colors(&mut self, start: usize, colors: &[PaletteColor]) -> bool;

    /// Capability/extension tokens reported by the accelerated context.
    /// Queried once per successful accelerated mode-set.
    fn capability_tokens(&mut self) -> Vec<String> {
        Vec::new()
    }

    /// Maximum anisotropic filtering level. Only consulted when the
    /// token set advertises anisotropic filtering.
    fn query_max_anisotropy(&mut self) -> f32 {
        1.0
    }

    /// Drops any cached accelerated rendering state. Invoked before and
    /// after an accelerated mode switch.
    fn reset_accel_context(&mut self) {}

    /// Draws a full-screen translucent quad in an orthographic pass.
    /// Used for palette-fade and brightness-clamp overlays on
    /// accelerated targets.
    fn draw_tint_quad(&mut self, _tint: FadeTint) {}

    /// Updates the window caption.
    fn set_title(&mut self, _title: &str) {}
}

//=== InputBackend ========================================================

/// Queued-event retrieval and pointer control consumed by the input
/// translator.
pub trait InputBackend {
    /// Pops the next queued platform event, or `None` when the queue is
    /// empty. A drain is bounded by the number of currently queued
    /// events; this must never block.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Requests (or releases) exclusive pointer capture. Returns the
    /// state the platform actually ended up in.
    fn set_pointer_grab(&mut self, grab: bool) -> bool;

    /// Shows or hides the platform cursor.
    fn set_cursor_visible(&mut self, visible: bool);
}

//=== TickSource ==========================================================

/// A monotonic platform tick counter.
///
/// `ticks` values are converted into simulation ticks by the clock as
/// `ticks * sim_rate / frequency`; the source never needs to know the
/// simulation rate.
pub trait TickSource {
    /// Current tick count. Expected to be monotonic; a value that moves
    /// backward is tolerated by the clock (it simply stalls).
    fn ticks(&self) -> u64;

    /// Number of ticks per second this source counts in. Must be
    /// nonzero and constant for the lifetime of the source.
    fn frequency(&self) -> u64;
}
