//=========================================================================
// Mode Catalog
//
// Enumerates and deduplicates the display configurations the platform
// can honor. Built lazily, rebuilt only after an explicit invalidation
// (for example after a mode reset).
//
// Ordering is part of the contract: fullscreen entries first (grouped by
// depth), then windowed entries (grouped by depth). The matcher scans in
// catalog order and its tie-break prefers earlier entries.
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::platform::{ModeQuery, VideoBackend};

//=== Limits ==============================================================

/// Widest surface the engine's rasterizer can address.
pub const MAX_WIDTH: u32 = 1600;

/// Tallest surface the engine's rasterizer can address.
pub const MAX_HEIGHT: u32 = 1200;

/// Hard cap on catalog size. Enumeration stops silently once reached.
pub const MAX_CATALOG_MODES: usize = 80;

/// Conventional resolutions, largest first. Substituted when the
/// platform accepts any fullscreen resolution, and used as the windowed
/// candidate list.
pub const FALLBACK_RESOLUTIONS: [(u32, u32); 12] = [
    (1280, 1024),
    (1280, 960),
    (1152, 864),
    (1024, 768),
    (800, 600),
    (640, 480),
    (640, 400),
    (512, 384),
    (480, 360),
    (400, 300),
    (320, 240),
    (320, 200),
];

/// Color depths probed during enumeration. Paletted 8-bit is always a
/// candidate; the accelerated depths join when that path is compiled in.
const CANDIDATE_DEPTHS: &[u8] = if cfg!(feature = "accelerated") {
    &[8, 16, 24, 32]
} else {
    &[8]
};

//=== ModeDescriptor ======================================================

/// One display configuration the platform can honor. Immutable once
/// produced by the catalog; no two catalog entries share all four
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeDescriptor {
    pub width: u32,
    pub height: u32,

    /// Color depth in bits per pixel. 8 selects the paletted path,
    /// anything larger the accelerated path.
    pub depth: u8,

    pub fullscreen: bool,
}

impl ModeDescriptor {
    pub const fn new(width: u32, height: u32, depth: u8, fullscreen: bool) -> Self {
        Self { width, height, depth, fullscreen }
    }

    /// Whether this configuration runs on the accelerated path.
    pub fn is_accelerated(&self) -> bool {
        self.depth > 8
    }
}

impl std::fmt::Display for ModeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} ({}-bit {})",
            self.width,
            self.height,
            self.depth,
            if self.fullscreen { "fullscreen" } else { "windowed" }
        )
    }
}

//=== ModeCatalog =========================================================

/// Ordered, deduplicated sequence of supported display configurations.
pub struct ModeCatalog {
    modes: Vec<ModeDescriptor>,
    built: bool,
}

impl ModeCatalog {
    /// Creates an empty, unbuilt catalog. The first `refresh` populates
    /// it.
    pub fn new() -> Self {
        Self { modes: Vec::new(), built: false }
    }

    /// Creates a pre-populated catalog, bypassing platform enumeration.
    /// Intended for hosts without an enumeration backend and for tests.
    pub fn with_modes(modes: impl IntoIterator<Item = ModeDescriptor>) -> Self {
        let mut catalog = Self::new();
        for mode in modes {
            catalog.push(mode);
        }
        catalog.built = true;
        catalog
    }

    //--- refresh() --------------------------------------------------------
    //
    // Populates the catalog from the platform. A no-op when already
    // built; call `invalidate` first to force re-enumeration.
    //
    // Fullscreen pass: for each candidate depth, ask the platform what
    // it can do. An explicit list is filtered against the engine limits
    // and feeds the running "largest fullscreen" bound; an any-resolution
    // answer substitutes the fallback list (which deliberately does not
    // feed the bound); an unsupported accelerated depth is excluded from
    // the windowed pass as well.
    //
    // Windowed pass: fallback resolutions strictly smaller than the
    // fullscreen bound in both dimensions, so no windowed mode is offered
    // larger than any known fullscreen capability.
    //
    pub fn refresh<V: VideoBackend>(&mut self, backend: &mut V) {
        if self.built {
            return;
        }

        self.modes.clear();

        let mut depths: Vec<(u8, bool)> =
            CANDIDATE_DEPTHS.iter().map(|&depth| (depth, true)).collect();
        let (mut max_w, mut max_h) = (0u32, 0u32);

        for (depth, usable) in depths.iter_mut() {
            match backend.fullscreen_modes(*depth) {
                ModeQuery::Unsupported => {
                    if *depth > 8 {
                        *usable = false;
                    }
                }
                ModeQuery::AnyResolution => {
                    for &(w, h) in FALLBACK_RESOLUTIONS.iter() {
                        self.push(ModeDescriptor::new(w, h, *depth, true));
                    }
                }
                ModeQuery::List(sizes) => {
                    for (w, h) in sizes {
                        if w > MAX_WIDTH || h > MAX_HEIGHT {
                            continue;
                        }
                        self.push(ModeDescriptor::new(w, h, *depth, true));

                        // The bound only moves when a mode beats it in
                        // both dimensions.
                        if w > max_w && h > max_h {
                            max_w = w;
                            max_h = h;
                        }
                    }
                }
            }
        }

        if max_w == 0 && max_h == 0 {
            info!(target: "video", "No fullscreen modes available");
            max_w = MAX_WIDTH;
            max_h = MAX_HEIGHT;
        }

        for &(depth, usable) in &depths {
            if !usable {
                continue;
            }
            for &(w, h) in FALLBACK_RESOLUTIONS.iter() {
                if w < max_w && h < max_h {
                    self.push(ModeDescriptor::new(w, h, depth, false));
                }
            }
        }

        self.built = true;
    }

    //--- push() -----------------------------------------------------------
    //
    // Appends one entry, enforcing the size cap and the uniqueness
    // invariant. Every accepted entry is logged for the mode menu.
    //
    fn push(&mut self, mode: ModeDescriptor) {
        if self.modes.len() >= MAX_CATALOG_MODES {
            return;
        }
        if self.modes.contains(&mode) {
            return;
        }
        info!(target: "video", "Adding mode {}", mode);
        self.modes.push(mode);
    }

    /// Clears the built flag; the next `refresh` re-enumerates.
    pub fn invalidate(&mut self) {
        self.built = false;
    }

    /// Whether the catalog has been populated since the last
    /// invalidation.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The catalog entries, in match-priority order.
    pub fn modes(&self) -> &[ModeDescriptor] {
        &self.modes
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Default for ModeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SurfaceLock;
    use crate::core::video::{FramePlace, PaletteColor};
    use std::collections::HashMap;

    //--- Test Backend -----------------------------------------------------
    //
    // Answers enumeration from a canned table; everything else is inert.
    //
    struct StubVideo {
        answers: HashMap<u8, ModeQuery>,
    }

    impl StubVideo {
        fn new(answers: &[(u8, ModeQuery)]) -> Self {
            Self { answers: answers.iter().cloned().collect() }
        }
    }

    impl VideoBackend for StubVideo {
        fn fullscreen_modes(&mut self, depth: u8) -> ModeQuery {
            self.answers.get(&depth).cloned().unwrap_or(ModeQuery::Unsupported)
        }

        fn create_surface(&mut self, _mode: &ModeDescriptor) -> Result<(), String> {
            Ok(())
        }

        fn lock_surface(&mut self) -> SurfaceLock {
            SurfaceLock { place: FramePlace(0), pitch: 0 }
        }

        fn unlock_surface(&mut self) {}
        fn flip(&mut self, _width_hint: u32) {}
        fn swap_buffers(&mut self) {}

        fn set_colors(&mut self, _start: usize, _colors: &[PaletteColor]) -> bool {
            true
        }
    }

    fn catalog_from(answers: &[(u8, ModeQuery)]) -> ModeCatalog {
        let mut backend = StubVideo::new(answers);
        let mut catalog = ModeCatalog::new();
        catalog.refresh(&mut backend);
        catalog
    }

    //--- Tests ------------------------------------------------------------

    #[test]
    fn fullscreen_entries_precede_windowed_entries() {
        let catalog = catalog_from(&[(
            8,
            ModeQuery::List(vec![(640, 480), (800, 600)]),
        )]);

        let first_windowed = catalog
            .modes()
            .iter()
            .position(|m| !m.fullscreen)
            .expect("windowed entries expected");
        assert!(catalog.modes()[..first_windowed].iter().all(|m| m.fullscreen));
        assert!(catalog.modes()[first_windowed..].iter().all(|m| !m.fullscreen));
    }

    #[test]
    fn any_resolution_substitutes_fallback_list() {
        let catalog = catalog_from(&[(8, ModeQuery::AnyResolution)]);

        let fullscreen: Vec<(u32, u32)> = catalog
            .modes()
            .iter()
            .filter(|m| m.fullscreen)
            .map(|m| (m.width, m.height))
            .collect();
        assert_eq!(fullscreen, FALLBACK_RESOLUTIONS.to_vec());
    }

    #[test]
    fn oversize_modes_are_discarded() {
        let catalog = catalog_from(&[(
            8,
            ModeQuery::List(vec![(3840, 2160), (640, 480)]),
        )]);

        assert!(catalog.modes().iter().all(|m| m.width <= MAX_WIDTH && m.height <= MAX_HEIGHT));
        assert!(catalog.modes().iter().any(|m| m.width == 640 && m.fullscreen));
    }

    #[test]
    fn duplicate_entries_are_collapsed() {
        let catalog = catalog_from(&[(
            8,
            ModeQuery::List(vec![(640, 480), (640, 480), (640, 480)]),
        )]);

        let count = catalog
            .modes()
            .iter()
            .filter(|m| m.width == 640 && m.height == 480 && m.fullscreen)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn windowed_entries_stay_strictly_inside_fullscreen_bound() {
        let catalog = catalog_from(&[(8, ModeQuery::List(vec![(800, 600)]))]);

        for mode in catalog.modes().iter().filter(|m| !m.fullscreen) {
            assert!(mode.width < 800 && mode.height < 600, "offending mode: {}", mode);
        }
    }

    #[test]
    fn no_fullscreen_modes_falls_back_to_engine_limits() {
        // Nothing fullscreen at all: windowed candidates are bounded by
        // the engine maximums instead, and every fallback entry fits.
        let catalog = catalog_from(&[(8, ModeQuery::Unsupported)]);

        let windowed: Vec<(u32, u32)> = catalog
            .modes()
            .iter()
            .filter(|m| !m.fullscreen && m.depth == 8)
            .map(|m| (m.width, m.height))
            .collect();
        assert_eq!(windowed, FALLBACK_RESOLUTIONS.to_vec());
    }

    #[test]
    #[cfg(feature = "accelerated")]
    fn unsupported_accelerated_depth_is_excluded_from_windowed_pass() {
        let catalog = catalog_from(&[
            (8, ModeQuery::List(vec![(800, 600)])),
            (16, ModeQuery::Unsupported),
            (24, ModeQuery::Unsupported),
            (32, ModeQuery::List(vec![(800, 600)])),
        ]);

        assert!(!catalog.modes().iter().any(|m| m.depth == 16));
        assert!(!catalog.modes().iter().any(|m| m.depth == 24));
        assert!(catalog.modes().iter().any(|m| m.depth == 32 && !m.fullscreen));
    }

    #[test]
    fn refresh_is_idempotent_until_invalidated() {
        let mut backend = StubVideo::new(&[(8, ModeQuery::List(vec![(640, 480)]))]);
        let mut catalog = ModeCatalog::new();

        catalog.refresh(&mut backend);
        let len = catalog.len();

        // Second refresh with a different platform answer must not
        // change anything.
        backend.answers.insert(8, ModeQuery::List(vec![(800, 600)]));
        catalog.refresh(&mut backend);
        assert_eq!(catalog.len(), len);

        catalog.invalidate();
        catalog.refresh(&mut backend);
        assert!(catalog.modes().iter().any(|m| m.width == 800 && m.fullscreen));
    }

    #[test]
    fn empty_catalog_is_a_valid_result() {
        // An 8-bit-only build against a platform that reports nothing
        // still yields windowed candidates; but a catalog constructed
        // empty stays usable.
        let catalog = ModeCatalog::with_modes([]);
        assert!(catalog.is_empty());
        assert!(catalog.is_built());
    }

    #[test]
    fn catalog_never_exceeds_its_cap() {
        let sizes: Vec<(u32, u32)> = (0..200).map(|i| (320 + i * 4, 200 + i * 4)).collect();
        let catalog = catalog_from(&[(8, ModeQuery::List(sizes))]);
        assert!(catalog.len() <= MAX_CATALOG_MODES);
    }
}
