//=========================================================================
// Mode Matcher
//
// Resolves a requested configuration against the catalog. Read-only with
// respect to catalog state; callers refresh the catalog first.
//
// The nearest-match rule is deliberately asymmetric: a candidate only
// replaces the current best when neither axis regresses. This is not a
// Euclidean nearest-neighbor search; a mode closer on one axis but
// farther on the other never wins. The rule is observable behavior and
// callers depend on it staying exactly as written.
//
//=========================================================================

use super::mode::{ModeCatalog, ModeDescriptor, MAX_HEIGHT, MAX_WIDTH};

//=== ModeRequest =========================================================

/// A caller's desired display configuration, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeRequest {
    pub width: u32,
    pub height: u32,
    pub depth: u8,
    pub fullscreen: bool,
}

impl ModeRequest {
    pub const fn new(width: u32, height: u32, depth: u8, fullscreen: bool) -> Self {
        Self { width, height, depth, fullscreen }
    }

    /// Clamps the request into the engine's addressable range and rounds
    /// the width down to a multiple of 8 (the rasterizer's row-chunk
    /// granularity).
    pub fn normalized_size(&self) -> (u32, u32) {
        let width = self.width.clamp(320, MAX_WIDTH) & !7;
        let height = self.height.clamp(200, MAX_HEIGHT);
        (width, height)
    }
}

//=== ModeMatch ===========================================================

/// Outcome of resolving a request against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMatch {
    /// A catalog entry, either exact or the nearest under the
    /// no-axis-regression rule.
    Resolved(ModeDescriptor),

    /// Accept the (normalized) request verbatim: the platform can
    /// physically provide any windowed size, so no substitution is
    /// made.
    Verbatim { width: u32, height: u32 },

    /// No catalog entry matches the requested depth/fullscreen class.
    NotFound,
}

//=== resolve() ===========================================================

/// Resolves `request` to a catalog entry, a verbatim pass-through, or
/// nothing.
///
/// Only entries whose depth and fullscreen flag equal the request's are
/// considered; the result therefore never differs from the request in
/// either field. An exact size match short-circuits. Windowed requests
/// that found no exact-size entry fall through to [`ModeMatch::Verbatim`]
/// rather than failing.
pub fn resolve(catalog: &ModeCatalog, request: ModeRequest) -> ModeMatch {
    let (want_w, want_h) = request.normalized_size();

    let mut best: Option<ModeDescriptor> = None;
    let mut best_dx = u32::MAX;
    let mut best_dy = u32::MAX;

    for &mode in catalog.modes() {
        if mode.depth != request.depth || mode.fullscreen != request.fullscreen {
            continue;
        }

        let dx = mode.width.abs_diff(want_w);
        let dy = mode.height.abs_diff(want_h);

        if dx == 0 && dy == 0 {
            best = Some(mode);
            break;
        }

        // Simultaneous improvement only: both axes must not regress.
        if dx <= best_dx && dy <= best_dy {
            best = Some(mode);
            best_dx = dx;
            best_dy = dy;
        }
    }

    if !request.fullscreen {
        let exact = matches!(best, Some(m) if m.width == want_w && m.height == want_h);
        if !exact {
            return ModeMatch::Verbatim { width: want_w, height: want_h };
        }
    }

    match best {
        Some(mode) => ModeMatch::Resolved(mode),
        None => ModeMatch::NotFound,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
