//=========================================================================
// Display Session
//
// Owns the transition into a display configuration and mediates all
// framebuffer access around it: draw-lock reentrancy, the scanline
// offset table, double-buffer presentation, palette application, and
// accelerated capability flags.
//
// Protocol tolerance is deliberate. Unbalanced lock/unlock pairs, or a
// present while a lock is still outstanding, are caller mistakes that
// the session repairs by force-draining back to a consistent state and
// logging a diagnostic. Only mode-set failures cross the boundary as
// errors. The lock-depth counter is not synchronized; a session belongs
// to one thread.
//
//=========================================================================

//=== External Crates =====================================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::capabilities::AccelCapabilities;
use super::matcher::{resolve, ModeMatch, ModeRequest};
use super::mode::{ModeCatalog, ModeDescriptor};
use super::{FadeTint, FramePlace, PaletteColor, VideoError};
use crate::platform::VideoBackend;

//=== Callback Types ======================================================

/// Invoked after every successful mode-set with `true` when the new mode
/// runs on the accelerated path. Lets the rendering back end swap its
/// paletted/accelerated pipelines without re-querying the session.
pub type ModeClassCallback = Box<dyn FnMut(bool)>;

//=== DisplaySession ======================================================

/// The active display surface and all state required to draw into it.
///
/// Created once the host knows which backend it is driving; becomes
/// usable after the first successful [`set_mode`](Self::set_mode).
pub struct DisplaySession<V: VideoBackend> {
    backend: V,
    catalog: ModeCatalog,

    active: Option<ModeDescriptor>,

    //--- Lock State -------------------------------------------------------
    lock_depth: u32,
    frame: Option<FramePlace>,
    stride: usize,
    scanline_offsets: Vec<usize>,

    //--- Mode Bookkeeping -------------------------------------------------
    offscreen: bool,
    mode_dirty: bool,
    mode_reset_pending: bool,
    pages: u8,

    //--- Accelerated Path -------------------------------------------------
    capabilities: Option<AccelCapabilities>,
    fade_tint: FadeTint,
    fade_clamp: FadeTint,

    //--- Paletted Path ----------------------------------------------------
    palette: [PaletteColor; 256],

    mode_class_callback: Option<ModeClassCallback>,
}

impl<V: VideoBackend> DisplaySession<V> {
    /// Creates a session around `backend` with no active mode.
    pub fn new(backend: V) -> Self {
        Self {
            backend,
            catalog: ModeCatalog::new(),
            active: None,
            lock_depth: 0,
            frame: None,
            stride: 0,
            scanline_offsets: Vec::new(),
            offscreen: false,
            mode_dirty: true,
            mode_reset_pending: false,
            pages: 0,
            capabilities: None,
            fade_tint: FadeTint::CLEAR,
            fade_clamp: FadeTint::CLEAR,
            palette: [PaletteColor::BLACK; 256],
            mode_class_callback: None,
        }
    }

    //--- set_mode() -------------------------------------------------------

    /// Switches the session to the configuration resolved from
    /// `request`.
    ///
    /// Returns the descriptor actually applied (the matcher may have
    /// substituted the nearest catalog entry). A request equal to the
    /// active configuration with no mode reset pending is a no-op.
    ///
    /// Pointer-grab handling is the caller's job: release any exclusive
    /// grab before calling and re-apply it only on success. The
    /// [`Presentation`](crate::Presentation) facade sequences this
    /// automatically.
    ///
    /// # Errors
    ///
    /// [`VideoError::ModeUnavailable`] when a fullscreen request has no
    /// catalog candidate at its depth; [`VideoError::SurfaceCreation`]
    /// when the platform rejects the configuration. After a surface
    /// failure the session is unusable until a later call succeeds.
    pub fn set_mode(&mut self, request: ModeRequest) -> Result<ModeDescriptor, VideoError> {
        self.catalog.refresh(&mut self.backend);

        let target = match resolve(&self.catalog, request) {
            ModeMatch::Resolved(mode) => mode,
            ModeMatch::Verbatim { width, height } => {
                ModeDescriptor::new(width, height, request.depth, request.fullscreen)
            }
            ModeMatch::NotFound => {
                return Err(VideoError::ModeUnavailable {
                    width: request.width,
                    height: request.height,
                    depth: request.depth,
                })
            }
        };

        if self.active == Some(target) && !self.mode_reset_pending {
            return Ok(target);
        }

        // A session transition must never leave a stale draw lock.
        while self.lock_depth > 0 {
            self.unlock();
        }

        let was_accelerated = self.active.is_some_and(|m| m.is_accelerated());
        if was_accelerated {
            self.backend.reset_accel_context();
        }

        info!(target: "video", "Setting video mode {}", target);
        self.backend
            .create_surface(&target)
            .map_err(VideoError::SurfaceCreation)?;

        self.active = Some(target);
        self.pages = if target.is_accelerated() { 2 } else { 1 };
        self.frame = None;
        self.lock_depth = 0;
        self.stride = 0;
        self.mode_dirty = true;
        self.mode_reset_pending = false;

        if target.is_accelerated() {
            self.backend.reset_accel_context();
            let tokens = self.backend.capability_tokens();
            let caps = AccelCapabilities::from_tokens(&tokens, &mut self.backend);
            debug!(target: "video", "Accelerated capabilities: {:?}", caps);
            self.capabilities = Some(caps);
        } else {
            self.capabilities = None;
            let palette = self.palette;
            self.backend.set_colors(0, &palette);
        }

        if let Some(callback) = &mut self.mode_class_callback {
            callback(target.is_accelerated());
        }

        Ok(target)
    }

    /// Marks the active mode stale and invalidates the catalog, so the
    /// next `set_mode` re-enumerates and re-applies even an identical
    /// configuration.
    pub fn invalidate_mode(&mut self) {
        self.mode_reset_pending = true;
        self.catalog.invalidate();
    }

    //--- lock() / unlock() ------------------------------------------------

    /// Acquires the draw lock on the active surface.
    ///
    /// Accelerated modes have no pixel lock: the call just clears the
    /// frame bookkeeping (and does nothing at all during offscreen
    /// rendering). Paletted modes count reentrant acquisitions; only the
    /// 0→1 transition touches the platform, retrieves the buffer handle,
    /// and, when the stride changed or the mode is dirty, rebuilds the
    /// scanline offset table.
    pub fn lock(&mut self) {
        let Some(mode) = self.active else { return };

        if mode.is_accelerated() {
            if self.offscreen {
                return;
            }
            self.frame = None;
            self.stride = 0;
            self.mode_dirty = false;
            return;
        }

        self.lock_depth += 1;
        if self.lock_depth > 1 {
            return;
        }
        if self.offscreen {
            return;
        }

        let lock = self.backend.lock_surface();
        self.frame = Some(lock.place);

        if lock.pitch != self.stride || self.mode_dirty {
            self.stride = lock.pitch;
            self.rebuild_scanline_offsets(mode.height as usize, lock.pitch);
            self.mode_dirty = false;
        }
    }

    /// Releases one level of the draw lock.
    ///
    /// Mirrors [`lock`](Self::lock): accelerated modes just clear the
    /// buffer handle (unless offscreen); paletted modes decrement the
    /// reentrancy count and release the platform lock only on the 1→0
    /// transition. Calling with no lock held is a no-op; the count
    /// never goes negative.
    pub fn unlock(&mut self) {
        let Some(mode) = self.active else { return };

        if mode.is_accelerated() {
            if !self.offscreen {
                self.frame = None;
            }
            return;
        }

        if self.lock_depth == 0 {
            return;
        }
        if self.lock_depth > 1 {
            self.lock_depth -= 1;
            return;
        }

        self.lock_depth = 0;
        if self.offscreen {
            return;
        }
        self.frame = None;
        self.backend.unlock_surface();
    }

    //--- present() --------------------------------------------------------

    /// Puts the finished frame on screen.
    ///
    /// Accelerated modes draw the combined fade/clamp tint (stronger of
    /// the two, per channel) as a translucent quad when one is active,
    /// then swap buffers. Paletted modes flip the back buffer; an
    /// outstanding lock at this point is a caller slip that is logged
    /// and force-drained first.
    ///
    /// `width_hint` is forwarded to backends that blit partial rows.
    pub fn present(&mut self, width_hint: u32) {
        let Some(mode) = self.active else { return };

        if mode.is_accelerated() {
            if self.fade_tint.is_active() || self.fade_clamp.is_active() {
                let tint = self.fade_tint.stronger_of(self.fade_clamp);
                self.backend.draw_tint_quad(tint);
            }
            self.backend.swap_buffers();
            return;
        }

        if self.offscreen {
            return;
        }

        if self.lock_depth > 0 {
            warn!(
                target: "video",
                "Frame still locked {} deep at present; force-draining",
                self.lock_depth
            );
            while self.lock_depth > 0 {
                self.unlock();
            }
        }

        self.backend.flip(width_hint);
    }

    //--- set_palette() ----------------------------------------------------

    /// Applies a contiguous run of color entries starting at `start`.
    ///
    /// Meaningless (and trivially successful) on the accelerated path.
    /// On the paletted path the run is cached, so a later mode-set can
    /// re-apply it, and uploaded to the surface's color table. Returns
    /// whether the platform accepted the upload.
    pub fn set_palette(&mut self, start: usize, colors: &[PaletteColor]) -> bool {
        let Some(mode) = self.active else { return false };
        if mode.is_accelerated() {
            return true;
        }
        if start >= self.palette.len() {
            return false;
        }

        let count = colors.len().min(self.palette.len() - start);
        self.palette[start..start + count].copy_from_slice(&colors[..count]);
        self.backend.set_colors(start, &colors[..count])
    }

    //--- Fade / Clamp -----------------------------------------------------

    /// Sets the palette-fade overlay color. Alpha zero disables it.
    pub fn set_fade_tint(&mut self, tint: FadeTint) {
        self.fade_tint = tint;
    }

    /// Sets the brightness-clamp overlay color. Alpha zero disables it.
    pub fn set_fade_clamp(&mut self, clamp: FadeTint) {
        self.fade_clamp = clamp;
    }

    //--- Offscreen Rendering ----------------------------------------------

    /// Toggles offscreen rendering. While active, lock/unlock/present
    /// leave the shared surface state untouched.
    pub fn set_offscreen_rendering(&mut self, active: bool) {
        self.offscreen = active;
    }

    //--- Mode-Class Notification ------------------------------------------

    /// Registers the callback fired after each successful mode-set with
    /// the new mode's class. Returns the previously registered callback.
    pub fn set_mode_class_callback(
        &mut self,
        callback: Option<ModeClassCallback>,
    ) -> Option<ModeClassCallback> {
        std::mem::replace(&mut self.mode_class_callback, callback)
    }

    //--- Queries ----------------------------------------------------------

    /// The active configuration, if a mode-set has succeeded.
    pub fn active_mode(&self) -> Option<ModeDescriptor> {
        self.active
    }

    /// Current draw-lock reentrancy depth (always 0 for accelerated
    /// modes).
    pub fn lock_depth(&self) -> u32 {
        self.lock_depth
    }

    /// Buffer handle of the locked paletted surface. `Some` exactly
    /// while a lock is outstanding on a non-offscreen paletted surface.
    pub fn frame_place(&self) -> Option<FramePlace> {
        self.frame
    }

    /// Row stride of the locked surface, in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the start of each row, derived exclusively from
    /// the stride. Valid while a lock is held.
    pub fn scanline_offsets(&self) -> &[usize] {
        &self.scanline_offsets
    }

    /// Page count of the active configuration: 1 (single-buffered
    /// paletted) or 2 (double-buffered accelerated).
    pub fn pages(&self) -> u8 {
        self.pages
    }

    /// Capability flags of the accelerated context; `None` on the
    /// paletted path.
    pub fn capabilities(&self) -> Option<&AccelCapabilities> {
        self.capabilities.as_ref()
    }

    /// The supported-mode catalog, enumerating lazily on first use.
    pub fn modes(&mut self) -> &[ModeDescriptor] {
        self.catalog.refresh(&mut self.backend);
        self.catalog.modes()
    }

    /// Direct backend access for hosts layering extra platform calls.
    pub fn backend_mut(&mut self) -> &mut V {
        &mut self.backend
    }

    //--- Internal Helpers -------------------------------------------------

    fn rebuild_scanline_offsets(&mut self, height: usize, stride: usize) {
        self.scanline_offsets.clear();
        self.scanline_offsets.reserve(height + 1);
        let mut offset = 0;
        for _ in 0..=height {
            self.scanline_offsets.push(offset);
            offset += stride;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ModeQuery, SurfaceLock};
    use std::cell::RefCell;
    use std::rc::Rc;

    //--- Test Backend -----------------------------------------------------
    //
    // Records every platform call so tests can assert on exact call
    // counts (one platform lock per nest, one flip per present, ...).
    //
    #[derive(Default)]
    struct Calls {
        locks: u32,
        unlocks: u32,
        flips: u32,
        swaps: u32,
        tints: Vec<FadeTint>,
        surfaces: Vec<ModeDescriptor>,
        palette_uploads: Vec<(usize, Vec<PaletteColor>)>,
        context_resets: u32,
    }

    struct MockVideo {
        calls: Rc<RefCell<Calls>>,
        fullscreen: Vec<(u32, u32)>,
        pitch: usize,
        tokens: Vec<String>,
        fail_surface: bool,
    }

    impl MockVideo {
        fn new() -> (Self, Rc<RefCell<Calls>>) {
            let calls = Rc::new(RefCell::new(Calls::default()));
            let backend = Self {
                calls: Rc::clone(&calls),
                fullscreen: vec![(640, 480), (800, 600)],
                pitch: 768,
                tokens: Vec::new(),
                fail_surface: false,
            };
            (backend, calls)
        }
    }

    impl VideoBackend for MockVideo {
        fn fullscreen_modes(&mut self, depth: u8) -> ModeQuery {
            if depth == 8 || depth == 32 {
                ModeQuery::List(self.fullscreen.clone())
            } else {
                ModeQuery::Unsupported
            }
        }

        fn create_surface(&mut self, mode: &ModeDescriptor) -> Result<(), String> {
            if self.fail_surface {
                return Err("display refused the configuration".to_string());
            }
            self.calls.borrow_mut().surfaces.push(*mode);
            Ok(())
        }

        fn lock_surface(&mut self) -> SurfaceLock {
            self.calls.borrow_mut().locks += 1;
            SurfaceLock { place: FramePlace(0x8_0000), pitch: self.pitch }
        }

        fn unlock_surface(&mut self) {
            self.calls.borrow_mut().unlocks += 1;
        }

        fn flip(&mut self, _width_hint: u32) {
            self.calls.borrow_mut().flips += 1;
        }

        fn swap_buffers(&mut self) {
            self.calls.borrow_mut().swaps += 1;
        }

        fn set_colors(&mut self, start: usize, colors: &[PaletteColor]) -> bool {
            self.calls
                .borrow_mut()
                .palette_uploads
                .push((start, colors.to_vec()));
            true
        }

        fn capability_tokens(&mut self) -> Vec<String> {
            self.tokens.clone()
        }

        fn reset_accel_context(&mut self) {
            self.calls.borrow_mut().context_resets += 1;
        }

        fn draw_tint_quad(&mut self, tint: FadeTint) {
            self.calls.borrow_mut().tints.push(tint);
        }
    }

    fn paletted_session() -> (DisplaySession<MockVideo>, Rc<RefCell<Calls>>) {
        let (backend, calls) = MockVideo::new();
        let mut session = DisplaySession::new(backend);
        session
            .set_mode(ModeRequest::new(640, 480, 8, true))
            .expect("mode set");
        (session, calls)
    }

    fn accelerated_session() -> (DisplaySession<MockVideo>, Rc<RefCell<Calls>>) {
        let (backend, calls) = MockVideo::new();
        let mut session = DisplaySession::new(backend);
        session
            .set_mode(ModeRequest::new(640, 480, 32, true))
            .expect("mode set");
        (session, calls)
    }

    //=====================================================================
    // Mode-Set Tests
    //=====================================================================

    #[test]
    fn set_mode_resolves_through_the_catalog() {
        let (backend, calls) = MockVideo::new();
        let mut session = DisplaySession::new(backend);

        let applied = session
            .set_mode(ModeRequest::new(700, 500, 8, true))
            .expect("mode set");

        assert_eq!(applied, ModeDescriptor::new(640, 480, 8, true));
        assert_eq!(calls.borrow().surfaces, vec![applied]);
    }

    #[test]
    fn repeated_identical_request_is_a_no_op() {
        let (mut session, calls) = paletted_session();

        session
            .set_mode(ModeRequest::new(640, 480, 8, true))
            .expect("mode set");

        assert_eq!(calls.borrow().surfaces.len(), 1);
    }

    #[test]
    fn pending_mode_reset_defeats_the_no_op_path() {
        let (mut session, calls) = paletted_session();

        session.invalidate_mode();
        session
            .set_mode(ModeRequest::new(640, 480, 8, true))
            .expect("mode set");

        assert_eq!(calls.borrow().surfaces.len(), 2);
    }

    #[test]
    fn fullscreen_request_with_no_candidates_reports_mode_unavailable() {
        let (backend, _calls) = MockVideo::new();
        let mut session = DisplaySession::new(backend);

        let result = session.set_mode(ModeRequest::new(640, 480, 16, true));

        assert!(matches!(result, Err(VideoError::ModeUnavailable { depth: 16, .. })));
    }

    #[test]
    fn surface_rejection_reports_creation_failure() {
        let (mut backend, _calls) = MockVideo::new();
        backend.fail_surface = true;
        let mut session = DisplaySession::new(backend);

        let result = session.set_mode(ModeRequest::new(640, 480, 8, true));

        assert!(matches!(result, Err(VideoError::SurfaceCreation(_))));
        assert_eq!(session.active_mode(), None);
    }

    #[test]
    fn mode_switch_drains_outstanding_locks() {
        let (mut session, calls) = paletted_session();

        session.lock();
        session.lock();
        session
            .set_mode(ModeRequest::new(800, 600, 8, true))
            .expect("mode set");

        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().unlocks, 1);
        assert_eq!(session.frame_place(), None);
    }

    #[test]
    fn paletted_mode_set_reapplies_the_cached_palette() {
        let (mut session, calls) = paletted_session();

        let gray = vec![PaletteColor::new(128, 128, 128); 16];
        session.set_palette(32, &gray);
        calls.borrow_mut().palette_uploads.clear();

        session
            .set_mode(ModeRequest::new(800, 600, 8, true))
            .expect("mode set");

        let uploads = &calls.borrow().palette_uploads;
        assert_eq!(uploads.len(), 1);
        let (start, colors) = &uploads[0];
        assert_eq!(*start, 0);
        assert_eq!(colors.len(), 256);
        assert_eq!(colors[32], PaletteColor::new(128, 128, 128));
        assert_eq!(colors[48], PaletteColor::BLACK);
    }

    #[test]
    fn accelerated_mode_set_derives_capabilities_and_resets_context() {
        let (mut backend, calls) = MockVideo::new();
        backend.tokens = vec!["GL_EXT_bgra".to_string(), "GL_EXT_texture_edge_clamp".to_string()];
        let mut session = DisplaySession::new(backend);

        session
            .set_mode(ModeRequest::new(640, 480, 32, true))
            .expect("mode set");

        let caps = session.capabilities().expect("capabilities");
        assert!(caps.bgra_upload);
        assert!(caps.edge_clamp);
        assert_eq!(session.pages(), 2);
        // Fresh context after the switch; no stale context existed
        // before it.
        assert_eq!(calls.borrow().context_resets, 1);
    }

    #[test]
    fn switching_away_from_accelerated_resets_the_old_context() {
        let (mut session, calls) = accelerated_session();

        session
            .set_mode(ModeRequest::new(640, 480, 8, true))
            .expect("mode set");

        // One reset after entering the accelerated mode, one before
        // leaving it.
        assert_eq!(calls.borrow().context_resets, 2);
        assert_eq!(session.capabilities(), None);
        assert_eq!(session.pages(), 1);
    }

    #[test]
    fn mode_class_callback_fires_on_every_successful_set() {
        let (backend, _calls) = MockVideo::new();
        let mut session = DisplaySession::new(backend);

        let classes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&classes);
        session.set_mode_class_callback(Some(Box::new(move |accelerated| {
            sink.borrow_mut().push(accelerated);
        })));

        session.set_mode(ModeRequest::new(640, 480, 8, true)).expect("mode set");
        session.set_mode(ModeRequest::new(640, 480, 32, true)).expect("mode set");

        assert_eq!(*classes.borrow(), vec![false, true]);
    }

    //=====================================================================
    // Lock / Unlock Tests
    //=====================================================================

    #[test]
    fn nested_locks_touch_the_platform_once() {
        let (mut session, calls) = paletted_session();

        for _ in 0..3 {
            session.lock();
        }
        assert_eq!(session.lock_depth(), 3);
        assert_eq!(calls.borrow().locks, 1);

        for _ in 0..3 {
            session.unlock();
        }
        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().unlocks, 1);
    }

    #[test]
    fn buffer_pointer_stays_valid_until_the_final_unlock() {
        let (mut session, _calls) = paletted_session();

        session.lock();
        session.lock();
        session.lock();
        session.unlock();

        assert_eq!(session.lock_depth(), 2);
        assert!(session.frame_place().is_some());

        session.unlock();
        session.unlock();
        assert_eq!(session.frame_place(), None);
    }

    #[test]
    fn excess_unlocks_never_drive_the_depth_negative() {
        let (mut session, calls) = paletted_session();

        session.lock();
        session.unlock();
        session.unlock();
        session.unlock();

        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().unlocks, 1);
    }

    #[test]
    fn scanline_offsets_are_a_running_stride_sum() {
        let (mut session, _calls) = paletted_session();

        session.lock();

        let offsets = session.scanline_offsets();
        assert_eq!(offsets.len(), 481);
        assert_eq!(offsets[0], 0);
        assert_eq!(offsets[1], 768);
        assert_eq!(offsets[480], 480 * 768);
        session.unlock();
    }

    #[test]
    fn stride_change_triggers_offset_rebuild() {
        let (mut session, _calls) = paletted_session();

        session.lock();
        session.unlock();
        assert_eq!(session.scanline_offsets()[1], 768);

        session.backend_mut().pitch = 1024;
        session.lock();
        assert_eq!(session.stride(), 1024);
        assert_eq!(session.scanline_offsets()[1], 1024);
        session.unlock();
    }

    #[test]
    fn offscreen_lock_skips_the_platform_but_still_counts() {
        let (mut session, calls) = paletted_session();

        session.set_offscreen_rendering(true);
        session.lock();

        assert_eq!(session.lock_depth(), 1);
        assert_eq!(calls.borrow().locks, 0);
        assert_eq!(session.frame_place(), None);

        session.unlock();
        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().unlocks, 0);
    }

    #[test]
    fn accelerated_lock_clears_bookkeeping_without_counting() {
        let (mut session, calls) = accelerated_session();

        session.lock();
        session.lock();

        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().locks, 0);
        assert_eq!(session.frame_place(), None);
    }

    //=====================================================================
    // Present Tests
    //=====================================================================

    #[test]
    fn paletted_present_flips_the_back_buffer() {
        let (mut session, calls) = paletted_session();

        session.present(640);

        assert_eq!(calls.borrow().flips, 1);
        assert_eq!(calls.borrow().swaps, 0);
    }

    #[test]
    fn present_with_outstanding_locks_force_drains_first() {
        let (mut session, calls) = paletted_session();

        session.lock();
        session.lock();
        session.present(640);

        assert_eq!(session.lock_depth(), 0);
        assert_eq!(calls.borrow().unlocks, 1);
        assert_eq!(calls.borrow().flips, 1);
    }

    #[test]
    fn offscreen_present_is_a_no_op() {
        let (mut session, calls) = paletted_session();

        session.set_offscreen_rendering(true);
        session.present(640);

        assert_eq!(calls.borrow().flips, 0);
    }

    #[test]
    fn accelerated_present_swaps_without_tint_by_default() {
        let (mut session, calls) = accelerated_session();

        session.present(640);

        assert_eq!(calls.borrow().swaps, 1);
        assert!(calls.borrow().tints.is_empty());
    }

    #[test]
    fn active_fade_draws_the_stronger_tint_before_swapping() {
        let (mut session, calls) = accelerated_session();

        session.set_fade_tint(FadeTint::new(200, 0, 0, 64));
        session.set_fade_clamp(FadeTint::new(100, 50, 0, 32));
        session.present(640);

        let calls = calls.borrow();
        assert_eq!(calls.tints, vec![FadeTint::new(200, 50, 0, 64)]);
        assert_eq!(calls.swaps, 1);
    }

    //=====================================================================
    // Palette Tests
    //=====================================================================

    #[test]
    fn palette_upload_passes_the_run_through() {
        let (mut session, calls) = paletted_session();
        calls.borrow_mut().palette_uploads.clear();

        let run = vec![PaletteColor::new(10, 20, 30); 4];
        assert!(session.set_palette(100, &run));

        let uploads = &calls.borrow().palette_uploads;
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, 100);
        assert_eq!(uploads[0].1, run);
    }

    #[test]
    fn palette_run_is_clipped_to_the_table() {
        let (mut session, calls) = paletted_session();
        calls.borrow_mut().palette_uploads.clear();

        let run = vec![PaletteColor::new(1, 2, 3); 16];
        assert!(session.set_palette(250, &run));

        assert_eq!(calls.borrow().palette_uploads[0].1.len(), 6);
        assert!(!session.set_palette(256, &run));
    }

    #[test]
    fn palette_on_accelerated_path_is_a_successful_no_op() {
        let (mut session, calls) = accelerated_session();

        assert!(session.set_palette(0, &[PaletteColor::new(1, 2, 3)]));
        assert!(calls.borrow().palette_uploads.is_empty());
    }
}
