//=========================================================================
// Presentation Facade
//
// Main entry point and coordinator for the presentation layer.
//
// Architecture:
// ```text
//     PresentationBuilder ──build()──> Presentation
//         │                              ├─ DisplaySession  (video)
//         ├─ with_sim_rate()             ├─ InputTranslator (input)
//         └─ with_title()                └─ SimClock        (timer)
// ```
//
// The facade owns the three subsystems and sequences the two protocols
// that cross component lines:
// - a mode change releases any exclusive pointer grab first and
//   re-applies it only after the new surface exists;
// - each per-frame poll drains the event queue and then advances the
//   simulation clock exactly once.
//
// A typical frame:
// ```text
//   if presentation.handle_events() { /* re-check focus / quit */ }
//   presentation.session_mut().lock();
//   /* ... render into the locked surface ... */
//   presentation.session_mut().unlock();
//   presentation.session_mut().present(width);
// ```
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::input::InputTranslator;
use crate::core::timer::SimClock;
use crate::core::video::{DisplaySession, ModeDescriptor, ModeRequest, VideoError};
use crate::platform::{InputBackend, TickSource, VideoBackend};

//=== PresentationBuilder =================================================

/// Builder for configuring and constructing a [`Presentation`].
///
/// # Default Values
///
/// - **Simulation rate**: 120 ticks per second
/// - **Title**: `"proscenium"`
///
/// # Examples
///
/// ```no_run
/// use proscenium::{PresentationBuilder, ModeRequest};
/// use proscenium::platform::clock::InstantTickSource;
/// # use proscenium::platform::{InputBackend, ModeQuery, SurfaceLock, VideoBackend};
/// # use proscenium::core::video::{FramePlace, ModeDescriptor, PaletteColor};
/// # use proscenium::core::input::PlatformEvent;
/// # struct Video;
/// # impl VideoBackend for Video {
/// #     fn fullscreen_modes(&mut self, _depth: u8) -> ModeQuery { ModeQuery::AnyResolution }
/// #     fn create_surface(&mut self, _mode: &ModeDescriptor) -> Result<(), String> { Ok(()) }
/// #     fn lock_surface(&mut self) -> SurfaceLock { SurfaceLock { place: FramePlace(0), pitch: 0 } }
/// #     fn unlock_surface(&mut self) {}
/// #     fn flip(&mut self, _width_hint: u32) {}
/// #     fn swap_buffers(&mut self) {}
/// #     fn set_colors(&mut self, _start: usize, _colors: &[PaletteColor]) -> bool { true }
/// # }
/// # struct Input;
/// # impl InputBackend for Input {
/// #     fn poll_event(&mut self) -> Option<PlatformEvent> { None }
/// #     fn set_pointer_grab(&mut self, grab: bool) -> bool { grab }
/// #     fn set_cursor_visible(&mut self, _visible: bool) {}
/// # }
///
/// let mut presentation = PresentationBuilder::new()
///     .with_sim_rate(120)
///     .with_title("my game")
///     .build(Video, Input, InstantTickSource::new());
///
/// presentation.set_mode(ModeRequest::new(640, 480, 8, true))?;
/// # Ok::<(), proscenium::VideoError>(())
/// ```
pub struct PresentationBuilder {
    sim_rate: u64,
    title: String,
}

impl PresentationBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            sim_rate: 120,
            title: "proscenium".to_string(),
        }
    }

    /// Sets the simulation tick rate the clock converts platform time
    /// into.
    ///
    /// # Panics
    ///
    /// Panics if `sim_rate` is zero.
    pub fn with_sim_rate(mut self, sim_rate: u64) -> Self {
        assert!(sim_rate > 0, "simulation rate must be positive, got {}", sim_rate);
        self.sim_rate = sim_rate;
        self
    }

    /// Sets the window caption applied at build time.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Assembles the facade around the three platform backends and
    /// initializes the simulation clock.
    pub fn build<V, I, T>(self, video: V, input: I, ticks: T) -> Presentation<V, I, T>
    where
        V: VideoBackend,
        I: InputBackend,
        T: TickSource,
    {
        info!("Building presentation layer ({} sim ticks/s)", self.sim_rate);

        let mut session = DisplaySession::new(video);
        session.backend_mut().set_title(&self.title);

        let mut clock = SimClock::new(ticks);
        clock.init(self.sim_rate);

        Presentation {
            session,
            input: InputTranslator::new(input),
            clock,
        }
    }
}

impl Default for PresentationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Presentation ========================================================

/// The assembled presentation layer: display session, input translator,
/// and simulation clock under one roof.
///
/// Single-threaded and cooperative: every operation runs synchronously
/// on the caller's thread, and registered callbacks fire re-entrantly
/// from inside [`handle_events`](Self::handle_events).
pub struct Presentation<V: VideoBackend, I: InputBackend, T: TickSource> {
    session: DisplaySession<V>,
    input: InputTranslator<I>,
    clock: SimClock<T>,
}

impl<V: VideoBackend, I: InputBackend, T: TickSource> Presentation<V, I, T> {
    //--- Mode Changes -----------------------------------------------------

    /// Switches the display configuration, keeping the pointer grab
    /// consistent across the transition.
    ///
    /// Input must never stay grabbed against a surface that is being
    /// torn down, so any active grab is released before the switch and
    /// re-applied only when the new surface exists. After a failure the
    /// grab stays released; the caller decides whether to retry with a
    /// known-good fallback configuration.
    pub fn set_mode(&mut self, request: ModeRequest) -> Result<ModeDescriptor, VideoError> {
        self.input.suspend_grab();
        let applied = self.session.set_mode(request)?;
        self.input.resume_grab();
        Ok(applied)
    }

    //--- Per-Frame Polling ------------------------------------------------

    /// Drains pending platform events and advances the simulation clock
    /// once.
    ///
    /// Returns `true` when a quit request or focus transition was
    /// observed; the caller should then consult
    /// [`quit_requested`](Self::quit_requested) and the translator's
    /// focus state before continuing.
    pub fn handle_events(&mut self) -> bool {
        self.input.drain_events(&mut self.clock)
    }

    /// Whether the platform has asked the application to quit.
    pub fn quit_requested(&self) -> bool {
        self.input.quit_requested()
    }

    //--- Subsystem Access -------------------------------------------------

    pub fn session(&self) -> &DisplaySession<V> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DisplaySession<V> {
        &mut self.session
    }

    pub fn input(&self) -> &InputTranslator<I> {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputTranslator<I> {
        &mut self.input
    }

    pub fn clock(&self) -> &SimClock<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock<T> {
        &mut self.clock
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
