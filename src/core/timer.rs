//=========================================================================
// Simulation Clock
//
// Converts a monotonic platform tick counter into a fixed-rate
// simulation tick counter, independent of wall-clock jitter. Each
// `sample` converts the platform count into simulation-tick units,
// advances the accumulated counter by the positive delta since the last
// sample, and fires the registered callback once per elapsed simulation
// tick. A platform clock that stalls or moves backward produces a silent
// no-op: the counter never decreases and the callback never double-fires.
//
//=========================================================================

//=== External Crates =====================================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::platform::TickSource;

//=== Callback Type =======================================================

/// Fired once per elapsed simulation tick, synchronously from inside
/// [`SimClock::sample`].
pub type TimerCallback = Box<dyn FnMut()>;

//=== SimClock ============================================================

/// Fixed-rate simulation clock over a platform tick source.
///
/// Frequency fields are immutable between [`init`](Self::init) and
/// [`shutdown`](Self::shutdown); the accumulated tick counter is
/// monotonically non-decreasing for the lifetime of the clock.
pub struct SimClock<T: TickSource> {
    source: T,

    /// Platform ticks per second; zero while uninitialized, which turns
    /// `sample` into a no-op.
    platform_frequency: u64,

    /// Caller-requested simulation ticks per second.
    sim_rate: u64,

    /// Last sampled platform time, in simulation-tick units.
    last_sample: u64,

    /// Accumulated simulation ticks.
    total: u64,

    callback: Option<TimerCallback>,
}

impl<T: TickSource> SimClock<T> {
    /// Creates an uninitialized clock over `source`. `sample` does
    /// nothing until [`init`](Self::init) is called.
    pub fn new(source: T) -> Self {
        Self {
            source,
            platform_frequency: 0,
            sim_rate: 0,
            last_sample: 0,
            total: 0,
            callback: None,
        }
    }

    //--- init() -----------------------------------------------------------

    /// Starts the clock at `sim_rate` simulation ticks per second.
    ///
    /// Idempotent: a second call while running is a no-op. Records the
    /// source frequency, clears any registered callback, and snaps the
    /// sampling baseline to the current platform time so the first
    /// `sample` reports only time elapsed from here on.
    ///
    /// # Panics
    ///
    /// Panics if `sim_rate` is zero or the source reports a zero
    /// frequency.
    pub fn init(&mut self, sim_rate: u64) {
        if self.platform_frequency != 0 {
            return;
        }
        assert!(sim_rate > 0, "simulation rate must be positive");

        let frequency = self.source.frequency();
        assert!(frequency > 0, "tick source must report a nonzero frequency");

        info!(target: "timer", "Initializing timer ({} sim ticks/s)", sim_rate);

        self.platform_frequency = frequency;
        self.sim_rate = sim_rate;
        self.last_sample = Self::to_sim_units(self.source.ticks(), sim_rate, frequency);
        self.callback = None;
    }

    /// Stops the clock. Subsequent `sample` calls are no-ops until the
    /// next `init`. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.platform_frequency == 0 {
            return;
        }
        self.platform_frequency = 0;
    }

    //--- sample() ---------------------------------------------------------

    /// Advances the simulation clock to the current platform time.
    ///
    /// Computes the elapsed delta in simulation-tick units; when
    /// positive, advances the accumulated counter and the baseline by
    /// that amount and invokes the callback exactly `delta` times. A
    /// non-positive delta (clock not advanced, or moved backward) leaves
    /// everything untouched.
    pub fn sample(&mut self) {
        if self.platform_frequency == 0 {
            return;
        }

        let now = Self::to_sim_units(self.source.ticks(), self.sim_rate, self.platform_frequency);
        let delta = now as i64 - self.last_sample as i64;
        if delta <= 0 {
            return;
        }

        let delta = delta as u64;
        self.total += delta;
        self.last_sample += delta;

        if let Some(callback) = &mut self.callback {
            for _ in 0..delta {
                callback();
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Raw platform tick count, unconverted. Diagnostic/profiling use;
    /// not simulation time.
    pub fn ticks(&self) -> u64 {
        self.source.ticks()
    }

    /// The accumulated simulation tick counter. Never decreases, and
    /// survives a shutdown/re-init cycle.
    pub fn total_ticks(&self) -> u64 {
        self.total
    }

    /// The configured simulation rate, in ticks per second. Zero while
    /// uninitialized.
    pub fn sim_rate(&self) -> u64 {
        self.sim_rate
    }

    //--- install_callback() -----------------------------------------------

    /// Swaps the per-tick callback, returning the previous one so
    /// callers can chain or restore it.
    pub fn install_callback(&mut self, callback: Option<TimerCallback>) -> Option<TimerCallback> {
        std::mem::replace(&mut self.callback, callback)
    }

    //--- Internal Helpers -------------------------------------------------

    // 128-bit intermediate: nanosecond-range tick counts times the sim
    // rate overflow 64 bits.
    fn to_sim_units(ticks: u64, sim_rate: u64, frequency: u64) -> u64 {
        (ticks as u128 * sim_rate as u128 / frequency as u128) as u64
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
