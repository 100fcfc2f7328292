//=========================================================================
// Presentation Core
//
// The platform-independent half of the crate: display mode negotiation
// and surface mediation (`video`), raw-event translation (`input`), and
// the fixed-rate simulation clock (`timer`). Everything here operates
// against the backend traits in `crate::platform`, never against a
// platform library directly, so each piece runs unmodified under the
// mock backends the tests use.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod input;
pub mod timer;
pub mod video;

//=== Public Exports ======================================================

pub use input::InputTranslator;
pub use timer::{SimClock, TimerCallback};
pub use video::{DisplaySession, ModeDescriptor, ModeRequest, VideoError};
