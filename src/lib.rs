//=========================================================================
// Proscenium — Library Root
//
// The platform presentation layer underlying a real-time rendering
// loop: it negotiates a display mode, mediates exclusive access to the
// frame buffer across a paletted and an accelerated path, translates
// raw platform input into a stable engine-facing representation, and
// advances a monotonic simulation clock independent of wall-clock
// jitter.
//
// Responsibilities:
// - Expose the top-level facade (`Presentation`) and its builder
// - Expose the core subsystems (`core::video`, `core::input`,
//   `core::timer`) for hosts that wire them up individually
// - Expose the platform contracts and adapters (`platform`)
//
// Typical usage:
// ```text
// let mut presentation = PresentationBuilder::new()
//     .with_sim_rate(120)
//     .build(video_backend, input_backend, InstantTickSource::new());
//
// presentation.set_mode(ModeRequest::new(640, 480, 8, true))?;
// loop {
//     if presentation.handle_events() && presentation.quit_requested() {
//         break;
//     }
//     presentation.session_mut().lock();
//     // ... render ...
//     presentation.session_mut().unlock();
//     presentation.session_mut().present(640);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent subsystems; `platform` holds the
// backend contracts they consume plus the winit and std-clock adapters.
// Both are public so hosts can implement their own backends and drive
// the subsystems directly.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod presentation;

//--- Public Exports ------------------------------------------------------
//
// The facade and the types almost every host touches, re-exported at
// the root so simple programs never spell out the module tree.
//
pub use crate::core::video::{ModeDescriptor, ModeMatch, ModeRequest, VideoError};
pub use presentation::{Presentation, PresentationBuilder};
