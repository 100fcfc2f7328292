//=========================================================================
// Prelude
//
// One-stop import for hosts: `use proscenium::prelude::*;`
//
//=========================================================================

pub use crate::core::input::{scancodes, InputTranslator, KeySym, MouseButton, PlatformEvent};
pub use crate::core::timer::{SimClock, TimerCallback};
pub use crate::core::video::{
    AccelCapabilities, DisplaySession, FadeTint, FramePlace, ModeCatalog, ModeDescriptor,
    ModeMatch, ModeRequest, PaletteColor, VideoError,
};
pub use crate::platform::clock::InstantTickSource;
pub use crate::platform::winit_bridge::{ChannelEventPump, EventBridge};
pub use crate::platform::{InputBackend, ModeQuery, SurfaceLock, TickSource, VideoBackend};
pub use crate::{Presentation, PresentationBuilder};
