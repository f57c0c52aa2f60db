//! Pure models behind each page behavior. They hold no DOM handles, so every
//! one of them can be driven by synthetic events in native tests.

pub mod clipboard;
pub mod contact;
pub mod counter;
pub mod cursor;
pub mod loader;
pub mod navigation;
pub mod particles;
pub mod reveal;
pub mod tilt;
pub mod typewriter;
