//! Search bar widget core: controller, text surface, icon triggers and focus handle.

pub mod controller;
pub mod surface;
pub mod trigger;

pub use self::controller::{
    FocusEvent, SearchBarCallbacks, SearchBarProps, SearchInputController, is_enter, is_escape,
};
pub use self::surface::{SearchBarHandle, SurfaceAttributes, TerminalTextSurface, TextInputSurface};
pub use self::trigger::IconTrigger;
