//! Application core: the active screen, event handling, and the actions the
//! main loop carries out on the handler's behalf.

pub mod action;
pub mod event;
pub mod handler;
pub mod state;
