pub mod event;
pub mod notification;

pub use event::*;
pub use notification::*;
