pub mod dispatch;
pub mod filter;
pub mod rules;
pub mod webhook;

pub use dispatch::*;
pub use webhook::*;
