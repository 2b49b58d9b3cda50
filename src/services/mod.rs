pub mod discord;
pub mod outline;

#[cfg(test)]
pub mod testing;

pub use discord::*;
pub use outline::*;
