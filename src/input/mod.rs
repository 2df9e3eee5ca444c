pub mod events;
pub mod poll;

#[cfg(test)]
mod tests;

pub use events::*;
pub use poll::*;
