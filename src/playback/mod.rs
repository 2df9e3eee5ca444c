pub mod controller;
pub mod state;

#[cfg(test)]
mod tests;

pub use controller::*;
pub use state::*;
