//! Core engine module
//!
//! Frame timing shared by the update loop

mod time;

pub use time::Time;
