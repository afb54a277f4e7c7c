// Core primitives shared by engine and game code

pub mod time;

pub use time::{InputTime, Timestamp};
