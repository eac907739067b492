//! Line-oriented terminal front end.

mod app;
mod input;

pub use app::{Console, render_status};
