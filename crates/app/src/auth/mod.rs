//! Authentication

mod session;

pub use session::*;
