pub mod config;
pub mod core;
pub mod ext;
pub mod parse;
pub mod session;

pub use session::Session;
