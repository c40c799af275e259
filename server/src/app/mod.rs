mod app_ctx;
pub mod logging;

pub use app_ctx::*;
