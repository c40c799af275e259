mod heartbeat_service;
mod sample_workflow;

pub use heartbeat_service::*;
pub use sample_workflow::*;
