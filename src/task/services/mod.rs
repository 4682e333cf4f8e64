//! Application services for outbound task synchronization.

mod orchestrator;

pub use orchestrator::{
    CreateTaskRequest, MAX_DESCRIPTION_LENGTH, OrchestratorPorts, TaskOrchestrationError,
    TaskOrchestrationResult, TaskOrchestrator, UpdateTaskStatusRequest,
};
