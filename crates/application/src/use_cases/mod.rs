//! Application use cases (business logic orchestration).

mod export_workspaces;

pub use export_workspaces::*;
