pub mod action;
pub mod api_types;
pub mod cycle;
pub mod llm;
pub mod prompts;
pub mod providers;
pub mod retry;

pub use action::{Action, ControlCommand};
pub use cycle::{CognitiveCycle, CycleReply, CycleState, GenerationError, TurnKind};
pub use llm::{CompletionParams, LlmClient};
