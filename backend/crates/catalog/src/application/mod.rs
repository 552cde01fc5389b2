//! Application Layer - Use Cases

pub mod get_topic;
pub mod list_topics;
pub mod toggle_progress;

pub use get_topic::GetTopicUseCase;
pub use list_topics::ListTopicsUseCase;
pub use toggle_progress::ToggleProgressUseCase;
