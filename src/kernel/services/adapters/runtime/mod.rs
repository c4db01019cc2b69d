//! Async runtime adapter: executes IO effects and sends results back to the store.

mod async_runtime;
mod message;

pub use async_runtime::AsyncRuntime;
pub use message::AppMessage;
