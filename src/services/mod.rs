pub mod embed_store;
pub mod metrics;
pub mod responder;
pub mod session_store;
