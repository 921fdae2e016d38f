//! Core data types
//!
//! Message and chat session structures shared across the application.

pub mod message;
pub mod session;
