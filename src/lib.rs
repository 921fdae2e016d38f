//! aGPT Library
//!
//! Core library for the aGPT desktop chat assistant: session
//! persistence, the conversation engine, the response generator client,
//! widget logic, and the Dioxus UI.

pub mod app;
pub mod engine;
pub mod generator;
pub mod storage;
pub mod types;
pub mod ui;
pub mod widgets;
