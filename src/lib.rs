//! Weather client core: MVI stores, their retention, and back-stack navigation.

pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod logging;
pub mod mvi;
pub mod navigation;
pub mod reactive;
pub mod registry;
pub mod screens;
