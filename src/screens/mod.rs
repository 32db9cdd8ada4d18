//! Screens of the app, each a store plus the component that owns it.

pub mod details;
pub mod favourite;
pub mod root;
pub mod search;

pub use root::{Child, Config, RootComponent};
