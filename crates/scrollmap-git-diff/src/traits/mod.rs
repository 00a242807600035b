//! Contracts the host editor integrates through.
//!
//! The provider core never talks to a concrete editor, git implementation, or
//! rendering surface. The host implements these traits and the core consumes
//! them, mirroring how the rest of the crate stays instrumented rather than
//! wired to a particular application.

pub mod editor;
pub mod project;
pub mod repository;

pub use editor::{EditorId, TextEditor};
pub use project::Project;
pub use repository::Repository;
