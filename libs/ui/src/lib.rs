//! Shared UI components for the Watchy display
//!
//! Text screens drawn on top of the panel framebuffer when no watchface
//! can be shown.

pub mod fonts;
pub mod pages;

// Re-export commonly used types
pub use pages::{ErrorPage, Page};
