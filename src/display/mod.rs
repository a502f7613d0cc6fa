//! Terminal output: the drawing surface and the bar renderer.

mod bars;
mod surface;

// Re-export public types
pub use bars::render;
pub use surface::{
    install_panic_hook, restore_terminal, CrosstermSurface, TerminalGuard, TerminalSurface,
};

#[cfg(test)]
pub(crate) use surface::tests::RecordingSurface;
