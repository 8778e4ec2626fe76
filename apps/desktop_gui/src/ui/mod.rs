//! UI layer: app shell, decorative effects, and theme.

pub mod app;
pub mod fx;
pub mod theme;

pub use app::LabApp;
