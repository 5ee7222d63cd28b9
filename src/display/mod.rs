pub mod console;

pub use console::ConsoleDisplay;

use crate::dashboard::DashboardView;

/// Anything that can show a dashboard render pass.
pub trait DisplaySurface {
    fn render(&self, view: &DashboardView<'_>);
}
