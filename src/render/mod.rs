//! Presentation of resolved views. The resolver never formats markup; hosts
//! pick a renderer and hand it the view.

use crate::resolver::{ResolvedView, TownChanges};

pub mod html;
pub mod text;

pub use html::{HtmlRenderer, TownPalette};
pub use text::TextRenderer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show nurse, phone and email above the schedule.
    pub include_contacts: bool,
    /// Append a script reporting the rendered height to the embedding page.
    pub report_height: bool,
}

impl RenderOptions {
    pub fn with_contacts(mut self, include: bool) -> Self {
        self.include_contacts = include;
        self
    }

    pub fn with_height_reporting(mut self, report: bool) -> Self {
        self.report_height = report;
        self
    }
}

pub trait Renderer {
    fn render_view(&self, view: &ResolvedView, options: &RenderOptions) -> String;
    fn render_not_found(&self, town: &str, office: &str) -> String;
    fn render_overview(&self, towns: &[TownChanges]) -> String;
    fn render_error(&self, message: &str) -> String;
}
