//! Presentation options
//!
//! Every chart is styled the same way: a light theme, a sans-serif font and
//! a 16pt title. None of it is caller-configurable.

use serde::Serialize;

pub const TEMPLATE: &str = "plotly_white";
pub const FONT_FAMILY: &str = "Arial";
pub const TITLE_FONT_SIZE: u32 = 16;

/// Layout block attached to every chart spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub template: String,
    pub font_family: String,
    pub title_font_size: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            template: TEMPLATE.to_string(),
            font_family: FONT_FAMILY.to_string(),
            title_font_size: TITLE_FONT_SIZE,
        }
    }
}
