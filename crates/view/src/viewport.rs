use serde::Serialize;

/// Widths below this render the drawer instead of the sidebar.
pub const NARROW_BREAKPOINT_PX: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Wide,
    Narrow,
}

impl Viewport {
    pub fn from_width(width_px: u32) -> Self {
        if width_px < NARROW_BREAKPOINT_PX {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Viewport::Narrow)
    }
}
