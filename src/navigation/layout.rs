//! Viewport classification and shell selection.

use serde::Serialize;

use super::Route;

/// Widths below this are phones.
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Widths at or above this are desktops.
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Mobile,
    Tablet,
    Desktop,
}

impl Layout {
    /// Classify a viewport by its CSS pixel width.
    pub fn classify(width: f64) -> Self {
        if width < TABLET_MIN_WIDTH {
            Layout::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Layout::Tablet
        } else {
            Layout::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Layout::Mobile
    }
}

/// Navigation chrome around the routed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// Signed out: content only
    Bare,
    /// Persistent sidebar (tablet and desktop)
    Sidebar,
    /// Top bar with a slide-in drawer (mobile)
    Drawer,
}

impl Shell {
    pub fn select(layout: Layout, authenticated: bool) -> Self {
        match (authenticated, layout) {
            (false, _) => Shell::Bare,
            (true, Layout::Mobile) => Shell::Drawer,
            (true, _) => Shell::Sidebar,
        }
    }
}

/// Entry in the sidebar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

pub const MENU: [MenuItem; 2] = [
    MenuItem {
        label: "Dashboard",
        route: Route::Dashboard,
    },
    MenuItem {
        label: "All users",
        route: Route::Users,
    },
];
