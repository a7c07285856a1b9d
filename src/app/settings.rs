//! Settings menu model (data only).
//!
//! Both the input handler and the settings popup read this table.

use super::state::{ActiveView, AppState};

/// Page sizes offered by the settings menu and the grow/shrink keys.
pub const PAGE_SIZES: &[usize] = &[5, 10, 20, 25, 50, 100];

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens another overlay.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle read and written through `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// Next entry of [`PAGE_SIZES`] above (or below) `current`, if any.
pub fn step_page_size(current: usize, grow: bool) -> Option<usize> {
    if grow {
        PAGE_SIZES.iter().copied().find(|&s| s > current)
    } else {
        PAGE_SIZES.iter().rev().copied().find(|&s| s < current)
    }
}

/// Apply a page size to the live view and remember it in the config.
pub fn apply_page_size(s: &mut AppState, size: usize) {
    s.view.set_page_size(size);
    s.config.page_size = size;
    s.clamp_selection();
    save_config(s);
    s.status_message = Some(format!("{size} rows per page"));
}

fn save_config(s: &mut AppState) {
    if !s.persist_config {
        return;
    }
    if let Err(e) = s.config.save() {
        tracing::warn!(error = %e, "could not save config");
        s.status_message = Some(format!("Could not save config: {e}"));
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::Help,
    },
    SettingsItem::Toggle {
        label: "Switcher Labels",
        get: |s| s.config.show_labels,
        set: |s, v| {
            s.config.show_labels = v;
            save_config(s);
        },
    },
    SettingsItem::Cycle {
        label: "Page Size",
        value: |s| s.view.page_size().to_string(),
        cycle: |s| {
            let next = step_page_size(s.view.page_size(), true).unwrap_or(PAGE_SIZES[0]);
            apply_page_size(s, next);
        },
    },
    SettingsItem::Cycle {
        label: "Default View",
        value: |s| s.config.default_view.label().to_string(),
        cycle: |s| {
            s.config.cycle_default_view(true);
            save_config(s);
            s.status_message = Some(format!(
                "Default view: {} (next launch)",
                s.config.default_view.label()
            ));
        },
    },
    SettingsItem::Cycle {
        label: "Double-click Window",
        value: |s| format!("{}ms", s.config.double_click_ms),
        cycle: |s| {
            const WINDOWS: &[u64] = &[150, 200, 250, 300, 400, 500];
            let current = s.config.double_click_ms;
            let idx = WINDOWS.iter().position(|&w| w == current).unwrap_or(2);
            s.config.double_click_ms = WINDOWS[(idx + 1) % WINDOWS.len()];
            save_config(s);
            s.status_message = Some(format!("Double-click window: {}ms", s.config.double_click_ms));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_steps_skip_to_neighbours() {
        assert_eq!(step_page_size(10, true), Some(20));
        assert_eq!(step_page_size(10, false), Some(5));
        assert_eq!(step_page_size(7, true), Some(10));
        assert_eq!(step_page_size(5, false), None);
        assert_eq!(step_page_size(100, true), None);
    }
}
