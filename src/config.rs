//! User configuration — view defaults, keybindings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/multiview/config.toml` (default
//! `~/.config/multiview/config.toml`).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use multiview::ViewMode;

pub const MAX_PAGE_SIZE: usize = 500;
const DEFAULT_DOUBLE_CLICK_MS: u64 = 250;

// ───────────────────────────────────────── actions ───────────

/// Every key-bindable user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    NextView,
    PrevView,
    NextPage,
    PrevPage,
    GrowPage,
    ShrinkPage,
    StartFilter,
    ToggleSort,
    SortColumnLeft,
    SortColumnRight,
    OpenDetail,
    OpenSettings,
    ShowHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::NextView,
        Action::PrevView,
        Action::NextPage,
        Action::PrevPage,
        Action::GrowPage,
        Action::ShrinkPage,
        Action::StartFilter,
        Action::ToggleSort,
        Action::SortColumnLeft,
        Action::SortColumnRight,
        Action::OpenDetail,
        Action::OpenSettings,
        Action::ShowHelp,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Select Previous",
            Action::MoveDown => "Select Next",
            Action::NextView => "Next View",
            Action::PrevView => "Previous View",
            Action::NextPage => "Next Page",
            Action::PrevPage => "Previous Page",
            Action::GrowPage => "Larger Pages",
            Action::ShrinkPage => "Smaller Pages",
            Action::StartFilter => "Search",
            Action::ToggleSort => "Sort by Column",
            Action::SortColumnLeft => "Sort Column ←",
            Action::SortColumnRight => "Sort Column →",
            Action::OpenDetail => "Record Detail",
            Action::OpenSettings => "Settings",
            Action::ShowHelp => "Help",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::NextView => "next_view",
            Action::PrevView => "prev_view",
            Action::NextPage => "next_page",
            Action::PrevPage => "prev_page",
            Action::GrowPage => "grow_page",
            Action::ShrinkPage => "shrink_page",
            Action::StartFilter => "start_filter",
            Action::ToggleSort => "toggle_sort",
            Action::SortColumnLeft => "sort_column_left",
            Action::SortColumnRight => "sort_column_right",
            Action::OpenDetail => "open_detail",
            Action::OpenSettings => "open_settings",
            Action::ShowHelp => "show_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid key binding `{0}`")]
pub struct InvalidKeyBind(String);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are
    /// compared.  SHIFT is ignored for symbol keys, since terminals disagree
    /// on whether `?` arrives with it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if matches!(event.code, KeyCode::Char(c) if !c.is_alphabetic()) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// Config-file spelling (`"Ctrl+c"`, `"PageDown"`, `"Plus"`).
    fn to_config_string(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char('+') => "Plus".into(),
            KeyCode::Char(',') => "Comma".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        format!("{}{key}", self.modifier_prefix())
    }
}

/// Short on-screen form (`"↑"`, `"PgDn"`, `"Ctrl+c"`).
impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        write!(f, "{}{key}", self.modifier_prefix())
    }
}

impl FromStr for KeyBind {
    type Err = InvalidKeyBind;

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidKeyBind(s.to_string());
        let mut parts: Vec<&str> = s.split('+').collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or_else(invalid)?;

        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }

        let code = match key.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            "plus" => KeyCode::Char('+'),
            "comma" => KeyCode::Char(','),
            k if k.len() > 1 && k.starts_with('f') => {
                KeyCode::F(k[1..].parse().map_err(|_| invalid())?)
            }
            _ if key.chars().count() == 1 => KeyCode::Char(key.chars().next().ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };

        Ok(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Front-end configuration: view defaults plus keybindings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub default_view: ViewMode,
    pub views: Vec<ViewMode>,
    pub page_size: usize,
    /// Show text labels next to the switcher icons.
    pub show_labels: bool,
    pub enable_sorting: bool,
    pub enable_global_filter: bool,
    /// Double-click detection window for opening a record.
    pub double_click_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            default_view: ViewMode::Table,
            views: ViewMode::ALL.to_vec(),
            page_size: 10,
            show_labels: true,
            enable_sorting: true,
            enable_global_filter: true,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::plain(Up), KeyBind::ch('k')]);
        m.insert(MoveDown, vec![KeyBind::plain(Down), KeyBind::ch('j')]);
        m.insert(NextView, vec![KeyBind::plain(Tab), KeyBind::ch('v')]);
        m.insert(PrevView, vec![KeyBind::new(BackTab, KeyModifiers::SHIFT)]);
        m.insert(NextPage, vec![KeyBind::plain(Right), KeyBind::plain(PageDown), KeyBind::ch('n')]);
        m.insert(PrevPage, vec![KeyBind::plain(Left), KeyBind::plain(PageUp), KeyBind::ch('p')]);
        m.insert(GrowPage, vec![KeyBind::ch('+')]);
        m.insert(ShrinkPage, vec![KeyBind::ch('-')]);
        m.insert(StartFilter, vec![KeyBind::ch('/')]);
        m.insert(ToggleSort, vec![KeyBind::ch('s')]);
        m.insert(SortColumnLeft, vec![KeyBind::ch('<')]);
        m.insert(SortColumnRight, vec![KeyBind::ch('>')]);
        m.insert(OpenDetail, vec![KeyBind::plain(Enter)]);
        m.insert(OpenSettings, vec![KeyBind::ch(',')]);
        m.insert(ShowHelp, vec![KeyBind::ch('?')]);
        m.insert(Quit, vec![KeyBind::ch('q')]);

        m
    }

    /// Action bound to a key event.  When several bindings match, the one
    /// with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Every binding for `action`, e.g. `"↑/k"`.
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        self.bindings
            .get(&action)
            .and_then(|b| b.first())
            .map(ToString::to_string)
            .unwrap_or_else(|| "?".into())
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: view | {}: page | {}: search | {}: sort | {}: help",
            self.short_binding(Action::NextView),
            self.short_binding(Action::NextPage),
            self.short_binding(Action::StartFilter),
            self.short_binding(Action::ToggleSort),
            self.short_binding(Action::ShowHelp),
        )
    }

    /// Switch to the next (or previous) available view as the default.
    pub fn cycle_default_view(&mut self, forward: bool) {
        let views = if self.views.is_empty() {
            ViewMode::ALL
        } else {
            &self.views[..]
        };
        let n = views.len();
        let pos = views.iter().position(|&v| v == self.default_view).unwrap_or(0);
        self.default_view = views[if forward { (pos + 1) % n } else { (pos + n - 1) % n }];
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, self.serialise())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Parse the key = value format; unknown keys and bad values are
    /// skipped with a warning.
    pub fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "default_view" => config.default_view = ViewMode::parse_lossy(value),
                "views" => {
                    let views: Vec<ViewMode> = value
                        .split(',')
                        .filter_map(|v| v.trim().parse().ok())
                        .collect();
                    if !views.is_empty() {
                        config.views = views;
                    }
                }
                "page_size" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.page_size = v.clamp(1, MAX_PAGE_SIZE);
                    }
                }
                "show_labels" => config.show_labels = value == "true",
                "enable_sorting" => config.enable_sorting = value == "true",
                "enable_global_filter" => config.enable_global_filter = value == "true",
                "double_click_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.double_click_ms = v.clamp(100, 2000);
                    }
                }
                _ => {
                    let Some(action) = Action::from_config_key(key) else {
                        tracing::warn!(key, "config: unknown key");
                        continue;
                    };
                    let parsed: Vec<KeyBind> = value
                        .split(", ")
                        .filter_map(|part| match part.trim().parse() {
                            Ok(bind) => Some(bind),
                            Err(e) => {
                                tracing::warn!("config: {e}");
                                None
                            }
                        })
                        .collect();
                    if !parsed.is_empty() {
                        config.bindings.insert(action, parsed);
                    }
                }
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let views: Vec<&str> = self.views.iter().map(|v| v.as_str()).collect();
        let mut lines = vec![
            "# multiview configuration".to_string(),
            String::new(),
            "# Views".to_string(),
            format!("default_view = {}", self.default_view),
            format!("views = {}", views.join(",")),
            format!("page_size = {}", self.page_size),
            format!("show_labels = {}", self.show_labels),
            format!("enable_sorting = {}", self.enable_sorting),
            format!("enable_global_filter = {}", self.enable_global_filter),
            format!("double_click_ms = {}", self.double_click_ms),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, Plus, Comma, F1-F12"
                .to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/multiview/config.toml`.
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("multiview").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_modifiers_and_named_keys() {
        let b: KeyBind = "Ctrl+Alt+PageDown".parse().unwrap();
        assert_eq!(b.code, KeyCode::PageDown);
        assert_eq!(b.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert_eq!("Plus".parse::<KeyBind>().unwrap().code, KeyCode::Char('+'));
        assert!("Hyper+x".parse::<KeyBind>().is_err());
        assert!("Ctrl+".parse::<KeyBind>().is_err());
    }

    #[test]
    fn symbol_keys_ignore_shift() {
        let help = KeyBind::ch('?');
        assert!(help.matches(key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        let lower = KeyBind::ch('k');
        assert!(!lower.matches(key(KeyCode::Char('k'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn default_bindings_resolve() {
        let config = AppConfig::default();
        assert_eq!(
            config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::NextView)
        );
        assert_eq!(
            config.match_key(key(KeyCode::Char('+'), KeyModifiers::NONE)),
            Some(Action::GrowPage)
        );
        assert_eq!(config.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_reads_settings_and_clamps() {
        let config = AppConfig::parse(
            "default_view = kanban\n\
             views = table, kanban, bogus\n\
             page_size = 9000\n\
             show_labels = false\n\
             quit = Ctrl+q, Esc\n\
             mystery = 1\n",
        );
        assert_eq!(config.default_view, ViewMode::Kanban);
        assert_eq!(config.views, [ViewMode::Table, ViewMode::Kanban]);
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert!(!config.show_labels);
        assert_eq!(config.display_bindings(Action::Quit), "Ctrl+q/Esc");
    }

    #[test]
    fn serialise_then_parse_keeps_settings() {
        let mut config = AppConfig {
            page_size: 25,
            show_labels: false,
            ..AppConfig::default()
        };
        config.cycle_default_view(true);
        let back = AppConfig::parse(&config.serialise());
        assert_eq!(back.default_view, ViewMode::Card);
        assert_eq!(back.page_size, 25);
        assert!(!back.show_labels);
        assert_eq!(back.bindings, config.bindings);
    }
}
