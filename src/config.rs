//! User configuration — keybindings, picker defaults and audio cues.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/spin-wheel/config.toml` (default
//! `~/.config/spin-wheel/config.toml`).  A missing or unreadable file means
//! defaults; unknown keys and malformed values are skipped.

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the wheel screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Spin,
    SpinToPointer,
    ScrollUp,
    ScrollDown,
    FocusAdd,
    BulkLoad,
    Reset,
    ClearWinners,
    RemoveWinners,
    ToggleWinners,
    ToggleAutoRemove,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup and the file).
    pub const ALL: &[Action] = &[
        Action::Spin,
        Action::SpinToPointer,
        Action::ScrollUp,
        Action::ScrollDown,
        Action::FocusAdd,
        Action::BulkLoad,
        Action::Reset,
        Action::ClearWinners,
        Action::RemoveWinners,
        Action::ToggleWinners,
        Action::ToggleAutoRemove,
        Action::Help,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Spin => "Spin Random",
            Action::SpinToPointer => "Spin To Pointer",
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::FocusAdd => "Add Item",
            Action::BulkLoad => "Bulk Load",
            Action::Reset => "Reset Wheel",
            Action::ClearWinners => "Clear Winners",
            Action::RemoveWinners => "Remove Winners From Wheel",
            Action::ToggleWinners => "Show / Hide Winners",
            Action::ToggleAutoRemove => "Auto-remove Winners",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Spin => "spin",
            Action::SpinToPointer => "spin_to_pointer",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::FocusAdd => "add_item",
            Action::BulkLoad => "bulk_load",
            Action::Reset => "reset",
            Action::ClearWinners => "clear_winners",
            Action::RemoveWinners => "remove_winners",
            Action::ToggleWinners => "toggle_winners",
            Action::ToggleAutoRemove => "toggle_auto_remove",
            Action::Help => "help",
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

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are
    /// compared.  Character keys ignore SHIFT, since terminals report `?`
    /// with or without it depending on the platform.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => MODIFIER_MASK,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Ctrl+s"`, `"↑"`, `"Space"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Serialise to config-file format (e.g. `"Ctrl+s"`, `"Up"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
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
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up if pretty => "↑".into(),
            KeyCode::Down if pretty => "↓".into(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+s"`, `"Up"`, `"q"`, `"Space"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Keep the original case for single characters.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Start with auto-remove mode switched on.
    pub auto_remove: bool,
    /// Start with the winners list visible.
    pub show_winners: bool,
    /// Play audio cues at all.
    pub sound: bool,
    /// Audio file played once a spin completes (synthesized when unset).
    pub tick_sound: Option<PathBuf>,
    /// Audio file looped while the wheel spins (synthesized when unset).
    pub spin_sound: Option<PathBuf>,
    /// Frame interval of the spin animation, in milliseconds.
    pub frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            auto_remove: false,
            show_winners: true,
            sound: true,
            tick_sound: None,
            spin_sound: None,
            frame_ms: 16,
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Spin, vec![KeyBind::new(Char(' '), n), KeyBind::new(Char('s'), n)]);
        m.insert(SpinToPointer, vec![KeyBind::new(Enter, n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(FocusAdd, vec![KeyBind::new(Char('i'), n), KeyBind::new(Tab, n)]);
        m.insert(BulkLoad, vec![KeyBind::new(Char('l'), n)]);
        m.insert(Reset, vec![KeyBind::new(Char('r'), n)]);
        m.insert(ClearWinners, vec![KeyBind::new(Char('c'), n)]);
        m.insert(RemoveWinners, vec![KeyBind::new(Char('x'), n)]);
        m.insert(ToggleWinners, vec![KeyBind::new(Char('w'), n)]);
        m.insert(ToggleAutoRemove, vec![KeyBind::new(Char('a'), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"Space/s"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the control bar).
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: spin | {}: add | {}: bulk load | {}: reset | {}: help | {}: quit",
            self.short_binding(Action::Spin),
            self.short_binding(Action::FocusAdd),
            self.short_binding(Action::BulkLoad),
            self.short_binding(Action::Reset),
            self.short_binding(Action::Help),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "config loaded");
                Self::parse(&contents)
            }
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path.display(), %err, "config unreadable, using defaults");
                }
                Self::default()
            }
        }
    }

    fn parse(s: &str) -> Self {
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
            let value = value.trim();
            let unquoted = value.trim_matches('"');

            match key {
                "auto_remove" => {
                    config.auto_remove = value == "true";
                    continue;
                }
                "show_winners" => {
                    config.show_winners = value == "true";
                    continue;
                }
                "sound" => {
                    config.sound = value == "true";
                    continue;
                }
                "tick_sound" => {
                    config.tick_sound = (!unquoted.is_empty()).then(|| PathBuf::from(unquoted));
                    continue;
                }
                "spin_sound" => {
                    config.spin_sound = (!unquoted.is_empty()).then(|| PathBuf::from(unquoted));
                    continue;
                }
                "frame_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.frame_ms = v.clamp(8, 100);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!(key, "unknown config key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// The config file contents for the current settings.
    pub fn serialise(&self) -> String {
        let path_value = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| format!("\"{}\"", p.display()))
                .unwrap_or_else(|| "\"\"".into())
        };
        let mut lines = vec![
            "# spin-wheel configuration".to_string(),
            String::new(),
            "# Picker".to_string(),
            format!("auto_remove = {}", self.auto_remove),
            format!("show_winners = {}", self.show_winners),
            format!("frame_ms = {}", self.frame_ms),
            String::new(),
            "# Audio cues (empty path = built-in tone)".to_string(),
            format!("sound = {}", self.sound),
            format!("tick_sound = {}", path_value(&self.tick_sound)),
            format!("spin_sound = {}", path_value(&self.spin_sound)),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
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

/// Return the config file path (`$XDG_CONFIG_HOME/spin-wheel/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("spin-wheel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn defaults_match_expected_keys() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Char(' '))), Some(Action::Spin));
        assert_eq!(config.match_key(key(KeyCode::Enter)), Some(Action::SpinToPointer));
        assert_eq!(config.match_key(key(KeyCode::Char('a'))), Some(Action::ToggleAutoRemove));
        assert_eq!(config.match_key(key(KeyCode::Char('z'))), None);
        assert_eq!(
            config.match_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::Help)
        );
    }

    #[test]
    fn file_overrides_settings_and_bindings() {
        let config = AppConfig::parse(
            "# comment\n\
             auto_remove = true\n\
             show_winners = false\n\
             frame_ms = 1000\n\
             tick_sound = \"/tmp/tick.wav\"\n\
             spin = Ctrl+s, F5\n\
             bogus = q\n",
        );
        assert!(config.auto_remove);
        assert!(!config.show_winners);
        assert_eq!(config.frame_ms, 100);
        assert_eq!(config.tick_sound, Some(PathBuf::from("/tmp/tick.wav")));
        assert_eq!(config.spin_sound, None);
        assert_eq!(config.display_bindings(Action::Spin), "Ctrl+s/F5");
        assert_eq!(
            config.match_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::Spin)
        );
        // Untouched actions keep their defaults.
        assert_eq!(config.display_bindings(Action::Quit), "q");
    }

    #[test]
    fn serialised_defaults_parse_back() {
        let original = AppConfig::default();
        let reparsed = AppConfig::parse(&original.serialise());
        assert_eq!(reparsed.bindings, original.bindings);
        assert_eq!(reparsed.frame_ms, original.frame_ms);
        assert_eq!(reparsed.sound, original.sound);
        assert_eq!(reparsed.tick_sound, None);
    }

    #[test]
    fn keybind_parsing() {
        assert_eq!(
            KeyBind::parse("Alt+Up"),
            Some(KeyBind::new(KeyCode::Up, KeyModifiers::ALT))
        );
        assert_eq!(
            KeyBind::parse("Space"),
            Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE))
        );
        assert_eq!(
            KeyBind::parse("X"),
            Some(KeyBind::new(KeyCode::Char('X'), KeyModifiers::NONE))
        );
        assert_eq!(KeyBind::parse("Hyper+q"), None);
        assert_eq!(KeyBind::parse("nonsense"), None);
    }
}
