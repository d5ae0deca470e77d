use crate::settings::{HotkeyConfig, HotkeyKey, HotkeyModifiers};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

pub fn hotkey_label(config: &HotkeyConfig) -> String {
    let Some(key) = config.key else {
        return "Disabled".to_string();
    };

    let mut parts: Vec<&'static str> = Vec::new();
    if config.modifiers.ctrl {
        parts.push("Ctrl");
    }
    if config.modifiers.alt {
        parts.push("Alt");
    }
    if config.modifiers.shift {
        parts.push("Shift");
    }
    parts.push(hotkey_key_label(key));
    parts.join("+")
}

pub fn hotkey_from_config(config: &HotkeyConfig) -> Option<HotKey> {
    let key = config.key?;
    let code = hotkey_key_to_code(key);
    let modifiers = hotkey_modifiers_to_code(config.modifiers);
    if modifiers.is_empty() {
        Some(HotKey::new(None, code))
    } else {
        Some(HotKey::new(Some(modifiers), code))
    }
}

pub fn hotkey_key_label(key: HotkeyKey) -> &'static str {
    match key {
        HotkeyKey::F1 => "F1",
        HotkeyKey::F2 => "F2",
        HotkeyKey::F3 => "F3",
        HotkeyKey::F4 => "F4",
        HotkeyKey::F5 => "F5",
        HotkeyKey::F6 => "F6",
        HotkeyKey::F7 => "F7",
        HotkeyKey::F8 => "F8",
        HotkeyKey::F9 => "F9",
        HotkeyKey::F10 => "F10",
        HotkeyKey::F11 => "F11",
        HotkeyKey::F12 => "F12",
        HotkeyKey::Pause => "Pause",
        HotkeyKey::End => "End",
    }
}

fn hotkey_key_to_code(key: HotkeyKey) -> Code {
    match key {
        HotkeyKey::F1 => Code::F1,
        HotkeyKey::F2 => Code::F2,
        HotkeyKey::F3 => Code::F3,
        HotkeyKey::F4 => Code::F4,
        HotkeyKey::F5 => Code::F5,
        HotkeyKey::F6 => Code::F6,
        HotkeyKey::F7 => Code::F7,
        HotkeyKey::F8 => Code::F8,
        HotkeyKey::F9 => Code::F9,
        HotkeyKey::F10 => Code::F10,
        HotkeyKey::F11 => Code::F11,
        HotkeyKey::F12 => Code::F12,
        HotkeyKey::Pause => Code::Pause,
        HotkeyKey::End => Code::End,
    }
}

fn hotkey_modifiers_to_code(modifiers: HotkeyModifiers) -> Modifiers {
    let mut mods = Modifiers::empty();
    if modifiers.ctrl {
        mods |= Modifiers::CONTROL;
    }
    if modifiers.alt {
        mods |= Modifiers::ALT;
    }
    if modifiers.shift {
        mods |= Modifiers::SHIFT;
    }
    mods
}

/// Global emergency-stop hotkey, active even while OMERE has focus
pub struct EmergencyStop {
    manager: Option<GlobalHotKeyManager>,
    registered: Option<HotKey>,
    error: Option<String>,
}

impl EmergencyStop {
    pub fn new() -> Self {
        match GlobalHotKeyManager::new() {
            Ok(manager) => Self {
                manager: Some(manager),
                registered: None,
                error: None,
            },
            Err(e) => Self {
                manager: None,
                registered: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Replace the registered hotkey with the one from `config`
    pub fn apply(&mut self, config: &HotkeyConfig) {
        let Some(manager) = &self.manager else {
            return;
        };

        if let Some(previous) = self.registered.take() {
            let _ = manager.unregister(previous);
        }
        self.error = None;

        if let Some(hotkey) = hotkey_from_config(config) {
            match manager.register(hotkey) {
                Ok(()) => self.registered = Some(hotkey),
                Err(e) => {
                    tracing::warn!("Failed to register hotkey {}: {}", hotkey_label(config), e);
                    self.error = Some(e.to_string());
                }
            }
        }
    }

    /// Drain pending hotkey events; true if the stop hotkey was pressed
    pub fn poll(&self) -> bool {
        let Some(registered) = self.registered else {
            while GlobalHotKeyEvent::receiver().try_recv().is_ok() {}
            return false;
        };

        let mut pressed = false;
        while let Ok(event) = GlobalHotKeyEvent::receiver().try_recv() {
            if event.id == registered.id() && event.state == HotKeyState::Pressed {
                pressed = true;
            }
        }
        pressed
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lists_modifiers_before_key() {
        let config = HotkeyConfig {
            key: Some(HotkeyKey::F9),
            modifiers: HotkeyModifiers {
                ctrl: true,
                alt: false,
                shift: true,
            },
        };
        assert_eq!(hotkey_label(&config), "Ctrl+Shift+F9");
    }

    #[test]
    fn disabled_hotkey_has_no_binding() {
        let config = HotkeyConfig {
            key: None,
            modifiers: HotkeyModifiers::default(),
        };
        assert_eq!(hotkey_label(&config), "Disabled");
        assert!(hotkey_from_config(&config).is_none());
    }

    #[test]
    fn modifiers_change_hotkey_identity() {
        let plain = hotkey_from_config(&HotkeyConfig::default()).expect("default is bound");
        let with_ctrl = hotkey_from_config(&HotkeyConfig {
            key: Some(HotkeyKey::F12),
            modifiers: HotkeyModifiers {
                ctrl: true,
                ..Default::default()
            },
        })
        .expect("bound");
        assert_ne!(plain.id(), with_ctrl.id());
    }
}
