//! Scripted desktop and control used by the runner and batch tool tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::{AutomationError, Result};
use crate::omere::buttons::Button;
use crate::omere::runner::{Desktop, RunControl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click(u32, u32),
    Clear,
    Type(String),
}

#[derive(Default)]
pub struct FakeDesktop {
    pub positions: HashMap<Button, (u32, u32)>,
    pub actions: Vec<Action>,
    pub paused_ms: u64,
    pub fail_typing: bool,
}

impl FakeDesktop {
    pub fn with_all_buttons() -> Self {
        let mut desktop = Self::default();
        for (i, button) in Button::ALL.iter().enumerate() {
            desktop.positions.insert(*button, (100 + i as u32 * 10, 200));
        }
        desktop
    }

    pub fn typed(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Type(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Desktop for FakeDesktop {
    fn locate(&mut self, button: Button) -> Option<(u32, u32)> {
        self.positions.get(&button).copied()
    }

    fn click_at(&mut self, x: u32, y: u32) -> Result<()> {
        self.actions.push(Action::Click(x, y));
        Ok(())
    }

    fn clear_field(&mut self) -> Result<()> {
        self.actions.push(Action::Clear);
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<()> {
        if self.fail_typing {
            return Err(AutomationError::Input("keyboard unavailable".to_string()));
        }
        self.actions.push(Action::Type(text.to_string()));
        Ok(())
    }

    fn pause(&mut self, ms: u64) {
        self.paused_ms += ms;
    }
}

/// Requests a stop after `stop_after` checks
#[derive(Default)]
pub struct RecordingControl {
    pub checks: Cell<usize>,
    pub stop_after: Option<usize>,
    pub messages: RefCell<Vec<String>>,
    pub warnings: RefCell<Vec<String>>,
}

impl RunControl for RecordingControl {
    fn should_stop(&self) -> bool {
        let n = self.checks.get() + 1;
        self.checks.set(n);
        matches!(self.stop_after, Some(limit) if n > limit)
    }

    fn progress(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
