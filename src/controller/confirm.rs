//! Two-step confirmation of destructive or state-changing actions.

use crate::domain::Record;
use crate::domain::types::EntityStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmIntent {
    Delete,
    ToggleStatus,
}

/// Dialog that is either closed or open on one target record.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmDialog<T> {
    pending: Option<(ConfirmIntent, T)>,
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Record> ConfirmDialog<T> {
    pub fn open(&mut self, intent: ConfirmIntent, target: T) {
        self.pending = Some((intent, target));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn intent(&self) -> Option<ConfirmIntent> {
        self.pending.as_ref().map(|(intent, _)| *intent)
    }

    pub fn target(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, target)| target)
    }

    /// Closes the dialog and hands out what was held.
    pub fn take(&mut self) -> Option<(ConfirmIntent, T)> {
        self.pending.take()
    }

    /// Closes the dialog without acting on the target.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn title(&self) -> Option<&'static str> {
        self.pending.as_ref().map(|(intent, target)| match intent {
            ConfirmIntent::Delete => "Delete record",
            ConfirmIntent::ToggleStatus => {
                if target.status().is_active() {
                    "Disable record"
                } else {
                    "Enable record"
                }
            }
        })
    }

    pub fn description(&self) -> Option<String> {
        self.pending.as_ref().map(|(intent, target)| match intent {
            ConfirmIntent::Delete => format!(
                "Record #{} will be removed permanently.",
                target.record_id()
            ),
            ConfirmIntent::ToggleStatus => format!(
                "Record #{} will become {}.",
                target.record_id(),
                target.status().toggled().as_str().to_lowercase()
            ),
        })
    }

    pub fn confirm_label(&self) -> Option<&'static str> {
        self.pending.as_ref().map(|(intent, target)| match intent {
            ConfirmIntent::Delete => "Delete",
            ConfirmIntent::ToggleStatus => toggle_label(target.status()),
        })
    }
}

/// Label of the button that flips `status`.
pub fn toggle_label(status: EntityStatus) -> &'static str {
    if status.is_active() { "Disable" } else { "Enable" }
}
