//! In-progress draft buffer.
//!
//! Holds text being composed but not committed. `None` means no draft is
//! pending, which is distinct from `Some("")`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBuffer {
    value: Option<String>,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restored(value: Option<String>) -> Self {
        Self { value }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.value = Some(text.into());
    }

    /// Current draft, or `""` when none is pending.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }

    pub fn clear(&mut self) {
        self.value = None;
    }
}
