/// UI collaborators.
///
/// The frame driver writes the FPS string to a text sink and reads the
/// instancing mode from a toggle. Both are optional; hosts plug in their
/// own widgets.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

/// Settable text output (label, overlay, console line).
pub trait TextSink: Send {
    fn set_text(&mut self, text: &str);
}

/// On/off control.
pub trait Toggle: Send {
    fn is_on(&self) -> bool;
}

/// Text sink that just keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLabel {
    text: String,
}

impl TextLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl TextSink for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

impl<T: TextSink> TextSink for Arc<Mutex<T>> {
    fn set_text(&mut self, text: &str) {
        if let Ok(mut sink) = self.lock() {
            sink.set_text(text);
        }
    }
}

impl Toggle for bool {
    fn is_on(&self) -> bool {
        *self
    }
}

impl Toggle for AtomicBool {
    fn is_on(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Toggle + Sync> Toggle for Arc<T> {
    fn is_on(&self) -> bool {
        (**self).is_on()
    }
}
