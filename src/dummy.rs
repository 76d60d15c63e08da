//! Dummy — the sample value type shipped with every generated project.

/// A two-part greeting. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dummy {
    greeting: String,
    target: String,
}

impl Dummy {
    /// A dummy with nothing to say.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store both parts verbatim.
    pub fn with_greeting(greeting: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            target: target.into(),
        }
    }

    /// True when neither part carries any text.
    pub fn speechless(&self) -> bool {
        self.greeting.is_empty() && self.target.is_empty()
    }

    /// `"<greeting> <target>"`, or an empty string for a speechless dummy.
    pub fn say_hello(&self) -> String {
        if self.speechless() {
            return String::new();
        }
        format!("{} {}", self.greeting, self.target)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
