//! Request lifecycle tracking.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifecycle phases for a render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Request received, processing started.
    Start,
    /// HTML template read from disk.
    TemplateLoaded,
    /// Store created and auth state seeded.
    StoreSeeded,
    /// Final markup produced.
    Rendered,
    /// Render produced a navigation instead of markup.
    Redirected,
    /// Document composed and ready to emit.
    Composed,
    /// A terminal error occurred.
    Error(String),
}

impl LifecyclePhase {
    /// Mark name used by `TimingContext`.
    pub fn mark_name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::TemplateLoaded => "template_loaded",
            Self::StoreSeeded => "store_seeded",
            Self::Rendered => "rendered",
            Self::Redirected => "redirected",
            Self::Composed => "composed",
            Self::Error(_) => "error",
        }
    }
}

/// Timing context for observability.
#[derive(Debug, Clone)]
pub struct TimingContext {
    start: Instant,
    marks: HashMap<String, Instant>,
}

impl TimingContext {
    /// Create a new timing context.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            marks: HashMap::new(),
        }
    }

    /// Record a timing mark.
    pub fn mark(&mut self, name: &str) {
        self.marks.insert(name.to_string(), Instant::now());
    }

    /// Record a lifecycle phase.
    pub fn phase(&mut self, phase: &LifecyclePhase) {
        self.mark(phase.mark_name());
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time from start to a recorded mark.
    pub fn since_start(&self, name: &str) -> Option<Duration> {
        self.marks.get(name).map(|t| t.duration_since(self.start))
    }

    /// Time between two recorded marks.
    pub fn between(&self, from: &str, to: &str) -> Option<Duration> {
        let from = self.marks.get(from)?;
        let to = self.marks.get(to)?;
        Some(to.saturating_duration_since(*from))
    }

    /// Time spent in the preload phase and final render, if it finished.
    pub fn render_time(&self) -> Option<Duration> {
        self.between(
            LifecyclePhase::StoreSeeded.mark_name(),
            LifecyclePhase::Rendered.mark_name(),
        )
    }
}

impl Default for TimingContext {
    fn default() -> Self {
        Self::new()
    }
}
