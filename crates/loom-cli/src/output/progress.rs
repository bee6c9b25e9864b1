//! Progress display for staged generation

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use loom_core::PipelineStage;

/// A stderr progress bar driven by stage events.
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    /// Create a bar; hidden when `quiet`.
    pub fn new(quiet: bool) -> Self {
        let bar = ProgressBar::new(100);
        if quiet {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            bar.set_draw_target(ProgressDrawTarget::stderr());
        }
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// Move the bar to the event's stage.
    pub fn update(&self, event: &PipelineStage) {
        self.bar.set_position(u64::from(event.progress));
        self.bar.set_message(event.stage.to_string());
    }

    /// Finish and clear, leaving `message` behind.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Abandon after a failure.
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
