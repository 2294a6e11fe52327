//! Progress indicators for long-running operations using indicatif.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::context::UiContext;

const UNICODE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""];
const ASCII_FRAMES: &[&str] = &["|", "/", "-", "\\", ""];

/// A spinner for indeterminate progress, drawn on stderr.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create and start a spinner. Does nothing when animation is not allowed.
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.allows_animation() {
            return Self { bar: None };
        }

        let (template, frames) = if ctx.unicode {
            ("{spinner:.cyan} {msg}...", UNICODE_FRAMES)
        } else {
            ("{spinner} {msg}...", ASCII_FRAMES)
        };
        let style = ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(frames);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    /// Stop and erase the spinner line.
    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Run `work` on a scoped worker thread while a spinner animates.
///
/// Used for key derivation, which takes long enough to need feedback.
/// A panic in `work` is propagated to the caller.
pub fn run_with_spinner<T, F>(ctx: &UiContext, message: &str, work: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let spinner = Spinner::start(ctx, message);
    let outcome = std::thread::scope(|scope| scope.spawn(work).join());
    spinner.clear();
    match outcome {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
