//! Output rendering abstraction for ai.
//!
//! Defines the [`Renderer`] trait that decouples prompt commands and the
//! stream relay from the terminal. [`StdoutRenderer`] prints directly to
//! stdout; tests record the calls instead.

use colored::Colorize;
use std::io::{self, Write};

use crate::constants::{APP_NAME, RESPONSE_SEPARATOR};

/// Sink for everything a prompt command shows the user.
pub trait Renderer {
    /// Echo the system prompt being sent.
    fn render_system_prompt(&mut self, prompt: &str);

    /// Render a single fragment as it arrives. Must be visible before returning.
    fn render_fragment(&mut self, fragment: &str);

    /// Called when the stream has stopped producing fragments.
    fn render_done(&mut self);

    /// Marks the end of one response, success or failure.
    fn render_separator(&mut self);

    /// One-line usage hint for a prompt command invoked without input.
    fn render_usage(&mut self, group: &str, command: &str);
}

/// Renders prompt output directly to stdout.
///
/// Each fragment is printed immediately with an explicit flush so the user
/// sees the response as it is generated. Write errors (a closed pipe) are
/// ignored.
pub struct StdoutRenderer {
    out: Box<dyn Write>,
    fragment_count: usize,
}

impl StdoutRenderer {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    fn with_writer(out: Box<dyn Write>) -> Self {
        Self {
            out,
            fragment_count: 0,
        }
    }
}

impl Renderer for StdoutRenderer {
    fn render_system_prompt(&mut self, prompt: &str) {
        writeln!(self.out, "{} {}", "📝".bold(), prompt.dimmed()).ok();
    }

    fn render_fragment(&mut self, fragment: &str) {
        if self.fragment_count == 0 {
            write!(self.out, " ").ok();
        }
        write!(self.out, "{}", fragment).ok();
        // Flush immediately so each fragment appears as it arrives
        self.out.flush().ok();
        self.fragment_count += 1;
    }

    fn render_done(&mut self) {
        writeln!(self.out).ok();
    }

    fn render_separator(&mut self) {
        writeln!(self.out, "{}", RESPONSE_SEPARATOR).ok();
        self.out.flush().ok();
    }

    fn render_usage(&mut self, group: &str, command: &str) {
        writeln!(self.out, "Usage: {} {} {} <your prompt>", APP_NAME, group, command).ok();
    }
}


#[cfg(test)]
pub mod testing {
    use super::Renderer;

    /// One recorded renderer call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        SystemPrompt(String),
        Fragment(String),
        Done,
        Separator,
        Usage(String, String),
    }

    /// Records every call in order.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub events: Vec<Event>,
    }

    impl RecordingRenderer {
        pub fn fragments(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Fragment(f) => Some(f.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Renderer for RecordingRenderer {
        fn render_system_prompt(&mut self, prompt: &str) {
            self.events.push(Event::SystemPrompt(prompt.to_string()));
        }

        fn render_fragment(&mut self, fragment: &str) {
            self.events.push(Event::Fragment(fragment.to_string()));
        }

        fn render_done(&mut self) {
            self.events.push(Event::Done);
        }

        fn render_separator(&mut self) {
            self.events.push(Event::Separator);
        }

        fn render_usage(&mut self, group: &str, command: &str) {
            self.events
                .push(Event::Usage(group.to_string(), command.to_string()));
        }
    }
}
