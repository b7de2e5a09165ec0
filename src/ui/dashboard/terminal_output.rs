//! Append-only console buffer with a typewriter reveal.
//!
//! The animation is cooperative: the event loop calls [`TerminalOutput::tick`]
//! every frame and the buffer reveals one character per elapsed period.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Typewriter {
    pending: Vec<char>,
    index: usize,
    next_due: Instant,
}

#[derive(Debug, Clone)]
pub struct TerminalOutput {
    content: String,
    period: Duration,
    animation: Option<Typewriter>,
}

impl TerminalOutput {
    pub fn new(period: Duration) -> Self {
        Self {
            content: String::new(),
            period: period.max(Duration::from_millis(1)),
            animation: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Append text immediately as a new line, or start a typewriter reveal.
    ///
    /// Either way an in-flight reveal is cancelled first: what it already
    /// revealed stays, the rest is discarded.
    pub fn append_text(&mut self, text: &str, typewriter: bool) {
        self.cancel_animation();

        if typewriter {
            self.start_typewriter(text, Instant::now());
        } else {
            if !self.content.is_empty() {
                self.content.push('\n');
            }
            self.content.push_str(text);
        }
    }

    /// Start a reveal whose first character is due at `now`.
    pub fn start_typewriter(&mut self, text: &str, now: Instant) {
        self.cancel_animation();

        if text.is_empty() {
            return;
        }

        // A new message starts on its own line
        let mut pending = Vec::with_capacity(text.len() + 1);
        if !self.content.is_empty() {
            pending.push('\n');
        }
        pending.extend(text.chars());

        self.animation = Some(Typewriter {
            pending,
            index: 0,
            next_due: now,
        });
    }

    /// Reveal every character whose time has come. Returns true when the
    /// buffer changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };

        let mut changed = false;
        while anim.index < anim.pending.len() && anim.next_due <= now {
            self.content.push(anim.pending[anim.index]);
            anim.index += 1;
            anim.next_due += self.period;
            changed = true;
        }

        if anim.index >= anim.pending.len() {
            self.animation = None;
        }

        changed
    }

    /// Reveal the rest of an in-flight animation at once.
    pub fn finish(&mut self) {
        if let Some(anim) = self.animation.take() {
            self.content.extend(&anim.pending[anim.index..]);
        }
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.animation = None;
    }

    /// Delay between revealed characters, applied to an in-flight reveal too.
    pub fn set_speed(&mut self, period: Duration) {
        self.period = period.max(Duration::from_millis(1));
    }

    pub fn speed(&self) -> Duration {
        self.period
    }

    fn cancel_animation(&mut self) {
        if self.animation.take().is_some() {
            log::trace!("Typewriter animation cancelled");
        }
    }
}
