//! Declarative reveal timelines.
//!
//! Staged presentation (the envelope opening, the composer fading in) is
//! a finite sequence of timed visibility transitions. Representing it as
//! a list of `{delay, state}` pairs keeps the sequencing independent of
//! any rendering technology: a renderer asks which state applies at an
//! elapsed time and draws that.

use std::time::Duration;

/// One transition: after `delay` from the start, enter `state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep<S> {
    pub delay: Duration,
    pub state: S,
}

/// An ordered sequence of timed state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<S> {
    steps: Vec<TimelineStep<S>>,
}

impl<S: Copy> Timeline<S> {
    /// Build a timeline from `{delay, state}` pairs.
    ///
    /// Steps are sorted by delay; ties keep their given order.
    pub fn new(mut steps: Vec<TimelineStep<S>>) -> Self {
        steps.sort_by_key(|step| step.delay);
        Self { steps }
    }

    /// The state in effect at `elapsed`, or None before the first step.
    pub fn state_at(&self, elapsed: Duration) -> Option<S> {
        self.steps
            .iter()
            .take_while(|step| step.delay <= elapsed)
            .last()
            .map(|step| step.state)
    }

    /// Delay of the final transition.
    pub fn total(&self) -> Duration {
        self.steps.last().map(|s| s.delay).unwrap_or(Duration::ZERO)
    }

    /// The transitions, in order.
    pub fn steps(&self) -> &[TimelineStep<S>] {
        &self.steps
    }
}

/// Stages of the letter reveal on the view page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStage {
    /// Envelope shown, still sealed.
    EnvelopeSealed,
    /// Envelope opens and the card slides out.
    EnvelopeOpening,
    /// The letter content is visible.
    LetterShown,
}

impl RevealStage {
    /// The standard reveal: sealed at once, opening at 1.5s, letter at 3.9s.
    pub fn timeline() -> Timeline<Self> {
        Timeline::new(vec![
            TimelineStep {
                delay: Duration::ZERO,
                state: Self::EnvelopeSealed,
            },
            TimelineStep {
                delay: Duration::from_millis(1500),
                state: Self::EnvelopeOpening,
            },
            TimelineStep {
                delay: Duration::from_millis(3900),
                state: Self::LetterShown,
            },
        ])
    }
}

/// Stages of the composer fade-in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStage {
    /// Nothing visible yet.
    Blank,
    /// Title line visible.
    Title,
    /// Title gone, message box visible.
    Message,
    /// Address inputs visible too.
    Details,
}

impl ComposeStage {
    /// The standard composer cascade.
    pub fn timeline() -> Timeline<Self> {
        Timeline::new(vec![
            TimelineStep {
                delay: Duration::ZERO,
                state: Self::Blank,
            },
            TimelineStep {
                delay: Duration::from_millis(600),
                state: Self::Title,
            },
            TimelineStep {
                delay: Duration::from_millis(3600),
                state: Self::Message,
            },
            TimelineStep {
                delay: Duration::from_millis(4600),
                state: Self::Details,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_at_boundaries() {
        let timeline = RevealStage::timeline();

        assert_eq!(
            timeline.state_at(Duration::ZERO),
            Some(RevealStage::EnvelopeSealed)
        );
        assert_eq!(
            timeline.state_at(Duration::from_millis(1499)),
            Some(RevealStage::EnvelopeSealed)
        );
        assert_eq!(
            timeline.state_at(Duration::from_millis(1500)),
            Some(RevealStage::EnvelopeOpening)
        );
        assert_eq!(
            timeline.state_at(Duration::from_secs(60)),
            Some(RevealStage::LetterShown)
        );
    }

    #[test]
    fn test_unsorted_steps_are_ordered() {
        let timeline = Timeline::new(vec![
            TimelineStep {
                delay: Duration::from_millis(200),
                state: 2,
            },
            TimelineStep {
                delay: Duration::from_millis(100),
                state: 1,
            },
        ]);

        assert_eq!(timeline.state_at(Duration::from_millis(150)), Some(1));
        assert_eq!(timeline.total(), Duration::from_millis(200));
    }

    #[test]
    fn test_empty_timeline() {
        let timeline: Timeline<u8> = Timeline::new(Vec::new());
        assert_eq!(timeline.state_at(Duration::from_secs(1)), None);
        assert_eq!(timeline.total(), Duration::ZERO);
    }

    #[test]
    fn test_compose_cascade_order() {
        let timeline = ComposeStage::timeline();
        assert_eq!(
            timeline.state_at(Duration::from_millis(1000)),
            Some(ComposeStage::Title)
        );
        assert_eq!(
            timeline.state_at(Duration::from_millis(4000)),
            Some(ComposeStage::Message)
        );
        assert_eq!(timeline.total(), Duration::from_millis(4600));
    }
}
