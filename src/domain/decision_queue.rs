use super::gesture::{classify, ExitMotion, GestureConfig, GestureState};
use super::{Candidate, Decision, DecisionEvent, DecisionSink};
use crate::error::{JswpError, Result};

/// Presents candidates one at a time and turns gestures or button presses
/// into decisions.
///
/// The queue owns its candidate list, a cursor into it, and the sink that
/// receives every committed decision. Undo only rewinds the cursor; decisions
/// already handed to the sink are never retracted, and committing again after
/// an undo emits a second, independent event for the same candidate.
#[derive(Debug)]
pub struct DecisionQueue<C, S> {
    candidates: Vec<C>,
    cursor: usize,
    gesture: GestureState,
    config: GestureConfig,
    last_exit: Option<ExitMotion>,
    sink: S,
}

impl<C, S> DecisionQueue<C, S>
where
    C: Candidate,
    S: DecisionSink<C::Id>,
{
    pub fn new(candidates: Vec<C>, config: GestureConfig, sink: S) -> Self {
        Self {
            candidates,
            cursor: 0,
            gesture: GestureState::neutral(),
            config,
            last_exit: None,
            sink,
        }
    }

    pub fn with_default_threshold(candidates: Vec<C>, sink: S) -> Self {
        Self::new(candidates, GestureConfig::default(), sink)
    }

    /// The candidate under the cursor, or `None` once the queue is exhausted
    pub fn current(&self) -> Option<&C> {
        self.candidates.get(self.cursor)
    }

    /// The candidate after the current one, for "next card" previews
    pub fn peek_next(&self) -> Option<&C> {
        self.candidates.get(self.cursor + 1)
    }

    /// Commits `decision` for the current candidate.
    ///
    /// The sink is invoked while the cursor still points at the committed
    /// candidate; the queue advances once the sink returns. Sink failures are
    /// the sink's concern and do not stop the advance.
    pub fn commit(&mut self, decision: Decision) -> Result<DecisionEvent<C::Id>> {
        let candidate = self.current().ok_or(JswpError::EmptyQueue)?;

        let event = DecisionEvent {
            candidate_id: candidate.candidate_id(),
            decision,
            position: self.cursor,
        };

        tracing::debug!(
            position = self.cursor,
            ?decision,
            candidate = ?event.candidate_id,
            "committing decision"
        );

        self.sink.on_decision(&event);
        self.advance();
        self.last_exit = Some(ExitMotion::for_decision(decision));

        Ok(event)
    }

    /// Moves past the current candidate. Saturates at the end of the list.
    pub fn advance(&mut self) {
        if self.cursor < self.candidates.len() {
            self.cursor += 1;
        }
        self.gesture = GestureState::neutral();
    }

    /// Steps the cursor back one candidate. Returns whether it moved.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        self.gesture = GestureState::neutral();
        self.last_exit = None;
        tracing::debug!(position = self.cursor, "undo");
        true
    }

    pub fn begin_gesture(&mut self) {
        self.gesture = GestureState {
            active: true,
            displacement: 0.0,
        };
        self.last_exit = None;
    }

    pub fn update_gesture(&mut self, displacement: f64) {
        if !self.gesture.active {
            self.begin_gesture();
        }
        self.gesture.displacement = displacement;
    }

    /// Releases the drag.
    ///
    /// Commits when the displacement exceeds the threshold; otherwise the
    /// gesture springs back to neutral and `Ok(None)` is returned.
    pub fn end_gesture(&mut self) -> Result<Option<DecisionEvent<C::Id>>> {
        let displacement = self.gesture.displacement;
        self.gesture = GestureState::neutral();

        match classify(displacement, self.config.threshold) {
            Some(decision) => self.commit(decision).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces the candidate list and rewinds to the first candidate.
    pub fn reset(&mut self, candidates: Vec<C>) {
        tracing::debug!(count = candidates.len(), "resetting decision queue");
        self.candidates = candidates;
        self.cursor = 0;
        self.gesture = GestureState::neutral();
        self.last_exit = None;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Exit motion of the last committed card, cleared by the next interaction
    pub fn last_exit(&self) -> Option<ExitMotion> {
        self.last_exit
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
