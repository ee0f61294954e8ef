use std::time::Instant;

use super::{CancelToken, DisplaySink, ReadLimit, SensorSource, Sequence, Symbol, SymbolClassifier};
use crate::error::{ReadError, SequenceError, SessionError};

/// Parameters for one polling read.
pub(crate) struct PollRequest<'a> {
    pub classifier: &'a SymbolClassifier,
    pub limit: ReadLimit,
    pub cancel: Option<&'a CancelToken>,
    /// Last accepted color; a sample equal to it is ignored.
    pub previous: Option<Symbol>,
    /// Slot being read, reported on timeout.
    pub slot: usize,
}

/// Poll `sensor` until it shows a color different from `previous`.
pub(crate) fn poll_symbol<S: SensorSource + ?Sized>(
    sensor: &mut S,
    request: PollRequest<'_>,
) -> Result<Symbol, ReadError> {
    let deadline = request.limit.deadline_from(Instant::now());

    loop {
        if request.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ReadError::Cancelled);
        }

        let reading = sensor.sample();
        if let Some(symbol) = request.classifier.classify(&reading) {
            if Some(symbol) != request.previous {
                return Ok(symbol);
            }
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(ReadError::Timeout { slot: request.slot });
        }
    }
}

/// Assembles a guess one slot at a time from sensor readings.
///
/// A slot is accepted only when the sensor shows a color different from the
/// previous slot's. Holding the same card in place reads the same color over
/// and over, and there is no separate "commit" input, so the same color can
/// never be entered twice in a row. Guesses therefore obey the same adjacency
/// rule as targets.
#[derive(Debug, Clone, Default)]
pub struct GuessCollector {
    classifier: SymbolClassifier,
    limit: ReadLimit,
    cancel: Option<CancelToken>,
}

impl GuessCollector {
    pub fn new(classifier: SymbolClassifier, limit: ReadLimit) -> Self {
        GuessCollector {
            classifier,
            limit,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn classifier(&self) -> &SymbolClassifier {
        &self.classifier
    }

    pub fn limit(&self) -> ReadLimit {
        self.limit
    }

    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    /// Collect a full guess of exactly `length` slots, rendering each accepted
    /// color. The read limit applies per slot. A zero length is rejected
    /// before the sensor is touched.
    pub fn collect<S, D>(
        &self,
        sensor: &mut S,
        display: &mut D,
        length: usize,
    ) -> Result<Sequence, SessionError>
    where
        S: SensorSource + ?Sized,
        D: DisplaySink + ?Sized,
    {
        if length == 0 {
            return Err(SequenceError::Empty.into());
        }
        let mut guess = Vec::with_capacity(length);
        let mut previous = None;

        for slot in 0..length {
            let symbol = poll_symbol(
                sensor,
                PollRequest {
                    classifier: &self.classifier,
                    limit: self.limit,
                    cancel: self.cancel.as_ref(),
                    previous,
                    slot,
                },
            )
            .inspect_err(|err| tracing::warn!(slot, %err, "guess collection aborted"))?;

            tracing::debug!(slot, card = symbol.name(), "slot accepted");
            display.render_symbol(slot, symbol);
            guess.push(symbol);
            previous = Some(symbol);
        }

        Ok(Sequence::from_checked(guess))
    }
}
