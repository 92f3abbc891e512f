/// Why a single class-record was left out of a catalog. These never abort
/// the run; the extractor logs and counts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SkipReason {
    /// The record has no `ClassName` to derive an id from.
    #[error("record has no ClassName")]
    MissingClassName,

    /// No recognised machine appears in the recipe's producer list.
    #[error("not produced in a known machine")]
    NoProducer,

    /// The recipe belongs to a seasonal event.
    #[error("seasonal event recipe")]
    SeasonalEvent,

    /// The recipe's product list parsed to nothing.
    #[error("recipe has no outputs")]
    NoOutputs,
}

/// Tally of skipped records by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub missing_class_name: usize,
    pub no_producer: usize,
    pub seasonal_event: usize,
    pub no_outputs: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        let slot = match reason {
            SkipReason::MissingClassName => &mut self.missing_class_name,
            SkipReason::NoProducer => &mut self.no_producer,
            SkipReason::SeasonalEvent => &mut self.seasonal_event,
            SkipReason::NoOutputs => &mut self.no_outputs,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        self.missing_class_name + self.no_producer + self.seasonal_event + self.no_outputs
    }
}
