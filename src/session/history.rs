use crate::call::{CallRecord, CallStatus, TranscriptOutcome};

/// Chronological, append-only list of calls placed in one operator session
#[derive(Debug, Clone, Default)]
pub struct CallHistory {
    records: Vec<CallRecord>,
}

impl CallHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CallRecord) {
        self.records.push(record);
    }

    /// Oldest first
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Most recently placed call
    pub fn latest(&self) -> Option<&CallRecord> {
        self.records.last()
    }

    pub fn find(&self, session_id: &str) -> Option<&CallRecord> {
        self.records.iter().find(|r| r.session_id == session_id)
    }

    /// Store a retrieved transcript on the matching record
    pub fn attach_transcript(&mut self, session_id: &str, outcome: TranscriptOutcome) -> Option<&CallRecord> {
        let record = self.records.iter_mut().find(|r| r.session_id == session_id)?;
        record.attach_transcript(outcome);
        Some(record)
    }

    pub fn completed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == CallStatus::Completed)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
