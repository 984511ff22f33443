use crate::messages::MessageKind;
use crate::RULE_ID;
use ir::{Meta, NodeId, SyntaxNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A single finding of the rule, anchored at a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub rule_id: String,
    pub message: MessageKind,
    /// Node the finding is reported on.
    pub anchor: NodeId,
    /// Location of the anchor.
    pub meta: Meta,
    /// Values for the placeholders of `message`.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl DiagnosticRecord {
    /// Message text with every `{{name}}` placeholder filled from `data`.
    pub fn render(&self) -> String {
        let mut out = self.message.template().to_string();
        for (key, value) in &self.data {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        out
    }
}

/// Receives findings in traversal order.
pub trait DiagnosticSink {
    fn report(&mut self, record: DiagnosticRecord);
}

impl DiagnosticSink for Vec<DiagnosticRecord> {
    fn report(&mut self, record: DiagnosticRecord) {
        self.push(record);
    }
}

type RecordKey = (NodeId, MessageKind, BTreeMap<String, String>);

/// Builds records and forwards them to a sink, dropping exact repeats of a
/// record already emitted during the pass.
pub struct Emitter<'s> {
    sink: &'s mut dyn DiagnosticSink,
    seen: HashSet<RecordKey>,
    emitted: usize,
}

impl<'s> Emitter<'s> {
    pub fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            seen: HashSet::new(),
            emitted: 0,
        }
    }

    /// Reports `message` on `anchor`. Returns false when the same record was
    /// already emitted.
    pub fn report<I>(&mut self, anchor: &SyntaxNode, message: MessageKind, data: I) -> bool
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let record = DiagnosticRecord {
            rule_id: RULE_ID.to_string(),
            message,
            anchor: anchor.id,
            meta: anchor.meta.clone(),
            data: data.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        };
        self.emit(record)
    }

    pub fn emit(&mut self, record: DiagnosticRecord) -> bool {
        let key = (record.anchor, record.message, record.data.clone());
        if !self.seen.insert(key) {
            debug!(node = record.anchor, message = %record.message, "duplicate diagnostic dropped");
            return false;
        }
        self.emitted += 1;
        self.sink.report(record);
        true
    }

    /// Number of records forwarded to the sink so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}
