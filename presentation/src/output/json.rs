//! JSON output
//!
//! The transcript export with the run status added under `outcome`. Unknown
//! fields are ignored on load, so the output can be passed to `--replay`.

use super::formatter::OutputFormatter;
use debate_application::DebateStatus;
use debate_domain::TranscriptExport;
use serde_json::Value;

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_value(export: &TranscriptExport, status: DebateStatus) -> Value {
        let mut value = serde_json::to_value(export).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut value
            && let Ok(status) = serde_json::to_value(status)
        {
            map.insert("outcome".to_string(), status);
        }
        value
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, export: &TranscriptExport, status: DebateStatus) -> String {
        serde_json::to_string_pretty(&Self::to_value(export, status))
            .unwrap_or_else(|_| "{}".to_string())
    }
}
