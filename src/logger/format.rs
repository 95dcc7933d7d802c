//! Invocation log formats
//!
//! Two record shapes get written by the host:
//! - `InvocationLogEntry`: one line per function invocation, rendered as
//!   `json` (the default) or `plain`
//! - `FunctionLogRecord`: a structured record a function emits from inside
//!   its own handler, always rendered as JSON

use chrono::Local;

/// One function invocation, as seen by the hosting layer.
#[derive(Debug, Clone)]
pub struct InvocationLogEntry {
    /// Endpoint name without the leading slash (e.g. `helloWorld`)
    pub function: String,
    /// Client address
    pub remote_addr: String,
    /// Invocation timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Invocation processing time in microseconds
    pub duration_us: u64,
}

impl InvocationLogEntry {
    /// Create a new entry with the current timestamp
    pub fn new(function: &str, remote_addr: String, method: String, path: String) -> Self {
        Self {
            function: function.to_string(),
            remote_addr,
            time: Local::now(),
            method,
            path,
            status: 200,
            body_bytes: 0,
            duration_us: 0,
        }
    }

    /// Render the entry in the configured format. Anything other than
    /// `plain` falls back to `json`.
    pub fn format(&self, format: &str) -> String {
        match format {
            "plain" => self.format_plain(),
            _ => self.format_json(),
        }
    }

    /// One human-readable line per invocation
    fn format_plain(&self) -> String {
        format!(
            "[{}] {} {} \"{} {}\" {} {} {}us",
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.remote_addr,
            self.function,
            self.method,
            self.path,
            self.status,
            self.body_bytes,
            self.duration_us,
        )
    }

    /// JSON structured log format
    fn format_json(&self) -> String {
        format!(
            r#"{{"function":"{}","remote_addr":"{}","time":"{}","method":"{}","path":"{}","status":{},"body_bytes":{},"duration_us":{}}}"#,
            escape_json(&self.function),
            escape_json(&self.remote_addr),
            self.time.to_rfc3339(),
            escape_json(&self.method),
            escape_json(&self.path),
            self.status,
            self.body_bytes,
            self.duration_us,
        )
    }
}

/// A structured record emitted from inside a function handler.
#[derive(Debug, Clone)]
pub struct FunctionLogRecord {
    /// Function the record came from
    pub function: String,
    /// Record severity (`INFO`, `ERROR`, ...)
    pub severity: String,
    /// The record's message text
    pub message: String,
    /// Marks the record as machine-parseable structured output
    pub structured_data: bool,
    /// Emission timestamp
    pub time: chrono::DateTime<Local>,
}

impl FunctionLogRecord {
    /// An `INFO`-severity structured record
    pub fn info(function: &str, message: &str) -> Self {
        Self {
            function: function.to_string(),
            severity: "INFO".to_string(),
            message: message.to_string(),
            structured_data: true,
            time: Local::now(),
        }
    }

    /// Structured records are always JSON, whatever the invocation-log
    /// format says.
    pub fn format_json(&self) -> String {
        format!(
            r#"{{"severity":"{}","function":"{}","message":"{}","structuredData":{},"time":"{}"}}"#,
            escape_json(&self.severity),
            escape_json(&self.function),
            escape_json(&self.message),
            self.structured_data,
            self.time.to_rfc3339(),
        )
    }
}

/// Escape special characters for JSON string
fn escape_json(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
