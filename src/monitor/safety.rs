use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Operation, OperationObserver, OperationRecord, SOURCE};
use crate::config::{
    BASE_CONFIDENCE, CONSCIOUSNESS_KEYWORDS, CRITICAL_FLAG_COUNT, HARMFUL_KEYWORDS,
    HUGE_INPUT_LEN, INPUT_KEYWORD_PENALTY, LARGE_INPUT_LEN, MonitorConfig,
    OPERATION_KEYWORD_PENALTY,
};
use crate::error::{MonitorError, VectorError};

/// A single monitored operation with its assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Seconds since the UNIX epoch.
    pub timestamp: f64,
    pub operation: String,
    pub input_data: Value,
    pub output_data: Value,
    pub confidence: f64,
    pub safety_score: f64,
    pub ethical_flags: Vec<String>,
    pub decision_path: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Active,
    NoStates,
}

/// Summary of the most recent records of a monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub status: ReportStatus,
    pub total_operations: usize,
    pub recent_operations: usize,
    pub average_safety_score: Option<f64>,
    pub average_confidence: Option<f64>,
    pub ethical_flags_count: usize,
    pub safety_violations: usize,
    pub last_operation: Option<String>,
    pub last_timestamp: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Warning,
    Critical,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SafetyLevel::Safe => "safe",
            SafetyLevel::Caution => "caution",
            SafetyLevel::Warning => "warning",
            SafetyLevel::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// Result of [`SafetyMonitor::check_safety`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyStatus {
    pub status: SafetyLevel,
    pub safety_score: f64,
    pub violations: usize,
    pub ethical_flags: usize,
    pub recommendations: Vec<String>,
    pub consciousness_alert: bool,
}

/// Records monitored operations and scores them against a keyword list.
///
/// Scoring never feeds back into the operations being observed. The
/// record buffer is behind a mutex so one monitor can be shared between
/// threads.
#[derive(Debug)]
pub struct SafetyMonitor {
    config: MonitorConfig,
    states: Mutex<VecDeque<MonitorState>>,
}

impl Default for SafetyMonitor {
    fn default() -> Self {
        SafetyMonitor::with_config(MonitorConfig::default())
    }
}

impl SafetyMonitor {
    pub fn new() -> Self {
        SafetyMonitor::default()
    }

    pub fn with_config(config: MonitorConfig) -> Self {
        SafetyMonitor {
            config,
            states: Mutex::new(VecDeque::new()),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Assesses and stores one operation, returning the stored state.
    pub fn monitor_operation(
        &self,
        operation: &str,
        inputs: Value,
        outputs: Value,
        source: Option<&str>,
        context: Option<&str>,
    ) -> MonitorState {
        let input_text = inputs.to_string().to_lowercase();
        let state = MonitorState {
            timestamp: now(),
            operation: operation.to_string(),
            confidence: confidence(&input_text),
            safety_score: self.safety_score(operation, &input_text),
            ethical_flags: ethical_flags(operation, &input_text),
            decision_path: decision_path(operation, source, context),
            input_data: inputs,
            output_data: outputs,
        };

        self.store(state.clone());
        if state.safety_score < self.config.safety_threshold {
            tracing::warn!(
                operation = %state.operation,
                safety_score = state.safety_score,
                ethical_flags = ?state.ethical_flags,
                "safety violation detected"
            );
        }
        state
    }

    fn safety_score(&self, operation: &str, input_text: &str) -> f64 {
        let operation = operation.to_lowercase();
        let mut score: f64 = 1.0;
        for keyword in &self.config.safety_keywords {
            if operation.contains(keyword.as_str()) {
                score -= OPERATION_KEYWORD_PENALTY;
            }
        }
        for keyword in &self.config.safety_keywords {
            if input_text.contains(keyword.as_str()) {
                score -= INPUT_KEYWORD_PENALTY;
            }
        }
        score.clamp(0.0, 1.0)
    }

    fn store(&self, state: MonitorState) {
        let mut states = self.lock();
        tracing::debug!(operation = %state.operation, "stored monitor state");
        states.push_back(state);
        while states.len() > self.config.max_states {
            states.pop_front();
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<MonitorState>> {
        self.states.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the retained states, oldest first.
    pub fn states(&self) -> Vec<MonitorState> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn report(&self) -> MonitorReport {
        let states = self.lock();
        let total = states.len();
        if total == 0 {
            return MonitorReport {
                status: ReportStatus::NoStates,
                total_operations: 0,
                recent_operations: 0,
                average_safety_score: None,
                average_confidence: None,
                ethical_flags_count: 0,
                safety_violations: 0,
                last_operation: None,
                last_timestamp: None,
            };
        }

        let recent: Vec<&MonitorState> = states
            .iter()
            .skip(total.saturating_sub(self.config.report_window.max(1)))
            .collect();
        let count = recent.len() as f64;
        let last = recent.last();
        MonitorReport {
            status: ReportStatus::Active,
            total_operations: total,
            recent_operations: recent.len(),
            average_safety_score: Some(recent.iter().map(|s| s.safety_score).sum::<f64>() / count),
            average_confidence: Some(recent.iter().map(|s| s.confidence).sum::<f64>() / count),
            ethical_flags_count: recent.iter().map(|s| s.ethical_flags.len()).sum(),
            safety_violations: recent
                .iter()
                .filter(|s| s.safety_score < self.config.safety_threshold)
                .count(),
            last_operation: last.map(|s| s.operation.clone()),
            last_timestamp: last.map(|s| s.timestamp),
        }
    }

    /// Classifies the monitor's recent history and records the check itself.
    pub fn check_safety(&self, context: &str) -> SafetyStatus {
        let report = self.report();
        let mut status = SafetyStatus {
            status: SafetyLevel::Safe,
            safety_score: report.average_safety_score.unwrap_or(1.0),
            violations: report.safety_violations,
            ethical_flags: report.ethical_flags_count,
            recommendations: Vec::new(),
            consciousness_alert: false,
        };

        if status.safety_score < self.config.safety_threshold {
            status.status = SafetyLevel::Caution;
            status.recommendations.push("Enhanced monitoring required".to_string());
        }
        if status.violations > 0 {
            status.status = SafetyLevel::Warning;
            status.recommendations.push("Safety violations detected".to_string());
        }
        if status.ethical_flags > CRITICAL_FLAG_COUNT {
            status.status = SafetyLevel::Critical;
            status
                .recommendations
                .push("Multiple ethical concerns flagged".to_string());
        }
        if context.to_lowercase().contains("conscious") {
            status.consciousness_alert = true;
            status
                .recommendations
                .push("Consciousness-related operation detected".to_string());
        }

        let outputs = serde_json::to_value(&status).unwrap_or(Value::Null);
        self.monitor_operation(
            "safety_check",
            json!({ "context": context }),
            outputs,
            Some(SOURCE),
            Some("safety_system"),
        );
        status
    }

    /// Writes all retained states as a pretty-printed JSON array.
    pub fn export_states<W: Write>(&self, writer: W) -> Result<usize, MonitorError> {
        let states = self.states();
        serde_json::to_writer_pretty(writer, &states)?;
        Ok(states.len())
    }

    /// Exports to `path`, or to `monitor_states_<unix secs>.json` when none is given.
    pub fn export_states_to_path(&self, path: Option<&Path>) -> Result<PathBuf, MonitorError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(format!("monitor_states_{}.json", now() as u64)),
        };
        let mut writer = BufWriter::new(File::create(&path)?);
        let count = self.export_states(&mut writer)?;
        writer.flush()?;
        tracing::info!(count, path = %path.display(), "exported monitor states");
        Ok(path)
    }
}

impl OperationObserver for SafetyMonitor {
    fn after(&self, record: &OperationRecord) {
        let mut inputs = serde_json::Map::new();
        for (i, input) in record.inputs.iter().enumerate() {
            let key = if record.inputs.len() == 1 {
                "vector".to_string()
            } else {
                format!("vector{}", i + 1)
            };
            inputs.insert(key, Value::String(input.clone()));
        }

        let outputs = match &record.outcome {
            Ok(value) => match record.operation {
                Operation::AngleBetween => json!({
                    "angle_radians": value,
                    "angle_degrees": value.to_degrees(),
                }),
                Operation::Dot => json!({ "result": value, "magnitude": value.abs() }),
                Operation::Magnitude => json!({ "result": value }),
            },
            Err(VectorError::ZeroVector) => json!({ "error": "zero_vector_detected" }),
            Err(error) => {
                inputs.insert("error".to_string(), Value::String(error.to_string()));
                json!({ "error_type": error_kind(error) })
            }
        };

        self.monitor_operation(
            record.name(),
            Value::Object(inputs),
            outputs,
            Some(SOURCE),
            Some(record.context()),
        );
    }
}

fn error_kind(error: &VectorError) -> &'static str {
    match error {
        VectorError::Dimension { .. } => "DimensionError",
        VectorError::TypeConversion { .. } => "TypeConversionError",
        VectorError::ZeroVector => "ZeroVectorError",
    }
}

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

fn confidence(input_text: &str) -> f64 {
    let len = input_text.len();
    let mut confidence = BASE_CONFIDENCE;
    if len > HUGE_INPUT_LEN {
        confidence -= 0.2;
    } else if len > LARGE_INPUT_LEN {
        confidence -= 0.1;
    }
    confidence
}

fn ethical_flags(operation: &str, input_text: &str) -> Vec<String> {
    let operation = operation.to_lowercase();
    let mut flags = Vec::new();
    if CONSCIOUSNESS_KEYWORDS.iter().any(|k| operation.contains(k)) {
        flags.push("consciousness_operation".to_string());
    }
    if HARMFUL_KEYWORDS.iter().any(|k| input_text.contains(k)) {
        flags.push("potentially_harmful_input".to_string());
    }
    if input_text.contains("researcher") && input_text.contains("kill") {
        flags.push("research_ethics_violation".to_string());
    }
    flags
}

fn decision_path(operation: &str, source: Option<&str>, context: Option<&str>) -> Vec<String> {
    let mut path = vec![
        "operation_monitor".to_string(),
        format!("operation:{operation}"),
    ];
    if let Some(source) = source {
        path.push(format!("source:{source}"));
    }
    if let Some(context) = context {
        path.push(format!("context:{context}"));
    }
    path
}

static GLOBAL_MONITOR: OnceLock<SafetyMonitor> = OnceLock::new();

/// The process-wide monitor, created with default settings on first use.
pub fn global_monitor() -> &'static SafetyMonitor {
    GLOBAL_MONITOR.get_or_init(SafetyMonitor::default)
}

/// Records an operation on the process-wide monitor.
pub fn monitor_operation(
    operation: &str,
    inputs: Value,
    outputs: Value,
    source: Option<&str>,
    context: Option<&str>,
) -> MonitorState {
    global_monitor().monitor_operation(operation, inputs, outputs, source, context)
}
