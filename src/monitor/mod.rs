//! Optional observation of vector operations.
//!
//! [`Monitored`] runs the plain functions from [`crate::library`] and
//! reports each call to an [`OperationObserver`]. Observers see inputs
//! and outcomes only; the returned value is always the library's own.

mod safety;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorError};
use crate::library;
use crate::vector::AsVector2D;

pub use safety::{
    MonitorReport, MonitorState, ReportStatus, SafetyLevel, SafetyMonitor, SafetyStatus,
    global_monitor, monitor_operation,
};

/// Source tag attached to every record produced by [`Monitored`].
pub const SOURCE: &str = "dot_engine";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Dot,
    Magnitude,
    AngleBetween,
}

impl Operation {
    /// Stable name used in records for a successful call.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Dot => "vector_dot_product",
            Operation::Magnitude => "vector_magnitude",
            Operation::AngleBetween => "vector_angle_calculation",
        }
    }

    /// Stable name used in records for a failed call.
    pub fn error_name(self, error: &VectorError) -> &'static str {
        match (self, error) {
            (Operation::AngleBetween, VectorError::ZeroVector) => "angle_calculation_zero_vector",
            (Operation::Dot, _) => "vector_dot_product_error",
            (Operation::Magnitude, _) => "vector_magnitude_error",
            (Operation::AngleBetween, _) => "vector_angle_calculation_error",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One observed call: what was asked and what came back.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    pub operation: Operation,
    pub inputs: Vec<String>,
    pub outcome: Result<f64>,
}

impl OperationRecord {
    /// Record name, distinguishing failures from successes.
    pub fn name(&self) -> &'static str {
        match &self.outcome {
            Ok(_) => self.operation.name(),
            Err(error) => self.operation.error_name(error),
        }
    }

    /// Fixed classification of the call.
    pub fn context(&self) -> &'static str {
        match (&self.outcome, self.operation) {
            (Err(VectorError::ZeroVector), _) => "safety_concern",
            (Err(_), _) => "error_handling",
            (Ok(_), Operation::AngleBetween) => "geometric_analysis",
            (Ok(_), _) => "navier_stokes_computation",
        }
    }
}

/// Hooks invoked around each monitored operation.
pub trait OperationObserver {
    fn before(&self, _operation: Operation, _inputs: &[String]) {}

    fn after(&self, record: &OperationRecord);
}

impl<O: OperationObserver + ?Sized> OperationObserver for &O {
    fn before(&self, operation: Operation, inputs: &[String]) {
        (**self).before(operation, inputs)
    }

    fn after(&self, record: &OperationRecord) {
        (**self).after(record)
    }
}

impl<O: OperationObserver + ?Sized> OperationObserver for Arc<O> {
    fn before(&self, operation: Operation, inputs: &[String]) {
        (**self).before(operation, inputs)
    }

    fn after(&self, record: &OperationRecord) {
        (**self).after(record)
    }
}

/// Observer that only emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl OperationObserver for LogObserver {
    fn before(&self, operation: Operation, inputs: &[String]) {
        tracing::debug!(%operation, ?inputs, "starting vector operation");
    }

    fn after(&self, record: &OperationRecord) {
        match &record.outcome {
            Ok(value) => tracing::debug!(
                operation = record.name(),
                context = record.context(),
                value,
                "vector operation finished"
            ),
            Err(error) => tracing::debug!(
                operation = record.name(),
                context = record.context(),
                %error,
                "vector operation failed"
            ),
        }
    }
}

/// The vector operations, reported to an observer.
#[derive(Debug, Clone, Default)]
pub struct Monitored<O> {
    observer: O,
}

impl Monitored<&'static SafetyMonitor> {
    /// Operations reported to the process-wide [`SafetyMonitor`].
    pub fn global() -> Self {
        Monitored::new(global_monitor())
    }
}

impl<O: OperationObserver> Monitored<O> {
    pub fn new(observer: O) -> Self {
        Monitored { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn dot<A, B>(&self, vec1: A, vec2: B) -> Result<f64>
    where
        A: AsVector2D + fmt::Debug,
        B: AsVector2D + fmt::Debug,
    {
        let inputs = vec![describe(&vec1), describe(&vec2)];
        self.observe(Operation::Dot, inputs, || library::dot(vec1, vec2))
    }

    pub fn magnitude<V>(&self, vec: V) -> Result<f64>
    where
        V: AsVector2D + fmt::Debug,
    {
        let inputs = vec![describe(&vec)];
        self.observe(Operation::Magnitude, inputs, || library::magnitude(vec))
    }

    pub fn angle_between<A, B>(&self, vec1: A, vec2: B) -> Result<f64>
    where
        A: AsVector2D + fmt::Debug,
        B: AsVector2D + fmt::Debug,
    {
        let inputs = vec![describe(&vec1), describe(&vec2)];
        self.observe(Operation::AngleBetween, inputs, || {
            library::angle_between(vec1, vec2)
        })
    }

    fn observe<F>(&self, operation: Operation, inputs: Vec<String>, f: F) -> Result<f64>
    where
        F: FnOnce() -> Result<f64>,
    {
        self.observer.before(operation, &inputs);
        let outcome = f();
        let record = OperationRecord {
            operation,
            inputs,
            outcome,
        };
        self.observer.after(&record);
        record.outcome
    }
}

fn describe<V: AsVector2D + fmt::Debug>(vec: &V) -> String {
    match vec.to_vector() {
        Ok(vector) => vector.to_string(),
        Err(_) => format!("{vec:?}"),
    }
}
