//! Push-only cross-task messaging.

use serde::Serialize;
use serde_json::Value;

/// Channel a task uses to hand values to downstream tasks
pub trait XComChannel {
    fn xcom_push(&mut self, key: &str, value: Value);
}

impl<T: XComChannel + ?Sized> XComChannel for &mut T {
    fn xcom_push(&mut self, key: &str, value: Value) {
        (**self).xcom_push(key, value)
    }
}

/// A single keyed push
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XComPush {
    pub key: String,
    pub value: Value,
}

/// Channel that keeps every push in order
#[derive(Debug, Default)]
pub struct RecordingXCom {
    pushes: Vec<XComPush>,
}

impl RecordingXCom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushes(&self) -> &[XComPush] {
        &self.pushes
    }

    /// Latest value pushed under `key`
    pub fn pull(&self, key: &str) -> Option<&Value> {
        self.pushes
            .iter()
            .rev()
            .find(|push| push.key == key)
            .map(|push| &push.value)
    }

    pub fn into_pushes(self) -> Vec<XComPush> {
        self.pushes
    }
}

impl XComChannel for RecordingXCom {
    fn xcom_push(&mut self, key: &str, value: Value) {
        tracing::debug!(key, value = %value, "XCom push");
        self.pushes.push(XComPush {
            key: key.to_string(),
            value,
        });
    }
}
