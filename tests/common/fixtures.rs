//! Test data factories for diffpost types
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use diffpost::error::Result;
use diffpost::submit::{Confirmer, SubmitEvent};
use std::collections::VecDeque;
use std::sync::Mutex;
use diffpost::types::{FieldValue, FileValue, FormData};

/// Build form data from JSON literals (strings become text fields)
pub fn form(pairs: &[(&str, serde_json::Value)]) -> FormData {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), FieldValue::from(v.clone())))
        .collect()
}

/// Baseline used throughout: `{name: "Nir", age: 30}`
pub fn nir_baseline() -> FormData {
    form(&[
        ("name", serde_json::json!("Nir")),
        ("age", serde_json::json!(30)),
    ])
}

/// A text file with a fixed timestamp
pub fn make_file(name: &str, contents: &str) -> FileValue {
    FileValue::new(
        name,
        "text/plain",
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        contents.as_bytes().to_vec(),
    )
}

/// Triggering event that records whether its default was prevented
#[derive(Debug, Default)]
pub struct TestEvent {
    pub prevented: bool,
}

impl SubmitEvent for TestEvent {
    fn prevent_default(&mut self) {
        self.prevented = true;
    }
}

/// Confirmer that replays a fixed sequence of answers, then declines
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Messages the user was prompted with
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(message.to_string());
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }
}
