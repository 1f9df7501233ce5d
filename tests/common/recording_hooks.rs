//! Hooks that record every call for later assertions

#![allow(dead_code)]

use async_trait::async_trait;
use diffpost::error::Error;
use diffpost::submit::SubmitHooks;
use diffpost::transport::TransportResponse;
use diffpost::types::FormData;
use std::sync::Mutex;

/// One recorded hook call
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    Success {
        data: FormData,
        status: Option<u16>,
    },
    Failure {
        data: FormData,
        status: Option<u16>,
    },
    Error(String),
    Mutate(FormData),
    Reset(Option<FormData>),
}

/// Hooks that record calls in order
#[derive(Default)]
pub struct RecordingHooks {
    calls: Mutex<Vec<HookCall>>,
    mutate: bool,
}

impl RecordingHooks {
    /// Record calls, with `mutate` enabled
    pub fn with_mutate() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            mutate: true,
        }
    }

    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn successes(&self) -> usize {
        self.count(|c| matches!(c, HookCall::Success { .. }))
    }

    pub fn failures(&self) -> usize {
        self.count(|c| matches!(c, HookCall::Failure { .. }))
    }

    pub fn errors(&self) -> usize {
        self.count(|c| matches!(c, HookCall::Error(_)))
    }

    pub fn mutations(&self) -> Vec<FormData> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HookCall::Mutate(data) => Some(data),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&HookCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: HookCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SubmitHooks for RecordingHooks {
    async fn on_success(&self, data: &FormData, response: Option<&TransportResponse>) {
        self.push(HookCall::Success {
            data: data.clone(),
            status: response.map(|r| r.status),
        });
    }

    async fn on_failure(&self, data: &FormData, response: Option<&TransportResponse>) {
        self.push(HookCall::Failure {
            data: data.clone(),
            status: response.map(|r| r.status),
        });
    }

    async fn on_error(&self, error: &Error) {
        self.push(HookCall::Error(error.to_string()));
    }

    async fn mutate(&self, data: &FormData) {
        self.push(HookCall::Mutate(data.clone()));
    }

    async fn reset(&self, raw: Option<&FormData>) {
        self.push(HookCall::Reset(raw.cloned()));
    }

    fn wants_mutate(&self) -> bool {
        self.mutate
    }
}
