//! Recording transport for tests and offline tooling.

use std::sync::Arc;

use padbridge_errors::TransportError;
use parking_lot::{Mutex, MutexGuard};

use crate::transport::{DeviceHandle, Transport};

/// One report handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReport {
    pub handle: DeviceHandle,
    /// `None` for immediate sends.
    pub delay_ms: Option<u32>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<SentReport>,
    feature_requests: Vec<(DeviceHandle, u8)>,
    fail_with: Option<TransportError>,
}

/// Transport that records every call.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `error`.
    pub fn fail_with(&self, error: TransportError) {
        self.lock().fail_with = Some(error);
    }

    pub fn recover(&self) {
        self.lock().fail_with = None;
    }

    pub fn sent(&self) -> Vec<SentReport> {
        self.lock().sent.clone()
    }

    /// Reports sent to `handle`, bytes only.
    pub fn sent_to(&self, handle: DeviceHandle) -> Vec<Vec<u8>> {
        self.lock()
            .sent
            .iter()
            .filter(|r| r.handle == handle)
            .map(|r| r.bytes.clone())
            .collect()
    }

    pub fn last_sent(&self) -> Option<SentReport> {
        self.lock().sent.last().cloned()
    }

    pub fn feature_requests(&self) -> Vec<(DeviceHandle, u8)> {
        self.lock().feature_requests.clone()
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.sent.clear();
        state.feature_requests.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock()
    }

    fn record(&self, report: SentReport) -> Result<(), TransportError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_with.clone() {
            return Err(err);
        }
        state.sent.push(report);
        Ok(())
    }
}

impl Transport for MockTransport {
    fn send_output_report(
        &self,
        handle: DeviceHandle,
        report: &[u8],
    ) -> Result<(), TransportError> {
        self.record(SentReport {
            handle,
            delay_ms: None,
            bytes: report.to_vec(),
        })
    }

    fn send_output_report_after(
        &self,
        handle: DeviceHandle,
        delay_ms: u32,
        report: &[u8],
    ) -> Result<(), TransportError> {
        self.record(SentReport {
            handle,
            delay_ms: Some(delay_ms),
            bytes: report.to_vec(),
        })
    }

    fn request_feature_report(
        &self,
        handle: DeviceHandle,
        report_id: u8,
    ) -> Result<(), TransportError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_with.clone() {
            return Err(err);
        }
        state.feature_requests.push((handle, report_id));
        Ok(())
    }
}
