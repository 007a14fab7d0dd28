// src/logging.rs

use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;

/// Details of one gateway call, recorded for every request regardless of
/// outcome.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

/// Logs an API call to the `api_calls.log` file.
pub fn log_api_call(entry: &ApiCallLog) {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n",
        entry.timestamp.to_rfc3339(),
        entry.endpoint,
        entry.request_summary,
        entry.response_status,
        entry.response_time_ms
    );

    log::info!(
        "{} {} status={} elapsed={}ms",
        entry.request_summary,
        entry.endpoint,
        entry.response_status,
        entry.response_time_ms
    );

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open("api_calls.log");

    match file {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                log::warn!("Failed to write to api_calls.log: {}", e);
            }
        }
        Err(e) => log::warn!("Failed to open api_calls.log: {}", e),
    }
}
