//! Spreadsheet data source.
//!
//! One blocking GET against the Sheets values endpoint per lookup — no
//! retry, no backoff; a timeout or HTTP failure surfaces immediately as
//! [`SyncError::Upstream`] with a message the operator of the tool can act
//! on (share the sheet, fix the tab name) instead of a bare status code.
//!
//! The pipeline only sees the [`SheetSource`] trait; tests feed it an
//! in-memory grid.

use crate::error::{SyncError, SyncResult, UpstreamKind};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Fixed fetch range: 31 columns (A..AE), generous row cap, row 0 header.
pub const SHEET_RANGE: &str = "A1:AE500";

pub trait SheetSource {
    /// Fetch the raw cell grid for one tab of one spreadsheet.
    fn fetch_grid(&self, sheet_id: &str, tab: &str) -> SyncResult<Vec<Vec<String>>>;
}

/// Blocking HTTP client for the Google Sheets values API.
pub struct HttpSheetSource {
    agent: ureq::Agent,
    token: String,
}

impl HttpSheetSource {
    /// Build a source around a ready OAuth bearer token. Obtaining the
    /// token from [`Credentials`] is the caller's setup step.
    pub fn new(token: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(15);
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();
        Self {
            agent,
            token: token.into(),
        }
    }
}

#[derive(Deserialize)]
struct ValuesBody {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetSource for HttpSheetSource {
    fn fetch_grid(&self, sheet_id: &str, tab: &str) -> SyncResult<Vec<Vec<String>>> {
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{sheet_id}/values/{tab}!{SHEET_RANGE}"
        );
        log::debug!("fetching sheet {sheet_id} tab '{tab}'");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/json")
            .query("majorDimension", "ROWS")
            .call()
            .map_err(|e| upstream_error(sheet_id, e))?;
        let body: ValuesBody =
            serde_json::from_reader(response.into_reader()).map_err(|e| SyncError::Upstream {
                kind: UpstreamKind::Other,
                message: format!("unreadable values response: {e}"),
            })?;
        Ok(body.values)
    }
}

fn upstream_error(sheet_id: &str, err: ureq::Error) -> SyncError {
    match err {
        ureq::Error::Status(status, _) => classify_status(sheet_id, status),
        ureq::Error::Transport(transport) => SyncError::Upstream {
            kind: UpstreamKind::Other,
            message: format!("transport failure: {transport}"),
        },
    }
}

/// Translate an HTTP status into the specific upstream failure it almost
/// always means for this API.
pub fn classify_status(sheet_id: &str, status: u16) -> SyncError {
    let (kind, message) = match status {
        400 => (
            UpstreamKind::MalformedRange,
            format!("range '{SHEET_RANGE}' rejected; check that the tab name exists"),
        ),
        401 | 403 => (
            UpstreamKind::Permission,
            format!("no access to spreadsheet {sheet_id}; share it with the service account"),
        ),
        404 => (
            UpstreamKind::SheetNotFound,
            format!("spreadsheet {sheet_id} does not exist"),
        ),
        other => (
            UpstreamKind::Other,
            format!("HTTP {other} from the Sheets API"),
        ),
    };
    SyncError::Upstream { kind, message }
}

/// Service-account credentials, the one-time setup precondition for the
/// HTTP source. Accepts either an inline JSON blob or a path to one.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_email: String,
    pub private_key: String,
}

impl Credentials {
    pub fn load(input: &str) -> SyncResult<Self> {
        let raw = if input.trim_start().starts_with('{') {
            input.to_string()
        } else {
            fs::read_to_string(input).map_err(|e| SyncError::SourceUnavailable {
                path: input.to_string(),
                reason: e.to_string(),
            })?
        };
        let mut credentials: Credentials = serde_json::from_str(&raw)?;
        if credentials.client_email.trim().is_empty() {
            return Err(anyhow::anyhow!("credentials missing a client_email field").into());
        }
        if credentials.private_key.trim().is_empty() {
            return Err(anyhow::anyhow!("credentials missing a private_key field").into());
        }
        // Keys pasted through env vars or shell arrive with literal \n
        // sequences; PEM needs real newlines.
        credentials.private_key = credentials.private_key.replace("\\n", "\n");
        Ok(credentials)
    }
}
