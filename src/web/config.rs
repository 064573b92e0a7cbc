use serde::Serialize;
use std::path::PathBuf;

use crate::core::session::SessionDocument;
use crate::core::types::{IGV_VERSION, TOOL_ID};

/// Configuration handed to the viewer page and API handlers.
///
/// Built once at startup, then shared read-only by every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub name: String,
    pub tool_version: String,
    pub igv_version: String,

    /// Session loaded by the viewer on start, `None` lets igv.js pick its default genome
    pub session: Option<serde_json::Value>,

    /// Started by Galaxy as an interactive tool
    pub gxit: bool,

    /// Whether the viewer may post its session back to be saved
    pub can_save_session: bool,

    #[serde(skip)]
    pub dump_session: Option<PathBuf>,
}

impl ViewerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: TOOL_ID.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            igv_version: IGV_VERSION.to_string(),
            session: None,
            gxit: false,
            can_save_session: false,
            dump_session: None,
        }
    }

    /// Use a session built from the staged files
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be converted to JSON.
    pub fn with_built_session(self, session: &SessionDocument) -> serde_json::Result<Self> {
        Ok(self.with_session(serde_json::to_value(session)?))
    }

    /// Use an arbitrary igv.js session, e.g. one loaded from `--igv-session`
    #[must_use]
    pub fn with_session(mut self, session: serde_json::Value) -> Self {
        self.session = Some(session);
        self
    }

    /// Mark the server as launched by Galaxy, optionally saving sessions to `dump_session`
    #[must_use]
    pub fn with_gxit(mut self, dump_session: Option<PathBuf>) -> Self {
        self.gxit = true;
        self.can_save_session = dump_session.is_some();
        self.dump_session = dump_session;
        self
    }

    /// JSON for embedding inside an HTML `<script>` element.
    ///
    /// `<` is escaped so that no string value can close the element.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_embedded_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self).map(|json| json.replace('<', "\\u003c"))
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}
