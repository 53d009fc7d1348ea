//! Title Resolver — derives the display title of a tab.
//!
//! Browsers often report titles such as `"Docs - https://example.com"`; the
//! trailing ` - <url>` is dropped. Vivaldi's internal pages (host
//! `vivaldi-webui`) get fixed titles instead of whatever the page reports.

use url::Url;

use crate::types::errors::TitleError;
use crate::types::tab::TabRecord;

/// Host of Vivaldi's internal web UI pages.
pub const WEBUI_HOST: &str = "vivaldi-webui";

/// Title for the start page and any unrecognised internal page.
/// The trailing space is kept for compatibility with existing consumers.
pub const NEW_TAB_TITLE: &str = "Vivaldi: New tab ";

/// Title for the start page's history section.
pub const HISTORY_TITLE: &str = "Vivaldi: History";

const STARTPAGE_PATH: &str = "/startpage";

pub struct TitleResolver;

impl TitleResolver {
    /// Resolves the display title, failing if the tab URL does not parse.
    pub fn resolve(tab: &TabRecord) -> Result<String, TitleError> {
        let title = Self::strip_url_suffix(tab);
        let Some(raw) = tab.url() else {
            return Ok(title);
        };

        let url = Url::parse(raw).map_err(|_| TitleError::MalformedUrl(raw.to_string()))?;
        if host_with_port(&url).as_deref() != Some(WEBUI_HOST) {
            return Ok(title);
        }

        let section = url
            .query_pairs()
            .find(|(key, _)| key == "section")
            .map(|(_, value)| value.into_owned());
        let title = match (url.path(), section.as_deref()) {
            (STARTPAGE_PATH, Some("history")) => HISTORY_TITLE,
            (STARTPAGE_PATH, Some("Speed-dials")) => NEW_TAB_TITLE,
            _ => NEW_TAB_TITLE,
        };
        Ok(title.to_string())
    }

    /// Resolves the display title, falling back to the suffix-stripped title
    /// when the URL is malformed.
    pub fn display_title(tab: &TabRecord) -> String {
        match Self::resolve(tab) {
            Ok(title) => title,
            Err(e) => {
                log::warn!("{}; using page title", e);
                Self::strip_url_suffix(tab)
            }
        }
    }

    /// Removes a trailing `" - <url>"` from the tab title.
    pub fn strip_url_suffix(tab: &TabRecord) -> String {
        let Some(url) = tab.url() else {
            return tab.title.clone();
        };
        let suffix = format!(" - {}", url);
        tab.title
            .strip_suffix(suffix.as_str())
            .unwrap_or(&tab.title)
            .to_string()
    }
}

/// `host[:port]`, matching what a browser reports as `URL.host`.
fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
