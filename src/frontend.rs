//! Resolution of the separately built frontend bundle.
//!
//! The bundler writes hashed file names into its `index.html`; pages pick
//! up the current script and stylesheet from there on every render so a
//! rebuilt bundle is served without a restart.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<script[^>]*src="([^"]*\.js)""#).unwrap());
static STYLESHEET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link[^>]*href="([^"]*\.css)""#).unwrap());

/// Public URLs of the bundle entry points. Empty when unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleAssets {
    pub js_url: String,
    pub css_url: String,
}

/// Pull the entry script and stylesheet paths out of the bundle's index.
pub fn parse_index(html: &str) -> (Option<String>, Option<String>) {
    let capture = |re: &Regex| {
        re.captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };
    (capture(&SCRIPT_RE), capture(&STYLESHEET_RE))
}

/// Join a bundle path onto the static URL prefix.
pub fn asset_url(static_url: &str, asset_path: &str) -> String {
    if asset_path.is_empty() {
        return String::new();
    }
    format!("{static_url}{}", asset_path.trim_start_matches('/'))
}

/// Read `<static_dir>/index.html` and resolve the entry point URLs.
/// Never fails: a missing or unreadable index yields empty URLs.
pub async fn load_assets(static_dir: &str, static_url: &str) -> BundleAssets {
    let index_path = Path::new(static_dir).join("index.html");

    let html = match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %index_path.display(), "Frontend bundle index not found");
            return BundleAssets::default();
        }
        Err(e) => {
            tracing::error!(path = %index_path.display(), "Error reading frontend bundle index: {e}");
            return BundleAssets::default();
        }
    };

    let (js, css) = parse_index(&html);
    BundleAssets {
        js_url: asset_url(static_url, js.as_deref().unwrap_or("")),
        css_url: asset_url(static_url, css.as_deref().unwrap_or("")),
    }
}
