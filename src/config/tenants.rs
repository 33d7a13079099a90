//! Tenant prefix configuration
//!
//! Tenant deployments share one set of static assets but are mounted under
//! their own leading path segment (e.g. `/barid`). The prefixes come from a
//! JSON file declared in `router.tenant_config`, loaded once at startup.

use std::path::Path;

use crate::logger;

/// A normalized tenant path prefix: non-empty, no leading or trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantPrefix(String);

impl TenantPrefix {
    /// Normalize a raw configured value into a prefix.
    ///
    /// Surrounding slashes are trimmed; values that are empty after
    /// trimming yield `None`.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Load tenant prefixes from a JSON file.
///
/// The file is a JSON array of objects carrying a `path` string field.
/// Non-conforming entries are skipped. A missing or malformed file degrades
/// to an empty list without surfacing an error to any client; routing then
/// simply has no tenant remaps.
pub fn load_tenant_prefixes(path: &Path) -> Vec<TenantPrefix> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        // Optional file: absence is the common case for untenanted setups
        return Vec::new();
    };

    let value: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            logger::log_warning(&format!(
                "Ignoring malformed tenant config '{}': {e}",
                path.display()
            ));
            return Vec::new();
        }
    };

    let Some(entries) = value.as_array() else {
        logger::log_warning(&format!(
            "Ignoring tenant config '{}': expected a JSON array",
            path.display()
        ));
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| entry.get("path").and_then(serde_json::Value::as_str))
        .filter_map(TenantPrefix::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tenant_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(TenantPrefix::new("barid").unwrap().as_str(), "barid");
        assert_eq!(TenantPrefix::new("/barid/").unwrap().as_str(), "barid");
        assert!(TenantPrefix::new("").is_none());
        assert!(TenantPrefix::new("///").is_none());
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_tenant_file(r#"[{"path": "barid"}, {"path": "/acme/"}]"#);
        let prefixes = load_tenant_prefixes(file.path());
        assert_eq!(prefixes.len(), 2);
        assert_eq!(prefixes[0].as_str(), "barid");
        assert_eq!(prefixes[1].as_str(), "acme");
    }

    #[test]
    fn test_non_conforming_entries_ignored() {
        let file = write_tenant_file(
            r#"[{"path": "barid"}, {"name": "no-path"}, "just-a-string", {"path": ""}, 42]"#,
        );
        let prefixes = load_tenant_prefixes(file.path());
        assert_eq!(prefixes.len(), 1);
        assert_eq!(prefixes[0].as_str(), "barid");
    }

    #[test]
    fn test_missing_file_degrades_silently() {
        let prefixes = load_tenant_prefixes(Path::new("/nonexistent/custom.json"));
        assert!(prefixes.is_empty());
    }

    #[test]
    fn test_malformed_json_degrades_silently() {
        let file = write_tenant_file("not json at all {{{");
        assert!(load_tenant_prefixes(file.path()).is_empty());
    }

    #[test]
    fn test_non_array_json_degrades_silently() {
        let file = write_tenant_file(r#"{"path": "barid"}"#);
        assert!(load_tenant_prefixes(file.path()).is_empty());
    }
}
