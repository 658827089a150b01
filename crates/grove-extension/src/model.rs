//! Extension model
//!
//! Discovery hands back a raw property map per storage path. At catalog
//! build time that map becomes an [`Extension`]: a stable ID extracted
//! from the path, the path itself, and typed metadata. Nothing on an
//! extension changes after load.

use grove_common::host::RawProps;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable extension identifier: the storage-path segment before the
/// first separator.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Derive the ID from a storage path.
    ///
    /// Pure and idempotent: `alpha/alpha.php` yields `alpha`, and a
    /// path without a separator is its own ID.
    pub fn extract(path: &str) -> Self {
        Self(path.split('/').next().unwrap_or_default().to_string())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExtensionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Typed extension metadata, fixed at creation from the discovery
/// property map. Unrecognized headers land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMeta {
    /// User-friendly display name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// What the extension does.
    pub description: String,
    /// Author name.
    pub author: String,
    /// Author website.
    pub author_url: String,
    /// Whether this extension may only be activated platform-wide on a
    /// multi-tenant deployment.
    pub requires_global: bool,
    /// Genuinely extensible metadata with no fixed field.
    pub extra: BTreeMap<String, String>,
}

impl ExtensionMeta {
    /// Parse the raw discovery property map.
    pub fn from_raw(mut props: RawProps) -> Self {
        let mut take = |key: &str| props.remove(key).unwrap_or_default();
        let name = take("name");
        let version = take("version");
        let description = take("description");
        let author = take("author");
        let author_url = take("author_url");
        let requires_global = matches!(
            take("requires_global").to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        );
        Self {
            name,
            version,
            description,
            author,
            author_url,
            requires_global,
            extra: props,
        }
    }
}

/// One installed extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    id: ExtensionId,
    path: String,
    meta: ExtensionMeta,
}

impl Extension {
    /// Build an extension from its discovery record.
    pub fn from_discovery(path: &str, props: RawProps) -> Self {
        Self {
            id: ExtensionId::extract(path),
            path: path.to_string(),
            meta: ExtensionMeta::from_raw(props),
        }
    }

    /// This extension's stable ID.
    pub fn id(&self) -> &ExtensionId {
        &self.id
    }

    /// Storage path, relative to the extensions directory.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Typed metadata.
    pub fn meta(&self) -> &ExtensionMeta {
        &self.meta
    }

    /// Whether this extension may only be activated platform-wide on a
    /// multi-tenant deployment.
    pub fn requires_global(&self) -> bool {
        self.meta.requires_global
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract() {
        assert_eq!(ExtensionId::extract("alpha/alpha.php").as_str(), "alpha");
        assert_eq!(ExtensionId::extract("solo.php").as_str(), "solo.php");
        assert_eq!(ExtensionId::extract("a/b/c").as_str(), "a");
    }

    #[test]
    fn test_extract_is_stable() {
        let id = ExtensionId::extract("alpha/alpha.php");
        assert_eq!(ExtensionId::extract("alpha/alpha.php"), id);
        // extracting from an already-extracted ID is a fixed point
        assert_eq!(ExtensionId::extract(id.as_str()), id);
    }

    proptest! {
        #[test]
        fn prop_extract_is_a_fixed_point(path in "[a-z0-9_.-]{1,12}(/[a-z0-9_.-]{1,12}){0,3}") {
            let once = ExtensionId::extract(&path);
            prop_assert_eq!(ExtensionId::extract(once.as_str()), once);
        }
    }

    #[test]
    fn test_meta_from_raw() {
        let mut props = RawProps::new();
        props.insert("name".into(), "Alpha".into());
        props.insert("version".into(), "1.2.0".into());
        props.insert("author".into(), "Jo Doe".into());
        props.insert("requires_global".into(), "true".into());
        props.insert("tested_up_to".into(), "6.4".into());

        let meta = ExtensionMeta::from_raw(props);
        assert_eq!(meta.name, "Alpha");
        assert_eq!(meta.version, "1.2.0");
        assert!(meta.requires_global);
        assert_eq!(meta.description, "");
        assert_eq!(meta.extra.get("tested_up_to").map(String::as_str), Some("6.4"));
    }

    #[test]
    fn test_requires_global_parsing() {
        for (raw, expected) in [("true", true), ("1", true), ("Yes", true), ("false", false), ("", false)] {
            let mut props = RawProps::new();
            props.insert("requires_global".into(), raw.into());
            assert_eq!(ExtensionMeta::from_raw(props).requires_global, expected, "{raw}");
        }
    }
}
