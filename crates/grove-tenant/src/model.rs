//! Tenant model
//!
//! A `Tenant` carries nothing but its immutable ID and a handle to the
//! host. Every attribute lives in the configuration store, scoped to
//! the tenant's isolated namespace: the generic [`Tenant::get`] /
//! [`Tenant::set`] pair wraps store access in the tenant's context
//! guard, and the typed accessors layer well-known keys on top.

use crate::context::ContextSwitcher;
use crate::selector::TenantSel;
use crate::settings;
use crate::timezone::TenantTimeZone;
use grove_common::url::is_valid_email;
use grove_common::{GroveError, GroveResult, Platform, SiteUrl, TenantId};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One tenant: an isolated logical site within the deployment.
#[derive(Clone)]
pub struct Tenant {
    id: TenantId,
    host: Arc<dyn Platform>,
}

impl Tenant {
    pub(crate) fn new(id: TenantId, host: Arc<dyn Platform>) -> Self {
        Self { id, host }
    }

    /// This tenant's immutable ID.
    pub fn id(&self) -> TenantId {
        self.id
    }

    /// Read a raw configuration value from this tenant's namespace.
    pub fn get(&self, key: &str) -> Option<Value> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let _ctx = self.enter();
        self.host.get_config(key)
    }

    /// Write a raw configuration value into this tenant's namespace.
    /// Returns whether the store accepted the write.
    pub fn set(&self, key: &str, value: Value) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        let _ctx = self.enter();
        self.host.set_config(key, value)
    }

    fn enter(&self) -> crate::context::TenantContext {
        ContextSwitcher::new(self.host.clone()).enter(TenantSel::Id(self.id))
    }

    fn get_str(&self, key: &str) -> String {
        self.get(key)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    /// Tenant title.
    pub fn title(&self) -> String {
        self.get_str(settings::TITLE)
    }

    /// Set the tenant title. Empty (after trim) titles are ignored.
    pub fn set_title(&self, title: &str) {
        let title = title.trim();
        if !title.is_empty() {
            self.set(settings::TITLE, Value::String(title.to_string()));
        }
    }

    /// Tenant description.
    pub fn description(&self) -> String {
        self.get_str(settings::DESCRIPTION)
    }

    /// Set the tenant description. Trimmed; an empty description clears it.
    pub fn set_description(&self, description: &str) {
        self.set(
            settings::DESCRIPTION,
            Value::String(description.trim().to_string()),
        );
    }

    /// Primary (backend) URL.
    pub fn url(&self) -> String {
        self.get_str(settings::SITE_URL)
    }

    /// Front-facing home URL.
    pub fn home_url(&self) -> String {
        self.get_str(settings::HOME_URL)
    }

    /// Scheme of the primary URL, when that URL parses.
    pub fn protocol(&self) -> Option<String> {
        SiteUrl::parse(&self.url())
            .ok()
            .map(|url| url.scheme().to_string())
    }

    /// Change the primary URL.
    ///
    /// The root tenant's primary URL is protected and may never change.
    pub fn set_url(&self, url: &str) -> GroveResult<()> {
        if self.id.is_root() {
            return Err(GroveError::Unsupported(
                "the root tenant's primary URL may not be changed".into(),
            ));
        }
        let parsed = SiteUrl::parse(url)?;
        self.set(settings::SITE_URL, Value::String(parsed.to_string()));
        Ok(())
    }

    /// Administrator email address.
    pub fn admin_email(&self) -> String {
        self.get_str(settings::ADMIN_EMAIL)
    }

    /// Change the administrator email address.
    pub fn set_admin_email(&self, email: &str) -> GroveResult<()> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(GroveError::InvalidArgument(format!(
                "invalid administrator email: {email}"
            )));
        }
        self.set(settings::ADMIN_EMAIL, Value::String(email.to_string()));
        Ok(())
    }

    /// Default role ID assigned to new users.
    pub fn default_role_id(&self) -> String {
        self.get_str(settings::DEFAULT_ROLE)
    }

    /// Currently active theme ID.
    pub fn active_theme_id(&self) -> String {
        self.get_str(settings::ACTIVE_THEME)
    }

    /// Raw storage paths of this tenant's active extensions.
    ///
    /// ID extraction belongs to the extension layer; this accessor
    /// reports the list as stored.
    pub fn active_extension_paths(&self) -> Vec<String> {
        match self.get(settings::ACTIVE_EXTENSIONS) {
            Some(Value::Array(paths)) => paths
                .iter()
                .filter_map(|p| p.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// This tenant's time zone: the named form when set, otherwise the
    /// stored GMT offset, otherwise `None`.
    pub fn time_zone(&self) -> Option<TenantTimeZone> {
        if let Some(name) = self
            .get(settings::TIME_ZONE)
            .and_then(|v| v.as_str().map(str::to_string))
        {
            if !name.is_empty() {
                return Some(TenantTimeZone::Named(name));
            }
        }
        self.get(settings::GMT_OFFSET)
            .and_then(|v| v.as_f64())
            .map(TenantTimeZone::Offset)
    }

    /// Store a time zone, keeping exactly one of the two keys populated.
    pub fn set_time_zone(&self, zone: &TenantTimeZone) {
        match zone {
            TenantTimeZone::Named(name) => {
                self.set(settings::TIME_ZONE, Value::String(name.clone()));
                self.set(settings::GMT_OFFSET, Value::String(String::new()));
            }
            TenantTimeZone::Offset(hours) => {
                self.set(settings::TIME_ZONE, Value::String(String::new()));
                self.set(
                    settings::GMT_OFFSET,
                    Value::from(*hours),
                );
            }
        }
    }
}

impl fmt::Debug for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tenant").field("id", &self.id).finish()
    }
}
