//! Configuration-store keys for well-known tenant settings
//!
//! The store itself is schemaless key/value per tenant; these are the
//! keys the typed accessors on [`crate::Tenant`] read and write.

/// Tenant title.
pub const TITLE: &str = "title";
/// Tenant description / tagline.
pub const DESCRIPTION: &str = "description";
/// Primary (backend) URL.
pub const SITE_URL: &str = "siteurl";
/// Home (front-facing) URL.
pub const HOME_URL: &str = "home";
/// Administrator email address.
pub const ADMIN_EMAIL: &str = "admin_email";
/// Default role ID assigned to new users.
pub const DEFAULT_ROLE: &str = "default_role";
/// Currently active theme ID.
pub const ACTIVE_THEME: &str = "template";
/// Named time-zone identifier (`America/Los_Angeles`).
pub const TIME_ZONE: &str = "timezone_string";
/// Plain GMT offset in hours, used when no named zone is set.
pub const GMT_OFFSET: &str = "gmt_offset";
/// This tenant's active extension paths.
pub const ACTIVE_EXTENSIONS: &str = "active_extensions";
