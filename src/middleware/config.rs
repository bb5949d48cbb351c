/// Shared preview settings used by both config and runtime state.
#[derive(Clone)]
pub(crate) struct PreviewSettings {
    pub(crate) cookie_name: String,
    pub(crate) preview_path: String,
    pub(crate) secure_cookies: bool,
    pub(crate) clear_redirect: String,
}

impl PreviewSettings {
    fn defaults() -> Self {
        Self {
            cookie_name: "__minkuru_preview".into(),
            preview_path: "/api/preview".into(),
            secure_cookies: true,
            clear_redirect: "/".into(),
        }
    }
}

/// Preview middleware configuration.
///
/// Every field has a sensible default; use [`from_env()`](PreviewConfig::from_env)
/// for convention-based setup or [`new()`](PreviewConfig::new) with `with_*`
/// methods for full control.
pub struct PreviewConfig {
    pub(super) settings: PreviewSettings,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewConfig {
    /// Config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: PreviewSettings::defaults(),
        }
    }

    /// Config from environment variables.
    ///
    /// # Optional env vars
    /// - `PREVIEW_DEV`: set to `"1"` or `"true"` to disable secure cookies
    ///   (local HTTP development)
    /// - `PREVIEW_COOKIE_NAME`: override the `preview_id` cookie name
    /// - `PREVIEW_PATH`: override the route prefix (default `/api/preview`)
    /// - `PREVIEW_CLEAR_REDIRECT`: where the clear route sends the browser
    #[must_use]
    pub fn from_env() -> Self {
        let dev = matches!(
            std::env::var("PREVIEW_DEV").as_deref(),
            Ok("1") | Ok("true"),
        );

        let mut config = Self::new().with_secure_cookies(!dev);
        if let Ok(name) = std::env::var("PREVIEW_COOKIE_NAME") {
            config = config.with_cookie_name(name);
        }
        if let Ok(path) = std::env::var("PREVIEW_PATH") {
            config = config.with_preview_path(path);
        }
        if let Ok(path) = std::env::var("PREVIEW_CLEAR_REDIRECT") {
            config = config.with_clear_redirect(path);
        }
        config
    }

    #[must_use]
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.settings.cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_preview_path(mut self, path: impl Into<String>) -> Self {
        self.settings.preview_path = path.into();
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_clear_redirect(mut self, path: impl Into<String>) -> Self {
        self.settings.clear_redirect = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_safe() {
        let config = PreviewConfig::new();
        assert_eq!(config.settings.cookie_name, "__minkuru_preview");
        assert_eq!(config.settings.preview_path, "/api/preview");
        assert!(config.settings.secure_cookies);
    }

    #[test]
    fn builder_overrides_stick() {
        let config = PreviewConfig::new()
            .with_cookie_name("__preview")
            .with_preview_path("/admin/preview")
            .with_secure_cookies(false)
            .with_clear_redirect("/admin");
        assert_eq!(config.settings.cookie_name, "__preview");
        assert_eq!(config.settings.preview_path, "/admin/preview");
        assert!(!config.settings.secure_cookies);
        assert_eq!(config.settings.clear_redirect, "/admin");
    }
}
