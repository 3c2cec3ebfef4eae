//! Base plugin trait definition.
//!
//! Every extraction strategy implements `Plugin`, which carries identification and
//! metadata used in logs and capability listings.

/// Base trait that all plugins must implement.
///
/// # Thread Safety
///
/// All plugins must be `Send + Sync` so a single analyzer can serve concurrent requests.
///
/// # Example
///
/// ```rust
/// use quire::plugins::Plugin;
///
/// struct MyPlugin;
///
/// impl Plugin for MyPlugin {
///     fn name(&self) -> &str {
///         "my-plugin"
///     }
/// }
///
/// assert_eq!(MyPlugin.name(), "my-plugin");
/// assert_eq!(MyPlugin.version(), env!("CARGO_PKG_VERSION"));
/// ```
pub trait Plugin: Send + Sync {
    /// Returns the unique name/identifier for this plugin.
    ///
    /// Lowercase with hyphens (e.g., "docx-extractor").
    fn name(&self) -> &str;

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn description(&self) -> &str {
        ""
    }
}
