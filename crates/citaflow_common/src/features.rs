//! Runtime feature-flag handling.
//!
//! Features are gated twice: at compile time with cargo features on the
//! backend crate, and at runtime through the `use_*` flags in `AppConfig`.
//! A feature only runs when its flag is set AND its config section exists.

use citaflow_config::AppConfig;
use std::sync::Arc;

/// Check whether a feature is enabled at runtime based on configuration.
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}
