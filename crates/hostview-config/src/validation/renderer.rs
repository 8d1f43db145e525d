//! Renderer launch and discovery validation.

use crate::schema::HostviewConfig;

use super::helpers::validate_range;

/// Upper bound on the total window discovery budget.
const MAX_DISCOVERY_BUDGET_MS: u64 = 5_000;

pub(crate) fn validate_renderer(errors: &mut Vec<String>, config: &HostviewConfig) {
    let renderer = &config.renderer;

    if renderer.executable_name.trim().is_empty() && renderer.candidates.is_empty() {
        errors.push("renderer.executable_name is empty and no candidates are configured".into());
    }
    if renderer.window_class.is_empty() && renderer.window_title.is_empty() {
        errors.push("renderer.window_class and renderer.window_title are both empty".into());
    }

    validate_range(
        errors,
        "renderer.discovery_interval_ms",
        renderer.discovery_interval_ms,
        10,
        1_000,
    );
    validate_range(
        errors,
        "renderer.discovery_max_attempts",
        renderer.discovery_max_attempts,
        1,
        500,
    );
    let budget = renderer
        .discovery_interval_ms
        .saturating_mul(u64::from(renderer.discovery_max_attempts));
    if budget > MAX_DISCOVERY_BUDGET_MS {
        errors.push(format!(
            "renderer discovery budget {budget} ms exceeds {MAX_DISCOVERY_BUDGET_MS} ms"
        ));
    }
    validate_range(
        errors,
        "renderer.shutdown_grace_ms",
        renderer.shutdown_grace_ms,
        0,
        10_000,
    );
}
