//! Debounce window validation.

use crate::schema::HostviewConfig;

use super::helpers::validate_range;

pub(crate) fn validate_resize(errors: &mut Vec<String>, config: &HostviewConfig) {
    let r = &config.resize;
    validate_range(errors, "resize.layout_debounce_ms", r.layout_debounce_ms, 0, 1_000);
    validate_range(
        errors,
        "resize.window_state_debounce_ms",
        r.window_state_debounce_ms,
        0,
        1_000,
    );
    validate_range(errors, "resize.dpi_debounce_ms", r.dpi_debounce_ms, 0, 1_000);
}
