//! Resolution and viewport bound validation.

use crate::schema::HostviewConfig;

use super::helpers::{validate_ordered, validate_range};

pub(crate) fn validate_resolution(errors: &mut Vec<String>, config: &HostviewConfig) {
    let r = &config.resolution;
    validate_range(errors, "resolution.min_width", r.min_width, 1, 16_384);
    validate_range(errors, "resolution.min_height", r.min_height, 1, 16_384);
    validate_range(errors, "resolution.max_width", r.max_width, 1, 16_384);
    validate_range(errors, "resolution.max_height", r.max_height, 1, 16_384);
    validate_ordered(
        errors,
        "resolution.min_width",
        r.min_width,
        "resolution.max_width",
        r.max_width,
    );
    validate_ordered(
        errors,
        "resolution.min_height",
        r.min_height,
        "resolution.max_height",
        r.max_height,
    );
}

pub(crate) fn validate_viewport(errors: &mut Vec<String>, config: &HostviewConfig) {
    let v = &config.viewport;
    // The resize notification packs each dimension into 16 bits.
    validate_range(errors, "viewport.min_width", v.min_width, 1, 0xFFFF);
    validate_range(errors, "viewport.min_height", v.min_height, 1, 0xFFFF);
    validate_range(errors, "viewport.max_width", v.max_width, 1, 0xFFFF);
    validate_range(errors, "viewport.max_height", v.max_height, 1, 0xFFFF);
    validate_ordered(
        errors,
        "viewport.min_width",
        v.min_width,
        "viewport.max_width",
        v.max_width,
    );
    validate_ordered(
        errors,
        "viewport.min_height",
        v.min_height,
        "viewport.max_height",
        v.max_height,
    );
    validate_range(
        errors,
        "viewport.default_width",
        v.default_width,
        v.min_width,
        v.max_width,
    );
    validate_range(
        errors,
        "viewport.default_height",
        v.default_height,
        v.min_height,
        v.max_height,
    );
}
