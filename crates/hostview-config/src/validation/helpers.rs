//! Shared range-validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range<T>(errors: &mut Vec<String>, name: &str, value: T, min: T, max: T)
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if a lower bound exceeds its upper bound.
pub(crate) fn validate_ordered(
    errors: &mut Vec<String>,
    lower_name: &str,
    lower: i32,
    upper_name: &str,
    upper: i32,
) {
    if lower > upper {
        errors.push(format!(
            "{lower_name} = {lower} is greater than {upper_name} = {upper}"
        ));
    }
}
