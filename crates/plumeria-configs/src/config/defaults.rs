//! Default values for configuration fields.

pub fn default_pass_min_length() -> usize {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}
