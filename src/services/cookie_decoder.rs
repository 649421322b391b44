//! Reads the autoplay setting out of the site's preference cookie.
//!
//! The cookie value is a query string. Both the old and the new site layout
//! store autoplay in the same field: `20000` / `20030` mean on, `30000` /
//! `30030` mean off. The old layout's initial value (`30`) and the new
//! layout's missing field both mean "never toggled" and decode as unknown.

use crate::types::preference::AutoplayPreference;

/// Field of the preference cookie that carries the autoplay flags.
pub const DEFAULT_FIELD: &str = "f5";

const ON_VALUES: [&str; 2] = ["20000", "20030"];
const OFF_VALUES: [&str; 2] = ["30000", "30030"];

/// Maps one raw field value to a preference.
pub fn decode_field_value(value: &str) -> AutoplayPreference {
    if ON_VALUES.contains(&value) {
        AutoplayPreference::On
    } else if OFF_VALUES.contains(&value) {
        AutoplayPreference::Off
    } else {
        AutoplayPreference::Unknown
    }
}

/// Decodes `field` from a query-string encoded cookie value.
///
/// Never fails: anything unparseable or unrecognized is `Unknown`. A leading
/// `?` is skipped and the first occurrence of the field wins.
pub fn decode_cookie_value(cookie_value: &str, field: &str) -> AutoplayPreference {
    let query = cookie_value.strip_prefix('?').unwrap_or(cookie_value);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == field)
        .map(|(_, value)| decode_field_value(&value))
        .unwrap_or(AutoplayPreference::Unknown)
}

/// Decodes the default `f5` field.
pub fn decode(cookie_value: &str) -> AutoplayPreference {
    decode_cookie_value(cookie_value, DEFAULT_FIELD)
}
