//! JSON output for token resolution.

use serde_json::json;

use crate::core::{Reference, Resolved};
use crate::error::Mail2OrgError;

/// Format a token resolution as JSON.
///
/// An unmatched token serializes as `"resolved": null`.
///
/// # Errors
///
/// Returns `Mail2OrgError::Json` if serialization fails.
pub fn format_resolution_json(
    token: &str,
    reference: Reference,
    resolved: Option<&Resolved>,
) -> Result<String, Mail2OrgError> {
    let output = json!({
        "token": token,
        "reference": reference.to_string(),
        "resolved": resolved,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_resolved_json() {
        let date = NaiveDate::from_ymd_opt(2014, 7, 21).unwrap();
        let reference = Reference::from(NaiveDate::from_ymd_opt(2014, 7, 17).unwrap());
        let output =
            format_resolution_json("mon", reference, Some(&Resolved::date_only(date))).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["token"], "mon");
        assert_eq!(value["reference"], "2014-07-17");
        assert_eq!(value["resolved"]["date"], "2014-07-21");
        assert!(value["resolved"]["time"].is_null());
    }

    #[test]
    fn test_no_match_json() {
        let reference = Reference::from(NaiveDate::from_ymd_opt(2014, 7, 17).unwrap());
        let output = format_resolution_json("zzz", reference, None).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["resolved"].is_null());
    }
}
