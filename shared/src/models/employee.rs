//! Employee Model

use serde::{Deserialize, Serialize};

use crate::serde_helpers;

/// Minimal projection used by the operator to pick an employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub id: String,
    pub full_name: String,
}

/// Public profile served by `GET /public/employees/{id}` (no auth)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePublicProfile {
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub id: String,
    pub full_name: String,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub work_location: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub division_section: Option<String>,
    /// Raw date string, formatted at render time
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub date_of_joining: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub place_of_birth: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub blood_type: Option<String>,
    #[serde(deserialize_with = "serde_helpers::string_or_number")]
    pub mobile_1: String,
    #[serde(default, deserialize_with = "serde_helpers::option_string_or_number")]
    pub fingerprint_id: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub photo_path: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::non_empty_string")]
    pub barcode_image_path: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_string_or_number")]
    pub barcode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_numeric_id() {
        let list: Vec<EmployeeSummary> =
            serde_json::from_str(r#"[{"id":7,"full_name":"Sami"},{"id":"8","full_name":"Lina"}]"#)
                .unwrap();
        assert_eq!(list[0].id, "7");
        assert_eq!(list[1].id, "8");
    }

    #[test]
    fn test_profile_optional_fields() {
        let raw = r#"{
            "id": 42,
            "full_name": "Amal Haddad",
            "mobile_1": "0933000000",
            "date_of_birth": null,
            "position": "",
            "fingerprint_id": 1203
        }"#;
        let profile: EmployeePublicProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.id, "42");
        assert!(profile.date_of_birth.is_none());
        assert!(profile.position.is_none());
        assert!(profile.date_of_joining.is_none());
        assert_eq!(profile.fingerprint_id.as_deref(), Some("1203"));
    }

    #[test]
    fn test_profile_requires_mobile() {
        let raw = r#"{"id": 42, "full_name": "Amal Haddad"}"#;
        assert!(serde_json::from_str::<EmployeePublicProfile>(raw).is_err());
    }
}
