//! Parsing of the raw mapping document into typed record lists.
//!
//! Each recognized field is parsed on its own: one malformed field degrades
//! to an empty list and an entry in the aggregate error, while the other
//! fields still produce their records. Callers apply whatever parsed.

use std::collections::BTreeMap;

use crate::mapstore::records::{RoleMapping, UserMapping};

/// Raw field holding the user mapping list.
pub const FIELD_USERS: &str = "mapUsers";
/// Raw field holding the role mapping list.
pub const FIELD_ROLES: &str = "mapRoles";
/// Raw field holding the account ID list.
pub const FIELD_ACCOUNTS: &str = "mapAccounts";

/// The typed output of one parse pass over the resource data.
#[derive(Debug, Default)]
pub struct ParsedMappings {
    pub users: Vec<UserMapping>,
    pub roles: Vec<RoleMapping>,
    pub accounts: Vec<String>,
}

/// A parse failure scoped to a single raw field.
#[derive(Debug)]
pub struct FieldError {
    /// Which raw field failed (`mapUsers`, `mapRoles` or `mapAccounts`).
    pub field: &'static str,
    pub source: serde_yaml_ng::Error,
}

/// Aggregate of every per-field failure from one parse pass, in field order.
#[derive(Debug)]
pub struct ParseMapError {
    pub fields: Vec<FieldError>,
}

impl std::fmt::Display for ParseMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error parsing mapping document: ")?;
        for (i, err) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseMapError {}

/// Parse the raw key/value payload of the tracked resource.
///
/// Absent fields are not an error and yield empty lists. The returned lists
/// are valid and must be used even when an error is also returned; the error
/// only covers the fields that failed.
pub fn parse_map_data(
    data: &BTreeMap<String, String>,
) -> (ParsedMappings, Option<ParseMapError>) {
    let mut parsed = ParsedMappings::default();
    let mut errs = Vec::new();

    if let Some(raw) = data.get(FIELD_USERS) {
        match serde_yaml_ng::from_str(raw) {
            Ok(users) => parsed.users = users,
            Err(source) => errs.push(FieldError { field: FIELD_USERS, source }),
        }
    }

    if let Some(raw) = data.get(FIELD_ROLES) {
        match serde_yaml_ng::from_str(raw) {
            Ok(roles) => parsed.roles = roles,
            Err(source) => errs.push(FieldError { field: FIELD_ROLES, source }),
        }
    }

    if let Some(raw) = data.get(FIELD_ACCOUNTS) {
        match serde_yaml_ng::from_str(raw) {
            Ok(accounts) => parsed.accounts = accounts,
            Err(source) => errs.push(FieldError { field: FIELD_ACCOUNTS, source }),
        }
    }

    let err = if errs.is_empty() {
        None
    } else {
        Some(ParseMapError { fields: errs })
    };
    (parsed, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_all_three_fields() {
        let data = doc(&[
            (
                FIELD_USERS,
                "- userarn: arn:aws:iam::123456789012:user/alice\n  username: alice\n  groups:\n    - system:masters\n",
            ),
            (
                FIELD_ROLES,
                "- rolearn: arn:aws:iam::123456789012:role/node\n  username: system:node:{{EC2PrivateDNSName}}\n  groups:\n    - system:nodes\n",
            ),
            (FIELD_ACCOUNTS, "- \"123456789012\"\n- \"555555555555\"\n"),
        ]);

        let (parsed, err) = parse_map_data(&data);
        assert!(err.is_none());
        assert_eq!(parsed.users.len(), 1);
        assert_eq!(parsed.users[0].user_arn, "arn:aws:iam::123456789012:user/alice");
        assert_eq!(parsed.users[0].groups, vec!["system:masters"]);
        assert_eq!(parsed.roles.len(), 1);
        assert_eq!(parsed.roles[0].username, "system:node:{{EC2PrivateDNSName}}");
        assert_eq!(parsed.accounts, vec!["123456789012", "555555555555"]);
    }

    #[test]
    fn accepts_json_flow_style() {
        let data = doc(&[(
            FIELD_USERS,
            r#"[{"userarn": "arn:aws:iam::123456789012:user/bob", "username": "bob", "groups": ["dev"]}]"#,
        )]);

        let (parsed, err) = parse_map_data(&data);
        assert!(err.is_none());
        assert_eq!(parsed.users[0].username, "bob");
    }

    #[test]
    fn absent_fields_yield_empty_lists() {
        let (parsed, err) = parse_map_data(&BTreeMap::new());
        assert!(err.is_none());
        assert!(parsed.users.is_empty());
        assert!(parsed.roles.is_empty());
        assert!(parsed.accounts.is_empty());
    }

    #[test]
    fn optional_record_fields_default() {
        let data = doc(&[(
            FIELD_ROLES,
            "- rolearn: arn:aws:iam::123456789012:role/minimal\n",
        )]);

        let (parsed, err) = parse_map_data(&data);
        assert!(err.is_none());
        assert_eq!(parsed.roles[0].username, "");
        assert!(parsed.roles[0].groups.is_empty());
    }

    #[test]
    fn one_bad_field_keeps_the_others() {
        let data = doc(&[
            (
                FIELD_USERS,
                "- userarn: arn:aws:iam::123456789012:user/alice\n  username: alice\n",
            ),
            (FIELD_ACCOUNTS, "{ this is: [ not a list"),
        ]);

        let (parsed, err) = parse_map_data(&data);
        let err = err.expect("accounts field should fail");
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, FIELD_ACCOUNTS);
        assert_eq!(parsed.users.len(), 1);
        assert!(parsed.accounts.is_empty());
    }

    #[test]
    fn all_failures_are_collected_in_field_order() {
        let data = doc(&[
            (FIELD_USERS, ": not yaml"),
            (FIELD_ROLES, "also: not: a: list"),
            (FIELD_ACCOUNTS, "- ok"),
        ]);

        let (parsed, err) = parse_map_data(&data);
        let err = err.expect("two fields should fail");
        let fields: Vec<_> = err.fields.iter().map(|f| f.field).collect();
        assert_eq!(fields, vec![FIELD_USERS, FIELD_ROLES]);
        assert_eq!(parsed.accounts, vec!["ok"]);
        let msg = err.to_string();
        assert!(msg.starts_with("error parsing mapping document: mapUsers:"));
    }
}
