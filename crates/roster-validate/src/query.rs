use roster_types::{Role, UserQuery, UserQueryParams, MAX_LIMIT};

use crate::{invalid_role_message, Issues, ValidationError};

const SEARCH_MAX_CHARS: usize = 50;

/// Parses the string-encoded list query. Absent values stay absent; paging
/// defaults belong to the query engine.
pub fn validate_user_query(params: &UserQueryParams) -> Result<UserQuery, ValidationError> {
    let mut issues = Issues::default();

    let page = params
        .page
        .as_deref()
        .and_then(|raw| parse_page(raw, &mut issues));
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| parse_limit(raw, &mut issues));
    let role = params.role.as_deref().and_then(|raw| match Role::parse(raw) {
        Some(role) => Some(role),
        None => {
            issues.push("role", invalid_role_message(raw));
            None
        }
    });
    let search = params
        .search
        .as_deref()
        .and_then(|raw| check_search(raw, &mut issues));

    issues.finish(|| UserQuery {
        page,
        limit,
        role,
        search,
    })
}

fn parse_integer(raw: &str, path: &str, issues: &mut Issues) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            issues.push(path, "Expected number, received nan");
            None
        }
    }
}

fn parse_page(raw: &str, issues: &mut Issues) -> Option<u32> {
    let page = parse_integer(raw, "page", issues)?;
    if page <= 0 {
        issues.push("page", "Page must be positive");
        return None;
    }
    match u32::try_from(page) {
        Ok(page) => Some(page),
        Err(_) => {
            issues.push("page", "Page is too large");
            None
        }
    }
}

fn parse_limit(raw: &str, issues: &mut Issues) -> Option<u32> {
    let limit = parse_integer(raw, "limit", issues)?;
    if limit <= 0 || limit > i64::from(MAX_LIMIT) {
        issues.push("limit", "Limit must be between 1-100");
        return None;
    }
    u32::try_from(limit).ok()
}

fn check_search(raw: &str, issues: &mut Issues) -> Option<String> {
    let len = raw.chars().count();
    if len < 1 {
        issues.push("search", "String must contain at least 1 character(s)");
        return None;
    }
    if len > SEARCH_MAX_CHARS {
        issues.push(
            "search",
            format!("String must contain at most {} character(s)", SEARCH_MAX_CHARS),
        );
        return None;
    }
    Some(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::FieldIssue;

    fn params(page: Option<&str>, limit: Option<&str>, role: Option<&str>, search: Option<&str>) -> UserQueryParams {
        UserQueryParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            role: role.map(String::from),
            search: search.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_keeps_everything_absent() {
        let query = validate_user_query(&UserQueryParams::default()).unwrap();
        assert_eq!(query, UserQuery::default());
    }

    #[test]
    fn test_parses_all_fields() {
        let query = validate_user_query(&params(Some("2"), Some("5"), Some("admin"), Some("john"))).unwrap();
        assert_eq!(
            query,
            UserQuery {
                page: Some(2),
                limit: Some(5),
                role: Some(Role::Admin),
                search: Some("john".to_string()),
            }
        );
    }

    #[test]
    fn test_page_rules() {
        let err = validate_user_query(&params(Some("0"), None, None, None)).unwrap_err();
        assert_eq!(err.issues, vec![FieldIssue::new("page", "Page must be positive")]);

        let err = validate_user_query(&params(Some("abc"), None, None, None)).unwrap_err();
        assert_eq!(err.issues, vec![FieldIssue::new("page", "Expected number, received nan")]);

        let err = validate_user_query(&params(Some("99999999999"), None, None, None)).unwrap_err();
        assert_eq!(err.issues, vec![FieldIssue::new("page", "Page is too large")]);
    }

    #[test]
    fn test_limit_rules() {
        for raw in ["0", "101", "-3"] {
            let err = validate_user_query(&params(None, Some(raw), None, None)).unwrap_err();
            assert_eq!(err.issues, vec![FieldIssue::new("limit", "Limit must be between 1-100")]);
        }
        let query = validate_user_query(&params(None, Some("100"), None, None)).unwrap();
        assert_eq!(query.limit, Some(100));
    }

    #[test]
    fn test_role_and_search_rules() {
        let err = validate_user_query(&params(None, None, Some("Admin"), Some(""))).unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(err.issues[0].path, "role");
        assert_eq!(
            err.issues[1],
            FieldIssue::new("search", "String must contain at least 1 character(s)")
        );

        let long = "x".repeat(51);
        let err = validate_user_query(&params(None, None, None, Some(&long))).unwrap_err();
        assert_eq!(
            err.issues,
            vec![FieldIssue::new("search", "String must contain at most 50 character(s)")]
        );
    }
}
