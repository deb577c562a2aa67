use roster_types::{ListUsersResult, Pagination, User, UserQuery, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Filters, counts and pages a snapshot of the store.
///
/// Role and search filters combine with AND and run before paging. The
/// returned pagination echoes the requested page and limit; a page past the
/// end is empty rather than an error.
pub fn run_query(users: &[User], query: &UserQuery) -> ListUsersResult {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let needle = query
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<&User> = users
        .iter()
        .filter(|user| query.role.map_or(true, |role| user.role == role))
        .filter(|user| needle.as_deref().map_or(true, |needle| matches_search(user, needle)))
        .collect();

    let total = filtered.len();
    let total_pages = if limit == 0 {
        0
    } else {
        total.div_ceil(limit as usize)
    };

    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    let users = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    ListUsersResult {
        users,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }
}

fn matches_search(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle) || user.email.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_users;
    use roster_types::Role;

    fn query(page: Option<u32>, limit: Option<u32>) -> UserQuery {
        UserQuery {
            page,
            limit,
            ..Default::default()
        }
    }

    fn names(result: &ListUsersResult) -> Vec<&str> {
        result.users.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn test_defaults() {
        let users = seed_users();
        let result = run_query(&users, &UserQuery::default());
        assert_eq!(names(&result), vec!["John Doe", "Jane Smith", "Bob Wilson"]);
        assert_eq!(
            result.pagination,
            Pagination {
                page: 1,
                limit: 10,
                total: 3,
                total_pages: 1,
            }
        );
    }

    #[test]
    fn test_second_page() {
        let users = seed_users();
        let result = run_query(&users, &query(Some(2), Some(2)));
        assert_eq!(names(&result), vec!["Bob Wilson"]);
        assert_eq!(
            result.pagination,
            Pagination {
                page: 2,
                limit: 2,
                total: 3,
                total_pages: 2,
            }
        );
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let users = seed_users();
        let result = run_query(&users, &query(Some(7), Some(2)));
        assert!(result.users.is_empty());
        assert_eq!(result.pagination.page, 7);
        assert_eq!(result.pagination.total, 3);
        assert_eq!(result.pagination.total_pages, 2);

        let result = run_query(&users, &query(Some(u32::MAX), Some(100)));
        assert!(result.users.is_empty());
    }

    #[test]
    fn test_role_filter() {
        let users = seed_users();
        for role in Role::ALL {
            let result = run_query(
                &users,
                &UserQuery {
                    role: Some(role),
                    ..Default::default()
                },
            );
            assert_eq!(result.pagination.total, 1);
            assert!(result.users.iter().all(|u| u.role == role));
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_email() {
        let users = seed_users();
        let search = |term: &str| {
            run_query(
                &users,
                &UserQuery {
                    search: Some(term.to_string()),
                    ..Default::default()
                },
            )
        };
        assert_eq!(names(&search("JOHN")), vec!["John Doe"]);
        assert_eq!(names(&search("example.com")).len(), 3);
        assert_eq!(names(&search("bob@")), vec!["Bob Wilson"]);
        assert!(search("nobody").users.is_empty());
        assert_eq!(search("").pagination.total, 3);
    }

    #[test]
    fn test_filters_compose_before_paging() {
        let users = seed_users();
        let result = run_query(
            &users,
            &UserQuery {
                role: Some(Role::Admin),
                search: Some("john".to_string()),
                ..Default::default()
            },
        );
        assert!(result.users.is_empty());
        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.total_pages, 0);

        let result = run_query(
            &users,
            &UserQuery {
                page: Some(1),
                limit: Some(1),
                search: Some("j".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(names(&result), vec!["John Doe"]);
        assert_eq!(result.pagination.total, 2);
        assert_eq!(result.pagination.total_pages, 2);
    }
}
