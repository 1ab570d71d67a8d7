use thinklink_domain::{CategoryQuery, QuestionQuery, RoleQuery, SortOrder, UserQuery};
use url::Url;

type QueryPair = (&'static str, String);

/// Appends the pairs to the URL query. An empty list leaves no `?` behind.
pub(super) fn with_query(mut url: Url, pairs: &[QueryPair]) -> Url {
    if pairs.is_empty() {
        return url;
    }

    url.query_pairs_mut()
        .extend_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())));
    url
}

pub(super) fn question_pairs(query: &QuestionQuery) -> Vec<QueryPair> {
    let mut pairs = Vec::new();
    push_text(&mut pairs, "search", query.filter.search());
    push_text(&mut pairs, "category", query.filter.category());
    push_text(&mut pairs, "level", query.filter.level());
    push_paging(
        &mut pairs,
        query.page,
        query.limit,
        query.sort_by.as_deref(),
        query.sort_order,
    );
    pairs
}

pub(super) fn category_pairs(query: &CategoryQuery) -> Vec<QueryPair> {
    let mut pairs = Vec::new();
    push_text(&mut pairs, "search", query.search.as_deref());
    if let Some(is_active) = query.is_active {
        pairs.push(("isActive", is_active.to_string()));
    }
    push_paging(
        &mut pairs,
        query.page,
        query.limit,
        query.sort_by.as_deref(),
        query.sort_order,
    );
    pairs
}

pub(super) fn user_pairs(query: &UserQuery) -> Vec<QueryPair> {
    let mut pairs = Vec::new();
    push_text(&mut pairs, "search", query.search.as_deref());
    push_text(&mut pairs, "roleId", query.role_id.as_deref());
    push_paging(
        &mut pairs,
        query.page,
        query.limit,
        query.sort_by.as_deref(),
        query.sort_order,
    );
    pairs
}

pub(super) fn role_pairs(query: &RoleQuery) -> Vec<QueryPair> {
    let mut pairs = Vec::new();
    push_text(&mut pairs, "search", query.search.as_deref());
    push_paging(
        &mut pairs,
        query.page,
        query.limit,
        query.sort_by.as_deref(),
        query.sort_order,
    );
    pairs
}

fn push_text(pairs: &mut Vec<QueryPair>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        pairs.push((key, value.to_owned()));
    }
}

fn push_paging(
    pairs: &mut Vec<QueryPair>,
    page: Option<u32>,
    limit: Option<u32>,
    sort_by: Option<&str>,
    sort_order: Option<SortOrder>,
) {
    if let Some(page) = page.filter(|page| *page > 0) {
        pairs.push(("page", page.to_string()));
    }
    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        pairs.push(("limit", limit.to_string()));
    }
    push_text(pairs, "sortBy", sort_by);
    if let Some(sort_order) = sort_order {
        pairs.push(("sortOrder", sort_order.as_str().to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use thinklink_domain::{CategoryQuery, QuestionFilter, QuestionQuery, SortOrder};
    use url::Url;

    use super::{category_pairs, question_pairs, with_query};

    fn base() -> Url {
        Url::parse("https://api.test/v1/questions").unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn empty_filter_sends_only_paging() {
        let query = QuestionQuery::page(QuestionFilter::default(), 1, 100);
        let url = with_query(base(), &question_pairs(&query));

        assert_eq!(url.query(), Some("page=1&limit=100"));
    }

    #[test]
    fn blank_and_absent_fields_are_omitted() {
        let filter = QuestionFilter::new(Some("  ".to_owned()), Some("Science".to_owned()), None);
        let query = QuestionQuery {
            filter,
            page: None,
            limit: None,
            sort_by: Some(String::new()),
            sort_order: None,
        };

        let pairs = question_pairs(&query);
        assert_eq!(pairs, vec![("category", "Science".to_owned())]);
    }

    #[test]
    fn values_are_percent_encoded() {
        let filter = QuestionFilter::new(Some("C++ & Rust".to_owned()), None, None);
        let url = with_query(base(), &question_pairs(&QuestionQuery::page(filter, 2, 10)));

        assert_eq!(url.query(), Some("search=C%2B%2B+%26+Rust&page=2&limit=10"));
    }

    #[test]
    fn no_pairs_leave_no_question_mark() {
        let url = with_query(base(), &[]);
        assert_eq!(url.as_str(), "https://api.test/v1/questions");
    }

    #[test]
    fn category_active_flag_is_sent_when_false() {
        let query = CategoryQuery {
            is_active: Some(false),
            sort_order: Some(SortOrder::Desc),
            ..CategoryQuery::default()
        };

        assert_eq!(
            category_pairs(&query),
            vec![
                ("isActive", "false".to_owned()),
                ("sortOrder", "desc".to_owned())
            ]
        );
    }
}
