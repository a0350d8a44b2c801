use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query strings deliver numbers as strings; accept both and treat the
/// empty string as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        Num(i64),
        Str(String),
    }

    match Option::<NumOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrString::Num(n)) => Ok(Some(n)),
        Some(NumOrString::Str(s)) if s.is_empty() => Ok(None),
        Some(NumOrString::Str(s)) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `?page=&limit=` query parameters shared by the paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct PageParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Per-endpoint defaults differ (news 10, notifications 20, marks 50),
    /// so the default is supplied by the caller. Clamped to 1..=100.
    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, 100)
    }

    pub fn offset(&self, limit: i64) -> i64 {
        (self.page() - 1) * limit
    }
}

/// Pagination envelope rendered alongside paginated data, matching the
/// wire shape `{currentPage, totalPages, totalItems, itemsPerPage}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl PaginationInfo {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            current_page: page,
            total_pages: if total == 0 { 0 } else { (total + limit - 1) / limit },
            total_items: total,
            items_per_page: limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit_or(20), 20);
        assert_eq!(params.offset(20), 0);
    }

    #[test]
    fn page_two_of_twenty_five() {
        let params = PageParams {
            page: Some(2),
            limit: Some(10),
        };
        let limit = params.limit_or(10);
        assert_eq!(params.offset(limit), 10);

        let info = PaginationInfo::new(params.page(), limit, 25);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_items, 25);
        assert_eq!(info.items_per_page, 10);
    }

    #[test]
    fn limit_clamped() {
        let params = PageParams {
            page: None,
            limit: Some(500),
        };
        assert_eq!(params.limit_or(10), 100);

        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.limit_or(10), 1);
    }

    #[test]
    fn negative_page_treated_as_first() {
        let params = PageParams {
            page: Some(-3),
            limit: Some(10),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(10), 0);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let info = PaginationInfo::new(1, 10, 30);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn empty_result_set() {
        let info = PaginationInfo::new(1, 10, 0);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn deserialize_string_values() {
        let params: PageParams = serde_json::from_str(r#"{"page":"2","limit":"25"}"#).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.limit_or(10), 25);
    }

    #[test]
    fn deserialize_empty_strings() {
        let params: PageParams = serde_json::from_str(r#"{"page":"","limit":""}"#).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit_or(10), 10);
    }

    #[test]
    fn serialized_shape_is_camel_case() {
        let info = PaginationInfo::new(2, 10, 25);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""currentPage":2"#));
        assert!(json.contains(r#""totalPages":3"#));
        assert!(json.contains(r#""totalItems":25"#));
        assert!(json.contains(r#""itemsPerPage":10"#));
    }
}
