//! Request bodies for the upstream events API.
//!
//! Only the JSON bodies are built here; sending them is left to the caller.

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Field selector for event listings
pub const LIST_FIELDS: &str = "*,location.*,image.*,eventSchedule.*,dc:classification.skos:inScheme,dc:classification.skos:prefLabel";

/// Field selector for a single event, which also expands the organizer
pub const DETAIL_FIELDS: &str = "*,location.*,image.*,eventSchedule.*,organizer.*,dc:classification.skos:inScheme,dc:classification.skos:prefLabel";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// A request ready to be POSTed: which endpoint, the path below it, the body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub endpoint: &'static str,
    pub path: String,
    pub body: Value,
}

/// Filters for an event listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub search_text: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl EventQuery {
    pub fn to_request_body(&self, token: &str) -> Value {
        let mut filter = Map::new();

        if let Some(text) = non_empty(&self.search_text) {
            filter.insert("q".to_string(), json!(text));
        }

        let mut dates = Map::new();
        if let Some(min) = non_empty(&self.start_date) {
            dates.insert("min".to_string(), json!(min));
        }
        if let Some(max) = non_empty(&self.end_date) {
            dates.insert("max".to_string(), json!(max));
        }
        if !dates.is_empty() {
            filter.insert(
                "attribute".to_string(),
                json!({ "eventSchedule": { "in": dates } }),
            );
        }

        if let Some(category) = non_empty(&self.category) {
            filter.insert(
                "classifications".to_string(),
                json!({ "in": { "withSubtree": [category] } }),
            );
        }

        let page = self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE);
        let size = self
            .page_size
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        json!({
            "token": token,
            "fields": LIST_FIELDS,
            "filter": filter,
            "page": { "number": page, "size": size },
        })
    }
}

/// Body for fetching a single event by id
pub fn event_detail_body(token: &str) -> Value {
    json!({
        "token": token,
        "fields": DETAIL_FIELDS,
        "filter": {},
    })
}

pub fn categories_body(token: &str) -> Value {
    json!({ "token": token })
}

pub fn events_request(query: &EventQuery, token: &str) -> ApiRequest {
    ApiRequest {
        endpoint: "events",
        path: String::new(),
        body: query.to_request_body(token),
    }
}

pub fn event_detail_request(id: &str, token: &str) -> ApiRequest {
    ApiRequest {
        endpoint: "events",
        path: format!("/{id}"),
        body: event_detail_body(token),
    }
}

pub fn categories_request(token: &str) -> ApiRequest {
    ApiRequest {
        endpoint: "categories",
        path: String::new(),
        body: categories_body(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listing_body() {
        let body = EventQuery::default().to_request_body("secret");
        assert_eq!(
            body,
            json!({
                "token": "secret",
                "fields": LIST_FIELDS,
                "filter": {},
                "page": {"number": 1, "size": 24}
            })
        );
    }

    #[test]
    fn test_full_listing_body() {
        let query = EventQuery {
            search_text: Some("jazz".to_string()),
            start_date: Some("2024-06-01".to_string()),
            end_date: Some("2024-06-30".to_string()),
            category: Some("cat-music".to_string()),
            page: Some(3),
            page_size: Some(12),
        };
        let body = query.to_request_body("secret");
        assert_eq!(body["filter"]["q"], "jazz");
        assert_eq!(
            body["filter"]["attribute"],
            json!({"eventSchedule": {"in": {"min": "2024-06-01", "max": "2024-06-30"}}})
        );
        assert_eq!(
            body["filter"]["classifications"],
            json!({"in": {"withSubtree": ["cat-music"]}})
        );
        assert_eq!(body["page"], json!({"number": 3, "size": 12}));
    }

    #[test]
    fn test_single_date_bound() {
        let query = EventQuery {
            end_date: Some("2024-06-30".to_string()),
            ..Default::default()
        };
        let body = query.to_request_body("secret");
        assert_eq!(
            body["filter"]["attribute"]["eventSchedule"]["in"],
            json!({"max": "2024-06-30"})
        );
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let query = EventQuery {
            search_text: Some(String::new()),
            category: Some(String::new()),
            page: Some(0),
            page_size: Some(0),
            ..Default::default()
        };
        let body = query.to_request_body("secret");
        assert_eq!(body["filter"], json!({}));
        assert_eq!(body["page"], json!({"number": 1, "size": 24}));
    }

    #[test]
    fn test_detail_and_category_bodies() {
        let detail = event_detail_body("secret");
        assert_eq!(detail["fields"], DETAIL_FIELDS);
        assert!(DETAIL_FIELDS.contains("organizer.*"));
        assert_eq!(detail["filter"], json!({}));
        assert_eq!(categories_body("secret"), json!({"token": "secret"}));
    }

    #[test]
    fn test_requests_carry_endpoint_and_path() {
        let detail = event_detail_request("evt-42", "secret");
        assert_eq!(detail.endpoint, "events");
        assert_eq!(detail.path, "/evt-42");
        assert_eq!(detail.body, event_detail_body("secret"));

        let listing = events_request(&EventQuery::default(), "secret");
        assert_eq!(listing.path, "");
        assert_eq!(listing.body["page"]["size"], 24);

        let categories = categories_request("secret");
        assert_eq!(categories.endpoint, "categories");
        assert_eq!(
            serde_json::to_value(&categories).unwrap(),
            json!({"endpoint": "categories", "path": "", "body": {"token": "secret"}})
        );
    }
}
