//! Mapping of the JSON-LD event feed into typed records.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::types::{Category, Event, Feed, Image, Organizer, Schedule};

/// Classification scheme whose entries are event categories
pub const CATEGORY_SCHEME_ID: &str = "f3e1f0b0-0474-4e95-8fa2-94b4dd5aabdf";

#[derive(Debug, Deserialize)]
struct RawFeed {
    #[serde(rename = "@graph")]
    graph: Option<Vec<RawEvent>>,
    #[serde(default)]
    meta: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "@id")]
    id: String,
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "dc:slug")]
    slug: Option<String>,
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
    // Arrays may be absent or null
    location: Option<Vec<RawPlace>>,
    organizer: Option<Vec<RawOrganizer>>,
    image: Option<Vec<RawImage>>,
    #[serde(rename = "eventSchedule")]
    event_schedule: Option<Vec<Schedule>>,
    #[serde(rename = "dc:classification")]
    classification: Option<Vec<RawClassification>>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOrganizer {
    name: Option<String>,
    address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    street_address: Option<String>,
    address_locality: Option<String>,
    postal_code: Option<String>,
    telephone: Option<String>,
    email: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(rename = "@id")]
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
    #[serde(rename = "dc:webUrl")]
    web_url: Option<String>,
    width: Option<RawQuantity>,
    height: Option<RawQuantity>,
    #[serde(rename = "copyrightNotice")]
    copyright_notice: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuantity {
    value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "skos:prefLabel")]
    pref_label: Option<String>,
    #[serde(rename = "skos:inScheme")]
    in_scheme: Option<RawReference>,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "@id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCategoryList {
    #[serde(rename = "@graph")]
    graph: Option<Vec<RawCategory>>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "skos:prefLabel")]
    pref_label: Option<String>,
}

impl From<RawOrganizer> for Organizer {
    fn from(raw: RawOrganizer) -> Self {
        let address = raw.address.unwrap_or_default();
        Organizer {
            name: raw.name,
            address: address.street_address,
            city: address.address_locality,
            zip: address.postal_code,
            telephone: address.telephone,
            email: address.email,
            url: address.url,
        }
    }
}

impl From<RawImage> for Image {
    fn from(raw: RawImage) -> Self {
        Image {
            id: raw.id,
            name: raw.name,
            thumbnail_url: raw.thumbnail_url,
            url: raw.web_url,
            width: dimension(raw.width),
            height: dimension(raw.height),
            copyright_notice: raw.copyright_notice,
        }
    }
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let categories = raw
            .classification
            .unwrap_or_default()
            .into_iter()
            .filter(|c| {
                c.in_scheme
                    .as_ref()
                    .and_then(|scheme| scheme.id.as_deref())
                    == Some(CATEGORY_SCHEME_ID)
            })
            .map(|c| Category {
                id: c.id,
                name: c.pref_label.unwrap_or_default(),
            })
            .collect();

        Event {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            slug: raw.slug.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            categories,
            // Only the first location is shown
            location: raw
                .location
                .unwrap_or_default()
                .into_iter()
                .next()
                .and_then(|place| place.name),
            start_date: raw.start_date,
            end_date: raw.end_date,
            images: raw
                .image
                .unwrap_or_default()
                .into_iter()
                .map(Image::from)
                .collect(),
            organizer: raw
                .organizer
                .unwrap_or_default()
                .into_iter()
                .next()
                .map(Organizer::from)
                .unwrap_or_default(),
            schedule: raw.event_schedule.unwrap_or_default(),
        }
    }
}

/// Image dimensions arrive as numbers or numeric strings
fn dimension(quantity: Option<RawQuantity>) -> Option<u32> {
    match quantity?.value? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an event feed payload
pub fn parse_feed(json: &str) -> Result<Feed> {
    let raw: RawFeed = serde_json::from_str(json)?;
    let events: Vec<Event> = raw
        .graph
        .unwrap_or_default()
        .into_iter()
        .map(Event::from)
        .collect();
    debug!(events = events.len(), "parsed event feed");
    Ok(Feed {
        events,
        meta: raw.meta,
    })
}

/// Parse a category listing payload
pub fn parse_categories(json: &str) -> Result<Vec<Category>> {
    let raw: RawCategoryList = serde_json::from_str(json)?;
    Ok(raw
        .graph
        .unwrap_or_default()
        .into_iter()
        .map(|c| Category {
            id: c.id,
            name: c.pref_label.unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ByDay;
    use serde_json::json;

    fn sample_feed() -> String {
        json!({
            "@graph": [{
                "@id": "evt-1",
                "@type": "Event",
                "name": "Jazz im Hof",
                "description": "Open air concert",
                "dc:slug": "jazz-im-hof",
                "startDate": "2024-06-01",
                "endDate": "2024-08-31",
                "location": [{"name": "Stadtpark"}, {"name": "Ignored"}],
                "organizer": [{
                    "name": "Kulturverein",
                    "address": {
                        "streetAddress": "Hauptplatz 1",
                        "addressLocality": "Villach",
                        "postalCode": "9500",
                        "telephone": "+43 4242 000",
                        "email": "info@example.org",
                        "url": "https://example.org"
                    }
                }],
                "image": [{
                    "@id": "img-1",
                    "name": "Stage",
                    "thumbnailUrl": "https://example.org/t.jpg",
                    "dc:webUrl": "https://example.org/i.jpg",
                    "width": {"value": 1200},
                    "height": {"value": "800"},
                    "copyrightNotice": "CC-BY"
                }],
                "eventSchedule": [{
                    "@type": "Schedule",
                    "startDate": "2024-06-07",
                    "endDate": "2024-08-30",
                    "startTime": "19:30:00",
                    "repeatFrequency": "P1W",
                    "byDay": "https://schema.org/Friday"
                }],
                "dc:classification": [
                    {
                        "@id": "cat-music",
                        "skos:prefLabel": "Music",
                        "skos:inScheme": {"@id": CATEGORY_SCHEME_ID}
                    },
                    {
                        "@id": "tag-outdoor",
                        "skos:prefLabel": "Outdoor",
                        "skos:inScheme": {"@id": "other-scheme"}
                    }
                ]
            }],
            "meta": {"total": 1, "pages": 1}
        })
        .to_string()
    }

    #[test]
    fn test_parse_feed_maps_event() {
        let feed = parse_feed(&sample_feed()).unwrap();
        assert_eq!(feed.events.len(), 1);
        assert_eq!(feed.meta["total"], 1);

        let event = &feed.events[0];
        assert_eq!(event.id, "evt-1");
        assert_eq!(event.name, "Jazz im Hof");
        assert_eq!(event.slug, "jazz-im-hof");
        assert_eq!(event.location.as_deref(), Some("Stadtpark"));
        assert_eq!(event.organizer.name.as_deref(), Some("Kulturverein"));
        assert_eq!(event.organizer.address.as_deref(), Some("Hauptplatz 1"));
        assert_eq!(event.organizer.city.as_deref(), Some("Villach"));
        assert_eq!(event.organizer.zip.as_deref(), Some("9500"));
        assert_eq!(event.organizer.url.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn test_parse_feed_maps_images() {
        let feed = parse_feed(&sample_feed()).unwrap();
        let image = &feed.events[0].images[0];
        assert_eq!(image.url.as_deref(), Some("https://example.org/i.jpg"));
        assert_eq!(image.width, Some(1200));
        assert_eq!(image.height, Some(800));
        assert_eq!(image.copyright_notice.as_deref(), Some("CC-BY"));
    }

    #[test]
    fn test_parse_feed_maps_schedule() {
        let feed = parse_feed(&sample_feed()).unwrap();
        let schedule = &feed.events[0].schedule[0];
        assert_eq!(schedule.start_date, "2024-06-07");
        assert_eq!(schedule.end_date.as_deref(), Some("2024-08-30"));
        assert_eq!(schedule.start_time.as_deref(), Some("19:30:00"));
        assert_eq!(schedule.repeat_frequency.as_deref(), Some("P1W"));
        assert_eq!(
            schedule.by_day,
            Some(ByDay::Single("https://schema.org/Friday".to_string()))
        );
    }

    #[test]
    fn test_parse_feed_keeps_only_category_scheme() {
        let feed = parse_feed(&sample_feed()).unwrap();
        assert_eq!(
            feed.events[0].categories,
            vec![Category {
                id: "cat-music".to_string(),
                name: "Music".to_string()
            }]
        );
    }

    #[test]
    fn test_parse_feed_tolerates_missing_arrays() {
        let json = json!({"@graph": [{"@id": "evt-2", "name": "Bare"}]}).to_string();
        let feed = parse_feed(&json).unwrap();
        let event = &feed.events[0];
        assert!(event.schedule.is_empty());
        assert!(event.images.is_empty());
        assert_eq!(event.location, None);
        assert_eq!(event.organizer, Organizer::default());
        assert_eq!(feed.meta, serde_json::Value::Null);
    }

    #[test]
    fn test_parse_feed_tolerates_null_arrays() {
        let json = json!({
            "@graph": [{
                "@id": "evt-3",
                "name": "Nulls",
                "location": null,
                "image": null,
                "organizer": null,
                "dc:classification": null,
                "eventSchedule": [{"startDate": "2030-01-01"}]
            }]
        })
        .to_string();
        let feed = parse_feed(&json).unwrap();
        let event = &feed.events[0];
        assert!(event.images.is_empty());
        assert!(event.categories.is_empty());
        assert_eq!(event.location, None);
        assert_eq!(event.organizer, Organizer::default());
        assert_eq!(event.schedule.len(), 1);
        assert_eq!(event.schedule[0].start_date, "2030-01-01");

        let empty = parse_feed(r#"{"@graph": null, "meta": {"total": 0}}"#).unwrap();
        assert!(empty.events.is_empty());
        assert!(parse_categories(r#"{"@graph": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_malformed_json() {
        assert!(parse_feed("{not json").is_err());
    }

    #[test]
    fn test_parse_categories() {
        let json = json!({
            "@graph": [
                {"@id": "cat-1", "skos:prefLabel": "Music"},
                {"@id": "cat-2", "skos:prefLabel": "Theatre"}
            ]
        })
        .to_string();
        let categories = parse_categories(&json).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Theatre");
    }
}
