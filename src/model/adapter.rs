// File: src/model/adapter.rs
// Converts loosely-typed dataset records into validated `Item`s.
//
// Records come from hand-edited JSON or YAML files, so field types are not
// trusted. A record that cannot produce the required fields is rejected on
// its own; optional fields with the wrong type are treated as absent.
use crate::error::MalformedItem;
use crate::model::item::{GeoPoint, Item, PriceClass};
use chrono::NaiveDate;
use serde_json::{Map, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn date(obj: &Map<String, Value>, key: &'static str) -> Result<Option<NaiveDate>, MalformedItem> {
    match text(obj, key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| MalformedItem::InvalidDate {
                field: key,
                value: raw,
            }),
    }
}

impl TryFrom<&Value> for Item {
    type Error = MalformedItem;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let obj = value.as_object().ok_or(MalformedItem::NotARecord)?;

        let name = text(obj, "name")
            .or_else(|| text(obj, "title"))
            .ok_or(MalformedItem::MissingField("name"))?;

        // Single-day datasets only carry `date`.
        let single = date(obj, "date")?;
        let start = date(obj, "start_date")?;
        let end = date(obj, "end_date")?;

        let end_date = end
            .or(single)
            .or(start)
            .ok_or(MalformedItem::MissingField("end_date"))?;
        let start_date = start.or(single).unwrap_or(end_date);

        let price = text(obj, "free_or_paid")
            .and_then(|s| PriceClass::parse(&s))
            .unwrap_or(PriceClass::Paid);

        let coordinates = match (number(obj, "lat"), number(obj, "lng")) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        };

        Ok(Item {
            name,
            start_date,
            end_date,
            location: text(obj, "location").unwrap_or_default(),
            price,
            organization_url: text(obj, "organization_url").unwrap_or_default(),
            logo_url: text(obj, "logo"),
            featured: matches!(obj.get("featured"), Some(Value::Bool(true))),
            region: text(obj, "region"),
            description: text(obj, "description"),
            coordinates,
        })
    }
}

/// Validates every record, keeping the good ones in dataset order.
pub fn items_from_records(records: &[Value]) -> Vec<Item> {
    let mut items = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        match Item::try_from(record) {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("Skipping event record #{}: {}", idx, e),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_record() {
        let v = json!({
            "name": "Tech Fair",
            "start_date": "2099-01-01",
            "end_date": "2099-01-03",
            "location": "Berlin",
            "free_or_paid": "free",
            "organization_url": "https://example.org",
            "logo": "logo.png",
            "featured": true,
            "lat": 52.5,
            "lng": 13.4
        });
        let item = Item::try_from(&v).unwrap();
        assert_eq!(item.name, "Tech Fair");
        assert_eq!(item.price, PriceClass::Free);
        assert_eq!(item.logo_url.as_deref(), Some("logo.png"));
        assert!(item.featured);
        assert_eq!(item.coordinates, Some(GeoPoint::new(52.5, 13.4)));
    }

    #[test]
    fn title_and_single_date_variant() {
        let v = json!({
            "title": "Meetup",
            "date": "2030-05-05",
            "region": "North",
            "description": "Monthly"
        });
        let item = Item::try_from(&v).unwrap();
        assert_eq!(item.name, "Meetup");
        assert_eq!(item.start_date, item.end_date);
        assert_eq!(item.region.as_deref(), Some("North"));
        assert_eq!(item.price, PriceClass::Paid);
    }

    #[test]
    fn wrong_typed_coordinates_are_absent() {
        let v = json!({"name": "A", "end_date": "2030-01-01", "lat": "52.5", "lng": 13.4});
        let item = Item::try_from(&v).unwrap();
        assert!(item.coordinates.is_none());

        let v = json!({"name": "A", "end_date": "2030-01-01", "lat": 52.5});
        assert!(Item::try_from(&v).unwrap().coordinates.is_none());
    }

    #[test]
    fn malformed_records() {
        assert_eq!(
            Item::try_from(&json!({"end_date": "2030-01-01"})),
            Err(MalformedItem::MissingField("name"))
        );
        assert_eq!(
            Item::try_from(&json!({"name": "A"})),
            Err(MalformedItem::MissingField("end_date"))
        );
        assert!(matches!(
            Item::try_from(&json!({"name": "A", "end_date": "soon"})),
            Err(MalformedItem::InvalidDate { field: "end_date", .. })
        ));
        assert_eq!(Item::try_from(&json!(42)), Err(MalformedItem::NotARecord));
    }

    #[test]
    fn one_bad_record_does_not_blank_the_batch() {
        let records = vec![
            json!({"name": "Good", "end_date": "2030-01-01"}),
            json!({"name": "Bad", "end_date": "31/12/2030"}),
            json!({"name": "Also good", "end_date": "2031-01-01"}),
        ];
        let items = items_from_records(&records);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also good"]);
    }
}
