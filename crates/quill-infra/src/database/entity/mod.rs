//! SeaORM entities and their conversions to and from the domain types.

pub mod category;
pub mod post;
pub mod tag;
pub mod user;

use sea_orm::prelude::Json;
use uuid::Uuid;

/// Encode a list of references as a JSON array of strings.
pub(crate) fn ids_to_json(ids: &[Uuid]) -> Json {
    Json::Array(ids.iter().map(|id| Json::String(id.to_string())).collect())
}

/// Decode a JSON array of reference strings, skipping anything that is not a UUID.
pub(crate) fn ids_from_json(value: &Json) -> Vec<Uuid> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Json::as_str)
                .filter_map(|s| Uuid::parse_str(s).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_json_round_trip_skips_garbage() {
        let ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let mut json = ids_to_json(&ids);
        if let Json::Array(items) = &mut json {
            items.push(Json::from(42));
        }

        assert_eq!(ids_from_json(&json), ids);
        assert!(ids_from_json(&Json::Null).is_empty());
    }
}
