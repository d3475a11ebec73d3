//! Filter query parameters shared by the HTML board and the JSON API.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{FilterCriteria, LocationType};

/// Filter controls as they arrive in a query string.
///
/// Every field is optional and lenient: unknown values are treated as unset
/// rather than rejected. Checkbox flags are on for any non-empty value other
/// than `false`, `0` or `off`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterQuery {
    /// Exact category.
    pub category: Option<String>,
    /// Substring of the event location, usually a city name.
    pub city: Option<String>,
    /// `indoor`, `outdoor`, or empty for either.
    pub location: Option<String>,
    /// Only free events.
    pub free_only: Option<String>,
    /// Only child-friendly events.
    pub child_friendly: Option<String>,
    /// Only events with parking.
    pub parking_required: Option<String>,
    /// Legacy form of `location=indoor`.
    pub indoor_only: Option<String>,
    /// Legacy form of `location=outdoor`.
    pub outdoor_only: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "false" | "0" | "off"),
    }
}

impl FilterQuery {
    /// Converts the query into criteria.
    ///
    /// `location` takes precedence over the legacy flags; the legacy flags
    /// cancel out when both are set.
    #[must_use]
    pub fn to_criteria(&self) -> FilterCriteria {
        let location_type = match self.location.as_deref().map(LocationType::parse_lenient) {
            Some(kind) if kind != LocationType::Any => kind,
            _ => match (
                flag(self.indoor_only.as_deref()),
                flag(self.outdoor_only.as_deref()),
            ) {
                (true, false) => LocationType::Indoor,
                (false, true) => LocationType::Outdoor,
                _ => LocationType::Any,
            },
        };

        FilterCriteria::new()
            .with_category(self.category.clone().unwrap_or_default())
            .with_city(self.city.clone().unwrap_or_default())
            .with_location_type(location_type)
            .free_only(flag(self.free_only.as_deref()))
            .child_friendly(flag(self.child_friendly.as_deref()))
            .parking(flag(self.parking_required.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_vacuous() {
        assert!(FilterQuery::default().to_criteria().is_vacuous());
    }

    #[test]
    fn flags_are_lenient() {
        let query = FilterQuery {
            free_only: Some("true".to_string()),
            child_friendly: Some("on".to_string()),
            parking_required: Some("0".to_string()),
            ..FilterQuery::default()
        };
        let criteria = query.to_criteria();
        assert!(criteria.free_only);
        assert!(criteria.child_friendly_required);
        assert!(!criteria.parking_required);
    }

    #[test]
    fn location_wins_over_legacy_flags() {
        let query = FilterQuery {
            location: Some("outdoor".to_string()),
            indoor_only: Some("1".to_string()),
            ..FilterQuery::default()
        };
        assert_eq!(query.to_criteria().location_type, LocationType::Outdoor);
    }

    #[test]
    fn legacy_flags_map_to_location_type() {
        let indoor = FilterQuery {
            indoor_only: Some("1".to_string()),
            ..FilterQuery::default()
        };
        assert_eq!(indoor.to_criteria().location_type, LocationType::Indoor);

        let both = FilterQuery {
            indoor_only: Some("1".to_string()),
            outdoor_only: Some("1".to_string()),
            ..FilterQuery::default()
        };
        assert_eq!(both.to_criteria().location_type, LocationType::Any);
    }

    #[test]
    fn unknown_location_is_ignored() {
        let query = FilterQuery {
            location: Some("rooftop".to_string()),
            category: Some("  ".to_string()),
            ..FilterQuery::default()
        };
        assert!(query.to_criteria().is_vacuous());
    }
}
