//! Filter engine: narrows the loaded event sequence by the board's filter
//! controls.
//!
//! Filtering never copies records and never reorders them. Every active
//! criterion must hold (logical AND); unset criteria exclude nothing.
//! Unrecognised input is treated as unset rather than rejected.

use serde::Serialize;
use utoipa::ToSchema;

use super::EventRecord;

/// Indoor/outdoor constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Only events with `is_indoor == true`.
    Indoor,
    /// Only events with `is_indoor == false`.
    Outdoor,
    /// No constraint.
    #[default]
    Any,
}

impl LocationType {
    /// Lenient parse: anything other than `indoor` / `outdoor` is [`LocationType::Any`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "indoor" => Self::Indoor,
            "outdoor" => Self::Outdoor,
            _ => Self::Any,
        }
    }

    /// Form value used by the select control.
    #[must_use]
    pub const fn as_form_value(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Any => "",
        }
    }
}

/// The current combination of filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterCriteria {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-sensitive substring of the event location.
    pub city: Option<String>,
    /// Indoor/outdoor constraint.
    pub location_type: LocationType,
    /// Only free events.
    pub free_only: bool,
    /// Only child-friendly events.
    pub child_friendly_required: bool,
    /// Only events with parking.
    pub parking_required: bool,
}

impl FilterCriteria {
    /// Criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the category; blank text leaves it unset.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    /// Sets the city; blank text leaves it unset.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_empty(city.into());
        self
    }

    /// Sets the indoor/outdoor constraint.
    #[must_use]
    pub fn with_location_type(mut self, location_type: LocationType) -> Self {
        self.location_type = location_type;
        self
    }

    /// Requires free events.
    #[must_use]
    pub fn free_only(mut self, on: bool) -> Self {
        self.free_only = on;
        self
    }

    /// Requires child-friendly events.
    #[must_use]
    pub fn child_friendly(mut self, on: bool) -> Self {
        self.child_friendly_required = on;
        self
    }

    /// Requires parking.
    #[must_use]
    pub fn parking(mut self, on: bool) -> Self {
        self.parking_required = on;
        self
    }

    /// Returns `true` if no criterion is active.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        self.category.is_none()
            && self.city.is_none()
            && self.location_type == LocationType::Any
            && !self.free_only
            && !self.child_friendly_required
            && !self.parking_required
    }

    /// Combines two criteria. Text and location constraints from `self`
    /// take precedence when both sides set the same field; flags are OR-ed.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        Self {
            category: self.category.clone().or_else(|| other.category.clone()),
            city: self.city.clone().or_else(|| other.city.clone()),
            location_type: match self.location_type {
                LocationType::Any => other.location_type,
                set => set,
            },
            free_only: self.free_only || other.free_only,
            child_friendly_required: self.child_friendly_required || other.child_friendly_required,
            parking_required: self.parking_required || other.parking_required,
        }
    }

    /// Returns `true` if `event` satisfies every active criterion.
    #[must_use]
    pub fn matches(&self, event: &EventRecord) -> bool {
        if let Some(category) = &self.category
            && event.category != *category
        {
            return false;
        }

        if let Some(city) = &self.city {
            match &event.location {
                Some(location) if location.contains(city.as_str()) => {}
                _ => return false,
            }
        }

        let location_ok = match self.location_type {
            LocationType::Indoor => event.is_indoor,
            LocationType::Outdoor => !event.is_indoor,
            LocationType::Any => true,
        };

        location_ok
            && (!self.free_only || event.is_free)
            && (!self.child_friendly_required || event.child_friendly)
            && (!self.parking_required || event.has_parking)
    }

    /// Returns the events satisfying every active criterion, in input order.
    ///
    /// Accepts the full sequence (`&[EventRecord]`) or an already-filtered
    /// view (`Vec<&EventRecord>`), so filters compose.
    pub fn apply<'a, I>(&self, events: I) -> Vec<&'a EventRecord>
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::fixture;

    fn events() -> Vec<EventRecord> {
        let Some(today) = chrono::NaiveDate::from_ymd_opt(2025, 8, 1) else {
            panic!("valid date");
        };
        fixture::events_for(today)
    }

    fn ids(events: &[&EventRecord]) -> Vec<String> {
        events.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn vacuous_criteria_is_identity() {
        let all = events();
        let criteria = FilterCriteria::new();
        assert!(criteria.is_vacuous());
        let filtered = criteria.apply(&all);
        assert_eq!(filtered.len(), all.len());
        assert!(filtered.iter().zip(all.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn empty_sequence_stays_empty() {
        let none: Vec<EventRecord> = Vec::new();
        let criteria = FilterCriteria::new().free_only(true).with_city("守谷市");
        assert!(criteria.apply(&none).is_empty());
    }

    #[test]
    fn free_only_counts_seven_of_twelve() {
        let all = events();
        assert_eq!(all.len(), 12);
        let filtered = FilterCriteria::new().free_only(true).apply(&all);
        assert_eq!(filtered.len(), 7);
        assert!(filtered.iter().all(|e| e.is_free));
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let all = events();
        let criteria = FilterCriteria::new().child_friendly(true).parking(true);
        let filtered = criteria.apply(&all);

        let mut cursor = all.iter();
        for picked in &filtered {
            assert!(cursor.any(|e| e == *picked), "order not preserved");
        }

        let excluded: Vec<_> = all.iter().filter(|e| !filtered.contains(e)).collect();
        assert!(excluded.iter().all(|e| !criteria.matches(e)));
    }

    #[test]
    fn category_is_exact_match() {
        let all = events();
        let filtered = FilterCriteria::new().with_category("教育").apply(&all);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|e| e.category == "教育"));

        let partial = FilterCriteria::new().with_category("教").apply(&all);
        assert!(partial.is_empty());
    }

    #[test]
    fn city_is_case_sensitive_substring_of_location() {
        let all = events();
        let filtered = FilterCriteria::new().with_city("守谷市").apply(&all);
        assert!(!filtered.is_empty());
        assert!(
            filtered
                .iter()
                .all(|e| e.location.as_deref().is_some_and(|l| l.contains("守谷市")))
        );
    }

    #[test]
    fn city_filter_skips_records_without_location() {
        let mut all = events();
        if let Some(first) = all.first_mut() {
            first.location = None;
        }
        let filtered = FilterCriteria::new().with_city("市").apply(&all);
        assert_eq!(filtered.len(), all.len() - 1);
    }

    #[test]
    fn indoor_and_outdoor_partition_the_sequence() {
        let all = events();
        let indoor = FilterCriteria::new()
            .with_location_type(LocationType::Indoor)
            .apply(&all);
        let outdoor = FilterCriteria::new()
            .with_location_type(LocationType::Outdoor)
            .apply(&all);
        assert_eq!(indoor.len() + outdoor.len(), all.len());
        assert!(indoor.iter().all(|e| e.is_indoor));
        assert!(outdoor.iter().all(|e| !e.is_indoor));
    }

    #[test]
    fn unknown_location_type_is_permissive() {
        assert_eq!(LocationType::parse_lenient("rooftop"), LocationType::Any);
        assert_eq!(LocationType::parse_lenient(""), LocationType::Any);
        assert_eq!(LocationType::parse_lenient(" Indoor "), LocationType::Indoor);
        assert_eq!(LocationType::parse_lenient("OUTDOOR"), LocationType::Outdoor);
    }

    #[test]
    fn blank_text_criteria_stay_unset() {
        let criteria = FilterCriteria::new().with_category("  ").with_city("");
        assert!(criteria.is_vacuous());
    }

    #[test]
    fn disjoint_filters_compose() {
        let all = events();
        let c1 = FilterCriteria::new().free_only(true).with_category("地域");
        let c2 = FilterCriteria::new()
            .with_location_type(LocationType::Outdoor)
            .parking(true);

        let stepwise = c2.apply(c1.apply(&all));
        let combined = c1.and(&c2).apply(&all);
        assert_eq!(ids(&stepwise), ids(&combined));
    }
}
