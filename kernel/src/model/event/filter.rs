use crate::model::event::EventCategory;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub search: String,
    pub category: CategoryFilter,
    pub date: DateOrder,
}

impl EventFilter {
    /// Overwrites only the fields present in `patch`.
    pub fn patch(self, patch: EventFilterPatch) -> Self {
        Self {
            search: patch.search.unwrap_or(self.search),
            category: patch.category.unwrap_or(self.category),
            date: patch.date.unwrap_or(self.date),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventFilterPatch {
    pub search: Option<String>,
    pub category: Option<CategoryFilter>,
    pub date: Option<DateOrder>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl CategoryFilter {
    pub fn matches(self, category: EventCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    /// Parses a query value. Anything that is not a stored category
    /// (including "All" and typos) means no constraint.
    pub fn parse_lenient(value: &str) -> Self {
        EventCategory::from_str(value)
            .map(CategoryFilter::Only)
            .unwrap_or(CategoryFilter::All)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateOrder {
    #[default]
    All,
    Soonest,
    Farthest,
}

impl DateOrder {
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "soonest" => DateOrder::Soonest,
            "farthest" => DateOrder::Farthest,
            _ => DateOrder::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_values_mean_no_constraint() {
        assert_eq!(CategoryFilter::parse_lenient("Sports"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse_lenient("All"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse_lenient("Music"),
            CategoryFilter::Only(EventCategory::Music)
        );
        assert_eq!(DateOrder::parse_lenient("tomorrow"), DateOrder::All);
        assert_eq!(DateOrder::parse_lenient("farthest"), DateOrder::Farthest);
    }

    #[test]
    fn patch_keeps_omitted_fields() {
        let filter = EventFilter {
            search: "jazz".into(),
            category: CategoryFilter::Only(EventCategory::Music),
            date: DateOrder::Soonest,
        };
        let patched = filter.patch(EventFilterPatch {
            date: Some(DateOrder::Farthest),
            ..Default::default()
        });

        assert_eq!(patched.search, "jazz");
        assert_eq!(patched.category, CategoryFilter::Only(EventCategory::Music));
        assert_eq!(patched.date, DateOrder::Farthest);
    }
}
