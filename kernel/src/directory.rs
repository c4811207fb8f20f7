//! Read-side views over the cached event list.
//!
//! Nothing here mutates its input: every function builds a new list.

use crate::model::{
    event::{
        filter::{DateOrder, EventFilter},
        Event,
    },
    role::Role,
    user::User,
};
use chrono::NaiveDate;

/// Applies search, category and date ordering, in that order.
///
/// Sorting is stable, so events on the same date keep their input order.
pub fn apply_filter(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    let search = filter.search.to_lowercase();

    let mut filtered: Vec<Event> = events
        .iter()
        .filter(|event| search.is_empty() || matches_search(event, &search))
        .filter(|event| filter.category.matches(event.category))
        .cloned()
        .collect();

    match filter.date {
        DateOrder::All => {}
        DateOrder::Soonest => filtered.sort_by_key(|event| event.date),
        DateOrder::Farthest => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
    }

    filtered
}

fn matches_search(event: &Event, search_lower: &str) -> bool {
    event.title.to_lowercase().contains(search_lower)
        || event.description.to_lowercase().contains(search_lower)
        || event.location.to_lowercase().contains(search_lower)
}

// 参加者なら参加中のイベント、主催者なら自分が作成したイベント
pub fn user_events(events: &[Event], user: &User) -> Vec<Event> {
    events
        .iter()
        .filter(|event| match user.role {
            Role::Attendee => event.is_attending(user.id),
            Role::Organizer => event.is_organized_by(user.id),
        })
        .cloned()
        .collect()
}

// ダッシュボードのおすすめ一覧。自分に関係するイベントは除く
pub fn discover(events: &[Event], user: Option<&User>) -> Vec<Event> {
    let Some(user) = user else {
        return events.to_vec();
    };
    events
        .iter()
        .filter(|event| match user.role {
            Role::Attendee => !event.is_attending(user.id),
            Role::Organizer => !event.is_organized_by(user.id),
        })
        .cloned()
        .collect()
}

/// Splits into (upcoming, past). An event dated today is upcoming.
pub fn split_by_date(events: Vec<Event>, today: NaiveDate) -> (Vec<Event>, Vec<Event>) {
    events.into_iter().partition(|event| event.date >= today)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub event_count: usize,
    pub attendee_count: usize,
    pub spots_remaining: i64,
}

pub fn dashboard_stats(user_events: &[Event]) -> DashboardStats {
    DashboardStats {
        event_count: user_events.len(),
        attendee_count: user_events.iter().map(Event::attendee_count).sum(),
        spots_remaining: user_events.iter().map(Event::spots_remaining).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        event::{
            filter::{CategoryFilter, EventFilter},
            EventCategory,
        },
        id::{EventId, UserId},
        user::UserProfile,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, description: &str, category: EventCategory, date: NaiveDate) -> Event {
        Event {
            id: EventId::new(),
            title: title.into(),
            description: description.into(),
            date,
            time: "18:00".into(),
            location: "Seattle".into(),
            price: 10.0,
            category,
            image_url: String::new(),
            capacity: 10,
            organizer_id: UserId::new(),
            organizer_name: "Olivia".into(),
            attendees: vec![],
        }
    }

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role,
            profile: UserProfile::default(),
            verified: true,
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event(
                "Jazz Night",
                "Smooth standards all evening",
                EventCategory::Music,
                date(2026, 12, 5),
            ),
            event(
                "Jazz Cruise",
                "Sail to the summer music festival",
                EventCategory::Travel,
                date(2026, 11, 1),
            ),
            event(
                "Tech Meetup",
                "Lightning talks about compilers",
                EventCategory::Tech,
                date(2026, 11, 1),
            ),
            event(
                "Pottery Workshop",
                "Hands-on wheel throwing",
                EventCategory::Workshops,
                date(2027, 1, 15),
            ),
        ]
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn music_search_matches_title_or_description() {
        let filter = EventFilter {
            search: "music".into(),
            category: CategoryFilter::All,
            date: DateOrder::All,
        };
        let mut events = sample();
        // タイトルに "music" を含まないので説明文で一致する必要がある
        events[0].description = "Live Music downtown".into();

        let result = apply_filter(&events, &filter);
        assert_eq!(titles(&result), vec!["Jazz Night", "Jazz Cruise"]);
    }

    #[test]
    fn search_is_case_insensitive_and_covers_location() {
        let mut events = sample();
        events[3].location = "Fremont Studio".into();
        let filter = EventFilter {
            search: "FREMONT".into(),
            ..Default::default()
        };

        assert_eq!(titles(&apply_filter(&events, &filter)), vec!["Pottery Workshop"]);
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let events = sample();
        let result = apply_filter(&events, &EventFilter::default());
        assert_eq!(result, events);
    }

    #[test]
    fn category_filter_is_exact() {
        let filter = EventFilter {
            category: CategoryFilter::Only(EventCategory::Tech),
            ..Default::default()
        };
        let result = apply_filter(&sample(), &filter);
        assert_eq!(titles(&result), vec!["Tech Meetup"]);
        assert!(result.iter().all(|e| e.category == EventCategory::Tech));
    }

    #[test]
    fn soonest_is_ascending_and_stable() {
        let filter = EventFilter {
            date: DateOrder::Soonest,
            ..Default::default()
        };
        let result = apply_filter(&sample(), &filter);

        assert!(result.windows(2).all(|w| w[0].date <= w[1].date));
        // 同日の 2 件は入力順のまま
        assert_eq!(
            titles(&result),
            vec!["Jazz Cruise", "Tech Meetup", "Jazz Night", "Pottery Workshop"]
        );
    }

    #[test]
    fn farthest_is_descending_and_stable() {
        let filter = EventFilter {
            date: DateOrder::Farthest,
            ..Default::default()
        };
        let result = apply_filter(&sample(), &filter);

        assert!(result.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(
            titles(&result),
            vec!["Pottery Workshop", "Jazz Night", "Jazz Cruise", "Tech Meetup"]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let events = sample();
        let filters = [
            EventFilter::default(),
            EventFilter {
                search: "jazz".into(),
                category: CategoryFilter::All,
                date: DateOrder::Farthest,
            },
            EventFilter {
                search: "a".into(),
                category: CategoryFilter::Only(EventCategory::Music),
                date: DateOrder::Soonest,
            },
        ];

        for filter in filters {
            let once = apply_filter(&events, &filter);
            let twice = apply_filter(&once, &filter);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn user_events_depend_on_role() {
        let attendee = user(Role::Attendee);
        let organizer = user(Role::Organizer);
        let mut events = sample();
        events[1].attendees.push(attendee.id);
        events[2].organizer_id = organizer.id;

        assert_eq!(titles(&user_events(&events, &attendee)), vec!["Jazz Cruise"]);
        assert_eq!(titles(&user_events(&events, &organizer)), vec!["Tech Meetup"]);
    }

    #[test]
    fn discover_hides_own_events() {
        let attendee = user(Role::Attendee);
        let mut events = sample();
        events[0].attendees.push(attendee.id);

        let result = discover(&events, Some(&attendee));
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|e| !e.is_attending(attendee.id)));
        assert_eq!(discover(&events, None).len(), 4);
    }

    #[test]
    fn split_treats_today_as_upcoming() {
        let (upcoming, past) = split_by_date(sample(), date(2026, 11, 1));
        assert_eq!(upcoming.len(), 4);
        assert!(past.is_empty());

        let (upcoming, past) = split_by_date(sample(), date(2026, 12, 1));
        assert_eq!(titles(&upcoming), vec!["Jazz Night", "Pottery Workshop"]);
        assert_eq!(titles(&past), vec!["Jazz Cruise", "Tech Meetup"]);
    }

    #[test]
    fn stats_sum_over_events() {
        let mut events = sample();
        events[0].attendees = vec![UserId::new(), UserId::new()];
        events[1].capacity = 3;
        events[1].attendees = vec![UserId::new()];

        let stats = dashboard_stats(&events[..2]);
        assert_eq!(
            stats,
            DashboardStats {
                event_count: 2,
                attendee_count: 3,
                spots_remaining: 8 + 2,
            }
        );
    }
}
