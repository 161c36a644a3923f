//! Age bucketing for a sidebar-style conversation list.
//!
//! Conversations are grouped by calendar-day distance from `now`, measured
//! in the caller's timezone: today, the previous seven days, the previous
//! thirty days, and everything older.  `now` is a parameter so bucketing is
//! deterministic under test and across timezones.

use chrono::{DateTime, Days, TimeZone};

use crate::conversation::Conversation;

/// Sidebar section a conversation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    Today,
    PastWeek,
    PastMonth,
    Older,
}

/// Conversations partitioned by [`AgeBucket`], preserving input order within
/// each group.
#[derive(Debug, Default)]
pub struct ConversationGroups<'a> {
    pub today: Vec<&'a Conversation>,
    pub past_week: Vec<&'a Conversation>,
    pub past_month: Vec<&'a Conversation>,
    pub older: Vec<&'a Conversation>,
}

/// Bucket a single creation timestamp relative to `now`.
pub fn bucket_of<Tz: TimeZone>(conversation: &Conversation, now: &DateTime<Tz>) -> AgeBucket {
    let today = now.date_naive();
    let day = conversation
        .created_at
        .with_timezone(&now.timezone())
        .date_naive();

    if day >= today {
        AgeBucket::Today
    } else if Some(day) >= today.checked_sub_days(Days::new(7)) {
        AgeBucket::PastWeek
    } else if Some(day) >= today.checked_sub_days(Days::new(30)) {
        AgeBucket::PastMonth
    } else {
        AgeBucket::Older
    }
}

/// Partition `conversations` into age groups relative to `now`.
pub fn group_by_age<'a, Tz: TimeZone>(
    conversations: &'a [Conversation],
    now: &DateTime<Tz>,
) -> ConversationGroups<'a> {
    let mut groups = ConversationGroups::default();

    for conversation in conversations {
        match bucket_of(conversation, now) {
            AgeBucket::Today => groups.today.push(conversation),
            AgeBucket::PastWeek => groups.past_week.push(conversation),
            AgeBucket::PastMonth => groups.past_month.push(conversation),
            AgeBucket::Older => groups.older.push(conversation),
        }
    }

    groups
}
