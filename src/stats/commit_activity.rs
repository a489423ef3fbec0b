use super::client::WeekActivity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const LOG_TARGET: &str = "  activity";
const DAYS_PER_WEEK: usize = 7;

/// Commit totals for one week, starting on the date in `week`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitActivity {
    /// Start of the week as `YYYY-MM-DD`, in UTC
    pub week: String,
    pub total: u64,
    pub days: Vec<u64>,
}

impl From<WeekActivity> for CommitActivity {
    fn from(activity: WeekActivity) -> Self {
        let start = DateTime::from_timestamp(activity.week, 0).unwrap_or_else(|| {
            log::warn!(target: LOG_TARGET, "Week timestamp {} is out of range, reporting it as the Unix epoch", activity.week);
            DateTime::<Utc>::UNIX_EPOCH
        });
        let week = start.format("%Y-%m-%d").to_string();

        Self {
            week,
            total: activity.total,
            days: activity.days.unwrap_or_else(|| vec![0; DAYS_PER_WEEK]),
        }
    }
}

impl CommitActivity {
    /// Keep the `count` most recent weeks of a chronologically ordered listing.
    #[must_use]
    pub fn recent(weeks: Vec<WeekActivity>, count: usize) -> Vec<Self> {
        let skip = weeks.len().saturating_sub(count);
        weeks.into_iter().skip(skip).map(Self::from).collect()
    }
}
