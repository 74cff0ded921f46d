use chrono::{Datelike, Local, NaiveDate};

/// Snapshot of the wall clock, taken once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Today {
    pub date: NaiveDate,
    /// Day-of-month, 1-based.
    pub day: u32,
    pub days_in_month: u32,
}

impl Today {
    pub fn now() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(date: NaiveDate) -> Self {
        Self {
            date,
            day: date.day(),
            days_in_month: days_in_month(date),
        }
    }

    /// Storage identifier for the active month, zero-based month index.
    pub fn month_key(&self) -> String {
        format!("tasks-{}-{}", self.date.year(), self.date.month0())
    }

    pub fn month_label(&self) -> String {
        self.date.format("%B %Y").to_string()
    }
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map_or(31, |d| d.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(year: i32, month: u32, day: u32) -> Today {
        Today::at(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn month_key_uses_zero_based_month() {
        assert_eq!(day(2024, 3, 14).month_key(), "tasks-2024-2");
        assert_eq!(day(2024, 1, 1).month_key(), "tasks-2024-0");
        assert_eq!(day(2026, 12, 31).month_key(), "tasks-2026-11");
    }

    #[test]
    fn day_counts_cover_leap_years() {
        assert_eq!(day(2024, 2, 10).days_in_month, 29);
        assert_eq!(day(2025, 2, 10).days_in_month, 28);
        assert_eq!(day(2026, 4, 1).days_in_month, 30);
        assert_eq!(day(2026, 12, 25).days_in_month, 31);
    }
}
