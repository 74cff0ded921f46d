use crate::clock::Today;
use crate::models::TaskMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analytics {
    pub completed_days: u32,
    /// Completed share of the month, 0..=100.
    pub progress: u32,
    /// Consecutive completed days ending at today.
    pub streak: u32,
}

pub fn build_analytics(today: &Today, tasks: &TaskMap) -> Analytics {
    build_analytics_at(today.day, today.days_in_month, tasks)
}

pub fn build_analytics_at(today_day: u32, days_in_month: u32, tasks: &TaskMap) -> Analytics {
    let completed_days = tasks.values().filter(|record| record.is_done()).count() as u32;
    let progress =
        (f64::from(completed_days) * 100.0 / f64::from(days_in_month)).round() as u32;

    let mut streak = 0;
    for day in (1..=today_day).rev() {
        if tasks.get(&day).is_some_and(|record| record.is_done()) {
            streak += 1;
        } else {
            break;
        }
    }

    Analytics {
        completed_days,
        progress,
        streak,
    }
}
