//! Plan Allocator — daily time budget and weekly schedule.

use tracing::debug;

use crate::model::{DailyPlan, PlanItem, Recommendation, Weekday, WeeklyPlan};

/// Default daily budget in minutes.
pub const DEFAULT_DAILY_MINUTES: u32 = 30;
/// Length of each weekly session.
pub const WEEKLY_SESSION_MINUTES: u32 = 20;
/// Sessions scheduled per recommendation per week.
pub const WEEKLY_SESSIONS_PER_RECOMMENDATION: usize = 2;

const DAILY_FALLBACK_ACTION: &str = "Practice 10 minutes mindfully.";
const WEEKLY_FALLBACK_ACTION: &str = "Practice 15 minutes mindfully.";

/// Split `minutes_per_day` across `recs` in proportion to their priority.
///
/// Each item gets `max(1, floor(priority / Σpriority · budget))` minutes.
/// If the `max(1, …)` floor pushes the total over budget, the excess is taken
/// from the last item, never below one minute.
///
/// Cutting the last item alone is not always enough: with priorities
/// `[100, 1, 1]` and a 3-minute budget the last item is already at one
/// minute. Whatever the last item cannot absorb is therefore carried on to
/// the items before it, in reverse order, which keeps the total within any
/// budget of at least one minute per item. A smaller budget leaves every item
/// at one minute. No item is ever dropped.
pub fn build_daily_plan(recs: &[Recommendation], minutes_per_day: u32) -> DailyPlan {
    if recs.is_empty() {
        return DailyPlan::default();
    }

    let total_priority: f64 = recs.iter().map(|r| r.priority).sum();
    let total_priority = if total_priority > 0.0 { total_priority } else { 1.0 };
    let budget = f64::from(minutes_per_day);

    let mut items: Vec<PlanItem> = recs
        .iter()
        .map(|r| {
            // `as` saturates: negative or NaN shares become 0, then 1.
            let share = ((r.priority * budget / total_priority).floor() as u32).max(1);
            let action = r.tips.first().map_or(DAILY_FALLBACK_ACTION, String::as_str);
            PlanItem::new(r.facet.as_str(), action, share)
        })
        .collect();

    // Shares plus the one-minute floors can exceed `u32::MAX`.
    let total: u64 = items.iter().map(|i| u64::from(i.minutes)).sum();
    let mut excess = total.saturating_sub(u64::from(minutes_per_day));
    for item in items.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let cut = excess.min(u64::from(item.minutes - 1));
        // `cut` is at most `item.minutes - 1`, so it fits.
        item.minutes -= cut as u32;
        excess -= cut;
    }
    if excess > 0 {
        debug!(minutes_per_day, items = items.len(), excess, "daily budget smaller than item count");
    }

    DailyPlan { items }
}

/// Spread two 20-minute sessions per recommendation over a Sat–Fri week.
///
/// Sessions are assigned round-robin over the combined sequence of all
/// recommendations' sessions, wrapping after Friday. Session `i` of a
/// recommendation uses tip `i mod tips`. Days with no session stay present
/// as rest days.
pub fn build_weekly_plan(recs: &[Recommendation]) -> WeeklyPlan {
    let mut week = WeeklyPlan::empty();
    let mut day_idx = 0;
    for r in recs {
        for session in 0..WEEKLY_SESSIONS_PER_RECOMMENDATION {
            let action = if r.tips.is_empty() {
                WEEKLY_FALLBACK_ACTION
            } else {
                r.tips[session % r.tips.len()].as_str()
            };
            week.day_mut(Weekday::from_cycle_index(day_idx))
                .push(PlanItem::new(r.facet.as_str(), action, WEEKLY_SESSION_MINUTES));
            day_idx += 1;
        }
    }
    week
}
