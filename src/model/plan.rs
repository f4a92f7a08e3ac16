//! Recommendations and the daily/weekly plans built from them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tips attached to a recommendation. Never more than three.
pub type TipList = SmallVec<[String; 3]>;

/// A facet that needs attention, with its ranking score and tips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub facet: String,
    /// Derived ranking score (need × centrality boost), rounded to 2 decimals.
    /// Not a facet score.
    pub priority: f64,
    pub tips: TipList,
}

impl Recommendation {
    pub fn new(facet: impl Into<String>, priority: f64) -> Self {
        Self {
            facet: facet.into(),
            priority,
            tips: TipList::new(),
        }
    }

    /// Append a tip; ignored once three tips are attached.
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        if self.tips.len() < 3 {
            self.tips.push(tip.into());
        }
        self
    }
}

/// An atomic allocation of minutes to one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub facet: String,
    pub action: String,
    pub minutes: u32,
}

impl PlanItem {
    pub fn new(facet: impl Into<String>, action: impl Into<String>, minutes: u32) -> Self {
        Self {
            facet: facet.into(),
            action: action.into(),
            minutes,
        }
    }
}

/// Ordered plan items for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub items: Vec<PlanItem>,
}

impl DailyPlan {
    /// Sum of item minutes, saturating at `u32::MAX`.
    pub fn total_minutes(&self) -> u32 {
        self.items.iter().fold(0, |acc, i| acc.saturating_add(i.minutes))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Weekly plan
// ============================================================================

/// Day of the week. The planning cycle starts on Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Sat,
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    /// The Sat–Fri cycle.
    pub const CYCLE: [Weekday; 7] = [
        Weekday::Sat,
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Day at position `index` of the cycle, wrapping after Friday.
    pub fn from_cycle_index(index: usize) -> Self {
        Self::CYCLE[index % Self::CYCLE.len()]
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        };
        f.write_str(name)
    }
}

/// Plan items of a single weekday. Empty items means a rest day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: Weekday,
    pub items: Vec<PlanItem>,
}

impl DayPlan {
    pub fn is_rest_day(&self) -> bool {
        self.items.is_empty()
    }
}

/// Seven day buckets in cycle order. Every weekday is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

impl WeeklyPlan {
    /// A week of rest days.
    pub fn empty() -> Self {
        Self {
            days: Weekday::CYCLE
                .iter()
                .map(|&day| DayPlan { day, items: Vec::new() })
                .collect(),
        }
    }

    pub fn day(&self, day: Weekday) -> &[PlanItem] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.items.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut Vec<PlanItem> {
        let pos = match self.days.iter().position(|d| d.day == day) {
            Some(pos) => pos,
            None => {
                self.days.push(DayPlan { day, items: Vec::new() });
                self.days.len() - 1
            }
        };
        &mut self.days[pos].items
    }

    /// Number of plan items across the whole week.
    pub fn occurrences(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    pub fn rest_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().filter(|d| d.is_rest_day()).map(|d| d.day)
    }
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self::empty()
    }
}
