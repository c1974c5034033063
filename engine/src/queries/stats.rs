//! Population statistics in one pass

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::dates;
use crate::model::Sex;
use crate::store::PersonStore;
use crate::views::PersonBrief;

/// Lower bound of each histogram bucket; the last one is open-ended.
const AGE_BUCKETS: &[(i32, &str)] = &[
    (0, "0-49"),
    (50, "50-59"),
    (60, "60-69"),
    (70, "70-79"),
    (80, "80-89"),
    (90, "90-99"),
    (100, "100+"),
];

const LONG_LIVED_AGE: i32 = 90;
const LONG_LIVED_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongLived {
    #[serde(flatten)]
    pub person: PersonBrief,
    pub age_years: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub alive: usize,
    pub deceased: usize,
    pub age_histogram: Vec<AgeBucket>,
    pub longest_lived: Vec<LongLived>,
}

pub fn compute_stats(store: &PersonStore) -> StatsReport {
    compute_stats_at(store, Local::now().date_naive())
}

/// Ages count only people with a full birth date; the living are aged
/// at `today`.
pub fn compute_stats_at(store: &PersonStore, today: NaiveDate) -> StatsReport {
    let mut report = StatsReport {
        total: store.len(),
        male: 0,
        female: 0,
        alive: 0,
        deceased: 0,
        age_histogram: AGE_BUCKETS
            .iter()
            .map(|(_, label)| AgeBucket {
                label: *label,
                count: 0,
            })
            .collect(),
        longest_lived: Vec::new(),
    };

    for person in store.sorted_persons() {
        match person.sex {
            Sex::Male => report.male += 1,
            Sex::Female => report.female += 1,
        }
        if person.is_alive() {
            report.alive += 1;
        } else {
            report.deceased += 1;
        }

        if !dates::is_full_date(&person.birth_day) {
            continue;
        }
        let age = dates::calculate_age_number_at(&person.birth_day, &person.death_day, today);
        if age < 0 {
            continue;
        }

        let bucket = AGE_BUCKETS
            .iter()
            .rposition(|(lower, _)| age >= *lower)
            .unwrap_or(0);
        report.age_histogram[bucket].count += 1;

        if age >= LONG_LIVED_AGE {
            report.longest_lived.push(LongLived {
                person: store.brief_of(person),
                age_years: age,
            });
        }
    }

    report
        .longest_lived
        .sort_by(|a, b| b.age_years.cmp(&a.age_years));
    report.longest_lived.truncate(LONG_LIVED_LIMIT);
    report
}
