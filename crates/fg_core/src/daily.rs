//! Daily answer schedule
//!
//! 날짜별 정답 선수 선택. The pick is a pure function of (salt, date, catalog ids),
//! so a restart on the same day lands on the same answer.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::catalog::PlayerCatalog;

#[derive(Debug, Clone, Copy, Default)]
pub struct DailySchedule {
    salt: u64,
}

impl DailySchedule {
    pub fn new(salt: u64) -> Self {
        Self { salt }
    }

    /// Answer id for `date`, `None` for an empty catalog.
    pub fn pick(&self, date: NaiveDate, catalog: &PlayerCatalog) -> Option<u32> {
        let ids = catalog.ids();
        if ids.is_empty() {
            return None;
        }

        let day = date.num_days_from_ce() as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(self.salt.rotate_left(32) ^ day);
        Some(ids[rng.gen_range(0..ids.len())])
    }
}

/// Calendar day (UTC) a timestamp belongs to.
pub fn game_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Next UTC midnight after `now`.
pub fn next_game_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX);
    tomorrow.and_time(NaiveTime::MIN).and_utc()
}
