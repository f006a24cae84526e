use crate::commands::CmdResult;
use crate::contacts::ContactStore;
use crate::error::Result;
use crate::report::Stats;
use chrono::{DateTime, Utc};

pub fn run(contacts: &ContactStore, now: DateTime<Utc>, window_days: i64) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(Stats::compute(contacts, now, window_days)))
}
