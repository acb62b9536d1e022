use chrono::{DateTime, Duration, NaiveDate, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    now().date_naive()
}

/// `YYYY-MM-DD` for `base` shifted by `offset_days`.
pub fn iso_date(base: NaiveDate, offset_days: i64) -> String {
    (base + Duration::days(offset_days))
        .format("%Y-%m-%d")
        .to_string()
}
