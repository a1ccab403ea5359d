//! 时间工具函数 - 本地时区日界计算
//!
//! 所有窗口边界都由调用方传入的 `DateTime<Tz>` 推导，
//! 计算层只接收 `i64` Unix millis。

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike};

/// 日期开始 (00:00:00) → Unix millis
pub fn day_start_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let naive = date.and_time(NaiveTime::MIN);
    naive
        .and_local_timezone(tz.clone())
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// `now` 所在本地日的零点
pub fn start_of_today<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    day_start_millis(now.date_naive(), &now.timezone())
}

/// Unix millis → 给定时区的本地时间
pub fn to_local<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(tz))
}

/// Unix millis → 本地日期
pub fn local_date<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<NaiveDate> {
    to_local(millis, tz).map(|dt| dt.date_naive())
}

/// Unix millis → 本地小时 (0-23)
pub fn local_hour<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<u32> {
    to_local(millis, tz).map(|dt| dt.hour())
}
