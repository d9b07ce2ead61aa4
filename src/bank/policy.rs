use chrono::NaiveTime;
use serde::Deserialize;
use serde::Serialize;

/// Bank wide policy knobs.
///
/// The quiet window is `[quiet_hours_start, quiet_hours_end)`. A window whose start is after its
/// end wraps around midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankPolicy {
    pub max_failed_attempts: u32,
    pub quiet_hours_start: NaiveTime,
    pub quiet_hours_end: NaiveTime,
}

impl Default for BankPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
            quiet_hours_start: NaiveTime::MIN,
            quiet_hours_end: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl BankPolicy {
    pub fn is_quiet(&self, time: NaiveTime) -> bool {
        if self.quiet_hours_start <= self.quiet_hours_end {
            self.quiet_hours_start <= time && time < self.quiet_hours_end
        } else {
            time >= self.quiet_hours_start || time < self.quiet_hours_end
        }
    }
}
