use chrono::{DateTime, Utc};

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Whole minutes from now until `expires_at`. Negative when already expired.
pub fn minutes_until_expiry(expires_at: DateTime<Utc>) -> i64 {
    minutes_until_expiry_at(expires_at, Utc::now())
}

/// Whole minutes from `now` until `expires_at`, rounding half up.
pub fn minutes_until_expiry_at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expires_at - now).num_milliseconds() as f64;
    (millis / MILLIS_PER_MINUTE + 0.5).floor() as i64
}

/// Countdown state of a time-bounded opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// Minutes remaining.
    Active(i64),
    /// Minutes since expiry.
    Expired(i64),
}

impl ExpiryStatus {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }
}

/// Classifies an expiry time relative to `now`. Zero minutes counts as expired.
pub fn expiry_status(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> ExpiryStatus {
    let minutes = minutes_until_expiry_at(expires_at, now);
    if minutes > 0 {
        ExpiryStatus::Active(minutes)
    } else {
        ExpiryStatus::Expired(-minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_minutes_until_expiry_in_past() {
        let now = Utc::now();
        let expires = now - Duration::milliseconds(120_000);
        assert_eq!(minutes_until_expiry_at(expires, now), -2);
        assert_eq!(minutes_until_expiry(expires), -2);
    }

    #[test]
    fn test_minutes_until_expiry_rounds() {
        let now = Utc::now();
        assert_eq!(
            minutes_until_expiry_at(now + Duration::seconds(90), now),
            2
        );
        assert_eq!(
            minutes_until_expiry_at(now + Duration::seconds(89), now),
            1
        );
        assert_eq!(
            minutes_until_expiry_at(now + Duration::minutes(25), now),
            25
        );
    }

    #[test]
    fn test_expiry_status() {
        let now = Utc::now();
        assert_eq!(
            expiry_status(now + Duration::minutes(5), now),
            ExpiryStatus::Active(5)
        );
        assert_eq!(
            expiry_status(now - Duration::minutes(3), now),
            ExpiryStatus::Expired(3)
        );
        assert!(expiry_status(now, now).is_expired());
    }
}
