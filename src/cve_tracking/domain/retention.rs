use std::fmt;
use std::time::Duration;

/// Expiry rule applied to every key touched by a write.
///
/// `Persistent` clears any existing expiry on the key; `Expire` (re)sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetentionPolicy {
    #[default]
    Persistent,
    Expire(Duration),
}

impl RetentionPolicy {
    /// Zero seconds means no expiry
    pub fn from_seconds(seconds: u64) -> Self {
        if seconds == 0 {
            RetentionPolicy::Persistent
        } else {
            RetentionPolicy::Expire(Duration::from_secs(seconds))
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        match self {
            RetentionPolicy::Persistent => None,
            RetentionPolicy::Expire(ttl) => Some(*ttl),
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::Persistent => write!(f, "persistent"),
            RetentionPolicy::Expire(ttl) => write!(f, "expire after {}s", ttl.as_secs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seconds_is_persistent() {
        assert_eq!(RetentionPolicy::from_seconds(0), RetentionPolicy::Persistent);
        assert_eq!(RetentionPolicy::from_seconds(0).ttl(), None);
    }

    #[test]
    fn test_positive_seconds_expire() {
        let policy = RetentionPolicy::from_seconds(3600);
        assert_eq!(policy, RetentionPolicy::Expire(Duration::from_secs(3600)));
        assert_eq!(policy.ttl(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_display() {
        assert_eq!(RetentionPolicy::Persistent.to_string(), "persistent");
        assert_eq!(
            RetentionPolicy::from_seconds(60).to_string(),
            "expire after 60s"
        );
    }
}
