use serde::Serialize;

/// Presentation hint for the countdown display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl Urgency {
    pub const WARNING_SECS: u64 = 10;
    pub const DANGER_SECS: u64 = 5;

    pub const fn from_remaining(secs: u64) -> Self {
        if secs <= Self::DANGER_SECS {
            Self::Danger
        } else if secs <= Self::WARNING_SECS {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Urgency;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Urgency::from_remaining(30), Urgency::Normal);
        assert_eq!(Urgency::from_remaining(11), Urgency::Normal);
        assert_eq!(Urgency::from_remaining(10), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(6), Urgency::Warning);
        assert_eq!(Urgency::from_remaining(5), Urgency::Danger);
        assert_eq!(Urgency::from_remaining(0), Urgency::Danger);
    }
}
