//! `Weekday`: day-of-week enum.

/// Day of the week, numbered 1–7 from Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1..=7 => Some(Self::from_monday_offset(n as i32 - 1)),
            _ => None,
        }
    }

    /// The weekday `offset` days after a Monday; any integer is accepted.
    pub fn from_monday_offset(offset: i32) -> Self {
        match offset.rem_euclid(7) {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    /// Return `true` for Saturday and Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Return `true` for Monday–Friday, the only working days modelled.
    pub fn is_working_day(&self) -> bool {
        !self.is_weekend()
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_roundtrip() {
        for n in 1..=7 {
            assert_eq!(Weekday::from_ordinal(n).map(|w| w.ordinal()), Some(n));
        }
        assert_eq!(Weekday::from_ordinal(0), None);
        assert_eq!(Weekday::from_ordinal(8), None);
    }

    #[test]
    fn negative_offsets_wrap() {
        assert_eq!(Weekday::from_monday_offset(-1), Weekday::Sunday);
        assert_eq!(Weekday::from_monday_offset(15), Weekday::Tuesday);
    }

    #[test]
    fn working_days_are_monday_to_friday() {
        let working: Vec<_> = (1..=7)
            .filter_map(Weekday::from_ordinal)
            .filter(Weekday::is_working_day)
            .collect();
        assert_eq!(working.len(), 5);
        assert!(Weekday::Saturday.is_weekend());
    }
}
