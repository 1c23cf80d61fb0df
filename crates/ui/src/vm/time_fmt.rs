use chrono::{DateTime, TimeZone, Utc};
use companion_core::time::{format_saved_stamp, format_saved_stamp_local};

#[must_use]
pub fn last_saved_label(at: DateTime<Utc>) -> String {
    format!("Letztes Speichern: {}", format_saved_stamp_local(at))
}

#[must_use]
pub fn last_saved_label_in<Tz>(at: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("Letztes Speichern: {}", format_saved_stamp(at, zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::FixedOffset;
    use companion_core::time::fixed_now;

    #[test]
    fn formats_day_first_with_minutes() {
        assert_eq!(
            last_saved_label_in(fixed_now(), &Utc),
            "Letztes Speichern: 14.11.2023 22:13"
        );
    }

    #[test]
    fn applies_zone_offset() {
        let berlin_winter = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            last_saved_label_in(fixed_now(), &berlin_winter),
            "Letztes Speichern: 14.11.2023 23:13"
        );
    }
}
