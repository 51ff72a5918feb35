use crate::error::{BadDateFormatterSnafu, InvalidLocaleSnafu, RosterError, RosterResult};
use icu::{
    calendar::{Date, Iso, preferences::CalendarAlgorithm},
    datetime::{DateTimeFormatter, DateTimeFormatterPreferences, fieldsets::YMD},
    locale::Locale,
};
use jiff::{Timestamp, civil, tz::TimeZone};
use jiff_icu::ConvertFrom;
use snafu::ResultExt;

#[derive(Debug, Clone)]
pub struct DateLocaleConfig {
    pub locale: Locale,
    dtf_prefs: DateTimeFormatterPreferences,
}

impl DateLocaleConfig {
    pub fn new(locale: String, calendar_algorithm: String) -> RosterResult<Self> {
        let locale =
            Locale::try_from_str(&locale).context(InvalidLocaleSnafu { provided: locale })?;
        let calendar_algorithm = match calendar_algorithm.as_str() {
            "gregorian" => CalendarAlgorithm::Gregory,
            "iso" => CalendarAlgorithm::Iso8601,
            "buddhist" => CalendarAlgorithm::Buddhist,
            "chinese" => CalendarAlgorithm::Chinese,
            "japanese" => CalendarAlgorithm::Japanese,
            "hebrew" => CalendarAlgorithm::Hebrew,
            "dangi" => CalendarAlgorithm::Dangi,
            _ => {
                return Err(RosterError::InvalidCalendarAlgorithm {
                    provided: calendar_algorithm,
                });
            }
        };

        let mut prefs = DateTimeFormatterPreferences::default();
        prefs.locale_preferences = (&locale).into();
        prefs.calendar_algorithm = Some(calendar_algorithm);

        Ok(Self {
            locale,
            dtf_prefs: prefs,
        })
    }

    /// Builds a formatter for one render pass. Only a failure to load locale data is logged;
    /// the returned formatter then shows every date as given.
    pub fn formatter(&self) -> DateFormatter {
        let formatter = DateTimeFormatter::try_new(self.dtf_prefs, YMD::medium())
            .context(BadDateFormatterSnafu);
        if let Err(e) = &formatter {
            warn!(?e, locale = %self.locale, "Unable to create date formatter, showing dates as given");
        }

        DateFormatter {
            formatter: formatter.ok(),
        }
    }

    #[cfg(test)]
    pub fn format_date(&self, raw: &str) -> String {
        self.formatter().format(raw)
    }
}

pub struct DateFormatter {
    formatter: Option<DateTimeFormatter<YMD>>,
}

impl DateFormatter {
    /// Renders `raw` in the locale's medium date style. Anything that doesn't parse as a date
    /// comes back untouched.
    pub fn format(&self, raw: &str) -> String {
        match (&self.formatter, parse_date(raw)) {
            (Some(formatter), Some(date)) => formatter
                .format(&Date::<Iso>::convert_from(date))
                .to_string(),
            _ => raw.to_string(),
        }
    }
}

/// Accepts `2024-01-31`, `2024-01-31T09:00:00` and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<civil::Date> {
    let raw = raw.trim();

    if let Ok(date) = raw.parse::<civil::Date>() {
        return Some(date);
    }
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts.to_zoned(TimeZone::UTC).date());
    }
    raw.parse::<civil::DateTime>().ok().map(|dt| dt.date())
}
