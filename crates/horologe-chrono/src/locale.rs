//! Locale text for era, month, weekday and halfday names

use std::fmt;

use horologe_core::{IllegalFieldValue, TimeResult};

/// Name tables consumed by the text-valued field operations.
pub trait LocaleText: Send + Sync + fmt::Debug {
    fn era_text(&self, era: i32) -> Option<&str>;
    fn month_text(&self, month: i32) -> Option<&str>;
    fn month_short_text(&self, month: i32) -> Option<&str>;
    fn day_of_week_text(&self, day: i32) -> Option<&str>;
    fn day_of_week_short_text(&self, day: i32) -> Option<&str>;
    fn halfday_text(&self, halfday: i32) -> Option<&str>;

    fn era_value(&self, text: &str) -> Option<i32>;
    fn month_value(&self, text: &str) -> Option<i32>;
    fn day_of_week_value(&self, text: &str) -> Option<i32>;
    fn halfday_value(&self, text: &str) -> Option<i32>;

    fn era_max_text_length(&self) -> usize;
    fn month_max_text_length(&self) -> usize;
    fn month_max_short_text_length(&self) -> usize;
    fn day_of_week_max_text_length(&self) -> usize;
    fn day_of_week_max_short_text_length(&self) -> usize;
    fn halfday_max_text_length(&self) -> usize;
}

const ERAS: [&str; 2] = ["BC", "AD"];
const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November",
    "December",
];
const SHORT_MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
const DAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];
const SHORT_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const HALFDAYS: [&str; 2] = ["AM", "PM"];

fn lookup<'a>(table: &[&'a str], value: i32, first: i32) -> Option<&'a str> {
    usize::try_from(value - first).ok().and_then(|i| table.get(i).copied())
}

fn reverse(tables: &[&[&str]], text: &str, first: i32) -> Option<i32> {
    tables.iter().find_map(|table| {
        table
            .iter()
            .position(|name| name.eq_ignore_ascii_case(text))
            .map(|i| i as i32 + first)
    })
}

fn longest(table: &[&str]) -> usize {
    table.iter().map(|s| s.len()).max().unwrap_or(0)
}

/// English names. Parsing is case-insensitive and accepts short forms.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishText;

impl LocaleText for EnglishText {
    fn era_text(&self, era: i32) -> Option<&str> {
        lookup(&ERAS, era, 0)
    }

    fn month_text(&self, month: i32) -> Option<&str> {
        lookup(&MONTHS, month, 1)
    }

    fn month_short_text(&self, month: i32) -> Option<&str> {
        lookup(&SHORT_MONTHS, month, 1)
    }

    fn day_of_week_text(&self, day: i32) -> Option<&str> {
        lookup(&DAYS, day, 1)
    }

    fn day_of_week_short_text(&self, day: i32) -> Option<&str> {
        lookup(&SHORT_DAYS, day, 1)
    }

    fn halfday_text(&self, halfday: i32) -> Option<&str> {
        lookup(&HALFDAYS, halfday, 0)
    }

    fn era_value(&self, text: &str) -> Option<i32> {
        reverse(&[&ERAS[..], &["BCE", "CE"][..]], text, 0)
    }

    fn month_value(&self, text: &str) -> Option<i32> {
        reverse(&[&MONTHS[..], &SHORT_MONTHS[..]], text, 1)
    }

    fn day_of_week_value(&self, text: &str) -> Option<i32> {
        reverse(&[&DAYS[..], &SHORT_DAYS[..]], text, 1)
    }

    fn halfday_value(&self, text: &str) -> Option<i32> {
        reverse(&[&HALFDAYS[..]], text, 0)
    }

    fn era_max_text_length(&self) -> usize {
        longest(&ERAS)
    }

    fn month_max_text_length(&self) -> usize {
        longest(&MONTHS)
    }

    fn month_max_short_text_length(&self) -> usize {
        longest(&SHORT_MONTHS)
    }

    fn day_of_week_max_text_length(&self) -> usize {
        longest(&DAYS)
    }

    fn day_of_week_max_short_text_length(&self) -> usize {
        longest(&SHORT_DAYS)
    }

    fn halfday_max_text_length(&self) -> usize {
        longest(&HALFDAYS)
    }
}

/// How a field renders and parses its values as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Numeric,
    Era,
    Month,
    DayOfWeek,
    Halfday,
    /// A single-valued field with one fixed name (`AM`, `BE`)
    Fixed(&'static str),
}

impl TextKind {
    pub fn text(self, value: i32, locale: &dyn LocaleText, short: bool) -> String {
        let name = match self {
            TextKind::Numeric => None,
            TextKind::Era => locale.era_text(value),
            TextKind::Month if short => locale.month_short_text(value),
            TextKind::Month => locale.month_text(value),
            TextKind::DayOfWeek if short => locale.day_of_week_short_text(value),
            TextKind::DayOfWeek => locale.day_of_week_text(value),
            TextKind::Halfday => locale.halfday_text(value),
            TextKind::Fixed(name) => Some(name),
        };
        name.map_or_else(|| value.to_string(), str::to_string)
    }

    /// Resolve a name, falling back to a decimal number.
    pub fn parse(self, field: &str, text: &str, locale: &dyn LocaleText) -> TimeResult<i32> {
        let named = match self {
            TextKind::Numeric => None,
            TextKind::Era => locale.era_value(text),
            TextKind::Month => locale.month_value(text),
            TextKind::DayOfWeek => locale.day_of_week_value(text),
            TextKind::Halfday => locale.halfday_value(text),
            TextKind::Fixed(name) => name.eq_ignore_ascii_case(text.trim()).then_some(1),
        };
        match named {
            Some(value) => Ok(value),
            None => text
                .trim()
                .parse::<i32>()
                .map_err(|_| IllegalFieldValue::text(field, text).into()),
        }
    }

    /// Longest name, or `None` for numeric text.
    pub fn max_length(self, locale: &dyn LocaleText, short: bool) -> Option<usize> {
        match self {
            TextKind::Numeric => None,
            TextKind::Era => Some(locale.era_max_text_length()),
            TextKind::Month if short => Some(locale.month_max_short_text_length()),
            TextKind::Month => Some(locale.month_max_text_length()),
            TextKind::DayOfWeek if short => Some(locale.day_of_week_max_short_text_length()),
            TextKind::DayOfWeek => Some(locale.day_of_week_max_text_length()),
            TextKind::Halfday => Some(locale.halfday_max_text_length()),
            TextKind::Fixed(name) => Some(name.len()),
        }
    }
}
