//! Script-based locale filtering.
//!
//! The CMS locale field is not reliably populated, so a record's language is
//! inferred from the script of its visible text. Any Arabic code point marks
//! the record as Arabic. This is a heuristic: a record with an English name
//! and an Arabic testimonial counts as Arabic, and one with no letters at all
//! counts as English.

use crate::domain::model::{Client, HeroContent, Locale, Service, TeamMember};

/// Arabic Unicode block, U+0600 to U+06FF.
pub fn is_arabic_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

pub fn has_arabic_text(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

pub fn has_english_text(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}

pub fn has_any_arabic<'a, I>(fields: I) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    fields.into_iter().flatten().any(has_arabic_text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Arabic,
    English,
    Mixed,
    Unknown,
}

pub fn classify_script(text: &str) -> Script {
    match (has_arabic_text(text), has_english_text(text)) {
        (true, true) => Script::Mixed,
        (true, false) => Script::Arabic,
        (false, true) => Script::English,
        (false, false) => Script::Unknown,
    }
}

/// Whether a record with these visible fields belongs to `locale`.
pub fn matches_locale<'a, I>(locale: &Locale, fields: I) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    match locale {
        Locale::En => !has_any_arabic(fields),
        Locale::Ar => has_any_arabic(fields),
        Locale::Other(_) => true,
    }
}

/// Keeps the records whose projected text fits `locale`. Locales other than
/// `en`/`ar` pass everything through.
pub fn filter_by_locale<T, F>(items: Vec<T>, locale: &Locale, text_fields: F) -> Vec<T>
where
    F: Fn(&T) -> Vec<Option<&str>>,
{
    if let Locale::Other(_) = locale {
        return items;
    }

    let before = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let fields = text_fields(item);
            let keep = matches_locale(locale, fields.iter().copied());
            if !keep && tracing::enabled!(tracing::Level::DEBUG) {
                let text = fields.iter().flatten().copied().collect::<Vec<_>>().join(" ");
                tracing::debug!(
                    "Dropping {:?}-script record from locale '{}': {:?}",
                    classify_script(&text),
                    locale,
                    text
                );
            }
            keep
        })
        .collect();

    if kept.len() != before {
        tracing::debug!(
            "Locale filter '{}' kept {} of {} records",
            locale,
            kept.len(),
            before
        );
    }
    kept
}

/// The user-visible text a view model is judged by.
pub trait LocaleFields {
    fn locale_fields(&self) -> Vec<Option<&str>>;
}

impl LocaleFields for Service {
    fn locale_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.title.as_str()), Some(self.description.as_str())]
    }
}

impl LocaleFields for TeamMember {
    fn locale_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.role.as_str())]
    }
}

impl LocaleFields for Client {
    fn locale_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), self.testimonial.as_deref()]
    }
}

impl LocaleFields for HeroContent {
    fn locale_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.title.as_str()),
            self.subtitle.as_deref(),
            self.description.as_deref(),
        ]
    }
}

pub fn filter_records<T: LocaleFields>(items: Vec<T>, locale: &Locale) -> Vec<T> {
    filter_by_locale(items, locale, T::locale_fields)
}
