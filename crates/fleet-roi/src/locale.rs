//! Process-wide display locale.
//!
//! Number formatting always follows the Indonesian convention; the locale tag
//! only records which narrative language the service advertises. Applying it is
//! best effort and happens once at startup.

use std::sync::OnceLock;

static ACTIVE: OnceLock<DisplayLocale> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLocale {
    Indonesian,
}

impl DisplayLocale {
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let normalized = tag
            .trim()
            .split('.')
            .next()
            .unwrap_or_default()
            .replace('-', "_")
            .to_ascii_lowercase();

        match normalized.as_str() {
            "id" | "id_id" | "indonesian" | "indonesian_indonesia" => Ok(Self::Indonesian),
            _ => Err(LocaleError::Unsupported(tag.to_string())),
        }
    }

    pub fn language(&self) -> &'static str {
        match self {
            DisplayLocale::Indonesian => "Indonesian",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("unsupported locale '{0}', falling back to id_ID")]
    Unsupported(String),
    #[error("display locale already initialized as {0:?}")]
    AlreadySet(DisplayLocale),
}

/// Record the display locale for the lifetime of the process.
pub fn apply(tag: &str) -> Result<DisplayLocale, LocaleError> {
    let locale = DisplayLocale::parse(tag)?;
    match ACTIVE.set(locale) {
        Ok(()) => Ok(locale),
        Err(_) => Err(LocaleError::AlreadySet(active())),
    }
}

pub fn active() -> DisplayLocale {
    ACTIVE.get().copied().unwrap_or(DisplayLocale::Indonesian)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_posix_and_windows_style_tags() {
        assert_eq!(
            DisplayLocale::parse("id_ID.UTF-8").expect("posix tag"),
            DisplayLocale::Indonesian
        );
        assert_eq!(
            DisplayLocale::parse("Indonesian_Indonesia.1252").expect("windows tag"),
            DisplayLocale::Indonesian
        );
        assert_eq!(
            DisplayLocale::parse("id-ID").expect("bcp47 tag"),
            DisplayLocale::Indonesian
        );
    }

    #[test]
    fn unsupported_tag_is_reported_not_applied() {
        match DisplayLocale::parse("fr_FR") {
            Err(LocaleError::Unsupported(tag)) => assert_eq!(tag, "fr_FR"),
            other => panic!("expected unsupported locale, got {other:?}"),
        }
        assert_eq!(active().language(), "Indonesian");
    }
}
