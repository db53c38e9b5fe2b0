//! Per-language date keywords.
//!
//! Each supported language has a read-only table of words meaning "today",
//! "tomorrow", "day after tomorrow" and the seven weekdays, plus the words
//! that mean "next" in front of a weekday. English is handled by the phrase
//! grammar in `core::english` and has no table here.

use std::collections::HashMap;

use chrono::Weekday::{Fri, Mon, Sat, Sun, Thu, Tue, Wed};
use chrono::{NaiveDate, Weekday};
use once_cell::sync::Lazy;

use self::LocaleKeyword::{RelativeDays as Days, Weekday as On};
use super::types::nfc;
use crate::core::english::{find_words, PhraseSpan};
use crate::core::{next_weekday, offset_date};

/// A supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    Da,
    De,
    En,
    Es,
    Fi,
    Fr,
    It,
    Ja,
    Ko,
    Nl,
    Pl,
    Pt,
    Ru,
    Sv,
    Tr,
    Zh,
}

impl Locale {
    /// Every supported language.
    pub const ALL: [Self; 16] = [
        Self::Da,
        Self::De,
        Self::En,
        Self::Es,
        Self::Fi,
        Self::Fr,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Nl,
        Self::Pl,
        Self::Pt,
        Self::Ru,
        Self::Sv,
        Self::Tr,
        Self::Zh,
    ];

    /// Look up a two-letter code, case-insensitive.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// The two-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Da => "da",
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::Fi => "fi",
            Self::Fr => "fr",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::Ru => "ru",
            Self::Sv => "sv",
            Self::Tr => "tr",
            Self::Zh => "zh",
        }
    }

    /// Languages written without spaces between words.
    const fn unspaced(self) -> bool {
        matches!(self, Self::Ja | Self::Zh)
    }

    const fn keywords(self) -> &'static [(&'static str, LocaleKeyword)] {
        match self {
            Self::Da => DANISH,
            Self::De => GERMAN,
            Self::En => &[],
            Self::Es => SPANISH,
            Self::Fi => FINNISH,
            Self::Fr => FRENCH,
            Self::It => ITALIAN,
            Self::Ja => JAPANESE,
            Self::Ko => KOREAN,
            Self::Nl => DUTCH,
            Self::Pl => POLISH,
            Self::Pt => PORTUGUESE,
            Self::Ru => RUSSIAN,
            Self::Sv => SWEDISH,
            Self::Tr => TURKISH,
            Self::Zh => CHINESE,
        }
    }

    /// Words meaning "next" placed before a weekday.
    const fn next_prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Da => &["næste", "naeste"],
            Self::De => &["nächsten", "nächste", "nächstem", "nachsten", "nachste", "nachstem"],
            Self::En => &[],
            Self::Es | Self::Pt => &["próximo", "próxima", "proximo", "proxima"],
            Self::Fi => &["ensi", "seuraava", "seuraavan"],
            Self::Fr => &["prochain", "prochaine"],
            Self::It => &["prossimo", "prossima"],
            Self::Ja => &["次の", "来週の"],
            Self::Ko => &["다음"],
            Self::Nl => &["volgende", "aanstaande"],
            Self::Pl => &["następny", "następna", "następne", "nastepny", "nastepna", "nastepne"],
            Self::Ru => &["следующий", "следующая", "следующее"],
            Self::Sv => &["nästa", "nasta"],
            Self::Tr => &["gelecek", "önümüzdeki", "onumuzdeki"],
            Self::Zh => &["下个", "下個"],
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// What a keyword resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleKeyword {
    /// Days after today (0 is today).
    RelativeDays(u32),
    /// Next future occurrence of a weekday.
    Weekday(Weekday),
}

impl LocaleKeyword {
    /// Resolve against today's date.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::RelativeDays(days) => offset_date(today, i64::from(days)),
            Self::Weekday(day) => next_weekday(today, day),
        }
    }
}

const ITALIAN: &[(&str, LocaleKeyword)] = &[
    ("oggi", Days(0)),
    ("domani", Days(1)),
    ("dopodomani", Days(2)),
    ("lunedì", On(Mon)),
    ("lunedi", On(Mon)),
    ("martedì", On(Tue)),
    ("martedi", On(Tue)),
    ("mercoledì", On(Wed)),
    ("mercoledi", On(Wed)),
    ("giovedì", On(Thu)),
    ("giovedi", On(Thu)),
    ("venerdì", On(Fri)),
    ("venerdi", On(Fri)),
    ("sabato", On(Sat)),
    ("domenica", On(Sun)),
];

const GERMAN: &[(&str, LocaleKeyword)] = &[
    ("heute", Days(0)),
    ("morgen", Days(1)),
    ("übermorgen", Days(2)),
    ("ubermorgen", Days(2)),
    ("montag", On(Mon)),
    ("dienstag", On(Tue)),
    ("mittwoch", On(Wed)),
    ("donnerstag", On(Thu)),
    ("freitag", On(Fri)),
    ("samstag", On(Sat)),
    ("sonntag", On(Sun)),
];

const FRENCH: &[(&str, LocaleKeyword)] = &[
    ("aujourd'hui", Days(0)),
    ("aujourdhui", Days(0)),
    ("demain", Days(1)),
    ("après-demain", Days(2)),
    ("apres-demain", Days(2)),
    ("lundi", On(Mon)),
    ("mardi", On(Tue)),
    ("mercredi", On(Wed)),
    ("jeudi", On(Thu)),
    ("vendredi", On(Fri)),
    ("samedi", On(Sat)),
    ("dimanche", On(Sun)),
];

const SPANISH: &[(&str, LocaleKeyword)] = &[
    ("hoy", Days(0)),
    ("mañana", Days(1)),
    ("manana", Days(1)),
    ("pasado mañana", Days(2)),
    ("pasado manana", Days(2)),
    ("lunes", On(Mon)),
    ("martes", On(Tue)),
    ("miércoles", On(Wed)),
    ("miercoles", On(Wed)),
    ("jueves", On(Thu)),
    ("viernes", On(Fri)),
    ("sábado", On(Sat)),
    ("sabado", On(Sat)),
    ("domingo", On(Sun)),
];

const PORTUGUESE: &[(&str, LocaleKeyword)] = &[
    ("hoje", Days(0)),
    ("amanhã", Days(1)),
    ("amanha", Days(1)),
    ("depois de amanhã", Days(2)),
    ("depois de amanha", Days(2)),
    ("segunda-feira", On(Mon)),
    ("segunda", On(Mon)),
    ("terça-feira", On(Tue)),
    ("terca-feira", On(Tue)),
    ("terça", On(Tue)),
    ("terca", On(Tue)),
    ("quarta-feira", On(Wed)),
    ("quarta", On(Wed)),
    ("quinta-feira", On(Thu)),
    ("quinta", On(Thu)),
    ("sexta-feira", On(Fri)),
    ("sexta", On(Fri)),
    ("sábado", On(Sat)),
    ("sabado", On(Sat)),
    ("domingo", On(Sun)),
];

const DUTCH: &[(&str, LocaleKeyword)] = &[
    ("vandaag", Days(0)),
    ("morgen", Days(1)),
    ("overmorgen", Days(2)),
    ("maandag", On(Mon)),
    ("dinsdag", On(Tue)),
    ("woensdag", On(Wed)),
    ("donderdag", On(Thu)),
    ("vrijdag", On(Fri)),
    ("zaterdag", On(Sat)),
    ("zondag", On(Sun)),
];

const DANISH: &[(&str, LocaleKeyword)] = &[
    ("i dag", Days(0)),
    ("idag", Days(0)),
    ("i morgen", Days(1)),
    ("imorgen", Days(1)),
    ("i overmorgen", Days(2)),
    ("mandag", On(Mon)),
    ("tirsdag", On(Tue)),
    ("onsdag", On(Wed)),
    ("torsdag", On(Thu)),
    ("fredag", On(Fri)),
    ("lørdag", On(Sat)),
    ("lordag", On(Sat)),
    ("søndag", On(Sun)),
    ("sondag", On(Sun)),
];

const SWEDISH: &[(&str, LocaleKeyword)] = &[
    ("idag", Days(0)),
    ("imorgon", Days(1)),
    ("i morgon", Days(1)),
    ("övermorgon", Days(2)),
    ("overmorgon", Days(2)),
    ("måndag", On(Mon)),
    ("mandag", On(Mon)),
    ("tisdag", On(Tue)),
    ("onsdag", On(Wed)),
    ("torsdag", On(Thu)),
    ("fredag", On(Fri)),
    ("lördag", On(Sat)),
    ("lordag", On(Sat)),
    ("söndag", On(Sun)),
    ("sondag", On(Sun)),
];

const FINNISH: &[(&str, LocaleKeyword)] = &[
    ("tänään", Days(0)),
    ("tanaan", Days(0)),
    ("huomenna", Days(1)),
    ("ylihuomenna", Days(2)),
    ("maanantai", On(Mon)),
    ("tiistai", On(Tue)),
    ("keskiviikko", On(Wed)),
    ("torstai", On(Thu)),
    ("perjantai", On(Fri)),
    ("lauantai", On(Sat)),
    ("sunnuntai", On(Sun)),
];

const POLISH: &[(&str, LocaleKeyword)] = &[
    ("dzisiaj", Days(0)),
    ("dziś", Days(0)),
    ("dzis", Days(0)),
    ("jutro", Days(1)),
    ("pojutrze", Days(2)),
    ("poniedziałek", On(Mon)),
    ("poniedzialek", On(Mon)),
    ("wtorek", On(Tue)),
    ("środa", On(Wed)),
    ("sroda", On(Wed)),
    ("czwartek", On(Thu)),
    ("piątek", On(Fri)),
    ("piatek", On(Fri)),
    ("sobota", On(Sat)),
    ("niedziela", On(Sun)),
];

const RUSSIAN: &[(&str, LocaleKeyword)] = &[
    ("сегодня", Days(0)),
    ("завтра", Days(1)),
    ("послезавтра", Days(2)),
    ("понедельник", On(Mon)),
    ("вторник", On(Tue)),
    ("среда", On(Wed)),
    ("четверг", On(Thu)),
    ("пятница", On(Fri)),
    ("суббота", On(Sat)),
    ("воскресенье", On(Sun)),
];

const TURKISH: &[(&str, LocaleKeyword)] = &[
    ("bugün", Days(0)),
    ("bugun", Days(0)),
    ("yarın", Days(1)),
    ("yarin", Days(1)),
    ("öbür gün", Days(2)),
    ("obur gun", Days(2)),
    ("pazartesi", On(Mon)),
    ("salı", On(Tue)),
    ("sali", On(Tue)),
    ("çarşamba", On(Wed)),
    ("carsamba", On(Wed)),
    ("perşembe", On(Thu)),
    ("persembe", On(Thu)),
    ("cuma", On(Fri)),
    ("cumartesi", On(Sat)),
    ("pazar", On(Sun)),
];

const JAPANESE: &[(&str, LocaleKeyword)] = &[
    ("今日", Days(0)),
    ("きょう", Days(0)),
    ("明日", Days(1)),
    ("あした", Days(1)),
    ("明後日", Days(2)),
    ("あさって", Days(2)),
    ("月曜日", On(Mon)),
    ("火曜日", On(Tue)),
    ("水曜日", On(Wed)),
    ("木曜日", On(Thu)),
    ("金曜日", On(Fri)),
    ("土曜日", On(Sat)),
    ("日曜日", On(Sun)),
];

const KOREAN: &[(&str, LocaleKeyword)] = &[
    ("오늘", Days(0)),
    ("내일", Days(1)),
    ("모레", Days(2)),
    ("월요일", On(Mon)),
    ("화요일", On(Tue)),
    ("수요일", On(Wed)),
    ("목요일", On(Thu)),
    ("금요일", On(Fri)),
    ("토요일", On(Sat)),
    ("일요일", On(Sun)),
];

const CHINESE: &[(&str, LocaleKeyword)] = &[
    ("今天", Days(0)),
    ("明天", Days(1)),
    ("后天", Days(2)),
    ("後天", Days(2)),
    ("星期一", On(Mon)),
    ("星期二", On(Tue)),
    ("星期三", On(Wed)),
    ("星期四", On(Thu)),
    ("星期五", On(Fri)),
    ("星期六", On(Sat)),
    ("星期日", On(Sun)),
    ("周一", On(Mon)),
    ("周二", On(Tue)),
    ("周三", On(Wed)),
    ("周四", On(Thu)),
    ("周五", On(Fri)),
    ("周六", On(Sat)),
    ("周日", On(Sun)),
];

/// Keyword tables keyed by normalized spelling.
static TABLES: Lazy<HashMap<Locale, HashMap<String, LocaleKeyword>>> = Lazy::new(|| {
    Locale::ALL
        .into_iter()
        .map(|locale| {
            let table = locale
                .keywords()
                .iter()
                .map(|(word, keyword)| (normalize(word), *keyword))
                .collect();
            (locale, table)
        })
        .collect()
});

/// NFC, lowercase, single spaces.
fn normalize(input: &str) -> String {
    nfc(input)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a keyword (or a "next" + weekday form) in one language's table.
#[must_use]
pub fn lookup(input: &str, locale: Locale) -> Option<LocaleKeyword> {
    let table = TABLES.get(&locale)?;
    let normalized = normalize(input);
    if normalized.is_empty() {
        return None;
    }

    if let Some(keyword) = table.get(&normalized) {
        return Some(*keyword);
    }

    locale.next_prefixes().iter().find_map(|prefix| {
        let rest = normalized.strip_prefix(&normalize(prefix))?;
        if !(rest.starts_with(' ') || locale.unspaced()) {
            return None;
        }
        let rest = rest.trim();
        if rest.is_empty() {
            return None;
        }
        table.get(rest).copied()
    })
}

/// Resolve a date keyword for `lang`.
///
/// Always `None` for English, an empty code, or an unsupported code.
#[must_use]
pub fn resolve_keyword(input: &str, lang: &str, today: NaiveDate) -> Option<NaiveDate> {
    let locale = Locale::from_code(lang).filter(|l| *l != Locale::En)?;
    lookup(input, locale)?.resolve(today)
}

/// Find the leftmost, longest keyword phrase inside `text`.
#[must_use]
pub fn find_keyword(text: &str, lang: &str, today: NaiveDate) -> Option<PhraseSpan<NaiveDate>> {
    let locale = Locale::from_code(lang).filter(|l| *l != Locale::En)?;
    find_words(text, |candidate| lookup(candidate, locale)?.resolve(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sunday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("de"), Some(Locale::De));
        assert_eq!(Locale::from_code("ZH"), Some(Locale::Zh));
        assert_eq!(Locale::from_code("xx"), None);
        assert_eq!(Locale::from_code(""), None);
        assert_eq!(Locale::ALL.len(), 16);
    }

    #[test]
    fn test_every_table_has_relative_days_and_weekdays() {
        for locale in Locale::ALL.into_iter().filter(|l| *l != Locale::En) {
            let table = locale.keywords();
            for days in 0..=2 {
                assert!(
                    table.iter().any(|(_, k)| *k == Days(days)),
                    "{locale} is missing +{days}"
                );
            }
            for day in [Mon, Tue, Wed, Thu, Fri, Sat, Sun] {
                assert!(
                    table.iter().any(|(_, k)| *k == On(day)),
                    "{locale} is missing {day}"
                );
            }
        }
    }

    #[test]
    fn test_relative_keywords() {
        assert_eq!(resolve_keyword("oggi", "it", today()), Some(today()));
        assert_eq!(resolve_keyword("Domani", "it", today()), Some(date(2025, 6, 2)));
        assert_eq!(resolve_keyword("übermorgen", "de", today()), Some(date(2025, 6, 3)));
        assert_eq!(resolve_keyword("pasado  mañana", "es", today()), Some(date(2025, 6, 3)));
        assert_eq!(resolve_keyword("明天", "zh", today()), Some(date(2025, 6, 2)));
    }

    #[test]
    fn test_decomposed_input_matches() {
        // "u" + combining diaeresis
        assert_eq!(
            resolve_keyword("u\u{0308}bermorgen", "de", today()),
            Some(date(2025, 6, 3))
        );
    }

    #[test]
    fn test_weekday_same_day_is_next_week() {
        assert_eq!(resolve_keyword("domenica", "it", today()), Some(date(2025, 6, 8)));
        assert_eq!(resolve_keyword("sonntag", "de", today()), Some(date(2025, 6, 8)));
    }

    #[test]
    fn test_next_prefix_matches_bare_weekday() {
        let cases = [
            ("it", "venerdì", "prossimo venerdì"),
            ("de", "freitag", "nächsten Freitag"),
            ("fr", "vendredi", "prochain vendredi"),
            ("es", "viernes", "próximo viernes"),
            ("pt", "sexta-feira", "próxima sexta-feira"),
        ];
        for (lang, bare, next) in cases {
            let expected = resolve_keyword(bare, lang, today());
            assert_eq!(expected, Some(date(2025, 6, 6)), "{lang} {bare}");
            assert_eq!(resolve_keyword(next, lang, today()), expected, "{lang} {next}");
        }
    }

    #[test]
    fn test_unspaced_prefix() {
        assert_eq!(resolve_keyword("次の金曜日", "ja", today()), Some(date(2025, 6, 6)));
        assert_eq!(resolve_keyword("下个星期五", "zh", today()), Some(date(2025, 6, 6)));
        assert_eq!(resolve_keyword("다음 금요일", "ko", today()), Some(date(2025, 6, 6)));
        // Latin prefixes need a space
        assert_eq!(resolve_keyword("prossimovenerdi", "it", today()), None);
    }

    #[test]
    fn test_prefix_alone_is_not_a_date() {
        assert_eq!(resolve_keyword("nächsten", "de", today()), None);
        assert_eq!(resolve_keyword("prossimo ", "it", today()), None);
    }

    #[test]
    fn test_english_and_unknown_languages_never_match() {
        assert_eq!(resolve_keyword("domani", "en", today()), None);
        assert_eq!(resolve_keyword("domani", "", today()), None);
        assert_eq!(resolve_keyword("domani", "xx", today()), None);
    }

    #[test]
    fn test_wrong_language_does_not_match() {
        assert_eq!(resolve_keyword("domani", "de", today()), None);
    }

    #[test]
    fn test_find_keyword_in_text() {
        let text = "chiamare Marco domani";
        let found = find_keyword(text, "it", today()).unwrap();
        assert_eq!(&text[found.start..found.end], "domani");
        assert_eq!(found.value, date(2025, 6, 2));
    }

    #[test]
    fn test_find_keyword_prefers_longest() {
        let text = "Arzt nächsten Freitag anrufen";
        let found = find_keyword(text, "de", today()).unwrap();
        assert_eq!(&text[found.start..found.end], "nächsten Freitag");

        let text = "entregar depois de amanhã";
        let found = find_keyword(text, "pt", today()).unwrap();
        assert_eq!(&text[found.start..found.end], "depois de amanhã");
    }

    #[test]
    fn test_find_keyword_none() {
        assert!(find_keyword("buy milk", "it", today()).is_none());
        assert!(find_keyword("buy milk tomorrow", "en", today()).is_none());
    }
}
