//! Latin-run transliteration

use std::sync::LazyLock;

use regex::Regex;

static LATIN_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]+").expect("latin run regex"));

/// Transliteration collaborator.
///
/// Given a token of Latin letters, returns its best-effort rendering in the
/// target script. Tokens it cannot handle come back unchanged.
pub trait Transliterator: Send + Sync {
    fn transliterate(&self, token: &str) -> String;
}

/// Replace every Latin-letter run with its transliteration.
///
/// Each distinct run is looked up once and every literal occurrence of it is
/// replaced, wherever it sits in the text.
pub fn transliterate<T>(text: &str, transliterator: &T) -> String
where
    T: Transliterator + ?Sized,
{
    let mut runs: Vec<&str> = Vec::new();
    for m in LATIN_RUN_RE.find_iter(text) {
        if !runs.contains(&m.as_str()) {
            runs.push(m.as_str());
        }
    }
    if runs.is_empty() {
        return text.to_string();
    }

    let replacements: Vec<(&str, String)> = runs
        .into_iter()
        .map(|run| (run, transliterator.transliterate(run)))
        .collect();

    let mut out = text.to_string();
    for (run, translit) in replacements {
        out = out.replace(run, &translit);
    }
    out
}

/// Multi-letter clusters, longest first.
const CLUSTERS: &[(&str, &str)] = &[
    ("shch", "щ"),
    ("sch", "щ"),
    ("zh", "ж"),
    ("kh", "х"),
    ("ts", "ц"),
    ("ch", "ч"),
    ("sh", "ш"),
    ("yu", "ю"),
    ("ya", "я"),
    ("yo", "ё"),
    ("ph", "ф"),
];

fn single(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => "а",
        'b' => "б",
        'c' => "ц",
        'd' => "д",
        'e' => "е",
        'f' => "ф",
        'g' => "г",
        'h' => "х",
        'i' => "и",
        'j' => "дж",
        'k' => "к",
        'l' => "л",
        'm' => "м",
        'n' => "н",
        'o' => "о",
        'p' => "п",
        'q' => "к",
        'r' => "р",
        's' => "с",
        't' => "т",
        'u' => "у",
        'v' => "в",
        'w' => "в",
        'x' => "кс",
        'y' => "ы",
        'z' => "з",
        _ => return None,
    })
}

/// Reverse transliteration from Latin to Russian Cyrillic.
///
/// Greedy longest match over [`CLUSTERS`], then letter by letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinToCyrillic;

impl Transliterator for LatinToCyrillic {
    fn transliterate(&self, token: &str) -> String {
        let lower = token.to_ascii_lowercase();
        let mut out = String::with_capacity(lower.len() * 2);
        let mut rest = lower.as_str();

        'outer: while let Some(c) = rest.chars().next() {
            for (latin, cyr) in CLUSTERS {
                if let Some(tail) = rest.strip_prefix(latin) {
                    out.push_str(cyr);
                    rest = tail;
                    continue 'outer;
                }
            }
            match single(c) {
                Some(cyr) => out.push_str(cyr),
                None => out.push(c),
            }
            rest = &rest[c.len_utf8()..];
        }
        out
    }
}
