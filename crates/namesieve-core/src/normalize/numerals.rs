//! Digit-run spell-out

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run regex"));

/// Numeral-to-words collaborator.
///
/// Returns `None` for values it cannot spell; the caller keeps the digits.
pub trait NumeralSpeller: Send + Sync {
    fn spell(&self, value: f64) -> Option<String>;
}

/// Replace every digit run with its spelled-out form.
///
/// Same literal-substring semantics as transliteration: a run such as "5"
/// also rewrites the "5" inside a later "15" if it is replaced first.
pub fn spell_numerals<S>(text: &str, speller: &S) -> String
where
    S: NumeralSpeller + ?Sized,
{
    let mut runs: Vec<&str> = Vec::new();
    for m in DIGIT_RUN_RE.find_iter(text) {
        if !runs.contains(&m.as_str()) {
            runs.push(m.as_str());
        }
    }

    let replacements: Vec<(&str, String)> = runs
        .into_iter()
        .filter_map(|run| {
            let value = run.parse::<f64>().ok()?;
            speller.spell(value).map(|words| (run, words))
        })
        .collect();

    let mut out = text.to_string();
    for (run, words) in replacements {
        out = out.replace(run, &words);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Masculine,
    Feminine,
}

const UNITS: [&str; 10] = [
    "", "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять",
];

const TEENS: [&str; 10] = [
    "десять",
    "одиннадцать",
    "двенадцать",
    "тринадцать",
    "четырнадцать",
    "пятнадцать",
    "шестнадцать",
    "семнадцать",
    "восемнадцать",
    "девятнадцать",
];

const TENS: [&str; 10] = [
    "", "", "двадцать", "тридцать", "сорок", "пятьдесят", "шестьдесят", "семьдесят",
    "восемьдесят", "девяносто",
];

const HUNDREDS: [&str; 10] = [
    "", "сто", "двести", "триста", "четыреста", "пятьсот", "шестьсот", "семьсот", "восемьсот",
    "девятьсот",
];

const SCALES: [(u64, [&str; 3], Gender); 4] = [
    (
        1_000_000_000_000,
        ["триллион", "триллиона", "триллионов"],
        Gender::Masculine,
    ),
    (
        1_000_000_000,
        ["миллиард", "миллиарда", "миллиардов"],
        Gender::Masculine,
    ),
    (
        1_000_000,
        ["миллион", "миллиона", "миллионов"],
        Gender::Masculine,
    ),
    (1_000, ["тысяча", "тысячи", "тысяч"], Gender::Feminine),
];

const WHOLE: [&str; 3] = ["целая", "целых", "целых"];

const FRACTIONS: [[&str; 3]; 3] = [
    ["десятая", "десятых", "десятых"],
    ["сотая", "сотых", "сотых"],
    ["тысячная", "тысячных", "тысячных"],
];

/// Largest value (exclusive) the speller handles.
const LIMIT: f64 = 1e15;

/// Pick the one/few/many form agreeing with `n`.
fn plural<'a>(n: u64, forms: &[&'a str; 3]) -> &'a str {
    match (n % 100, n % 10) {
        (11..=14, _) => forms[2],
        (_, 1) => forms[0],
        (_, 2..=4) => forms[1],
        _ => forms[2],
    }
}

fn push_hundreds(n: u64, gender: Gender, words: &mut Vec<&'static str>) {
    let hundreds = (n / 100) as usize;
    let rest = n % 100;
    if hundreds > 0 {
        words.push(HUNDREDS[hundreds]);
    }
    if (10..20).contains(&rest) {
        words.push(TEENS[(rest - 10) as usize]);
        return;
    }
    let tens = (rest / 10) as usize;
    let units = (rest % 10) as usize;
    if tens >= 2 {
        words.push(TENS[tens]);
    }
    match (units, gender) {
        (0, _) => {}
        (1, Gender::Feminine) => words.push("одна"),
        (2, Gender::Feminine) => words.push("две"),
        _ => words.push(UNITS[units]),
    }
}

fn cardinal(n: u64, gender: Gender) -> String {
    if n == 0 {
        return "ноль".to_string();
    }
    let mut words = Vec::new();
    let mut rest = n;
    for (scale, forms, scale_gender) in SCALES {
        let count = rest / scale;
        if count > 0 {
            push_hundreds(count, scale_gender, &mut words);
            words.push(plural(count, &forms));
            rest %= scale;
        }
    }
    push_hundreds(rest, gender, &mut words);
    words.join(" ")
}

/// Russian numerals in fractional form.
///
/// Every value is spelled as "<whole> целых <fraction> десятых", so integral
/// values read "пятьдесят целых ноль десятых". Up to three fractional digits
/// are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct RussianNumerals;

impl RussianNumerals {
    /// Spell a non-negative integer, masculine ("один", "два").
    pub fn integer(n: u64) -> String {
        cardinal(n, Gender::Masculine)
    }
}

impl NumeralSpeller for RussianNumerals {
    fn spell(&self, value: f64) -> Option<String> {
        if !value.is_finite() || !(0.0..LIMIT).contains(&value) {
            return None;
        }
        let whole = value.trunc() as u64;

        let formatted = format!("{}", value);
        let digits = match formatted.split_once('.') {
            Some((_, frac)) => &frac[..frac.len().min(FRACTIONS.len())],
            None => "0",
        };
        let fraction: u64 = digits.parse().ok()?;
        let fraction_forms = &FRACTIONS[digits.len() - 1];

        Some(format!(
            "{} {} {} {}",
            cardinal(whole, Gender::Feminine),
            plural(whole, &WHOLE),
            cardinal(fraction, Gender::Feminine),
            plural(fraction, fraction_forms),
        ))
    }
}
