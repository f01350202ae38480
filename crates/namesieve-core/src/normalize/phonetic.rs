//! Phonetic encoding of rewritten text

/// Phonetic-transcription collaborator. Must be a pure function of `text`.
pub trait PhoneticEncoder: Send + Sync {
    fn encode(&self, text: &str) -> String;
}

/// Consonant clusters collapsed in reduced-phoneme mode, longest first.
const REDUCTIONS: &[(&str, &str)] = &[
    ("ВСТВ", "СТВ"),
    ("НДСК", "НСК"),
    ("НТСК", "НСК"),
    ("СТН", "СН"),
    ("ЗДН", "ЗН"),
    ("ЛНЦ", "НЦ"),
    ("СЧ", "Щ"),
    ("ЗЧ", "Щ"),
    ("ЖЧ", "Щ"),
    ("ТС", "Ц"),
    ("ДС", "Ц"),
];

const VOICELESS: &str = "ПСТКФХЦЧШЩ";

fn is_letter(c: char) -> bool {
    matches!(c, 'А'..='Я' | 'Ё')
}

fn devoiced(c: char) -> Option<char> {
    Some(match c {
        'Б' => 'П',
        'З' => 'С',
        'Д' => 'Т',
        'В' => 'Ф',
        'Г' => 'К',
        'Ж' => 'Ш',
        _ => return None,
    })
}

/// Russian metaphone, one code per word.
///
/// Word boundaries are kept (joined by single spaces) so token-based scorers
/// still see tokens. Anything that is not a Cyrillic letter is dropped.
#[derive(Debug, Clone, Copy)]
pub struct RussianMetaphone {
    reduce_phonemes: bool,
}

impl Default for RussianMetaphone {
    fn default() -> Self {
        Self::reduced()
    }
}

impl RussianMetaphone {
    pub fn new(reduce_phonemes: bool) -> Self {
        Self { reduce_phonemes }
    }

    /// Coarser encoding that merges more spellings into one key.
    pub fn reduced() -> Self {
        Self::new(true)
    }

    fn encode_word(&self, word: &str) -> String {
        let mut w: String = word
            .chars()
            .flat_map(char::to_uppercase)
            .filter(|c| is_letter(*c) && *c != 'Ь' && *c != 'Ъ')
            .collect();
        if w.is_empty() {
            return w;
        }

        if self.reduce_phonemes {
            for (from, to) in REDUCTIONS {
                w = w.replace(from, to);
            }
        }

        let chars: Vec<char> = fold_vowels(&w);

        let mut coded: Vec<char> = Vec::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            let next = chars.get(i + 1);
            let before_voiceless = next.is_none_or(|n| VOICELESS.contains(*n));
            let c = match devoiced(c) {
                Some(d) if before_voiceless => d,
                _ => c,
            };
            if coded.last() != Some(&c) {
                coded.push(c);
            }
        }
        coded.into_iter().collect()
    }
}

fn fold_vowels(word: &str) -> Vec<char> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if matches!(c, 'Й' | 'И') && matches!(next, Some('О' | 'Е')) {
            out.push('И');
            i += 2;
            continue;
        }
        out.push(match c {
            'О' | 'Ы' | 'Я' => 'А',
            'Е' | 'Ё' | 'Э' => 'И',
            'Ю' => 'У',
            other => other,
        });
        i += 1;
    }
    out
}

impl PhoneticEncoder for RussianMetaphone {
    fn encode(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.encode_word(word))
            .filter(|code| !code.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
