//! Name normalization pipeline
//!
//! Reduces a record name or a query to a phonetic key. The stages run in a
//! fixed order:
//!
//! 1. lower-case
//! 2. collapse dimension expressions ("10x5см" -> "50")
//! 3. transliterate Latin runs
//! 4. spell out digit runs
//! 5. phonetic encoding
//!
//! Dimensions collapse before numerals are spelled so a product is spelled as
//! one number. Transliteration runs before spell-out so the encoder only ever
//! sees text in a single script.
//!
//! The transliteration, numeral and phonetic stages delegate to collaborator
//! traits. [`Normalizer::default`] wires the Russian implementations.
//!
//! # Example
//!
//! ```rust
//! use namesieve_core::normalize::Normalizer;
//!
//! let normalizer = Normalizer::default();
//! assert_eq!(normalizer.normalize("Стол 10x5см"), normalizer.normalize("стол 50"));
//! ```

mod measurements;
mod numerals;
mod phonetic;
mod translit;

pub use measurements::normalize_measurements;
pub use numerals::{spell_numerals, NumeralSpeller, RussianNumerals};
pub use phonetic::{PhoneticEncoder, RussianMetaphone};
pub use translit::{transliterate, LatinToCyrillic, Transliterator};

/// Canonical key produced by [`Normalizer::normalize`]. Distinct names may
/// share a key.
pub type PhoneticKey = String;

/// The composed pipeline with its three collaborators.
pub struct Normalizer {
    transliterator: Box<dyn Transliterator>,
    speller: Box<dyn NumeralSpeller>,
    encoder: Box<dyn PhoneticEncoder>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(
            LatinToCyrillic,
            RussianNumerals,
            RussianMetaphone::reduced(),
        )
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    pub fn new(
        transliterator: impl Transliterator + 'static,
        speller: impl NumeralSpeller + 'static,
        encoder: impl PhoneticEncoder + 'static,
    ) -> Self {
        Self {
            transliterator: Box::new(transliterator),
            speller: Box::new(speller),
            encoder: Box::new(encoder),
        }
    }

    /// Every stage except the phonetic encoding.
    pub fn rewrite(&self, text: &str) -> String {
        let text = normalize_measurements(&text.to_lowercase());
        let text = transliterate(&text, self.transliterator.as_ref());
        spell_numerals(&text, self.speller.as_ref())
    }

    /// Reduce `text` to its phonetic key.
    pub fn normalize(&self, text: &str) -> PhoneticKey {
        self.encoder.encode(&self.rewrite(text))
    }
}
