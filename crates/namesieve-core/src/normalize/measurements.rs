//! Dimension collapsing: "10x5см" -> "50"

use std::sync::LazyLock;

use regex::Regex;

/// Two or three factors joined by x / х / × / *, each with an optional
/// cm/m/mm unit in either script. A trailing unit must end a word.
static DIMENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let num = r"[0-9]+(?:[.,][0-9]+)?";
    let unit = r"(?:\s*[сcmм]{1,2})?";
    let last_unit = r"(?:\s*[сcmм]{1,2}\b)?";
    let delim = r"\s*[xх×*]\s*";
    Regex::new(&format!(
        "{num}{unit}{delim}{num}(?:{unit}{delim}{num}{last_unit}|{last_unit})"
    ))
    .expect("dimension regex")
});

static FACTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:[.,][0-9]+)?").expect("factor regex"));

/// Replace every dimension expression with the product of its factors.
///
/// Replacement is by literal substring: when the same expression text occurs
/// twice, both occurrences are rewritten.
pub fn normalize_measurements(text: &str) -> String {
    let found: Vec<(String, String)> = DIMENSION_RE
        .find_iter(text)
        .filter_map(|m| {
            let product = product_of(m.as_str())?;
            Some((m.as_str().to_string(), format_product(product)))
        })
        .collect();

    let mut out = text.to_string();
    for (expr, product) in found {
        out = out.replace(&expr, &product);
    }
    out
}

fn product_of(expr: &str) -> Option<f64> {
    FACTOR_RE
        .find_iter(expr)
        .map(|f| f.as_str().replace(',', ".").parse::<f64>().ok())
        .try_fold(1.0, |acc, factor| factor.map(|f| acc * f))
}

/// Integral products print without a fraction, the rest round to 2 places.
fn format_product(product: f64) -> String {
    if product.fract() == 0.0 {
        format!("{:.0}", product)
    } else {
        let rounded = (product * 100.0).round() / 100.0;
        format!("{}", rounded)
    }
}
