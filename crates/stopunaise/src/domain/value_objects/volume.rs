//! Volume - Milliliter quantities written as product labels ("250ml")

/// Parse a volume label into milliliters.
///
/// Accepts an optional, case-insensitive `ml` suffix and reads the leading
/// decimal digits. Anything unparseable counts as zero.
pub fn parse_volume_ml(label: &str) -> u64 {
    let trimmed = label.trim();
    let lower = trimmed.to_ascii_lowercase();
    let number = lower.strip_suffix("ml").unwrap_or(&lower).trim_end();

    let digits: String = number.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
