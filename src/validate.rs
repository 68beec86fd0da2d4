//! Input validation helpers for task names and user-supplied ids

/// Field delimiter of the persistence format. Names must not contain it.
pub const DELIMITER: char = ';';

/// True iff at least one character in `text` is an alphabetic letter.
///
/// Rejects empty names and names made only of digits or symbols.
pub fn has_letter(text: &str) -> bool {
    text.chars().any(char::is_alphabetic)
}

/// True iff `text` is non-empty and made only of decimal digits.
///
/// Signs and whitespace are rejected, so negative or padded ids never
/// reach numeric conversion.
pub fn is_numeric_id(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
