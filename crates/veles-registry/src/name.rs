//! Full-name validation for registry items.
//!
//! A full name is `registry:item` where each half is an identifier:
//! a letter or underscore followed by letters, digits, or underscores.

use crate::{Error, Result};

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `full_name` matches the `registry:item` form.
pub fn is_name_valid(full_name: &str) -> bool {
    match full_name.split_once(':') {
        Some((registry, item)) => is_identifier(registry) && is_identifier(item),
        None => false,
    }
}

/// Split a full name into its `(registry, item)` halves.
pub fn split_full_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once(':') {
        Some(parts) if is_name_valid(full_name) => Ok(parts),
        _ => Err(Error::InvalidName(full_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_name_valid("core:stone"));
        assert!(is_name_valid("_private:_item_2"));
        assert!(is_name_valid("Mod1:Thing"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_name_valid(""));
        assert!(!is_name_valid("core"));
        assert!(!is_name_valid(":stone"));
        assert!(!is_name_valid("core:"));
        assert!(!is_name_valid("1core:stone"));
        assert!(!is_name_valid("core:sto ne"));
        assert!(!is_name_valid("core:stone:extra"));
        assert!(!is_name_valid("côre:stone"));
    }

    #[test]
    fn test_split() {
        assert_eq!(split_full_name("core:stone").unwrap(), ("core", "stone"));
        assert!(matches!(
            split_full_name("nope"),
            Err(Error::InvalidName(_))
        ));
    }
}
