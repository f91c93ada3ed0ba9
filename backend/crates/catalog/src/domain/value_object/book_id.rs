use std::fmt;
use uuid::Uuid;

/// Validated book identifier.
///
/// Input must match the canonical hyphenated UUID shape
/// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` (case-insensitive hex).
/// Validation happens before any database lookup, so a malformed id
/// never reaches the storage layer. Stricter than `Uuid::parse_str`,
/// which also accepts braced, simple, and URN forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(Uuid);

impl BookId {
    const HYPHENS: [usize; 4] = [8, 13, 18, 23];

    pub fn parse(input: &str) -> Option<Self> {
        if input.len() != 36 {
            return None;
        }
        for (i, c) in input.char_indices() {
            if Self::HYPHENS.contains(&i) {
                if c != '-' {
                    return None;
                }
            } else if !c.is_ascii_hexdigit() {
                return None;
            }
        }
        Uuid::parse_str(input).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BookId> for Uuid {
    fn from(id: BookId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_form() {
        let id = BookId::parse("6f2d9c1e-3b4a-4d5e-8f60-1a2b3c4d5e6f").unwrap();
        assert_eq!(id.to_string(), "6f2d9c1e-3b4a-4d5e-8f60-1a2b3c4d5e6f");
    }

    #[test]
    fn test_case_insensitive() {
        assert!(BookId::parse("6F2D9C1E-3B4A-4D5E-8F60-1A2B3C4D5E6F").is_some());
    }

    #[test]
    fn test_rejects_short_and_long() {
        assert!(BookId::parse("6f2d9c1e-3b4a-4d5e-8f60").is_none());
        assert!(BookId::parse("6f2d9c1e-3b4a-4d5e-8f60-1a2b3c4d5e6f00").is_none());
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(BookId::parse("6f2d9c1e-3b4a-4d5e-8f60-1a2b3c4d5g6f").is_none());
    }

    #[test]
    fn test_rejects_misplaced_hyphens() {
        assert!(BookId::parse("6f2d9c1e3-b4a-4d5e-8f60-1a2b3c4d5e6f").is_none());
    }

    #[test]
    fn test_rejects_alternate_uuid_forms() {
        // Valid for Uuid::parse_str, invalid on the wire
        assert!(BookId::parse("6f2d9c1e3b4a4d5e8f601a2b3c4d5e6f").is_none());
        assert!(BookId::parse("{6f2d9c1e-3b4a-4d5e-8f60-1a2b3c4d5e6f}").is_none());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(BookId::parse("").is_none());
    }
}
