// ✂️ Field Sanitizer - length caps and casing rules for text fields

/// Maximum characters allowed in any text field
pub const MAX_FIELD_LEN: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSanitizer {
    max_len: usize,
}

impl FieldSanitizer {
    pub fn new(max_len: usize) -> Self {
        FieldSanitizer { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Hard cut to at most `max_len` characters (no word-boundary awareness)
    pub fn truncate(&self, value: &str) -> String {
        match value.char_indices().nth(self.max_len) {
            Some((byte_idx, _)) => value[..byte_idx].to_string(),
            None => value.to_string(),
        }
    }

    /// Trim, upper-case, then truncate
    ///
    /// Upper-casing follows Unicode rules and can lengthen the text (`ß` becomes `SS`);
    /// the cap applies to the upper-cased result.
    pub fn normalize_courier(&self, value: &str) -> String {
        self.truncate(&value.trim().to_uppercase())
    }
}

impl Default for FieldSanitizer {
    fn default() -> Self {
        Self::new(MAX_FIELD_LEN)
    }
}

// ============================================================================
// TESTS
// ============================================================================
