// ==========================================
// Class Assign - roster row parser
// ==========================================
// One pasted line (or one file row) -> one student
// Layout: [index] name [gender] [rank] [note...]
// ==========================================

use crate::domain::student::NewStudent;
use crate::domain::types::Gender;

/// First tokens that mark a header line
const HEADER_TOKENS: [&str; 5] = ["이름", "성명", "번호", "name", "no"];

/// Substrings that make a gender token female
const FEMALE_MARKERS: [&str; 6] = ["여", "여자", "여학생", "F", "f", "Female"];

// ==========================================
// ParsedRow
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub name: String,
    pub gender: Gender,
    pub rank: u32,
    pub note: String,
}

impl ParsedRow {
    /// Imported rows are never transfers and carry no override
    pub fn into_new_student(self, original_class: u32) -> NewStudent {
        NewStudent {
            name: self.name,
            gender: self.gender,
            rank: self.rank,
            note: self.note,
            is_transfer: false,
            original_class,
        }
    }
}

// ==========================================
// RowParser
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct RowParser;

impl RowParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line; None when the line is blank or a header
    pub fn parse_line(&self, line: &str) -> Option<ParsedRow> {
        let normalized = line.replace(['\t', ','], " ");
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        self.parse_tokens(&tokens)
    }

    /// Parse one spreadsheet row; cells are re-tokenized like a pasted line
    pub fn parse_cells(&self, cells: &[String]) -> Option<ParsedRow> {
        self.parse_line(&cells.join("\t"))
    }

    fn parse_tokens(&self, tokens: &[&str]) -> Option<ParsedRow> {
        let first = tokens.first()?;
        if is_header_token(first) {
            return None;
        }

        // leading row number
        let start = if tokens.len() > 1 && is_all_digits(first) { 1 } else { 0 };

        let name = tokens.get(start)?.to_string();
        let gender = tokens
            .get(start + 1)
            .map(|t| parse_gender(t))
            .unwrap_or(Gender::M);
        let rank = tokens.get(start + 2).map(|t| parse_rank(t)).unwrap_or(0);
        let note = tokens.get(start + 3..).map(|rest| rest.join(" ")).unwrap_or_default();

        Some(ParsedRow {
            name,
            gender,
            rank,
            note,
        })
    }
}

fn is_header_token(token: &str) -> bool {
    HEADER_TOKENS
        .iter()
        .any(|h| token == *h || (h.is_ascii() && token.eq_ignore_ascii_case(h)))
}

fn is_all_digits(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// 여/F markers -> F, anything else -> M
pub fn parse_gender(token: &str) -> Gender {
    if FEMALE_MARKERS.iter().any(|m| token.contains(m)) {
        Gender::F
    } else {
        Gender::M
    }
}

/// Digits only ("3등" -> 3); 0 when none, u32::MAX when too large
pub fn parse_rank(token: &str) -> u32 {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    // only overflow can fail here; oversized ranks sort last
    digits.parse().unwrap_or(u32::MAX)
}
