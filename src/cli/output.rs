//! Output formatting for CLI commands

use std::io::{self, Write};

/// Print a section header
pub fn print_section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(60))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(60))
}

/// Print a key-value pair
pub fn print_kv<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:20} {}", format!("{}:", key), value)
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// `count (rate%)`
pub fn format_count_rate(count: usize, rate: f64) -> String {
    format!("{} ({:.1}%)", format_number(count), rate * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_count_rate() {
        assert_eq!(format_count_rate(250, 0.25), "250 (25.0%)");
    }

    #[test]
    fn test_print_kv_alignment() {
        let mut out = Vec::new();
        print_kv(&mut out, "Episodes", "10").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("  {:20} 10\n", "Episodes:"));
    }
}
