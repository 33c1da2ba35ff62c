//=========================================================================
// Display Formatting
//=========================================================================
//
// Human-readable renderings of resource amounts.
//
//   grouped(1234567)   → "1,234,567"
//   compact(13059)     → "13.06K"
//   compact(147923)    → "147.9K"
//   compact(2_500_000) → "2.5M"
//
//=========================================================================

/// Thousands-grouped integer, e.g. `1,234,567`.
pub fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Short form with a K/M/B suffix once the value reaches five digits.
pub fn compact(value: u64) -> String {
    let v = value as f64;
    match value {
        1_000_000_000.. => format!("{}B", trimmed(v / 1e9, 2)),
        100_000_000.. => format!("{}M", trimmed(v / 1e6, 1)),
        1_000_000.. => format!("{}M", trimmed(v / 1e6, 2)),
        100_000.. => format!("{}K", trimmed(v / 1e3, 1)),
        10_000.. => format!("{}K", trimmed(v / 1e3, 2)),
        _ => grouped(value),
    }
}

/// `$` + [`grouped`].
pub fn money(value: u64) -> String {
    format!("${}", grouped(value))
}

/// `$` + [`compact`].
pub fn money_compact(value: u64) -> String {
    format!("${}", compact(value))
}

fn trimmed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
