//! Version-aware ordering of package file names.
//!
//! Names are compared the way `rpm` compares versions: each name is split
//! into runs of digits and runs of letters, everything else separates runs,
//! and runs are compared pairwise. Digit runs compare as numbers, so
//! `ghost-5.2.0-10.el6` sorts after `ghost-5.2.0-9.el6`.

use std::cmp::Ordering;

/// Compares two file names run by run.
///
/// A digit run beats a letter run at the same position, and a name with runs
/// left over beats one that ran out. Names that only differ in their
/// separators fall back to byte order so that the ordering stays total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (a, b);
    loop {
        left = left.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
        right = right.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
        let (Some(l), Some(r)) = (left.chars().next(), right.chars().next()) else {
            break;
        };
        let numeric = l.is_ascii_digit();
        if numeric != r.is_ascii_digit() {
            return if numeric { Ordering::Greater } else { Ordering::Less };
        }
        let (l_run, l_rest) = split_run(left, numeric);
        let (r_run, r_rest) = split_run(right, numeric);
        let order = match numeric {
            true => compare_numbers(l_run, r_run),
            false => l_run.cmp(r_run),
        };
        if order != Ordering::Equal {
            return order;
        }
        (left, right) = (l_rest, r_rest);
    }
    match (left.is_empty(), right.is_empty()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.cmp(b),
    }
}

fn split_run(s: &str, numeric: bool) -> (&str, &str) {
    let end = s
        .find(|c: char| if numeric { !c.is_ascii_digit() } else { !c.is_ascii_alphabetic() })
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Digit runs of any length, without parsing.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
