//! XSD `duration` lexical form (`PnYnMnDTnHnMnS`).
//!
//! Durations are machine durations, so calendar units use fixed lengths:
//! a day is 24 hours, a week 7 days, a month 4 weeks and a year 12 months.
//! Both directions share these constants which keeps round-trips exact.

use jiff::SignedDuration;

use crate::error::{DecodeError, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 4 * WEEK;
const YEAR: u64 = 12 * MONTH;

const DATE_LABELS: [char; 4] = ['Y', 'M', 'W', 'D'];
const TIME_LABELS: [char; 3] = ['H', 'M', 'S'];

pub fn encode_duration(d: SignedDuration) -> String {
    if d.is_zero() {
        return "PT0S".to_string();
    }
    let mut secs = d.as_secs().unsigned_abs();
    let nanos = d.subsec_nanos().unsigned_abs();

    let mut out = String::new();
    if d.is_negative() {
        out.push('-');
    }
    out.push('P');
    for (unit, label) in [(YEAR, 'Y'), (MONTH, 'M'), (DAY, 'D')] {
        let n = secs / unit;
        secs %= unit;
        if n > 0 {
            out.push_str(&format!("{n}{label}"));
        }
    }
    if secs == 0 && nanos == 0 {
        return out;
    }
    out.push('T');
    for (unit, label) in [(HOUR, 'H'), (MINUTE, 'M')] {
        let n = secs / unit;
        secs %= unit;
        if n > 0 {
            out.push_str(&format!("{n}{label}"));
        }
    }
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push_str(&format!("{secs}.{}S", fraction.trim_end_matches('0')));
    } else if secs > 0 {
        out.push_str(&format!("{secs}S"));
    }
    out
}

pub fn decode_duration(s: &str) -> Result<SignedDuration> {
    let invalid = || DecodeError::Syntax(format!("invalid duration {s:?}"));

    let (negative, rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let rest = rest.strip_prefix('P').ok_or_else(invalid)?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) if !time.is_empty() => (date, Some(time)),
        Some(_) => return Err(invalid()),
        None => (rest, None),
    };

    let mut secs: u64 = 0;
    let mut nanos: u32 = 0;
    let mut components = 0;

    for (value, label) in components_of(date, &DATE_LABELS).ok_or_else(invalid)? {
        let unit = match label {
            'Y' => YEAR,
            'M' => MONTH,
            'W' => WEEK,
            'D' => DAY,
            _ => return Err(invalid()),
        };
        let n: u64 = value.parse().map_err(|_| invalid())?;
        secs = n
            .checked_mul(unit)
            .and_then(|v| secs.checked_add(v))
            .ok_or_else(invalid)?;
        components += 1;
    }
    if let Some(time) = time {
        for (value, label) in components_of(time, &TIME_LABELS).ok_or_else(invalid)? {
            if label == 'S' {
                let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
                let n: u64 = whole.parse().map_err(|_| invalid())?;
                secs = secs.checked_add(n).ok_or_else(invalid)?;
                if !fraction.is_empty() {
                    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid());
                    }
                    let digits: String = fraction.chars().chain("000000000".chars()).take(9).collect();
                    nanos = digits.parse().map_err(|_| invalid())?;
                }
                components += 1;
                continue;
            }
            let unit = match label {
                'H' => HOUR,
                'M' => MINUTE,
                _ => return Err(invalid()),
            };
            let n: u64 = value.parse().map_err(|_| invalid())?;
            secs = n
                .checked_mul(unit)
                .and_then(|v| secs.checked_add(v))
                .ok_or_else(invalid)?;
            components += 1;
        }
    }
    if components == 0 {
        return Err(invalid());
    }

    let secs = i64::try_from(secs).map_err(|_| invalid())?;
    let nanos = nanos as i32;
    if negative {
        Ok(SignedDuration::new(-secs, -nanos))
    } else {
        Ok(SignedDuration::new(secs, nanos))
    }
}

/// Splits `2Y6M5D` into `[("2", 'Y'), ("6", 'M'), ("5", 'D')]`. Labels must
/// follow `order` and appear at most once.
fn components_of<'a>(s: &'a str, order: &[char]) -> Option<Vec<(&'a str, char)>> {
    let mut out = vec![];
    let mut start = 0;
    let mut next = 0;
    for (idx, ch) in s.char_indices() {
        if ch.is_ascii_digit() || ch == '.' {
            continue;
        }
        if idx == start {
            return None;
        }
        next += order[next..].iter().position(|&label| label == ch)? + 1;
        out.push((&s[start..idx], ch));
        start = idx + ch.len_utf8();
    }
    if start != s.len() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use jiff::SignedDuration;

    use super::{DAY, HOUR, MINUTE, MONTH, WEEK, YEAR, decode_duration, encode_duration};

    fn secs(n: u64) -> SignedDuration {
        SignedDuration::from_secs(n as i64)
    }

    #[test]
    fn zero() -> Result<()> {
        assert_eq!(encode_duration(SignedDuration::ZERO), "PT0S");
        assert_eq!(decode_duration("PT0S")?, SignedDuration::ZERO);
        Ok(())
    }

    #[test]
    fn one_year() -> Result<()> {
        assert_eq!(encode_duration(secs(YEAR)), "P1Y");
        assert_eq!(decode_duration("P1Y")?, secs(YEAR));
        assert_eq!(YEAR, 336 * DAY);
        Ok(())
    }

    #[test]
    fn mixed() -> Result<()> {
        let d = secs(2 * YEAR + 6 * MONTH + 5 * DAY + 12 * HOUR + 35 * MINUTE + 30);
        assert_eq!(encode_duration(d), "P2Y6M5DT12H35M30S");
        assert_eq!(decode_duration("P2Y6M5DT12H35M30S")?, d);
        Ok(())
    }

    #[test]
    fn negative_and_fractional() -> Result<()> {
        let d = SignedDuration::new(-(HOUR as i64) - 1, -500_000_000);
        assert_eq!(encode_duration(d), "-PT1H1.5S");
        assert_eq!(decode_duration("-PT1H1.5S")?, d);
        Ok(())
    }

    #[test]
    fn weeks_are_accepted_on_decode() -> Result<()> {
        assert_eq!(decode_duration("P2W")?, secs(2 * WEEK));
        assert_eq!(encode_duration(secs(2 * WEEK)), "P14D");
        Ok(())
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "P", "PT", "1Y", "PY", "P1X", "P1YT", "PT1.5H", "P1Y2"] {
            assert!(decode_duration(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn components_in_lexical_order_only() -> Result<()> {
        for bad in ["P1D2Y", "P1Y1Y", "P1M1Y", "P1D1W", "PT1S1H", "PT1M1M", "P1YT2S3M"] {
            assert!(decode_duration(bad).is_err(), "{bad} should not parse");
        }
        assert_eq!(
            decode_duration("P1Y1M1W1DT1H1M1S")?,
            secs(YEAR + MONTH + WEEK + DAY + HOUR + MINUTE + 1)
        );
        Ok(())
    }
}
