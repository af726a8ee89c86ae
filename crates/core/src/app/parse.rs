//! Parsing of `hash|epoch-seconds|subject` log lines into merge records

use crate::domain::record::{MergeRecord, PrUrlTemplate};
use crate::error::{CoreError, Result};
use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static PR_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(\d+)").expect("valid regex"));

/// Parse one log line into a [`MergeRecord`].
///
/// The line is split on its first two `|`; the subject keeps any further
/// pipes. A line without two separators or with a non-numeric timestamp is
/// rejected.
pub fn parse_log_line(line: &str, template: &PrUrlTemplate) -> Result<MergeRecord> {
    let malformed = |reason: &str| CoreError::MalformedLogLine {
        line: line.to_string(),
        reason: reason.to_string(),
    };

    let mut fields = line.splitn(3, '|');
    let (Some(hash), Some(timestamp), Some(subject)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed("expected hash|timestamp|subject"));
    };

    let seconds: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| malformed("timestamp is not an integer"))?;
    let merged_at = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| malformed("timestamp out of range"))?;

    let pr_number = extract_pr_number(subject);
    let pr_link = pr_number.map(|n| template.render(n));

    Ok(MergeRecord {
        merged_at,
        pr_number,
        pr_link,
        commit_hash: hash.to_string(),
    })
}

/// Parse every line, keeping input order. Stops at the first malformed line.
pub fn parse_log(lines: &[String], template: &PrUrlTemplate) -> Result<Vec<MergeRecord>> {
    let records = lines
        .iter()
        .map(|line| parse_log_line(line, template))
        .collect::<Result<Vec<_>>>()?;
    debug!("Parsed {} merge records", records.len());
    Ok(records)
}

/// First `#<digits>` in the subject
pub fn extract_pr_number(subject: &str) -> Option<u64> {
    let digits = PR_NUMBER.captures(subject)?.get(1)?.as_str();
    match digits.parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring PR number #{} in {:?}: {}", digits, subject, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn template() -> PrUrlTemplate {
        PrUrlTemplate::new("https://github.com/acme/widgets/pull/{number}").unwrap()
    }

    #[test]
    fn test_parse_pull_request_merge() {
        let record =
            parse_log_line("abc123|1700000000|Merge pull request #42 from x/y", &template())
                .unwrap();

        assert_eq!(record.commit_hash, "abc123");
        assert_eq!(record.pr_number, Some(42));
        assert_eq!(
            record.pr_link.as_deref(),
            Some("https://github.com/acme/widgets/pull/42")
        );
        assert_eq!(
            record.merged_at,
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap()
        );
    }

    #[test]
    fn test_subject_keeps_extra_pipes() {
        let record = parse_log_line(
            "abc123|1700000000|Merge pull request #7 from x/a|b|c",
            &template(),
        )
        .unwrap();
        assert_eq!(record.pr_number, Some(7));
        assert_eq!(record.commit_hash, "abc123");
    }

    #[test]
    fn test_subject_without_number() {
        let record =
            parse_log_line("abc123|1700000000|Merge pull request from x/y", &template()).unwrap();
        assert_eq!(record.pr_number, None);
        assert_eq!(record.pr_link, None);
    }

    #[test]
    fn test_hash_sign_without_digits() {
        assert_eq!(extract_pr_number("Merge pull request # from x/y"), None);
        assert_eq!(extract_pr_number("Merge pull request #abc"), None);
    }

    #[test]
    fn test_first_number_wins() {
        assert_eq!(extract_pr_number("Merge pull request #12 from x/fix-#99"), Some(12));
    }

    #[test]
    fn test_number_overflow_is_ignored() {
        assert_eq!(
            extract_pr_number("Merge pull request #99999999999999999999999 from x/y"),
            None
        );
    }

    #[test]
    fn test_empty_subject_is_accepted() {
        let record = parse_log_line("abc123|1700000000|", &template()).unwrap();
        assert_eq!(record.pr_number, None);
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let err = parse_log_line("abc123|1700000000", &template()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedLogLine { .. }));

        let err = parse_log_line("abc123", &template()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedLogLine { .. }));
    }

    #[test]
    fn test_non_numeric_timestamp_is_malformed() {
        let err = parse_log_line("abc123|yesterday|Merge pull request #1", &template())
            .unwrap_err();
        match err {
            CoreError::MalformedLogLine { line, reason } => {
                assert_eq!(line, "abc123|yesterday|Merge pull request #1");
                assert!(reason.contains("timestamp"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_log_preserves_order() {
        let lines = vec![
            "ccc|1700000300|Merge pull request #3 from x/c".to_string(),
            "bbb|1700000200|Merge pull request #2 from x/b".to_string(),
            "aaa|1700000100|Merge pull request #1 from x/a".to_string(),
        ];
        let records = parse_log(&lines, &template()).unwrap();
        let hashes: Vec<_> = records.iter().map(|r| r.commit_hash.as_str()).collect();
        assert_eq!(hashes, vec!["ccc", "bbb", "aaa"]);
    }

    #[test]
    fn test_parse_log_stops_at_malformed_line() {
        let lines = vec![
            "aaa|1700000100|Merge pull request #1 from x/a".to_string(),
            "garbage".to_string(),
        ];
        assert!(parse_log(&lines, &template()).is_err());
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_log(&[], &template()).unwrap().is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn template() -> PrUrlTemplate {
        PrUrlTemplate::new("https://github.com/acme/widgets/pull/{number}").unwrap()
    }

    proptest! {
        /// Property: the number embedded in a merge subject is recovered
        #[test]
        fn prop_pr_number_recovered(
            hash in "[0-9a-f]{40}",
            seconds in 0i64..4_000_000_000i64,
            number in any::<u64>(),
            branch in "[a-z]{1,12}/[a-z-]{1,20}",
        ) {
            let line = format!("{hash}|{seconds}|Merge pull request #{number} from {branch}");
            let record = parse_log_line(&line, &template()).unwrap();
            prop_assert_eq!(record.pr_number, Some(number));
            let expected_link = format!("https://github.com/acme/widgets/pull/{number}");
            prop_assert_eq!(record.pr_link, Some(expected_link));
            prop_assert_eq!(record.commit_hash, hash);
            prop_assert_eq!(record.merged_at.timestamp(), seconds);
        }

        /// Property: subjects without '#' never produce a number or link
        #[test]
        fn prop_no_hash_no_link(subject in "[^#\n]*") {
            let line = format!("abc123|1700000000|{subject}");
            let record = parse_log_line(&line, &template()).unwrap();
            prop_assert_eq!(record.pr_number, None);
            prop_assert_eq!(record.pr_link, None);
        }
    }
}
