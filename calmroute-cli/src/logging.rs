//! Logger installation and log-safe rendering of user input.

use std::io::Write;

use env_logger::{Builder, Env, Target, fmt::Formatter};

/// Longest user-supplied text echoed into logs.
pub const SAFE_TEXT_MAX_CHARS: usize = 48;

const ELLIPSIS: &str = "...";

/// Install the process-wide logger.
///
/// Records go to stderr as `<timestamp> <LEVEL> <target>: <message>`. The
/// filter defaults to `info` and follows `RUST_LOG` when set. Calling this
/// twice is harmless; the second call leaves the first logger in place.
pub fn init_logger() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} {} {}: {}",
                buf.timestamp_seconds(),
                record.level(),
                record.target(),
                record.args()
            )
        });
    // A logger installed earlier (e.g. by a test harness) wins.
    let _ = builder.try_init();
}

/// Shorten user-supplied text before it is logged.
///
/// Whitespace runs collapse to single spaces. Longer text is cut so that,
/// with its `...` suffix, it is exactly [`SAFE_TEXT_MAX_CHARS`] characters.
#[must_use]
pub fn safe_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SAFE_TEXT_MAX_CHARS {
        return collapsed;
    }
    let mut shortened: String = collapsed
        .chars()
        .take(SAFE_TEXT_MAX_CHARS.saturating_sub(ELLIPSIS.len()))
        .collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("India Gate", "India Gate")]
    #[case("  Connaught \n Place,\tDelhi ", "Connaught Place, Delhi")]
    #[case("", "")]
    fn collapses_whitespace(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(safe_text(raw), expected);
    }

    #[rstest]
    fn truncates_long_text() {
        let raw = "a".repeat(60);
        let safe = safe_text(&raw);
        assert_eq!(safe, format!("{}...", "a".repeat(SAFE_TEXT_MAX_CHARS - 3)));
        assert_eq!(safe.chars().count(), SAFE_TEXT_MAX_CHARS);
    }

    #[rstest]
    fn text_one_past_the_limit_is_capped() {
        let raw = "é".repeat(SAFE_TEXT_MAX_CHARS + 1);
        let safe = safe_text(&raw);
        assert_eq!(safe.chars().count(), SAFE_TEXT_MAX_CHARS);
        assert!(safe.ends_with("..."));
    }

    #[rstest]
    fn counts_characters_not_bytes() {
        let raw = "é".repeat(SAFE_TEXT_MAX_CHARS);
        assert_eq!(safe_text(&raw), raw);
    }
}
