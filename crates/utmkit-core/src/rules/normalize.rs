use crate::domain::NormalizationConfig;
use crate::rules::text::{dash_runs, is_space, is_url_safe};

/// Rewrites a raw UTM value into its canonical form.
///
/// With the master switch on, the steps run in this order:
/// 1. lowercase (if `lowercase_values`)
/// 2. whitespace runs become `-` (if `replace_spaces`)
/// 3. characters outside word chars, whitespace and URL punctuation are dropped
/// 4. runs of `-` and `_` collapse to a single `-`
/// 5. leading and trailing `-` are trimmed
///
/// Steps 3 to 5 always apply while the master switch is on.
pub fn normalize(raw: &str, config: &NormalizationConfig) -> String {
    if !config.normalize_values {
        return raw.to_string();
    }

    let mut value = if config.lowercase_values {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };

    if config.replace_spaces {
        value = dash_runs(&value, is_space);
    }

    value.retain(is_url_safe);
    let collapsed = dash_runs(&value, |ch| ch == '-' || ch == '_');
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::domain::NormalizationConfig;

    fn config(
        normalize_values: bool,
        lowercase_values: bool,
        replace_spaces: bool,
    ) -> NormalizationConfig {
        NormalizationConfig {
            normalize_values,
            lowercase_values,
            replace_spaces,
        }
    }

    const SAMPLES: [&str; 10] = [
        "",
        "Summer SALE",
        "  a__b  c--d  ",
        "héllo wörld!",
        "--Leading and trailing__",
        "Black Friday % 50 \"off\"",
        "https://example.com/?a=b#frag",
        "tab\tseparated\nlines",
        "İstanbul Ünïcode",
        "___",
    ];

    #[test]
    fn master_switch_off_is_transparent() {
        for sub in [(false, false), (true, false), (false, true), (true, true)] {
            let cfg = config(false, sub.0, sub.1);
            for sample in SAMPLES {
                assert_eq!(normalize(sample, &cfg), sample);
            }
        }
    }

    #[test]
    fn normalize_lowercases_and_dashes() {
        assert_eq!(
            normalize("Summer SALE", &config(true, true, true)),
            "summer-sale"
        );
    }

    #[test]
    fn collapse_and_trim_apply_without_lowercase() {
        assert_eq!(
            normalize("  a__b  c--d  ", &config(true, false, true)),
            "a-b-c-d"
        );
        assert_eq!(
            normalize("Mixed__Case", &config(true, false, false)),
            "Mixed-Case"
        );
    }

    #[test]
    fn whitespace_is_kept_when_replace_spaces_is_off() {
        assert_eq!(
            normalize(" Summer  Sale ", &config(true, true, false)),
            " summer  sale "
        );
    }

    #[test]
    fn non_ascii_letters_are_stripped() {
        assert_eq!(
            normalize("héllo wörld!", &config(true, true, true)),
            "hllo-wrld!"
        );
    }

    #[test]
    fn url_punctuation_survives() {
        assert_eq!(
            normalize("a:b/c?d#e[f]@g!$&'()*+,;=.~", &config(true, true, true)),
            "a:b/c?d#e[f]@g!$&'()*+,;=.~"
        );
    }

    #[test]
    fn whitespace_class_matches_ecmascript() {
        let cfg = config(true, true, true);
        assert_eq!(normalize("a\u{FEFF}b", &cfg), "a-b");
        assert_eq!(normalize("a\u{3000}b", &cfg), "a-b");
        assert_eq!(normalize("a\u{0085}b", &cfg), "ab");
    }

    #[test]
    fn stripping_can_join_dash_runs() {
        assert_eq!(normalize("50 % off", &config(true, true, true)), "50-off");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize("", &config(true, true, true)), "");
        assert_eq!(normalize("_-_", &config(true, true, true)), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for normalize_values in [true, false] {
            for lowercase_values in [true, false] {
                for replace_spaces in [true, false] {
                    let cfg = config(normalize_values, lowercase_values, replace_spaces);
                    for sample in SAMPLES {
                        let once = normalize(sample, &cfg);
                        assert_eq!(
                            normalize(&once, &cfg),
                            once,
                            "sample {sample:?} cfg {cfg:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn normalize_does_not_touch_config() {
        let cfg = config(true, false, true);
        let copy = cfg;
        let _ = normalize("Anything Goes", &cfg);
        assert_eq!(cfg, copy);
    }
}
