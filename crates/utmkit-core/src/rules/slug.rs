use crate::error::CoreError;
use crate::rules::text::{dash_runs, is_space, is_word_char};
use crate::time::calendar_year;

/// Derives a machine value from a human label: `"Housing Fair! 2024"`
/// becomes `"housing-fair-2024"`. Only word characters survive, unlike
/// [`crate::rules::normalize`] which keeps URL punctuation.
pub fn slugify(label: &str) -> String {
    let mut value = label.to_lowercase().trim_matches(is_space).to_string();
    value.retain(|ch| is_word_char(ch) || is_space(ch) || ch == '-');
    let collapsed = dash_runs(&value, |ch| is_space(ch) || ch == '_' || ch == '-');
    collapsed.trim_matches('-').to_string()
}

/// Builds a campaign value like `housing-fair-london-2024`.
///
/// Name and location are only lowercased with whitespace runs turned into
/// dashes; punctuation is left alone.
pub fn format_event_template(
    event_name: &str,
    location: &str,
    date: &str,
) -> Result<String, CoreError> {
    let year = calendar_year(date).map_err(|_| CoreError::InvalidDate(date.to_string()))?;
    Ok(format!(
        "{}-{}-{:04}",
        dash_words(event_name),
        dash_words(location),
        year
    ))
}

fn dash_words(value: &str) -> String {
    dash_runs(&value.to_lowercase(), is_space)
}

#[cfg(test)]
mod tests {
    use super::{format_event_template, slugify};
    use crate::error::CoreError;

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Housing Fair! 2024"), "housing-fair-2024");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Spring__Sale -- Final  "), "spring-sale-final");
        assert_eq!(slugify("a.b:c/d"), "abcd");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Zürich"), "caf-zrich");
    }

    #[test]
    fn slugify_uses_ecmascript_whitespace() {
        assert_eq!(slugify("spring\u{FEFF}sale"), "spring-sale");
        assert_eq!(slugify("spring\u{0085}sale"), "springsale");
    }

    #[test]
    fn slugify_of_symbols_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn event_template_combines_parts() {
        assert_eq!(
            format_event_template("Housing Fair", "London", "2024-03-15T00:00:00Z").unwrap(),
            "housing-fair-london-2024"
        );
    }

    #[test]
    fn event_template_keeps_punctuation() {
        assert_eq!(
            format_event_template("Expo  2.0", "St. Louis", "2025-09-01").unwrap(),
            "expo-2.0-st.-louis-2025"
        );
    }

    #[test]
    fn event_template_rejects_bad_dates() {
        let err = format_event_template("Fair", "Leeds", "someday").unwrap_err();
        assert_eq!(err, CoreError::InvalidDate("someday".to_string()));
    }
}
