/// Replaces `{KEY}` placeholders in `template`, matching keys case-insensitively.
///
/// Unknown placeholders are left untouched so that literal braces in user
/// supplied text survive rendering.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let Some(end) = candidate.find('}') else {
            out.push_str(candidate);
            return out;
        };

        let key = &candidate[1..end];
        // `{a {USER}`: rescan from the inner brace, which sits at `inner + 1`
        if let Some(inner) = key.rfind('{') {
            out.push_str(&candidate[..inner + 1]);
            rest = &candidate[inner + 1..];
            continue;
        }

        match vars.iter().find(|(name, _)| name.eq_ignore_ascii_case(key)) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&candidate[..=end]),
        }
        rest = &candidate[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Truncates to at most `max` characters on a char boundary.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_case_insensitively() {
        let out = render("hi {user} #{TICKET_NUMBER}", &[("USER", "bob"), ("TICKET_NUMBER", "7")]);
        assert_eq!(out, "hi bob #7");
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(render("{NOPE} and {USER", &[("USER", "x")]), "{NOPE} and {USER");
    }

    #[test]
    fn replaces_placeholder_after_stray_brace() {
        assert_eq!(render("{a {USER}", &[("USER", "bob")]), "{a bob");
        assert_eq!(render("{{USER}}", &[("USER", "bob")]), "{bob}");
    }

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }
}
