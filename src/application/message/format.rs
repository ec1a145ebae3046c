//! Positional template interpolation
//!
//! Templates use `{0}`, `{1}`, ... placeholders. Anything after a comma in a
//! placeholder (`{0,number}`) is accepted and ignored. A single quote starts
//! or ends a literal section, and `''` stands for one quote character.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("invalid argument index in placeholder {{{0}}}")]
    InvalidIndex(String),
}

/// Interpolate `args` into `template`.
///
/// With no arguments the template is returned untouched, quotes and braces
/// included. Placeholders pointing past the last argument are kept as-is.
pub fn format_template(template: &str, args: &[String]) -> Result<String, FormatError> {
    if args.is_empty() {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut chars = template.char_indices().peekable();
    let mut quoted = false;

    while let Some((pos, c)) = chars.next() {
        match c {
            '\'' => {
                if matches!(chars.peek(), Some((_, '\''))) {
                    chars.next();
                    out.push('\'');
                } else {
                    quoted = !quoted;
                }
            }
            '{' if !quoted => {
                let mut body = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    body.push(next);
                }
                if !closed {
                    return Err(FormatError::UnclosedPlaceholder(pos));
                }

                let index = body
                    .split(',')
                    .next()
                    .map(str::trim)
                    .and_then(|s| s.parse::<usize>().ok())
                    .ok_or_else(|| FormatError::InvalidIndex(body.clone()))?;

                match args.get(index) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(&body);
                        out.push('}');
                    }
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_positional_interpolation() {
        let result = format_template("파라미터 {0}의 값 {1}는 올바르지 않습니다.", &args(&["id", "abc"]));
        assert_eq!(result.unwrap(), "파라미터 id의 값 abc는 올바르지 않습니다.");
    }

    #[test]
    fn test_out_of_order_and_repeated_placeholders() {
        let result = format_template("{1} before {0}, again {1}", &args(&["a", "b"]));
        assert_eq!(result.unwrap(), "b before a, again b");
    }

    #[test]
    fn test_format_suffix_is_ignored() {
        let result = format_template("limit {0,number,integer}", &args(&["10"]));
        assert_eq!(result.unwrap(), "limit 10");
    }

    #[test]
    fn test_missing_argument_keeps_placeholder() {
        let result = format_template("allowed: {0} ({1})", &args(&["POST"]));
        assert_eq!(result.unwrap(), "allowed: POST ({1})");
    }

    #[test]
    fn test_no_arguments_returns_template_verbatim() {
        let template = "it''s {0} and '{literal}'";
        assert_eq!(format_template(template, &[]).unwrap(), template);
    }

    #[test]
    fn test_quotes() {
        let result = format_template("it''s '{0}' = {0}", &args(&["x"]));
        assert_eq!(result.unwrap(), "it's {0} = x");
    }

    #[test]
    fn test_unclosed_placeholder_is_an_error() {
        let result = format_template("broken {0", &args(&["x"]));
        assert_eq!(result, Err(FormatError::UnclosedPlaceholder(7)));
    }

    #[test]
    fn test_non_numeric_index_is_an_error() {
        let result = format_template("hello {name}", &args(&["x"]));
        assert_eq!(result, Err(FormatError::InvalidIndex("name".to_string())));
    }

    #[test]
    fn test_stray_closing_brace_is_literal() {
        let result = format_template("a } b {0}", &args(&["c"]));
        assert_eq!(result.unwrap(), "a } b c");
    }
}
