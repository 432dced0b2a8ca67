//! Small text helpers shared by batch files, the shell and salt commands.

/// Split a command line into words.
///
/// Whitespace separates words; single or double quotes group them and a
/// backslash escapes the next character outside single quotes. Returns
/// `None` on an unterminated quote.
pub fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_word = true;
                }
            }
            (Some(_), c) => current.push(c),
            (None, '\'') | (None, '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return None;
    }
    if in_word {
        words.push(current);
    }
    Some(words)
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_quotes() {
        assert_eq!(
            split_words(r#"host create "web 01" --hostgroup 'Linux servers'"#).unwrap(),
            vec!["host", "create", "web 01", "--hostgroup", "Linux servers"]
        );
    }

    #[test]
    fn test_split_words_empty_and_escape() {
        assert!(split_words("   ").unwrap().is_empty());
        assert_eq!(split_words(r"a\ b c").unwrap(), vec!["a b", "c"]);
        assert_eq!(split_words("x ''").unwrap(), vec!["x", ""]);
    }

    #[test]
    fn test_split_words_unterminated() {
        assert!(split_words("cmd.run 'ls -la").is_none());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
