use journal_core::Importance;

/// What one line of stdin asks the journal to do.
#[derive(Debug, PartialEq, Eq)]
pub enum InputLine {
    Entry { message: String, importance: Importance },
    Empty,
    Quit,
}

/// A line may start with an uppercase importance token followed by
/// whitespace (`HIGH disk full`); otherwise `default` applies and the line is
/// kept verbatim. Only the exact tokens `LOW`, `MEDIUM` and `HIGH` count, so
/// a sentence like `Low battery` is not rewritten.
pub fn parse_input_line(line: &str, default: Importance) -> InputLine {
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.trim() == "quit" {
        return InputLine::Quit;
    }
    if line.trim().is_empty() {
        return InputLine::Empty;
    }

    if let Some((token, rest)) = line.split_once(char::is_whitespace) {
        if let Some(importance) = importance_token(token) {
            let message = rest.trim_start();
            if message.is_empty() {
                return InputLine::Empty;
            }
            return InputLine::Entry {
                message: message.to_string(),
                importance,
            };
        }
    }

    InputLine::Entry {
        message: line.to_string(),
        importance: default,
    }
}

fn importance_token(token: &str) -> Option<Importance> {
    Importance::ALL
        .into_iter()
        .find(|importance| importance.as_str() == token)
}
