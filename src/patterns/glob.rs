//! Attribute wildcards compiled into literal / any-char / any-run tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    /// `?`: exactly one character.
    AnyChar,
    /// `*`: any run of characters, `/` included, possibly empty.
    AnyRun,
}

/// A compiled attribute wildcard.
///
/// Every character other than `*` and `?` matches itself. A glob matches a
/// path when it matches a prefix of that path, so `*.psd` matches
/// `art/layers.psd` and `art` matches `artwork/cover.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glob {
    pattern: String,
    tokens: Vec<Token>,
}

impl Glob {
    /// Compile a wildcard pattern. Compilation cannot fail.
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len());
        for c in pattern.chars() {
            let token = match c {
                '*' => Token::AnyRun,
                '?' => Token::AnyChar,
                c => Token::Literal(c),
            };
            if token == Token::AnyRun && tokens.last() == Some(&Token::AnyRun) {
                continue;
            }
            tokens.push(token);
        }

        Self {
            pattern: pattern.to_string(),
            tokens,
        }
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the glob matches a prefix of `path`.
    pub fn matches_prefix(&self, path: &str) -> bool {
        let text: Vec<char> = path.chars().collect();
        let tokens = &self.tokens;

        let mut t = 0;
        let mut p = 0;
        // Token index after the most recent `*`, and the text position it resumes from.
        let mut resume: Option<(usize, usize)> = None;

        loop {
            if t == tokens.len() {
                return true;
            }

            match tokens[t] {
                Token::AnyRun => {
                    resume = Some((t + 1, p));
                    t += 1;
                    continue;
                }
                Token::AnyChar if p < text.len() => {
                    t += 1;
                    p += 1;
                    continue;
                }
                Token::Literal(c) if p < text.len() && text[p] == c => {
                    t += 1;
                    p += 1;
                    continue;
                }
                _ => {}
            }

            // Mismatch: let the last `*` swallow one more character.
            match resume {
                Some((after_run, from)) if from < text.len() => {
                    resume = Some((after_run, from + 1));
                    t = after_run;
                    p = from + 1;
                }
                _ => return false,
            }
        }
    }
}

impl std::fmt::Display for Glob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}
