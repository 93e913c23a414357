//! Message templates with permissive `$name` substitution.

use std::fmt;

/// Placeholder replaced by the original error's rendered message.
pub const ORIGINAL_ERROR_MESSAGE: &str = "original_error_message";

/// A message template.
///
/// Placeholders are `$name` or `${name}`, where a name is an ASCII identifier
/// (`[_A-Za-z][_A-Za-z0-9]*`). `$$` is a literal `$`.
///
/// Substitution never fails: a placeholder with no value, or a `$` that does
/// not start a placeholder, is kept in the output as written.
///
/// ```
/// use reraise::Template;
///
/// let t = Template::new("Error: ${original_error_message} ($detail, $$5)");
/// assert_eq!(
///     t.safe_substitute(&[("original_error_message", "'boom'")]),
///     "Error: 'boom' ($detail, $5)",
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Template(String);

enum Piece<'a> {
    Text(&'a str),
    Dollar,
    /// Name and the exact source text it came from.
    Placeholder(&'a str, &'a str),
}

impl Template {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// The template source.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace known placeholders with their values, leave everything else.
    pub fn safe_substitute(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.0.len());
        for piece in Pieces::new(&self.0) {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Dollar => out.push('$'),
                Piece::Placeholder(name, raw) => {
                    match values.iter().find(|(key, _)| *key == name) {
                        Some((_, value)) => out.push_str(value),
                        None => out.push_str(raw),
                    }
                }
            }
        }
        out
    }

    /// Names of all placeholders, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> + '_ {
        Pieces::new(&self.0).filter_map(|piece| match piece {
            Piece::Placeholder(name, _) => Some(name),
            _ => None,
        })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Template").field(&self.0).finish()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================
// Scanner
// ============================================================

struct Pieces<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Pieces<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

fn is_ident_start(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic()
}

fn is_ident_continue(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// Length of the identifier at the start of `bytes`, 0 if there is none.
fn ident_len(bytes: &[u8]) -> usize {
    match bytes.first() {
        Some(&b) if is_ident_start(b) => {
            1 + bytes[1..].iter().take_while(|&&b| is_ident_continue(b)).count()
        }
        _ => 0,
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        let src = self.src;
        let rest = &src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let bytes = rest.as_bytes();
        if bytes[0] != b'$' {
            let len = rest.find('$').unwrap_or(rest.len());
            self.pos += len;
            return Some(Piece::Text(&rest[..len]));
        }

        // `$$`
        if bytes.get(1) == Some(&b'$') {
            self.pos += 2;
            return Some(Piece::Dollar);
        }

        // `$name`
        let len = ident_len(&bytes[1..]);
        if len > 0 {
            self.pos += 1 + len;
            return Some(Piece::Placeholder(&rest[1..1 + len], &rest[..1 + len]));
        }

        // `${name}`
        if bytes.get(1) == Some(&b'{') {
            let len = ident_len(&bytes[2..]);
            if len > 0 && bytes.get(2 + len) == Some(&b'}') {
                self.pos += 3 + len;
                return Some(Piece::Placeholder(&rest[2..2 + len], &rest[..3 + len]));
            }
        }

        // Anything else: a lone `$`, kept as text.
        self.pos += 1;
        Some(Piece::Text(&rest[..1]))
    }
}
