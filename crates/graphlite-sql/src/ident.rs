use super::ToSql;

/// A quoted identifier: `"name"`, with embedded quotes doubled.
pub(crate) struct Ident<S>(pub(crate) S);

/// A quoted string literal: `'text'`, with embedded quotes doubled.
pub(crate) struct Literal<S>(pub(crate) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut String) {
        quote(f, self.0.as_ref(), '"');
    }
}

impl<S: AsRef<str>> ToSql for Literal<S> {
    fn to_sql(self, f: &mut String) {
        quote(f, self.0.as_ref(), '\'');
    }
}

fn quote(f: &mut String, s: &str, q: char) {
    f.push(q);
    for c in s.chars() {
        if c == q {
            f.push(q);
        }
        f.push(c);
    }
    f.push(q);
}
