macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_sql($f);
        )*
    }};
}

pub(crate) trait ToSql {
    fn to_sql(self, f: &mut String);
}

impl ToSql for &str {
    fn to_sql(self, f: &mut String) {
        f.push_str(self);
    }
}

impl ToSql for &String {
    fn to_sql(self, f: &mut String) {
        f.push_str(self);
    }
}

impl ToSql for String {
    fn to_sql(self, f: &mut String) {
        f.push_str(&self);
    }
}

impl<T: ToSql> ToSql for Option<T> {
    fn to_sql(self, f: &mut String) {
        if let Some(fragment) = self {
            fragment.to_sql(f);
        }
    }
}

impl<A: ToSql, B: ToSql> ToSql for (A, B) {
    fn to_sql(self, f: &mut String) {
        fmt!(f, self.0 ", " self.1);
    }
}
