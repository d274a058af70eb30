use indexmap::IndexMap;
use serde_json::Value;

/// One node of a resolved selection tree.
///
/// Produced by the query-language front end with arguments already coerced
/// to JSON values. The compiler only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,

    /// Key of this field in the response. Defaults to `name`.
    pub alias: String,

    pub arguments: IndexMap<String, Value>,

    pub subfields: Vec<FieldInfo>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>) -> FieldInfo {
        let name = name.into();
        FieldInfo {
            alias: name.clone(),
            name,
            arguments: IndexMap::new(),
            subfields: vec![],
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn field(mut self, field: FieldInfo) -> Self {
        self.subfields.push(field);
        self
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldInfo>,
    {
        self.subfields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Returns the argument `name`, treating an explicit `null` as absent.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name).filter(|value| !value.is_null())
    }

    /// Sub-fields named `name`, in selection order.
    pub fn subfields_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FieldInfo> {
        self.subfields.iter().filter(move |field| field.name == name)
    }
}

impl From<&str> for FieldInfo {
    fn from(name: &str) -> FieldInfo {
        FieldInfo::new(name)
    }
}
