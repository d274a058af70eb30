use super::TypeRef;

use std::fmt;

/// One named type of the generated schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Object(ObjectType),
    InputObject(InputObjectType),
    Enum(EnumType),
    Scalar(ScalarType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<InputValueDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
}

/// A field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValueDef>,
    pub ty: TypeRef,
}

/// A field of an input object, or an argument of a [`FieldDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDef {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Object(ty) => &ty.name,
            TypeDef::InputObject(ty) => &ty.name,
            TypeDef::Enum(ty) => &ty.name,
            TypeDef::Scalar(ty) => &ty.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDef::Object(ty) => ty.description.as_deref(),
            TypeDef::InputObject(ty) => ty.description.as_deref(),
            TypeDef::Enum(ty) => ty.description.as_deref(),
            TypeDef::Scalar(ty) => ty.description.as_deref(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            TypeDef::Object(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            TypeDef::InputObject(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            TypeDef::Enum(ty) => Some(ty),
            _ => None,
        }
    }
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> ObjectType {
        ObjectType {
            name: name.into(),
            description: None,
            fields: vec![],
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl InputObjectType {
    pub fn new(name: impl Into<String>) -> InputObjectType {
        InputObjectType {
            name: name.into(),
            description: None,
            fields: vec![],
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: InputValueDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&InputValueDef> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> EnumType {
        EnumType {
            name: name.into(),
            description: None,
            values: vec![],
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn value(mut self, name: impl Into<String>, description: Option<&str>) -> Self {
        self.values.push(EnumValueDef {
            name: name.into(),
            description: description.map(str::to_string),
        });
        self
    }
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> FieldDef {
        FieldDef {
            name: name.into(),
            description: None,
            args: vec![],
            ty,
        }
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }

    pub fn arg(mut self, arg: InputValueDef) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = InputValueDef>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn get_arg(&self, name: &str) -> Option<&InputValueDef> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

impl InputValueDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> InputValueDef {
        InputValueDef {
            name: name.into(),
            description: None,
            ty,
        }
    }

    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }
}

/// Quoted SDL string.
struct Description<'a>(&'a str);

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for ch in self.0.chars() {
            match ch {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                ch => write!(f, "{ch}")?,
            }
        }
        f.write_str("\"")
    }
}

fn write_description(f: &mut fmt::Formatter<'_>, indent: &str, description: Option<&str>) -> fmt::Result {
    match description {
        Some(description) => writeln!(f, "{indent}{}", Description(description)),
        None => Ok(()),
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDef::Object(ty) => ty.fmt(f),
            TypeDef::InputObject(ty) => ty.fmt(f),
            TypeDef::Enum(ty) => ty.fmt(f),
            TypeDef::Scalar(ty) => {
                write_description(f, "", ty.description.as_deref())?;
                writeln!(f, "scalar {}", ty.name)
            }
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, "", self.description.as_deref())?;
        writeln!(f, "type {} {{", self.name)?;

        for field in &self.fields {
            write_description(f, "  ", field.description.as_deref())?;
            write!(f, "  {}", field.name)?;

            if !field.args.is_empty() {
                f.write_str("(")?;
                for (i, arg) in field.args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", arg.name, arg.ty)?;
                }
                f.write_str(")")?;
            }

            writeln!(f, ": {}", field.ty)?;
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for InputObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, "", self.description.as_deref())?;
        writeln!(f, "input {} {{", self.name)?;

        for field in &self.fields {
            write_description(f, "  ", field.description.as_deref())?;
            writeln!(f, "  {}: {}", field.name, field.ty)?;
        }

        writeln!(f, "}}")
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_description(f, "", self.description.as_deref())?;
        writeln!(f, "enum {} {{", self.name)?;

        for value in &self.values {
            write_description(f, "  ", value.description.as_deref())?;
            writeln!(f, "  {}", value.name)?;
        }

        writeln!(f, "}}")
    }
}
