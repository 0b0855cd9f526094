use crate::rules::EnumRules;
use crate::schema::Schema;

/// Placeholder written for column types with no mapping, so the generated
/// file points at what needs manual attention instead of failing the run.
pub const SENTINEL: &str = "what";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Rust,
    TypeScript,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedType {
    pub name: String,
    pub is_enum: bool,
    pub known: bool,
}

impl MappedType {
    fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_enum: false,
            known: true,
        }
    }

    fn enumeration(name: String) -> Self {
        Self {
            name,
            is_enum: true,
            known: true,
        }
    }

    fn unknown() -> Self {
        Self {
            name: SENTINEL.to_string(),
            is_enum: false,
            known: false,
        }
    }
}

/// Maps SQL type tokens to target language types.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'r> {
    rules: &'r EnumRules,
}

impl<'r> TypeMapper<'r> {
    pub fn new(rules: &'r EnumRules) -> Self {
        Self { rules }
    }

    pub fn map(&self, token: &str, target: Target) -> MappedType {
        if let Some(name) = builtin(token, target) {
            return MappedType::builtin(name);
        }

        match self.rules.enum_name(token) {
            Some(name) => MappedType::enumeration(name),
            None => MappedType::unknown(),
        }
    }

    /// `(table, column, sql type)` for every column whose type has no mapping.
    pub fn unmapped<'s>(&self, schema: &'s Schema) -> Vec<(&'s str, &'s str, &'s str)> {
        let mut unmapped = Vec::new();
        for table in schema.sorted_tables() {
            for column in &table.columns {
                if !self.map(&column.sql_type, Target::Rust).known {
                    unmapped.push((
                        table.name.as_str(),
                        column.name.as_str(),
                        column.sql_type.as_str(),
                    ));
                }
            }
        }

        unmapped
    }
}

fn builtin(token: &str, target: Target) -> Option<&'static str> {
    let (rust, typescript) = match token {
        "text" => ("String", "string"),
        "float4" | "numeric" => ("f64", "number"),
        "int4" => ("i32", "number"),
        "int2" => ("i16", "number"),
        "date" => ("Date", "string"),
        "timestamptz" => ("DateTime", "string"),
        "time" => ("Time", "string"),
        "point" => ("Point<f64>", "Point"),
        "bool" | "boolean" => ("bool", "boolean"),
        _ => return None,
    };

    match target {
        Target::Rust => Some(rust),
        Target::TypeScript => Some(typescript),
    }
}
