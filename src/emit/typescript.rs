use std::fmt;

use super::{finish, Emitter};
use crate::schema::{EnumDef, Schema, TableDef};
use crate::types::{Target, TypeMapper};

/// Shape of a PostgreSQL `point` once serialized.
const POINT_INTERFACE: &str = "export interface Point {\n  x: number\n  y: number\n}\n";

pub struct TypeScriptEmitter<'r> {
    mapper: TypeMapper<'r>,
}

impl<'r> TypeScriptEmitter<'r> {
    pub fn new(mapper: TypeMapper<'r>) -> Self {
        Self { mapper }
    }
}

impl Emitter for TypeScriptEmitter<'_> {
    fn emit(&self, schema: &Schema) -> String {
        finish(
            TypeScriptModule {
                mapper: self.mapper,
                schema,
            }
            .to_string(),
        )
    }
}

struct TypeScriptModule<'a> {
    mapper: TypeMapper<'a>,
    schema: &'a Schema,
}

impl fmt::Display for TypeScriptModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", POINT_INTERFACE)?;

        for enum_def in &self.schema.enums {
            self.write_enum(f, enum_def)?;
            writeln!(f)?;
        }

        for table in self.schema.sorted_tables() {
            self.write_interface(f, table)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl TypeScriptModule<'_> {
    fn write_enum(&self, f: &mut fmt::Formatter<'_>, enum_def: &EnumDef) -> fmt::Result {
        writeln!(f, "export enum {} {{", enum_def.name)?;
        for variant in &enum_def.variants {
            writeln!(f, "  {} = '{}',", variant.name, escape(&variant.value))?;
        }
        writeln!(f, "}}")
    }

    fn write_interface(&self, f: &mut fmt::Formatter<'_>, table: &TableDef) -> fmt::Result {
        writeln!(f, "export interface {} {{", table.name)?;
        for column in &table.columns {
            let mapped = self.mapper.map(&column.sql_type, Target::TypeScript);
            let optional = if column.nullable { "?" } else { "" };
            writeln!(
                f,
                "  {}{}: {}",
                property_name(&column.name),
                optional,
                mapped.name
            )?;
        }
        writeln!(f, "}}")
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn property_name(column: &str) -> String {
    if is_identifier(column) {
        return column.to_string();
    }

    format!("'{}'", escape(column))
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
