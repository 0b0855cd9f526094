use std::fmt;

use super::{finish, Emitter};
use crate::schema::{EnumDef, Schema, TableDef};
use crate::types::{Target, TypeMapper};

const ENUM_DERIVES: &[&str] = &[
    "Debug",
    "Clone",
    "Copy",
    "PartialEq",
    "Eq",
    "serde::Serialize",
    "serde::Deserialize",
    "postgres_types::FromSql",
    "postgres_types::ToSql",
];

const STRUCT_DERIVES: &[&str] = &[
    "ger_from_row::FromRow",
    "serde::Serialize",
    "serde::Deserialize",
];

/// Keywords that can be used as field names through raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

pub struct RustEmitter<'r> {
    mapper: TypeMapper<'r>,
}

impl<'r> RustEmitter<'r> {
    pub fn new(mapper: TypeMapper<'r>) -> Self {
        Self { mapper }
    }
}

impl Emitter for RustEmitter<'_> {
    fn emit(&self, schema: &Schema) -> String {
        finish(
            RustModule {
                mapper: self.mapper,
                schema,
            }
            .to_string(),
        )
    }
}

struct RustModule<'a> {
    mapper: TypeMapper<'a>,
    schema: &'a Schema,
}

impl fmt::Display for RustModule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for enum_def in &self.schema.enums {
            self.write_enum(f, enum_def)?;
            writeln!(f)?;
        }

        for table in self.schema.sorted_tables() {
            self.write_struct(f, table)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl RustModule<'_> {
    fn write_enum(&self, f: &mut fmt::Formatter<'_>, enum_def: &EnumDef) -> fmt::Result {
        write_derives(f, ENUM_DERIVES)?;
        writeln!(f, "#[postgres(name = {:?})]", enum_def.sql_name)?;
        writeln!(f, "pub enum {} {{", enum_def.name)?;
        for variant in &enum_def.variants {
            writeln!(f, "    #[serde(rename = {:?})]", variant.value)?;
            writeln!(f, "    #[postgres(name = {:?})]", variant.value)?;
            writeln!(f, "    {},", variant.name)?;
        }
        writeln!(f, "}}")
    }

    fn write_struct(&self, f: &mut fmt::Formatter<'_>, table: &TableDef) -> fmt::Result {
        write_derives(f, STRUCT_DERIVES)?;
        writeln!(f, "pub struct {} {{", table.name)?;
        for column in &table.columns {
            let mapped = self.mapper.map(&column.sql_type, Target::Rust);
            if mapped.is_enum {
                writeln!(f, "    #[fromrow(num)]")?;
            }

            let name = field_name(&column.name);
            if column.nullable {
                writeln!(f, "    pub {}: Option<{}>,", name, mapped.name)?;
            } else {
                writeln!(f, "    pub {}: {},", name, mapped.name)?;
            }
        }
        writeln!(f, "}}")
    }
}

fn write_derives(f: &mut fmt::Formatter<'_>, derives: &[&str]) -> fmt::Result {
    writeln!(f, "#[derive(")?;
    for derive in derives {
        writeln!(f, "    {},", derive)?;
    }
    writeln!(f, ")]")
}

/// Keywords that can't be raw identifiers either.
const RESERVED_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

fn field_name(column: &str) -> String {
    if RESERVED_PATH_KEYWORDS.contains(&column) {
        return format!("{}_", column);
    }

    if KEYWORDS.contains(&column) {
        return format!("r#{}", column);
    }

    column.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;
    use crate::rules::EnumRules;
    use crate::walker::walk;

    fn emit_sql(sql: &str) -> String {
        let rules = EnumRules::default();
        let schema = walk(&parse_schema(sql).unwrap(), &rules);
        RustEmitter::new(TypeMapper::new(&rules)).emit(&schema)
    }

    #[test]
    fn test_widgets_struct() {
        let output = emit_sql("CREATE TABLE widgets (id int4 NOT NULL, label text);");
        assert_eq!(
            output,
            "#[derive(\n    ger_from_row::FromRow,\n    serde::Serialize,\n    serde::Deserialize,\n)]\n\
             pub struct Widgets {\n    pub id: i32,\n    pub label: Option<String>,\n}\n"
        );
    }

    #[test]
    fn test_enum_and_enum_field() {
        let output = emit_sql(
            "CREATE TYPE t_day_of_week AS ENUM ('monday','tuesday');
             CREATE TABLE events (day t_day_of_week NOT NULL);",
        );
        let expected_enum = "#[postgres(name = \"t_day_of_week\")]\n\
            pub enum DayOfWeek {\n    \
            #[serde(rename = \"monday\")]\n    #[postgres(name = \"monday\")]\n    Monday,\n    \
            #[serde(rename = \"tuesday\")]\n    #[postgres(name = \"tuesday\")]\n    Tuesday,\n}\n\n";
        assert!(output.contains(expected_enum), "{output}");
        assert!(output.contains("pub struct Events {\n    #[fromrow(num)]\n    pub day: DayOfWeek,\n}\n"));
        assert!(output.find("pub enum DayOfWeek").unwrap() < output.find("pub struct Events").unwrap());
        assert!(output.ends_with("}\n"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_all_not_null_has_no_option() {
        let output = emit_sql(
            "CREATE TABLE rooms (room_id text NOT NULL, room_capacity int4 NOT NULL, room_floor int2 NOT NULL);",
        );
        assert!(!output.contains("Option<"));
        assert_eq!(output.matches("    pub ").count(), 3);
    }

    #[test]
    fn test_no_not_null_is_all_optional() {
        let output = emit_sql(
            "CREATE TABLE buildings (building_id text, building_coordinates point, opened date);",
        );
        assert!(output.contains("    pub building_id: Option<String>,\n"));
        assert!(output.contains("    pub building_coordinates: Option<Point<f64>>,\n"));
        assert!(output.contains("    pub opened: Option<Date>,\n"));
    }

    #[test]
    fn test_nullable_enum_field_keeps_marker() {
        let output = emit_sql("CREATE TABLE users (user_role t_user_role);");
        assert!(output.contains("    #[fromrow(num)]\n    pub user_role: Option<Role>,\n"));
    }

    #[test]
    fn test_unknown_type_uses_sentinel() {
        let output = emit_sql("CREATE TABLE things (id uuid NOT NULL, payload jsonb);");
        assert!(output.contains("    pub id: what,\n"));
        assert!(output.contains("    pub payload: Option<what>,\n"));
    }

    #[test]
    fn test_tables_are_sorted() {
        let output = emit_sql("CREATE TABLE zebra (id int4); CREATE TABLE apple (id int4);");
        assert!(output.find("pub struct Apple").unwrap() < output.find("pub struct Zebra").unwrap());
        assert!(output.contains("}\n\n#[derive("));
    }

    #[test]
    fn test_keyword_column_is_raw_identifier() {
        let output = emit_sql("CREATE TABLE notifications (\"type\" text NOT NULL);");
        assert!(output.contains("    pub r#type: String,\n"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let output = emit_sql(r#"CREATE TYPE t_user_role AS ENUM ('say "hi"');"#);
        assert!(output.contains("    #[serde(rename = \"say \\\"hi\\\"\")]\n"), "{output}");
        assert!(output.contains("    #[postgres(name = \"say \\\"hi\\\"\")]\n    SayHi,\n"));
    }

    #[test]
    fn test_backslash_in_names_is_escaped() {
        let rules = EnumRules::default();
        let mut schema = Schema::default();
        schema.enums.push(EnumDef {
            name: "Path".to_string(),
            sql_name: "t_\\path".to_string(),
            variants: smallvec::smallvec![crate::schema::EnumVariant {
                value: "a\\b".to_string(),
                name: "AB".to_string(),
            }],
        });
        let output = RustEmitter::new(TypeMapper::new(&rules)).emit(&schema);
        assert!(output.contains("#[postgres(name = \"t_\\\\path\")]\n"), "{output}");
        assert!(output.contains("    #[serde(rename = \"a\\\\b\")]\n"));
    }

    #[test]
    fn test_path_keyword_columns_get_suffix() {
        let output = emit_sql(
            "CREATE TABLE nodes (\"self\" text, \"super\" text NOT NULL, \"crate\" int4, \"Self\" bool);",
        );
        assert!(output.contains("    pub self_: Option<String>,\n"));
        assert!(output.contains("    pub super_: String,\n"));
        assert!(output.contains("    pub crate_: Option<i32>,\n"));
        assert!(output.contains("    pub Self_: Option<bool>,\n"));
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(emit_sql("CREATE INDEX a_idx ON a (id);"), "");
    }
}
