use convert_case::{Case, Casing};
use smallvec::SmallVec;
use sqlparser::ast::{
    ColumnDef as SqlColumnDef, ColumnOption, ColumnOptionDef, DataType, Ident, ObjectName,
    Statement, TimezoneInfo,
};
use tracing::{debug, warn};

use crate::parser::{CreateEnum, SchemaStatement};
use crate::rules::EnumRules;
use crate::schema::{ColumnDef, ColumnList, EnumDef, EnumVariant, Schema, TableDef};

/// Builds a [`Schema`] out of parsed statements. Statements other than enum
/// and table creation are ignored.
pub fn walk(statements: &[SchemaStatement], rules: &EnumRules) -> Schema {
    let mut walker = SchemaWalker::new(rules);
    for statement in statements {
        walker.process_statement(statement);
    }

    walker.schema
}

struct SchemaWalker<'r> {
    rules: &'r EnumRules,
    schema: Schema,
}

impl<'r> SchemaWalker<'r> {
    fn new(rules: &'r EnumRules) -> Self {
        Self {
            rules,
            schema: Schema::default(),
        }
    }

    fn process_statement(&mut self, statement: &SchemaStatement) {
        match statement {
            SchemaStatement::CreateEnum(create_enum) => self.process_enum(create_enum),
            SchemaStatement::Sql(Statement::CreateTable { name, columns, .. }) => {
                self.process_table(name, columns)
            }
            SchemaStatement::Sql(other) => debug!(statement = %other, "ignoring statement"),
            SchemaStatement::Skipped => {}
        }
    }

    fn process_enum(&mut self, create_enum: &CreateEnum) {
        let Some(sql_name) = last_segment(&create_enum.name) else {
            return;
        };

        let Some(name) = self.rules.enum_name(&sql_name) else {
            debug!(type_name = %sql_name, "no naming rule for enum, skipping");
            return;
        };

        let mut variants: SmallVec<[EnumVariant; 8]> = SmallVec::new();
        for label in &create_enum.labels {
            if variants.iter().any(|v| &v.value == label) {
                warn!(enum_name = %name, label = %label, "duplicate enum label dropped");
                continue;
            }

            let pascal = variant_name(label);
            if variants.iter().any(|v| v.name == pascal) {
                warn!(
                    enum_name = %name,
                    label = %label,
                    variant = %pascal,
                    "enum label collides with an earlier variant name, dropped"
                );
                continue;
            }

            variants.push(EnumVariant {
                value: label.clone(),
                name: pascal,
            });
        }

        self.schema.enums.push(EnumDef {
            name,
            sql_name,
            variants,
        });
    }

    fn process_table(&mut self, name: &ObjectName, columns: &[SqlColumnDef]) {
        let Some(relation) = name.0.last() else {
            return;
        };

        let table_name = relation.value.to_case(Case::Pascal);
        let columns: ColumnList = columns.iter().map(column_def).collect();
        if self.schema.tables.contains_key(&table_name) {
            debug!(table = %table_name, "table declared again, keeping the later definition");
        }

        self.schema.tables.insert(
            table_name.clone(),
            TableDef {
                name: table_name,
                columns,
            },
        );
    }
}

/// PascalCase identifier for an enum label. Characters that can't appear in
/// an identifier act as word boundaries.
fn variant_name(label: &str) -> String {
    let words: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let name = words.to_case(Case::Pascal);
    match name.chars().next() {
        None => "Empty".to_string(),
        Some(c) if c.is_numeric() => format!("V{}", name),
        Some(_) => name,
    }
}

fn column_def(column: &SqlColumnDef) -> ColumnDef {
    ColumnDef {
        name: column.name.value.clone(),
        sql_type: type_token(&column.data_type),
        nullable: !non_nullable(&column.options),
    }
}

fn non_nullable(options: &[ColumnOptionDef]) -> bool {
    options
        .iter()
        .any(|option| matches!(option.option, ColumnOption::NotNull))
}

/// Unquoted identifiers are case insensitive in PostgreSQL.
fn fold_ident(ident: &Ident) -> String {
    match ident.quote_style {
        Some(_) => ident.value.clone(),
        None => ident.value.to_lowercase(),
    }
}

fn last_segment(name: &ObjectName) -> Option<String> {
    name.0.last().map(fold_ident)
}

/// The PostgreSQL internal spelling of a column type, e.g. `integer` is `int4`.
/// Qualified names keep only their last segment.
fn type_token(data_type: &DataType) -> String {
    let token = match data_type {
        DataType::Text => "text",
        DataType::Varchar(_) | DataType::CharVarying(_) | DataType::CharacterVarying(_) => {
            "varchar"
        }
        DataType::Char(_) | DataType::Character(_) => "bpchar",
        DataType::Int2(_) | DataType::SmallInt(_) => "int2",
        DataType::Int4(_) | DataType::Int(_) | DataType::Integer(_) => "int4",
        DataType::Int8(_) | DataType::BigInt(_) => "int8",
        DataType::Float4 | DataType::Real => "float4",
        DataType::Float8 | DataType::Double | DataType::DoublePrecision | DataType::Float(_) => {
            "float8"
        }
        DataType::Numeric(_) | DataType::Decimal(_) => "numeric",
        DataType::Bool | DataType::Boolean => "bool",
        DataType::Date => "date",
        DataType::Time(_, TimezoneInfo::WithTimeZone | TimezoneInfo::Tz) => "timetz",
        DataType::Time(..) => "time",
        DataType::Timestamp(_, TimezoneInfo::WithTimeZone | TimezoneInfo::Tz) => "timestamptz",
        DataType::Timestamp(..) => "timestamp",
        DataType::Custom(name, _) => {
            return last_segment(name).unwrap_or_default();
        }
        other => return other.to_string().to_lowercase(),
    };

    token.to_string()
}
