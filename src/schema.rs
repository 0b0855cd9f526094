use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Label as written in the schema, used for (de)serialization.
    pub value: String,
    /// PascalCase form of `value`.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    pub name: String,
    pub sql_name: String,
    pub variants: SmallVec<[EnumVariant; 8]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
}

pub type ColumnList = SmallVec<[ColumnDef; 16]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: String,
    pub columns: ColumnList,
}

/// Everything extracted from one schema file.
#[derive(Debug, Default)]
pub struct Schema {
    pub tables: FxHashMap<String, TableDef>,
    /// In declaration order, so enums can be emitted before the types using them.
    pub enums: Vec<EnumDef>,
}

impl Schema {
    /// Tables ordered by name, which keeps the generated files stable.
    pub fn sorted_tables(&self) -> Vec<&TableDef> {
        let mut tables: Vec<&TableDef> = self.tables.values().collect();
        tables.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        tables
    }
}
