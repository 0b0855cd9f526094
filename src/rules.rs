use std::str::FromStr;

use convert_case::{Case, Casing};

use crate::error::GeneratorError;

/// How an enum's Rust/TypeScript name is derived from its SQL type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumNaming {
    /// Drop the first N characters (`t_day_of_week` -> `day_of_week`).
    StripPrefix(usize),
    /// Keep the last N characters (`t_user_role` -> `role`).
    Suffix(usize),
    /// Use the given name as is.
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumRule {
    pub type_name: String,
    pub naming: EnumNaming,
}

impl EnumRule {
    pub fn new(type_name: impl Into<String>, naming: EnumNaming) -> Self {
        Self {
            type_name: type_name.into(),
            naming,
        }
    }

    pub fn enum_name(&self) -> String {
        match &self.naming {
            EnumNaming::StripPrefix(n) => self
                .type_name
                .chars()
                .skip(*n)
                .collect::<String>()
                .to_case(Case::Pascal),
            EnumNaming::Suffix(n) => {
                let len = self.type_name.chars().count();
                self.type_name
                    .chars()
                    .skip(len.saturating_sub(*n))
                    .collect::<String>()
                    .to_case(Case::Pascal)
            }
            EnumNaming::Name(name) => name.clone(),
        }
    }
}

/// Parses `TYPE=strip-prefix:N`, `TYPE=suffix:N` or `TYPE=name:Name`.
impl FromStr for EnumRule {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeneratorError::InvalidEnumRule(s.to_string());
        let (type_name, naming) = s.split_once('=').ok_or_else(invalid)?;
        let (kind, argument) = naming.split_once(':').ok_or_else(invalid)?;
        let type_name = type_name.trim();
        let argument = argument.trim();
        if type_name.is_empty() || argument.is_empty() {
            return Err(invalid());
        }

        let naming = match kind.trim() {
            "strip-prefix" => EnumNaming::StripPrefix(argument.parse().map_err(|_| invalid())?),
            "suffix" => EnumNaming::Suffix(argument.parse().map_err(|_| invalid())?),
            "name" => EnumNaming::Name(argument.to_string()),
            _ => return Err(invalid()),
        };

        Ok(EnumRule::new(type_name.to_lowercase(), naming))
    }
}

/// The enum type names the generator knows how to name.
#[derive(Debug, Clone)]
pub struct EnumRules {
    rules: Vec<EnumRule>,
}

impl Default for EnumRules {
    fn default() -> Self {
        Self {
            rules: vec![
                EnumRule::new("t_day_of_week", EnumNaming::StripPrefix(2)),
                EnumRule::new("t_user_role", EnumNaming::Suffix(4)),
            ],
        }
    }
}

impl EnumRules {
    /// Later rules win over earlier ones for the same type name.
    pub fn with(mut self, extra: impl IntoIterator<Item = EnumRule>) -> Self {
        self.rules.extend(extra);
        self
    }

    pub fn find(&self, type_name: &str) -> Option<&EnumRule> {
        self.rules.iter().rev().find(|rule| rule.type_name == type_name)
    }

    pub fn enum_name(&self, type_name: &str) -> Option<String> {
        self.find(type_name).map(EnumRule::enum_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = EnumRules::default();
        assert_eq!(rules.enum_name("t_day_of_week").as_deref(), Some("DayOfWeek"));
        assert_eq!(rules.enum_name("t_user_role").as_deref(), Some("Role"));
        assert_eq!(rules.enum_name("t_status"), None);
    }

    #[test]
    fn test_parse_rules() {
        let rule: EnumRule = "t_status=strip-prefix:2".parse().unwrap();
        assert_eq!(rule.enum_name(), "Status");

        let rule: EnumRule = "T_Post_Kind=suffix:4".parse().unwrap();
        assert_eq!(rule.type_name, "t_post_kind");
        assert_eq!(rule.enum_name(), "Kind");

        let rule: EnumRule = "t_mood=name:Feeling".parse().unwrap();
        assert_eq!(rule.enum_name(), "Feeling");
    }

    #[test]
    fn test_parse_invalid_rules() {
        for input in ["t_status", "t_status=", "=name:X", "t_status=strip-prefix:x", "t_status=upper:2"] {
            assert!(
                matches!(input.parse::<EnumRule>(), Err(GeneratorError::InvalidEnumRule(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_extra_rules_override_defaults() {
        let rules = EnumRules::default().with([EnumRule::new(
            "t_user_role",
            EnumNaming::Name("UserRole".to_string()),
        )]);
        assert_eq!(rules.enum_name("t_user_role").as_deref(), Some("UserRole"));
    }

    #[test]
    fn test_suffix_longer_than_name() {
        let rule = EnumRule::new("ab", EnumNaming::Suffix(10));
        assert_eq!(rule.enum_name(), "Ab");
    }
}
