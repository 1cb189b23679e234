use std::str::FromStr;

use crate::Error;

/// Options shared by every generated resolver type.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverOpts {
    /// Overrides the entity name used to derive type names.
    pub dto_name: Option<String>,
    /// Prepended to generated filter type names, used when several subgraphs expose
    /// the same entity.
    pub federation_prefix: Option<String>,
    /// Disables every resolver generated from these options.
    pub disabled: bool,
}

impl ResolverOpts {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    pub fn with_dto_name(mut self, dto_name: impl Into<String>) -> Self {
        self.dto_name = Some(dto_name.into());
        self
    }

    pub fn with_federation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.federation_prefix = Some(prefix.into());
        self
    }
}

impl FromStr for ResolverOpts {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_toml(s)
    }
}

/// Per-mutation settings of a generated resolver.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverMethodOpts {
    pub disabled: bool,
    /// Overrides the generated mutation field name.
    pub name: Option<String>,
    pub description: Option<String>,
}

/// ```toml
/// dto_name = "Writer"
///
/// [many]
/// disabled = true
/// ```
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteResolverOpts {
    pub dto_name: Option<String>,
    pub federation_prefix: Option<String>,
    pub disabled: bool,
    pub one: ResolverMethodOpts,
    pub many: ResolverMethodOpts,
}

impl DeleteResolverOpts {
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    /// The naming and resolver-wide part of these options.
    pub fn resolver_opts(&self) -> ResolverOpts {
        ResolverOpts {
            dto_name: self.dto_name.clone(),
            federation_prefix: self.federation_prefix.clone(),
            disabled: self.disabled,
        }
    }

    pub(crate) fn one_enabled(&self) -> bool {
        !(self.disabled || self.one.disabled)
    }

    pub(crate) fn many_enabled(&self) -> bool {
        !(self.disabled || self.many.disabled)
    }
}
