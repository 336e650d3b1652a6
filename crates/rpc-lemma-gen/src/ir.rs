// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Interface description consumed by the generator. The description is
//! produced by the interface parser and arrives here already structured.

use crate::arch::Architecture;
use crate::assertion::is_lemma_name;
use crate::error::{GenError, Result};
use crate::keywords::{reserved_words, KeywordFlags, IDENTIFIER_PATTERN};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    In,
    Out,
    Inout,
}

impl Direction {
    /// Whether the callee writes through this parameter.
    pub fn is_written(self) -> bool {
        matches!(self, Direction::Out | Direction::Inout)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::In => write!(f, "in"),
            Direction::Out => write!(f, "out"),
            Direction::Inout => write!(f, "inout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub array: bool,
}

impl Parameter {
    pub fn new(name: &str, type_tag: &str, direction: Direction, array: bool) -> Self {
        Self {
            name: name.to_string(),
            type_tag: type_tag.to_string(),
            direction,
            array,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Method {
    pub fn array_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.array)
    }
}

/// Endpoint cardinalities of the component instance the glue runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentShape {
    pub provides: usize,
    pub uses: usize,
    pub emits: usize,
    pub consumes: usize,
    pub dataports: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interface {
    pub name: String,
    /// Component instances sending on this interface.
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default)]
    pub component: ComponentShape,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Interface {
    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Checks that every name the glue code will declare is a usable C
    /// identifier and that names are unique where the glue requires it.
    pub fn validate(&self, arch: Architecture) -> Result<()> {
        let identifier = Regex::new(&format!("{IDENTIFIER_PATTERN}$"))?;
        let reserved = reserved_words(arch, KeywordFlags::c_environment());
        let check = |name: &str, context: &str| -> Result<()> {
            if !identifier.is_match(name) {
                return Err(GenError::InvalidIdentifier {
                    name: name.to_string(),
                    context: context.to_string(),
                });
            }
            if reserved.contains(name) {
                return Err(GenError::ReservedIdentifier {
                    name: name.to_string(),
                    context: context.to_string(),
                });
            }
            Ok(())
        };

        check(&self.name, "interface")?;
        let mut methods = BTreeSet::new();
        for method in &self.methods {
            check(&method.name, "method")?;
            if !methods.insert(method.name.as_str()) {
                return Err(GenError::DuplicateName {
                    name: method.name.clone(),
                    context: format!("method of `{}`", self.name),
                });
            }
            let mut params = BTreeSet::new();
            for param in &method.parameters {
                check(&param.name, "parameter")?;
                if is_lemma_name(&param.name) {
                    return Err(GenError::CapturedName {
                        name: param.name.clone(),
                        method: method.name.clone(),
                    });
                }
                if !params.insert(param.name.as_str()) {
                    return Err(GenError::DuplicateName {
                        name: param.name.clone(),
                        context: format!("parameter of `{}`", method.name),
                    });
                }
            }
        }
        Ok(())
    }
}
