// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Names of the per-thread memory regions backing array parameters, and of
//! the lemmas and glue functions a document declares.
//!
//! The glue code and the installer derive region names from the same
//! interface, so the scheme is fixed: method name, parameter name and the
//! 1-based thread offset, joined by underscores.

use crate::error::{GenError, Result};
use crate::ir::Interface;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolKey {
    pub method: String,
    pub parameter: String,
    /// 0-based index into the component's threads.
    pub thread_index: usize,
}

impl SymbolKey {
    pub fn new(method: &str, parameter: &str, thread_index: usize) -> Self {
        Self {
            method: method.to_string(),
            parameter: parameter.to_string(),
            thread_index,
        }
    }
}

impl Display for SymbolKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} (thread {})",
            self.method, self.parameter, self.thread_index
        )
    }
}

pub fn symbol_name(method: &str, parameter: &str, thread_index: usize) -> String {
    format!("{method}_{parameter}_{}", thread_index + 1)
}

/// Registry of every symbol generated for one document.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    owners: BTreeMap<String, SymbolKey>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the region of every array parameter for every thread.
    pub fn for_interface(interface: &Interface, thread_count: usize) -> Result<Self> {
        let mut table = Self::new();
        for method in &interface.methods {
            for param in method.array_parameters() {
                for thread_index in 0..thread_count {
                    table.register(SymbolKey::new(&method.name, &param.name, thread_index))?;
                }
            }
        }
        Ok(table)
    }

    /// Returns the name for `key`, failing when another key already owns it.
    pub fn register(&mut self, key: SymbolKey) -> Result<String> {
        let name = symbol_name(&key.method, &key.parameter, key.thread_index);
        match self.owners.get(&name) {
            Some(owner) if *owner != key => Err(GenError::SymbolCollision {
                symbol: name,
                first: owner.to_string(),
                second: key.to_string(),
            }),
            Some(_) => Ok(name),
            None => {
                self.owners.insert(name.clone(), key);
                Ok(name)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Facts and constants declared by the support section of every document.
const SUPPORT_NAMES: &[&str] = &[
    "thread_count",
    "msg_max_length",
    "tls_ptr_aligned",
    "thread_index_wp",
    "get_thread_index'",
];

/// Registry of lemma and glue function names. Isabelle rejects a second
/// declaration of a name, so every name has exactly one owner.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTable {
    owners: BTreeMap<String, String>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the support names and then every helper and RPC lemma of
    /// `interface` along with the function it is stated about.
    pub fn for_interface(interface: &Interface) -> Result<Self> {
        let mut table = Self::new();
        for name in SUPPORT_NAMES {
            table.declare(name, "the support section")?;
        }
        for method in &interface.methods {
            for param in method.array_parameters() {
                let stem = format!("{}_{}", method.name, param.name);
                for access in ["get", "set"] {
                    let owner = format!("the {access} helper of {}.{}", method.name, param.name);
                    table.declare(&format!("{access}_{stem}_wp"), &owner)?;
                    table.declare(&format!("{access}_{stem}'"), &owner)?;
                }
            }
        }
        for method in &interface.methods {
            let owner = format!("the RPC lemma of {}.{}", interface.name, method.name);
            let stem = format!("{}_{}", interface.name, method.name);
            table.declare(&format!("{stem}_wp"), &owner)?;
            table.declare(&format!("{stem}'"), &owner)?;
        }
        Ok(table)
    }

    /// Records `owner` as the declarer of `name`. Fails when `name` is
    /// already taken.
    pub fn declare(&mut self, name: &str, owner: &str) -> Result<()> {
        if let Some(first) = self.owners.get(name) {
            return Err(GenError::SymbolCollision {
                symbol: name.to_string(),
                first: first.clone(),
                second: owner.to_string(),
            });
        }
        self.owners.insert(name.to_string(), owner.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
