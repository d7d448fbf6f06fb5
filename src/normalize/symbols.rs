//! Symbol → canonical identifier lookup.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::entity::{EntityRef, Namespace};
use crate::Result;

/// Resolves a bare symbol (gene symbol, chemical name) to a canonical
/// identifier within one namespace.
pub trait SymbolResolver: Send + Sync {
    fn resolve(&self, symbol: &str, namespace: &Namespace) -> Option<EntityRef>;
}

/// Read-only lookup table, case-insensitive on the symbol.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    by_symbol: HashMap<(Namespace, String), EntityRef>,
}

#[derive(Deserialize)]
struct SymbolEntry {
    symbol: String,
    id: String,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol` for `entity`, in the entity's namespace. A later
    /// registration of the same symbol replaces the earlier one.
    pub fn insert(&mut self, symbol: &str, entity: EntityRef) {
        let key = (entity.namespace().clone(), symbol.trim().to_lowercase());
        self.by_symbol.insert(key, entity);
    }

    pub fn with(mut self, symbol: &str, entity: EntityRef) -> Self {
        self.insert(symbol, entity);
        self
    }

    /// Load `[{"symbol": "KEAP1", "id": "hgnc:23177"}, ...]`.
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let entries: Vec<SymbolEntry> = serde_json::from_reader(reader)?;
        let mut table = Self::new();
        for entry in entries {
            table.insert(&entry.symbol, entry.id.parse()?);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Every `(symbol, entity)` pair, symbols lowercased.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &EntityRef)> {
        self.by_symbol.iter().map(|((_, symbol), entity)| (symbol.as_str(), entity))
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, symbol: &str, namespace: &Namespace) -> Option<EntityRef> {
        self.by_symbol
            .get(&(namespace.clone(), symbol.trim().to_lowercase()))
            .cloned()
    }
}
