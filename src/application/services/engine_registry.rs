use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{EngineDescriptor, SynthesisEngine};

/// Outcome of looking an engine identifier up in the registry.
#[derive(Clone)]
pub struct ResolvedEngine {
    /// Canonical id of the registered engine.
    pub id: String,
    /// The caller's identifier, normalized, when it was recognized (aliases
    /// included); the canonical default id otherwise.
    pub requested_id: String,
    pub engine: Option<Arc<dyn SynthesisEngine>>,
    /// `false` when the requested identifier was unknown and the default was used.
    pub matched: bool,
}

/// Registration table from engine identifier to synthesis backend.
///
/// Lookup trims and lowercases the identifier, follows one level of aliases,
/// and resolves anything unknown (or empty) to the default engine id.
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn SynthesisEngine>>,
    aliases: HashMap<String, String>,
    default_engine: String,
}

impl EngineRegistry {
    pub fn new(default_engine: &str) -> Self {
        Self {
            engines: HashMap::new(),
            aliases: HashMap::new(),
            default_engine: normalize_engine_id(default_engine),
        }
    }

    pub fn register(&mut self, engine: Arc<dyn SynthesisEngine>) -> &mut Self {
        let id = normalize_engine_id(&engine.descriptor().id);
        if self.engines.insert(id.clone(), engine).is_some() {
            tracing::warn!(engine = %id, "Synthesis engine registered twice, keeping the last one");
        }
        self
    }

    pub fn alias(&mut self, alias: &str, target: &str) -> &mut Self {
        self.aliases
            .insert(normalize_engine_id(alias), normalize_engine_id(target));
        self
    }

    pub fn default_engine(&self) -> &str {
        &self.default_engine
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn resolve(&self, requested: Option<&str>) -> ResolvedEngine {
        let requested_id = requested.map(normalize_engine_id).unwrap_or_default();
        let key = self
            .aliases
            .get(&requested_id)
            .cloned()
            .unwrap_or_else(|| requested_id.clone());

        if let Some(engine) = self.engines.get(&key) {
            return ResolvedEngine {
                id: key,
                requested_id,
                engine: Some(Arc::clone(engine)),
                matched: true,
            };
        }

        let default_id = self
            .aliases
            .get(&self.default_engine)
            .unwrap_or(&self.default_engine)
            .clone();
        ResolvedEngine {
            engine: self.engines.get(&default_id).cloned(),
            requested_id: default_id.clone(),
            id: default_id,
            matched: false,
        }
    }

    pub fn descriptors(&self) -> Vec<EngineDescriptor> {
        let mut descriptors: Vec<EngineDescriptor> = self
            .engines
            .values()
            .map(|engine| engine.descriptor().clone())
            .collect();
        descriptors.sort_by(|a, b| a.id.cmp(&b.id));
        descriptors
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }
}

pub fn normalize_engine_id(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
