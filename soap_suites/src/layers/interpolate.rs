//! `${name}` expansion across a layer stack.

use std::collections::HashMap;

use super::LayeredProperties;

const ENV_PREFIX: &str = "env:";

/// Expands `${...}` references, remembering each key it has fully resolved.
///
/// Unknown names and references that would recurse into a key already being
/// resolved stay in the output verbatim. A value whose expansion stopped at
/// such a cycle depends on where the lookup started, so it is not cached.
pub(super) struct Interpolator<'a> {
    layers: &'a LayeredProperties,
    resolving: Vec<String>,
    resolved: HashMap<String, String>,
    hit_cycle: bool,
}

impl<'a> Interpolator<'a> {
    pub(super) fn new(layers: &'a LayeredProperties) -> Self {
        Self {
            layers,
            resolving: Vec::new(),
            resolved: HashMap::new(),
            hit_cycle: false,
        }
    }

    /// Returns the expanded value of `key`, or `None` when no layer holds it.
    pub(super) fn value(&mut self, key: &str) -> Option<String> {
        self.hit_cycle = false;
        self.resolve_key(key)
    }

    fn expand(&mut self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some((before, after_open)) = rest.split_once("${") {
            out.push_str(before);
            let Some((name, tail)) = after_open.split_once('}') else {
                out.push_str("${");
                out.push_str(after_open);
                return out;
            };
            match self.resolve(name) {
                Some(value) => out.push_str(&value),
                None => {
                    out.push_str("${");
                    out.push_str(name);
                    out.push('}');
                }
            }
            rest = tail;
        }

        out.push_str(rest);
        out
    }

    fn resolve(&mut self, name: &str) -> Option<String> {
        if let Some(var) = name.strip_prefix(ENV_PREFIX) {
            return std::env::var(var).ok();
        }
        self.resolve_key(name)
    }

    fn resolve_key(&mut self, name: &str) -> Option<String> {
        if let Some(cached) = self.resolved.get(name) {
            return Some(cached.clone());
        }
        if self.resolving.iter().any(|active| active == name) {
            self.hit_cycle = true;
            return None;
        }
        let layers = self.layers;
        let raw = layers.get_raw(name)?;

        let outer_hit_cycle = std::mem::take(&mut self.hit_cycle);
        self.resolving.push(name.to_owned());
        let value = self.expand(raw);
        self.resolving.pop();

        if !self.hit_cycle {
            self.resolved.insert(name.to_owned(), value.clone());
        }
        self.hit_cycle |= outer_hit_cycle;
        Some(value)
    }
}
