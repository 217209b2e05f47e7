//! Precedence-ordered property layers.
//!
//! A suite sees its own overrides first and the shared runner properties
//! second. Lookups walk the layers in that order and stop at the first layer
//! holding the key; values are then interpolated against the whole stack.

mod interpolate;

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};

use crate::properties::Properties;

/// Origin of a property layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LayerProvenance {
    /// Values from a suite's `<suite>.properties` file.
    SuiteOverrides,
    /// Values from the shared runner properties file.
    RunnerProperties,
}

/// One source of properties together with where it came from.
#[derive(Clone, Debug)]
pub struct PropertyLayer {
    provenance: LayerProvenance,
    properties: Properties,
    path: Option<Utf8PathBuf>,
}

impl PropertyLayer {
    /// Constructs a layer holding suite overrides.
    #[must_use]
    pub const fn suite_overrides(properties: Properties, path: Option<Utf8PathBuf>) -> Self {
        Self {
            provenance: LayerProvenance::SuiteOverrides,
            properties,
            path,
        }
    }

    /// Constructs a layer holding the shared runner properties.
    #[must_use]
    pub const fn runner_properties(properties: Properties, path: Option<Utf8PathBuf>) -> Self {
        Self {
            provenance: LayerProvenance::RunnerProperties,
            properties,
            path,
        }
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> LayerProvenance {
        self.provenance
    }

    /// Returns the file the layer was read from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Returns the layer's properties.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }
}

/// Layers ordered from highest to lowest precedence.
///
/// ```rust
/// use soap_suites::{LayeredProperties, Properties, PropertyLayer};
///
/// let runner = Properties::parse("host=shared\nurl=http://${host}/ws\n", "runner")?;
/// let suite = Properties::parse("host=suite-a\n", "suite")?;
///
/// let mut layers = LayeredProperties::new();
/// layers.push(PropertyLayer::suite_overrides(suite, None));
/// layers.push(PropertyLayer::runner_properties(runner, None));
///
/// assert_eq!(layers.get("url").as_deref(), Some("http://suite-a/ws"));
/// # Ok::<_, soap_suites::SuitesError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayeredProperties {
    layers: Vec<PropertyLayer>,
}

impl LayeredProperties {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a layer below every layer already pushed.
    pub fn push(&mut self, layer: PropertyLayer) {
        self.layers.push(layer);
    }

    /// Returns the layers, highest precedence first.
    #[must_use]
    pub fn layers(&self) -> &[PropertyLayer] {
        &self.layers
    }

    fn layer_for(&self, key: &str) -> Option<&PropertyLayer> {
        self.layers
            .iter()
            .find(|layer| layer.properties.contains_key(key))
    }

    /// Returns the uninterpolated value from the first layer holding `key`.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.layer_for(key)
            .and_then(|layer| layer.properties.get(key))
    }

    /// Returns which layer supplies `key`.
    #[must_use]
    pub fn provenance_of(&self, key: &str) -> Option<LayerProvenance> {
        self.layer_for(key).map(PropertyLayer::provenance)
    }

    /// Returns the value for `key` with `${...}` references expanded.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        interpolate::Interpolator::new(self).value(key)
    }

    /// Returns the trimmed, interpolated value for `key`, treating blank
    /// values as absent.
    #[must_use]
    pub fn get_non_blank(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
    }

    /// Returns every key once, highest-precedence layer first.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.layers
            .iter()
            .flat_map(|layer| layer.properties.keys())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Collapses the stack into a single document of interpolated values.
    #[must_use]
    pub fn flatten(&self) -> Properties {
        let mut interpolator = interpolate::Interpolator::new(self);
        self.keys()
            .into_iter()
            .filter_map(|key| interpolator.value(key).map(|value| (key, value)))
            .collect()
    }
}
