//! The collection of generated components.

use std::path::Path;

use anyhow::Context;
use arcstr::ArcStr;
use indexmap::map::Entry;
use indexmap::IndexMap;
use qgeometry::{Category, ComponentBuilder, ComponentGeometry, QGeometry};
use serde::Deserialize;
use tracing::{span, Level};

use crate::component::QComponent;
use crate::junction_array::JunctionArray;
use crate::qubits::fluxonium_epr::FluxoniumEpr;
use crate::qubits::fluxonium_pocket::FluxoniumPocket;
use crate::qubits::tmon::Tmon;
use crate::terminations::frame::Frame;
use crate::terminations::markers::{Markers, MarkersLine};
use crate::{Error, Result};

/// Owns the generated geometry of every component, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Design {
    components: IndexMap<ArcStr, ComponentGeometry>,
}

/// The options of any component, tagged by `type` in design files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentOptions {
    /// A [`Frame`].
    Frame(Frame),
    /// A [`Markers`] group.
    Markers(Markers),
    /// A [`MarkersLine`].
    MarkersLine(MarkersLine),
    /// A [`FluxoniumPocket`].
    FluxoniumPocket(FluxoniumPocket),
    /// A [`FluxoniumEpr`].
    FluxoniumEpr(FluxoniumEpr),
    /// A [`Tmon`].
    Tmon(Tmon),
    /// A [`JunctionArray`].
    JunctionArray(JunctionArray),
}

impl ComponentOptions {
    /// The component these options describe.
    pub fn as_component(&self) -> &dyn QComponent {
        match self {
            Self::Frame(c) => c,
            Self::Markers(c) => c,
            Self::MarkersLine(c) => c,
            Self::FluxoniumPocket(c) => c,
            Self::FluxoniumEpr(c) => c,
            Self::Tmon(c) => c,
            Self::JunctionArray(c) => c,
        }
    }
}

/// A named component in a design file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentEntry {
    /// The component name.
    pub name: ArcStr,
    /// The component type and options.
    #[serde(flatten)]
    pub options: ComponentOptions,
}

/// The contents of a design file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DesignFile {
    /// Components, generated in order.
    #[serde(default)]
    pub component: Vec<ComponentEntry>,
}

impl Design {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates `component` and adds it to the design under `name`.
    ///
    /// Nothing is added if generation fails or if the design already
    /// has a component named `name`.
    pub fn add_component<C: QComponent + ?Sized>(
        &mut self,
        name: impl Into<ArcStr>,
        component: &C,
    ) -> Result<&ComponentGeometry> {
        let name = name.into();
        let _guard = span!(
            Level::INFO,
            "generating component",
            component.name = %name,
            component.kind = component.kind()
        )
        .entered();

        match self.components.entry(name) {
            Entry::Occupied(entry) => {
                tracing::error!("design already has a component named `{}`", entry.key());
                Err(Error::DuplicateComponent(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let placement = component.placement();
                let mut cell = ComponentBuilder::new(entry.key().clone())
                    .with_chip(placement.chip.clone())
                    .with_layer(placement.layer);
                tracing::debug!("starting make");
                component.make(&mut cell)?;
                let geometry = cell.finish();
                tracing::debug!(
                    entries = geometry.entries().count(),
                    pins = geometry.pins().len(),
                    "finished make"
                );
                Ok(entry.insert(geometry))
            }
        }
    }

    /// The component named `name`, if any.
    pub fn component(&self, name: &str) -> Option<&ComponentGeometry> {
        self.components.get(name)
    }

    /// All components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentGeometry> {
        self.components.values()
    }

    /// The number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the design has no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Every entry of the given category across all components, paired with
    /// the owning component's name.
    pub fn qgeometry(&self, category: Category) -> impl Iterator<Item = (&ArcStr, &QGeometry)> {
        self.components
            .iter()
            .flat_map(move |(name, geo)| geo.table(category).values().map(move |e| (name, e)))
    }

    /// Generates every component listed in `file`.
    pub fn from_design_file(file: &DesignFile) -> anyhow::Result<Self> {
        let mut design = Self::new();
        for entry in &file.component {
            design
                .add_component(entry.name.clone(), entry.options.as_component())
                .with_context(|| format!("failed to generate component `{}`", entry.name))?;
        }
        tracing::info!(components = design.len(), "generated design");
        Ok(design)
    }

    /// Generates a design from TOML text.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let file = config::document::from_document(toml, Path::new("<string>"))?;
        Self::from_design_file(&file)
    }

    /// Generates a design from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = config::load(path)?;
        Self::from_design_file(&file)
            .with_context(|| format!("failed to generate design `{}`", path.display()))
    }

    /// Generates the design in the nearest [`config::DESIGN_FILE_NAME`] found
    /// in `cwd` or its ancestors.
    pub fn discover(cwd: &Path) -> anyhow::Result<Self> {
        let path = config::paths::find_design_file(cwd, None).with_context(|| {
            format!(
                "could not find `{}` in `{}` or any parent directory",
                config::DESIGN_FILE_NAME,
                cwd.display()
            )
        })?;
        Self::from_file(path)
    }
}
