//! Per-component geometry tables and pins.
//!
//! A component's generator fills a [`ComponentBuilder`] with named
//! [`QGeometry`] entries and [`Pin`]s. [`ComponentBuilder::finish`] freezes
//! the result into a [`ComponentGeometry`], which a design commits
//! atomically.

pub mod entry;
pub mod error;
pub mod pin;

use arcstr::ArcStr;
use geometry::error::check_positive;
use indexmap::IndexMap;

pub use crate::entry::{Attributes, Category, QGeometry};
use crate::error::{Error, Result};
pub use crate::pin::Pin;

/// The chip components are placed on unless configured otherwise.
pub const DEFAULT_CHIP: &str = "main";
/// The layer geometry is drawn on unless configured otherwise.
pub const DEFAULT_LAYER: u32 = 1;

/// Collects the geometry and pins of one component while it is being built.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentBuilder {
    name: ArcStr,
    chip: ArcStr,
    layer: u32,
    polys: IndexMap<ArcStr, QGeometry>,
    paths: IndexMap<ArcStr, QGeometry>,
    junctions: IndexMap<ArcStr, QGeometry>,
    pins: IndexMap<ArcStr, Pin>,
}

/// The finished geometry tables and pins of one component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGeometry {
    name: ArcStr,
    chip: ArcStr,
    layer: u32,
    polys: IndexMap<ArcStr, QGeometry>,
    paths: IndexMap<ArcStr, QGeometry>,
    junctions: IndexMap<ArcStr, QGeometry>,
    pins: IndexMap<ArcStr, Pin>,
}

impl ComponentBuilder {
    /// Creates an empty builder for the named component on the default chip and layer.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            chip: ArcStr::from(DEFAULT_CHIP),
            layer: DEFAULT_LAYER,
            polys: IndexMap::new(),
            paths: IndexMap::new(),
            junctions: IndexMap::new(),
            pins: IndexMap::new(),
        }
    }

    /// Sets the chip used for entries that do not specify one.
    pub fn with_chip(mut self, chip: impl Into<ArcStr>) -> Self {
        self.chip = chip.into();
        self
    }

    /// Sets the layer used for entries that do not specify one.
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// The component name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The default chip.
    pub fn chip(&self) -> &ArcStr {
        &self.chip
    }

    /// The default layer.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    fn table_mut(&mut self, category: Category) -> &mut IndexMap<ArcStr, QGeometry> {
        match category {
            Category::Poly => &mut self.polys,
            Category::Path => &mut self.paths,
            Category::Junction => &mut self.junctions,
        }
    }

    /// Adds a geometry entry to the table for its category.
    ///
    /// Fills in the default layer and chip. Entry names must be unique
    /// within a category; the first entry registered under a name is kept.
    pub fn add_qgeometry(&mut self, mut entry: QGeometry) -> Result<()> {
        if let Some(width) = entry.width() {
            check_positive("width", width)?;
        }
        if let Some(region) = entry.shape().region() {
            if region.is_empty() {
                return Err(Error::Geometry(arcstr::format!(
                    "polygon `{}` of component `{}` is empty",
                    entry.name(),
                    self.name
                )));
            }
        }

        let category = entry.category();
        if self.table_mut(category).contains_key(entry.name()) {
            tracing::error!(
                component = %self.name,
                %category,
                name = %entry.name(),
                "duplicate geometry name"
            );
            return Err(Error::DuplicateGeometry {
                component: self.name.clone(),
                category,
                name: entry.name().clone(),
            });
        }

        entry.layer.get_or_insert(self.layer);
        if entry.chip.is_none() {
            entry.chip = Some(self.chip.clone());
        }
        tracing::debug!(component = %self.name, %category, name = %entry.name(), "added geometry");
        self.table_mut(category).insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Adds each entry in order, stopping at the first failure.
    pub fn add_qgeometries(&mut self, entries: impl IntoIterator<Item = QGeometry>) -> Result<()> {
        for entry in entries {
            self.add_qgeometry(entry)?;
        }
        Ok(())
    }

    /// Registers a named pin from two placed points.
    ///
    /// See [`Pin::new`] for the meaning of `input_as_norm`. Pin names must be
    /// unique within a component; the first pin registered under a name is kept.
    pub fn add_pin(
        &mut self,
        name: impl Into<ArcStr>,
        points: [geometry::point::Point; 2],
        width: f64,
        input_as_norm: bool,
    ) -> Result<()> {
        let name = name.into();
        if self.pins.contains_key(&name) {
            tracing::error!(component = %self.name, pin = %name, "duplicate pin name");
            return Err(Error::DuplicatePin {
                component: self.name.clone(),
                pin: name,
            });
        }
        let pin = Pin::new(points, width, input_as_norm)?;
        tracing::debug!(component = %self.name, pin = %name, "added pin");
        self.pins.insert(name, pin);
        Ok(())
    }

    /// Freezes the collected geometry and pins.
    pub fn finish(self) -> ComponentGeometry {
        ComponentGeometry {
            name: self.name,
            chip: self.chip,
            layer: self.layer,
            polys: self.polys,
            paths: self.paths,
            junctions: self.junctions,
            pins: self.pins,
        }
    }
}

impl ComponentGeometry {
    /// The component name.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The chip the component was placed on.
    pub fn chip(&self) -> &ArcStr {
        &self.chip
    }

    /// The component's default layer.
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// The entries of one table, in insertion order.
    pub fn table(&self, category: Category) -> &IndexMap<ArcStr, QGeometry> {
        match category {
            Category::Poly => &self.polys,
            Category::Path => &self.paths,
            Category::Junction => &self.junctions,
        }
    }

    /// Looks up an entry by category and name.
    pub fn get(&self, category: Category, name: &str) -> Option<&QGeometry> {
        self.table(category).get(name)
    }

    /// Iterates over every entry of every table.
    pub fn entries(&self) -> impl Iterator<Item = &QGeometry> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.table(category).values())
    }

    /// Looks up a pin by name.
    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    /// The pins, in registration order.
    pub fn pins(&self) -> &IndexMap<ArcStr, Pin> {
        &self.pins
    }

    /// Total area of the entries in the poly table with the given subtract flag.
    pub fn poly_area(&self, subtract: bool) -> f64 {
        self.polys
            .values()
            .filter(|e| e.is_subtract() == subtract)
            .map(|e| e.shape().area())
            .sum()
    }
}
