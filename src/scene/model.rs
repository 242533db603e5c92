use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::compile::driver::{CompilationReport, CompileOpts, RawEntry, compile};
use crate::foundation::core::ElementHandle;
use crate::foundation::error::{ScrollcueError, ScrollcueResult};
use crate::scene::geometry::StaticGeometry;

/// JSON shape of one element.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementDef {
    /// Optional element id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Directive string.
    #[serde(default)]
    pub directives: String,
    /// Rendered height, in the same unit as the viewport height.
    #[serde(default)]
    pub height: f64,
}

/// JSON shape of a scene.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneDef {
    /// Viewport height.
    pub viewport_height: f64,
    /// Elements in document order.
    pub elements: Vec<ElementDef>,
}

/// A scroll scene: elements, their directives and a fixed geometry snapshot.
///
/// This is the file-facing boundary object; [`Scene::compile`] runs the
/// directive compiler over it.
#[derive(Debug, Clone)]
pub struct Scene {
    def: SceneDef,
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollcueResult<Self> {
        let def: SceneDef = serde_json::from_reader(r)
            .map_err(|e| ScrollcueError::serde(format!("parse scene JSON: {e}")))?;
        Ok(Self { def })
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollcueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollcueError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Wrap an already-built definition.
    pub fn from_def(def: SceneDef) -> Self {
        Self { def }
    }

    /// Borrow the definition.
    pub fn def(&self) -> &SceneDef {
        &self.def
    }

    /// Check geometry values.
    pub fn validate(&self) -> ScrollcueResult<()> {
        let vh = self.def.viewport_height;
        if !(vh.is_finite() && vh > 0.0) {
            return Err(ScrollcueError::validation(format!(
                "viewport_height must be positive and finite, got {vh}"
            )));
        }
        for (i, el) in self.def.elements.iter().enumerate() {
            if !(el.height.is_finite() && el.height >= 0.0) {
                return Err(ScrollcueError::validation(format!(
                    "element {i}: height must be non-negative and finite, got {}",
                    el.height
                )));
            }
        }
        Ok(())
    }

    /// Raw entries; handles are element positions.
    pub fn entries(&self) -> Vec<RawEntry> {
        self.def
            .elements
            .iter()
            .enumerate()
            .map(|(i, el)| RawEntry {
                id: el.id.clone(),
                directives: el.directives.clone(),
                handle: handle_for(i),
            })
            .collect()
    }

    /// Geometry snapshot matching [`Scene::entries`].
    pub fn geometry(&self) -> StaticGeometry {
        StaticGeometry::new(
            self.def.viewport_height,
            self.def.elements.iter().map(|el| el.height).collect(),
        )
    }

    /// Validate and compile the scene.
    pub fn compile(&self, opts: &CompileOpts) -> ScrollcueResult<CompilationReport> {
        self.validate()?;
        compile(&self.entries(), &self.geometry(), opts)
    }
}

fn handle_for(i: usize) -> ElementHandle {
    ElementHandle(u32::try_from(i).unwrap_or(u32::MAX))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
