use std::fmt;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::spec::{spec_for, CoordinateSpec, SolidKind};
use crate::topology::ShapeData;

use super::{AssembleFaces, BuildEdges, ComputeMetrics, GenerateVertices};

/// Progress of one solid through the pipeline.
///
/// Each stage consumes the previous stage's output; a failure is terminal
/// for that solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Uninitialized,
    SpecLoaded,
    VerticesGenerated,
    EdgesBuilt,
    FacesAssembled,
    MetricsComputed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::SpecLoaded => "spec-loaded",
            Self::VerticesGenerated => "vertices-generated",
            Self::EdgesBuilt => "edges-built",
            Self::FacesAssembled => "faces-assembled",
            Self::MetricsComputed => "metrics-computed",
        };
        f.write_str(name)
    }
}

/// Runs spec lookup, vertex generation, edge building, face assembly and
/// metric computation for one solid.
pub struct ShapePipeline {
    kind: SolidKind,
    spec: Option<CoordinateSpec>,
    config: PipelineConfig,
}

impl ShapePipeline {
    /// Creates a pipeline for the built-in specification of `kind`.
    #[must_use]
    pub fn new(kind: SolidKind) -> Self {
        Self {
            kind,
            spec: None,
            config: PipelineConfig::default(),
        }
    }

    /// Creates a pipeline that starts from a caller-supplied specification.
    #[must_use]
    pub fn from_spec(spec: CoordinateSpec) -> Self {
        Self {
            kind: spec.kind(),
            spec: Some(spec),
            config: PipelineConfig::default(),
        }
    }

    /// Sets the pipeline configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a stage, or
    /// [`ShapeError::InvalidConfig`](crate::ShapeError::InvalidConfig) if the
    /// configuration is invalid.
    #[instrument(skip(self), fields(solid = %self.kind))]
    pub fn execute(&self) -> Result<ShapeData> {
        self.config.validate()?;
        let tolerance = self.config.tolerance;
        debug!(stage = %PipelineStage::Uninitialized, tolerance);

        let spec = match &self.spec {
            Some(spec) => spec,
            None => spec_for(self.kind)?,
        };
        debug!(stage = %PipelineStage::SpecLoaded, rows = spec.rows().len());

        let vertices = GenerateVertices::new(spec)
            .with_tolerance(tolerance)
            .execute()?;
        debug!(stage = %PipelineStage::VerticesGenerated);

        let edges = BuildEdges::new(&vertices)
            .with_tolerance(tolerance)
            .execute()?;
        debug!(stage = %PipelineStage::EdgesBuilt);

        let faces = AssembleFaces::new(&vertices, &edges)
            .with_tolerance(tolerance)
            .execute()?;
        debug!(stage = %PipelineStage::FacesAssembled);

        let metrics = ComputeMetrics::new(&vertices, &edges, &faces)
            .with_tolerance(tolerance)
            .execute()?;
        debug!(stage = %PipelineStage::MetricsComputed);

        Ok(ShapeData::new(vertices, edges, faces, metrics))
    }
}

/// Computes the complete record of `kind` with the default configuration.
///
/// # Errors
///
/// Returns the first error raised by a pipeline stage.
pub fn compute_shape(kind: SolidKind) -> Result<ShapeData> {
    ShapePipeline::new(kind).execute()
}

/// Computes all five solids in parallel with the default configuration.
///
/// Results are returned in [`SolidKind::ALL`] order; a failure for one
/// solid does not affect the others.
#[must_use]
pub fn compute_all() -> Vec<(SolidKind, Result<ShapeData>)> {
    compute_all_with(PipelineConfig::default())
}

/// Computes all five solids in parallel with `config`.
#[must_use]
pub fn compute_all_with(config: PipelineConfig) -> Vec<(SolidKind, Result<ShapeData>)> {
    SolidKind::ALL
        .par_iter()
        .map(|&kind| (kind, ShapePipeline::new(kind).with_config(config).execute()))
        .collect()
}
