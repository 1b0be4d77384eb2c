use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("lattice parameter must be positive, got {value}")]
    InvalidLatticeParameter { value: f64 },

    #[error("facet (0, 0, 0) does not define a surface orientation")]
    InvalidFacet,

    #[error("a slab needs at least one layer")]
    NoLayers,

    #[error("cell is degenerate (zero volume)")]
    DegenerateCell,

    #[error("cannot build from an empty structure")]
    EmptyStructure,

    #[error("lateral cell vectors differ along axis {axis}; surface and bulk must share the in-plane cell")]
    IncompatibleCells { axis: usize },

    #[error("could not determine the bulk interlayer spacing")]
    NoLayerSpacing,
}
