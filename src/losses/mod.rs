//! 직관/엘보 손실수두 계산.

pub mod correlations;
pub mod error;
pub mod fittings;
pub mod head_loss;
pub mod materials;

pub use correlations::{
    friction_factor, Correlation, CorrelationMethod, FlowRegime, FrictionFactor, LossWarning,
};
pub use error::{LossCalcResult, LossError};
pub use fittings::{ElbowFitting, ElbowKind, ElbowLoss};
pub use head_loss::{
    compute_head_loss, compute_series, darcy_head_loss, FlowSegment, FlowSpec, FluidProperties,
    LossResult, SeriesResult, G_DEFAULT,
};
pub use materials::{find_material, materials, roughness_for, PipeMaterial};
