//! 엘보 메쉬 파라미터 추천 모듈 모음.

pub mod elbow_mesh;
pub mod levels;

pub use elbow_mesh::*;
pub use levels::{AlgorithmAdvice, LevelConfig, MeshLevel, ALGORITHM_ADVICE};
