//! 메쉬 레벨(coarse/medium/fine)별 보정 상수 테이블.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::elbow_mesh::MeshError;

/// 메쉬 해상도 레벨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeshLevel {
    Coarse,
    #[default]
    Medium,
    Fine,
}

/// 레벨 하나에 묶인 상수 묶음.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// 직관부 축방향 D당 셀 수
    pub n_bulk: u32,
    /// 원주방향 셀 수
    pub n_theta: u32,
    /// 엘보 호 최소 세그먼트 수
    pub n_arc_min: u32,
    /// 입구 직관 최대 세그먼트 수
    pub n_in_max: u32,
    /// 출구 직관 최대 세그먼트 수
    pub n_out_max: u32,
    pub growth_rate: f64,
    /// 점성층 전체 두께 / D
    pub viscous_total_thickness_factor: f64,
    pub viscous_layers: u32,
    pub viscous_stretch: f64,
    pub nb_segs_per_edge: u32,
    pub nb_segs_per_radius: u32,
    /// chordal error = factor * s_wall_elbow
    pub chordal_error_factor: f64,
}

const COARSE: LevelConfig = LevelConfig {
    n_bulk: 6,
    n_theta: 32,
    n_arc_min: 20,
    n_in_max: 150,
    n_out_max: 150,
    growth_rate: 0.40,
    viscous_total_thickness_factor: 0.03,
    viscous_layers: 8,
    viscous_stretch: 1.25,
    nb_segs_per_edge: 1,
    nb_segs_per_radius: 4,
    chordal_error_factor: 0.30,
};

const MEDIUM: LevelConfig = LevelConfig {
    n_bulk: 10,
    n_theta: 48,
    n_arc_min: 36,
    n_in_max: 250,
    n_out_max: 250,
    growth_rate: 0.35,
    viscous_total_thickness_factor: 0.05,
    viscous_layers: 10,
    viscous_stretch: 1.20,
    nb_segs_per_edge: 2,
    nb_segs_per_radius: 6,
    chordal_error_factor: 0.20,
};

const FINE: LevelConfig = LevelConfig {
    n_bulk: 15,
    n_theta: 64,
    n_arc_min: 48,
    n_in_max: 400,
    n_out_max: 400,
    growth_rate: 0.30,
    viscous_total_thickness_factor: 0.07,
    viscous_layers: 14,
    viscous_stretch: 1.15,
    nb_segs_per_edge: 3,
    nb_segs_per_radius: 8,
    chordal_error_factor: 0.15,
};

impl MeshLevel {
    pub fn config(&self) -> &'static LevelConfig {
        match self {
            MeshLevel::Coarse => &COARSE,
            MeshLevel::Medium => &MEDIUM,
            MeshLevel::Fine => &FINE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeshLevel::Coarse => "coarse",
            MeshLevel::Medium => "medium",
            MeshLevel::Fine => "fine",
        }
    }
}

impl fmt::Display for MeshLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeshLevel {
    type Err = MeshError;

    /// 대소문자/공백을 무시하고 이름, 약어(c/m/f), 메뉴 번호(1/2/3)를 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coarse" | "c" | "1" => Ok(MeshLevel::Coarse),
            "medium" | "m" | "2" => Ok(MeshLevel::Medium),
            "fine" | "f" | "3" => Ok(MeshLevel::Fine),
            _ => Err(MeshError::InvalidLevel(s.to_string())),
        }
    }
}

/// Salome/NETGEN 알고리즘 및 체크박스 권장값. 레벨과 무관하게 고정이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmAdvice {
    pub main_3d_algorithm: &'static str,
    pub alternative_3d_algorithm: &'static str,
    pub alternative_2d_algorithm: &'static str,
    pub alternative_1d_algorithm: &'static str,
    pub limit_size_by_curvature: bool,
    pub quad_dominated: bool,
    /// OpenFOAM은 .unv에서 1차 요소를 기대한다.
    pub second_order: bool,
    pub optimize: bool,
}

pub const ALGORITHM_ADVICE: AlgorithmAdvice = AlgorithmAdvice {
    main_3d_algorithm: "NETGEN 1D-2D-3D",
    alternative_3d_algorithm: "NETGEN 3D",
    alternative_2d_algorithm: "NETGEN 2D (simple parameters)",
    alternative_1d_algorithm: "Wire Discretization",
    limit_size_by_curvature: false,
    quad_dominated: false,
    second_order: false,
    optimize: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_aliases_and_numbers() {
        assert_eq!("Fine".parse::<MeshLevel>().unwrap(), MeshLevel::Fine);
        assert_eq!(" c ".parse::<MeshLevel>().unwrap(), MeshLevel::Coarse);
        assert_eq!("2".parse::<MeshLevel>().unwrap(), MeshLevel::Medium);
    }

    #[test]
    fn unknown_level_is_invalid_level() {
        let err = "ultra".parse::<MeshLevel>().unwrap_err();
        assert!(matches!(err, MeshError::InvalidLevel(ref s) if s == "ultra"));
    }

    #[test]
    fn finer_levels_resolve_more() {
        let c = MeshLevel::Coarse.config();
        let m = MeshLevel::Medium.config();
        let f = MeshLevel::Fine.config();
        assert!(c.n_bulk < m.n_bulk && m.n_bulk < f.n_bulk);
        assert!(c.growth_rate > m.growth_rate && m.growth_rate > f.growth_rate);
        assert!(c.viscous_layers < f.viscous_layers);
    }
}
