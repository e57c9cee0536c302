//! 엘보 형상과 레벨로부터 NETGEN 메쉬 파라미터를 추천한다.
//!
//! 모든 크기는 직경 D를 기준으로 스케일된다. 직관부는 `D / N_bulk`, 엘보는 그 절반,
//! 원주 방향은 `πD / N_theta`를 기본 셀 크기로 삼는다.

use std::f64::consts::PI;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::levels::{AlgorithmAdvice, MeshLevel, ALGORITHM_ADVICE};
use crate::i18n::{self, keys};

/// 메쉬 파라미터 계산 오류.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MeshError {
    /// 형상 입력값 오류. `what`은 메시지 키이다.
    #[error("invalid geometry: {}", i18n::english(what))]
    InvalidGeometry { what: &'static str },
    /// coarse/medium/fine 이외의 레벨
    #[error("unknown mesh level '{0}' (use coarse, medium or fine)")]
    InvalidLevel(String),
}

/// R/D가 이 값보다 작고 각도가 45° 이상이면 급격한 엘보로 본다.
const TIGHT_ELBOW_R_OVER_D: f64 = 1.2;
const TIGHT_ELBOW_MIN_ANGLE_DEG: f64 = 45.0;
const TIGHT_ELBOW_ARC_FACTOR: f64 = 1.5;

/// 엘보 형상 입력. 생성 시 검증되며 이후 변경할 수 없다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElbowGeometry {
    diameter_m: f64,
    inlet_length_m: f64,
    outlet_length_m: f64,
    bend_radius_m: f64,
    bend_angle_deg: f64,
}

impl ElbowGeometry {
    /// 형상을 검증하고 생성한다. 길이/직경/반경은 0보다 커야 하고 각도는 (0, 180] 범위.
    pub fn new(
        diameter_m: f64,
        inlet_length_m: f64,
        outlet_length_m: f64,
        bend_radius_m: f64,
        bend_angle_deg: f64,
    ) -> Result<Self, MeshError> {
        let values = [
            diameter_m,
            inlet_length_m,
            outlet_length_m,
            bend_radius_m,
            bend_angle_deg,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_NOT_FINITE,
            });
        }
        if diameter_m <= 0.0 {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_DIAMETER_NONPOSITIVE,
            });
        }
        if inlet_length_m <= 0.0 {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_INLET_LENGTH_NONPOSITIVE,
            });
        }
        if outlet_length_m <= 0.0 {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_OUTLET_LENGTH_NONPOSITIVE,
            });
        }
        if bend_radius_m <= 0.0 {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_BEND_RADIUS_NONPOSITIVE,
            });
        }
        if bend_angle_deg <= 0.0 || bend_angle_deg > 180.0 {
            return Err(MeshError::InvalidGeometry {
                what: keys::ERR_BEND_ANGLE_RANGE,
            });
        }
        Ok(Self {
            diameter_m,
            inlet_length_m,
            outlet_length_m,
            bend_radius_m,
            bend_angle_deg,
        })
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    pub fn inlet_length_m(&self) -> f64 {
        self.inlet_length_m
    }

    pub fn outlet_length_m(&self) -> f64 {
        self.outlet_length_m
    }

    pub fn bend_radius_m(&self) -> f64 {
        self.bend_radius_m
    }

    pub fn bend_angle_deg(&self) -> f64 {
        self.bend_angle_deg
    }

    /// 엘보 중심선 호 길이 [m] = R·θ(rad)
    pub fn arc_length_m(&self) -> f64 {
        self.bend_radius_m * self.bend_angle_deg.to_radians()
    }

    pub fn radius_ratio(&self) -> f64 {
        self.bend_radius_m / self.diameter_m
    }
}

/// 'Local Sizes' 가설에 넣을 국부 크기 [m].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocalSizes {
    /// D / N_bulk
    pub bulk: f64,
    /// D / (2·N_bulk)
    pub elbow: f64,
    /// πD / N_theta
    pub theta: f64,
    /// 엘보 벽면 권장 크기
    pub wall_elbow: f64,
    /// 직관부 벽면 권장 크기
    pub wall_straight: f64,
}

/// 1D 'Number of Segments' 가설 값. `*_raw`는 상한 적용 전 값이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentCounts {
    pub inlet: u32,
    pub outlet: u32,
    pub arc: u32,
    pub inlet_raw: u32,
    pub outlet_raw: u32,
    pub arc_raw: u32,
}

/// 'Viscous Layers' 가설 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViscousLayer {
    pub total_thickness: f64,
    pub first_layer_thickness: f64,
    pub number_of_layers: u32,
    pub stretch_factor: f64,
}

/// NETGEN 'Arguments' 탭 값과 알고리즘 권장.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetgenArguments {
    pub fineness: &'static str,
    pub nb_segs_per_edge: u32,
    pub nb_segs_per_radius: u32,
    pub chordal_error: f64,
    #[serde(flatten)]
    pub algorithms: AlgorithmAdvice,
}

/// 계산 중 생긴 안내 사항. 출력 시 번역된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshNote {
    InletClamped { computed: u32, max: u32 },
    OutletClamped { computed: u32, max: u32 },
    TightElbow {
        radius_ratio: f64,
        angle_deg: f64,
        arc_min: u32,
    },
    /// Segs per Edge/Radius는 곡률 제한이 켜져 있어야 적용된다.
    CurvatureReminder,
    /// OpenFOAM checkMesh로 품질 확인
    CheckMeshReminder,
}

/// 메쉬 추천 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshRecommendation {
    pub level: MeshLevel,
    pub geometry: ElbowGeometry,
    pub max_size: f64,
    pub min_size: f64,
    pub growth_rate: f64,
    pub local_sizes: LocalSizes,
    pub segments: SegmentCounts,
    pub viscous_layer: ViscousLayer,
    pub netgen_arguments: NetgenArguments,
    #[serde(skip)]
    pub notes: Vec<MeshNote>,
}

/// 형상과 레벨로부터 메쉬 파라미터를 계산한다.
pub fn recommend(geometry: &ElbowGeometry, level: MeshLevel) -> MeshRecommendation {
    let cfg = level.config();
    let mut notes = Vec::new();
    let d = geometry.diameter_m;

    let s_bulk = d / f64::from(cfg.n_bulk);
    let s_elbow = d / f64::from(2 * cfg.n_bulk);
    let s_theta = PI * d / f64::from(cfg.n_theta);
    let local_sizes = LocalSizes {
        bulk: s_bulk,
        elbow: s_elbow,
        theta: s_theta,
        wall_elbow: s_elbow.min(s_theta),
        wall_straight: s_bulk,
    };

    let inlet_raw = segment_count(geometry.inlet_length_m, s_bulk);
    let outlet_raw = segment_count(geometry.outlet_length_m, s_bulk);
    if inlet_raw > cfg.n_in_max {
        notes.push(MeshNote::InletClamped {
            computed: inlet_raw,
            max: cfg.n_in_max,
        });
    }
    if outlet_raw > cfg.n_out_max {
        notes.push(MeshNote::OutletClamped {
            computed: outlet_raw,
            max: cfg.n_out_max,
        });
    }

    let arc_raw = segment_count(geometry.arc_length_m(), s_elbow);
    let radius_ratio = geometry.radius_ratio();
    let mut arc_min = cfg.n_arc_min;
    if radius_ratio < TIGHT_ELBOW_R_OVER_D && geometry.bend_angle_deg >= TIGHT_ELBOW_MIN_ANGLE_DEG
    {
        arc_min = (TIGHT_ELBOW_ARC_FACTOR * f64::from(arc_min)).ceil() as u32;
        notes.push(MeshNote::TightElbow {
            radius_ratio,
            angle_deg: geometry.bend_angle_deg,
            arc_min,
        });
    }

    let segments = SegmentCounts {
        inlet: inlet_raw.min(cfg.n_in_max),
        outlet: outlet_raw.min(cfg.n_out_max),
        arc: arc_raw.max(arc_min),
        inlet_raw,
        outlet_raw,
        arc_raw,
    };

    let total_thickness = cfg.viscous_total_thickness_factor * d;
    let viscous_layer = ViscousLayer {
        total_thickness,
        first_layer_thickness: first_layer_thickness(
            total_thickness,
            cfg.viscous_layers,
            cfg.viscous_stretch,
        ),
        number_of_layers: cfg.viscous_layers,
        stretch_factor: cfg.viscous_stretch,
    };

    let netgen_arguments = NetgenArguments {
        fineness: "Custom",
        nb_segs_per_edge: cfg.nb_segs_per_edge,
        nb_segs_per_radius: cfg.nb_segs_per_radius,
        chordal_error: cfg.chordal_error_factor * local_sizes.wall_elbow,
        algorithms: ALGORITHM_ADVICE,
    };

    notes.push(MeshNote::CurvatureReminder);
    notes.push(MeshNote::CheckMeshReminder);

    debug!(
        %level,
        s_bulk,
        s_elbow,
        s_theta,
        arc_length = geometry.arc_length_m(),
        arc_raw,
        "mesh sizes computed"
    );

    MeshRecommendation {
        level,
        geometry: *geometry,
        max_size: s_bulk,
        min_size: s_bulk / 3.0,
        growth_rate: cfg.growth_rate,
        local_sizes,
        segments,
        viscous_layer,
        netgen_arguments,
        notes,
    }
}

/// 길이를 셀 크기로 나눈 올림 값. 양수 길이는 최소 1을 준다.
fn segment_count(length_m: f64, cell_m: f64) -> u32 {
    let n = (length_m / cell_m).ceil();
    if n < 1.0 {
        1
    } else if n >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        n as u32
    }
}

/// 등비 급수로 첫 층 두께를 구한다: T = t1 (sⁿ - 1) / (s - 1)
fn first_layer_thickness(total: f64, layers: u32, stretch: f64) -> f64 {
    if layers == 0 {
        return total;
    }
    if (stretch - 1.0).abs() < 1e-12 {
        return total / f64::from(layers);
    }
    total * (stretch - 1.0) / (stretch.powi(layers as i32) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(d: f64, r: f64, theta: f64) -> ElbowGeometry {
        ElbowGeometry::new(d, 20.0 * d, 20.0 * d, r, theta).expect("valid geometry")
    }

    #[test]
    fn zero_diameter_is_invalid_geometry() {
        let err = ElbowGeometry::new(0.0, 1.0, 1.0, 0.1, 90.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidGeometry {
                what: keys::ERR_DIAMETER_NONPOSITIVE
            }
        );
    }

    #[test]
    fn angle_outside_half_turn_is_rejected() {
        assert!(ElbowGeometry::new(0.1, 1.0, 1.0, 0.15, 0.0).is_err());
        assert!(ElbowGeometry::new(0.1, 1.0, 1.0, 0.15, 180.5).is_err());
        assert!(ElbowGeometry::new(0.1, 1.0, 1.0, 0.15, 180.0).is_ok());
    }

    #[test]
    fn nan_input_is_rejected() {
        let err = ElbowGeometry::new(0.1, f64::NAN, 1.0, 0.15, 90.0).unwrap_err();
        assert_eq!(
            err,
            MeshError::InvalidGeometry {
                what: keys::ERR_NOT_FINITE
            }
        );
    }

    #[test]
    fn medium_sizes_scale_with_diameter() {
        let rec = recommend(&geometry(0.1, 0.15, 90.0), MeshLevel::Medium);
        assert!((rec.max_size - 0.01).abs() < 1e-12);
        assert!((rec.min_size - 0.01 / 3.0).abs() < 1e-12);
        assert!((rec.local_sizes.elbow - 0.005).abs() < 1e-12);
        assert_eq!(rec.growth_rate, 0.35);
        // 20D / (D/10) = 200
        assert_eq!(rec.segments.inlet, 200);
        assert_eq!(rec.segments.inlet_raw, 200);
    }

    #[test]
    fn fine_quarter_bend_arc_count() {
        // arc = 0.075 * π/2 ≈ 0.1178 m, s_elbow = 0.05/30
        let g = ElbowGeometry::new(0.05, 1.0, 1.0, 0.075, 90.0).unwrap();
        assert!((g.arc_length_m() - 0.117_81).abs() < 1e-4);
        let rec = recommend(&g, MeshLevel::Fine);
        assert_eq!(rec.segments.arc_raw, 71);
        assert_eq!(rec.segments.arc, 71);
        assert!(rec.segments.arc >= MeshLevel::Fine.config().n_arc_min);
    }

    #[test]
    fn long_inlet_is_clamped_with_note() {
        let g = ElbowGeometry::new(0.1, 100.0, 1.0, 0.15, 90.0).unwrap();
        let rec = recommend(&g, MeshLevel::Coarse);
        assert_eq!(rec.segments.inlet, 150);
        assert!(rec.segments.inlet_raw > 150);
        assert!(rec
            .notes
            .iter()
            .any(|n| matches!(n, MeshNote::InletClamped { max: 150, .. })));
    }

    #[test]
    fn tight_elbow_raises_arc_minimum() {
        let rec = recommend(&geometry(0.1, 0.1, 90.0), MeshLevel::Coarse);
        assert_eq!(rec.segments.arc, 30);
        assert!(rec
            .notes
            .iter()
            .any(|n| matches!(n, MeshNote::TightElbow { arc_min: 30, .. })));
    }

    #[test]
    fn viscous_layers_sum_to_total_thickness() {
        let rec = recommend(&geometry(0.2, 0.3, 45.0), MeshLevel::Fine);
        let v = rec.viscous_layer;
        let sum: f64 = (0..v.number_of_layers)
            .map(|i| v.first_layer_thickness * v.stretch_factor.powi(i as i32))
            .sum();
        assert!((sum - v.total_thickness).abs() < 1e-12);
        assert!((v.total_thickness - 0.014).abs() < 1e-12);
    }

    #[test]
    fn standing_notes_are_always_present() {
        let rec = recommend(&geometry(0.1, 0.15, 45.0), MeshLevel::Medium);
        assert!(rec.notes.contains(&MeshNote::CurvatureReminder));
        assert!(rec.notes.contains(&MeshNote::CheckMeshReminder));
    }
}
