//! Darcy-Weisbach 기반 손실수두/압력강하 계산.
//!
//! h_f = f · (L/D) · V²/(2g), h_local = K · V²/(2g), ΔP = ρ · g · (h_f + h_local)

use std::f64::consts::PI;

use serde::Serialize;
use tracing::debug;

use super::correlations::{friction_factor, Correlation, CorrelationMethod, FlowRegime, LossWarning};
use super::error::{LossCalcResult, LossError};
use super::fittings::ElbowFitting;
use crate::i18n::keys;
use crate::units::kinematic_from_dynamic;

/// 중력가속도 기본값 [m/s²]
pub const G_DEFAULT: f64 = 9.81;
/// 20 °C 물 밀도 [kg/m³]
pub const RHO_WATER_20C: f64 = 998.0;
/// 20 °C 물 점도 [Pa·s]
pub const MU_WATER_20C: f64 = 1.002e-3;

/// 유체 물성.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FluidProperties {
    /// 밀도 [kg/m³]
    pub density_kg_per_m3: f64,
    /// 동점도 ν [m²/s]
    pub kinematic_viscosity_m2_per_s: f64,
}

impl FluidProperties {
    /// 밀도와 점도(μ)로 생성한다. ν = μ/ρ
    pub fn from_dynamic(density_kg_per_m3: f64, dynamic_viscosity_pa_s: f64) -> Self {
        Self {
            density_kg_per_m3,
            kinematic_viscosity_m2_per_s: kinematic_from_dynamic(
                dynamic_viscosity_pa_s,
                density_kg_per_m3,
            ),
        }
    }

    pub fn water_20c() -> Self {
        Self::from_dynamic(RHO_WATER_20C, MU_WATER_20C)
    }
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::water_20c()
    }
}

/// 유량 지정 방식. 유량이 주어지면 단면적으로 유속을 구한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowSpec {
    /// 체적 유량 [m³/s]
    Rate(f64),
    /// 평균 유속 [m/s]
    Velocity(f64),
}

/// 원형 직관 구간 입력.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSegment {
    /// 출력용 이름 (선택)
    pub name: String,
    /// 내경 [m]
    pub diameter_m: f64,
    /// 길이 [m]
    pub length_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowSpec>,
    /// 절대조도 ε [m]
    pub roughness_m: f64,
    pub fluid: FluidProperties,
}

impl FlowSegment {
    fn validate(&self) -> LossCalcResult<()> {
        let invalid = |what| Err(LossError::InvalidInput { what });
        if !self.diameter_m.is_finite() || self.diameter_m <= 0.0 {
            return invalid(keys::ERR_DIAMETER_NONPOSITIVE);
        }
        if !self.length_m.is_finite() || self.length_m < 0.0 {
            return invalid(keys::ERR_LENGTH_NEGATIVE);
        }
        if !self.roughness_m.is_finite() || self.roughness_m < 0.0 {
            return invalid(keys::ERR_ROUGHNESS_NEGATIVE);
        }
        if !self.fluid.density_kg_per_m3.is_finite() || self.fluid.density_kg_per_m3 <= 0.0 {
            return invalid(keys::ERR_DENSITY_NONPOSITIVE);
        }
        let nu = self.fluid.kinematic_viscosity_m2_per_s;
        if !nu.is_finite() || nu <= 0.0 {
            return invalid(keys::ERR_VISCOSITY_NONPOSITIVE);
        }
        match self.flow {
            None => invalid(keys::ERR_FLOW_MISSING),
            Some(FlowSpec::Rate(q)) | Some(FlowSpec::Velocity(q))
                if !q.is_finite() || q <= 0.0 =>
            {
                invalid(keys::ERR_FLOW_NONPOSITIVE)
            }
            Some(_) => Ok(()),
        }
    }

    pub fn area_m2(&self) -> f64 {
        PI * self.diameter_m * self.diameter_m / 4.0
    }
}

/// 단일 구간 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossResult {
    pub area_m2: f64,
    pub velocity_m_per_s: f64,
    pub flow_rate_m3_per_s: f64,
    pub reynolds: f64,
    pub regime: FlowRegime,
    pub correlation: Correlation,
    pub friction_factor: f64,
    /// 마찰 손실수두 [m]
    pub friction_head_loss_m: f64,
    /// 엘보 K (엘보가 없으면 None)
    pub local_loss_coefficient: Option<f64>,
    /// 엘보 국부 손실수두 [m]
    pub local_head_loss_m: f64,
    /// 전체 손실수두 [m]
    pub head_loss_m: f64,
    pub pressure_drop_pa: f64,
    pub pressure_drop_bar: f64,
    #[serde(skip)]
    pub warnings: Vec<LossWarning>,
}

/// 직렬 구간 합산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesResult {
    pub segments: Vec<LossResult>,
    pub head_loss_m: f64,
    pub pressure_drop_pa: f64,
    pub pressure_drop_bar: f64,
}

/// 속도수두 V²/(2g) [m]
pub fn velocity_head(velocity_m_per_s: f64, gravity: f64) -> f64 {
    velocity_m_per_s * velocity_m_per_s / (2.0 * gravity)
}

/// Darcy-Weisbach 마찰 손실수두 [m]
pub fn darcy_head_loss(
    friction_factor: f64,
    length_m: f64,
    diameter_m: f64,
    velocity_m_per_s: f64,
    gravity: f64,
) -> f64 {
    friction_factor * (length_m / diameter_m) * velocity_head(velocity_m_per_s, gravity)
}

/// 단일 구간(선택적으로 엘보 1개 포함)의 손실수두와 압력강하를 계산한다.
///
/// 상관식 적용 범위를 벗어나도 실패하지 않고 `warnings`에 권고를 남긴다.
pub fn compute_head_loss(
    segment: &FlowSegment,
    elbow: Option<&ElbowFitting>,
    method: CorrelationMethod,
    gravity: f64,
) -> LossCalcResult<LossResult> {
    segment.validate()?;
    if !gravity.is_finite() || gravity <= 0.0 {
        return Err(LossError::InvalidInput {
            what: keys::ERR_GRAVITY_NONPOSITIVE,
        });
    }

    let area = segment.area_m2();
    let (velocity, flow_rate) = match segment.flow {
        Some(FlowSpec::Rate(q)) => (q / area, q),
        Some(FlowSpec::Velocity(v)) => (v, v * area),
        None => {
            return Err(LossError::InvalidInput {
                what: keys::ERR_FLOW_MISSING,
            })
        }
    };
    let reynolds = velocity * segment.diameter_m / segment.fluid.kinematic_viscosity_m2_per_s;
    let relative_roughness = segment.roughness_m / segment.diameter_m;
    let friction = friction_factor(reynolds, relative_roughness, method)?;
    let mut warnings = friction.warnings;

    let friction_head_loss = darcy_head_loss(
        friction.value,
        segment.length_m,
        segment.diameter_m,
        velocity,
        gravity,
    );

    let local_loss_coefficient = match elbow {
        Some(fitting) => {
            let loss = fitting.loss_coefficient(segment.diameter_m)?;
            warnings.extend(loss.warning);
            Some(loss.k)
        }
        None => None,
    };
    let local_head_loss =
        local_loss_coefficient.map_or(0.0, |k| k * velocity_head(velocity, gravity));

    let head_loss = friction_head_loss + local_head_loss;
    let pressure_drop_pa = segment.fluid.density_kg_per_m3 * gravity * head_loss;

    debug!(
        segment = %segment.name,
        velocity,
        reynolds,
        f = friction.value,
        correlation = ?friction.correlation,
        head_loss,
        advisories = warnings.len(),
        "head loss computed"
    );

    Ok(LossResult {
        area_m2: area,
        velocity_m_per_s: velocity,
        flow_rate_m3_per_s: flow_rate,
        reynolds,
        regime: friction.regime,
        correlation: friction.correlation,
        friction_factor: friction.value,
        friction_head_loss_m: friction_head_loss,
        local_loss_coefficient,
        local_head_loss_m: local_head_loss,
        head_loss_m: head_loss,
        pressure_drop_pa,
        pressure_drop_bar: pressure_drop_pa / 100_000.0,
        warnings,
    })
}

/// 여러 직관 구간을 직렬로 연결했을 때의 전체 손실을 합산한다.
pub fn compute_series(
    segments: &[FlowSegment],
    method: CorrelationMethod,
    gravity: f64,
) -> LossCalcResult<SeriesResult> {
    if segments.is_empty() {
        return Err(LossError::InvalidInput {
            what: keys::ERR_NO_SEGMENTS,
        });
    }
    let results = segments
        .iter()
        .map(|seg| compute_head_loss(seg, None, method, gravity))
        .collect::<LossCalcResult<Vec<_>>>()?;
    let head_loss_m = results.iter().map(|r| r.head_loss_m).sum();
    let pressure_drop_pa: f64 = results.iter().map(|r| r.pressure_drop_pa).sum();
    Ok(SeriesResult {
        segments: results,
        head_loss_m,
        pressure_drop_pa,
        pressure_drop_bar: pressure_drop_pa / 100_000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::losses::fittings::ElbowKind;
    use crate::losses::materials::HDPE_ROUGHNESS_M;

    fn segment(diameter_m: f64, length_m: f64, flow: FlowSpec, roughness_m: f64) -> FlowSegment {
        FlowSegment {
            name: String::new(),
            diameter_m,
            length_m,
            flow: Some(flow),
            roughness_m,
            fluid: FluidProperties::water_20c(),
        }
    }

    #[test]
    fn hdpe_one_liter_per_second_is_positive() {
        let seg = segment(0.05, 10.0, FlowSpec::Rate(0.001), HDPE_ROUGHNESS_M);
        let res =
            compute_head_loss(&seg, None, CorrelationMethod::Haaland, G_DEFAULT).expect("calc");
        assert!(res.head_loss_m > 0.0);
        assert!(res.velocity_m_per_s > 0.0);
        assert!(res.reynolds > 0.0);
        assert!((res.velocity_m_per_s - 0.001 / seg.area_m2()).abs() < 1e-12);
    }

    #[test]
    fn velocity_input_reports_flow_rate() {
        let seg = segment(0.1, 10.0, FlowSpec::Velocity(2.0), 0.0);
        let res = compute_head_loss(&seg, None, CorrelationMethod::Auto, G_DEFAULT).unwrap();
        assert!((res.flow_rate_m3_per_s - 2.0 * seg.area_m2()).abs() < 1e-15);
    }

    #[test]
    fn pressure_drop_is_rho_g_h() {
        let seg = segment(0.08, 25.0, FlowSpec::Velocity(1.5), 4.5e-5);
        let res = compute_head_loss(&seg, None, CorrelationMethod::Auto, G_DEFAULT).unwrap();
        let expected = RHO_WATER_20C * G_DEFAULT * res.head_loss_m;
        assert!((res.pressure_drop_pa - expected).abs() < 1e-9);
        assert!((res.pressure_drop_bar - expected / 1e5).abs() < 1e-14);
    }

    #[test]
    fn elbow_adds_local_loss() {
        let seg = segment(0.1, 5.0, FlowSpec::Velocity(2.0), HDPE_ROUGHNESS_M);
        let elbow = ElbowFitting::Catalog {
            kind: ElbowKind::Deg90Short,
        };
        let plain = compute_head_loss(&seg, None, CorrelationMethod::Haaland, G_DEFAULT).unwrap();
        let bent =
            compute_head_loss(&seg, Some(&elbow), CorrelationMethod::Haaland, G_DEFAULT).unwrap();
        let expected_local = 0.75 * 4.0 / (2.0 * G_DEFAULT);
        assert!((bent.local_head_loss_m - expected_local).abs() < 1e-12);
        assert!((bent.head_loss_m - plain.head_loss_m - expected_local).abs() < 1e-12);
        assert_eq!(bent.local_loss_coefficient, Some(0.75));
        assert_eq!(plain.local_loss_coefficient, None);
    }

    #[test]
    fn missing_flow_is_invalid_input() {
        let mut seg = segment(0.1, 5.0, FlowSpec::Velocity(1.0), 0.0);
        seg.flow = None;
        let err = compute_head_loss(&seg, None, CorrelationMethod::Auto, G_DEFAULT).unwrap_err();
        assert_eq!(
            err,
            LossError::InvalidInput {
                what: keys::ERR_FLOW_MISSING
            }
        );
    }

    #[test]
    fn zero_viscosity_is_invalid_input() {
        let mut seg = segment(0.1, 5.0, FlowSpec::Velocity(1.0), 0.0);
        seg.fluid.kinematic_viscosity_m2_per_s = 0.0;
        let err = compute_head_loss(&seg, None, CorrelationMethod::Auto, G_DEFAULT).unwrap_err();
        assert_eq!(
            err,
            LossError::InvalidInput {
                what: keys::ERR_VISCOSITY_NONPOSITIVE
            }
        );
    }

    #[test]
    fn zero_length_gives_only_local_loss() {
        let seg = segment(0.1, 0.0, FlowSpec::Velocity(1.0), 0.0);
        let elbow = ElbowFitting::Catalog {
            kind: ElbowKind::Deg45Long,
        };
        let res =
            compute_head_loss(&seg, Some(&elbow), CorrelationMethod::Auto, G_DEFAULT).unwrap();
        assert_eq!(res.friction_head_loss_m, 0.0);
        assert!(res.local_head_loss_m > 0.0);
    }

    #[test]
    fn series_sums_segments() {
        let a = segment(0.05, 10.0, FlowSpec::Rate(0.001), HDPE_ROUGHNESS_M);
        let b = segment(0.04, 6.0, FlowSpec::Rate(0.001), HDPE_ROUGHNESS_M);
        let series =
            compute_series(&[a.clone(), b.clone()], CorrelationMethod::Haaland, G_DEFAULT)
                .unwrap();
        let ra = compute_head_loss(&a, None, CorrelationMethod::Haaland, G_DEFAULT).unwrap();
        let rb = compute_head_loss(&b, None, CorrelationMethod::Haaland, G_DEFAULT).unwrap();
        assert_eq!(series.segments.len(), 2);
        assert!((series.head_loss_m - (ra.head_loss_m + rb.head_loss_m)).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(compute_series(&[], CorrelationMethod::Auto, G_DEFAULT).is_err());
    }
}
