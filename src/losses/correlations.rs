//! Darcy-Weisbach 마찰계수 상관식.
//!
//! - 층류: f = 64 / Re
//! - 매끈한 관 난류: Blasius, f = 0.3164 · Re^-0.25 (4e3 < Re < 1e5)
//! - 매끈/거친 관 난류: Haaland, 1/√f = -1.8 · log10[((ε/D)/3.7)^1.11 + 6.9/Re]
//! - 천이 구간(2300 ≤ Re ≤ 4000): 층류 값과 Re=4000 난류 값 사이 선형 보간

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{LossError, LossCalcResult};
use crate::i18n::keys;

pub const RE_LAMINAR_MAX: f64 = 2300.0;
pub const RE_TURBULENT_MIN: f64 = 4000.0;
pub const BLASIUS_RE_MAX: f64 = 1.0e5;
pub const HAALAND_RE_MAX: f64 = 1.0e8;
/// ε/D가 이 값 이하면 매끈한 관으로 본다.
pub const SMOOTH_RELATIVE_ROUGHNESS: f64 = 1.0e-5;
pub const HAALAND_RELATIVE_ROUGHNESS_MAX: f64 = 0.05;

/// 난류 구간 상관식 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Re와 상대조도를 보고 자동 선택
    #[default]
    Auto,
    Blasius,
    Haaland,
}

impl FromStr for CorrelationMethod {
    type Err = LossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" | "a" => Ok(CorrelationMethod::Auto),
            "blasius" | "b" | "1" => Ok(CorrelationMethod::Blasius),
            "haaland" | "h" | "2" => Ok(CorrelationMethod::Haaland),
            _ => Err(LossError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CorrelationMethod::Auto => "auto",
            CorrelationMethod::Blasius => "blasius",
            CorrelationMethod::Haaland => "haaland",
        })
    }
}

/// 실제 적용된 식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Correlation {
    Laminar,
    Blasius,
    Haaland,
}

/// 유동 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowRegime {
    Laminar,
    Transitional,
    Turbulent,
}

/// 상관식 적용 범위를 벗어난 경우의 권고(비치명적). 결과는 그대로 반환된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LossWarning {
    /// 2300 ≤ Re ≤ 4000, 보간값 사용
    TransitionalRegime { reynolds: f64 },
    /// Blasius를 유효 범위 밖 Re에서 사용
    BlasiusOutOfRange { reynolds: f64 },
    /// Blasius를 거친 관에 사용
    BlasiusRoughPipe { relative_roughness: f64 },
    /// 자동 선택에서 Re가 Blasius 범위를 넘어 Haaland로 전환
    BlasiusFallback { reynolds: f64 },
    HaalandOutOfRange { reynolds: f64 },
    HaalandRoughness { relative_roughness: f64 },
    /// 엘보 K 테이블 범위 밖 R/D를 경계값으로 클램프
    ElbowTableExtrapolated { radius_ratio: f64 },
}

/// 마찰계수 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FrictionFactor {
    pub value: f64,
    pub regime: FlowRegime,
    pub correlation: Correlation,
    pub warnings: Vec<LossWarning>,
}

/// 층류 마찰계수.
pub fn friction_factor_laminar(reynolds: f64) -> f64 {
    64.0 / reynolds
}

/// Blasius 매끈한 관 마찰계수.
pub fn friction_factor_blasius(reynolds: f64) -> f64 {
    0.3164 * reynolds.powf(-0.25)
}

/// Haaland 명시식.
pub fn friction_factor_haaland(reynolds: f64, relative_roughness: f64) -> f64 {
    let term = (relative_roughness / 3.7).powf(1.11) + 6.9 / reynolds;
    let inv_sqrt_f = -1.8 * term.log10();
    1.0 / inv_sqrt_f.powi(2)
}

pub fn classify_regime(reynolds: f64) -> FlowRegime {
    if reynolds < RE_LAMINAR_MAX {
        FlowRegime::Laminar
    } else if reynolds <= RE_TURBULENT_MIN {
        FlowRegime::Transitional
    } else {
        FlowRegime::Turbulent
    }
}

/// Re, 상대조도(ε/D), 선택 방법으로 마찰계수를 구한다.
pub fn friction_factor(
    reynolds: f64,
    relative_roughness: f64,
    method: CorrelationMethod,
) -> LossCalcResult<FrictionFactor> {
    if !reynolds.is_finite() || reynolds <= 0.0 {
        return Err(LossError::InvalidInput {
            what: keys::ERR_REYNOLDS_NONPOSITIVE,
        });
    }
    if !relative_roughness.is_finite() || relative_roughness < 0.0 {
        return Err(LossError::InvalidInput {
            what: keys::ERR_ROUGHNESS_NEGATIVE,
        });
    }

    let regime = classify_regime(reynolds);
    let mut warnings = Vec::new();

    let (value, correlation) = match regime {
        FlowRegime::Laminar => (friction_factor_laminar(reynolds), Correlation::Laminar),
        FlowRegime::Transitional => {
            warnings.push(LossWarning::TransitionalRegime { reynolds });
            let turbulent = match method {
                CorrelationMethod::Blasius => Correlation::Blasius,
                CorrelationMethod::Haaland => Correlation::Haaland,
                CorrelationMethod::Auto if relative_roughness <= SMOOTH_RELATIVE_ROUGHNESS => {
                    Correlation::Blasius
                }
                CorrelationMethod::Auto => Correlation::Haaland,
            };
            let f_turb = turbulent_value(turbulent, RE_TURBULENT_MIN, relative_roughness);
            let w = (reynolds - RE_LAMINAR_MAX) / (RE_TURBULENT_MIN - RE_LAMINAR_MAX);
            let f = (1.0 - w) * friction_factor_laminar(reynolds) + w * f_turb;
            (f, turbulent)
        }
        FlowRegime::Turbulent => {
            let correlation = match method {
                CorrelationMethod::Blasius => Correlation::Blasius,
                CorrelationMethod::Haaland => Correlation::Haaland,
                CorrelationMethod::Auto => {
                    if relative_roughness <= SMOOTH_RELATIVE_ROUGHNESS {
                        if reynolds <= BLASIUS_RE_MAX {
                            Correlation::Blasius
                        } else {
                            warnings.push(LossWarning::BlasiusFallback { reynolds });
                            Correlation::Haaland
                        }
                    } else {
                        Correlation::Haaland
                    }
                }
            };
            check_validity(correlation, reynolds, relative_roughness, &mut warnings);
            (
                turbulent_value(correlation, reynolds, relative_roughness),
                correlation,
            )
        }
    };

    Ok(FrictionFactor {
        value,
        regime,
        correlation,
        warnings,
    })
}

fn turbulent_value(correlation: Correlation, reynolds: f64, relative_roughness: f64) -> f64 {
    match correlation {
        Correlation::Laminar => friction_factor_laminar(reynolds),
        Correlation::Blasius => friction_factor_blasius(reynolds),
        Correlation::Haaland => friction_factor_haaland(reynolds, relative_roughness),
    }
}

fn check_validity(
    correlation: Correlation,
    reynolds: f64,
    relative_roughness: f64,
    warnings: &mut Vec<LossWarning>,
) {
    match correlation {
        Correlation::Laminar => {}
        Correlation::Blasius => {
            if !(RE_TURBULENT_MIN..=BLASIUS_RE_MAX).contains(&reynolds) {
                warnings.push(LossWarning::BlasiusOutOfRange { reynolds });
            }
            if relative_roughness > SMOOTH_RELATIVE_ROUGHNESS {
                warnings.push(LossWarning::BlasiusRoughPipe { relative_roughness });
            }
        }
        Correlation::Haaland => {
            if reynolds > HAALAND_RE_MAX {
                warnings.push(LossWarning::HaalandOutOfRange { reynolds });
            }
            if relative_roughness > HAALAND_RELATIVE_ROUGHNESS_MAX {
                warnings.push(LossWarning::HaalandRoughness { relative_roughness });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_ignores_roughness() {
        let smooth = friction_factor(1000.0, 0.0, CorrelationMethod::Auto).unwrap();
        let rough = friction_factor(1000.0, 0.01, CorrelationMethod::Haaland).unwrap();
        assert_eq!(smooth.value, 64.0 / 1000.0);
        assert_eq!(rough.value, smooth.value);
        assert_eq!(smooth.correlation, Correlation::Laminar);
        assert!(smooth.warnings.is_empty());
    }

    #[test]
    fn auto_picks_blasius_for_smooth_moderate_re() {
        let f = friction_factor(5.0e4, 0.0, CorrelationMethod::Auto).unwrap();
        assert_eq!(f.correlation, Correlation::Blasius);
        assert!(f.warnings.is_empty());
        let expected = 0.316 * 5.0e4_f64.powf(-0.25);
        assert!((f.value - expected).abs() / expected < 0.01);
    }

    #[test]
    fn auto_falls_back_to_haaland_above_blasius_window() {
        let f = friction_factor(2.0e5, 0.0, CorrelationMethod::Auto).unwrap();
        assert_eq!(f.correlation, Correlation::Haaland);
        assert!(f
            .warnings
            .iter()
            .any(|w| matches!(w, LossWarning::BlasiusFallback { .. })));
    }

    #[test]
    fn explicit_blasius_out_of_window_still_returns_value() {
        let f = friction_factor(2.0e5, 0.0, CorrelationMethod::Blasius).unwrap();
        assert_eq!(f.correlation, Correlation::Blasius);
        assert!((f.value - friction_factor_blasius(2.0e5)).abs() < 1e-15);
        assert!(f
            .warnings
            .iter()
            .any(|w| matches!(w, LossWarning::BlasiusOutOfRange { .. })));
    }

    #[test]
    fn transitional_blend_is_continuous_at_edges() {
        let lo = friction_factor(RE_LAMINAR_MAX, 0.0, CorrelationMethod::Blasius).unwrap();
        assert!((lo.value - 64.0 / RE_LAMINAR_MAX).abs() < 1e-12);
        let hi = friction_factor(RE_TURBULENT_MIN, 0.0, CorrelationMethod::Blasius).unwrap();
        assert!((hi.value - friction_factor_blasius(RE_TURBULENT_MIN)).abs() < 1e-12);
        assert_eq!(hi.regime, FlowRegime::Transitional);
        assert!(matches!(
            hi.warnings[0],
            LossWarning::TransitionalRegime { .. }
        ));
    }

    #[test]
    fn haaland_matches_reference_value() {
        // ε/D = 1e-4, Re = 1e5 → f ≈ 0.0183 (Moody 선도와 비교)
        let f = friction_factor_haaland(1.0e5, 1.0e-4);
        assert!((f - 0.0183).abs() < 2e-4, "f = {f}");
    }

    #[test]
    fn zero_reynolds_is_invalid_input() {
        let err = friction_factor(0.0, 0.0, CorrelationMethod::Auto).unwrap_err();
        assert!(matches!(err, LossError::InvalidInput { .. }));
    }

    #[test]
    fn method_parses_from_text() {
        assert_eq!(
            "Haaland".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Haaland
        );
        assert!("colebrook".parse::<CorrelationMethod>().is_err());
    }

    #[test]
    fn blasius_on_a_rough_pipe_is_flagged() {
        let f = friction_factor(5.0e4, 1.0e-3, CorrelationMethod::Blasius).unwrap();
        assert_eq!(f.correlation, Correlation::Blasius);
        assert!((f.value - friction_factor_blasius(5.0e4)).abs() < 1e-15);
        assert!(f
            .warnings
            .iter()
            .any(|w| matches!(w, LossWarning::BlasiusRoughPipe { .. })));
    }

    #[test]
    fn haaland_beyond_reynolds_limit_is_flagged() {
        let f = friction_factor(2.0e8, 1.0e-4, CorrelationMethod::Haaland).unwrap();
        assert!(f.value.is_finite() && f.value > 0.0);
        assert!(f
            .warnings
            .iter()
            .any(|w| matches!(w, LossWarning::HaalandOutOfRange { .. })));
    }

    #[test]
    fn haaland_on_very_rough_pipe_is_flagged() {
        let f = friction_factor(1.0e5, 0.08, CorrelationMethod::Auto).unwrap();
        assert_eq!(f.correlation, Correlation::Haaland);
        assert!((f.value - friction_factor_haaland(1.0e5, 0.08)).abs() < 1e-15);
        assert!(f
            .warnings
            .iter()
            .any(|w| matches!(w, LossWarning::HaalandRoughness { .. })));
    }

    #[test]
    fn auto_handoff_at_blasius_limit_is_a_step() {
        let below = friction_factor(99_980.0, 0.0, CorrelationMethod::Auto).unwrap();
        let above = friction_factor(100_010.0, 0.0, CorrelationMethod::Auto).unwrap();
        assert_eq!(below.correlation, Correlation::Blasius);
        assert_eq!(above.correlation, Correlation::Haaland);
        assert_eq!(below.value, friction_factor_blasius(99_980.0));
        assert_eq!(above.value, friction_factor_haaland(100_010.0, 0.0));
        assert!(above.value > below.value);
    }
}
