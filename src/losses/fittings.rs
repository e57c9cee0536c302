//! 엘보 국부손실계수(K).
//!
//! 표준 엘보 테이블:
//!
//! | 엘보 | R/D | K |
//! |---|---|---|
//! | 90° SR | ≈1.0 | 0.75 |
//! | 90° LR | ≈1.5 | 0.25 |
//! | 45° SR | ≈1.0 | 0.35 |
//! | 45° LR | ≈1.5 | 0.20 |
//!
//! 임의 형상(R, 각도)은 이 테이블을 R/D와 각도에 대해 이중 선형 보간한다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::correlations::LossWarning;
use super::error::LossError;
use crate::i18n::keys;

const SHORT_RADIUS_RATIO: f64 = 1.0;
const LONG_RADIUS_RATIO: f64 = 1.5;

/// 카탈로그 엘보 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElbowKind {
    #[serde(rename = "90-sr")]
    Deg90Short,
    #[serde(rename = "90-lr")]
    Deg90Long,
    #[serde(rename = "45-sr")]
    Deg45Short,
    #[serde(rename = "45-lr")]
    Deg45Long,
}

impl ElbowKind {
    pub const ALL: [ElbowKind; 4] = [
        ElbowKind::Deg90Short,
        ElbowKind::Deg90Long,
        ElbowKind::Deg45Short,
        ElbowKind::Deg45Long,
    ];

    pub fn k(&self) -> f64 {
        match self {
            ElbowKind::Deg90Short => 0.75,
            ElbowKind::Deg90Long => 0.25,
            ElbowKind::Deg45Short => 0.35,
            ElbowKind::Deg45Long => 0.20,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ElbowKind::Deg90Short => "90-sr",
            ElbowKind::Deg90Long => "90-lr",
            ElbowKind::Deg45Short => "45-sr",
            ElbowKind::Deg45Long => "45-lr",
        }
    }

    pub fn angle_deg(&self) -> f64 {
        match self {
            ElbowKind::Deg90Short | ElbowKind::Deg90Long => 90.0,
            ElbowKind::Deg45Short | ElbowKind::Deg45Long => 45.0,
        }
    }

    /// 공칭 R/D
    pub fn radius_ratio(&self) -> f64 {
        match self {
            ElbowKind::Deg90Short | ElbowKind::Deg45Short => SHORT_RADIUS_RATIO,
            ElbowKind::Deg90Long | ElbowKind::Deg45Long => LONG_RADIUS_RATIO,
        }
    }

    /// 번역 키
    pub fn label_key(&self) -> &'static str {
        match self {
            ElbowKind::Deg90Short => keys::ELBOW_90_SR,
            ElbowKind::Deg90Long => keys::ELBOW_90_LR,
            ElbowKind::Deg45Short => keys::ELBOW_45_SR,
            ElbowKind::Deg45Long => keys::ELBOW_45_LR,
        }
    }
}

impl fmt::Display for ElbowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ElbowKind {
    type Err = LossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .to_lowercase()
            .trim_start_matches("elbow")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match norm.as_str() {
            "90sr" => Ok(ElbowKind::Deg90Short),
            "90lr" => Ok(ElbowKind::Deg90Long),
            "45sr" => Ok(ElbowKind::Deg45Short),
            "45lr" => Ok(ElbowKind::Deg45Long),
            _ => Err(LossError::UnknownElbow(s.to_string())),
        }
    }
}

/// 직관에 붙는 단일 엘보.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElbowFitting {
    Catalog { kind: ElbowKind },
    Geometry { bend_radius_m: f64, angle_deg: f64 },
}

/// 적용할 K 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElbowLoss {
    pub k: f64,
    pub warning: Option<LossWarning>,
}

impl ElbowFitting {
    /// 관 내경을 받아 K를 결정한다.
    pub fn loss_coefficient(&self, diameter_m: f64) -> Result<ElbowLoss, LossError> {
        match *self {
            ElbowFitting::Catalog { kind } => Ok(ElbowLoss {
                k: kind.k(),
                warning: None,
            }),
            ElbowFitting::Geometry {
                bend_radius_m,
                angle_deg,
            } => {
                if !bend_radius_m.is_finite() || bend_radius_m <= 0.0 {
                    return Err(LossError::InvalidInput {
                        what: keys::ERR_BEND_RADIUS_NONPOSITIVE,
                    });
                }
                if !angle_deg.is_finite() || angle_deg <= 0.0 || angle_deg > 180.0 {
                    return Err(LossError::InvalidInput {
                        what: keys::ERR_BEND_ANGLE_RANGE,
                    });
                }
                Ok(estimate_k(bend_radius_m / diameter_m, angle_deg))
            }
        }
    }
}

/// R/D와 각도로 K를 보간한다. R/D가 테이블 밖이면 경계값으로 클램프하고 권고를 남긴다.
pub fn estimate_k(radius_ratio: f64, angle_deg: f64) -> ElbowLoss {
    let warning = if !(SHORT_RADIUS_RATIO..=LONG_RADIUS_RATIO).contains(&radius_ratio) {
        Some(LossWarning::ElbowTableExtrapolated { radius_ratio })
    } else {
        None
    };
    let rd = radius_ratio.clamp(SHORT_RADIUS_RATIO, LONG_RADIUS_RATIO);
    let t = (rd - SHORT_RADIUS_RATIO) / (LONG_RADIUS_RATIO - SHORT_RADIUS_RATIO);
    let k45 = lerp(ElbowKind::Deg45Short.k(), ElbowKind::Deg45Long.k(), t);
    let k90 = lerp(ElbowKind::Deg90Short.k(), ElbowKind::Deg90Long.k(), t);

    let k = if angle_deg <= 45.0 {
        k45 * angle_deg / 45.0
    } else if angle_deg <= 90.0 {
        lerp(k45, k90, (angle_deg - 45.0) / 45.0)
    } else {
        k90 * angle_deg / 90.0
    };
    ElbowLoss { k, warning }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_corners_reproduce_catalog() {
        for kind in ElbowKind::ALL {
            let est = estimate_k(kind.radius_ratio(), kind.angle_deg());
            assert!((est.k - kind.k()).abs() < 1e-12, "{kind}");
            assert!(est.warning.is_none());
        }
    }

    #[test]
    fn mid_radius_quarter_bend_is_between_sr_and_lr() {
        let est = estimate_k(1.25, 90.0);
        assert!((est.k - 0.5).abs() < 1e-12);
    }

    #[test]
    fn tight_radius_is_clamped_with_warning() {
        let est = estimate_k(0.8, 90.0);
        assert!((est.k - 0.75).abs() < 1e-12);
        assert!(matches!(
            est.warning,
            Some(LossWarning::ElbowTableExtrapolated { .. })
        ));
    }

    #[test]
    fn parses_legacy_and_short_codes() {
        assert_eq!("elbow_90_SR".parse::<ElbowKind>().unwrap(), ElbowKind::Deg90Short);
        assert_eq!("45-lr".parse::<ElbowKind>().unwrap(), ElbowKind::Deg45Long);
        assert!("60-sr".parse::<ElbowKind>().is_err());
    }

    #[test]
    fn geometry_rejects_zero_radius() {
        let fitting = ElbowFitting::Geometry {
            bend_radius_m: 0.0,
            angle_deg: 90.0,
        };
        assert!(fitting.loss_coefficient(0.1).is_err());
    }
}
