//! 단위 문자열 파싱. CLI 플래그와 대화형 입력에서 공통으로 사용한다.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 값과 단위 문자열을 받아 미터로 환산한다. 예: `(50.0, "mm") -> 0.05`
pub fn length_to_meters(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let unit: LengthUnit = unit_str.parse()?;
    let meters = convert_length(value, unit, LengthUnit::Meter);
    debug!(value, unit = unit.symbol(), meters, "length converted");
    Ok(meters)
}

/// 값과 단위 문자열을 받아 m³/s로 환산한다.
pub fn flow_rate_to_m3_per_s(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let unit: FlowRateUnit = unit_str.parse()?;
    let m3_per_s = convert_flow_rate(value, unit, FlowRateUnit::CubicMeterPerSecond);
    debug!(value, unit = unit.symbol(), m3_per_s, "flow rate converted");
    Ok(m3_per_s)
}

/// 동점도를 m²/s로 환산한다. 예: `(1.0, "cSt") -> 1e-6`
pub fn kinematic_viscosity_to_m2_per_s(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let unit: KinematicViscosityUnit = unit_str.parse()?;
    Ok(convert_kinematic_viscosity(
        value,
        unit,
        KinematicViscosityUnit::SquareMeterPerSecond,
    ))
}

/// 점도를 Pa·s로 환산한다.
pub fn dynamic_viscosity_to_pa_s(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let unit: DynamicViscosityUnit = unit_str.parse()?;
    Ok(convert_dynamic_viscosity(
        value,
        unit,
        DynamicViscosityUnit::PascalSecond,
    ))
}

impl FromStr for LengthUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
            "mm" => Ok(LengthUnit::Millimeter),
            "cm" => Ok(LengthUnit::Centimeter),
            "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for FlowRateUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m3/s" | "m³/s" | "cms" => Ok(FlowRateUnit::CubicMeterPerSecond),
            "l/s" | "lps" => Ok(FlowRateUnit::LiterPerSecond),
            "m3/h" | "m³/h" | "cmh" => Ok(FlowRateUnit::CubicMeterPerHour),
            "gpm" | "gal/min" => Ok(FlowRateUnit::GallonPerMinute),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for KinematicViscosityUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m2/s" | "m²/s" => Ok(KinematicViscosityUnit::SquareMeterPerSecond),
            "cst" | "centistokes" => Ok(KinematicViscosityUnit::Centistokes),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for DynamicViscosityUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pa·s" | "pa.s" | "pas" => Ok(DynamicViscosityUnit::PascalSecond),
            "cps" | "cp" => Ok(DynamicViscosityUnit::Centipoise),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}
