use serde::{Deserialize, Serialize};

/// 동점도(kinematic) 단위. 내부 기준은 m²/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KinematicViscosityUnit {
    SquareMeterPerSecond,
    Centistokes,
}

/// 점도(dynamic) 단위. 내부 기준은 Pa·s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicViscosityUnit {
    PascalSecond,
    Centipoise,
}

fn to_m2s(value: f64, unit: KinematicViscosityUnit) -> f64 {
    match unit {
        KinematicViscosityUnit::SquareMeterPerSecond => value,
        KinematicViscosityUnit::Centistokes => value * 1.0e-6,
    }
}

fn from_m2s(value: f64, unit: KinematicViscosityUnit) -> f64 {
    match unit {
        KinematicViscosityUnit::SquareMeterPerSecond => value,
        KinematicViscosityUnit::Centistokes => value / 1.0e-6,
    }
}

fn to_pas(value: f64, unit: DynamicViscosityUnit) -> f64 {
    match unit {
        DynamicViscosityUnit::PascalSecond => value,
        DynamicViscosityUnit::Centipoise => value / 1000.0,
    }
}

fn from_pas(value: f64, unit: DynamicViscosityUnit) -> f64 {
    match unit {
        DynamicViscosityUnit::PascalSecond => value,
        DynamicViscosityUnit::Centipoise => value * 1000.0,
    }
}

/// 동점도를 변환한다.
pub fn convert_kinematic_viscosity(
    value: f64,
    from: KinematicViscosityUnit,
    to: KinematicViscosityUnit,
) -> f64 {
    from_m2s(to_m2s(value, from), to)
}

/// 점도를 변환한다.
pub fn convert_dynamic_viscosity(
    value: f64,
    from: DynamicViscosityUnit,
    to: DynamicViscosityUnit,
) -> f64 {
    from_pas(to_pas(value, from), to)
}

/// 점도[Pa·s]와 밀도[kg/m³]로 동점도[m²/s]를 구한다.
pub fn kinematic_from_dynamic(mu_pa_s: f64, density_kg_per_m3: f64) -> f64 {
    mu_pa_s / density_kg_per_m3
}
