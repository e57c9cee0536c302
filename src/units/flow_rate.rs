use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 m³/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRateUnit {
    CubicMeterPerSecond,
    LiterPerSecond,
    CubicMeterPerHour,
    /// 미국 갤런/분
    GallonPerMinute,
}

const M3_PER_US_GALLON: f64 = 0.003_785_411_784;

fn to_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::LiterPerSecond => value / 1000.0,
        FlowRateUnit::CubicMeterPerHour => value / 3600.0,
        FlowRateUnit::GallonPerMinute => value * M3_PER_US_GALLON / 60.0,
    }
}

fn from_m3_per_s(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::CubicMeterPerSecond => value,
        FlowRateUnit::LiterPerSecond => value * 1000.0,
        FlowRateUnit::CubicMeterPerHour => value * 3600.0,
        FlowRateUnit::GallonPerMinute => value * 60.0 / M3_PER_US_GALLON,
    }
}

/// 체적 유량을 변환한다.
pub fn convert_flow_rate(value: f64, from: FlowRateUnit, to: FlowRateUnit) -> f64 {
    let base = to_m3_per_s(value, from);
    from_m3_per_s(base, to)
}

impl FlowRateUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            FlowRateUnit::CubicMeterPerSecond => "m3/s",
            FlowRateUnit::LiterPerSecond => "L/s",
            FlowRateUnit::CubicMeterPerHour => "m3/h",
            FlowRateUnit::GallonPerMinute => "gpm",
        }
    }
}
