//! 두 실행 파일의 명령행 인자 정의.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

/// 엘보 메쉬 파라미터 추천기 (Salome/NETGEN).
#[derive(Debug, Parser)]
#[command(name = "elbow_mesh", version)]
#[command(
    about = "Recommends NETGEN mesh parameters for a pipe elbow",
    long_about = None
)]
pub struct MeshArgs {
    /// 내경 D [m]
    #[arg(long = "d", value_name = "M")]
    pub diameter: Option<f64>,

    /// 입구 직관 길이 L_in [m]
    #[arg(long, value_name = "M")]
    pub l_in: Option<f64>,

    /// 출구 직관 길이 L_out [m]
    #[arg(long, value_name = "M")]
    pub l_out: Option<f64>,

    /// 엘보 곡률 반경 R [m]
    #[arg(long = "r", value_name = "M")]
    pub bend_radius: Option<f64>,

    /// 엘보 각도 theta [deg]
    #[arg(long, value_name = "DEG")]
    pub theta: Option<f64>,

    /// coarse | medium | fine (c/m/f, 1/2/3)
    #[arg(short, long)]
    pub level: Option<String>,

    /// 결과를 JSON 한 개로 stdout에 출력 (마법사와 함께 쓸 수 없다)
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// 대화형 마법사
    #[arg(short, long)]
    pub interactive: bool,

    /// en | es | auto
    #[arg(long)]
    pub lang: Option<String>,

    /// 설정 파일 경로 (기본: ./pipeflow.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl MeshArgs {
    /// 형상 플래그가 하나도 없으면 마법사로 간다. `--json`이면 마법사 대신 누락 오류.
    pub fn wants_wizard(&self) -> bool {
        self.interactive
            || (!self.json && self.geometry_flags().iter().all(|(_, v)| v.is_none()))
    }

    /// 빠진 형상 플래그 이름.
    pub fn missing_geometry(&self) -> Vec<&'static str> {
        self.geometry_flags()
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    fn geometry_flags(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("--d", self.diameter),
            ("--l-in", self.l_in),
            ("--l-out", self.l_out),
            ("--r", self.bend_radius),
            ("--theta", self.theta),
        ]
    }
}

/// 직렬 구간 하나: `D_MM:L_M[:EPS_MM[:NAME]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentArg {
    pub diameter_mm: f64,
    pub length_m: f64,
    pub roughness_mm: Option<f64>,
    pub name: Option<String>,
}

impl FromStr for SegmentArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, ':');
        let number = |part: Option<&str>, what: &str| -> Result<f64, String> {
            let text = part.ok_or_else(|| format!("missing {what} in '{s}'"))?;
            text.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid {what} '{text}'"))
        };
        let diameter_mm = number(parts.next(), "diameter")?;
        let length_m = number(parts.next(), "length")?;
        let roughness_mm = match parts.next() {
            Some(text) if !text.trim().is_empty() => Some(number(Some(text), "roughness")?),
            _ => None,
        };
        let name = parts
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(Self {
            diameter_mm,
            length_m,
            roughness_mm,
            name,
        })
    }
}

/// 관로 손실수두 계산기 (Darcy-Weisbach).
#[derive(Debug, Parser)]
#[command(name = "head_loss", version)]
#[command(
    about = "Darcy-Weisbach head loss for straight pipes, elbows and runs in series",
    long_about = None
)]
pub struct LossArgs {
    /// 내경
    #[arg(long, value_name = "VALUE")]
    pub diameter: Option<f64>,

    /// 내경 단위 (m, mm, cm, in, ft)
    #[arg(long, default_value = "mm")]
    pub diameter_unit: String,

    /// 직관 길이 [m]
    #[arg(long, value_name = "M")]
    pub length: Option<f64>,

    /// 체적 유량
    #[arg(long, value_name = "VALUE", conflicts_with = "velocity")]
    pub flow_rate: Option<f64>,

    /// 유량 단위 (m3/s, l/s, m3/h, gpm)
    #[arg(long, default_value = "l/s")]
    pub flow_unit: String,

    /// 평균 유속 [m/s]
    #[arg(long, value_name = "M/S")]
    pub velocity: Option<f64>,

    /// 절대조도 [mm]
    #[arg(long, value_name = "MM", conflicts_with = "material")]
    pub roughness: Option<f64>,

    /// 재질 프리셋 (hdpe, pvc, steel, galvanized, cast-iron, concrete, smooth)
    #[arg(long)]
    pub material: Option<String>,

    /// 동점도 ν
    #[arg(long, value_name = "VALUE", conflicts_with = "mu")]
    pub nu: Option<f64>,

    /// 동점도 단위 (m2/s, cst)
    #[arg(long, default_value = "m2/s")]
    pub nu_unit: String,

    /// 점도 μ
    #[arg(long, value_name = "VALUE")]
    pub mu: Option<f64>,

    /// 점도 단위 (pa.s, cp)
    #[arg(long, default_value = "pa.s")]
    pub mu_unit: String,

    /// 밀도 ρ [kg/m³]
    #[arg(long, value_name = "KG/M3")]
    pub density: Option<f64>,

    /// 중력가속도 g [m/s²]
    #[arg(long, value_name = "M/S2")]
    pub gravity: Option<f64>,

    /// 카탈로그 엘보 (90-sr, 90-lr, 45-sr, 45-lr)
    #[arg(long, conflicts_with_all = ["bend_radius", "bend_angle", "segment"])]
    pub elbow: Option<String>,

    /// 자유 형상 엘보의 곡률 반경 [m]
    #[arg(long, value_name = "M", requires = "bend_angle", conflicts_with = "segment")]
    pub bend_radius: Option<f64>,

    /// 자유 형상 엘보의 각도 [deg]
    #[arg(long, value_name = "DEG", requires = "bend_radius")]
    pub bend_angle: Option<f64>,

    /// 직렬 구간 `D_MM:L_M[:EPS_MM[:NAME]]` (반복 가능, 유량은 공통)
    #[arg(long, value_name = "SPEC", conflicts_with_all = ["diameter", "length"])]
    pub segment: Vec<SegmentArg>,

    /// auto | blasius | haaland
    #[arg(long)]
    pub method: Option<String>,

    /// 재질 프리셋 목록을 출력하고 끝낸다
    #[arg(long)]
    pub list_materials: bool,

    /// 결과를 JSON 한 개로 stdout에 출력 (마법사와 함께 쓸 수 없다)
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// 대화형 마법사
    #[arg(short, long)]
    pub interactive: bool,

    /// en | es | auto
    #[arg(long)]
    pub lang: Option<String>,

    /// 설정 파일 경로 (기본: ./pipeflow.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl LossArgs {
    /// 계산 입력 플래그가 하나도 없으면 마법사로 간다.
    pub fn wants_wizard(&self) -> bool {
        self.interactive
            || (!self.json
                && self.diameter.is_none()
                && self.length.is_none()
                && self.flow_rate.is_none()
                && self.velocity.is_none()
                && self.segment.is_empty())
    }

    /// 빠진 필수 플래그 이름.
    pub fn missing_inputs(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.segment.is_empty() {
            if self.diameter.is_none() {
                missing.push("--diameter");
            }
            if self.length.is_none() {
                missing.push("--length");
            }
        }
        if self.flow_rate.is_none() && self.velocity.is_none() {
            missing.push("--flow-rate | --velocity");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_definitions_are_consistent() {
        MeshArgs::command().debug_assert();
        LossArgs::command().debug_assert();
    }

    #[test]
    fn mesh_flags_parse_and_report_missing() {
        let args = MeshArgs::try_parse_from(["elbow_mesh", "--d", "0.1", "--r", "0.15", "-l", "f"])
            .unwrap();
        assert_eq!(args.level.as_deref(), Some("f"));
        assert!(!args.wants_wizard());
        assert_eq!(args.missing_geometry(), vec!["--l-in", "--l-out", "--theta"]);

        let bare = MeshArgs::try_parse_from(["elbow_mesh"]).unwrap();
        assert!(bare.wants_wizard());
    }

    #[test]
    fn level_is_taken_verbatim() {
        let args = MeshArgs::try_parse_from(["elbow_mesh", "--level", "ultra"]).unwrap();
        assert_eq!(args.level.as_deref(), Some("ultra"));
    }

    #[test]
    fn flow_rate_and_velocity_conflict() {
        let res = LossArgs::try_parse_from([
            "head_loss",
            "--diameter",
            "100",
            "--length",
            "10",
            "--flow-rate",
            "5",
            "--velocity",
            "2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn loss_defaults_and_missing_inputs() {
        let args = LossArgs::try_parse_from(["head_loss", "--diameter", "100"]).unwrap();
        assert_eq!(args.diameter_unit, "mm");
        assert_eq!(args.flow_unit, "l/s");
        assert!(!args.wants_wizard());
        assert_eq!(args.missing_inputs(), vec!["--length", "--flow-rate | --velocity"]);
    }

    #[test]
    fn segments_are_repeatable() {
        let args = LossArgs::try_parse_from([
            "head_loss",
            "--velocity",
            "1.5",
            "--segment",
            "110:25",
            "--segment",
            "90:12.5:0.045:riser",
        ])
        .unwrap();
        assert_eq!(args.segment.len(), 2);
        assert_eq!(args.segment[0].roughness_mm, None);
        assert_eq!(args.segment[1].roughness_mm, Some(0.045));
        assert_eq!(args.segment[1].name.as_deref(), Some("riser"));
        assert!(args.missing_inputs().is_empty());
    }

    #[test]
    fn json_never_falls_into_the_wizard() {
        assert!(MeshArgs::try_parse_from(["elbow_mesh", "--json", "-i"]).is_err());
        assert!(LossArgs::try_parse_from(["head_loss", "--json", "--interactive"]).is_err());

        let mesh = MeshArgs::try_parse_from(["elbow_mesh", "--json"]).unwrap();
        assert!(!mesh.wants_wizard());
        assert_eq!(mesh.missing_geometry().len(), 5);

        let loss = LossArgs::try_parse_from(["head_loss", "--json"]).unwrap();
        assert!(!loss.wants_wizard());
        assert_eq!(
            loss.missing_inputs(),
            vec!["--diameter", "--length", "--flow-rate | --velocity"]
        );
    }

    #[test]
    fn malformed_segment_is_rejected() {
        assert!("110".parse::<SegmentArg>().is_err());
        assert!("abc:10".parse::<SegmentArg>().is_err());
    }
}
