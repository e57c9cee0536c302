use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{LossArgs, MeshArgs};
use crate::config::{self, Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::i18n::{self, keys, Translator};
use crate::losses::{
    compute_head_loss, compute_series, roughness_for, CorrelationMethod, ElbowFitting,
    FlowSegment, FlowSpec, FluidProperties, LossError,
};
use crate::mesh::{recommend, ElbowGeometry, MeshError, MeshLevel};
use crate::report::{self, LossCase};
use crate::ui_cli::{self, LossWizardSettings, PromptError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 엘보 형상/레벨 오류
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// 손실 계산 입력 오류
    #[error(transparent)]
    Loss(#[from] LossError),
    /// 설정 로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// 파일/표준입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON 직렬화 오류
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
    /// 필수 플래그 누락
    #[error("missing arguments: {}", .0.join(", "))]
    MissingArgs(Vec<&'static str>),
}

impl AppError {
    /// 잘못된 입력은 1, 입출력/설정 문제는 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Mesh(_)
            | AppError::Loss(_)
            | AppError::Conversion(_)
            | AppError::MissingArgs(_) => 1,
            AppError::Config(_) | AppError::Io(_) | AppError::Json(_) => 2,
        }
    }

    /// 번역기 언어로 된 오류 메시지.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AppError::Mesh(MeshError::InvalidGeometry { what }) => tr.t(what).to_string(),
            AppError::Mesh(MeshError::InvalidLevel(level)) => {
                tr.tf(keys::ERROR_UNKNOWN_LEVEL, &[("level", level.clone())])
            }
            AppError::Loss(err) => localized_loss_error(err, tr),
            AppError::Conversion(ConversionError::UnknownUnit(unit)) => {
                tr.tf(keys::ERROR_UNKNOWN_UNIT, &[("unit", unit.clone())])
            }
            AppError::Config(err) => tr.tf(keys::ERROR_CONFIG, &[("detail", err.to_string())]),
            AppError::Io(err) => tr.tf(keys::ERROR_IO, &[("detail", err.to_string())]),
            AppError::Json(err) => tr.tf(keys::ERROR_JSON, &[("detail", err.to_string())]),
            AppError::MissingArgs(list) => {
                tr.tf(keys::ERROR_MISSING_ARGS, &[("list", list.join(", "))])
            }
        }
    }
}

/// 손실 계산 오류를 번역한다. 대화형 마법사도 사용한다.
pub fn localized_loss_error(err: &LossError, tr: &Translator) -> String {
    match err {
        LossError::InvalidInput { what } => tr.t(what).to_string(),
        LossError::UnknownMaterial(material) => {
            tr.tf(keys::ERROR_UNKNOWN_MATERIAL, &[("material", material.clone())])
        }
        LossError::UnknownElbow(elbow) => {
            tr.tf(keys::ERROR_UNKNOWN_ELBOW, &[("elbow", elbow.clone())])
        }
        LossError::UnknownMethod(method) => {
            tr.tf(keys::ERROR_UNKNOWN_METHOD, &[("method", method.clone())])
        }
    }
}

/// stderr로 가는 tracing 구독자를 설치한다. 필터는 `RUST_LOG`, 기본 `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// 설정 파일의 언어와 언어팩을 반영한 번역기.
pub fn translator_for(cli_lang: Option<&str>, cfg: &Config) -> Translator {
    let lang = i18n::resolve_language(cli_lang, cfg.language.as_deref());
    debug!(%lang, "language resolved");
    Translator::new_with_pack(lang, cfg.language_pack_dir.as_deref())
}

fn fail(err: &AppError, tr: &Translator) -> ExitCode {
    debug!(error = ?err, "run failed");
    eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized(tr));
    ExitCode::from(err.exit_code())
}

/// 설정을 읽고 번역기를 만든 뒤 `run`을 실행해 종료 코드로 바꾼다.
fn run_with_config<F>(cli_lang: Option<&str>, config_path: Option<&Path>, run: F) -> ExitCode
where
    F: FnOnce(&Config, &Translator) -> Result<(), AppError>,
{
    let cfg = match config::load_or_default(config_path) {
        Ok(cfg) => cfg,
        Err(err) => {
            let tr = Translator::new(i18n::resolve_language(cli_lang, None));
            return fail(&AppError::from(err), &tr);
        }
    };
    let tr = translator_for(cli_lang, &cfg);
    match run(&cfg, &tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err, &tr),
    }
}

/// `elbow_mesh` 진입점.
pub fn mesh_main(args: MeshArgs) -> ExitCode {
    run_with_config(args.lang.as_deref(), args.config.as_deref(), |cfg, tr| {
        run_mesh(&args, cfg, tr, &mut io::stdout().lock())
    })
}

/// `head_loss` 진입점.
pub fn losses_main(args: LossArgs) -> ExitCode {
    run_with_config(args.lang.as_deref(), args.config.as_deref(), |cfg, tr| {
        run_losses(&args, cfg, tr, &mut io::stdout().lock())
    })
}

/// 메쉬 추천을 계산해 `out`에 출력한다. 형상 플래그가 없으면 마법사를 띄운다.
pub fn run_mesh<W: Write>(
    args: &MeshArgs,
    cfg: &Config,
    tr: &Translator,
    out: &mut W,
) -> Result<(), AppError> {
    let default_level: MeshLevel = match args.level.as_deref() {
        Some(name) => name.parse()?,
        None => cfg.mesh.default_level,
    };

    let (geometry, level) = if args.wants_wizard() {
        let mut prompter = ui_cli::stdio_prompter(tr);
        match ui_cli::mesh_wizard(&mut prompter, default_level) {
            Ok(a) => (
                ElbowGeometry::new(
                    a.diameter_m,
                    a.inlet_length_m,
                    a.outlet_length_m,
                    a.bend_radius_m,
                    a.bend_angle_deg,
                )?,
                a.level,
            ),
            Err(PromptError::Io(err)) => return Err(err.into()),
            Err(PromptError::Menu | PromptError::Quit) => {
                writeln!(out, "\n{}", tr.t(keys::GOODBYE))?;
                return Ok(());
            }
        }
    } else {
        match (args.diameter, args.l_in, args.l_out, args.bend_radius, args.theta) {
            (Some(d), Some(l_in), Some(l_out), Some(r), Some(theta)) => (
                ElbowGeometry::new(d, l_in, l_out, r, theta)?,
                default_level,
            ),
            _ => return Err(AppError::MissingArgs(args.missing_geometry())),
        }
    };

    let rec = recommend(&geometry, level);
    if args.json {
        writeln!(out, "{}", report::mesh_json(&rec, tr)?)?;
    } else {
        write!(out, "{}", report::mesh_text(&rec, tr))?;
    }
    Ok(())
}

/// 플래그와 설정에서 유체 물성을 정한다. ν가 μ보다 우선한다.
fn fluid_from(args: &LossArgs, cfg: &Config) -> Result<FluidProperties, ConversionError> {
    let density = args.density.unwrap_or(cfg.losses.density);
    Ok(match (args.nu, args.mu) {
        (Some(nu), _) => FluidProperties {
            density_kg_per_m3: density,
            kinematic_viscosity_m2_per_s: conversion::kinematic_viscosity_to_m2_per_s(
                nu,
                &args.nu_unit,
            )?,
        },
        (None, Some(mu)) => FluidProperties::from_dynamic(
            density,
            conversion::dynamic_viscosity_to_pa_s(mu, &args.mu_unit)?,
        ),
        (None, None) => FluidProperties::from_dynamic(density, cfg.losses.dynamic_viscosity),
    })
}

fn elbow_from(args: &LossArgs) -> Result<Option<ElbowFitting>, LossError> {
    Ok(match (&args.elbow, args.bend_radius, args.bend_angle) {
        (Some(code), _, _) => Some(ElbowFitting::Catalog {
            kind: code.parse()?,
        }),
        (None, Some(bend_radius_m), Some(angle_deg)) => Some(ElbowFitting::Geometry {
            bend_radius_m,
            angle_deg,
        }),
        _ => None,
    })
}

/// 손실수두를 계산해 `out`에 출력한다. 입력 플래그가 없으면 마법사를 띄운다.
pub fn run_losses<W: Write>(
    args: &LossArgs,
    cfg: &Config,
    tr: &Translator,
    out: &mut W,
) -> Result<(), AppError> {
    if args.list_materials {
        write!(out, "{}", report::materials_text(tr))?;
        return Ok(());
    }

    let method: CorrelationMethod = match args.method.as_deref() {
        Some(name) => name.parse()?,
        None => cfg.losses.default_method,
    };
    let fluid = fluid_from(args, cfg)?;
    let gravity = args.gravity.unwrap_or(cfg.losses.gravity);

    if args.wants_wizard() {
        let settings = LossWizardSettings { fluid, gravity };
        let mut prompter = ui_cli::stdio_prompter(tr);
        return match ui_cli::loss_wizard(&mut prompter, &settings) {
            Err(PromptError::Io(err)) => Err(err.into()),
            _ => Ok(()),
        };
    }

    let missing = args.missing_inputs();
    if !missing.is_empty() {
        return Err(AppError::MissingArgs(missing));
    }
    let flow = match (args.flow_rate, args.velocity) {
        (Some(q), _) => FlowSpec::Rate(conversion::flow_rate_to_m3_per_s(q, &args.flow_unit)?),
        (None, Some(v)) => FlowSpec::Velocity(v),
        (None, None) => return Err(AppError::MissingArgs(vec!["--flow-rate | --velocity"])),
    };
    let roughness_m = match (args.roughness, args.material.as_deref()) {
        (Some(mm), _) => mm / 1000.0,
        (None, Some(code)) => roughness_for(code)?,
        (None, None) => roughness_for(&cfg.losses.default_material)?,
    };
    debug!(?flow, roughness_m, ?fluid, gravity, %method, "loss inputs");

    if !args.segment.is_empty() {
        let segments: Vec<FlowSegment> = args
            .segment
            .iter()
            .map(|s| FlowSegment {
                name: s.name.clone().unwrap_or_default(),
                diameter_m: s.diameter_mm / 1000.0,
                length_m: s.length_m,
                flow: Some(flow),
                roughness_m: s.roughness_mm.map_or(roughness_m, |mm| mm / 1000.0),
                fluid,
            })
            .collect();
        let series = compute_series(&segments, method, gravity)?;
        if args.json {
            let json = report::series_json(&segments, &series, method, gravity, tr)?;
            writeln!(out, "{json}")?;
        } else {
            write!(
                out,
                "{}",
                report::series_text(&segments, &series, method, gravity, tr)
            )?;
        }
        return Ok(());
    }

    let (diameter, length_m) = match (args.diameter, args.length) {
        (Some(d), Some(l)) => (d, l),
        _ => return Err(AppError::MissingArgs(args.missing_inputs())),
    };
    let segment = FlowSegment {
        name: String::new(),
        diameter_m: conversion::length_to_meters(diameter, &args.diameter_unit)?,
        length_m,
        flow: Some(flow),
        roughness_m,
        fluid,
    };
    let elbow = elbow_from(args)?;
    let result = compute_head_loss(&segment, elbow.as_ref(), method, gravity)?;
    let case = LossCase {
        segment: &segment,
        elbow: elbow.as_ref(),
        method,
        gravity,
    };
    if args.json {
        writeln!(out, "{}", report::loss_json(&case, &result, tr)?)?;
    } else {
        write!(out, "{}", report::loss_text(&case, &result, tr))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use clap::Parser;

    fn mesh(argv: &[&str]) -> Result<String, AppError> {
        let args = MeshArgs::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        run_mesh(&args, &Config::default(), &Translator::new(Language::En), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn losses(argv: &[&str]) -> Result<String, AppError> {
        let args = LossArgs::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        run_losses(&args, &Config::default(), &Translator::new(Language::En), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn partial_mesh_flags_list_what_is_missing() {
        let err = mesh(&["elbow_mesh", "--d", "0.1", "--theta", "90"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        match err {
            AppError::MissingArgs(list) => assert_eq!(list, vec!["--l-in", "--l-out", "--r"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_diameter_is_invalid_geometry() {
        let err = mesh(&[
            "elbow_mesh", "--d", "0", "--l-in", "1", "--l-out", "1", "--r", "0.1", "--theta", "90",
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Mesh(MeshError::InvalidGeometry { .. })));
        let es = Translator::new(Language::Es);
        assert_eq!(err.localized(&es), "el diámetro debe ser > 0");
    }

    #[test]
    fn unknown_level_is_a_localized_input_error() {
        let err = mesh(&[
            "elbow_mesh", "--d", "0.1", "--l-in", "1", "--l-out", "1", "--r", "0.15", "--theta",
            "90", "--level", "ultra",
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Mesh(MeshError::InvalidLevel(ref s)) if s == "ultra"));
        assert_eq!(err.exit_code(), 1);
        let es = Translator::new(Language::Es);
        assert_eq!(
            err.localized(&es),
            "nivel de malla desconocido 'ultra' (usa coarse, medium o fine)"
        );
    }

    #[test]
    fn mesh_json_is_a_single_object() {
        let out = mesh(&[
            "elbow_mesh", "--d", "0.05", "--l-in", "1", "--l-out", "1", "--r", "0.075",
            "--theta", "90", "--level", "fine", "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["level"], "fine");
        assert!(value["notes"].is_array());
    }

    #[test]
    fn straight_pipe_json_reports_reynolds() {
        let out = losses(&[
            "head_loss", "--diameter", "100", "--length", "10", "--velocity", "2", "--roughness",
            "0", "--nu", "1e-6", "--json",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let re = value["reynolds"].as_f64().unwrap();
        assert!((re - 2.0e5).abs() < 1e-6);
        assert_eq!(value["correlation"], "haaland");
        assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn unknown_material_and_unit_are_input_errors() {
        let err = losses(&[
            "head_loss", "--diameter", "100", "--length", "10", "--velocity", "2", "--material",
            "unobtainium",
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Loss(LossError::UnknownMaterial(_))));
        assert_eq!(err.exit_code(), 1);

        let err = losses(&[
            "head_loss", "--diameter", "100", "--diameter-unit", "furlong", "--length", "10",
            "--velocity", "2",
        ])
        .unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }

    #[test]
    fn centistokes_match_si_viscosity() {
        let si = losses(&[
            "head_loss", "--diameter", "50", "--length", "5", "--velocity", "1", "--nu", "1e-6",
            "--json",
        ])
        .unwrap();
        let cst = losses(&[
            "head_loss", "--diameter", "50", "--length", "5", "--velocity", "1", "--nu", "1",
            "--nu-unit", "cst", "--json",
        ])
        .unwrap();
        let si: serde_json::Value = serde_json::from_str(&si).unwrap();
        let cst: serde_json::Value = serde_json::from_str(&cst).unwrap();
        let (a, b) = (
            si["reynolds"].as_f64().unwrap(),
            cst["reynolds"].as_f64().unwrap(),
        );
        assert!((a - b).abs() / a < 1e-12);
    }

    #[test]
    fn material_list_skips_the_wizard() {
        let out = losses(&["head_loss", "--list-materials"]).unwrap();
        assert!(out.contains("hdpe"));
        assert!(out.contains("Commercial steel"));
    }

    #[test]
    fn bare_json_reports_missing_flags() {
        let err = losses(&["head_loss", "--json"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(err, AppError::MissingArgs(ref list) if list.len() == 3));
    }

    #[test]
    fn series_text_sums_segments() {
        let out = losses(&[
            "head_loss", "--flow-rate", "5", "--segment", "110:25", "--segment", "90:10::riser",
        ])
        .unwrap();
        assert!(out.contains("riser"));
        assert!(out.contains("[Segment 2]"));
    }

    #[test]
    fn config_errors_exit_with_two() {
        let err = AppError::from(
            config::load_or_default(Some(Path::new("no/such/pipeflow.toml")))
                .unwrap_err(),
        );
        assert_eq!(err.exit_code(), 2);
    }
}
