use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;
use tracing::{debug, warn};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const GOODBYE: &str = "general.goodbye";
    pub const BACK_TO_MENU: &str = "general.back_to_menu";
    pub const ENTER_DEFAULT: &str = "general.enter_default";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_VALUE_GT: &str = "error.value_gt";
    pub const ERROR_VALUE_GE: &str = "error.value_ge";
    pub const ERROR_MISSING_ARGS: &str = "error.missing_args";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";
    pub const ERROR_UNKNOWN_LEVEL: &str = "error.unknown_level";
    pub const ERROR_UNKNOWN_MATERIAL: &str = "error.unknown_material";
    pub const ERROR_UNKNOWN_ELBOW: &str = "error.unknown_elbow";
    pub const ERROR_UNKNOWN_METHOD: &str = "error.unknown_method";
    pub const ERROR_CONFIG: &str = "error.config";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_JSON: &str = "error.json";

    // 입력 검증 (MeshError/LossError의 `what`)
    pub const ERR_NOT_FINITE: &str = "validation.not_finite";
    pub const ERR_DIAMETER_NONPOSITIVE: &str = "validation.diameter_nonpositive";
    pub const ERR_INLET_LENGTH_NONPOSITIVE: &str = "validation.inlet_length_nonpositive";
    pub const ERR_OUTLET_LENGTH_NONPOSITIVE: &str = "validation.outlet_length_nonpositive";
    pub const ERR_BEND_RADIUS_NONPOSITIVE: &str = "validation.bend_radius_nonpositive";
    pub const ERR_BEND_ANGLE_RANGE: &str = "validation.bend_angle_range";
    pub const ERR_LENGTH_NEGATIVE: &str = "validation.length_negative";
    pub const ERR_ROUGHNESS_NEGATIVE: &str = "validation.roughness_negative";
    pub const ERR_FLOW_MISSING: &str = "validation.flow_missing";
    pub const ERR_FLOW_NONPOSITIVE: &str = "validation.flow_nonpositive";
    pub const ERR_VISCOSITY_NONPOSITIVE: &str = "validation.viscosity_nonpositive";
    pub const ERR_DENSITY_NONPOSITIVE: &str = "validation.density_nonpositive";
    pub const ERR_GRAVITY_NONPOSITIVE: &str = "validation.gravity_nonpositive";
    pub const ERR_REYNOLDS_NONPOSITIVE: &str = "validation.reynolds_nonpositive";
    pub const ERR_NO_SEGMENTS: &str = "validation.no_segments";

    pub const ELBOW_90_SR: &str = "elbow.90_sr";
    pub const ELBOW_90_LR: &str = "elbow.90_lr";
    pub const ELBOW_45_SR: &str = "elbow.45_sr";
    pub const ELBOW_45_LR: &str = "elbow.45_lr";

    // 메쉬 결과
    pub const MESH_TITLE: &str = "mesh.title";
    pub const MESH_INPUT_HEADING: &str = "mesh.input_heading";
    pub const MESH_LEVEL: &str = "mesh.level";
    pub const MESH_GLOBAL_HEADING: &str = "mesh.global_heading";
    pub const MESH_ALGORITHMS_HEADING: &str = "mesh.algorithms_heading";
    pub const MESH_MAIN_3D: &str = "mesh.main_3d";
    pub const MESH_MAIN_3D_HINT: &str = "mesh.main_3d_hint";
    pub const MESH_ALTERNATIVE: &str = "mesh.alternative";
    pub const MESH_ARGUMENTS_HEADING: &str = "mesh.arguments_heading";
    pub const MESH_RECOMMENDED: &str = "mesh.recommended";
    pub const MESH_LOCAL_SIZES_HEADING: &str = "mesh.local_sizes_heading";
    pub const MESH_BASE_SIZES: &str = "mesh.base_sizes";
    pub const MESH_APPLY_LOCAL: &str = "mesh.apply_local";
    pub const MESH_ELBOW_FACES: &str = "mesh.elbow_faces";
    pub const MESH_STRAIGHT_FACES: &str = "mesh.straight_faces";
    pub const MESH_SEGMENTS_HEADING: &str = "mesh.segments_heading";
    pub const MESH_SEG_INLET: &str = "mesh.seg_inlet";
    pub const MESH_SEG_OUTLET: &str = "mesh.seg_outlet";
    pub const MESH_SEG_ARC: &str = "mesh.seg_arc";
    pub const MESH_SEG_COMPUTED: &str = "mesh.seg_computed";
    pub const MESH_SEG_USED: &str = "mesh.seg_used";
    pub const MESH_VISCOUS_HEADING: &str = "mesh.viscous_heading";
    pub const NOTES_HEADING: &str = "mesh.notes_heading";
    pub const NOTE_INLET_CLAMPED: &str = "note.inlet_clamped";
    pub const NOTE_OUTLET_CLAMPED: &str = "note.outlet_clamped";
    pub const NOTE_TIGHT_ELBOW: &str = "note.tight_elbow";
    pub const NOTE_CURVATURE: &str = "note.curvature";
    pub const NOTE_CHECKMESH: &str = "note.checkmesh";

    // 메쉬 마법사
    pub const MESH_WIZARD_TITLE: &str = "mesh_wizard.title";
    pub const MESH_WIZARD_INTRO: &str = "mesh_wizard.intro";
    pub const MESH_WIZARD_DIAMETER_HINT: &str = "mesh_wizard.diameter_hint";
    pub const MESH_WIZARD_LENGTH_HINT: &str = "mesh_wizard.length_hint";
    pub const MESH_WIZARD_RADIUS_HINT: &str = "mesh_wizard.radius_hint";
    pub const MESH_WIZARD_ANGLE_HINT: &str = "mesh_wizard.angle_hint";
    pub const PROMPT_D: &str = "prompt.d";
    pub const PROMPT_L_IN: &str = "prompt.l_in";
    pub const PROMPT_L_OUT: &str = "prompt.l_out";
    pub const PROMPT_R: &str = "prompt.r";
    pub const PROMPT_THETA: &str = "prompt.theta";
    pub const LEVEL_MENU: &str = "mesh_wizard.level_menu";
    pub const PROMPT_LEVEL: &str = "prompt.level";

    // 손실 계산 결과
    pub const LOSS_TITLE: &str = "loss.title";
    pub const MATERIALS_HEADING: &str = "loss.materials_heading";
    pub const LOSS_RESULTS_STRAIGHT: &str = "loss.results_straight";
    pub const LOSS_RESULTS_ELBOW: &str = "loss.results_elbow";
    pub const LOSS_RESULTS_SERIES: &str = "loss.results_series";
    pub const LABEL_SEGMENT: &str = "label.segment";
    pub const LABEL_UNNAMED: &str = "label.unnamed";
    pub const LABEL_FLOW: &str = "label.flow";
    pub const LABEL_METHOD: &str = "label.method";
    pub const LABEL_FLUID: &str = "label.fluid";
    pub const LABEL_GRAVITY: &str = "label.gravity";
    pub const LABEL_DIAMETER: &str = "label.diameter";
    pub const LABEL_LENGTH: &str = "label.length";
    pub const LABEL_ROUGHNESS: &str = "label.roughness";
    pub const LABEL_AREA: &str = "label.area";
    pub const LABEL_VELOCITY: &str = "label.velocity";
    pub const LABEL_REYNOLDS: &str = "label.reynolds";
    pub const LABEL_REGIME: &str = "label.regime";
    pub const LABEL_FRICTION_FACTOR: &str = "label.friction_factor";
    pub const LABEL_HF_FRICTION: &str = "label.hf_friction";
    pub const LABEL_ELBOW_K: &str = "label.elbow_k";
    pub const LABEL_H_LOCAL: &str = "label.h_local";
    pub const LABEL_H_TOTAL: &str = "label.h_total";
    pub const LABEL_DP: &str = "label.dp";
    pub const REGIME_LAMINAR: &str = "regime.laminar";
    pub const REGIME_TRANSITIONAL: &str = "regime.transitional";
    pub const REGIME_TURBULENT: &str = "regime.turbulent";
    pub const WARNINGS_HEADING: &str = "warning.heading";
    pub const WARN_TRANSITIONAL: &str = "warning.transitional";
    pub const WARN_BLASIUS_RANGE: &str = "warning.blasius_range";
    pub const WARN_BLASIUS_ROUGH: &str = "warning.blasius_rough";
    pub const WARN_BLASIUS_FALLBACK: &str = "warning.blasius_fallback";
    pub const WARN_HAALAND_RANGE: &str = "warning.haaland_range";
    pub const WARN_HAALAND_ROUGHNESS: &str = "warning.haaland_roughness";
    pub const WARN_ELBOW_EXTRAPOLATED: &str = "warning.elbow_extrapolated";

    // 손실 계산 마법사
    pub const LOSS_ESCAPE_HINT: &str = "loss_wizard.escape_hint";
    pub const LOSS_MENU: &str = "loss_wizard.menu";
    pub const PROMPT_OPTION: &str = "prompt.option";
    pub const LOSS_FLOW_HEADING: &str = "loss_wizard.flow_heading";
    pub const PROMPT_REF_DIAMETER: &str = "prompt.ref_diameter";
    pub const PROMPT_REF_VELOCITY: &str = "prompt.ref_velocity";
    pub const FLOW_EQUIVALENT: &str = "loss_wizard.flow_equivalent";
    pub const RE_ESTIMATE: &str = "loss_wizard.re_estimate";
    pub const METHOD_MENU: &str = "loss_wizard.method_menu";
    pub const METHOD_SUGGEST_BLASIUS: &str = "loss_wizard.suggest_blasius";
    pub const METHOD_SUGGEST_HAALAND: &str = "loss_wizard.suggest_haaland";
    pub const PROMPT_METHOD: &str = "prompt.method";
    pub const SEGMENT_HEADING: &str = "loss_wizard.segment_heading";
    pub const PROMPT_SEGMENT_NAME: &str = "prompt.segment_name";
    pub const PROMPT_SEGMENT_DIAMETER: &str = "prompt.segment_diameter";
    pub const PROMPT_SEGMENT_LENGTH: &str = "prompt.segment_length";
    pub const PROMPT_SEGMENT_COUNT: &str = "prompt.segment_count";
    pub const ROUGHNESS_MENU: &str = "loss_wizard.roughness_menu";
    pub const PROMPT_ROUGHNESS_MM: &str = "prompt.roughness_mm";
    pub const PROMPT_L1: &str = "prompt.l1";
    pub const PROMPT_L2: &str = "prompt.l2";
    pub const ELBOW_MENU: &str = "loss_wizard.elbow_menu";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    /// 언어 코드를 해석한다. `en-US`, `es_CL.UTF-8` 같은 로케일 문자열도 받는다.
    pub fn from_code(code: &str) -> Option<Self> {
        let base = code
            .trim()
            .split(['.', '_', '-'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match base.as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    pub fn new(lang: Language) -> Self {
        Self {
            lang,
            overrides: None,
        }
    }

    /// 언어 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang: Language, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang));
        Self { lang, overrides }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 언어팩에서만 키를 찾는다.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 표 → 영어 → 키 자체 순으로 폴백한다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::En => en(key),
            Language::Es => es(key).or_else(|| en(key)),
        };
        builtin.unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn tf(&self, key: &str, args: &[(&str, String)]) -> String {
        fill(self.t(key), args)
    }
}

/// 오류 `Display` 구현용 영어 문자열.
pub fn english(key: &'static str) -> &'static str {
    en(key).unwrap_or(key)
}

fn fill(template: &str, args: &[(&str, String)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// CLI 플래그/설정/시스템 순으로 언어를 결정한다. 모두 실패하면 영어.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> Language {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_default()
}

fn normalize_lang(code: &str) -> Option<Language> {
    match code.trim().to_lowercase().as_str() {
        "auto" | "" => None,
        other => Language::from_code(other),
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<Language> {
    if let Some(lang) = get_locale().as_deref().and_then(Language::from_code) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| Language::from_code(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &Path, lang: Language) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{}.toml", lang.as_code()));
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), %err, "no locale pack");
            return None;
        }
    };
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        warn!(path = %path.display(), "locale pack is empty or not valid TOML; using built-in strings");
    }
    map
}

pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        GOODBYE => "Exiting... goodbye!",
        BACK_TO_MENU => "Back to the main menu...",
        ENTER_DEFAULT => "[ENTER = {default}]",
        INVALID_SELECTION_RETRY => "  Invalid option, please try again.",
        ERROR_INVALID_NUMBER => "  Invalid input, please enter a number.",
        ERROR_VALUE_GT => "  Value must be > {min}. Try again.",
        ERROR_VALUE_GE => "  Value must be ≥ {min}. Try again.",
        ERROR_MISSING_ARGS => "Missing arguments: {list}. Use --interactive for the guided wizard.",
        ERROR_UNKNOWN_UNIT => "unknown unit '{unit}'",
        ERROR_UNKNOWN_LEVEL => "unknown mesh level '{level}' (use coarse, medium or fine)",
        ERROR_UNKNOWN_MATERIAL => "unknown pipe material '{material}'",
        ERROR_UNKNOWN_ELBOW => "unknown elbow type '{elbow}' (use 90-sr, 90-lr, 45-sr or 45-lr)",
        ERROR_UNKNOWN_METHOD => "unknown correlation method '{method}' (use auto, blasius or haaland)",
        ERROR_CONFIG => "configuration error: {detail}",
        ERROR_IO => "I/O error: {detail}",
        ERROR_JSON => "JSON output error: {detail}",

        ERR_NOT_FINITE => "all values must be finite numbers",
        ERR_DIAMETER_NONPOSITIVE => "diameter must be > 0",
        ERR_INLET_LENGTH_NONPOSITIVE => "inlet length L_in must be > 0",
        ERR_OUTLET_LENGTH_NONPOSITIVE => "outlet length L_out must be > 0",
        ERR_BEND_RADIUS_NONPOSITIVE => "bend radius R must be > 0",
        ERR_BEND_ANGLE_RANGE => "bend angle theta must be in (0, 180] degrees",
        ERR_LENGTH_NEGATIVE => "pipe length must be ≥ 0",
        ERR_ROUGHNESS_NEGATIVE => "roughness must be ≥ 0",
        ERR_FLOW_MISSING => "either a flow rate or a velocity is required",
        ERR_FLOW_NONPOSITIVE => "flow rate / velocity must be > 0",
        ERR_VISCOSITY_NONPOSITIVE => "viscosity must be > 0",
        ERR_DENSITY_NONPOSITIVE => "density must be > 0",
        ERR_GRAVITY_NONPOSITIVE => "gravity must be > 0",
        ERR_REYNOLDS_NONPOSITIVE => "Reynolds number must be > 0",
        ERR_NO_SEGMENTS => "at least one pipe segment is required",

        ELBOW_90_SR => "90° SR elbow (≈1D, standard)",
        ELBOW_90_LR => "90° LR elbow (≈1.5D, long radius)",
        ELBOW_45_SR => "45° SR elbow (≈1D, standard)",
        ELBOW_45_LR => "45° LR elbow (≈1.5D, long radius)",

        MESH_TITLE => " Mesh parameter calculator for Salome/NETGEN",
        MESH_INPUT_HEADING => "Geometry input:",
        MESH_LEVEL => "level",
        MESH_GLOBAL_HEADING => "NETGEN 3D Parameters (global):",
        MESH_ALGORITHMS_HEADING => "Recommended algorithms in Salome:",
        MESH_MAIN_3D => "Main 3D algorithm",
        MESH_MAIN_3D_HINT => "(1D, 2D and 3D in the same NETGEN: convenient for the elbow)",
        MESH_ALTERNATIVE => "Alternative (if you prefer to split the stages):",
        MESH_ARGUMENTS_HEADING => "In the NETGEN 'Arguments' tab:",
        MESH_RECOMMENDED => "recommended",
        MESH_LOCAL_SIZES_HEADING => "Suggested Local Sizes:",
        MESH_BASE_SIZES => "Base sizes:",
        MESH_APPLY_LOCAL => "To apply in Salome ('Local Sizes' tab):",
        MESH_ELBOW_FACES => "* On the elbow face group (e.g. 'elbow_wall'):",
        MESH_STRAIGHT_FACES => "* (Optional) On the straight runs:",
        MESH_SEGMENTS_HEADING => "1D hypothesis (Number of Segments):",
        MESH_SEG_INLET => "Inlet (N_in):",
        MESH_SEG_OUTLET => "Outlet (N_out):",
        MESH_SEG_ARC => "Elbow arc (N_arc):",
        MESH_SEG_COMPUTED => "computed",
        MESH_SEG_USED => "used",
        MESH_VISCOUS_HEADING => "Viscous Layers (for the 'Viscous Layers' hypothesis in NETGEN 3D):",
        NOTES_HEADING => "Notes:",
        NOTE_INLET_CLAMPED => "computed N_in = {computed} > N_in_max = {max}. Limited to {max}.",
        NOTE_OUTLET_CLAMPED => "computed N_out = {computed} > N_out_max = {max}. Limited to {max}.",
        NOTE_TIGHT_ELBOW => "Elbow with R/D = {ratio} < 1.2 and theta = {angle}°. Minimum arc segments raised to {arc_min}.",
        NOTE_CURVATURE => "Remember: Nb. Segs per Edge and Nb. Segs per Radius only matter if 'Limit Size by Surface Curvature' is enabled in the NETGEN hypothesis.",
        NOTE_CHECKMESH => "Check the mesh quality in OpenFOAM (checkMesh): nonOrthogonality, skewness, aspect ratio, etc.",

        MESH_WIZARD_TITLE => " Mesh setup wizard for Salome/NETGEN",
        MESH_WIZARD_INTRO => "I will ask for the elbow geometry:\n  - D: pipe inner diameter [m]\n  - L_in: straight INLET length [m]\n  - L_out: straight OUTLET length [m]\n  - R: elbow bend radius [m]\n  - theta: bend angle [degrees] (e.g. 45, 90)\n  - mesh level: coarse / medium / fine",
        MESH_WIZARD_DIAMETER_HINT => "First, the inner diameter D.\nExamples:\n  - 0.05  → 5 cm\n  - 0.10  → 10 cm\n  - 0.25  → 25 cm",
        MESH_WIZARD_LENGTH_HINT => "Now the straight INLET and OUTLET lengths.\nAbout 20·D upstream and 20·D downstream is typical.\nWith D = {d} m, 20·D ≈ {l} m.",
        MESH_WIZARD_RADIUS_HINT => "Bend radius R:\n  - Short-radius elbow (SR) ≈ 1·D\n  - Long-radius elbow (LR) ≈ 1.5·D\nWith D = {d} m, 1.5·D ≈ {r} m.",
        MESH_WIZARD_ANGLE_HINT => "Bend angle theta:\n  - 45  → 45° elbow\n  - 90  → 90° elbow (typical)",
        PROMPT_D => "Inner diameter D [m] (must be > 0)",
        PROMPT_L_IN => "Straight INLET length L_in [m]",
        PROMPT_L_OUT => "Straight OUTLET length L_out [m]",
        PROMPT_R => "Bend radius R [m]",
        PROMPT_THETA => "Bend angle theta [degrees]",
        LEVEL_MENU => "Mesh level (resolution control):\n  1) coarse  - coarser mesh, fewer cells (fast, less detail)\n  2) medium  - recommended compromise (good first simulation)\n  3) fine    - finer mesh, more cells (more accurate, slower)",
        PROMPT_LEVEL => "Choose level [1/2/3 or coarse/medium/fine]",

        LOSS_TITLE => "  Friction loss calculator\n  (Darcy-Weisbach, Blasius / Haaland)",
        MATERIALS_HEADING => "Roughness presets (--material):",
        LOSS_RESULTS_STRAIGHT => "===== RESULTS: STRAIGHT PIPE =====",
        LOSS_RESULTS_ELBOW => "===== RESULTS: PIPE WITH ELBOW =====",
        LOSS_RESULTS_SERIES => "===== RESULTS: SEGMENTS IN SERIES =====",
        LABEL_SEGMENT => "Segment",
        LABEL_UNNAMED => "(unnamed)",
        LABEL_FLOW => "Flow rate",
        LABEL_METHOD => "Correlation",
        LABEL_FLUID => "Fluid",
        LABEL_GRAVITY => "Gravity g",
        LABEL_DIAMETER => "Diameter",
        LABEL_LENGTH => "Length",
        LABEL_ROUGHNESS => "Roughness",
        LABEL_AREA => "Inner area A",
        LABEL_VELOCITY => "Mean velocity v",
        LABEL_REYNOLDS => "Reynolds Re",
        LABEL_REGIME => "Flow regime",
        LABEL_FRICTION_FACTOR => "f (Darcy-Weisbach)",
        LABEL_HF_FRICTION => "hf friction",
        LABEL_ELBOW_K => "Elbow K",
        LABEL_H_LOCAL => "hf elbow",
        LABEL_H_TOTAL => "hf total",
        LABEL_DP => "ΔP total",
        REGIME_LAMINAR => "laminar",
        REGIME_TRANSITIONAL => "transitional",
        REGIME_TURBULENT => "turbulent",
        WARNINGS_HEADING => "Warnings:",
        WARN_TRANSITIONAL => "Re = {re} is in the transitional range (2300-4000); f is interpolated and uncertain.",
        WARN_BLASIUS_RANGE => "Re = {re} is outside the Blasius range (4e3-1e5).",
        WARN_BLASIUS_ROUGH => "Blasius assumes a smooth pipe but ε/D = {rr}.",
        WARN_BLASIUS_FALLBACK => "Re = {re} exceeds the Blasius range (1e5); Haaland was used instead.",
        WARN_HAALAND_RANGE => "Re = {re} is above the Haaland range (1e8).",
        WARN_HAALAND_ROUGHNESS => "ε/D = {rr} is above the Haaland range (0.05).",
        WARN_ELBOW_EXTRAPOLATED => "R/D = {ratio} is outside the elbow K table (1.0-1.5); the nearest table value was used.",

        LOSS_ESCAPE_HINT => "  At any prompt:\n    - 'm' or 'menu'          -> back to main menu\n    - 'q', 'quit', 'exit'    -> quit",
        LOSS_MENU => "What do you want to compute?\n  1) Straight pipe without elbows\n  2) Straight pipe with one elbow\n  3) Several segments in series\n  4) Exit",
        PROMPT_OPTION => "Option: ",
        LOSS_FLOW_HEADING => "Main hydraulic data (defines the flow rate):",
        PROMPT_REF_DIAMETER => "Reference inner diameter [mm]: ",
        PROMPT_REF_VELOCITY => "Reference mean velocity [m/s]: ",
        FLOW_EQUIVALENT => "  Inner area A = {area} m²\n  => Equivalent flow rate Q = {q} m³/s  ({lps} L/s)",
        RE_ESTIMATE => "Estimated Re with D_ref and v_ref: Re = {re} ({regime})",
        METHOD_MENU => "Select the turbulent-flow correlation:\n  1) Blasius\n  2) Haaland",
        METHOD_SUGGEST_BLASIUS => "Suggestion: Blasius (smooth pipe, classic validity range).",
        METHOD_SUGGEST_HAALAND => "Suggestion: Haaland (more general, with or without roughness).",
        PROMPT_METHOD => "Option [1/2, default {default}]: ",
        SEGMENT_HEADING => "=== Segment {n} data ===",
        PROMPT_SEGMENT_NAME => "Segment name (optional): ",
        PROMPT_SEGMENT_DIAMETER => "Inner diameter [mm] (ENTER to use {d} mm): ",
        PROMPT_SEGMENT_LENGTH => "Segment length [m]: ",
        PROMPT_SEGMENT_COUNT => "Number of segments: ",
        ROUGHNESS_MENU => "Pipe roughness:\n  1) Typical HDPE (ε = {eps} m)\n  2) Enter absolute roughness manually [mm]\n  3) Roughness = 0 (perfectly smooth pipe)",
        PROMPT_ROUGHNESS_MM => "Absolute roughness [mm]: ",
        PROMPT_L1 => "Length L1 before the elbow [m]: ",
        PROMPT_L2 => "Length L2 after the elbow [m]: ",
        ELBOW_MENU => "Select the elbow type:\n  1) 90° SR elbow (≈1D)\n  2) 90° LR elbow (≈1.5D)\n  3) 45° SR elbow (≈1D)\n  4) 45° LR elbow (≈1.5D)",
        _ => return None,
    })
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        GOODBYE => "Saliendo... ¡hasta luego!",
        BACK_TO_MENU => "Volviendo al menú principal...",
        ENTER_DEFAULT => "[ENTER = {default}]",
        INVALID_SELECTION_RETRY => "  Opción no válida, intente nuevamente.",
        ERROR_INVALID_NUMBER => "  Entrada no válida, por favor ingrese un número.",
        ERROR_VALUE_GT => "  El valor debe ser > {min}. Intente nuevamente.",
        ERROR_VALUE_GE => "  El valor debe ser ≥ {min}. Intente nuevamente.",
        ERROR_MISSING_ARGS => "Faltan argumentos: {list}. Usa --interactive para modo asistente.",
        ERROR_UNKNOWN_UNIT => "unidad desconocida '{unit}'",
        ERROR_UNKNOWN_LEVEL => "nivel de malla desconocido '{level}' (usa coarse, medium o fine)",
        ERROR_UNKNOWN_MATERIAL => "material de tubería desconocido '{material}'",
        ERROR_UNKNOWN_ELBOW => "tipo de codo desconocido '{elbow}' (usa 90-sr, 90-lr, 45-sr o 45-lr)",
        ERROR_UNKNOWN_METHOD => "método de correlación desconocido '{method}' (usa auto, blasius o haaland)",
        ERROR_CONFIG => "error de configuración: {detail}",
        ERROR_IO => "error de entrada/salida: {detail}",
        ERROR_JSON => "error al generar JSON: {detail}",

        ERR_NOT_FINITE => "todos los valores deben ser números finitos",
        ERR_DIAMETER_NONPOSITIVE => "el diámetro debe ser > 0",
        ERR_INLET_LENGTH_NONPOSITIVE => "el largo de entrada L_in debe ser > 0",
        ERR_OUTLET_LENGTH_NONPOSITIVE => "el largo de salida L_out debe ser > 0",
        ERR_BEND_RADIUS_NONPOSITIVE => "el radio del codo R debe ser > 0",
        ERR_BEND_ANGLE_RANGE => "el ángulo theta debe estar en (0, 180] grados",
        ERR_LENGTH_NEGATIVE => "la longitud debe ser ≥ 0",
        ERR_ROUGHNESS_NEGATIVE => "la rugosidad debe ser ≥ 0",
        ERR_FLOW_MISSING => "se requiere un caudal o una velocidad",
        ERR_FLOW_NONPOSITIVE => "el caudal / la velocidad debe ser > 0",
        ERR_VISCOSITY_NONPOSITIVE => "la viscosidad debe ser > 0",
        ERR_DENSITY_NONPOSITIVE => "la densidad debe ser > 0",
        ERR_GRAVITY_NONPOSITIVE => "la gravedad debe ser > 0",
        ERR_REYNOLDS_NONPOSITIVE => "el número de Reynolds debe ser > 0",
        ERR_NO_SEGMENTS => "se requiere al menos un tramo",

        ELBOW_90_SR => "Codo 90° SR (≈1D, estándar)",
        ELBOW_90_LR => "Codo 90° LR (≈1,5D, radio largo)",
        ELBOW_45_SR => "Codo 45° SR (≈1D, estándar)",
        ELBOW_45_LR => "Codo 45° LR (≈1,5D, radio largo)",

        MESH_TITLE => " Calculadora de parámetros de mallado para Salome/NETGEN",
        MESH_INPUT_HEADING => "Entrada geométrica:",
        MESH_LEVEL => "nivel",
        MESH_GLOBAL_HEADING => "NETGEN 3D Parameters (global):",
        MESH_ALGORITHMS_HEADING => "Recomendación de algoritmos en Salome:",
        MESH_MAIN_3D => "Algoritmo 3D principal recomendado",
        MESH_MAIN_3D_HINT => "(1D, 2D y 3D en el mismo NETGEN: cómodo para el codo)",
        MESH_ALTERNATIVE => "Alternativa (si prefieres separar):",
        MESH_ARGUMENTS_HEADING => "En la pestaña 'Arguments' de NETGEN:",
        MESH_RECOMMENDED => "recomendado",
        MESH_LOCAL_SIZES_HEADING => "Local Sizes sugeridos:",
        MESH_BASE_SIZES => "Tamaños base:",
        MESH_APPLY_LOCAL => "Para aplicar en Salome (pestaña 'Local Sizes'):",
        MESH_ELBOW_FACES => "* En el grupo de caras del codo (p.ej. 'elbow_wall'):",
        MESH_STRAIGHT_FACES => "* (Opcional) En los tramos rectos:",
        MESH_SEGMENTS_HEADING => "Hipótesis 1D (Number of Segments):",
        MESH_SEG_INLET => "Entrada (N_in):",
        MESH_SEG_OUTLET => "Salida (N_out):",
        MESH_SEG_ARC => "Arco codo (N_arc):",
        MESH_SEG_COMPUTED => "calculado",
        MESH_SEG_USED => "usado",
        MESH_VISCOUS_HEADING => "Viscous Layers (para hipótesis 'Viscous Layers' en NETGEN 3D):",
        NOTES_HEADING => "Notas:",
        NOTE_INLET_CLAMPED => "N_in calculado = {computed} > N_in_max = {max}. Se ha limitado a {max}.",
        NOTE_OUTLET_CLAMPED => "N_out calculado = {computed} > N_out_max = {max}. Se ha limitado a {max}.",
        NOTE_TIGHT_ELBOW => "Codo con R/D = {ratio} < 1.2 y theta = {angle}°. Mínimo de segmentos en arco aumentado a {arc_min}.",
        NOTE_CURVATURE => "Recuerda: Nb. Segs per Edge y Nb. Segs per Radius solo influyen si activas 'Limit Size by Surface Curvature' en la hipótesis NETGEN.",
        NOTE_CHECKMESH => "Revisa la calidad de malla en OpenFOAM (checkMesh): nonOrthogonality, skewness, aspect ratio, etc.",

        MESH_WIZARD_TITLE => " Asistente de configuración de mallado para Salome/NETGEN",
        MESH_WIZARD_INTRO => "Te voy a pedir algunos datos de la geometría del codo:\n  - D: diámetro interno de la tubería [m]\n  - L_in: largo recto de ENTRADA [m]\n  - L_out: largo recto de SALIDA [m]\n  - R: radio del codo [m]\n  - theta: ángulo del codo [grados] (p.ej. 45, 90)\n  - nivel de malla: coarse / medium / fine",
        MESH_WIZARD_DIAMETER_HINT => "Primero, el diámetro interno D.\nEjemplos:\n  - 0.05  → 5 cm\n  - 0.10  → 10 cm\n  - 0.25  → 25 cm",
        MESH_WIZARD_LENGTH_HINT => "Ahora los largos rectos de ENTRADA y SALIDA.\nEs típico usar ~20·D de entrada y ~20·D de salida.\nCon D = {d} m, 20·D ≈ {l} m.",
        MESH_WIZARD_RADIUS_HINT => "Radio del codo R:\n  - Codo de radio corto  (SR) ≈ 1·D\n  - Codo de radio largo  (LR) ≈ 1.5·D\nCon D = {d} m, 1.5·D ≈ {r} m.",
        MESH_WIZARD_ANGLE_HINT => "Ángulo del codo theta:\n  - 45  → codo de 45°\n  - 90  → codo de 90° (típico)",
        PROMPT_D => "Diámetro interno D [m] (debe ser > 0)",
        PROMPT_L_IN => "Largo recto de ENTRADA L_in [m]",
        PROMPT_L_OUT => "Largo recto de SALIDA L_out [m]",
        PROMPT_R => "Radio del codo R [m]",
        PROMPT_THETA => "Ángulo del codo theta [grados]",
        LEVEL_MENU => "Nivel de malla (control de resolución):\n  1) coarse  - malla más gruesa, menos celdas (rápida, menos detalle)\n  2) medium  - compromiso recomendado (buena primera simulación)\n  3) fine    - malla más fina, más celdas (más precisa, más lenta)",
        PROMPT_LEVEL => "Elige nivel [1/2/3 o coarse/medium/fine]",

        LOSS_TITLE => "  Calculadora de pérdidas por fricción\n  (Darcy-Weisbach, Blasius / Haaland)",
        MATERIALS_HEADING => "Rugosidades predefinidas (--material):",
        LOSS_RESULTS_STRAIGHT => "===== RESULTADOS: TUBERÍA RECTA SIN CODO =====",
        LOSS_RESULTS_ELBOW => "===== RESULTADOS: TUBERÍA CON CODO =====",
        LOSS_RESULTS_SERIES => "===== RESULTADOS: TRAMOS EN SERIE =====",
        LABEL_SEGMENT => "Tramo",
        LABEL_UNNAMED => "(sin nombre)",
        LABEL_FLOW => "Caudal",
        LABEL_METHOD => "Método",
        LABEL_FLUID => "Fluido",
        LABEL_GRAVITY => "Gravedad g",
        LABEL_DIAMETER => "Diámetro",
        LABEL_LENGTH => "Longitud",
        LABEL_ROUGHNESS => "Rugosidad",
        LABEL_AREA => "Área interna A",
        LABEL_VELOCITY => "Velocidad media v",
        LABEL_REYNOLDS => "Reynolds Re",
        LABEL_REGIME => "Régimen de flujo",
        LABEL_FRICTION_FACTOR => "f (Darcy-Weisbach)",
        LABEL_HF_FRICTION => "hf fricción",
        LABEL_ELBOW_K => "K del codo",
        LABEL_H_LOCAL => "hf codo",
        LABEL_H_TOTAL => "hf total",
        LABEL_DP => "ΔP total",
        REGIME_LAMINAR => "laminar",
        REGIME_TRANSITIONAL => "transición",
        REGIME_TURBULENT => "turbulento",
        WARNINGS_HEADING => "Advertencias:",
        WARN_TRANSITIONAL => "Re = {re} está en la zona de transición (2300-4000); f es interpolado e incierto.",
        WARN_BLASIUS_RANGE => "Re = {re} está fuera del rango de Blasius (4e3-1e5).",
        WARN_BLASIUS_ROUGH => "Blasius supone tubería lisa pero ε/D = {rr}.",
        WARN_BLASIUS_FALLBACK => "Re = {re} supera el rango de Blasius (1e5); se usó Haaland.",
        WARN_HAALAND_RANGE => "Re = {re} supera el rango de Haaland (1e8).",
        WARN_HAALAND_ROUGHNESS => "ε/D = {rr} supera el rango de Haaland (0.05).",
        WARN_ELBOW_EXTRAPOLATED => "R/D = {ratio} está fuera de la tabla de K (1.0-1.5); se usó el valor más cercano.",

        LOSS_ESCAPE_HINT => "  En cualquier pregunta:\n    - 'm' o 'menu'          -> volver al menú principal\n    - 'q', 'salir', 'exit'  -> salir",
        LOSS_MENU => "¿Qué desea calcular?\n  1) Tubería recta sin codos\n  2) Tubería recta con un codo\n  3) Varios tramos en serie\n  4) Salir",
        PROMPT_OPTION => "Opción: ",
        LOSS_FLOW_HEADING => "Ingreso de datos hidráulicos principales (para definir el caudal):",
        PROMPT_REF_DIAMETER => "Diámetro interno de referencia [mm]: ",
        PROMPT_REF_VELOCITY => "Velocidad media de referencia [m/s]: ",
        FLOW_EQUIVALENT => "  Área interna A = {area} m²\n  => Caudal equivalente Q = {q} m³/s  ({lps} L/s)",
        RE_ESTIMATE => "Re estimado con D_ref y v_ref: Re = {re} ({regime})",
        METHOD_MENU => "Seleccione el método de correlación para flujo turbulento:\n  1) Blasius\n  2) Haaland",
        METHOD_SUGGEST_BLASIUS => "Sugerencia: Blasius (tubería lisa, rango clásico de validez).",
        METHOD_SUGGEST_HAALAND => "Sugerencia: Haaland (más general, con o sin rugosidad).",
        PROMPT_METHOD => "Opción [1/2, por defecto {default}]: ",
        SEGMENT_HEADING => "=== Datos del tramo {n} ===",
        PROMPT_SEGMENT_NAME => "Nombre del tramo (opcional): ",
        PROMPT_SEGMENT_DIAMETER => "Diámetro interno [mm] (ENTER para usar {d} mm): ",
        PROMPT_SEGMENT_LENGTH => "Longitud del tramo [m]: ",
        PROMPT_SEGMENT_COUNT => "Número de tramos: ",
        ROUGHNESS_MENU => "Rugosidad de la tubería:\n  1) HDPE típico (ε = {eps} m)\n  2) Ingresar rugosidad absoluta manualmente [mm]\n  3) Rugosidad = 0 (tubería perfectamente lisa)",
        PROMPT_ROUGHNESS_MM => "Rugosidad absoluta [mm]: ",
        PROMPT_L1 => "Longitud L1 antes del codo [m]: ",
        PROMPT_L2 => "Longitud L2 después del codo [m]: ",
        ELBOW_MENU => "Seleccione el tipo de codo:\n  1) Codo 90° SR (≈1D)\n  2) Codo 90° LR (≈1,5D)\n  3) Codo 45° SR (≈1D)\n  4) Codo 45° LR (≈1,5D)",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_falls_back_to_key_for_unknown() {
        let tr = Translator::new(Language::Es);
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_eq!(tr.t(keys::NOTES_HEADING), "Notas:");
    }

    #[test]
    fn placeholders_are_filled() {
        let tr = Translator::new(Language::En);
        let msg = tr.tf(
            keys::NOTE_INLET_CLAMPED,
            &[("computed", 400.to_string()), ("max", 150.to_string())],
        );
        assert_eq!(msg, "computed N_in = 400 > N_in_max = 150. Limited to 150.");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("es"), Some("en")), Language::Es);
        assert_eq!(resolve_language(Some("auto"), Some("es-CL")), Language::Es);
    }

    #[test]
    fn locale_strings_are_normalized() {
        assert_eq!(Language::from_code("es_CL.UTF-8"), Some(Language::Es));
        assert_eq!(Language::from_code("en-US"), Some(Language::En));
        assert_eq!(Language::from_code("ko"), None);
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[mesh]\nnotes_heading = \"Remarks:\"\n").unwrap();
        assert_eq!(map.get(keys::NOTES_HEADING).map(String::as_str), Some("Remarks:"));
    }

    #[test]
    fn every_key_has_english_and_spanish_text() {
        let src = include_str!("i18n.rs");
        let start = src.find("pub mod keys {").unwrap();
        let end = start + src[start..].find("\n}").unwrap();
        let all: Vec<&str> = src[start..end]
            .lines()
            .filter_map(|line| line.trim().strip_prefix("pub const "))
            .filter_map(|rest| rest.split('"').nth(1))
            .collect();
        assert!(all.len() > 100, "{}", all.len());
        for key in all {
            assert!(en(key).is_some(), "en: {key}");
            assert!(es(key).is_some(), "es: {key}");
        }
    }
}
