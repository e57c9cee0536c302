use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::i18n::{keys, Translator};
use crate::losses::correlations::{classify_regime, BLASIUS_RE_MAX, RE_TURBULENT_MIN};
use crate::losses::materials::HDPE_ROUGHNESS_M;
use crate::losses::{
    compute_head_loss, compute_series, CorrelationMethod, ElbowFitting, ElbowKind, FlowRegime,
    FlowSegment, FlowSpec, FluidProperties,
};
use crate::mesh::MeshLevel;
use crate::report::{self, LossCase};

/// 대화형 입력 중단 사유.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// 'm' / 'menu'
    #[error("back to main menu")]
    Menu,
    /// 'q' / 'quit' / 'salir' / 'exit' 또는 입력 끝(EOF)
    #[error("quit")]
    Quit,
}

/// 숫자 입력의 하한 조건.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Positive,
    NonNegative,
}

/// 입력/출력 스트림과 번역기를 묶은 프롬프트 도우미.
pub struct Prompter<'t, R, W> {
    input: R,
    output: W,
    tr: &'t Translator,
}

impl<'t, R: BufRead, W: Write> Prompter<'t, R, W> {
    pub fn new(input: R, output: W, tr: &'t Translator) -> Self {
        Self { input, output, tr }
    }

    pub fn translator(&self) -> &'t Translator {
        self.tr
    }

    pub fn say(&mut self, text: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 한 줄을 읽는다. 메뉴/종료 명령을 해석하지 않는다.
    pub fn raw_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(PromptError::Quit);
        }
        Ok(buf.trim().to_string())
    }

    /// 한 줄을 읽는다. 메뉴/종료 명령은 오류로 돌려준다.
    pub fn line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let text = self.raw_line(prompt)?;
        match text.to_lowercase().as_str() {
            "m" | "menu" => Err(PromptError::Menu),
            "q" | "quit" | "salir" | "exit" => Err(PromptError::Quit),
            _ => Ok(text),
        }
    }

    /// 숫자를 읽는다. 빈 입력이면 기본값을 쓰고, 하한을 어기면 다시 묻는다.
    pub fn number(
        &mut self,
        prompt: &str,
        default: Option<f64>,
        bound: Bound,
    ) -> Result<f64, PromptError> {
        let tr = self.tr;
        loop {
            let raw = self.line(prompt)?;
            let value = if raw.is_empty() {
                match default {
                    Some(v) => v,
                    None => {
                        self.say(tr.t(keys::ERROR_INVALID_NUMBER))?;
                        continue;
                    }
                }
            } else {
                match raw.replace(',', ".").parse::<f64>() {
                    Ok(v) if v.is_finite() => v,
                    _ => {
                        self.say(tr.t(keys::ERROR_INVALID_NUMBER))?;
                        continue;
                    }
                }
            };
            let (ok, key) = match bound {
                Bound::Positive => (value > 0.0, keys::ERROR_VALUE_GT),
                Bound::NonNegative => (value >= 0.0, keys::ERROR_VALUE_GE),
            };
            if ok {
                return Ok(value);
            }
            let msg = tr.tf(key, &[("min", "0".to_string())]);
            self.say(&msg)?;
        }
    }

    /// 보기 중 하나를 고를 때까지 묻는다. 빈 입력은 `default`.
    pub fn choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: Option<&str>,
    ) -> Result<String, PromptError> {
        let tr = self.tr;
        loop {
            let raw = self.line(prompt)?.to_lowercase();
            if raw.is_empty() {
                if let Some(d) = default {
                    return Ok(d.to_string());
                }
            } else if options.contains(&raw.as_str()) {
                return Ok(raw);
            }
            self.say(tr.t(keys::INVALID_SELECTION_RETRY))?;
        }
    }

    fn labeled_number(
        &mut self,
        label_key: &str,
        default: Option<f64>,
        bound: Bound,
    ) -> Result<f64, PromptError> {
        let tr = self.tr;
        let prompt = match default {
            Some(d) => format!(
                "{} {}: ",
                tr.t(label_key),
                tr.tf(keys::ENTER_DEFAULT, &[("default", report::fmt_sig(d, 6))])
            ),
            None => format!("{}: ", tr.t(label_key)),
        };
        self.number(&prompt, default, bound)
    }
}

// ---------------------------------------------------------------- mesh

/// 메쉬 마법사에서 받은 원시 입력. 검증은 `ElbowGeometry::new`가 한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshAnswers {
    pub diameter_m: f64,
    pub inlet_length_m: f64,
    pub outlet_length_m: f64,
    pub bend_radius_m: f64,
    pub bend_angle_deg: f64,
    pub level: MeshLevel,
}

/// 엘보 형상과 레벨을 단계별로 묻는다. L_in/L_out 기본값은 20·D, R은 1.5·D, θ는 90°.
pub fn mesh_wizard<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    default_level: MeshLevel,
) -> Result<MeshAnswers, PromptError> {
    let tr = p.translator();
    let rule = "=".repeat(72);
    p.say(&format!("{rule}\n{}\n{rule}\n", tr.t(keys::MESH_WIZARD_TITLE)))?;
    p.say(tr.t(keys::MESH_WIZARD_INTRO))?;
    p.say("")?;
    p.say(tr.t(keys::MESH_WIZARD_DIAMETER_HINT))?;
    let d = p.labeled_number(keys::PROMPT_D, None, Bound::Positive)?;

    let default_length = 20.0 * d;
    p.say("")?;
    p.say(&tr.tf(
        keys::MESH_WIZARD_LENGTH_HINT,
        &[
            ("d", report::fmt_sig(d, 6)),
            ("l", report::fmt_sig(default_length, 6)),
        ],
    ))?;
    let l_in = p.labeled_number(keys::PROMPT_L_IN, Some(default_length), Bound::Positive)?;
    let l_out = p.labeled_number(keys::PROMPT_L_OUT, Some(default_length), Bound::Positive)?;

    let default_radius = 1.5 * d;
    p.say("")?;
    p.say(&tr.tf(
        keys::MESH_WIZARD_RADIUS_HINT,
        &[
            ("d", report::fmt_sig(d, 6)),
            ("r", report::fmt_sig(default_radius, 6)),
        ],
    ))?;
    let r = p.labeled_number(keys::PROMPT_R, Some(default_radius), Bound::Positive)?;

    p.say("")?;
    p.say(tr.t(keys::MESH_WIZARD_ANGLE_HINT))?;
    let theta = p.labeled_number(keys::PROMPT_THETA, Some(90.0), Bound::Positive)?;

    p.say("")?;
    p.say(tr.t(keys::LEVEL_MENU))?;
    let prompt = format!(
        "{} {}: ",
        tr.t(keys::PROMPT_LEVEL),
        tr.tf(keys::ENTER_DEFAULT, &[("default", default_level.to_string())])
    );
    // "m"은 medium 약어이므로 메뉴 명령으로 해석하지 않는다.
    let level = loop {
        let raw = p.raw_line(&prompt)?;
        if raw.is_empty() {
            break default_level;
        }
        match raw.parse::<MeshLevel>() {
            Ok(level) => break level,
            Err(_) => p.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    };

    Ok(MeshAnswers {
        diameter_m: d,
        inlet_length_m: l_in,
        outlet_length_m: l_out,
        bend_radius_m: r,
        bend_angle_deg: theta,
        level,
    })
}

// -------------------------------------------------------------- losses

/// 손실 마법사 공통 설정 (유체, 중력).
#[derive(Debug, Clone, Copy)]
pub struct LossWizardSettings {
    pub fluid: FluidProperties,
    pub gravity: f64,
}

/// 손실 계산 메뉴 루프. 'm'은 메뉴로, 'q'는 종료.
pub fn loss_wizard<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    settings: &LossWizardSettings,
) -> Result<(), PromptError> {
    let tr = p.translator();
    let rule = "=".repeat(44);
    p.say(&format!("{rule}\n{}\n{rule}", tr.t(keys::LOSS_TITLE)))?;
    p.say(tr.t(keys::LOSS_ESCAPE_HINT))?;

    loop {
        match loss_round(p, settings) {
            Ok(true) => continue,
            Ok(false) | Err(PromptError::Quit) => {
                p.say(&format!("\n{}", tr.t(keys::GOODBYE)))?;
                return Ok(());
            }
            Err(PromptError::Menu) => {
                p.say(&format!("\n{}\n", tr.t(keys::BACK_TO_MENU)))?;
            }
            Err(err @ PromptError::Io(_)) => return Err(err),
        }
    }
}

/// 메뉴 한 바퀴. 종료를 고르면 `false`.
fn loss_round<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    settings: &LossWizardSettings,
) -> Result<bool, PromptError> {
    let tr = p.translator();
    p.say("")?;
    p.say(tr.t(keys::LOSS_MENU))?;
    let option = p.choice(tr.t(keys::PROMPT_OPTION), &["1", "2", "3", "4"], None)?;
    if option == "4" {
        return Ok(false);
    }

    p.say("")?;
    p.say(tr.t(keys::LOSS_FLOW_HEADING))?;
    let d_ref = p.number(tr.t(keys::PROMPT_REF_DIAMETER), None, Bound::Positive)? / 1000.0;
    let v_ref = p.number(tr.t(keys::PROMPT_REF_VELOCITY), None, Bound::Positive)?;
    let area = std::f64::consts::PI * d_ref * d_ref / 4.0;
    let q = v_ref * area;
    p.say(&tr.tf(
        keys::FLOW_EQUIVALENT,
        &[
            ("area", format!("{area:.6e}")),
            ("q", format!("{q:.6}")),
            ("lps", format!("{:.3}", q * 1000.0)),
        ],
    ))?;

    let re_ref = v_ref * d_ref / settings.fluid.kinematic_viscosity_m2_per_s;
    let regime = classify_regime(re_ref);
    p.say(&tr.tf(
        keys::RE_ESTIMATE,
        &[
            ("re", format!("{re_ref:.3e}")),
            ("regime", report::regime_text(regime, tr).to_string()),
        ],
    ))?;
    let method = select_method(p, re_ref, regime)?;

    match option.as_str() {
        "1" => {
            let segment = ask_segment(p, 1, d_ref, q, settings)?;
            let case = LossCase {
                segment: &segment,
                elbow: None,
                method,
                gravity: settings.gravity,
            };
            show_single(p, &case)?;
        }
        "2" => {
            p.say("")?;
            let l1 = p.number(tr.t(keys::PROMPT_L1), None, Bound::NonNegative)?;
            let l2 = p.number(tr.t(keys::PROMPT_L2), None, Bound::NonNegative)?;
            let roughness_m = ask_roughness(p)?;
            let kind = ask_elbow(p)?;
            let segment = FlowSegment {
                name: tr.t(kind.label_key()).to_string(),
                diameter_m: d_ref,
                length_m: l1 + l2,
                flow: Some(FlowSpec::Rate(q)),
                roughness_m,
                fluid: settings.fluid,
            };
            let elbow = ElbowFitting::Catalog { kind };
            let case = LossCase {
                segment: &segment,
                elbow: Some(&elbow),
                method,
                gravity: settings.gravity,
            };
            show_single(p, &case)?;
        }
        _ => {
            let count = loop {
                let n = p.number(tr.t(keys::PROMPT_SEGMENT_COUNT), None, Bound::Positive)?;
                if n.fract() == 0.0 {
                    break n as usize;
                }
                p.say(tr.t(keys::ERROR_INVALID_NUMBER))?;
            };
            let segments = (1..=count)
                .map(|i| ask_segment(p, i, d_ref, q, settings))
                .collect::<Result<Vec<_>, _>>()?;
            match compute_series(&segments, method, settings.gravity) {
                Ok(series) => p.say(&report::series_text(
                    &segments,
                    &series,
                    method,
                    settings.gravity,
                    tr,
                ))?,
                Err(err) => p.say(&format!(
                    "{}: {}",
                    tr.t(keys::ERROR_PREFIX),
                    crate::app::localized_loss_error(&err, tr)
                ))?,
            }
        }
    }
    Ok(true)
}

fn show_single<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    case: &LossCase<'_>,
) -> Result<(), PromptError> {
    let tr = p.translator();
    match compute_head_loss(case.segment, case.elbow, case.method, case.gravity) {
        Ok(result) => p.say(&report::loss_text(case, &result, tr)),
        Err(err) => p.say(&format!(
            "{}: {}",
            tr.t(keys::ERROR_PREFIX),
            crate::app::localized_loss_error(&err, tr)
        )),
    }
}

/// Re를 보고 권장 상관식을 제시한 뒤 선택받는다.
fn select_method<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    re: f64,
    regime: FlowRegime,
) -> Result<CorrelationMethod, PromptError> {
    let tr = p.translator();
    let suggested = if regime == FlowRegime::Turbulent
        && (RE_TURBULENT_MIN..=BLASIUS_RE_MAX).contains(&re)
    {
        p.say(tr.t(keys::METHOD_SUGGEST_BLASIUS))?;
        "1"
    } else {
        p.say(tr.t(keys::METHOD_SUGGEST_HAALAND))?;
        "2"
    };
    p.say("")?;
    p.say(tr.t(keys::METHOD_MENU))?;
    let prompt = tr.tf(keys::PROMPT_METHOD, &[("default", suggested.to_string())]);
    let choice = p.choice(&prompt, &["1", "2"], Some(suggested))?;
    Ok(if choice == "1" {
        CorrelationMethod::Blasius
    } else {
        CorrelationMethod::Haaland
    })
}

fn ask_segment<R: BufRead, W: Write>(
    p: &mut Prompter<'_, R, W>,
    index: usize,
    default_diameter_m: f64,
    flow_rate: f64,
    settings: &LossWizardSettings,
) -> Result<FlowSegment, PromptError> {
    let tr = p.translator();
    p.say("")?;
    p.say(&tr.tf(keys::SEGMENT_HEADING, &[("n", index.to_string())]))?;
    let name = p.line(tr.t(keys::PROMPT_SEGMENT_NAME))?;
    let prompt = tr.tf(
        keys::PROMPT_SEGMENT_DIAMETER,
        &[("d", format!("{:.2}", default_diameter_m * 1000.0))],
    );
    let diameter_mm = p.number(&prompt, Some(default_diameter_m * 1000.0), Bound::Positive)?;
    let length_m = p.number(tr.t(keys::PROMPT_SEGMENT_LENGTH), None, Bound::NonNegative)?;
    let roughness_m = ask_roughness(p)?;
    Ok(FlowSegment {
        name,
        diameter_m: diameter_mm / 1000.0,
        length_m,
        flow: Some(FlowSpec::Rate(flow_rate)),
        roughness_m,
        fluid: settings.fluid,
    })
}

fn ask_roughness<R: BufRead, W: Write>(p: &mut Prompter<'_, R, W>) -> Result<f64, PromptError> {
    let tr = p.translator();
    p.say("")?;
    p.say(&tr.tf(
        keys::ROUGHNESS_MENU,
        &[("eps", format!("{HDPE_ROUGHNESS_M:.2e}"))],
    ))?;
    let choice = p.choice(tr.t(keys::PROMPT_OPTION), &["1", "2", "3"], Some("1"))?;
    match choice.as_str() {
        "2" => Ok(p.number(tr.t(keys::PROMPT_ROUGHNESS_MM), None, Bound::NonNegative)? / 1000.0),
        "3" => Ok(0.0),
        _ => Ok(HDPE_ROUGHNESS_M),
    }
}

fn ask_elbow<R: BufRead, W: Write>(p: &mut Prompter<'_, R, W>) -> Result<ElbowKind, PromptError> {
    let tr = p.translator();
    p.say("")?;
    p.say(tr.t(keys::ELBOW_MENU))?;
    let choice = p.choice(tr.t(keys::PROMPT_OPTION), &["1", "2", "3", "4"], None)?;
    Ok(match choice.as_str() {
        "1" => ElbowKind::Deg90Short,
        "2" => ElbowKind::Deg90Long,
        "3" => ElbowKind::Deg45Short,
        _ => ElbowKind::Deg45Long,
    })
}

/// 표준 입출력에 연결된 프롬프트 도우미.
pub fn stdio_prompter(tr: &Translator) -> Prompter<'_, io::StdinLock<'static>, io::Stdout> {
    Prompter::new(io::stdin().lock(), io::stdout(), tr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use std::io::Cursor;

    fn run_mesh(script: &str) -> (Result<MeshAnswers, PromptError>, String) {
        let tr = Translator::new(Language::En);
        let mut out = Vec::new();
        let res = {
            let mut p = Prompter::new(Cursor::new(script.to_string()), &mut out, &tr);
            mesh_wizard(&mut p, MeshLevel::Medium)
        };
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn mesh_wizard_applies_diameter_based_defaults() {
        let (res, _) = run_mesh("0.1\n\n\n\n\n\n");
        let answers = res.unwrap();
        assert_eq!(answers.diameter_m, 0.1);
        assert!((answers.inlet_length_m - 2.0).abs() < 1e-12);
        assert!((answers.outlet_length_m - 2.0).abs() < 1e-12);
        assert!((answers.bend_radius_m - 0.15).abs() < 1e-12);
        assert_eq!(answers.bend_angle_deg, 90.0);
        assert_eq!(answers.level, MeshLevel::Medium);
    }

    #[test]
    fn mesh_wizard_retries_bad_numbers_and_levels() {
        let (res, out) = run_mesh("abc\n-1\n0.05\n1\n1\n0.05\n45\nultra\nf\n");
        let answers = res.unwrap();
        assert_eq!(answers.diameter_m, 0.05);
        assert_eq!(answers.bend_angle_deg, 45.0);
        assert_eq!(answers.level, MeshLevel::Fine);
        assert!(out.contains("please enter a number"));
        assert!(out.contains("Value must be > 0"));
    }

    #[test]
    fn m_selects_medium_level_in_mesh_wizard() {
        let (res, _) = run_mesh("0.1\n\n\n\n\nm\n");
        assert_eq!(res.unwrap().level, MeshLevel::Medium);
    }

    #[test]
    fn eof_quits_the_wizard() {
        let (res, _) = run_mesh("0.1\n");
        assert!(matches!(res, Err(PromptError::Quit)));
    }

    #[test]
    fn loss_wizard_straight_pipe_prints_results() {
        let tr = Translator::new(Language::En);
        let settings = LossWizardSettings {
            fluid: FluidProperties::water_20c(),
            gravity: 9.81,
        };
        // 직관, D=50 mm, v=1 m/s, 기본 상관식, 이름 없음, 기본 직경, L=10 m, HDPE, 종료
        let script = "1\n50\n1\n\n\n\n10\n\n4\n";
        let mut out = Vec::new();
        {
            let mut p = Prompter::new(Cursor::new(script), &mut out, &tr);
            loss_wizard(&mut p, &settings).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("RESULTS: STRAIGHT PIPE"));
        assert!(text.contains("hf total"));
        assert!(text.contains("goodbye"));
    }

    #[test]
    fn menu_escape_returns_to_menu() {
        let tr = Translator::new(Language::Es);
        let settings = LossWizardSettings {
            fluid: FluidProperties::water_20c(),
            gravity: 9.81,
        };
        let mut out = Vec::new();
        {
            let mut p = Prompter::new(Cursor::new("2\nm\nq\n"), &mut out, &tr);
            loss_wizard(&mut p, &settings).unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Volviendo al menú principal"));
        assert!(text.contains("hasta luego"));
    }
}
