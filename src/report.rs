//! 계산 결과를 사람이 읽는 텍스트 또는 JSON으로 만든다.
//!
//! 엔진 결과의 notes/warnings는 번역 전 값이므로, 출력 시점에 `Translator`로 문장화한다.

use std::fmt::Write as _;

use serde::Serialize;

use crate::i18n::{keys, Translator};
use crate::losses::{
    materials, CorrelationMethod, ElbowFitting, FlowRegime, FlowSegment, LossResult, LossWarning,
    SeriesResult,
};
use crate::mesh::{MeshNote, MeshRecommendation};

/// `%.{sig}g` 형식에 해당하는 간결한 표기.
pub fn fmt_sig(x: f64, sig: usize) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    let sig = sig.max(1);
    let exp = x.abs().log10().floor() as i32;
    if exp < -4 || exp >= sig as i32 {
        let s = format!("{:.*e}", sig - 1, x);
        match s.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{}", trim_zeros(mantissa), exponent),
            None => s,
        }
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn g6(x: f64) -> String {
    fmt_sig(x, 6)
}

pub fn note_text(note: &MeshNote, tr: &Translator) -> String {
    match *note {
        MeshNote::InletClamped { computed, max } => tr.tf(
            keys::NOTE_INLET_CLAMPED,
            &[("computed", computed.to_string()), ("max", max.to_string())],
        ),
        MeshNote::OutletClamped { computed, max } => tr.tf(
            keys::NOTE_OUTLET_CLAMPED,
            &[("computed", computed.to_string()), ("max", max.to_string())],
        ),
        MeshNote::TightElbow {
            radius_ratio,
            angle_deg,
            arc_min,
        } => tr.tf(
            keys::NOTE_TIGHT_ELBOW,
            &[
                ("ratio", format!("{radius_ratio:.2}")),
                ("angle", format!("{angle_deg:.1}")),
                ("arc_min", arc_min.to_string()),
            ],
        ),
        MeshNote::CurvatureReminder => tr.t(keys::NOTE_CURVATURE).to_string(),
        MeshNote::CheckMeshReminder => tr.t(keys::NOTE_CHECKMESH).to_string(),
    }
}

pub fn warning_text(warning: &LossWarning, tr: &Translator) -> String {
    match *warning {
        LossWarning::TransitionalRegime { reynolds } => {
            tr.tf(keys::WARN_TRANSITIONAL, &[("re", format!("{reynolds:.3e}"))])
        }
        LossWarning::BlasiusOutOfRange { reynolds } => {
            tr.tf(keys::WARN_BLASIUS_RANGE, &[("re", format!("{reynolds:.3e}"))])
        }
        LossWarning::BlasiusRoughPipe { relative_roughness } => tr.tf(
            keys::WARN_BLASIUS_ROUGH,
            &[("rr", format!("{relative_roughness:.3e}"))],
        ),
        LossWarning::BlasiusFallback { reynolds } => {
            tr.tf(keys::WARN_BLASIUS_FALLBACK, &[("re", format!("{reynolds:.3e}"))])
        }
        LossWarning::HaalandOutOfRange { reynolds } => {
            tr.tf(keys::WARN_HAALAND_RANGE, &[("re", format!("{reynolds:.3e}"))])
        }
        LossWarning::HaalandRoughness { relative_roughness } => tr.tf(
            keys::WARN_HAALAND_ROUGHNESS,
            &[("rr", format!("{relative_roughness:.3e}"))],
        ),
        LossWarning::ElbowTableExtrapolated { radius_ratio } => tr.tf(
            keys::WARN_ELBOW_EXTRAPOLATED,
            &[("ratio", format!("{radius_ratio:.2}"))],
        ),
    }
}

pub fn regime_text<'a>(regime: FlowRegime, tr: &'a Translator) -> &'a str {
    tr.t(match regime {
        FlowRegime::Laminar => keys::REGIME_LAMINAR,
        FlowRegime::Transitional => keys::REGIME_TRANSITIONAL,
        FlowRegime::Turbulent => keys::REGIME_TURBULENT,
    })
}

/// 권장 체크박스 상태. 값 자체가 권장값이므로 항상 "(recommended)"를 붙인다.
fn advised(flag: bool, tr: &Translator) -> String {
    let state = if flag { "ON " } else { "OFF" };
    format!("{state} ({})", tr.t(keys::MESH_RECOMMENDED))
}

// ---------------------------------------------------------------- mesh

#[derive(Serialize)]
struct MeshReport<'a> {
    #[serde(flatten)]
    recommendation: &'a MeshRecommendation,
    notes: Vec<String>,
}

/// 메쉬 추천 결과를 JSON 문자열로 만든다.
pub fn mesh_json(rec: &MeshRecommendation, tr: &Translator) -> serde_json::Result<String> {
    let report = MeshReport {
        recommendation: rec,
        notes: rec.notes.iter().map(|n| note_text(n, tr)).collect(),
    };
    serde_json::to_string_pretty(&report)
}

/// 메쉬 추천 결과를 Salome 입력 순서대로 정리한 텍스트.
pub fn mesh_text(rec: &MeshRecommendation, tr: &Translator) -> String {
    let g = &rec.geometry;
    let args = &rec.netgen_arguments;
    let algo = &args.algorithms;
    let rule = "=".repeat(72);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\n{}\n{rule}\n", tr.t(keys::MESH_TITLE));
    let _ = writeln!(out, "{}", tr.t(keys::MESH_INPUT_HEADING));
    let _ = writeln!(out, "  D           = {} [m]", g6(g.diameter_m()));
    let _ = writeln!(out, "  L_in        = {} [m]", g6(g.inlet_length_m()));
    let _ = writeln!(out, "  L_out       = {} [m]", g6(g.outlet_length_m()));
    let _ = writeln!(out, "  R           = {} [m]", g6(g.bend_radius_m()));
    let _ = writeln!(out, "  theta       = {} [°]", g6(g.bend_angle_deg()));
    let _ = writeln!(out, "  {:<11} = {}\n", tr.t(keys::MESH_LEVEL), rec.level);

    let _ = writeln!(out, "{}", tr.t(keys::MESH_GLOBAL_HEADING));
    let _ = writeln!(out, "  Max Size    = {}  [m]", g6(rec.max_size));
    let _ = writeln!(out, "  Min Size    = {}  [m]", g6(rec.min_size));
    let _ = writeln!(out, "  Growth rate = {}\n", g6(rec.growth_rate));

    let _ = writeln!(out, "{}", tr.t(keys::MESH_ALGORITHMS_HEADING));
    let _ = writeln!(
        out,
        "  {} : {}\n    {}\n",
        tr.t(keys::MESH_MAIN_3D),
        algo.main_3d_algorithm,
        tr.t(keys::MESH_MAIN_3D_HINT)
    );
    let _ = writeln!(out, "  {}", tr.t(keys::MESH_ALTERNATIVE));
    let _ = writeln!(out, "    3D : {}", algo.alternative_3d_algorithm);
    let _ = writeln!(out, "    2D : {}", algo.alternative_2d_algorithm);
    let _ = writeln!(out, "    1D : {}\n", algo.alternative_1d_algorithm);

    let _ = writeln!(out, "  {}", tr.t(keys::MESH_ARGUMENTS_HEADING));
    let _ = writeln!(out, "    Fineness                        = {}", args.fineness);
    let _ = writeln!(out, "    Nb. Segs per Edge               = {}", args.nb_segs_per_edge);
    let _ = writeln!(out, "    Nb. Segs per Radius             = {}", args.nb_segs_per_radius);
    let _ = writeln!(out, "    Chordal Error                   = {}  [m]", g6(args.chordal_error));
    let _ = writeln!(
        out,
        "    Limit Size by Surface Curvature = {}",
        advised(algo.limit_size_by_curvature, tr)
    );
    let _ = writeln!(
        out,
        "    Quad-dominated                  = {}",
        advised(algo.quad_dominated, tr)
    );
    let _ = writeln!(
        out,
        "    Second Order                    = {}",
        advised(algo.second_order, tr)
    );
    let _ = writeln!(
        out,
        "    Optimize                        = {}\n",
        advised(algo.optimize, tr)
    );

    let ls = &rec.local_sizes;
    let _ = writeln!(out, "{}", tr.t(keys::MESH_LOCAL_SIZES_HEADING));
    let _ = writeln!(out, "  {}", tr.t(keys::MESH_BASE_SIZES));
    let _ = writeln!(out, "    s_bulk          = {}  [m]  (≈ D / N_bulk)", g6(ls.bulk));
    let _ = writeln!(out, "    s_elbow         = {}  [m]  (≈ D / (2·N_bulk))", g6(ls.elbow));
    let _ = writeln!(out, "    s_theta         = {}  [m]  (≈ π·D / N_theta)\n", g6(ls.theta));
    let _ = writeln!(out, "  {}", tr.t(keys::MESH_APPLY_LOCAL));
    let _ = writeln!(out, "    {}", tr.t(keys::MESH_ELBOW_FACES));
    let _ = writeln!(out, "        On Faces → Size = {}  [m]", g6(ls.wall_elbow));
    let _ = writeln!(out, "    {}", tr.t(keys::MESH_STRAIGHT_FACES));
    let _ = writeln!(out, "        On Faces → Size = {}  [m]\n", g6(ls.wall_straight));

    let seg = &rec.segments;
    let computed = tr.t(keys::MESH_SEG_COMPUTED);
    let used = tr.t(keys::MESH_SEG_USED);
    let _ = writeln!(out, "{}", tr.t(keys::MESH_SEGMENTS_HEADING));
    for (label, raw, count) in [
        (keys::MESH_SEG_INLET, seg.inlet_raw, seg.inlet),
        (keys::MESH_SEG_OUTLET, seg.outlet_raw, seg.outlet),
        (keys::MESH_SEG_ARC, seg.arc_raw, seg.arc),
    ] {
        let _ = writeln!(out, "  {}", tr.t(label));
        let _ = writeln!(out, "    {computed:<11} = {raw}");
        let _ = writeln!(out, "    {used:<11} = {count}\n");
    }

    let vl = &rec.viscous_layer;
    let _ = writeln!(out, "{}", tr.t(keys::MESH_VISCOUS_HEADING));
    let _ = writeln!(out, "  Total thickness       = {}  [m]", g6(vl.total_thickness));
    let _ = writeln!(out, "  First layer thickness = {}  [m]", g6(vl.first_layer_thickness));
    let _ = writeln!(out, "  Number of layers      = {}", vl.number_of_layers);
    let _ = writeln!(out, "  Stretch factor        = {}\n", g6(vl.stretch_factor));

    if !rec.notes.is_empty() {
        let _ = writeln!(out, "{}", tr.t(keys::NOTES_HEADING));
        for note in &rec.notes {
            let _ = writeln!(out, "  - {}", note_text(note, tr));
        }
    }
    out
}

// -------------------------------------------------------------- losses

/// 단일 구간 출력에 필요한 입력 묶음.
#[derive(Debug, Clone, Copy)]
pub struct LossCase<'a> {
    pub segment: &'a FlowSegment,
    pub elbow: Option<&'a ElbowFitting>,
    pub method: CorrelationMethod,
    pub gravity: f64,
}

#[derive(Serialize)]
struct LossReport<'a> {
    method: CorrelationMethod,
    gravity: f64,
    segment: &'a FlowSegment,
    #[serde(skip_serializing_if = "Option::is_none")]
    elbow: Option<&'a ElbowFitting>,
    #[serde(flatten)]
    result: &'a LossResult,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct SegmentReport<'a> {
    segment: &'a FlowSegment,
    #[serde(flatten)]
    result: &'a LossResult,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct SeriesReport<'a> {
    method: CorrelationMethod,
    gravity: f64,
    segments: Vec<SegmentReport<'a>>,
    head_loss_m: f64,
    pressure_drop_pa: f64,
    pressure_drop_bar: f64,
}

fn warnings_of(result: &LossResult, tr: &Translator) -> Vec<String> {
    result.warnings.iter().map(|w| warning_text(w, tr)).collect()
}

pub fn loss_json(
    case: &LossCase<'_>,
    result: &LossResult,
    tr: &Translator,
) -> serde_json::Result<String> {
    let report = LossReport {
        method: case.method,
        gravity: case.gravity,
        segment: case.segment,
        elbow: case.elbow,
        result,
        warnings: warnings_of(result, tr),
    };
    serde_json::to_string_pretty(&report)
}

pub fn series_json(
    segments: &[FlowSegment],
    series: &SeriesResult,
    method: CorrelationMethod,
    gravity: f64,
    tr: &Translator,
) -> serde_json::Result<String> {
    let report = SeriesReport {
        method,
        gravity,
        segments: segments
            .iter()
            .zip(&series.segments)
            .map(|(segment, result)| SegmentReport {
                segment,
                result,
                warnings: warnings_of(result, tr),
            })
            .collect(),
        head_loss_m: series.head_loss_m,
        pressure_drop_pa: series.pressure_drop_pa,
        pressure_drop_bar: series.pressure_drop_bar,
    };
    serde_json::to_string_pretty(&report)
}

fn elbow_label(elbow: &ElbowFitting, tr: &Translator) -> String {
    match elbow {
        ElbowFitting::Catalog { kind } => format!("{} ({kind})", tr.t(kind.label_key())),
        ElbowFitting::Geometry {
            bend_radius_m,
            angle_deg,
        } => format!("R = {} m, θ = {}°", g6(*bend_radius_m), g6(*angle_deg)),
    }
}

fn write_header(
    out: &mut String,
    method: CorrelationMethod,
    segment: &FlowSegment,
    gravity: f64,
    q: f64,
    tr: &Translator,
) {
    let fluid = &segment.fluid;
    let mu = fluid.kinematic_viscosity_m2_per_s * fluid.density_kg_per_m3;
    let _ = writeln!(
        out,
        "{:<14}{q:.6} m³/s  ({:.3} L/s)",
        format!("{}:", tr.t(keys::LABEL_FLOW)),
        q * 1000.0
    );
    let _ = writeln!(
        out,
        "{:<14}{}",
        format!("{}:", tr.t(keys::LABEL_METHOD)),
        method.to_string().to_uppercase()
    );
    let _ = writeln!(
        out,
        "{:<14}ρ = {:.1} kg/m³, μ = {:.3e} Pa·s",
        format!("{}:", tr.t(keys::LABEL_FLUID)),
        fluid.density_kg_per_m3,
        mu
    );
    let _ = writeln!(
        out,
        "{:<14}{gravity:.3} m/s²\n",
        format!("{}:", tr.t(keys::LABEL_GRAVITY))
    );
}

fn write_segment(out: &mut String, segment: &FlowSegment, result: &LossResult, tr: &Translator) {
    let name = if segment.name.is_empty() {
        tr.t(keys::LABEL_UNNAMED)
    } else {
        segment.name.as_str()
    };
    let row = |label: &str| format!("{}:", tr.t(label));
    let lines = [
        (keys::LABEL_SEGMENT, name.to_string()),
        (keys::LABEL_DIAMETER, format!("{:.2} mm", segment.diameter_m * 1000.0)),
        (keys::LABEL_LENGTH, format!("{:.3} m", segment.length_m)),
        (keys::LABEL_ROUGHNESS, format!("{:.4} mm", segment.roughness_m * 1000.0)),
        (keys::LABEL_AREA, format!("{:.6e} m²", result.area_m2)),
        (keys::LABEL_VELOCITY, format!("{:.4} m/s", result.velocity_m_per_s)),
        (keys::LABEL_REYNOLDS, format!("{:.2e}", result.reynolds)),
        (keys::LABEL_REGIME, regime_text(result.regime, tr).to_string()),
        (keys::LABEL_FRICTION_FACTOR, format!("{:.6}", result.friction_factor)),
        (keys::LABEL_HF_FRICTION, format!("{:.4} m", result.friction_head_loss_m)),
    ];
    for (label, value) in lines {
        let _ = writeln!(out, "  {:<24}{value}", row(label));
    }
    if let Some(k) = result.local_loss_coefficient {
        let _ = writeln!(out, "  {:<24}{k:.3}", row(keys::LABEL_ELBOW_K));
        let _ = writeln!(
            out,
            "  {:<24}{:.4} m",
            row(keys::LABEL_H_LOCAL),
            result.local_head_loss_m
        );
    }
    let _ = writeln!(
        out,
        "  {:<24}{:.4} m",
        row(keys::LABEL_H_TOTAL),
        result.head_loss_m
    );
    let _ = writeln!(
        out,
        "  {:<24}{:.2} Pa ({:.4} bar)",
        row(keys::LABEL_DP),
        result.pressure_drop_pa,
        result.pressure_drop_bar
    );
}

fn write_warnings<'a>(
    out: &mut String,
    warnings: impl Iterator<Item = &'a LossWarning>,
    tr: &Translator,
) {
    let lines: Vec<String> = warnings.map(|w| warning_text(w, tr)).collect();
    if lines.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", tr.t(keys::WARNINGS_HEADING));
    for line in lines {
        let _ = writeln!(out, "  - {line}");
    }
}

/// 단일 구간(엘보 선택) 결과 텍스트.
pub fn loss_text(case: &LossCase<'_>, result: &LossResult, tr: &Translator) -> String {
    let mut out = String::new();
    let heading = if case.elbow.is_some() {
        keys::LOSS_RESULTS_ELBOW
    } else {
        keys::LOSS_RESULTS_STRAIGHT
    };
    let _ = writeln!(out, "\n{}", tr.t(heading));
    write_header(
        &mut out,
        case.method,
        case.segment,
        case.gravity,
        result.flow_rate_m3_per_s,
        tr,
    );
    if let Some(elbow) = case.elbow {
        let _ = writeln!(out, "  {}\n", elbow_label(elbow, tr));
    }
    write_segment(&mut out, case.segment, result, tr);
    write_warnings(&mut out, result.warnings.iter(), tr);
    out
}

/// 직렬 구간 결과 텍스트.
pub fn series_text(
    segments: &[FlowSegment],
    series: &SeriesResult,
    method: CorrelationMethod,
    gravity: f64,
    tr: &Translator,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", tr.t(keys::LOSS_RESULTS_SERIES));
    if let (Some(first), Some(first_result)) = (segments.first(), series.segments.first()) {
        write_header(
            &mut out,
            method,
            first,
            gravity,
            first_result.flow_rate_m3_per_s,
            tr,
        );
    }
    for (i, (segment, result)) in segments.iter().zip(&series.segments).enumerate() {
        let _ = writeln!(out, "[{} {}]", tr.t(keys::LABEL_SEGMENT), i + 1);
        write_segment(&mut out, segment, result, tr);
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "{}: {:.4} m",
        tr.t(keys::LABEL_H_TOTAL),
        series.head_loss_m
    );
    let _ = writeln!(
        out,
        "{}: {:.2} Pa ({:.4} bar)",
        tr.t(keys::LABEL_DP),
        series.pressure_drop_pa,
        series.pressure_drop_bar
    );
    write_warnings(
        &mut out,
        series.segments.iter().flat_map(|r| r.warnings.iter()),
        tr,
    );
    out
}

/// 재질 프리셋 표.
pub fn materials_text(tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::MATERIALS_HEADING));
    for m in materials() {
        let _ = writeln!(
            out,
            "  {:<12}{:<28}ε = {} mm",
            m.code.to_lowercase().replace('_', "-"),
            m.display_name(tr.language()),
            g6(m.roughness_m * 1000.0)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::mesh::{recommend, ElbowGeometry, MeshLevel};

    #[test]
    fn sig_format_matches_percent_g() {
        assert_eq!(fmt_sig(0.0025, 6), "0.0025");
        assert_eq!(fmt_sig(1.2, 6), "1.2");
        assert_eq!(fmt_sig(123456789.0, 6), "1.23457e8");
        assert_eq!(fmt_sig(0.00001234, 6), "1.234e-5");
        assert_eq!(fmt_sig(0.0, 6), "0");
    }

    #[test]
    fn mesh_json_carries_translated_notes() {
        let geom = ElbowGeometry::new(0.05, 1.0, 1.0, 0.075, 90.0).unwrap();
        let rec = recommend(&geom, MeshLevel::Fine);
        let json = mesh_json(&rec, &Translator::new(Language::Es)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], "fine");
        assert!(value["segments"]["arc"].as_u64().unwrap() > 0);
        assert!(value["max_size"].as_f64().unwrap() > 0.0);
        let notes = value["notes"].as_array().unwrap();
        assert!(notes
            .iter()
            .any(|n| n.as_str().unwrap().starts_with("Recuerda")));
    }

    #[test]
    fn mesh_text_lists_segment_counts() {
        let geom = ElbowGeometry::new(0.1, 2.0, 2.0, 0.15, 90.0).unwrap();
        let rec = recommend(&geom, MeshLevel::Medium);
        let text = mesh_text(&rec, &Translator::new(Language::En));
        assert!(text.contains("Inlet (N_in):"));
        assert!(text.contains("Nb. Segs per Edge"));
        assert!(text.contains(&format!("used        = {}", rec.segments.arc)));
    }

    #[test]
    fn fallback_warning_is_localized() {
        let w = LossWarning::BlasiusFallback { reynolds: 2.0e5 };
        let en = warning_text(&w, &Translator::new(Language::En));
        let es = warning_text(&w, &Translator::new(Language::Es));
        assert!(en.contains("Haaland"));
        assert!(en.contains("2.000e5"));
        assert!(es.contains("se usó Haaland"));
    }

    #[test]
    fn material_table_uses_cli_codes() {
        let text = materials_text(&Translator::new(Language::Es));
        assert!(text.contains("cast-iron"));
        assert!(text.contains("Acero comercial"));
        assert!(text.contains("ε = 0.01 mm"));
    }
}
