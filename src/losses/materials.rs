//! 배관 재질별 대표 절대조도 테이블.
//! 값은 문헌 대표값이며 실제 배관 상태(노후, 스케일)에 따라 크게 달라질 수 있다.

use super::error::LossError;
use crate::i18n::Language;

#[derive(Debug)]
pub struct PipeMaterial {
    pub code: &'static str,
    pub name: &'static str,
    pub name_es: &'static str,
    /// 절대조도 ε [m]
    pub roughness_m: f64,
}

impl PipeMaterial {
    pub fn display_name(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.name,
            Language::Es => self.name_es,
        }
    }
}

pub const HDPE_ROUGHNESS_M: f64 = 1.0e-5;

const MATERIALS: &[PipeMaterial] = &[
    PipeMaterial {
        code: "HDPE",
        name: "HDPE (typical)",
        name_es: "HDPE (típico)",
        roughness_m: HDPE_ROUGHNESS_M,
    },
    PipeMaterial {
        code: "PVC",
        name: "PVC / drawn plastic",
        name_es: "PVC / plástico extruido",
        roughness_m: 1.5e-6,
    },
    PipeMaterial {
        code: "STEEL",
        name: "Commercial steel",
        name_es: "Acero comercial",
        roughness_m: 4.5e-5,
    },
    PipeMaterial {
        code: "GALVANIZED",
        name: "Galvanized iron",
        name_es: "Hierro galvanizado",
        roughness_m: 1.5e-4,
    },
    PipeMaterial {
        code: "CAST_IRON",
        name: "Cast iron",
        name_es: "Hierro fundido",
        roughness_m: 2.6e-4,
    },
    PipeMaterial {
        code: "CONCRETE",
        name: "Concrete",
        name_es: "Hormigón",
        roughness_m: 1.0e-3,
    },
    PipeMaterial {
        code: "SMOOTH",
        name: "Perfectly smooth",
        name_es: "Perfectamente lisa",
        roughness_m: 0.0,
    },
];

pub fn materials() -> &'static [PipeMaterial] {
    MATERIALS
}

/// 코드 또는 이름으로 재질을 찾는다. 대소문자와 `-`/`_` 차이는 무시한다.
pub fn find_material(code: &str) -> Option<&'static PipeMaterial> {
    let wanted = code.trim().replace('-', "_");
    MATERIALS
        .iter()
        .find(|m| m.code.eq_ignore_ascii_case(&wanted) || m.name.eq_ignore_ascii_case(code.trim()))
}

/// 재질 이름으로 절대조도[m]를 돌려준다.
pub fn roughness_for(code: &str) -> Result<f64, LossError> {
    find_material(code)
        .map(|m| m.roughness_m)
        .ok_or_else(|| LossError::UnknownMaterial(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hdpe_is_found_case_insensitively() {
        assert_eq!(roughness_for("hdpe").unwrap(), HDPE_ROUGHNESS_M);
        assert_eq!(roughness_for("cast-iron").unwrap(), 2.6e-4);
    }

    #[test]
    fn unknown_material_is_reported() {
        let err = roughness_for("bamboo").unwrap_err();
        assert_eq!(err, LossError::UnknownMaterial("bamboo".into()));
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = materials().iter().map(|m| m.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), materials().len());
    }
}
