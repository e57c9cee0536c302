//! 손실 계산 오류 타입.

use thiserror::Error;

use crate::i18n;

/// 손실수두 계산 중 발생 가능한 오류. 모두 입력 오류(InvalidInput 계열)이다.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LossError {
    /// 잘못된 입력값. `what`은 메시지 키이다.
    #[error("invalid input: {}", i18n::english(what))]
    InvalidInput { what: &'static str },
    /// 등록되지 않은 재질 이름
    #[error("invalid input: unknown pipe material '{0}'")]
    UnknownMaterial(String),
    /// 등록되지 않은 엘보 코드
    #[error("invalid input: unknown elbow type '{0}'")]
    UnknownElbow(String),
    /// 알 수 없는 상관식 이름
    #[error("invalid input: unknown correlation method '{0}'")]
    UnknownMethod(String),
}

pub type LossCalcResult<T> = Result<T, LossError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::keys;

    #[test]
    fn display_uses_english_message() {
        let err = LossError::InvalidInput {
            what: keys::ERR_VISCOSITY_NONPOSITIVE,
        };
        assert!(err.to_string().contains("viscosity"));
        let err = LossError::UnknownMaterial("unobtainium".into());
        assert!(err.to_string().contains("unobtainium"));
    }
}
