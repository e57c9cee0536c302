use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::losses::head_loss::{G_DEFAULT, MU_WATER_20C, RHO_WATER_20C};
use crate::losses::CorrelationMethod;
use crate::mesh::MeshLevel;

/// `--config`가 없을 때 작업 디렉터리에서 찾는 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "pipeflow.toml";

/// 메쉬 추천 기본값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MeshSettings {
    pub default_level: MeshLevel,
}

/// 손실 계산 기본값. 유체는 20 °C 물이 기본이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossSettings {
    pub default_method: CorrelationMethod,
    /// 밀도 [kg/m³]
    pub density: f64,
    /// 점도 μ [Pa·s]
    pub dynamic_viscosity: f64,
    /// 중력가속도 [m/s²]
    pub gravity: f64,
    /// `--roughness`/`--material`이 없을 때 쓰는 재질 코드
    pub default_material: String,
}

impl Default for LossSettings {
    fn default() -> Self {
        Self {
            default_method: CorrelationMethod::Auto,
            density: RHO_WATER_20C,
            dynamic_viscosity: MU_WATER_20C,
            gravity: G_DEFAULT,
            default_material: "HDPE".to_string(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// en / es / auto. 비어 있으면 시스템 로케일을 따른다.
    pub language: Option<String>,
    /// 번역 덮어쓰기 TOML이 있는 디렉터리
    pub language_pack_dir: Option<PathBuf>,
    pub mesh: MeshSettings,
    pub losses: LossSettings,
}

/// 설정 로드 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 역직렬화 오류
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 설정 파일을 읽는다.
///
/// 경로를 명시하면 그 파일이 반드시 있어야 한다. 명시하지 않으면 `pipeflow.toml`을
/// 찾고, 없으면 기본값을 돌려준다. 파일은 만들지 않는다.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load(path)
            } else {
                debug!("no {DEFAULT_CONFIG_FILE}; using defaults");
                Ok(Config::default())
            }
        }
    }
}

/// 지정한 TOML 파일에서 설정을 로드한다.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?cfg, "config loaded");
    Ok(cfg)
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}
