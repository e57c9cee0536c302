//! 관로 유동 도구 모음. 계산 로직을 라이브러리로 두고 두 실행 파일이 공유한다.
//!
//! - `elbow_mesh`: 엘보 형상으로 Salome/NETGEN 메쉬 파라미터를 추천한다.
//! - `head_loss`: Darcy-Weisbach 식으로 직관, 엘보, 직렬 구간의 손실수두를 구한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod losses;
pub mod mesh;
pub mod report;
pub mod ui_cli;
pub mod units;
