use std::fs;
use std::path::PathBuf;

use pipeflow_toolbox::app;
use pipeflow_toolbox::config;
use pipeflow_toolbox::i18n::{keys, Language, Translator};
use pipeflow_toolbox::mesh::MeshLevel;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pipeflow-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn locale_pack_overrides_builtin_strings() {
    let dir = scratch_dir("pack");
    fs::write(dir.join("es.toml"), "[general]\ngoodbye = \"¡Chao!\"\n").expect("write pack");

    let tr = Translator::new_with_pack(Language::Es, Some(dir.as_path()));
    assert_eq!(tr.t(keys::GOODBYE), "¡Chao!");
    assert_eq!(tr.t(keys::ERROR_PREFIX), "Error");

    let en = Translator::new_with_pack(Language::En, Some(dir.as_path()));
    assert_eq!(en.lookup(keys::GOODBYE), None);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn broken_pack_falls_back_to_builtin() {
    let dir = scratch_dir("broken");
    fs::write(dir.join("es.toml"), "this is = = not toml").expect("write pack");
    let tr = Translator::new_with_pack(Language::Es, Some(dir.as_path()));
    assert_eq!(tr.lookup(keys::GOODBYE), None);
    assert_ne!(tr.t(keys::GOODBYE), keys::GOODBYE);
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn config_file_selects_language_and_pack() {
    let dir = scratch_dir("config");
    let pack = dir.join("locales");
    fs::create_dir_all(&pack).expect("create pack dir");
    fs::write(pack.join("es.toml"), "\"general.goodbye\" = \"adiós\"\n").expect("write pack");
    let path = dir.join("pipeflow.toml");
    fs::write(
        &path,
        format!(
            "language = \"es\"\nlanguage_pack_dir = {:?}\n\n[mesh]\ndefault_level = \"coarse\"\n",
            pack.display().to_string()
        ),
    )
    .expect("write config");

    let cfg = config::load_or_default(Some(path.as_path())).expect("config");
    assert_eq!(cfg.mesh.default_level, MeshLevel::Coarse);

    let tr = app::translator_for(None, &cfg);
    assert_eq!(tr.language(), Language::Es);
    assert_eq!(tr.t(keys::GOODBYE), "adiós");

    let forced = app::translator_for(Some("en"), &cfg);
    assert_eq!(forced.language(), Language::En);

    fs::remove_dir_all(&dir).ok();
}
