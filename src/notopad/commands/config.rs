use super::{CmdMessage, CmdResult};
use crate::app::AppState;
use crate::config::KEYS;
use crate::error::Result;
use crate::store::TextStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    Get(String),
    Set(String, String),
}

pub fn run<S: TextStore + 'static>(
    app: &mut AppState<S>,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match action {
        ConfigAction::ShowAll => {
            let values = KEYS
                .iter()
                .map(|key| Ok((key.to_string(), app.settings().get(key)?)))
                .collect::<Result<Vec<_>>>()?;
            result = result.with_config_values(values);
        }
        ConfigAction::Get(key) => {
            let value = app.settings().get(&key)?;
            result = result.with_config_values(vec![(key, value)]);
        }
        ConfigAction::Set(key, value) => {
            let stored = app.set_setting(&key, &value)?;
            app.persist_settings()?;
            result.add_message(CmdMessage::success(format!("{} = {}", key, stored)));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, Theme};
    use crate::init::initialize_with;
    use crate::model::NotopadPaths;

    #[test]
    fn show_all_lists_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = initialize_with(NotopadPaths::single(dir.path()));
        let result = run(&mut app, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config_values.len(), KEYS.len());
    }

    #[test]
    fn set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = initialize_with(NotopadPaths::single(dir.path()));

        let result = run(
            &mut app,
            ConfigAction::Set("editor.theme".into(), "dark".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "editor.theme = dark");
        assert_eq!(Settings::load(dir.path()).unwrap().editor.theme, Theme::Dark);

        let result = run(&mut app, ConfigAction::Get("editor.theme".into())).unwrap();
        assert_eq!(
            result.config_values,
            vec![("editor.theme".to_string(), "dark".to_string())]
        );
    }

    #[test]
    fn bad_key_is_an_error_and_nothing_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = initialize_with(NotopadPaths::single(dir.path()));
        assert!(run(&mut app, ConfigAction::Set("bogus".into(), "1".into())).is_err());
        app.shutdown();
        assert!(!dir.path().join("notopad.toml").exists());
    }

    #[test]
    fn set_refuses_to_replace_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("notopad.toml");
        std::fs::write(&config, "[editor\ntheme = dark").unwrap();
        let mut app = initialize_with(NotopadPaths::single(dir.path()));

        let err = run(&mut app, ConfigAction::Set("editor.theme".into(), "dark".into()));
        assert!(err.is_err());
        assert_eq!(
            std::fs::read_to_string(&config).unwrap(),
            "[editor\ntheme = dark"
        );
    }
}
