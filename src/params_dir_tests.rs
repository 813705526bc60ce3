//! Unit tests for parameter directory resolution.

use super::*;
use rstest::rstest;

#[rstest]
fn env_override_wins() {
    temp_env::with_var(PARAMS_DIR_ENV, Some("/custom/params"), || {
        assert_eq!(
            default_params_dir(),
            Some(Utf8PathBuf::from("/custom/params"))
        );
    });
}

#[rstest]
fn empty_override_is_ignored() {
    temp_env::with_var(PARAMS_DIR_ENV, Some(""), || {
        if let Some(dir) = default_params_dir() {
            assert_eq!(dir.file_name(), Some(PARAMS_DIR_NAME));
        }
    });
}

#[rstest]
fn unset_override_falls_back_to_data_directory() {
    temp_env::with_var_unset(PARAMS_DIR_ENV, || {
        if let Some(dir) = default_params_dir() {
            assert_eq!(dir.file_name(), Some(PARAMS_DIR_NAME));
            assert!(dir.is_absolute());
        }
    });
}
