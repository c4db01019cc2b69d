use super::*;

#[test]
fn data_dir_is_namespaced() {
    let dir = get_data_dir().unwrap();
    assert!(dir.ends_with(APP_NAME));
}

#[test]
fn log_dir_lives_under_data_dir() {
    let dir = get_log_dir().unwrap();
    assert_eq!(dir.parent(), get_data_dir().as_deref());
    assert!(dir.ends_with(LOG_DIR));
}

#[test]
fn state_file_lives_in_data_dir() {
    let path = get_state_file_path().unwrap();
    assert_eq!(path.parent(), get_data_dir().as_deref());
    assert!(path.ends_with(STATE_FILE));
}

