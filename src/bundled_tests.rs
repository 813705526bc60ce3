//! Unit tests for bundled resource installation.

use super::*;
use rstest::rstest;

const VERIFYING_KEY: BundledResource = BundledResource {
    name: "sprout-verifying.key",
    bytes: b"verifying key bytes",
};
const OUTPUT_PARAMS: BundledResource = BundledResource {
    name: "sapling-output.params",
    bytes: b"output params bytes",
};

fn target_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir is UTF-8");
    (dir, path)
}

#[rstest]
fn writes_every_resource() {
    let (_dir, target) = target_dir();

    install_bundled(&target, &[VERIFYING_KEY, OUTPUT_PARAMS]).expect("install succeeds");

    assert_eq!(
        fs::read(target.join("sprout-verifying.key").as_std_path()).expect("read resource"),
        VERIFYING_KEY.bytes
    );
    assert_eq!(
        fs::read(target.join("sapling-output.params").as_std_path()).expect("read resource"),
        OUTPUT_PARAMS.bytes
    );
}

#[rstest]
fn overwrites_an_existing_file() {
    let (_dir, target) = target_dir();
    let path = target.join("sprout-verifying.key");
    fs::write(path.as_std_path(), b"stale").expect("write stale file");

    install_bundled(&target, &[VERIFYING_KEY]).expect("install succeeds");

    assert_eq!(
        fs::read(path.as_std_path()).expect("read resource"),
        VERIFYING_KEY.bytes
    );
}

#[rstest]
fn creates_the_target_directory() {
    let (_dir, base) = target_dir();
    let target = base.join("nested").join("params");

    install_bundled(&target, &[VERIFYING_KEY]).expect("install succeeds");

    assert!(target.join("sprout-verifying.key").as_std_path().is_file());
}

#[rstest]
fn empty_resource_list_is_a_no_op() {
    let (_dir, base) = target_dir();
    let target = base.join("params");

    install_bundled(&target, &[]).expect("install succeeds");

    assert!(target.as_std_path().is_dir());
}
