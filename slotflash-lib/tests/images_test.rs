use slotflash_lib::{Error, ImageDir, ImageFile, ImageSet};
use std::fs;
use std::path::{MAIN_SEPARATOR, PathBuf};
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), b"img").unwrap();
}

#[test]
fn resolve_rejects_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = ImageDir::resolve(Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::NotADirectory(ref p) if *p == missing));
    assert!(err.to_string().ends_with("is not a valid directory!"));
}

#[test]
fn resolve_rejects_regular_file() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "boot.img");
    let file = dir.path().join("boot.img");
    assert!(ImageDir::resolve(Some(&file)).is_err());
}

#[test]
fn resolve_defaults_to_current_directory() {
    let resolved = ImageDir::resolve(None).unwrap();
    assert!(resolved.path().is_absolute());
    assert_eq!(
        fs::canonicalize(resolved.path()).unwrap(),
        fs::canonicalize(std::env::current_dir().unwrap()).unwrap()
    );
}

#[test]
fn resolved_display_has_trailing_separator() {
    let dir = TempDir::new().unwrap();
    let resolved = ImageDir::resolve(Some(dir.path())).unwrap();
    assert!(resolved.to_string().ends_with(MAIN_SEPARATOR));
    assert!(resolved.path().is_absolute());
}

#[test]
fn collect_keeps_only_regular_files_sorted() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "system.img");
    touch(&dir, "boot.img");
    touch(&dir, "notes.txt");
    fs::create_dir(dir.path().join("abl.img")).unwrap();

    let images = ImageSet::collect(&ImageDir::resolve(Some(dir.path())).unwrap()).unwrap();
    let names: Vec<&str> = images.names().collect();
    assert_eq!(names, vec!["boot.img", "notes.txt", "system.img"]);
    for file in images.files() {
        assert!(file.path.is_absolute());
        assert!(file.path.ends_with(&file.name));
    }
}

#[test]
fn collect_empty_directory() {
    let dir = TempDir::new().unwrap();
    let images = ImageSet::collect(&ImageDir::resolve(Some(dir.path())).unwrap()).unwrap();
    assert!(images.is_empty());
}

fn file(name: &str) -> ImageFile {
    ImageFile {
        name: name.to_string(),
        path: PathBuf::from("/images").join(name),
    }
}

#[test]
fn find_prefers_exact_name() {
    let images = ImageSet::from_files(vec![
        file("vendor_boot.img"),
        file("aboot.img"),
        file("boot.img"),
    ]);
    assert_eq!(images.find_for("boot").unwrap().name, "boot.img");
}

#[test]
fn find_falls_back_to_first_suffix_match() {
    let images = ImageSet::from_files(vec![file("vendor_boot.img"), file("my_boot.img")]);
    assert_eq!(images.find_for("boot").unwrap().name, "my_boot.img");
    assert!(images.find_for("system").is_none());
}
