use slotflash_lib::validate::{check_missing_images, missing_images, unused_files};
use slotflash_lib::{Error, ImageFile, ImageSet, Manifest, PARTITION_NAMES, Result, image_name};
use std::path::PathBuf;

fn image_set(names: &[String]) -> ImageSet {
    ImageSet::from_files(
        names
            .iter()
            .map(|name| ImageFile {
                name: name.clone(),
                path: PathBuf::from("/images").join(name),
            })
            .collect(),
    )
}

fn all_images() -> Vec<String> {
    PARTITION_NAMES.iter().map(|p| image_name(p)).collect()
}

#[test]
fn complete_set_is_clean() {
    let images = image_set(&all_images());
    let manifest = Manifest::default();
    assert!(unused_files(&images, &manifest).is_empty());
    assert!(missing_images(&images, &manifest).is_empty());

    let mut asked = 0;
    let mut confirm = |_: &str| -> Result<bool> {
        asked += 1;
        Ok(true)
    };
    assert!(check_missing_images(&images, &manifest, &mut confirm).unwrap().is_empty());
    assert_eq!(asked, 0);
}

#[test]
fn extra_files_reported_once_each() {
    let mut names = all_images();
    names.push("extra.img".to_string());
    names.push("README".to_string());
    let images = image_set(&names);

    let unused: Vec<&str> = unused_files(&images, &Manifest::default())
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(unused, vec!["README", "extra.img"]);
}

#[test]
fn missing_images_follow_manifest_order() {
    let names: Vec<String> = all_images()
        .into_iter()
        .filter(|n| n != "vendor.img" && n != "abl.img" && n != "dsp.img")
        .collect();
    let images = image_set(&names);
    assert_eq!(
        missing_images(&images, &Manifest::default()),
        vec!["abl.img", "dsp.img", "vendor.img"]
    );
}

#[test]
fn first_refusal_stops_checking() {
    let names: Vec<String> = all_images()
        .into_iter()
        .filter(|n| n != "abl.img" && n != "dsp.img" && n != "vendor.img")
        .collect();
    let images = image_set(&names);

    let mut asked = Vec::new();
    let mut confirm = |name: &str| -> Result<bool> {
        asked.push(name.to_string());
        Ok(name == "abl.img")
    };
    let err = check_missing_images(&images, &Manifest::default(), &mut confirm).unwrap_err();
    assert!(matches!(err, Error::MissingImage(ref n) if n == "dsp.img"));
    assert_eq!(asked, vec!["abl.img", "dsp.img"]);
}

#[test]
fn acknowledged_images_are_returned() {
    let names: Vec<String> = all_images()
        .into_iter()
        .filter(|n| n != "tz.img")
        .collect();
    let images = image_set(&names);
    let mut confirm = |_: &str| -> Result<bool> { Ok(true) };
    let acknowledged = check_missing_images(&images, &Manifest::default(), &mut confirm).unwrap();
    assert_eq!(acknowledged, vec!["tz.img"]);
}
