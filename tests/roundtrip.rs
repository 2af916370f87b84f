use std::path::Path;

use fits_driver::{
    from_image, write_image, Dim1, Dim2, ImageDriver, Pixel, PixelBuffer, Settings, Shape,
};

fn store<T: Pixel, S: Shape>(path: &Path, shape: S, data: Vec<T>) {
    let img = PixelBuffer::from_vec(shape, data).expect("build buffer");
    write_image(path, &img).expect("write image");
}

fn load(path: &Path) -> Box<dyn ImageDriver> {
    from_image(Settings::new(path)).expect("load image")
}

/// Compare a reloaded driver against the pixels that were written.
fn assert_pixels<T: Pixel>(driver: &dyn ImageDriver, expected: &[T]) {
    assert_eq!(driver.size(), expected.len());
    for (i, &want) in expected.iter().enumerate() {
        let got = driver.value_at(i).expect("pixel in range");
        if want.is_undefined() {
            assert!(got.is_nan(), "pixel {i} should be undefined, got {got}");
        } else {
            assert_eq!(got.to_bits(), want.to_f64().to_bits(), "pixel {i}");
        }
    }
}

#[test]
fn test_roundtrip_1d_f32() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.fits");
    let data = vec![0.5f32, -1.25, f32::null_value(), 1.0e-30, 3.0e30];
    store(&path, Dim1 { x: 5 }, data.clone());

    let driver = load(&path);
    assert_eq!(driver.extents(), vec![5]);
    assert_eq!(driver.type_descr(), "32-bit floats");
    assert_pixels(driver.as_ref(), &data);
}

#[test]
fn test_roundtrip_1d_f64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("b.fits");
    let data = vec![std::f64::consts::PI, f64::null_value(), -0.0, 1.0e300];
    store(&path, Dim1 { x: 4 }, data.clone());

    let driver = load(&path);
    assert_eq!(driver.extents(), vec![4]);
    assert_eq!(driver.type_descr(), "64-bit floats");
    assert_pixels(driver.as_ref(), &data);
}

#[test]
fn test_roundtrip_2d_f32() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("c.fits");
    let mut data: Vec<f32> = (0..21).map(|v| v as f32 / 7.0).collect();
    data[10] = f32::null_value();
    store(&path, Dim2 { x: 7, y: 3 }, data.clone());

    let driver = load(&path);
    assert_eq!(driver.extents(), vec![7, 3]);
    assert_eq!(driver.type_descr(), "32-bit floats");
    assert_pixels(driver.as_ref(), &data);
    assert_eq!(driver.stats().undefined, 1);
}

#[test]
fn test_roundtrip_2d_f64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("d.fits");
    let data: Vec<f64> = (0..12).map(|v| (v as f64).sqrt()).collect();
    store(&path, Dim2 { x: 3, y: 4 }, data.clone());

    let driver = load(&path);
    assert_eq!(driver.extents(), vec![3, 4]);
    assert_eq!(driver.type_descr(), "64-bit floats");
    assert_pixels(driver.as_ref(), &data);
}

#[test]
fn test_single_pixel_images_load() {
    let dir = tempfile::tempdir().unwrap();

    let path_1d = dir.path().join("one.fits");
    store(&path_1d, Dim1 { x: 1 }, vec![42.0f64]);
    assert_eq!(load(&path_1d).size(), 1);

    let path_2d = dir.path().join("one_by_one.fits");
    store(&path_2d, Dim2 { x: 1, y: 1 }, vec![42.0f32]);
    let driver = load(&path_2d);
    assert_eq!(driver.size(), 1);
    assert_eq!(driver.value_at(0), Some(42.0));
}

#[test]
fn test_load_write_reload_100_by_50() {
    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("field.fits");
    let copy = dir.path().join("field_copy.fits");

    let shape = Dim2 { x: 100, y: 50 };
    let data: Vec<f32> = (0..5000)
        .map(|i| ((i % 100) as f32) * 0.5 + ((i / 100) as f32) * 100.0)
        .collect();
    store(&original, shape, data.clone());

    let first = load(&original);
    assert_eq!(first.size(), 5000);
    assert_eq!(first.extents(), vec![100, 50]);
    assert_eq!(first.settings().source, original);

    first.write_image(&copy).expect("write copy");
    let second = load(&copy);
    assert_eq!(second.extents(), first.extents());
    assert_eq!(second.type_descr(), first.type_descr());
    for i in 0..first.size() {
        assert_eq!(first.value_at(i), second.value_at(i), "pixel {i}");
    }
    assert_pixels(second.as_ref(), &data);
}
