use super::*;

#[test]
fn scalars_lerp_linearly() {
    assert_eq!(f64::blend(&0.0, &10.0, 0.5), 5.0);
    assert_eq!(f64::blend(&4.0, &8.0, 0.0), 4.0);
    assert_eq!(f64::blend(&4.0, &8.0, 1.0), 8.0);
}

#[test]
fn points_lerp_per_axis() {
    let p = Point::blend(&Point::new(0.0, 100.0), &Point::new(10.0, 0.0), 0.3);
    assert_eq!(p, Point::new(3.0, 70.0));
}

#[test]
fn colors_lerp_per_channel() {
    let c = Rgb::blend(&Rgb::new(0, 100, 200), &Rgb::new(100, 200, 0), 0.5);
    assert_eq!(c, Rgb { r: 50.0, g: 150.0, b: 100.0 });
}

#[test]
fn palettes_recurse_into_stops() {
    let a = Palette::editing();
    let b = Palette::finished();
    assert_eq!(Palette::blend(&a, &b, 0.0), a);
    assert_eq!(Palette::blend(&a, &b, 1.0), b);
    let mid = Palette::blend(&a, &b, 0.5);
    assert_eq!(mid.0[0].r, (a.0[0].r + b.0[0].r) / 2.0);
}

#[test]
fn opaque_values_snap_to_target() {
    assert!(bool::blend(&false, &true, 0.0));
    assert_eq!(
        String::blend(&"old".to_owned(), &"new".to_owned(), 0.1),
        "new"
    );
}

#[test]
fn unset_old_value_snaps_instead_of_interpolating() {
    assert_eq!(<Option<f64>>::blend(&None, &Some(5.0), 0.25), Some(5.0));
    assert_eq!(<Option<f64>>::blend(&Some(0.0), &Some(4.0), 0.25), Some(1.0));
}
