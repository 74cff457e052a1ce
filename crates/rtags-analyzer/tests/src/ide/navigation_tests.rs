use super::*;

#[test]
fn one_based_conversion_rejects_zero() {
    assert_eq!(IdePosition::from_one_based(20, 21), Some(IdePosition::new(19, 20)));
    assert_eq!(IdePosition::from_one_based(0, 3), None);
    assert_eq!(IdePosition::from_one_based(3, 0), None);
    assert_eq!(IdePosition::new(16, 7).one_based(), (17, 8));
}

#[test]
fn target_from_locations() {
    let a = Location::new("/a.h", IdePosition::new(1, 1));
    let b = Location::new("/b.h", IdePosition::new(2, 2));

    assert_eq!(NavigationTarget::from_locations(Vec::new()), None);

    let single = NavigationTarget::from_locations(vec![a.clone()]).unwrap();
    assert!(single.is_direct_jump());
    assert_eq!(single, NavigationTarget::Single(a.clone()));

    let multiple = NavigationTarget::from_locations(vec![a.clone(), b.clone()]).unwrap();
    assert!(!multiple.is_direct_jump());
    assert_eq!(multiple, NavigationTarget::Multiple(vec![a, b]));
}
