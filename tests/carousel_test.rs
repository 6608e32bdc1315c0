use starscape::carousel::Carousel;

#[test]
fn starts_at_first_slide() {
    let carousel = Carousel::new(4, 4).unwrap();
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.slide_visibility(), &[true, false, false, false]);
    assert_eq!(carousel.link_visibility(), &[true, false, false, false]);
}

#[test]
fn next_wraps_modulo_slide_count() {
    let mut carousel = Carousel::new(4, 4).unwrap();
    for n in 1..=9 {
        carousel.next();
        assert_eq!(carousel.index(), n % 4);
    }
}

#[test]
fn prev_from_first_wraps_to_last() {
    let mut carousel = Carousel::new(4, 4).unwrap();
    carousel.prev();
    assert_eq!(carousel.index(), 3);
}

#[test]
fn prev_undoes_next() {
    let mut carousel = Carousel::new(4, 4).unwrap();
    carousel.next();
    carousel.next();
    carousel.prev();
    carousel.prev();
    assert_eq!(carousel.index(), 0);
}

#[test]
fn exactly_one_slide_and_link_visible_after_any_walk() {
    let mut carousel = Carousel::new(4, 4).unwrap();
    let steps = [1, 1, -1, 1, -1, -1, -1, 1, 1];
    for step in steps {
        if step > 0 {
            carousel.next();
        } else {
            carousel.prev();
        }
        let visible_slides = carousel.slide_visibility().iter().filter(|v| **v).count();
        let visible_links = carousel.link_visibility().iter().filter(|v| **v).count();
        assert_eq!(visible_slides, 1);
        assert_eq!(visible_links, 1);
        assert!(carousel.slide_visibility()[carousel.index()]);
        assert!(carousel.link_visibility()[carousel.index()]);
    }
}

#[test]
fn mismatched_counts_fail_construction() {
    assert!(Carousel::new(4, 3).is_err());
    assert!(Carousel::new(2, 5).is_err());
}

#[test]
fn empty_carousel_fails_construction() {
    assert!(Carousel::new(0, 0).is_err());
}

#[test]
fn single_slide_carousel_stays_put() {
    let mut carousel = Carousel::new(1, 1).unwrap();
    carousel.next();
    assert_eq!(carousel.index(), 0);
    carousel.prev();
    assert_eq!(carousel.index(), 0);
    assert_eq!(carousel.slide_visibility(), &[true]);
}
