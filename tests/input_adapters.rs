// Throttled pointer input and clamped resizing

use galaxy_field::input::{clamp_surface_size, normalize_pointer, MouseAdapter};
use galaxy_field::{InputState, SurfaceSize, Throttle};

#[test]
fn test_events_5ms_apart_produce_one_update() {
    let mut throttle = Throttle::new(16.0);
    let accepted = [0.0, 5.0].iter().filter(|&&t| throttle.try_accept(t)).count();
    assert_eq!(accepted, 1);
}

#[test]
fn test_events_20ms_apart_produce_two_updates() {
    let mut throttle = Throttle::new(16.0);
    let accepted = [0.0, 20.0].iter().filter(|&&t| throttle.try_accept(t)).count();
    assert_eq!(accepted, 2);
}

#[test]
fn test_mouse_adapter_writes_normalized_coordinates() {
    let mut adapter = MouseAdapter::new(16.0);
    let mut input = InputState::default();

    assert!(adapter.pointer_moved(&mut input, 0.0, 1920.0, 0.0, 1920.0, 1080.0));
    assert_eq!((input.mouse_x, input.mouse_y), (1.0, 1.0));

    // Dropped by the throttle, state unchanged
    assert!(!adapter.pointer_moved(&mut input, 10.0, 0.0, 1080.0, 1920.0, 1080.0));
    assert_eq!((input.mouse_x, input.mouse_y), (1.0, 1.0));

    assert!(adapter.pointer_moved(&mut input, 30.0, 0.0, 1080.0, 1920.0, 1080.0));
    assert_eq!((input.mouse_x, input.mouse_y), (-1.0, -1.0));
}

#[test]
fn test_pointer_y_is_inverted() {
    let (_, top) = normalize_pointer(0.0, 0.0, 100.0, 100.0);
    let (_, bottom) = normalize_pointer(0.0, 100.0, 100.0, 100.0);
    assert!(top > bottom);
}

#[test]
fn test_resize_never_exceeds_limits() {
    let requests = [
        SurfaceSize::new(3840, 2160),
        SurfaceSize::new(2560, 1600),
        SurfaceSize::new(1080, 2400),
        SurfaceSize::new(7680, 1080),
        SurfaceSize::new(1920, 1080),
    ];
    for requested in requests {
        let size = clamp_surface_size(requested, 1920, 1080);
        assert!(size.width <= 1920 && size.height <= 1080, "{:?}", size);
        let drift = (size.aspect_ratio() - requested.aspect_ratio()).abs() / requested.aspect_ratio();
        assert!(drift < 0.01, "{:?} -> {:?}", requested, size);
    }
}
