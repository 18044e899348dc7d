use macroquad::input::KeyCode;
use snake_pilot_core::Direction;
use snake_pilot_rendering_macroquad::frame_input_from_keys;

#[test]
fn directions_keep_press_order_and_ignore_other_keys() {
    let input = frame_input_from_keys(&[KeyCode::W, KeyCode::Q, KeyCode::Right, KeyCode::S]);

    assert_eq!(
        input.directions,
        vec![Direction::Up, Direction::Right, Direction::Down]
    );
    assert!(!input.pause_toggled);
    assert!(!input.quit);
}

#[test]
fn control_keys_raise_their_flags() {
    let input = frame_input_from_keys(&[
        KeyCode::Space,
        KeyCode::R,
        KeyCode::Y,
        KeyCode::N,
        KeyCode::Escape,
    ]);

    assert!(input.directions.is_empty());
    assert!(input.pause_toggled);
    assert!(input.restart);
    assert!(input.confirm_new_game);
    assert!(input.decline_new_game);
    assert!(input.quit);
}

#[test]
fn replaying_a_key_script_is_deterministic() {
    let script: [&[KeyCode]; 4] = [
        &[KeyCode::Left],
        &[],
        &[KeyCode::Up, KeyCode::Space],
        &[KeyCode::D],
    ];

    let first: Vec<_> = script.iter().map(|keys| frame_input_from_keys(keys)).collect();
    let second: Vec<_> = script.iter().map(|keys| frame_input_from_keys(keys)).collect();

    assert_eq!(first, second);
    assert_eq!(first[1], Default::default());
    assert_eq!(first[2].directions, vec![Direction::Up]);
    assert!(first[2].pause_toggled);
}
