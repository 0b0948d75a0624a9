//! Conversion des événements pointeur winit vers les types Servo.
//!
//! Seuls la souris et la molette sont relayés à la webview ; la surface
//! occupe toute la zone client, donc aucune translation de coordonnées.

use servo::{InputEvent, MouseButton as ServoMouseButton, MouseButtonAction, MouseButtonEvent};
use servo::{MouseLeftViewportEvent, MouseMoveEvent, WheelDelta, WheelEvent, WheelMode};
use webrender_api::units::DevicePoint;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta};

/// Hauteur d'une « ligne » de défilement, en pixels.
const LINE_HEIGHT: f32 = 76.0;

pub fn device_point(position: PhysicalPosition<f64>) -> DevicePoint {
    DevicePoint::new(position.x as f32, position.y as f32)
}

pub fn mouse_move(point: DevicePoint) -> InputEvent {
    InputEvent::MouseMove(MouseMoveEvent::new(point.into()))
}

pub fn mouse_left() -> InputEvent {
    InputEvent::MouseLeftViewport(MouseLeftViewportEvent::default())
}

pub fn mouse_button(state: ElementState, button: WinitMouseButton, point: DevicePoint) -> InputEvent {
    InputEvent::MouseButton(MouseButtonEvent::new(
        button_action(state),
        servo_button(button),
        point.into(),
    ))
}

pub fn wheel(delta: MouseScrollDelta, point: DevicePoint) -> InputEvent {
    InputEvent::Wheel(WheelEvent::new(wheel_delta(delta), point.into()))
}

fn button_action(state: ElementState) -> MouseButtonAction {
    match state {
        ElementState::Pressed => MouseButtonAction::Down,
        ElementState::Released => MouseButtonAction::Up,
    }
}

fn servo_button(button: WinitMouseButton) -> ServoMouseButton {
    match button {
        WinitMouseButton::Left => ServoMouseButton::Left,
        WinitMouseButton::Right => ServoMouseButton::Right,
        WinitMouseButton::Middle => ServoMouseButton::Middle,
        WinitMouseButton::Back => ServoMouseButton::Back,
        WinitMouseButton::Forward => ServoMouseButton::Forward,
        WinitMouseButton::Other(id) => ServoMouseButton::Other(id),
    }
}

fn wheel_delta(delta: MouseScrollDelta) -> WheelDelta {
    let (x, y, mode) = match delta {
        MouseScrollDelta::LineDelta(dx, dy) => (
            (dx * LINE_HEIGHT) as f64,
            (dy * LINE_HEIGHT) as f64,
            WheelMode::DeltaLine,
        ),
        MouseScrollDelta::PixelDelta(delta) => (delta.x, delta.y, WheelMode::DeltaPixel),
    };
    WheelDelta { x, y, z: 0.0, mode }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_delta_is_scaled() {
        let delta = wheel_delta(MouseScrollDelta::LineDelta(0.0, -2.0));
        assert_eq!(delta.x, 0.0);
        assert_eq!(delta.y, -152.0);
        assert_eq!(delta.z, 0.0);
        assert!(matches!(delta.mode, WheelMode::DeltaLine));
    }

    #[test]
    fn test_pixel_delta_is_passed_through() {
        let delta = wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(3.5, 12.0)));
        assert_eq!(delta.x, 3.5);
        assert_eq!(delta.y, 12.0);
        assert!(matches!(delta.mode, WheelMode::DeltaPixel));
    }

    #[test]
    fn test_button_mapping() {
        assert!(matches!(servo_button(WinitMouseButton::Left), ServoMouseButton::Left));
        assert!(matches!(servo_button(WinitMouseButton::Middle), ServoMouseButton::Middle));
        assert!(matches!(
            servo_button(WinitMouseButton::Other(7)),
            ServoMouseButton::Other(7)
        ));
    }

    #[test]
    fn test_button_action() {
        assert!(matches!(button_action(ElementState::Pressed), MouseButtonAction::Down));
        assert!(matches!(button_action(ElementState::Released), MouseButtonAction::Up));
    }

    #[test]
    fn test_device_point() {
        let point = device_point(PhysicalPosition::new(10.5, 20.25));
        assert_eq!(point.x, 10.5);
        assert_eq!(point.y, 20.25);
    }
}
