use super::*;

#[test]
fn scale_modes_against_reference() {
    let se = Device::IphoneSe.profile();
    assert_eq!(ScaleMode::ConstantPixel.ui_scale(se.width, se.height), 1.0);
    assert_eq!(ScaleMode::ScaleWithScreen.ui_scale(se.width, se.height), 1.0);
    assert_eq!(ScaleMode::ScaleWithScreen.ui_scale(320.0, 320.0), 1.0);
    assert_eq!(ScaleMode::ConstantPhysical.ui_scale(320.0, 640.0), 2.0);
}

#[test]
fn scaled_controls_respect_minimums() {
    assert_eq!(
        ScaledControls::for_scale(1.0),
        ScaledControls {
            button_width: 40,
            button_height: 14,
            font_size: 11,
            input_height: 14,
        }
    );
    assert_eq!(
        ScaledControls::for_scale(0.1),
        ScaledControls {
            button_width: 20,
            button_height: 8,
            font_size: 6,
            input_height: 8,
        }
    );
}

#[test]
fn match_slider_interpolates_between_sides() {
    assert_eq!(match_square_side(180.0, 320.0, 0.0).unwrap(), 180.0);
    assert_eq!(match_square_side(180.0, 320.0, 1.0).unwrap(), 320.0);
    assert_eq!(match_square_side(180.0, 320.0, 0.5).unwrap(), 250.0);
    assert_eq!(match_square_side(180.0, 320.0, 7.0).unwrap(), 320.0);
    assert!(match_square_side(180.0, 320.0, f64::NAN).is_err());

    assert_eq!(match_slider_rgb(0.0), [255, 0, 0]);
    assert_eq!(match_slider_rgb(0.5), [255, 255, 0]);
    assert_eq!(match_slider_rgb(1.0), [0, 255, 0]);
}

#[test]
fn device_selection_falls_back() {
    assert_eq!(Device::parse_lenient("pixel"), Device::IphoneSe);
    assert_eq!(Device::select::<&str>(&[]), Device::ALL.to_vec());
    assert_eq!(
        Device::select(&["nokia"]),
        vec![Device::IphoneSe, Device::Iphone14, Device::Ipad]
    );
    assert_eq!(Device::select(&["ipad", "nokia"]), vec![Device::Ipad]);
    assert_eq!("constantPhysical".parse::<ScaleMode>().unwrap(), ScaleMode::ConstantPhysical);
}
