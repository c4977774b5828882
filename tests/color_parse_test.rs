// Tests for color literal parsing in the CLI adapter
use rmbg::color::{parse_color, ColorParseError};
use rmbg::transparency::Color;

#[test]
fn test_parse_rgb_comma_separated() {
    assert_eq!(parse_color("255,128,64"), Ok(Color::new(255, 128, 64)));
}

#[test]
fn test_parse_hex_color() {
    assert_eq!(parse_color("#FF8040"), Ok(Color::new(255, 128, 64)));
    assert_eq!(parse_color("#ff8040"), Ok(Color::new(255, 128, 64)));
    assert_eq!(parse_color("#FFFFFF"), Ok(Color::WHITE));
}

#[test]
fn test_parse_edge_values() {
    assert_eq!(parse_color("0,0,0"), Ok(Color::BLACK));
    assert_eq!(parse_color("0,255,128"), Ok(Color::new(0, 255, 128)));
}

#[test]
fn test_invalid_hex_length() {
    assert_eq!(parse_color("#FF80"), Err(ColorParseError::HexLength));
    assert_eq!(parse_color("#FF804000"), Err(ColorParseError::HexLength));
}

#[test]
fn test_invalid_hex_digits() {
    assert!(matches!(parse_color("#GGHHII"), Err(ColorParseError::Format(_))));
}

#[test]
fn test_invalid_rgb_format() {
    for literal in ["255,128", "-1,128,64", "256,128,64", "abc,128,64", "", "invalid_format", "1,2,3,4"] {
        assert!(
            matches!(parse_color(literal), Err(ColorParseError::Format(_))),
            "{literal:?} should be rejected"
        );
    }
}
