use super::*;

#[test]
fn brl_formats_two_decimals() {
    assert_eq!(format_brl("12.5"), "R$\u{a0}12,50");
}

#[test]
fn brl_groups_thousands() {
    assert_eq!(format_brl("1234.56"), "R$\u{a0}1.234,56");
    assert_eq!(format_brl("1234567"), "R$\u{a0}1.234.567,00");
}

#[test]
fn brl_small_values() {
    assert_eq!(format_brl("0"), "R$\u{a0}0,00");
    assert_eq!(format_brl("0.1"), "R$\u{a0}0,10");
    assert_eq!(format_brl("999"), "R$\u{a0}999,00");
}

#[test]
fn brl_rounds_to_cents() {
    assert_eq!(format_brl("2.999"), "R$\u{a0}3,00");
}

#[test]
fn brl_negative_sign_leads() {
    assert_eq!(format_brl("-1500"), "-R$\u{a0}1.500,00");
}

#[test]
fn brl_negative_zero_has_no_sign() {
    assert_eq!(format_brl("-0.001"), "R$\u{a0}0,00");
}

#[test]
fn brl_accepts_surrounding_whitespace() {
    assert_eq!(format_brl(" 10 "), "R$\u{a0}10,00");
}

#[test]
fn brl_unparsable_is_verbatim() {
    assert_eq!(format_brl("sob consulta"), "sob consulta");
    assert_eq!(format_brl("NaN"), "NaN");
}

#[test]
fn date_label_matches_header_format() {
    assert_eq!(format_date_label(3, 23, 9, 2020), "Quarta, 23/09/2020");
}

#[test]
fn date_label_pads_day_and_month() {
    assert_eq!(format_date_label(0, 5, 1, 2024), "Domingo, 05/01/2024");
    assert_eq!(format_date_label(6, 1, 12, 2025), "Sábado, 01/12/2025");
}

#[test]
fn today_label_absent_outside_browser() {
    assert_eq!(today_label(), None);
}
