use super::*;

#[test]
fn submit_label_reflects_busy_state() {
    assert_eq!(submit_label(false), "Login");
    assert_eq!(submit_label(true), "Entrando...");
}

#[test]
fn credentials_trim_email_only() {
    let request = credentials("  ana@innova.com ", " s3nha ");
    assert_eq!(request.email, "ana@innova.com");
    assert_eq!(request.senha, " s3nha ");
}
