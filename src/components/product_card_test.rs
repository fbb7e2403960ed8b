use super::*;

#[test]
fn favorite_label_describes_next_action() {
    assert_eq!(favorite_label(false), "Adicionar aos favoritos");
    assert_eq!(favorite_label(true), "Remover dos favoritos");
}

#[test]
fn favorite_glyph_fills_when_active() {
    assert_ne!(favorite_glyph(true), favorite_glyph(false));
}

#[test]
fn reference_label_uses_product_code() {
    let product = Product {
        codigo: "7788".to_owned(),
        nome: "Caneca".to_owned(),
        referencia: "CN-01".to_owned(),
        imagem: String::new(),
        preco: "9.90".to_owned(),
        descricao: String::new(),
    };
    assert_eq!(reference_label(&product), "Ref: 7788");
}
