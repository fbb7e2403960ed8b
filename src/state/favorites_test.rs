use super::*;

fn product(codigo: &str) -> Product {
    Product {
        codigo: codigo.to_owned(),
        nome: format!("Produto {codigo}"),
        referencia: String::new(),
        imagem: String::new(),
        preco: "1.00".to_owned(),
        descricao: String::new(),
    }
}

#[test]
fn toggle_adds_then_removes() {
    let storage = MemoryStorage::shared();
    let mut favorites = Favorites::load(storage.clone());

    assert!(favorites.toggle("P1"));
    assert!(favorites.contains("P1"));
    assert_eq!(storage.get(FAVORITES_KEY), Ok(Some(r#"["P1"]"#.to_owned())));

    assert!(!favorites.toggle("P1"));
    assert!(!favorites.contains("P1"));
    assert_eq!(storage.get(FAVORITES_KEY), Ok(Some("[]".to_owned())));
}

#[test]
fn favorites_survive_reload_in_order() {
    let storage = MemoryStorage::shared();
    let mut favorites = Favorites::load(storage.clone());
    favorites.toggle("P2");
    favorites.toggle("P1");

    let reloaded = Favorites::load(storage);
    assert_eq!(reloaded.codes(), ["P2".to_owned(), "P1".to_owned()]);
}

#[test]
fn malformed_favorites_load_empty() {
    let storage = MemoryStorage::shared();
    storage.set(FAVORITES_KEY, "{oops").unwrap();
    assert!(Favorites::load(storage).is_empty());
}

#[test]
fn duplicate_stored_codes_are_collapsed() {
    let storage = MemoryStorage::shared();
    storage.set(FAVORITES_KEY, r#"["P1","P1","P2"]"#).unwrap();
    let favorites = Favorites::load(storage);
    assert_eq!(favorites.codes(), ["P1".to_owned(), "P2".to_owned()]);
}

#[test]
fn filter_keeps_all_when_not_restricted() {
    let products = vec![product("P1"), product("P2")];
    let favorites = Favorites::default();
    assert_eq!(filter_products(&products, &favorites, false).len(), 2);
}

#[test]
fn filter_only_favorites_keeps_catalog_order() {
    let products = vec![product("P1"), product("P2"), product("P3")];
    let mut favorites = Favorites::default();
    favorites.toggle("P3");
    favorites.toggle("P1");

    let visible = filter_products(&products, &favorites, true);
    assert_eq!(
        visible.iter().map(|p| p.codigo.as_str()).collect::<Vec<_>>(),
        vec!["P1", "P3"]
    );
}

#[test]
fn filter_only_favorites_with_none_is_empty() {
    let products = vec![product("P1")];
    assert!(filter_products(&products, &Favorites::default(), true).is_empty());
}
