use super::*;
use crate::net::types::UserProfile;
use crate::util::storage::MemoryStorage;

fn product(codigo: &str) -> Product {
    Product {
        codigo: codigo.to_owned(),
        nome: format!("Produto {codigo}"),
        referencia: String::new(),
        imagem: String::new(),
        preco: "10".to_owned(),
        descricao: String::new(),
    }
}

fn signed_in(name: Option<&str>) -> SessionStore {
    let mut store = SessionStore::empty(MemoryStorage::shared());
    let user = UserProfile {
        name: name.map(ToOwned::to_owned),
        ..UserProfile::default()
    };
    store.set_session("tok-1", user, false).unwrap();
    store
}

// =============================================================
// Header
// =============================================================

#[test]
fn header_shows_user_name() {
    assert_eq!(header_user_name(&signed_in(Some("Ana"))), "Ana");
}

#[test]
fn header_falls_back_to_generic_name() {
    assert_eq!(header_user_name(&signed_in(None)), "Cliente");
    assert_eq!(header_user_name(&SessionStore::default()), "Cliente");
}

// =============================================================
// Fetch key
// =============================================================

#[test]
fn products_key_requires_token() {
    assert_eq!(products_key(&SessionStore::default()), None);
    assert_eq!(products_key(&signed_in(Some("Ana"))), Some(PRODUCTS_PATH.to_owned()));
}

// =============================================================
// Visible list
// =============================================================

#[test]
fn visible_products_empty_before_data() {
    assert!(visible_products(None, &Favorites::default(), false).is_empty());
}

#[test]
fn visible_products_honors_favorites_filter() {
    let list = vec![product("1"), product("2"), product("3")];
    let mut favorites = Favorites::default();
    favorites.toggle("2");

    let all = visible_products(Some(&list), &favorites, false);
    assert_eq!(all.len(), 3);

    let only = visible_products(Some(&list), &favorites, true);
    assert_eq!(only, vec![product("2")]);
}
