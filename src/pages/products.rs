//! Product catalog page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing page. The product list is read through the shared
//! `ResourceCache` so revisiting the page inside the freshness window reuses
//! the last response instead of refetching.
//!
//! DESIGN
//! ======
//! - Unauthenticated visitors are redirected to `/login` once the stored
//!   session has been read.
//! - A 401/403 from the API ends the session; the redirect guard then fires.
//! - Logout clears both the session and the product cache.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use leptos::prelude::*;
use leptos_meta::{Meta, Title};
use leptos_router::hooks::use_navigate;

use crate::app::StorefrontApi;
use crate::components::product_card::ProductCard;
use crate::components::product_modal::ProductModal;
use crate::net::api::PRODUCTS_PATH;
use crate::net::cache::ResourceCache;
use crate::net::types::Product;
use crate::state::favorites::{Favorites, filter_products};
use crate::state::session::SessionStore;
use crate::util::auth::install_unauth_redirect;
use crate::util::format::today_label;
use crate::util::resource::use_resource;

const SKELETON_CARDS: usize = 8;
const FALLBACK_USER_NAME: &str = "Cliente";

/// Name shown in the header.
fn header_user_name(store: &SessionStore) -> String {
    store
        .user()
        .and_then(|u| u.display_name())
        .unwrap_or(FALLBACK_USER_NAME)
        .to_owned()
}

/// Cache key for the product list; `None` while logged out.
fn products_key(store: &SessionStore) -> Option<String> {
    store.is_authenticated().then(|| PRODUCTS_PATH.to_owned())
}

/// Products to render, in catalog order.
fn visible_products(products: Option<&[Product]>, favorites: &Favorites, only_favorites: bool) -> Vec<Product> {
    products
        .map(|list| {
            filter_products(list, favorites, only_favorites)
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let favorites = expect_context::<RwSignal<Favorites>>();
    let cache = expect_context::<ResourceCache<Vec<Product>>>();
    let api = expect_context::<StorefrontApi>();
    let navigate = use_navigate();

    install_unauth_redirect(session, navigate);

    let products = use_resource(cache.clone(), api, move || session.with(products_key));

    Effect::new(move || {
        if products.error().is_some_and(|e| e.is_auth_failure()) {
            leptos::logging::warn!("product request rejected; ending session");
            session.update(SessionStore::clear_session);
        }
    });

    let selected = RwSignal::new(None::<Product>);
    let only_favorites = RwSignal::new(false);
    let today = RwSignal::new(String::new());

    Effect::new(move || {
        today.set(today_label().unwrap_or_default());
    });

    let on_logout = Callback::new(move |()| {
        session.update(SessionStore::clear_session);
        cache.clear();
    });
    let open_product = Callback::new(move |product: Product| selected.set(Some(product)));
    let close_product = Callback::new(move |()| selected.set(None));

    let user_name = move || session.with(header_user_name);
    let visible = move || {
        let only = only_favorites.get();
        let data = products.data();
        favorites.with(|favs| visible_products(data.as_deref().map(Vec::as_slice), favs, only))
    };
    let is_empty = move || !products.is_loading() && products.error().is_none() && visible().is_empty();

    view! {
        <Title text="Produtos - Innovation Brindes"/>
        <Meta name="description" content="Catálogo de produtos Innovation Brindes"/>
        <Show
            when=move || session.with(SessionStore::is_authenticated)
            fallback=|| view! { <div class="products-page products-page--empty"></div> }
        >
            <div class="products-page">
                <header class="products-header">
                    <span class="products-header__brand">"Innovation Brindes"</span>
                    <div class="products-header__user">
                        <span class="products-header__name">{user_name}</span>
                        <span class="products-header__date">{move || today.get()}</span>
                        <button class="btn products-header__logout" on:click=move |_| on_logout.run(())>
                            "Sair"
                        </button>
                    </div>
                </header>

                <main class="products-main">
                    <label class="products-filter">
                        <input
                            type="checkbox"
                            prop:checked=move || only_favorites.get()
                            on:change=move |ev| only_favorites.set(event_target_checked(&ev))
                        />
                        "Mostrar apenas favoritos"
                    </label>

                    <Show when=move || products.is_loading()>
                        <div class="products-grid products-grid--loading" aria-busy="true">
                            {(0..SKELETON_CARDS)
                                .map(|_| {
                                    view! {
                                        <div class="product-skeleton">
                                            <div class="product-skeleton__image"></div>
                                            <div class="product-skeleton__line"></div>
                                            <div class="product-skeleton__line product-skeleton__line--short"></div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </Show>

                    {move || {
                        products
                            .error()
                            .map(|err| {
                                view! {
                                    <div class="products-error" role="alert">
                                        <p class="products-error__title">"Erro ao carregar produtos"</p>
                                        <p class="products-error__detail">{err.to_string()}</p>
                                        <button
                                            class="btn btn--primary"
                                            disabled=move || products.is_validating()
                                            on:click=move |_| products.revalidate()
                                        >
                                            "Tentar novamente"
                                        </button>
                                    </div>
                                }
                            })
                    }}

                    <Show when=is_empty>
                        <p class="products-empty">"Nenhum produto encontrado."</p>
                    </Show>

                    <div class="products-grid">
                        <For
                            each=visible
                            key=|product: &Product| product.codigo.clone()
                            children=move |product: Product| {
                                view! { <ProductCard product=product favorites=favorites on_open=open_product/> }
                            }
                        />
                    </div>
                </main>

                {move || selected.get().map(|product| view! { <ProductModal product=product on_close=close_product/> })}
            </div>
        </Show>
    }
}
