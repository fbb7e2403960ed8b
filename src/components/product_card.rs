//! Catalog card: image, name, reference, price, favorite toggle and detail button.

#[cfg(test)]
#[path = "product_card_test.rs"]
mod product_card_test;

use leptos::prelude::*;

use crate::net::types::Product;
use crate::state::favorites::Favorites;
use crate::util::format::format_brl;

fn favorite_label(is_favorite: bool) -> &'static str {
    if is_favorite { "Remover dos favoritos" } else { "Adicionar aos favoritos" }
}

fn favorite_glyph(is_favorite: bool) -> &'static str {
    if is_favorite { "\u{2665}" } else { "\u{2661}" }
}

fn reference_label(product: &Product) -> String {
    format!("Ref: {}", product.codigo)
}

#[component]
pub fn ProductCard(product: Product, favorites: RwSignal<Favorites>, on_open: Callback<Product>) -> impl IntoView {
    let is_favorite = {
        let codigo = product.codigo.clone();
        Signal::derive(move || favorites.with(|f| f.contains(&codigo)))
    };

    let toggle_code = product.codigo.clone();
    let on_toggle = move |_| {
        favorites.update(|f| {
            f.toggle(&toggle_code);
        });
    };

    let price = format_brl(&product.preco);
    let reference = reference_label(&product);
    let name = product.nome.clone();
    let image = product.imagem.clone();
    let alt = product.nome.clone();

    view! {
        <article class="product-card">
            <button
                class="product-card__favorite"
                class:product-card__favorite--active=move || is_favorite.get()
                aria-label=move || favorite_label(is_favorite.get())
                aria-pressed=move || is_favorite.get().to_string()
                on:click=on_toggle
            >
                {move || favorite_glyph(is_favorite.get())}
            </button>
            <img class="product-card__image" src=image alt=alt loading="lazy"/>
            <div class="product-card__body">
                <h3 class="product-card__name">{name}</h3>
                <p class="product-card__ref">{reference}</p>
                <p class="product-card__price">{price}</p>
                <button class="btn btn--primary product-card__open" on:click=move |_| on_open.run(product.clone())>
                    "CONFIRA"
                </button>
            </div>
        </article>
    }
}
