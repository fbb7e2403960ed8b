//! Product detail dialog.
//!
//! Closes on Escape, on a backdrop click, or via the "Fechar" button. While
//! open, page scrolling is locked.

use leptos::prelude::*;

use crate::net::types::Product;
use crate::util::format::format_brl;

#[component]
pub fn ProductModal(product: Product, on_close: Callback<()>) -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                ev.prevent_default();
                on_close.run(());
            }
        });
        set_body_scroll_locked(true);
        on_cleanup(move || {
            handle.remove();
            set_body_scroll_locked(false);
        });
    }

    let on_backdrop = move |_| on_close.run(());
    let on_close_click = move |_| on_close.run(());
    let price = format_brl(&product.preco);

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div
                class="dialog dialog--product"
                role="dialog"
                aria-modal="true"
                aria-labelledby="product-modal-title"
                aria-describedby="product-modal-description"
                on:click=move |ev| ev.stop_propagation()
            >
                <h2 id="product-modal-title">{product.nome.clone()}</h2>
                <img class="dialog__product-image" src=product.imagem.clone() alt=product.nome.clone()/>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Código"</span>
                    <span class="dialog__profile-value">{product.codigo.clone()}</span>
                </div>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Referência"</span>
                    <span class="dialog__profile-value">{product.referencia.clone()}</span>
                </div>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Preço"</span>
                    <span class="dialog__profile-value">{price}</span>
                </div>
                <p id="product-modal-description" class="dialog__product-description">
                    {product.descricao.clone()}
                </p>
                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=on_close_click>"Fechar"</button>
                </div>
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let _ = body
        .style()
        .set_property("overflow", if locked { "hidden" } else { "" });
}
