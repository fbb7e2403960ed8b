//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ApiConfig;
use crate::net::api::ApiClient;
use crate::net::cache::{CacheConfig, ResourceCache};
use crate::net::transport::BrowserTransport;
use crate::net::types::Product;
use crate::pages::{login::LoginPage, products::ProductsPage};
use crate::state::favorites::Favorites;
use crate::state::session::SessionStore;
use crate::util::storage::select_storage;

/// API client shared through context; tokens come from the session signal.
pub type StorefrontApi = ApiClient<BrowserTransport, RwSignal<SessionStore>>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session, favorites, product cache and API client, then sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionStore::default());
    let favorites = RwSignal::new(Favorites::default());
    let products = ResourceCache::<Vec<Product>>::new(CacheConfig::default());
    let api: StorefrontApi = ApiClient::new(ApiConfig::from_build_env(), BrowserTransport, session);

    // Persistent storage exists only in the browser; the first render must
    // match the server, so stored state is loaded once the client is live.
    Effect::new(move || {
        let storage = select_storage();
        session.set(SessionStore::hydrate(storage.clone()));
        favorites.set(Favorites::load(storage));
    });

    provide_context(session);
    provide_context(favorites);
    provide_context(products);
    provide_context(api);

    view! {
        <Stylesheet id="leptos" href="/pkg/innova-storefront.css"/>
        <Title text="Innovation Brindes"/>

        <Router>
            <Routes fallback=|| "Página não encontrada.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("produtos") view=ProductsPage/>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/produtos"/> }/>
            </Routes>
        </Router>
    }
}
