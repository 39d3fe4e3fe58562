#[cfg(feature = "ssr")]
const DEFAULT_UPSTREAM: &str = "http://127.0.0.1:3001";

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context as _;
    use genius_chat::{ClientConfig, HttpTransport};
    use genius_web::server::{api_router, AppState};
    use genius_web::App;
    use leptos::config::get_configuration;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;

    tracing_subscriber::fmt::init();

    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    // Upstream completion service; endpoint and timeout come from GENIUS_* vars.
    let upstream_url =
        std::env::var("GENIUS_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());
    let upstream = ClientConfig::from_env()?.with_base_url(upstream_url);
    let app_state = AppState {
        upstream: Arc::new(HttpTransport::new(&upstream)),
    };
    tracing::info!(upstream = %upstream.url(), "relaying /api/code");

    let app = api_router(app_state)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options);

    tracing::info!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(feature = "ssr")]
fn shell(options: leptos::config::LeptosOptions) -> impl leptos::IntoView {
    use genius_web::App;
    use leptos::prelude::*;
    use leptos_meta::*;

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[cfg(not(feature = "ssr"))]
pub fn main() {}
