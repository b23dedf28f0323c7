//src/main.rs

use axum::{
    Router,
    routing::{get, post, put},
};
use tokio::net::TcpListener;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger antes de qualquer outra coisa.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().expect("Falha ao inicializar o estado da aplicação.");

    // Catálogo de materiais
    let material_routes = Router::new()
        .route(
            "/",
            post(handlers::materials::create_material).get(handlers::materials::list_materials),
        )
        .route(
            "/{id}",
            put(handlers::materials::update_material).delete(handlers::materials::delete_material),
        );

    // Efetivo policial
    let personnel_routes = Router::new()
        .route(
            "/",
            post(handlers::personnel::create_personnel).get(handlers::personnel::list_personnel),
        )
        .route(
            "/{id}",
            put(handlers::personnel::update_personnel)
                .delete(handlers::personnel::delete_personnel),
        );

    // Cautelas: saída e devolução de material
    let cautela_routes = Router::new()
        .route(
            "/",
            post(handlers::cautelas::checkout).get(handlers::cautelas::list_cautelas),
        )
        .route("/{id}/devolucao", post(handlers::cautelas::devolver));

    // Relatórios e exportações
    let report_routes = Router::new()
        .route("/inventory.csv", get(handlers::reports::inventory_csv))
        .route("/cautelas.csv", get(handlers::reports::cautelas_csv));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/materials", material_routes)
        .nest("/api/personnel", personnel_routes)
        .nest("/api/cautelas", cautela_routes)
        .nest("/api/reports", report_routes)
        .route("/api/dashboard", get(handlers::reports::dashboard))
        .route("/api/logs", get(handlers::audit::list_logs))
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        .route("/api/documents/livro", post(handlers::documents::gerar_livro))
        .route("/api/backup", get(handlers::backup::create_backup))
        .route("/api/restore", post(handlers::backup::restore_backup))
        .with_state(app_state);

    // Inicia o servidor
    let addr = AppState::bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!(
        "🚀 Servidor escutando em {}",
        listener
            .local_addr()
            .expect("Falha ao ler o endereço local")
    );
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
