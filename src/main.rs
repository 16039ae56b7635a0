use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use load_tracking::config::database::DatabaseConfig;
use load_tracking::config::environment::EnvironmentConfig;
use load_tracking::database::{ensure_schema, mask_database_url};
use load_tracking::repositories::{LoadRepository, MemoryLoadRepository, PgLoadRepository};
use load_tracking::routes::create_app;
use load_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("📦 Load Tracking - API de seguimiento de cargas");
    info!("================================================");

    let config = EnvironmentConfig::default();

    // Elegir almacenamiento: PostgreSQL si hay DATABASE_URL accesible,
    // si no, repositorio en memoria con datos de ejemplo
    let repository: Arc<dyn LoadRepository> = match &config.database_url {
        Some(url) => match DatabaseConfig::new(url.clone()).create_pool().await {
            Ok(pool) => {
                ensure_schema(&pool).await?;
                info!("✅ PostgreSQL conectado: {}", mask_database_url(url));
                Arc::new(PgLoadRepository::new(pool))
            }
            Err(e) => {
                warn!("⚠️ Error conectando a PostgreSQL: {}", e);
                warn!("⚠️ Usando repositorio en memoria con datos de ejemplo");
                Arc::new(MemoryLoadRepository::with_sample_data().await)
            }
        },
        None => {
            warn!("⚠️ DATABASE_URL no definida - usando repositorio en memoria");
            Arc::new(MemoryLoadRepository::with_sample_data().await)
        }
    };

    let state = AppState::new(repository, config.clone());
    let app = create_app(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /api/health - Health check");
    info!("📦 Endpoints de cargas:");
    info!("   GET   /api/loads - Listar todas las cargas");
    info!("   GET   /api/loads/status/:status - Cargas por estado");
    info!("   GET   /api/loads/date/:date - Cargas por fecha (YYYY-MM-DD)");
    info!("   GET   /api/loads/calendar/:date - Celda IN/OUT del calendario");
    info!("   GET   /api/loads/board/:date - Tablero por columnas de estado");
    info!("   GET   /api/loads/:id - Obtener carga");
    info!("   POST  /api/loads - Crear carga");
    info!("   POST  /api/loads/upload/file - Crear carga desde fichero parseado");
    info!("   PATCH /api/loads/:id/status - Transicionar estado");
    info!("   PATCH /api/loads/:id/deliver - Marcar entregada");
    info!("   PATCH /api/loads/:id/warehouse - Actualizar datos de almacén");
    info!("   PATCH /api/loads/:id/transport - Actualizar datos de transporte");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
