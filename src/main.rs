use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use formforge::application::services::ProcessingService;
use formforge::infrastructure::assets::{PdfTemplateStore, XlsxSchemaSource};
use formforge::infrastructure::extraction::CompositeExtractor;
use formforge::infrastructure::llm::OpenAiClient;
use formforge::infrastructure::observability::init_tracing;
use formforge::infrastructure::ocr::OcrFactory;
use formforge::presentation::{create_router, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    init_tracing(&settings.logging);

    let ocr_engine = OcrFactory::create(&settings.ocr)?;
    let extractor = Arc::new(CompositeExtractor::with_defaults(ocr_engine));
    let llm_client = Arc::new(OpenAiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.model.clone(),
        settings.llm.base_url.clone(),
        settings.llm.timeout_secs,
    ));
    let schema_source = Arc::new(XlsxSchemaSource::new(&settings.assets.schema_path));
    let template_store = Arc::new(PdfTemplateStore::new(&settings.assets.template_path));

    let processing_service = Arc::new(ProcessingService::new(
        extractor,
        llm_client,
        schema_source,
        template_store,
    ));

    let state = AppState {
        processing_service,
        settings: settings.clone(),
    };
    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!(%addr, model = %settings.llm.model, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
