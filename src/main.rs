use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicery::{
  adapters::http::{
    AuthMiddleware, RequestIdMiddleware, configure_account_routes, configure_invoice_routes,
    configure_public_auth_routes,
  },
  application::auth::{
    ChangePasswordUseCase, DeleteUserUseCase, EditUserUseCase, GetCurrentUserUseCase,
    LoginUserUseCase, RegisterUserUseCase,
  },
  application::invoice::{
    ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase, EditInvoiceUseCase,
    ExportInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
  },
  domain::auth::ports::TokenIssuer,
  domain::auth::services::AuthService,
  domain::invoice::services::InvoiceService,
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresCustomerRepository, PostgresInvoiceRepository, PostgresInvoiceRowRepository,
      PostgresUserRepository,
    },
    rendering::OfficeDocumentRenderer,
    security::JwtTokenIssuer,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicery=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicery");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let invoice_row_repo = Arc::new(PostgresInvoiceRowRepository::new(db_pool.clone()));
  let customer_repo = Arc::new(PostgresCustomerRepository::new(db_pool.clone()));

  // Initialize token issuer and document renderer
  let token_issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(&config.auth));
  let renderer = Arc::new(OfficeDocumentRenderer::new());

  // Initialize domain services
  let auth_service = Arc::new(AuthService::new(user_repo.clone(), token_issuer.clone()));
  let invoice_service = Arc::new(InvoiceService::new(
    invoice_repo.clone(),
    invoice_row_repo.clone(),
    customer_repo.clone(),
    renderer,
  ));

  // Initialize auth use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service.clone()));
  let edit_user_use_case = Arc::new(EditUserUseCase::new(auth_service.clone()));
  let change_password_use_case = Arc::new(ChangePasswordUseCase::new(auth_service.clone()));
  let delete_user_use_case = Arc::new(DeleteUserUseCase::new(auth_service.clone()));

  // Initialize invoice use cases
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service.clone()));
  let get_invoice_details_use_case =
    Arc::new(GetInvoiceDetailsUseCase::new(invoice_service.clone()));
  let edit_invoice_use_case = Arc::new(EditInvoiceUseCase::new(invoice_service.clone()));
  let change_invoice_status_use_case =
    Arc::new(ChangeInvoiceStatusUseCase::new(invoice_service.clone()));
  let delete_invoice_use_case = Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone()));
  let export_invoice_use_case = Arc::new(ExportInvoiceUseCase::new(
    invoice_service.clone(),
    user_repo.clone(),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Authentication routes: register/login are public, the account
      // subtree is wrapped with AuthMiddleware
      .service(
        web::scope("/api/auth")
          .configure(|cfg| {
            configure_public_auth_routes(cfg, register_use_case.clone(), login_use_case.clone())
          })
          .service(
            web::scope("")
              .wrap(AuthMiddleware::new(token_issuer.clone()))
              .configure(|cfg| {
                configure_account_routes(
                  cfg,
                  get_user_use_case.clone(),
                  edit_user_use_case.clone(),
                  change_password_use_case.clone(),
                  delete_user_use_case.clone(),
                )
              }),
          ),
      )
      // Protected invoice routes
      .service(
        web::scope("/api/invoices")
          .wrap(AuthMiddleware::new(token_issuer.clone()))
          .configure(|cfg| {
            configure_invoice_routes(
              cfg,
              create_invoice_use_case.clone(),
              list_invoices_use_case.clone(),
              get_invoice_details_use_case.clone(),
              edit_invoice_use_case.clone(),
              change_invoice_status_use_case.clone(),
              delete_invoice_use_case.clone(),
              export_invoice_use_case.clone(),
            )
          }),
      )
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
