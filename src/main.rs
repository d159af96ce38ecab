use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};
use clap::Parser;

use pessoas_api::{
    http::routes,
    persistence::{dynamodb::DynamoDbStore, memory::MemoryStore, store::PersonStore},
    service::PersonService,
};

/// 🧍 Pessoas API, a single-resource CRUD service over a document store
#[derive(Parser, Debug)]
struct Cli {
    /// Port the HTTP server will run on
    #[clap(short, long, default_value = "3000")]
    port: u16,

    /// Address the HTTP server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// DynamoDB table holding the person documents. When omitted the
    /// service runs against a volatile in-memory store
    #[clap(short, long)]
    table: Option<String>,

    /// Log each HTTP request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let store: Arc<dyn PersonStore> = match &args.table {
        Some(table) => {
            let store = DynamoDbStore::connect(table.clone())
                .await
                .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;

            log::info!("connected to DynamoDB table [{}]", table);

            Arc::new(store)
        }
        None => {
            log::warn!("no --table given, using in-memory store; data will not survive restart");

            Arc::new(MemoryStore::new())
        }
    };

    let service = Data::new(PersonService::new(store));

    log::info!("starting HTTP server on {}:{}", args.address, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(routes::configure)
            .wrap(Cors::permissive())
            .wrap(Condition::new(args.log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}
