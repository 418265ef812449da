use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::BoxedFilter;
use warp::http::Method;
use warp::hyper::body::Bytes;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

use crate::config::ServerConfig;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::session::TableSession;
use crate::store::{JsonFileStore, TableStore};

/// Everything the routes share: the resolved configuration and the table session.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    session: Arc<TableSession>,
}

impl AppContext {
    /// Opens the table stored under `config.data_dir`.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = Arc::new(JsonFileStore::new(config.data_dir.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: ServerConfig, store: Arc<dyn TableStore>) -> Result<Self, ServerError> {
        let policy = nebula_ai::create_policy(&config.bot_policy).ok_or_else(|| {
            ServerError::ConfigError(format!("unknown bot policy `{}`", config.bot_policy))
        })?;
        let session = Arc::new(TableSession::open(store, policy, config.seed));
        Ok(Self { config, session })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn session(&self) -> Arc<TableSession> {
        Arc::clone(&self.session)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Server task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes(&context))
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(
            %addr,
            policy = context.session.policy_name(),
            data_dir = %context.config.data_dir.display(),
            "table server listening"
        );

        let task = tokio::spawn(server_future);
        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host.as_str();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port));
        }

        let candidate = format!("{}:{}", host, config.port);
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(io_err) = err
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return ServerError::BindError(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        ServerError::ConfigError(err.to_string())
    }
}

/// The full HTTP surface: table routes, request logging and open CORS.
pub fn routes(context: &AppContext) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec!["content-type"]);

    let api = health_route()
        .or(login_route(context))
        .unify()
        .or(table_routes(context))
        .unify()
        .boxed();

    with_request_logging(api).with(cors)
}

fn health_route() -> BoxedFilter<(Response,)> {
    warp::path("health")
        .and(warp::get())
        .and(warp::path::end())
        .map(handlers::health)
        .boxed()
}

fn login_route(context: &AppContext) -> BoxedFilter<(Response,)> {
    warp::path!("login")
        .and(warp::post())
        .and(with_session(context.session()))
        .and(warp::body::bytes())
        .and_then(|session: Arc<TableSession>, body: Bytes| async move {
            Ok::<_, Infallible>(handlers::login(session, &body).await)
        })
        .boxed()
}

fn table_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
    let session = context.session();

    let state = warp::path!("table")
        .and(warp::get())
        .and(with_session(session.clone()))
        .and_then(|session: Arc<TableSession>| async move {
            Ok::<_, Infallible>(handlers::get_table(session).await)
        });

    let new_hand = warp::path!("table" / "new-hand")
        .and(warp::post())
        .and(with_session(session.clone()))
        .and_then(|session: Arc<TableSession>| async move {
            Ok::<_, Infallible>(handlers::new_hand(session).await)
        });

    let action = warp::path!("table" / "action")
        .and(warp::post())
        .and(with_session(session))
        .and(warp::body::bytes())
        .and_then(|session: Arc<TableSession>, body: Bytes| async move {
            Ok::<_, Infallible>(handlers::apply_action(session, &body).await)
        });

    state.or(new_hand).unify().or(action).unify().boxed()
}

fn with_session(
    session: Arc<TableSession>,
) -> impl Filter<Extract = (Arc<TableSession>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&session))
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Stops accepting connections and waits for in-flight requests.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.await?;
        }

        tracing::info!(addr = %self.addr, "table server stopped");
        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
