//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebouncedEvent};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::{Site, CONFIG_FILE};

/// Websocket endpoint the injected script connects to
const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Options for `serve`
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub ip: String,
    pub port: u16,
    /// Rebuild on changes and push reloads to open pages
    pub watch: bool,
    /// Open the site in the default browser
    pub open: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 8000,
            watch: true,
            open: false,
        }
    }
}

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the development server
pub async fn start(site: &Site, options: &ServeOptions) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: site.public_dir.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: options.watch,
    });

    let app = Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if options.ip == "localhost" {
        "127.0.0.1"
    } else {
        options.ip.as_str()
    };
    let addr: SocketAddr = format!("{}:{}", bind_ip, options.port).parse()?;

    let url = format!("http://{}:{}{}", options.ip, options.port, site.config.root);
    println!("Server running at {}", url);
    if options.watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if options.open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if options.watch {
        let site = site.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_rebuild(&site, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Rebuild the site whenever posts or the config change
fn watch_and_rebuild(site: &Site, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(e)).collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits can move content or output directories
                let rebuilt = Site::new(&site.base_dir).and_then(|fresh| fresh.build());
                match rebuilt {
                    Ok(()) => {
                        tracing::info!("Rebuilt successfully");
                        let _ = reload_tx.send(());
                    }
                    Err(e) => tracing::error!("Build failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Editor swap files and VCS internals never trigger a rebuild
fn is_relevant(event: &DebouncedEvent) -> bool {
    let path_str = event.path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serves files from the public directory, injecting the reload script into pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let file_path = resolve_file(&state.public_dir, request.uri().path());

    if is_html(&file_path) && state.live_reload {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Map a request path to a file under `public_dir`
fn resolve_file(public_dir: &Path, request_path: &str) -> PathBuf {
    let clean_path = request_path.trim_start_matches('/');
    if clean_path.is_empty() {
        return public_dir.join("index.html");
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        return candidate.join("index.html");
    }
    if candidate.exists() {
        return candidate;
    }

    let with_html = public_dir.join(format!("{}.html", clean_path.trim_end_matches('/')));
    if with_html.exists() {
        with_html
    } else {
        candidate
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false)
}

fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains(LIVE_RELOAD_PATH));
        assert!(html.ends_with("</body>\n</html>"));
        assert_eq!(html.matches("</body>").count(), 1);

        let bare = inject_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p>"));
        assert!(bare.contains("new WebSocket"));
    }

    #[test]
    fn test_resolve_file() {
        let dir = TempDir::new().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("hello")).unwrap();
        fs::write(public.join("index.html"), "home").unwrap();
        fs::write(public.join("hello/index.html"), "post").unwrap();
        fs::write(public.join("about.html"), "about").unwrap();

        assert_eq!(resolve_file(public, "/"), public.join("index.html"));
        assert_eq!(resolve_file(public, "/hello/"), public.join("hello/index.html"));
        assert_eq!(resolve_file(public, "/hello"), public.join("hello/index.html"));
        assert_eq!(resolve_file(public, "/about"), public.join("about.html"));
        assert_eq!(resolve_file(public, "/missing.png"), public.join("missing.png"));
    }

    #[test]
    fn test_is_html() {
        assert!(is_html(Path::new("a/index.html")));
        assert!(!is_html(Path::new("a/cover.png")));
        assert!(!is_html(Path::new("a")));
    }

    #[test]
    fn test_default_options() {
        let options = ServeOptions::default();
        assert_eq!(options.port, 8000);
        assert!(options.watch);
    }
}
