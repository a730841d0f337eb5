use crate::{config::Settings, error, info, server::start_api_server, warning};

/// Serves the web form until the process is stopped.
///
/// With `open` set, the form is opened in the default browser once the server
/// task is running.
pub async fn serve(settings: Settings, open: bool) {
    let url = format!("http://{}/", settings.server_address);
    info!("Serving the playlist credits form on {}", url);

    let server = tokio::spawn(async move { start_api_server(settings).await });

    if open && webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }

    match server.await {
        Ok(Ok(())) => info!("Server stopped"),
        Ok(Err(e)) => error!("Server failed. Err: {}", e),
        Err(e) => error!("Server task join error: {}", e),
    }
}
