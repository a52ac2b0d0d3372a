#[cfg(not(target_arch = "wasm32"))]
mod native {
    use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    mod adapter {
        use actix_web::HttpRequest;
        use spin_sdk::http::{Method, Request};

        pub fn actix_to_spin_request(
            req: &HttpRequest,
            body: actix_web::web::Bytes,
        ) -> anyhow::Result<Request> {
            let method = match req.method().as_str() {
                "GET" => Method::Get,
                "POST" => Method::Post,
                "PUT" => Method::Put,
                "DELETE" => Method::Delete,
                "HEAD" => Method::Head,
                "OPTIONS" => Method::Options,
                "PATCH" => Method::Patch,
                other => anyhow::bail!("unsupported method {}", other),
            };

            let uri = req.uri().to_string();
            let body_vec = body.to_vec();

            let mut req_builder = Request::builder();
            let method_set = req_builder.method(method);
            let uri_set = method_set.uri(&uri);

            // Copy headers
            let mut with_headers = uri_set;
            for (name, value) in req.headers() {
                if let Ok(val_str) = value.to_str() {
                    with_headers = with_headers.header(name.as_str(), val_str);
                }
            }

            Ok(with_headers.body(body_vec).build())
        }

        pub fn spin_to_actix_response(spin_resp: spin_sdk::http::Response) -> actix_web::HttpResponse {
            let status = *spin_resp.status();
            let content_type = spin_resp
                .header("Content-Type")
                .and_then(|value| value.as_str())
                .unwrap_or("application/octet-stream")
                .to_string();
            let body = spin_resp.body().to_vec();

            let mut response = actix_web::HttpResponse::build(
                actix_web::http::StatusCode::from_u16(status)
                    .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
            );

            response.content_type(content_type).body(body)
        }
    }

    pub fn init_logging() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(fusion_input::config::log_filter()))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    pub async fn run() -> std::io::Result<()> {
        let bind_address = fusion_input::config::bind_address();
        tracing::info!(bind_address = %bind_address, "fusion dev host listening");

        HttpServer::new(|| App::new().default_service(web::route().to(handle_all)))
            .bind(bind_address.as_str())?
            .run()
            .await
    }

    async fn handle_all(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let spin_req = match adapter::actix_to_spin_request(&req, body) {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(error = %err, "could not adapt request");
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({"error": "Invalid request"}));
            }
        };

        match fusion_input::handlers::handle_request(spin_req) {
            Ok(spin_resp) => adapter::spin_to_actix_response(spin_resp),
            Err(err) => {
                tracing::error!(error = %err, "request handling failed");
                adapter::spin_to_actix_response(fusion_input::ApiError::from(err).into())
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    native::init_logging();
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
