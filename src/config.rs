/// Text encoding applied when decoding URL parameter values.
pub const ENCODING: &str = "UTF-8";

pub fn bind_address() -> String {
    std::env::var("FUSION_BIND_ADDR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "0.0.0.0:80".to_string())
}

pub fn log_filter() -> String {
    std::env::var("FUSION_LOG")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "fusion_input=info,actix_web=info".to_string())
}
