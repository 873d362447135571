/// GET /
/// Liveness check. Never touches the generation service.
pub async fn root_handler() -> &'static str {
    "Abir AI backend is running ✅"
}
