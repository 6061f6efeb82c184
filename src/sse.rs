use warp::sse::Event;

/// Create a chunk SSE event carrying one generated text fragment
pub fn create_chunk_event(text: String) -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({
        "chunk": text
    });

    Ok(Event::default().event("chunk").data(payload.to_string()))
}

/// Create an error SSE event for a mid-stream generation failure
pub fn create_error_event(message: String) -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({
        "error": message
    });

    Ok(Event::default().event("error").data(payload.to_string()))
}

/// Create a done SSE event to signal stream completion
pub fn create_done_event() -> Result<Event, std::convert::Infallible> {
    let payload = serde_json::json!({});

    Ok(Event::default().event("done").data(payload.to_string()))
}
