// Route definitions

use std::convert::Infallible;
use std::sync::Arc;

use uuid::Uuid;
use warp::Filter;

use crate::auth::require_bearer;
use crate::handlers;
use crate::history::SharedHistory;
use crate::llm::Generator;
use crate::models::ListParams;
use crate::store::Store;

fn with_store(
    store: Store,
) -> impl Filter<Extract = (Store,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn with_generator(
    generator: Arc<dyn Generator>,
) -> impl Filter<Extract = (Arc<dyn Generator>,), Error = Infallible> + Clone {
    warp::any().map(move || generator.clone())
}

fn with_history(
    history: SharedHistory,
) -> impl Filter<Extract = (SharedHistory,), Error = Infallible> + Clone {
    warp::any().map(move || history.clone())
}

pub fn configure_routes(
    store: Store,
    generator: Arc<dyn Generator>,
    history: SharedHistory,
    api_token: Arc<String>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // POST /generate
    let generate = warp::path("generate")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store.clone()))
        .and(with_generator(generator.clone()))
        .and_then(handlers::generate_handler);

    // GET /conversations/{id}
    let get_conversation = warp::path("conversations")
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::get_conversation_handler);

    // GET /conversations?skip&limit
    let list_conversations = warp::path("conversations")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ListParams>())
        .and(with_store(store.clone()))
        .and_then(handlers::list_conversations_handler);

    // POST /users
    let create_user = warp::path("users")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store.clone()))
        .and_then(handlers::create_user_handler);

    // GET /users/{id}
    let get_user = warp::path("users")
        .and(warp::path::param::<Uuid>())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::get_user_handler);

    // GET /users/{id}/sessions
    let list_user_sessions = warp::path("users")
        .and(warp::path::param::<Uuid>())
        .and(warp::path("sessions"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::list_user_sessions_handler);

    // POST /sessions
    let create_session = warp::path("sessions")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store.clone()))
        .and_then(handlers::create_session_handler);

    // GET /sessions/{id}/messages
    let list_session_messages = warp::path("sessions")
        .and(warp::path::param::<Uuid>())
        .and(warp::path("messages"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::list_session_messages_handler);

    // POST /messages
    let create_message = warp::path("messages")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_store(store))
        .and(with_generator(generator.clone()))
        .and_then(handlers::create_message_handler);

    // POST /chat/stream
    let chat_stream = warp::path("chat")
        .and(warp::path("stream"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_history(history.clone()))
        .and(with_generator(generator.clone()))
        .and_then(handlers::chat_stream_handler);

    // POST /chat
    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_history(history))
        .and(with_generator(generator))
        .and_then(handlers::chat_handler);

    // Combine routes behind the bearer check
    let routes = generate
        .or(get_conversation)
        .or(list_conversations)
        .or(create_user)
        .or(get_user)
        .or(list_user_sessions)
        .or(create_session)
        .or(list_session_messages)
        .or(create_message)
        .or(chat_stream)
        .or(chat);

    require_bearer(api_token).and(routes)
}
