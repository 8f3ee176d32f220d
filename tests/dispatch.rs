//! Integration tests for routing and dispatch.

mod common;

use common::{dispatcher, fixed_handler, EchoHandler, RejectingFilters};
use http::{Method, StatusCode};
use std::sync::Arc;
use switchboard::{Dispatcher, HttpRequest, PassthroughFilters, RouteTable, RouterConfig, Session};

#[tokio::test]
async fn test_empty_table_is_not_found() {
    let table = Arc::new(RouteTable::new());
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/anything"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unregistered_path_is_not_found() {
    let table = Arc::new(RouteTable::new());
    table
        .register("/user/{1}", Arc::new(EchoHandler::new(1)), &[], vec![])
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/admin"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unbound_method_is_method_not_allowed() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/user/{1}",
            Arc::new(EchoHandler::new(1)),
            &[Method::GET, Method::POST],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::DELETE, "/user/42"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::POST, "/user/42"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_path_parameters_are_positioned() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/user/{1}/post/{2}",
            Arc::new(EchoHandler::new(2)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/user/42/post/7"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), "42|7");
}

#[tokio::test]
async fn test_reversed_placeholders_swap_positions() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/user/{2}/post/{1}",
            Arc::new(EchoHandler::new(2)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/user/alice/post/7"), None)
        .await;
    assert_eq!(resp.body(), "7|alice");
}

#[tokio::test]
async fn test_query_parameter_extraction() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/search?q={1}",
            Arc::new(EchoHandler::new(1)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(
            HttpRequest::from_target(Method::GET, "/search?q=hello"),
            None,
        )
        .await;
    assert_eq!(resp.body(), "hello");
}

#[tokio::test]
async fn test_query_overlays_path_parameter() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/page/{1}?override={1}",
            Arc::new(EchoHandler::new(1)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(
            HttpRequest::from_target(Method::GET, "/page/from-path?override=from-query"),
            None,
        )
        .await;
    assert_eq!(resp.body(), "from-query");
}

#[tokio::test]
async fn test_unreferenced_positions_stay_empty() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/only/{2}",
            Arc::new(EchoHandler::new(2)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/only/x"), None)
        .await;
    assert_eq!(resp.body(), "|x");
}

#[tokio::test]
async fn test_first_registered_route_wins() {
    let table = Arc::new(RouteTable::new());
    table
        .register("/v/{1}", fixed_handler("wildcard"), &[Method::GET], vec![])
        .unwrap();
    table
        .register("/v/fixed", fixed_handler("literal"), &[Method::GET], vec![])
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/v/fixed"), None)
        .await;
    assert_eq!(resp.body(), "wildcard");
}

#[tokio::test]
async fn test_filter_reject_short_circuits_handler() {
    let handler = Arc::new(EchoHandler::new(0));
    let calls = handler.calls.clone();

    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/guarded",
            handler,
            &[Method::GET],
            vec!["deny-all".to_string()],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = Dispatcher::new(
        table,
        Arc::new(RejectingFilters {
            reject_on: "deny-all".to_string(),
        }),
        RouterConfig::default(),
    );

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/guarded"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.body(), "rejected by filter");
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_filter_pass_reaches_handler() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/guarded",
            fixed_handler("served"),
            &[Method::GET],
            vec!["metrics".to_string()],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = Dispatcher::new(
        table,
        Arc::new(RejectingFilters {
            reject_on: "deny-all".to_string(),
        }),
        RouterConfig::default(),
    );

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/guarded"), None)
        .await;
    assert_eq!(resp.body(), "served");
}

#[tokio::test]
async fn test_not_found_carries_pending_session_cookie() {
    let table = Arc::new(RouteTable::new());
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(
            HttpRequest::new(Method::GET, "/missing"),
            Some(Session::with_id("sess-1")),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.cookies().len(), 1);
    assert_eq!(resp.cookies()[0].name(), "JSESSIONID");
    assert_eq!(resp.cookies()[0].value(), "sess-1");
}

#[tokio::test]
async fn test_method_not_allowed_carries_pending_session_cookie() {
    let table = Arc::new(RouteTable::new());
    table
        .register("/a", fixed_handler("x"), &[Method::GET], vec![])
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(
            HttpRequest::new(Method::PUT, "/a"),
            Some(Session::with_id("sess-2")),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.cookies()[0].value(), "sess-2");
}

#[tokio::test]
async fn test_session_cookie_name_from_config() {
    let config: RouterConfig = toml::from_str(
        r#"
        [session]
        cookie_name = "SID"
        "#,
    )
    .unwrap();

    let table = Arc::new(RouteTable::new());
    table
        .register("/a", fixed_handler("x"), &[Method::GET], vec![])
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = Dispatcher::new(table, Arc::new(PassthroughFilters), config);

    let resp = dispatcher
        .dispatch(
            HttpRequest::new(Method::GET, "/a"),
            Some(Session::with_id("id-9")),
        )
        .await;
    assert_eq!(resp.cookies()[0].name(), "SID");
}

#[tokio::test]
async fn test_dispatch_before_finalize_is_not_found() {
    let table = Arc::new(RouteTable::new());
    table
        .register("/a", fixed_handler("x"), &[Method::GET], vec![])
        .unwrap();
    let dispatcher = dispatcher(table);

    let resp = dispatcher
        .dispatch(HttpRequest::new(Method::GET, "/a"), None)
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_dispatch_on_shared_dispatcher() {
    let table = Arc::new(RouteTable::new());
    table
        .register(
            "/user/{1}",
            Arc::new(EchoHandler::new(1)),
            &[Method::GET],
            vec![],
        )
        .unwrap();
    table.finalize().unwrap();
    let dispatcher = Arc::new(dispatcher(table));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let dispatcher = dispatcher.clone();
        tasks.push(tokio::spawn(async move {
            let resp = dispatcher
                .dispatch(
                    HttpRequest::new(Method::GET, format!("/user/{i}")),
                    None,
                )
                .await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(resp.body(), i.to_string());
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }
}
