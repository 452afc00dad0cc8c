// SPDX-FileCopyrightText: 2026 Adminkit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route table a plugin fills during initialization.
//!
//! The table is read by the hosting application through
//! [`Plugin::get_handler`](crate::Plugin::get_handler) and mounted under the
//! plugin's prefix with [`into_router`].

use std::collections::BTreeMap;

use arc_swap::ArcSwap;
use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{self, MethodRouter};
use axum::Router;

/// Identifies one route: a path plus an upper-case HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteKey {
    pub path: String,
    pub method: String,
}

impl RouteKey {
    /// Paths are stored with a leading `/`; `"index"` becomes `"/index"`.
    pub fn new(path: impl Into<String>, method: &Method) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            path,
            method: method.as_str().to_ascii_uppercase(),
        }
    }
}

/// Route -> handler bindings contributed by one plugin.
pub type HandlerMap = BTreeMap<RouteKey, MethodRouter>;

/// Owner of a plugin's route table.
///
/// Registration swaps in a new map so readers always see a complete table.
#[derive(Default)]
pub struct App {
    handlers: ArcSwap<HandlerMap>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `router` to `key`, replacing an earlier binding for the same key.
    pub fn insert(&self, key: RouteKey, router: MethodRouter) {
        self.handlers.rcu(|current| {
            let mut next = HandlerMap::clone(current);
            next.insert(key.clone(), router.clone());
            next
        });
    }

    pub fn get<H, T>(&self, path: &str, handler: H)
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.insert(RouteKey::new(path, &Method::GET), routing::get(handler));
    }

    pub fn post<H, T>(&self, path: &str, handler: H)
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.insert(RouteKey::new(path, &Method::POST), routing::post(handler));
    }

    pub fn put<H, T>(&self, path: &str, handler: H)
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.insert(RouteKey::new(path, &Method::PUT), routing::put(handler));
    }

    pub fn delete<H, T>(&self, path: &str, handler: H)
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.insert(RouteKey::new(path, &Method::DELETE), routing::delete(handler));
    }

    /// Snapshot of the current bindings.
    pub fn handlers(&self) -> HandlerMap {
        HandlerMap::clone(&self.handlers.load())
    }

    pub fn len(&self) -> usize {
        self.handlers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.load().is_empty()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.load();
        let routes: Vec<String> = handlers
            .keys()
            .map(|k| format!("{} {}", k.method, k.path))
            .collect();
        f.debug_struct("App").field("routes", &routes).finish()
    }
}

/// Mounts `handlers` under `/{prefix}`; an empty or `/` prefix mounts at root.
pub fn into_router(handlers: &HandlerMap, prefix: &str) -> Router {
    let router = handlers
        .iter()
        .fold(Router::new(), |router, (key, method_router)| {
            router.route(&key.path, method_router.clone())
        });

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        router
    } else {
        Router::new().nest(&format!("/{prefix}"), router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn hello() -> &'static str {
        "hello"
    }

    async fn created() -> StatusCode {
        StatusCode::CREATED
    }

    #[test]
    fn registers_routes_by_path_and_method() {
        let app = App::new();
        app.get("/items", hello);
        app.post("/items", created);
        app.get("/items", hello);

        let handlers = app.handlers();
        assert_eq!(handlers.len(), 2);
        assert!(handlers.contains_key(&RouteKey::new("/items", &Method::GET)));
        assert!(handlers.contains_key(&RouteKey::new("/items", &Method::POST)));
    }

    #[test]
    fn snapshot_is_stable() {
        let app = App::new();
        app.get("/a", hello);
        let snapshot = app.handlers();
        app.get("/b", hello);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(app.len(), 2);
    }

    #[tokio::test]
    async fn router_mounts_under_prefix() {
        let app = App::new();
        app.get("/items", hello);
        app.post("/items", created);
        let router = into_router(&app.handlers(), "shop");

        let res = router
            .clone()
            .oneshot(Request::get("/shop/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = router
            .clone()
            .oneshot(Request::post("/shop/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = router
            .oneshot(Request::get("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn relative_paths_get_a_leading_slash() {
        let app = App::new();
        app.get("index", hello);
        app.get("/index", hello);

        let handlers = app.handlers();
        assert_eq!(handlers.len(), 1);
        assert!(handlers.contains_key(&RouteKey::new("/index", &Method::GET)));

        let res = into_router(&handlers, "shop")
            .oneshot(Request::get("/shop/index").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }
}
