//! Client routes and the navigator that views follow.

use std::fmt;
use std::str::FromStr;

use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    Post(Uuid),
    NewPost,
    EditPost(Uuid),
    Category(Uuid),
    Categories,
    NewCategory,
    EditCategory(Uuid),
    Login,
    Register,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Post(id) => write!(f, "/posts/{id}"),
            Route::NewPost => write!(f, "/posts/new"),
            Route::EditPost(id) => write!(f, "/posts/{id}/edit"),
            Route::Category(id) => write!(f, "/categories/{id}"),
            Route::Categories => write!(f, "/categories"),
            Route::NewCategory => write!(f, "/categories/new"),
            Route::EditCategory(id) => write!(f, "/categories/{id}/edit"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let id = |raw: &str| Uuid::parse_str(raw).map_err(|_| format!("unknown route `{path}`"));

        match segments.as_slice() {
            [""] => Ok(Route::Home),
            ["login"] => Ok(Route::Login),
            ["register"] => Ok(Route::Register),
            ["posts", "new"] => Ok(Route::NewPost),
            ["posts", raw] => Ok(Route::Post(id(raw)?)),
            ["posts", raw, "edit"] => Ok(Route::EditPost(id(raw)?)),
            ["categories"] => Ok(Route::Categories),
            ["categories", "new"] => Ok(Route::NewCategory),
            ["categories", raw] => Ok(Route::Category(id(raw)?)),
            ["categories", raw, "edit"] => Ok(Route::EditCategory(id(raw)?)),
            _ => Err(format!("unknown route `{path}`")),
        }
    }
}

/// Current route, observable through a watch channel.
#[derive(Clone)]
pub struct Navigator {
    route: watch::Sender<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (route, _) = watch::channel(initial);
        Self { route }
    }

    pub fn navigate(&self, to: Route) {
        tracing::debug!(route = %to, "Navigating");
        self.route.send_replace(to);
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
