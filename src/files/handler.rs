//! Method dispatch
//!
//! GET goes to the resolver; every other method is refused with 405
//! without looking at the path.

use crate::files::resolver::FileResolver;
use crate::http::request::Request;
use crate::http::response::Response;

#[derive(Debug, Clone)]
pub struct StaticHandler {
    resolver: FileResolver,
}

impl StaticHandler {
    pub fn new(resolver: FileResolver) -> Self {
        Self { resolver }
    }

    pub async fn handle(&self, req: &Request) -> Response {
        if req.is_get() {
            self.handle_get(req).await
        } else {
            Response::method_not_allowed()
        }
    }

    async fn handle_get(&self, req: &Request) -> Response {
        match self.resolver.resolve(&req.path).await {
            Some(file) => {
                tracing::debug!(path = %file.path.display(), "Serving file");
                Response::ok(file.contents, file.content_type)
            }
            None => Response::not_found(),
        }
    }
}
