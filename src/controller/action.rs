use crate::controller::CrudController;
use crate::request::Request;
use axum::http::Method;
use axum::response::Response;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One verb-handler pair of the REST convention.
///
/// | Action  | Method  | Path         |
/// |---------|---------|--------------|
/// | Index   | GET     | `/`          |
/// | Create  | GET     | `/create`    |
/// | Store   | POST    | `/`          |
/// | Show    | GET     | `/{id}`      |
/// | Edit    | GET     | `/{id}/edit` |
/// | Update  | PUT     | `/{id}`      |
/// | Patch   | PATCH   | `/{id}`      |
/// | Destroy | DELETE  | `/{id}`      |
/// | Head    | HEAD    | `/`          |
/// | Options | OPTIONS | `/`          |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Index,
    Create,
    Store,
    Show,
    Edit,
    Update,
    Patch,
    Destroy,
    Head,
    Options,
}

impl Action {
    pub fn method(self) -> Method {
        match self {
            Action::Index | Action::Create | Action::Show | Action::Edit => Method::GET,
            Action::Store => Method::POST,
            Action::Update => Method::PUT,
            Action::Patch => Method::PATCH,
            Action::Destroy => Method::DELETE,
            Action::Head => Method::HEAD,
            Action::Options => Method::OPTIONS,
        }
    }

    /// Conventional path relative to the resource root.
    pub fn path(self) -> &'static str {
        match self {
            Action::Index | Action::Store | Action::Head | Action::Options => "/",
            Action::Create => "/create",
            Action::Show | Action::Update | Action::Patch | Action::Destroy => "/{id}",
            Action::Edit => "/{id}/edit",
        }
    }

    /// Whether the action addresses a single item rather than the collection.
    pub fn is_member(self) -> bool {
        self.path().starts_with("/{id}")
    }

    /// Invoke the handler this action names.
    pub async fn dispatch<C>(self, controller: &C, request: Request) -> Response
    where
        C: CrudController + ?Sized,
    {
        match self {
            Action::Index => controller.index(request).await,
            Action::Create => controller.create(request).await,
            Action::Store => controller.store(request).await,
            Action::Show => controller.show(request).await,
            Action::Edit => controller.edit(request).await,
            Action::Update => controller.update(request).await,
            Action::Patch => controller.patch(request).await,
            Action::Destroy => controller.destroy(request).await,
            Action::Head => controller.head(request).await,
            Action::Options => controller.options(request).await,
        }
    }
}
